//! Personas and the persona registry
//!
//! A persona is a fixed prompting strategy applied to the same query. The
//! [`PersonaRegistry`] keeps personas in definition order; that order is the
//! step order of every [`ReasoningChain`](crate::reasoning::ReasoningChain).

pub mod config;
pub mod registry;

pub use config::PersonaConfig;
pub use registry::PersonaRegistry;
