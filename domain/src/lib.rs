//! Domain layer for personachain
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Personas
//!
//! A persona is a fixed prompting strategy. The same query is fanned out to
//! every eligible persona, each producing one independent [`ReasoningStep`].
//!
//! ## Tiers and Quota
//!
//! - **SubscriptionTier**: `Free < Pro < Enterprise`, each bound to limits
//! - **Admission**: the gate evaluated before any persona work starts
//!
//! ## Synthesis
//!
//! A [`SynthesisStrategy`] reduces the ordered steps into one narrative,
//! which feeds the final-answer call and the [`ReasoningChain`] record.

pub mod analytics;
pub mod config;
pub mod core;
pub mod persona;
pub mod quota;
pub mod reasoning;
pub mod synthesis;
pub mod tier;

// Re-export commonly used types
pub use analytics::AnalyticsEvent;
pub use config::OutputFormat;
pub use core::{error::DomainError, query::Query, subscriber::SubscriberId};
pub use persona::{PersonaConfig, PersonaRegistry};
pub use quota::{AccountingPeriod, Admission, DenialReason, UsageRecord};
pub use reasoning::{ReasoningChain, ReasoningStep, ReasoningType, step_confidence};
pub use synthesis::{NO_REASONING_SENTINEL, SynthesisStrategy};
pub use tier::{Limit, SubscriptionTier, TierError, TierLimits, TierTable};
