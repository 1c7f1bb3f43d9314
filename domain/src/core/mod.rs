//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] - a validated query to fan out to the personas
//! - [`subscriber::SubscriberId`] - the account a request is billed against
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod query;
pub mod string;
pub mod subscriber;
