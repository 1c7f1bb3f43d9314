//! Use cases (application services)
//!
//! - [`quota_ledger::QuotaLedger`] - admission checks and usage recording
//! - [`reason::ReasonUseCase`] - the persona fan-out/fan-in orchestrator

pub mod quota_ledger;
pub mod reason;

#[cfg(test)]
pub(crate) mod test_support;
