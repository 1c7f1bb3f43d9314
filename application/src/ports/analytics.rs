//! Analytics port
//!
//! Publishing is synchronous, non-blocking and non-fallible: the
//! orchestrator hands the event over and moves on. Delivery is best-effort.

use personachain_domain::AnalyticsEvent;

pub trait AnalyticsSink: Send + Sync {
    /// Enqueue an event; may silently drop it
    fn publish(&self, event: AnalyticsEvent);
}

/// No-op sink for tests and when analytics are disabled
pub struct NoAnalytics;

impl AnalyticsSink for NoAnalytics {
    fn publish(&self, _event: AnalyticsEvent) {}
}
