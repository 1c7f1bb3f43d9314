//! Analytics sink adapters
//!
//! [`ChannelAnalyticsSink`] implements the application's
//! [`AnalyticsSink`](personachain_application::AnalyticsSink) port with a
//! bounded queue and one consumer task. What the consumer does with each
//! event is an [`AnalyticsHandler`]: the tracing log by default, or a
//! JSONL file.

mod channel;
mod handlers;

pub use channel::{AnalyticsError, AnalyticsHandler, AnalyticsWorker, ChannelAnalyticsSink};
pub use handlers::{JsonlAnalyticsHandler, TracingAnalyticsHandler};
