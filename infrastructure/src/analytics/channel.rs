//! Bounded, non-blocking analytics queue

use personachain_application::ports::analytics::AnalyticsSink;
use personachain_domain::AnalyticsEvent;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Failure while handling one analytics event
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write event: {0}")]
    Io(#[from] std::io::Error),
}

/// Consumer-side processing of analytics events
pub trait AnalyticsHandler: Send + Sync {
    fn handle(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Producer half: `publish` never blocks and never fails
#[derive(Clone)]
pub struct ChannelAnalyticsSink {
    tx: mpsc::Sender<AnalyticsEvent>,
    dropped: Arc<AtomicU64>,
}

/// Consumer half: owns the task draining the queue
pub struct AnalyticsWorker {
    handle: JoinHandle<u64>,
    cancel: CancellationToken,
}

impl ChannelAnalyticsSink {
    /// Create the queue and spawn its consumer on the current runtime
    pub fn spawn(capacity: usize, handler: Arc<dyn AnalyticsHandler>) -> (Self, AnalyticsWorker) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(consume(rx, handler, cancel.clone()));

        (
            Self {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            AnalyticsWorker { handle, cancel },
        )
    }

    /// Events discarded because the queue was full or closed
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl AnalyticsSink for ChannelAnalyticsSink {
    fn publish(&self, event: AnalyticsEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                debug!("Analytics queue full, dropped {}", event.event_type());
            }
            Err(TrySendError::Closed(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                debug!("Analytics consumer stopped, dropped {}", event.event_type());
            }
        }
    }
}

impl AnalyticsWorker {
    /// Stop the consumer after draining what is already queued.
    ///
    /// Returns the number of events handled over the worker's lifetime.
    pub async fn shutdown(self) -> u64 {
        self.cancel.cancel();
        match self.handle.await {
            Ok(handled) => handled,
            Err(e) => {
                warn!("Analytics consumer ended abnormally: {}", e);
                0
            }
        }
    }
}

async fn consume(
    mut rx: mpsc::Receiver<AnalyticsEvent>,
    handler: Arc<dyn AnalyticsHandler>,
    cancel: CancellationToken,
) -> u64 {
    let mut handled = 0u64;
    let mut dispatch = |event: AnalyticsEvent| {
        if let Err(e) = handler.handle(&event) {
            warn!("Analytics handler failed on {}: {}", event.event_type(), e);
        }
        handled += 1;
    };

    loop {
        let event = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            event = rx.recv() => event,
        };
        match event {
            Some(event) => dispatch(event),
            None => break,
        }
    }

    rx.close();
    while let Ok(event) = rx.try_recv() {
        dispatch(event);
    }
    trace!("Analytics consumer drained");
    handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use personachain_domain::{DenialReason, SubscriberId, SubscriptionTier};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collecting(Mutex<Vec<&'static str>>);

    impl AnalyticsHandler for Collecting {
        fn handle(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
            self.0.lock().unwrap().push(event.event_type());
            Ok(())
        }
    }

    struct Failing;

    impl AnalyticsHandler for Failing {
        fn handle(&self, _event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
            Err(AnalyticsError::Io(std::io::Error::other("disk full")))
        }
    }

    fn event() -> AnalyticsEvent {
        AnalyticsEvent::denied(
            &SubscriberId::new("u1").unwrap(),
            SubscriptionTier::Free,
            &DenialReason::MonthlyQueriesExceeded,
            1500,
        )
    }

    #[tokio::test]
    async fn test_events_reach_handler() {
        let handler = Arc::new(Collecting::default());
        let (sink, worker) = ChannelAnalyticsSink::spawn(8, handler.clone());

        sink.publish(event());
        sink.publish(event());

        assert_eq!(worker.shutdown().await, 2);
        assert_eq!(handler.0.lock().unwrap().len(), 2);
        assert_eq!(sink.dropped(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_full_queue_drops_without_blocking() {
        let handler = Arc::new(Collecting::default());
        let (sink, worker) = ChannelAnalyticsSink::spawn(2, handler.clone());

        // The consumer cannot run until this task yields, so the queue fills.
        for _ in 0..5 {
            sink.publish(event());
        }
        assert_eq!(sink.dropped(), 3);

        assert_eq!(worker.shutdown().await, 2);
    }

    #[tokio::test]
    async fn test_handler_errors_are_swallowed() {
        let (sink, worker) = ChannelAnalyticsSink::spawn(4, Arc::new(Failing));
        sink.publish(event());
        sink.publish(event());
        assert_eq!(worker.shutdown().await, 2);
    }

    #[tokio::test]
    async fn test_publish_after_shutdown_counts_drop() {
        let (sink, worker) = ChannelAnalyticsSink::spawn(4, Arc::new(Collecting::default()));
        worker.shutdown().await;
        sink.publish(event());
        assert_eq!(sink.dropped(), 1);
    }
}
