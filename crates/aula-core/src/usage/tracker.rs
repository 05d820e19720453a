//! Fire-and-forget usage tracking

use super::event::UsageEvent;
use super::sink::{TracingUsageSink, UsageSink};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Hands usage events to a sink without blocking the caller
#[derive(Clone)]
pub struct UsageTracker {
    sink: Arc<dyn UsageSink>,
}

impl UsageTracker {
    pub fn new(sink: Arc<dyn UsageSink>) -> Self {
        Self { sink }
    }

    /// Tracker that only logs events
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingUsageSink))
    }

    /// Record `event` on a detached task
    ///
    /// Sink errors are logged at debug level and dropped. Outside a tokio
    /// runtime the event is dropped. The handle is only useful to tests.
    pub fn track(&self, event: UsageEvent) -> Option<JoinHandle<()>> {
        let Ok(handle) = Handle::try_current() else {
            debug!(engine = %event.engine_id, "no async runtime, usage event dropped");
            return None;
        };

        let sink = Arc::clone(&self.sink);
        Some(handle.spawn(async move {
            let engine = event.engine_id;
            if let Err(e) = sink.record(event).await {
                debug!(engine = %engine, error = %e, "usage tracking failed");
            }
        }))
    }
}

impl Default for UsageTracker {
    fn default() -> Self {
        Self::tracing()
    }
}

impl std::fmt::Debug for UsageTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageTracker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineId;
    use crate::error::AulaError;
    use crate::usage::{MemoryUsageSink, MockUsageSink};

    #[tokio::test]
    async fn test_track_records_event() {
        let sink = Arc::new(MemoryUsageSink::new());
        let tracker = UsageTracker::new(sink.clone());

        let handle = tracker
            .track(UsageEvent::new(EngineId::Green).with_workspace(Some("ws-9".into())))
            .unwrap();
        handle.await.unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].workspace_id.as_deref(), Some("ws-9"));
        assert_eq!(events[0].credits_consumed, Some(3));
    }

    #[tokio::test]
    async fn test_sink_errors_are_swallowed() {
        let mut sink = MockUsageSink::new();
        sink.expect_record()
            .times(1)
            .returning(|_| Err(AulaError::usage("billing service down")));
        let tracker = UsageTracker::new(Arc::new(sink));

        let handle = tracker.track(UsageEvent::new(EngineId::Red)).unwrap();
        assert!(handle.await.is_ok());
    }

    #[test]
    fn test_without_runtime_event_is_dropped() {
        let tracker = UsageTracker::default();
        assert!(tracker.track(UsageEvent::new(EngineId::Orange)).is_none());
    }
}
