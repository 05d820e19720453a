//! Usage sinks

use super::event::{UsageEvent, UsageSummary};
use crate::error::AulaResult;
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

/// Destination for usage events (billing service, database, log)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageSink: Send + Sync {
    async fn record(&self, event: UsageEvent) -> AulaResult<()>;
}

/// Emits each event as a structured log line
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingUsageSink;

#[async_trait]
impl UsageSink for TracingUsageSink {
    async fn record(&self, event: UsageEvent) -> AulaResult<()> {
        info!(
            event_id = %event.id,
            engine = %event.engine_id,
            workspace_id = event.workspace_id.as_deref().unwrap_or("-"),
            source = event.source.as_deref().unwrap_or("-"),
            credits = event.billed_credits(),
            "engine usage"
        );
        Ok(())
    }
}

/// Keeps events in memory
#[derive(Debug, Default)]
pub struct MemoryUsageSink {
    events: Mutex<Vec<UsageEvent>>,
}

impl MemoryUsageSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UsageEvent> {
        self.events.lock().clone()
    }

    pub fn summary(&self) -> UsageSummary {
        UsageSummary::from_events(self.events.lock().iter())
    }
}

#[async_trait]
impl UsageSink for MemoryUsageSink {
    async fn record(&self, event: UsageEvent) -> AulaResult<()> {
        self.events.lock().push(event);
        Ok(())
    }
}
