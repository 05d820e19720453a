//! Usage event records

use crate::engine::EngineId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One successful, non-empty engine call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub engine_id: EngineId,
    pub workspace_id: Option<String>,
    pub source: Option<String>,
    /// Set only for engines that cost more than one credit per call
    pub credits_consumed: Option<u32>,
}

impl UsageEvent {
    pub fn new(engine_id: EngineId) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_id,
            workspace_id: None,
            source: None,
            credits_consumed: engine_id.profile().reported_credits(),
        }
    }

    pub fn with_workspace(mut self, workspace_id: Option<String>) -> Self {
        self.workspace_id = workspace_id;
        self
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    /// Credits billed for this call; unreported means one
    pub fn billed_credits(&self) -> u32 {
        self.credits_consumed.unwrap_or(1)
    }
}

/// Aggregate over recorded events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageSummary {
    pub calls: u64,
    pub credits: u64,
    pub calls_by_engine: BTreeMap<EngineId, u64>,
}

impl UsageSummary {
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a UsageEvent>) -> Self {
        let mut summary = Self::default();
        for event in events {
            summary.calls += 1;
            summary.credits += u64::from(event.billed_credits());
            *summary.calls_by_engine.entry(event.engine_id).or_insert(0) += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_green_reports_credits() {
        assert_eq!(UsageEvent::new(EngineId::Green).credits_consumed, Some(3));
        assert_eq!(UsageEvent::new(EngineId::Orange).credits_consumed, None);
    }

    #[test]
    fn test_summary_counts_credits() {
        let events = vec![
            UsageEvent::new(EngineId::Green).with_workspace(Some("ws-1".into())),
            UsageEvent::new(EngineId::Red),
            UsageEvent::new(EngineId::Red).with_source(Some("pei".into())),
        ];
        let summary = UsageSummary::from_events(&events);

        assert_eq!(summary.calls, 3);
        assert_eq!(summary.credits, 5);
        assert_eq!(summary.calls_by_engine[&EngineId::Red], 2);
    }

    #[test]
    fn test_event_serializes_engine_label() {
        let json = serde_json::to_value(UsageEvent::new(EngineId::Yellow)).unwrap();
        assert_eq!(json["engine_id"], "yellow");
        assert!(json["credits_consumed"].is_null());
    }
}
