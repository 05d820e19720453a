//! Review metrics for generated items

use serde::{Deserialize, Serialize};

/// Reviewer decision on one generated item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Approved,
    ApprovedWithEdit,
    Rejected,
}

/// One reviewed item and how many generation attempts it took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub outcome: ReviewOutcome,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
}

fn default_attempts() -> u32 {
    1
}

impl OutcomeRecord {
    pub fn new(outcome: ReviewOutcome, attempts: u32) -> Self {
        Self { outcome, attempts }
    }

    fn is_first_attempt_approval(&self) -> bool {
        self.outcome == ReviewOutcome::Approved && self.attempts <= 1
    }
}

/// Aggregated review metrics; rates are percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GenerationMetrics {
    pub total: usize,
    pub approved: usize,
    pub approved_with_edit: usize,
    pub rejected: usize,
    pub approval_rate: f64,
    pub retry_rate: f64,
}

/// Aggregate `records`; an empty slice yields all zeros
pub fn calculate_metrics(records: &[OutcomeRecord]) -> GenerationMetrics {
    if records.is_empty() {
        return GenerationMetrics::default();
    }

    let count = |outcome: ReviewOutcome| records.iter().filter(|r| r.outcome == outcome).count();
    let total = records.len();
    let approved = count(ReviewOutcome::Approved);
    let first_attempt = records
        .iter()
        .filter(|r| r.is_first_attempt_approval())
        .count();

    GenerationMetrics {
        total,
        approved,
        approved_with_edit: count(ReviewOutcome::ApprovedWithEdit),
        rejected: count(ReviewOutcome::Rejected),
        approval_rate: approved as f64 / total as f64 * 100.0,
        retry_rate: (1.0 - first_attempt as f64 / total as f64) * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(calculate_metrics(&[]), GenerationMetrics::default());
    }

    #[test]
    fn test_two_approved_one_rejected() {
        let records = [
            OutcomeRecord::new(ReviewOutcome::Approved, 1),
            OutcomeRecord::new(ReviewOutcome::Approved, 1),
            OutcomeRecord::new(ReviewOutcome::Rejected, 1),
        ];
        let metrics = calculate_metrics(&records);

        assert_eq!(metrics.total, 3);
        assert_eq!(metrics.approved, 2);
        assert_eq!(metrics.rejected, 1);
        assert!((metrics.approval_rate - 66.666).abs() < 0.01);
        assert!((metrics.retry_rate - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_retried_approvals_raise_retry_rate() {
        let records = [
            OutcomeRecord::new(ReviewOutcome::Approved, 2),
            OutcomeRecord::new(ReviewOutcome::ApprovedWithEdit, 1),
            OutcomeRecord::new(ReviewOutcome::Approved, 1),
            OutcomeRecord::new(ReviewOutcome::Approved, 3),
        ];
        let metrics = calculate_metrics(&records);

        assert_eq!(metrics.approved, 3);
        assert_eq!(metrics.approved_with_edit, 1);
        assert!((metrics.approval_rate - 75.0).abs() < f64::EPSILON);
        assert!((metrics.retry_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_attempts_default_to_one() {
        let record: OutcomeRecord = serde_json::from_str(r#"{"outcome":"approved_with_edit"}"#).unwrap();
        assert_eq!(record.attempts, 1);
        assert_eq!(record.outcome, ReviewOutcome::ApprovedWithEdit);
    }
}
