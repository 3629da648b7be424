use async_trait::async_trait;
use stockpulse_metrics::alerts::AlertSeverity;

use crate::error::PipelineError;
use crate::scorer::Scorer;
use crate::types::{AlertCandidate, DashboardQuery};

/// Assigns the priority score from severity alone.
///
/// Deliberately coarse: equal scores within a tier mean the selector's
/// stable sort preserves discovery order, which is the contract the
/// dashboard relies on.
pub struct SeverityScorer;

fn base_score(severity: AlertSeverity) -> f64 {
    match severity {
        AlertSeverity::Critical => 3.0,
        AlertSeverity::Warning => 2.0,
        AlertSeverity::Info => 1.0,
    }
}

#[async_trait]
impl Scorer<DashboardQuery, AlertCandidate> for SeverityScorer {
    async fn score(
        &self,
        _query: &DashboardQuery,
        candidates: &[AlertCandidate],
    ) -> Result<Vec<AlertCandidate>, PipelineError> {
        let scored = candidates
            .iter()
            .map(|c| AlertCandidate {
                priority_score: Some(base_score(c.severity)),
                ..AlertCandidate::default()
            })
            .collect();
        Ok(scored)
    }

    fn update(&self, candidate: &mut AlertCandidate, scored: AlertCandidate) {
        candidate.priority_score = scored.priority_score;
    }
}
