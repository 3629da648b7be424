use async_trait::async_trait;
use stockpulse_metrics::alerts::AlertSeverity;

use crate::error::PipelineError;
use crate::hydrator::Hydrator;
use crate::types::{AlertCandidate, DashboardQuery};

/// Attaches an urgency score derived from severity and remaining coverage.
///
/// Urgency is a tiebreaker signal within a severity tier, not the primary
/// ordering; the scorer stage owns that.
pub struct StockoutRiskHydrator;

/// Below this many days a critical alert is maximally urgent.
const IMMINENT_DAYS: f64 = 7.0;

fn urgency(candidate: &AlertCandidate) -> f64 {
    match candidate.severity {
        AlertSeverity::Critical if candidate.cobertura < IMMINENT_DAYS => 0.95,
        AlertSeverity::Critical => 0.8,
        AlertSeverity::Warning => 0.5,
        AlertSeverity::Info => 0.2,
    }
}

#[async_trait]
impl Hydrator<DashboardQuery, AlertCandidate> for StockoutRiskHydrator {
    async fn hydrate(
        &self,
        _query: &DashboardQuery,
        candidates: &[AlertCandidate],
    ) -> Result<Vec<AlertCandidate>, PipelineError> {
        let hydrated = candidates
            .iter()
            .map(|c| AlertCandidate {
                urgency_score: Some(urgency(c)),
                ..AlertCandidate::default()
            })
            .collect();
        Ok(hydrated)
    }

    fn update(&self, candidate: &mut AlertCandidate, hydrated: AlertCandidate) {
        candidate.urgency_score = hydrated.urgency_score;
    }
}
