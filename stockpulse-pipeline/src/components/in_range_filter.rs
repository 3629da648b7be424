use async_trait::async_trait;
use stockpulse_metrics::classify::{CRITICAL_MAX_DAYS, OPTIMAL_MAX_DAYS};

use crate::error::PipelineError;
use crate::filter::{Filter, FilterResult};
use crate::types::{AlertCandidate, DashboardQuery};

/// Removes candidates whose coverage sits inside the optimal band.
///
/// The coverage source only emits threshold crossings, but other sources
/// (manual flags, imported alerts) may not be as careful; this filter is
/// the guarantee that nothing healthy reaches the digest.
pub struct InRangeFilter {
    pub min_days: f64,
    pub max_days: f64,
}

impl Default for InRangeFilter {
    fn default() -> Self {
        Self {
            min_days: CRITICAL_MAX_DAYS,
            max_days: OPTIMAL_MAX_DAYS,
        }
    }
}

#[async_trait]
impl Filter<DashboardQuery, AlertCandidate> for InRangeFilter {
    async fn filter(
        &self,
        _query: &DashboardQuery,
        candidates: Vec<AlertCandidate>,
    ) -> Result<FilterResult<AlertCandidate>, PipelineError> {
        let (removed, kept): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.cobertura >= self.min_days && c.cobertura <= self.max_days);

        Ok(FilterResult { kept, removed })
    }
}
