use async_trait::async_trait;

use crate::error::PipelineError;
use crate::query_hydrator::QueryHydrator;
use crate::types::{DashboardQuery, Period};

/// Fills in the current calendar month when the query has no period.
///
/// In production this would also resolve relative periods ("last month")
/// against the fiscal calendar.
pub struct PeriodQueryHydrator {
    default_period: Period,
}

impl PeriodQueryHydrator {
    pub fn new() -> Self {
        Self {
            default_period: Period::current(),
        }
    }
}

impl Default for PeriodQueryHydrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryHydrator<DashboardQuery> for PeriodQueryHydrator {
    fn enable(&self, query: &DashboardQuery) -> bool {
        query.period.is_none()
    }

    async fn hydrate(&self, query: &DashboardQuery) -> Result<DashboardQuery, PipelineError> {
        Ok(DashboardQuery {
            period: Some(self.default_period),
            ..query.clone()
        })
    }

    fn update(&self, query: &mut DashboardQuery, hydrated: DashboardQuery) {
        query.period = hydrated.period;
    }
}
