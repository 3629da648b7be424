use async_trait::async_trait;
use std::sync::Arc;

use stockpulse_metrics::alerts::MAX_ALERTS;
use stockpulse_metrics::types::StoreSummary;

use crate::candidate_pipeline::CandidatePipeline;
use crate::components::coverage_alert_source::CoverageAlertSource;
use crate::components::digest_log_side_effect::DigestLogSideEffect;
use crate::components::in_range_filter::InRangeFilter;
use crate::components::period_query_hydrator::PeriodQueryHydrator;
use crate::components::severity_scorer::SeverityScorer;
use crate::components::stockout_risk_hydrator::StockoutRiskHydrator;
use crate::components::top_k_selector::TopKSelector;
use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{AlertCandidate, DashboardQuery};

/// The dashboard alert digest pipeline.
///
/// Pipeline flow:
/// 1. PeriodQueryHydrator fills in the current period when absent
/// 2. CoverageAlertSource scans store records for threshold crossings
/// 3. StockoutRiskHydrator attaches urgency scores
/// 4. InRangeFilter drops anything inside the optimal band
/// 5. SeverityScorer assigns priority scores by severity tier
/// 6. TopKSelector picks the top N, stable within a tier
/// 7. DigestLogSideEffect records the outcome
pub struct AlertDigestPipeline {
    query_hydrators: Vec<Box<dyn QueryHydrator<DashboardQuery>>>,
    sources: Vec<Box<dyn Source<DashboardQuery, AlertCandidate>>>,
    hydrators: Vec<Box<dyn Hydrator<DashboardQuery, AlertCandidate>>>,
    filters: Vec<Box<dyn Filter<DashboardQuery, AlertCandidate>>>,
    scorers: Vec<Box<dyn Scorer<DashboardQuery, AlertCandidate>>>,
    selector: TopKSelector,
    side_effects: Arc<Vec<Box<dyn SideEffect<DashboardQuery, AlertCandidate>>>>,
}

impl AlertDigestPipeline {
    /// Create a pipeline over classified store records.
    ///
    /// This is the primary constructor for production use.
    pub fn with_stores(records: Vec<StoreSummary>) -> Self {
        Self::with_stores_and_size(records, MAX_ALERTS)
    }

    /// Create a pipeline with a custom digest size. The size is owned by
    /// the selector; there is no separate cap to keep in sync.
    pub fn with_stores_and_size(records: Vec<StoreSummary>, result_size: usize) -> Self {
        let query_hydrators: Vec<Box<dyn QueryHydrator<DashboardQuery>>> =
            vec![Box::new(PeriodQueryHydrator::new())];

        let sources: Vec<Box<dyn Source<DashboardQuery, AlertCandidate>>> =
            vec![Box::new(CoverageAlertSource::new(records))];

        let hydrators: Vec<Box<dyn Hydrator<DashboardQuery, AlertCandidate>>> =
            vec![Box::new(StockoutRiskHydrator)];

        let filters: Vec<Box<dyn Filter<DashboardQuery, AlertCandidate>>> =
            vec![Box::new(InRangeFilter::default())];

        let scorers: Vec<Box<dyn Scorer<DashboardQuery, AlertCandidate>>> =
            vec![Box::new(SeverityScorer)];

        let selector = TopKSelector { k: result_size };

        let side_effects: Arc<Vec<Box<dyn SideEffect<DashboardQuery, AlertCandidate>>>> =
            Arc::new(vec![Box::new(DigestLogSideEffect)]);

        Self {
            query_hydrators,
            sources,
            hydrators,
            filters,
            scorers,
            selector,
            side_effects,
        }
    }
}

#[async_trait]
impl CandidatePipeline<DashboardQuery, AlertCandidate> for AlertDigestPipeline {
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<DashboardQuery>>] {
        &self.query_hydrators
    }

    fn sources(&self) -> &[Box<dyn Source<DashboardQuery, AlertCandidate>>] {
        &self.sources
    }

    fn hydrators(&self) -> &[Box<dyn Hydrator<DashboardQuery, AlertCandidate>>] {
        &self.hydrators
    }

    fn filters(&self) -> &[Box<dyn Filter<DashboardQuery, AlertCandidate>>] {
        &self.filters
    }

    fn scorers(&self) -> &[Box<dyn Scorer<DashboardQuery, AlertCandidate>>] {
        &self.scorers
    }

    fn selector(&self) -> &dyn Selector<DashboardQuery, AlertCandidate> {
        &self.selector
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<DashboardQuery, AlertCandidate>>>> {
        Arc::clone(&self.side_effects)
    }
}
