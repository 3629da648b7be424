use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::PipelineError;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{AlertCandidate, DashboardQuery};

/// Records the digest outcome so repeated queries can be audited.
///
/// In production this would also write the digest to a cache keyed by
/// query period and scope.
pub struct DigestLogSideEffect;

#[async_trait]
impl SideEffect<DashboardQuery, AlertCandidate> for DigestLogSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<DashboardQuery, AlertCandidate>>,
    ) -> Result<(), PipelineError> {
        let top = input
            .selected_candidates
            .first()
            .map(|c| c.id.as_str())
            .unwrap_or("none");
        info!(
            request_id = input.query.request_id.as_str(),
            selected = input.selected_candidates.len(),
            top,
            "digest assembled"
        );
        Ok(())
    }
}
