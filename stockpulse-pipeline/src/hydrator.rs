use async_trait::async_trait;

use crate::error::PipelineError;
use crate::util;

/// Hydrators enrich candidates with context fetched after retrieval.
///
/// `hydrate` returns one enriched candidate per input candidate, in the
/// same order; `update` copies only this hydrator's fields back onto the
/// pipeline's working copy.
#[async_trait]
pub trait Hydrator<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this hydrator should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Produce enriched candidates, positionally matching the input.
    async fn hydrate(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, PipelineError>;

    /// Update the candidate with the hydrated fields.
    fn update(&self, candidate: &mut C, hydrated: C);

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
