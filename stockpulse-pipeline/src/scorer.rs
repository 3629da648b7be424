use async_trait::async_trait;

use crate::error::PipelineError;
use crate::util;

/// Scorers assign or adjust candidate scores ahead of selection.
///
/// Like hydrators, `score` returns one candidate per input in the same
/// order and `update` copies only the scoring fields back.
#[async_trait]
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this scorer should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Score candidates, positionally matching the input.
    async fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, PipelineError>;

    /// Update the candidate with the scored fields.
    fn update(&self, candidate: &mut C, scored: C);

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
