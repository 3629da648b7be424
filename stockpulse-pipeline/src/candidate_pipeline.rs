use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

/// Queries carry a request id so every stage can log against it.
pub trait HasRequestId {
    fn request_id(&self) -> &str;
}

/// Everything the pipeline produced for one query, stage by stage.
pub struct ExecutionResult<Q, C> {
    /// The query after hydration.
    pub query: Q,
    /// Raw candidates as emitted by the sources.
    pub retrieved_candidates: Vec<C>,
    /// Candidates dropped by the filter stage.
    pub filtered_candidates: Vec<C>,
    /// The final sorted, truncated digest.
    pub selected_candidates: Vec<C>,
}

/// A staged candidate pipeline: hydrate the query, fetch candidates,
/// enrich, filter, score, select, then fire side effects.
///
/// A failing stage is logged and skipped; it never aborts the run. The
/// digest must degrade (fewer enrichments, default ordering) rather than
/// disappear when one component misbehaves.
#[async_trait]
pub trait CandidatePipeline<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static + HasRequestId,
    C: Clone + Send + Sync + 'static,
{
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<Q>>];
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, C>>>>;

    /// Run the full pipeline for one query.
    async fn execute(&self, mut query: Q) -> ExecutionResult<Q, C> {
        for hydrator in self.query_hydrators() {
            if !hydrator.enable(&query) {
                continue;
            }
            match hydrator.hydrate(&query).await {
                Ok(hydrated) => hydrator.update(&mut query, hydrated),
                Err(err) => warn!(
                    request_id = query.request_id(),
                    stage = hydrator.name(),
                    %err,
                    "query hydrator failed"
                ),
            }
        }

        let mut retrieved: Vec<C> = Vec::new();
        for source in self.sources() {
            if !source.enable(&query) {
                continue;
            }
            match source.get_candidates(&query).await {
                Ok(mut candidates) => retrieved.append(&mut candidates),
                Err(err) => warn!(
                    request_id = query.request_id(),
                    stage = source.name(),
                    %err,
                    "source failed"
                ),
            }
        }
        debug!(
            request_id = query.request_id(),
            retrieved = retrieved.len(),
            "candidate retrieval complete"
        );

        let mut candidates = retrieved.clone();
        for hydrator in self.hydrators() {
            if !hydrator.enable(&query) {
                continue;
            }
            match hydrator.hydrate(&query, &candidates).await {
                Ok(hydrated) => {
                    for (candidate, fields) in candidates.iter_mut().zip(hydrated) {
                        hydrator.update(candidate, fields);
                    }
                }
                Err(err) => warn!(
                    request_id = query.request_id(),
                    stage = hydrator.name(),
                    %err,
                    "hydrator failed"
                ),
            }
        }

        let mut removed: Vec<C> = Vec::new();
        for filter in self.filters() {
            if !filter.enable(&query) {
                continue;
            }
            // Filters consume their input; hand over a copy so a failing
            // filter leaves the working set untouched.
            match filter.filter(&query, candidates.clone()).await {
                Ok(result) => {
                    candidates = result.kept;
                    removed.extend(result.removed);
                }
                Err(err) => warn!(
                    request_id = query.request_id(),
                    stage = filter.name(),
                    %err,
                    "filter failed, candidates pass through"
                ),
            }
        }

        for scorer in self.scorers() {
            if !scorer.enable(&query) {
                continue;
            }
            match scorer.score(&query, &candidates).await {
                Ok(scored) => {
                    for (candidate, fields) in candidates.iter_mut().zip(scored) {
                        scorer.update(candidate, fields);
                    }
                }
                Err(err) => warn!(
                    request_id = query.request_id(),
                    stage = scorer.name(),
                    %err,
                    "scorer failed"
                ),
            }
        }

        let selected = self.selector().select(&query, candidates);
        debug!(
            request_id = query.request_id(),
            selected = selected.len(),
            "selection complete"
        );

        let input = Arc::new(SideEffectInput {
            query: Arc::new(query.clone()),
            selected_candidates: selected.clone(),
        });
        for side_effect in self.side_effects().iter() {
            if !side_effect.enable(Arc::clone(&input.query)) {
                continue;
            }
            if let Err(err) = side_effect.run(Arc::clone(&input)).await {
                warn!(
                    request_id = query.request_id(),
                    stage = side_effect.name(),
                    %err,
                    "side effect failed"
                );
            }
        }

        ExecutionResult {
            query,
            retrieved_candidates: retrieved,
            filtered_candidates: removed,
            selected_candidates: selected,
        }
    }
}
