use stockpulse_metrics::alerts::MAX_ALERTS;

use crate::selector::Selector;
use crate::types::{AlertCandidate, DashboardQuery};

/// Selects the top K candidates by priority score.
///
/// Unscored candidates sink to the bottom via `NEG_INFINITY`.
pub struct TopKSelector {
    pub k: usize,
}

impl Default for TopKSelector {
    fn default() -> Self {
        Self { k: MAX_ALERTS }
    }
}

impl Selector<DashboardQuery, AlertCandidate> for TopKSelector {
    fn score(&self, candidate: &AlertCandidate) -> f64 {
        candidate.priority_score.unwrap_or(f64::NEG_INFINITY)
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueryRole;

    fn candidate(id: &str, priority: Option<f64>) -> AlertCandidate {
        AlertCandidate {
            id: id.to_string(),
            priority_score: priority,
            ..AlertCandidate::default()
        }
    }

    fn query() -> DashboardQuery {
        DashboardQuery {
            request_id: "req-1".to_string(),
            user_id: "exec-1".to_string(),
            role: QueryRole::Executive,
            tiendas: Vec::new(),
            period: None,
        }
    }

    #[test]
    fn sorts_descending_and_truncates() {
        let selector = TopKSelector { k: 2 };
        let selected = selector.select(
            &query(),
            vec![
                candidate("b", Some(2.0)),
                candidate("a", Some(3.0)),
                candidate("c", Some(1.0)),
            ],
        );
        let ids: Vec<&str> = selected.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn equal_scores_keep_discovery_order() {
        let selector = TopKSelector::default();
        let selected = selector.select(
            &query(),
            vec![
                candidate("first", Some(3.0)),
                candidate("second", Some(3.0)),
                candidate("third", Some(3.0)),
            ],
        );
        let ids: Vec<&str> = selected.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn unscored_candidates_sink() {
        let selector = TopKSelector::default();
        let selected = selector.select(
            &query(),
            vec![candidate("unscored", None), candidate("scored", Some(1.0))],
        );
        assert_eq!(selected[0].id, "scored");
        assert_eq!(selected[1].id, "unscored");
    }

    #[test]
    fn nan_scores_never_reach_the_top() {
        let selector = TopKSelector { k: 1 };
        let selected = selector.select(
            &query(),
            vec![
                candidate("nan", Some(f64::NAN)),
                candidate("real", Some(0.5)),
            ],
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "real");
    }
}
