//! Generic ranking over record collections.

use std::cmp::Ordering;

use crate::types::StoreSummary;

/// Which end of the sorted order to return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankDirection {
    /// Highest values first.
    Top,
    /// Lowest values first.
    Bottom,
}

/// Store metric a ranking can be keyed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreMetric {
    Ventas,
    Inventario,
    Cobertura,
}

impl StoreMetric {
    pub fn value(&self, record: &StoreSummary) -> f64 {
        match self {
            StoreMetric::Ventas => record.ventas,
            StoreMetric::Inventario => record.inventario,
            StoreMetric::Cobertura => record.cobertura,
        }
    }
}

/// Rank records by an arbitrary numeric key.
///
/// Sorts a copy — the input slice is never mutated — and truncates to
/// `limit`. The sort is stable, so ties keep their original relative order.
/// NaN keys are pushed to the end regardless of direction so they never
/// appear as top candidates.
pub fn rank_by<T, F>(records: &[T], metric: F, direction: RankDirection, limit: usize) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    let mut sorted: Vec<T> = records.to_vec();
    sorted.sort_by(|a, b| {
        let ka = metric(a);
        let kb = metric(b);
        match (ka.is_nan(), kb.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match direction {
                RankDirection::Top => kb.partial_cmp(&ka).unwrap_or(Ordering::Equal),
                RankDirection::Bottom => ka.partial_cmp(&kb).unwrap_or(Ordering::Equal),
            },
        }
    });
    sorted.truncate(limit);
    sorted
}

/// Rank stores by one of the standard dashboard metrics.
pub fn rank_stores(
    records: &[StoreSummary],
    metric: StoreMetric,
    direction: RankDirection,
    limit: usize,
) -> Vec<StoreSummary> {
    rank_by(records, |r| metric.value(r), direction, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn store(tienda: &str, ventas: f64) -> StoreSummary {
        StoreSummary {
            tienda: tienda.to_string(),
            inventario: 0.0,
            ventas,
            cobertura: 0.0,
            status: Status::Optimo,
        }
    }

    #[test]
    fn top_by_sales_returns_descending() {
        let records = vec![
            store("A", 100.0),
            store("B", 900.0),
            store("C", 400.0),
            store("D", 700.0),
            store("E", 50.0),
        ];
        let top = rank_stores(&records, StoreMetric::Ventas, RankDirection::Top, 3);
        let names: Vec<&str> = top.iter().map(|t| t.tienda.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "C"]);
    }

    #[test]
    fn bottom_returns_ascending() {
        let records = vec![store("A", 100.0), store("B", 900.0), store("C", 50.0)];
        let bottom = rank_stores(&records, StoreMetric::Ventas, RankDirection::Bottom, 2);
        let names: Vec<&str> = bottom.iter().map(|t| t.tienda.as_str()).collect();
        assert_eq!(names, vec!["C", "A"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![store("First", 500.0), store("Second", 500.0), store("Third", 500.0)];
        let top = rank_stores(&records, StoreMetric::Ventas, RankDirection::Top, 3);
        let names: Vec<&str> = top.iter().map(|t| t.tienda.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let records = vec![store("A", 1.0), store("B", 2.0)];
        let _ = rank_stores(&records, StoreMetric::Ventas, RankDirection::Top, 1);
        assert_eq!(records[0].tienda, "A");
        assert_eq!(records[1].tienda, "B");
    }

    #[test]
    fn idempotent_under_re_ranking() {
        let records = vec![store("A", 3.0), store("B", 1.0), store("C", 2.0)];
        let once = rank_stores(&records, StoreMetric::Ventas, RankDirection::Top, 2);
        let twice = rank_stores(&once, StoreMetric::Ventas, RankDirection::Top, 2);
        let a: Vec<&str> = once.iter().map(|t| t.tienda.as_str()).collect();
        let b: Vec<&str> = twice.iter().map(|t| t.tienda.as_str()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn nan_keys_sink_to_the_end() {
        let records = vec![store("A", f64::NAN), store("B", 5.0), store("C", 1.0)];
        let top = rank_by(&records, |r| r.ventas, RankDirection::Top, 3);
        let names: Vec<&str> = top.iter().map(|t| t.tienda.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }
}
