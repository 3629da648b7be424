//! Annualized inventory turnover per store.

use serde::Serialize;

use crate::types::StoreSummary;

/// Annualized turnover above this is excellent.
pub const EXCELLENT_TURNOVER: f64 = 4.0;
/// Annualized turnover above this (but not excellent) is good.
pub const GOOD_TURNOVER: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnoverRating {
    Excellent,
    Good,
    Poor,
}

#[derive(Clone, Debug, Serialize)]
pub struct TurnoverEntry {
    pub tienda: String,
    /// ventas * 12 / inventario: how many times a year the stock turns over.
    pub turnover_rate: f64,
    pub days_to_sell: f64,
    pub rating: TurnoverRating,
}

/// Annualized turnover for each store. Stores with zero inventory or zero
/// sales get a rate of 0 (rated poor) instead of an infinite/NaN ratio.
pub fn inventory_turnover(records: &[StoreSummary]) -> Vec<TurnoverEntry> {
    records
        .iter()
        .map(|r| {
            let rate = if r.ventas > 0.0 && r.inventario > 0.0 {
                r.ventas * 12.0 / r.inventario
            } else {
                0.0
            };
            let rating = if rate > EXCELLENT_TURNOVER {
                TurnoverRating::Excellent
            } else if rate > GOOD_TURNOVER {
                TurnoverRating::Good
            } else {
                TurnoverRating::Poor
            };
            TurnoverEntry {
                tienda: r.tienda.clone(),
                turnover_rate: rate,
                days_to_sell: r.cobertura,
                rating,
            }
        })
        .collect()
}
