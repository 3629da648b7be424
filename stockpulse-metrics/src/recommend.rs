//! Restock and transfer recommendations from coverage imbalances.
//!
//! Quantities are computed from the records' own implied daily sales rate
//! (ventas / 30), never from placeholders:
//! - Restock: bring a critical store up to a 30-day target supply.
//! - Transfer: move the units an understocked store needs to reach a 45-day
//!   target, capped by what the donor holds above the 90-day optimal
//!   ceiling.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::classify::{CRITICAL_MAX_DAYS, OPTIMAL_MAX_DAYS, PERIOD_DAYS};
use crate::types::StoreSummary;

/// Coverage below this makes a restock urgent rather than merely high.
pub const URGENT_RESTOCK_DAYS: f64 = 14.0;
/// Days of supply a restock should re-establish.
pub const RESTOCK_TARGET_DAYS: f64 = 30.0;
/// Days of supply a transfer should lift the receiver to.
pub const TRANSFER_TARGET_DAYS: f64 = 45.0;
/// Receiver coverage below this makes the transfer high priority.
pub const TRANSFER_HIGH_DAYS: f64 = 14.0;
/// Receiver coverage below this makes the transfer medium priority.
pub const TRANSFER_MEDIUM_DAYS: f64 = 21.0;
/// Output caps.
pub const MAX_RESTOCKS: usize = 10;
pub const MAX_TRANSFERS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RestockUrgency {
    Urgent,
    High,
}

impl RestockUrgency {
    fn rank(&self) -> u8 {
        match self {
            RestockUrgency::Urgent => 0,
            RestockUrgency::High => 1,
        }
    }
}

impl fmt::Display for RestockUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestockUrgency::Urgent => write!(f, "urgente"),
            RestockUrgency::High => write!(f, "alta"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RestockRecommendation {
    pub tienda: String,
    pub cobertura: f64,
    pub cantidad_recomendada: u64,
    pub urgency: RestockUrgency,
    /// Whole days until the store runs out at the current rate.
    pub estimated_stockout_days: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferPriority {
    High,
    Medium,
    Low,
}

impl fmt::Display for TransferPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferPriority::High => write!(f, "alta"),
            TransferPriority::Medium => write!(f, "media"),
            TransferPriority::Low => write!(f, "baja"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TransferSuggestion {
    pub from_store: String,
    pub to_store: String,
    pub cantidad: u64,
    pub priority: TransferPriority,
    pub reason: String,
}

/// Restock recommendations for every store under the critical threshold.
///
/// Stores with no sales are skipped: without a demand signal there is no
/// rate to size the order from. Output is urgent-first, then lowest
/// coverage first, capped at [`MAX_RESTOCKS`].
pub fn restock_recommendations(records: &[StoreSummary]) -> Vec<RestockRecommendation> {
    let mut recs: Vec<RestockRecommendation> = records
        .iter()
        .filter(|r| r.ventas > 0.0 && r.cobertura < CRITICAL_MAX_DAYS)
        .map(|r| {
            let daily_rate = r.ventas / PERIOD_DAYS;
            let urgency = if r.cobertura < URGENT_RESTOCK_DAYS {
                RestockUrgency::Urgent
            } else {
                RestockUrgency::High
            };
            RestockRecommendation {
                tienda: r.tienda.clone(),
                cobertura: r.cobertura,
                cantidad_recomendada: (daily_rate * RESTOCK_TARGET_DAYS).ceil() as u64,
                urgency,
                estimated_stockout_days: r.cobertura.floor() as u32,
            }
        })
        .collect();

    recs.sort_by(|a, b| {
        a.urgency
            .rank()
            .cmp(&b.urgency.rank())
            .then_with(|| a.cobertura.partial_cmp(&b.cobertura).unwrap_or(Ordering::Equal))
    });
    recs.truncate(MAX_RESTOCKS);
    recs
}

/// Pair overstocked stores with understocked ones.
///
/// The i-th most overstocked donor (coverage descending) is paired with the
/// i-th most understocked receiver (coverage ascending): the worst surplus
/// covers the worst deficit. Pair count is bounded by
/// `min(donors, receivers, MAX_TRANSFERS)`; pairs whose computed quantity
/// rounds to zero are dropped.
pub fn transfer_suggestions(records: &[StoreSummary]) -> Vec<TransferSuggestion> {
    let mut overstocked: Vec<&StoreSummary> = records
        .iter()
        .filter(|r| r.cobertura > OPTIMAL_MAX_DAYS)
        .collect();
    let mut understocked: Vec<&StoreSummary> = records
        .iter()
        .filter(|r| r.ventas > 0.0 && r.cobertura < CRITICAL_MAX_DAYS)
        .collect();

    overstocked.sort_by(|a, b| b.cobertura.partial_cmp(&a.cobertura).unwrap_or(Ordering::Equal));
    understocked.sort_by(|a, b| a.cobertura.partial_cmp(&b.cobertura).unwrap_or(Ordering::Equal));

    let pairs = overstocked.len().min(understocked.len()).min(MAX_TRANSFERS);

    let mut suggestions = Vec::with_capacity(pairs);
    for i in 0..pairs {
        let donor = overstocked[i];
        let receiver = understocked[i];

        let receiver_daily = receiver.ventas / PERIOD_DAYS;
        let needed = (TRANSFER_TARGET_DAYS - receiver.cobertura) * receiver_daily;
        let donor_daily = donor.ventas / PERIOD_DAYS;
        let surplus = (donor.cobertura - OPTIMAL_MAX_DAYS) * donor_daily;

        let cantidad = needed.min(surplus).floor();
        if cantidad < 1.0 {
            continue;
        }

        let priority = if receiver.cobertura < TRANSFER_HIGH_DAYS {
            TransferPriority::High
        } else if receiver.cobertura < TRANSFER_MEDIUM_DAYS {
            TransferPriority::Medium
        } else {
            TransferPriority::Low
        };

        suggestions.push(TransferSuggestion {
            from_store: donor.tienda.clone(),
            to_store: receiver.tienda.clone(),
            cantidad: cantidad as u64,
            priority,
            reason: format!(
                "Optimizar cobertura: {:.0} días → {:.0} días",
                donor.cobertura, receiver.cobertura
            ),
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn store(tienda: &str, inventario: f64, ventas: f64, cobertura: f64) -> StoreSummary {
        StoreSummary {
            tienda: tienda.to_string(),
            inventario,
            ventas,
            cobertura,
            status: Status::Optimo,
        }
    }

    #[test]
    fn restock_quantity_comes_from_daily_rate() {
        // ventas 600/month → 20/day → 30-day target = 600 units
        let records = vec![store("Tienda 1", 240.0, 600.0, 12.0)];
        let recs = restock_recommendations(&records);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].cantidad_recomendada, 600);
        assert_eq!(recs[0].urgency, RestockUrgency::Urgent);
        assert_eq!(recs[0].estimated_stockout_days, 12);
    }

    #[test]
    fn restock_urgency_splits_at_fourteen_days() {
        let records = vec![
            store("A", 0.0, 300.0, 20.0),
            store("B", 0.0, 300.0, 13.9),
        ];
        let recs = restock_recommendations(&records);
        assert_eq!(recs[0].tienda, "B");
        assert_eq!(recs[0].urgency, RestockUrgency::Urgent);
        assert_eq!(recs[1].urgency, RestockUrgency::High);
    }

    #[test]
    fn restock_skips_stores_without_sales() {
        let records = vec![store("Quiet", 500.0, 0.0, 0.0)];
        assert!(restock_recommendations(&records).is_empty());
    }

    #[test]
    fn restock_sorted_and_capped() {
        let mut records = Vec::new();
        for i in 0..15 {
            records.push(store(&format!("T{}", i), 100.0, 300.0, 27.0 - i as f64));
        }
        let recs = restock_recommendations(&records);
        assert_eq!(recs.len(), MAX_RESTOCKS);
        // Lowest coverage first within the urgent tier
        for w in recs.windows(2) {
            assert!(
                w[0].urgency.rank() < w[1].urgency.rank()
                    || (w[0].urgency == w[1].urgency && w[0].cobertura <= w[1].cobertura)
            );
        }
    }

    #[test]
    fn transfer_pairs_worst_surplus_with_worst_deficit() {
        let records = vec![
            store("Over-mild", 1200.0, 300.0, 120.0),
            store("Over-heavy", 2000.0, 300.0, 200.0),
            store("Under-mild", 220.0, 300.0, 22.0),
            store("Under-bad", 100.0, 300.0, 10.0),
        ];
        let suggestions = transfer_suggestions(&records);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].from_store, "Over-heavy");
        assert_eq!(suggestions[0].to_store, "Under-bad");
        assert_eq!(suggestions[0].priority, TransferPriority::High);
        assert_eq!(suggestions[1].from_store, "Over-mild");
        assert_eq!(suggestions[1].to_store, "Under-mild");
        assert_eq!(suggestions[1].priority, TransferPriority::Low);
    }

    #[test]
    fn transfer_quantity_capped_by_donor_surplus() {
        // Receiver needs (45 - 10) * 10 = 350 units.
        // Donor surplus is (100 - 90) * 10 = 100 units.
        let records = vec![
            store("Donor", 1000.0, 300.0, 100.0),
            store("Receiver", 100.0, 300.0, 10.0),
        ];
        let suggestions = transfer_suggestions(&records);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].cantidad, 100);
        assert!(suggestions[0].reason.contains("100 días"));
    }

    #[test]
    fn transfer_dropped_when_surplus_rounds_below_one_unit() {
        // Donor surplus is (91.5 - 90) * (10 / 30) = 0.5 units, which
        // floors to zero. The pair is skipped, not emitted as a
        // zero-unit transfer.
        let records = vec![
            store("Donor", 30.5, 10.0, 91.5),
            store("Receiver", 100.0, 300.0, 10.0),
        ];
        assert!(transfer_suggestions(&records).is_empty());
    }

    #[test]
    fn transfer_count_never_exceeds_bound() {
        let mut records = Vec::new();
        for i in 0..8 {
            records.push(store(&format!("O{}", i), 2000.0, 300.0, 150.0 + i as f64));
            records.push(store(&format!("U{}", i), 100.0, 300.0, 10.0 + i as f64));
        }
        let suggestions = transfer_suggestions(&records);
        assert!(suggestions.len() <= MAX_TRANSFERS);
    }

    #[test]
    fn no_transfers_without_both_sides() {
        let only_over = vec![store("O", 2000.0, 300.0, 150.0)];
        assert!(transfer_suggestions(&only_over).is_empty());
        let only_under = vec![store("U", 100.0, 300.0, 10.0)];
        assert!(transfer_suggestions(&only_under).is_empty());
    }
}
