//! Period-over-period trend and sales velocity derivation.
//!
//! Both computations take their baselines from real data (the previous
//! period's value, the chain's monthly totals); neither synthesizes values.

use serde::Serialize;

use crate::classify::PERIOD_DAYS;
use crate::types::StoreSummary;

/// Percent change beyond which a trend counts as moving.
pub const TREND_THRESHOLD_PCT: f64 = 2.0;
/// Daily target as a multiple of the daily average.
pub const VELOCITY_TARGET_FACTOR: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Trend {
    pub previous_value: f64,
    pub change: f64,
    pub change_percent: f64,
    pub direction: TrendDirection,
}

/// Compare a metric against its previous-period value.
///
/// A previous value of zero yields a 0% change (direction stable) rather
/// than an infinite ratio.
pub fn compute_trend(current: f64, previous: f64) -> Trend {
    let change = current - previous;
    let change_percent = if previous != 0.0 {
        change / previous * 100.0
    } else {
        0.0
    };
    let direction = if change_percent > TREND_THRESHOLD_PCT {
        TrendDirection::Up
    } else if change_percent < -TREND_THRESHOLD_PCT {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };
    Trend {
        previous_value: previous,
        change,
        change_percent,
        direction,
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SalesVelocity {
    pub ventas_totales: f64,
    pub promedio_diario: f64,
    pub meta_diaria: f64,
}

/// Daily sales velocity for the chain: the period total spread over 30 days,
/// with a target 10% above the average.
pub fn sales_velocity(records: &[StoreSummary]) -> SalesVelocity {
    let ventas_totales: f64 = records.iter().map(|r| r.ventas).sum();
    let promedio_diario = ventas_totales / PERIOD_DAYS;
    SalesVelocity {
        ventas_totales,
        promedio_diario,
        meta_diaria: promedio_diario * VELOCITY_TARGET_FACTOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    #[test]
    fn growth_above_threshold_is_up() {
        let t = compute_trend(110.0, 100.0);
        assert_eq!(t.direction, TrendDirection::Up);
        assert!((t.change_percent - 10.0).abs() < 1e-9);
        assert_eq!(t.change, 10.0);
    }

    #[test]
    fn small_moves_are_stable() {
        assert_eq!(compute_trend(101.0, 100.0).direction, TrendDirection::Stable);
        assert_eq!(compute_trend(99.0, 100.0).direction, TrendDirection::Stable);
    }

    #[test]
    fn decline_is_down() {
        let t = compute_trend(80.0, 100.0);
        assert_eq!(t.direction, TrendDirection::Down);
        assert_eq!(t.change, -20.0);
    }

    #[test]
    fn zero_previous_never_divides() {
        let t = compute_trend(50.0, 0.0);
        assert_eq!(t.change_percent, 0.0);
        assert_eq!(t.direction, TrendDirection::Stable);
        assert!(t.change_percent.is_finite());
    }

    #[test]
    fn velocity_from_chain_totals() {
        let records = vec![
            StoreSummary {
                tienda: "A".to_string(),
                inventario: 0.0,
                ventas: 1800.0,
                cobertura: 0.0,
                status: Status::Optimo,
            },
            StoreSummary {
                tienda: "B".to_string(),
                inventario: 0.0,
                ventas: 1200.0,
                cobertura: 0.0,
                status: Status::Optimo,
            },
        ];
        let v = sales_velocity(&records);
        assert_eq!(v.ventas_totales, 3000.0);
        assert_eq!(v.promedio_diario, 100.0);
        assert!((v.meta_diaria - 110.0).abs() < 1e-9);
    }
}
