//! Coverage and status classification.
//!
//! Maps a raw (inventory, sales) pair to days-of-supply coverage and a
//! discrete status label. This is the one place the thresholds live; the
//! alert, recommendation and insight engines all build on the same bands.
//!
//! Coverage is normalized to a 30-day period basis: a store holding 1000
//! units that sold 100 this period has 1000 / 100 * 30 = 300 days of supply.

use crate::error::{MetricsError, MetricsResult};
use crate::types::Status;

/// Coverage below this many days is a stockout risk.
pub const CRITICAL_MAX_DAYS: f64 = 28.0;
/// Coverage above this many days is overstock.
pub const OPTIMAL_MAX_DAYS: f64 = 90.0;
/// Days in the normalization period.
pub const PERIOD_DAYS: f64 = 30.0;

/// Result of classifying one (inventory, sales) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    /// Estimated days of supply at the current sales rate. Zero when no
    /// sales were recorded (the value is a sentinel, not a real coverage).
    pub cobertura: f64,
    pub status: Status,
}

/// Classify an (inventory, sales) pair.
///
/// Negative or non-finite inputs are rejected; silently deriving a coverage
/// from them would poison every downstream aggregate.
pub fn classify(inventario: f64, ventas: f64) -> MetricsResult<Classification> {
    validate("inventario", inventario)?;
    validate("ventas", ventas)?;

    if ventas == 0.0 {
        return Ok(Classification {
            cobertura: 0.0,
            status: Status::SinVentas,
        });
    }

    let cobertura = inventario / ventas * PERIOD_DAYS;
    let status = if cobertura < CRITICAL_MAX_DAYS {
        Status::Critico
    } else if cobertura > OPTIMAL_MAX_DAYS {
        Status::Sobreinventario
    } else {
        Status::Optimo
    };

    Ok(Classification { cobertura, status })
}

fn validate(field: &'static str, value: f64) -> MetricsResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MetricsError::InvalidInput { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_coverage_is_overstock() {
        // 1000 / 100 * 30 = 300 days
        let c = classify(1000.0, 100.0).unwrap();
        assert_eq!(c.cobertura, 300.0);
        assert_eq!(c.status, Status::Sobreinventario);
    }

    #[test]
    fn low_coverage_is_critical() {
        // 200 / 500 * 30 = 12 days
        let c = classify(200.0, 500.0).unwrap();
        assert_eq!(c.cobertura, 12.0);
        assert_eq!(c.status, Status::Critico);
    }

    #[test]
    fn zero_sales_overrides_everything() {
        let c = classify(500.0, 0.0).unwrap();
        assert_eq!(c.cobertura, 0.0);
        assert_eq!(c.status, Status::SinVentas);

        // Even with zero inventory
        let c = classify(0.0, 0.0).unwrap();
        assert_eq!(c.status, Status::SinVentas);
    }

    #[test]
    fn optimal_band_is_inclusive() {
        // Exactly 28 days: 28/30 units per unit sold
        let c = classify(280.0, 300.0).unwrap();
        assert_eq!(c.cobertura, 28.0);
        assert_eq!(c.status, Status::Optimo);

        // Exactly 90 days
        let c = classify(900.0, 300.0).unwrap();
        assert_eq!(c.cobertura, 90.0);
        assert_eq!(c.status, Status::Optimo);

        // Just above 90
        let c = classify(901.0, 300.0).unwrap();
        assert_eq!(c.status, Status::Sobreinventario);
    }

    #[test]
    fn negative_inputs_are_rejected() {
        let err = classify(-1.0, 100.0).unwrap_err();
        assert_eq!(
            err,
            MetricsError::InvalidInput {
                field: "inventario",
                value: -1.0
            }
        );
        assert!(classify(100.0, -5.0).is_err());
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert!(classify(f64::NAN, 100.0).is_err());
        assert!(classify(100.0, f64::INFINITY).is_err());
    }
}
