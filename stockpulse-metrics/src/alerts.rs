//! Alert generation from store records.
//!
//! Scans the per-store coverage figures and emits prioritized alerts:
//! imminent stockouts first, heavy overstock second, informational notices
//! last. The output is bounded so the dashboard never drowns in low-value
//! noise; truncation happens after the severity sort, so lower-severity
//! alerts are the ones dropped.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::StoreSummary;

/// Coverage below this emits a critical stockout alert.
pub const CRITICAL_ALERT_DAYS: f64 = 14.0;
/// Coverage above this emits an overstock warning.
pub const OVERSTOCK_ALERT_DAYS: f64 = 120.0;
/// Maximum number of alerts surfaced to the dashboard.
pub const MAX_ALERTS: usize = 10;

/// Alert severity, ordered most-severe-first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl AlertSeverity {
    /// Sort rank: lower is more severe.
    pub fn rank(&self) -> u8 {
        match self {
            AlertSeverity::Critical => 0,
            AlertSeverity::Warning => 1,
            AlertSeverity::Info => 2,
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Critical => write!(f, "critical"),
            AlertSeverity::Warning => write!(f, "warning"),
            AlertSeverity::Info => write!(f, "info"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Alert {
    pub id: String,
    pub severity: AlertSeverity,
    pub titulo: String,
    pub mensaje: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tienda: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accion: Option<String>,
}

/// Generate the alert list for a set of store records.
///
/// Stores are scanned in input order; within one severity tier the original
/// discovery order is preserved (the sort is stable). When `last_refresh` is
/// provided, an informational data-freshness alert is appended.
pub fn generate_alerts(
    records: &[StoreSummary],
    last_refresh: Option<DateTime<Utc>>,
) -> Vec<Alert> {
    let now = Utc::now();
    let mut alerts = Vec::new();

    for record in records {
        if record.cobertura < CRITICAL_ALERT_DAYS {
            alerts.push(Alert {
                id: format!("critical-{}", record.tienda),
                severity: AlertSeverity::Critical,
                titulo: "Inventario Crítico".to_string(),
                mensaje: format!(
                    "{} tiene solo {:.0} días de cobertura",
                    record.tienda, record.cobertura
                ),
                tienda: Some(record.tienda.clone()),
                timestamp: now,
                accion: Some("Reabastecer urgente".to_string()),
            });
        }

        if record.cobertura > OVERSTOCK_ALERT_DAYS {
            alerts.push(Alert {
                id: format!("overstock-{}", record.tienda),
                severity: AlertSeverity::Warning,
                titulo: "Sobreinventario Alto".to_string(),
                mensaje: format!(
                    "{} tiene {:.0} días de cobertura",
                    record.tienda, record.cobertura
                ),
                tienda: Some(record.tienda.clone()),
                timestamp: now,
                accion: Some("Considerar transferencia".to_string()),
            });
        }
    }

    if let Some(refreshed) = last_refresh {
        alerts.push(Alert {
            id: "system-refresh".to_string(),
            severity: AlertSeverity::Info,
            titulo: "Actualización de Datos".to_string(),
            mensaje: format!("Los datos fueron actualizados {}", time_ago(refreshed, now)),
            tienda: None,
            timestamp: refreshed,
            accion: None,
        });
    }

    // Stable sort: critical, warning, info; discovery order within a tier.
    alerts.sort_by_key(|a| a.severity.rank());
    alerts.truncate(MAX_ALERTS);
    alerts
}

/// Format a past timestamp as Spanish relative time ("hace 2 horas").
///
/// A `then` in the future (clock skew between the refresh source and this
/// host) is clamped to "hace unos segundos" rather than producing negative
/// buckets.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then).max(chrono::Duration::zero());
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "hace unos segundos".to_string();
    }
    if minutes < 60 {
        return if minutes == 1 {
            "hace 1 minuto".to_string()
        } else {
            format!("hace {} minutos", minutes)
        };
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return if hours == 1 {
            "hace 1 hora".to_string()
        } else {
            format!("hace {} horas", hours)
        };
    }
    let days = elapsed.num_days();
    if days == 1 {
        "hace 1 día".to_string()
    } else {
        format!("hace {} días", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;
    use chrono::Duration;

    fn store(tienda: &str, cobertura: f64) -> StoreSummary {
        StoreSummary {
            tienda: tienda.to_string(),
            inventario: 100.0,
            ventas: 100.0,
            cobertura,
            status: Status::Optimo,
        }
    }

    #[test]
    fn low_coverage_emits_critical() {
        let alerts = generate_alerts(&[store("Tienda 5", 8.0)], None);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(alerts[0].id, "critical-Tienda 5");
        assert_eq!(alerts[0].accion.as_deref(), Some("Reabastecer urgente"));
    }

    #[test]
    fn heavy_overstock_emits_warning() {
        let alerts = generate_alerts(&[store("Tienda 2", 150.0)], None);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        assert_eq!(alerts[0].accion.as_deref(), Some("Considerar transferencia"));
    }

    #[test]
    fn in_range_coverage_emits_nothing() {
        let alerts = generate_alerts(&[store("Tienda 1", 45.0), store("Tienda 2", 90.0)], None);
        assert!(alerts.is_empty());
    }

    #[test]
    fn sorted_by_severity_with_stable_ties() {
        let records = vec![
            store("A", 150.0), // warning, discovered first
            store("B", 5.0),   // critical
            store("C", 130.0), // warning, discovered second
            store("D", 10.0),  // critical
        ];
        let alerts = generate_alerts(&records, None);
        let ids: Vec<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["critical-B", "critical-D", "overstock-A", "overstock-C"]
        );
    }

    #[test]
    fn truncates_to_cap_after_sorting() {
        // 8 critical + 4 warning: the cap must drop warnings, never criticals.
        let mut records = Vec::new();
        for i in 0..8 {
            records.push(store(&format!("C{}", i), 5.0));
        }
        for i in 0..4 {
            records.push(store(&format!("W{}", i), 200.0));
        }
        let alerts = generate_alerts(&records, None);
        assert_eq!(alerts.len(), MAX_ALERTS);
        let criticals = alerts
            .iter()
            .filter(|a| a.severity == AlertSeverity::Critical)
            .count();
        assert_eq!(criticals, 8);
    }

    #[test]
    fn refresh_notice_is_informational_and_last() {
        let refreshed = Utc::now() - Duration::hours(2);
        let alerts = generate_alerts(&[store("A", 5.0)], Some(refreshed));
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[1].severity, AlertSeverity::Info);
        assert!(alerts[1].mensaje.contains("hace 2 horas"));
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc::now();
        assert_eq!(time_ago(now, now), "hace unos segundos");
        assert_eq!(time_ago(now - Duration::minutes(1), now), "hace 1 minuto");
        assert_eq!(time_ago(now - Duration::minutes(45), now), "hace 45 minutos");
        assert_eq!(time_ago(now - Duration::hours(1), now), "hace 1 hora");
        assert_eq!(time_ago(now - Duration::days(3), now), "hace 3 días");
    }

    #[test]
    fn time_ago_clamps_future_timestamps() {
        let now = Utc::now();
        assert_eq!(time_ago(now + Duration::minutes(5), now), "hace unos segundos");
        assert_eq!(time_ago(now + Duration::days(2), now), "hace unos segundos");
    }
}
