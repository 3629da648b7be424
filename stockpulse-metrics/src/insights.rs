//! Executive insight derivation for a single store.
//!
//! Composes unit-level turnover ratios and store-level coverage bands into
//! typed, prioritized insight records, plus the KPI block shown above them.
//!
//! Turnover here is the plain per-period ratio (ventas / inventario); the
//! annualized variant lives in `turnover`.

use serde::Serialize;

use crate::classify::CRITICAL_MAX_DAYS;
use crate::types::UnitDetail;

/// Store coverage below this is a critical stockout insight.
pub const STORE_CRITICAL_DAYS: f64 = 21.0;
/// Store coverage above this is a significant-overstock insight.
pub const STORE_OVERSTOCK_DAYS: f64 = 120.0;
/// Unit coverage below this is a critical-stock insight.
pub const UNIT_CRITICAL_DAYS: f64 = 14.0;
/// Unit coverage above this suggests transferring stock out.
pub const UNIT_EXCESS_DAYS: f64 = 150.0;
/// Turnover above this is flagged as high performance.
pub const HIGH_TURNOVER: f64 = 0.5;
/// Turnover below this is flagged as slow rotation.
pub const LOW_TURNOVER: f64 = 0.2;
/// Mean unit coverage above this triggers the capital-optimization check.
pub const CAPITAL_REVIEW_DAYS: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Danger,
    Info,
}

/// One derived insight. Priority 1 is the most urgent; the output of
/// [`derive_insights`] is sorted ascending by priority.
#[derive(Clone, Debug, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub titulo: String,
    pub mensaje: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accion: Option<String>,
    pub priority: u8,
}

/// Derive the insight list for one store.
///
/// Units with zero inventory are skipped in the turnover checks rather than
/// producing NaN-based insights.
pub fn derive_insights(
    tienda: &str,
    units: &[UnitDetail],
    total_inventario: f64,
    total_ventas: f64,
    cobertura: f64,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    // Store-level coverage analysis.
    if cobertura < STORE_CRITICAL_DAYS {
        insights.push(Insight {
            kind: InsightKind::Danger,
            titulo: "Riesgo Crítico de Desabasto".to_string(),
            mensaje: format!(
                "{} tiene solo {:.0} días de cobertura. Se requiere reabastecimiento urgente en las próximas 48-72 horas.",
                tienda, cobertura
            ),
            accion: Some("Activar protocolo de emergencia de reabastecimiento".to_string()),
            priority: 1,
        });
    } else if cobertura < CRITICAL_MAX_DAYS {
        insights.push(Insight {
            kind: InsightKind::Warning,
            titulo: "Cobertura Bajo el Mínimo".to_string(),
            mensaje: format!(
                "La cobertura de {:.0} días está por debajo del estándar óptimo. Planificar reabastecimiento en los próximos 7-10 días.",
                cobertura
            ),
            accion: Some("Programar orden de compra".to_string()),
            priority: 2,
        });
    } else if cobertura > STORE_OVERSTOCK_DAYS {
        insights.push(Insight {
            kind: InsightKind::Warning,
            titulo: "Sobreinventario Significativo".to_string(),
            mensaje: format!(
                "Con {:.0} días de cobertura hay un exceso considerable de inventario: costos de almacenamiento y capital inmovilizado.",
                cobertura
            ),
            accion: Some("Considerar promociones o transferencias".to_string()),
            priority: 2,
        });
    }

    // Unit-level analysis.
    for unit in units {
        if unit.cobertura < UNIT_CRITICAL_DAYS {
            insights.push(Insight {
                kind: InsightKind::Danger,
                titulo: format!("{}: Stock Crítico", unit.unidad),
                mensaje: format!(
                    "Solo {:.0} días de cobertura. Riesgo inmediato de agotamiento.",
                    unit.cobertura
                ),
                accion: Some(format!("Reabastecimiento urgente de {}", unit.unidad)),
                priority: 1,
            });
        }

        if unit.cobertura > UNIT_EXCESS_DAYS {
            insights.push(Insight {
                kind: InsightKind::Warning,
                titulo: format!("{}: Exceso de Inventario", unit.unidad),
                mensaje: format!(
                    "{:.0} días de cobertura indica sobreinventario. Considerar transferencia a otras tiendas.",
                    unit.cobertura
                ),
                accion: Some(format!(
                    "Evaluar transferencia de {} pzs",
                    (unit.inventario * 0.3).floor()
                )),
                priority: 3,
            });
        }

        // Turnover is undefined for empty units; skip rather than emit NaN.
        if unit.inventario > 0.0 {
            let turnover = unit.ventas / unit.inventario;
            if turnover > HIGH_TURNOVER {
                insights.push(Insight {
                    kind: InsightKind::Success,
                    titulo: format!("{}: Alto Rendimiento", unit.unidad),
                    mensaje: format!(
                        "Excelente rotación de inventario ({:.0}%). Mantener niveles actuales.",
                        turnover * 100.0
                    ),
                    accion: None,
                    priority: 4,
                });
            } else if turnover < LOW_TURNOVER {
                insights.push(Insight {
                    kind: InsightKind::Info,
                    titulo: format!("{}: Baja Rotación", unit.unidad),
                    mensaje: format!(
                        "Rotación de {:.0}% indica inventario de lenta rotación. Evaluar estrategia de ventas.",
                        turnover * 100.0
                    ),
                    accion: Some("Análisis de precio y promociones".to_string()),
                    priority: 3,
                });
            }
        }
    }

    // Capital optimization opportunity.
    if !units.is_empty() {
        let avg_coverage: f64 =
            units.iter().map(|u| u.cobertura).sum::<f64>() / units.len() as f64;
        if avg_coverage > CAPITAL_REVIEW_DAYS {
            let excess = total_inventario - total_ventas * 2.0;
            if excess > 0.0 {
                insights.push(Insight {
                    kind: InsightKind::Info,
                    titulo: "Oportunidad de Optimización de Capital".to_string(),
                    mensaje: format!(
                        "Aproximadamente {:.0} piezas de exceso. Optimizar podría liberar capital para inversiones más rentables.",
                        excess
                    ),
                    accion: Some("Revisar estrategia de inventario".to_string()),
                    priority: 3,
                });
            }
        }
    }

    insights.sort_by_key(|i| i.priority);
    insights
}

/// KPI block for a store detail view.
#[derive(Clone, Debug, Serialize)]
pub struct StoreKpis {
    /// ventas / inventario, as a percentage.
    pub indice_rotacion: f64,
    /// ventas / (inventario + ventas), as a percentage.
    pub eficiencia_inventario: f64,
    /// Units with per-period turnover above 40%.
    pub unidades_alto_rendimiento: u32,
    /// Units with coverage below the critical threshold.
    pub unidades_criticas: u32,
    pub mejor_unidad: Option<String>,
    pub peor_unidad: Option<String>,
}

/// Compute the KPI block. All ratios are zero when their denominator is
/// zero; best/worst are ranked by turnover over units with stock.
pub fn store_kpis(units: &[UnitDetail], total_inventario: f64, total_ventas: f64) -> StoreKpis {
    let indice_rotacion = if total_inventario > 0.0 {
        total_ventas / total_inventario * 100.0
    } else {
        0.0
    };
    let denom = total_inventario + total_ventas;
    let eficiencia_inventario = if denom > 0.0 {
        total_ventas / denom * 100.0
    } else {
        0.0
    };

    let turnover = |u: &UnitDetail| u.ventas / u.inventario;
    let with_stock: Vec<&UnitDetail> = units.iter().filter(|u| u.inventario > 0.0).collect();

    let unidades_alto_rendimiento =
        with_stock.iter().filter(|u| turnover(u) > 0.4).count() as u32;
    let unidades_criticas = units
        .iter()
        .filter(|u| u.cobertura < CRITICAL_MAX_DAYS)
        .count() as u32;

    let mejor_unidad = with_stock
        .iter()
        .max_by(|a, b| turnover(a).total_cmp(&turnover(b)))
        .map(|u| u.unidad.clone());
    let peor_unidad = with_stock
        .iter()
        .min_by(|a, b| turnover(a).total_cmp(&turnover(b)))
        .map(|u| u.unidad.clone());

    StoreKpis {
        indice_rotacion,
        eficiencia_inventario,
        unidades_alto_rendimiento,
        unidades_criticas,
        mejor_unidad,
        peor_unidad,
    }
}
