use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Inventory health status for a store, employee portfolio or business unit.
///
/// The wire labels are the Spanish strings the dashboard API emits; the
/// variants carry them through serde renames so the JSON contract stays
/// byte-for-byte compatible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Coverage below 28 days: stockout risk.
    #[serde(rename = "CRÍTICO")]
    Critico,
    /// Coverage between 28 and 90 days inclusive.
    #[serde(rename = "ÓPTIMO")]
    Optimo,
    /// Coverage above 90 days: capital tied up in excess stock.
    #[serde(rename = "SOBREINVENTARIO")]
    Sobreinventario,
    /// No sales recorded in the period; coverage is undefined.
    #[serde(rename = "SIN VENTAS")]
    SinVentas,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Critico => write!(f, "CRÍTICO"),
            Status::Optimo => write!(f, "ÓPTIMO"),
            Status::Sobreinventario => write!(f, "SOBREINVENTARIO"),
            Status::SinVentas => write!(f, "SIN VENTAS"),
        }
    }
}

/// Display variant for a status badge in the presentation layer.
///
/// A finite enum-to-enum mapping, so no component ever branches on the
/// Spanish label strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Destructive,
    Default,
    Secondary,
    Outline,
}

impl Status {
    pub fn badge(&self) -> BadgeVariant {
        match self {
            Status::Critico => BadgeVariant::Destructive,
            Status::Optimo => BadgeVariant::Default,
            Status::Sobreinventario => BadgeVariant::Secondary,
            Status::SinVentas => BadgeVariant::Outline,
        }
    }
}

// ---------------------------------------------------------------------------
// Store records
// ---------------------------------------------------------------------------

/// Per-store summary for one query period. Immutable once received;
/// `cobertura` and `status` are derived server-side from the raw quantities.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreSummary {
    pub tienda: String,
    pub inventario: f64,
    pub ventas: f64,
    pub cobertura: f64,
    pub status: Status,
}

/// One business unit (product category) inside a store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnitDetail {
    pub unidad: String,
    pub inventario: f64,
    pub ventas: f64,
    pub cobertura: f64,
}

/// Full detail for a single store, broken down by business unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreDetail {
    pub tienda: String,
    pub periodo: String,
    pub total_inventario: f64,
    pub total_ventas: f64,
    pub cobertura: f64,
    pub detalle_unidades: Vec<UnitDetail>,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Chain-wide summary for the dashboard header cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_tiendas: u32,
    pub tiendas_criticas: u32,
    /// Stores outside the optimal band for reasons other than stockout risk
    /// (overstocked or with no sales).
    pub tiendas_alerta: u32,
    pub tiendas_optimas: u32,
    pub inventario_total: f64,
    pub ventas_totales: f64,
    pub cobertura_promedio: f64,
    pub periodo: String,
}

// ---------------------------------------------------------------------------
// Historical series
// ---------------------------------------------------------------------------

/// One month of the historical series.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub mes: u32,
    pub inventario: f64,
    pub ventas: f64,
    pub cobertura: f64,
}

/// Historical series for a year, chain-wide when `tienda` is `None`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoricalResponse {
    pub tienda: Option<String>,
    pub year: i32,
    pub datos: Vec<HistoricalPoint>,
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

/// Per-employee performance record for one period.
///
/// `comision` is derived (fixed percentage of total sales) and `ranking` is
/// the 1-based position after sorting by `ventas_totales` descending; see
/// `employees::assign_rankings`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmployeePerformance {
    pub empleado: String,
    pub tienda: String,
    pub ventas_totales: f64,
    pub num_ventas: u32,
    pub ticket_promedio: f64,
    pub comision: f64,
    /// Customer satisfaction rating, 0.0 to 5.0.
    pub satisfaccion_cliente: f64,
    /// Conversion rate as a percentage.
    pub tasa_conversion: f64,
    pub unidades_vendidas: u32,
    pub devoluciones: u32,
    pub ranking: u32,
}
