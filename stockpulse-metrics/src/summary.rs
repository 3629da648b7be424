//! Chain-wide summary aggregation.

use crate::types::{DashboardSummary, Status, StoreSummary};

/// Aggregate per-store records into the dashboard summary.
///
/// Single pass, O(n). An empty slice yields all-zero counts and a mean
/// coverage of 0 rather than dividing by zero.
///
/// `tiendas_alerta` groups the stores that are out of band without being a
/// stockout risk: overstocked stores and stores with no sales.
pub fn summarize(records: &[StoreSummary], periodo: &str) -> DashboardSummary {
    let mut criticas = 0u32;
    let mut optimas = 0u32;
    let mut alerta = 0u32;
    let mut inventario_total = 0.0;
    let mut ventas_totales = 0.0;
    let mut cobertura_sum = 0.0;

    for record in records {
        match record.status {
            Status::Critico => criticas += 1,
            Status::Optimo => optimas += 1,
            Status::Sobreinventario | Status::SinVentas => alerta += 1,
        }
        inventario_total += record.inventario;
        ventas_totales += record.ventas;
        cobertura_sum += record.cobertura;
    }

    let cobertura_promedio = if records.is_empty() {
        0.0
    } else {
        cobertura_sum / records.len() as f64
    };

    DashboardSummary {
        total_tiendas: records.len() as u32,
        tiendas_criticas: criticas,
        tiendas_alerta: alerta,
        tiendas_optimas: optimas,
        inventario_total,
        ventas_totales,
        cobertura_promedio,
        periodo: periodo.to_string(),
    }
}
