//! Employee performance derivation and team aggregation.

use serde::Serialize;

use crate::types::EmployeePerformance;

/// Commission as a fixed fraction of total sales.
pub const COMMISSION_RATE: f64 = 0.03;

/// Commission owed for a sales total.
pub fn commission_for(ventas_totales: f64) -> f64 {
    ventas_totales * COMMISSION_RATE
}

/// Recompute the 1-based ranking over a set of employees.
///
/// Sorts by `ventas_totales` descending (ties keep input order, the sort is
/// stable) and assigns 1..N with no gaps. Call this whenever the underlying
/// collection changes.
pub fn assign_rankings(employees: &mut [EmployeePerformance]) {
    employees.sort_by(|a, b| b.ventas_totales.total_cmp(&a.ventas_totales));
    for (i, emp) in employees.iter_mut().enumerate() {
        emp.ranking = i as u32 + 1;
    }
}

/// Team-level aggregates for the employee dashboard header.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamSummary {
    pub total_empleados: u32,
    pub ventas_totales: f64,
    pub comisiones_totales: f64,
    pub ticket_promedio: f64,
    pub tasa_conversion_promedio: f64,
    pub satisfaccion_promedio: f64,
    pub unidades_vendidas: u32,
}

/// Aggregate employee records. An empty slice yields all zeroes.
pub fn team_summary(employees: &[EmployeePerformance]) -> TeamSummary {
    if employees.is_empty() {
        return TeamSummary {
            total_empleados: 0,
            ventas_totales: 0.0,
            comisiones_totales: 0.0,
            ticket_promedio: 0.0,
            tasa_conversion_promedio: 0.0,
            satisfaccion_promedio: 0.0,
            unidades_vendidas: 0,
        };
    }

    let n = employees.len() as f64;
    TeamSummary {
        total_empleados: employees.len() as u32,
        ventas_totales: employees.iter().map(|e| e.ventas_totales).sum(),
        comisiones_totales: employees.iter().map(|e| e.comision).sum(),
        ticket_promedio: employees.iter().map(|e| e.ticket_promedio).sum::<f64>() / n,
        tasa_conversion_promedio: employees.iter().map(|e| e.tasa_conversion).sum::<f64>() / n,
        satisfaccion_promedio: employees.iter().map(|e| e.satisfaccion_cliente).sum::<f64>() / n,
        unidades_vendidas: employees.iter().map(|e| e.unidades_vendidas).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(nombre: &str, ventas_totales: f64) -> EmployeePerformance {
        EmployeePerformance {
            empleado: nombre.to_string(),
            tienda: "Tienda 1".to_string(),
            ventas_totales,
            num_ventas: 40,
            ticket_promedio: ventas_totales / 40.0,
            comision: commission_for(ventas_totales),
            satisfaccion_cliente: 4.5,
            tasa_conversion: 30.0,
            unidades_vendidas: 60,
            devoluciones: 2,
            ranking: 0,
        }
    }

    #[test]
    fn rankings_are_a_strict_permutation() {
        let mut employees = vec![
            employee("Ana Martínez", 30_000.0),
            employee("Juan Pérez", 48_000.0),
            employee("María García", 40_000.0),
        ];
        assign_rankings(&mut employees);
        assert_eq!(employees[0].empleado, "Juan Pérez");
        assert_eq!(employees[0].ranking, 1);
        assert_eq!(employees[1].ranking, 2);
        assert_eq!(employees[2].ranking, 3);

        let mut ranks: Vec<u32> = employees.iter().map(|e| e.ranking).collect();
        ranks.sort();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn ranking_ties_keep_input_order() {
        let mut employees = vec![
            employee("Primero", 25_000.0),
            employee("Segundo", 25_000.0),
        ];
        assign_rankings(&mut employees);
        assert_eq!(employees[0].empleado, "Primero");
        assert_eq!(employees[0].ranking, 1);
        assert_eq!(employees[1].ranking, 2);
    }

    #[test]
    fn commission_is_three_percent() {
        assert!((commission_for(10_000.0) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn team_summary_aggregates() {
        let employees = vec![employee("A", 20_000.0), employee("B", 30_000.0)];
        let summary = team_summary(&employees);
        assert_eq!(summary.total_empleados, 2);
        assert_eq!(summary.ventas_totales, 50_000.0);
        assert!((summary.comisiones_totales - 1500.0).abs() < 1e-9);
        assert_eq!(summary.unidades_vendidas, 120);
        assert!((summary.satisfaccion_promedio - 4.5).abs() < 1e-9);
    }

    #[test]
    fn empty_team_is_all_zero() {
        let summary = team_summary(&[]);
        assert_eq!(summary.total_empleados, 0);
        assert_eq!(summary.ticket_promedio, 0.0);
        assert!(summary.ticket_promedio.is_finite());
    }
}
