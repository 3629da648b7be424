//! CSV data loaders for store and employee records.
//!
//! Store CSV columns:
//!   tienda, inventario, ventas
//! Employee CSV columns:
//!   empleado, tienda, num_ventas, ticket_promedio, satisfaccion_cliente,
//!   tasa_conversion, unidades_vendidas, devoluciones
//!
//! Derived fields (cobertura, status, comision, ranking) are computed here,
//! never read from the file.

use std::io::Read;

use serde::Deserialize;
use stockpulse_metrics::employees::{assign_rankings, commission_for};
use stockpulse_metrics::types::{EmployeePerformance, StoreSummary};

use crate::error::PipelineError;

/// One raw store row before classification.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRow {
    pub tienda: String,
    pub inventario: f64,
    pub ventas: f64,
}

/// One raw employee row before derivation.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRow {
    pub empleado: String,
    pub tienda: String,
    pub num_ventas: u32,
    pub ticket_promedio: f64,
    pub satisfaccion_cliente: f64,
    pub tasa_conversion: f64,
    pub unidades_vendidas: u32,
    pub devoluciones: u32,
}

/// Load store records from a CSV reader, classifying each row.
pub fn load_stores<R: Read>(reader: R) -> Result<Vec<StoreSummary>, PipelineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: StoreRow = result.map_err(|source| PipelineError::Csv {
            line: line_num + 2,
            source,
        })?;
        let classification = stockpulse_metrics::classify(row.inventario, row.ventas)?;
        records.push(StoreSummary {
            tienda: row.tienda,
            inventario: row.inventario,
            ventas: row.ventas,
            cobertura: classification.cobertura,
            status: classification.status,
        });
    }

    Ok(records)
}

/// Load store records from a CSV file path.
pub fn load_stores_file(path: &str) -> Result<Vec<StoreSummary>, PipelineError> {
    let file = std::fs::File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_string(),
        source,
    })?;
    load_stores(file)
}

/// Load employee records from a CSV reader.
///
/// Derives `ventas_totales`, `comision` and the 1-based `ranking`; the
/// returned list is sorted by total sales descending.
pub fn load_employees<R: Read>(reader: R) -> Result<Vec<EmployeePerformance>, PipelineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: EmployeeRow = result.map_err(|source| PipelineError::Csv {
            line: line_num + 2,
            source,
        })?;
        let ventas_totales = f64::from(row.num_ventas) * row.ticket_promedio;
        records.push(EmployeePerformance {
            empleado: row.empleado,
            tienda: row.tienda,
            ventas_totales,
            num_ventas: row.num_ventas,
            ticket_promedio: row.ticket_promedio,
            comision: commission_for(ventas_totales),
            satisfaccion_cliente: row.satisfaccion_cliente,
            tasa_conversion: row.tasa_conversion,
            unidades_vendidas: row.unidades_vendidas,
            devoluciones: row.devoluciones,
            ranking: 0,
        });
    }

    assign_rankings(&mut records);
    Ok(records)
}

/// Load employee records from a CSV file path.
pub fn load_employees_file(path: &str) -> Result<Vec<EmployeePerformance>, PipelineError> {
    let file = std::fs::File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_string(),
        source,
    })?;
    load_employees(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpulse_metrics::Status;

    const STORE_CSV: &str = "\
tienda,inventario,ventas
Tienda 1,1000,100
Tienda 2,200,500
Tienda 3,400,0
";

    const EMPLOYEE_CSV: &str = "\
empleado,tienda,num_ventas,ticket_promedio,satisfaccion_cliente,tasa_conversion,unidades_vendidas,devoluciones
Ana Martínez,Tienda 1,40,750.00,4.6,32.5,55,2
Juan Pérez,Tienda 2,64,750.00,4.2,28.0,80,5
";

    #[test]
    fn load_sample_store_csv() {
        let records = load_stores(STORE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        // 1000 / 100 * 30 = 300 days
        assert!((records[0].cobertura - 300.0).abs() < 1e-9);
        assert_eq!(records[0].status, Status::Sobreinventario);
        // 200 / 500 * 30 = 12 days
        assert!((records[1].cobertura - 12.0).abs() < 1e-9);
        assert_eq!(records[1].status, Status::Critico);
        assert_eq!(records[2].status, Status::SinVentas);
        assert_eq!(records[2].cobertura, 0.0);
    }

    #[test]
    fn negative_inventory_is_rejected() {
        let csv_data = "tienda,inventario,ventas\nTienda 1,-5,100\n";
        let err = load_stores(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::Metrics(_)));
    }

    #[test]
    fn employee_derivations_and_ranking() {
        let records = load_employees(EMPLOYEE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        // Juan: 64 × $750 = $48,000 beats Ana: 40 × $750 = $30,000
        assert_eq!(records[0].empleado, "Juan Pérez");
        assert_eq!(records[0].ranking, 1);
        assert!((records[0].ventas_totales - 48_000.0).abs() < 1e-9);
        // 3% commission
        assert!((records[0].comision - 1_440.0).abs() < 1e-9);
        assert_eq!(records[1].empleado, "Ana Martínez");
        assert_eq!(records[1].ranking, 2);
    }

    #[test]
    fn malformed_row_reports_line_number() {
        let csv_data = "tienda,inventario,ventas\nTienda 1,abc,100\n";
        let err = load_stores(csv_data.as_bytes()).unwrap_err();
        match err {
            PipelineError::Csv { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Csv error, got {other:?}"),
        }
    }
}
