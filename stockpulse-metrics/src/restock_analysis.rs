//! Product-level restock analysis.
//!
//! Derives per-product stockout horizons, sell-through rates and restock
//! priorities from the trailing 30 days of sales. Everything is a function
//! of the record itself; products that sold nothing have no stockout
//! horizon (`None`), never an infinite one.

use serde::{Deserialize, Serialize};

use crate::classify::PERIOD_DAYS;
use crate::rank::{rank_by, RankDirection};

/// Days of supply a product restock order should cover.
pub const PRODUCT_RESTOCK_DAYS: f64 = 30.0;

/// Raw per-product record within one store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductRecord {
    pub sku: String,
    pub nombre: String,
    pub categoria: String,
    pub stock_actual: f64,
    pub stock_almacen: f64,
    pub ventas_30_dias: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RestockPriority {
    Urgent,
    High,
    Medium,
    Low,
}

#[derive(Clone, Debug, Serialize)]
pub struct ProductAnalysis {
    pub sku: String,
    pub nombre: String,
    pub categoria: String,
    pub stock_actual: f64,
    pub stock_almacen: f64,
    pub ventas_30_dias: f64,
    pub venta_diaria_promedio: f64,
    /// Days until stockout at the current rate; `None` when nothing sold.
    pub dias_hasta_agotamiento: Option<f64>,
    pub prioridad: RestockPriority,
    pub cantidad_recomendada: u64,
    /// Fraction of (stock + recent sales) that sold, as a percentage.
    pub tasa_sell_through: f64,
}

/// Analyze a store's product list.
pub fn analyze_products(records: &[ProductRecord]) -> Vec<ProductAnalysis> {
    records.iter().map(analyze_product).collect()
}

fn analyze_product(record: &ProductRecord) -> ProductAnalysis {
    let venta_diaria = record.ventas_30_dias / PERIOD_DAYS;

    let dias_hasta_agotamiento = if venta_diaria > 0.0 {
        Some(record.stock_actual / venta_diaria)
    } else {
        None
    };

    let prioridad = match dias_hasta_agotamiento {
        Some(d) if d < 5.0 => RestockPriority::Urgent,
        Some(d) if d < 10.0 => RestockPriority::High,
        Some(d) if d < 20.0 => RestockPriority::Medium,
        _ => RestockPriority::Low,
    };

    let denom = record.stock_actual + record.ventas_30_dias;
    let tasa_sell_through = if denom > 0.0 {
        record.ventas_30_dias / denom * 100.0
    } else {
        0.0
    };

    ProductAnalysis {
        sku: record.sku.clone(),
        nombre: record.nombre.clone(),
        categoria: record.categoria.clone(),
        stock_actual: record.stock_actual,
        stock_almacen: record.stock_almacen,
        ventas_30_dias: record.ventas_30_dias,
        venta_diaria_promedio: venta_diaria,
        dias_hasta_agotamiento,
        prioridad,
        cantidad_recomendada: (venta_diaria * PRODUCT_RESTOCK_DAYS).ceil() as u64,
        tasa_sell_through,
    }
}

/// The `n` slowest movers by sell-through rate, slowest first.
pub fn slow_movers(analyses: &[ProductAnalysis], n: usize) -> Vec<ProductAnalysis> {
    rank_by(analyses, |a| a.tasa_sell_through, RankDirection::Bottom, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, stock: f64, ventas_30d: f64) -> ProductRecord {
        ProductRecord {
            sku: sku.to_string(),
            nombre: "Tenis Deportivo".to_string(),
            categoria: "Dama".to_string(),
            stock_actual: stock,
            stock_almacen: stock * 2.0,
            ventas_30_dias: ventas_30d,
        }
    }

    #[test]
    fn derives_rate_horizon_and_quantity() {
        // 150 sold in 30 days → 5/day; 20 in stock → 4 days left.
        let a = analyze_product(&product("CAL-DAM-0001", 20.0, 150.0));
        assert!((a.venta_diaria_promedio - 5.0).abs() < 1e-9);
        assert_eq!(a.dias_hasta_agotamiento, Some(4.0));
        assert_eq!(a.prioridad, RestockPriority::Urgent);
        assert_eq!(a.cantidad_recomendada, 150);
        // 150 / (20 + 150) ≈ 88.2%
        assert!((a.tasa_sell_through - 88.23529411764706).abs() < 1e-9);
    }

    #[test]
    fn priority_bands() {
        // 30/day over 30 days = 1/day
        assert_eq!(
            analyze_product(&product("A", 7.0, 30.0)).prioridad,
            RestockPriority::High
        );
        assert_eq!(
            analyze_product(&product("B", 15.0, 30.0)).prioridad,
            RestockPriority::Medium
        );
        assert_eq!(
            analyze_product(&product("C", 60.0, 30.0)).prioridad,
            RestockPriority::Low
        );
    }

    #[test]
    fn no_sales_has_no_stockout_horizon() {
        let a = analyze_product(&product("IDLE", 40.0, 0.0));
        assert_eq!(a.dias_hasta_agotamiento, None);
        assert_eq!(a.prioridad, RestockPriority::Low);
        assert_eq!(a.cantidad_recomendada, 0);
        assert_eq!(a.tasa_sell_through, 0.0);
    }

    #[test]
    fn empty_product_never_divides() {
        let a = analyze_product(&product("ZERO", 0.0, 0.0));
        assert_eq!(a.tasa_sell_through, 0.0);
        assert!(a.tasa_sell_through.is_finite());
    }

    #[test]
    fn slow_movers_are_lowest_sell_through_first() {
        let analyses = analyze_products(&[
            product("FAST", 10.0, 300.0),
            product("SLOW", 300.0, 10.0),
            product("MID", 100.0, 100.0),
        ]);
        let slow = slow_movers(&analyses, 2);
        assert_eq!(slow.len(), 2);
        assert_eq!(slow[0].sku, "SLOW");
        assert_eq!(slow[1].sku, "MID");
    }
}
