//! Coverage distribution bucketing for the dashboard histogram.

use serde::Serialize;

use crate::types::StoreSummary;

/// One coverage band. `max` is exclusive; `None` means unbounded.
#[derive(Clone, Debug, Serialize)]
pub struct CoverageBand {
    pub nombre: &'static str,
    pub min: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub count: u32,
}

impl CoverageBand {
    fn contains(&self, cobertura: f64) -> bool {
        cobertura >= self.min && self.max.map_or(true, |m| cobertura < m)
    }
}

/// Count stores per coverage band. Bands are half-open `[min, max)` and
/// jointly cover the whole non-negative axis, so every record lands in
/// exactly one band.
pub fn coverage_distribution(records: &[StoreSummary]) -> Vec<CoverageBand> {
    let mut bands = vec![
        CoverageBand { nombre: "<14 días", min: 0.0, max: Some(14.0), count: 0 },
        CoverageBand { nombre: "14-28 días", min: 14.0, max: Some(28.0), count: 0 },
        CoverageBand { nombre: "28-60 días", min: 28.0, max: Some(60.0), count: 0 },
        CoverageBand { nombre: "60-90 días", min: 60.0, max: Some(90.0), count: 0 },
        CoverageBand { nombre: ">90 días", min: 90.0, max: None, count: 0 },
    ];

    for record in records {
        if let Some(band) = bands.iter_mut().find(|b| b.contains(record.cobertura)) {
            band.count += 1;
        }
    }

    bands
}
