use async_trait::async_trait;
use stockpulse_metrics::alerts::{AlertSeverity, CRITICAL_ALERT_DAYS, OVERSTOCK_ALERT_DAYS};
use stockpulse_metrics::types::StoreSummary;

use crate::error::PipelineError;
use crate::source::Source;
use crate::types::{AlertCandidate, DashboardQuery, QueryRole};

/// Emits alert candidates from per-store coverage figures.
///
/// One candidate per threshold crossing: coverage under the critical line
/// yields a stockout candidate, coverage over the overstock line yields a
/// transfer candidate. Store managers only see their own store; an explicit
/// store scope on the query narrows the scan further.
pub struct CoverageAlertSource {
    records: Vec<StoreSummary>,
}

impl CoverageAlertSource {
    pub fn new(records: Vec<StoreSummary>) -> Self {
        Self { records }
    }

    fn in_scope(&self, query: &DashboardQuery, record: &StoreSummary) -> bool {
        if let QueryRole::StoreManager { tienda } = &query.role {
            if record.tienda != *tienda {
                return false;
            }
        }
        query.tiendas.is_empty() || query.tiendas.iter().any(|t| t == &record.tienda)
    }
}

#[async_trait]
impl Source<DashboardQuery, AlertCandidate> for CoverageAlertSource {
    fn enable(&self, _query: &DashboardQuery) -> bool {
        !self.records.is_empty()
    }

    async fn get_candidates(
        &self,
        query: &DashboardQuery,
    ) -> Result<Vec<AlertCandidate>, PipelineError> {
        let mut candidates = Vec::new();

        for record in self.records.iter().filter(|r| self.in_scope(query, r)) {
            if record.cobertura < CRITICAL_ALERT_DAYS {
                candidates.push(AlertCandidate {
                    id: format!("critical-{}", record.tienda),
                    severity: AlertSeverity::Critical,
                    tienda: record.tienda.clone(),
                    cobertura: record.cobertura,
                    titulo: "Inventario Crítico".to_string(),
                    mensaje: format!(
                        "{} tiene solo {:.0} días de cobertura",
                        record.tienda, record.cobertura
                    ),
                    accion: Some("Reabastecer urgente".to_string()),
                    ..AlertCandidate::default()
                });
            }

            if record.cobertura > OVERSTOCK_ALERT_DAYS {
                candidates.push(AlertCandidate {
                    id: format!("overstock-{}", record.tienda),
                    severity: AlertSeverity::Warning,
                    tienda: record.tienda.clone(),
                    cobertura: record.cobertura,
                    titulo: "Sobreinventario Alto".to_string(),
                    mensaje: format!(
                        "{} tiene {:.0} días de cobertura",
                        record.tienda, record.cobertura
                    ),
                    accion: Some("Considerar transferencia".to_string()),
                    ..AlertCandidate::default()
                });
            }
        }

        Ok(candidates)
    }
}
