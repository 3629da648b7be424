use chrono::{Datelike, Utc};
use serde::Serialize;
use stockpulse_metrics::alerts::AlertSeverity;

use crate::candidate_pipeline::HasRequestId;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Reporting period for a dashboard query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// The current calendar month.
    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    /// Wire label, e.g. "2026-08".
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// The role of the user making the query.
///
/// Store managers only ever see candidates for their own store; executives
/// see the whole chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryRole {
    Executive,
    StoreManager { tienda: String },
}

/// Query from a dashboard session.
#[derive(Clone, Debug)]
pub struct DashboardQuery {
    pub request_id: String,
    pub user_id: String,
    pub role: QueryRole,
    /// Explicit store scope; empty means every store visible to the role.
    pub tiendas: Vec<String>,
    /// Filled in by the query hydrator stage when absent.
    pub period: Option<Period>,
}

impl HasRequestId for DashboardQuery {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

// ---------------------------------------------------------------------------
// Candidate types
// ---------------------------------------------------------------------------

/// A candidate alert flowing through the digest pipeline.
///
/// Sources create candidates with the descriptive fields set; the scoring
/// fields start as `None` and are populated by the hydrator and scorer
/// stages.
#[derive(Clone, Debug, Serialize)]
pub struct AlertCandidate {
    pub id: String,
    pub severity: AlertSeverity,
    pub tienda: String,
    pub cobertura: f64,
    pub titulo: String,
    pub mensaje: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accion: Option<String>,

    // Scoring fields (populated by scorers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_score: Option<f64>,
}

impl Default for AlertCandidate {
    fn default() -> Self {
        Self {
            id: String::new(),
            severity: AlertSeverity::Info,
            tienda: String::new(),
            cobertura: 0.0,
            titulo: String::new(),
            mensaje: String::new(),
            accion: None,
            priority_score: None,
            urgency_score: None,
        }
    }
}
