//! Metrics error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    #[error("invalid input for '{field}': {value} (must be finite and non-negative)")]
    InvalidInput { field: &'static str, value: f64 },
}

/// Result type alias for metrics operations.
pub type MetricsResult<T> = Result<T, MetricsError>;
