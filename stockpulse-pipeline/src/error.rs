//! Pipeline error types.

use stockpulse_metrics::MetricsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error("stage '{stage}' failed: {reason}")]
    Stage { stage: String, reason: String },
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
