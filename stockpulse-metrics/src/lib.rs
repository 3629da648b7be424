//! Pure derivation and classification engine for retail inventory metrics.
//!
//! Every function in this crate is a deterministic, synchronous computation
//! over immutable input slices: no I/O, no shared state, no randomness.
//! Raw per-store and per-employee records go in; status labels, alerts,
//! rankings, recommendations and insights come out. The surrounding crates
//! (pipeline, client, server) own fetching and presentation.

pub mod alerts;
pub mod classify;
pub mod distribution;
pub mod employees;
pub mod error;
pub mod insights;
pub mod rank;
pub mod recommend;
pub mod restock_analysis;
pub mod summary;
pub mod trend;
pub mod turnover;
pub mod types;

pub use classify::{classify, Classification};
pub use error::MetricsError;
pub use types::{Status, StoreSummary};
