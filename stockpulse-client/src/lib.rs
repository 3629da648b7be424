//! HTTP client for the StockPulse dashboard API.
//!
//! Thin typed wrapper over the REST endpoints: every call returns the
//! deserialized wire type from `stockpulse-metrics` or a named error.

pub mod client;
pub mod error;

pub use client::DashboardClient;
pub use error::{ClientError, ClientResult};
