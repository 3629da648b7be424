//! Staged candidate pipeline for the alert digest.
//!
//! Store records flow through the classic ranking-pipeline stages: query
//! hydrators enrich the query, sources emit alert candidates, hydrators
//! attach context, filters partition, scorers assign priorities, and a
//! selector sorts and truncates. Side effects run after selection and never
//! affect the result.

pub mod candidate_pipeline;
pub mod components;
pub mod error;
pub mod filter;
pub mod hydrator;
pub mod loader;
pub mod pipelines;
pub mod query_hydrator;
pub mod scorer;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod types;
pub mod util;

pub use error::PipelineError;
