//! Profiling catalog: per-node timing/power data and pipeline constants.

pub mod catalog;
pub mod error;

pub use catalog::{PipelineParams, ProfilingCatalog};
pub use error::ProfileError;
