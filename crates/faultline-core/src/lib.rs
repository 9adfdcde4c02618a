//! # faultline-core
//!
//! Foundation crate for the Faultline query-fault localizer.
//! Defines the error taxonomy, run configuration, shared constants,
//! collection aliases, and tracing setup. The analysis crate depends
//! on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used items at the crate root.
pub use config::RunConfig;
pub use errors::error_code::FaultlineErrorCode;
pub use errors::{ConfigError, FaultlineError, ModelError, TraceError};
pub use types::collections::{FxHashMap, FxHashSet};
