//! Error taxonomy for a diagnostic run.
//!
//! Three families: fatal configuration errors raised before any model
//! is built, fatal trace-document errors, and typed "not found" lookup
//! errors the caller interprets. Nothing here is retried.

pub mod config_error;
pub mod error_code;
pub mod model_error;
pub mod trace_error;

pub use config_error::ConfigError;
pub use model_error::ModelError;
pub use trace_error::TraceError;

use error_code::FaultlineErrorCode;

/// Top-level error for operations that can fail in more than one
/// family, such as loading a whole diagnostic run.
#[derive(Debug, thiserror::Error)]
pub enum FaultlineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl FaultlineErrorCode for FaultlineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Trace(e) => e.error_code(),
            Self::Model(e) => e.error_code(),
        }
    }
}
