//! Configuration errors. All fatal: a run aborts before any model is
//! built.

use std::path::PathBuf;

use super::error_code::{self, FaultlineErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Could not read configuration file {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("Malformed configuration in {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Required configuration key missing: {key}")]
    MissingKey { key: &'static str },

    #[error("Trace file named in configuration does not exist: {path}")]
    TraceFileNotFound { path: PathBuf },
}

impl FaultlineErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => error_code::CONFIG_FILE_NOT_FOUND,
            Self::Unreadable { .. } => error_code::CONFIG_UNREADABLE,
            Self::Malformed { .. } => error_code::CONFIG_MALFORMED,
            Self::MissingKey { .. } => error_code::CONFIG_MISSING_KEY,
            Self::TraceFileNotFound { .. } => error_code::CONFIG_TRACE_FILE_NOT_FOUND,
        }
    }
}
