//! Trace-document errors.
//!
//! Document-level failures are fatal and carry the offending path.
//! Point-query misses are typed "not found" values for the caller.

use std::path::PathBuf;

use super::error_code::{self, FaultlineErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("Could not read trace document {path}: {message}")]
    DocumentUnreadable { path: PathBuf, message: String },

    #[error("Malformed trace document {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("No line boundary in trace for method signature {signature:?}")]
    BoundaryNotFound { signature: String },

    #[error("No result in trace for test {test:?}")]
    TestResultNotFound { test: String },
}

impl FaultlineErrorCode for TraceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DocumentUnreadable { .. } => error_code::TRACE_DOCUMENT_UNREADABLE,
            Self::Malformed { .. } => error_code::TRACE_MALFORMED,
            Self::BoundaryNotFound { .. } => error_code::TRACE_BOUNDARY_NOT_FOUND,
            Self::TestResultNotFound { .. } => error_code::TRACE_TEST_RESULT_NOT_FOUND,
        }
    }
}
