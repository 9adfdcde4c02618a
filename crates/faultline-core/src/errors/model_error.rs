//! Program-model errors: fatal source-read failures during
//! construction, and typed lookup misses afterwards.

use std::path::PathBuf;

use super::error_code::{self, FaultlineErrorCode};
use super::TraceError;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("No class named {name:?} in the loaded program")]
    ClassNotFound { name: String },

    #[error("No method named {name:?} in class {class:?}")]
    MethodNotFound { class: String, name: String },

    #[error("No method with signature {signature:?} in class {class:?}")]
    SignatureNotFound { class: String, signature: String },

    #[error("Line {line} lies outside method {method:?} ({start}..={end})")]
    StatementOutsideMethod {
        method: String,
        line: u32,
        start: u32,
        end: u32,
    },

    #[error("No statement at line {line} of {scope}")]
    StatementNotFound { scope: String, line: u32 },

    #[error("Line {line} is not the starting line of any query in method {method:?}")]
    QueryNotFoundAtLine { method: String, line: u32 },

    #[error("Source file not found: {path}")]
    SourceFileNotFound { path: PathBuf },

    #[error("Could not read source file {path} at line {line}: {message}")]
    SourceRead {
        path: PathBuf,
        line: u32,
        message: String,
    },

    #[error(transparent)]
    Trace(#[from] TraceError),
}

impl FaultlineErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ClassNotFound { .. } => error_code::MODEL_CLASS_NOT_FOUND,
            Self::MethodNotFound { .. } => error_code::MODEL_METHOD_NOT_FOUND,
            Self::SignatureNotFound { .. } => error_code::MODEL_SIGNATURE_NOT_FOUND,
            Self::StatementOutsideMethod { .. } => error_code::MODEL_STATEMENT_OUTSIDE_METHOD,
            Self::StatementNotFound { .. } => error_code::MODEL_STATEMENT_NOT_FOUND,
            Self::QueryNotFoundAtLine { .. } => error_code::MODEL_QUERY_NOT_FOUND_AT_LINE,
            Self::SourceFileNotFound { .. } => error_code::MODEL_SOURCE_FILE_NOT_FOUND,
            Self::SourceRead { .. } => error_code::MODEL_SOURCE_READ,
            Self::Trace(e) => e.error_code(),
        }
    }
}
