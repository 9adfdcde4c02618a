//! Stable string codes for every error in the taxonomy.

/// Maps an error to a stable machine-readable code, independent of the
/// display message.
pub trait FaultlineErrorCode {
    fn error_code(&self) -> &'static str;
}

// Configuration
pub const CONFIG_FILE_NOT_FOUND: &str = "CONFIG_FILE_NOT_FOUND";
pub const CONFIG_UNREADABLE: &str = "CONFIG_UNREADABLE";
pub const CONFIG_MALFORMED: &str = "CONFIG_MALFORMED";
pub const CONFIG_MISSING_KEY: &str = "CONFIG_MISSING_KEY";
pub const CONFIG_TRACE_FILE_NOT_FOUND: &str = "CONFIG_TRACE_FILE_NOT_FOUND";

// Trace document
pub const TRACE_DOCUMENT_UNREADABLE: &str = "TRACE_DOCUMENT_UNREADABLE";
pub const TRACE_MALFORMED: &str = "TRACE_MALFORMED";
pub const TRACE_BOUNDARY_NOT_FOUND: &str = "TRACE_BOUNDARY_NOT_FOUND";
pub const TRACE_TEST_RESULT_NOT_FOUND: &str = "TRACE_TEST_RESULT_NOT_FOUND";

// Program model
pub const MODEL_CLASS_NOT_FOUND: &str = "MODEL_CLASS_NOT_FOUND";
pub const MODEL_METHOD_NOT_FOUND: &str = "MODEL_METHOD_NOT_FOUND";
pub const MODEL_SIGNATURE_NOT_FOUND: &str = "MODEL_SIGNATURE_NOT_FOUND";
pub const MODEL_STATEMENT_OUTSIDE_METHOD: &str = "MODEL_STATEMENT_OUTSIDE_METHOD";
pub const MODEL_STATEMENT_NOT_FOUND: &str = "MODEL_STATEMENT_NOT_FOUND";
pub const MODEL_QUERY_NOT_FOUND_AT_LINE: &str = "MODEL_QUERY_NOT_FOUND_AT_LINE";
pub const MODEL_SOURCE_FILE_NOT_FOUND: &str = "MODEL_SOURCE_FILE_NOT_FOUND";
pub const MODEL_SOURCE_READ: &str = "MODEL_SOURCE_READ";
