//! Shared constants for the diagnostic run.

/// Suffix of accepted subject source files. Paths without it are
/// silently skipped during configuration.
pub const SOURCE_FILE_SUFFIX: &str = ".java";

/// Synthetic constructor name used by the trace document. Model
/// building renames it to the owning class's name.
pub const CONSTRUCTOR_MARKER: &str = "<init>";

/// Signature suffix of methods with no return value. The trace records
/// a trailing synthetic instruction for these, excluded from the model.
pub const VOID_SIGNATURE_SUFFIX: &str = ")V";

/// Threshold used by `suspicious_queries()` when none is supplied.
/// Midpoint of the Tarantula score range.
pub const DEFAULT_SUSPICIOUSNESS_THRESHOLD: f64 = 0.5;
