//! Builds [`CodeClass`] values from source files plus trace metadata.
//!
//! The trace records raw method boundaries. Constructors appear under
//! a synthetic `<init>` signature whose start marker sits on the
//! declaration line, so their body starts one line later; methods with
//! no return value carry an end marker one line past the body. The
//! builder normalizes both before reading statements.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use faultline_core::errors::{ModelError, TraceError};

use crate::queries::identifier::identify_queries;
use crate::queries::rules::QueryRuleSet;
use crate::trace::store::TraceStore;

use super::types::{ClassKind, CodeClass, CodeMethod, Statement};

/// Builds model classes for one run, borrowing the trace store and the
/// query rule set.
pub struct ModelBuilder<'a> {
    trace: &'a TraceStore,
    rules: &'a QueryRuleSet,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(trace: &'a TraceStore, rules: &'a QueryRuleSet) -> Self {
        Self { trace, rules }
    }

    /// Builds a production class from its source file.
    pub fn build_production_class(&self, source_path: &Path) -> Result<CodeClass, ModelError> {
        self.build_class(source_path, ClassKind::Production)
    }

    /// Builds a test class from its source file. Constructor entries in
    /// the trace are ignored; only test methods matter here.
    pub fn build_test_class(&self, source_path: &Path) -> Result<CodeClass, ModelError> {
        self.build_class(source_path, ClassKind::Test)
    }

    fn build_class(&self, source_path: &Path, kind: ClassKind) -> Result<CodeClass, ModelError> {
        let class_name = class_name_of(source_path)?;
        let lines = read_source_lines(source_path)?;

        let signatures = match kind {
            ClassKind::Production => self.trace.production_method_signatures(&class_name),
            ClassKind::Test => self.trace.test_method_signatures(&class_name),
        };

        let mut methods = Vec::with_capacity(signatures.len());
        for signature in signatures {
            if kind == ClassKind::Test && TraceStore::is_constructor_signature(signature) {
                continue;
            }
            methods.push(self.build_method(&class_name, signature, source_path, &lines)?);
        }

        tracing::debug!(
            class = %class_name,
            methods = methods.len(),
            ?kind,
            "class model built"
        );
        Ok(CodeClass::new(
            class_name,
            source_path.to_path_buf(),
            kind,
            methods,
        ))
    }

    fn build_method(
        &self,
        class_name: &str,
        signature: &str,
        source_path: &Path,
        lines: &[String],
    ) -> Result<CodeMethod, ModelError> {
        let mut start_line = self.trace.method_start_line(signature)?;
        let mut end_line = self.trace.method_end_line(signature)?;

        // The start marker of a constructor sits on the declaration
        // line; the end marker of a void method sits one past the body.
        let name = if TraceStore::is_constructor_signature(signature) {
            start_line += 1;
            class_name.to_string()
        } else {
            bare_method_name(signature).to_string()
        };
        if TraceStore::is_void_signature(signature) {
            end_line = end_line.checked_sub(1).ok_or_else(|| {
                TraceError::Malformed {
                    path: self.trace.trace_file_path().to_path_buf(),
                    message: format!("void method {signature} with end line 0"),
                }
            })?;
        }

        let mut statements = BTreeMap::new();
        for line in start_line..=end_line {
            let index = (line as usize)
                .checked_sub(1)
                .filter(|&i| i < lines.len())
                .ok_or_else(|| ModelError::SourceRead {
                    path: source_path.to_path_buf(),
                    line,
                    message: "line past end of file".to_string(),
                })?;
            statements.insert(
                line,
                Statement {
                    class_name: class_name.to_string(),
                    method_name: name.clone(),
                    line,
                    text: lines[index].trim().to_string(),
                },
            );
        }

        let queries = identify_queries(class_name, &name, statements.values(), self.rules);

        Ok(CodeMethod::new(
            class_name.to_string(),
            name,
            signature.to_string(),
            start_line,
            end_line,
            statements,
            queries,
        ))
    }
}

/// Class name, taken from the source file name.
fn class_name_of(source_path: &Path) -> Result<String, ModelError> {
    source_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| ModelError::SourceFileNotFound {
            path: source_path.to_path_buf(),
        })
}

/// The signature up to its parameter list.
fn bare_method_name(signature: &str) -> &str {
    signature.split('(').next().unwrap_or(signature)
}

fn read_source_lines(path: &Path) -> Result<Vec<String>, ModelError> {
    if !path.is_file() {
        return Err(ModelError::SourceFileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| ModelError::SourceRead {
        path: path.to_path_buf(),
        line: 0,
        message: e.to_string(),
    })?;
    Ok(text.lines().map(str::to_string).collect())
}
