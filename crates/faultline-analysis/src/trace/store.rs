//! Point queries over one parsed trace document.
//!
//! Everything here is a read-only projection. Boundary values are
//! returned exactly as recorded; the constructor and void-method
//! adjustments belong to the model builder.

use std::path::{Path, PathBuf};

use faultline_core::constants::{CONSTRUCTOR_MARKER, VOID_SIGNATURE_SUFFIX};
use faultline_core::errors::TraceError;
use faultline_core::FxHashMap;

use super::document::{FileRecord, TraceDocument};

/// One executed-statement record: a line of a named class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedStatement {
    pub line: u32,
    pub class_name: String,
}

/// Read-only store over one trace document, with derived indexes for
/// the point queries the model builder and correlator need.
#[derive(Debug)]
pub struct TraceStore {
    path: PathBuf,
    document: TraceDocument,
    /// signature -> (start, end); first entry in document order wins.
    boundaries: FxHashMap<String, (u32, u32)>,
    /// statement id -> (line, owning file's class name).
    statement_table: FxHashMap<String, (u32, String)>,
    /// test name -> index into `document.test_cases`; first wins.
    test_index: FxHashMap<String, usize>,
}

impl TraceStore {
    /// Parses the trace document at `path` and builds the indexes.
    pub fn open(path: &Path) -> Result<Self, TraceError> {
        let document = TraceDocument::parse_file(path)?;
        tracing::info!(path = %path.display(), tests = document.test_cases.len(), "trace document loaded");
        Ok(Self::from_document(document, path))
    }

    /// Builds a store over an already-parsed document.
    pub fn from_document(document: TraceDocument, path: &Path) -> Self {
        let mut boundaries = FxHashMap::default();
        let mut statement_table = FxHashMap::default();
        for file in document
            .program_files
            .iter()
            .chain(document.test_files.iter())
        {
            index_file(file, &mut boundaries, &mut statement_table);
        }

        let mut test_index = FxHashMap::default();
        for (i, test_case) in document.test_cases.iter().enumerate() {
            test_index.entry(test_case.name.clone()).or_insert(i);
        }

        Self {
            path: path.to_path_buf(),
            document,
            boundaries,
            statement_table,
            test_index,
        }
    }

    pub fn trace_file_path(&self) -> &Path {
        &self.path
    }

    /// Start line recorded in the trace for `signature`.
    pub fn method_start_line(&self, signature: &str) -> Result<u32, TraceError> {
        self.boundaries
            .get(signature)
            .map(|&(start, _)| start)
            .ok_or_else(|| TraceError::BoundaryNotFound {
                signature: signature.to_string(),
            })
    }

    /// End line recorded in the trace for `signature`.
    pub fn method_end_line(&self, signature: &str) -> Result<u32, TraceError> {
        self.boundaries
            .get(signature)
            .map(|&(_, end)| end)
            .ok_or_else(|| TraceError::BoundaryNotFound {
                signature: signature.to_string(),
            })
    }

    /// Names of all executed tests, in document order.
    pub fn executed_tests(&self) -> Vec<&str> {
        self.document
            .test_cases
            .iter()
            .map(|tc| tc.name.as_str())
            .collect()
    }

    /// Whether the named test passed.
    pub fn test_passed(&self, name: &str) -> Result<bool, TraceError> {
        self.test_case(name).map(|tc| tc.passing)
    }

    /// Names of passing tests, in document order.
    pub fn passed_tests(&self) -> Vec<&str> {
        self.tests_with_outcome(true)
    }

    /// Names of failing tests, in document order.
    pub fn failed_tests(&self) -> Vec<&str> {
        self.tests_with_outcome(false)
    }

    /// The statements executed by the named test, in execution order,
    /// duplicates included. Ids with no entry in the statement table
    /// are skipped, matching the join the document encodes.
    pub fn executed_statements(&self, test: &str) -> Result<Vec<ExecutedStatement>, TraceError> {
        let test_case = self.test_case(test)?;
        Ok(test_case
            .statement_ids
            .iter()
            .filter_map(|id| self.statement_table.get(id))
            .map(|(line, class_name)| ExecutedStatement {
                line: *line,
                class_name: class_name.clone(),
            })
            .collect())
    }

    /// Method signatures the trace records for a production class.
    pub fn production_method_signatures(&self, class_name: &str) -> Vec<&str> {
        signatures_in(&self.document.program_files, class_name)
    }

    /// Method signatures the trace records for a test class.
    pub fn test_method_signatures(&self, class_name: &str) -> Vec<&str> {
        signatures_in(&self.document.test_files, class_name)
    }

    /// Whether a trace signature names a constructor.
    pub fn is_constructor_signature(signature: &str) -> bool {
        signature.starts_with(CONSTRUCTOR_MARKER)
    }

    /// Whether a trace signature names a method with no return value.
    pub fn is_void_signature(signature: &str) -> bool {
        signature.ends_with(VOID_SIGNATURE_SUFFIX)
    }

    fn test_case(&self, name: &str) -> Result<&super::document::TestCaseRecord, TraceError> {
        self.test_index
            .get(name)
            .map(|&i| &self.document.test_cases[i])
            .ok_or_else(|| TraceError::TestResultNotFound {
                test: name.to_string(),
            })
    }

    fn tests_with_outcome(&self, passing: bool) -> Vec<&str> {
        self.document
            .test_cases
            .iter()
            .filter(|tc| tc.passing == passing)
            .map(|tc| tc.name.as_str())
            .collect()
    }
}

fn index_file(
    file: &FileRecord,
    boundaries: &mut FxHashMap<String, (u32, u32)>,
    statement_table: &mut FxHashMap<String, (u32, String)>,
) {
    for class in &file.classes {
        for method in &class.methods {
            boundaries
                .entry(method.signature.clone())
                .or_insert((method.start_line, method.end_line));
        }
    }
    // The statement table is file-scoped; statements belong to the
    // file's (first) class.
    if let Some(class) = file.classes.first() {
        for statement in &file.statements {
            statement_table
                .entry(statement.id.clone())
                .or_insert((statement.line, class.name.clone()));
        }
    }
}

fn signatures_in<'a>(files: &'a [FileRecord], class_name: &str) -> Vec<&'a str> {
    files
        .iter()
        .flat_map(|file| file.classes.iter())
        .filter(|class| class.name == class_name)
        .flat_map(|class| class.methods.iter())
        .map(|method| method.signature.as_str())
        .collect()
}
