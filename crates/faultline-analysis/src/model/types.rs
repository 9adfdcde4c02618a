//! Model types for one loaded subject program.
//!
//! Statements and queries have identity by value — (class, method,
//! line) — so values fetched through different lookups compare equal
//! when they denote the same source location.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use smallvec::SmallVec;

use faultline_core::errors::ModelError;

/// Provenance of a class: subject code or its test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Production,
    Test,
}

/// One class of the subject program, named after its source file.
#[derive(Debug)]
pub struct CodeClass {
    pub name: String,
    pub source_path: PathBuf,
    pub kind: ClassKind,
    methods: Vec<CodeMethod>,
}

impl CodeClass {
    pub(crate) fn new(
        name: String,
        source_path: PathBuf,
        kind: ClassKind,
        methods: Vec<CodeMethod>,
    ) -> Self {
        Self {
            name,
            source_path,
            kind,
            methods,
        }
    }

    /// Methods in trace order.
    pub fn methods(&self) -> &[CodeMethod] {
        &self.methods
    }

    pub fn method_by_name(&self, name: &str) -> Result<&CodeMethod, ModelError> {
        self.methods
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| ModelError::MethodNotFound {
                class: self.name.clone(),
                name: name.to_string(),
            })
    }

    pub fn method_by_signature(&self, signature: &str) -> Result<&CodeMethod, ModelError> {
        self.methods
            .iter()
            .find(|m| m.signature == signature)
            .ok_or_else(|| ModelError::SignatureNotFound {
                class: self.name.clone(),
                signature: signature.to_string(),
            })
    }

    /// Resolves a line to the statement of the first method whose
    /// range contains it.
    pub fn statement_by_line(&self, line: u32) -> Result<&Statement, ModelError> {
        for method in &self.methods {
            if method.contains_line(line) {
                return method.statement_by_line(line);
            }
        }
        Err(ModelError::StatementNotFound {
            scope: format!("class {}", self.name),
            line,
        })
    }
}

/// One method of a class, with its line range, its statements, and the
/// queries identified inside it.
#[derive(Debug)]
pub struct CodeMethod {
    pub class_name: String,
    /// Display name; constructors carry the class name, not the
    /// synthetic trace marker.
    pub name: String,
    pub signature: String,
    /// First line of the method body, 1-based, inclusive.
    pub start_line: u32,
    /// Last line of the method body, inclusive.
    pub end_line: u32,
    statements: BTreeMap<u32, Statement>,
    queries: Vec<Query>,
}

impl CodeMethod {
    pub(crate) fn new(
        class_name: String,
        name: String,
        signature: String,
        start_line: u32,
        end_line: u32,
        statements: BTreeMap<u32, Statement>,
        queries: Vec<Query>,
    ) -> Self {
        Self {
            class_name,
            name,
            signature,
            start_line,
            end_line,
            statements,
            queries,
        }
    }

    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    /// Ordered line -> statement view of the method body.
    pub fn statements(&self) -> &BTreeMap<u32, Statement> {
        &self.statements
    }

    pub fn statement_by_line(&self, line: u32) -> Result<&Statement, ModelError> {
        if !self.contains_line(line) {
            return Err(ModelError::StatementOutsideMethod {
                method: self.name.clone(),
                line,
                start: self.start_line,
                end: self.end_line,
            });
        }
        self.statements
            .get(&line)
            .ok_or_else(|| ModelError::StatementNotFound {
                scope: format!("method {}", self.name),
                line,
            })
    }

    /// Queries identified in this method, ascending by starting line.
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// The query whose *first* statement is at `line`. Interior lines
    /// of a multi-statement query do not resolve.
    pub fn query_by_starting_line(&self, line: u32) -> Result<&Query, ModelError> {
        self.queries
            .iter()
            .find(|q| q.starting_line() == line)
            .ok_or_else(|| ModelError::QueryNotFoundAtLine {
                method: self.name.clone(),
                line,
            })
    }

    /// The query owning a statement at `line`, at any position within
    /// the query.
    pub fn query_owning_line(&self, line: u32) -> Option<&Query> {
        self.queries
            .iter()
            .find(|q| q.statements().iter().any(|s| s.line == line))
    }
}

/// One source statement: a single line of a method, trimmed.
#[derive(Debug, Clone)]
pub struct Statement {
    pub class_name: String,
    pub method_name: String,
    pub line: u32,
    pub text: String,
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
            && self.method_name == other.method_name
            && self.line == other.line
    }
}

impl Eq for Statement {}

impl Hash for Statement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_name.hash(state);
        self.method_name.hash(state);
        self.line.hash(state);
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}() line {}",
            self.class_name, self.method_name, self.line
        )
    }
}

/// One logical database query: one or more statements of a single
/// method, ascending by line. Identity is (class, method, first line).
#[derive(Debug, Clone)]
pub struct Query {
    pub class_name: String,
    pub method_name: String,
    statements: SmallVec<[Statement; 2]>,
}

impl Query {
    pub(crate) fn new(
        class_name: String,
        method_name: String,
        statements: SmallVec<[Statement; 2]>,
    ) -> Self {
        debug_assert!(!statements.is_empty());
        Self {
            class_name,
            method_name,
            statements,
        }
    }

    /// Member statements in ascending line order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Line of the first member statement, the query's lookup key.
    pub fn starting_line(&self) -> u32 {
        self.statements.first().map_or(0, |s| s.line)
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
            && self.method_name == other.method_name
            && self.starting_line() == other.starting_line()
    }
}

impl Eq for Query {}

impl Hash for Query {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_name.hash(state);
        self.method_name.hash(state);
        self.starting_line().hash(state);
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}() query at line {}",
            self.class_name,
            self.method_name,
            self.starting_line()
        )
    }
}
