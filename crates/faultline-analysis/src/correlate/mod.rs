//! Correlation of the static model with the recorded execution.
//!
//! The trace names executed statements by class and line. The
//! correlator resolves those records against the model and projects
//! them onto queries. Records that do not resolve (an unknown class,
//! or a line outside every modeled method) are dropped without error,
//! mirroring the join the trace document itself encodes.

use faultline_core::errors::ModelError;
use faultline_core::FxHashSet;

use crate::model::program::Program;
use crate::model::types::{Query, Statement};

/// Joins one program model with its recorded test execution.
#[derive(Debug)]
pub struct TraceCorrelator<'a> {
    program: &'a Program,
}

impl<'a> TraceCorrelator<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self { program }
    }

    /// Model statements executed by the named test, in execution order
    /// with duplicates kept. Unresolvable records are dropped.
    pub fn executed_statements_of(&self, test: &str) -> Result<Vec<&'a Statement>, ModelError> {
        let records = self.program.trace().executed_statements(test)?;
        Ok(records
            .iter()
            .filter_map(|record| {
                let resolved = self.resolve_statement(&record.class_name, record.line);
                if resolved.is_none() {
                    tracing::trace!(
                        test,
                        class = %record.class_name,
                        line = record.line,
                        "dropping unresolvable trace record"
                    );
                }
                resolved
            })
            .collect())
    }

    /// Production queries executed by the named test, deduplicated in
    /// first-execution order.
    pub fn executed_queries_of(&self, test: &str) -> Result<Vec<&'a Query>, ModelError> {
        let records = self.program.trace().executed_statements(test)?;
        let mut seen: FxHashSet<&Query> = FxHashSet::default();
        let mut queries = Vec::new();
        for record in &records {
            if let Some(query) = self.resolve_query(&record.class_name, record.line) {
                if seen.insert(query) {
                    queries.push(query);
                }
            }
        }
        Ok(queries)
    }

    /// Queries executed by each failing test, in document order. These
    /// are the candidates worth ranking at all.
    pub fn candidate_queries(&self) -> Result<Vec<(String, Vec<&'a Query>)>, ModelError> {
        let failing: Vec<String> = self
            .program
            .trace()
            .failed_tests()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let mut candidates = Vec::with_capacity(failing.len());
        for test in failing {
            let queries = self.executed_queries_of(&test)?;
            candidates.push((test, queries));
        }
        Ok(candidates)
    }

    fn resolve_statement(&self, class_name: &str, line: u32) -> Option<&'a Statement> {
        let class = self
            .program
            .class_by_name(class_name)
            .or_else(|_| self.program.test_class_by_name(class_name))
            .ok()?;
        class.statement_by_line(line).ok()
    }

    /// Resolves an executed record to the production query owning its
    /// line, if any.
    fn resolve_query(&self, class_name: &str, line: u32) -> Option<&'a Query> {
        let class = self.program.class_by_name(class_name).ok()?;
        class
            .methods()
            .iter()
            .find(|method| method.contains_line(line))
            .and_then(|method| method.query_owning_line(line))
    }
}
