//! Tarantula scoring over the identified queries.
//!
//! Each query is scored from the proportion of failing versus passing
//! tests that executed it. A query never reached by a failing test is
//! not suspicious no matter what its ratio says.

use faultline_core::errors::ModelError;
use faultline_core::FxHashMap;

use crate::model::program::Program;
use crate::model::types::Query;

/// One scored query.
#[derive(Debug, Clone)]
pub struct QuerySuspiciousness {
    pub query: Query,
    pub score: f64,
    pub passed_executions: usize,
    pub failed_executions: usize,
}

/// Scores and ranks the queries of one program against its recorded
/// test execution.
#[derive(Debug)]
pub struct SuspiciousnessEngine<'a> {
    program: &'a Program,
}

impl<'a> SuspiciousnessEngine<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self { program }
    }

    /// Scores every identified query, most suspicious first. Ties are
    /// broken ascending by class, method, and starting line.
    pub fn rank(&self) -> Result<Vec<QuerySuspiciousness>, ModelError> {
        let correlator = self.program.correlator();
        let trace = self.program.trace();

        let passed_tests = trace.passed_tests();
        let failed_tests = trace.failed_tests();

        // query -> (passing executions, failing executions)
        let mut counts: FxHashMap<&Query, (usize, usize)> = FxHashMap::default();
        for test in &passed_tests {
            for query in correlator.executed_queries_of(test)? {
                counts.entry(query).or_default().0 += 1;
            }
        }
        for test in &failed_tests {
            for query in correlator.executed_queries_of(test)? {
                counts.entry(query).or_default().1 += 1;
            }
        }

        let mut ranked: Vec<QuerySuspiciousness> = self
            .program
            .all_queries()
            .map(|query| {
                let (passed_executions, failed_executions) =
                    counts.get(query).copied().unwrap_or((0, 0));
                QuerySuspiciousness {
                    query: query.clone(),
                    score: tarantula_score(
                        failed_executions,
                        failed_tests.len(),
                        passed_executions,
                        passed_tests.len(),
                    ),
                    passed_executions,
                    failed_executions,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score.total_cmp(&a.score).then_with(|| {
                let ka = (&a.query.class_name, &a.query.method_name, a.query.starting_line());
                let kb = (&b.query.class_name, &b.query.method_name, b.query.starting_line());
                ka.cmp(&kb)
            })
        });
        Ok(ranked)
    }

    /// Ranked queries at or above `threshold` that at least one failing
    /// test executed.
    pub fn suspicious_queries(
        &self,
        threshold: f64,
    ) -> Result<Vec<QuerySuspiciousness>, ModelError> {
        let mut ranked = self.rank()?;
        ranked.retain(|entry| entry.score >= threshold && entry.failed_executions > 0);
        tracing::debug!(
            program = self.program.name(),
            threshold,
            suspicious = ranked.len(),
            "suspicious queries selected"
        );
        Ok(ranked)
    }
}

/// The Tarantula suspiciousness formula. Each ratio is zero when its
/// test population is empty; a query executed by no test scores zero.
pub fn tarantula_score(
    failed_executions: usize,
    total_failed: usize,
    passed_executions: usize,
    total_passed: usize,
) -> f64 {
    let fail_ratio = ratio(failed_executions, total_failed);
    let pass_ratio = ratio(passed_executions, total_passed);
    if fail_ratio + pass_ratio == 0.0 {
        return 0.0;
    }
    fail_ratio / (fail_ratio + pass_ratio)
}

fn ratio(executions: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        executions as f64 / total as f64
    }
}
