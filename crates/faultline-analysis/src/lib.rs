//! # faultline-analysis
//!
//! Analysis engine for the Faultline query-fault localizer.
//! Builds the program model from source files and trace metadata,
//! identifies query statements, correlates the model with one recorded
//! test execution, and ranks queries by Tarantula suspiciousness.

pub mod correlate;
pub mod model;
pub mod queries;
pub mod suspicion;
pub mod trace;

pub use correlate::TraceCorrelator;
pub use model::program::Program;
pub use model::types::{ClassKind, CodeClass, CodeMethod, Query, Statement};
pub use queries::rules::{QueryRule, QueryRuleKind, QueryRuleSet};
pub use suspicion::engine::{QuerySuspiciousness, SuspiciousnessEngine};
pub use trace::store::{ExecutedStatement, TraceStore};
