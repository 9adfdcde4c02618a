//! The loaded subject program: configuration, trace, and class models
//! for one diagnostic run.

use std::path::Path;

use faultline_core::config::RunConfig;
use faultline_core::constants::DEFAULT_SUSPICIOUSNESS_THRESHOLD;
use faultline_core::errors::{FaultlineError, ModelError};

use crate::correlate::TraceCorrelator;
use crate::queries::rules::QueryRuleSet;
use crate::suspicion::engine::{QuerySuspiciousness, SuspiciousnessEngine};
use crate::suspicion::report;
use crate::trace::store::TraceStore;

use super::builder::ModelBuilder;
use super::types::{CodeClass, CodeMethod, Query};

/// One loaded subject program.
#[derive(Debug)]
pub struct Program {
    name: String,
    config: RunConfig,
    trace: TraceStore,
    production_classes: Vec<CodeClass>,
    test_classes: Vec<CodeClass>,
}

impl Program {
    /// Loads a program from a configuration file: parses the trace,
    /// then builds a model class per accepted source file.
    pub fn load(name: &str, config_path: &Path) -> Result<Self, FaultlineError> {
        let config = RunConfig::load(config_path)?;
        Self::from_config(name, config)
    }

    /// Loads a program from an already-validated configuration.
    pub fn from_config(name: &str, config: RunConfig) -> Result<Self, FaultlineError> {
        let trace = TraceStore::open(&config.trace_file).map_err(ModelError::from)?;
        let rules = QueryRuleSet::default();
        let builder = ModelBuilder::new(&trace, &rules);

        let mut production_classes = Vec::new();
        for path in config.accepted_source_files() {
            production_classes.push(builder.build_production_class(&path)?);
        }
        let mut test_classes = Vec::new();
        for path in config.accepted_test_source_files() {
            test_classes.push(builder.build_test_class(&path)?);
        }

        tracing::info!(
            program = name,
            production_classes = production_classes.len(),
            test_classes = test_classes.len(),
            "program model loaded"
        );
        Ok(Self {
            name: name.to_string(),
            config,
            trace,
            production_classes,
            test_classes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn trace(&self) -> &TraceStore {
        &self.trace
    }

    /// Production classes, in configuration order.
    pub fn classes(&self) -> &[CodeClass] {
        &self.production_classes
    }

    /// Test classes, in configuration order.
    pub fn test_classes(&self) -> &[CodeClass] {
        &self.test_classes
    }

    pub fn class_by_name(&self, name: &str) -> Result<&CodeClass, ModelError> {
        find_class(&self.production_classes, name)
    }

    pub fn test_class_by_name(&self, name: &str) -> Result<&CodeClass, ModelError> {
        find_class(&self.test_classes, name)
    }

    /// Every production method, in class then trace order.
    pub fn all_methods(&self) -> impl Iterator<Item = &CodeMethod> {
        self.production_classes
            .iter()
            .flat_map(|class| class.methods().iter())
    }

    /// Every identified query of the production code, in class, method,
    /// then line order.
    pub fn all_queries(&self) -> impl Iterator<Item = &Query> {
        self.all_methods().flat_map(|method| method.queries().iter())
    }

    /// Finds a test method by bare name across the test classes.
    pub fn test_method_by_name(&self, name: &str) -> Result<&CodeMethod, ModelError> {
        self.test_classes
            .iter()
            .flat_map(|class| class.methods().iter())
            .find(|method| method.name == name)
            .ok_or_else(|| ModelError::MethodNotFound {
                class: "test suite".to_string(),
                name: name.to_string(),
            })
    }

    /// The correlator joining this model with the recorded execution.
    pub fn correlator(&self) -> TraceCorrelator<'_> {
        TraceCorrelator::new(self)
    }

    /// The suspiciousness threshold for this run.
    pub fn suspiciousness_threshold(&self) -> f64 {
        self.config
            .suspiciousness_threshold
            .unwrap_or(DEFAULT_SUSPICIOUSNESS_THRESHOLD)
    }

    /// Queries at or above the run's threshold, most suspicious first.
    pub fn suspicious_queries(&self) -> Result<Vec<QuerySuspiciousness>, ModelError> {
        self.suspicious_queries_with_threshold(self.suspiciousness_threshold())
    }

    /// Queries at or above `threshold`, most suspicious first.
    pub fn suspicious_queries_with_threshold(
        &self,
        threshold: f64,
    ) -> Result<Vec<QuerySuspiciousness>, ModelError> {
        SuspiciousnessEngine::new(self).suspicious_queries(threshold)
    }

    /// Renders the plain-text diagnostic letter for this run.
    pub fn diagnostic_report(&self) -> Result<String, ModelError> {
        let suspicious = self.suspicious_queries()?;
        Ok(report::render(&self.name, &suspicious))
    }
}

fn find_class<'a>(classes: &'a [CodeClass], name: &str) -> Result<&'a CodeClass, ModelError> {
    classes
        .iter()
        .find(|class| class.name == name)
        .ok_or_else(|| ModelError::ClassNotFound {
            name: name.to_string(),
        })
}
