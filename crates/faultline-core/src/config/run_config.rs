//! Configuration for one diagnostic run.
//!
//! A TOML file names the recorded trace document and the subject's
//! production and test source files. Validation is strict and happens
//! up front: a run either starts with a complete configuration or not
//! at all.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::SOURCE_FILE_SUFFIX;
use crate::errors::ConfigError;

/// Configuration for one diagnostic run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Path to the recorded trace document.
    pub trace_file: PathBuf,
    /// Production source files of the subject program.
    #[serde(default)]
    pub source_files: Vec<PathBuf>,
    /// Test source files of the subject program.
    #[serde(default)]
    pub test_source_files: Vec<PathBuf>,
    /// Overrides the default suspiciousness threshold when set.
    pub suspiciousness_threshold: Option<f64>,
}

/// Mirror of [`RunConfig`] with every field optional, so a missing
/// required key surfaces as `ConfigError::MissingKey` rather than an
/// opaque deserialization message.
#[derive(Debug, Deserialize)]
struct RawConfig {
    trace_file: Option<PathBuf>,
    #[serde(default)]
    source_files: Vec<PathBuf>,
    #[serde(default)]
    test_source_files: Vec<PathBuf>,
    suspiciousness_threshold: Option<f64>,
}

impl RunConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::FileNotFound { path: path.to_path_buf() });
            }
            Err(e) => {
                return Err(ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        };

        let raw: RawConfig = toml::from_str(&text).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let trace_file = raw
            .trace_file
            .ok_or(ConfigError::MissingKey { key: "trace_file" })?;
        if !trace_file.is_file() {
            return Err(ConfigError::TraceFileNotFound { path: trace_file });
        }

        Ok(Self {
            trace_file,
            source_files: raw.source_files,
            test_source_files: raw.test_source_files,
            suspiciousness_threshold: raw.suspiciousness_threshold,
        })
    }

    /// Production source paths that pass the acceptance filter.
    pub fn accepted_source_files(&self) -> Vec<PathBuf> {
        accept_source_paths(&self.source_files)
    }

    /// Test source paths that pass the acceptance filter.
    pub fn accepted_test_source_files(&self) -> Vec<PathBuf> {
        accept_source_paths(&self.test_source_files)
    }
}

/// Keeps only paths with the recognized source suffix that point at
/// existing regular files. Everything else is skipped without error.
fn accept_source_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|path| {
            let accepted = path
                .to_str()
                .is_some_and(|p| p.ends_with(SOURCE_FILE_SUFFIX))
                && path.is_file();
            if !accepted {
                tracing::debug!(path = %path.display(), "skipping unaccepted source path");
            }
            accepted
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_complete_config() {
        let dir = tempfile::tempdir().unwrap();
        let trace = write_file(dir.path(), "trace.xml", "<trace/>");
        let config_path = write_file(
            dir.path(),
            "run.toml",
            &format!(
                "trace_file = {:?}\nsource_files = [\"a.java\"]\ntest_source_files = []\n",
                trace
            ),
        );

        let config = RunConfig::load(&config_path).unwrap();
        assert_eq!(config.trace_file, trace);
        assert_eq!(config.source_files, vec![PathBuf::from("a.java")]);
        assert!(config.suspiciousness_threshold.is_none());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = RunConfig::load(Path::new("/nonexistent/run.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn invalid_toml_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_file(dir.path(), "run.toml", "not = [valid");
        let err = RunConfig::load(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn missing_trace_key_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_file(dir.path(), "run.toml", "source_files = []\n");
        let err = RunConfig::load(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "trace_file" }));
    }

    #[test]
    fn nonexistent_trace_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_file(
            dir.path(),
            "run.toml",
            "trace_file = \"/nonexistent/trace.xml\"\n",
        );
        let err = RunConfig::load(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::TraceFileNotFound { .. }));
    }

    #[test]
    fn filter_skips_wrong_suffix_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(dir.path(), "Game.java", "class Game {}");
        let wrong_suffix = write_file(dir.path(), "notes.txt", "notes");
        let trace = write_file(dir.path(), "trace.xml", "<trace/>");

        let config = RunConfig {
            trace_file: trace,
            source_files: vec![
                good.clone(),
                wrong_suffix,
                dir.path().join("Missing.java"),
            ],
            test_source_files: vec![],
            suspiciousness_threshold: None,
        };

        assert_eq!(config.accepted_source_files(), vec![good]);
    }
}
