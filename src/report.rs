//! Aggregated report types.
//!
//! A [`Report`] is built once per `run-all` from one [`TestRecord`] per
//! validator and written to a Markdown and a JSON file, both overwritten.

use crate::error::{Error, Result};
use crate::finding::{Outcome, ValidationRun};
use crate::output;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "PASS"),
            Status::Fail => write!(f, "FAIL"),
        }
    }
}

/// One validator invocation as seen by the aggregator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TestRecord {
    pub name: String,
    pub validator: String,
    /// Command line used to invoke the validator.
    pub command: String,
    /// `Pass` iff the validator exited with status 0.
    pub status: Status,
    pub passed: Vec<String>,
    pub warnings: Vec<String>,
    pub issues: Vec<String>,
    /// Captured standard output, verbatim.
    pub output: String,
}

impl TestRecord {
    pub fn from_run(
        name: &str,
        command: &str,
        status: Status,
        run: &ValidationRun,
        output: String,
    ) -> Self {
        let messages = |outcome| {
            run.with_outcome(outcome)
                .map(|r| r.message.clone())
                .collect::<Vec<_>>()
        };
        TestRecord {
            name: name.to_string(),
            validator: run.validator.clone(),
            command: command.to_string(),
            status,
            passed: messages(Outcome::Passed),
            warnings: messages(Outcome::Warning),
            issues: messages(Outcome::Issue),
            output,
        }
    }

    /// Record for a validator that could not be started at all.
    pub fn failed_to_run(name: &str, validator: &str, command: &str, error: &str) -> Self {
        TestRecord {
            name: name.to_string(),
            validator: validator.to_string(),
            command: command.to_string(),
            status: Status::Fail,
            passed: vec![],
            warnings: vec![],
            issues: vec![format!("Failed to run test: {error}")],
            output: format!("Error running test: {error}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Summary {
    pub total_tests: usize,
    pub passed_tests: usize,
    pub warnings: usize,
    pub issues: usize,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub extension_name: String,
    pub extension_dir: PathBuf,
    pub tests: Vec<TestRecord>,
    pub summary: Summary,
    pub overall_status: Status,
}

impl Report {
    /// Builds a report stamped with the current time.
    pub fn new(extension_name: &str, extension_dir: &Path, tests: Vec<TestRecord>) -> Self {
        Self::with_timestamp(extension_name, extension_dir, tests, Utc::now())
    }

    pub fn with_timestamp(
        extension_name: &str,
        extension_dir: &Path,
        tests: Vec<TestRecord>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let summary = tests.iter().fold(Summary::default(), |mut s, t| {
            s.total_tests += 1;
            if t.status == Status::Pass {
                s.passed_tests += 1;
            }
            s.warnings += t.warnings.len();
            s.issues += t.issues.len();
            s
        });
        let overall_status = if tests.iter().all(|t| t.status == Status::Pass) {
            Status::Pass
        } else {
            Status::Fail
        };

        Report {
            timestamp,
            extension_name: extension_name.to_string(),
            extension_dir: extension_dir.to_path_buf(),
            tests,
            summary,
            overall_status,
        }
    }

    pub fn passed(&self) -> bool {
        self.overall_status == Status::Pass
    }

    /// Renders both artifacts and writes them, replacing existing files.
    pub fn write(&self, markdown_path: &Path, json_path: &Path) -> Result<()> {
        let markdown = output::markdown::format(self);
        let json = output::json::format_report(self)?;
        write_file(markdown_path, &markdown)?;
        write_file(json_path, &json)?;
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote report");
    Ok(())
}
