//! Test runner and aggregator.
//!
//! [`run_all`] invokes every validator one after another through an
//! [`Invoker`], turns each invocation into a [`TestRecord`], and assembles the
//! [`Report`]. Nothing runs concurrently, and one validator failing to start
//! never stops the others.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use extcheck::{config::Config, runner};
//!
//! let config = Config::default();
//! let invoker = runner::ProcessInvoker::current_exe(None).unwrap();
//! let report = runner::run_all(Path::new("./dist"), &config, &invoker);
//! std::process::exit(if report.passed() { 0 } else { 1 });
//! ```

use crate::checks::{self, Validator};
use crate::config::Config;
use crate::error::Result;
use crate::finding::{parse_glyph_lines, CheckResult, Outcome, ValidationRun};
use crate::output;
use crate::report::{Report, Status, TestRecord};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// What came back from running one validator.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
}

/// Runs a validator somewhere and captures its output.
pub trait Invoker {
    /// Human-readable command line for `validator` on `dir`.
    fn command_line(&self, validator: &dyn Validator, dir: &Path) -> String;

    /// Runs `validator` on `dir` and waits for it to finish.
    fn invoke(&self, validator: &dyn Validator, dir: &Path) -> std::io::Result<Invocation>;
}

/// Spawns `<program> <validator> <dir> --format json` as a child process.
pub struct ProcessInvoker {
    program: PathBuf,
    config: Option<PathBuf>,
}

impl ProcessInvoker {
    pub fn new(program: impl Into<PathBuf>, config: Option<PathBuf>) -> Self {
        ProcessInvoker {
            program: program.into(),
            config,
        }
    }

    /// Invokes validators through the currently running executable.
    pub fn current_exe(config: Option<PathBuf>) -> Result<Self> {
        Ok(Self::new(std::env::current_exe()?, config))
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

impl Invoker for ProcessInvoker {
    fn command_line(&self, validator: &dyn Validator, dir: &Path) -> String {
        let mut line = format!(
            "{} {} {} --format json",
            self.program_name(),
            validator.name(),
            dir.display()
        );
        if let Some(ref config) = self.config {
            line.push_str(&format!(" --config {}", config.display()));
        }
        line
    }

    fn invoke(&self, validator: &dyn Validator, dir: &Path) -> std::io::Result<Invocation> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(validator.name())
            .arg(dir)
            .args(["--format", "json"])
            .stdin(Stdio::null());
        if let Some(ref config) = self.config {
            cmd.arg("--config").arg(config);
        }

        let output = cmd.output()?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!(validator = validator.name(), stderr = %stderr.trim(), "validator stderr");
        }

        Ok(Invocation {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Runs validators inside the current process.
///
/// Produces the same JSON document and exit status a spawned validator would.
pub struct InProcessInvoker<'a> {
    config: &'a Config,
}

impl<'a> InProcessInvoker<'a> {
    pub fn new(config: &'a Config) -> Self {
        InProcessInvoker { config }
    }
}

impl Invoker for InProcessInvoker<'_> {
    fn command_line(&self, validator: &dyn Validator, dir: &Path) -> String {
        format!("extcheck {} {} (in-process)", validator.name(), dir.display())
    }

    fn invoke(&self, validator: &dyn Validator, dir: &Path) -> std::io::Result<Invocation> {
        let run = validator.validate(dir, self.config);
        let stdout = output::json::format_run(&run).map_err(std::io::Error::other)?;
        Ok(Invocation {
            exit_code: Some(if run.ok() { 0 } else { 1 }),
            stdout,
        })
    }
}

/// Recovers a validator's results from its captured output.
///
/// The structured JSON document is preferred. Anything else is scored line by
/// line on leading glyphs.
pub fn parse_output(validator: &dyn Validator, dir: &Path, stdout: &str) -> ValidationRun {
    match serde_json::from_str::<ValidationRun>(stdout) {
        Ok(run) => run,
        Err(e) => {
            tracing::debug!(
                validator = validator.name(),
                error = %e,
                "output is not a run document, falling back to glyph parsing"
            );
            let mut run = ValidationRun::new(validator.name(), validator.subject(), dir);
            run.results = parse_glyph_lines(validator.name(), stdout);
            run
        }
    }
}

/// Turns one invocation into a [`TestRecord`].
///
/// The status follows the exit code alone. A non-zero exit that left no issue
/// behind gets a synthetic one naming the exit status.
pub fn record_invocation(
    validator: &dyn Validator,
    dir: &Path,
    command: &str,
    invocation: Invocation,
) -> TestRecord {
    let mut run = parse_output(validator, dir, &invocation.stdout);
    let status = if invocation.exit_code == Some(0) {
        Status::Pass
    } else {
        Status::Fail
    };

    if status == Status::Fail && run.ok() {
        let why = match invocation.exit_code {
            Some(code) => format!("Validator exited with status {code}"),
            None => "Validator was terminated by a signal".to_string(),
        };
        run.push(CheckResult::new(
            &format!("{}/exit-status", validator.name()),
            Outcome::Issue,
            why,
        ));
    }

    TestRecord::from_run(validator.title(), command, status, &run, invocation.stdout)
}

fn run_one(validator: &dyn Validator, dir: &Path, invoker: &dyn Invoker) -> TestRecord {
    let command = invoker.command_line(validator, dir);
    tracing::info!(validator = validator.name(), %command, "running {}", validator.title());

    match invoker.invoke(validator, dir) {
        Ok(invocation) => {
            let record = record_invocation(validator, dir, &command, invocation);
            tracing::info!(
                validator = validator.name(),
                status = %record.status,
                passed = record.passed.len(),
                warnings = record.warnings.len(),
                issues = record.issues.len(),
                "finished"
            );
            record
        }
        Err(e) => {
            tracing::warn!(validator = validator.name(), error = %e, "failed to run validator");
            TestRecord::failed_to_run(validator.title(), validator.name(), &command, &e.to_string())
        }
    }
}

/// Runs structure, UI, content, and background validation in that order and
/// builds the report.
pub fn run_all(dir: &Path, config: &Config, invoker: &dyn Invoker) -> Report {
    let records = checks::all_validators()
        .iter()
        .map(|v| run_one(v.as_ref(), dir, invoker))
        .collect();

    Report::new(&config.report.extension_name, dir, records)
}
