use std::cell::RefCell;
use std::path::Path;

use extcheck::checks::{content, Validator};
use extcheck::config::Config;
use extcheck::report::Status;
use extcheck::runner::{self, InProcessInvoker, Invocation, Invoker};

/// Hands back canned invocations keyed by validator name and remembers the
/// order it was called in.
struct FakeInvoker {
    calls: RefCell<Vec<String>>,
    respond: fn(&str) -> std::io::Result<Invocation>,
}

impl FakeInvoker {
    fn new(respond: fn(&str) -> std::io::Result<Invocation>) -> Self {
        FakeInvoker {
            calls: RefCell::new(Vec::new()),
            respond,
        }
    }
}

impl Invoker for FakeInvoker {
    fn command_line(&self, validator: &dyn Validator, _dir: &Path) -> String {
        format!("fake {}", validator.name())
    }

    fn invoke(&self, validator: &dyn Validator, _dir: &Path) -> std::io::Result<Invocation> {
        self.calls.borrow_mut().push(validator.name().to_string());
        (self.respond)(validator.name())
    }
}

fn ok_text(_: &str) -> std::io::Result<Invocation> {
    Ok(Invocation {
        exit_code: Some(0),
        stdout: "header\n  ✅ fine\n  ⚠️ hmm\n".to_string(),
    })
}

#[test]
fn validators_run_in_fixed_order() {
    let invoker = FakeInvoker::new(ok_text);
    let report = runner::run_all(Path::new("/ext"), &Config::default(), &invoker);

    assert_eq!(
        *invoker.calls.borrow(),
        ["structure", "ui", "content", "background"]
    );
    let names: Vec<_> = report.tests.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Manifest and Structure Validation",
            "UI Component Validation",
            "Content Script Validation",
            "Background Script Validation",
        ]
    );
}

#[test]
fn plain_text_output_is_scored_by_glyph() {
    let invoker = FakeInvoker::new(ok_text);
    let report = runner::run_all(Path::new("/ext"), &Config::default(), &invoker);

    let first = &report.tests[0];
    assert_eq!(first.passed, ["fine"]);
    assert_eq!(first.warnings, ["hmm"]);
    assert!(first.issues.is_empty());
    assert_eq!(first.output, "header\n  ✅ fine\n  ⚠️ hmm\n");
    assert_eq!(first.command, "fake structure");
    assert_eq!(report.overall_status, Status::Pass);
    assert_eq!(report.summary.warnings, 4);
}

#[test]
fn spawn_failure_is_isolated_to_one_record() {
    fn respond(name: &str) -> std::io::Result<Invocation> {
        if name == "ui" {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"))
        } else {
            ok_text(name)
        }
    }
    let invoker = FakeInvoker::new(respond);
    let report = runner::run_all(Path::new("/ext"), &Config::default(), &invoker);

    assert_eq!(invoker.calls.borrow().len(), 4);
    let ui = &report.tests[1];
    assert_eq!(ui.status, Status::Fail);
    assert_eq!(ui.issues, ["Failed to run test: no such program"]);
    assert_eq!(ui.output, "Error running test: no such program");
    assert_eq!(report.tests[2].status, Status::Pass);
    assert_eq!(report.overall_status, Status::Fail);
}

#[test]
fn nonzero_exit_without_issues_gets_a_synthetic_issue() {
    fn respond(_: &str) -> std::io::Result<Invocation> {
        Ok(Invocation {
            exit_code: Some(101),
            stdout: String::new(),
        })
    }
    let invoker = FakeInvoker::new(respond);
    let report = runner::run_all(Path::new("/ext"), &Config::default(), &invoker);

    assert_eq!(report.tests[0].status, Status::Fail);
    assert_eq!(report.tests[0].issues, ["Validator exited with status 101"]);
}

#[test]
fn status_follows_exit_code_not_parsed_results() {
    let validator = content::validator();
    let record = runner::record_invocation(
        &validator,
        Path::new("/ext"),
        "cmd",
        Invocation {
            exit_code: Some(0),
            stdout: "  ❌ content.js is missing\n".to_string(),
        },
    );
    assert_eq!(record.status, Status::Pass);
    assert_eq!(record.issues, ["content.js is missing"]);
}

#[test]
fn in_process_run_on_good_fixture_passes() {
    let config = Config::default();
    let dir = Path::new("tests/fixtures/good-extension");
    let report = runner::run_all(dir, &config, &InProcessInvoker::new(&config));

    assert_eq!(report.overall_status, Status::Pass, "{report:#?}");
    assert_eq!(report.summary.total_tests, 4);
    assert_eq!(report.summary.passed_tests, 4);
    assert_eq!(report.summary.issues, 0);
    assert_eq!(report.summary.warnings, 0);
}

#[test]
fn in_process_run_on_broken_fixture_fails_except_background() {
    let config = Config::default();
    let dir = Path::new("tests/fixtures/broken-extension");
    let report = runner::run_all(dir, &config, &InProcessInvoker::new(&config));

    let statuses: Vec<_> = report.tests.iter().map(|t| t.status).collect();
    assert_eq!(
        statuses,
        [Status::Fail, Status::Fail, Status::Fail, Status::Pass]
    );
    assert_eq!(report.overall_status, Status::Fail);
}

#[test]
fn reports_differ_only_in_timestamp() {
    let config = Config::default();
    let dir = Path::new("tests/fixtures/broken-extension");
    let invoker = InProcessInvoker::new(&config);

    let mut a = runner::run_all(dir, &config, &invoker);
    let b = runner::run_all(dir, &config, &invoker);
    a.timestamp = b.timestamp;

    assert_eq!(
        extcheck::output::json::format_report(&a).unwrap(),
        extcheck::output::json::format_report(&b).unwrap()
    );
}
