//! JSON output formatter.
//!
//! [`format_run`] is the structured channel the aggregator reads back from
//! each validator process. [`format_report`] writes the aggregated report.

use crate::error::Result;
use crate::finding::ValidationRun;
use crate::report::Report;

#[derive(serde::Serialize)]
struct RunOutput<'a> {
    #[serde(flatten)]
    run: &'a ValidationRun,
    ok: bool,
    summary: RunSummary,
}

#[derive(serde::Serialize)]
struct RunSummary {
    passed: usize,
    warnings: usize,
    issues: usize,
}

/// Formats a [`ValidationRun`] as pretty-printed JSON.
///
/// The document deserializes back into a [`ValidationRun`]; the derived `ok`
/// and `summary` fields are ignored on the way in.
pub fn format_run(run: &ValidationRun) -> Result<String> {
    let (passed, warnings, issues) = run.counts();
    let output = RunOutput {
        run,
        ok: run.ok(),
        summary: RunSummary {
            passed,
            warnings,
            issues,
        },
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Formats a [`Report`] as pretty-printed JSON with a trailing newline.
pub fn format_report(report: &Report) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}
