//! Markdown rendering of the aggregated report.

use crate::finding::{ISSUE_GLYPH, PASS_GLYPH, WARNING_GLYPH};
use crate::report::{Report, Status, TestRecord};

fn status_emoji(status: Status) -> &'static str {
    match status {
        Status::Pass => PASS_GLYPH,
        Status::Fail => ISSUE_GLYPH,
    }
}

fn push_list(out: &mut String, title: &str, glyph: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("#### {title}\n\n"));
    for item in items {
        out.push_str(&format!("- {glyph} {item}\n"));
    }
    out.push('\n');
}

fn push_test(out: &mut String, test: &TestRecord) {
    out.push_str(&format!(
        "### {} {}\n\n",
        status_emoji(test.status),
        test.name
    ));
    out.push_str(&format!("**Status:** {}\n\n", test.status));
    push_list(out, "Passed Checks", PASS_GLYPH, &test.passed);
    push_list(out, "Warnings", WARNING_GLYPH, &test.warnings);
    push_list(out, "Issues", ISSUE_GLYPH, &test.issues);
}

/// Renders the report as a Markdown document.
///
/// The Recommendations section only appears when there is at least one
/// warning or issue.
pub fn format(report: &Report) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    out.push_str(&format!(
        "# 🔍 {} Chrome Extension Test Report\n\n",
        report.extension_name
    ));
    out.push_str(&format!(
        "**Generated:** {}\n\n",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "**Extension directory:** `{}`\n\n",
        report.extension_dir.display()
    ));

    out.push_str(&format!(
        "## {} Overall Status: {}\n\n",
        status_emoji(report.overall_status),
        report.overall_status
    ));

    out.push_str("## 📊 Summary\n\n");
    out.push_str(&format!("- **Total Tests:** {}\n", summary.total_tests));
    out.push_str(&format!("- **Passed Tests:** {}\n", summary.passed_tests));
    out.push_str(&format!("- **Warnings:** {}\n", summary.warnings));
    out.push_str(&format!("- **Issues:** {}\n\n", summary.issues));

    out.push_str("## 📋 Test Results\n\n");
    for test in &report.tests {
        push_test(&mut out, test);
    }

    if summary.issues > 0 || summary.warnings > 0 {
        out.push_str("## 🚀 Recommendations\n\n");

        if summary.issues > 0 {
            out.push_str("### Critical Issues to Fix\n\n");
            for test in &report.tests {
                for issue in &test.issues {
                    out.push_str(&format!("- **{}:** {ISSUE_GLYPH} {issue}\n", test.name));
                }
            }
            out.push('\n');
        }

        if summary.warnings > 0 {
            out.push_str("### Improvements to Consider\n\n");
            for test in &report.tests {
                for warning in &test.warnings {
                    out.push_str(&format!(
                        "- **{}:** {WARNING_GLYPH} {warning}\n",
                        test.name
                    ));
                }
            }
            out.push('\n');
        }
    }

    out.push_str("## 🏁 Final Assessment\n\n");
    match report.overall_status {
        Status::Pass => {
            out.push_str(
                "✅ **The extension passes all critical validation checks and appears ready for installation.**\n\n",
            );
            if summary.warnings > 0 {
                out.push_str(
                    "⚠️ While there are some warnings, they do not prevent the extension from functioning correctly.\n",
                );
                out.push_str(
                    "Consider addressing these warnings in future updates to improve the extension.\n",
                );
            } else {
                out.push_str(
                    "🎉 No warnings or issues detected! The extension is in excellent condition.\n",
                );
            }
        }
        Status::Fail => {
            out.push_str(
                "❌ **The extension has critical issues that should be addressed before installation.**\n\n",
            );
            out.push_str("Please fix the issues listed above to ensure proper functionality.\n");
        }
    }

    out
}
