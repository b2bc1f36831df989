//! Console formatter for one validation run.
//!
//! Result lines are `  <glyph> <message>`. Headings and banners never start
//! with a result glyph, so the output can be re-scored line by line with
//! [`parse_glyph_lines`](crate::finding::parse_glyph_lines). Result lines
//! themselves are left uncolored for the same reason.

use crate::finding::{Outcome, ValidationRun};
use colored::Colorize;

pub fn format(run: &ValidationRun) -> String {
    let mut out = String::new();
    let heading = format!("{} VALIDATION", run.subject.to_uppercase());

    out.push_str(&format!(
        "🔍 Validating Chrome extension {} in {}\n",
        run.subject,
        run.extension_dir.display()
    ));
    out.push_str(&format!(
        "\n📋 {}\n",
        format!("{heading} RESULTS:").bold()
    ));

    let sections = [
        (Outcome::Passed, "Passed checks:".green().bold()),
        (Outcome::Warning, "Warnings:".yellow().bold()),
        (Outcome::Issue, "Issues:".red().bold()),
    ];
    for (outcome, title) in sections {
        let mut items = run.with_outcome(outcome).peekable();
        if items.peek().is_none() {
            continue;
        }
        out.push_str(&format!("\n{title}\n"));
        for item in items {
            out.push_str(&format!("  {item}\n"));
        }
    }

    let (passed, warnings, issues) = run.counts();
    out.push_str(&format!(
        "\n📊 SUMMARY: {passed} passed, {warnings} warnings, {issues} issues\n"
    ));

    if issues == 0 {
        out.push_str(&format!(
            "\n🎉 {}\n",
            format!("{heading} SUCCESSFUL: No critical issues found!")
                .green()
                .bold()
        ));
    } else {
        out.push_str(&format!(
            "\n🛑 {}\n",
            format!("{heading} FAILED: {issues} issues need to be fixed")
                .red()
                .bold()
        ));
    }

    out
}
