//! Output formatting.
//!
//! A single [`ValidationRun`] can be rendered three ways:
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Pretty`](OutputFormat::Pretty) | [`pretty`] | Terminal / human review |
//! | [`Json`](OutputFormat::Json)     | [`json`]   | The aggregator and other automation |
//! | [`Sarif`](OutputFormat::Sarif)   | [`sarif`]  | CI/CD integration |
//!
//! The aggregated [`Report`](crate::report::Report) is rendered by
//! [`markdown`] and [`json::format_report`].

pub mod json;
pub mod markdown;
pub mod pretty;
pub mod sarif;

use crate::error::Result;
use crate::finding::ValidationRun;

/// Supported output formats for a single validation run.
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with one glyph-prefixed line per check.
    Pretty,
    /// Machine-readable JSON.
    Json,
    /// [SARIF 2.1.0](https://sarifweb.azurewebsites.net/) for CI/CD tool integration.
    Sarif,
}

/// Formats a [`ValidationRun`] in the requested [`OutputFormat`].
pub fn format_run(run: &ValidationRun, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format(run)),
        OutputFormat::Json => json::format_run(run),
        OutputFormat::Sarif => sarif::format(run),
    }
}
