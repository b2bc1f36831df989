//! # extcheck
//!
//! Static validation for browser extension packages.
//!
//! `extcheck` inspects an unpacked Manifest V3 extension: the manifest and
//! the files it references, the background service worker, the content
//! script, and the popup UI. Checks are structural (JSON shape, required
//! files) or textual (case-insensitive regex patterns over source files).
//! Each check ends as passed, a warning, or an issue; only issues fail.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use extcheck::checks::{self, Validator};
//! use extcheck::config::Config;
//!
//! let config = Config::default();
//! let run = checks::content::validator().validate(Path::new("./dist"), &config);
//! for issue in run.with_outcome(extcheck::finding::Outcome::Issue) {
//!     println!("{issue}");
//! }
//! ```
//!
//! ## Architecture
//!
//! 1. **[`config`]**: load configuration from TOML.
//! 2. **[`checks`]**: the [`checks::Validator`] trait, the pattern checker,
//!    and the four validators.
//! 3. **[`runner`]**: run every validator in its own process and collect
//!    the results.
//! 4. **[`finding`]** / **[`report`]**: result and report data types.
//! 5. **[`output`]**: console text, JSON, SARIF, and the Markdown report.

pub mod checks;
pub mod config;
pub mod error;
pub mod finding;
pub mod output;
pub mod report;
pub mod runner;

pub use error::{Error, Result};
