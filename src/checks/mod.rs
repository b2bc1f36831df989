//! Extension validators.
//!
//! Every validator implements the [`Validator`] trait. Three of them are
//! plain [`FileValidator`]s: a named file list plus a declarative table of
//! [`PatternRule`]s each file is checked against. The manifest validator adds
//! structural JSON checks on top.
//!
//! | Validator | Files | Module |
//! |-----------|-------|--------|
//! | `structure` | `manifest.json` and the files it references | [`manifest`] |
//! | `ui` | `popup.html`, `popup.js` | [`ui`] |
//! | `content` | `content.js` | [`content`] |
//! | `background` | `background.js` | [`background`] |
//!
//! [`all_validators`] returns them in the order the aggregator runs them.

pub mod background;
pub mod content;
pub mod manifest;
pub mod ui;

use crate::config::Config;
use crate::finding::{CheckResult, Outcome, ValidationRun};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// A single extension validator.
pub trait Validator {
    /// Short identifier, also the CLI subcommand (e.g. `"ui"`).
    fn name(&self) -> &'static str;

    /// Test name used in the aggregated report.
    fn title(&self) -> &'static str;

    /// What is being validated, e.g. `"UI"` or `"content script"`.
    fn subject(&self) -> &'static str;

    /// Runs every check against `dir`.
    ///
    /// Never fails: unreadable or missing files become
    /// [`Issue`](Outcome::Issue) results.
    fn validate(&self, dir: &Path, config: &Config) -> ValidationRun;
}

/// One row of a pattern table.
///
/// The regex is searched anywhere in the text. A match yields
/// [`Outcome::Passed`] with `passed`; no match yields `on_miss` with `missed`.
/// Built-in tables compile their patterns once with a `(?i)` prefix.
#[derive(Debug)]
pub struct PatternRule {
    pub id: &'static str,
    pub label: &'static str,
    pub regex: &'static LazyLock<Regex>,
    pub on_miss: Outcome,
    pub passed: &'static str,
    pub missed: &'static str,
}

/// Tests each rule against `text`, one result per rule in table order.
///
/// Rules are independent of each other. Empty text matches nothing.
pub fn check_patterns(text: &str, rules: &[PatternRule]) -> Vec<CheckResult> {
    rules
        .iter()
        .map(|rule| {
            if !text.is_empty() && rule.regex.is_match(text) {
                CheckResult::passed(rule.id, rule.passed)
            } else {
                CheckResult::new(rule.id, rule.on_miss, rule.missed)
            }
        })
        .collect()
}

/// A file and the rules its content is checked against.
pub struct FileRules {
    pub file: &'static str,
    pub rules: &'static [PatternRule],
}

/// A validator defined entirely by its rule tables.
pub struct FileValidator {
    pub name: &'static str,
    pub title: &'static str,
    pub subject: &'static str,
    pub files: &'static [FileRules],
}

impl FileValidator {
    fn check_file(&self, dir: &Path, spec: &FileRules, run: &mut ValidationRun) {
        let path = dir.join(spec.file);
        let missing_id = format!("{}/missing-file", self.name);

        if !path.exists() {
            run.push(
                CheckResult::issue(&missing_id, format!("{} is missing", spec.file))
                    .in_file(spec.file),
            );
            return;
        }

        tracing::debug!(file = %path.display(), "reading");
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                for result in check_patterns(&text, spec.rules) {
                    run.push(result.in_file(spec.file));
                }
            }
            Err(e) => run.push(
                CheckResult::issue(
                    &format!("{}/read-error", self.name),
                    format!("Error reading {}: {e}", spec.file),
                )
                .in_file(spec.file),
            ),
        }
    }
}

impl Validator for FileValidator {
    fn name(&self) -> &'static str {
        self.name
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn subject(&self) -> &'static str {
        self.subject
    }

    fn validate(&self, dir: &Path, _config: &Config) -> ValidationRun {
        let mut run = ValidationRun::new(self.name, self.subject, dir);
        for spec in self.files {
            self.check_file(dir, spec, &mut run);
        }
        run
    }
}

/// Returns every validator in aggregator order: structure, UI, content,
/// background.
pub fn all_validators() -> Vec<Box<dyn Validator>> {
    vec![
        Box::new(manifest::ManifestValidator),
        Box::new(ui::validator()),
        Box::new(content::validator()),
        Box::new(background::validator()),
    ]
}

/// Looks a validator up by its [`name`](Validator::name).
pub fn find_validator(name: &str) -> Option<Box<dyn Validator>> {
    all_validators().into_iter().find(|v| v.name() == name)
}

/// Metadata for a single check, used by `list-rules`.
pub struct RuleInfo {
    pub id: &'static str,
    pub validator: &'static str,
    /// Outcome when the check fails.
    pub on_miss: Outcome,
    pub label: &'static str,
}

fn table_rules(validator: &FileValidator) -> Vec<RuleInfo> {
    validator
        .files
        .iter()
        .flat_map(|f| f.rules.iter())
        .map(|r| RuleInfo {
            id: r.id,
            validator: validator.name,
            on_miss: r.on_miss,
            label: r.label,
        })
        .collect()
}

/// Aggregates [`RuleInfo`] from every validator.
pub fn all_rules() -> Vec<RuleInfo> {
    let mut rules = manifest::rules();
    rules.extend(table_rules(&ui::validator()));
    rules.extend(table_rules(&content::validator()));
    rules.extend(table_rules(&background::validator()));
    rules
}
