use std::fmt;
use std::path::{Path, PathBuf};

/// Leading glyph of a passed-check line.
pub const PASS_GLYPH: &str = "✅";
/// Leading glyph of a warning line. Printed with a trailing U+FE0F.
pub const WARNING_GLYPH: &str = "⚠️";
/// Leading glyph of an issue line.
pub const ISSUE_GLYPH: &str = "❌";

/// How a single check came out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Warning,
    Issue,
}

impl Outcome {
    pub fn glyph(self) -> &'static str {
        match self {
            Outcome::Passed => PASS_GLYPH,
            Outcome::Warning => WARNING_GLYPH,
            Outcome::Issue => ISSUE_GLYPH,
        }
    }

    /// Splits a printed result line into its outcome and message.
    ///
    /// The line is trimmed first. Returns `None` when it does not start with
    /// one of the three glyphs. The warning sign is accepted with or without
    /// its emoji variation selector.
    ///
    /// ```
    /// use extcheck::finding::Outcome;
    ///
    /// assert_eq!(
    ///     Outcome::from_line("  ❌ popup.js is missing"),
    ///     Some((Outcome::Issue, "popup.js is missing"))
    /// );
    /// assert_eq!(Outcome::from_line("📊 SUMMARY: 1 passed"), None);
    /// ```
    pub fn from_line(line: &str) -> Option<(Outcome, &str)> {
        let line = line.trim();
        let (outcome, rest) = if let Some(rest) = line.strip_prefix(PASS_GLYPH) {
            (Outcome::Passed, rest)
        } else if let Some(rest) = line.strip_prefix('\u{26A0}') {
            (Outcome::Warning, rest.trim_start_matches('\u{FE0F}'))
        } else if let Some(rest) = line.strip_prefix(ISSUE_GLYPH) {
            (Outcome::Issue, rest)
        } else {
            return None;
        };
        Some((outcome, rest.trim()))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => write!(f, "passed"),
            Outcome::Warning => write!(f, "warning"),
            Outcome::Issue => write!(f, "issue"),
        }
    }
}

/// One check and its outcome. Created once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CheckResult {
    /// Stable check id, e.g. `manifest/version` or `content/captcha`.
    pub check: String,
    pub outcome: Outcome,
    pub message: String,
    /// File the check looked at, relative to the extension directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl CheckResult {
    pub fn new(check: &str, outcome: Outcome, message: impl Into<String>) -> Self {
        CheckResult {
            check: check.to_string(),
            outcome,
            message: message.into(),
            file: None,
        }
    }

    pub fn passed(check: &str, message: impl Into<String>) -> Self {
        Self::new(check, Outcome::Passed, message)
    }

    pub fn warning(check: &str, message: impl Into<String>) -> Self {
        Self::new(check, Outcome::Warning, message)
    }

    pub fn issue(check: &str, message: impl Into<String>) -> Self {
        Self::new(check, Outcome::Issue, message)
    }

    pub fn in_file(mut self, file: &str) -> Self {
        self.file = Some(file.to_string());
        self
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.outcome.glyph(), self.message)
    }
}

/// Everything one validator found, in the order the checks ran.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationRun {
    /// Validator name (`structure`, `ui`, `content`, `background`).
    pub validator: String,
    /// Human phrase for what was validated, used in console headings.
    #[serde(default)]
    pub subject: String,
    pub extension_dir: PathBuf,
    pub results: Vec<CheckResult>,
}

impl ValidationRun {
    pub fn new(validator: &str, subject: &str, extension_dir: &Path) -> Self {
        ValidationRun {
            validator: validator.to_string(),
            subject: subject.to_string(),
            extension_dir: extension_dir.to_path_buf(),
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    /// `true` when no check ended as an [`Outcome::Issue`]. Warnings never
    /// affect this.
    pub fn ok(&self) -> bool {
        !self.results.iter().any(|r| r.outcome == Outcome::Issue)
    }

    pub fn with_outcome(&self, outcome: Outcome) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(move |r| r.outcome == outcome)
    }

    /// Counts passed checks, warnings, and issues in a single pass.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.results
            .iter()
            .fold((0, 0, 0), |(p, w, i), r| match r.outcome {
                Outcome::Passed => (p + 1, w, i),
                Outcome::Warning => (p, w + 1, i),
                Outcome::Issue => (p, w, i + 1),
            })
    }
}

/// Recovers results from plain console output by leading glyph.
///
/// Lines without a recognized glyph are skipped. Recovered results carry the
/// check id `<validator>/output` since the text does not name the check.
pub fn parse_glyph_lines(validator: &str, text: &str) -> Vec<CheckResult> {
    let check = format!("{validator}/output");
    text.lines()
        .filter_map(Outcome::from_line)
        .map(|(outcome, message)| CheckResult::new(&check, outcome, message))
        .collect()
}
