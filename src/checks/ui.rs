//! Popup UI checks (`popup.html`, `popup.js`).
//!
//! # Rules
//!
//! | ID | On miss | What it checks |
//! |----|---------|----------------|
//! | `ui/doctype` | Warning | `popup.html` declares `<!DOCTYPE html>` |
//! | `ui/btn-record` … `ui/progress-text` | Issue | the five control ids exist |
//! | `ui/script-include` | Issue | `popup.html` loads `popup.js` |
//! | `ui/click-listener` | Warning | `popup.js` registers click handlers |
//! | `ui/dom-query` | Warning | `popup.js` looks elements up by id |
//! | `ui/tabs-api`, `ui/runtime-api`, `ui/storage-api` | Warning | extension API usage |
//! | `ui/error-handling` | Warning | `popup.js` has a `try` block |

use super::{FileRules, FileValidator, PatternRule};
use crate::finding::Outcome;
use regex::Regex;
use std::sync::LazyLock;

pub const HTML_FILE: &str = "popup.html";
pub const SCRIPT_FILE: &str = "popup.js";

static RE_DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!doctype html>").unwrap());

static RE_BTN_RECORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)id=["']btn-record["']"#).unwrap());

static RE_BTN_REPLAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)id=["']btn-replay["']"#).unwrap());

static RE_BTN_STOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)id=["']btn-stop["']"#).unwrap());

static RE_STATUS_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)id=["']status-text["']"#).unwrap());

static RE_PROGRESS_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)id=["']progress-text["']"#).unwrap());

static RE_SCRIPT_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<script[^>]*src=["']popup\.js["']"#).unwrap());

static RE_CLICK_LISTENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)addEventListener\(["']click["']"#).unwrap());

static RE_DOM_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)document\.getElementById").unwrap());

static RE_TABS_API: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)chrome\.tabs").unwrap());

static RE_RUNTIME_API: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)chrome\.runtime").unwrap());

static RE_STORAGE_API: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)chrome\.storage").unwrap());

static RE_ERROR_HANDLING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)try\s*\{").unwrap());

static HTML_RULES: &[PatternRule] = &[
    PatternRule {
        id: "ui/doctype",
        label: "DOCTYPE declaration",
        regex: &RE_DOCTYPE,
        on_miss: Outcome::Warning,
        passed: "popup.html has proper DOCTYPE declaration",
        missed: "popup.html missing <!DOCTYPE html> declaration",
    },
    PatternRule {
        id: "ui/btn-record",
        label: "Start Recording button",
        regex: &RE_BTN_RECORD,
        on_miss: Outcome::Issue,
        passed: "popup.html contains Start Recording button",
        missed: "popup.html missing Start Recording button",
    },
    PatternRule {
        id: "ui/btn-replay",
        label: "Replay button",
        regex: &RE_BTN_REPLAY,
        on_miss: Outcome::Issue,
        passed: "popup.html contains Replay button",
        missed: "popup.html missing Replay button",
    },
    PatternRule {
        id: "ui/btn-stop",
        label: "Stop button",
        regex: &RE_BTN_STOP,
        on_miss: Outcome::Issue,
        passed: "popup.html contains Stop button",
        missed: "popup.html missing Stop button",
    },
    PatternRule {
        id: "ui/status-text",
        label: "Status display",
        regex: &RE_STATUS_TEXT,
        on_miss: Outcome::Issue,
        passed: "popup.html contains Status display",
        missed: "popup.html missing Status display",
    },
    PatternRule {
        id: "ui/progress-text",
        label: "Progress display",
        regex: &RE_PROGRESS_TEXT,
        on_miss: Outcome::Issue,
        passed: "popup.html contains Progress display",
        missed: "popup.html missing Progress display",
    },
    PatternRule {
        id: "ui/script-include",
        label: "popup.js script inclusion",
        regex: &RE_SCRIPT_INCLUDE,
        on_miss: Outcome::Issue,
        passed: "popup.html includes popup.js script",
        missed: "popup.html does not include popup.js script",
    },
];

static SCRIPT_RULES: &[PatternRule] = &[
    PatternRule {
        id: "ui/click-listener",
        label: "Click event listeners",
        regex: &RE_CLICK_LISTENER,
        on_miss: Outcome::Warning,
        passed: "popup.js has click event listeners",
        missed: "popup.js might be missing click event listeners",
    },
    PatternRule {
        id: "ui/dom-query",
        label: "DOM element selection",
        regex: &RE_DOM_QUERY,
        on_miss: Outcome::Warning,
        passed: "popup.js selects DOM elements",
        missed: "popup.js might be missing DOM element selection",
    },
    PatternRule {
        id: "ui/tabs-api",
        label: "chrome.tabs API",
        regex: &RE_TABS_API,
        on_miss: Outcome::Warning,
        passed: "popup.js uses chrome.tabs API",
        missed: "popup.js might not use chrome.tabs API",
    },
    PatternRule {
        id: "ui/runtime-api",
        label: "chrome.runtime API",
        regex: &RE_RUNTIME_API,
        on_miss: Outcome::Warning,
        passed: "popup.js uses chrome.runtime API",
        missed: "popup.js might not use chrome.runtime API",
    },
    PatternRule {
        id: "ui/storage-api",
        label: "chrome.storage API",
        regex: &RE_STORAGE_API,
        on_miss: Outcome::Warning,
        passed: "popup.js uses chrome.storage API",
        missed: "popup.js might not use chrome.storage API",
    },
    PatternRule {
        id: "ui/error-handling",
        label: "Error handling",
        regex: &RE_ERROR_HANDLING,
        on_miss: Outcome::Warning,
        passed: "popup.js includes error handling",
        missed: "popup.js might lack error handling (no try-catch blocks found)",
    },
];

static FILES: &[FileRules] = &[
    FileRules {
        file: HTML_FILE,
        rules: HTML_RULES,
    },
    FileRules {
        file: SCRIPT_FILE,
        rules: SCRIPT_RULES,
    },
];

pub fn validator() -> FileValidator {
    FileValidator {
        name: "ui",
        title: "UI Component Validation",
        subject: "UI",
        files: FILES,
    }
}
