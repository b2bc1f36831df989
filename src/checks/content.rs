//! Content script checks (`content.js`).
//!
//! The six core features are issues when absent; the narrower recording,
//! replay, and platform patterns are warnings.

use super::{FileRules, FileValidator, PatternRule};
use crate::finding::Outcome;
use regex::Regex;
use std::sync::LazyLock;

pub const FILE: &str = "content.js";

static RE_RECORDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)record(ing|Action|er)").unwrap());

static RE_REPLAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)replay(ing|Action|er)").unwrap());

static RE_EVENT_LISTENERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)addEventListener").unwrap());

static RE_DOM_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)querySelector|getElementById").unwrap());

static RE_MESSAGE_HANDLING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)onMessage|sendMessage").unwrap());

static RE_ERROR_HANDLING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)try\s*\{|catch\s*\(").unwrap());

static RE_CLICK_RECORDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)click").unwrap());

static RE_INPUT_RECORDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)input").unwrap());

static RE_KEYPRESS_RECORDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)keypress|keydown").unwrap());

static RE_NAVIGATION_RECORDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)navigation|location").unwrap());

static RE_ACTION_EXECUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)execute(Action|Click|Input)").unwrap());

static RE_DELAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)delay|sleep|timeout|wait").unwrap());

static RE_ERROR_RECOVERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)retry|recover|fallback").unwrap());

static RE_CAPTCHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)captcha").unwrap());

static RE_PLATFORM_DETECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)taleo|workday|successfactors|greenhouse").unwrap());

static RULES: &[PatternRule] = &[
    // Core functionality (Issue)
    PatternRule {
        id: "content/recording",
        label: "Recording functionality",
        regex: &RE_RECORDING,
        on_miss: Outcome::Issue,
        passed: "content.js includes Recording functionality",
        missed: "content.js missing Recording functionality",
    },
    PatternRule {
        id: "content/replay",
        label: "Replay functionality",
        regex: &RE_REPLAY,
        on_miss: Outcome::Issue,
        passed: "content.js includes Replay functionality",
        missed: "content.js missing Replay functionality",
    },
    PatternRule {
        id: "content/event-listeners",
        label: "Event listeners",
        regex: &RE_EVENT_LISTENERS,
        on_miss: Outcome::Issue,
        passed: "content.js includes Event listeners",
        missed: "content.js missing Event listeners",
    },
    PatternRule {
        id: "content/dom-query",
        label: "DOM manipulation",
        regex: &RE_DOM_QUERY,
        on_miss: Outcome::Issue,
        passed: "content.js includes DOM manipulation",
        missed: "content.js missing DOM manipulation",
    },
    PatternRule {
        id: "content/message-handling",
        label: "Message handling",
        regex: &RE_MESSAGE_HANDLING,
        on_miss: Outcome::Issue,
        passed: "content.js includes Message handling",
        missed: "content.js missing Message handling",
    },
    PatternRule {
        id: "content/error-handling",
        label: "Error handling",
        regex: &RE_ERROR_HANDLING,
        on_miss: Outcome::Issue,
        passed: "content.js includes Error handling",
        missed: "content.js missing Error handling",
    },
    // Recording details (Warning)
    PatternRule {
        id: "content/click-recording",
        label: "Click recording",
        regex: &RE_CLICK_RECORDING,
        on_miss: Outcome::Warning,
        passed: "content.js includes Click recording",
        missed: "content.js might be missing Click recording",
    },
    PatternRule {
        id: "content/input-recording",
        label: "Input recording",
        regex: &RE_INPUT_RECORDING,
        on_miss: Outcome::Warning,
        passed: "content.js includes Input recording",
        missed: "content.js might be missing Input recording",
    },
    PatternRule {
        id: "content/keypress-recording",
        label: "Keypress recording",
        regex: &RE_KEYPRESS_RECORDING,
        on_miss: Outcome::Warning,
        passed: "content.js includes Keypress recording",
        missed: "content.js might be missing Keypress recording",
    },
    PatternRule {
        id: "content/navigation-recording",
        label: "Navigation recording",
        regex: &RE_NAVIGATION_RECORDING,
        on_miss: Outcome::Warning,
        passed: "content.js includes Navigation recording",
        missed: "content.js might be missing Navigation recording",
    },
    // Replay details (Warning)
    PatternRule {
        id: "content/action-execution",
        label: "Action execution",
        regex: &RE_ACTION_EXECUTION,
        on_miss: Outcome::Warning,
        passed: "content.js includes Action execution",
        missed: "content.js might be missing Action execution",
    },
    PatternRule {
        id: "content/delays",
        label: "Human-like delays",
        regex: &RE_DELAYS,
        on_miss: Outcome::Warning,
        passed: "content.js includes Human-like delays",
        missed: "content.js might be missing Human-like delays",
    },
    PatternRule {
        id: "content/error-recovery",
        label: "Error recovery",
        regex: &RE_ERROR_RECOVERY,
        on_miss: Outcome::Warning,
        passed: "content.js includes Error recovery",
        missed: "content.js might be missing Error recovery",
    },
    PatternRule {
        id: "content/captcha",
        label: "Captcha detection",
        regex: &RE_CAPTCHA,
        on_miss: Outcome::Warning,
        passed: "content.js includes Captcha detection",
        missed: "content.js might be missing Captcha detection",
    },
    // Platform
    PatternRule {
        id: "content/platform-detection",
        label: "Job platform detection",
        regex: &RE_PLATFORM_DETECTION,
        on_miss: Outcome::Warning,
        passed: "content.js includes job platform detection",
        missed: "content.js might be missing job platform detection",
    },
];

static FILES: &[FileRules] = &[FileRules {
    file: FILE,
    rules: RULES,
}];

pub fn validator() -> FileValidator {
    FileValidator {
        name: "content",
        title: "Content Script Validation",
        subject: "content script",
        files: FILES,
    }
}
