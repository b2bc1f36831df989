//! Background service worker checks (`background.js`).
//!
//! Only a missing or unreadable file is an issue here. Every feature
//! pattern, including the core ones, ends as a warning when absent.
//!
//! | Group | Labels | On miss |
//! |-------|--------|---------|
//! | Core | message handling, storage, error handling, lifecycle | Warning |
//! | Features | notifications, badge, session, persistence, platform detection | Warning |
//! | Events | runtime messages, tabs, alarms, storage changes | Warning |

use super::{FileRules, FileValidator, PatternRule};
use crate::finding::Outcome;
use regex::Regex;
use std::sync::LazyLock;

pub const FILE: &str = "background.js";

static RE_MESSAGE_HANDLING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)onMessage|sendMessage").unwrap());

static RE_STORAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)storage\.local|chrome\.storage").unwrap());

static RE_ERROR_HANDLING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)try\s*\{|catch\s*\(").unwrap());

static RE_LIFECYCLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)onInstalled|onStartup").unwrap());

static RE_NOTIFICATIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)notification|notify").unwrap());

static RE_BADGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)setBadgeText|setBadgeBackgroundColor").unwrap());

static RE_SESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)session").unwrap());

static RE_PERSISTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)save|store|get").unwrap());

static RE_PLATFORM_DETECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)taleo|workday|successfactors|greenhouse").unwrap());

static RE_RUNTIME_MESSAGE_EVENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)onMessage").unwrap());

static RE_TAB_EVENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)onCreated|onRemoved|onUpdated").unwrap());

static RE_ALARM_EVENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)onAlarm").unwrap());

static RE_STORAGE_EVENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)onChanged").unwrap());

static RULES: &[PatternRule] = &[
    // Core
    PatternRule {
        id: "background/message-handling",
        label: "Message handling",
        regex: &RE_MESSAGE_HANDLING,
        on_miss: Outcome::Warning,
        passed: "background.js includes Message handling",
        missed: "background.js might be missing Message handling",
    },
    PatternRule {
        id: "background/storage",
        label: "Storage operations",
        regex: &RE_STORAGE,
        on_miss: Outcome::Warning,
        passed: "background.js includes Storage operations",
        missed: "background.js might be missing Storage operations",
    },
    PatternRule {
        id: "background/error-handling",
        label: "Error handling",
        regex: &RE_ERROR_HANDLING,
        on_miss: Outcome::Warning,
        passed: "background.js includes Error handling",
        missed: "background.js might be missing Error handling",
    },
    PatternRule {
        id: "background/lifecycle",
        label: "Extension lifecycle",
        regex: &RE_LIFECYCLE,
        on_miss: Outcome::Warning,
        passed: "background.js includes Extension lifecycle",
        missed: "background.js might be missing Extension lifecycle",
    },
    // Features
    PatternRule {
        id: "background/notifications",
        label: "Notification system",
        regex: &RE_NOTIFICATIONS,
        on_miss: Outcome::Warning,
        passed: "background.js includes Notification system",
        missed: "background.js might be missing Notification system",
    },
    PatternRule {
        id: "background/badge",
        label: "Badge management",
        regex: &RE_BADGE,
        on_miss: Outcome::Warning,
        passed: "background.js includes Badge management",
        missed: "background.js might be missing Badge management",
    },
    PatternRule {
        id: "background/session",
        label: "Session management",
        regex: &RE_SESSION,
        on_miss: Outcome::Warning,
        passed: "background.js includes Session management",
        missed: "background.js might be missing Session management",
    },
    PatternRule {
        id: "background/persistence",
        label: "Data persistence",
        regex: &RE_PERSISTENCE,
        on_miss: Outcome::Warning,
        passed: "background.js includes Data persistence",
        missed: "background.js might be missing Data persistence",
    },
    PatternRule {
        id: "background/platform-detection",
        label: "Platform detection",
        regex: &RE_PLATFORM_DETECTION,
        on_miss: Outcome::Warning,
        passed: "background.js includes Platform detection",
        missed: "background.js might be missing Platform detection",
    },
    // Events
    PatternRule {
        id: "background/runtime-message-events",
        label: "Runtime message events",
        regex: &RE_RUNTIME_MESSAGE_EVENTS,
        on_miss: Outcome::Warning,
        passed: "background.js listens for Runtime message events",
        missed: "background.js might not listen for Runtime message events",
    },
    PatternRule {
        id: "background/tab-events",
        label: "Tab events",
        regex: &RE_TAB_EVENTS,
        on_miss: Outcome::Warning,
        passed: "background.js listens for Tab events",
        missed: "background.js might not listen for Tab events",
    },
    PatternRule {
        id: "background/alarm-events",
        label: "Alarm events",
        regex: &RE_ALARM_EVENTS,
        on_miss: Outcome::Warning,
        passed: "background.js listens for Alarm events",
        missed: "background.js might not listen for Alarm events",
    },
    PatternRule {
        id: "background/storage-events",
        label: "Storage events",
        regex: &RE_STORAGE_EVENTS,
        on_miss: Outcome::Warning,
        passed: "background.js listens for Storage events",
        missed: "background.js might not listen for Storage events",
    },
];

static FILES: &[FileRules] = &[FileRules {
    file: FILE,
    rules: RULES,
}];

pub fn validator() -> FileValidator {
    FileValidator {
        name: "background",
        title: "Background Script Validation",
        subject: "background script",
        files: FILES,
    }
}
