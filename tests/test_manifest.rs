use std::path::Path;

use extcheck::checks::manifest::ManifestValidator;
use extcheck::checks::Validator;
use extcheck::config::Config;
use extcheck::finding::{Outcome, ValidationRun};

fn validate(dir: &Path) -> ValidationRun {
    ManifestValidator.validate(dir, &Config::default())
}

fn messages(run: &ValidationRun, outcome: Outcome) -> Vec<String> {
    run.with_outcome(outcome).map(|r| r.message.clone()).collect()
}

/// Writes a minimal valid extension: manifest plus the four required files.
fn write_extension(dir: &Path, manifest: &str) {
    std::fs::write(dir.join("manifest.json"), manifest).unwrap();
    for file in ["background.js", "popup.html", "popup.js", "content.js"] {
        std::fs::write(dir.join(file), "// stub\n").unwrap();
    }
}

const VALID_MANIFEST: &str = r#"{
  "manifest_version": 3,
  "name": "Test",
  "version": "1.0",
  "description": "A test extension",
  "background": { "service_worker": "background.js" },
  "content_scripts": [{ "matches": ["https://example.com/*"], "js": ["content.js"] }]
}"#;

#[test]
fn missing_manifest_is_a_single_issue() {
    let dir = tempfile::tempdir().unwrap();
    let run = validate(dir.path());

    assert_eq!(messages(&run, Outcome::Issue), ["manifest.json is missing"]);
    assert!(messages(&run, Outcome::Passed).is_empty());
    assert!(messages(&run, Outcome::Warning).is_empty());
    assert!(!run.ok());
}

#[test]
fn valid_manifest_has_no_issues() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(dir.path(), VALID_MANIFEST);

    let run = validate(dir.path());
    assert!(run.ok(), "unexpected issues: {:?}", messages(&run, Outcome::Issue));
    assert!(messages(&run, Outcome::Passed).contains(&"Manifest version is 3 (current)".to_string()));
    assert!(messages(&run, Outcome::Passed)
        .contains(&"Background uses service_worker (correct for Manifest V3)".to_string()));
}

#[test]
fn manifest_v2_is_an_issue() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(dir.path(), &VALID_MANIFEST.replace("\"manifest_version\": 3", "\"manifest_version\": 2"));

    let run = validate(dir.path());
    assert!(messages(&run, Outcome::Issue)
        .contains(&"Manifest version should be 3, found 2".to_string()));
}

#[test]
fn absent_manifest_version_reports_none() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(dir.path(), r#"{"name": "x", "version": "1", "description": "d", "background": {"service_worker": "background.js"}}"#);

    let run = validate(dir.path());
    assert!(messages(&run, Outcome::Issue)
        .contains(&"Manifest version should be 3, found none".to_string()));
}

#[test]
fn invalid_json_is_an_issue() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(dir.path(), "{ \"manifest_version\": 3,");

    let run = validate(dir.path());
    let issues = messages(&run, Outcome::Issue);
    assert!(issues.contains(&"manifest.json is not valid JSON".to_string()));
    // Without a manifest the remaining structural checks still run.
    assert!(messages(&run, Outcome::Warning)
        .contains(&"No content scripts defined in manifest".to_string()));
}

#[test]
fn non_string_version_still_counts_as_present() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(dir.path(), &VALID_MANIFEST.replace("\"version\": \"1.0\"", "\"version\": 1"));

    let run = validate(dir.path());
    assert!(run.ok(), "unexpected issues: {:?}", messages(&run, Outcome::Issue));
    assert!(messages(&run, Outcome::Passed).contains(&"Manifest version is 3 (current)".to_string()));
    assert!(messages(&run, Outcome::Passed)
        .contains(&"Manifest contains required field 'version'".to_string()));
}

#[test]
fn mistyped_fields_only_affect_their_own_checks() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(
        dir.path(),
        r#"{"manifest_version": 3, "name": ["x"], "version": {"major": 1}, "description": false,
            "background": {"service_worker": 7},
            "permissions": ["tabs", 5],
            "host_permissions": "<all_urls>",
            "icons": ["icon.png"],
            "content_scripts": [{"matches": ["https://example.com/*"], "js": ["content.js", 3]}, "bogus"]}"#,
    );

    let run = validate(dir.path());
    let issues = messages(&run, Outcome::Issue);
    assert!(issues.iter().all(|i| !i.starts_with("Error reading")), "got {issues:?}");
    assert_eq!(
        issues,
        [
            "Content script #2 missing 'matches' property",
            "Content script #2 missing 'js' property or has empty array",
        ]
    );

    let warnings = messages(&run, Outcome::Warning);
    assert!(warnings.contains(&"Extension requests access to all URLs".to_string()));
    assert!(warnings.contains(&"Extension uses sensitive permission: tabs".to_string()));
    assert!(warnings.contains(&"No icons defined in manifest".to_string()));
}

#[test]
fn float_manifest_version_three_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(dir.path(), &VALID_MANIFEST.replace("\"manifest_version\": 3", "\"manifest_version\": 3.0"));

    let run = validate(dir.path());
    assert!(run.ok(), "unexpected issues: {:?}", messages(&run, Outcome::Issue));
    assert!(messages(&run, Outcome::Passed).contains(&"Manifest version is 3 (current)".to_string()));
}

#[test]
fn null_description_counts_as_present() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(
        dir.path(),
        &VALID_MANIFEST.replace("\"A test extension\"", "null"),
    );

    let run = validate(dir.path());
    assert!(run.ok(), "unexpected issues: {:?}", messages(&run, Outcome::Issue));
}

#[test]
fn non_object_manifest_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(dir.path(), "[1, 2, 3]");

    let issues = messages(&validate(dir.path()), Outcome::Issue);
    assert!(
        issues.iter().any(|i| i.starts_with("Error reading manifest.json:")),
        "got {issues:?}"
    );
}

#[test]
fn missing_required_fields_are_issues() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(dir.path(), r#"{"manifest_version": 3, "name": "x"}"#);

    let issues = messages(&validate(dir.path()), Outcome::Issue);
    assert!(issues.contains(&"Missing required field 'version' in manifest".to_string()));
    assert!(issues.contains(&"Missing required field 'description' in manifest".to_string()));
    assert!(issues.contains(&"Missing background configuration in manifest".to_string()));
}

#[test]
fn background_without_service_worker_is_an_issue() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(
        dir.path(),
        r#"{"manifest_version": 3, "name": "x", "version": "1", "description": "d",
            "background": {"scripts": ["background.js"]}}"#,
    );

    let issues = messages(&validate(dir.path()), Outcome::Issue);
    assert!(issues.contains(&"Background should use service_worker for Manifest V3".to_string()));
}

#[test]
fn missing_required_files_are_issues() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("manifest.json"), VALID_MANIFEST).unwrap();

    let issues = messages(&validate(dir.path()), Outcome::Issue);
    for file in ["background.js", "popup.html", "popup.js"] {
        assert!(issues.contains(&format!("Required file {file} is missing")));
    }
    assert!(issues.contains(&"Content script content.js is missing".to_string()));
}

#[test]
fn content_script_entries_need_matches_and_js() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(
        dir.path(),
        r#"{"manifest_version": 3, "name": "x", "version": "1", "description": "d",
            "background": {"service_worker": "background.js"},
            "content_scripts": [{"js": ["content.js"]}, {"matches": [], "js": []}]}"#,
    );

    let issues = messages(&validate(dir.path()), Outcome::Issue);
    assert!(issues.contains(&"Content script #1 missing 'matches' property".to_string()));
    assert!(issues.contains(&"Content script #2 has empty 'matches' array".to_string()));
    assert!(issues.contains(&"Content script #2 missing 'js' property or has empty array".to_string()));
}

#[test]
fn broad_and_sensitive_permissions_only_warn() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(
        dir.path(),
        &VALID_MANIFEST.replace(
            "\"background\"",
            r#""permissions": ["tabs", "webRequest", "storage", "notifications"],
               "host_permissions": ["<all_urls>"],
               "background""#,
        ),
    );

    let run = validate(dir.path());
    let warnings = messages(&run, Outcome::Warning);
    assert!(warnings.contains(&"Extension requests access to all URLs".to_string()));
    assert!(warnings.contains(&"Extension uses sensitive permission: tabs".to_string()));
    assert!(warnings.contains(&"Extension uses sensitive permission: webRequest".to_string()));

    let passed = messages(&run, Outcome::Passed);
    assert!(passed.contains(&"Storage permission present for data storage functionality".to_string()));
    assert!(passed
        .contains(&"Notifications permission present for notification functionality".to_string()));
    assert!(run.ok(), "warnings must not fail the run");
}

#[test]
fn icons_are_checked_in_document_order() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(
        dir.path(),
        &VALID_MANIFEST.replace(
            "\"background\"",
            r#""icons": {"48": "big.png", "16": "small.png", "128": "gone.png"}, "background""#,
        ),
    );
    std::fs::write(dir.path().join("big.png"), vec![0u8; 200]).unwrap();
    std::fs::write(dir.path().join("small.png"), vec![0u8; 12]).unwrap();

    let run = validate(dir.path());
    let icon_results: Vec<_> = run
        .results
        .iter()
        .filter(|r| r.check.starts_with("manifest/icon"))
        .map(|r| (r.outcome, r.message.as_str()))
        .collect();
    assert_eq!(
        icon_results,
        [
            (Outcome::Passed, "Icon big.png exists"),
            (
                Outcome::Warning,
                "Icon small.png is very small (12 bytes), might be a placeholder"
            ),
            (Outcome::Issue, "Icon gone.png is missing"),
        ]
    );
}

#[test]
fn no_icons_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(dir.path(), VALID_MANIFEST);

    let warnings = messages(&validate(dir.path()), Outcome::Warning);
    assert!(warnings.contains(&"No icons defined in manifest".to_string()));
}

#[test]
fn icon_threshold_comes_from_config() {
    let dir = tempfile::tempdir().unwrap();
    write_extension(
        dir.path(),
        &VALID_MANIFEST.replace("\"background\"", r#""icons": {"16": "i.png"}, "background""#),
    );
    std::fs::write(dir.path().join("i.png"), vec![0u8; 50]).unwrap();

    let mut config = Config::default();
    config.manifest.min_icon_bytes = 10;
    let run = ManifestValidator.validate(dir.path(), &config);
    assert!(messages(&run, Outcome::Passed).contains(&"Icon i.png exists".to_string()));
}

#[test]
fn broken_fixture_reports_expected_issues() {
    let run = validate(Path::new("tests/fixtures/broken-extension"));
    let issues = messages(&run, Outcome::Issue);

    assert!(issues.contains(&"Manifest version should be 3, found 2".to_string()));
    assert!(issues.contains(&"Missing required field 'description' in manifest".to_string()));
    assert!(issues.contains(&"Required file popup.js is missing".to_string()));
    assert!(issues.contains(&"Content script missing.js is missing".to_string()));
    assert!(issues.contains(&"Icon icon128.png is missing".to_string()));
    assert!(!run.ok());
}

#[test]
fn rerunning_gives_identical_results() {
    let dir = Path::new("tests/fixtures/broken-extension");
    assert_eq!(validate(dir).results, validate(dir).results);
}
