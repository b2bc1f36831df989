use std::path::{Path, PathBuf};

use extcheck::config::Config;
use extcheck::Error;

#[test]
fn defaults_match_the_documented_values() {
    let config = Config::default();
    assert_eq!(config.extension_dir, PathBuf::from("/app/dist"));
    assert_eq!(config.report.extension_name, "AutoApply");
    assert_eq!(config.manifest.min_icon_bytes, 100);
    assert_eq!(
        config.manifest.sensitive_permissions,
        ["tabs", "cookies", "webNavigation", "webRequest"]
    );
    assert!(config.is_broad_host("<all_urls>"));
    assert!(!config.is_broad_host("https://example.com/*"));
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extcheck.toml");
    std::fs::write(
        &path,
        "extension_dir = \"./dist\"\n\n[manifest]\nmin_icon_bytes = 16\n",
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.extension_dir, PathBuf::from("./dist"));
    assert_eq!(config.manifest.min_icon_bytes, 16);
    assert_eq!(config.manifest.sensitive_permissions.len(), 4);
    assert_eq!(config.report.json, PathBuf::from("extension_test_report.json"));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let err = Config::load(Some(Path::new("does/not/exist.toml"))).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
    assert!(err.to_string().contains("does/not/exist.toml"));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[manifest\nmin_icon_bytes = ").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
}
