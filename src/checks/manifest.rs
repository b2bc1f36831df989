//! `manifest.json` and package structure validator.
//!
//! Checks run in this order, each appending to the same result list:
//!
//! 1. **Manifest**: exists, parses, `manifest_version` is 3, `name`,
//!    `version` and `description` are present, background uses
//!    `service_worker`.
//! 2. **Required files**: `manifest.json`, `background.js`, `popup.html`,
//!    `popup.js`, plus every file listed in a content script's `js`.
//! 3. **Permissions**: broad host access and sensitive API permissions warn.
//! 4. **Content scripts**: each entry needs non-empty `matches` and `js`.
//! 5. **Icons**: declared icons must exist and not be placeholder-sized.
//!
//! A missing `manifest.json` stops the validator after a single issue, since
//! every later check depends on it.

use super::{RuleInfo, Validator};
use crate::config::Config;
use crate::finding::{CheckResult, Outcome, ValidationRun};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.json";

const REQUIRED_FILES: &[&str] = &[MANIFEST_FILE, "background.js", "popup.html", "popup.js"];

/// The parts of an MV3 manifest the validator looks at.
///
/// Unknown keys are ignored. Fields are read leniently: a value of an
/// unexpected JSON type only affects the check that looks at that field, never
/// the rest of the manifest. Presence-only fields keep an explicit `null` as
/// present.
#[derive(Debug, Default, serde::Deserialize)]
pub struct Manifest {
    /// Kept untyped so a wrong value can be echoed back as-is.
    pub manifest_version: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub version: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "lenient_some")]
    pub background: Option<Background>,
    #[serde(default, deserialize_with = "string_list")]
    pub permissions: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub host_permissions: Vec<String>,
    #[serde(default, deserialize_with = "content_scripts")]
    pub content_scripts: Option<Vec<ContentScript>>,
    /// Icon size to path, in document order.
    #[serde(default, deserialize_with = "object")]
    pub icons: Map<String, Value>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct Background {
    #[serde(default, deserialize_with = "present")]
    pub service_worker: Option<Value>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct ContentScript {
    #[serde(default, deserialize_with = "optional_string_list")]
    pub matches: Option<Vec<String>>,
    #[serde(default, deserialize_with = "optional_string_list")]
    pub js: Option<Vec<String>>,
}

impl Manifest {
    /// Top-level fields every manifest must carry, with their presence.
    pub fn required_fields(&self) -> [(&'static str, bool); 3] {
        [
            ("name", self.name.is_some()),
            ("version", self.version.is_some()),
            ("description", self.description.is_some()),
        ]
    }
}

/// Any value, `null` included, marks the key as present.
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}

/// Falls back to `T::default()` when the value has the wrong shape.
fn lenient<T: DeserializeOwned + Default>(value: Value) -> T {
    T::deserialize(value).unwrap_or_default()
}

fn lenient_some<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(Some(lenient(Value::deserialize(d)?)))
}

/// String elements of an array. A lone string counts as one element.
fn strings(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    }
}

fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Value::deserialize(d).map(strings)
}

fn optional_string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    Value::deserialize(d).map(|v| Some(strings(v)))
}

fn content_scripts<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<Vec<ContentScript>>, D::Error> {
    let scripts = match Value::deserialize(d)? {
        Value::Array(items) => items.into_iter().map(lenient).collect(),
        _ => Vec::new(),
    };
    Ok(Some(scripts))
}

fn object<'de, D: Deserializer<'de>>(d: D) -> Result<Map<String, Value>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

pub struct ManifestValidator;

impl Validator for ManifestValidator {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn title(&self) -> &'static str {
        "Manifest and Structure Validation"
    }

    fn subject(&self) -> &'static str {
        "manifest and structure"
    }

    fn validate(&self, dir: &Path, config: &Config) -> ValidationRun {
        let mut run = ValidationRun::new(self.name(), self.subject(), dir);
        let manifest_path = dir.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            run.push(
                CheckResult::issue("manifest/missing", "manifest.json is missing")
                    .in_file(MANIFEST_FILE),
            );
            return run;
        }

        let manifest = match read_manifest(&manifest_path) {
            Ok(manifest) => {
                check_manifest(&manifest, &mut run);
                Some(manifest)
            }
            Err(issue) => {
                run.push(issue);
                None
            }
        };

        check_required_files(dir, manifest.as_ref(), &mut run);
        if let Some(ref m) = manifest {
            check_permissions(m, config, &mut run);
        }
        check_content_scripts(manifest.as_ref(), &mut run);
        if let Some(ref m) = manifest {
            check_icons(dir, m, config, &mut run);
        }

        run
    }
}

/// Reads and parses the manifest, turning any failure into the issue to report.
fn read_manifest(path: &Path) -> Result<Manifest, CheckResult> {
    tracing::debug!(file = %path.display(), "reading manifest");
    let text = std::fs::read_to_string(path).map_err(|e| {
        CheckResult::issue(
            "manifest/read-error",
            format!("Error reading manifest.json: {e}"),
        )
        .in_file(MANIFEST_FILE)
    })?;

    serde_json::from_str(&text).map_err(|e| {
        let issue = if e.is_syntax() || e.is_eof() {
            CheckResult::issue("manifest/invalid-json", "manifest.json is not valid JSON")
        } else {
            CheckResult::issue(
                "manifest/read-error",
                format!("Error reading manifest.json: {e}"),
            )
        };
        issue.in_file(MANIFEST_FILE)
    })
}

fn check_manifest(manifest: &Manifest, run: &mut ValidationRun) {
    let push = |run: &mut ValidationRun, r: CheckResult| run.push(r.in_file(MANIFEST_FILE));

    match &manifest.manifest_version {
        Some(v) if v.as_f64() == Some(3.0) => push(
            run,
            CheckResult::passed("manifest/version", "Manifest version is 3 (current)"),
        ),
        other => {
            let found = other
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "none".to_string());
            push(
                run,
                CheckResult::issue(
                    "manifest/version",
                    format!("Manifest version should be 3, found {found}"),
                ),
            );
        }
    }

    for (field, present) in manifest.required_fields() {
        let r = if present {
            CheckResult::passed(
                "manifest/required-field",
                format!("Manifest contains required field '{field}'"),
            )
        } else {
            CheckResult::issue(
                "manifest/required-field",
                format!("Missing required field '{field}' in manifest"),
            )
        };
        push(run, r);
    }

    let background = match &manifest.background {
        None => CheckResult::issue(
            "manifest/background",
            "Missing background configuration in manifest",
        ),
        Some(Background {
            service_worker: None,
        }) => CheckResult::issue(
            "manifest/background",
            "Background should use service_worker for Manifest V3",
        ),
        Some(_) => CheckResult::passed(
            "manifest/background",
            "Background uses service_worker (correct for Manifest V3)",
        ),
    };
    push(run, background);
}

fn check_required_files(dir: &Path, manifest: Option<&Manifest>, run: &mut ValidationRun) {
    for file in REQUIRED_FILES {
        let r = if dir.join(file).exists() {
            CheckResult::passed("manifest/required-file", format!("Required file {file} exists"))
        } else {
            CheckResult::issue(
                "manifest/required-file",
                format!("Required file {file} is missing"),
            )
        };
        run.push(r.in_file(file));
    }

    let scripts = manifest
        .and_then(|m| m.content_scripts.as_deref())
        .unwrap_or_default();
    for js in scripts.iter().filter_map(|s| s.js.as_deref()).flatten() {
        let r = if dir.join(js).exists() {
            CheckResult::passed(
                "manifest/content-script-file",
                format!("Content script {js} exists"),
            )
        } else {
            CheckResult::issue(
                "manifest/content-script-file",
                format!("Content script {js} is missing"),
            )
        };
        run.push(r.in_file(js));
    }
}

fn check_permissions(manifest: &Manifest, config: &Config, run: &mut ValidationRun) {
    let push = |run: &mut ValidationRun, r: CheckResult| run.push(r.in_file(MANIFEST_FILE));

    if manifest
        .host_permissions
        .iter()
        .any(|h| config.is_broad_host(h))
    {
        push(
            run,
            CheckResult::warning(
                "manifest/broad-host-permissions",
                "Extension requests access to all URLs",
            ),
        );
    }

    for perm in &config.manifest.sensitive_permissions {
        if manifest.permissions.contains(perm) {
            push(
                run,
                CheckResult::warning(
                    "manifest/sensitive-permission",
                    format!("Extension uses sensitive permission: {perm}"),
                ),
            );
        }
    }

    let has = |p: &str| manifest.permissions.iter().any(|x| x == p);
    if has("notifications") {
        push(
            run,
            CheckResult::passed(
                "manifest/notifications-permission",
                "Notifications permission present for notification functionality",
            ),
        );
    }
    if has("storage") {
        push(
            run,
            CheckResult::passed(
                "manifest/storage-permission",
                "Storage permission present for data storage functionality",
            ),
        );
    }
}

fn check_content_scripts(manifest: Option<&Manifest>, run: &mut ValidationRun) {
    let push = |run: &mut ValidationRun, r: CheckResult| run.push(r.in_file(MANIFEST_FILE));

    let Some(scripts) = manifest.and_then(|m| m.content_scripts.as_ref()) else {
        push(
            run,
            CheckResult::warning(
                "manifest/no-content-scripts",
                "No content scripts defined in manifest",
            ),
        );
        return;
    };

    for (i, script) in scripts.iter().enumerate() {
        let n = i + 1;
        let matches = match &script.matches {
            None => CheckResult::issue(
                "manifest/content-script-matches",
                format!("Content script #{n} missing 'matches' property"),
            ),
            Some(m) if m.is_empty() => CheckResult::issue(
                "manifest/content-script-matches",
                format!("Content script #{n} has empty 'matches' array"),
            ),
            Some(_) => CheckResult::passed(
                "manifest/content-script-matches",
                format!("Content script #{n} has valid matches"),
            ),
        };
        push(run, matches);

        let js = match &script.js {
            Some(js) if !js.is_empty() => CheckResult::passed(
                "manifest/content-script-js",
                format!("Content script #{n} has JS files defined"),
            ),
            _ => CheckResult::issue(
                "manifest/content-script-js",
                format!("Content script #{n} missing 'js' property or has empty array"),
            ),
        };
        push(run, js);
    }
}

fn check_icons(dir: &Path, manifest: &Manifest, config: &Config, run: &mut ValidationRun) {
    if manifest.icons.is_empty() {
        run.push(
            CheckResult::warning("manifest/no-icons", "No icons defined in manifest")
                .in_file(MANIFEST_FILE),
        );
        return;
    }

    for (size, value) in &manifest.icons {
        let Some(icon) = value.as_str() else {
            run.push(
                CheckResult::issue(
                    "manifest/icon",
                    format!("Icon {size} has an invalid path: {value}"),
                )
                .in_file(MANIFEST_FILE),
            );
            continue;
        };

        let path = dir.join(icon);
        let r = if !path.exists() {
            CheckResult::issue("manifest/icon", format!("Icon {icon} is missing"))
        } else {
            match std::fs::metadata(&path) {
                Ok(meta) if meta.len() < config.manifest.min_icon_bytes => CheckResult::warning(
                    "manifest/icon-size",
                    format!(
                        "Icon {icon} is very small ({} bytes), might be a placeholder",
                        meta.len()
                    ),
                ),
                Ok(_) => CheckResult::passed("manifest/icon", format!("Icon {icon} exists")),
                Err(e) => {
                    CheckResult::issue("manifest/icon", format!("Error reading icon {icon}: {e}"))
                }
            }
        };
        run.push(r.in_file(icon));
    }
}

/// Rule metadata for `list-rules`.
pub fn rules() -> Vec<RuleInfo> {
    let rule = |id, on_miss, label| RuleInfo {
        id,
        validator: "structure",
        on_miss,
        label,
    };
    vec![
        rule("manifest/missing", Outcome::Issue, "manifest.json exists"),
        rule("manifest/invalid-json", Outcome::Issue, "manifest.json is valid JSON"),
        rule("manifest/version", Outcome::Issue, "manifest_version is 3"),
        rule(
            "manifest/required-field",
            Outcome::Issue,
            "name, version and description are present",
        ),
        rule(
            "manifest/background",
            Outcome::Issue,
            "background declares a service_worker",
        ),
        rule(
            "manifest/required-file",
            Outcome::Issue,
            "manifest.json, background.js, popup.html and popup.js exist",
        ),
        rule(
            "manifest/content-script-file",
            Outcome::Issue,
            "every content script file exists",
        ),
        rule(
            "manifest/broad-host-permissions",
            Outcome::Warning,
            "host permissions do not cover all URLs",
        ),
        rule(
            "manifest/sensitive-permission",
            Outcome::Warning,
            "no sensitive API permissions",
        ),
        rule(
            "manifest/no-content-scripts",
            Outcome::Warning,
            "content scripts are declared",
        ),
        rule(
            "manifest/content-script-matches",
            Outcome::Issue,
            "each content script has non-empty matches",
        ),
        rule(
            "manifest/content-script-js",
            Outcome::Issue,
            "each content script has non-empty js",
        ),
        rule("manifest/no-icons", Outcome::Warning, "icons are declared"),
        rule("manifest/icon", Outcome::Issue, "declared icon files exist"),
        rule(
            "manifest/icon-size",
            Outcome::Warning,
            "icon files are not placeholder-sized",
        ),
    ]
}
