//! Configuration loading.
//!
//! The default configuration file is `extcheck.toml` in the current working
//! directory. Every field has a default, so the file can be omitted entirely.
//!
//! ```rust,no_run
//! use extcheck::config::Config;
//!
//! let config = Config::load(None).expect("failed to load config");
//! assert_eq!(config.manifest.min_icon_bytes, 100);
//! ```

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "extcheck.toml";

/// Main configuration.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// Extension directory used when none is given on the command line.
    pub extension_dir: PathBuf,
    /// Where and under which name the aggregated report is written.
    pub report: ReportConfig,
    /// Thresholds and lists used by the manifest validator.
    pub manifest: ManifestConfig,
}

/// Report artifact settings.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Display name used in the report title and JSON document.
    pub extension_name: String,
    /// Markdown report path. Overwritten on every run.
    pub markdown: PathBuf,
    /// JSON report path. Overwritten on every run.
    pub json: PathBuf,
}

/// Manifest validator settings.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Icons smaller than this many bytes are flagged as placeholders.
    pub min_icon_bytes: u64,
    /// API permissions that earn a warning when requested.
    pub sensitive_permissions: Vec<String>,
    /// Host patterns that grant access to every site.
    pub broad_host_permissions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            extension_dir: PathBuf::from("/app/dist"),
            report: ReportConfig::default(),
            manifest: ManifestConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            extension_name: "AutoApply".to_string(),
            markdown: PathBuf::from("extension_test_report.md"),
            json: PathBuf::from("extension_test_report.json"),
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            min_icon_bytes: 100,
            sensitive_permissions: ["tabs", "cookies", "webNavigation", "webRequest"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            broad_host_permissions: ["<all_urls>", "*://*/*", "http://*/*", "https://*/*"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try [`DEFAULT_CONFIG_FILE`] in the current directory.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// Fails when the explicit path does not exist, or when the file cannot be
    /// read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config_path = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => return Err(Error::ConfigNotFound(p.to_path_buf())),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        match config_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                let content = std::fs::read_to_string(&path).map_err(|source| {
                    Error::ConfigRead {
                        path: path.clone(),
                        source,
                    }
                })?;
                toml::from_str(&content).map_err(|source| Error::ConfigParse { path, source })
            }
            None => Ok(Config::default()),
        }
    }

    /// Returns `true` when `host` grants access to every site.
    pub fn is_broad_host(&self, host: &str) -> bool {
        self.manifest
            .broad_host_permissions
            .iter()
            .any(|b| b == host)
    }
}
