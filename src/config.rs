//! Run settings
//!
//! Settings are resolved in three layers, later ones winning:
//! 1. Built-in defaults
//! 2. A TOML config file (`--config <PATH>`, or `reqbump.toml` next to the manifest)
//! 3. Command-line flags

use crate::coordinator::DEFAULT_CONCURRENCY;
use crate::error::ConfigError;
use crate::manifest::DEFAULT_MANIFEST;
use crate::registry::{DEFAULT_INDEX_URL, DEFAULT_RETRIES, DEFAULT_TIMEOUT};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Config file looked up next to the manifest
pub const CONFIG_FILE_NAME: &str = "reqbump.toml";

/// Contents of a config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Manifest path, relative to the config file's directory
    pub manifest: Option<PathBuf>,
    /// Whether to write `<manifest>.bak` before rewriting
    pub backup: Option<bool>,
    /// Base URL of the package index
    pub index_url: Option<String>,
    /// Maximum concurrent registry requests
    pub concurrency: Option<usize>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Retry attempts after a failed request
    pub retries: Option<u32>,
}

impl FileConfig {
    /// Parse config file content
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::from_toml(path, &content)
    }

    /// Load a config file if it exists
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub manifest: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_backup: bool,
    pub dry_run: bool,
    pub index_url: Option<String>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Manifest to update
    pub manifest: PathBuf,
    /// Write a backup before rewriting
    pub backup: bool,
    /// Report without writing
    pub dry_run: bool,
    /// Base URL of the package index
    pub index_url: String,
    /// Maximum concurrent registry requests
    pub concurrency: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry attempts after a failed request
    pub retries: u32,
    /// Config file that contributed to these settings, if any
    pub config_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            backup: true,
            dry_run: false,
            index_url: DEFAULT_INDEX_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            config_file: None,
        }
    }
}

impl Settings {
    /// Settings for a manifest with every other value at its default
    pub fn for_manifest(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            ..Self::default()
        }
    }

    /// Resolve settings from defaults, the config file and CLI overrides
    pub fn resolve(overrides: &Overrides) -> Result<Self, ConfigError> {
        let (config_path, file) = match &overrides.config {
            Some(path) => (Some(path.clone()), Some(FileConfig::load(path)?)),
            None => {
                let manifest = overrides
                    .manifest
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));
                let path = config_dir(&manifest).join(CONFIG_FILE_NAME);
                match FileConfig::load_optional(&path)? {
                    Some(file) => (Some(path), Some(file)),
                    None => (None, None),
                }
            }
        };

        if let Some(path) = &config_path {
            debug!("Using config file {}", path.display());
        }

        let mut settings = Self::default();
        if let (Some(path), Some(file)) = (&config_path, file) {
            settings.merge_file(path, file);
        }
        settings.merge_overrides(overrides);
        settings.validate()?;

        Ok(settings)
    }

    fn merge_file(&mut self, path: &Path, file: FileConfig) {
        if let Some(manifest) = file.manifest {
            self.manifest = config_dir(path).join(manifest);
        }
        if let Some(backup) = file.backup {
            self.backup = backup;
        }
        if let Some(index_url) = file.index_url {
            self.index_url = index_url;
        }
        if let Some(concurrency) = file.concurrency {
            self.concurrency = concurrency;
        }
        if let Some(timeout_secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(timeout_secs);
        }
        if let Some(retries) = file.retries {
            self.retries = retries;
        }
        self.config_file = Some(path.to_path_buf());
    }

    fn merge_overrides(&mut self, overrides: &Overrides) {
        if let Some(manifest) = &overrides.manifest {
            self.manifest = manifest.clone();
        }
        if overrides.no_backup {
            self.backup = false;
        }
        self.dry_run = overrides.dry_run;
        if let Some(index_url) = &overrides.index_url {
            self.index_url = index_url.clone();
        }
        if let Some(concurrency) = overrides.concurrency {
            self.concurrency = concurrency;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout = Duration::from_secs(timeout_secs);
        }
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::invalid_value(
                "concurrency",
                "must be at least 1",
            ));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::invalid_value(
                "timeout_secs",
                "must be at least 1",
            ));
        }
        if !(self.index_url.starts_with("http://") || self.index_url.starts_with("https://")) {
            return Err(ConfigError::invalid_value(
                "index_url",
                format!("'{}' is not an http(s) URL", self.index_url),
            ));
        }
        if self.manifest.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value("manifest", "must not be empty"));
        }
        Ok(())
    }
}

/// Directory holding `path`, `.` for bare file names
fn config_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
