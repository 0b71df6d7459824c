//! Configuration file for the `tables-audit` command.
//!
//! ```toml
//! [rules]
//! operating_hours_exceptions = ["TABLE-937", "TABLE-940"]
//! exception_match = "exact"        # or "containment"
//! valid_timezones = ["RIX", "CET", "UK", "PST", "GET", "EDT"]
//! timezone_match = "containment"   # or "exact"
//! schedule_match = "prefix"        # or "full"
//!
//! [paths]
//! snapshot = "data/operating_tables.json"
//! report = "data/tables_with_problems.json"
//!
//! [jira]
//! url = "https://jira.example.com"
//! username = "table-audit"
//! password_env = "TABLES_AUDIT_JIRA_PASSWORD"
//!
//! [slack]
//! webhook_url = "https://hooks.slack.com/services/..."
//! tracker_url = "https://jira.example.com/browse"
//! ```
//!
//! Every section and key is optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tables_notify::SlackConfig;
use tables_store::{DEFAULT_REPORT_PATH, DEFAULT_SNAPSHOT_PATH, JiraConfig};
use tables_validate::AuditConfig;
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "tables-audit.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Snapshot and report locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub snapshot: PathBuf,
    pub report: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            report: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

/// Whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rules: AuditConfig,
    pub paths: PathsConfig,
    pub jira: JiraConfig,
    pub slack: SlackConfig,
}

/// Load the configuration at `path`.
///
/// A missing file yields the defaults unless `required` is set; a file that
/// exists but cannot be read or parsed is always an error.
pub fn load_config(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            tracing::info!(path = %path.display(), "no config file found, using defaults");
            Ok(AppConfig::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
