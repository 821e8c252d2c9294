//! Layered settings: defaults, TOML file, then `RULEWATCH_*` environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::MonitorResult;

/// Prefix for environment overrides, e.g. `RULEWATCH_REGION`.
pub const ENV_PREFIX: &str = "RULEWATCH";

/// Default age in hours after which a rule's last run is considered stale.
pub const DEFAULT_STALE_AFTER_HOURS: i64 = 24;

/// Default report history retention in days.
pub const DEFAULT_HISTORY_RETENTION_DAYS: u64 = 30;

/// Default per-operation timeout in seconds.
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 30;

const APP_DIR_NAME: &str = "rulewatch";
const CONFIG_FILE_NAME: &str = "config.toml";
const HISTORY_DIR_NAME: &str = "history";

/// Effective runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Explicit AWS region; falls back to the SDK provider chain when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Named profile from the shared AWS config files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Endpoint override, e.g. for LocalStack
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Per-operation timeout in seconds (0 = SDK default)
    pub operation_timeout_secs: u64,

    /// Hours since last successful run before a rule is reported stale
    pub stale_after_hours: i64,

    /// Directory holding saved reports
    pub history_dir: PathBuf,

    /// Days to keep saved reports (0 disables pruning)
    pub history_retention_days: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            endpoint_url: None,
            operation_timeout_secs: DEFAULT_OPERATION_TIMEOUT_SECS,
            stale_after_hours: DEFAULT_STALE_AFTER_HOURS,
            history_dir: default_history_dir(),
            history_retention_days: DEFAULT_HISTORY_RETENTION_DAYS,
        }
    }
}

impl Settings {
    /// Load settings from an optional file and the environment.
    ///
    /// A missing file at `path` is an error; a missing default file is not.
    pub fn load(path: Option<&Path>) -> MonitorResult<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::from(default_config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Set the region, replacing any configured value.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the AWS profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the stale threshold in hours.
    pub fn with_stale_after_hours(mut self, hours: i64) -> Self {
        self.stale_after_hours = hours;
        self
    }

    /// Set the history directory.
    pub fn with_history_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.history_dir = dir.into();
        self
    }

    /// Operation timeout, or `None` to keep the SDK default.
    pub fn operation_timeout(&self) -> Option<Duration> {
        if self.operation_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.operation_timeout_secs))
        }
    }
}

/// `$XDG_CONFIG_HOME/rulewatch/config.toml` or the platform equivalent.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

fn default_history_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(HISTORY_DIR_NAME)
}
