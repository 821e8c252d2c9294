use std::path::PathBuf;

use crate::settings::Settings;

/// Configuration for the report history store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Root directory for snapshots.
    pub dir: PathBuf,
    /// Retention period in days (0 disables retention pruning).
    pub retention_days: u64,
}

impl HistoryConfig {
    /// Create a new config with the specified directory and retention period.
    pub fn new(dir: impl Into<PathBuf>, retention_days: u64) -> Self {
        Self {
            dir: dir.into(),
            retention_days,
        }
    }
}

impl From<&Settings> for HistoryConfig {
    fn from(settings: &Settings) -> Self {
        Self::new(
            settings.history_dir.clone(),
            settings.history_retention_days,
        )
    }
}
