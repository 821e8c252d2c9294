use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::history::config::HistoryConfig;
use crate::report::RegionReport;

const REPORT_FILE_PREFIX: &str = "report-";
const REPORT_FILE_EXT: &str = "json";

/// Errors that can occur during history storage operations.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Region name unusable as a directory name.
    #[error("Invalid region: {0:?}")]
    InvalidRegion(String),
}

/// Result type for history storage operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Report snapshots kept on the local filesystem, one directory per region.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root_dir: PathBuf,
    retention_days: u64,
}

impl ReportStore {
    /// Open (creating if needed) a store rooted at the configured directory.
    pub fn new(config: HistoryConfig) -> HistoryResult<Self> {
        fs::create_dir_all(&config.dir)?;
        Ok(Self {
            root_dir: config.dir,
            retention_days: config.retention_days,
        })
    }

    /// Write a snapshot and return its path.
    ///
    /// Snapshots generated in the same millisecond get a numeric suffix
    /// instead of replacing each other.
    pub fn save(&self, report: &RegionReport) -> HistoryResult<PathBuf> {
        let region_dir = self.region_dir(&report.region)?;
        fs::create_dir_all(&region_dir)?;

        let stem = format!(
            "{}{}",
            REPORT_FILE_PREFIX,
            report.generated_at.timestamp_millis()
        );
        let path = unused_snapshot_path(&region_dir, &stem);
        let temp_path = path.with_extension(format!("{}.tmp", REPORT_FILE_EXT));

        let json = serde_json::to_string_pretty(report)?;
        write_atomically(&temp_path, &path, json.as_bytes())?;

        debug!(path = %path.display(), "saved report");
        Ok(path)
    }

    /// All snapshots for a region, oldest first.
    pub fn list(&self, region: &str) -> HistoryResult<Vec<RegionReport>> {
        let region_dir = self.region_dir(region)?;
        let mut reports = Vec::new();
        for path in snapshot_paths(&region_dir)? {
            if let Some(report) = read_report(&path)? {
                reports.push(report);
            }
        }
        reports.sort_by_key(|r| r.generated_at);
        Ok(reports)
    }

    /// Most recent snapshot for a region.
    pub fn latest(&self, region: &str) -> HistoryResult<Option<RegionReport>> {
        Ok(self.list(region)?.pop())
    }

    /// Apply retention rules and delete expired snapshots in every region.
    pub fn enforce_retention(&self) -> HistoryResult<usize> {
        if self.retention_days == 0 {
            return Ok(0);
        }

        let Some(cutoff) = retention_cutoff(Utc::now(), self.retention_days) else {
            return Ok(0);
        };
        let mut deleted = 0;

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            for path in snapshot_paths(&entry.path())? {
                let Some(report) = read_report(&path)? else {
                    continue;
                };
                if report.generated_at < cutoff {
                    fs::remove_file(&path)?;
                    deleted += 1;
                }
            }
        }

        Ok(deleted)
    }

    /// Get the history root directory path.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn region_dir(&self, region: &str) -> HistoryResult<PathBuf> {
        let usable = !region.is_empty()
            && region
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !usable {
            return Err(HistoryError::InvalidRegion(region.to_string()));
        }
        Ok(self.root_dir.join(region))
    }
}

/// Oldest timestamp kept by a retention window, or `None` when the window
/// reaches past the representable range and nothing can expire.
fn retention_cutoff(now: DateTime<Utc>, retention_days: u64) -> Option<DateTime<Utc>> {
    let days = i64::try_from(retention_days).ok()?;
    now.checked_sub_signed(Duration::try_days(days)?)
}

fn unused_snapshot_path(region_dir: &Path, stem: &str) -> PathBuf {
    let mut path = region_dir.join(format!("{}.{}", stem, REPORT_FILE_EXT));
    let mut suffix = 1u32;
    while path.exists() {
        path = region_dir.join(format!("{}-{}.{}", stem, suffix, REPORT_FILE_EXT));
        suffix += 1;
    }
    path
}

// Write to `temp_path` then rename over `path`; the temp file never outlives
// a failed write.
fn write_atomically(temp_path: &Path, path: &Path, contents: &[u8]) -> HistoryResult<()> {
    let result = (|| -> io::Result<()> {
        let mut file = fs::File::create(temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(temp_path, path)
    })();

    if let Err(err) = result {
        let _ = fs::remove_file(temp_path);
        return Err(HistoryError::Io(err));
    }
    Ok(())
}

fn snapshot_paths(dir: &Path) -> HistoryResult<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(HistoryError::Io(err)),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_snapshot = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(REPORT_FILE_PREFIX))
            && path.extension().and_then(|e| e.to_str()) == Some(REPORT_FILE_EXT);
        if is_snapshot {
            paths.push(path);
        }
    }
    Ok(paths)
}

fn read_report(path: &Path) -> HistoryResult<Option<RegionReport>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(HistoryError::Io(err)),
    };
    match serde_json::from_str(&content) {
        Ok(report) => Ok(Some(report)),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable snapshot");
            Ok(None)
        }
    }
}
