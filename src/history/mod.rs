//! Saved report snapshots.

pub mod config;
pub mod store;

pub use config::HistoryConfig;
pub use store::{HistoryError, HistoryResult, ReportStore};
