//! Read-only reporting on AWS Config rules.
//!
//! rulewatch answers a handful of questions about a region's Config setup:
//! which rules exist, whether they are active and compliant, whether the
//! configuration recorders are logging, and how long ago each rule last ran.
//!
//! # Example
//!
//! ```ignore
//! use rulewatch::{Monitor, Settings};
//!
//! let settings = Settings::load(None)?.with_region("us-east-1");
//! let monitor = Monitor::connect(&settings).await?;
//!
//! for rule in monitor.list_rules().await? {
//!     let hours = monitor.hours_since_last_run(&rule).await?;
//!     println!("{} active={} last_run={:?}h", rule.name, monitor.rule_active(&rule), hours);
//! }
//! ```

pub mod error;
pub mod history;
pub mod logging;
pub mod model;
pub mod monitor;
pub mod region;
pub mod report;
pub mod service;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{MonitorError, MonitorResult};
pub use history::{HistoryConfig, ReportStore};
pub use model::{ConfigRule, EvaluationResult, RecorderStatus, RuleEvaluationStatus};
pub use monitor::Monitor;
pub use region::{validate_region, SUPPORTED_REGIONS};
pub use report::{RegionReport, RuleReport};
pub use service::{AwsConfigService, ConfigServiceApi};
pub use settings::Settings;
