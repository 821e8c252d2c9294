//! Region-wide rule report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ConfigRule;

/// Derived state of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub active: bool,
    pub compliant: bool,
    /// Whole hours since the last successful run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_since_last_run: Option<i64>,
    /// Never ran, or last ran longer ago than the stale threshold
    pub stale: bool,
}

impl RuleReport {
    pub fn new(
        rule: &ConfigRule,
        active: bool,
        compliant: bool,
        hours_since_last_run: Option<i64>,
        stale_after_hours: i64,
    ) -> Self {
        Self {
            name: rule.name.clone(),
            state: rule.state.clone(),
            active,
            compliant,
            hours_since_last_run,
            stale: is_stale(hours_since_last_run, stale_after_hours),
        }
    }
}

/// Snapshot of every rule in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionReport {
    pub region: String,
    pub generated_at: DateTime<Utc>,
    pub recorder_active: bool,
    pub rules: Vec<RuleReport>,
}

impl RegionReport {
    pub fn new(
        region: impl Into<String>,
        generated_at: DateTime<Utc>,
        recorder_active: bool,
        rules: Vec<RuleReport>,
    ) -> Self {
        Self {
            region: region.into(),
            generated_at,
            recorder_active,
            rules,
        }
    }

    pub fn active_count(&self) -> usize {
        self.rules.iter().filter(|r| r.active).count()
    }

    pub fn compliant_count(&self) -> usize {
        self.rules.iter().filter(|r| r.compliant).count()
    }

    pub fn stale_count(&self) -> usize {
        self.rules.iter().filter(|r| r.stale).count()
    }

    /// Recorders healthy and every active rule compliant and fresh.
    pub fn is_healthy(&self) -> bool {
        self.recorder_active
            && self
                .rules
                .iter()
                .filter(|r| r.active)
                .all(|r| r.compliant && !r.stale)
    }
}

/// A rule that never ran is stale; otherwise stale past the threshold.
pub fn is_stale(hours_since_last_run: Option<i64>, stale_after_hours: i64) -> bool {
    match hours_since_last_run {
        Some(hours) => hours > stale_after_hours,
        None => true,
    }
}
