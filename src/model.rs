//! Records returned by AWS Config, trimmed to the fields rulewatch reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rule state reported for a rule that is evaluating normally.
pub const RULE_STATE_ACTIVE: &str = "ACTIVE";

/// Compliance type for a passing evaluation.
pub const COMPLIANCE_COMPLIANT: &str = "COMPLIANT";

/// Recorder status for a recorder whose last delivery succeeded.
pub const RECORDER_STATUS_SUCCESS: &str = "SUCCESS";

/// A Config rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRule {
    /// Rule name
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw rule state, e.g. "ACTIVE" or "DELETING"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Managed rule identifier or Lambda ARN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_identifier: Option<String>,
    /// Periodic trigger frequency, e.g. "TwentyFour_Hours"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_execution_frequency: Option<String>,
}

impl ConfigRule {
    /// Create a rule with only a name and state set.
    pub fn new(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: None,
            id: None,
            description: None,
            state: Some(state.into()),
            source_identifier: None,
            maximum_execution_frequency: None,
        }
    }
}

/// Evaluation bookkeeping for a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEvaluationStatus {
    pub rule_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_successful_invocation_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_failed_invocation_time: Option<DateTime<Utc>>,
    pub first_evaluation_started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error_message: Option<String>,
}

impl RuleEvaluationStatus {
    /// Create a status for a rule that has not started evaluating.
    pub fn new(rule_name: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
            last_successful_invocation_time: None,
            last_failed_invocation_time: None,
            first_evaluation_started: false,
            last_error_code: None,
            last_error_message: None,
        }
    }

    /// Set the last successful invocation time, marking evaluation as started.
    pub fn with_last_success(mut self, at: DateTime<Utc>) -> Self {
        self.last_successful_invocation_time = Some(at);
        self.first_evaluation_started = true;
        self
    }
}

/// One compliance evaluation of one resource against a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Raw compliance type, e.g. "COMPLIANT" or "NON_COMPLIANT"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_recorded_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_rule_invoked_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl EvaluationResult {
    /// Create a result carrying only its compliance type.
    pub fn new(compliance_type: impl Into<String>) -> Self {
        Self {
            compliance_type: Some(compliance_type.into()),
            resource_type: None,
            resource_id: None,
            result_recorded_time: None,
            config_rule_invoked_time: None,
            annotation: None,
        }
    }

    /// Set the time the result was recorded.
    pub fn recorded_at(mut self, at: DateTime<Utc>) -> Self {
        self.result_recorded_time = Some(at);
        self
    }

    /// Set the evaluated resource's type and ID.
    pub fn for_resource(mut self, resource_type: &str, resource_id: &str) -> Self {
        self.resource_type = Some(resource_type.to_string());
        self.resource_id = Some(resource_id.to_string());
        self
    }
}

/// Status of a configuration recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub recording: bool,
    /// Upper-cased last delivery status: "PENDING", "SUCCESS" or "FAILURE"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status_change_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error_message: Option<String>,
}

impl RecorderStatus {
    /// Create a named recorder status without timestamps or errors.
    pub fn new(name: impl Into<String>, recording: bool, last_status: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            recording,
            last_status: Some(last_status.into()),
            last_status_change_time: None,
            last_error_code: None,
            last_error_message: None,
        }
    }

    /// Whether this recorder is recording and its last delivery succeeded.
    pub fn is_healthy(&self) -> bool {
        self.recording && self.last_status.as_deref() == Some(RECORDER_STATUS_SUCCESS)
    }
}
