//! Access to the AWS Config API.
//!
//! [`ConfigServiceApi`] is the seam between the monitor and the SDK. Each
//! method maps onto exactly one Config API request and returns the records
//! converted into [`crate::model`] types. Pagination, retries and credentials
//! are left to the SDK.

mod aws;

use async_trait::async_trait;

use crate::error::MonitorResult;
use crate::model::{ConfigRule, EvaluationResult, RecorderStatus, RuleEvaluationStatus};

pub use aws::AwsConfigService;

/// Read-only subset of the Config service API used by rulewatch.
#[async_trait]
pub trait ConfigServiceApi: Send + Sync {
    /// Region the client is bound to, if one was resolved.
    fn region(&self) -> Option<&str>;

    /// `DescribeConfigRules`. An empty `names` slice lists every rule.
    async fn describe_config_rules(&self, names: &[String]) -> MonitorResult<Vec<ConfigRule>>;

    /// `DescribeConfigRuleEvaluationStatus`.
    async fn describe_evaluation_status(
        &self,
        names: &[String],
    ) -> MonitorResult<Vec<RuleEvaluationStatus>>;

    /// `GetComplianceDetailsByConfigRule`.
    async fn get_compliance_details(&self, rule_name: &str)
        -> MonitorResult<Vec<EvaluationResult>>;

    /// `DescribeConfigurationRecorderStatus`.
    async fn describe_recorder_status(&self) -> MonitorResult<Vec<RecorderStatus>>;
}
