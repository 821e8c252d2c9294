//! [`ConfigServiceApi`] backed by the official AWS SDK.

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_config::primitives::DateTime as AwsDateTime;
use aws_sdk_config::types as aws;
use aws_sdk_config::Client;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{MonitorError, MonitorResult};
use crate::model::{ConfigRule, EvaluationResult, RecorderStatus, RuleEvaluationStatus};
use crate::settings::Settings;

use super::ConfigServiceApi;

/// Config service client for a single region.
#[derive(Debug, Clone)]
pub struct AwsConfigService {
    client: Client,
    region: Option<String>,
}

impl AwsConfigService {
    /// Build from an already loaded SDK configuration.
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
            region: sdk_config.region().map(|r| r.to_string()),
        }
    }

    /// Load SDK configuration from the provider chain, overridden by settings.
    pub async fn load(settings: &Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(timeout) = settings.operation_timeout() {
            loader = loader.timeout_config(
                TimeoutConfig::builder().operation_timeout(timeout).build(),
            );
        }

        let sdk_config = loader.load().await;
        Self::new(&sdk_config)
    }
}

#[async_trait]
impl ConfigServiceApi for AwsConfigService {
    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    async fn describe_config_rules(&self, names: &[String]) -> MonitorResult<Vec<ConfigRule>> {
        debug!(count = names.len(), "DescribeConfigRules");
        let output = self
            .client
            .describe_config_rules()
            .set_config_rule_names(non_empty(names))
            .send()
            .await
            .map_err(|e| MonitorError::service("DescribeConfigRules", e))?;

        Ok(output.config_rules().iter().map(convert_rule).collect())
    }

    async fn describe_evaluation_status(
        &self,
        names: &[String],
    ) -> MonitorResult<Vec<RuleEvaluationStatus>> {
        debug!(count = names.len(), "DescribeConfigRuleEvaluationStatus");
        let output = self
            .client
            .describe_config_rule_evaluation_status()
            .set_config_rule_names(non_empty(names))
            .send()
            .await
            .map_err(|e| MonitorError::service("DescribeConfigRuleEvaluationStatus", e))?;

        Ok(output
            .config_rules_evaluation_status()
            .iter()
            .map(convert_evaluation_status)
            .collect())
    }

    async fn get_compliance_details(
        &self,
        rule_name: &str,
    ) -> MonitorResult<Vec<EvaluationResult>> {
        debug!(rule = rule_name, "GetComplianceDetailsByConfigRule");
        let output = self
            .client
            .get_compliance_details_by_config_rule()
            .config_rule_name(rule_name)
            .send()
            .await
            .map_err(|e| MonitorError::service("GetComplianceDetailsByConfigRule", e))?;

        Ok(output
            .evaluation_results()
            .iter()
            .map(convert_evaluation_result)
            .collect())
    }

    async fn describe_recorder_status(&self) -> MonitorResult<Vec<RecorderStatus>> {
        debug!("DescribeConfigurationRecorderStatus");
        let output = self
            .client
            .describe_configuration_recorder_status()
            .send()
            .await
            .map_err(|e| MonitorError::service("DescribeConfigurationRecorderStatus", e))?;

        Ok(output
            .configuration_recorders_status()
            .iter()
            .map(convert_recorder_status)
            .collect())
    }
}

fn non_empty(names: &[String]) -> Option<Vec<String>> {
    if names.is_empty() {
        None
    } else {
        Some(names.to_vec())
    }
}

fn to_chrono(value: Option<&AwsDateTime>) -> Option<DateTime<Utc>> {
    value.and_then(|dt| DateTime::<Utc>::from_timestamp(dt.secs(), dt.subsec_nanos()))
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn convert_rule(rule: &aws::ConfigRule) -> ConfigRule {
    ConfigRule {
        name: rule.config_rule_name().unwrap_or_default().to_string(),
        arn: owned(rule.config_rule_arn()),
        id: owned(rule.config_rule_id()),
        description: owned(rule.description()),
        state: rule.config_rule_state().map(|s| s.as_str().to_string()),
        source_identifier: rule.source().and_then(|s| owned(s.source_identifier())),
        maximum_execution_frequency: rule
            .maximum_execution_frequency()
            .map(|f| f.as_str().to_string()),
    }
}

fn convert_evaluation_status(status: &aws::ConfigRuleEvaluationStatus) -> RuleEvaluationStatus {
    RuleEvaluationStatus {
        rule_name: status.config_rule_name().unwrap_or_default().to_string(),
        last_successful_invocation_time: to_chrono(status.last_successful_invocation_time()),
        last_failed_invocation_time: to_chrono(status.last_failed_invocation_time()),
        first_evaluation_started: status.first_evaluation_started(),
        last_error_code: owned(status.last_error_code()),
        last_error_message: owned(status.last_error_message()),
    }
}

fn convert_evaluation_result(result: &aws::EvaluationResult) -> EvaluationResult {
    let qualifier = result
        .evaluation_result_identifier()
        .and_then(|id| id.evaluation_result_qualifier());

    EvaluationResult {
        compliance_type: result.compliance_type().map(|c| c.as_str().to_string()),
        resource_type: qualifier.and_then(|q| owned(q.resource_type())),
        resource_id: qualifier.and_then(|q| owned(q.resource_id())),
        result_recorded_time: to_chrono(result.result_recorded_time()),
        config_rule_invoked_time: to_chrono(result.config_rule_invoked_time()),
        annotation: owned(result.annotation()),
    }
}

// The SDK spells recorder status in title case ("Success"); normalize so
// comparisons are against the upper-case API constants.
fn convert_recorder_status(status: &aws::ConfigurationRecorderStatus) -> RecorderStatus {
    RecorderStatus {
        name: owned(status.name()),
        recording: status.recording(),
        last_status: status
            .last_status()
            .map(|s| s.as_str().to_ascii_uppercase()),
        last_status_change_time: to_chrono(status.last_status_change_time()),
        last_error_code: owned(status.last_error_code()),
        last_error_message: owned(status.last_error_message()),
    }
}
