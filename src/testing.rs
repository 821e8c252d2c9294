//! In-memory [`ConfigServiceApi`] for unit tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{MonitorError, MonitorResult};
use crate::model::{ConfigRule, EvaluationResult, RecorderStatus, RuleEvaluationStatus};
use crate::service::ConfigServiceApi;

#[derive(Debug, Default)]
pub struct FakeConfigService {
    region: Option<String>,
    rules: Vec<ConfigRule>,
    statuses: Vec<RuleEvaluationStatus>,
    results: HashMap<String, Vec<EvaluationResult>>,
    recorders: Vec<RecorderStatus>,
    failure: Option<String>,
}

impl FakeConfigService {
    pub fn new(region: &str) -> Self {
        Self {
            region: Some(region.to_string()),
            ..Self::default()
        }
    }

    pub fn without_region() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: ConfigRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_status(mut self, status: RuleEvaluationStatus) -> Self {
        self.statuses.push(status);
        self
    }

    pub fn with_results(mut self, rule_name: &str, results: Vec<EvaluationResult>) -> Self {
        self.results.insert(rule_name.to_string(), results);
        self
    }

    pub fn with_recorder(mut self, recorder: RecorderStatus) -> Self {
        self.recorders.push(recorder);
        self
    }

    /// Make every request fail with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    fn check(&self, operation: &'static str) -> MonitorResult<()> {
        match &self.failure {
            Some(message) => Err(MonitorError::Service {
                operation,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ConfigServiceApi for FakeConfigService {
    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    async fn describe_config_rules(&self, names: &[String]) -> MonitorResult<Vec<ConfigRule>> {
        self.check("DescribeConfigRules")?;
        Ok(self
            .rules
            .iter()
            .filter(|rule| names.is_empty() || names.contains(&rule.name))
            .cloned()
            .collect())
    }

    async fn describe_evaluation_status(
        &self,
        names: &[String],
    ) -> MonitorResult<Vec<RuleEvaluationStatus>> {
        self.check("DescribeConfigRuleEvaluationStatus")?;
        Ok(self
            .statuses
            .iter()
            .filter(|status| names.is_empty() || names.contains(&status.rule_name))
            .cloned()
            .collect())
    }

    async fn get_compliance_details(
        &self,
        rule_name: &str,
    ) -> MonitorResult<Vec<EvaluationResult>> {
        self.check("GetComplianceDetailsByConfigRule")?;
        Ok(self.results.get(rule_name).cloned().unwrap_or_default())
    }

    async fn describe_recorder_status(&self) -> MonitorResult<Vec<RecorderStatus>> {
        self.check("DescribeConfigurationRecorderStatus")?;
        Ok(self.recorders.clone())
    }
}
