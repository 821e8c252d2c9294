//! Rule and recorder queries against a single region.
//!
//! A [`Monitor`] is bound to one region for its lifetime. Construction is the
//! only place that validates anything: the region must be on the
//! [`SUPPORTED_REGIONS`](crate::region::SUPPORTED_REGIONS) allow-list. Every
//! other failure comes straight from the underlying service.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{MonitorError, MonitorResult};
use crate::model::{
    ConfigRule, EvaluationResult, RuleEvaluationStatus, COMPLIANCE_COMPLIANT, RULE_STATE_ACTIVE,
};
use crate::region::validate_region;
use crate::report::{RegionReport, RuleReport};
use crate::service::{AwsConfigService, ConfigServiceApi};
use crate::settings::Settings;

const SECONDS_PER_HOUR: i64 = 3600;

/// Reporting handle over a Config service client.
#[derive(Debug)]
pub struct Monitor<S> {
    service: S,
    region: String,
}

impl Monitor<AwsConfigService> {
    /// Resolve AWS configuration from `settings` and build a monitor.
    ///
    /// An explicit region is checked before any SDK configuration is loaded.
    pub async fn connect(settings: &Settings) -> MonitorResult<Self> {
        if let Some(region) = &settings.region {
            validate_region(region)?;
        }
        let service = AwsConfigService::load(settings).await;
        Self::new(service)
    }
}

impl<S: ConfigServiceApi> Monitor<S> {
    /// Create a monitor, failing if the service's region is not supported.
    pub fn new(service: S) -> MonitorResult<Self> {
        let region = service
            .region()
            .ok_or(MonitorError::RegionNotConfigured)?;
        let region = validate_region(region)?.to_string();
        info!(region = %region, "monitor ready");
        Ok(Self { service, region })
    }

    /// Region this monitor reports on.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// All Config rules in the region.
    pub async fn list_rules(&self) -> MonitorResult<Vec<ConfigRule>> {
        self.service.describe_config_rules(&[]).await
    }

    /// The first rule matching `name`, if any.
    pub async fn get_rule(&self, name: &str) -> MonitorResult<Option<ConfigRule>> {
        let rules = self
            .service
            .describe_config_rules(&[name.to_string()])
            .await?;
        Ok(rules.into_iter().next())
    }

    /// Evaluation status for the rule named `name`, if any.
    pub async fn get_evaluation_status(
        &self,
        name: &str,
    ) -> MonitorResult<Option<RuleEvaluationStatus>> {
        let statuses = self
            .service
            .describe_evaluation_status(&[name.to_string()])
            .await?;
        Ok(statuses.into_iter().next())
    }

    /// The most recently recorded evaluation result for the rule.
    pub async fn get_compliance(&self, name: &str) -> MonitorResult<Option<EvaluationResult>> {
        let results = self.service.get_compliance_details(name).await?;
        Ok(latest_result(results))
    }

    /// True when every recorder is recording and last delivered successfully.
    pub async fn recorder_active(&self) -> MonitorResult<bool> {
        let recorders = self.service.describe_recorder_status().await?;
        debug!(recorders = recorders.len(), "checked recorder status");
        Ok(recorders.iter().all(|r| r.is_healthy()))
    }

    /// True when the rule's state is exactly `ACTIVE`.
    pub fn rule_active(&self, rule: &ConfigRule) -> bool {
        rule.state.as_deref() == Some(RULE_STATE_ACTIVE)
    }

    /// True when the rule's latest evaluation result is `COMPLIANT`.
    pub async fn rule_compliant(&self, rule: &ConfigRule) -> MonitorResult<bool> {
        let latest = self.get_compliance(&rule.name).await?;
        Ok(latest
            .and_then(|result| result.compliance_type)
            .is_some_and(|kind| kind == COMPLIANCE_COMPLIANT))
    }

    /// Whole hours since the rule last ran successfully, or `None` if it never has.
    pub async fn hours_since_last_run(&self, rule: &ConfigRule) -> MonitorResult<Option<i64>> {
        self.hours_since_last_run_at(rule, Utc::now()).await
    }

    /// [`hours_since_last_run`](Self::hours_since_last_run) measured against `now`.
    pub async fn hours_since_last_run_at(
        &self,
        rule: &ConfigRule,
        now: DateTime<Utc>,
    ) -> MonitorResult<Option<i64>> {
        let status = self.get_evaluation_status(&rule.name).await?;
        Ok(status
            .and_then(|s| s.last_successful_invocation_time)
            .map(|last_run| whole_hours_between(last_run, now)))
    }

    /// Evaluate every predicate for every rule in the region.
    ///
    /// Rules are queried one after another; a failure on any request aborts
    /// the report.
    pub async fn report(&self, stale_after_hours: i64) -> MonitorResult<RegionReport> {
        let generated_at = Utc::now();
        let recorder_active = self.recorder_active().await?;
        let rules = self.list_rules().await?;

        let mut rule_reports = Vec::with_capacity(rules.len());
        for rule in &rules {
            let compliant = self.rule_compliant(rule).await?;
            let hours = self.hours_since_last_run_at(rule, generated_at).await?;
            rule_reports.push(RuleReport::new(
                rule,
                self.rule_active(rule),
                compliant,
                hours,
                stale_after_hours,
            ));
        }

        let report = RegionReport::new(
            self.region.clone(),
            generated_at,
            recorder_active,
            rule_reports,
        );
        info!(
            region = %report.region,
            rules = report.rules.len(),
            compliant = report.compliant_count(),
            stale = report.stale_count(),
            "report generated"
        );
        Ok(report)
    }
}

/// `floor((now - then) / 1h)`; negative when `then` is in the future.
pub fn whole_hours_between(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_seconds().div_euclid(SECONDS_PER_HOUR)
}

// Newest by recorded time; untimed results rank lowest and ties keep
// service order.
fn latest_result(results: Vec<EvaluationResult>) -> Option<EvaluationResult> {
    let mut latest: Option<EvaluationResult> = None;
    for result in results {
        let newer = match &latest {
            None => true,
            Some(current) => result.result_recorded_time > current.result_recorded_time,
        };
        if newer {
            latest = Some(result);
        }
    }
    latest
}
