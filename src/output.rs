use colored::Colorize;
use serde::Serialize;

use rulewatch::model::{ConfigRule, EvaluationResult, RuleEvaluationStatus};
use rulewatch::report::RegionReport;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".red()
    }
}

fn hours(value: Option<i64>) -> String {
    match value {
        Some(h) => format!("{}h ago", h),
        None => "never".to_string(),
    }
}

pub fn print_rules(rules: &[ConfigRule]) {
    if rules.is_empty() {
        println!("{}", "No Config rules found.".dimmed());
        return;
    }
    for rule in rules {
        let state = rule.state.as_deref().unwrap_or("-");
        println!("{:<48} {}", rule.name.bold(), state);
    }
}

pub fn print_rule(rule: &ConfigRule, active: bool) {
    println!("{}", rule.name.bold());
    println!("  state:      {}", rule.state.as_deref().unwrap_or("-"));
    println!("  active:     {}", yes_no(active));
    if let Some(source) = &rule.source_identifier {
        println!("  source:     {}", source);
    }
    if let Some(frequency) = &rule.maximum_execution_frequency {
        println!("  frequency:  {}", frequency);
    }
    if let Some(arn) = &rule.arn {
        println!("  arn:        {}", arn.dimmed());
    }
    if let Some(description) = &rule.description {
        println!("  {}", description);
    }
}

pub fn print_status(status: &RuleEvaluationStatus, hours_since_last_run: Option<i64>) {
    println!("{}", status.rule_name.bold());
    println!("  last success: {}", hours(hours_since_last_run));
    if let Some(failed) = status.last_failed_invocation_time {
        println!("  last failure: {}", failed.to_rfc3339().red());
    }
    if let Some(code) = &status.last_error_code {
        let message = status.last_error_message.as_deref().unwrap_or("");
        println!("  last error:   {} {}", code.red(), message);
    }
}

pub fn print_compliance(rule_name: &str, result: Option<&EvaluationResult>) {
    let Some(result) = result else {
        println!("{}: {}", rule_name.bold(), "no evaluation results".dimmed());
        return;
    };

    let kind = result.compliance_type.as_deref().unwrap_or("UNKNOWN");
    let kind = if kind == rulewatch::model::COMPLIANCE_COMPLIANT {
        kind.green()
    } else {
        kind.red()
    };
    println!("{}: {}", rule_name.bold(), kind);
    if let (Some(kind), Some(id)) = (&result.resource_type, &result.resource_id) {
        println!("  resource: {} {}", kind, id);
    }
    if let Some(recorded) = result.result_recorded_time {
        println!("  recorded: {}", recorded.to_rfc3339());
    }
    if let Some(annotation) = &result.annotation {
        println!("  note:     {}", annotation);
    }
}

pub fn print_report(report: &RegionReport) {
    println!(
        "{} {} (generated {})",
        "Region".bold(),
        report.region.bold(),
        report.generated_at.to_rfc3339()
    );
    println!("  recorders active: {}", yes_no(report.recorder_active));
    println!(
        "  rules: {} total, {} active, {} compliant, {} stale",
        report.rules.len(),
        report.active_count(),
        report.compliant_count(),
        report.stale_count()
    );
    println!();
    for rule in &report.rules {
        let stale = if rule.stale {
            "stale".yellow()
        } else {
            "fresh".normal()
        };
        println!(
            "  {:<48} active={} compliant={} last_run={} {}",
            rule.name,
            yes_no(rule.active),
            yes_no(rule.compliant),
            hours(rule.hours_since_last_run),
            stale
        );
    }
}
