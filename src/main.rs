use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;

use rulewatch::history::{HistoryConfig, ReportStore};
use rulewatch::monitor::whole_hours_between;
use rulewatch::{logging, validate_region, Monitor, Settings, SUPPORTED_REGIONS};

mod cli;
mod output;

use cli::{Cli, Commands, HistoryCommands};

/// Exit status for `report --check` when the region is unhealthy.
const UNHEALTHY_EXIT_CODE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(region) = cli.region {
        settings = settings.with_region(region);
    }
    if let Some(profile) = cli.profile {
        settings = settings.with_profile(profile);
    }
    if let Some(dir) = cli.history_dir {
        settings = settings.with_history_dir(dir);
    }

    match cli.command {
        Commands::Regions => {
            if cli.json {
                output::print_json(&SUPPORTED_REGIONS)?;
            } else {
                for region in SUPPORTED_REGIONS {
                    println!("{}", region);
                }
            }
        }
        Commands::Config => {
            if cli.json {
                output::print_json(&settings)?;
            } else {
                print!("{}", toml::to_string_pretty(&settings)?);
            }
        }
        Commands::Rules => {
            let monitor = Monitor::connect(&settings).await?;
            let rules = monitor.list_rules().await?;
            if cli.json {
                output::print_json(&rules)?;
            } else {
                output::print_rules(&rules);
            }
        }
        Commands::Rule { name } => {
            let monitor = Monitor::connect(&settings).await?;
            let Some(rule) = monitor.get_rule(&name).await? else {
                bail!("rule '{}' not found in {}", name, monitor.region());
            };
            let active = monitor.rule_active(&rule);
            if cli.json {
                output::print_json(&json!({ "rule": rule, "active": active }))?;
            } else {
                output::print_rule(&rule, active);
            }
        }
        Commands::Status { name } => {
            let monitor = Monitor::connect(&settings).await?;
            let Some(status) = monitor.get_evaluation_status(&name).await? else {
                bail!("no evaluation status for rule '{}'", name);
            };
            let now = chrono::Utc::now();
            let hours = status
                .last_successful_invocation_time
                .map(|last_run| whole_hours_between(last_run, now));
            if cli.json {
                output::print_json(&json!({
                    "status": status,
                    "hours_since_last_run": hours,
                }))?;
            } else {
                output::print_status(&status, hours);
            }
        }
        Commands::Compliance { name } => {
            let monitor = Monitor::connect(&settings).await?;
            let result = monitor.get_compliance(&name).await?;
            if cli.json {
                output::print_json(&json!({ "rule": name, "latest": result }))?;
            } else {
                output::print_compliance(&name, result.as_ref());
            }
        }
        Commands::Recorders => {
            let monitor = Monitor::connect(&settings).await?;
            let active = monitor.recorder_active().await?;
            if cli.json {
                output::print_json(&json!({
                    "region": monitor.region(),
                    "recorder_active": active,
                }))?;
            } else if active {
                println!("All configuration recorders in {} are recording.", monitor.region());
            } else {
                println!(
                    "One or more configuration recorders in {} are not recording successfully.",
                    monitor.region()
                );
            }
        }
        Commands::Report {
            save,
            check,
            stale_after_hours,
        } => {
            if let Some(hours) = stale_after_hours {
                settings = settings.with_stale_after_hours(hours);
            }
            let monitor = Monitor::connect(&settings).await?;
            let report = monitor.report(settings.stale_after_hours).await?;

            if save {
                let store = ReportStore::new(HistoryConfig::from(&settings))?;
                let path = store.save(&report)?;
                if !cli.json {
                    println!("Saved report to {}", path.display());
                }
            }

            if cli.json {
                output::print_json(&report)?;
            } else {
                output::print_report(&report);
            }

            if check && !report.is_healthy() {
                return Ok(ExitCode::from(UNHEALTHY_EXIT_CODE));
            }
        }
        Commands::History { command } => {
            let store = ReportStore::new(HistoryConfig::from(&settings))?;
            match command {
                HistoryCommands::Latest => {
                    let region = match &settings.region {
                        Some(region) => validate_region(region)?.to_string(),
                        None => Monitor::connect(&settings).await?.region().to_string(),
                    };
                    let Some(report) = store.latest(&region)? else {
                        bail!("no saved reports for {}", region);
                    };
                    if cli.json {
                        output::print_json(&report)?;
                    } else {
                        output::print_report(&report);
                    }
                }
                HistoryCommands::Prune => {
                    let deleted = store.enforce_retention()?;
                    if cli.json {
                        output::print_json(&json!({ "deleted": deleted }))?;
                    } else {
                        println!("Deleted {} expired report(s).", deleted);
                    }
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
