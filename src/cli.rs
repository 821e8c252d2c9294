use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "rulewatch",
    version,
    about = "Report on AWS Config rule state, recorder health and evaluation freshness"
)]
pub struct Cli {
    #[arg(long, global = true, help = "AWS region (overrides config and AWS_REGION)")]
    pub region: Option<String>,
    #[arg(long, global = true, help = "Named AWS profile")]
    pub profile: Option<String>,
    #[arg(long, global = true, help = "Path to a TOML settings file")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Directory for saved reports")]
    pub history_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the regions rulewatch supports
    Regions,
    /// Print the effective settings
    Config,
    /// List every Config rule in the region
    Rules,
    /// Show a single rule
    Rule { name: String },
    /// Show a rule's evaluation status and hours since its last run
    Status { name: String },
    /// Show a rule's most recent evaluation result
    Compliance { name: String },
    /// Check that every configuration recorder is healthy
    Recorders,
    /// Evaluate every rule in the region
    Report {
        #[arg(long, help = "Save the report to history")]
        save: bool,
        #[arg(long, help = "Exit with status 2 when the region is unhealthy")]
        check: bool,
        #[arg(long, help = "Override the stale threshold in hours")]
        stale_after_hours: Option<i64>,
    },
    /// Inspect saved reports
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Show the most recent saved report for the region
    Latest,
    /// Delete saved reports older than the retention window
    Prune,
}
