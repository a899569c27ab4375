use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sarif-issue",
    version,
    about = "File a GitHub issue summarizing SARIF scan results"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file to use instead of ./sarif-issue.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format the SARIF results and create one issue
    Publish(PublishCommand),
    /// Format the SARIF results and print the issue without creating it
    Preview(PreviewCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Policy {
    IncludeAll,
    ErrorsOnly,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PreviewFormat {
    Md,
    Json,
}

#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    /// SARIF file to read
    #[arg(long)]
    pub sarif: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub policy: Option<Policy>,
    /// Reject documents missing runs, results, ruleId or message text
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct PublishCommand {
    #[command(flatten)]
    pub report: ReportArgs,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub repo: Option<String>,
    #[arg(long)]
    pub api_url: Option<String>,
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Exit with code 1 when the tracker refuses the issue
    #[arg(long)]
    pub fail_on_reject: bool,
}

#[derive(Args)]
pub struct PreviewCommand {
    #[command(flatten)]
    pub report: ReportArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: PreviewFormat,
}
