mod cli;
mod config;
mod error;
mod input;
mod publish;
mod report;
mod types;

use crate::error::ToolError;
use crate::input::Strictness;
use crate::publish::transport::ReqwestTransport;
use crate::publish::IssuePublisher;
use crate::types::config::ToolConfig;
use crate::types::report::IssueReport;
use clap::Parser;
use toml::Value;
use tracing::{debug, warn};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const REJECTED: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, ToolError> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let root = std::env::current_dir()?;

    match cli.command {
        cli::Commands::Publish(cmd) => {
            let mut entries = report_overrides(&cmd.report);
            entries.extend([
                ("target", "owner", cmd.owner.map(Value::String)),
                ("target", "repo", cmd.repo.map(Value::String)),
                ("target", "api_url", cmd.api_url.map(Value::String)),
                ("http", "timeout_secs", cmd.timeout_secs.map(timeout_value)),
                (
                    "http",
                    "fail_on_reject",
                    cmd.fail_on_reject.then_some(Value::Boolean(true)),
                ),
            ]);
            let cfg = config::load_config(&root, cli.config.as_deref(), config::overrides(entries))?;
            let target = cfg.issue_target()?;

            let issue = build_report(&cfg, cli.quiet)?;

            let token = std::env::var(cfg.token_env()).unwrap_or_else(|_| {
                warn!(
                    env = cfg.token_env(),
                    "credential not set; the request will likely be refused"
                );
                String::new()
            });

            let transport = ReqwestTransport::new(cfg.timeout())?;
            let outcome = IssuePublisher::new(target, transport).publish(&issue, &token)?;
            println!("{}", outcome.summary());

            if !outcome.is_created() && cfg.fail_on_reject() {
                Ok(exit_code::REJECTED)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Preview(cmd) => {
            let entries = report_overrides(&cmd.report);
            let cfg = config::load_config(&root, cli.config.as_deref(), config::overrides(entries))?;
            let issue = build_report(&cfg, cli.quiet)?;

            match cmd.format {
                cli::PreviewFormat::Md => {
                    println!("title: {}", issue.title);
                    println!();
                    println!("{}", issue.body);
                }
                cli::PreviewFormat::Json => {
                    println!("{}", report::json::to_json(&issue)?);
                }
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

type OverrideEntry = (&'static str, &'static str, Option<Value>);

fn report_overrides(args: &cli::ReportArgs) -> Vec<OverrideEntry> {
    let policy = args.policy.map(|policy| match policy {
        cli::Policy::IncludeAll => "include-all",
        cli::Policy::ErrorsOnly => "errors-only",
    });
    vec![
        (
            "report",
            "sarif_path",
            args.sarif
                .as_ref()
                .map(|path| Value::String(path.display().to_string())),
        ),
        (
            "report",
            "policy",
            policy.map(|policy| Value::String(policy.to_string())),
        ),
        ("report", "strict", args.strict.then_some(Value::Boolean(true))),
    ]
}

/// TOML integers are signed; larger values saturate instead of wrapping.
fn timeout_value(secs: u64) -> Value {
    Value::Integer(i64::try_from(secs).unwrap_or(i64::MAX))
}

/// Reads the SARIF file, dumps it, and formats the issue.
fn build_report(cfg: &ToolConfig, quiet: bool) -> Result<IssueReport, ToolError> {
    let path = cfg.sarif_path();
    let raw = input::read_json(&path)?;
    if !quiet {
        println!("{}", input::render_json(&raw));
    }

    let strictness = if cfg.strict() {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    let document = input::validate(&path, &raw, strictness)?;
    let issue = report::format_report(&document, cfg.policy());
    debug!(title = %issue.title, body_len = issue.body.len(), "issue report built");
    Ok(issue)
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
