use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use log::{info, warn};
use std::path::PathBuf;

use api_parity::auth::TokenCache;
use api_parity::config::{self, DEFAULT_ENVIRONMENT, ParityConfig};
use api_parity::report;
use api_parity::scenario::{RunSummary, ScenarioOutcome, ScenarioRunner, Verdict};

use super::select_scenarios;

#[derive(Args)]
pub struct RunCommands {
    /// Environment to run against; loads `.env.<ENV>` (dev, qa, svt, uat)
    #[arg(short, long, default_value = DEFAULT_ENVIRONMENT)]
    pub env: String,

    /// Directory holding the `.env.<ENV>` files
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub env_dir: PathBuf,

    /// Use the process environment as-is without loading an env file
    #[arg(long)]
    pub no_env_file: bool,

    /// TOML file with [[scenario]] tables (defaults to the built-in suite)
    #[arg(short, long, value_name = "FILE")]
    pub scenarios: Option<PathBuf>,

    /// Only run scenarios whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Directory for the Excel report
    #[arg(long, default_value = "reports", value_name = "DIR")]
    pub report_dir: PathBuf,

    /// Do not write an Excel report
    #[arg(long)]
    pub no_report: bool,
}

/// Run the selected scenarios; returns false when any scenario failed
pub async fn handle_run_command(args: RunCommands) -> Result<bool> {
    if !args.no_env_file {
        config::load_env_file(&args.env_dir, &args.env)?;
        println!("✅ Loaded environment file: .env.{}", args.env);
    }

    let config = ParityConfig::from_env().context("Failed to load API configuration")?;
    println!(
        "🌍 Running tests in environment: {}",
        config.environment.as_deref().unwrap_or(&args.env).cyan()
    );

    let scenarios = select_scenarios(args.scenarios.as_ref(), args.filter.as_deref())?;
    if scenarios.is_empty() {
        warn!("No scenarios selected");
        println!("{}", "No scenarios match.".yellow());
        return Ok(true);
    }
    info!("Running {} scenarios", scenarios.len());

    let tokens = TokenCache::new();
    let runner = ScenarioRunner::new(&config, &tokens).context("Failed to build HTTP client")?;
    let outcomes = runner.run_all(&scenarios).await;

    println!();
    for outcome in &outcomes {
        print_outcome(outcome);
    }

    let summary = RunSummary::from_outcomes(&outcomes);
    print_summary(&summary);

    if !args.no_report {
        let path = report::write_excel_report(&args.report_dir, &outcomes)?;
        println!("📊 Excel report generated: {}", path.display().to_string().cyan());
    }

    Ok(summary.is_success())
}

fn print_outcome(outcome: &ScenarioOutcome) {
    let label = match &outcome.verdict {
        Verdict::Passed => "PASSED".bright_green().bold(),
        Verdict::Failed(_) => "FAILED".bright_red().bold(),
        Verdict::Skipped(_) => "SKIPPED".bright_yellow().bold(),
    };
    println!(
        "{} {} ({:.2}s)",
        label,
        outcome.name.bright_white(),
        outcome.duration.as_secs_f64()
    );

    if let Some(message) = outcome.verdict.message() {
        println!("    {}", message.dimmed());
    }
    if let Some(latency) = outcome.latency.filter(|l| !l.within_threshold) {
        println!(
            "    {} legacy={:.3}s gateway={:.3}s (threshold {}s)",
            "⚠️ latency drift".yellow(),
            latency.legacy_secs,
            latency.gateway_secs,
            latency.threshold
        );
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!(
        "{} passed, {} failed, {} skipped",
        summary.passed.to_string().bright_green().bold(),
        summary.failed.to_string().bright_red().bold(),
        summary.skipped.to_string().bright_yellow().bold()
    );
}
