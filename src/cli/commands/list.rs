use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

use super::select_scenarios;

#[derive(Args)]
pub struct ListCommands {
    /// TOML file with [[scenario]] tables (defaults to the built-in suite)
    #[arg(short, long, value_name = "FILE")]
    pub scenarios: Option<PathBuf>,

    /// Only list scenarios whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

pub fn handle_list_command(args: ListCommands) -> Result<()> {
    let scenarios = select_scenarios(args.scenarios.as_ref(), args.filter.as_deref())?;

    if scenarios.is_empty() {
        println!("{}", "No scenarios match.".yellow());
        return Ok(());
    }

    for scenario in &scenarios {
        let tags = if scenario.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", scenario.tags.join(", "))
        };
        println!(
            "{} {} {:?}{}",
            scenario.name.bright_white().bold(),
            scenario.method.to_uppercase().cyan(),
            scenario.auth,
            tags.dimmed()
        );
        if !scenario.description.is_empty() {
            println!("    {}", scenario.description.dimmed());
        }
    }
    Ok(())
}
