use super::commands::{ListCommands, RunCommands};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "api-parity")]
#[command(version)]
#[command(about = "Compare a legacy API backend against its cloud gateway replacement")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr (truncated on each run)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run parity scenarios against both backends
    Run(RunCommands),
    /// List the scenarios that would run
    List(ListCommands),
}
