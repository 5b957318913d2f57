use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::io::Write;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    info!("Starting api-parity");

    let success = match cli.command {
        Commands::Run(run_args) => cli::commands::handle_run_command(run_args).await?,
        Commands::List(list_args) => {
            cli::commands::handle_list_command(list_args)?;
            true
        }
    };

    debug!("Finished (success: {})", success);
    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// `<timestamp> [<pid>] [<LEVEL>] <target>: <message>`; RUST_LOG overrides the default level
fn init_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            std::process::id(),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = &cli.log_file {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}
