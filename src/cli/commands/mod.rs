pub mod list;
pub mod run;

pub use list::{ListCommands, handle_list_command};
pub use run::{RunCommands, handle_run_command};

use anyhow::Result;
use std::path::PathBuf;

use api_parity::scenario::{Scenario, builtin_scenarios, filter_scenarios, load_scenarios};

/// Scenarios from `file` when given, the built-in suite otherwise
pub(crate) fn select_scenarios(file: Option<&PathBuf>, filter: Option<&str>) -> Result<Vec<Scenario>> {
    let scenarios = match file {
        Some(path) => load_scenarios(path)?,
        None => builtin_scenarios(),
    };
    Ok(filter_scenarios(scenarios, filter))
}
