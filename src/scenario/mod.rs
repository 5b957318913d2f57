//! Scenario definitions and the driver that runs them against both backends

pub mod model;
pub mod runner;

pub use model::{AuthMode, Scenario, builtin_scenarios, filter_scenarios, load_scenarios, parse_scenarios};
pub use runner::{RunSummary, ScenarioOutcome, ScenarioRunner, Verdict};
