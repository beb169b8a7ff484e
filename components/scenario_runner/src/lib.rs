//! Scenario runner
//!
//! Executes caller-supplied setup/run/cleanup triples under single-flight
//! mutual exclusion, bounded by wall-clock duration, with guaranteed
//! teardown of instrumentation on every exit path. Drives the interception
//! layer and both samplers, then hands the accumulated series to the
//! analyzers and assembles the final report.

mod config;
mod report;
mod runner;

pub use config::{ScenarioConfig, ScenarioConfigBuilder};
pub use runner::{RunnerPhase, ScenarioRunner};
