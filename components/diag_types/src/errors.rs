//! Error taxonomy for the diagnostics engine
//!
//! Only contract violations surface to callers. Scenario-body failures
//! (setup/run/cleanup) are contained inside the runner and reported through
//! the `ScenarioOutcome` on the produced report; a missing host capability
//! degrades the affected fields to zero and never fails a run.

use thiserror::Error;

/// Errors surfaced by the diagnostics control surface
#[derive(Error, Debug)]
pub enum DiagnosticsError {
    /// A start request arrived while a scenario was not Idle.
    /// Requests are rejected synchronously, never queued.
    #[error("A scenario is already in progress")]
    ConcurrentInvocation,

    /// The supplied scenario configuration violates the contract
    #[error("Invalid scenario configuration: {0}")]
    InvalidConfiguration(String),

    /// The engine was disposed; instrumentation has been restored
    /// and no further scenarios may start.
    #[error("Diagnostics engine has been disposed")]
    Disposed,
}

/// Result type for diagnostics operations
pub type Result<T> = std::result::Result<T, DiagnosticsError>;
