//! Public API for the runtime diagnostics engine
//!
//! This module provides a simple, ergonomic API for embedding the
//! diagnostics engine into a hosting application. It wraps the lower-level
//! `scenario_runner` with a clean public interface.
//!
//! # Example
//!
//! ```no_run
//! use diagnostics_api::{Diagnostics, HostCapabilities, ScenarioConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let diagnostics = Diagnostics::new(HostCapabilities::default());
//!
//!     let scenario = ScenarioConfig::builder("idle-baseline")
//!         .description("Nothing registered; severity must stay Low")
//!         .duration_ms(5_000)
//!         .sample_interval_ms(250)
//!         .setup(|| Ok(()))
//!         .cleanup(|| Ok(()))
//!         .build()?;
//!
//!     let report = diagnostics.run_leak_scenario(scenario).await?;
//!     println!("severity: {}", report.severity);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

use std::sync::Arc;

// Re-export the types callers need to build scenarios and read reports.
pub use diag_types::{
    CompositorAdvisory, DiagnosticsError, ElementStyle, FindingKind, FrameMetrics, FrameSample,
    GradeThresholds, LeakFinding, LeakMetrics, LeakReport, LeakThresholds, PerformanceGrade,
    PerformanceReport, Result, ScenarioOutcome, Severity, Snapshot,
};
pub use host_runtime::{
    EventTarget, FrameScheduler, HeapStats, HostCapabilities, HostRuntime, Listener,
    ManualFrameScheduler, MemoryIntrospection, NodeCountProbe, StyleProbe,
};
pub use scenario_runner::{RunnerPhase, ScenarioConfig, ScenarioConfigBuilder};

use scenario_runner::ScenarioRunner;

/// Main diagnostics public API
///
/// Owns one host runtime and one scenario runner. Scenario fixtures
/// register timers and listeners through [`runtime()`](Self::runtime);
/// the run methods execute one scenario at a time and hand back a
/// structured report.
pub struct Diagnostics {
    runtime: Arc<HostRuntime>,
    runner: Arc<ScenarioRunner>,
}

impl Diagnostics {
    /// Create a diagnostics engine with the given host capabilities and
    /// default thresholds
    pub fn new(capabilities: HostCapabilities) -> Self {
        DiagnosticsBuilder::new(capabilities).build()
    }

    /// Start building an engine with non-default thresholds or a custom
    /// frame scheduler
    pub fn builder(capabilities: HostCapabilities) -> DiagnosticsBuilder {
        DiagnosticsBuilder::new(capabilities)
    }

    /// The host runtime facade scenario fixtures register through
    pub fn runtime(&self) -> &Arc<HostRuntime> {
        &self.runtime
    }

    /// Whether a scenario is currently in flight
    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    /// Run one leak scenario to completion
    ///
    /// Returns `Err(DiagnosticsError::ConcurrentInvocation)` if another
    /// scenario is already in flight; the in-flight scenario is untouched.
    pub async fn run_leak_scenario(&self, config: ScenarioConfig) -> Result<LeakReport> {
        self.runner.run_leak_scenario(config).await
    }

    /// Run one performance scenario to completion
    pub async fn run_performance_scenario(
        &self,
        config: ScenarioConfig,
    ) -> Result<PerformanceReport> {
        self.runner.run_performance_scenario(config).await
    }

    /// Run leak scenarios strictly sequentially with a cooldown between them
    pub async fn run_leak_suite(&self, configs: Vec<ScenarioConfig>) -> Result<Vec<LeakReport>> {
        self.runner.run_leak_suite(configs).await
    }

    /// Run performance scenarios strictly sequentially with a cooldown
    /// between them
    pub async fn run_performance_suite(
        &self,
        configs: Vec<ScenarioConfig>,
    ) -> Result<Vec<PerformanceReport>> {
        self.runner.run_performance_suite(configs).await
    }

    /// Request a cooperative stop of the in-flight scenario; no-op when idle
    pub fn stop(&self) {
        self.runner.stop()
    }

    /// Stop any in-flight scenario and permanently retire the engine.
    /// The original registration primitives are guaranteed restored.
    pub fn dispose(&self) {
        self.runner.dispose()
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Diagnostics`]
pub struct DiagnosticsBuilder {
    capabilities: HostCapabilities,
    leak_thresholds: LeakThresholds,
    grade_thresholds: GradeThresholds,
    expected_fps: f64,
    frame_scheduler: Option<Arc<dyn FrameScheduler>>,
}

impl DiagnosticsBuilder {
    fn new(capabilities: HostCapabilities) -> Self {
        Self {
            capabilities,
            leak_thresholds: LeakThresholds::default(),
            grade_thresholds: GradeThresholds::default(),
            expected_fps: 60.0,
            frame_scheduler: None,
        }
    }

    /// Override the leak classification thresholds
    pub fn leak_thresholds(mut self, thresholds: LeakThresholds) -> Self {
        self.leak_thresholds = thresholds;
        self
    }

    /// Override the performance grade thresholds
    pub fn grade_thresholds(mut self, thresholds: GradeThresholds) -> Self {
        self.grade_thresholds = thresholds;
        self
    }

    /// Set the target fps grades are computed against (default 60)
    pub fn expected_fps(mut self, expected_fps: f64) -> Self {
        self.expected_fps = expected_fps;
        self
    }

    /// Substitute the frame scheduler; tests drive a
    /// [`ManualFrameScheduler`] for deterministic frame series
    pub fn frame_scheduler(mut self, scheduler: Arc<dyn FrameScheduler>) -> Self {
        self.frame_scheduler = Some(scheduler);
        self
    }

    /// Build the engine
    pub fn build(self) -> Diagnostics {
        let runtime = HostRuntime::new(self.capabilities);
        let mut runner = ScenarioRunner::new(Arc::clone(&runtime))
            .with_leak_thresholds(self.leak_thresholds)
            .with_grade_thresholds(self.grade_thresholds)
            .with_expected_fps(self.expected_fps);
        if let Some(scheduler) = self.frame_scheduler {
            runner = runner.with_frame_scheduler(scheduler);
        }
        Diagnostics {
            runtime,
            runner: Arc::new(runner),
        }
    }
}
