//! Scenario configuration
//!
//! Callers describe a test case as a setup/run/cleanup triple plus timing.
//! setup and cleanup are synchronous; run may represent a pending
//! operation and is therefore async. An `Err` from any callback is the
//! contained-failure path — the runner logs it and keeps its guarantees.

use futures::future::BoxFuture;
use futures::FutureExt;

use diag_types::{DiagnosticsError, Result};

/// Synchronous scenario callback (setup/cleanup)
pub type SyncCallback = Box<dyn FnMut() -> anyhow::Result<()> + Send>;

/// Async scenario body
pub type RunCallback = Box<dyn FnMut() -> BoxFuture<'static, anyhow::Result<()>> + Send>;

/// A configured leak/performance test case
pub struct ScenarioConfig {
    /// Scenario name, echoed into the report
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Overall wall-clock window for the whole run (ms)
    pub duration_ms: u64,
    /// Snapshot cadence (ms)
    pub sample_interval_ms: u64,
    /// How many times to invoke `run()` sequentially
    pub iterations: u32,
    pub(crate) setup: SyncCallback,
    pub(crate) run: Option<RunCallback>,
    pub(crate) cleanup: SyncCallback,
}

impl ScenarioConfig {
    /// Start building a scenario with the given name
    pub fn builder(name: impl Into<String>) -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::new(name)
    }
}

impl std::fmt::Debug for ScenarioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioConfig")
            .field("name", &self.name)
            .field("duration_ms", &self.duration_ms)
            .field("sample_interval_ms", &self.sample_interval_ms)
            .field("iterations", &self.iterations)
            .field("has_run", &self.run.is_some())
            .finish()
    }
}

/// Builder for [`ScenarioConfig`]
pub struct ScenarioConfigBuilder {
    name: String,
    description: String,
    duration_ms: u64,
    sample_interval_ms: u64,
    iterations: u32,
    setup: Option<SyncCallback>,
    run: Option<RunCallback>,
    cleanup: Option<SyncCallback>,
}

impl ScenarioConfigBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            duration_ms: 10_000,
            sample_interval_ms: 500,
            iterations: 1,
            setup: None,
            run: None,
            cleanup: None,
        }
    }

    /// Set the scenario description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the overall run window in milliseconds
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the snapshot cadence in milliseconds
    pub fn sample_interval_ms(mut self, sample_interval_ms: u64) -> Self {
        self.sample_interval_ms = sample_interval_ms;
        self
    }

    /// Set how many times `run()` executes sequentially
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Required synchronous setup callback
    pub fn setup(mut self, setup: impl FnMut() -> anyhow::Result<()> + Send + 'static) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Optional async scenario body
    pub fn run<F, Fut>(mut self, mut run: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.run = Some(Box::new(move || run().boxed()));
        self
    }

    /// Required synchronous cleanup callback (assumed idempotent/defensive)
    pub fn cleanup(mut self, cleanup: impl FnMut() -> anyhow::Result<()> + Send + 'static) -> Self {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ScenarioConfig> {
        if self.name.trim().is_empty() {
            return Err(DiagnosticsError::InvalidConfiguration(
                "name must not be empty".to_string(),
            ));
        }
        if self.duration_ms == 0 {
            return Err(DiagnosticsError::InvalidConfiguration(
                "durationMs must be > 0".to_string(),
            ));
        }
        if self.sample_interval_ms == 0 {
            return Err(DiagnosticsError::InvalidConfiguration(
                "sampleIntervalMs must be > 0".to_string(),
            ));
        }
        if self.iterations == 0 {
            return Err(DiagnosticsError::InvalidConfiguration(
                "iterations must be >= 1".to_string(),
            ));
        }
        let setup = self.setup.ok_or_else(|| {
            DiagnosticsError::InvalidConfiguration("setup() is required".to_string())
        })?;
        let cleanup = self.cleanup.ok_or_else(|| {
            DiagnosticsError::InvalidConfiguration("cleanup() is required".to_string())
        })?;

        Ok(ScenarioConfig {
            name: self.name,
            description: self.description,
            duration_ms: self.duration_ms,
            sample_interval_ms: self.sample_interval_ms,
            iterations: self.iterations,
            setup,
            run: self.run,
            cleanup,
        })
    }
}
