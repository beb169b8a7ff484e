//! The scenario runner state machine
//!
//! Idle → Armed (setup) → Running (run, samplers active) → Finalizing
//! (cleanup, teardown) → Idle. Entry to Armed requires Idle; a start
//! request while not Idle is rejected synchronously. Instrumentation is
//! restored on every exit path — success, failure, external stop, or
//! dispose.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, error, info};

use analyzers::{analyze_leaks, analyze_performance, scan_compositor_hints};
use diag_types::{
    DiagnosticsError, GradeThresholds, LeakReport, LeakThresholds, PerformanceReport,
    RegistryDump, Result, ScenarioOutcome,
};
use host_runtime::{FrameScheduler, HostRuntime, IntervalFrameScheduler};
use interception::{InstrumentationSession, ResourceRegistry};
use samplers::{FrameSampler, FrameSamplerConfig, SamplerHandle, SeriesCollector, SnapshotSampler};

use crate::config::ScenarioConfig;
use crate::report::{build_leak_report, build_performance_report};

/// Cooldown between sequential `run()` iterations (ms)
const ITERATION_COOLDOWN_MS: u64 = 100;
/// Mandatory cooldown between scenarios of a batch (ms)
const SUITE_COOLDOWN_MS: u64 = 500;

/// Phase of the runner state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerPhase {
    /// No scenario in flight
    Idle,
    /// Instrumentation installed, setup executing
    Armed,
    /// Scenario body executing with samplers active
    Running,
    /// Cleanup and teardown in progress
    Finalizing,
}

enum DriveExit {
    BodyDone,
    DeadlineElapsed,
    Stopped,
}

/// Executes scenarios under single-flight mutual exclusion
///
/// Construct one instance in the hosting application and share it by
/// reference; there is no hidden module-level global.
pub struct ScenarioRunner {
    runtime: Arc<HostRuntime>,
    registry: Arc<ResourceRegistry>,
    session: InstrumentationSession,
    phase: Mutex<RunnerPhase>,
    stop: Mutex<watch::Sender<bool>>,
    disposed: AtomicBool,
    leak_thresholds: LeakThresholds,
    grade_thresholds: GradeThresholds,
    frame_scheduler: Arc<dyn FrameScheduler>,
    frame_sampler_config: FrameSamplerConfig,
    expected_fps: f64,
}

impl ScenarioRunner {
    /// Create a runner over the given host runtime with default
    /// thresholds and a 60Hz frame scheduler
    pub fn new(runtime: Arc<HostRuntime>) -> Self {
        let registry = Arc::new(ResourceRegistry::new());
        let session = InstrumentationSession::new(Arc::clone(&runtime), Arc::clone(&registry));
        let (stop_tx, _) = watch::channel(false);
        let frame_scheduler = Arc::new(IntervalFrameScheduler::new(60.0, runtime.clock()));
        Self {
            runtime,
            registry,
            session,
            phase: Mutex::new(RunnerPhase::Idle),
            stop: Mutex::new(stop_tx),
            disposed: AtomicBool::new(false),
            leak_thresholds: LeakThresholds::default(),
            grade_thresholds: GradeThresholds::default(),
            frame_scheduler,
            frame_sampler_config: FrameSamplerConfig {
                capture_memory: false,
                ..Default::default()
            },
            expected_fps: 60.0,
        }
    }

    /// Override the leak classification thresholds
    pub fn with_leak_thresholds(mut self, thresholds: LeakThresholds) -> Self {
        self.leak_thresholds = thresholds;
        self
    }

    /// Override the grade thresholds
    pub fn with_grade_thresholds(mut self, thresholds: GradeThresholds) -> Self {
        self.grade_thresholds = thresholds;
        self
    }

    /// Substitute the frame scheduler (tests drive a manual one)
    pub fn with_frame_scheduler(mut self, scheduler: Arc<dyn FrameScheduler>) -> Self {
        self.frame_scheduler = scheduler;
        self
    }

    /// Override the frame sampler options
    pub fn with_frame_sampler_config(mut self, config: FrameSamplerConfig) -> Self {
        self.frame_sampler_config = config;
        self
    }

    /// Set the target fps grades are computed against (default 60)
    pub fn with_expected_fps(mut self, expected_fps: f64) -> Self {
        self.expected_fps = expected_fps;
        self
    }

    /// Current phase of the state machine
    pub fn phase(&self) -> RunnerPhase {
        *self.phase.lock()
    }

    /// Whether a scenario is currently in flight
    pub fn is_running(&self) -> bool {
        self.phase() != RunnerPhase::Idle
    }

    /// Request a cooperative stop of the in-flight scenario.
    /// No-op when idle; cannot interrupt code already executing in a turn.
    pub fn stop(&self) {
        // Held across the send so the signal always lands on the channel
        // belonging to the phase we observed.
        let phase = self.phase.lock();
        if *phase == RunnerPhase::Idle {
            return;
        }
        info!("external stop requested");
        let _ = self.stop.lock().send(true);
    }

    /// Stop any in-flight scenario and guarantee the original primitives
    /// are restored. The runner accepts no further scenarios afterwards.
    pub fn dispose(&self) {
        info!("disposing scenario runner");
        self.disposed.store(true, Ordering::SeqCst);
        self.stop();
        self.session.uninstall();
    }

    /// Enter Armed: single-flight gate, fresh stop channel, instrumentation
    /// installed. Rejection leaves any in-flight scenario untouched.
    fn begin(&self, name: &str) -> Result<watch::Receiver<bool>> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(DiagnosticsError::Disposed);
        }
        let (stop_tx, stop_rx) = watch::channel(false);
        {
            // The fresh channel must be installed in the same critical
            // section that leaves Idle, or a stop request arriving in
            // between would land on the previous run's sender.
            let mut phase = self.phase.lock();
            if *phase != RunnerPhase::Idle {
                return Err(DiagnosticsError::ConcurrentInvocation);
            }
            *phase = RunnerPhase::Armed;
            *self.stop.lock() = stop_tx;
        }
        self.registry.reset();
        self.session.install();
        info!(name, "scenario armed");
        Ok(stop_rx)
    }

    /// Execute the scenario body: `iterations` sequential `run()` calls
    /// with a short cooldown, racing the overall duration window and the
    /// stop signal. If the window elapses mid-iteration, the in-flight
    /// iteration is truncated.
    async fn drive(
        &self,
        config: &mut ScenarioConfig,
        mut stop_rx: watch::Receiver<bool>,
    ) -> ScenarioOutcome {
        *self.phase.lock() = RunnerPhase::Running;

        let deadline = tokio::time::sleep(Duration::from_millis(config.duration_ms));
        tokio::pin!(deadline);

        let iterations = config.iterations;
        let name = config.name.clone();
        let mut failed = false;

        let exit = {
            let body = async {
                if let Some(run) = config.run.as_mut() {
                    for iteration in 0..iterations {
                        if let Err(e) = run().await {
                            error!(name = %name, iteration, "run() failed: {e:#}");
                            failed = true;
                        }
                        if iteration + 1 < iterations {
                            tokio::time::sleep(Duration::from_millis(ITERATION_COOLDOWN_MS))
                                .await;
                        }
                    }
                }
            };
            tokio::pin!(body);
            tokio::select! {
                _ = &mut body => DriveExit::BodyDone,
                _ = &mut deadline => DriveExit::DeadlineElapsed,
                _ = stop_rx.changed() => DriveExit::Stopped,
            }
        };

        match exit {
            DriveExit::BodyDone => {
                // The body finished early; the duration window still
                // governs the run so the samplers keep observing.
                let stopped = tokio::select! {
                    _ = &mut deadline => false,
                    _ = stop_rx.changed() => true,
                };
                if failed {
                    ScenarioOutcome::RunFailed
                } else if stopped {
                    ScenarioOutcome::Stopped
                } else {
                    ScenarioOutcome::Completed
                }
            }
            DriveExit::DeadlineElapsed => {
                debug!(name = %name, "duration elapsed, truncating in-flight iteration");
                if failed {
                    ScenarioOutcome::RunFailed
                } else {
                    ScenarioOutcome::Completed
                }
            }
            DriveExit::Stopped => {
                if failed {
                    ScenarioOutcome::RunFailed
                } else {
                    ScenarioOutcome::Stopped
                }
            }
        }
    }

    /// Finalize: stop samplers, run cleanup exactly once, capture the
    /// final registry state, restore the primitives, return to Idle.
    async fn finalize(
        &self,
        config: &mut ScenarioConfig,
        handles: Vec<SamplerHandle>,
    ) -> RegistryDump {
        *self.phase.lock() = RunnerPhase::Finalizing;
        for handle in handles {
            handle.stop().await;
        }
        if let Err(e) = (config.cleanup)() {
            error!(name = %config.name, "cleanup failed: {e:#}");
        }
        let dump = self.registry.dump();
        self.session.uninstall();
        self.registry.reset();
        *self.phase.lock() = RunnerPhase::Idle;
        debug!(name = %config.name, "scenario finalized");
        dump
    }

    /// Run one leak scenario to completion and produce its report
    pub async fn run_leak_scenario(&self, mut config: ScenarioConfig) -> Result<LeakReport> {
        let stop_rx = self.begin(&config.name)?;
        let clock = self.runtime.clock();
        let started_ms = clock.now_ms();

        if let Err(e) = (config.setup)() {
            error!(name = %config.name, "setup failed: {e:#}");
            let dump = self.finalize(&mut config, Vec::new()).await;
            let analysis = analyze_leaks(&[], &dump, &self.leak_thresholds);
            return Ok(build_leak_report(
                &config.name,
                &config.description,
                clock.now_ms() - started_ms,
                ScenarioOutcome::SetupFailed,
                Vec::new(),
                analysis,
            ));
        }

        let collector = Arc::new(SeriesCollector::new());
        let sampler = SnapshotSampler::spawn(
            config.sample_interval_ms,
            Arc::clone(&collector),
            Arc::clone(&self.registry),
            self.runtime.capabilities().clone(),
            clock,
            started_ms,
        );

        let outcome = self.drive(&mut config, stop_rx).await;
        let dump = self.finalize(&mut config, vec![sampler]).await;

        let snapshots = collector.snapshots();
        let analysis = analyze_leaks(&snapshots, &dump, &self.leak_thresholds);
        info!(name = %config.name, severity = %analysis.severity, %outcome, "leak scenario finished");
        Ok(build_leak_report(
            &config.name,
            &config.description,
            clock.now_ms() - started_ms,
            outcome,
            snapshots,
            analysis,
        ))
    }

    /// Run one performance scenario to completion and produce its report
    pub async fn run_performance_scenario(
        &self,
        mut config: ScenarioConfig,
    ) -> Result<PerformanceReport> {
        let stop_rx = self.begin(&config.name)?;
        let clock = self.runtime.clock();
        let started_ms = clock.now_ms();

        if let Err(e) = (config.setup)() {
            error!(name = %config.name, "setup failed: {e:#}");
            let _ = self.finalize(&mut config, Vec::new()).await;
            let analysis = analyze_performance(&[], self.expected_fps, &self.grade_thresholds);
            return Ok(build_performance_report(
                &config.name,
                &config.description,
                clock.now_ms() - started_ms,
                ScenarioOutcome::SetupFailed,
                Vec::new(),
                Vec::new(),
                self.expected_fps,
                analysis,
                Vec::new(),
            ));
        }

        let collector = Arc::new(SeriesCollector::new());
        let snapshot_sampler = SnapshotSampler::spawn(
            config.sample_interval_ms,
            Arc::clone(&collector),
            Arc::clone(&self.registry),
            self.runtime.capabilities().clone(),
            clock,
            started_ms,
        );
        let frame_sampler = FrameSampler::spawn(
            Arc::clone(&self.frame_scheduler),
            self.frame_sampler_config.clone(),
            Arc::clone(&collector),
            Arc::clone(&self.registry),
            self.runtime.capabilities().clone(),
            clock,
            started_ms,
        );

        let outcome = self.drive(&mut config, stop_rx).await;
        let _ = self
            .finalize(&mut config, vec![snapshot_sampler, frame_sampler])
            .await;

        let frames = collector.frames();
        let mut snapshots = collector.snapshots();
        // Two sampler tasks may interleave joint snapshots; the series
        // handed to callers stays time-ordered.
        snapshots.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        let analysis = analyze_performance(&frames, self.expected_fps, &self.grade_thresholds);
        let advisories = self
            .runtime
            .capabilities()
            .style_probe
            .as_ref()
            .map(|probe| scan_compositor_hints(&probe.computed_styles()))
            .unwrap_or_default();

        info!(name = %config.name, grade = %analysis.grade, %outcome, "performance scenario finished");
        Ok(build_performance_report(
            &config.name,
            &config.description,
            clock.now_ms() - started_ms,
            outcome,
            frames,
            snapshots,
            self.expected_fps,
            analysis,
            advisories,
        ))
    }

    /// Run leak scenarios strictly sequentially with a mandatory cooldown
    /// and a best-effort reclamation request between them
    pub async fn run_leak_suite(
        &self,
        configs: Vec<ScenarioConfig>,
    ) -> Result<Vec<LeakReport>> {
        let total = configs.len();
        let mut reports = Vec::with_capacity(total);
        for (index, config) in configs.into_iter().enumerate() {
            reports.push(self.run_leak_scenario(config).await?);
            if index + 1 < total {
                self.runtime.capabilities().request_gc();
                tokio::time::sleep(Duration::from_millis(SUITE_COOLDOWN_MS)).await;
            }
        }
        Ok(reports)
    }

    /// Run performance scenarios strictly sequentially with a mandatory
    /// cooldown and a best-effort reclamation request between them
    pub async fn run_performance_suite(
        &self,
        configs: Vec<ScenarioConfig>,
    ) -> Result<Vec<PerformanceReport>> {
        let total = configs.len();
        let mut reports = Vec::with_capacity(total);
        for (index, config) in configs.into_iter().enumerate() {
            reports.push(self.run_performance_scenario(config).await?);
            if index + 1 < total {
                self.runtime.capabilities().request_gc();
                tokio::time::sleep(Duration::from_millis(SUITE_COOLDOWN_MS)).await;
            }
        }
        Ok(reports)
    }
}

impl std::fmt::Debug for ScenarioRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioRunner")
            .field("phase", &self.phase())
            .field("disposed", &self.disposed.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use host_runtime::HostCapabilities;
    use std::sync::atomic::AtomicU32;

    fn runner() -> (Arc<HostRuntime>, Arc<ScenarioRunner>) {
        let runtime = HostRuntime::new(HostCapabilities::default());
        let runner = Arc::new(ScenarioRunner::new(Arc::clone(&runtime)));
        (runtime, runner)
    }

    fn noop_scenario(duration_ms: u64) -> ScenarioConfig {
        ScenarioConfig::builder("noop")
            .duration_ms(duration_ms)
            .sample_interval_ms(20)
            .setup(|| Ok(()))
            .cleanup(|| Ok(()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_runner_constructs_without_a_runtime() {
        // The sync constructor builds the default frame scheduler; none of
        // that may require an active runtime.
        let (_runtime, runner) = runner();
        assert_eq!(runner.phase(), RunnerPhase::Idle);
    }

    #[tokio::test]
    async fn test_leak_scenario_counts_uncleared_timers() {
        let (runtime, runner) = runner();
        let rt = Arc::clone(&runtime);
        let ids = Arc::new(Mutex::new(Vec::new()));
        let setup_ids = Arc::clone(&ids);

        let config = ScenarioConfig::builder("timer-leak")
            .duration_ms(120)
            .sample_interval_ms(20)
            .setup(move || {
                for _ in 0..4 {
                    let id = rt.set_timeout(Arc::new(|| {}), 60_000);
                    setup_ids.lock().push(id);
                }
                Ok(())
            })
            .cleanup({
                let rt = Arc::clone(&runtime);
                let ids = Arc::clone(&ids);
                move || {
                    // Clear exactly one of the four.
                    if let Some(id) = ids.lock().first().copied() {
                        rt.clear_timer(id);
                    }
                    Ok(())
                }
            })
            .build()
            .unwrap();

        let report = runner.run_leak_scenario(config).await.unwrap();
        assert_eq!(report.outcome, ScenarioOutcome::Completed);
        assert_eq!(report.metrics.timer_leak_count, 3);
        assert_eq!(report.severity, diag_types::Severity::Medium);
        assert!(!report.snapshots.is_empty());
        assert_eq!(runner.phase(), RunnerPhase::Idle);
    }

    #[tokio::test]
    async fn test_concurrent_start_is_rejected_without_disturbing_run() {
        let (_runtime, runner) = runner();
        let background = {
            let runner = Arc::clone(&runner);
            tokio::spawn(async move { runner.run_leak_scenario(noop_scenario(300)).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(runner.is_running());

        let rejected = runner.run_leak_scenario(noop_scenario(100)).await;
        assert!(matches!(
            rejected,
            Err(DiagnosticsError::ConcurrentInvocation)
        ));

        // The in-flight scenario is untouched and completes normally.
        let report = background.await.unwrap().unwrap();
        assert_eq!(report.outcome, ScenarioOutcome::Completed);
    }

    #[tokio::test]
    async fn test_external_stop_cleans_up_exactly_once_and_restores_primitives() {
        let (runtime, runner) = runner();
        let before = runtime.timer_primitives();
        let cleanups = Arc::new(AtomicU32::new(0));

        let config = ScenarioConfig::builder("long")
            .duration_ms(10_000)
            .sample_interval_ms(20)
            .setup(|| Ok(()))
            .cleanup({
                let cleanups = Arc::clone(&cleanups);
                move || {
                    cleanups.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .build()
            .unwrap();

        let task = {
            let runner = Arc::clone(&runner);
            tokio::spawn(async move { runner.run_leak_scenario(config).await })
        };
        tokio::time::sleep(Duration::from_millis(60)).await;
        runner.stop();

        let report = task.await.unwrap().unwrap();
        assert_eq!(report.outcome, ScenarioOutcome::Stopped);
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);

        let after = runtime.timer_primitives();
        assert!(Arc::ptr_eq(&before.set_timeout, &after.set_timeout));
        assert!(Arc::ptr_eq(&before.clear_timer, &after.clear_timer));
        assert_eq!(runner.phase(), RunnerPhase::Idle);
    }

    #[tokio::test]
    async fn test_stop_while_armed_is_not_lost() {
        // A stop arriving before Running (here: during setup) must land on
        // the current run's channel and end the run at its first
        // suspension point.
        let (_runtime, runner) = runner();
        let stopper = Arc::clone(&runner);

        let config = ScenarioConfig::builder("stopped-early")
            .duration_ms(10_000)
            .sample_interval_ms(20)
            .setup(move || {
                stopper.stop();
                Ok(())
            })
            .cleanup(|| Ok(()))
            .build()
            .unwrap();

        let report = runner.run_leak_scenario(config).await.unwrap();
        assert_eq!(report.outcome, ScenarioOutcome::Stopped);
        assert!(report.duration_ms < 5_000.0);
        assert_eq!(runner.phase(), RunnerPhase::Idle);
    }

    #[tokio::test]
    async fn test_stop_while_idle_is_a_noop() {
        let (_runtime, runner) = runner();
        runner.stop();
        assert_eq!(runner.phase(), RunnerPhase::Idle);
    }

    #[tokio::test]
    async fn test_setup_failure_yields_failed_report_and_restores_primitives() {
        let (runtime, runner) = runner();
        let before = runtime.timer_primitives();
        let cleanups = Arc::new(AtomicU32::new(0));

        let config = ScenarioConfig::builder("bad-setup")
            .duration_ms(5_000)
            .sample_interval_ms(20)
            .setup(|| anyhow::bail!("fixture exploded"))
            .cleanup({
                let cleanups = Arc::clone(&cleanups);
                move || {
                    cleanups.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .build()
            .unwrap();

        let report = runner.run_leak_scenario(config).await.unwrap();
        assert_eq!(report.outcome, ScenarioOutcome::SetupFailed);
        assert!(report.snapshots.is_empty());
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);

        let after = runtime.timer_primitives();
        assert!(Arc::ptr_eq(&before.set_timeout, &after.set_timeout));
        assert_eq!(runner.phase(), RunnerPhase::Idle);
    }

    #[tokio::test]
    async fn test_run_failure_still_finalizes_with_report() {
        let (_runtime, runner) = runner();
        let config = ScenarioConfig::builder("bad-run")
            .duration_ms(150)
            .sample_interval_ms(20)
            .setup(|| Ok(()))
            .run(|| async { anyhow::bail!("body failed") })
            .cleanup(|| Ok(()))
            .build()
            .unwrap();

        let report = runner.run_leak_scenario(config).await.unwrap();
        assert_eq!(report.outcome, ScenarioOutcome::RunFailed);
        assert!(!report.snapshots.is_empty());
        assert_eq!(runner.phase(), RunnerPhase::Idle);
    }

    #[tokio::test]
    async fn test_iterations_execute_sequentially_with_cooldown() {
        let (_runtime, runner) = runner();
        let runs = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&runs);

        let config = ScenarioConfig::builder("iterated")
            .duration_ms(2_000)
            .sample_interval_ms(50)
            .iterations(3)
            .setup(|| Ok(()))
            .run(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .cleanup(|| Ok(()))
            .build()
            .unwrap();

        let report = runner.run_leak_scenario(config).await.unwrap();
        assert_eq!(report.outcome, ScenarioOutcome::Completed);
        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_duration_elapsing_truncates_in_flight_iteration() {
        let (_runtime, runner) = runner();
        let runs = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&runs);

        let config = ScenarioConfig::builder("truncated")
            .duration_ms(80)
            .sample_interval_ms(20)
            .iterations(5)
            .setup(|| Ok(()))
            .run(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    Ok(())
                }
            })
            .cleanup(|| Ok(()))
            .build()
            .unwrap();

        let report = runner.run_leak_scenario(config).await.unwrap();
        // The window elapsed during the first iteration; later iterations
        // never started and finalization proceeded immediately.
        assert_eq!(report.outcome, ScenarioOutcome::Completed);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(runner.phase(), RunnerPhase::Idle);
    }

    #[tokio::test]
    async fn test_dispose_rejects_further_scenarios() {
        let (runtime, runner) = runner();
        let before = runtime.timer_primitives();
        runner.dispose();

        let result = runner.run_leak_scenario(noop_scenario(50)).await;
        assert!(matches!(result, Err(DiagnosticsError::Disposed)));

        let after = runtime.timer_primitives();
        assert!(Arc::ptr_eq(&before.set_timeout, &after.set_timeout));
    }

    #[tokio::test]
    async fn test_leak_suite_runs_sequentially_in_order() {
        let (_runtime, runner) = runner();
        let configs = vec![
            ScenarioConfig::builder("first")
                .duration_ms(60)
                .sample_interval_ms(20)
                .setup(|| Ok(()))
                .cleanup(|| Ok(()))
                .build()
                .unwrap(),
            ScenarioConfig::builder("second")
                .duration_ms(60)
                .sample_interval_ms(20)
                .setup(|| Ok(()))
                .cleanup(|| Ok(()))
                .build()
                .unwrap(),
        ];

        let reports = runner.run_leak_suite(configs).await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].test_name, "first");
        assert_eq!(reports[1].test_name, "second");
    }
}
