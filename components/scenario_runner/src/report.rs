//! Report assembly (boundary with external consumers)

use analyzers::{LeakAnalysis, PerformanceAnalysis};
use diag_types::{
    CompositorAdvisory, FrameSample, LeakReport, PerformanceReport, ScenarioOutcome, Snapshot,
};
use host_runtime::Clock;

pub(crate) fn build_leak_report(
    name: &str,
    description: &str,
    duration_ms: f64,
    outcome: ScenarioOutcome,
    snapshots: Vec<Snapshot>,
    analysis: LeakAnalysis,
) -> LeakReport {
    LeakReport {
        test_name: name.to_string(),
        description: description.to_string(),
        duration_ms,
        outcome,
        snapshots,
        start_snapshot: analysis.start_snapshot,
        end_snapshot: analysis.end_snapshot,
        peak_snapshot: analysis.peak_snapshot,
        metrics: analysis.metrics,
        severity: analysis.severity,
        findings: analysis.findings,
        recommendations: analysis.recommendations,
        timestamp: Clock::timestamp_micros(),
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn build_performance_report(
    name: &str,
    description: &str,
    duration_ms: f64,
    outcome: ScenarioOutcome,
    frames: Vec<FrameSample>,
    snapshots: Vec<Snapshot>,
    expected_fps: f64,
    analysis: PerformanceAnalysis,
    advisories: Vec<CompositorAdvisory>,
) -> PerformanceReport {
    PerformanceReport {
        test_name: name.to_string(),
        description: description.to_string(),
        duration_ms,
        outcome,
        frames,
        snapshots,
        metrics: analysis.metrics,
        expected_fps,
        grade: analysis.grade,
        recommendations: analysis.recommendations,
        advisories,
        timestamp: Clock::timestamp_micros(),
    }
}
