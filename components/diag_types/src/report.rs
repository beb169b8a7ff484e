//! Report values handed to external callers
//!
//! Reports are plain in-process structured values; there is no wire format.
//! They serialize cleanly (camelCase) for consumers that want to render or
//! persist them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{CompositorAdvisory, FrameSample, LeakFinding, Severity, Snapshot};

/// How a scenario run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioOutcome {
    /// Setup, run, and cleanup all completed inside the configured window
    Completed,
    /// `setup()` failed before the scenario entered Running
    SetupFailed,
    /// At least one `run()` iteration failed; finalization still completed
    RunFailed,
    /// The scenario was stopped externally before the window elapsed
    Stopped,
}

impl ScenarioOutcome {
    /// Whether the scenario body got to execute at all
    pub fn ran(&self) -> bool {
        !matches!(self, Self::SetupFailed)
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::SetupFailed => write!(f, "setupFailed"),
            Self::RunFailed => write!(f, "runFailed"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Metrics derived from the snapshot series and final registry state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeakMetrics {
    /// Used-heap growth from first to last snapshot (MB)
    pub memory_growth_mb: f64,
    /// Growth normalized to MB per elapsed minute
    pub memory_growth_rate_mb_per_min: f64,
    /// Node-count growth from first to last snapshot
    pub dom_node_growth: i64,
    /// Timers still uncleared at finalize time
    pub timer_leak_count: u64,
    /// Net unremoved listeners across all (target, event) pairs
    pub listener_leak_total: u64,
}

/// Leak scenario report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeakReport {
    /// Name of the scenario that produced this report
    pub test_name: String,
    /// Scenario description supplied by the caller
    pub description: String,
    /// Wall-clock duration of the run (ms)
    pub duration_ms: f64,
    /// How the run ended
    pub outcome: ScenarioOutcome,
    /// Full ordered snapshot series
    pub snapshots: Vec<Snapshot>,
    /// First snapshot of the run, if any were taken
    pub start_snapshot: Option<Snapshot>,
    /// Last snapshot of the run, if any were taken
    pub end_snapshot: Option<Snapshot>,
    /// Snapshot with the highest used-heap value
    pub peak_snapshot: Option<Snapshot>,
    /// Derived metrics
    pub metrics: LeakMetrics,
    /// Overall severity (highest matching classification)
    pub severity: Severity,
    /// Classified findings
    pub findings: Vec<LeakFinding>,
    /// Fixed remediation strings, one per finding category present
    pub recommendations: Vec<String>,
    /// Wall-clock timestamp when the report was built (µs since epoch)
    pub timestamp: f64,
}

/// Letter grade for a performance scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceGrade {
    /// fpsRatio ≥ 0.95 and jankRatio ≤ 0.05
    A,
    /// fpsRatio ≥ 0.85 and jankRatio ≤ 0.10
    B,
    /// fpsRatio ≥ 0.70 and jankRatio ≤ 0.20
    C,
    /// fpsRatio ≥ 0.50 and jankRatio ≤ 0.35
    D,
    /// Everything below D
    F,
}

impl fmt::Display for PerformanceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::F => write!(f, "F"),
        }
    }
}

/// Metrics derived from the frame sample series
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMetrics {
    /// Mean inter-frame interval (ms)
    pub avg_frame_time_ms: f64,
    /// Shortest inter-frame interval (ms)
    pub min_frame_time_ms: f64,
    /// Longest inter-frame interval (ms)
    pub max_frame_time_ms: f64,
    /// 1000 / mean interval — never callback-count over wall duration
    pub fps: f64,
    /// Intervals longer than 1.5x the target frame time
    pub dropped_frames: u64,
    /// Intervals over the fixed 16.67ms 60fps budget
    pub jank_frames: u64,
    /// jank_frames / total_frames
    pub jank_ratio: f64,
    /// Number of measured intervals
    pub total_frames: u64,
}

/// Performance scenario report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Name of the scenario that produced this report
    pub test_name: String,
    /// Scenario description supplied by the caller
    pub description: String,
    /// Wall-clock duration of the run (ms)
    pub duration_ms: f64,
    /// How the run ended
    pub outcome: ScenarioOutcome,
    /// Full frame sample series
    pub frames: Vec<FrameSample>,
    /// Joint memory snapshots taken during the run
    pub snapshots: Vec<Snapshot>,
    /// Derived frame metrics
    pub metrics: FrameMetrics,
    /// Target fps the grade was computed against
    pub expected_fps: f64,
    /// Letter grade
    pub grade: PerformanceGrade,
    /// Fixed guidance strings for observed problems
    pub recommendations: Vec<String>,
    /// Informational compositor-promotion notes (never affect the grade)
    pub advisories: Vec<CompositorAdvisory>,
    /// Wall-clock timestamp when the report was built (µs since epoch)
    pub timestamp: f64,
}
