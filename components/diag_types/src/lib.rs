//! Shared data model for the diagnostics engine
//!
//! Contains the resource/sample records produced by the interception layer
//! and the samplers, the report values handed to external callers, the
//! named threshold configurations, and the public error taxonomy.

mod errors;
mod report;
mod thresholds;
mod types;

pub use errors::{DiagnosticsError, Result};
pub use report::{
    FrameMetrics, LeakMetrics, LeakReport, PerformanceGrade, PerformanceReport, ScenarioOutcome,
};
pub use thresholds::{GradeThresholds, LeakThresholds};
pub use types::{
    CompositorAdvisory, ElementStyle, FindingKind, FrameSample, LeakFinding, ListenerBucket,
    ListenerRegistration, RegistryDump, ResourceHandle, Severity, Snapshot, TimerId, TimerKind,
};
