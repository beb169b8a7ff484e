//! Performance analyzer
//!
//! Reduces the frame sample series into frame metrics and a letter grade.
//! fps is always `1000 / mean(interval)` — callback count over wall
//! duration would be biased by scheduling jitter.

use tracing::debug;

use diag_types::{FrameMetrics, FrameSample, GradeThresholds, PerformanceGrade};

const JANK_RECOMMENDATION: &str =
    "Keep per-frame work inside the 16.7ms budget: split long tasks, move \
     heavy computation off the hot path, and avoid synchronous layout reads.";
const DROPPED_RECOMMENDATION: &str =
    "Frames are being skipped entirely; batch node mutations and defer \
     non-visual work so each refresh callback finishes on time.";

/// Output of the performance analyzer, consumed by the report builder
#[derive(Debug, Clone)]
pub struct PerformanceAnalysis {
    /// Derived frame metrics
    pub metrics: FrameMetrics,
    /// Letter grade against the expected fps
    pub grade: PerformanceGrade,
    /// Fixed guidance strings for observed problems
    pub recommendations: Vec<String>,
}

fn grade_for(fps_ratio: f64, jank_ratio: f64, t: &GradeThresholds) -> PerformanceGrade {
    if fps_ratio >= t.a_fps_ratio && jank_ratio <= t.a_jank_ratio {
        PerformanceGrade::A
    } else if fps_ratio >= t.b_fps_ratio && jank_ratio <= t.b_jank_ratio {
        PerformanceGrade::B
    } else if fps_ratio >= t.c_fps_ratio && jank_ratio <= t.c_jank_ratio {
        PerformanceGrade::C
    } else if fps_ratio >= t.d_fps_ratio && jank_ratio <= t.d_jank_ratio {
        PerformanceGrade::D
    } else {
        PerformanceGrade::F
    }
}

/// Analyze one scenario's frame sample series
pub fn analyze_performance(
    frames: &[FrameSample],
    expected_fps: f64,
    thresholds: &GradeThresholds,
) -> PerformanceAnalysis {
    if frames.is_empty() {
        // Degenerate run: nothing was measured, nothing to grade up.
        return PerformanceAnalysis {
            metrics: FrameMetrics::default(),
            grade: PerformanceGrade::F,
            recommendations: vec![],
        };
    }

    let total = frames.len() as u64;
    let sum: f64 = frames.iter().map(|f| f.interval_ms).sum();
    let avg = sum / total as f64;
    let min = frames
        .iter()
        .map(|f| f.interval_ms)
        .fold(f64::INFINITY, f64::min);
    let max = frames
        .iter()
        .map(|f| f.interval_ms)
        .fold(f64::NEG_INFINITY, f64::max);

    let fps = if avg > 0.0 { 1000.0 / avg } else { 0.0 };
    let target_frame_time = 1000.0 / expected_fps.max(1.0);
    let dropped_frames = frames
        .iter()
        .filter(|f| f.interval_ms > thresholds.dropped_frame_factor * target_frame_time)
        .count() as u64;
    // The jank budget is the fixed 60fps budget regardless of target.
    let jank_frames = frames
        .iter()
        .filter(|f| f.interval_ms > thresholds.jank_budget_ms)
        .count() as u64;
    let jank_ratio = jank_frames as f64 / total as f64;

    let fps_ratio = fps / expected_fps.max(1.0);
    let grade = grade_for(fps_ratio, jank_ratio, thresholds);

    let mut recommendations = Vec::new();
    if jank_frames > 0 {
        recommendations.push(JANK_RECOMMENDATION.to_string());
    }
    if dropped_frames > 0 {
        recommendations.push(DROPPED_RECOMMENDATION.to_string());
    }

    debug!(fps, jank_ratio, %grade, "performance analysis complete");

    PerformanceAnalysis {
        metrics: FrameMetrics {
            avg_frame_time_ms: avg,
            min_frame_time_ms: min,
            max_frame_time_ms: max,
            fps,
            dropped_frames,
            jank_frames,
            jank_ratio,
            total_frames: total,
        },
        grade,
        recommendations,
    }
}
