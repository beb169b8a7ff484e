//! Named threshold configurations for the analyzers
//!
//! Severity and grade cutoffs are product calibration constants, not
//! structural invariants, so they live in overridable config values
//! rather than in analyzer control flow.

use serde::{Deserialize, Serialize};

/// Thresholds driving leak classification and severity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeakThresholds {
    /// Node growth above which a DOM-leak finding is emitted
    pub dom_growth_finding_nodes: i64,
    /// Used-heap growth (MB) above which a memory finding is emitted
    pub memory_growth_finding_mb: f64,
    /// Memory growth (MB) above which severity is at least medium
    pub memory_mb_medium: f64,
    /// Memory growth (MB) above which severity is at least high
    pub memory_mb_high: f64,
    /// Memory growth (MB) above which severity is critical
    pub memory_mb_critical: f64,
    /// Uncleared timers above which severity is at least medium
    pub timers_medium: u64,
    /// Uncleared timers above which severity is at least high
    pub timers_high: u64,
    /// Uncleared timers above which severity is critical
    pub timers_critical: u64,
    /// Leaked listeners above which severity is at least medium
    pub listeners_medium: u64,
    /// Leaked listeners above which severity is at least high
    pub listeners_high: u64,
    /// Leaked listeners above which severity is critical
    pub listeners_critical: u64,
}

impl Default for LeakThresholds {
    fn default() -> Self {
        Self {
            dom_growth_finding_nodes: 50,
            memory_growth_finding_mb: 10.0,
            memory_mb_medium: 5.0,
            memory_mb_high: 20.0,
            memory_mb_critical: 50.0,
            timers_medium: 2,
            timers_high: 5,
            timers_critical: 10,
            listeners_medium: 5,
            listeners_high: 10,
            listeners_critical: 20,
        }
    }
}

/// Thresholds driving the performance letter grade
///
/// The jank budget is fixed at the 60fps frame budget regardless of the
/// configured target fps; only the fps/jank ratio cutoffs vary per grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeThresholds {
    /// Inter-frame interval counted as a jank frame (ms)
    pub jank_budget_ms: f64,
    /// Multiple of the target frame time counted as a dropped frame
    pub dropped_frame_factor: f64,
    /// Minimum fps ratio for an A
    pub a_fps_ratio: f64,
    /// Maximum jank ratio for an A
    pub a_jank_ratio: f64,
    /// Minimum fps ratio for a B
    pub b_fps_ratio: f64,
    /// Maximum jank ratio for a B
    pub b_jank_ratio: f64,
    /// Minimum fps ratio for a C
    pub c_fps_ratio: f64,
    /// Maximum jank ratio for a C
    pub c_jank_ratio: f64,
    /// Minimum fps ratio for a D
    pub d_fps_ratio: f64,
    /// Maximum jank ratio for a D
    pub d_jank_ratio: f64,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            jank_budget_ms: 1000.0 / 60.0,
            dropped_frame_factor: 1.5,
            a_fps_ratio: 0.95,
            a_jank_ratio: 0.05,
            b_fps_ratio: 0.85,
            b_jank_ratio: 0.10,
            c_fps_ratio: 0.70,
            c_jank_ratio: 0.20,
            d_fps_ratio: 0.50,
            d_jank_ratio: 0.35,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leak_threshold_defaults() {
        let t = LeakThresholds::default();
        assert_eq!(t.dom_growth_finding_nodes, 50);
        assert_eq!(t.memory_growth_finding_mb, 10.0);
        assert_eq!(t.timers_medium, 2);
        assert_eq!(t.timers_high, 5);
        assert_eq!(t.timers_critical, 10);
        assert_eq!(t.listeners_critical, 20);
    }

    #[test]
    fn test_grade_threshold_defaults() {
        let t = GradeThresholds::default();
        assert!((t.jank_budget_ms - 16.666_666).abs() < 0.001);
        assert_eq!(t.dropped_frame_factor, 1.5);
        assert_eq!(t.a_fps_ratio, 0.95);
        assert_eq!(t.d_jank_ratio, 0.35);
    }
}
