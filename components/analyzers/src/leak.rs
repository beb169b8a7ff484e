//! Leak analyzer
//!
//! Reduces the snapshot series and final registry state into derived
//! metrics, classified findings, an overall severity, and fixed
//! remediation strings.

use tracing::debug;

use diag_types::{
    FindingKind, LeakFinding, LeakMetrics, LeakThresholds, RegistryDump, Severity, Snapshot,
};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Fixed remediation per finding category. Reports never carry generated
/// or data-driven text.
const TIMER_RECOMMENDATION: &str =
    "Store every id returned by set_timeout/set_interval and clear it in cleanup; \
     repeating timers in particular keep their callbacks alive indefinitely.";
const LISTENER_RECOMMENDATION: &str =
    "Remove event listeners with the same function reference that was added; \
     keep the listener handle alongside the target so cleanup can unregister it.";
const DOM_RECOMMENDATION: &str =
    "Detach and drop nodes when tearing down views; a steadily growing node \
     count usually means views are appended but never removed.";
const MEMORY_RECOMMENDATION: &str =
    "Release references to large buffers and caches in cleanup so the heap \
     can shrink back to its baseline.";

/// Output of the leak analyzer, consumed by the report builder
#[derive(Debug, Clone)]
pub struct LeakAnalysis {
    /// Derived metrics
    pub metrics: LeakMetrics,
    /// Overall severity (highest matching classification)
    pub severity: Severity,
    /// Classified findings
    pub findings: Vec<LeakFinding>,
    /// One fixed remediation string per finding category present
    pub recommendations: Vec<String>,
    /// First snapshot of the series
    pub start_snapshot: Option<Snapshot>,
    /// Last snapshot of the series
    pub end_snapshot: Option<Snapshot>,
    /// Snapshot with the highest used-heap value
    pub peak_snapshot: Option<Snapshot>,
}

fn severity_for(
    memory_growth_mb: f64,
    timer_leaks: u64,
    listener_leaks: u64,
    t: &LeakThresholds,
) -> Severity {
    if memory_growth_mb > t.memory_mb_critical
        || timer_leaks > t.timers_critical
        || listener_leaks > t.listeners_critical
    {
        Severity::Critical
    } else if memory_growth_mb > t.memory_mb_high
        || timer_leaks > t.timers_high
        || listener_leaks > t.listeners_high
    {
        Severity::High
    } else if memory_growth_mb > t.memory_mb_medium
        || timer_leaks > t.timers_medium
        || listener_leaks > t.listeners_medium
    {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Analyze one scenario's snapshot series and final registry state
pub fn analyze_leaks(
    snapshots: &[Snapshot],
    registry: &RegistryDump,
    thresholds: &LeakThresholds,
) -> LeakAnalysis {
    let start_snapshot = snapshots.first().cloned();
    let end_snapshot = snapshots.last().cloned();
    let peak_snapshot = snapshots
        .iter()
        .max_by(|a, b| a.used_memory.cmp(&b.used_memory))
        .cloned();

    let (memory_growth_mb, memory_growth_rate_mb_per_min, dom_node_growth) =
        match (&start_snapshot, &end_snapshot) {
            (Some(start), Some(end)) => {
                let growth =
                    (end.used_memory as f64 - start.used_memory as f64) / BYTES_PER_MB;
                let elapsed_minutes =
                    (end.session_elapsed - start.session_elapsed) / 60_000.0;
                let rate = if elapsed_minutes > 0.0 {
                    growth / elapsed_minutes
                } else {
                    0.0
                };
                let node_growth = end.dom_node_count as i64 - start.dom_node_count as i64;
                (growth, rate, node_growth)
            }
            _ => (0.0, 0.0, 0),
        };

    let timer_leak_count = registry.uncleared_timers.len() as u64;
    let listener_leak_total = registry.listener_leak_total();

    let mut findings = Vec::new();
    let mut recommendations = Vec::new();

    // Every still-uncleared timer is its own entry; the per-entry severity
    // reflects the total outstanding count.
    if timer_leak_count > 0 {
        let timer_severity = severity_for(0.0, timer_leak_count, 0, thresholds);
        for handle in &registry.uncleared_timers {
            findings.push(LeakFinding {
                kind: FindingKind::Timer,
                detail: format!(
                    "{} timer #{} (planned delay {}ms) was never cleared",
                    handle.kind, handle.id, handle.planned_delay
                ),
                count: 1,
                severity: timer_severity,
            });
        }
        recommendations.push(TIMER_RECOMMENDATION.to_string());
    }

    let listener_severity = severity_for(0.0, 0, listener_leak_total, thresholds);
    for bucket in &registry.listener_buckets {
        let leaked = bucket.leaked();
        if leaked > 0 {
            findings.push(LeakFinding {
                kind: FindingKind::Listener,
                detail: format!(
                    "{} '{}' listener(s) on {} never removed",
                    leaked, bucket.event_type, bucket.target_type_name
                ),
                count: leaked,
                severity: listener_severity,
            });
        }
    }
    if listener_leak_total > 0 {
        recommendations.push(LISTENER_RECOMMENDATION.to_string());
    }

    if dom_node_growth > thresholds.dom_growth_finding_nodes {
        findings.push(LeakFinding {
            kind: FindingKind::Dom,
            detail: format!("node count grew by {dom_node_growth} over the run"),
            count: dom_node_growth as u64,
            severity: Severity::Medium,
        });
        recommendations.push(DOM_RECOMMENDATION.to_string());
    }

    if memory_growth_mb > thresholds.memory_growth_finding_mb {
        findings.push(LeakFinding {
            kind: FindingKind::Memory,
            detail: format!("used heap grew by {memory_growth_mb:.1} MB over the run"),
            count: memory_growth_mb as u64,
            severity: severity_for(memory_growth_mb, 0, 0, thresholds),
        });
        recommendations.push(MEMORY_RECOMMENDATION.to_string());
    }

    let severity = severity_for(
        memory_growth_mb,
        timer_leak_count,
        listener_leak_total,
        thresholds,
    );

    debug!(
        %severity,
        memory_growth_mb,
        timer_leak_count,
        listener_leak_total,
        dom_node_growth,
        "leak analysis complete"
    );

    LeakAnalysis {
        metrics: LeakMetrics {
            memory_growth_mb,
            memory_growth_rate_mb_per_min,
            dom_node_growth,
            timer_leak_count,
            listener_leak_total,
        },
        severity,
        findings,
        recommendations,
        start_snapshot,
        end_snapshot,
        peak_snapshot,
    }
}
