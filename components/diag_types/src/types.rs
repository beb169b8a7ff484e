//! Core record types shared by the interception layer, samplers, and analyzers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier returned by the timer registration primitives
pub type TimerId = u64;

// ============================================================================
// Interception records
// ============================================================================

/// Kind of timer registered through the intercepted primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    /// One-shot timer (`set_timeout`)
    Delayed,
    /// Periodic timer (`set_interval`)
    Repeating,
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delayed => write!(f, "delayed"),
            Self::Repeating => write!(f, "repeating"),
        }
    }
}

/// Record of a timer created while instrumentation was installed
///
/// Created when the wrapped registration primitive fires, flipped to
/// `cleared` by the wrapped cancellation primitive, and retained until
/// scenario end so the analyzer can diff registrations against clears.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHandle {
    /// Timer id handed back by the original primitive
    pub id: TimerId,
    /// Whether this is a one-shot or repeating timer
    pub kind: TimerKind,
    /// Monotonic timestamp when the timer was registered (ms)
    pub created_at: f64,
    /// Delay the caller asked for (ms)
    pub planned_delay: u64,
    /// Whether the cancellation primitive was invoked for this id
    pub cleared: bool,
}

/// Record of an event listener added while instrumentation was installed
///
/// Listeners carry no registration id, so removal matching uses the
/// (target, event type, listener reference) identity triple. The listener
/// reference itself is held by the registry, not serialized here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerRegistration {
    /// Id of the event target the listener was added to
    pub target_id: u64,
    /// Type name of the target (used for leak grouping)
    pub target_type_name: String,
    /// Event type the listener was registered for
    pub event_type: String,
    /// Monotonic timestamp when the listener was added (ms)
    pub added_at: f64,
    /// Whether a matching removal was observed
    pub removed: bool,
}

// ============================================================================
// Sample series
// ============================================================================

/// Point-in-time measure of runtime state
///
/// Snapshots form a strictly time-ordered sequence per scenario run.
/// Memory fields are zero when the host exposes no heap introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Monotonic timestamp (ms since engine construction)
    pub timestamp: f64,
    /// Used heap bytes (0 when introspection is unavailable)
    pub used_memory: u64,
    /// Total heap bytes (0 when introspection is unavailable)
    pub total_memory: u64,
    /// Heap size limit in bytes (0 when introspection is unavailable)
    pub memory_limit: u64,
    /// Node count reported by the host probe
    pub dom_node_count: u64,
    /// Listeners added but not yet removed
    pub outstanding_listener_count: u64,
    /// Timers registered but not yet cleared
    pub outstanding_timer_count: u64,
    /// Elapsed time since the scenario entered Running (ms)
    pub session_elapsed: f64,
}

/// One inter-frame interval measured by the frame timing sampler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSample {
    /// Sequential index of the sample within the run
    pub index: u64,
    /// Delta since the previous refresh callback (ms)
    pub interval_ms: f64,
}

// ============================================================================
// Findings
// ============================================================================

/// Severity of a leak finding or report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No meaningful retention observed
    Low,
    /// Retention worth a look
    Medium,
    /// Retention that will degrade a long-running session
    High,
    /// Retention that will exhaust resources quickly
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Category of a leak finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    /// A timer registered but never cleared
    Timer,
    /// Listeners added but not removed on a (target type, event) pair
    Listener,
    /// Node count grew past the configured threshold
    Dom,
    /// Used heap grew past the configured threshold
    Memory,
}

/// A classified suspected resource-retention problem
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeakFinding {
    /// Finding category
    pub kind: FindingKind,
    /// Human-readable description of what was retained
    pub detail: String,
    /// How many resources (or MB/nodes for growth findings) are involved
    pub count: u64,
    /// Severity of this finding
    pub severity: Severity,
}

// ============================================================================
// Registry state handed to the leak analyzer
// ============================================================================

/// Unremoved listeners grouped by (target type name, event type)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerBucket {
    /// Type name of the target the listeners were added to
    pub target_type_name: String,
    /// Event type the listeners were registered for
    pub event_type: String,
    /// Listeners added on this pair
    pub added: u64,
    /// Matching removals observed on this pair
    pub removed: u64,
}

impl ListenerBucket {
    /// Net leaked listeners for this pair (zero when fully removed)
    pub fn leaked(&self) -> u64 {
        self.added.saturating_sub(self.removed)
    }
}

/// Final registry state captured at scenario finalize time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDump {
    /// Timers still uncleared when the scenario finalized
    pub uncleared_timers: Vec<ResourceHandle>,
    /// Per-(target type, event) listener accounting
    pub listener_buckets: Vec<ListenerBucket>,
}

impl RegistryDump {
    /// Total leaked listeners across all buckets
    pub fn listener_leak_total(&self) -> u64 {
        self.listener_buckets.iter().map(ListenerBucket::leaked).sum()
    }
}

// ============================================================================
// Compositor advisory
// ============================================================================

/// Computed style record supplied by the host style probe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    /// Selector or element description for reporting
    pub selector: String,
    /// Computed `transform` value, if any
    pub transform: Option<String>,
    /// Computed opacity (1.0 when unset)
    pub opacity: f64,
    /// Computed `filter` value, if any
    pub filter: Option<String>,
    /// Computed `position` value
    pub position: String,
    /// Computed `will-change` value, if any
    pub will_change: Option<String>,
}

/// Informational note about a style property that promotes a composite layer
///
/// Advisory only; never affects a performance grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositorAdvisory {
    /// Element the property was found on
    pub selector: String,
    /// Property that promotes compositing
    pub property: String,
    /// Computed value observed
    pub value: String,
    /// What the promotion means for rendering
    pub note: String,
}
