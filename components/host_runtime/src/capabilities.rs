//! Optional host introspection capabilities
//!
//! Capability negotiation happens once at construction: the hosting
//! application hands over whichever providers it has, and everything else
//! degrades to zero values instead of failing at sample time.

use std::sync::Arc;

use diag_types::ElementStyle;

/// Heap usage values reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Used heap bytes
    pub used: u64,
    /// Total heap bytes
    pub total: u64,
    /// Heap size limit in bytes
    pub limit: u64,
}

/// Optional heap introspection provider
pub trait MemoryIntrospection: Send + Sync {
    /// Current heap usage
    fn heap_stats(&self) -> HeapStats;

    /// Best-effort request to reclaim memory (used between batch
    /// scenarios). Default is a no-op.
    fn request_gc(&self) {}
}

/// Probe reporting the current node count of the host's document tree
pub trait NodeCountProbe: Send + Sync {
    /// Current node count
    fn node_count(&self) -> u64;
}

/// Probe reporting computed styles for the compositor advisory scan
pub trait StyleProbe: Send + Sync {
    /// Computed styles of the subtree under analysis
    fn computed_styles(&self) -> Vec<ElementStyle>;
}

/// Host capabilities resolved at construction
#[derive(Clone, Default)]
pub struct HostCapabilities {
    /// Heap introspection, if the host exposes it
    pub memory: Option<Arc<dyn MemoryIntrospection>>,
    /// Node-count probe, if the host exposes one
    pub node_probe: Option<Arc<dyn NodeCountProbe>>,
    /// Style probe for the compositor advisory, if available
    pub style_probe: Option<Arc<dyn StyleProbe>>,
}

impl HostCapabilities {
    /// Heap stats, or all zeros when introspection is unavailable
    pub fn heap_stats(&self) -> HeapStats {
        self.memory
            .as_ref()
            .map(|m| m.heap_stats())
            .unwrap_or_default()
    }

    /// Node count, or zero when no probe is available
    pub fn node_count(&self) -> u64 {
        self.node_probe.as_ref().map(|p| p.node_count()).unwrap_or(0)
    }

    /// Forward a best-effort reclamation request to the host, if possible
    pub fn request_gc(&self) {
        if let Some(memory) = &self.memory {
            memory.request_gc();
        }
    }
}

impl std::fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("memory", &self.memory.is_some())
            .field("node_probe", &self.node_probe.is_some())
            .field("style_probe", &self.style_probe.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct FixedMemory(HeapStats);

    impl MemoryIntrospection for FixedMemory {
        fn heap_stats(&self) -> HeapStats {
            self.0
        }
    }

    struct CountingProbe(AtomicU64);

    impl NodeCountProbe for CountingProbe {
        fn node_count(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_absent_capabilities_degrade_to_zero() {
        let caps = HostCapabilities::default();
        assert_eq!(caps.heap_stats(), HeapStats::default());
        assert_eq!(caps.node_count(), 0);
        // No provider: request_gc is a no-op and must not panic.
        caps.request_gc();
    }

    #[test]
    fn test_present_capabilities_are_consulted() {
        let caps = HostCapabilities {
            memory: Some(Arc::new(FixedMemory(HeapStats {
                used: 10,
                total: 20,
                limit: 30,
            }))),
            node_probe: Some(Arc::new(CountingProbe(AtomicU64::new(42)))),
            style_probe: None,
        };
        assert_eq!(caps.heap_stats().used, 10);
        assert_eq!(caps.node_count(), 42);
    }
}
