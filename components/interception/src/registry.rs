//! Live resource registry populated by the recording wrappers

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::trace;

use diag_types::{
    ListenerBucket, ListenerRegistration, RegistryDump, ResourceHandle, TimerId, TimerKind,
};
use host_runtime::Listener;

#[derive(Debug)]
struct ListenerRecord {
    registration: ListenerRegistration,
    listener: Listener,
}

#[derive(Debug, Default)]
struct RegistryState {
    timers: HashMap<TimerId, ResourceHandle>,
    listeners: Vec<ListenerRecord>,
}

/// Registry of every resource created while instrumentation was installed
///
/// Records are retained until the scenario ends so the analyzer can diff
/// registrations against clears/removals.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    state: RwLock<RegistryState>,
}

impl ResourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timer registration keyed by the real handle
    pub fn record_timer(&self, id: TimerId, kind: TimerKind, created_at: f64, planned_delay: u64) {
        let handle = ResourceHandle {
            id,
            kind,
            created_at,
            planned_delay,
            cleared: false,
        };
        trace!(id, %kind, "timer recorded");
        self.state.write().timers.insert(id, handle);
    }

    /// Mark a timer cleared; returns false when no record matched
    pub fn mark_timer_cleared(&self, id: TimerId) -> bool {
        let mut state = self.state.write();
        match state.timers.get_mut(&id) {
            Some(handle) => {
                handle.cleared = true;
                true
            }
            None => false,
        }
    }

    /// Append a listener registration (identity is the target/event/reference triple)
    pub fn record_listener(
        &self,
        target_id: u64,
        target_type_name: &str,
        event_type: &str,
        listener: &Listener,
        added_at: f64,
    ) {
        let record = ListenerRecord {
            registration: ListenerRegistration {
                target_id,
                target_type_name: target_type_name.to_string(),
                event_type: event_type.to_string(),
                added_at,
                removed: false,
            },
            listener: listener.clone(),
        };
        trace!(target_id, event_type, "listener recorded");
        self.state.write().listeners.push(record);
    }

    /// Mark the matching registration removed; the listener reference must
    /// be exactly the one that was added. Returns false when nothing matched.
    pub fn mark_listener_removed(
        &self,
        target_id: u64,
        event_type: &str,
        listener: &Listener,
    ) -> bool {
        let mut state = self.state.write();
        for record in state.listeners.iter_mut() {
            if !record.registration.removed
                && record.registration.target_id == target_id
                && record.registration.event_type == event_type
                && record.listener.same(listener)
            {
                record.registration.removed = true;
                return true;
            }
        }
        false
    }

    /// Timers registered but not yet cleared
    pub fn outstanding_timer_count(&self) -> u64 {
        self.state
            .read()
            .timers
            .values()
            .filter(|h| !h.cleared)
            .count() as u64
    }

    /// Listeners added but not yet removed
    pub fn outstanding_listener_count(&self) -> u64 {
        self.state
            .read()
            .listeners
            .iter()
            .filter(|r| !r.registration.removed)
            .count() as u64
    }

    /// Capture the final state for the leak analyzer
    pub fn dump(&self) -> RegistryDump {
        let state = self.state.read();

        let mut uncleared_timers: Vec<ResourceHandle> = state
            .timers
            .values()
            .filter(|h| !h.cleared)
            .cloned()
            .collect();
        uncleared_timers.sort_by_key(|h| h.id);

        let mut buckets: HashMap<(String, String), ListenerBucket> = HashMap::new();
        for record in &state.listeners {
            let registration = &record.registration;
            let key = (
                registration.target_type_name.clone(),
                registration.event_type.clone(),
            );
            let bucket = buckets.entry(key).or_insert_with(|| ListenerBucket {
                target_type_name: registration.target_type_name.clone(),
                event_type: registration.event_type.clone(),
                added: 0,
                removed: 0,
            });
            bucket.added += 1;
            if registration.removed {
                bucket.removed += 1;
            }
        }
        let mut listener_buckets: Vec<ListenerBucket> = buckets.into_values().collect();
        listener_buckets.sort_by(|a, b| {
            (&a.target_type_name, &a.event_type).cmp(&(&b.target_type_name, &b.event_type))
        });

        RegistryDump {
            uncleared_timers,
            listener_buckets,
        }
    }

    /// Drop all records (between scenarios)
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.timers.clear();
        state.listeners.clear();
    }
}
