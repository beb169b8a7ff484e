//! The host runtime facade scenario fixtures call through

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use diag_types::TimerId;

use crate::capabilities::HostCapabilities;
use crate::clock::Clock;
use crate::events::{EventTarget, Listener, ListenerPrimitives};
use crate::timers::{TimerCallback, TimerHost, TimerPrimitives};

/// Explicit stand-in for the runtime's global registration primitives
///
/// Scenario fixtures register timers and listeners through this facade.
/// The interception layer patches the primitive tables with
/// [`replace_timer_primitives`](Self::replace_timer_primitives) /
/// [`replace_listener_primitives`](Self::replace_listener_primitives) and
/// restores the saved originals on uninstall; calls made through the
/// facade always dispatch to whatever table is currently installed.
pub struct HostRuntime {
    clock: Clock,
    capabilities: HostCapabilities,
    timer_host: Arc<TimerHost>,
    timers: RwLock<TimerPrimitives>,
    listeners: RwLock<ListenerPrimitives>,
}

impl HostRuntime {
    /// Create a runtime with the given capabilities
    pub fn new(capabilities: HostCapabilities) -> Arc<Self> {
        let timer_host = TimerHost::new();
        let timers = timer_host.primitives();
        debug!("host runtime created: {:?}", capabilities);
        Arc::new(Self {
            clock: Clock::new(),
            capabilities,
            timer_host,
            timers: RwLock::new(timers),
            listeners: RwLock::new(ListenerPrimitives::direct()),
        })
    }

    /// The engine's monotonic clock
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Capabilities negotiated at construction
    pub fn capabilities(&self) -> &HostCapabilities {
        &self.capabilities
    }

    // ------------------------------------------------------------------
    // Facade calls used by scenario fixtures
    // ------------------------------------------------------------------

    /// Register a one-shot timer
    pub fn set_timeout(&self, callback: TimerCallback, delay_ms: u64) -> TimerId {
        let set_timeout = self.timers.read().set_timeout.clone();
        (set_timeout)(callback, delay_ms)
    }

    /// Register a repeating timer
    pub fn set_interval(&self, callback: TimerCallback, delay_ms: u64) -> TimerId {
        let set_interval = self.timers.read().set_interval.clone();
        (set_interval)(callback, delay_ms)
    }

    /// Cancel a timer of either kind
    pub fn clear_timer(&self, id: TimerId) {
        let clear = self.timers.read().clear_timer.clone();
        (clear)(id)
    }

    /// Add an event listener to a target
    pub fn add_listener(&self, target: &Arc<EventTarget>, event_type: &str, listener: Listener) {
        let add = self.listeners.read().add_listener.clone();
        (add)(target, event_type, listener)
    }

    /// Remove a previously added listener (exact reference match)
    pub fn remove_listener(&self, target: &Arc<EventTarget>, event_type: &str, listener: &Listener) {
        let remove = self.listeners.read().remove_listener.clone();
        (remove)(target, event_type, listener)
    }

    // ------------------------------------------------------------------
    // Patching surface used by the instrumentation session
    // ------------------------------------------------------------------

    /// Current timer primitive table
    pub fn timer_primitives(&self) -> TimerPrimitives {
        self.timers.read().clone()
    }

    /// Current listener primitive table
    pub fn listener_primitives(&self) -> ListenerPrimitives {
        self.listeners.read().clone()
    }

    /// Swap the timer table, returning the previous one
    pub fn replace_timer_primitives(&self, primitives: TimerPrimitives) -> TimerPrimitives {
        std::mem::replace(&mut *self.timers.write(), primitives)
    }

    /// Swap the listener table, returning the previous one
    pub fn replace_listener_primitives(
        &self,
        primitives: ListenerPrimitives,
    ) -> ListenerPrimitives {
        std::mem::replace(&mut *self.listeners.write(), primitives)
    }
}

impl std::fmt::Debug for HostRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostRuntime")
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_facade_dispatches_to_installed_table() {
        let runtime = HostRuntime::new(HostCapabilities::default());
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);

        runtime.set_timeout(
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            5,
        );
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_replace_returns_previous_table() {
        let runtime = HostRuntime::new(HostCapabilities::default());
        let original = runtime.timer_primitives();

        let replacement = TimerPrimitives {
            set_timeout: Arc::new(|_, _| 0),
            set_interval: Arc::new(|_, _| 0),
            clear_timer: Arc::new(|_| {}),
        };
        let previous = runtime.replace_timer_primitives(replacement);
        assert!(Arc::ptr_eq(&previous.set_timeout, &original.set_timeout));

        // Restore and verify reference identity round-trips.
        runtime.replace_timer_primitives(previous);
        let current = runtime.timer_primitives();
        assert!(Arc::ptr_eq(&current.set_timeout, &original.set_timeout));
        assert!(Arc::ptr_eq(&current.clear_timer, &original.clear_timer));
    }

    #[tokio::test]
    async fn test_listener_roundtrip_through_facade() {
        let runtime = HostRuntime::new(HostCapabilities::default());
        let target = EventTarget::new("Panel");
        let listener = Listener::new(|| {});

        runtime.add_listener(&target, "resize", listener.clone());
        assert_eq!(target.listener_count(), 1);

        runtime.remove_listener(&target, "resize", &listener);
        assert_eq!(target.listener_count(), 0);
    }
}
