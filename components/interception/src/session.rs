//! Owned instrumentation session
//!
//! Models the process-wide patching of registration primitives as an
//! explicit, owned value with `install()`/`uninstall()`. Only the scenario
//! runner creates and tears these down, so no locking beyond the runner's
//! single-flight guard is needed.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use diag_types::TimerKind;
use host_runtime::{HostRuntime, ListenerPrimitives, TimerPrimitives};

use crate::registry::ResourceRegistry;

/// Run a bookkeeping closure; bookkeeping must never alter the underlying
/// effect, so panics are contained and logged instead of propagating.
fn record_guarded(what: &str, f: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(f)).is_err() {
        warn!("interception bookkeeping failed while recording {what}");
    }
}

/// Installs and removes the recording wrappers
///
/// `install()` swaps recording wrappers into the runtime's primitive
/// tables; the wrappers call the saved originals unconditionally and then
/// update the registry. `uninstall()` restores the saved originals and is
/// safe even when never installed. Both are idempotent.
pub struct InstrumentationSession {
    runtime: Arc<HostRuntime>,
    registry: Arc<ResourceRegistry>,
    installed: AtomicBool,
    saved_timers: Mutex<Option<TimerPrimitives>>,
    saved_listeners: Mutex<Option<ListenerPrimitives>>,
}

impl InstrumentationSession {
    /// Create a session over the given runtime and registry
    pub fn new(runtime: Arc<HostRuntime>, registry: Arc<ResourceRegistry>) -> Self {
        Self {
            runtime,
            registry,
            installed: AtomicBool::new(false),
            saved_timers: Mutex::new(None),
            saved_listeners: Mutex::new(None),
        }
    }

    /// Whether the wrappers are currently installed
    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    /// Swap recording wrappers into the runtime's primitive tables.
    /// Repeated calls while installed are no-ops.
    pub fn install(&self) {
        if self.installed.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!("installing instrumentation");

        let originals = self.runtime.timer_primitives();
        let clock = self.runtime.clock();

        let set_timeout = {
            let original = originals.set_timeout.clone();
            let registry = Arc::clone(&self.registry);
            Arc::new(move |cb: host_runtime::TimerCallback, delay: u64| {
                // Original first: the real handle keys the record.
                let id = (original)(cb, delay);
                record_guarded("timeout", || {
                    registry.record_timer(id, TimerKind::Delayed, clock.now_ms(), delay);
                });
                id
            }) as host_runtime::SetTimerFn
        };

        let set_interval = {
            let original = originals.set_interval.clone();
            let registry = Arc::clone(&self.registry);
            Arc::new(move |cb: host_runtime::TimerCallback, delay: u64| {
                let id = (original)(cb, delay);
                record_guarded("interval", || {
                    registry.record_timer(id, TimerKind::Repeating, clock.now_ms(), delay);
                });
                id
            }) as host_runtime::SetTimerFn
        };

        let clear_timer = {
            let original = originals.clear_timer.clone();
            let registry = Arc::clone(&self.registry);
            Arc::new(move |id: diag_types::TimerId| {
                record_guarded("timer clear", || {
                    registry.mark_timer_cleared(id);
                });
                // Forward regardless of whether a record matched.
                (original)(id);
            }) as host_runtime::ClearTimerFn
        };

        let previous_timers = self.runtime.replace_timer_primitives(TimerPrimitives {
            set_timeout,
            set_interval,
            clear_timer,
        });
        *self.saved_timers.lock() = Some(previous_timers);

        let listener_originals = self.runtime.listener_primitives();

        let add_listener = {
            let original = listener_originals.add_listener.clone();
            let registry = Arc::clone(&self.registry);
            Arc::new(
                move |target: &Arc<host_runtime::EventTarget>,
                      event: &str,
                      listener: host_runtime::Listener| {
                    (original)(target, event, listener.clone());
                    record_guarded("listener add", || {
                        registry.record_listener(
                            target.id(),
                            target.type_name(),
                            event,
                            &listener,
                            clock.now_ms(),
                        );
                    });
                },
            ) as host_runtime::AddListenerFn
        };

        let remove_listener = {
            let original = listener_originals.remove_listener.clone();
            let registry = Arc::clone(&self.registry);
            Arc::new(
                move |target: &Arc<host_runtime::EventTarget>,
                      event: &str,
                      listener: &host_runtime::Listener| {
                    record_guarded("listener removal", || {
                        registry.mark_listener_removed(target.id(), event, listener);
                    });
                    (original)(target, event, listener);
                },
            ) as host_runtime::RemoveListenerFn
        };

        let previous_listeners = self.runtime.replace_listener_primitives(ListenerPrimitives {
            add_listener,
            remove_listener,
        });
        *self.saved_listeners.lock() = Some(previous_listeners);
    }

    /// Restore the saved originals. Safe when never installed.
    pub fn uninstall(&self) {
        if !self.installed.swap(false, Ordering::SeqCst) {
            return;
        }
        debug!("uninstalling instrumentation");

        if let Some(timers) = self.saved_timers.lock().take() {
            self.runtime.replace_timer_primitives(timers);
        }
        if let Some(listeners) = self.saved_listeners.lock().take() {
            self.runtime.replace_listener_primitives(listeners);
        }
    }
}

impl std::fmt::Debug for InstrumentationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstrumentationSession")
            .field("installed", &self.is_installed())
            .finish()
    }
}

impl Drop for InstrumentationSession {
    fn drop(&mut self) {
        self.uninstall();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use host_runtime::{EventTarget, HostCapabilities, Listener};
    use std::time::Duration;

    fn session() -> (Arc<HostRuntime>, Arc<ResourceRegistry>, InstrumentationSession) {
        let runtime = HostRuntime::new(HostCapabilities::default());
        let registry = Arc::new(ResourceRegistry::new());
        let session = InstrumentationSession::new(Arc::clone(&runtime), Arc::clone(&registry));
        (runtime, registry, session)
    }

    #[tokio::test]
    async fn test_install_uninstall_restores_reference_identity() {
        let (runtime, _registry, session) = session();
        let before = runtime.timer_primitives();
        let listeners_before = runtime.listener_primitives();

        session.install();
        session.uninstall();

        let after = runtime.timer_primitives();
        assert!(Arc::ptr_eq(&before.set_timeout, &after.set_timeout));
        assert!(Arc::ptr_eq(&before.set_interval, &after.set_interval));
        assert!(Arc::ptr_eq(&before.clear_timer, &after.clear_timer));

        let listeners_after = runtime.listener_primitives();
        assert!(Arc::ptr_eq(
            &listeners_before.add_listener,
            &listeners_after.add_listener
        ));
        assert!(Arc::ptr_eq(
            &listeners_before.remove_listener,
            &listeners_after.remove_listener
        ));
    }

    #[tokio::test]
    async fn test_install_is_idempotent() {
        let (runtime, _registry, session) = session();
        let before = runtime.timer_primitives();

        session.install();
        let wrapped = runtime.timer_primitives();
        session.install();
        let still_wrapped = runtime.timer_primitives();

        // The second install must not wrap the wrappers.
        assert!(Arc::ptr_eq(&wrapped.set_timeout, &still_wrapped.set_timeout));

        session.uninstall();
        let restored = runtime.timer_primitives();
        assert!(Arc::ptr_eq(&before.set_timeout, &restored.set_timeout));
    }

    #[tokio::test]
    async fn test_uninstall_without_install_is_safe() {
        let (_runtime, _registry, session) = session();
        session.uninstall();
        assert!(!session.is_installed());
    }

    #[tokio::test]
    async fn test_timer_registration_is_recorded_and_forwarded() {
        let (runtime, registry, session) = session();
        session.install();

        let fired = Arc::new(std::sync::atomic::AtomicU32::new(0));
        let counter = Arc::clone(&fired);
        let id = runtime.set_timeout(
            Arc::new(move || {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }),
            5,
        );

        assert_eq!(registry.outstanding_timer_count(), 1);

        // The wrapper must not suppress the underlying effect.
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(fired.load(std::sync::atomic::Ordering::SeqCst), 1);

        runtime.clear_timer(id);
        assert_eq!(registry.outstanding_timer_count(), 0);
        session.uninstall();
    }

    #[tokio::test]
    async fn test_listener_bookkeeping_matches_by_reference() {
        let (runtime, registry, session) = session();
        session.install();

        let target = EventTarget::new("Button");
        let added = Listener::new(|| {});
        let different = Listener::new(|| {});

        runtime.add_listener(&target, "click", added.clone());
        assert_eq!(registry.outstanding_listener_count(), 1);

        // Different reference: no registration may be marked removed, but
        // the original removal still runs (and finds nothing).
        runtime.remove_listener(&target, "click", &different);
        assert_eq!(registry.outstanding_listener_count(), 1);
        assert_eq!(target.listener_count(), 1);

        runtime.remove_listener(&target, "click", &added);
        assert_eq!(registry.outstanding_listener_count(), 0);
        assert_eq!(target.listener_count(), 0);
        session.uninstall();
    }

    #[tokio::test]
    async fn test_registrations_after_uninstall_are_invisible() {
        let (runtime, registry, session) = session();
        session.install();
        session.uninstall();

        runtime.set_timeout(Arc::new(|| {}), 1000);
        assert_eq!(registry.outstanding_timer_count(), 0);
    }
}
