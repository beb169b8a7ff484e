//! Timer registration primitives
//!
//! The timer surface is a table of `Arc`'d functions so the interception
//! layer can swap in recording wrappers and later restore the originals
//! with reference identity intact.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::trace;

use diag_types::TimerId;

/// Callback invoked when a timer fires
pub type TimerCallback = Arc<dyn Fn() + Send + Sync>;

/// Registration primitive: (callback, delay ms) -> timer id
pub type SetTimerFn = Arc<dyn Fn(TimerCallback, u64) -> TimerId + Send + Sync>;

/// Cancellation primitive
pub type ClearTimerFn = Arc<dyn Fn(TimerId) + Send + Sync>;

/// The runtime's timer primitive table
///
/// Entries are compared by `Arc::ptr_eq`; installing and uninstalling
/// instrumentation must leave them reference-identical to this table.
#[derive(Clone)]
pub struct TimerPrimitives {
    /// One-shot timer registration
    pub set_timeout: SetTimerFn,
    /// Repeating timer registration
    pub set_interval: SetTimerFn,
    /// Cancellation for both kinds
    pub clear_timer: ClearTimerFn,
}

impl std::fmt::Debug for TimerPrimitives {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerPrimitives").finish_non_exhaustive()
    }
}

/// Backing implementation the original primitives dispatch to
///
/// Fired timers run on spawned tokio tasks; the task table keyed by id
/// lets cancellation abort in-flight sleeps and intervals.
pub(crate) struct TimerHost {
    next_id: AtomicU64,
    tasks: DashMap<TimerId, JoinHandle<()>>,
}

impl TimerHost {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicU64::new(1),
            tasks: DashMap::new(),
        })
    }

    fn set_timeout(self: &Arc<Self>, callback: TimerCallback, delay_ms: u64) -> TimerId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let host = Arc::clone(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            callback();
            host.tasks.remove(&id);
        });
        self.tasks.insert(id, handle);
        trace!(id, delay_ms, "timeout registered");
        id
    }

    fn set_interval(self: &Arc<Self>, callback: TimerCallback, delay_ms: u64) -> TimerId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let period = Duration::from_millis(delay_ms.max(1));
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                ticker.tick().await;
                callback();
            }
        });
        self.tasks.insert(id, handle);
        trace!(id, delay_ms, "interval registered");
        id
    }

    fn clear(&self, id: TimerId) {
        if let Some((_, handle)) = self.tasks.remove(&id) {
            handle.abort();
            trace!(id, "timer cleared");
        }
    }

    /// Build the original primitive table dispatching to this host
    pub(crate) fn primitives(self: &Arc<Self>) -> TimerPrimitives {
        let timeout_host = Arc::clone(self);
        let interval_host = Arc::clone(self);
        let clear_host = Arc::clone(self);
        TimerPrimitives {
            set_timeout: Arc::new(move |cb, delay| timeout_host.set_timeout(cb, delay)),
            set_interval: Arc::new(move |cb, delay| interval_host.set_interval(cb, delay)),
            clear_timer: Arc::new(move |id| clear_host.clear(id)),
        }
    }

    /// Number of timers currently pending
    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[tokio::test]
    async fn test_timeout_fires_once() {
        let host = TimerHost::new();
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);

        let prims = host.primitives();
        (prims.set_timeout)(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }), 10);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(host.pending(), 0);
    }

    #[tokio::test]
    async fn test_interval_fires_repeatedly_until_cleared() {
        let host = TimerHost::new();
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);

        let prims = host.primitives();
        let id = (prims.set_interval)(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }), 10);

        tokio::time::sleep(Duration::from_millis(55)).await;
        (prims.clear_timer)(id);
        let after_clear = fired.load(Ordering::SeqCst);
        assert!(after_clear >= 2, "interval fired {} times", after_clear);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(fired.load(Ordering::SeqCst), after_clear);
    }

    #[tokio::test]
    async fn test_cleared_timeout_never_fires() {
        let host = TimerHost::new();
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);

        let prims = host.primitives();
        let id = (prims.set_timeout)(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }), 30);
        (prims.clear_timer)(id);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_clearing_unknown_id_is_a_noop() {
        let host = TimerHost::new();
        let prims = host.primitives();
        (prims.clear_timer)(9999);
    }
}
