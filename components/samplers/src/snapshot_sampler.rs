//! Periodic snapshot sampler

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use diag_types::Snapshot;
use host_runtime::{Clock, HostCapabilities};
use interception::ResourceRegistry;

use crate::collector::SeriesCollector;

/// Capture one point-in-time snapshot
///
/// Combines optional heap introspection, the host node probe, and counts
/// derived from the live resource registry. Absent capabilities degrade the
/// corresponding fields to zero.
pub fn capture_snapshot(
    clock: &Clock,
    session_started_ms: f64,
    capabilities: &HostCapabilities,
    registry: &ResourceRegistry,
) -> Snapshot {
    let heap = capabilities.heap_stats();
    let now = clock.now_ms();
    Snapshot {
        timestamp: now,
        used_memory: heap.used,
        total_memory: heap.total,
        memory_limit: heap.limit,
        dom_node_count: capabilities.node_count(),
        outstanding_listener_count: registry.outstanding_listener_count(),
        outstanding_timer_count: registry.outstanding_timer_count(),
        session_elapsed: now - session_started_ms,
    }
}

/// Handle to a running sampler task
///
/// Stopping is owned by the scenario runner: the sampler never
/// self-terminates.
#[derive(Debug)]
pub struct SamplerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SamplerHandle {
    pub(crate) fn new(stop_tx: watch::Sender<bool>, task: JoinHandle<()>) -> Self {
        Self { stop_tx, task }
    }

    /// Signal the task to stop and wait for it to finish
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            if !e.is_cancelled() {
                warn!("sampler task ended abnormally: {e}");
            }
        }
    }
}

/// Periodic snapshot sampler driven by a tokio interval
///
/// The interval is sampler infrastructure, deliberately not routed through
/// the intercepted primitives, so it is invisible to leak accounting.
pub struct SnapshotSampler;

impl SnapshotSampler {
    /// Spawn the sampler. The first snapshot is captured immediately, then
    /// one per `sample_interval_ms` until stopped.
    pub fn spawn(
        sample_interval_ms: u64,
        collector: Arc<SeriesCollector>,
        registry: Arc<ResourceRegistry>,
        capabilities: HostCapabilities,
        clock: Clock,
        session_started_ms: f64,
    ) -> SamplerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(Duration::from_millis(sample_interval_ms.max(1)));
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        collector.push_snapshot(capture_snapshot(
                            &clock,
                            session_started_ms,
                            &capabilities,
                            &registry,
                        ));
                    }
                    _ = stop_rx.changed() => break,
                }
            }
            debug!(
                snapshots = collector.snapshot_count(),
                "snapshot sampler stopped"
            );
        });
        SamplerHandle::new(stop_tx, task)
    }
}
