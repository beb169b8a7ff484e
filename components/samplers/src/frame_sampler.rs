//! Frame timing sampler

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use diag_types::FrameSample;
use host_runtime::{Clock, FrameScheduler, HostCapabilities};
use interception::ResourceRegistry;

use crate::collector::SeriesCollector;
use crate::snapshot_sampler::{capture_snapshot, SamplerHandle};

/// Frame sampler options
#[derive(Debug, Clone)]
pub struct FrameSamplerConfig {
    /// Also capture a joint memory snapshot every `snapshot_every_frames`
    pub capture_memory: bool,
    /// Joint snapshot cadence in frames
    pub snapshot_every_frames: u64,
}

impl Default for FrameSamplerConfig {
    fn default() -> Self {
        Self {
            capture_memory: true,
            snapshot_every_frames: 30,
        }
    }
}

/// Measures inter-frame intervals off the refresh scheduler
///
/// The first callback only primes the previous-timestamp state; every
/// subsequent callback appends one [`FrameSample`] and reschedules until
/// the runner signals stop.
pub struct FrameSampler;

impl FrameSampler {
    /// Spawn the sampler loop on the given scheduler
    pub fn spawn(
        scheduler: Arc<dyn FrameScheduler>,
        config: FrameSamplerConfig,
        collector: Arc<SeriesCollector>,
        registry: Arc<ResourceRegistry>,
        capabilities: HostCapabilities,
        clock: Clock,
        session_started_ms: f64,
    ) -> SamplerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut previous: Option<f64> = None;
            loop {
                tokio::select! {
                    frame = scheduler.next_frame() => {
                        let Some(timestamp) = frame else { break };
                        if let Some(prev) = previous {
                            let index = collector.next_frame_index();
                            collector.push_frame(FrameSample {
                                index,
                                interval_ms: timestamp - prev,
                            });
                            if config.capture_memory
                                && config.snapshot_every_frames > 0
                                && (index + 1) % config.snapshot_every_frames == 0
                            {
                                collector.push_snapshot(capture_snapshot(
                                    &clock,
                                    session_started_ms,
                                    &capabilities,
                                    &registry,
                                ));
                            }
                        }
                        previous = Some(timestamp);
                    }
                    _ = stop_rx.changed() => break,
                }
            }
            debug!(frames = collector.frame_count(), "frame sampler stopped");
        });
        SamplerHandle::new(stop_tx, task)
    }
}
