//! Shared accumulation for the sample series of one scenario run

use parking_lot::RwLock;

use diag_types::{FrameSample, Snapshot};

/// Accumulates the snapshot and frame series for a single run
///
/// One collector exists per scenario; the runner hands clones of the `Arc`
/// to each sampler task and drains the series at finalize time.
#[derive(Debug, Default)]
pub struct SeriesCollector {
    snapshots: RwLock<Vec<Snapshot>>,
    frames: RwLock<Vec<FrameSample>>,
}

impl SeriesCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot (samplers call in timestamp order)
    pub fn push_snapshot(&self, snapshot: Snapshot) {
        self.snapshots.write().push(snapshot);
    }

    /// Append a frame sample
    pub fn push_frame(&self, frame: FrameSample) {
        self.frames.write().push(frame);
    }

    /// Number of snapshots collected so far
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.read().len()
    }

    /// Number of frame samples collected so far
    pub fn frame_count(&self) -> usize {
        self.frames.read().len()
    }

    /// Next frame index to assign
    pub fn next_frame_index(&self) -> u64 {
        self.frames.read().len() as u64
    }

    /// Clone out the snapshot series
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.snapshots.read().clone()
    }

    /// Clone out the frame series
    pub fn frames(&self) -> Vec<FrameSample> {
        self.frames.read().clone()
    }
}
