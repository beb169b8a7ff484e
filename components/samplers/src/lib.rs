//! Samplers that run concurrently with the scenario body
//!
//! The snapshot sampler captures point-in-time measures on a fixed cadence;
//! the frame timing sampler synchronizes with the display-refresh scheduler
//! to measure inter-frame intervals. Both are tokio tasks owned and stopped
//! exclusively by the scenario runner — they never self-terminate.
//!
//! The snapshot cadence is driven by `tokio::time::interval`, not by the
//! intercepted facade, so the sampler infrastructure itself never shows up
//! in leak accounting.

mod collector;
mod frame_sampler;
mod snapshot_sampler;

pub use collector::SeriesCollector;
pub use frame_sampler::{FrameSampler, FrameSamplerConfig};
pub use snapshot_sampler::{capture_snapshot, SamplerHandle, SnapshotSampler};
