//! Display-refresh scheduling
//!
//! The frame timing sampler synchronizes with the host's refresh scheduler
//! through [`FrameScheduler`]. Production hosts hand over an
//! [`IntervalFrameScheduler`] ticking at the display refresh period; tests
//! drive a [`ManualFrameScheduler`] with explicit timestamps.

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::clock::Clock;

/// Refresh-synchronized callback source
#[async_trait]
pub trait FrameScheduler: Send + Sync {
    /// Wait for the next refresh callback and return its timestamp (ms).
    /// `None` means the source is closed and no further frames will come.
    async fn next_frame(&self) -> Option<f64>;
}

/// Frame scheduler ticking at a fixed refresh rate
///
/// The underlying tokio interval is created on the first `next_frame`
/// call, so construction needs no running runtime.
pub struct IntervalFrameScheduler {
    period: std::time::Duration,
    interval: Mutex<Option<tokio::time::Interval>>,
    clock: Clock,
}

impl IntervalFrameScheduler {
    /// Create a scheduler ticking at `refresh_hz` (e.g. 60.0)
    pub fn new(refresh_hz: f64, clock: Clock) -> Self {
        let period_ms = 1000.0 / refresh_hz.max(1.0);
        Self {
            period: std::time::Duration::from_secs_f64(period_ms / 1000.0),
            interval: Mutex::new(None),
            clock,
        }
    }
}

#[async_trait]
impl FrameScheduler for IntervalFrameScheduler {
    async fn next_frame(&self) -> Option<f64> {
        let mut guard = self.interval.lock().await;
        let interval = guard.get_or_insert_with(|| {
            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
        Some(self.clock.now_ms())
    }
}

/// Test scheduler driven by explicit timestamps
pub struct ManualFrameScheduler {
    tx: mpsc::UnboundedSender<f64>,
    rx: Mutex<mpsc::UnboundedReceiver<f64>>,
}

impl ManualFrameScheduler {
    /// Create an empty manual scheduler
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Emit one frame callback at the given timestamp (ms)
    pub fn drive(&self, timestamp_ms: f64) {
        let _ = self.tx.send(timestamp_ms);
    }

    /// Emit a uniform run of frames: `count` callbacks spaced `interval_ms`
    /// apart starting at `start_ms`
    pub fn drive_uniform(&self, start_ms: f64, interval_ms: f64, count: usize) {
        for i in 0..count {
            self.drive(start_ms + interval_ms * i as f64);
        }
    }
}

impl Default for ManualFrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameScheduler for ManualFrameScheduler {
    async fn next_frame(&self) -> Option<f64> {
        self.rx.lock().await.recv().await
    }
}
