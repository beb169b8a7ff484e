//! Monotonic clock for sample timestamps

use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Monotonic clock anchored at engine construction
///
/// Sample timestamps are milliseconds since the anchor; report timestamps
/// use wall-clock microseconds since the epoch.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    /// Create a clock anchored at the current instant
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the anchor
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Wall-clock timestamp in microseconds since the epoch
    pub fn timestamp_micros() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as f64)
            .unwrap_or(0.0)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
