//! Flicker-free animation clock.
//!
//! The clock accumulates `delta * speed` each frame instead of multiplying
//! `speed * timestamp`, so changing the speed at runtime only changes the
//! future rate — the accumulated value never rescales. Pausing re-anchors the
//! last timestamp every frame, so the interval spent paused never lands as
//! one large delta on resume.

/// Accumulated animation time, advanced once per frame by the host loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlickerFreeClock {
    integrated: f64,
    last_timestamp: f64,
}

impl FlickerFreeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrated animation time, monotonically non-decreasing.
    pub fn integrated_time(&self) -> f64 {
        self.integrated
    }

    /// Advances the clock by one frame.
    ///
    /// `timestamp_ms` is the host's frame timestamp in milliseconds and
    /// `speed` is in integrated-time units per millisecond. The first call
    /// only anchors the timestamp (there is no delta yet); while `paused`
    /// the timestamp is re-anchored and the accumulated value stays frozen.
    pub fn advance(&mut self, timestamp_ms: f64, speed: f64, paused: bool) {
        if paused {
            self.last_timestamp = timestamp_ms;
            return;
        }

        // 0.0 is the first-frame sentinel: anchor without advancing.
        if self.last_timestamp == 0.0 {
            self.last_timestamp = timestamp_ms;
            return;
        }

        // Non-monotonic or duplicate timestamps contribute nothing; the
        // accumulated value must never decrease.
        let delta = (timestamp_ms - self.last_timestamp).max(0.0);
        self.integrated += delta * speed;
        self.last_timestamp = timestamp_ms;
    }
}
