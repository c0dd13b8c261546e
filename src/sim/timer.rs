//! Frame pacing gate
//!
//! The scheduler calls `advance` once per display frame; simulation work only
//! happens when `frame_ready` says enough time has passed since the previous
//! frame.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE_HZ;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    /// Timestamp (ms) of the latest frame
    current_tick: f64,
    /// Timestamp (ms) of the frame before that
    previous_tick: f64,
    rate_hz: f64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(TICK_RATE_HZ)
    }
}

impl Timer {
    pub fn new(rate_hz: f64) -> Self {
        Self {
            current_tick: 0.0,
            previous_tick: 0.0,
            rate_hz,
        }
    }

    /// Record a new frame timestamp
    pub fn advance(&mut self, timestamp_ms: f64) {
        self.previous_tick = self.current_tick;
        self.current_tick = timestamp_ms;
    }

    /// Restart pacing from `timestamp_ms` (both ticks set to it)
    pub fn reset(&mut self, timestamp_ms: f64) {
        self.previous_tick = timestamp_ms;
        self.current_tick = timestamp_ms;
    }

    /// Minimum spacing between simulated frames
    #[inline]
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.rate_hz
    }

    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.current_tick - self.previous_tick
    }

    pub fn frame_ready(&self) -> bool {
        self.elapsed_ms() >= self.frame_interval_ms()
    }

    pub fn current_tick(&self) -> f64 {
        self.current_tick
    }

    pub fn previous_tick(&self) -> f64 {
        self.previous_tick
    }

    pub fn rate_hz(&self) -> f64 {
        self.rate_hz
    }
}
