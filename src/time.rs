//! Fixed-timestep game clock using an accumulator pattern.
//!
//! `draw_web()` fires at display rate with a variable delta. [`TickClock`]
//! converts wall-clock timestamps into a fixed number of discrete ticks per
//! second, so the economy advances deterministically regardless of frame
//! rate.

/// Game ticks per wall-clock second (100ms per tick).
pub const TICKS_PER_SEC: u32 = 10;

/// Longest frame delta consumed in one go (ms). A backgrounded tab can
/// report multi-second deltas; gaps beyond this belong to the offline
/// catch-up path on reload, not to frame replay.
const MAX_FRAME_MS: f64 = 1_000.0;

pub struct TickClock {
    /// Milliseconds per tick.
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks.
    accumulator: f64,
    /// Timestamp of the last frame (ms), None before the first frame.
    last_timestamp: Option<f64>,
    /// Total elapsed ticks since creation.
    pub total_ticks: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            ms_per_tick: 1_000.0 / TICKS_PER_SEC as f64,
            accumulator: 0.0,
            last_timestamp: None,
            total_ticks: 0,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()`), once per
    /// frame. Returns the number of whole ticks to advance.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
