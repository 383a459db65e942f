//! Time management utilities
//!
//! The simulation runs on two cadences: a variable-rate frame (the caller's
//! measured delta) and a fixed-rate tick. [`FixedTimestep`] converts the
//! former into a whole number of the latter.

/// Accumulator that turns variable frame deltas into fixed ticks
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_ticks_per_frame: u32,
    tick_count: u64,
}

impl FixedTimestep {
    /// Create a new accumulator with the given step (seconds) and per-frame tick cap
    pub fn new(step: f32, max_ticks_per_frame: u32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            tick_count: 0,
        }
    }

    /// Fixed step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total number of ticks issued since creation
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Time banked but not yet consumed by a tick
    pub fn accumulated(&self) -> f32 {
        self.accumulator
    }

    /// Add a frame's elapsed time and return how many ticks to run now
    ///
    /// Time that would exceed the per-frame cap is dropped so a long stall
    /// cannot snowball into ever longer catch-up frames.
    pub fn advance(&mut self, delta_time: f32) -> u32 {
        if delta_time > 0.0 {
            self.accumulator += delta_time;
        }

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if ticks == self.max_ticks_per_frame && self.accumulator >= self.step {
            log::warn!(
                "Dropping {:.4}s of simulation time after {} ticks in one frame",
                self.accumulator,
                ticks
            );
            self.accumulator = 0.0;
        }

        self.tick_count += u64::from(ticks);
        ticks
    }

    /// Clear any banked time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
