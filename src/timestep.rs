//! Fixed-rate tick scheduling
//!
//! Converts elapsed wall time into a whole number of simulation ticks.
//! Leftover time carries over to the next frame.

/// Maximum ticks per frame to prevent spiral of death
pub const MAX_SUBSTEPS: u32 = 8;
/// Longest frame gap accepted before time is dropped
const MAX_FRAME_SECONDS: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            dt: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Feed elapsed seconds; returns how many ticks to run now
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_SECONDS);

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS && self.accumulator >= self.dt {
            log::warn!(
                "Dropping {:.3}s of backlog after {} substeps",
                self.accumulator,
                MAX_SUBSTEPS
            );
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Time until the next tick is due
    pub fn time_to_next_tick(&self) -> f32 {
        (self.dt - self.accumulator).max(0.0)
    }
}
