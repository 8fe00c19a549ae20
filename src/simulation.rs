//! Session facade used by the driver
//!
//! One `Simulation` per game session. The driver calls `update` then `draw`
//! once per tick.

use rand::Rng;

use crate::audio::AudioSink;
use crate::renderer::{Surface, draw_scene};
use crate::sim::{GameState, TickInput, TickOutcome, tick};

pub struct Simulation {
    state: GameState,
}

impl Simulation {
    /// Reproducible session
    pub fn new(seed: u64) -> Self {
        log::info!("New session (seed {})", seed);
        Self {
            state: GameState::new(seed),
        }
    }

    /// Session seeded from the OS generator
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Advance exactly one tick
    pub fn update(&mut self, input: &TickInput, audio: &mut dyn AudioSink) -> TickOutcome {
        tick(&mut self.state, input, audio)
    }

    /// Render the current state
    pub fn draw(&self, surface: &mut dyn Surface) {
        draw_scene(&self.state, surface);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
