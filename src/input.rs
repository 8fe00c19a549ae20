//! Input snapshots
//!
//! Devices report which buttons are held. The simulation wants held
//! directions but *presses* for fire and restart, so the driver runs raw
//! state through an `InputLatch` once per tick.

pub use crate::sim::TickInput;

use crate::consts::*;
use crate::sim::{GamePhase, GameState};

/// Buttons currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldButtons {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub restart: bool,
}

/// Turns held state into per-tick input with rising-edge fire/restart
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    fire_was_held: bool,
    restart_was_held: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the held buttons for this tick
    pub fn snapshot(&mut self, held: HeldButtons) -> TickInput {
        let input = TickInput {
            left: held.left,
            right: held.right,
            up: held.up,
            down: held.down,
            fire: held.fire && !self.fire_was_held,
            restart: held.restart && !self.restart_was_held,
        };
        self.fire_was_held = held.fire;
        self.restart_was_held = held.restart;
        input
    }
}

/// Autopilot home column
const AUTOPILOT_X: i32 = 40;
/// Rows of slack before the autopilot steers
const AUTOPILOT_DEADBAND: i32 = 2;

/// Demo player: lines up with the closest enemy ahead, taps fire on a
/// fixed cadence and restarts after game over.
pub fn autopilot(state: &GameState) -> HeldButtons {
    let player = &state.player;
    let mut held = HeldButtons::default();

    match state.phase {
        GamePhase::Playing => {
            let target_y = state
                .enemies
                .iter()
                .filter(|e| e.x > player.x)
                .min_by_key(|e| e.x)
                .map(|e| e.y)
                .unwrap_or(PLAYER_START_Y);

            held.up = target_y < player.y - AUTOPILOT_DEADBAND;
            held.down = target_y > player.y + AUTOPILOT_DEADBAND;
            held.left = player.x > AUTOPILOT_X;
            held.right = player.x < AUTOPILOT_X;
            // Held for 4 ticks, released for 4: one press every 8 ticks
            held.fire = (state.time_ticks / 4) % 2 == 0;
        }
        GamePhase::Respawning => {}
        GamePhase::GameOver => {
            held.restart = (state.time_ticks / TICK_RATE as u64) % 2 == 1;
        }
    }

    held
}
