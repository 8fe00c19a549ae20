//! Scroll Defender - a side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (entities, collisions, phase machine)
//! - `renderer`: Draw command stream consumed by an external surface
//! - `audio`: Sound effect requests and the driver-owned audio manager
//! - `assets`: One-time sprite bank and sound patch construction
//! - `input`: Per-tick input snapshots, edge latching and the demo autopilot
//! - `settings`: Driver configuration loaded from JSON
//! - `timestep`: Fixed-rate tick scheduling for the driver

pub mod assets;
pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod simulation;
pub mod timestep;

pub use assets::{AssetRegistry, initialize_assets};
pub use audio::{AudioManager, AudioSink, SoundEffect};
pub use input::TickInput;
pub use renderer::{DrawCommand, Surface};
pub use settings::Settings;
pub use simulation::Simulation;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 30;

    /// Logical field dimensions
    pub const FIELD_WIDTH: i32 = 256;
    pub const FIELD_HEIGHT: i32 = 160;

    /// Player
    pub const PLAYER_START_X: i32 = 80;
    pub const PLAYER_START_Y: i32 = 80;
    pub const PLAYER_SPEED: i32 = 2;
    pub const PLAYER_MIN_X: i32 = 8;
    pub const PLAYER_MAX_X: i32 = FIELD_WIDTH - 8;
    pub const PLAYER_MIN_Y: i32 = 8;
    pub const PLAYER_MAX_Y: i32 = 140;
    pub const START_LIVES: u8 = 3;
    /// Collision immunity after a non-fatal hit
    pub const INVINCIBILITY_TICKS: u32 = 60;
    /// Delay between a non-fatal hit and the respawn effect
    pub const RESPAWN_DELAY_TICKS: u32 = 60;

    /// Bullets
    pub const BULLET_SPEED: i32 = 4;
    /// Bullets spawn this far ahead of the ship
    pub const BULLET_MUZZLE_OFFSET: i32 = 8;

    /// Enemies
    pub const ENEMY_SPEED: i32 = 1;
    /// Homing enemies only steer when x is a multiple of this
    pub const HOMING_STRIDE: i32 = 10;
    /// Spawn once the counter exceeds this
    pub const SPAWN_INTERVAL_TICKS: u32 = 30;
    pub const SPAWN_MIN_Y: i32 = 20;
    pub const SPAWN_MAX_Y: i32 = 130;
    /// Kind roll is uniform over 0..=SPAWN_ROLL_MAX; below the threshold is Basic
    pub const SPAWN_ROLL_MAX: u32 = 10;
    pub const SPAWN_BASIC_THRESHOLD: u32 = 8;

    /// Collision proximity (|dx| and |dy| must both be below this)
    pub const HIT_DISTANCE: i32 = 8;
    /// Entities leave the field this far past its edges
    pub const OFFSCREEN_MARGIN: i32 = 8;

    /// Scoring
    pub const KILL_SCORE: u64 = 100;

    /// Explosion lifetimes
    pub const ENEMY_EXPLOSION_TICKS: i32 = 10;
    pub const PLAYER_EXPLOSION_TICKS: i32 = 20;

    /// Effect rays
    pub const EFFECT_RAY_COUNT: usize = 16;
    pub const DEATH_RAY_SPEED: f32 = 2.0;
    pub const DEATH_RAY_LIFETIME: i32 = 30;
    pub const RESPAWN_RAY_RADIUS: f32 = 100.0;
    pub const RESPAWN_RAY_LIFETIME: i32 = 45;
    /// Fraction of the remaining offset a respawn ray closes per tick
    pub const RESPAWN_RAY_EASING: f32 = 0.1;
    /// Rays closer than this to the target count as arrived
    pub const RESPAWN_ARRIVAL_DISTANCE: f32 = 2.0;

    /// Background
    pub const TERRAIN_PERIOD: i32 = 300;
    pub const TERRAIN_STEP: usize = 10;
    pub const TERRAIN_BASE_HEIGHT: i32 = 20;
    pub const TERRAIN_SEGMENT_WIDTH: f32 = 12.0;
    pub const STAR_COUNT: usize = 30;
    pub const STAR_MAX_Y: i32 = 120;
}

/// Unit vector for an angle given in degrees
#[inline]
pub fn direction_deg(angle: f32) -> Vec2 {
    let rad = angle.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Step `value` by one toward `target`
#[inline]
pub fn step_toward(value: i32, target: i32) -> i32 {
    value + (target - value).signum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deg_axes() {
        let right = direction_deg(0.0);
        assert!((right.x - 1.0).abs() < 1e-6);
        assert!(right.y.abs() < 1e-6);

        let down = direction_deg(90.0);
        assert!(down.x.abs() < 1e-6);
        assert!((down.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_toward() {
        assert_eq!(step_toward(10, 20), 11);
        assert_eq!(step_toward(10, 3), 9);
        assert_eq!(step_toward(10, 10), 10);
    }
}
