//! Game state and core simulation types
//!
//! Everything `tick` mutates lives in `GameState`. Rendering only reads it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::{DeathRay, RespawnRay};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay (also covers the pending-respawn window after a hit)
    Playing,
    /// Respawn rays converging on the spawn point
    Respawning,
    /// All lives lost, waiting for restart
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub lives: u8,
    /// Ticks of collision immunity remaining
    pub invincible: u32,
    /// Where the ship reappears after the respawn effect
    pub respawn_x: i32,
    pub respawn_y: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            lives: START_LIVES,
            invincible: 0,
            respawn_x: PLAYER_START_X,
            respawn_y: PLAYER_START_Y,
        }
    }
}

impl Player {
    /// Apply held directions, each axis independently, clamped to the field
    pub fn steer(&mut self, left: bool, right: bool, up: bool, down: bool) {
        if left {
            self.x = (self.x - PLAYER_SPEED).max(PLAYER_MIN_X);
        }
        if right {
            self.x = (self.x + PLAYER_SPEED).min(PLAYER_MAX_X);
        }
        if up {
            self.y = (self.y - PLAYER_SPEED).max(PLAYER_MIN_Y);
        }
        if down {
            self.y = (self.y + PLAYER_SPEED).min(PLAYER_MAX_Y);
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible > 0
    }
}

/// A player bullet travelling right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

impl Bullet {
    /// Still inside the field (plus margin)
    #[inline]
    pub fn on_field(&self) -> bool {
        self.x < FIELD_WIDTH + OFFSCREEN_MARGIN
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Flies straight left
    Basic,
    /// Drifts toward the player's row in coarse steps
    Homing,
}

/// An enemy entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub kind: EnemyKind,
}

impl Enemy {
    /// Move one tick left; homing enemies steer toward `target_y` on stride ticks
    pub fn advance(&mut self, target_y: i32) {
        self.x -= ENEMY_SPEED;
        if self.kind == EnemyKind::Homing && self.x.rem_euclid(HOMING_STRIDE) == 0 {
            self.y = crate::step_toward(self.y, target_y);
        }
    }

    /// Not yet escaped past the left edge
    #[inline]
    pub fn on_field(&self) -> bool {
        self.x > -OFFSCREEN_MARGIN
    }
}

/// Expanding ring left behind by a destroyed ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    /// Ticks remaining
    pub ttl: i32,
}

/// One column of the scrolling hills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainSegment {
    pub x: i32,
    pub y: i32,
    pub height: i32,
}

/// Background star with its own parallax speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session was created with
    pub seed: u64,
    /// Ticks since the session was created (drives scrolling and blinking)
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    pub terrain: Vec<TerrainSegment>,
    pub stars: Vec<Star>,
    /// Outward burst played at the death site
    pub death_rays: Vec<DeathRay>,
    /// Inward burst converging on the respawn point
    pub respawn_rays: Vec<RespawnRay>,
    /// Counts up to the next spawn
    pub enemy_timer: u32,
    /// Ticks until the respawn effect starts (0 = disarmed)
    pub respawn_timer: u32,
    /// Rays per effect batch
    pub ray_count: usize,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Playing,
            score: 0,
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            terrain: Vec::new(),
            stars: Vec::new(),
            death_rays: Vec::new(),
            respawn_rays: Vec::new(),
            enemy_timer: 0,
            respawn_timer: 0,
            ray_count: EFFECT_RAY_COUNT,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Return to the opening state with freshly randomized background.
    ///
    /// The generator keeps running across resets, so each restart sees new
    /// terrain. `time_ticks` is a session clock and keeps counting.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.player = Player::default();
        self.bullets.clear();
        self.enemies.clear();
        self.explosions.clear();
        self.death_rays.clear();
        self.respawn_rays.clear();
        self.enemy_timer = 0;
        self.respawn_timer = 0;
        self.ray_count = EFFECT_RAY_COUNT;

        self.terrain = (0..TERRAIN_PERIOD)
            .step_by(TERRAIN_STEP)
            .map(|x| {
                let height = TERRAIN_BASE_HEIGHT + self.rng.random_range(0..=5) * 4;
                TerrainSegment {
                    x,
                    y: FIELD_HEIGHT - height,
                    height,
                }
            })
            .collect();

        self.stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: self.rng.random_range(0..FIELD_WIDTH) as f32,
                y: self.rng.random_range(0..=STAR_MAX_Y) as f32,
                speed: self.rng.random_range(0.5..1.5),
            })
            .collect();
    }

    /// Restart after game over. Returns whether a reset happened.
    pub fn request_restart(&mut self) -> bool {
        match self.phase {
            GamePhase::GameOver => {
                self.reset();
                log::info!("Restarted (seed {})", self.seed);
                true
            }
            GamePhase::Playing | GamePhase::Respawning => false,
        }
    }

    /// Shared generator for spawns and background
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Player position as a float vector (effect origin)
    pub fn player_pos(&self) -> Vec2 {
        Vec2::new(self.player.x as f32, self.player.y as f32)
    }

    /// Respawn target as a float vector
    pub fn respawn_pos(&self) -> Vec2 {
        Vec2::new(self.player.respawn_x as f32, self.player.respawn_y as f32)
    }

    /// Panics in debug builds if a state invariant is broken
    pub fn debug_check_invariants(&self) {
        debug_assert!(self.player.lives <= START_LIVES, "lives above maximum");
        debug_assert!(
            self.player.lives > 0 || self.phase == GamePhase::GameOver,
            "no lives left outside game over"
        );
        debug_assert!(
            (PLAYER_MIN_X..=PLAYER_MAX_X).contains(&self.player.x)
                && (PLAYER_MIN_Y..=PLAYER_MAX_Y).contains(&self.player.y),
            "player outside field"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_fresh() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.invincible, 0);
        assert_eq!((state.player.x, state.player.y), (80, 80));
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.explosions.is_empty());
        assert!(state.death_rays.is_empty());
        assert!(state.respawn_rays.is_empty());
        assert_eq!(state.terrain.len(), 30);
        assert_eq!(state.stars.len(), 30);
    }

    #[test]
    fn test_terrain_layout() {
        let state = GameState::new(3);
        for (i, seg) in state.terrain.iter().enumerate() {
            assert_eq!(seg.x, i as i32 * 10);
            assert!((20..=40).contains(&seg.height));
            assert_eq!(seg.height % 4, 0);
            assert_eq!(seg.y + seg.height, FIELD_HEIGHT);
        }
    }

    #[test]
    fn test_star_ranges() {
        let state = GameState::new(11);
        for star in &state.stars {
            assert!((0.0..256.0).contains(&star.x));
            assert!((0.0..=120.0).contains(&star.y));
            assert!((0.5..1.5).contains(&star.speed));
        }
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut state = GameState::new(5);
        state.score = 500;
        state.player.x = 100;
        assert!(!state.request_restart());
        assert_eq!(state.score, 500);
        assert_eq!(state.player.x, 100);

        state.phase = GamePhase::Respawning;
        assert!(!state.request_restart());
        assert_eq!(state.phase, GamePhase::Respawning);

        state.phase = GamePhase::GameOver;
        state.player.lives = 0;
        assert!(state.request_restart());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.lives, 3);
    }

    #[test]
    fn test_reset_rerolls_background() {
        let mut state = GameState::new(42);
        let stars_before = state.stars.clone();
        state.reset();
        assert_eq!(state.stars.len(), 30);
        assert_ne!(state.stars, stars_before);
    }

    #[test]
    fn test_steer_clamps_each_axis() {
        let mut player = Player {
            x: 9,
            y: 139,
            ..Default::default()
        };
        player.steer(true, false, false, true);
        assert_eq!((player.x, player.y), (8, 140));

        // Opposite directions cancel out
        player.steer(true, true, true, true);
        assert_eq!((player.x, player.y), (10, 140));
    }

    #[test]
    fn test_homing_steps_on_stride() {
        let mut enemy = Enemy {
            x: 101,
            y: 50,
            kind: EnemyKind::Homing,
        };
        enemy.advance(80);
        assert_eq!((enemy.x, enemy.y), (100, 51));
        enemy.advance(80);
        assert_eq!((enemy.x, enemy.y), (99, 51));

        let mut basic = Enemy {
            x: 101,
            y: 50,
            kind: EnemyKind::Basic,
        };
        basic.advance(80);
        assert_eq!((basic.x, basic.y), (100, 50));
    }

    #[test]
    fn test_homing_steps_on_negative_stride() {
        let mut enemy = Enemy {
            x: -9,
            y: 50,
            kind: EnemyKind::Homing,
        };
        enemy.advance(10);
        assert_eq!((enemy.x, enemy.y), (-10, 49));
    }
}
