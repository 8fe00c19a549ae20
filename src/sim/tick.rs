//! Fixed timestep simulation tick
//!
//! Core game loop that advances the game state by exactly one frame.

use super::collision::{PlayerHit, resolve_bullet_hits, resolve_player_hit};
use super::effects::{age_death_rays, converge_respawn_rays, respawn_burst};
use super::state::{Bullet, Enemy, EnemyKind, GamePhase, GameState};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use rand::Rng;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held directions
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire pressed this tick (not held)
    pub fire: bool,
    /// Restart pressed this tick (only honoured in game over)
    pub restart: bool,
}

/// What happened during one tick, for the driver's bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Enemies destroyed by bullets
    pub kills: u32,
    pub player_hit: PlayerHit,
    /// Enemy spawned this tick
    pub spawned: bool,
    /// Game was reset from game over
    pub restarted: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioSink) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Playing => {
            update_player(state, input, audio);
            advance_bullets(state);
            advance_enemies(state);
            age_explosions(state);
            outcome.kills = resolve_bullet_hits(state, audio);
            outcome.player_hit = resolve_player_hit(state, audio);
            outcome.spawned = spawn_enemies(state);
        }
        GamePhase::Respawning => {
            update_respawn(state);
            advance_enemies(state);
            outcome.spawned = spawn_enemies(state);
        }
        GamePhase::GameOver => {}
    }

    // The death burst keeps playing in every phase
    age_death_rays(&mut state.death_rays);

    if state.respawn_timer > 0 {
        state.respawn_timer -= 1;
        if state.respawn_timer == 0 {
            begin_respawn(state);
        }
    }

    if input.restart {
        outcome.restarted = state.request_restart();
    }

    state.debug_check_invariants();
    outcome
}

/// Move the ship, fire on a fresh press and count down invincibility
fn update_player(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioSink) {
    state
        .player
        .steer(input.left, input.right, input.up, input.down);

    if input.fire {
        state.bullets.push(Bullet {
            x: state.player.x + BULLET_MUZZLE_OFFSET,
            y: state.player.y,
        });
        audio.play(SoundEffect::Fire);
    }

    state.player.invincible = state.player.invincible.saturating_sub(1);
}

/// Move bullets right and drop the ones past the right edge
pub fn advance_bullets(state: &mut GameState) {
    for bullet in state.bullets.iter_mut() {
        bullet.x += BULLET_SPEED;
    }
    state.bullets.retain(Bullet::on_field);
}

/// Move enemies left and drop the ones past the left edge
pub fn advance_enemies(state: &mut GameState) {
    let target_y = state.player.y;
    for enemy in state.enemies.iter_mut() {
        enemy.advance(target_y);
    }
    state.enemies.retain(Enemy::on_field);
}

fn age_explosions(state: &mut GameState) {
    for explosion in state.explosions.iter_mut() {
        explosion.ttl -= 1;
    }
    state.explosions.retain(|e| e.ttl > 0);
}

/// Count toward the next spawn; returns true when an enemy appeared
pub fn spawn_enemies(state: &mut GameState) -> bool {
    state.enemy_timer += 1;
    if state.enemy_timer <= SPAWN_INTERVAL_TICKS {
        return false;
    }
    state.enemy_timer = 0;

    let rng = state.rng();
    let kind = if rng.random_range(0..=SPAWN_ROLL_MAX) < SPAWN_BASIC_THRESHOLD {
        EnemyKind::Basic
    } else {
        EnemyKind::Homing
    };
    let y = rng.random_range(SPAWN_MIN_Y..=SPAWN_MAX_Y);

    state.enemies.push(Enemy {
        x: FIELD_WIDTH,
        y,
        kind,
    });
    log::debug!("Spawned {:?} enemy at y={}", kind, y);
    true
}

/// Start the converging ray burst at the respawn point
pub fn begin_respawn(state: &mut GameState) {
    state.respawn_rays = respawn_burst(state.respawn_pos(), state.ray_count);
    state.phase = GamePhase::Respawning;
    log::info!(
        "Respawning at ({}, {})",
        state.player.respawn_x,
        state.player.respawn_y
    );
}

/// Ease the respawn rays; once they are gone the ship reappears
fn update_respawn(state: &mut GameState) {
    if converge_respawn_rays(&mut state.respawn_rays) {
        state.phase = GamePhase::Playing;
        state.player.x = state.player.respawn_x;
        state.player.y = state.player.respawn_y;
        log::info!("Respawn complete");
    }
}
