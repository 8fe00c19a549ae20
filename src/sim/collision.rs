//! Collision detection and resolution
//!
//! Every check uses the same center-distance proximity box: two entities touch
//! when they are less than `HIT_DISTANCE` apart on both axes independently.

use super::effects::death_burst;
use super::state::{Explosion, GamePhase, GameState};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;

/// Proximity hit-box test
#[inline]
pub fn within_hitbox(ax: i32, ay: i32, bx: i32, by: i32) -> bool {
    (ax - bx).abs() < HIT_DISTANCE && (ay - by).abs() < HIT_DISTANCE
}

/// Outcome of the player-vs-enemy pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerHit {
    /// No enemy touched the ship (or it was invincible)
    #[default]
    None,
    /// A life was lost and a respawn is pending
    LifeLost,
    /// The last life was lost
    Fatal,
}

/// Resolve bullets against enemies.
///
/// Bullets are processed in order; each takes the first enemy (in order) it
/// overlaps, and that enemy is removed before the next bullet scans. Returns
/// the number of enemies destroyed.
pub fn resolve_bullet_hits(state: &mut GameState, audio: &mut dyn AudioSink) -> u32 {
    let mut kills = 0;
    let enemies = &mut state.enemies;
    let explosions = &mut state.explosions;
    let score = &mut state.score;

    state.bullets.retain(|bullet| {
        let Some(idx) = enemies
            .iter()
            .position(|e| within_hitbox(bullet.x, bullet.y, e.x, e.y))
        else {
            return true;
        };

        let enemy = enemies.remove(idx);
        explosions.push(Explosion {
            x: enemy.x,
            y: enemy.y,
            ttl: ENEMY_EXPLOSION_TICKS,
        });
        *score += KILL_SCORE;
        audio.play(SoundEffect::Explosion);
        log::debug!("{:?} enemy destroyed at ({}, {})", enemy.kind, enemy.x, enemy.y);
        kills += 1;
        false
    });

    kills
}

/// Resolve the ship against enemies. At most one collision per tick.
pub fn resolve_player_hit(state: &mut GameState, audio: &mut dyn AudioSink) -> PlayerHit {
    if state.player.is_invincible() {
        return PlayerHit::None;
    }

    let (px, py) = (state.player.x, state.player.y);
    let Some(idx) = state
        .enemies
        .iter()
        .position(|e| within_hitbox(px, py, e.x, e.y))
    else {
        return PlayerHit::None;
    };

    state.enemies.remove(idx);
    state.player.lives = state.player.lives.saturating_sub(1);
    state.explosions.push(Explosion {
        x: px,
        y: py,
        ttl: PLAYER_EXPLOSION_TICKS,
    });
    state.death_rays = death_burst(state.player_pos(), state.ray_count);

    if state.player.lives == 0 {
        state.phase = GamePhase::GameOver;
        audio.play(SoundEffect::GameOver);
        log::info!("Game over with score {}", state.score);
        PlayerHit::Fatal
    } else {
        state.player.invincible = INVINCIBILITY_TICKS;
        audio.play(SoundEffect::Explosion);
        state.respawn_timer = RESPAWN_DELAY_TICKS;
        state.player.respawn_x = PLAYER_START_X;
        state.player.respawn_y = PLAYER_START_Y;
        log::info!("Ship hit, {} lives left", state.player.lives);
        PlayerHit::LifeLost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Enemy, EnemyKind};

    fn enemy(x: i32, y: i32) -> Enemy {
        Enemy {
            x,
            y,
            kind: EnemyKind::Basic,
        }
    }

    #[test]
    fn test_hitbox_is_strict() {
        assert!(within_hitbox(100, 50, 104, 53));
        assert!(within_hitbox(100, 50, 107, 43));
        assert!(!within_hitbox(100, 50, 108, 50));
        assert!(!within_hitbox(100, 50, 100, 42));
    }

    #[test]
    fn test_bullet_kills_enemy() {
        let mut state = GameState::new(1);
        state.bullets.push(Bullet { x: 100, y: 50 });
        state.enemies.push(enemy(104, 53));
        let mut sounds: Vec<SoundEffect> = Vec::new();

        let kills = resolve_bullet_hits(&mut state, &mut sounds);

        assert_eq!(kills, 1);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 100);
        assert_eq!(
            state.explosions,
            vec![Explosion {
                x: 104,
                y: 53,
                ttl: 10
            }]
        );
        assert_eq!(sounds, vec![SoundEffect::Explosion]);
    }

    #[test]
    fn test_bullet_miss_survives() {
        let mut state = GameState::new(1);
        state.bullets.push(Bullet { x: 100, y: 50 });
        state.enemies.push(enemy(100, 58));
        let mut sounds: Vec<SoundEffect> = Vec::new();

        assert_eq!(resolve_bullet_hits(&mut state, &mut sounds), 0);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.enemies.len(), 1);
        assert!(sounds.is_empty());
    }

    #[test]
    fn test_one_enemy_per_bullet() {
        let mut state = GameState::new(1);
        state.bullets.push(Bullet { x: 100, y: 50 });
        state.enemies.push(enemy(102, 50));
        state.enemies.push(enemy(98, 50));
        let mut sounds: Vec<SoundEffect> = Vec::new();

        resolve_bullet_hits(&mut state, &mut sounds);

        assert_eq!(state.enemies, vec![enemy(98, 50)]);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_first_bullet_wins_shared_enemy() {
        let mut state = GameState::new(1);
        state.bullets.push(Bullet { x: 100, y: 50 });
        state.bullets.push(Bullet { x: 101, y: 50 });
        state.enemies.push(enemy(103, 50));
        state.enemies.push(enemy(200, 100));
        let mut sounds: Vec<SoundEffect> = Vec::new();

        resolve_bullet_hits(&mut state, &mut sounds);

        // Second bullet finds nothing left to hit and survives
        assert_eq!(state.bullets, vec![Bullet { x: 101, y: 50 }]);
        assert_eq!(state.enemies, vec![enemy(200, 100)]);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_player_hit_loses_life() {
        let mut state = GameState::new(1);
        state.player.x = 100;
        state.player.y = 50;
        state.enemies.push(enemy(95, 45));
        state.enemies.push(enemy(103, 52));
        let mut sounds: Vec<SoundEffect> = Vec::new();

        let hit = resolve_player_hit(&mut state, &mut sounds);

        assert_eq!(hit, PlayerHit::LifeLost);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.invincible, 60);
        assert_eq!(state.respawn_timer, 60);
        assert_eq!((state.player.respawn_x, state.player.respawn_y), (80, 80));
        // Only the first overlapping enemy is consumed
        assert_eq!(state.enemies, vec![enemy(103, 52)]);
        assert_eq!(state.explosions[0].ttl, 20);
        assert_eq!((state.explosions[0].x, state.explosions[0].y), (100, 50));
        assert_eq!(state.death_rays.len(), 16);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(sounds, vec![SoundEffect::Explosion]);
    }

    #[test]
    fn test_fatal_hit() {
        let mut state = GameState::new(1);
        state.player.lives = 1;
        state.enemies.push(enemy(80, 80));
        let mut sounds: Vec<SoundEffect> = Vec::new();

        let hit = resolve_player_hit(&mut state, &mut sounds);

        assert_eq!(hit, PlayerHit::Fatal);
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.respawn_timer, 0);
        assert_eq!(sounds, vec![SoundEffect::GameOver]);
    }

    #[test]
    fn test_invincible_player_ignores_enemies() {
        let mut state = GameState::new(1);
        state.player.invincible = 5;
        state.enemies.push(enemy(80, 80));
        let mut sounds: Vec<SoundEffect> = Vec::new();

        assert_eq!(resolve_player_hit(&mut state, &mut sounds), PlayerHit::None);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.enemies.len(), 1);
    }
}
