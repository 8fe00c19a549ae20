//! Scene composition: game state in, draw commands out

use super::commands::{DrawCommand, Surface, palette};
use crate::assets::SpriteId;
use crate::consts::*;
use crate::sim::{EnemyKind, GamePhase, GameState};

/// Emit one frame. Read-only over the state.
pub fn draw_scene(state: &GameState, surface: &mut dyn Surface) {
    let frame = state.time_ticks;
    let t = frame as f32;
    let width = FIELD_WIDTH as f32;

    surface.submit(DrawCommand::Clear { col: palette::BLACK });

    // Parallax stars
    for star in &state.stars {
        surface.submit(DrawCommand::Pixel {
            x: (star.x - t * star.speed / 2.0).rem_euclid(width),
            y: star.y,
            col: palette::WHITE,
        });
    }

    // Hills scroll at half speed and wrap on their own period
    for seg in &state.terrain {
        let x = (seg.x as f32 - t / 2.0).rem_euclid(TERRAIN_PERIOD as f32);
        if x < width {
            surface.submit(DrawCommand::Rect {
                x,
                y: seg.y as f32,
                w: TERRAIN_SEGMENT_WIDTH,
                h: seg.height as f32,
                col: palette::DARK_GREEN,
            });
        }
    }

    match state.phase {
        GamePhase::Playing => {
            draw_enemies(state, surface);
            draw_player(state, surface);
        }
        GamePhase::Respawning => draw_enemies(state, surface),
        GamePhase::GameOver => {}
    }

    // Rings grow as they age; fresh player explosions start below zero radius
    for e in &state.explosions {
        let r = (ENEMY_EXPLOSION_TICKS - e.ttl) as f32;
        if r >= 0.0 {
            surface.submit(DrawCommand::CircleOutline {
                x: e.x as f32,
                y: e.y as f32,
                r,
                col: palette::RED + (e.ttl.rem_euclid(3)) as u8,
            });
        }
    }

    for ray in &state.death_rays {
        let len = 20.0 * (ray.life as f32 / DEATH_RAY_LIFETIME as f32);
        let tail = ray.pos - ray.vel * len;
        surface.submit(DrawCommand::Line {
            x1: ray.pos.x,
            y1: ray.pos.y,
            x2: tail.x,
            y2: tail.y,
            col: palette::WHITE,
        });
    }

    for ray in &state.respawn_rays {
        surface.submit(DrawCommand::Line {
            x1: ray.pos.x,
            y1: ray.pos.y,
            x2: ray.target.x,
            y2: ray.target.y,
            col: palette::WHITE + (ray.life.rem_euclid(8)) as u8,
        });
    }

    text(surface, 4.0, 4.0, format!("SCORE: {}", state.score), palette::WHITE);
    text(
        surface,
        4.0,
        14.0,
        format!("LIVES: {}", state.player.lives),
        palette::WHITE,
    );

    if state.phase == GamePhase::GameOver {
        let cx = (FIELD_WIDTH / 2) as f32;
        let cy = (FIELD_HEIGHT / 2) as f32;
        text(surface, cx - 30.0, cy, "GAME OVER".into(), (frame % 16) as u8);
        text(
            surface,
            cx - 50.0,
            cy + 10.0,
            "PRESS R TO RESTART".into(),
            palette::WHITE,
        );
    }
}

fn draw_enemies(state: &GameState, surface: &mut dyn Surface) {
    for enemy in &state.enemies {
        let sprite = match enemy.kind {
            EnemyKind::Basic => SpriteId::BasicEnemy,
            EnemyKind::Homing => SpriteId::HomingEnemy,
        };
        surface.submit(DrawCommand::Sprite {
            x: enemy.x as f32,
            y: enemy.y as f32,
            sprite,
        });
    }
}

/// Ship (blinking while invincible) and its bullets
fn draw_player(state: &GameState, surface: &mut dyn Surface) {
    let player = &state.player;
    if !player.is_invincible() || state.time_ticks % 4 < 2 {
        surface.submit(DrawCommand::Sprite {
            x: player.x as f32,
            y: player.y as f32,
            sprite: SpriteId::Player,
        });
    }

    for bullet in &state.bullets {
        surface.submit(DrawCommand::Rect {
            x: bullet.x as f32,
            y: bullet.y as f32,
            w: 4.0,
            h: 1.0,
            col: palette::YELLOW,
        });
    }
}

fn text(surface: &mut dyn Surface, x: f32, y: f32, text: String, col: u8) {
    surface.submit(DrawCommand::Text { x, y, text, col });
}
