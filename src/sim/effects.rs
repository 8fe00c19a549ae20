//! Death and respawn ray bursts
//!
//! A death burst flies outward from where the ship was hit and ages every
//! tick in every phase. A respawn burst starts on a ring around the spawn
//! point and eases inward; its exhaustion ends the `Respawning` phase.

use glam::Vec2;

use crate::consts::*;
use crate::direction_deg;

/// One outward ray of a death burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathRay {
    /// Degrees
    pub angle: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: i32,
}

/// One inward ray of a respawn burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnRay {
    /// Degrees
    pub angle: f32,
    pub pos: Vec2,
    pub target: Vec2,
    pub life: i32,
}

/// Angle of ray `i` when `count` rays share the full circle
#[inline]
fn ray_angle(i: usize, count: usize) -> f32 {
    i as f32 * (360.0 / count as f32)
}

/// Build a burst of `count` rays radiating from `origin`
pub fn death_burst(origin: Vec2, count: usize) -> Vec<DeathRay> {
    (0..count)
        .map(|i| {
            let angle = ray_angle(i, count);
            DeathRay {
                angle,
                pos: origin,
                vel: direction_deg(angle) * DEATH_RAY_SPEED,
                life: DEATH_RAY_LIFETIME,
            }
        })
        .collect()
}

/// Advance every ray one tick and drop the expired ones
pub fn age_death_rays(rays: &mut Vec<DeathRay>) {
    for ray in rays.iter_mut() {
        ray.pos += ray.vel;
        ray.life -= 1;
    }
    rays.retain(|r| r.life > 0);
}

/// Build a burst of `count` rays on a ring around `target`
pub fn respawn_burst(target: Vec2, count: usize) -> Vec<RespawnRay> {
    (0..count)
        .map(|i| {
            let angle = ray_angle(i, count);
            RespawnRay {
                angle,
                pos: target + direction_deg(angle) * RESPAWN_RAY_RADIUS,
                target,
                life: RESPAWN_RAY_LIFETIME,
            }
        })
        .collect()
}

/// Ease every ray toward its target and drop arrived or expired ones.
///
/// Returns true once no rays remain, which includes an empty batch.
pub fn converge_respawn_rays(rays: &mut Vec<RespawnRay>) -> bool {
    for ray in rays.iter_mut() {
        ray.pos += (ray.target - ray.pos) * RESPAWN_RAY_EASING;
        ray.life -= 1;
    }
    rays.retain(|r| r.pos.distance(r.target) > RESPAWN_ARRIVAL_DISTANCE && r.life > 0);
    rays.is_empty()
}
