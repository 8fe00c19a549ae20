//! Fixed-tick simulation module
//!
//! All gameplay logic lives here:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Insertion-ordered collections, filtered in place
//! - No rendering or platform dependencies (sounds go through `AudioSink`)

pub mod collision;
pub mod effects;
pub mod state;
pub mod tick;

pub use collision::{PlayerHit, resolve_bullet_hits, resolve_player_hit, within_hitbox};
pub use effects::{DeathRay, RespawnRay};
pub use state::{
    Bullet, Enemy, EnemyKind, Explosion, GamePhase, GameState, Player, Star, TerrainSegment,
};
pub use tick::{TickInput, TickOutcome, tick};
