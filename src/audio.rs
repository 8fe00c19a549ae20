//! Sound effect requests
//!
//! The simulation only asks for effects by number; the driver owns an
//! `AudioManager` built from the asset registry and decides what playing one
//! means on its platform.

use crate::assets::{AssetRegistry, SoundPatch};
use crate::settings::Settings;

/// Sound effect slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Bullet fired
    Fire,
    /// Enemy destroyed or ship hit
    Explosion,
    /// Last life lost
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::Fire,
        SoundEffect::Explosion,
        SoundEffect::GameOver,
    ];

    /// Sound bank slot number
    pub fn id(self) -> usize {
        match self {
            SoundEffect::Fire => 0,
            SoundEffect::Explosion => 1,
            SoundEffect::GameOver => 2,
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Records requests in order (handy for tests and replays)
impl AudioSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Discards every request
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl AudioSink for Silence {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Audio manager for the game.
///
/// Every effect shares channel 0, so a new request cuts off the previous one.
pub struct AudioManager {
    patches: Vec<SoundPatch>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Patch currently on the channel
    now_playing: Option<SoundEffect>,
    plays: [u32; 3],
}

impl AudioManager {
    pub fn new(assets: &AssetRegistry) -> Self {
        Self {
            patches: assets.sounds.to_vec(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            now_playing: None,
            plays: [0; 3],
        }
    }

    /// Build a manager with volumes taken from settings
    pub fn with_settings(assets: &AssetRegistry, settings: &Settings) -> Self {
        let mut manager = Self::new(assets);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn now_playing(&self) -> Option<SoundEffect> {
        self.now_playing
    }

    /// Times each effect was actually played
    pub fn play_count(&self, effect: SoundEffect) -> u32 {
        self.plays[effect.id()]
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(patch) = self.patches.get(effect.id()) else {
            log::warn!("No sound patch for {:?}", effect);
            return;
        };

        log::debug!(
            "Playing {:?}: {} notes at speed {} (vol {:.2}, {} ticks)",
            effect,
            patch.notes.len(),
            patch.speed,
            vol,
            patch.duration_ticks()
        );
        self.now_playing = Some(effect);
        self.plays[effect.id()] += 1;
    }
}
