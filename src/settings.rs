//! Driver settings
//!
//! Read once at startup from an optional JSON file. Every field has a
//! default, so a file only needs the keys it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TICK_RATE;

/// Problems loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    VolumeOutOfRange { field: &'static str, value: f32 },
    #[error("tick_rate must be at least 1")]
    ZeroTickRate,
}

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,

    // === Loop ===
    /// Ticks per second
    pub tick_rate: u32,
    /// Ticks to run before exiting
    pub run_ticks: u64,
    /// Sleep between ticks to hold the tick rate
    pub realtime: bool,
    /// Let the demo autopilot play
    pub autopilot: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            tick_rate: TICK_RATE,
            run_ticks: 60 * TICK_RATE as u64,
            realtime: false,
            autopilot: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Check value ranges serde cannot express
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::VolumeOutOfRange { field, value });
            }
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::ZeroTickRate);
        }
        Ok(())
    }
}
