//! Player preferences
//!
//! Persisted separately from the best-run record, through the same storage.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Input ===
    /// Horizontal drag (pixels) that counts as one swipe
    pub swipe_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            swipe_threshold: 30.0,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "lane_runner_settings";

    /// Load settings, falling back to defaults on missing or corrupt data
    pub fn load(storage: &impl Storage) -> Self {
        match load_json(storage, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut impl Storage) {
        match save_json(storage, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
