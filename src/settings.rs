//! Player preferences
//!
//! Persisted separately from scores.

use serde::{Deserialize, Serialize};

use crate::consts::{CUE_VOLUME, DEFAULT_DURATION_SECS, DEFAULT_PLAYER_NAME, MIN_DURATION_SECS};
use crate::persistence::{Storage, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Start screen ===
    /// Name pre-filled on the start screen
    pub player_name: String,
    /// Last chosen session length (seconds)
    pub duration_secs: u32,

    // === Audio ===
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no sparkle bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            duration_secs: DEFAULT_DURATION_SECS,

            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "bubble_pop_settings";

    /// Effective cue volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            CUE_VOLUME
        }
    }

    /// Flip mute; returns the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Flip reduced motion; returns the new state
    pub fn toggle_reduced_motion(&mut self) -> bool {
        self.reduced_motion = !self.reduced_motion;
        self.reduced_motion
    }

    /// Whether pop sparkles should be drawn
    pub fn sparkles_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Remember the last start-screen choices
    pub fn remember_start(&mut self, player_name: &str, duration_secs: u32) {
        let name = player_name.trim();
        if !name.is_empty() {
            self.player_name = name.to_string();
        }
        self.duration_secs = duration_secs.max(MIN_DURATION_SECS);
    }

    pub fn load(storage: &dyn Storage) -> Self {
        match load_json::<Settings>(storage, Self::STORAGE_KEY) {
            Some(mut settings) => {
                settings.duration_secs = settings.duration_secs.max(MIN_DURATION_SECS);
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        save_json(storage, Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}
