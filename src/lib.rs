//! Bubble Pop - A casual bubble popping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, repulsion, session lifecycle)
//! - `game`: Session driver wiring scores into the leaderboard and storage
//! - `highscores`: Per-player leaderboard and best-score tracking
//! - `persistence`: Key/value storage backends (LocalStorage, files, memory)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `ui`: Text formatting and menu input helpers
//! - `platform`: Browser/native platform abstraction
//! - `autoplay`: Demo/headless bot player
//! - `audio`: Sound cues per event (Web Audio playback in the browser)
//! - `renderer`: Browser-only DOM drawing

pub mod audio;
pub mod autoplay;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use game::Game;
pub use highscores::{BestScore, Leaderboard, LeaderboardEntry};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Name used when the player leaves the name field blank
    pub const DEFAULT_PLAYER_NAME: &str = "Player";

    /// Session length choices (seconds)
    pub const DEFAULT_DURATION_SECS: u32 = 60;
    pub const MIN_DURATION_SECS: u32 = 10;
    pub const DURATION_STEP_SECS: u32 = 60;

    /// Volume of sound cues when not muted
    pub const CUE_VOLUME: f32 = 0.8;

    /// Largest frame delta fed to the simulation (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Sparkle effect (front end only)
    pub const SPARKLE_COUNT: usize = 5;
    pub const SPARKLE_JITTER: f32 = 10.0;
    pub const SPARKLE_LIFETIME_MS: i32 = 500;
}
