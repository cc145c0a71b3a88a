//! Data-driven game balance
//!
//! Every number that shapes how a session plays lives here so it can be
//! tweaked from JSON without touching the simulation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Balance values consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speed ===
    /// Vertical rise speed at difficulty 0 (pixels/s)
    pub base_speed: f32,
    /// Extra rise speed per second of difficulty
    pub speed_factor: f32,

    // === Population ===
    /// Active bubble cap at difficulty 0
    pub base_max_bubbles: usize,
    /// Seconds of difficulty per extra allowed bubble
    pub cap_growth_secs: f32,

    // === Spawning ===
    /// Spawn interval at difficulty 0 (seconds)
    pub spawn_interval: f32,
    /// Shortest spawn interval (seconds)
    pub min_spawn_interval: f32,
    /// Interval reduction per whole second of difficulty
    pub spawn_interval_step: f32,
    /// Bubble diameter range (pixels)
    pub min_size: f32,
    pub max_size: f32,
    /// Horizontal sway amplitude range (pixels)
    pub min_amplitude: f32,
    pub max_amplitude: f32,
    /// Sway frequency range (rad/s)
    pub min_frequency: f32,
    pub max_frequency: f32,
    /// Chance a new bubble is a bomb
    pub bomb_probability: f64,

    // === Motion ===
    /// Per-tick multiplier applied to repulsion offsets
    pub offset_damping: f32,

    // === Scoring ===
    /// Points for popping a normal bubble
    pub pop_reward: i64,
    /// Points lost when a bubble escapes off the top
    pub miss_penalty: i64,

    // === Delays (seconds) ===
    /// Pop animation time before a bubble is removed
    pub pop_fade: f32,
    /// Delay between popping a bomb and the game ending
    pub bomb_end_delay: f32,
    /// Delay before the game-over menu is shown
    pub game_over_menu_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 120.0,
            speed_factor: 2.0,

            base_max_bubbles: 20,
            cap_growth_secs: 10.0,

            spawn_interval: 0.5,
            min_spawn_interval: 0.2,
            spawn_interval_step: 0.02,
            min_size: 30.0,
            max_size: 90.0,
            min_amplitude: 10.0,
            max_amplitude: 30.0,
            min_frequency: 1.0,
            max_frequency: 3.0,
            bomb_probability: 0.1,

            offset_damping: 0.95,

            pop_reward: 2,
            miss_penalty: 1,

            pop_fade: 0.4,
            bomb_end_delay: 0.4,
            game_over_menu_delay: 0.8,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("invalid tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation (empty ranges, zero intervals)
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.min_size > 0.0 && self.min_size <= self.max_size,
            "bubble size range {}..{} is invalid",
            self.min_size,
            self.max_size
        );
        anyhow::ensure!(
            self.min_amplitude <= self.max_amplitude,
            "sway amplitude range is inverted"
        );
        anyhow::ensure!(
            self.min_frequency <= self.max_frequency,
            "sway frequency range is inverted"
        );
        anyhow::ensure!(
            self.min_spawn_interval > 0.0,
            "min_spawn_interval must be > 0"
        );
        anyhow::ensure!(
            self.cap_growth_secs > 0.0,
            "cap_growth_secs must be > 0"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.bomb_probability),
            "bomb_probability must be within 0..=1"
        );
        Ok(())
    }
}
