//! Difficulty ramp
//!
//! Difficulty is simply seconds of play. Speed uses the fractional value,
//! the spawn interval uses whole seconds.

use crate::tuning::Tuning;

/// Accumulated play time driving the speed, cap and spawn-rate ramp
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Difficulty {
    /// Elapsed seconds of play
    pub elapsed: f32,
}

impl Difficulty {
    /// Accumulate a frame delta (negative deltas are ignored)
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Global rise speed shared by every bubble (pixels/s)
    pub fn vertical_speed(&self, tuning: &Tuning) -> f32 {
        tuning.base_speed + tuning.speed_factor * self.elapsed
    }

    /// Maximum number of bubbles allowed on screen
    pub fn max_bubbles(&self, tuning: &Tuning) -> usize {
        tuning.base_max_bubbles + (self.elapsed / tuning.cap_growth_secs).floor() as usize
    }

    /// Delay until the next spawn (seconds)
    pub fn spawn_interval(&self, tuning: &Tuning) -> f32 {
        let whole_secs = self.elapsed.floor();
        (tuning.spawn_interval - whole_secs * tuning.spawn_interval_step)
            .max(tuning.min_spawn_interval)
    }
}
