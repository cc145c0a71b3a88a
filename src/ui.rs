//! Menu and HUD helpers
//!
//! Platform-free pieces of the overlays: clock text, the duration picker on
//! the start screen, and leaderboard row labels.

use crate::consts::{DEFAULT_DURATION_SECS, DURATION_STEP_SECS, MIN_DURATION_SECS};
use crate::highscores::LeaderboardEntry;

/// Vertical drag distance (px) per duration step on touch screens
pub const TOUCH_STEP_PX: f32 = 15.0;

/// Format seconds as `HH : MM : SS`
pub fn format_time(total_secs: u32) -> String {
    let hrs = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{hrs:02} : {mins:02} : {secs:02}")
}

/// Session length selector driven by scroll wheel or vertical drag
///
/// Scrolling/dragging down adds a step, up removes one, never going below
/// the minimum duration.
#[derive(Debug, Clone)]
pub struct DurationPicker {
    secs: u32,
    last_touch_y: Option<f32>,
}

impl Default for DurationPicker {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}

impl DurationPicker {
    pub fn new(secs: u32) -> Self {
        Self {
            secs: secs.max(MIN_DURATION_SECS),
            last_touch_y: None,
        }
    }

    pub fn secs(&self) -> u32 {
        self.secs
    }

    pub fn increase(&mut self) {
        self.secs = self.secs.saturating_add(DURATION_STEP_SECS);
    }

    pub fn decrease(&mut self) {
        self.secs = self
            .secs
            .saturating_sub(DURATION_STEP_SECS)
            .max(MIN_DURATION_SECS);
    }

    /// Mouse wheel; positive `delta_y` is scrolling down
    pub fn on_wheel(&mut self, delta_y: f64) {
        if delta_y > 0.0 {
            self.increase();
        } else {
            self.decrease();
        }
    }

    pub fn on_touch_start(&mut self, y: f32) {
        self.last_touch_y = Some(y);
    }

    /// Returns true if the duration changed
    pub fn on_touch_move(&mut self, y: f32) -> bool {
        let Some(last) = self.last_touch_y else {
            return false;
        };
        let diff = y - last;
        if diff.abs() < TOUCH_STEP_PX {
            return false;
        }
        if diff > 0.0 {
            self.increase();
        } else {
            self.decrease();
        }
        self.last_touch_y = Some(y);
        true
    }

    pub fn on_touch_end(&mut self) {
        self.last_touch_y = None;
    }

    /// Display text for the picker
    pub fn label(&self) -> String {
        format_time(self.secs)
    }
}

/// Presentation of one leaderboard row
#[derive(Debug, Clone, PartialEq)]
pub struct RankRow {
    pub text: String,
    /// Font size in `em`
    pub font_em: f32,
    /// CSS color
    pub color: &'static str,
}

/// Build the row for the entry at zero-based `index` in the ranked view
pub fn rank_row(index: usize, entry: &LeaderboardEntry) -> RankRow {
    let (name, score) = (&entry.name, entry.score);
    match index {
        0 => RankRow {
            text: format!("1st {name} 👑 - {score}"),
            font_em: 2.5,
            color: "gold",
        },
        1 => RankRow {
            text: format!("2nd {name} 🥈 - {score}"),
            font_em: 2.0,
            color: "silver",
        },
        2 => RankRow {
            text: format!("3rd {name} 🥉 - {score}"),
            font_em: 1.5,
            color: "#cd7f32",
        },
        _ => RankRow {
            text: format!("{}th {name} - {score}", index + 1),
            font_em: 1.2,
            color: "black",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00 : 00 : 00");
        assert_eq!(format_time(60), "00 : 01 : 00");
        assert_eq!(format_time(3725), "01 : 02 : 05");
    }

    #[test]
    fn test_picker_steps() {
        let mut picker = DurationPicker::default();
        assert_eq!(picker.secs(), 60);
        picker.on_wheel(1.0);
        assert_eq!(picker.secs(), 120);
        picker.on_wheel(-1.0);
        picker.on_wheel(-1.0);
        assert_eq!(picker.secs(), 10);
        picker.on_wheel(-1.0);
        assert_eq!(picker.secs(), 10);
        // Leaving the floor goes up a full step from it
        picker.increase();
        assert_eq!(picker.secs(), 70);
    }

    #[test]
    fn test_touch_drag_needs_threshold() {
        let mut picker = DurationPicker::default();
        assert!(!picker.on_touch_move(100.0));

        picker.on_touch_start(100.0);
        assert!(!picker.on_touch_move(110.0));
        assert!(picker.on_touch_move(116.0));
        assert_eq!(picker.secs(), 120);
        // Threshold measured from the last step
        assert!(!picker.on_touch_move(125.0));
        assert!(picker.on_touch_move(100.0));
        assert_eq!(picker.secs(), 60);

        picker.on_touch_end();
        assert!(!picker.on_touch_move(300.0));
    }

    #[test]
    fn test_rank_rows() {
        let entry = LeaderboardEntry {
            name: "Ann".to_string(),
            score: 30,
        };
        assert_eq!(rank_row(0, &entry).text, "1st Ann 👑 - 30");
        assert_eq!(rank_row(1, &entry).color, "silver");
        assert_eq!(rank_row(2, &entry).text, "3rd Ann 🥉 - 30");
        let row = rank_row(4, &entry);
        assert_eq!(row.text, "5th Ann - 30");
        assert_eq!(row.font_em, 1.2);
    }
}
