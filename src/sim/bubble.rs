//! Bubble entity
//!
//! Coordinates follow the page layout the bubbles are drawn into: `pos.x` is
//! the left edge, `pos.y` is the bottom edge measured upward from the bottom
//! of the viewport.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Emoji drawn on normal bubbles
pub const EMOJI_PALETTE: [&str; 14] = [
    "😀", "😂", "😎", "😍", "😜", "🤯", "🍎", "🍉", "🍊", "🍓", "💖", "💙", "💛", "💚",
];

/// Emoji drawn on bomb bubbles
pub const BOMB_EMOJI: &str = "💣";

/// Stable bubble identifier (unique within a session)
pub type BubbleId = u32;

/// What happens when the bubble is popped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubbleKind {
    /// Worth points; `glyph` indexes [`EMOJI_PALETTE`]
    Normal { glyph: u8 },
    /// Ends the game
    Bomb,
}

/// A floating bubble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: BubbleId,
    pub kind: BubbleKind,
    /// Diameter in pixels, fixed at creation
    pub size: f32,
    /// Left/bottom edge (see module docs)
    pub pos: Vec2,
    /// Horizontal position the sway oscillates around
    pub anchor_x: f32,
    /// Sway amplitude (pixels)
    pub amplitude: f32,
    /// Sway frequency (rad/s)
    pub frequency: f32,
    /// Session clock value at creation
    pub born_at: f32,
    /// Rise speed applied on the last tick
    pub vertical_speed: f32,
    /// Lateral displacement accumulated from collisions, decays each tick
    pub repulsion: f32,
    /// Set once by a pop; popped bubbles are frozen until removed
    pub popped: bool,
}

impl Bubble {
    pub fn is_bomb(&self) -> bool {
        self.kind == BubbleKind::Bomb
    }

    /// Emoji to draw for this bubble
    pub fn glyph(&self) -> &'static str {
        match self.kind {
            BubbleKind::Normal { glyph } => EMOJI_PALETTE[glyph as usize % EMOJI_PALETTE.len()],
            BubbleKind::Bomb => BOMB_EMOJI,
        }
    }

    /// Center point in viewport coordinates (y up)
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Horizontal position for the given session clock, clamped to the viewport
    pub fn sway_x(&self, clock: f32, viewport_width: f32) -> f32 {
        let age = clock - self.born_at;
        let x = self.anchor_x + self.amplitude * (self.frequency * age).sin() + self.repulsion;
        x.clamp(0.0, max_left(viewport_width, self.size))
    }

    /// True once the bubble has fully left the top of the viewport
    pub fn is_off_screen(&self, viewport_height: f32) -> bool {
        self.pos.y - self.size > viewport_height
    }

    /// Playback rate for the pop cue; smaller bubbles sound lower
    pub fn pop_pitch(&self) -> f32 {
        pop_pitch(self.size)
    }
}

/// Playback rate for a pop cue of a bubble of `size` pixels
pub fn pop_pitch(size: f32) -> f32 {
    1.0 + size / 100.0
}

/// Largest left edge that keeps a bubble of `size` inside `width`
///
/// Never negative, so a degenerate viewport pins bubbles to the left edge.
pub fn max_left(width: f32, size: f32) -> f32 {
    (width - size).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble(size: f32) -> Bubble {
        Bubble {
            id: 1,
            kind: BubbleKind::Normal { glyph: 0 },
            size,
            pos: Vec2::new(100.0, -size),
            anchor_x: 100.0,
            amplitude: 20.0,
            frequency: 2.0,
            born_at: 0.0,
            vertical_speed: 0.0,
            repulsion: 0.0,
            popped: false,
        }
    }

    #[test]
    fn test_sway_at_birth_is_anchor() {
        let b = bubble(40.0);
        assert_eq!(b.sway_x(0.0, 800.0), 100.0);
    }

    #[test]
    fn test_sway_clamped_to_viewport() {
        let mut b = bubble(40.0);
        b.repulsion = 10_000.0;
        assert_eq!(b.sway_x(1.0, 800.0), 760.0);
        b.repulsion = -10_000.0;
        assert_eq!(b.sway_x(1.0, 800.0), 0.0);
    }

    #[test]
    fn test_zero_width_viewport_pins_left() {
        let b = bubble(40.0);
        assert_eq!(b.sway_x(0.3, 0.0), 0.0);
        assert_eq!(max_left(0.0, 40.0), 0.0);
    }

    #[test]
    fn test_off_screen_needs_full_exit() {
        let mut b = bubble(50.0);
        b.pos.y = 650.0;
        assert!(!b.is_off_screen(600.0));
        b.pos.y = 650.5;
        assert!(b.is_off_screen(600.0));
    }

    #[test]
    fn test_pop_pitch_scales_with_size() {
        assert!((pop_pitch(30.0) - 1.3).abs() < 1e-6);
        assert!((pop_pitch(90.0) - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_glyphs() {
        let mut b = bubble(40.0);
        assert_eq!(b.glyph(), "😀");
        b.kind = BubbleKind::Bomb;
        assert_eq!(b.glyph(), BOMB_EMOJI);
        assert!(b.is_bomb());
    }
}
