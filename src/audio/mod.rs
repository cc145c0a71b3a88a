//! Bubble sound cues
//!
//! Every cue is synthesized with oscillators and gain envelopes, so the game
//! ships no audio assets. Pops, bombs included, are pitched by bubble size.

use crate::sim::{BubbleKind, GameEvent};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Cues the game can play
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundEffect {
    /// Normal bubble popped; `pitch` is the playback rate
    Pop { pitch: f32 },
    /// Bomb bubble popped; the boom is scaled by `pitch` like a pop
    Bomb { pitch: f32 },
    /// A bubble escaped off the top
    Miss,
    /// Session ended
    GameOver,
}

impl SoundEffect {
    /// Cue to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Popped {
                kind: BubbleKind::Bomb,
                pitch,
                ..
            } => Some(SoundEffect::Bomb { pitch: *pitch }),
            GameEvent::Popped { pitch, .. } => Some(SoundEffect::Pop { pitch: *pitch }),
            GameEvent::Missed { .. } => Some(SoundEffect::Miss),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EndReason, pop_pitch};

    #[test]
    fn test_every_pop_carries_its_size_pitch() {
        let normal = GameEvent::Popped {
            id: 1,
            kind: BubbleKind::Normal { glyph: 3 },
            pitch: pop_pitch(40.0),
        };
        let bomb = GameEvent::Popped {
            id: 2,
            kind: BubbleKind::Bomb,
            pitch: pop_pitch(80.0),
        };
        assert_eq!(
            SoundEffect::for_event(&normal),
            Some(SoundEffect::Pop { pitch: pop_pitch(40.0) })
        );
        assert_eq!(
            SoundEffect::for_event(&bomb),
            Some(SoundEffect::Bomb { pitch: pop_pitch(80.0) })
        );
    }

    #[test]
    fn test_silent_events() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Sparkle { x: 1.0, y: 2.0 }), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver {
                player_name: "Ann".into(),
                score: 4,
                reason: EndReason::Bomb,
            }),
            Some(SoundEffect::GameOver)
        );
    }
}
