//! Bubble spawning
//!
//! Bubbles enter just below the bottom edge at a random horizontal
//! position. When the population cap is reached the spawn is skipped.

use glam::Vec2;
use rand::Rng;

use super::bubble::{Bubble, BubbleId, BubbleKind, EMOJI_PALETTE, max_left};
use super::state::{GameEvent, GameState};

/// Try to add one bubble; returns its ID, or `None` when at the cap
pub fn spawn_bubble(state: &mut GameState) -> Option<BubbleId> {
    let cap = state.difficulty.max_bubbles(&state.tuning);
    if state.bubbles.len() >= cap {
        return None;
    }

    let t = &state.tuning;
    let size = state.rng.random_range(t.min_size..=t.max_size);
    let anchor_x = state.rng.random::<f32>() * max_left(state.viewport.width, size);
    let amplitude = state.rng.random_range(t.min_amplitude..=t.max_amplitude);
    let frequency = state.rng.random_range(t.min_frequency..=t.max_frequency);
    let glyph = state.rng.random_range(0..EMOJI_PALETTE.len()) as u8;
    let kind = if state.rng.random_bool(t.bomb_probability) {
        BubbleKind::Bomb
    } else {
        BubbleKind::Normal { glyph }
    };
    let vertical_speed = state.difficulty.vertical_speed(t);

    let id = state.next_bubble_id();
    state.bubbles.push(Bubble {
        id,
        kind,
        size,
        pos: Vec2::new(anchor_x, -size),
        anchor_x,
        amplitude,
        frequency,
        born_at: state.clock,
        vertical_speed,
        repulsion: 0.0,
        popped: false,
    });
    log::debug!("Spawned bubble {id} ({kind:?}, {size:.0}px)");
    state.push_event(GameEvent::Spawned { id });
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use crate::tuning::Tuning;

    fn state_with(tuning: Tuning, viewport: Viewport) -> GameState {
        GameState::new(42, tuning, viewport)
    }

    #[test]
    fn test_spawned_bubble_within_ranges() {
        let mut state = state_with(Tuning::default(), Viewport::new(800.0, 600.0));
        for _ in 0..20 {
            spawn_bubble(&mut state).unwrap();
        }
        for b in &state.bubbles {
            assert!((30.0..=90.0).contains(&b.size));
            assert!((10.0..=30.0).contains(&b.amplitude));
            assert!((1.0..=3.0).contains(&b.frequency));
            assert!(b.pos.x >= 0.0 && b.pos.x <= 800.0 - b.size);
            assert_eq!(b.pos.y, -b.size);
            assert_eq!(b.repulsion, 0.0);
            assert!(!b.popped);
        }
    }

    #[test]
    fn test_cap_blocks_spawn() {
        let mut state = state_with(Tuning::default(), Viewport::new(800.0, 600.0));
        for _ in 0..20 {
            assert!(spawn_bubble(&mut state).is_some());
        }
        assert!(spawn_bubble(&mut state).is_none());
        assert_eq!(state.bubbles.len(), 20);

        // Ten seconds of difficulty buys one more slot
        state.difficulty.elapsed = 10.0;
        assert!(spawn_bubble(&mut state).is_some());
        assert!(spawn_bubble(&mut state).is_none());
    }

    #[test]
    fn test_zero_cap_never_spawns() {
        let tuning = Tuning {
            base_max_bubbles: 0,
            ..Tuning::default()
        };
        let mut state = state_with(tuning, Viewport::new(800.0, 600.0));
        assert!(spawn_bubble(&mut state).is_none());
        assert!(state.bubbles.is_empty());
    }

    #[test]
    fn test_degenerate_viewport_spawns_at_left_edge() {
        let mut state = state_with(Tuning::default(), Viewport::new(0.0, 0.0));
        spawn_bubble(&mut state).unwrap();
        assert_eq!(state.bubbles[0].pos.x, 0.0);
    }

    #[test]
    fn test_bomb_ratio_roughly_ten_percent() {
        let tuning = Tuning {
            base_max_bubbles: 10_000,
            ..Tuning::default()
        };
        let mut state = state_with(tuning, Viewport::new(800.0, 600.0));
        for _ in 0..5000 {
            spawn_bubble(&mut state);
        }
        let bombs = state.bubbles.iter().filter(|b| b.is_bomb()).count();
        assert!((350..=650).contains(&bombs), "bombs = {bombs}");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = state_with(Tuning::default(), Viewport::new(800.0, 600.0));
        let a = spawn_bubble(&mut state).unwrap();
        let b = spawn_bubble(&mut state).unwrap();
        assert_ne!(a, b);
    }
}
