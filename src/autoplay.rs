//! Demo/headless player
//!
//! Pops the highest visible bubble every `reaction` seconds. Bombs are
//! skipped unless `pop_bombs` is set.

use crate::sim::{GameState, PopInput, TickInput};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Seconds between pops
    pub reaction: f32,
    pub pop_bombs: bool,
    cooldown: f32,
}

impl Autopilot {
    pub fn new(reaction: f32, pop_bombs: bool) -> Self {
        Self {
            reaction: reaction.max(0.0),
            pop_bombs,
            cooldown: 0.0,
        }
    }

    /// Input for the next tick of `dt` seconds
    pub fn next_input(&mut self, state: &GameState, dt: f32) -> TickInput {
        self.cooldown -= dt.max(0.0);
        if self.cooldown > 0.0 || !state.is_running() {
            return TickInput::default();
        }

        // Highest bubble that is at least partly on screen
        let target = state
            .bubbles
            .iter()
            .filter(|b| !b.popped && (self.pop_bombs || !b.is_bomb()))
            .filter(|b| b.pos.y + b.size > 0.0 && b.pos.y < state.viewport.height)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        match target {
            Some(bubble) => {
                self.cooldown = self.reaction;
                TickInput {
                    pops: vec![PopInput {
                        id: bubble.id,
                        at: Some(bubble.center()),
                    }],
                }
            }
            None => TickInput::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, StartSignal, Viewport, tick};
    use crate::tuning::Tuning;

    fn play(pop_bombs: bool, bomb_probability: f64) -> GameState {
        let tuning = Tuning {
            bomb_probability,
            ..Tuning::default()
        };
        let mut state = GameState::new(5, tuning, Viewport::new(400.0, 800.0));
        state.start(StartSignal::new("Bot", 10)).unwrap();
        let mut bot = Autopilot::new(0.3, pop_bombs);
        let dt = 1.0 / 60.0;
        for _ in 0..(12 * 60) {
            let input = bot.next_input(&state, dt);
            tick(&mut state, &input, dt);
            if state.phase == GamePhase::Ended {
                break;
            }
        }
        state
    }

    #[test]
    fn test_careful_bot_outlasts_the_clock() {
        let state = play(false, 0.1);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.end_reason, Some(crate::sim::EndReason::TimeUp));
        assert!(state.score > 0);
    }

    #[test]
    fn test_reckless_bot_hits_a_bomb() {
        let state = play(true, 1.0);
        assert_eq!(state.end_reason, Some(crate::sim::EndReason::Bomb));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_waits_for_cooldown() {
        let mut state = GameState::new(5, Tuning::default(), Viewport::new(400.0, 800.0));
        state.start(StartSignal::new("Bot", 60)).unwrap();
        tick(&mut state, &TickInput::default(), 0.2);
        // Make sure something is poppable
        for b in &mut state.bubbles {
            b.kind = crate::sim::BubbleKind::Normal { glyph: 0 };
        }

        let mut bot = Autopilot::new(1.0, false);
        assert_eq!(bot.next_input(&state, 0.1).pops.len(), 1);
        assert!(bot.next_input(&state, 0.1).pops.is_empty());
    }
}
