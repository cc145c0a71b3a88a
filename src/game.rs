//! Session driver
//!
//! Owns the current `GameState` plus everything that outlives it: the
//! leaderboard, the best score, settings and the storage they live in.
//! Front ends feed it frame deltas and pops, and get back the tick's events
//! for audio and drawing after scores have been recorded.

use anyhow::Result;
use glam::Vec2;

use crate::highscores::{BestScore, Leaderboard};
use crate::persistence::Storage;
use crate::settings::Settings;
use crate::sim::{
    BubbleId, GameEvent, GameState, PopOutcome, StartSignal, TickInput, Viewport, pop_bubble,
    tick,
};
use crate::tuning::Tuning;

pub struct Game<S: Storage> {
    pub state: GameState,
    pub leaderboard: Leaderboard,
    pub best: BestScore,
    pub settings: Settings,
    storage: S,
}

impl<S: Storage> Game<S> {
    /// Load persisted data and create an idle session
    pub fn new(storage: S, tuning: Tuning, viewport: Viewport, seed: u64) -> Self {
        let leaderboard = Leaderboard::load(&storage);
        let best = BestScore::load(&storage);
        let settings = Settings::load(&storage);
        Self {
            state: GameState::new(seed, tuning, viewport),
            leaderboard,
            best,
            settings,
            storage,
        }
    }

    /// Begin the session and remember the start-screen choices
    pub fn start(&mut self, player_name: &str, duration_secs: u32) -> Result<()> {
        self.state
            .start(StartSignal::new(player_name, duration_secs))?;
        self.settings.remember_start(player_name, duration_secs);
        self.settings.save(&mut self.storage);
        Ok(())
    }

    /// Pop a bubble immediately (outside the tick)
    pub fn pop(&mut self, id: BubbleId, at: Option<Vec2>) -> PopOutcome {
        pop_bubble(&mut self.state, id, at)
    }

    /// Run one simulation step and settle its scoring side effects
    pub fn advance(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        tick(&mut self.state, input, dt);
        let events = self.state.drain_events();
        for event in &events {
            self.apply(event);
        }
        events
    }

    fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ScoreChanged { score, .. } => {
                if self.best.observe(*score) {
                    self.best.save(&mut self.storage);
                }
            }
            GameEvent::GameOver {
                player_name, score, ..
            } => {
                if self.leaderboard.record_result(player_name, *score) {
                    log::info!("Leaderboard updated: {player_name} -> {score}");
                }
                self.leaderboard.save(&mut self.storage);
            }
            _ => {}
        }
    }

    /// Replace the session with a fresh idle one
    pub fn restart(&mut self, seed: u64) {
        self.state = self.state.restart(seed);
        log::info!("Restarted with seed {seed}");
    }

    /// Re-read the leaderboard from storage (for display)
    pub fn reload_leaderboard(&mut self) -> &Leaderboard {
        self.leaderboard = Leaderboard::load(&self.storage);
        &self.leaderboard
    }

    /// Flip mute and persist it; returns the new cue volume
    pub fn toggle_mute(&mut self) -> f32 {
        let muted = self.settings.toggle_muted();
        self.settings.save(&mut self.storage);
        log::info!("Sound {}", if muted { "muted" } else { "on" });
        self.settings.effective_volume()
    }

    /// Flip reduced motion and persist it; returns true if sparkles still show
    pub fn toggle_reduced_motion(&mut self) -> bool {
        self.settings.toggle_reduced_motion();
        self.settings.save(&mut self.storage);
        self.settings.sparkles_enabled()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
