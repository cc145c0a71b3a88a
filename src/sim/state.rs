//! Session state and lifecycle
//!
//! A `GameState` is one play-through: Idle until a start signal arrives,
//! Running while bubbles spawn and rise, Ended for good once the clock runs
//! out or a bomb goes off. Restarting builds a fresh state.

use anyhow::{Result, ensure};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bubble::{Bubble, BubbleId, BubbleKind};
use super::difficulty::Difficulty;
use super::scheduler::{Scheduler, TimerAction};
use crate::consts::{DEFAULT_PLAYER_NAME, MIN_DURATION_SECS};
use crate::tuning::Tuning;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the start signal
    Idle,
    /// Spawning and simulating
    Running,
    /// Terminal
    Ended,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    Bomb,
}

/// Visible play area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// External request to begin a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartSignal {
    pub player_name: String,
    pub duration_secs: u32,
}

impl StartSignal {
    pub fn new(player_name: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            player_name: player_name.into(),
            duration_secs,
        }
    }
}

/// Things that happened during a tick, for scoring, audio and rendering
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started {
        player_name: String,
        duration_secs: u32,
    },
    ScoreChanged {
        score: i64,
        delta: i64,
    },
    Spawned {
        id: BubbleId,
    },
    /// A bubble escaped off the top
    Missed {
        id: BubbleId,
    },
    /// Pop cue; `pitch` is the playback rate
    Popped {
        id: BubbleId,
        kind: BubbleKind,
        pitch: f32,
    },
    /// Transient effect at pointer coordinates
    Sparkle {
        x: f32,
        y: f32,
    },
    Removed {
        id: BubbleId,
    },
    GameOver {
        player_name: String,
        score: i64,
        reason: EndReason,
    },
}

/// One play-through (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Generation number; timers from other generations never fire
    pub session_id: u64,
    pub seed: u64,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub player_name: String,
    /// May go negative
    pub score: i64,
    pub duration_secs: u32,
    /// Seconds left on the countdown, never negative
    pub remaining: f32,
    pub difficulty: Difficulty,
    /// Seconds since the session started (keeps running after the end)
    pub clock: f32,
    /// Active bubbles in spawn order
    pub bubbles: Vec<Bubble>,
    pub end_reason: Option<EndReason>,
    /// Clock value when the session ended
    pub ended_at: Option<f32>,
    pub(crate) rng: Pcg32,
    pub(crate) scheduler: Scheduler,
    events: Vec<GameEvent>,
    next_id: BubbleId,
}

impl GameState {
    /// Create an idle session
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        Self {
            session_id: 1,
            seed,
            tuning,
            viewport,
            phase: GamePhase::Idle,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            score: 0,
            duration_secs: 0,
            remaining: 0.0,
            difficulty: Difficulty::default(),
            clock: 0.0,
            bubbles: Vec::new(),
            end_reason: None,
            ended_at: None,
            rng: Pcg32::seed_from_u64(seed),
            scheduler: Scheduler::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Build the idle successor session (fresh state, next generation)
    pub fn restart(&self, seed: u64) -> Self {
        let mut next = Self::new(seed, self.tuning.clone(), self.viewport);
        next.session_id = self.session_id + 1;
        next
    }

    /// Idle → Running
    ///
    /// Blank names fall back to the default player name. Durations below
    /// the minimum are rejected.
    pub fn start(&mut self, signal: StartSignal) -> Result<()> {
        ensure!(
            self.phase == GamePhase::Idle,
            "session already {:?}",
            self.phase
        );
        ensure!(
            signal.duration_secs >= MIN_DURATION_SECS,
            "duration must be at least {} seconds (got {})",
            MIN_DURATION_SECS,
            signal.duration_secs
        );

        let name = signal.player_name.trim();
        if !name.is_empty() {
            self.player_name = name.to_string();
        }
        self.duration_secs = signal.duration_secs;
        self.remaining = signal.duration_secs as f32;
        self.difficulty = Difficulty::default();
        self.phase = GamePhase::Running;

        log::info!(
            "Session {} started: {} for {}s",
            self.session_id,
            self.player_name,
            self.duration_secs
        );
        self.events.push(GameEvent::Started {
            player_name: self.player_name.clone(),
            duration_secs: self.duration_secs,
        });

        // First spawn is immediate, later ones follow the spawn interval
        self.schedule(0.0, TimerAction::Spawn);
        Ok(())
    }

    /// Running → Ended (no-op in any other phase)
    pub fn end_game(&mut self, reason: EndReason) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Ended;
        self.end_reason = Some(reason);
        self.ended_at = Some(self.clock);
        self.bubbles.clear();
        self.scheduler.clear();

        log::info!(
            "Session {} over ({:?}): {} scored {}",
            self.session_id,
            reason,
            self.player_name,
            self.score
        );
        self.events.push(GameEvent::GameOver {
            player_name: self.player_name.clone(),
            score: self.score,
            reason,
        });
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Whether the restart/leaderboard menu may be shown yet
    pub fn menu_ready(&self) -> bool {
        self.ended_at
            .is_some_and(|t| self.clock - t >= self.tuning.game_over_menu_delay)
    }

    /// Adjust the score (no lower bound)
    pub fn add_score(&mut self, delta: i64) {
        self.score += delta;
        self.events.push(GameEvent::ScoreChanged {
            score: self.score,
            delta,
        });
    }

    /// Allocate a new bubble ID
    pub fn next_bubble_id(&mut self) -> BubbleId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn bubble(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Queue `action` `delay` seconds from now for this session
    pub(crate) fn schedule(&mut self, delay: f32, action: TimerAction) {
        self.scheduler
            .schedule(self.session_id, self.clock + delay, action);
    }

    /// Number of pending timers (for inspection)
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle() -> GameState {
        GameState::new(7, Tuning::default(), Viewport::new(800.0, 600.0))
    }

    #[test]
    fn test_start_initializes_session() {
        let mut state = idle();
        state.start(StartSignal::new("  Alice ", 60)).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player_name, "Alice");
        assert_eq!(state.remaining, 60.0);
        assert_eq!(state.difficulty.elapsed, 0.0);
        assert!(state.scheduler.has_spawn(state.session_id));
    }

    #[test]
    fn test_blank_name_keeps_default() {
        let mut state = idle();
        state.start(StartSignal::new("   ", 10)).unwrap();
        assert_eq!(state.player_name, DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_start_rejects_short_duration() {
        let mut state = idle();
        assert!(state.start(StartSignal::new("Bob", 9)).is_err());
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut state = idle();
        state.start(StartSignal::new("Bob", 60)).unwrap();
        assert!(state.start(StartSignal::new("Bob", 60)).is_err());

        state.end_game(EndReason::TimeUp);
        assert!(state.start(StartSignal::new("Bob", 60)).is_err());
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_end_game_happens_once() {
        let mut state = idle();
        state.start(StartSignal::new("Bob", 60)).unwrap();
        state.drain_events();

        state.end_game(EndReason::Bomb);
        state.end_game(EndReason::TimeUp);

        let overs: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs.len(), 1);
        assert_eq!(state.end_reason, Some(EndReason::Bomb));
        assert_eq!(state.pending_timers(), 0);
    }

    #[test]
    fn test_end_game_ignored_while_idle() {
        let mut state = idle();
        state.end_game(EndReason::TimeUp);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_score_can_go_negative() {
        let mut state = idle();
        state.add_score(-1);
        state.add_score(-1);
        assert_eq!(state.score, -2);
    }

    #[test]
    fn test_restart_bumps_generation() {
        let mut state = idle();
        state.start(StartSignal::new("Bob", 60)).unwrap();
        let next = state.restart(8);
        assert_eq!(next.session_id, state.session_id + 1);
        assert_eq!(next.phase, GamePhase::Idle);
        assert_eq!(next.score, 0);
        assert!(next.bubbles.is_empty());
    }
}
