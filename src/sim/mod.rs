//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or storage dependencies

pub mod bubble;
pub mod collision;
pub mod difficulty;
pub mod scheduler;
pub mod spawner;
pub mod state;
pub mod tick;

pub use bubble::{BOMB_EMOJI, Bubble, BubbleId, BubbleKind, EMOJI_PALETTE, pop_pitch};
pub use collision::{Overlap, apply_repulsion, check_overlap, damp_repulsion};
pub use difficulty::Difficulty;
pub use scheduler::{Scheduler, Timer, TimerAction};
pub use spawner::spawn_bubble;
pub use state::{EndReason, GameEvent, GamePhase, GameState, StartSignal, Viewport};
pub use tick::{PopInput, PopOutcome, TickInput, pop_bubble, tick};
