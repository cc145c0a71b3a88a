//! Per-frame simulation step
//!
//! Phases run in a fixed order every tick: countdown, due timers, rise and
//! sway, pairwise repulsion, repulsion damping, off-screen cleanup.
//! Repulsion computed this tick only shows up in positions on the next one.

use glam::Vec2;

use super::bubble::{BubbleId, BubbleKind};
use super::collision::{apply_repulsion, damp_repulsion};
use super::scheduler::TimerAction;
use super::spawner::spawn_bubble;
use super::state::{EndReason, GameEvent, GamePhase, GameState};

/// A pointer/touch press on a bubble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopInput {
    pub id: BubbleId,
    /// Pointer position in page coordinates, used for the sparkle effect
    pub at: Option<Vec2>,
}

/// Input collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub pops: Vec<PopInput>,
}

/// What a pop attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    /// Unknown bubble, already popped, or session not running
    Ignored,
    /// Normal bubble popped and scored
    Scored,
    /// Bomb popped; the session ends after the fuse delay
    Bomb,
}

/// Pop a bubble
///
/// Each bubble pops at most once. Normal bubbles score immediately and are
/// removed after the fade delay; bombs score nothing and light the fuse.
pub fn pop_bubble(state: &mut GameState, id: BubbleId, at: Option<Vec2>) -> PopOutcome {
    if !state.is_running() {
        return PopOutcome::Ignored;
    }
    let Some(bubble) = state.bubbles.iter_mut().find(|b| b.id == id) else {
        return PopOutcome::Ignored;
    };
    if bubble.popped {
        return PopOutcome::Ignored;
    }
    bubble.popped = true;
    let kind = bubble.kind;
    let pitch = bubble.pop_pitch();

    log::debug!("Popped bubble {id} ({kind:?})");
    state.push_event(GameEvent::Popped { id, kind, pitch });

    if kind == BubbleKind::Bomb {
        let fuse = state.tuning.bomb_end_delay;
        state.schedule(fuse, TimerAction::EndGame(EndReason::Bomb));
        return PopOutcome::Bomb;
    }

    state.add_score(state.tuning.pop_reward);
    if let Some(at) = at {
        state.push_event(GameEvent::Sparkle { x: at.x, y: at.y });
    }
    let fade = state.tuning.pop_fade;
    state.schedule(fade, TimerAction::RemoveBubble(id));
    PopOutcome::Scored
}

/// Advance the session by `dt` seconds of wall-clock time
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Idle => return,
        GamePhase::Ended => {
            // Only the clock moves, for the game-over menu delay
            state.clock += dt.max(0.0);
            return;
        }
        GamePhase::Running => {}
    }

    for pop in &input.pops {
        pop_bubble(state, pop.id, pop.at);
    }

    // Clock anomalies: never run time backwards, and a zero step moves nothing
    if dt <= 0.0 || !dt.is_finite() {
        return;
    }
    state.clock += dt;

    // 1. Countdown
    state.difficulty.advance(dt);
    state.remaining = (state.remaining - dt).max(0.0);
    if state.remaining <= 0.0 {
        state.end_game(EndReason::TimeUp);
        return;
    }

    run_timers(state);
    if !state.is_running() {
        return;
    }

    // 2. Rise and sway
    let speed = state.difficulty.vertical_speed(&state.tuning);
    let clock = state.clock;
    let width = state.viewport.width;
    for bubble in state.bubbles.iter_mut().filter(|b| !b.popped) {
        bubble.vertical_speed = speed;
        bubble.pos.y += speed * dt;
        bubble.pos.x = bubble.sway_x(clock, width);
    }

    // 3. Pairwise repulsion (feeds next tick's sway)
    apply_repulsion(&mut state.bubbles, &mut state.rng);

    // 4. Damping
    damp_repulsion(&mut state.bubbles, state.tuning.offset_damping);

    // 5. Off-screen cleanup
    let height = state.viewport.height;
    let mut missed = Vec::new();
    state.bubbles.retain(|b| {
        if !b.popped && b.is_off_screen(height) {
            missed.push(b.id);
            false
        } else {
            true
        }
    });
    for id in missed {
        log::debug!("Bubble {id} escaped");
        state.push_event(GameEvent::Missed { id });
        state.add_score(-state.tuning.miss_penalty);
    }
}

/// Fire every timer due by now that still belongs to this running session
fn run_timers(state: &mut GameState) {
    while let Some(timer) = state.scheduler.pop_due(state.clock) {
        if timer.session != state.session_id || !state.is_running() {
            log::debug!("Dropped stale timer {:?}", timer.action);
            continue;
        }
        match timer.action {
            TimerAction::Spawn => {
                spawn_bubble(state);
                let interval = state.difficulty.spawn_interval(&state.tuning);
                state.schedule(interval, TimerAction::Spawn);
            }
            TimerAction::RemoveBubble(id) => {
                let before = state.bubbles.len();
                state.bubbles.retain(|b| b.id != id);
                if state.bubbles.len() != before {
                    state.push_event(GameEvent::Removed { id });
                }
            }
            TimerAction::EndGame(reason) => state.end_game(reason),
        }
    }
}
