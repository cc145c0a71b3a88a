//! Delayed actions on the session clock
//!
//! Spawns, pop removals and the bomb fuse are queued here instead of on
//! platform timers. Every timer remembers the session that queued it and
//! only fires while that session is still the running one, so nothing from
//! a finished run can leak into the next.

use super::bubble::BubbleId;
use super::state::EndReason;

/// Work to perform when a timer comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Try to spawn a bubble, then queue the next spawn
    Spawn,
    /// Drop a popped bubble once its fade has played
    RemoveBubble(BubbleId),
    /// End the session
    EndGame(EndReason),
}

/// A queued action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    /// Session clock time the action becomes due
    pub due: f32,
    /// Session that queued the action
    pub session: u64,
    pub action: TimerAction,
}

/// Pending timers, fired in due order (ties in queue order)
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { timers: Vec::new() }
    }

    /// Queue `action` to run at `due`
    pub fn schedule(&mut self, session: u64, due: f32, action: TimerAction) {
        // Insert after every timer due at or before `due` to keep FIFO ties
        let idx = self.timers.partition_point(|t| t.due <= due);
        self.timers.insert(
            idx,
            Timer {
                due,
                session,
                action,
            },
        );
    }

    /// Remove and return the earliest timer due at or before `now`
    pub fn pop_due(&mut self, now: f32) -> Option<Timer> {
        if self.timers.first().is_some_and(|t| t.due <= now) {
            Some(self.timers.remove(0))
        } else {
            None
        }
    }

    /// Whether a spawn is already queued for `session`
    pub fn has_spawn(&self, session: u64) -> bool {
        self.timers
            .iter()
            .any(|t| t.session == session && t.action == TimerAction::Spawn)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(1, 0.8, TimerAction::RemoveBubble(2));
        s.schedule(1, 0.4, TimerAction::RemoveBubble(1));
        s.schedule(1, 0.5, TimerAction::Spawn);

        assert!(s.pop_due(0.3).is_none());
        assert_eq!(s.pop_due(1.0).unwrap().action, TimerAction::RemoveBubble(1));
        assert_eq!(s.pop_due(1.0).unwrap().action, TimerAction::Spawn);
        assert_eq!(s.pop_due(1.0).unwrap().action, TimerAction::RemoveBubble(2));
        assert!(s.is_empty());
    }

    #[test]
    fn test_ties_keep_queue_order() {
        let mut s = Scheduler::new();
        s.schedule(1, 0.4, TimerAction::RemoveBubble(7));
        s.schedule(1, 0.4, TimerAction::RemoveBubble(3));

        assert_eq!(s.pop_due(0.4).unwrap().action, TimerAction::RemoveBubble(7));
        assert_eq!(s.pop_due(0.4).unwrap().action, TimerAction::RemoveBubble(3));
    }

    #[test]
    fn test_has_spawn_is_per_session() {
        let mut s = Scheduler::new();
        s.schedule(1, 0.5, TimerAction::Spawn);
        assert!(s.has_spawn(1));
        assert!(!s.has_spawn(2));
    }
}
