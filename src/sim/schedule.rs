//! Timed scene actions
//!
//! The obstacle spawn loop and the startup pause are timers owned by the
//! scene. They only advance while the world is running, and `clear` drops all
//! of them so a reload can never leave two spawn loops behind.

use serde::{Deserialize, Serialize};

/// Something the scene does when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledAction {
    SpawnObstacles,
    PauseWorld,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    action: ScheduledAction,
    /// Seconds between firings (repeating) or before the single firing
    interval: f32,
    elapsed: f32,
    repeating: bool,
}

/// Ordered set of pending timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `action` every `interval` seconds, starting one interval from now
    pub fn repeat_forever(&mut self, action: ScheduledAction, interval: f32) {
        self.timers.push(Timer {
            action,
            interval,
            elapsed: 0.0,
            repeating: true,
        });
    }

    /// Fire `action` once after `delay` seconds
    pub fn run_after(&mut self, action: ScheduledAction, delay: f32) {
        self.timers.push(Timer {
            action,
            interval: delay,
            elapsed: 0.0,
            repeating: false,
        });
    }

    /// Advance all timers and return the actions that fired, in firing order
    pub fn advance(&mut self, dt: f32) -> Vec<ScheduledAction> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            timer.elapsed += dt;
            if timer.repeating {
                if timer.interval <= 0.0 {
                    continue;
                }
                while timer.elapsed >= timer.interval {
                    timer.elapsed -= timer.interval;
                    fired.push(timer.action);
                }
            } else if timer.elapsed >= timer.interval {
                fired.push(timer.action);
            }
        }
        self.timers.retain(|t| t.repeating || t.elapsed < t.interval);
        fired
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_scheduled(&self, action: ScheduledAction) -> bool {
        self.timers.iter().any(|t| t.action == action)
    }

    /// Number of pending timers for `action`
    pub fn count(&self, action: ScheduledAction) -> usize {
        self.timers.iter().filter(|t| t.action == action).count()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_fires_each_interval() {
        let mut s = Scheduler::new();
        s.repeat_forever(ScheduledAction::SpawnObstacles, 4.0);

        assert!(s.advance(3.9).is_empty());
        assert_eq!(s.advance(0.1), vec![ScheduledAction::SpawnObstacles]);
        assert!(s.advance(3.0).is_empty());
        // A long frame catches up on every missed firing
        assert_eq!(s.advance(6.0).len(), 2);
        assert!(s.is_scheduled(ScheduledAction::SpawnObstacles));
    }

    #[test]
    fn test_one_shot_fires_once_then_drops() {
        let mut s = Scheduler::new();
        s.run_after(ScheduledAction::PauseWorld, 0.5);
        assert!(s.advance(0.25).is_empty());
        assert_eq!(s.advance(0.25), vec![ScheduledAction::PauseWorld]);
        assert!(s.is_empty());
        assert!(s.advance(1.0).is_empty());
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut s = Scheduler::new();
        s.repeat_forever(ScheduledAction::SpawnObstacles, 1.0);
        s.run_after(ScheduledAction::PauseWorld, 1.0);
        s.clear();
        assert!(s.advance(5.0).is_empty());
        assert_eq!(s.count(ScheduledAction::SpawnObstacles), 0);
    }
}
