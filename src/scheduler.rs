//! Animation clock and named single-shot task scheduler.
//!
//! UI-driven timers (typing debounce, blur grace, celebration timeout) are
//! tracked as named tasks keyed by purpose. Scheduling a key that is already
//! pending supersedes the previous instance, so each task type has at most
//! one live timer and a superseding event can never race a stale callback.

use std::collections::HashMap;
use std::time::Instant;

// =============================================================================
// ANIMATION CLOCK
// =============================================================================

/// Monotonic wall-clock seconds since app start
pub struct AnimationClock {
    start: Instant,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock was created
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TASK SCHEDULER
// =============================================================================

/// Purpose of a scheduled task. At most one live task per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Fires after the user stops typing
    TypingDebounce,
    /// Fires after the creatures have watched the user long enough
    WatchLinger,
    /// Fires after a field blur, unless focus returned in the meantime
    BlurGrace,
    /// Fires when the celebration dance is over
    CelebrationEnd,
}

/// Pending single-shot tasks keyed by purpose
#[derive(Debug, Default)]
pub struct TaskScheduler {
    pending: HashMap<TaskKind, f32>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Schedule `kind` to fire `delay` seconds from `now`, superseding any
    /// pending instance of the same kind
    pub fn schedule_in(&mut self, kind: TaskKind, now: f32, delay: f32) {
        self.pending.insert(kind, now + delay);
    }

    /// Cancel a pending task, if any
    pub fn cancel(&mut self, kind: TaskKind) {
        self.pending.remove(&kind);
    }

    #[allow(dead_code)] // Public API for inspection in tests
    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.pending.contains_key(&kind)
    }

    /// Remove and return all tasks due at `now`, earliest first
    pub fn fire_due(&mut self, now: f32) -> Vec<TaskKind> {
        let mut due: Vec<(TaskKind, f32)> = self
            .pending
            .iter()
            .filter(|(_, &at)| at <= now)
            .map(|(&kind, &at)| (kind, at))
            .collect();
        due.sort_by(|a, b| a.1.total_cmp(&b.1));
        for (kind, _) in &due {
            self.pending.remove(kind);
        }
        due.into_iter().map(|(kind, _)| kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_in(TaskKind::BlurGrace, 0.0, 2.0);

        assert!(scheduler.fire_due(1.9).is_empty());
        assert_eq!(scheduler.fire_due(2.0), vec![TaskKind::BlurGrace]);
        assert!(scheduler.fire_due(10.0).is_empty());
    }

    #[test]
    fn test_schedule_supersedes_pending_instance() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_in(TaskKind::TypingDebounce, 0.0, 1.5);
        // Re-arming pushes the deadline out; only one instance remains
        scheduler.schedule_in(TaskKind::TypingDebounce, 1.0, 1.5);

        assert!(scheduler.fire_due(1.6).is_empty());
        assert_eq!(scheduler.fire_due(2.5), vec![TaskKind::TypingDebounce]);
    }

    #[test]
    fn test_cancel_removes_task() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_in(TaskKind::WatchLinger, 0.0, 3.0);
        scheduler.cancel(TaskKind::WatchLinger);

        assert!(!scheduler.is_pending(TaskKind::WatchLinger));
        assert!(scheduler.fire_due(5.0).is_empty());
    }

    #[test]
    fn test_due_tasks_fire_earliest_first() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_in(TaskKind::CelebrationEnd, 0.0, 4.0);
        scheduler.schedule_in(TaskKind::BlurGrace, 0.0, 2.0);

        assert_eq!(
            scheduler.fire_due(10.0),
            vec![TaskKind::BlurGrace, TaskKind::CelebrationEnd]
        );
    }
}
