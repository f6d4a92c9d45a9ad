//! Shared companion behavior state machine.
//!
//! A single process-wide behavior value drives target selection for both
//! creatures simultaneously; only per-creature spatial offset and phase
//! differ. Transitions are triggered by form events and by named scheduler
//! tasks, so no delayed transition can fire against stale state.

use crate::constants::*;
use crate::events::FormEvent;
use crate::scheduler::{TaskKind, TaskScheduler};

/// Mode governing companion target selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Behavior {
    /// Autonomous wandering
    #[default]
    Free,
    /// Stationed beside the form, looking at it
    WatchingForm,
    /// Stationed beside the form, following the pointer
    WatchingUser,
    /// Dancing around the form after a successful login
    Celebrating,
}

impl Behavior {
    /// Watching states share stationing and form avoidance
    pub fn is_watching(self) -> bool {
        matches!(self, Behavior::WatchingForm | Behavior::WatchingUser)
    }
}

/// State machine shared by both creatures
#[derive(Debug, Default)]
pub struct BehaviorMachine {
    behavior: Behavior,
    /// A keystroke happened within the debounce window
    typing: bool,
    /// Clock time the current celebration started
    celebration_start: f32,
}

impl BehaviorMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Seconds since the celebration started (0 outside of celebrations)
    pub fn celebration_elapsed(&self, now: f32) -> f32 {
        if self.behavior == Behavior::Celebrating {
            (now - self.celebration_start).max(0.0)
        } else {
            0.0
        }
    }

    /// Apply a form event at clock time `now`
    pub fn handle_event(&mut self, event: FormEvent, now: f32, scheduler: &mut TaskScheduler) {
        match event {
            FormEvent::FieldFocused => {
                self.behavior = Behavior::WatchingForm;
                scheduler.cancel(TaskKind::BlurGrace);
            }
            FormEvent::Typing(_) => {
                self.typing = true;
                self.behavior = Behavior::WatchingForm;
                // Every keystroke re-arms the debounce and invalidates any
                // pending drift back toward free roam
                scheduler.schedule_in(TaskKind::TypingDebounce, now, TYPING_DEBOUNCE_SECS);
                scheduler.cancel(TaskKind::WatchLinger);
                scheduler.cancel(TaskKind::BlurGrace);
            }
            FormEvent::FieldBlurred => {
                scheduler.schedule_in(TaskKind::BlurGrace, now, BLUR_GRACE_SECS);
            }
            FormEvent::SubmitSucceeded => {
                self.behavior = Behavior::Celebrating;
                self.celebration_start = now;
                self.typing = false;
                scheduler.cancel(TaskKind::TypingDebounce);
                scheduler.cancel(TaskKind::WatchLinger);
                scheduler.cancel(TaskKind::BlurGrace);
                scheduler.schedule_in(TaskKind::CelebrationEnd, now, CELEBRATION_SECS);
            }
        }
    }

    /// Apply a fired scheduler task at clock time `now`
    pub fn handle_task(&mut self, task: TaskKind, now: f32, scheduler: &mut TaskScheduler) {
        match task {
            TaskKind::TypingDebounce => {
                self.typing = false;
                if self.behavior == Behavior::WatchingForm {
                    self.behavior = Behavior::WatchingUser;
                    scheduler.schedule_in(TaskKind::WatchLinger, now, WATCH_LINGER_SECS);
                }
            }
            TaskKind::WatchLinger => {
                if self.behavior == Behavior::WatchingUser {
                    self.behavior = Behavior::Free;
                }
            }
            TaskKind::BlurGrace => {
                if !self.typing && self.behavior == Behavior::WatchingForm {
                    self.behavior = Behavior::Free;
                }
            }
            TaskKind::CelebrationEnd => {
                if self.behavior == Behavior::Celebrating {
                    self.behavior = Behavior::Free;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::FormField;

    /// Drive the machine forward, firing any tasks due at `now`
    fn advance(machine: &mut BehaviorMachine, scheduler: &mut TaskScheduler, now: f32) {
        for task in scheduler.fire_due(now) {
            machine.handle_task(task, now, scheduler);
        }
    }

    #[test]
    fn test_focus_enters_watching_form() {
        let mut machine = BehaviorMachine::new();
        let mut scheduler = TaskScheduler::new();

        machine.handle_event(FormEvent::FieldFocused, 0.0, &mut scheduler);
        assert_eq!(machine.behavior(), Behavior::WatchingForm);
    }

    #[test]
    fn test_typing_settles_into_watching_user_then_free() {
        let mut machine = BehaviorMachine::new();
        let mut scheduler = TaskScheduler::new();

        machine.handle_event(FormEvent::Typing(FormField::Email), 0.0, &mut scheduler);
        assert_eq!(machine.behavior(), Behavior::WatchingForm);

        // Debounce fires 1.5s after the last keystroke
        advance(&mut machine, &mut scheduler, 1.5);
        assert_eq!(machine.behavior(), Behavior::WatchingUser);

        // Linger expires 3s later
        advance(&mut machine, &mut scheduler, 4.5);
        assert_eq!(machine.behavior(), Behavior::Free);
    }

    #[test]
    fn test_repeated_typing_is_idempotent_and_extends_debounce() {
        let mut machine = BehaviorMachine::new();
        let mut scheduler = TaskScheduler::new();

        machine.handle_event(FormEvent::Typing(FormField::Email), 0.0, &mut scheduler);
        machine.handle_event(FormEvent::Typing(FormField::Email), 1.0, &mut scheduler);
        machine.handle_event(FormEvent::Typing(FormField::Password), 2.0, &mut scheduler);
        assert_eq!(machine.behavior(), Behavior::WatchingForm);

        // The first keystroke's deadline has passed, but the debounce was
        // re-armed; nothing fires and the state is unchanged
        advance(&mut machine, &mut scheduler, 2.5);
        assert_eq!(machine.behavior(), Behavior::WatchingForm);

        // 1.5s after the last keystroke the single debounce instance fires
        advance(&mut machine, &mut scheduler, 3.5);
        assert_eq!(machine.behavior(), Behavior::WatchingUser);
    }

    #[test]
    fn test_typing_cancels_pending_watch_linger() {
        let mut machine = BehaviorMachine::new();
        let mut scheduler = TaskScheduler::new();

        machine.handle_event(FormEvent::Typing(FormField::Email), 0.0, &mut scheduler);
        advance(&mut machine, &mut scheduler, 1.5);
        assert_eq!(machine.behavior(), Behavior::WatchingUser);

        // New keystroke while watching the user: back to the form, and the
        // old linger deadline must not fire later
        machine.handle_event(FormEvent::Typing(FormField::Email), 2.0, &mut scheduler);
        assert_eq!(machine.behavior(), Behavior::WatchingForm);
        assert!(!scheduler.is_pending(TaskKind::WatchLinger));
    }

    #[test]
    fn test_blur_grace_returns_to_free_when_not_typing() {
        let mut machine = BehaviorMachine::new();
        let mut scheduler = TaskScheduler::new();

        machine.handle_event(FormEvent::FieldFocused, 0.0, &mut scheduler);
        machine.handle_event(FormEvent::FieldBlurred, 1.0, &mut scheduler);

        advance(&mut machine, &mut scheduler, 2.9);
        assert_eq!(machine.behavior(), Behavior::WatchingForm);
        advance(&mut machine, &mut scheduler, 3.0);
        assert_eq!(machine.behavior(), Behavior::Free);
    }

    #[test]
    fn test_blur_does_not_interrupt_active_typing() {
        let mut machine = BehaviorMachine::new();
        let mut scheduler = TaskScheduler::new();

        machine.handle_event(FormEvent::Typing(FormField::Email), 0.0, &mut scheduler);
        machine.handle_event(FormEvent::FieldBlurred, 0.5, &mut scheduler);
        machine.handle_event(FormEvent::Typing(FormField::Email), 2.4, &mut scheduler);

        // The blur's grace deadline passes, but typing superseded it
        advance(&mut machine, &mut scheduler, 2.5);
        assert_eq!(machine.behavior(), Behavior::WatchingForm);
    }

    #[test]
    fn test_refocus_cancels_blur_grace() {
        let mut machine = BehaviorMachine::new();
        let mut scheduler = TaskScheduler::new();

        machine.handle_event(FormEvent::FieldFocused, 0.0, &mut scheduler);
        machine.handle_event(FormEvent::FieldBlurred, 1.0, &mut scheduler);
        machine.handle_event(FormEvent::FieldFocused, 1.2, &mut scheduler);

        advance(&mut machine, &mut scheduler, 5.0);
        assert_eq!(machine.behavior(), Behavior::WatchingForm);
    }

    #[test]
    fn test_celebration_reverts_to_free_after_duration() {
        let mut machine = BehaviorMachine::new();
        let mut scheduler = TaskScheduler::new();

        machine.handle_event(FormEvent::SubmitSucceeded, 10.0, &mut scheduler);
        assert_eq!(machine.behavior(), Behavior::Celebrating);
        assert!((machine.celebration_elapsed(11.0) - 1.0).abs() < 1e-6);

        advance(&mut machine, &mut scheduler, 14.0);
        assert_eq!(machine.behavior(), Behavior::Free);
        assert_eq!(machine.celebration_elapsed(14.0), 0.0);
    }

    #[test]
    fn test_pending_blur_grace_does_not_stomp_celebration() {
        let mut machine = BehaviorMachine::new();
        let mut scheduler = TaskScheduler::new();

        machine.handle_event(FormEvent::FieldFocused, 0.0, &mut scheduler);
        machine.handle_event(FormEvent::FieldBlurred, 0.5, &mut scheduler);
        machine.handle_event(FormEvent::SubmitSucceeded, 1.0, &mut scheduler);

        // Success cancels the grace; nothing due at 2.5 may leave celebrating
        advance(&mut machine, &mut scheduler, 2.5);
        assert_eq!(machine.behavior(), Behavior::Celebrating);
    }
}
