//! Form event surface for decoupled communication with the companions.
//!
//! The auth form emits events as the user interacts with it; the behavior
//! machine consumes them once per frame. This keeps the widgets free of any
//! knowledge about creature animation.

/// Field the user is interacting with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FullName,
    Email,
    Password,
}

/// Events emitted by the auth form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// A form field gained keyboard focus
    FieldFocused,
    /// A form field lost keyboard focus
    FieldBlurred,
    /// The user edited a field's contents
    Typing(FormField),
    /// A sign-in round trip completed successfully
    SubmitSucceeded,
}

/// Simple event queue - events are pushed during the UI pass, drained at the
/// start of the next frame
#[derive(Default)]
pub struct EventQueue {
    events: Vec<FormEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: FormEvent) {
        self.events.push(event);
    }

    /// Take all pending events for processing
    pub fn drain(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }
}
