//! Behavior state machine timing constants.

/// Silence after the last keystroke before the creatures turn to the user
pub const TYPING_DEBOUNCE_SECS: f32 = 1.5;
/// How long the creatures watch the user before drifting back to free roam
pub const WATCH_LINGER_SECS: f32 = 3.0;
/// Grace period after a field blur before leaving watching-form
/// (absorbs focus hops between fields)
pub const BLUR_GRACE_SECS: f32 = 2.0;
/// Duration of the celebration dance after a successful login
pub const CELEBRATION_SECS: f32 = 4.0;
