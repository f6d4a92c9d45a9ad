//! Tuning constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod behavior;
mod creature;
mod limiter;
mod window;

// Re-export all constants at the module level
pub use behavior::*;
pub use creature::*;
pub use limiter::*;
pub use window::*;
