//! Window and UI layout constants.

/// Initial window width in physical pixels
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
/// Initial window height in physical pixels
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;

/// Width of the centered auth card in egui points
pub const AUTH_CARD_WIDTH: f32 = 380.0;
