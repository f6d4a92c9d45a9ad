//! Pointer tracking.

use glam::Vec2;

/// Live pointer state in normalized window coordinates
pub struct InputState {
    pub pointer: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pointer: Vec2::new(0.5, 0.5),
        }
    }

    /// Record a pointer move given physical pixel coordinates and the
    /// current window size
    pub fn set_pointer_px(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.pointer = Vec2::new(x / width, y / height);
        }
    }
}
