//! Companion creature body and movement constants.
//!
//! All spatial values are in normalized window coordinates (0..1 on both
//! axes) unless noted otherwise.

use glam::Vec2;

/// Number of body segments per creature (head = index 0)
pub const SEGMENT_COUNT: usize = 50;
/// Fixed distance between adjacent segments
pub const SEGMENT_SPACING: f32 = 0.008;
/// Proportional gain pulling the head toward its target each tick
pub const FOLLOW_GAIN: f32 = 0.08;

/// Spawn columns for the two creatures (x per creature index)
pub const SPAWN_X: [f32; 2] = [0.15, 0.85];
/// Spawn column top
pub const SPAWN_Y: f32 = 0.15;
/// Vertical spacing of the initial spawn column
pub const SPAWN_COLUMN_STEP: f32 = 0.012;

/// Distance the head advances per tick while wandering
pub const WANDER_STEP: f32 = 0.006;
/// Wander headings reflect off this box (min coordinate)
pub const WANDER_BOUND_MIN: f32 = 0.1;
/// Wander headings reflect off this box (max coordinate)
pub const WANDER_BOUND_MAX: f32 = 0.9;
/// Minimum seconds between random heading perturbations
pub const WANDER_TURN_MIN_SECS: f32 = 2.0;
/// Maximum seconds between random heading perturbations
pub const WANDER_TURN_MAX_SECS: f32 = 4.0;

/// How far to the side of the form a watching creature stations itself
pub const WATCH_SIDE_OFFSET: f32 = 0.15;
/// Padding around the form rect that counts as "inside" for avoidance
pub const FORM_AVOID_PADDING: f32 = 0.05;
/// Extra margin past the form half-extent when pushing a head out
pub const FORM_AVOID_MARGIN: f32 = 0.08;

/// Head target when no form bounds are available yet
pub const DEFAULT_TARGET: Vec2 = Vec2::new(0.5, 0.3);
