//! Companion creature body state and the chain-relaxation solve.

use glam::Vec2;

use crate::constants::*;

/// One creature's pose, updated once per animation tick.
///
/// Segments are ordered head-first in normalized window coordinates. Segment
/// count and spacing are fixed for the creature's lifetime; only coordinates
/// mutate.
#[derive(Debug, Clone)]
pub struct CreatureState {
    pub segments: Vec<Vec2>,
    pub velocity: Vec2,
    /// Explicit orientation target for the head, when the current behavior
    /// defines one
    pub look_at: Option<Vec2>,
}

impl CreatureState {
    /// Spawn a creature as a vertical column at its side of the window
    pub fn spawn(index: usize) -> Self {
        let x = SPAWN_X[index % SPAWN_X.len()];
        let segments = (0..SEGMENT_COUNT)
            .map(|i| Vec2::new(x, SPAWN_Y + i as f32 * SPAWN_COLUMN_STEP))
            .collect();
        Self {
            segments,
            velocity: Vec2::ZERO,
            look_at: None,
        }
    }

    pub fn head(&self) -> Vec2 {
        self.segments[0]
    }

    /// Single head-to-tail pass enforcing the fixed inter-segment spacing.
    ///
    /// Each trailing segment is pulled to `SEGMENT_SPACING` from its
    /// predecessor along the direction predecessor -> old position
    /// (follow-the-leader, not an iterative verlet solve). Coincident pairs
    /// are left in place to avoid a division by zero.
    pub fn relax_chain(&mut self) {
        for i in 1..self.segments.len() {
            let prev = self.segments[i - 1];
            let delta = self.segments[i] - prev;
            let dist = delta.length();
            if dist > 0.0 {
                self.segments[i] = prev + delta * (SEGMENT_SPACING / dist);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_column_shape() {
        let creature = CreatureState::spawn(0);
        assert_eq!(creature.segments.len(), SEGMENT_COUNT);
        assert_eq!(creature.head(), Vec2::new(SPAWN_X[0], SPAWN_Y));

        let second = CreatureState::spawn(1);
        assert_eq!(second.head().x, SPAWN_X[1]);
    }

    #[test]
    fn test_relax_chain_enforces_spacing() {
        let mut creature = CreatureState::spawn(0);
        // Yank the head far away; one pass restores spacing everywhere
        creature.segments[0] = Vec2::new(0.9, 0.8);
        creature.relax_chain();

        for pair in creature.segments.windows(2) {
            let dist = (pair[1] - pair[0]).length();
            assert!(
                (dist - SEGMENT_SPACING).abs() < 1e-5,
                "segment spacing {} != {}",
                dist,
                SEGMENT_SPACING
            );
        }
    }

    #[test]
    fn test_relax_chain_tolerates_coincident_segments() {
        let mut creature = CreatureState::spawn(0);
        let head = creature.head();
        for segment in creature.segments.iter_mut() {
            *segment = head;
        }
        creature.relax_chain();

        for segment in &creature.segments {
            assert!(segment.x.is_finite() && segment.y.is_finite());
        }
    }
}
