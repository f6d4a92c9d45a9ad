//! Per-frame companion simulation.
//!
//! Each tick selects a target point per creature from the shared behavior,
//! pulls the head toward it with a fixed proportional gain, keeps heads out
//! of the form while watching, and re-solves the body chain. All inputs are
//! clamped or defaulted; no tick can fail.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use crate::behavior::Behavior;
use crate::constants::*;
use crate::creature::CreatureState;

/// The auth card's rectangle in normalized window coordinates.
///
/// Derived state: remeasured from the laid-out card every frame, never
/// mutated by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FormBounds {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `point` falls inside the rect grown by `padding` on all sides
    pub fn contains(&self, point: Vec2, padding: f32) -> bool {
        point.x > self.x - padding
            && point.x < self.x + self.width + padding
            && point.y > self.y - padding
            && point.y < self.y + self.height + padding
    }
}

/// Autonomous wandering state for one creature
#[derive(Debug, Clone)]
struct WanderState {
    heading: f32,
    target: Vec2,
    next_turn: f32,
}

impl WanderState {
    fn new(index: usize, rng: &mut impl Rng) -> Self {
        Self {
            heading: rng.gen::<f32>() * PI * 2.0,
            target: Vec2::new(SPAWN_X[index % SPAWN_X.len()], 0.5),
            next_turn: 0.0,
        }
    }

    /// Advance the wander target one step, perturbing the heading at random
    /// intervals and reflecting off the wander box by angle mirroring
    fn advance(&mut self, now: f32, rng: &mut impl Rng) -> Vec2 {
        if now >= self.next_turn {
            self.heading += (rng.gen::<f32>() - 0.5) * PI;
            self.next_turn = now + rng.gen_range(WANDER_TURN_MIN_SECS..WANDER_TURN_MAX_SECS);
        }

        self.target.x += self.heading.cos() * WANDER_STEP;
        self.target.y += self.heading.sin() * WANDER_STEP;

        if self.target.x < WANDER_BOUND_MIN || self.target.x > WANDER_BOUND_MAX {
            self.heading = PI - self.heading;
            self.target.x = self.target.x.clamp(WANDER_BOUND_MIN, WANDER_BOUND_MAX);
        }
        if self.target.y < WANDER_BOUND_MIN || self.target.y > WANDER_BOUND_MAX {
            self.heading = -self.heading;
            self.target.y = self.target.y.clamp(WANDER_BOUND_MIN, WANDER_BOUND_MAX);
        }

        self.target
    }
}

/// Simulation state for both companions
pub struct CompanionEngine {
    pub creatures: [CreatureState; 2],
    wander: [WanderState; 2],
}

impl CompanionEngine {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            creatures: [CreatureState::spawn(0), CreatureState::spawn(1)],
            wander: [WanderState::new(0, rng), WanderState::new(1, rng)],
        }
    }

    /// Advance both creatures one tick.
    ///
    /// `now` is clock seconds, `celebration_elapsed` is seconds since the
    /// celebration started (0 outside of one), `pointer` is the live pointer
    /// position in normalized coordinates.
    pub fn update(
        &mut self,
        now: f32,
        celebration_elapsed: f32,
        behavior: Behavior,
        form_bounds: Option<FormBounds>,
        pointer: Vec2,
        rng: &mut impl Rng,
    ) {
        let look_at = look_target(behavior, form_bounds, pointer);

        for (index, creature) in self.creatures.iter_mut().enumerate() {
            if creature.segments.is_empty() {
                continue;
            }

            let target = match behavior {
                Behavior::Celebrating => {
                    celebration_orbit(index, now, celebration_elapsed, form_bounds)
                }
                Behavior::WatchingForm | Behavior::WatchingUser => {
                    watch_station(index, now, form_bounds)
                }
                Behavior::Free => self.wander[index].advance(now, rng),
            };

            creature.velocity = (target - creature.head()) * FOLLOW_GAIN;
            let mut head = creature.head() + creature.velocity;

            // The creatures may hover beside the form but never over it
            if behavior.is_watching() {
                if let Some(bounds) = form_bounds {
                    if bounds.contains(head, FORM_AVOID_PADDING) {
                        head = push_out_of_form(head, bounds);
                    }
                }
            }

            creature.segments[0] = head;
            creature.relax_chain();
            creature.look_at = look_at;
        }
    }
}

/// Radially project a head out of the form rect, past its half-extent plus a
/// margin, away from the form center
fn push_out_of_form(head: Vec2, bounds: FormBounds) -> Vec2 {
    let center = bounds.center();
    let angle = (head.y - center.y).atan2(head.x - center.x);
    Vec2::new(
        center.x + angle.cos() * (bounds.width / 2.0 + FORM_AVOID_MARGIN),
        center.y + angle.sin() * (bounds.height / 2.0 + FORM_AVOID_MARGIN),
    )
}

/// Station point beside the form while watching, with small sinusoidal
/// jitter; the two creatures take opposite sides
fn watch_station(index: usize, now: f32, form_bounds: Option<FormBounds>) -> Vec2 {
    let Some(bounds) = form_bounds else {
        return DEFAULT_TARGET;
    };

    if index == 0 {
        Vec2::new(
            bounds.x - WATCH_SIDE_OFFSET + (now * 0.3).sin() * 0.015,
            bounds.y + bounds.height * 0.4 + (now * 0.4).cos() * 0.02,
        )
    } else {
        Vec2::new(
            bounds.x + bounds.width + WATCH_SIDE_OFFSET + (now * 0.35).sin() * 0.015,
            bounds.y + bounds.height * 0.4 + (now * 0.45).cos() * 0.02,
        )
    }
}

/// Time-parameterized orbit around the form center during a celebration.
/// The creatures use mirrored angular direction and phase so they dance
/// oppositely, each with its own radius oscillation.
fn celebration_orbit(
    index: usize,
    now: f32,
    elapsed: f32,
    form_bounds: Option<FormBounds>,
) -> Vec2 {
    let Some(bounds) = form_bounds else {
        return DEFAULT_TARGET;
    };
    let center = bounds.center();

    if index == 0 {
        let radius = 0.12 + (elapsed * 2.0).sin() * 0.03;
        let angle = now * 3.0 + PI;
        Vec2::new(
            center.x - 0.2 + angle.cos() * radius,
            center.y + (angle * 2.0).sin() * 0.08 + (elapsed * 5.0).sin() * 0.02,
        )
    } else {
        let radius = 0.12 + (elapsed * 2.0).cos() * 0.03;
        let angle = -now * 3.0;
        Vec2::new(
            center.x + 0.2 + angle.cos() * radius,
            center.y + (angle * 2.0).sin() * 0.08 + (elapsed * 5.0).cos() * 0.02,
        )
    }
}

/// Explicit head orientation target for the current behavior, if any
fn look_target(behavior: Behavior, form_bounds: Option<FormBounds>, pointer: Vec2) -> Option<Vec2> {
    let bounds = form_bounds?;
    match behavior {
        Behavior::WatchingForm => Some(Vec2::new(
            bounds.x + bounds.width / 2.0,
            bounds.y + bounds.height * 0.4,
        )),
        Behavior::WatchingUser => Some(pointer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOUNDS: FormBounds = FormBounds {
        x: 0.35,
        y: 0.25,
        width: 0.3,
        height: 0.5,
    };

    fn run_frames(
        engine: &mut CompanionEngine,
        behavior: Behavior,
        bounds: Option<FormBounds>,
        frames: usize,
        rng: &mut StdRng,
    ) {
        for frame in 0..frames {
            let now = frame as f32 / 60.0;
            engine.update(now, now, behavior, bounds, Vec2::new(0.5, 0.5), rng);
        }
    }

    #[test]
    fn test_chain_spacing_invariant_across_behaviors() {
        let mut rng = StdRng::seed_from_u64(7);
        for behavior in [
            Behavior::Free,
            Behavior::WatchingForm,
            Behavior::WatchingUser,
            Behavior::Celebrating,
        ] {
            let mut engine = CompanionEngine::new(&mut rng);
            run_frames(&mut engine, behavior, Some(BOUNDS), 240, &mut rng);

            for creature in &engine.creatures {
                for pair in creature.segments.windows(2) {
                    let dist = (pair[1] - pair[0]).length();
                    assert!(
                        (dist - SEGMENT_SPACING).abs() < 1e-4,
                        "{:?}: spacing {} != {}",
                        behavior,
                        dist,
                        SEGMENT_SPACING
                    );
                }
            }
        }
    }

    #[test]
    fn test_watching_heads_stay_out_of_the_form() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut engine = CompanionEngine::new(&mut rng);
        // Force both heads into the middle of the form first
        for creature in engine.creatures.iter_mut() {
            creature.segments[0] = BOUNDS.center();
        }

        run_frames(&mut engine, Behavior::WatchingForm, Some(BOUNDS), 120, &mut rng);

        for creature in &engine.creatures {
            assert!(
                !BOUNDS.contains(creature.head(), 0.0),
                "head {:?} overlaps the form",
                creature.head()
            );
        }
    }

    #[test]
    fn test_missing_form_bounds_falls_back_to_default_target() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = CompanionEngine::new(&mut rng);
        run_frames(&mut engine, Behavior::WatchingForm, None, 600, &mut rng);

        for creature in &engine.creatures {
            assert!(
                (creature.head() - DEFAULT_TARGET).length() < 0.05,
                "head {:?} did not settle near the default target",
                creature.head()
            );
        }
    }

    #[test]
    fn test_wander_targets_respect_reflecting_box() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut engine = CompanionEngine::new(&mut rng);
        for frame in 0..2000 {
            let now = frame as f32 / 60.0;
            engine.update(now, 0.0, Behavior::Free, None, Vec2::ZERO, &mut rng);
        }

        for wander in &engine.wander {
            assert!(wander.target.x >= WANDER_BOUND_MIN && wander.target.x <= WANDER_BOUND_MAX);
            assert!(wander.target.y >= WANDER_BOUND_MIN && wander.target.y <= WANDER_BOUND_MAX);
        }
    }

    #[test]
    fn test_look_at_follows_pointer_while_watching_user() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut engine = CompanionEngine::new(&mut rng);
        let pointer = Vec2::new(0.9, 0.1);
        engine.update(0.0, 0.0, Behavior::WatchingUser, Some(BOUNDS), pointer, &mut rng);

        for creature in &engine.creatures {
            assert_eq!(creature.look_at, Some(pointer));
        }

        engine.update(0.1, 0.0, Behavior::Free, Some(BOUNDS), pointer, &mut rng);
        for creature in &engine.creatures {
            assert_eq!(creature.look_at, None);
        }
    }
}
