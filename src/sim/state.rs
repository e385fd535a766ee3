//! Simulation state: arena bounds, entities and the population they form
//!
//! `SimState` itself is never persisted.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{circles_overlap, reflect_off_walls};
use super::kind::{Kind, KindCounts};
use super::tick::{StepReport, step};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Rectangular arena, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Panics on a zero-area or non-finite arena
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0,
            "arena bounds must be positive, got {width}x{height}"
        );
        Self { width, height }
    }
}

/// A single moving token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: Kind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Entity {
    pub fn new(kind: Kind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            kind,
            pos,
            vel,
            radius: ENTITY_RADIUS,
        }
    }

    /// Integrate one frame of motion, then bounce off the walls
    pub fn advance(&mut self, bounds: Bounds) {
        self.pos += self.vel;
        self.vel = reflect_off_walls(self.pos, self.vel, self.radius, bounds);
    }

    pub fn touches(&self, other: &Entity) -> bool {
        circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }
}

/// Velocity magnitude for a configured speed value
#[inline]
pub fn velocity_magnitude(speed: f32) -> f32 {
    speed / 2.0
}

/// The engine: owns the population and everything needed to advance it
#[derive(Debug, Clone)]
pub struct SimState {
    entities: Vec<Entity>,
    bounds: Bounds,
    speed: f32,
    rng: Pcg32,
    /// Steps taken since the last (re)initialization
    pub steps: u64,
}

impl SimState {
    /// Create an engine with an empty population
    pub fn new(bounds: Bounds, speed: f32, seed: u64) -> Self {
        assert_valid_speed(speed);
        Self {
            entities: Vec::new(),
            bounds,
            speed,
            rng: Pcg32::seed_from_u64(seed),
            steps: 0,
        }
    }

    /// Create an engine around a hand-placed population
    pub fn with_entities(bounds: Bounds, speed: f32, seed: u64, entities: Vec<Entity>) -> Self {
        let mut state = Self::new(bounds, speed, seed);
        state.entities = entities;
        state
    }

    /// Replace the population with freshly spawned entities.
    ///
    /// Rocks are created first, then papers, then scissors. Positions are
    /// uniform over the arena and headings are uniform over the circle.
    pub fn initialize(&mut self, counts: KindCounts, bounds: Bounds) {
        self.bounds = bounds;
        self.steps = 0;
        self.entities.clear();
        self.entities.reserve(counts.total() as usize);

        for kind in Kind::ALL {
            for _ in 0..counts.get(kind) {
                let pos = Vec2::new(
                    self.rng.random::<f32>() * bounds.width,
                    self.rng.random::<f32>() * bounds.height,
                );
                let vel = self.random_velocity();
                self.entities.push(Entity::new(kind, pos, vel));
            }
        }

        log::debug!(
            "Population initialized: {} rock, {} paper, {} scissors in {}x{}",
            counts.rock,
            counts.paper,
            counts.scissors,
            bounds.width,
            bounds.height
        );
    }

    /// Change speed, resampling every heading. Position and kind are untouched.
    pub fn set_speed(&mut self, speed: f32) {
        assert_valid_speed(speed);
        self.speed = speed;
        // Index loop: random_velocity borrows self mutably
        for i in 0..self.entities.len() {
            let vel = self.random_velocity();
            self.entities[i].vel = vel;
        }
        log::debug!("Speed set to {speed} ({} entities)", self.entities.len());
    }

    /// Advance one frame
    pub fn step(&mut self) -> StepReport {
        step(self)
    }

    pub fn counts(&self) -> KindCounts {
        KindCounts::tally(self.entities.iter().map(|e| e.kind))
    }

    /// Read-only population snapshot, in creation order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn random_velocity(&mut self) -> Vec2 {
        let theta = self.rng.random_range(0.0..std::f32::consts::TAU);
        polar_to_cartesian(velocity_magnitude(self.speed), theta)
    }
}

fn assert_valid_speed(speed: f32) {
    assert!(
        speed.is_finite() && speed >= 0.0,
        "speed must be a non-negative number, got {speed}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    #[test]
    fn test_initialize_creation_order() {
        let mut state = SimState::new(arena(), DEFAULT_SPEED, 7);
        state.initialize(KindCounts::new(2, 1, 3), arena());

        let kinds: Vec<Kind> = state.entities().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                Kind::Rock,
                Kind::Rock,
                Kind::Paper,
                Kind::Scissors,
                Kind::Scissors,
                Kind::Scissors
            ]
        );
        assert_eq!(state.counts(), KindCounts::new(2, 1, 3));
    }

    #[test]
    fn test_initialize_within_bounds_with_configured_speed() {
        let mut state = SimState::new(arena(), 6.0, 42);
        state.initialize(KindCounts::new(20, 20, 20), arena());

        for e in state.entities() {
            assert!(e.pos.x >= 0.0 && e.pos.x < 800.0);
            assert!(e.pos.y >= 0.0 && e.pos.y < 600.0);
            assert!((e.vel.length() - 3.0).abs() < 1e-4);
            assert_eq!(e.radius, ENTITY_RADIUS);
        }
    }

    #[test]
    fn test_initialize_empty_counts() {
        let mut state = SimState::new(arena(), DEFAULT_SPEED, 1);
        state.initialize(KindCounts::default(), arena());
        assert!(state.is_empty());
    }

    #[test]
    fn test_reinitialize_replaces_population() {
        let mut state = SimState::new(arena(), DEFAULT_SPEED, 3);
        state.initialize(KindCounts::new(5, 5, 5), arena());
        state.step();
        state.initialize(KindCounts::new(1, 0, 0), Bounds::new(100.0, 100.0));
        assert_eq!(state.len(), 1);
        assert_eq!(state.steps, 0);
        assert_eq!(state.bounds(), Bounds::new(100.0, 100.0));
    }

    #[test]
    fn test_set_speed_only_touches_velocity() {
        let mut state = SimState::new(arena(), DEFAULT_SPEED, 9);
        state.initialize(KindCounts::new(4, 4, 4), arena());
        state.step();
        let before: Vec<Entity> = state.entities().to_vec();

        state.set_speed(10.0);

        for (old, new) in before.iter().zip(state.entities()) {
            assert_eq!(old.kind, new.kind);
            assert_eq!(old.pos, new.pos);
            assert!((new.vel.length() - 5.0).abs() < 1e-4);
        }
        assert_eq!(state.speed(), 10.0);
    }

    #[test]
    fn test_same_seed_same_population() {
        let mut a = SimState::new(arena(), DEFAULT_SPEED, 1234);
        let mut b = SimState::new(arena(), DEFAULT_SPEED, 1234);
        a.initialize(KindCounts::new(3, 3, 3), arena());
        b.initialize(KindCounts::new(3, 3, 3), arena());
        assert_eq!(a.entities(), b.entities());
    }

    #[test]
    #[should_panic(expected = "arena bounds must be positive")]
    fn test_zero_area_bounds_rejected() {
        Bounds::new(0.0, 100.0);
    }

    #[test]
    #[should_panic(expected = "speed must be a non-negative number")]
    fn test_negative_speed_rejected() {
        let mut state = SimState::new(arena(), DEFAULT_SPEED, 0);
        state.set_speed(-1.0);
    }
}
