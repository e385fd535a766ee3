//! Collision detection and response
//!
//! Entities are circles. Walls reflect velocity, contacts between entities
//! convert kinds by precedence.

use glam::Vec2;

use super::kind::Kind;
use super::state::Bounds;

/// Outcome of two entities touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Same kind, nothing happens
    Unchanged,
    /// The first entity converted the second into its own kind
    SecondConverted { from: Kind, to: Kind },
    /// The second entity converted the first into its own kind
    FirstConverted { from: Kind, to: Kind },
}

/// Check whether two circles overlap (strictly closer than the sum of radii)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Resolve a contact between an earlier (`first`) and later (`second`) entity.
///
/// The first entity is asked first: if it beats the second, the second is
/// converted. Otherwise any difference in kind means the second wins.
pub fn resolve_contact(first: Kind, second: Kind) -> Contact {
    if first.beats(second) {
        Contact::SecondConverted {
            from: second,
            to: first,
        }
    } else if first != second {
        Contact::FirstConverted {
            from: first,
            to: second,
        }
    } else {
        Contact::Unchanged
    }
}

/// Reflect velocity off the arena walls.
///
/// Each axis is checked on its own against the already-moved position. The
/// position itself is never clamped, so an entity may sit past a wall for a
/// frame. A component past a wall is pointed back into the arena.
///
/// An entity that is already heading inward keeps its direction, so one
/// spawned inside the margin walks out instead of flipping every frame.
pub fn reflect_off_walls(pos: Vec2, vel: Vec2, radius: f32, bounds: Bounds) -> Vec2 {
    Vec2::new(
        reflect_axis(pos.x, vel.x, radius, bounds.width),
        reflect_axis(pos.y, vel.y, radius, bounds.height),
    )
}

#[inline]
fn reflect_axis(p: f32, v: f32, radius: f32, extent: f32) -> f32 {
    if p < radius {
        v.abs()
    } else if p > extent - radius {
        -v.abs()
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 100.0,
        height: 100.0,
    };

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 20.0, Vec2::ZERO, 20.0));
        assert!(circles_overlap(
            Vec2::new(0.0, 0.0),
            20.0,
            Vec2::new(39.9, 0.0),
            20.0
        ));
        // Touching exactly is not a collision
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            20.0,
            Vec2::new(40.0, 0.0),
            20.0
        ));
    }

    #[test]
    fn test_resolve_contact() {
        assert_eq!(
            resolve_contact(Kind::Rock, Kind::Scissors),
            Contact::SecondConverted {
                from: Kind::Scissors,
                to: Kind::Rock
            }
        );
        assert_eq!(
            resolve_contact(Kind::Rock, Kind::Paper),
            Contact::FirstConverted {
                from: Kind::Rock,
                to: Kind::Paper
            }
        );
        for kind in Kind::ALL {
            assert_eq!(resolve_contact(kind, kind), Contact::Unchanged);
        }
    }

    #[test]
    fn test_reflect_low_wall_flips_inbound() {
        // Moving left past the left margin
        let vel = reflect_off_walls(Vec2::new(19.0, 50.0), Vec2::new(-1.5, 0.5), 20.0, BOUNDS);
        assert!((vel.x - 1.5).abs() < 1e-6);
        assert!((vel.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_high_wall_flips_outbound() {
        let vel = reflect_off_walls(Vec2::new(50.0, 81.0), Vec2::new(0.5, 2.0), 20.0, BOUNDS);
        assert!((vel.x - 0.5).abs() < 1e-6);
        assert!((vel.y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_keeps_escaping_entity_heading_inward() {
        // Already heading back in: direction is kept, magnitude unchanged
        let vel = reflect_off_walls(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0), 20.0, BOUNDS);
        assert_eq!(vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_no_reflection_inside() {
        let vel = Vec2::new(-3.0, 3.0);
        assert_eq!(reflect_off_walls(Vec2::new(50.0, 50.0), vel, 20.0, BOUNDS), vel);
    }
}
