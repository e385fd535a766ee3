//! Frame step
//!
//! One call advances the whole population: every entity moves, then every
//! pair is tested for contact, then the population is checked for a winner.

use serde::Serialize;

use super::collision::{Contact, resolve_contact};
use super::kind::{Kind, KindCounts};
use super::state::SimState;

/// Something observable that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimEvent {
    /// Entity at `index` changed kind
    Conversion { index: usize, from: Kind, to: Kind },
}

/// Result of advancing one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Per-kind counts after the step
    pub counts: KindCounts,
    /// Every entity now shares a single kind
    pub terminated: bool,
    /// The surviving kind, when terminated
    pub winner: Option<Kind>,
    /// Conversions, in the order they were resolved
    pub events: Vec<SimEvent>,
}

impl StepReport {
    pub fn conversions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::Conversion { .. }))
            .count()
    }
}

/// Advance the simulation by one frame
pub fn step(state: &mut SimState) -> StepReport {
    let bounds = state.bounds();
    let entities = state.entities_mut();

    // Move phase
    for entity in entities.iter_mut() {
        entity.advance(bounds);
    }

    // Interaction phase. Kinds are read live, so a conversion earlier in the
    // scan feeds into later pairs of the same frame.
    let mut events = Vec::new();
    for i in 0..entities.len() {
        let (head, tail) = entities.split_at_mut(i + 1);
        let first = &mut head[i];
        for (offset, second) in tail.iter_mut().enumerate() {
            if !first.touches(second) {
                continue;
            }
            match resolve_contact(first.kind, second.kind) {
                Contact::Unchanged => {}
                Contact::SecondConverted { from, to } => {
                    second.kind = to;
                    events.push(SimEvent::Conversion {
                        index: i + 1 + offset,
                        from,
                        to,
                    });
                }
                Contact::FirstConverted { from, to } => {
                    first.kind = to;
                    events.push(SimEvent::Conversion { index: i, from, to });
                }
            }
        }
    }

    for event in &events {
        let SimEvent::Conversion { index, from, to } = event;
        log::trace!("Entity {index} converted {from:?} -> {to:?}");
    }

    state.steps += 1;

    // Termination check
    let counts = state.counts();
    let winner = counts.sole_survivor();

    StepReport {
        counts,
        terminated: winner.is_some(),
        winner,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bounds, Entity};
    use glam::Vec2;

    fn still(kind: Kind, x: f32, y: f32) -> Entity {
        Entity::new(kind, Vec2::new(x, y), Vec2::ZERO)
    }

    fn sim(bounds: Bounds, entities: Vec<Entity>) -> SimState {
        SimState::with_entities(bounds, 0.0, 1, entities)
    }

    #[test]
    fn test_paper_covers_rock_at_same_spot() {
        let mut state = sim(
            Bounds::new(100.0, 100.0),
            vec![still(Kind::Rock, 50.0, 50.0), still(Kind::Paper, 50.0, 50.0)],
        );

        let report = step(&mut state);

        assert!(state.entities().iter().all(|e| e.kind == Kind::Paper));
        assert!(report.terminated);
        assert_eq!(report.winner, Some(Kind::Paper));
        assert_eq!(
            report.events,
            vec![SimEvent::Conversion {
                index: 0,
                from: Kind::Rock,
                to: Kind::Paper
            }]
        );
    }

    #[test]
    fn test_homogeneous_population_terminates_without_contact() {
        let mut state = SimState::new(Bounds::new(500.0, 500.0), 4.0, 77);
        state.initialize(KindCounts::new(0, 0, 5), Bounds::new(500.0, 500.0));

        let report = step(&mut state);

        assert!(report.terminated);
        assert_eq!(report.winner, Some(Kind::Scissors));
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_empty_population_never_terminates() {
        let mut state = sim(Bounds::new(100.0, 100.0), Vec::new());
        let report = step(&mut state);
        assert!(!report.terminated);
        assert_eq!(report.winner, None);
    }

    #[test]
    fn test_conversions_cascade_within_one_step() {
        // rock touches scissors, scissors touches paper, rock and paper are apart
        let mut state = sim(
            Bounds::new(400.0, 400.0),
            vec![
                still(Kind::Rock, 100.0, 100.0),
                still(Kind::Scissors, 130.0, 100.0),
                still(Kind::Paper, 160.0, 100.0),
            ],
        );

        let report = step(&mut state);

        // Pair (0,1): rock crushes scissors. Pair (1,2) then sees rock vs paper.
        let kinds: Vec<Kind> = state.entities().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![Kind::Rock, Kind::Paper, Kind::Paper]);
        assert_eq!(
            report.events,
            vec![
                SimEvent::Conversion {
                    index: 1,
                    from: Kind::Scissors,
                    to: Kind::Rock
                },
                SimEvent::Conversion {
                    index: 1,
                    from: Kind::Rock,
                    to: Kind::Paper
                },
            ]
        );
        assert_eq!(report.conversions(), 2);
        assert!(!report.terminated);
    }

    #[test]
    fn test_earlier_entity_wins_when_it_beats_later() {
        let mut state = sim(
            Bounds::new(400.0, 400.0),
            vec![
                still(Kind::Scissors, 200.0, 200.0),
                still(Kind::Paper, 210.0, 200.0),
            ],
        );
        let report = step(&mut state);
        assert_eq!(state.entities()[1].kind, Kind::Scissors);
        assert_eq!(report.winner, Some(Kind::Scissors));
    }

    #[test]
    fn test_moves_before_interacting() {
        // Apart at rest position, but velocities bring them together this frame
        let mut state = sim(
            Bounds::new(400.0, 400.0),
            vec![
                Entity::new(Kind::Rock, Vec2::new(150.0, 200.0), Vec2::new(6.0, 0.0)),
                Entity::new(Kind::Scissors, Vec2::new(200.0, 200.0), Vec2::new(-6.0, 0.0)),
            ],
        );
        let report = step(&mut state);
        assert_eq!(report.conversions(), 1);
        assert_eq!(state.entities()[1].kind, Kind::Rock);
    }

    #[test]
    fn test_wall_reflection_lags_one_frame() {
        let mut state = sim(
            Bounds::new(100.0, 100.0),
            vec![Entity::new(Kind::Rock, Vec2::new(21.0, 50.0), Vec2::new(-2.0, 0.0))],
        );
        step(&mut state);
        let e = &state.entities()[0];
        // Overshoots the margin, is not clamped, and now heads back in
        assert!((e.pos.x - 19.0).abs() < 1e-5);
        assert!((e.vel.x - 2.0).abs() < 1e-6);
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_equal_kinds_overlap_quietly() {
        let mut state = sim(
            Bounds::new(100.0, 100.0),
            vec![still(Kind::Rock, 50.0, 50.0), still(Kind::Rock, 55.0, 50.0)],
        );
        let report = step(&mut state);
        assert!(report.events.is_empty());
        assert_eq!(report.winner, Some(Kind::Rock));
    }
}
