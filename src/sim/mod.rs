//! Simulation module
//!
//! All population logic lives here. This module must stay free of rendering,
//! audio and platform dependencies:
//! - One step per frame, no time delta
//! - Seeded RNG only
//! - Stable iteration order (creation order)

pub mod collision;
pub mod kind;
pub mod state;
pub mod tick;

pub use collision::{Contact, circles_overlap, reflect_off_walls, resolve_contact};
pub use kind::{Kind, KindCounts};
pub use state::{Bounds, Entity, SimState, velocity_magnitude};
pub use tick::{SimEvent, StepReport, step};
