//! RPS Arena - rock, paper and scissors converting each other until one remains
//!
//! Core modules:
//! - `sim`: Population, per-frame step, collisions
//! - `session`: Idle/Running/Paused/Terminated lifecycle around one simulation
//! - `renderer`: Kind glyphs and canvas drawing
//! - `settings`: Persisted preferences
//! - `results`: Outcome banner and win tally

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod results;
pub mod session;
pub mod settings;
pub mod sim;

pub use results::{Outcome, RunHistory};
pub use session::{Phase, Session};
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Entity radius, used for both contact and wall checks
    pub const ENTITY_RADIUS: f32 = 20.0;

    /// Speed slider default and range
    pub const DEFAULT_SPEED: f32 = 4.0;
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 10.0;

    /// Initial entities per kind
    pub const DEFAULT_COUNT: u32 = 10;
    /// Upper limit accepted from the count inputs
    pub const MAX_COUNT: u32 = 500;

    /// Frame length used when no display clock is available (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
