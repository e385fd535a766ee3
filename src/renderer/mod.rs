//! Canvas rendering module
//!
//! Entities are drawn as emoji glyphs with the 2D canvas API. The glyph
//! mapping lives here rather than in `sim`; it is purely presentational.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::Kind;

/// Display glyph for a kind
pub fn glyph(kind: Kind) -> &'static str {
    match kind {
        Kind::Rock => "🪨",
        Kind::Paper => "📄",
        Kind::Scissors => "✂️",
    }
}

/// CSS font for drawing an entity of the given radius (glyph spans the diameter)
pub fn font_for_radius(radius: f32) -> String {
    format!("{}px Arial", radius * 2.0)
}
