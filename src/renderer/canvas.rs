//! 2D canvas renderer

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{font_for_radius, glyph};
use crate::sim::{Bounds, SimState};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Returns None if the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the drawing buffer to the element's layout size
    pub fn fit_to_element(&self) -> Bounds {
        let w = self.canvas.offset_width().max(1) as u32;
        let h = self.canvas.offset_height().max(1) as u32;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.bounds()
    }

    /// Current drawing buffer size as arena bounds
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.canvas.width().max(1) as f32,
            self.canvas.height().max(1) as f32,
        )
    }

    /// Clear and draw every entity
    pub fn render(&self, sim: &SimState) {
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        let mut font_radius = None;
        for entity in sim.entities() {
            if font_radius != Some(entity.radius) {
                ctx.set_font(&font_for_radius(entity.radius));
                font_radius = Some(entity.radius);
            }
            if let Err(e) = ctx.fill_text(glyph(entity.kind), entity.pos.x as f64, entity.pos.y as f64) {
                log::warn!("fill_text failed: {:?}", e);
                return;
            }
        }
    }
}
