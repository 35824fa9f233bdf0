#![forbid(unsafe_code)]

use std::f64::consts::TAU;

use linkglow_core::color::Rgba;
use linkglow_core::error::SurfaceError;
use linkglow_core::geometry::{Point, SurfaceSize};
use linkglow_core::surface::DrawSurface;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// `<canvas>` 2D context as a [`DrawSurface`].
pub(crate) struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: SurfaceSize,
    // Last fill color and its CSS form; every particle shares one fill.
    fill: Option<(Rgba, String)>,
}

impl CanvasSurface {
    /// Size the canvas backing store to `size` and take its 2D context.
    pub(crate) fn acquire(
        canvas: &HtmlCanvasElement,
        size: SurfaceSize,
    ) -> Result<Self, SurfaceError> {
        if size.is_empty() {
            return Err(SurfaceError::Degenerate {
                width: size.width,
                height: size.height,
            });
        }
        canvas.set_width(size.width);
        canvas.set_height(size.height);
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| SurfaceError::Unavailable("getContext(\"2d\") threw"))?
            .ok_or(SurfaceError::Unavailable("2d context not supported"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Unavailable("2d context has unexpected type"))?;
        Ok(Self {
            ctx,
            size,
            fill: None,
        })
    }

    fn set_fill(&mut self, color: Rgba) {
        if self.fill.as_ref().is_some_and(|(c, _)| *c == color) {
            return;
        }
        let css = color.to_css();
        self.ctx.set_fill_style_str(&css);
        self.fill = Some((color, css));
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.width as f64, self.size.height as f64);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.set_fill(color);
        self.ctx.begin_path();
        // arc() only throws for a negative radius.
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_err() {
            linkglow_core::trace!(radius, "arc rejected");
            return;
        }
        self.ctx.fill();
    }
}
