#![forbid(unsafe_code)]

//! Software RGBA framebuffer implementing [`DrawSurface`].
//!
//! Circles are filled by pixel-center coverage: a pixel is inside when the
//! center `(px + 0.5, py + 0.5)` lies within `radius` of the circle center.
//! Colors are composited with source-over, so overlapping translucent
//! particles darken where they stack, as on a browser canvas.
//!
//! Parts of a circle outside the framebuffer are clipped; circles entirely
//! off-surface cost nothing beyond the bounds check.

use crate::color::Rgba;
use crate::geometry::{Point, SurfaceSize};
use crate::surface::DrawSurface;

/// Row-major RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    size: SurfaceSize,
    pixels: Vec<Rgba>,
}

impl RasterSurface {
    /// Create a transparent framebuffer.
    pub fn new(size: SurfaceSize) -> Self {
        let len = size.width as usize * size.height as usize;
        Self {
            size,
            pixels: vec![Rgba::TRANSPARENT; len],
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered(&self) -> usize {
        self.pixels.iter().filter(|p| p.a() != 0).count()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// Inclusive pixel span `[lo, hi]` touched by `[center - r, center + r]`
    /// along an axis of `len` pixels, or `None` when fully clipped.
    fn span(center: f64, radius: f64, len: u32) -> Option<(u32, u32)> {
        let lo = (center - radius - 0.5).ceil();
        let hi = (center + radius - 0.5).floor();
        if !lo.is_finite() || !hi.is_finite() || hi < 0.0 || lo >= len as f64 || lo > hi {
            return None;
        }
        let lo = lo.max(0.0) as u32;
        let hi = hi.min(len as f64 - 1.0) as u32;
        Some((lo, hi))
    }
}

impl DrawSurface for RasterSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        if radius <= 0.0 || color.a() == 0 || self.size.is_empty() {
            return;
        }
        let Some((x0, x1)) = Self::span(center.x, radius, self.size.width) else {
            return;
        };
        let Some((y0, y1)) = Self::span(center.y, radius, self.size.height) else {
            return;
        };
        let r2 = radius * radius;
        let width = self.size.width as usize;
        for py in y0..=y1 {
            let dy = py as f64 + 0.5 - center.y;
            let row = py as usize * width;
            for px in x0..=x1 {
                let dx = px as f64 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    let idx = row + px as usize;
                    self.pixels[idx] = color.over(self.pixels[idx]);
                }
            }
        }
    }
}
