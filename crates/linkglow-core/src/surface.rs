#![forbid(unsafe_code)]

//! The drawing-surface contract the particle field renders into.
//!
//! A host supplies something that can clear itself and fill circles. The
//! field never reads pixels back, so a surface can just as well record the
//! calls ([`RecordingSurface`]) or rasterize them
//! ([`RasterSurface`](crate::raster::RasterSurface)).

use crate::color::Rgba;
use crate::geometry::{Point, SurfaceSize};

/// A 2D surface sized to the viewport.
pub trait DrawSurface {
    /// Pixel size fixed at acquisition.
    fn size(&self) -> SurfaceSize;

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    /// Fill a circle of `radius` centered on `center`.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn size(&self) -> SurfaceSize {
        (**self).size()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        (**self).fill_circle(center, radius, color);
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
}

/// A surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create a recording surface reporting `size`.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// All calls since creation or the last [`take_commands`](Self::take_commands).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded calls.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Calls recorded after the most recent clear, i.e. what is currently visible.
    pub fn visible(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Number of filled circles recorded.
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }
}
