#![forbid(unsafe_code)]

//! Core: particle field, glow oscillator, drawing surfaces, page model, and
//! the host-driven runtime that composes them.
//!
//! Nothing in this crate touches a real display. Hosts (the web frontend,
//! tests, benches) hand in a [`surface::DrawSurface`], pointer coordinates and
//! time, and read back what should be shown.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod glow;
pub mod logging;
pub mod page;
pub mod particles;
pub mod raster;
pub mod runtime;
pub mod surface;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};

pub use color::Rgba;
pub use config::PageConfig;
pub use error::{ColorParseError, ConfigError, SurfaceError};
pub use geometry::{Point, SurfaceSize};
pub use glow::{GlowOscillator, GlowParams, GlowTimer, Nudge, TextShadow};
pub use particles::{FieldParams, Particle, ParticleField};
pub use runtime::{PageRuntime, RunState, StepResult};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
