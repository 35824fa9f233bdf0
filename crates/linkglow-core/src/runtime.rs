#![forbid(unsafe_code)]

//! Host-driven runtime composing the particle field and the glow oscillator.
//!
//! [`PageRuntime`] owns no clock and no scheduler. The host calls in:
//!
//! 1. [`PageRuntime::pointer_moved`] from its pointer-move listener.
//! 2. [`PageRuntime::frame`] once per display refresh.
//! 3. [`PageRuntime::glow_tick`] from its fixed-interval timer.
//! 4. [`PageRuntime::teardown`] when the view goes away.
//!
//! Hosts without their own timers (tests, benches, replay) can use
//! [`PageRuntime::step`] instead of 2 and 3, advancing a deterministic clock.
//!
//! # Degraded mode
//!
//! When no drawing surface could be acquired, or it has zero area, the runtime
//! carries no particle field: frames draw nothing while the glow keeps
//! ticking.
//!
//! # Teardown
//!
//! After [`teardown`](PageRuntime::teardown) no call writes to a surface or
//! changes the glow, even if the host had a callback already queued.

use std::time::Duration;

use rand::Rng;

use crate::config::PageConfig;
use crate::error::SurfaceError;
use crate::geometry::{Point, SurfaceSize};
use crate::glow::{GlowOscillator, GlowTimer, TextShadow};
use crate::particles::ParticleField;
use crate::surface::DrawSurface;

/// Lifecycle of a runtime. There is no pause and no reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Running,
    TornDown,
}

/// Result of a single [`PageRuntime::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the runtime is still running.
    pub running: bool,
    /// Whether particles were drawn during this step.
    pub rendered: bool,
    /// Glow ticks fired during this step.
    pub glow_ticks: u32,
}

/// Field, glow and pointer state for one mounted page.
#[derive(Debug)]
pub struct PageRuntime<R> {
    field: Option<ParticleField>,
    glow: GlowOscillator,
    timer: GlowTimer,
    pointer: Point,
    state: RunState,
    frames: u64,
    rng: R,
}

impl<R: Rng> PageRuntime<R> {
    /// Build a runtime for a surface of `surface` pixels, or a degraded one
    /// when `surface` is `None` or has zero area.
    pub fn new(config: &PageConfig, surface: Option<SurfaceSize>, mut rng: R) -> Self {
        let field = match surface {
            Some(size) => Self::init_field(config, size, &mut rng),
            None => {
                crate::warn!("no drawing surface; particle overlay disabled");
                None
            }
        };
        Self {
            field,
            glow: GlowOscillator::new(config.glow.clone()),
            timer: GlowTimer::new(config.glow.period()),
            pointer: Point::ORIGIN,
            state: RunState::Running,
            frames: 0,
            rng,
        }
    }

    fn init_field(config: &PageConfig, size: SurfaceSize, rng: &mut R) -> Option<ParticleField> {
        match ParticleField::new(size, config.particles.clone(), rng) {
            Ok(field) => Some(field),
            Err(_err) => {
                crate::warn!(error = %_err, "particle overlay disabled");
                None
            }
        }
    }

    /// Record the latest pointer position. The last value persists until the
    /// next event.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.state == RunState::Running {
            self.pointer = Point::new(x, y);
        }
    }

    /// Advance and redraw the particles. Returns whether anything was drawn.
    pub fn frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        let Some(field) = self.field.as_mut() else {
            return false;
        };
        field.frame(self.pointer, surface);
        self.frames += 1;
        true
    }

    /// One glow timer tick. Returns the new intensity, or `None` after teardown.
    pub fn glow_tick(&mut self) -> Option<f64> {
        if self.state != RunState::Running {
            return None;
        }
        Some(self.glow.tick(&mut self.rng))
    }

    /// Advance a deterministic clock by `dt`: fire every glow tick that became
    /// due, then draw one frame.
    pub fn step<S: DrawSurface + ?Sized>(&mut self, dt: Duration, surface: &mut S) -> StepResult {
        if self.state != RunState::Running {
            return StepResult {
                running: false,
                rendered: false,
                glow_ticks: 0,
            };
        }
        let glow_ticks = self.timer.advance(dt);
        for _ in 0..glow_ticks {
            self.glow.tick(&mut self.rng);
        }
        let rendered = self.frame(surface);
        StepResult {
            running: true,
            rendered,
            glow_ticks,
        }
    }

    /// Stop the runtime. Returns `true` only for the call that performed the
    /// teardown; later calls are no-ops.
    pub fn teardown(&mut self) -> bool {
        if self.state == RunState::TornDown {
            return false;
        }
        self.state = RunState::TornDown;
        crate::info!(frames = self.frames, glow_ticks = self.glow.ticks(), "page torn down");
        true
    }
}

impl<R> PageRuntime<R> {
    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Whether the particle overlay is disabled.
    pub fn is_degraded(&self) -> bool {
        self.field.is_none()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn glow(&self) -> &GlowOscillator {
        &self.glow
    }

    /// Title shadow for the current glow intensity.
    pub fn shadow(&self) -> TextShadow {
        self.glow.shadow()
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Surface acquisition outcome as seen by a host: `Err` degrades.
pub fn surface_or_degrade(acquired: Result<SurfaceSize, SurfaceError>) -> Option<SurfaceSize> {
    match acquired {
        Ok(size) => Some(size),
        Err(_err) => {
            crate::warn!(error = %_err, "drawing surface could not be acquired");
            None
        }
    }
}
