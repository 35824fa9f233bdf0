#![forbid(unsafe_code)]

//! Pointer-attracted particle field.
//!
//! A fixed population of small dots drifts with a constant velocity, is pulled
//! toward the pointer every frame, and shrinks until it reaches a floor size.
//!
//! # Update rule
//!
//! Per frame and per axis:
//!
//! ```text
//! pos  += speed + (pointer - pos) * attraction
//! size  = max(size - shrink_step, min_size)   (only while size > min_size)
//! ```
//!
//! With zero intrinsic velocity the offset to a fixed pointer shrinks
//! geometrically by `1 - attraction` each frame.
//!
//! # Unbounded drift
//!
//! Positions are never clamped or wrapped. A particle pushed off-surface stays
//! there until the pointer pulls it back, and particles are never respawned.
//!
//! # No per-frame allocations
//!
//! The population is allocated once in [`ParticleField::new`] and updated in
//! place.

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::SurfaceError;
use crate::geometry::{Point, SurfaceSize};
use crate::surface::DrawSurface;

/// Population size of the default field.
pub const DEFAULT_PARTICLE_COUNT: usize = 100;

/// Tunables for a [`ParticleField`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldParams {
    /// Number of particles created at initialization.
    pub count: usize,
    /// Fraction of the pointer offset covered per frame.
    pub attraction: f64,
    /// Size lost per frame while above `min_size`.
    pub shrink_step: f64,
    /// Floor size; particles at or below it stop shrinking but are still drawn.
    pub min_size: f64,
    /// Half-open range initial sizes are drawn from.
    pub size_range: Range<f64>,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    /// Fill color for every particle.
    pub fill: Rgba,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_PARTICLE_COUNT,
            attraction: 0.10,
            shrink_step: 0.1,
            min_size: 0.2,
            size_range: 1.0..4.0,
            max_speed: 1.5,
            fill: Rgba::rgba(31, 30, 30, 204),
        }
    }
}

/// A single decorative dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
}

impl Particle {
    /// Create a particle.
    pub const fn new(x: f64, y: f64, size: f64, speed_x: f64, speed_y: f64) -> Self {
        Self {
            x,
            y,
            size,
            speed_x,
            speed_y,
        }
    }

    /// Random particle on a surface of `size`.
    fn spawn<R: Rng + ?Sized>(rng: &mut R, size: SurfaceSize, params: &FieldParams) -> Self {
        let speed = params.max_speed;
        Self {
            x: rng.gen_range(0.0..size.width as f64),
            y: rng.gen_range(0.0..size.height as f64),
            size: sample(rng, &params.size_range),
            speed_x: sample(rng, &(-speed..speed)),
            speed_y: sample(rng, &(-speed..speed)),
        }
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// One frame of motion and shrinking.
    #[inline]
    pub fn advance(&mut self, pointer: Point, params: &FieldParams) {
        self.x += self.speed_x + (pointer.x - self.x) * params.attraction;
        self.y += self.speed_y + (pointer.y - self.y) * params.attraction;

        if self.size > params.min_size {
            self.size = (self.size - params.shrink_step).max(params.min_size);
        }
    }
}

/// `gen_range` panics on an empty range; a zero-width range yields its start.
fn sample<R: Rng + ?Sized>(rng: &mut R, range: &Range<f64>) -> f64 {
    if range.start < range.end {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}

/// Fixed population of particles over one surface.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    params: FieldParams,
    surface: SurfaceSize,
    frames: u64,
}

impl ParticleField {
    /// Populate a field for a surface of `surface` pixels.
    ///
    /// Fails only for a zero-area surface.
    pub fn new<R: Rng + ?Sized>(
        surface: SurfaceSize,
        params: FieldParams,
        rng: &mut R,
    ) -> Result<Self, SurfaceError> {
        if surface.is_empty() {
            return Err(SurfaceError::Degenerate {
                width: surface.width,
                height: surface.height,
            });
        }
        let particles = (0..params.count)
            .map(|_| Particle::spawn(rng, surface, &params))
            .collect();
        crate::debug!(
            count = params.count,
            width = surface.width,
            height = surface.height,
            "particle field initialized"
        );
        Ok(Self {
            particles,
            params,
            surface,
            frames: 0,
        })
    }

    /// Build a field from an explicit population.
    pub fn from_particles(
        surface: SurfaceSize,
        params: FieldParams,
        particles: Vec<Particle>,
    ) -> Self {
        Self {
            particles,
            params,
            surface,
            frames: 0,
        }
    }

    /// Move and shrink every particle once.
    pub fn advance(&mut self, pointer: Point) {
        for p in &mut self.particles {
            p.advance(pointer, &self.params);
        }
        self.frames += 1;
    }

    /// Clear `surface` and draw every particle as a filled circle.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for p in &self.particles {
            surface.fill_circle(p.position(), p.size, self.params.fill);
        }
    }

    /// One animation frame: [`advance`](Self::advance) then [`render`](Self::render).
    pub fn frame<S: DrawSurface + ?Sized>(&mut self, pointer: Point, surface: &mut S) {
        self.advance(pointer);
        self.render(surface);
        crate::trace!(frame = self.frames, "particle frame rendered");
    }

    /// The population, in draw order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field has no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The parameters the field was built with.
    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Surface size captured at initialization.
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Number of completed advance steps.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Particles whose center is currently outside the surface.
    pub fn off_surface(&self) -> usize {
        self.particles
            .iter()
            .filter(|p| !self.surface.contains(p.position()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field(w: u32, h: u32, seed: u64) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(seed);
        ParticleField::new(SurfaceSize::new(w, h), FieldParams::default(), &mut rng).unwrap()
    }

    #[test]
    fn population_is_exactly_one_hundred() {
        assert_eq!(field(1920, 1080, 1).len(), 100);
        assert_eq!(field(1, 1, 2).len(), 100);
    }

    #[test]
    fn initial_values_within_ranges() {
        let f = field(640, 480, 7);
        for p in f.particles() {
            assert!((0.0..640.0).contains(&p.x), "x out of range: {p:?}");
            assert!((0.0..480.0).contains(&p.y), "y out of range: {p:?}");
            assert!((1.0..4.0).contains(&p.size), "size out of range: {p:?}");
            assert!((-1.5..1.5).contains(&p.speed_x), "speed_x out of range: {p:?}");
            assert!((-1.5..1.5).contains(&p.speed_y), "speed_y out of range: {p:?}");
        }
    }

    #[test]
    fn zero_area_surface_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = ParticleField::new(SurfaceSize::new(0, 1080), FieldParams::default(), &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            SurfaceError::Degenerate {
                width: 0,
                height: 1080
            }
        );
    }

    #[test]
    fn same_seed_same_field() {
        assert_eq!(field(800, 600, 42).particles(), field(800, 600, 42).particles());
    }

    #[test]
    fn advance_applies_update_rule() {
        let params = FieldParams::default();
        let mut p = Particle::new(100.0, 50.0, 2.0, 1.0, -0.5);
        p.advance(Point::new(200.0, 0.0), &params);
        assert!((p.x - 111.0).abs() < 1e-12, "x = {}", p.x);
        assert!((p.y - 44.5).abs() < 1e-12, "y = {}", p.y);
        assert!((p.size - 1.9).abs() < 1e-12, "size = {}", p.size);
    }

    #[test]
    fn size_floors_at_minimum() {
        let params = FieldParams::default();
        // The step is clamped, not just guarded: a bare `size -= 0.1` behind
        // `size > 0.2` would take 0.25 to 0.15. Here it lands on the floor.
        let mut p = Particle::new(0.0, 0.0, 0.25, 0.0, 0.0);
        p.advance(Point::ORIGIN, &params);
        assert_eq!(p.size, 0.2);
        assert_ne!(p.size, 0.25 - 0.1);
        p.advance(Point::ORIGIN, &params);
        assert_eq!(p.size, 0.2);
    }

    #[test]
    fn size_below_floor_is_left_alone() {
        let params = FieldParams::default();
        let mut p = Particle::new(0.0, 0.0, 0.1, 0.0, 0.0);
        p.advance(Point::ORIGIN, &params);
        assert_eq!(p.size, 0.1);
    }

    #[test]
    fn aged_out_particles_are_still_drawn() {
        let mut f = field(300, 300, 3);
        for _ in 0..100 {
            f.advance(Point::new(150.0, 150.0));
        }
        assert!(f.particles().iter().all(|p| p.size == 0.2));
        let mut s = RecordingSurface::new(f.surface());
        f.render(&mut s);
        assert_eq!(s.circle_count(), 100);
    }

    #[test]
    fn render_clears_then_draws_each_particle() {
        let f = field(320, 200, 9);
        let mut s = RecordingSurface::new(f.surface());
        f.render(&mut s);
        let cmds = s.commands();
        assert_eq!(cmds.len(), f.len() + 1);
        assert_eq!(cmds[0], DrawCommand::Clear);
        for (cmd, p) in cmds[1..].iter().zip(f.particles()) {
            assert_eq!(
                *cmd,
                DrawCommand::FillCircle {
                    center: Point::new(p.x, p.y),
                    radius: p.size,
                    color: Rgba::rgba(31, 30, 30, 204),
                }
            );
        }
    }

    #[test]
    fn frame_advances_before_rendering() {
        let mut f = field(320, 200, 11);
        let mut expected = f.particles().to_vec();
        let pointer = Point::new(10.0, 20.0);
        for p in &mut expected {
            p.advance(pointer, f.params());
        }
        let mut s = RecordingSurface::new(f.surface());
        f.frame(pointer, &mut s);
        assert_eq!(f.particles(), expected.as_slice());
        assert_eq!(f.frames(), 1);
        match s.commands()[1] {
            DrawCommand::FillCircle { center, .. } => {
                assert_eq!(center, expected[0].position());
            }
            DrawCommand::Clear => panic!("expected a circle after the clear"),
        }
    }

    #[test]
    fn drift_off_surface_is_not_corrected() {
        // Pointer parked far outside the surface drags everything off it;
        // nothing wraps, clamps or respawns.
        let mut f = field(100, 100, 5);
        for _ in 0..60 {
            f.advance(Point::new(-5_000.0, -5_000.0));
        }
        assert_eq!(f.len(), 100);
        assert_eq!(f.off_surface(), 100);
        assert!(f.particles().iter().all(|p| p.x < -1_000.0 && p.y < -1_000.0));
    }

    #[test]
    fn drifted_particles_return_with_pointer() {
        let mut f = field(100, 100, 6);
        for _ in 0..60 {
            f.advance(Point::new(-5_000.0, -5_000.0));
        }
        for _ in 0..300 {
            f.advance(Point::new(50.0, 50.0));
        }
        // Residual offset is bounded by speed / attraction = 15px per axis.
        for p in f.particles() {
            assert!((p.x - 50.0).abs() <= 15.0 + 1e-6, "{p:?}");
            assert!((p.y - 50.0).abs() <= 15.0 + 1e-6, "{p:?}");
        }
    }

    #[test]
    fn custom_count_and_empty_field() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = FieldParams {
            count: 0,
            ..FieldParams::default()
        };
        let f = ParticleField::new(SurfaceSize::new(10, 10), params, &mut rng).unwrap();
        assert!(f.is_empty());
        let mut s = RecordingSurface::new(f.surface());
        f.render(&mut s);
        assert_eq!(s.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn zero_speed_range_yields_still_particles() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = FieldParams {
            max_speed: 0.0,
            ..FieldParams::default()
        };
        let f = ParticleField::new(SurfaceSize::new(10, 10), params, &mut rng).unwrap();
        assert!(f.particles().iter().all(|p| p.speed_x == 0.0 && p.speed_y == 0.0));
    }
}
