#![forbid(unsafe_code)]

//! Randomly wandering glow intensity for the title text.
//!
//! [`GlowOscillator`] holds one scalar that a fixed-period timer nudges up or
//! down by a constant step, clamped to a band. [`TextShadow`] maps the current
//! value to three concentric shadow radii; the mapping is pure and can run on
//! every repaint regardless of the tick rate.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// One concentric shadow: `radius = base + intensity * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShadowLayer {
    pub base: f64,
    pub scale: f64,
}

impl ShadowLayer {
    /// Create a layer.
    pub const fn new(base: f64, scale: f64) -> Self {
        Self { base, scale }
    }

    /// Blur radius at `intensity`.
    #[inline]
    pub fn radius(&self, intensity: f64) -> f64 {
        self.base + intensity * self.scale
    }
}

/// Tunables for the oscillator and its shadow mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlowParams {
    pub initial: f64,
    pub step: f64,
    pub min: f64,
    pub max: f64,
    /// Timer period in milliseconds.
    pub period_ms: u64,
    pub color: Rgba,
    pub layers: [ShadowLayer; 3],
}

impl GlowParams {
    /// Timer period.
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

impl Default for GlowParams {
    fn default() -> Self {
        Self {
            initial: 0.5,
            step: 0.05,
            min: 0.3,
            max: 1.0,
            period_ms: 100,
            color: Rgba::rgb(0x42, 0x28, 0xed),
            layers: [
                ShadowLayer::new(10.0, 20.0),
                ShadowLayer::new(20.0, 30.0),
                ShadowLayer::new(30.0, 40.0),
            ],
        }
    }
}

/// Direction of one glow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nudge {
    Brighten,
    Dim,
}

impl Nudge {
    /// Fair coin flip.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::Brighten
        } else {
            Self::Dim
        }
    }

    #[inline]
    fn sign(self) -> f64 {
        match self {
            Self::Brighten => 1.0,
            Self::Dim => -1.0,
        }
    }
}

/// Bounded random walk driving the title glow.
#[derive(Debug, Clone)]
pub struct GlowOscillator {
    intensity: f64,
    params: GlowParams,
    ticks: u64,
}

impl GlowOscillator {
    /// Start at `params.initial`, clamped into the band.
    pub fn new(params: GlowParams) -> Self {
        let intensity = params.initial.clamp(params.min, params.max);
        Self {
            intensity,
            params,
            ticks: 0,
        }
    }

    /// Start at an explicit value, clamped into the band.
    pub fn with_intensity(params: GlowParams, intensity: f64) -> Self {
        let mut osc = Self::new(params);
        osc.intensity = intensity.clamp(osc.params.min, osc.params.max);
        osc
    }

    /// One timer tick with a random direction. Returns the new intensity.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        self.apply(Nudge::random(rng))
    }

    /// One step in a fixed direction. Returns the new intensity.
    pub fn apply(&mut self, nudge: Nudge) -> f64 {
        let next = self.intensity + self.params.step * nudge.sign();
        self.intensity = next.clamp(self.params.min, self.params.max);
        self.ticks += 1;
        crate::trace!(intensity = self.intensity, ?nudge, "glow tick");
        self.intensity
    }

    /// Current intensity in `[min, max]`.
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn params(&self) -> &GlowParams {
        &self.params
    }

    /// Shadow for the current intensity.
    pub fn shadow(&self) -> TextShadow {
        TextShadow::at(&self.params, self.intensity)
    }
}

/// Three concentric glow shadows sharing one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextShadow {
    pub radii: [f64; 3],
    pub color: Rgba,
}

impl TextShadow {
    /// Map `intensity` through the layers in `params`.
    pub fn at(params: &GlowParams, intensity: f64) -> Self {
        Self {
            radii: params.layers.map(|layer| layer.radius(intensity)),
            color: params.color,
        }
    }

    /// CSS `text-shadow` value.
    pub fn to_css(&self) -> String {
        let color = self.color.to_css();
        self.radii
            .iter()
            .map(|r| format!("0 0 {}px {color}", format_px(*r)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Pixel value with float noise trimmed (`20.000000000000004` -> `20`).
fn format_px(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let s = format!("{rounded:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Fixed-period tick accumulator for hosts that drive time explicitly.
#[derive(Debug, Clone)]
pub struct GlowTimer {
    period: Duration,
    elapsed: Duration,
}

impl GlowTimer {
    /// Timer firing every `period`. A zero period never fires.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    /// Add `dt` and return how many ticks became due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        let mut due = 0u32;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            due = due.saturating_add(1);
        }
        due
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time accumulated toward the next tick.
    pub fn pending(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn osc_at(v: f64) -> GlowOscillator {
        GlowOscillator::with_intensity(GlowParams::default(), v)
    }

    #[test]
    fn starts_at_half() {
        assert_eq!(GlowOscillator::new(GlowParams::default()).intensity(), 0.5);
    }

    #[test]
    fn dim_at_floor_stays_at_floor() {
        let mut g = osc_at(0.3);
        assert_eq!(g.apply(Nudge::Dim), 0.3);
    }

    #[test]
    fn brighten_at_ceiling_stays_at_ceiling() {
        let mut g = osc_at(1.0);
        assert_eq!(g.apply(Nudge::Brighten), 1.0);
    }

    #[test]
    fn steps_by_a_twentieth() {
        let mut g = osc_at(0.5);
        assert!((g.apply(Nudge::Brighten) - 0.55).abs() < 1e-12);
        assert!((g.apply(Nudge::Dim) - 0.5).abs() < 1e-12);
        assert!((g.apply(Nudge::Dim) - 0.45).abs() < 1e-12);
        assert_eq!(g.ticks(), 3);
    }

    #[test]
    fn out_of_band_start_is_clamped() {
        assert_eq!(osc_at(5.0).intensity(), 1.0);
        assert_eq!(osc_at(-1.0).intensity(), 0.3);
    }

    #[test]
    fn random_ticks_visit_both_directions() {
        let mut rng = StdRng::seed_from_u64(17);
        let (mut up, mut down) = (0, 0);
        for _ in 0..1000 {
            match Nudge::random(&mut rng) {
                Nudge::Brighten => up += 1,
                Nudge::Dim => down += 1,
            }
        }
        assert!(up > 400 && down > 400, "up={up} down={down}");
    }

    #[test]
    fn tick_changes_by_step_or_clamps() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = GlowOscillator::new(GlowParams::default());
        for _ in 0..500 {
            let before = g.intensity();
            let after = g.tick(&mut rng);
            let delta = (after - before).abs();
            assert!(
                (delta - 0.05).abs() < 1e-9 || after == 0.3 || after == 1.0,
                "{before} -> {after}"
            );
        }
    }

    #[test]
    fn shadow_radii_at_default() {
        let shadow = osc_at(0.5).shadow();
        assert_eq!(shadow.radii, [20.0, 35.0, 50.0]);
        assert_eq!(
            shadow.to_css(),
            "0 0 20px #4228ed, 0 0 35px #4228ed, 0 0 50px #4228ed"
        );
    }

    #[test]
    fn shadow_radii_at_extremes() {
        let params = GlowParams::default();
        assert_eq!(TextShadow::at(&params, 1.0).radii, [30.0, 50.0, 70.0]);
        let low = TextShadow::at(&params, 0.3);
        assert_eq!(
            low.to_css(),
            "0 0 16px #4228ed, 0 0 29px #4228ed, 0 0 42px #4228ed"
        );
    }

    #[test]
    fn shadow_css_keeps_fractions() {
        let params = GlowParams::default();
        let css = TextShadow::at(&params, 0.55).to_css();
        assert_eq!(css, "0 0 21px #4228ed, 0 0 36.5px #4228ed, 0 0 52px #4228ed");
    }

    #[test]
    fn timer_counts_due_ticks() {
        let mut t = GlowTimer::new(Duration::from_millis(100));
        assert_eq!(t.advance(Duration::from_millis(16)), 0);
        assert_eq!(t.advance(Duration::from_millis(84)), 1);
        assert_eq!(t.advance(Duration::from_millis(250)), 2);
        assert_eq!(t.pending(), Duration::from_millis(50));
    }

    #[test]
    fn zero_period_timer_never_fires() {
        let mut t = GlowTimer::new(Duration::ZERO);
        assert_eq!(t.advance(Duration::from_secs(10)), 0);
    }
}
