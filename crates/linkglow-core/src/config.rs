#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Every section is optional; missing fields fall back to the defaults, which
//! reproduce the stock landing page. A host passes a JSON document such as:
//!
//! ```json
//! {
//!   "page": { "title": { "text": "someone" }, "caption": "Hello" },
//!   "particles": { "count": 150 },
//!   "glow": { "period_ms": 80 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::glow::GlowParams;
use crate::page::PageContent;
use crate::particles::FieldParams;

/// Complete configuration for one page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub page: PageContent,
    pub particles: FieldParams,
    pub glow: GlowParams,
}

impl PageConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.page.validate()?;
        validate_field(&self.particles)?;
        validate_glow(&self.glow)
    }
}

fn finite(field: &'static str, v: f64) -> Result<f64, ConfigError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ConfigError::invalid(field, format!("{v} is not finite")))
    }
}

fn validate_field(p: &FieldParams) -> Result<(), ConfigError> {
    if p.count == 0 {
        return Err(ConfigError::invalid("particles.count", "must be positive"));
    }
    let attraction = finite("particles.attraction", p.attraction)?;
    if !(0.0..=1.0).contains(&attraction) {
        return Err(ConfigError::invalid(
            "particles.attraction",
            format!("{attraction} is outside [0, 1]"),
        ));
    }
    if finite("particles.shrink_step", p.shrink_step)? <= 0.0 {
        return Err(ConfigError::invalid("particles.shrink_step", "must be positive"));
    }
    if finite("particles.min_size", p.min_size)? < 0.0 {
        return Err(ConfigError::invalid("particles.min_size", "must not be negative"));
    }
    let lo = finite("particles.size_range", p.size_range.start)?;
    let hi = finite("particles.size_range", p.size_range.end)?;
    if lo <= 0.0 || lo >= hi || !(hi - lo).is_finite() {
        return Err(ConfigError::invalid(
            "particles.size_range",
            format!("[{lo}, {hi}) must be a non-empty positive range"),
        ));
    }
    let max_speed = finite("particles.max_speed", p.max_speed)?;
    if max_speed < 0.0 {
        return Err(ConfigError::invalid("particles.max_speed", "must not be negative"));
    }
    // Velocities are sampled from [-max_speed, max_speed); the span must be finite.
    if !(2.0 * max_speed).is_finite() {
        return Err(ConfigError::invalid(
            "particles.max_speed",
            format!("{max_speed} is too large"),
        ));
    }
    Ok(())
}

fn validate_glow(g: &GlowParams) -> Result<(), ConfigError> {
    let min = finite("glow.min", g.min)?;
    let max = finite("glow.max", g.max)?;
    let initial = finite("glow.initial", g.initial)?;
    if min > max {
        return Err(ConfigError::invalid("glow.min", format!("{min} exceeds max {max}")));
    }
    if !(min..=max).contains(&initial) {
        return Err(ConfigError::invalid(
            "glow.initial",
            format!("{initial} is outside [{min}, {max}]"),
        ));
    }
    if finite("glow.step", g.step)? <= 0.0 {
        return Err(ConfigError::invalid("glow.step", "must be positive"));
    }
    if g.period_ms == 0 {
        return Err(ConfigError::invalid("glow.period_ms", "must be positive"));
    }
    for layer in &g.layers {
        finite("glow.layers", layer.base)?;
        finite("glow.layers", layer.scale)?;
    }
    Ok(())
}
