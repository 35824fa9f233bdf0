#![forbid(unsafe_code)]

//! Packed RGBA color with CSS parsing and formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ColorParseError;

/// A straight-alpha RGBA color packed as `0xRRGGBBAA`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Alpha as a fraction in `[0, 1]`.
    #[inline]
    pub fn alpha_f64(self) -> f64 {
        self.a() as f64 / 255.0
    }

    /// Porter-Duff source-over: `self` composited on top of `dst`.
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u32;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u32;
        let inv = 255 - s_a;
        // Scaled by 255^2 so the channel blend stays exact until the final division.
        let out_a_scaled = 255 * s_a + d_a * inv;
        if out_a_scaled == 0 {
            return Self::TRANSPARENT;
        }
        let blend = |s: u8, d: u8| -> u8 {
            let numer = 255 * (s as u32) * s_a + (d as u32) * d_a * inv;
            let v = (numer + out_a_scaled / 2) / out_a_scaled;
            v.min(255) as u8
        };
        let out_a = (out_a_scaled + 127) / 255;
        Self::rgba(
            blend(self.r(), dst.r()),
            blend(self.g(), dst.g()),
            blend(self.b(), dst.b()),
            out_a.min(255) as u8,
        )
    }

    /// Format as a CSS color: `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise.
    pub fn to_css(self) -> String {
        if self.a() == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
        } else {
            format!(
                "rgba({},{},{},{})",
                self.r(),
                self.g(),
                self.b(),
                format_alpha(self.alpha_f64())
            )
        }
    }

    /// Parse a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)` or `rgba(..)`.
    pub fn parse_css(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::new(input));
        }
        let lower = s.to_ascii_lowercase();
        let (body, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(ColorParseError::new(input));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ColorParseError::new(input))?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ColorParseError::new(input));
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| ColorParseError::new(input));
        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;
        let a = if has_alpha {
            let alpha: f64 = parts[3].parse().map_err(|_| ColorParseError::new(input))?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(ColorParseError::new(input));
            }
            (alpha * 255.0).round() as u8
        } else {
            255
        };
        Ok(Self::rgba(r, g, b, a))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some(Rgba::rgb(nib(0)?, nib(1)?, nib(2)?))
        }
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// Shortest alpha string that round-trips through `u8` quantization.
fn format_alpha(alpha: f64) -> String {
    for digits in 1..=3 {
        let s = format!("{alpha:.digits$}");
        if let Ok(v) = s.parse::<f64>()
            && (v * 255.0).round() == (alpha * 255.0).round()
        {
            return s.trim_end_matches('0').trim_end_matches('.').to_string();
        }
    }
    format!("{alpha:.3}")
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgba({})", self.to_css())
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_css(s)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_css(&s).map_err(serde::de::Error::custom)
    }
}
