#![forbid(unsafe_code)]

//! WASM frontend for linkglow.
//!
//! Mounts the landing page into a DOM element and drives the two effects
//! from browser callbacks:
//! - `requestAnimationFrame` advances and redraws the particle canvas,
//! - `setInterval` ticks the title glow,
//! - a `mousemove` listener on the window feeds the pointer position.
//!
//! All three are released by `destroy()`. The element styling lives in
//! [`styles`], which is plain data and builds on every target.

pub mod styles;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::LinkGlowWeb;

use linkglow_core::{ConfigError, PageConfig};

/// Parse the optional JSON options handed over by JavaScript.
pub fn parse_options(options: Option<&str>) -> Result<PageConfig, ConfigError> {
    match options.map(str::trim) {
        None | Some("") => Ok(PageConfig::default()),
        Some(json) => PageConfig::from_json(json),
    }
}

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct LinkGlowWeb {
    config: PageConfig,
}

#[cfg(not(target_arch = "wasm32"))]
impl LinkGlowWeb {
    pub fn new(options: Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            config: parse_options(options.as_deref())?,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_options_use_defaults() {
        assert_eq!(parse_options(None).unwrap(), PageConfig::default());
        assert_eq!(parse_options(Some("  ")).unwrap(), PageConfig::default());
    }

    #[test]
    fn options_are_validated() {
        assert!(parse_options(Some(r#"{ "glow": { "period_ms": 0 } }"#)).is_err());
        let cfg = parse_options(Some(r#"{ "particles": { "count": 12 } }"#)).unwrap();
        assert_eq!(cfg.particles.count, 12);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_stub_parses_options() {
        let web = LinkGlowWeb::new(Some(r#"{ "page": { "caption": "hi" } }"#.into())).unwrap();
        assert_eq!(web.config().page.caption, "hi");
    }
}
