#![forbid(unsafe_code)]

//! Page content and stacking order.
//!
//! The page is three stacked layers over the full viewport:
//!
//! | Layer        | z  | Pointer events |
//! |--------------|---:|----------------|
//! | `Background` | 0  | yes            |
//! | `Particles`  | 10 | no             |
//! | `Content`    | 20 | yes            |
//!
//! The content layer is a centered column of [`Block`]s in a fixed order:
//! profile picture, caption panel, glowing title, link row.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::ConfigError;

/// Browsing context external links open in.
pub const LINK_TARGET: &str = "_blank";
/// `rel` attribute for external links.
pub const LINK_REL: &str = "noopener noreferrer";

/// One of the stacked full-viewport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    Particles,
    Content,
}

impl Layer {
    /// All layers, bottom first.
    pub const ALL: [Layer; 3] = [Layer::Background, Layer::Particles, Layer::Content];

    pub const fn z_index(self) -> i32 {
        match self {
            Layer::Background => 0,
            Layer::Particles => 10,
            Layer::Content => 20,
        }
    }

    /// Whether the layer receives pointer events. The particle canvas lets
    /// them through to the links below.
    pub const fn pointer_events(self) -> bool {
        !matches!(self, Layer::Particles)
    }
}

/// An image by URL with alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

impl ImageRef {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// Round profile picture with a pulsing halo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub image: ImageRef,
    /// Edge length in CSS pixels.
    pub size_px: u32,
    pub halo: Rgba,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            image: ImageRef::new("/profile.jpg", "Profile Picture"),
            size_px: 192,
            halo: Rgba::rgba(59, 130, 246, 128),
        }
    }
}

/// The glowing display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Title {
    pub text: String,
    pub color: Rgba,
    /// Duration of the CSS transition smoothing glow changes.
    pub transition_ms: u32,
}

impl Default for Title {
    fn default() -> Self {
        Self {
            text: "__4iq".to_string(),
            color: Rgba::rgb(0x42, 0x28, 0xed),
            transition_ms: 800,
        }
    }
}

/// An outbound social link shown as an icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
    pub icon: String,
    #[serde(default = "SocialLink::default_icon_px")]
    pub icon_px: u32,
}

impl SocialLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            icon: icon.into(),
            icon_px: Self::default_icon_px(),
        }
    }

    fn default_icon_px() -> u32 {
        48
    }

    /// Only absolute http(s) URLs are accepted as link targets.
    pub fn is_external(&self) -> bool {
        let href = self.href.to_ascii_lowercase();
        ["https://", "http://"]
            .iter()
            .any(|scheme| href.len() > scheme.len() && href.starts_with(scheme))
    }
}

/// Everything the page shows besides the two animated effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageContent {
    pub background: ImageRef,
    pub profile: Profile,
    pub caption: String,
    pub title: Title,
    pub links: Vec<SocialLink>,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            background: ImageRef::new("/herobg.gif", "Background"),
            profile: Profile::default(),
            caption: "Jr. Admin on Boxhunt".to_string(),
            title: Title::default(),
            links: vec![
                SocialLink::new("Discord", "https://discord.gg/boxhunt", "/discord.svg"),
                SocialLink::new("NameMC", "https://namemc.com/__4iq", "/namemc.svg"),
            ],
        }
    }
}

/// One entry of the centered content column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Block<'a> {
    Profile(&'a Profile),
    Caption(&'a str),
    Title(&'a Title),
    Links(&'a [SocialLink]),
}

impl PageContent {
    /// Content column, top to bottom.
    pub fn blocks(&self) -> [Block<'_>; 4] {
        [
            Block::Profile(&self.profile),
            Block::Caption(&self.caption),
            Block::Title(&self.title),
            Block::Links(&self.links),
        ]
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.title.text.trim().is_empty() {
            return Err(ConfigError::invalid("page.title.text", "must not be empty"));
        }
        if self.profile.size_px == 0 {
            return Err(ConfigError::invalid("page.profile.size_px", "must be positive"));
        }
        for link in &self.links {
            if !link.is_external() {
                return Err(ConfigError::invalid(
                    "page.links.href",
                    format!("{:?} is not an http(s) URL", link.href),
                ));
            }
            if link.icon_px == 0 {
                return Err(ConfigError::invalid("page.links.icon_px", "must be positive"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_content_matches_landing_page() {
        let page = PageContent::default();
        assert_eq!(page.title.text, "__4iq");
        assert_eq!(page.title.color.to_css(), "#4228ed");
        assert_eq!(page.caption, "Jr. Admin on Boxhunt");
        assert_eq!(page.background.src, "/herobg.gif");
        assert_eq!(page.profile.image.src, "/profile.jpg");
        assert_eq!(page.profile.size_px, 192);
        let hrefs: Vec<&str> = page.links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, ["https://discord.gg/boxhunt", "https://namemc.com/__4iq"]);
        assert!(page.links.iter().all(|l| l.icon_px == 48));
    }

    #[test]
    fn blocks_are_in_column_order() {
        let page = PageContent::default();
        let blocks = page.blocks();
        assert!(matches!(blocks[0], Block::Profile(_)));
        assert!(matches!(blocks[1], Block::Caption("Jr. Admin on Boxhunt")));
        assert!(matches!(blocks[2], Block::Title(t) if t.text == "__4iq"));
        assert!(matches!(blocks[3], Block::Links(l) if l.len() == 2));
    }

    #[test]
    fn particle_layer_sits_between_and_ignores_pointer() {
        let z: Vec<i32> = Layer::ALL.iter().map(|l| l.z_index()).collect();
        assert_eq!(z, [0, 10, 20]);
        assert!(!Layer::Particles.pointer_events());
        assert!(Layer::Content.pointer_events());
    }

    #[test]
    fn external_link_detection() {
        assert!(SocialLink::new("a", "https://x.y", "i").is_external());
        assert!(SocialLink::new("a", "HTTP://x.y", "i").is_external());
        assert!(!SocialLink::new("a", "javascript:alert(1)", "i").is_external());
        assert!(!SocialLink::new("a", "https://", "i").is_external());
        assert!(!SocialLink::new("a", "/relative", "i").is_external());
    }

    #[test]
    fn validate_rejects_bad_content() {
        let mut page = PageContent::default();
        assert!(page.validate().is_ok());
        page.links.push(SocialLink::new("bad", "ftp://x", "i"));
        assert!(matches!(
            page.validate(),
            Err(ConfigError::Invalid { field: "page.links.href", .. })
        ));

        let mut page = PageContent::default();
        page.title.text = "   ".into();
        assert!(page.validate().is_err());
    }
}
