#![forbid(unsafe_code)]

//! Inline style declarations for every page element.
//!
//! Kept free of `web-sys` so the layout rules are testable on native targets.
//! The few rules that cannot be inline (hover, keyframes) live in
//! [`STYLESHEET`] and are keyed by the class constants below.

use linkglow_core::glow::TextShadow;
use linkglow_core::page::{Layer, Profile, Title};

/// Ordered CSS declarations for one element.
pub type Declarations = Vec<(&'static str, String)>;

/// Class on the page root.
pub const ROOT_CLASS: &str = "linkglow";
/// Class on the pulsing halo over the profile picture.
pub const HALO_CLASS: &str = "linkglow-halo";
/// Class on each external link.
pub const LINK_CLASS: &str = "linkglow-link";

/// Rules that need selectors: link hover zoom and the halo pulse.
pub const STYLESHEET: &str = "\
.linkglow-link { display: inline-block; transition: transform 150ms ease-in-out; }
.linkglow-link:hover { transform: scale(1.1); }
.linkglow-halo { animation: linkglow-pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite; }
@keyframes linkglow-pulse { 50% { opacity: 0.5; } }
";

fn decl(name: &'static str, value: impl Into<String>) -> (&'static str, String) {
    (name, value.into())
}

/// Join declarations into a `style` attribute value.
pub fn to_inline(decls: &[(&'static str, String)]) -> String {
    decls
        .iter()
        .map(|(k, v)| format!("{k}: {v};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full-viewport root, centering the content column.
pub fn root() -> Declarations {
    vec![
        decl("min-height", "100vh"),
        decl("display", "flex"),
        decl("flex-direction", "column"),
        decl("align-items", "center"),
        decl("justify-content", "center"),
        decl("position", "relative"),
        decl("overflow", "hidden"),
        decl("user-select", "none"),
    ]
}

/// One stacked layer. Background and particles cover the viewport; content
/// stays in flow so the root can center it.
pub fn layer(layer: Layer) -> Declarations {
    let mut decls = match layer {
        Layer::Background | Layer::Particles => vec![
            decl("position", "absolute"),
            decl("inset", "0"),
        ],
        Layer::Content => vec![
            decl("position", "relative"),
            decl("display", "flex"),
            decl("flex-direction", "column"),
            decl("align-items", "center"),
            decl("gap", "2rem"),
        ],
    };
    decls.push(decl("z-index", layer.z_index().to_string()));
    if !layer.pointer_events() {
        decls.push(decl("pointer-events", "none"));
    }
    decls
}

/// Background image stretched to cover the viewport.
pub fn background_image() -> Declarations {
    vec![
        decl("width", "100%"),
        decl("height", "100%"),
        decl("object-fit", "cover"),
    ]
}

/// Square box holding the profile picture and its halo.
pub fn profile_frame(profile: &Profile) -> Declarations {
    let px = format!("{}px", profile.size_px);
    vec![
        decl("position", "relative"),
        decl("width", px.clone()),
        decl("height", px),
    ]
}

pub fn profile_image() -> Declarations {
    vec![
        decl("width", "100%"),
        decl("height", "100%"),
        decl("border-radius", "9999px"),
        decl("object-fit", "cover"),
    ]
}

/// Colored shadow ring over the picture, animated by [`HALO_CLASS`].
pub fn profile_halo(profile: &Profile) -> Declarations {
    vec![
        decl("position", "absolute"),
        decl("inset", "0"),
        decl("border-radius", "9999px"),
        decl(
            "box-shadow",
            format!(
                "0 10px 15px -3px {halo}, 0 4px 6px -4px {halo}",
                halo = profile.halo.to_css()
            ),
        ),
    ]
}

/// Frosted translucent panel behind the caption.
pub fn caption_panel() -> Declarations {
    vec![
        decl("background-color", "rgba(255,255,255,0.1)"),
        decl("backdrop-filter", "blur(16px)"),
        decl("border-radius", "1.5rem"),
        decl("padding", "1.5rem"),
        decl("max-width", "28rem"),
    ]
}

pub fn caption_text() -> Declarations {
    vec![
        decl("margin", "0"),
        decl("color", "#ffffff"),
        decl("text-align", "center"),
    ]
}

/// Title text; `text-shadow` is rewritten on every glow tick.
pub fn title(title: &Title, shadow: &TextShadow) -> Declarations {
    vec![
        decl("margin", "0"),
        decl("font-size", "3.75rem"),
        decl("line-height", "1"),
        decl("font-weight", "700"),
        decl("text-align", "center"),
        decl("color", title.color.to_css()),
        decl("transition", format!("all {}ms ease-in-out", title.transition_ms)),
        decl("text-shadow", shadow.to_css()),
    ]
}

pub fn link_row() -> Declarations {
    vec![decl("display", "flex"), decl("gap", "1rem")]
}
