#![cfg(not(target_arch = "wasm32"))]

//! Property-based invariant tests for the page styling.
//!
//! Verifies:
//! 1. Every layer carries its z-index, and only the particle layer is click-through
//! 2. The title's `text-shadow` matches the glow at any intensity in range
//! 3. Inline style strings are `name: value;` pairs in declaration order
//! 4. Option parsing accepts any in-range particle count and glow period

use linkglow_core::glow::{GlowParams, TextShadow};
use linkglow_core::page::{Layer, PageContent};
use linkglow_web::parse_options;
use linkglow_web::styles;
use proptest::prelude::*;

fn arb_layer() -> impl Strategy<Value = Layer> {
    prop_oneof![
        Just(Layer::Background),
        Just(Layer::Particles),
        Just(Layer::Content),
    ]
}

proptest! {
    #[test]
    fn layer_stacking(layer in arb_layer()) {
        let decls = styles::layer(layer);
        let z = decls.iter().find(|(k, _)| *k == "z-index").map(|(_, v)| v.clone());
        prop_assert_eq!(z, Some(layer.z_index().to_string()));
        let click_through = decls.iter().any(|(k, v)| *k == "pointer-events" && v == "none");
        prop_assert_eq!(click_through, layer == Layer::Particles);
    }

    #[test]
    fn title_shadow_tracks_intensity(intensity in 0.3f64..=1.0) {
        let page = PageContent::default();
        let shadow = TextShadow::at(&GlowParams::default(), intensity);
        let decls = styles::title(&page.title, &shadow);
        let css = decls
            .iter()
            .find(|(k, _)| *k == "text-shadow")
            .map(|(_, v)| v.clone());
        prop_assert_eq!(css, Some(shadow.to_css()));
        for r in shadow.radii {
            prop_assert!((13.0..=70.0).contains(&r), "radius {r} out of band");
        }
    }

    #[test]
    fn inline_preserves_order(values in prop::collection::vec("[a-z0-9]{1,8}", 0..6)) {
        const NAMES: [&str; 6] = ["a", "b", "c", "d", "e", "f"];
        let decls: styles::Declarations = values
            .iter()
            .zip(NAMES)
            .map(|(v, k)| (k, v.clone()))
            .collect();
        let inline = styles::to_inline(&decls);
        let expected: Vec<String> = decls.iter().map(|(k, v)| format!("{k}: {v};")).collect();
        prop_assert_eq!(inline, expected.join(" "));
    }

    #[test]
    fn options_accept_valid_numbers(count in 1usize..500, period in 1u64..10_000) {
        let json = format!(r#"{{ "particles": {{ "count": {count} }}, "glow": {{ "period_ms": {period} }} }}"#);
        let cfg = parse_options(Some(&json)).unwrap();
        prop_assert_eq!(cfg.particles.count, count);
        prop_assert_eq!(cfg.glow.period_ms, period);
    }
}
