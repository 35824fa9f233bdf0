#![cfg(target_arch = "wasm32")]

//! Browser tests for mounting and tearing down the page.
//!
//! Run with `wasm-pack test --headless --chrome crates/linkglow-web`.

use linkglow_web::LinkGlowWeb;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_root() -> HtmlElement {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    let root = document
        .create_element("div")
        .expect("create div")
        .dyn_into::<HtmlElement>()
        .expect("div is an HtmlElement");
    document
        .body()
        .expect("body")
        .append_child(&root)
        .expect("attach root");
    root
}

#[wasm_bindgen_test]
fn mount_builds_page_and_destroy_removes_it() {
    let root = fresh_root();
    let mut page = LinkGlowWeb::new(None).expect("default options");
    page.mount(root.clone()).expect("mount");

    assert_eq!(root.child_element_count(), 1);
    assert!(root.query_selector("canvas").expect("query").is_some());
    assert!(page.is_running());
    assert_eq!(page.glow_intensity(), 0.5);

    page.destroy();
    assert_eq!(root.child_element_count(), 0);
    assert!(!page.is_running());

    page.destroy();
    assert_eq!(root.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn rejected_mount_leaves_no_dom_behind() {
    let root = fresh_root();
    let mut page = LinkGlowWeb::new(None).expect("default options");
    page.mount(root.clone()).expect("first mount");

    let second = fresh_root();
    assert!(page.mount(second.clone()).is_err());
    assert_eq!(second.child_element_count(), 0);
    assert_eq!(root.child_element_count(), 1);

    page.destroy();
    page.mount(second.clone()).expect("mount again after destroy");
    assert_eq!(second.child_element_count(), 1);
    page.destroy();
}

#[wasm_bindgen_test]
fn invalid_options_fail_before_mount() {
    assert!(LinkGlowWeb::new(Some(r#"{ "particles": { "max_speed": 1e308 } }"#.into())).is_err());
}
