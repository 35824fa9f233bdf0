#![forbid(unsafe_code)]

use linkglow_core::glow::TextShadow;
use linkglow_core::page::{Block, LINK_REL, LINK_TARGET, Layer, PageContent, Profile, SocialLink};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlCanvasElement, HtmlElement, HtmlImageElement,
};

use crate::styles::{self, Declarations};

/// Elements the running page keeps touching after the build.
pub(crate) struct PageDom {
    pub(crate) root: HtmlElement,
    pub(crate) canvas: HtmlCanvasElement,
    pub(crate) title: HtmlElement,
}

impl PageDom {
    /// Rewrite the title glow.
    pub(crate) fn set_shadow(&self, shadow: &TextShadow) -> Result<(), JsValue> {
        self.title
            .style()
            .set_property("text-shadow", &shadow.to_css())
    }

    /// Detach the whole page from its mount point.
    pub(crate) fn remove(&self) {
        self.root.remove();
    }
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|el| JsValue::from_str(&format!("<{tag}> has unexpected type: {el:?}")))
}

fn apply(el: &Element, decls: &Declarations) -> Result<(), JsValue> {
    el.set_attribute("style", &styles::to_inline(decls))
}

/// Build the page under `mount` and return the live handles.
pub(crate) fn build(
    document: &Document,
    mount: &Element,
    content: &PageContent,
    shadow: &TextShadow,
) -> Result<PageDom, JsValue> {
    let root: HtmlElement = create(document, "main")?;
    root.set_class_name(styles::ROOT_CLASS);
    apply(&root, &styles::root())?;

    let sheet: HtmlElement = create(document, "style")?;
    sheet.set_text_content(Some(styles::STYLESHEET));
    root.append_child(&sheet)?;

    let background: HtmlElement = create(document, "div")?;
    apply(&background, &styles::layer(Layer::Background))?;
    let bg_img: HtmlImageElement = create(document, "img")?;
    bg_img.set_src(&content.background.src);
    bg_img.set_alt(&content.background.alt);
    apply(&bg_img, &styles::background_image())?;
    background.append_child(&bg_img)?;
    root.append_child(&background)?;

    let canvas: HtmlCanvasElement = create(document, "canvas")?;
    apply(&canvas, &styles::layer(Layer::Particles))?;
    root.append_child(&canvas)?;

    let column: HtmlElement = create(document, "div")?;
    apply(&column, &styles::layer(Layer::Content))?;
    let mut title_el = None;
    for block in content.blocks() {
        let el = match block {
            Block::Profile(profile) => profile_block(document, profile)?,
            Block::Caption(text) => caption_block(document, text)?,
            Block::Title(title) => {
                let h1: HtmlElement = create(document, "h1")?;
                h1.set_text_content(Some(&title.text));
                apply(&h1, &styles::title(title, shadow))?;
                title_el = Some(h1.clone());
                h1
            }
            Block::Links(links) => links_block(document, links)?,
        };
        column.append_child(&el)?;
    }
    root.append_child(&column)?;

    let title = title_el.ok_or_else(|| JsValue::from_str("page has no title block"))?;
    mount.append_child(&root)?;
    Ok(PageDom {
        root,
        canvas,
        title,
    })
}

fn profile_block(document: &Document, profile: &Profile) -> Result<HtmlElement, JsValue> {
    let frame: HtmlElement = create(document, "div")?;
    apply(&frame, &styles::profile_frame(profile))?;

    let img: HtmlImageElement = create(document, "img")?;
    img.set_src(&profile.image.src);
    img.set_alt(&profile.image.alt);
    img.set_width(profile.size_px);
    img.set_height(profile.size_px);
    apply(&img, &styles::profile_image())?;
    frame.append_child(&img)?;

    let halo: HtmlElement = create(document, "div")?;
    halo.set_class_name(styles::HALO_CLASS);
    apply(&halo, &styles::profile_halo(profile))?;
    frame.append_child(&halo)?;
    Ok(frame)
}

fn caption_block(document: &Document, text: &str) -> Result<HtmlElement, JsValue> {
    let panel: HtmlElement = create(document, "div")?;
    apply(&panel, &styles::caption_panel())?;
    let p: HtmlElement = create(document, "p")?;
    p.set_text_content(Some(text));
    apply(&p, &styles::caption_text())?;
    panel.append_child(&p)?;
    Ok(panel)
}

fn links_block(document: &Document, links: &[SocialLink]) -> Result<HtmlElement, JsValue> {
    let row: HtmlElement = create(document, "div")?;
    apply(&row, &styles::link_row())?;
    for link in links {
        let a: HtmlAnchorElement = create(document, "a")?;
        a.set_href(&link.href);
        a.set_target(LINK_TARGET);
        a.set_rel(LINK_REL);
        a.set_class_name(styles::LINK_CLASS);

        let icon: HtmlImageElement = create(document, "img")?;
        icon.set_src(&link.icon);
        icon.set_alt(&link.label);
        icon.set_width(link.icon_px);
        icon.set_height(link.icon_px);
        a.append_child(&icon)?;
        row.append_child(&a)?;
    }
    Ok(row)
}
