#![forbid(unsafe_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use linkglow_core::PageConfig;
use linkglow_core::geometry::SurfaceSize;
use linkglow_core::glow::TextShadow;
use linkglow_core::runtime::{PageRuntime, surface_or_degrade};
use linkglow_core::surface::DrawSurface;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent, Window};

use crate::canvas::CanvasSurface;
use crate::dom::{self, PageDom};
use crate::parse_options;

struct Mounted {
    runtime: PageRuntime<StdRng>,
    surface: Option<CanvasSurface>,
    dom: PageDom,
}

type Shared = Rc<RefCell<Mounted>>;
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Browser callbacks registered by `mount`. Each one is released by
/// [`Callbacks::release`], which removes exactly what was added.
struct Callbacks {
    window: Window,
    frame_id: Rc<Cell<Option<i32>>>,
    frame_cb: FrameSlot,
    interval_id: i32,
    _interval_cb: Closure<dyn FnMut()>,
    pointer_cb: Closure<dyn FnMut(MouseEvent)>,
}

impl Callbacks {
    fn release(self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // The frame closure holds its own slot; dropping it breaks the cycle.
        self.frame_cb.borrow_mut().take();
        self.window.clear_interval_with_handle(self.interval_id);
        let _ = self.window.remove_event_listener_with_callback(
            "mousemove",
            self.pointer_cb.as_ref().unchecked_ref(),
        );
    }
}

/// The landing page, mountable into any element.
#[wasm_bindgen]
pub struct LinkGlowWeb {
    config: PageConfig,
    page: Option<Shared>,
    callbacks: Option<Callbacks>,
}

#[wasm_bindgen]
impl LinkGlowWeb {
    /// Create an unmounted page. `options` is a JSON [`PageConfig`]; missing
    /// or blank means the built-in page.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<LinkGlowWeb, JsValue> {
        let config =
            parse_options(options.as_deref()).map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Self {
            config,
            page: None,
            callbacks: None,
        })
    }

    /// Build the page under `root` and start both effects.
    ///
    /// The canvas is sized once to the window's inner size. If no 2D context
    /// is available the page still mounts, without particles.
    pub fn mount(&mut self, root: HtmlElement) -> Result<(), JsValue> {
        if self.callbacks.is_some() {
            return Err(JsValue::from_str("already mounted"));
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let size = viewport(&window)?;
        let initial = TextShadow::at(&self.config.glow, self.config.glow.initial);
        let dom = dom::build(&document, &root, &self.config.page, &initial)?;
        let (surface, field_size) = match CanvasSurface::acquire(&dom.canvas, size) {
            Ok(surface) => {
                let size = surface.size();
                (Some(surface), Some(size))
            }
            Err(err) => (None, surface_or_degrade(Err(err))),
        };
        let runtime = PageRuntime::new(&self.config, field_size, StdRng::from_entropy());
        let page: Shared = Rc::new(RefCell::new(Mounted {
            runtime,
            surface,
            dom,
        }));

        let pointer_cb = {
            let page = Rc::clone(&page);
            Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                page.borrow_mut()
                    .runtime
                    .pointer_moved(event.client_x() as f64, event.client_y() as f64);
            })
        };
        if let Err(err) =
            window.add_event_listener_with_callback("mousemove", pointer_cb.as_ref().unchecked_ref())
        {
            page.borrow().dom.remove();
            return Err(err);
        }

        let interval_cb = {
            let page = Rc::clone(&page);
            Closure::<dyn FnMut()>::new(move || {
                let mut page = page.borrow_mut();
                if page.runtime.glow_tick().is_some() {
                    let shadow = page.runtime.shadow();
                    if let Err(_err) = page.dom.set_shadow(&shadow) {
                        linkglow_core::debug!(error = ?_err, "text-shadow update failed");
                    }
                }
            })
        };
        let interval_id = match window.set_interval_with_callback_and_timeout_and_arguments_0(
            interval_cb.as_ref().unchecked_ref(),
            i32::try_from(self.config.glow.period_ms).unwrap_or(i32::MAX),
        ) {
            Ok(id) => id,
            Err(err) => {
                let _ = window.remove_event_listener_with_callback(
                    "mousemove",
                    pointer_cb.as_ref().unchecked_ref(),
                );
                page.borrow().dom.remove();
                return Err(err);
            }
        };

        let frame_id = Rc::new(Cell::new(None));
        let frame_cb: FrameSlot = Rc::new(RefCell::new(None));
        {
            let page = Rc::clone(&page);
            let slot = Rc::clone(&frame_cb);
            let id = Rc::clone(&frame_id);
            let win = window.clone();
            *frame_cb.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
                let running = {
                    let mut page = page.borrow_mut();
                    let Mounted {
                        runtime, surface, ..
                    } = &mut *page;
                    if let Some(surface) = surface.as_mut() {
                        runtime.frame(surface);
                    }
                    runtime.is_running() && !runtime.is_degraded()
                };
                id.set(None);
                if running && let Some(cb) = slot.borrow().as_ref() {
                    id.set(request_frame(&win, cb));
                }
            }));
        }
        if !page.borrow().runtime.is_degraded()
            && let Some(cb) = frame_cb.borrow().as_ref()
        {
            frame_id.set(request_frame(&window, cb));
        }

        linkglow_core::info!(
            width = size.width,
            height = size.height,
            "page mounted"
        );
        self.page = Some(page);
        self.callbacks = Some(Callbacks {
            window,
            frame_id,
            frame_cb,
            interval_id,
            _interval_cb: interval_cb,
            pointer_cb,
        });
        Ok(())
    }

    /// Stop both effects, drop the listener and remove the page. Safe to call
    /// more than once.
    pub fn destroy(&mut self) {
        let Some(callbacks) = self.callbacks.take() else {
            return;
        };
        if let Some(page) = &self.page {
            let mut page = page.borrow_mut();
            page.runtime.teardown();
            page.dom.remove();
        }
        callbacks.release();
    }

    /// Current glow intensity, in `[min, max]`.
    #[wasm_bindgen(js_name = glowIntensity)]
    pub fn glow_intensity(&self) -> f64 {
        match &self.page {
            Some(page) => page.borrow().runtime.glow().intensity(),
            None => self.config.glow.initial,
        }
    }

    /// Live particles; zero when unmounted or degraded.
    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.page
            .as_ref()
            .and_then(|page| page.borrow().runtime.field().map(|field| field.len()))
            .unwrap_or(0)
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.page
            .as_ref()
            .is_some_and(|page| page.borrow().runtime.is_running())
    }
}

impl Drop for LinkGlowWeb {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn viewport(window: &Window) -> Result<SurfaceSize, JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(SurfaceSize::new(width.max(0.0) as u32, height.max(0.0) as u32))
}

fn request_frame(window: &Window, cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(_err) => {
            linkglow_core::warn!(error = ?_err, "requestAnimationFrame failed; particles stopped");
            None
        }
    }
}
