//! Main CircleView struct - the browser entry point.
//!
//! This module provides the WASM-exported `CircleView` struct that handles:
//! - Sizing the canvas from the page query string
//! - Reading the last selected count from a cookie at startup
//! - Re-rendering and persisting the count when it changes
//! - Updating the on-screen labels
//!
//! The state itself ([`AppState`]) is target independent and is also used
//! by the CLI.

#[cfg(target_arch = "wasm32")]
mod console_log;
#[cfg(target_arch = "wasm32")]
mod events;
mod state;

pub use state::AppState;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{Event, HtmlCanvasElement};

#[cfg(target_arch = "wasm32")]
use crate::config::SurfaceConfig;
#[cfg(target_arch = "wasm32")]
use crate::labels::Labels;
#[cfg(target_arch = "wasm32")]
use crate::render::{CanvasRenderer, RenderBackend, RenderParams, Renderer};
#[cfg(target_arch = "wasm32")]
use crate::store::{CookieStore, CountStore, MemoryStore};

/// Element ids receiving label text, when present in the page
pub mod label_ids {
    pub const SURFACE: &str = "canvas_title_size";
    pub const ASPECT: &str = "canvas_title_aspect";
    pub const COUNT: &str = "n_circles";
    pub const GRID: &str = "row_cols";
    pub const SLIDER_VALUE: &str = "range";
}

/// Shared state that can be accessed by event handlers (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) app: AppState,
    pub(crate) store: Box<dyn CountStore>,
    pub(crate) renderer: Renderer,
}

#[cfg(target_arch = "wasm32")]
impl SharedState {
    fn render(&mut self) -> crate::error::Result<()> {
        let params = RenderParams {
            geometry: &self.app.geometry,
            style: &self.app.style,
        };
        self.renderer.render(&params)
    }
}

/// Browser viewer drawing the circle grid on a canvas
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct CircleView {
    state: Rc<RefCell<SharedState>>,
    closures: Vec<Closure<dyn FnMut(Event)>>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl CircleView {
    /// Create a new viewer instance
    ///
    /// Sizes the canvas from `?w=..&h=..`, restores the last count and draws
    /// the first frame.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<CircleView, JsValue> {
        console_error_panic_hook::set_once();
        console_log::init(log::LevelFilter::Info);

        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let surface = SurfaceConfig::from_query(&search);

        let store: Box<dyn CountStore> = match CookieStore::from_window() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("cookie store unavailable, count will not persist: {e}");
                Box::new(MemoryStore::new())
            }
        };

        let app = AppState::startup(surface, store.as_ref())?;

        let (width, height) = surface.pixel_size();
        let mut canvas_renderer = CanvasRenderer::new(canvas)?;
        canvas_renderer.init()?;
        canvas_renderer.resize(width, height, 1.0);

        let mut shared = SharedState {
            app,
            store,
            renderer: Renderer::Canvas(canvas_renderer),
        };
        shared.render()?;
        update_labels(&shared.app.labels());

        Ok(CircleView {
            state: Rc::new(RefCell::new(shared)),
            closures: Vec::new(),
        })
    }

    /// Change the circle count, persist it and redraw. Returns the new cell side.
    #[wasm_bindgen(js_name = "setCount")]
    pub fn set_count(&self, count: u32) -> Result<f64, JsValue> {
        Ok(Self::apply_count(&self.state, count)?)
    }

    /// Current circle count
    pub fn count(&self) -> u32 {
        self.state.borrow().app.count
    }

    /// Current cell side in pixels
    #[wasm_bindgen(js_name = "cellSide")]
    pub fn cell_side(&self) -> f64 {
        self.state.borrow().app.geometry.cell_side
    }

    /// Current geometry as a JS object
    pub fn geometry(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.borrow().app.geometry)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub(crate) fn apply_count(
        state: &Rc<RefCell<SharedState>>,
        count: u32,
    ) -> crate::error::Result<f64> {
        let mut s = state.borrow_mut();
        let SharedState { app, store, .. } = &mut *s;
        let cell_side = app.set_count(count, store.as_mut())?.cell_side;
        s.render()?;
        update_labels(&s.app.labels());
        Ok(cell_side)
    }
}

/// Write label text into the page elements that exist.
#[cfg(target_arch = "wasm32")]
fn update_labels(labels: &Labels) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let entries = [
        (label_ids::SURFACE, labels.surface.as_str()),
        (label_ids::ASPECT, labels.aspect.as_str()),
        (label_ids::COUNT, labels.count.as_str()),
        (label_ids::GRID, labels.grid.as_str()),
        (label_ids::SLIDER_VALUE, labels.count.as_str()),
    ];
    for (id, text) in entries {
        if let Some(element) = document.get_element_by_id(id) {
            element.set_text_content(Some(text));
        }
    }
}
