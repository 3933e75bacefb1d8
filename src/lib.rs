//! circlegrid - pack circles into a square-cell grid that fills a surface
//!
//! Given a surface size and a circle count, picks a cell side so that the
//! cells tile the surface while following its aspect ratio, then draws one
//! circle per cell:
//! - Pure packing core ([`packing::pack`])
//! - Row-major placement and validated geometry ([`layout`])
//! - Canvas 2D rendering in the browser, SVG everywhere ([`render`])
//! - Surface size from the page query, last count kept in a cookie
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { CircleView } from 'circlegrid';
//! await init();
//! const view = new CircleView(canvas);
//! view.attachSlider(document.getElementById('n'));
//! ```
//!
//! # Usage (Rust)
//!
//! ```
//! let side = circlegrid::packing::pack(640.0, 480.0, 25);
//! assert!((side - 96.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod labels;
pub mod layout;
pub mod packing;
pub mod render;
pub mod store;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use error::{CircleGridError, Result};
pub use layout::GridGeometry;
pub use packing::{pack, GridPacking};
#[cfg(target_arch = "wasm32")]
pub use viewer::CircleView;

/// Cell side for `count` circles on a `width` x `height` surface.
///
/// Total on numeric input: invalid dimensions yield NaN/Infinity.
#[must_use]
#[wasm_bindgen(js_name = "packCellSide")]
pub fn pack_cell_side(width: f64, height: f64, count: u32) -> f64 {
    packing::pack(width, height, count)
}

/// Validated geometry for `count` circles, as a JSON string
///
/// # Errors
/// Returns an error for non-finite or non-positive surface dimensions.
#[wasm_bindgen(js_name = "gridGeometryJson")]
pub fn grid_geometry_json(width: f64, height: f64, count: u32) -> std::result::Result<String, JsValue> {
    let geometry = GridGeometry::compute(width, height, count)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&geometry)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Validated geometry for `count` circles, as a JS object
///
/// # Errors
/// Returns an error for non-finite or non-positive surface dimensions.
#[wasm_bindgen(js_name = "gridGeometry")]
pub fn grid_geometry(width: f64, height: f64, count: u32) -> std::result::Result<JsValue, JsValue> {
    let geometry = GridGeometry::compute(width, height, count)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&geometry)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
