//! Canvas 2D rendering backend.
//!
//! Draws the grid with the HTML Canvas 2D API via web-sys.

mod renderer;

pub use renderer::CanvasRenderer;
