//! Rendering engine with pluggable backends.
//!
//! This module provides:
//! - Draw commands built once from grid geometry
//! - Backend-agnostic rendering trait and parameters
//! - Canvas 2D backend (wasm32)
//! - SVG backend (all targets)
//! - Color parsing utilities

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
pub mod scene;
pub mod svg;

// Re-export commonly used types
pub use backend::{DrawCommand, RenderBackend, RenderParams, RenderStyle};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use colors::{palette, parse_color, CssColor};
pub use scene::Scene;
pub use svg::SvgRenderer;

use crate::error::Result;

/// Renderer enum wrapping available backends for runtime switching.
pub enum Renderer {
    /// Canvas 2D backend (browser).
    #[cfg(target_arch = "wasm32")]
    Canvas(CanvasRenderer),
    /// SVG document backend.
    Svg(SvgRenderer),
}

impl Renderer {
    /// Delegate `init()` to the active backend.
    pub fn init(&mut self) -> Result<()> {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Canvas(r) => r.init(),
            Self::Svg(r) => r.init(),
        }
    }

    /// Delegate `resize()` to the active backend.
    pub fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Canvas(r) => r.resize(width, height, dpr),
            Self::Svg(r) => r.resize(width, height, dpr),
        }
    }

    /// Full render (calls the backend's `render()`).
    pub fn render(&mut self, params: &RenderParams) -> Result<()> {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Canvas(r) => r.render(params),
            Self::Svg(r) => r.render(params),
        }
    }

    /// Get current width.
    pub fn width(&self) -> u32 {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Canvas(r) => r.width(),
            Self::Svg(r) => r.width(),
        }
    }

    /// Get current height.
    pub fn height(&self) -> u32 {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Canvas(r) => r.height(),
            Self::Svg(r) => r.height(),
        }
    }

    /// Rendered SVG text, when the SVG backend is active.
    pub fn svg_document(&self) -> Option<&str> {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Canvas(_) => None,
            Self::Svg(r) => Some(r.document()),
        }
    }

    /// Returns true if this is the SVG backend.
    pub fn is_svg(&self) -> bool {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Canvas(_) => false,
            Self::Svg(_) => true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::layout::GridGeometry;

    #[test]
    fn renderer_dispatches_to_svg() {
        let geometry = GridGeometry::compute(640.0, 480.0, 3).unwrap();
        let mut renderer = Renderer::Svg(SvgRenderer::new(640, 480));
        renderer.init().unwrap();
        renderer.resize(320, 240, 2.0);
        assert_eq!((renderer.width(), renderer.height()), (320, 240));
        assert!(renderer.is_svg());

        renderer
            .render(&RenderParams {
                geometry: &geometry,
                style: &RenderStyle::default(),
            })
            .unwrap();
        let svg = renderer.svg_document().unwrap();
        assert_eq!(svg.matches("<circle").count(), 3);
    }
}
