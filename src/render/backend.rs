//! Render backend trait and the draw commands shared by all backends.
//!
//! Geometry is turned into a flat list of [`DrawCommand`]s once; each
//! backend only has to know how to clear the surface, fill a circle and
//! stroke a square.

use crate::error::Result;
use crate::layout::GridGeometry;

use super::colors::{palette, CssColor};

/// A single drawing operation in surface coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface, optionally painting a background
    Clear {
        width: f64,
        height: f64,
        background: Option<CssColor>,
    },
    /// Filled circle
    FillCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: CssColor,
    },
    /// Square outline with top-left corner at (x, y)
    StrokeSquare {
        x: f64,
        y: f64,
        side: f64,
        color: CssColor,
        line_width: f64,
    },
}

/// Colors and stroke width used when building a scene
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub circle_fill: CssColor,
    pub square_stroke: CssColor,
    pub line_width: f64,
    /// Background color; `None` leaves the surface transparent
    pub background: Option<CssColor>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            circle_fill: palette::CIRCLE_FILL.to_string(),
            square_stroke: palette::SQUARE_STROKE.to_string(),
            line_width: 1.0,
            background: None,
        }
    }
}

/// Render parameters passed to the backend
pub struct RenderParams<'a> {
    pub geometry: &'a GridGeometry,
    pub style: &'a RenderStyle,
}

/// Trait for render backends
///
/// Implementations handle the actual drawing operations for different
/// targets (Canvas 2D, SVG).
pub trait RenderBackend {
    /// Initialize the backend
    fn init(&mut self) -> Result<()>;

    /// Resize the render surface
    fn resize(&mut self, width: u32, height: u32, dpr: f32);

    /// Render a frame with the given parameters
    fn render(&mut self, params: &RenderParams) -> Result<()>;

    /// Get the current width
    fn width(&self) -> u32;

    /// Get the current height
    fn height(&self) -> u32;
}
