//! Canvas 2D rendering backend.
//!
//! Implements the RenderBackend trait using HTML Canvas 2D API via web-sys.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{CircleGridError, Result};
use crate::render::backend::{DrawCommand, RenderBackend, RenderParams};
use crate::render::scene::Scene;

/// Canvas 2D renderer
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasRenderer {
    /// Create a new Canvas 2D renderer
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = canvas.width();
        let height = canvas.height();

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
        })
    }

    fn draw_scene(&self, scene: &Scene) -> Result<()> {
        let ctx = &self.ctx;

        for command in &scene.commands {
            match command {
                DrawCommand::Clear {
                    width,
                    height,
                    background,
                } => {
                    ctx.clear_rect(0.0, 0.0, *width, *height);
                    if let Some(bg) = background {
                        ctx.set_fill_style_str(bg);
                        ctx.fill_rect(0.0, 0.0, *width, *height);
                    }
                }
                DrawCommand::FillCircle {
                    cx,
                    cy,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    ctx.arc(*cx, *cy, *radius, 0.0, PI * 2.0)
                        .map_err(|_| CircleGridError::Render("arc failed".to_string()))?;
                    ctx.fill();
                }
                DrawCommand::StrokeSquare {
                    x,
                    y,
                    side,
                    color,
                    line_width,
                } => {
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*line_width);
                    ctx.begin_path();
                    ctx.move_to(*x, *y);
                    ctx.line_to(*x, *y + *side);
                    ctx.line_to(*x + *side, *y + *side);
                    ctx.line_to(*x + *side, *y);
                    ctx.close_path();
                    ctx.stroke();
                }
            }
        }
        Ok(())
    }
}

impl RenderBackend for CanvasRenderer {
    fn init(&mut self) -> Result<()> {
        // Canvas 2D doesn't need explicit initialization
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        self.width = width;
        self.height = height;

        // Buffer size in canvas pixels; the viewer passes the surface size with dpr 1
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        // Setting the size resets the transform, so the scale never accumulates
        let _ = self.ctx.scale(f64::from(dpr), f64::from(dpr));
    }

    fn render(&mut self, params: &RenderParams) -> Result<()> {
        let scene = Scene::from_geometry(params.geometry, params.style);
        self.draw_scene(&scene)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
