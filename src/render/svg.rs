//! SVG rendering backend.
//!
//! Produces a standalone SVG document. Available on every target; the CLI
//! uses it to write the grid to a file.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::error::{CircleGridError, Result};

use super::backend::{DrawCommand, RenderBackend, RenderParams};
use super::scene::Scene;

/// Renders into an in-memory SVG document
#[derive(Debug, Default)]
pub struct SvgRenderer {
    width: u32,
    height: u32,
    document: String,
}

impl SvgRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            document: String::new(),
        }
    }

    /// SVG text from the last render (empty before the first render)
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Take ownership of the rendered document
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_scene(&mut self, scene: &Scene) -> std::fmt::Result {
        let out = &mut self.document;
        out.clear();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, scene.width, scene.height
        )?;

        for command in &scene.commands {
            match command {
                DrawCommand::Clear {
                    width,
                    height,
                    background,
                } => {
                    if let Some(bg) = background {
                        let bg = escape_attr(bg);
                        writeln!(
                            out,
                            r#"  <rect x="0" y="0" width="{width}" height="{height}" fill="{bg}"/>"#
                        )?;
                    }
                }
                DrawCommand::FillCircle {
                    cx,
                    cy,
                    radius,
                    color,
                } => {
                    let color = escape_attr(color);
                    writeln!(
                        out,
                        r#"  <circle cx="{cx}" cy="{cy}" r="{radius}" fill="{color}"/>"#
                    )?;
                }
                DrawCommand::StrokeSquare {
                    x,
                    y,
                    side,
                    color,
                    line_width,
                } => {
                    let color = escape_attr(color);
                    writeln!(
                        out,
                        r#"  <rect x="{x}" y="{y}" width="{side}" height="{side}" fill="none" stroke="{color}" stroke-width="{line_width}"/>"#
                    )?;
                }
            }
        }

        writeln!(out, "</svg>")
    }
}

/// Escape text for a double-quoted XML attribute.
fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

impl RenderBackend for SvgRenderer {
    fn init(&mut self) -> Result<()> {
        // Nothing to set up for a string target
        Ok(())
    }

    // SVG output is resolution independent, so the pixel ratio is ignored
    fn resize(&mut self, width: u32, height: u32, _dpr: f32) {
        self.width = width;
        self.height = height;
        self.document.clear();
    }

    fn render(&mut self, params: &RenderParams) -> Result<()> {
        let scene = Scene::from_geometry(params.geometry, params.style);
        self.write_scene(&scene)
            .map_err(|e| CircleGridError::Render(format!("SVG write failed: {e}")))
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::layout::GridGeometry;
    use crate::render::RenderStyle;

    fn render(w: f64, h: f64, n: u32, style: &RenderStyle) -> String {
        let geometry = GridGeometry::compute(w, h, n).unwrap();
        let mut renderer = SvgRenderer::new(640, 480);
        renderer.init().unwrap();
        renderer
            .render(&RenderParams {
                geometry: &geometry,
                style,
            })
            .unwrap();
        renderer.into_document()
    }

    #[test]
    fn svg_contains_every_circle() {
        let svg = render(640.0, 480.0, 25, &RenderStyle::default());
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 25);
        assert_eq!(svg.matches("stroke=\"#808080\"").count(), 25);
        assert!(svg.contains(r##"<circle cx="48" cy="48" r="24" fill="#000000"/>"##));
        // 7th cell wraps to the second row
        assert!(svg.contains(r#"<circle cx="48" cy="144" r="24""#));
    }

    #[test]
    fn background_is_optional() {
        let plain = render(100.0, 100.0, 1, &RenderStyle::default());
        assert!(!plain.contains("<rect x=\"0\" y=\"0\" width=\"100\" height=\"100\" fill=\"#FFFFFF\""));

        let style = RenderStyle {
            background: Some("#FFFFFF".to_string()),
            ..RenderStyle::default()
        };
        let filled = render(100.0, 100.0, 1, &style);
        assert!(filled.contains(r##"<rect x="0" y="0" width="100" height="100" fill="#FFFFFF"/>"##));
    }

    #[test]
    fn style_strings_cannot_break_out_of_attributes() {
        let style = RenderStyle {
            circle_fill: r#"red"/><script>alert(1)</script><g x=""#.to_string(),
            square_stroke: "a&b".to_string(),
            background: Some("<bg>".to_string()),
            ..RenderStyle::default()
        };
        let svg = render(100.0, 100.0, 1, &style);
        assert!(!svg.contains("<script"));
        assert!(svg.contains(r#"fill="red&quot;/&gt;&lt;script&gt;"#));
        assert!(svg.contains(r#"stroke="a&amp;b""#));
        assert!(svg.contains(r#"fill="&lt;bg&gt;""#));
        assert_eq!(svg.matches('<').count(), 5);
    }

    #[test]
    fn escape_attr_borrows_clean_values() {
        assert!(matches!(escape_attr("#FF0000"), Cow::Borrowed("#FF0000")));
        assert_eq!(escape_attr(r#"1"<&>"#), "1&quot;&lt;&amp;&gt;");
    }

    #[test]
    fn resize_discards_previous_output() {
        let geometry = GridGeometry::compute(100.0, 100.0, 4).unwrap();
        let mut renderer = SvgRenderer::new(100, 100);
        renderer
            .render(&RenderParams {
                geometry: &geometry,
                style: &RenderStyle::default(),
            })
            .unwrap();
        assert!(!renderer.document().is_empty());
        renderer.resize(200, 200, 2.0);
        assert!(renderer.document().is_empty());
        assert_eq!((renderer.width(), renderer.height()), (200, 200));
    }
}
