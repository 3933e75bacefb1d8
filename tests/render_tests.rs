//! Rendering tests for the SVG backend and the shared scene builder.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

mod common;

use circlegrid::render::{
    DrawCommand, RenderBackend, RenderParams, RenderStyle, Renderer, Scene, SvgRenderer,
};
use common::geometry;

fn svg_for(w: f64, h: f64, n: u32, style: &RenderStyle) -> String {
    let g = geometry(w, h, n);
    let mut renderer = SvgRenderer::new(w as u32, h as u32);
    renderer.init().unwrap();
    renderer
        .render(&RenderParams {
            geometry: &g,
            style,
        })
        .unwrap();
    renderer.into_document()
}

#[test]
fn circles_stay_inside_surface() {
    for (w, h, n) in [(640.0, 480.0, 25), (1920.0, 1080.0, 10), (123.0, 457.0, 77)] {
        let g = geometry(w, h, n);
        let scene = Scene::from_geometry(&g, &RenderStyle::default());
        assert_eq!(scene.circle_count(), n as usize);

        for command in &scene.commands {
            if let DrawCommand::FillCircle { cx, cy, radius, .. } = command {
                assert!(cx - radius >= 0.0 && cx + radius <= w + 1e-6, "{w}x{h} n={n}");
                assert!(cy - radius >= 0.0 && cy + radius <= h + 1e-6, "{w}x{h} n={n}");
            }
        }
    }
}

#[test]
fn circle_diameter_is_half_the_cell() {
    let g = geometry(640.0, 480.0, 25);
    let scene = Scene::from_geometry(&g, &RenderStyle::default());
    let DrawCommand::FillCircle { radius, .. } = &scene.commands[1] else {
        panic!("expected circle after clear");
    };
    assert_eq!(*radius * 4.0, g.cell_side);
}

#[test]
fn squares_are_row_major() {
    let g = geometry(640.0, 480.0, 8);
    let scene = Scene::from_geometry(&g, &RenderStyle::default());
    let squares: Vec<(f64, f64)> = scene
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::StrokeSquare { x, y, .. } => Some((*x, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(squares.len(), 8);
    let side = g.cell_side;
    let per_row = g.per_row as usize;
    for (i, &(x, y)) in squares.iter().enumerate() {
        assert_eq!(x, side * (i % per_row) as f64);
        assert_eq!(y, side * (i / per_row) as f64);
    }
}

#[test]
fn custom_colors_reach_svg() {
    let style = RenderStyle {
        circle_fill: "#FF0000".to_string(),
        square_stroke: "#0000FF".to_string(),
        line_width: 2.0,
        background: Some("#FFFFFF".to_string()),
    };
    let svg = svg_for(100.0, 100.0, 4, &style);
    assert_eq!(svg.matches(r##"fill="#FF0000""##).count(), 4);
    assert_eq!(svg.matches(r##"stroke="#0000FF" stroke-width="2""##).count(), 4);
    assert_eq!(svg.matches(r##"fill="#FFFFFF""##).count(), 1);
}

#[test]
fn svg_declares_surface_size() {
    let svg = svg_for(640.0, 480.0, 25, &RenderStyle::default());
    assert!(svg.starts_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="640" height="480" viewBox="0 0 640 480">"#
    ));
}

#[test]
fn empty_grid_renders_empty_document() {
    let svg = svg_for(640.0, 480.0, 0, &RenderStyle::default());
    assert_eq!(svg.matches("<circle").count(), 0);
    assert_eq!(svg.lines().count(), 2);
}

#[test]
fn renderer_enum_renders_svg() {
    let g = geometry(800.0, 600.0, 12);
    let mut renderer = Renderer::Svg(SvgRenderer::new(800, 600));
    renderer.init().unwrap();
    renderer
        .render(&RenderParams {
            geometry: &g,
            style: &RenderStyle::default(),
        })
        .unwrap();
    assert_eq!(
        renderer.svg_document().unwrap().matches("<circle").count(),
        12
    );
}
