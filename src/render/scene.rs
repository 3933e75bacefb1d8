//! Draw-command list for a packed grid.

use crate::config::MAX_COUNT;
use crate::layout::GridGeometry;

use super::backend::{DrawCommand, RenderStyle};

/// Ordered draw commands for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Clear, then for each cell a filled circle followed by its square outline.
    pub fn from_geometry(geometry: &GridGeometry, style: &RenderStyle) -> Self {
        let cells = geometry.count.min(MAX_COUNT) as usize;
        let mut commands = Vec::with_capacity(cells * 2 + 1);
        commands.push(DrawCommand::Clear {
            width: geometry.surface_width,
            height: geometry.surface_height,
            background: style.background.clone(),
        });

        for cell in geometry.cells() {
            commands.push(DrawCommand::FillCircle {
                cx: cell.center_x,
                cy: cell.center_y,
                radius: cell.radius,
                color: style.circle_fill.clone(),
            });
            commands.push(DrawCommand::StrokeSquare {
                x: cell.x,
                y: cell.y,
                side: cell.side,
                color: style.square_stroke.clone(),
                line_width: style.line_width,
            });
        }

        Self {
            width: geometry.surface_width,
            height: geometry.surface_height,
            commands,
        }
    }

    /// Number of circles in the scene
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn scene_has_circle_and_square_per_cell() {
        let geometry = GridGeometry::compute(100.0, 100.0, 4).unwrap();
        let scene = Scene::from_geometry(&geometry, &RenderStyle::default());
        assert_eq!(scene.commands.len(), 9);
        assert_eq!(scene.circle_count(), 4);
        assert!(matches!(scene.commands[0], DrawCommand::Clear { .. }));

        match &scene.commands[3] {
            DrawCommand::FillCircle { cx, cy, radius, color } => {
                assert_eq!((*cx, *cy, *radius), (75.0, 25.0, 12.5));
                assert_eq!(color, "#000000");
            }
            other => panic!("expected circle, got {other:?}"),
        }
        match &scene.commands[4] {
            DrawCommand::StrokeSquare { x, y, side, .. } => {
                assert_eq!((*x, *y, *side), (50.0, 0.0, 50.0));
            }
            other => panic!("expected square, got {other:?}"),
        }
    }

    #[test]
    fn empty_grid_only_clears() {
        let geometry = GridGeometry::compute(640.0, 480.0, 0).unwrap();
        let scene = Scene::from_geometry(&geometry, &RenderStyle::default());
        assert_eq!(scene.commands.len(), 1);
        assert_eq!(scene.circle_count(), 0);
    }

    #[test]
    fn largest_allowed_count_builds() {
        let geometry = GridGeometry::compute(640.0, 480.0, MAX_COUNT).unwrap();
        let scene = Scene::from_geometry(&geometry, &RenderStyle::default());
        assert_eq!(scene.commands.len(), MAX_COUNT as usize * 2 + 1);
    }
}
