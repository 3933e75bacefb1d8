//! Text of the on-screen labels.
//!
//! Display counts are rounded to nearest and are never fed back into the
//! geometry.

use serde::Serialize;

use crate::packing::{to_count, GridPacking};

/// Label strings shown next to the drawing surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    /// e.g. `Canvas: (640x480)`
    pub surface: String,
    /// e.g. `Aspect ratio: 1.33`
    pub aspect: String,
    /// e.g. `25`
    pub count: String,
    /// e.g. `(6x5)`
    pub grid: String,
}

impl Labels {
    #[must_use]
    pub fn new(surface_width: f64, surface_height: f64, count: u32) -> Self {
        let packing = GridPacking::compute(surface_width, surface_height, count);
        Self::with_packing(surface_width, surface_height, count, &packing)
    }

    /// Labels for an already computed packing. The surface size is shown as
    /// given, which may differ from the whole-pixel size that was packed.
    #[must_use]
    pub fn with_packing(
        surface_width: f64,
        surface_height: f64,
        count: u32,
        packing: &GridPacking,
    ) -> Self {
        let (cols, rows) = display_grid(packing);
        Self {
            surface: format!("Canvas: ({surface_width}x{surface_height})"),
            aspect: format!("Aspect ratio: {:.2}", surface_width / surface_height),
            count: count.to_string(),
            grid: format!("({cols}x{rows})"),
        }
    }
}

/// Columns x rows for display: the ideal estimates rounded to nearest.
#[must_use]
pub fn display_grid(packing: &GridPacking) -> (u32, u32) {
    (
        to_count(packing.ideal_cols.round()),
        to_count(packing.ideal_rows.round()),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn default_surface_labels() {
        let labels = Labels::new(640.0, 480.0, 25);
        assert_eq!(labels.surface, "Canvas: (640x480)");
        assert_eq!(labels.aspect, "Aspect ratio: 1.33");
        assert_eq!(labels.count, "25");
        assert_eq!(labels.grid, "(6x5)");
    }

    #[test]
    fn fractional_surface_keeps_decimals() {
        let labels = Labels::new(640.5, 480.0, 1);
        assert_eq!(labels.surface, "Canvas: (640.5x480)");
    }

    #[test]
    fn zero_count_grid() {
        assert_eq!(Labels::new(100.0, 100.0, 0).grid, "(0x0)");
        assert_eq!(Labels::new(100.0, 100.0, 4).grid, "(2x2)");
    }
}
