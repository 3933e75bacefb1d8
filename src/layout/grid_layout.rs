//! Validated grid geometry and row-major cell placement.
//!
//! The packer only yields a cell side. This module turns that side into the
//! positions used for drawing: how many cells fit in a row, which row/column
//! each cell lands in, and where its center is.

use serde::Serialize;

use crate::config::MAX_COUNT;
use crate::error::{CircleGridError, Result};
use crate::packing::{to_count, GridPacking};

/// Relative slack added before flooring `width / side`, so that a side
/// computed as `width / k` still yields `k` cells per row.
const PER_ROW_TOLERANCE: f64 = 1e-9;

/// Geometry of one packed surface
#[derive(Debug, Clone, Serialize)]
pub struct GridGeometry {
    pub surface_width: f64,
    pub surface_height: f64,
    /// Number of cells to place
    pub count: u32,
    /// Side of the square cell bounding one circle
    pub cell_side: f64,
    /// Circle radius (a quarter of the cell side)
    pub radius: f64,
    /// Cells placed before wrapping to the next row (always >= 1)
    pub per_row: u32,
    /// Rows actually occupied by `count` cells
    pub rows_used: u32,
    /// Intermediate packing values
    pub packing: GridPacking,
}

/// Position of a single cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlacement {
    pub index: u32,
    pub row: u32,
    pub col: u32,
    /// X of the cell's left edge
    pub x: f64,
    /// Y of the cell's top edge
    pub y: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub side: f64,
    pub radius: f64,
}

/// Number of cells of `cell_side` that fit across `surface_width`.
///
/// Never returns 0: a cell wider than the surface degenerates to a single
/// column.
#[must_use]
pub fn per_row(surface_width: f64, cell_side: f64) -> u32 {
    let fitted = (surface_width / cell_side * (1.0 + PER_ROW_TOLERANCE)).floor();
    to_count(fitted).max(1)
}

/// Row-major `(row, col)` of the cell at `index`.
#[must_use]
pub fn cell_position(index: u32, per_row: u32) -> (u32, u32) {
    let per_row = per_row.max(1);
    (index / per_row, index % per_row)
}

fn validate_surface(width: f64, height: f64) -> Result<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(CircleGridError::InvalidSurface { width, height })
    }
}

impl GridGeometry {
    /// Pack `count` cells onto the surface and derive placement.
    ///
    /// # Errors
    /// Returns `InvalidSurface` for non-finite or non-positive dimensions,
    /// `CountTooLarge` above [`MAX_COUNT`] and `NonFiniteCellSide` if the
    /// packer yields an unusable side.
    pub fn compute(surface_width: f64, surface_height: f64, count: u32) -> Result<Self> {
        validate_surface(surface_width, surface_height)?;
        if count > MAX_COUNT {
            return Err(CircleGridError::CountTooLarge {
                count,
                max: MAX_COUNT,
            });
        }

        let packing = GridPacking::compute(surface_width, surface_height, count);
        let cell_side = packing.cell_side;
        if !cell_side.is_finite() || cell_side <= 0.0 {
            return Err(CircleGridError::NonFiniteCellSide(cell_side));
        }

        let per_row = per_row(surface_width, cell_side);
        let rows_used = count.div_ceil(per_row);

        log::debug!(
            "packed {count} cells on {surface_width}x{surface_height}: side={cell_side:.3} \
             per_row={per_row} rows={rows_used} strategy={:?}",
            packing.strategy()
        );

        Ok(Self {
            surface_width,
            surface_height,
            count,
            cell_side,
            radius: cell_side / 4.0,
            per_row,
            rows_used,
            packing,
        })
    }

    /// Placement of the cell at `index`. Indices past `count` are still
    /// placed on the same grid.
    #[must_use]
    pub fn cell(&self, index: u32) -> CellPlacement {
        let (row, col) = cell_position(index, self.per_row);
        let x = self.cell_side * f64::from(col);
        let y = self.cell_side * f64::from(row);
        let half = self.cell_side / 2.0;
        CellPlacement {
            index,
            row,
            col,
            x,
            y,
            center_x: x + half,
            center_y: y + half,
            side: self.cell_side,
            radius: self.radius,
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellPlacement> + '_ {
        (0..self.count).map(move |i| self.cell(i))
    }

    /// Whether the occupied rows fit within the surface height.
    #[must_use]
    pub fn fits_surface(&self) -> bool {
        let used_height = f64::from(self.rows_used) * self.cell_side;
        used_height <= self.surface_height * (1.0 + PER_ROW_TOLERANCE)
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
    fn per_row_never_zero() {
        assert_eq!(per_row(100.0, 250.0), 1);
        assert_eq!(per_row(100.0, f64::NAN), 1);
    }

    #[test]
    fn per_row_absorbs_division_error() {
        // 100 / (100 / 11) evaluates just below 11
        assert_eq!(per_row(100.0, 100.0 / 11.0), 11);
        assert_eq!(per_row(640.0, 96.0), 6);
    }

    #[test]
    fn cell_position_is_row_major() {
        assert_eq!(cell_position(0, 6), (0, 0));
        assert_eq!(cell_position(5, 6), (0, 5));
        assert_eq!(cell_position(6, 6), (1, 0));
        assert_eq!(cell_position(24, 6), (4, 0));
        // degenerate single column
        assert_eq!(cell_position(3, 0), (3, 0));
    }

    #[test]
    fn default_surface_geometry() {
        let g = GridGeometry::compute(640.0, 480.0, 25).unwrap();
        assert_eq!(g.cell_side, 96.0);
        assert_eq!(g.radius, 24.0);
        assert_eq!(g.per_row, 6);
        assert_eq!(g.rows_used, 5);
        assert!(g.fits_surface());
        assert!(g.per_row * g.rows_used >= 25);
    }

    #[test]
    fn cell_centers_follow_side() {
        let g = GridGeometry::compute(100.0, 100.0, 4).unwrap();
        let cells: Vec<_> = g.cells().collect();
        assert_eq!(cells.len(), 4);
        assert_eq!((cells[0].center_x, cells[0].center_y), (25.0, 25.0));
        assert_eq!((cells[1].center_x, cells[1].center_y), (75.0, 25.0));
        assert_eq!((cells[2].center_x, cells[2].center_y), (25.0, 75.0));
        assert_eq!(cells[3].radius, 12.5);
        assert_eq!((cells[3].x, cells[3].y), (50.0, 50.0));
    }

    #[test]
    fn zero_count_has_no_cells() {
        let g = GridGeometry::compute(640.0, 480.0, 0).unwrap();
        assert_eq!(g.cells().count(), 0);
        assert_eq!(g.rows_used, 0);
        assert_eq!(g.cell_side, 480.0);
    }

    #[test]
    fn rejects_bad_surfaces() {
        for (w, h) in [(0.0, 480.0), (640.0, 0.0), (-1.0, 10.0), (f64::NAN, 10.0)] {
            let err = GridGeometry::compute(w, h, 10).unwrap_err();
            assert!(matches!(err, CircleGridError::InvalidSurface { .. }));
        }
        assert!(GridGeometry::compute(f64::INFINITY, 480.0, 1).is_err());
    }

    #[test]
    fn rejects_counts_above_max() {
        let g = GridGeometry::compute(640.0, 480.0, MAX_COUNT).unwrap();
        assert!(g.fits_surface());

        for count in [MAX_COUNT + 1, u32::MAX] {
            let err = GridGeometry::compute(640.0, 480.0, count).unwrap_err();
            assert!(matches!(
                err,
                CircleGridError::CountTooLarge { count: c, max: MAX_COUNT } if c == count
            ));
        }
    }
}
