//! Layout for the packed grid.
//!
//! This module handles:
//! - Validating the surface and packing result
//! - Cells per row and row-major placement
//! - Cell rectangles and circle centers for the renderer

mod grid_layout;

pub use grid_layout::{cell_position, per_row, CellPlacement, GridGeometry};
