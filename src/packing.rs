//! Square-cell grid packing.
//!
//! Given a surface size and a number of cells, pick a cell side so that the
//! cells tile the surface while following its aspect ratio. Two candidate
//! layouts are computed, one sized to the surface height and one sized to the
//! surface width, and the larger cell side wins.
//!
//! Every row/column count is rounded up so that a candidate always has room
//! for `count` cells. The procedure is a heuristic: it is not guaranteed to
//! find the optimal packing, and on some aspect ratios (e.g. 1920x1080) adding
//! a cell can produce a slightly larger side than before.

use serde::Serialize;

/// Which axis a candidate layout was sized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Rows are chosen so the cells consume the full surface height.
    FillHeight,
    /// Columns are chosen so the cells consume the full surface width.
    FillWidth,
}

/// One candidate layout produced by a packing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub rows: u32,
    pub cols: u32,
    pub cell_side: f64,
}

/// Full result of a packing computation, including the intermediate values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPacking {
    /// Surface width divided by surface height
    pub aspect_ratio: f64,
    /// Non-integer column estimate, `sqrt(count * aspect_ratio)`
    pub ideal_cols: f64,
    /// Row estimate, `ceil(count / ideal_cols)`
    pub ideal_rows: f64,
    pub fill_height: Candidate,
    pub fill_width: Candidate,
    /// Selected cell side, the larger of the two candidates
    pub cell_side: f64,
}

/// Compute the side of the square cell for `count` cells on a
/// `surface_width` x `surface_height` surface.
///
/// With `count == 0` the result is `min(surface_width, surface_height)`, the
/// side of a single cell fitting the shorter dimension.
///
/// The function is total: a non-positive height or non-finite dimension
/// yields a NaN/Infinity/zero side which callers must reject. Use
/// [`crate::layout::GridGeometry::compute`] for a validating wrapper.
#[must_use]
pub fn pack(surface_width: f64, surface_height: f64, count: u32) -> f64 {
    GridPacking::compute(surface_width, surface_height, count).cell_side
}

impl GridPacking {
    /// Run both strategies and select the larger cell side.
    #[must_use]
    pub fn compute(surface_width: f64, surface_height: f64, count: u32) -> Self {
        let aspect_ratio = surface_width / surface_height;

        if count == 0 {
            let side = surface_width.min(surface_height);
            let empty = Candidate {
                rows: 0,
                cols: 0,
                cell_side: side,
            };
            return Self {
                aspect_ratio,
                ideal_cols: 0.0,
                ideal_rows: 0.0,
                fill_height: empty,
                fill_width: empty,
                cell_side: side,
            };
        }

        let n = f64::from(count);
        let ideal_cols = (n * aspect_ratio).sqrt();
        let ideal_rows = (n / ideal_cols).ceil();

        let fill_height = fill_height(n, aspect_ratio, ideal_rows, surface_height);
        let fill_width = fill_width(n, aspect_ratio, ideal_cols, surface_width);

        Self {
            aspect_ratio,
            ideal_cols,
            ideal_rows,
            fill_height,
            fill_width,
            cell_side: max_nan_propagating(fill_height.cell_side, fill_width.cell_side),
        }
    }

    /// Strategy whose candidate was selected. Ties go to fill-height.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        if self.fill_width.cell_side > self.fill_height.cell_side {
            Strategy::FillWidth
        } else {
            Strategy::FillHeight
        }
    }

    /// Candidate that produced [`Self::cell_side`].
    #[must_use]
    pub fn selected(&self) -> &Candidate {
        match self.strategy() {
            Strategy::FillHeight => &self.fill_height,
            Strategy::FillWidth => &self.fill_width,
        }
    }
}

/// Rows sized to the height. A grid whose rows cannot reach the surface
/// width at this aspect (`rows * ratio < cols`) gets proportionally more rows.
fn fill_height(n: f64, ratio: f64, ideal_rows: f64, height: f64) -> Candidate {
    let mut rows = ideal_rows.ceil();
    let mut cols = (n / rows).ceil();

    if rows * ratio < cols {
        let rows_ratio = cols / (rows * ratio);
        rows = (rows * rows_ratio).ceil();
        cols = (n / rows).ceil();
    }

    Candidate {
        rows: to_count(rows),
        cols: to_count(cols),
        cell_side: height / rows,
    }
}

/// Columns sized to the width. A grid too tall for the width at this aspect
/// (`rows * ratio > cols`) gets proportionally more columns.
fn fill_width(n: f64, ratio: f64, ideal_cols: f64, width: f64) -> Candidate {
    let mut cols = ideal_cols.ceil();
    let mut rows = (n / cols).ceil();

    if rows * ratio > cols {
        let cols_ratio = (rows * ratio) / cols;
        cols = (cols * cols_ratio).ceil();
        rows = (n / cols).ceil();
    }

    Candidate {
        rows: to_count(rows),
        cols: to_count(cols),
        cell_side: width / cols,
    }
}

/// `f64::max` ignores NaN; malformed input must stay visible to the caller.
fn max_nan_propagating(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// Saturating conversion of an already-ceiled count. NaN maps to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_count(v: f64) -> u32 {
    v as u32
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
    use test_case::test_case;

    #[test_case(640.0, 480.0, 25, 96.0 ; "landscape 25 cells")]
    #[test_case(640.0, 480.0, 1, 480.0 ; "landscape single cell")]
    #[test_case(100.0, 100.0, 4, 50.0 ; "square surface square count")]
    #[test_case(480.0, 640.0, 25, 96.0 ; "portrait 25 cells")]
    #[test_case(1000.0, 100.0, 7, 100.0 ; "wide strip")]
    #[test_case(640.0, 480.0, 2, 320.0 ; "two cells side by side")]
    fn pack_known_sides(w: f64, h: f64, n: u32, expected: f64) {
        assert_eq!(pack(w, h, n), expected);
    }

    #[test]
    fn candidates_for_default_surface() {
        let p = GridPacking::compute(640.0, 480.0, 25);
        assert_eq!(p.ideal_rows, 5.0);
        assert!((p.ideal_cols - 5.773_502_691_896_257).abs() < 1e-12);
        assert_eq!(
            p.fill_height,
            Candidate {
                rows: 5,
                cols: 5,
                cell_side: 96.0
            }
        );
        // 6 columns at this aspect is too tall, corrected up to 7
        assert_eq!(p.fill_width.cols, 7);
        assert_eq!(p.fill_width.rows, 4);
        assert_eq!(p.strategy(), Strategy::FillHeight);
        assert_eq!(p.selected().cell_side, p.cell_side);
    }

    #[test]
    fn fill_width_corrects_cols_on_wide_surface() {
        // 7 cells on a 10:1 strip: one row of 7 columns already fits the height
        let p = GridPacking::compute(1000.0, 100.0, 7);
        assert_eq!(p.fill_height.rows, 1);
        assert_eq!(p.fill_height.cols, 7);
        // 9 columns x 1 row is too tall for the width, corrected to 10
        assert_eq!(p.fill_width.cols, 10);
        assert_eq!(p.fill_width.cell_side, 100.0);
    }

    #[test]
    fn fill_height_corrects_rows_on_tall_surface() {
        // 4 rows x 1 col cannot reach the width at 1:10, corrected to 10 rows
        let p = GridPacking::compute(100.0, 1000.0, 1);
        assert_eq!(p.fill_height.rows, 10);
        assert_eq!(p.fill_height.cell_side, 100.0);
        assert_eq!(p.cell_side, 100.0);
    }

    #[test]
    fn fill_width_wins_when_larger() {
        let p = GridPacking::compute(640.0, 480.0, 2);
        assert_eq!(p.fill_height.cell_side, 240.0);
        assert_eq!(p.fill_width.cell_side, 320.0);
        assert_eq!(p.strategy(), Strategy::FillWidth);
    }

    #[test]
    fn zero_count_returns_shorter_side() {
        let side = pack(640.0, 480.0, 0);
        assert_eq!(side, 480.0);
        assert!(side.is_finite());
        let p = GridPacking::compute(640.0, 480.0, 0);
        assert_eq!(p.fill_height.rows, 0);
        assert_eq!(p.ideal_cols, 0.0);
    }

    #[test]
    fn zero_height_is_not_finite() {
        assert!(!pack(640.0, 0.0, 10).is_finite());
    }

    #[test]
    fn nan_is_propagated() {
        assert!(max_nan_propagating(f64::NAN, 1.0).is_nan());
        assert!(max_nan_propagating(1.0, f64::NAN).is_nan());
        assert_eq!(max_nan_propagating(1.0, 2.0), 2.0);
    }
}
