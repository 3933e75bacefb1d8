//! Packing core tests: reference scenarios and properties over count sweeps.
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

use circlegrid::packing::{pack, GridPacking, Strategy};
use common::{assert_close, geometry, ALL_SURFACES, MAX_COUNT, MONOTONE_SURFACES};
use test_case::test_case;

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn default_surface_25_circles() {
    let side = pack(640.0, 480.0, 25);
    assert_eq!(side, 96.0);

    let per_row = (640.0 / side).floor() as u32;
    assert_eq!(per_row, 6);
    assert!(per_row * 25_u32.div_ceil(per_row) >= 25);

    let g = geometry(640.0, 480.0, 25);
    assert_eq!((g.per_row, g.rows_used), (6, 5));
}

#[test]
fn default_surface_single_circle() {
    let side = pack(640.0, 480.0, 1);
    assert_eq!(side, 480.0);
    assert_eq!(geometry(640.0, 480.0, 1).per_row, 1);
}

#[test]
fn square_surface_square_count() {
    let p = GridPacking::compute(100.0, 100.0, 4);
    assert_eq!(p.cell_side, 50.0);
    assert_eq!((p.fill_height.cols, p.fill_height.rows), (2, 2));
    assert_eq!((p.fill_width.cols, p.fill_width.rows), (2, 2));
}

#[test]
fn zero_count_is_defined() {
    let side = pack(640.0, 480.0, 0);
    assert!(side.is_finite());
    assert!(side > 0.0);
    assert_eq!(side, pack(640.0, 480.0, 1));
}

#[test_case(1920.0, 1080.0, 9, 360.0 ; "hd nine")]
#[test_case(1920.0, 1080.0, 10, 384.0 ; "hd ten")]
#[test_case(640.0, 480.0, 100, 160.0 / 3.0 ; "default hundred")]
#[test_case(300.0, 1000.0, 58, 60.0 ; "tall fifty eight")]
#[test_case(300.0, 1000.0, 59, 200.0 / 3.0 ; "tall fifty nine")]
fn exact_procedure_values(w: f64, h: f64, n: u32, expected: f64) {
    assert_close(pack(w, h, n), expected);
}

#[test]
fn heuristic_can_grow_with_count() {
    // Ceil-based corrections are kept as-is, so on 16:9 going from 9 to 10
    // cells switches to a 5-column fill-width layout with larger cells.
    let nine = GridPacking::compute(1920.0, 1080.0, 9);
    let ten = GridPacking::compute(1920.0, 1080.0, 10);
    assert_eq!(nine.strategy(), Strategy::FillHeight);
    assert_eq!(ten.strategy(), Strategy::FillWidth);
    assert!(ten.cell_side > nine.cell_side);
    assert!(geometry(1920.0, 1080.0, 10).fits_surface());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn side_is_positive_and_finite() {
    for &(w, h) in ALL_SURFACES {
        for n in 1..=MAX_COUNT {
            let side = pack(w, h, n);
            assert!(side.is_finite() && side > 0.0, "{w}x{h} n={n}: {side}");
        }
    }
}

#[test]
fn per_row_at_least_one_when_cell_fits() {
    for &(w, h) in ALL_SURFACES {
        for n in 1..=MAX_COUNT {
            let g = geometry(w, h, n);
            if g.cell_side <= w {
                assert!(g.per_row >= 1);
                assert!((w / g.cell_side * (1.0 + 1e-9)).floor() >= 1.0);
            }
        }
    }
}

#[test]
fn capacity_covers_count_and_fits_surface() {
    for &(w, h) in ALL_SURFACES {
        for n in 1..=MAX_COUNT {
            let g = geometry(w, h, n);
            assert!(g.per_row * g.rows_used >= n, "{w}x{h} n={n}");
            assert!(g.fits_surface(), "{w}x{h} n={n} overflows");
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    for &(w, h) in ALL_SURFACES {
        for n in [0, 1, 7, 25, 399] {
            let first = GridPacking::compute(w, h, n);
            let second = GridPacking::compute(w, h, n);
            assert_eq!(first, second);
            assert_eq!(pack(w, h, n).to_bits(), pack(w, h, n).to_bits());
        }
    }
}

#[test]
fn more_cells_never_enlarge_cells() {
    for &(w, h) in MONOTONE_SURFACES {
        let mut previous = pack(w, h, 0);
        for n in 1..=MAX_COUNT {
            let side = pack(w, h, n);
            assert!(
                side <= previous + 1e-9,
                "{w}x{h}: side grew from {previous} to {side} at n={n}"
            );
            previous = side;
        }
    }
}

#[test]
fn selected_side_is_larger_candidate() {
    for &(w, h) in ALL_SURFACES {
        for n in 1..=MAX_COUNT {
            let p = GridPacking::compute(w, h, n);
            assert_eq!(p.cell_side, p.fill_height.cell_side.max(p.fill_width.cell_side));
            assert!(p.fill_height.rows * p.fill_height.cols >= n);
            assert!(p.fill_width.rows * p.fill_width.cols >= n);
        }
    }
}

#[test]
fn invalid_input_is_not_finite() {
    assert!(!pack(640.0, 0.0, 5).is_finite() || pack(640.0, 0.0, 5) <= 0.0);
    assert!(pack(f64::NAN, 480.0, 5).is_nan());
}
