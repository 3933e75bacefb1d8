//! Common test utilities and assertion helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use circlegrid::layout::GridGeometry;

/// Surfaces on which the packer is monotone for every count up to
/// [`MAX_COUNT`]: adding cells never enlarges the cell side.
pub const MONOTONE_SURFACES: &[(f64, f64)] = &[
    (640.0, 480.0),
    (480.0, 640.0),
    (800.0, 600.0),
    (100.0, 100.0),
    (200.0, 100.0),
    (1000.0, 100.0),
];

/// A wider spread of surfaces, including ones where the heuristic is not
/// monotone.
pub const ALL_SURFACES: &[(f64, f64)] = &[
    (640.0, 480.0),
    (480.0, 640.0),
    (800.0, 600.0),
    (100.0, 100.0),
    (200.0, 100.0),
    (1000.0, 100.0),
    (1920.0, 1080.0),
    (300.0, 1000.0),
    (123.0, 457.0),
];

/// Largest count exercised by the property sweeps
pub const MAX_COUNT: u32 = 400;

/// Compute geometry, panicking on invalid input.
pub fn geometry(w: f64, h: f64, n: u32) -> GridGeometry {
    GridGeometry::compute(w, h, n)
        .unwrap_or_else(|e| panic!("geometry for {w}x{h} n={n} failed: {e}"))
}

/// Assert two floats are equal within `1e-9`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
