//! Benchmarks for grid packing and scene building.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used)]

use circlegrid::layout::GridGeometry;
use circlegrid::packing::pack;
use circlegrid::render::{RenderParams, RenderStyle, Scene, SvgRenderer, RenderBackend};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Benchmark the packing core on the default surface
fn bench_pack_default(c: &mut Criterion) {
    c.bench_function("pack_640x480_25", |b| {
        b.iter(|| pack(black_box(640.0), black_box(480.0), black_box(25)))
    });
}

/// Compare packing across circle counts
fn bench_pack_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_counts");

    for count in [1_u32, 25, 1_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("pack", count), &count, |b, &count| {
            b.iter(|| pack(black_box(1920.0), black_box(1080.0), count))
        });
    }

    group.finish();
}

/// Scene and SVG generation, which scale with the number of cells
fn bench_render(c: &mut Criterion) {
    let style = RenderStyle::default();
    let mut group = c.benchmark_group("render");

    for count in [25_u32, 1_000] {
        let geometry = GridGeometry::compute(1920.0, 1080.0, count).expect("valid surface");
        group.throughput(Throughput::Elements(u64::from(count)));

        group.bench_with_input(BenchmarkId::new("scene", count), &geometry, |b, g| {
            b.iter(|| Scene::from_geometry(black_box(g), &style))
        });

        group.bench_with_input(BenchmarkId::new("svg", count), &geometry, |b, g| {
            let mut renderer = SvgRenderer::new(1920, 1080);
            b.iter(|| {
                renderer
                    .render(&RenderParams {
                        geometry: black_box(g),
                        style: &style,
                    })
                    .expect("render")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pack_default, bench_pack_counts, bench_render);

criterion_main!(benches);
