//! Criterion benchmarks for pixelkit critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Color: string grammar parsing (names, hex and functional)
//! - Resize: nearest-neighbour resampling
//! - Rotate: quarter-turn fast paths and bilinear resampling
//! - Adjust: per-pixel HSL modifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pixelkit::color::Color;
use pixelkit::editor::{ModifyMode, PixelBuffer};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a square buffer with a gradient so no two neighbours match
fn make_buffer(size: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(size, size);
    buffer
        .fill_with(|x, y| u32::from_be_bytes([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 0xFF]))
        .expect("packed values always resolve");
    buffer
}

// =============================================================================
// Color Parsing Benchmarks
// =============================================================================

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    group.bench_function("parse_named", |b| b.iter(|| Color::parse(black_box("rebeccapurple"))));

    group.bench_function("parse_hex_3", |b| b.iter(|| Color::parse(black_box("#F00"))));

    group.bench_function("parse_hex_6", |b| b.iter(|| Color::parse(black_box("#FF0000"))));

    group.bench_function("parse_hex_8", |b| b.iter(|| Color::parse(black_box("#FF0000FF"))));

    group.bench_function("parse_rgb", |b| b.iter(|| Color::parse(black_box("rgb(255, 0, 0)"))));

    group.bench_function("parse_rgba_percent", |b| {
        b.iter(|| Color::parse(black_box("rgba(100%, 0%, 0%, 50%)")))
    });

    group.bench_function("parse_hsl", |b| {
        b.iter(|| Color::parse(black_box("hsla(120deg, 100%, 50%, 0.5)")))
    });

    // Batch parsing (simulates parsing a palette)
    let colors = [
        "#FF0000", "lime", "#00F", "rgb(255 255 0)", "magenta", "hsl(180, 100%, 50%)", "white", "black",
        "#F0F0F0", "#0F0F0F", "#123456", "#ABCDEF", "rgba(0, 0, 0, .5)", "#654321", "#ABC", "navy",
    ];
    group.bench_function("parse_palette_16_mixed", |b| {
        b.iter(|| {
            for color in &colors {
                let _ = Color::parse(black_box(*color));
            }
        })
    });

    group.finish();
}

// =============================================================================
// Geometry Benchmarks
// =============================================================================

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");

    for size in [16, 64, 256].iter() {
        let buffer = make_buffer(*size);

        group.throughput(Throughput::Elements(u64::from(*size * *size) * 4));
        group.bench_with_input(
            BenchmarkId::new("resize_nearest_2x", format!("{}x{}", size, size)),
            &buffer,
            |b, buffer| {
                b.iter(|| {
                    let mut work = buffer.clone();
                    work.resize_nearest(black_box(*size * 2), black_box(*size * 2));
                    work
                })
            },
        );
    }

    group.finish();
}

fn bench_rotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate");

    for size in [16, 64, 256].iter() {
        let buffer = make_buffer(*size);
        group.throughput(Throughput::Elements(u64::from(*size * *size)));

        for degrees in [90.0, 180.0, 30.0] {
            group.bench_with_input(
                BenchmarkId::new(format!("rotate_{}", degrees), format!("{}x{}", size, size)),
                &buffer,
                |b, buffer| {
                    b.iter(|| {
                        let mut work = buffer.clone();
                        work.rotate(black_box(degrees), true);
                        work
                    })
                },
            );
        }
    }

    group.finish();
}

// =============================================================================
// Adjustment Benchmarks
// =============================================================================

fn bench_adjust(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjust");

    let buffer = make_buffer(64);
    group.throughput(Throughput::Elements(64 * 64));

    group.bench_function("hue_shift_64x64", |b| {
        b.iter(|| {
            let mut work = buffer.clone();
            work.hue_shift(black_box(45.0));
            work
        })
    });

    group.bench_function("saturation_scale_64x64", |b| {
        b.iter(|| {
            let mut work = buffer.clone();
            work.saturation(ModifyMode::Scale, black_box(0.5));
            work
        })
    });

    group.finish();
}

criterion_group!(benches, bench_color, bench_resize, bench_rotate, bench_adjust);

criterion_main!(benches);
