//! Benchmarks for the Prism filter stages.
//!
//! Run with: cargo bench -p prism-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use prism_core::filters::{self, KernelSize};
use prism_core::{ChannelOrder, PixelBuffer};

fn test_image(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::from(RgbImage::from_fn(w, h, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }))
}

fn benchmark_adjust(c: &mut Criterion) {
    let img = test_image(640, 480);
    c.bench_function("adjust_brightness_contrast", |b| {
        b.iter(|| filters::adjust_brightness_contrast(black_box(&img), 1.2, 20.0))
    });
}

fn benchmark_blur(c: &mut Criterion) {
    let img = test_image(640, 480);
    c.bench_function("gaussian_blur_5x5", |b| {
        b.iter(|| filters::gaussian_blur(black_box(&img), KernelSize::new(5, 5)))
    });
}

fn benchmark_denoise(c: &mut Criterion) {
    let img = test_image(128, 96);
    let mut group = c.benchmark_group("denoise");
    group.sample_size(10);
    group.bench_function("nl_means_128x96", |b| {
        b.iter(|| filters::denoise(black_box(&img)))
    });
    group.finish();
}

fn benchmark_edges(c: &mut Criterion) {
    let img = test_image(640, 480);
    c.bench_function("canny", |b| {
        b.iter(|| filters::detect_edges(black_box(&img), 50.0, 150.0))
    });
}

fn benchmark_histogram(c: &mut Criterion) {
    let img = test_image(640, 480);
    c.bench_function("histogram_features", |b| {
        b.iter(|| prism_core::extract_features(black_box(&img), ChannelOrder::Rgb))
    });
}

criterion_group!(
    benches,
    benchmark_adjust,
    benchmark_blur,
    benchmark_denoise,
    benchmark_edges,
    benchmark_histogram,
);
criterion_main!(benches);
