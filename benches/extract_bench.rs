//! Benchmarks for line reconstruction and OCR binarization.
//!
//! Run with: `cargo bench --bench extract_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::Rgba;
use pagetext::{enhance_for_ocr, LineReconstructor, PositionedFragment, RasterImage};

/// Generate a page of positioned runs: `lines` lines of `runs_per_line`
/// words each, with sub-tolerance jitter inside a line.
fn generate_page(lines: usize, runs_per_line: usize) -> Vec<PositionedFragment> {
    let mut fragments = Vec::with_capacity(lines * runs_per_line);
    for line in 0..lines {
        let baseline = 800.0 - (line as f32) * 14.0;
        for run in 0..runs_per_line {
            let jitter = if run % 2 == 0 { 0.0 } else { 1.5 };
            fragments.push(PositionedFragment::new(
                format!("word{run} "),
                baseline + jitter,
            ));
        }
        // Occasional blank run, as pdf text layers often have
        if line % 5 == 0 {
            fragments.push(PositionedFragment::new("   ", baseline));
        }
    }
    fragments
}

/// Gradient raster of roughly an A4 page at the given scale.
fn generate_raster(scale: f32) -> RasterImage {
    let width = (595.0 * scale) as u32;
    let height = (842.0 * scale) as u32;
    RasterImage::from_fn(width, height, |x, y| {
        let v = ((x + y) % 256) as u8;
        Rgba([v, v.wrapping_add(40), v.wrapping_sub(40), 255])
    })
}

fn bench_line_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_reconstruction");
    let reconstructor = LineReconstructor::default();

    for (label, lines) in [("10_lines", 10), ("60_lines", 60), ("500_lines", 500)] {
        let page = generate_page(lines, 12);
        group.throughput(Throughput::Elements(page.len() as u64));
        group.bench_with_input(BenchmarkId::new("reconstruct", label), &page, |b, page| {
            b.iter(|| black_box(reconstructor.reconstruct(black_box(page))));
        });
    }

    group.finish();
}

fn bench_binarization(c: &mut Criterion) {
    let mut group = c.benchmark_group("binarization");
    group.sample_size(20);

    for (label, scale) in [("scale_2", 2.0), ("scale_3", 3.0)] {
        let raster = generate_raster(scale);
        group.throughput(Throughput::Elements(u64::from(raster.width() * raster.height())));
        group.bench_with_input(BenchmarkId::new("enhance", label), &raster, |b, raster| {
            b.iter_batched(
                || raster.clone(),
                |mut image| {
                    enhance_for_ocr(&mut image);
                    black_box(image)
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_line_reconstruction, bench_binarization);
criterion_main!(benches);
