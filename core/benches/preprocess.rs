use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use dentascan_core::preprocess::preprocess;
use image::{DynamicImage, Rgb, RgbImage};

fn synthetic_photo(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

fn bench_preprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");

    // Typical camera resolutions, webcam to phone.
    for &(width, height) in &[(640u32, 480u32), (1920, 1080), (4032, 3024)] {
        let photo = synthetic_photo(width, height);
        group.bench_function(BenchmarkId::new("resize_normalize", format!("{width}x{height}")), |b| {
            b.iter(|| preprocess(&photo))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
