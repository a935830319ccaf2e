use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage};
use pdf417_locator::preprocess::{PreprocessLevel, preprocess_gray};
use pdf417_locator::{GuardSide, Locator, LocatorConfig, PixelMatrix, Strictness};

/// A 640x480 page with one symbol and some text-like clutter
fn synthetic_page() -> PixelMatrix {
    let mut pixels = PixelMatrix::filled(640, 480, 230);
    pixels.fill_rect(120, 160, 136, 300, 25);
    pixels.fill_rect(500, 160, 516, 300, 25);
    for row in 0..6 {
        for col in 0..40 {
            let x = 40 + col * 14;
            let y = 360 + row * 16;
            pixels.fill_rect(x, y, x + 6, y + 9, 40);
        }
    }
    pixels
}

fn to_image(pixels: PixelMatrix) -> DynamicImage {
    let (width, height) = (pixels.width() as u32, pixels.height() as u32);
    DynamicImage::ImageLuma8(GrayImage::from_raw(width, height, pixels.into_raw()).unwrap())
}

fn bench_preprocess_full(c: &mut Criterion) {
    let page = synthetic_page();
    c.bench_function("preprocess_full_640x480", |b| {
        b.iter(|| preprocess_gray(black_box(page.clone()), black_box(PreprocessLevel::Full)))
    });
}

fn bench_locate_pixels(c: &mut Criterion) {
    let pixels = preprocess_gray(synthetic_page(), PreprocessLevel::Full);
    let locator = Locator::new(LocatorConfig::preset(Strictness::Basic)).unwrap();
    c.bench_function("locate_pixels_640x480", |b| {
        b.iter(|| locator.locate_pixels(black_box(&pixels)))
    });
}

fn bench_locate_end_to_end(c: &mut Criterion) {
    let image = to_image(synthetic_page());
    let locator = Locator::new(LocatorConfig::preset(Strictness::Basic)).unwrap();
    c.bench_function("locate_640x480", |b| b.iter(|| locator.locate(black_box(&image))));
}

fn bench_locate_edge(c: &mut Criterion) {
    let pixels = preprocess_gray(synthetic_page(), PreprocessLevel::Full);
    let locator = Locator::new(LocatorConfig::preset(Strictness::Basic)).unwrap();
    c.bench_function("locate_edge_left_640x480", |b| {
        b.iter(|| locator.locate_edge_pixels(black_box(&pixels), black_box(GuardSide::Left)))
    });
}

criterion_group!(
    benches,
    bench_preprocess_full,
    bench_locate_pixels,
    bench_locate_end_to_end,
    bench_locate_edge
);
criterion_main!(benches);
