use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pdf417_locator::Point;
use pdf417_locator::detector::hough::HoughLineFitter;

/// Anchor points of a slightly tilted guard plus scattered outliers
fn guard_points(count: usize) -> Vec<Point> {
    let mut points: Vec<Point> = (0..count)
        .map(|i| Point::new(120.0 + i as f32 * 0.05, 40.0 + i as f32 * 3.0))
        .collect();
    points.extend((0..count / 4).map(|i| Point::new((i * 37 % 400) as f32, (i * 53 % 300) as f32)));
    points
}

fn bench_extract_lines_small(c: &mut Criterion) {
    let points = guard_points(64);
    let max_rho = HoughLineFitter::max_rho(&points).ceil() as usize;
    let fitter = HoughLineFitter::new(max_rho, 180, 2).unwrap();
    c.bench_function("hough_extract_lines_64", |b| {
        b.iter(|| fitter.extract_lines(black_box(&points), black_box(8)))
    });
}

fn bench_extract_lines_large(c: &mut Criterion) {
    let points = guard_points(1024);
    let max_rho = HoughLineFitter::max_rho(&points).ceil() as usize;
    let fitter = HoughLineFitter::new(max_rho, 180, 2).unwrap();
    c.bench_function("hough_extract_lines_1024", |b| {
        b.iter(|| fitter.extract_lines(black_box(&points), black_box(8)))
    });
}

fn bench_extract_lines_fine_theta(c: &mut Criterion) {
    let points = guard_points(256);
    let max_rho = HoughLineFitter::max_rho(&points).ceil() as usize;
    let fitter = HoughLineFitter::new(max_rho, 720, 4).unwrap();
    c.bench_function("hough_extract_lines_256_fine_theta", |b| {
        b.iter(|| fitter.extract_lines(black_box(&points), black_box(8)))
    });
}

criterion_group!(
    benches,
    bench_extract_lines_small,
    bench_extract_lines_large,
    bench_extract_lines_fine_theta
);
criterion_main!(benches);
