/// Geometry helpers for rectangle fitting and angle comparisons
use crate::models::{Point, Rectangle};

/// True when `a1` and `a2` agree up to a multiple of pi
///
/// Uses |sin(a1 - a2)|, which is small near every multiple of pi, so the
/// half-turn ambiguity of rectangle orientations is tolerated.
pub fn within_angular_threshold(a1: f32, a2: f32, threshold: f32) -> bool {
    (a1 - a2).sin().abs() < threshold
}

/// Cross product of (b - a) and (c - a)
fn cross(a: &Point, b: &Point, c: &Point) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Convex hull by Andrew's monotone chain, counter-clockwise
///
/// Collinear points on the hull boundary are dropped.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut points = points.to_vec();
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();

    if points.len() < 3 {
        return points;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(points.len() * 2);

    // Lower hull
    for p in &points {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }

    // Upper hull
    let lower_len = hull.len() + 1;
    for p in points.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(*p);
    }

    hull.pop();
    hull
}

/// Minimum-area enclosing rectangle of a convex polygon
///
/// Tries every hull edge as a rectangle side. The width axis follows the
/// winning edge. Returns `None` for fewer than 3 hull points.
pub fn min_area_rectangle(hull: &[Point], true_area: u32) -> Option<Rectangle> {
    if hull.len() < 3 {
        return None;
    }

    let n = hull.len();
    let mut best: Option<(f32, Rectangle)> = None;

    for i in 0..n {
        let origin = hull[i];
        let next = hull[(i + 1) % n];

        // Calculate the edge vector
        let edge_x = next.x - origin.x;
        let edge_y = next.y - origin.y;
        let edge_length = (edge_x * edge_x + edge_y * edge_y).sqrt();
        if edge_length < f32::EPSILON {
            continue;
        }

        let (nx, ny) = (edge_x / edge_length, edge_y / edge_length);
        let (px, py) = (-ny, nx);

        let mut min_n = f32::MAX;
        let mut max_n = f32::MIN;
        let mut min_p = f32::MAX;
        let mut max_p = f32::MIN;

        for point in hull {
            let (dx, dy) = (point.x - origin.x, point.y - origin.y);
            let proj_n = nx * dx + ny * dy;
            let proj_p = px * dx + py * dy;
            min_n = min_n.min(proj_n);
            max_n = max_n.max(proj_n);
            min_p = min_p.min(proj_p);
            max_p = max_p.max(proj_p);
        }

        let width = max_n - min_n;
        let height = max_p - min_p;
        let area = width * height;

        if best.as_ref().is_none_or(|(best_area, _)| area < *best_area) {
            let center_n = (min_n + max_n) / 2.0;
            let center_p = (min_p + max_p) / 2.0;
            let rect = Rectangle::new(
                origin.x + center_n * nx + center_p * px,
                origin.y + center_n * ny + center_p * py,
                width,
                height,
                ny.atan2(nx),
                true_area,
            );
            best = Some((area, rect));
        }
    }

    best.map(|(_, rect)| rect)
}
