//! Row-by-row tracking of one edge guard
//!
//! The guide line predicts where the guard edge should be on the next row;
//! a narrow anchor scan around the prediction corrects it. Tracking stops
//! at the first row without a close enough anchor or at the image border.

use super::anchor_scan::{AcceptAll, AnchoredScanner};
use crate::models::{GuardSide, PixelMatrix, Point, StandardLine};

/// Follows a guard edge from a seed point
#[derive(Debug, Clone)]
pub struct GuardTracer {
    scanner: AnchoredScanner<AcceptAll>,
    side: GuardSide,
    min_anchor_width: usize,
    distance_threshold: f32,
}

impl GuardTracer {
    /// Create a tracer for the guard on `side`
    pub fn new(
        side: GuardSide,
        black_threshold: u8,
        min_anchor_width: usize,
        distance_threshold: f32,
    ) -> Self {
        Self {
            scanner: AnchoredScanner::new(black_threshold, min_anchor_width, AcceptAll),
            side,
            min_anchor_width,
            distance_threshold,
        }
    }

    /// Trace from `seed` in steps of `dy` rows and return the last row that
    /// still had a guard anchor near the prediction
    ///
    /// A seed row without such an anchor returns the seed unchanged.
    pub fn trace(&self, pixels: &PixelMatrix, seed: Point, guide: &StandardLine, dy: isize) -> Point {
        if dy == 0 {
            return seed;
        }

        let height = pixels.height() as isize;
        let mut last = seed;
        let mut y = seed.y.round() as isize;
        let mut predicted = seed.x;

        while (0..height).contains(&y) {
            let Some(x) = self.closest_anchor(pixels.row(y as usize), predicted) else {
                break;
            };
            last = Point::new(x as f32, y as f32);

            y += dy;
            match guide.x_given_y(y as f32) {
                Some(x) => predicted = x,
                None => break,
            }
        }

        last
    }

    /// Columns to search around `x`; wider toward the symbol interior
    fn window(&self, x: isize, row_len: usize) -> (usize, usize) {
        let w = self.min_anchor_width as isize;
        let (from, to) = match self.side {
            GuardSide::Left => (x - w, x + 2 * w),
            GuardSide::Right => (x - 2 * w, x + w),
        };
        let last = row_len as isize - 1;
        (from.clamp(0, last) as usize, to.clamp(0, last) as usize)
    }

    fn closest_anchor(&self, row: &[u8], predicted: f32) -> Option<usize> {
        if row.is_empty() || !predicted.is_finite() {
            return None;
        }

        let (from, to) = self.window(predicted.round() as isize, row.len());
        let edge = self.side.outer_edge();

        self.scanner
            .scan_row(row, 0, from..to + 1)
            .into_iter()
            .map(|anchor| anchor.edge(edge))
            .map(|x| (x, (x as f32 - predicted).abs()))
            .filter(|&(_, distance)| distance <= self.distance_threshold)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(x, _)| x)
    }
}
