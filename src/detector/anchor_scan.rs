//! Dark-run ("anchor") scanning along pixel rows
//!
//! A run of pixels at or below the black threshold that is at least
//! `min_anchor_width` wide is an anchor candidate. The qualifier sees the
//! run width plus equally wide windows taken just left and right of it
//! (shorter where the row ends) and decides whether to keep it.

use crate::models::{AnchorEdge, DetectedAnchor, GuardSide, PixelMatrix, Point};
use rayon::prelude::*;
use std::ops::Range;

/// Validates an anchor candidate from its surroundings
pub trait AnchorQualifier: Send + Sync {
    /// `Some(score)` keeps the anchor, `None` rejects it
    fn qualify(&self, left: &[u8], anchor_width: usize, right: &[u8]) -> Option<f32>;
}

impl<Q: AnchorQualifier + ?Sized> AnchorQualifier for &Q {
    fn qualify(&self, left: &[u8], anchor_width: usize, right: &[u8]) -> Option<f32> {
        (**self).qualify(left, anchor_width, right)
    }
}

/// Keeps every run wide enough, scored by its width
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl AnchorQualifier for AcceptAll {
    fn qualify(&self, _left: &[u8], anchor_width: usize, _right: &[u8]) -> Option<f32> {
        Some(anchor_width as f32)
    }
}

/// Accepts runs that look like the wide bar of an edge guard
///
/// The window outside the symbol must be mostly bright (the quiet zone) and
/// the window inside must alternate between dark and bright at least
/// `min_transitions` times (the narrow bars that follow the wide one).
#[derive(Debug, Clone, Copy)]
pub struct GuardQualifier {
    /// Side of the symbol the guard bounds
    pub side: GuardSide,
    /// Pixels at or below this intensity are dark
    pub black_threshold: u8,
    /// Minimum share of bright pixels in the outer window
    pub min_quiet_ratio: f32,
    /// Minimum dark/bright changes in the inner window
    pub min_transitions: usize,
}

impl GuardQualifier {
    fn bright_ratio(&self, window: &[u8]) -> f32 {
        if window.is_empty() {
            return 0.0;
        }
        let bright = window.iter().filter(|&&v| v > self.black_threshold).count();
        bright as f32 / window.len() as f32
    }

    fn transitions(&self, window: &[u8]) -> usize {
        window
            .windows(2)
            .filter(|pair| (pair[0] <= self.black_threshold) != (pair[1] <= self.black_threshold))
            .count()
    }
}

impl AnchorQualifier for GuardQualifier {
    fn qualify(&self, left: &[u8], anchor_width: usize, right: &[u8]) -> Option<f32> {
        let (outer, inner) = match self.side {
            GuardSide::Left => (left, right),
            GuardSide::Right => (right, left),
        };

        let quiet = self.bright_ratio(outer);
        if quiet < self.min_quiet_ratio || self.transitions(inner) < self.min_transitions {
            return None;
        }
        Some(anchor_width as f32 * quiet)
    }
}

/// Single-pass dark-run scanner
#[derive(Debug, Clone)]
pub struct AnchoredScanner<Q> {
    black_threshold: u8,
    min_anchor_width: usize,
    qualifier: Q,
}

impl<Q: AnchorQualifier> AnchoredScanner<Q> {
    /// Create a scanner
    pub fn new(black_threshold: u8, min_anchor_width: usize, qualifier: Q) -> Self {
        Self {
            black_threshold,
            min_anchor_width,
            qualifier,
        }
    }

    #[inline]
    fn is_dark(&self, intensity: u8) -> bool {
        intensity <= self.black_threshold
    }

    /// Scan `columns` of one row. Runs starting inside the range are
    /// followed to their true end even past the range.
    pub fn scan_row(&self, row: &[u8], y: usize, columns: Range<usize>) -> Vec<DetectedAnchor> {
        let end = columns.end.min(row.len());
        let mut p = columns.start;
        let mut anchors = Vec::new();

        while p < end {
            if self.is_dark(row[p]) {
                let q = self.consume(row, p, true);
                let width = q - p;

                if width >= self.min_anchor_width {
                    let left = &row[p.saturating_sub(width)..p];
                    let right = &row[q..(q + width).min(row.len())];

                    if let Some(score) = self.qualifier.qualify(left, width, right) {
                        anchors.push(DetectedAnchor {
                            left: p,
                            right: q,
                            y,
                            score,
                        });
                    }
                }
                p = q;
            } else {
                p = self.consume(row, p, false);
            }
        }

        anchors
    }

    /// Index of the first pixel from `p` whose darkness differs from `dark`
    fn consume(&self, row: &[u8], mut p: usize, dark: bool) -> usize {
        while p < row.len() && self.is_dark(row[p]) == dark {
            p += 1;
        }
        p
    }

    /// Scan `resolution` evenly spaced rows and collect anchor edges as points
    pub fn scan(
        &self,
        pixels: &PixelMatrix,
        resolution: usize,
        columns: Range<usize>,
        edge: AnchorEdge,
    ) -> Vec<Point> {
        let height = pixels.height();
        if height == 0 || resolution == 0 {
            return Vec::new();
        }

        (0..resolution)
            .into_par_iter()
            .map(|i| height * i / resolution)
            .flat_map_iter(|y| {
                self.scan_row(pixels.row(y), y, columns.clone())
                    .into_iter()
                    .map(move |anchor| Point::new(anchor.edge(edge) as f32, y as f32))
            })
            .collect()
    }
}
