//! Pairing candidate rectangles into edge guard pairs
//!
//! Candidates are normalized, filtered for solid guard-shaped rectangles and
//! sorted by pixel count. Each candidate is then compared only with smaller
//! ones whose area is within the configured variation, which keeps the
//! comparisons to a contiguous run of the sorted list.

use super::scoring::PairScorer;
use crate::config::GuardConfig;
use crate::models::{BarcodeOrientation, LocatedBarcode, Point, Rectangle};
use crate::utils::geometry::within_angular_threshold;
use log::{debug, trace};
use rayon::prelude::*;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

/// Guards farther apart than this many guard widths are unrelated
const MAX_SPACING_IN_WIDTHS: f32 = 70.0;

/// Why two rectangles are not a guard pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRejection {
    /// Orientations disagree
    Orientation,
    /// Widths or heights differ too much
    Dimensions,
    /// Spacing does not fit the barcode aspect range or guard width
    Spacing,
    /// The guards do not sit side by side along their width axis
    Alignment,
}

/// Filters, pairs and scores guard candidates
pub struct GuardPairer<'a> {
    config: GuardConfig,
    scorer: &'a dyn PairScorer,
}

impl<'a> GuardPairer<'a> {
    /// Create a pairer
    pub fn new(config: GuardConfig, scorer: &'a dyn PairScorer) -> Self {
        Self { config, scorer }
    }

    /// Normalize raw rectangles, keep plausible guards and sort them by
    /// ascending true area
    pub fn filter_candidates(&self, rectangles: &[Rectangle]) -> Vec<Rectangle> {
        let mut guards: Vec<Rectangle> = rectangles
            .iter()
            .map(Rectangle::normalized)
            .filter(|rect| self.matches_well(rect))
            .collect();
        guards.sort_by_key(|rect| rect.true_area);
        guards
    }

    fn matches_well(&self, rect: &Rectangle) -> bool {
        let Some(aspect) = rect.aspect() else {
            return false;
        };
        rect.true_area as f32 > self.config.rectangularity_threshold * rect.box_area()
            && self.config.guard_aspect.contains(aspect)
    }

    /// Every qualifying pair among `rectangles`, best score first
    pub fn pair(&self, rectangles: &[Rectangle]) -> Vec<LocatedBarcode> {
        let guards = self.filter_candidates(rectangles);
        debug!(
            "{} of {} rectangles survive guard filtering",
            guards.len(),
            rectangles.len()
        );
        self.locate_barcodes(&guards)
    }

    /// Pair guards already sorted by ascending true area
    pub fn locate_barcodes(&self, guards: &[Rectangle]) -> Vec<LocatedBarcode> {
        let mut barcodes: Vec<LocatedBarcode> = (0..guards.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                let guard = &guards[i];
                let limit = guard.true_area as f32 * self.config.area_variation;
                guards[..i]
                    .iter()
                    .rev()
                    .take_while(move |other| {
                        (guard.true_area.saturating_sub(other.true_area) as f32) < limit
                    })
                    .filter(move |other| self.is_guard_pair(guard, other))
                    .map(move |other| self.barcode_location(guard, other))
            })
            .collect();

        barcodes.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!("found {} guard pairs", barcodes.len());
        barcodes
    }

    /// True when `a` and `b` can be the two guards of one symbol
    pub fn is_guard_pair(&self, a: &Rectangle, b: &Rectangle) -> bool {
        match self.rejection(a, b) {
            Some(reason) => {
                trace!(
                    "pair ({:.1}, {:.1}) / ({:.1}, {:.1}) rejected: {:?}",
                    a.cx, a.cy, b.cx, b.cy, reason
                );
                false
            }
            None => true,
        }
    }

    /// First test the pair fails, if any
    pub fn rejection(&self, a: &Rectangle, b: &Rectangle) -> Option<PairRejection> {
        let threshold = self.config.angle_variation;
        if !within_angular_threshold(a.orientation, b.orientation, threshold) {
            return Some(PairRejection::Orientation);
        }
        if !self.similar_dimensions(a, b) {
            return Some(PairRejection::Dimensions);
        }
        if !self.sized_well(a, b) {
            return Some(PairRejection::Spacing);
        }
        if !oriented_well(a, b, threshold) {
            return Some(PairRejection::Alignment);
        }
        None
    }

    fn similar_dimensions(&self, a: &Rectangle, b: &Rectangle) -> bool {
        let width_threshold = a.width.min(b.width) * self.config.width_variation;
        let height_threshold = a.height.min(b.height) * self.config.height_variation;
        (a.width - b.width).abs() < width_threshold && (a.height - b.height).abs() < height_threshold
    }

    fn sized_well(&self, a: &Rectangle, b: &Rectangle) -> bool {
        let spacing = a.center().distance(&b.center());
        let mean_height = (a.height + b.height) / 2.0;
        let mean_width = (a.width + b.width) / 2.0;
        if mean_height <= 0.0 {
            return false;
        }

        self.config.barcode_aspect.contains(spacing / mean_height)
            && spacing >= mean_width
            && spacing <= mean_width * MAX_SPACING_IN_WIDTHS
    }

    /// Quadrilateral enclosing both guards, scored
    ///
    /// The eight guard corners are turned about the pair center until the
    /// pair lies on an axis, the extreme corners are picked there and turned
    /// back. The result does not depend on argument order.
    pub fn barcode_location(&self, a: &Rectangle, b: &Rectangle) -> LocatedBarcode {
        // Fixed order so a diagonal pair rounds to the same axis either way
        let (a, b) = if a.cx.total_cmp(&b.cx).then(a.cy.total_cmp(&b.cy)).is_gt() {
            (b, a)
        } else {
            (a, b)
        };
        let center = a.center().midpoint(&b.center());
        let direction = (b.cy - a.cy).atan2(b.cx - a.cx);
        let rotation = (direction / FRAC_PI_2).round() * FRAC_PI_2 - direction;

        let orientation = if direction.abs() <= FRAC_PI_4 || direction.abs() >= 3.0 * FRAC_PI_4 {
            BarcodeOrientation::Horizontal
        } else {
            BarcodeOrientation::Vertical
        };

        let rotated: Vec<Point> = a
            .corners()
            .iter()
            .chain(b.corners().iter())
            .map(|corner| corner.rotate(&center, rotation))
            .collect();

        let upper_left = extreme(&rotated, |p| -(p.x + p.y));
        let upper_right = extreme(&rotated, |p| p.x - p.y);
        let lower_right = extreme(&rotated, |p| p.x + p.y);
        let lower_left = extreme(&rotated, |p| p.y - p.x);

        LocatedBarcode {
            orientation,
            upper_left: upper_left.rotate(&center, -rotation),
            upper_right: upper_right.rotate(&center, -rotation),
            lower_right: lower_right.rotate(&center, -rotation),
            lower_left: lower_left.rotate(&center, -rotation),
            score: self.scorer.score(a, b),
        }
    }
}

/// Angle of the line through both centers must match both orientations
fn oriented_well(a: &Rectangle, b: &Rectangle, threshold: f32) -> bool {
    let relative_angle = if a.cx == b.cx {
        FRAC_PI_2
    } else {
        ((a.cy - b.cy) / (a.cx - b.cx)).atan()
    };

    within_angular_threshold(relative_angle, a.orientation, threshold)
        && within_angular_threshold(relative_angle, b.orientation, threshold)
}

/// Point maximizing `key`; `points` is never empty here
fn extreme(points: &[Point], key: impl Fn(&Point) -> f32) -> Point {
    points
        .iter()
        .copied()
        .max_by(|p, q| key(p).total_cmp(&key(q)))
        .unwrap_or_default()
}
