//! Guard pair scoring
//!
//! The score rewards large, solid, similar and well aligned guards and
//! subtracts penalties for guard and barcode proportions that stray from
//! those of a typical symbol. Higher is better; the absolute value has no
//! meaning beyond ordering.

use crate::config::ScoreWeights;
use crate::models::Rectangle;

/// Ranks guard pairs; must be symmetric in its arguments
pub trait PairScorer: Send + Sync {
    /// Likelihood that `a` and `b` are the two guards of one symbol
    fn score(&self, a: &Rectangle, b: &Rectangle) -> f32;
}

/// Weighted sum of size, quality and proportion terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPairScorer {
    weights: ScoreWeights,
}

impl WeightedPairScorer {
    /// Create a scorer with the given coefficients
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Coefficients in use
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }
}

impl PairScorer for WeightedPairScorer {
    fn score(&self, a: &Rectangle, b: &Rectangle) -> f32 {
        let w = &self.weights;

        let (min_area, max_area) = if a.true_area <= b.true_area {
            (a.true_area as f32, b.true_area as f32)
        } else {
            (b.true_area as f32, a.true_area as f32)
        };
        let size = (min_area + max_area).sqrt();
        let similarity = if max_area > 0.0 { min_area / max_area } else { 0.0 };
        let solidity = a.rectangularity().unwrap_or(0.0) * b.rectangularity().unwrap_or(0.0);
        let alignment = 1.0 - (a.orientation - b.orientation).sin().abs();

        let guard_aspect = (a.aspect().unwrap_or(0.0) + b.aspect().unwrap_or(0.0)) / 2.0;
        let mean_height = (a.height + b.height) / 2.0;
        let barcode_aspect = if mean_height > 0.0 {
            a.center().distance(&b.center()) / mean_height
        } else {
            0.0
        };

        w.area * size * solidity * alignment * similarity
            - w.guard_aspect * (w.ideal_guard_aspect - guard_aspect).abs()
            - w.barcode_aspect * (w.ideal_barcode_aspect - barcode_aspect).abs()
    }
}
