//! Hough transform line fitting over a 2D point cloud
//!
//! Lines use the normal form `rho = x sin(theta) - y cos(theta)` with theta
//! in `[0, pi)`. Each point votes once per theta bucket; a cell is reported
//! when it reaches the threshold and strictly beats every other cell inside
//! the suppression window. Equal neighbours cancel each other.

use crate::error::ConfigError;
use crate::models::{HoughLine, Point};
use rayon::prelude::*;
use std::f32::consts::PI;

/// Voting accumulator with fixed resolution
#[derive(Debug, Clone)]
pub struct HoughLineFitter {
    rho_resolution: usize,
    theta_resolution: usize,
    window: usize,
}

impl HoughLineFitter {
    /// Create a fitter with `2 * rho_resolution` rho buckets, `theta_resolution`
    /// theta buckets and a suppression window of `window` buckets each way
    pub fn new(
        rho_resolution: usize,
        theta_resolution: usize,
        window: usize,
    ) -> Result<Self, ConfigError> {
        if rho_resolution == 0 {
            return Err(ConfigError::new("hough.rho_resolution", "must be at least 1"));
        }
        if theta_resolution == 0 {
            return Err(ConfigError::new("hough.theta_resolution", "must be at least 1"));
        }
        if window == 0 {
            return Err(ConfigError::new("hough.window", "must be at least 1"));
        }
        Ok(Self {
            rho_resolution,
            theta_resolution,
            window,
        })
    }

    /// Largest |rho| any line through `points` can have, plus one pixel of slack
    pub fn max_rho(points: &[Point]) -> f32 {
        points.iter().map(Point::norm).fold(0.0, f32::max) + 1.0
    }

    /// Extract every line supported by at least `threshold` points,
    /// most-voted first
    pub fn extract_lines(&self, points: &[Point], threshold: u32) -> Vec<HoughLine> {
        if points.is_empty() {
            return Vec::new();
        }

        let max_rho = Self::max_rho(points);
        let accumulator = self.vote(points, max_rho);
        let mut lines = self.local_maxima(&accumulator, max_rho, threshold.max(1));
        lines.sort_by(|a, b| b.votes.cmp(&a.votes));
        lines
    }

    fn rho_buckets(&self) -> usize {
        self.rho_resolution * 2
    }

    fn theta_at(&self, t: usize) -> f32 {
        t as f32 * PI / self.theta_resolution as f32
    }

    fn rho_index(&self, rho: f32, max_rho: f32) -> usize {
        let r = self.rho_resolution as f32;
        let index = (rho * r / max_rho + r).floor();
        (index.max(0.0) as usize).min(self.rho_buckets() - 1)
    }

    fn rho_at(&self, index: usize, max_rho: f32) -> f32 {
        let r = self.rho_resolution as f32;
        (index as f32 + 0.5 - r) * max_rho / r
    }

    /// Accumulator laid out as `theta * rho_buckets + rho`
    fn vote(&self, points: &[Point], max_rho: f32) -> Vec<u32> {
        let cells = self.rho_buckets() * self.theta_resolution;
        let trig: Vec<(f32, f32)> = (0..self.theta_resolution)
            .map(|t| self.theta_at(t).sin_cos())
            .collect();
        let stride = self.rho_buckets();

        points
            .par_iter()
            .fold(
                || vec![0u32; cells],
                |mut acc, p| {
                    for (t, &(sin, cos)) in trig.iter().enumerate() {
                        let rho = p.x * sin - p.y * cos;
                        acc[t * stride + self.rho_index(rho, max_rho)] += 1;
                    }
                    acc
                },
            )
            .reduce(
                || vec![0u32; cells],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x += y;
                    }
                    a
                },
            )
    }

    fn local_maxima(&self, accumulator: &[u32], max_rho: f32, threshold: u32) -> Vec<HoughLine> {
        let stride = self.rho_buckets();
        let mut lines = Vec::new();

        for t in 0..self.theta_resolution {
            for r in 0..stride {
                let votes = accumulator[t * stride + r];
                if votes < threshold || !self.is_strict_maximum(accumulator, r, t, votes) {
                    continue;
                }
                lines.push(HoughLine {
                    rho: self.rho_at(r, max_rho),
                    theta: self.theta_at(t),
                    votes,
                });
            }
        }

        lines
    }

    fn is_strict_maximum(&self, accumulator: &[u32], r: usize, t: usize, votes: u32) -> bool {
        let stride = self.rho_buckets();
        let t_range = t.saturating_sub(self.window)..=(t + self.window).min(self.theta_resolution - 1);
        for nt in t_range {
            let r_range = r.saturating_sub(self.window)..=(r + self.window).min(stride - 1);
            for nr in r_range {
                if (nr, nt) != (r, t) && accumulator[nt * stride + nr] >= votes {
                    return false;
                }
            }
        }
        true
    }
}
