//! Locate one edge guard as a line segment
//!
//! Scan half the image for anchors, fit the dominant line through them,
//! keep the points close to it, then trace up from the upper-third point and
//! down from the lower-third point.

use super::anchor_scan::{AcceptAll, AnchorQualifier, AnchoredScanner};
use super::hough::HoughLineFitter;
use super::tracer::GuardTracer;
use crate::config::EdgeConfig;
use crate::models::{GuardSide, PixelMatrix, Point, StandardLine};
use log::debug;

/// Scan-fit-trace locator for a single guard
#[derive(Debug, Clone)]
pub struct EdgeGuardLocator<Q = AcceptAll> {
    config: EdgeConfig,
    scanner: AnchoredScanner<Q>,
}

impl EdgeGuardLocator<AcceptAll> {
    /// Locator that accepts every wide enough anchor while scanning
    pub fn new(config: EdgeConfig) -> Self {
        Self::with_qualifier(config, AcceptAll)
    }
}

impl<Q: AnchorQualifier> EdgeGuardLocator<Q> {
    /// Locator whose scan keeps only anchors `qualifier` accepts
    pub fn with_qualifier(config: EdgeConfig, qualifier: Q) -> Self {
        Self {
            scanner: AnchoredScanner::new(config.black_threshold, config.min_anchor_width, qualifier),
            config,
        }
    }

    /// Upper and lower endpoints of the guard on `side`, if one is found
    pub fn locate(&self, pixels: &PixelMatrix, side: GuardSide) -> Option<(Point, Point)> {
        let (width, height) = (pixels.width(), pixels.height());
        if width == 0 || height == 0 {
            return None;
        }

        let columns = match side {
            GuardSide::Left => 0..width / 2,
            GuardSide::Right => width / 2..width,
        };
        let candidates = self.scanner.scan(
            pixels,
            self.config.scan_resolution,
            columns,
            side.outer_edge(),
        );
        debug!("{:?} guard scan found {} anchor points", side, candidates.len());

        let guide = self.guide_line(&candidates)?;
        let mut trusted: Vec<Point> = candidates
            .into_iter()
            .filter(|p| guide.normal_distance_to(p) <= self.config.collinearity_distance_threshold)
            .collect();
        if trusted.is_empty() {
            return None;
        }
        trusted.sort_by(|a, b| a.y.total_cmp(&b.y));

        let upper_seed = trusted[trusted.len() / 3];
        let lower_seed = trusted[trusted.len() * 2 / 3];
        let step = (height / self.config.trace_resolution).max(1) as isize;

        let tracer = GuardTracer::new(
            side,
            self.config.black_threshold,
            self.config.min_anchor_width,
            self.config.trace_distance_threshold,
        );
        let upper = tracer.trace(pixels, upper_seed, &guide, -step);
        let lower = tracer.trace(pixels, lower_seed, &guide, step);
        debug!(
            "{:?} guard traced from ({}, {}) to ({}, {}) using {} trusted points",
            side,
            upper.x,
            upper.y,
            lower.x,
            lower.y,
            trusted.len()
        );

        Some((upper, lower))
    }

    fn guide_line(&self, points: &[Point]) -> Option<StandardLine> {
        if points.is_empty() {
            return None;
        }

        let max_rho = HoughLineFitter::max_rho(points);
        let rho_resolution = (self.config.hough_rho_resolution_factor * max_rho).ceil() as usize;
        let theta_resolution = (self.config.hough_theta_resolution_factor * 180.0).ceil() as usize;
        let fitter = match HoughLineFitter::new(rho_resolution, theta_resolution, self.config.hough_window) {
            Ok(fitter) => fitter,
            Err(err) => {
                debug!("cannot fit guard line: {}", err);
                return None;
            }
        };

        // Lines come back sorted, most votes first
        let best = fitter
            .extract_lines(points, self.config.hough_line_threshold)
            .into_iter()
            .next()?;
        debug!(
            "guard line rho={:.2} theta={:.3} votes={}",
            best.rho, best.theta, best.votes
        );
        Some(best.to_standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LocatorConfig, Strictness};
    use crate::detector::anchor_scan::GuardQualifier;
    use crate::models::AnchorEdge;

    fn config() -> EdgeConfig {
        EdgeConfig {
            black_threshold: 128,
            scan_resolution: 24,
            min_anchor_width: 4,
            trace_resolution: 120,
            trace_distance_threshold: 3.0,
            collinearity_distance_threshold: 2.0,
            hough_line_threshold: 5,
            hough_rho_resolution_factor: 1.0,
            hough_theta_resolution_factor: 1.0,
            hough_window: 2,
        }
    }

    fn two_guards() -> PixelMatrix {
        let mut pixels = PixelMatrix::filled(200, 120, 255);
        pixels.fill_rect(50, 20, 58, 100, 0);
        pixels.fill_rect(140, 20, 148, 100, 0);
        pixels
    }

    fn assert_near(p: Point, x: f32, y: f32) {
        assert!(
            (p.x - x).abs() <= 1.0 && (p.y - y).abs() <= 1.0,
            "expected ({}, {}), got ({}, {})",
            x,
            y,
            p.x,
            p.y
        );
    }

    #[test]
    fn test_locate_left_guard() {
        let locator = EdgeGuardLocator::new(config());
        let (upper, lower) = locator.locate(&two_guards(), GuardSide::Left).unwrap();
        assert_near(upper, 50.0, 20.0);
        assert_near(lower, 50.0, 99.0);
    }

    #[test]
    fn test_locate_right_guard() {
        let locator = EdgeGuardLocator::new(config());
        let (upper, lower) = locator.locate(&two_guards(), GuardSide::Right).unwrap();
        assert_near(upper, 148.0, 20.0);
        assert_near(lower, 148.0, 99.0);
    }

    #[test]
    fn test_blank_image_has_no_guard() {
        let locator = EdgeGuardLocator::new(config());
        let pixels = PixelMatrix::filled(200, 120, 255);
        assert!(locator.locate(&pixels, GuardSide::Left).is_none());
        assert!(locator.locate(&PixelMatrix::default(), GuardSide::Right).is_none());
    }

    #[test]
    fn test_too_few_votes() {
        let mut edge = config();
        edge.hough_line_threshold = 100;
        let locator = EdgeGuardLocator::new(edge);
        assert!(locator.locate(&two_guards(), GuardSide::Left).is_none());
    }

    /// Guards leaning right by one pixel every five rows
    fn slanted_guards() -> PixelMatrix {
        let mut pixels = PixelMatrix::filled(320, 240, 255);
        for y in 40..200 {
            let shift = ((y - 40) as f32 * 0.2).round() as usize;
            pixels.fill_rect(60 + shift, y, 68 + shift, y + 1, 0);
            pixels.fill_rect(212 + shift, y, 220 + shift, y + 1, 0);
        }
        pixels
    }

    #[test]
    fn test_locate_slanted_guards() {
        let mut edge = config();
        edge.trace_resolution = 1024;
        let locator = EdgeGuardLocator::new(edge);
        let pixels = slanted_guards();

        let (upper, lower) = locator.locate(&pixels, GuardSide::Left).unwrap();
        assert_near(upper, 60.0, 40.0);
        assert_near(lower, 92.0, 199.0);

        let (upper, lower) = locator.locate(&pixels, GuardSide::Right).unwrap();
        assert_near(upper, 220.0, 40.0);
        assert_near(lower, 252.0, 199.0);
    }

    /// A plain bar left of a guard followed by narrow bars
    fn bar_and_guard() -> PixelMatrix {
        let mut pixels = PixelMatrix::filled(200, 120, 255);
        pixels.fill_rect(20, 20, 28, 100, 0);
        pixels.fill_rect(60, 20, 68, 100, 0);
        pixels.fill_rect(70, 20, 72, 100, 0);
        pixels.fill_rect(74, 20, 76, 100, 0);
        pixels
    }

    fn left_guard_qualifier() -> GuardQualifier {
        GuardQualifier {
            side: GuardSide::Left,
            black_threshold: 128,
            min_quiet_ratio: 0.75,
            min_transitions: 2,
        }
    }

    #[test]
    fn test_qualifier_skips_plain_bar() {
        let edge = config();
        let pixels = bar_and_guard();

        let plain = AnchoredScanner::new(128, 4, AcceptAll).scan(&pixels, 24, 0..100, AnchorEdge::Leading);
        assert!(plain.iter().any(|p| p.x == 20.0));

        let qualified = AnchoredScanner::new(128, 4, left_guard_qualifier()).scan(
            &pixels,
            24,
            0..100,
            AnchorEdge::Leading,
        );
        assert!(!qualified.is_empty());
        assert!(qualified.iter().all(|p| p.x == 60.0));

        let locator = EdgeGuardLocator::with_qualifier(edge, left_guard_qualifier());
        let (upper, lower) = locator.locate(&pixels, GuardSide::Left).unwrap();
        assert_near(upper, 60.0, 20.0);
        assert_near(lower, 60.0, 99.0);
    }

    #[test]
    fn test_preset_settings_locate_guard() {
        let edge = LocatorConfig::preset(Strictness::Basic).edge;
        let locator = EdgeGuardLocator::new(edge);
        let (upper, lower) = locator.locate(&two_guards(), GuardSide::Left).unwrap();
        assert_near(upper, 50.0, 20.0);
        assert_near(lower, 50.0, 99.0);
    }
}
