use super::Point;
use std::f32::consts::{FRAC_PI_2, PI};

/// Rotated rectangle fitted to a foreground region
///
/// `orientation` is the angle of the `width` axis measured from +x. After
/// [`Rectangle::normalized`] the width is the short side and the orientation
/// lies in `[0, pi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    /// Center x
    pub cx: f32,
    /// Center y
    pub cy: f32,
    /// Extent along the orientation axis
    pub width: f32,
    /// Extent perpendicular to the orientation axis
    pub height: f32,
    /// Angle of the width axis in radians
    pub orientation: f32,
    /// Number of foreground pixels in the region
    pub true_area: u32,
}

impl Rectangle {
    /// Create a rectangle exactly as given (no normalization)
    pub fn new(cx: f32, cy: f32, width: f32, height: f32, orientation: f32, true_area: u32) -> Self {
        Self {
            cx,
            cy,
            width,
            height,
            orientation,
            true_area,
        }
    }

    /// Return the equivalent rectangle with `width <= height` and
    /// orientation in `[0, pi)`.
    ///
    /// A rectangle is unchanged by a half turn, so the orientation is first
    /// reduced mod pi. Swapping the sides is the same as a quarter turn.
    pub fn normalized(&self) -> Self {
        let mut orientation = reduce_half_turn(self.orientation);
        let (mut width, mut height) = (self.width, self.height);

        if width > height {
            std::mem::swap(&mut width, &mut height);
            orientation = reduce_half_turn(orientation + FRAC_PI_2);
        }

        Self {
            width,
            height,
            orientation,
            ..*self
        }
    }

    /// Rectangle center
    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    /// Area of the fitted rectangle (not the region)
    pub fn box_area(&self) -> f32 {
        self.width * self.height
    }

    /// Ratio of height to width, `None` for a zero-width rectangle
    pub fn aspect(&self) -> Option<f32> {
        if self.width <= 0.0 {
            return None;
        }
        Some(self.height / self.width)
    }

    /// Share of the fitted rectangle covered by region pixels
    pub fn rectangularity(&self) -> Option<f32> {
        let area = self.box_area();
        if area <= 0.0 {
            return None;
        }
        Some(self.true_area as f32 / area)
    }

    /// The four corners: half-extent offsets (-,-), (-,+), (+,-), (+,+)
    /// rotated about the center by the orientation
    pub fn corners(&self) -> [Point; 4] {
        [
            self.corner(-1.0, -1.0),
            self.corner(-1.0, 1.0),
            self.corner(1.0, -1.0),
            self.corner(1.0, 1.0),
        ]
    }

    fn corner(&self, i: f32, j: f32) -> Point {
        let center = self.center();
        Point::new(
            self.cx + i * self.width / 2.0,
            self.cy + j * self.height / 2.0,
        )
        .rotate(&center, self.orientation)
    }
}

fn reduce_half_turn(angle: f32) -> f32 {
    let reduced = angle.rem_euclid(PI);
    // rem_euclid can round up to the modulus itself
    if reduced >= PI { 0.0 } else { reduced }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_4, FRAC_PI_6, FRAC_PI_8};

    fn assert_point_near(p: Point, x: f32, y: f32) {
        assert!(
            (p.x - x).abs() < 1e-3 && (p.y - y).abs() < 1e-3,
            "expected ({}, {}), got ({}, {})",
            x,
            y,
            p.x,
            p.y
        );
    }

    #[test]
    fn test_normalize_swaps_sides() {
        let rect = Rectangle::new(10.0, 20.0, 80.0, 8.0, 0.1, 600).normalized();
        assert_eq!(rect.width, 8.0);
        assert_eq!(rect.height, 80.0);
        assert!((rect.orientation - (0.1 + FRAC_PI_2)).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_reduces_orientation() {
        for raw in [-3.0f32, -FRAC_PI_2, 0.0, 1.2, PI, 4.0, 9.5] {
            for (w, h) in [(3.0, 9.0), (9.0, 3.0), (5.0, 5.0)] {
                let rect = Rectangle::new(0.0, 0.0, w, h, raw, 1).normalized();
                assert!(rect.width <= rect.height);
                assert!((0.0..PI).contains(&rect.orientation), "{}", rect.orientation);
            }
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [-2.5f32, -FRAC_PI_2, 0.3, FRAC_PI_2, 2.9, 7.1] {
            for (w, h) in [(4.0, 40.0), (40.0, 4.0)] {
                let once = Rectangle::new(1.0, 2.0, w, h, raw, 10).normalized();
                assert_eq!(once, once.normalized());
            }
        }
    }

    #[test]
    fn test_normalize_preserves_corners() {
        let raw = Rectangle::new(30.0, -12.0, 50.0, 10.0, 0.4, 400);
        let normalized = raw.normalized();
        let after = normalized.corners();
        for corner in raw.corners() {
            let nearest = after
                .iter()
                .map(|p| p.distance(&corner))
                .fold(f32::INFINITY, f32::min);
            assert!(nearest < 1e-2, "corner {:?} lost by normalization", corner);
        }
    }

    #[test]
    fn test_corners_match_half_diagonal_geometry() {
        let w = 8.0 * 3f32.sqrt();
        let rect = Rectangle::new(0.0, 0.0, w, 8.0, FRAC_PI_8, 0);
        let half_diagonal = (w * w + 64.0).sqrt() / 2.0;
        let [upper_left, lower_left, upper_right, lower_right] = rect.corners();

        assert_point_near(
            upper_left,
            -half_diagonal * (FRAC_PI_6 + FRAC_PI_8).cos(),
            -half_diagonal * (FRAC_PI_6 + FRAC_PI_8).sin(),
        );
        assert_point_near(
            upper_right,
            half_diagonal * (FRAC_PI_6 - FRAC_PI_8).cos(),
            -half_diagonal * (FRAC_PI_6 - FRAC_PI_8).sin(),
        );
        assert_point_near(
            lower_left,
            -half_diagonal * (FRAC_PI_6 - FRAC_PI_8).cos(),
            half_diagonal * (FRAC_PI_6 - FRAC_PI_8).sin(),
        );
        assert_point_near(
            lower_right,
            half_diagonal * (FRAC_PI_6 + FRAC_PI_8).cos(),
            half_diagonal * (FRAC_PI_6 + FRAC_PI_8).sin(),
        );
    }

    #[test]
    fn test_corners_of_diamond() {
        let rect = Rectangle::new(25.0, 42.0, 2.0, 2.0, FRAC_PI_4, 4);
        let corners = rect.corners();
        let s = 2f32.sqrt();
        assert_point_near(corners[0], 25.0, 42.0 - s);
        assert_point_near(corners[3], 25.0, 42.0 + s);
    }

    #[test]
    fn test_degenerate_measures() {
        let rect = Rectangle::new(0.0, 0.0, 0.0, 10.0, 0.0, 5);
        assert_eq!(rect.aspect(), None);
        assert_eq!(rect.rectangularity(), None);
    }
}
