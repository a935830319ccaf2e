use super::Point;

/// Coefficients below this magnitude are treated as zero
const DEGENERATE_COEFFICIENT: f32 = 1e-6;

/// Line in standard form: `a*x + b*y + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardLine {
    /// Coefficient of x
    pub a: f32,
    /// Coefficient of y
    pub b: f32,
    /// Constant term
    pub c: f32,
}

impl StandardLine {
    /// Create a new line from its coefficients
    pub fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    /// Solve for x at the given y. `None` when the line is horizontal.
    pub fn x_given_y(&self, y: f32) -> Option<f32> {
        if self.a.abs() < DEGENERATE_COEFFICIENT {
            return None;
        }
        Some(-(self.b * y + self.c) / self.a)
    }

    /// Solve for y at the given x. `None` when the line is vertical.
    pub fn y_given_x(&self, x: f32) -> Option<f32> {
        if self.b.abs() < DEGENERATE_COEFFICIENT {
            return None;
        }
        Some(-(self.a * x + self.c) / self.b)
    }

    /// Perpendicular distance from the line to a point
    pub fn normal_distance_to(&self, point: &Point) -> f32 {
        let norm = (self.a * self.a + self.b * self.b).sqrt();
        if norm == 0.0 {
            return f32::INFINITY;
        }
        (self.a * point.x + self.b * point.y + self.c).abs() / norm
    }
}

/// Line in Hesse normal form produced by the Hough accumulator:
/// `x*sin(theta) - y*cos(theta) = rho`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoughLine {
    /// Signed distance parameter
    pub rho: f32,
    /// Angle parameter in [0, pi)
    pub theta: f32,
    /// Number of points that voted for this cell
    pub votes: u32,
}

impl HoughLine {
    /// Convert to standard form for distance queries
    pub fn to_standard(&self) -> StandardLine {
        let (sin, cos) = self.theta.sin_cos();
        StandardLine::new(sin, -cos, -self.rho)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_normal_distance() {
        // x = 5
        let line = StandardLine::new(1.0, 0.0, -5.0);
        assert!((line.normal_distance_to(&Point::new(8.0, 100.0)) - 3.0).abs() < 1e-6);
        assert_eq!(line.x_given_y(42.0), Some(5.0));
        assert_eq!(line.y_given_x(1.0), None);
    }

    #[test]
    fn test_horizontal_line_has_no_x() {
        let line = StandardLine::new(0.0, 2.0, -10.0);
        assert_eq!(line.x_given_y(3.0), None);
        assert_eq!(line.y_given_x(17.0), Some(5.0));
    }

    #[test]
    fn test_hough_line_to_standard() {
        let line = HoughLine {
            rho: 12.0,
            theta: FRAC_PI_2,
            votes: 3,
        };
        let std_line = line.to_standard();
        let x = std_line.x_given_y(40.0).unwrap();
        assert!((x - 12.0).abs() < 1e-3);
    }
}
