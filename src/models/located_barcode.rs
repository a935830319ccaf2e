use super::Point;

/// Axis the barcode rows run along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeOrientation {
    /// Guards side by side along x
    Horizontal,
    /// Guards stacked along y
    Vertical,
}

/// Quadrilateral enclosing one PDF417 symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatedBarcode {
    /// Reading orientation of the symbol
    pub orientation: BarcodeOrientation,
    /// Upper-left corner (after rotating the pair onto an axis)
    pub upper_left: Point,
    /// Upper-right corner
    pub upper_right: Point,
    /// Lower-right corner
    pub lower_right: Point,
    /// Lower-left corner
    pub lower_left: Point,
    /// Guard pair likelihood; higher is better
    pub score: f32,
}

impl LocatedBarcode {
    /// Corners in winding order: upper-left, upper-right, lower-right, lower-left
    pub fn corners(&self) -> [Point; 4] {
        [
            self.upper_left,
            self.upper_right,
            self.lower_right,
            self.lower_left,
        ]
    }

    /// Longest of the two horizontal sides
    pub fn width(&self) -> f32 {
        self.upper_left
            .distance(&self.upper_right)
            .max(self.lower_left.distance(&self.lower_right))
    }

    /// Longest of the two vertical sides
    pub fn height(&self) -> f32 {
        self.upper_left
            .distance(&self.lower_left)
            .max(self.upper_right.distance(&self.lower_right))
    }
}
