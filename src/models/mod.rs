/// Scan anchors and guard sides
pub mod anchor;
/// Standard-form and Hough lines
pub mod line;
/// Located barcode quadrilateral
pub mod located_barcode;
/// 8-bit pixel matrix
pub mod matrix;
/// 2D point
pub mod point;
/// Rotated rectangle
pub mod rectangle;

pub use anchor::{AnchorEdge, DetectedAnchor, GuardSide};
pub use line::{HoughLine, StandardLine};
pub use located_barcode::{BarcodeOrientation, LocatedBarcode};
pub use matrix::PixelMatrix;
pub use point::Point;
pub use rectangle::Rectangle;
