//! Candidate rectangles from dark regions

use super::connected_components::{Region, find_dark_regions};
use crate::models::{PixelMatrix, Point, Rectangle};
use crate::utils::geometry::{convex_hull, min_area_rectangle};
use log::debug;
use rayon::prelude::*;

/// Produces rotated rectangles for the foreground regions of an image
pub trait RectangleExtractor: Send + Sync {
    /// Rectangles (unnormalized) for regions of at least `area_threshold`
    /// pixels at or below `intensity_threshold`
    fn extract(
        &self,
        pixels: &PixelMatrix,
        area_threshold: u32,
        intensity_threshold: u8,
    ) -> Vec<Rectangle>;
}

/// Labels regions and fits a minimum-area rectangle to each
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionRectangleExtractor;

impl RegionRectangleExtractor {
    fn fit(region: &Region) -> Option<Rectangle> {
        // Pixel (x, y) covers the unit square [x, x+1) x [y, y+1)
        let corners: Vec<Point> = region
            .boundary
            .iter()
            .flat_map(|&(x, y)| {
                let (x, y) = (x as f32, y as f32);
                [
                    Point::new(x, y),
                    Point::new(x + 1.0, y),
                    Point::new(x, y + 1.0),
                    Point::new(x + 1.0, y + 1.0),
                ]
            })
            .collect();

        let hull = convex_hull(&corners);
        min_area_rectangle(&hull, region.pixel_count)
    }
}

impl RectangleExtractor for RegionRectangleExtractor {
    fn extract(
        &self,
        pixels: &PixelMatrix,
        area_threshold: u32,
        intensity_threshold: u8,
    ) -> Vec<Rectangle> {
        let regions = find_dark_regions(pixels, intensity_threshold);
        let total = regions.len();

        let rectangles: Vec<Rectangle> = regions
            .par_iter()
            .filter(|region| region.pixel_count >= area_threshold)
            .filter_map(Self::fit)
            .collect();

        debug!(
            "extracted {} rectangles from {} regions (area >= {})",
            rectangles.len(),
            total,
            area_threshold
        );
        rectangles
    }
}
