//! Utility functions for image processing
//!
//! Helpers shared by the preprocessing stage and the detectors:
//! - Grayscale conversion (RGB to luminance)
//! - Binarization (Otsu's method and threshold-based)
//! - Grayscale morphology (dilation, erosion, closing)
//! - Geometry (convex hull, minimum-area rectangle, angle comparison)

/// Otsu and fixed-threshold binarization
pub mod binarization;
/// Hull, minimum-area rectangle and angle helpers
pub mod geometry;
/// RGB to luminance
pub mod grayscale;
/// Grayscale dilation, erosion and closing
pub mod morphology;
