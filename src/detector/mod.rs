//! PDF417 guard detection modules
//!
//! Two strategies share the same building blocks:
//! - Rectangle pairing: dark regions become rotated rectangles, which are
//!   filtered, paired and scored into barcode quadrilaterals
//! - Scan and trace: dark-run anchors feed a Hough line fit, and a tracer
//!   follows the fitted guard to its endpoints

/// Dark-run scanning with pluggable qualifiers
pub mod anchor_scan;
/// Union-find labelling of dark regions
pub mod connected_components;
/// Scan-fit-trace locator for one edge guard
pub mod edge_guard;
/// Guard filtering, pairing and quadrilateral construction
pub mod guards;
/// Hough transform line fitting
pub mod hough;
/// Rotated rectangles from labelled regions
pub mod rectangles;
/// Guard pair scoring strategies
pub mod scoring;
/// Row-by-row guard tracing
pub mod tracer;
