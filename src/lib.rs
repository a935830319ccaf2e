//! pdf417_locator - PDF417 barcode localization in pure Rust
//!
//! Finds the quadrilateral a PDF417 symbol occupies by detecting its left and
//! right edge guards. Payload decoding is out of scope; the result is meant
//! to crop an image before handing it to a decoder.
//!
//! ```no_run
//! use pdf417_locator::{Locator, LocatorConfig, Strictness};
//!
//! let image = image::open("ticket.png")?;
//! let locator = Locator::new(LocatorConfig::preset(Strictness::Basic))?;
//! for barcode in locator.locate(&image) {
//!     println!("{:?} score={}", barcode.corners(), barcode.score);
//! }
//! # Ok::<(), pdf417_locator::LocateError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Locator configuration and strictness presets
pub mod config;
/// Guard detection modules (anchor scan, Hough fit, tracing, pairing)
pub mod detector;
/// Error types
pub mod error;
/// Core data structures (Point, Rectangle, PixelMatrix, LocatedBarcode, etc.)
pub mod models;
/// Image cleanup ahead of detection
pub mod preprocess;
/// Utility functions (grayscale, binarization, morphology, geometry)
pub mod utils;

pub use config::{LocatorConfig, Strictness};
pub use error::{ConfigError, LocateError};
pub use models::{BarcodeOrientation, GuardSide, LocatedBarcode, PixelMatrix, Point};

use detector::anchor_scan::{AcceptAll, AnchorQualifier};
use detector::edge_guard::EdgeGuardLocator;
use detector::guards::GuardPairer;
use detector::rectangles::{RectangleExtractor, RegionRectangleExtractor};
use detector::scoring::{PairScorer, WeightedPairScorer};
use image::DynamicImage;
use log::debug;
use preprocess::preprocess;

/// Configured barcode locator
///
/// Holds an immutable configuration plus the rectangle extraction, pair
/// scoring and anchor qualifying strategies. A locator can be shared
/// between threads.
pub struct Locator {
    config: LocatorConfig,
    extractor: Box<dyn RectangleExtractor>,
    scorer: Box<dyn PairScorer>,
    qualifier: Box<dyn AnchorQualifier>,
}

impl Locator {
    /// Validate `config` and build a locator with the stock strategies
    pub fn new(config: LocatorConfig) -> Result<Self, LocateError> {
        config.validate()?;
        Ok(Self {
            extractor: Box::new(RegionRectangleExtractor),
            scorer: Box::new(WeightedPairScorer::new(config.scoring)),
            qualifier: Box::new(AcceptAll),
            config,
        })
    }

    /// Replace the guard pair scorer
    pub fn with_scorer(mut self, scorer: impl PairScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Replace the rectangle extractor
    pub fn with_extractor(mut self, extractor: impl RectangleExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Replace the anchor qualifier used when scanning for edge guards
    pub fn with_qualifier(mut self, qualifier: impl AnchorQualifier + 'static) -> Self {
        self.qualifier = Box::new(qualifier);
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Preprocess `image` and locate every barcode, best score first
    pub fn locate(&self, image: &DynamicImage) -> Vec<LocatedBarcode> {
        let pixels = preprocess(image, self.config.preprocessing);
        self.locate_pixels(&pixels)
    }

    /// Locate barcodes in an already preprocessed pixel matrix
    pub fn locate_pixels(&self, pixels: &PixelMatrix) -> Vec<LocatedBarcode> {
        let guards = &self.config.guards;
        let area_threshold = guards
            .area_threshold
            .resolve(pixels.width(), pixels.height());

        let rectangles =
            self.extractor
                .extract(pixels, area_threshold, guards.intensity_threshold);
        let barcodes = GuardPairer::new(*guards, self.scorer.as_ref()).pair(&rectangles);
        debug!(
            "located {} barcodes in {}x{} image",
            barcodes.len(),
            pixels.width(),
            pixels.height()
        );
        barcodes
    }

    /// Preprocess `image` and trace the edge guard on `side`
    pub fn locate_edge(&self, image: &DynamicImage, side: GuardSide) -> Option<(Point, Point)> {
        let pixels = preprocess(image, self.config.preprocessing);
        self.locate_edge_pixels(&pixels, side)
    }

    /// Upper and lower endpoints of the guard on `side` of a preprocessed matrix
    pub fn locate_edge_pixels(&self, pixels: &PixelMatrix, side: GuardSide) -> Option<(Point, Point)> {
        EdgeGuardLocator::with_qualifier(self.config.edge, &*self.qualifier).locate(pixels, side)
    }
}

/// Locate every barcode in `image`, best score first
///
/// Fails only for an invalid configuration; an image without barcodes
/// returns an empty list.
pub fn locate(image: &DynamicImage, config: &LocatorConfig) -> Result<Vec<LocatedBarcode>, LocateError> {
    Ok(Locator::new(*config)?.locate(image))
}

/// Upper and lower endpoints of the edge guard on `side` of `image`
pub fn locate_edge(
    image: &DynamicImage,
    side: GuardSide,
    config: &LocatorConfig,
) -> Result<Option<(Point, Point)>, LocateError> {
    Ok(Locator::new(*config)?.locate_edge(image, side))
}
