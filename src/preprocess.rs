//! Image cleanup ahead of guard detection
//!
//! Every level except `None` ends in an Otsu binarization that leaves guard
//! bars dark (0) on a bright (255) background.

use crate::models::PixelMatrix;
use crate::utils::binarization::otsu_binarize;
use crate::utils::morphology::{StructuringElement, close};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};
use log::debug;
use serde::{Deserialize, Serialize};

/// Amount of cleanup applied before detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreprocessLevel {
    /// Grayscale conversion only
    None,
    /// Normalize, remove shadows, close thin features, binarize
    Half,
    /// `Half` plus removal of small specks
    Full,
}

/// Share of darkest pixels clipped by the contrast stretch
const NORMALIZE_DARK_CLIP: f64 = 0.02;
/// Share of brightest pixels clipped by the contrast stretch
const NORMALIZE_BRIGHT_CLIP: f64 = 0.01;
/// Background estimate works on a 1/4 scale copy
const SHADOW_SCALE: u32 = 4;
const SHADOW_BLUR_SIGMA: f32 = 10.0;
const SPECK_CLOSE_ITERATIONS: usize = 3;

/// Convert and clean a decoded image
pub fn preprocess(image: &DynamicImage, level: PreprocessLevel) -> PixelMatrix {
    preprocess_gray(PixelMatrix::from_image(image), level)
}

/// Clean an already grayscale matrix
pub fn preprocess_gray(gray: PixelMatrix, level: PreprocessLevel) -> PixelMatrix {
    if level == PreprocessLevel::None || gray.is_empty() {
        return gray;
    }

    let normalized = normalize(&gray);
    let unshadowed = remove_shadows(&normalized);
    let mut closed = close(&unshadowed, &StructuringElement::thin_guard(), 1);
    if level == PreprocessLevel::Full {
        closed = close(&closed, &StructuringElement::square(3), SPECK_CLOSE_ITERATIONS);
    }

    let binary = otsu_binarize(&closed);
    debug!(
        "preprocessed {}x{} image at level {:?}",
        binary.width(),
        binary.height(),
        level
    );
    binary
}

/// Linear contrast stretch with a small share of each tail clipped
pub fn normalize(gray: &PixelMatrix) -> PixelMatrix {
    let mut histogram = [0usize; 256];
    for &pixel in gray.as_bytes() {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let dark_clip = (total * NORMALIZE_DARK_CLIP) as usize;
    let bright_clip = (total * NORMALIZE_BRIGHT_CLIP) as usize;

    let mut low = 0usize;
    let mut seen = 0usize;
    for (intensity, &count) in histogram.iter().enumerate() {
        seen += count;
        if seen > dark_clip {
            low = intensity;
            break;
        }
    }

    let mut high = 255usize;
    seen = 0;
    for (intensity, &count) in histogram.iter().enumerate().rev() {
        seen += count;
        if seen > bright_clip {
            high = intensity;
            break;
        }
    }

    if high <= low {
        return gray.clone();
    }

    let span = (high - low) as f32;
    let mut out = gray.clone();
    for y in 0..gray.height() {
        for (x, &value) in gray.row(y).iter().enumerate() {
            let stretched = (value as f32 - low as f32) * 255.0 / span;
            out.set(x, y, stretched.round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}

/// Divide by a blurred low-resolution background estimate
pub fn remove_shadows(gray: &PixelMatrix) -> PixelMatrix {
    let (width, height) = (gray.width() as u32, gray.height() as u32);
    let Some(source) = GrayImage::from_raw(width, height, gray.as_bytes().to_vec()) else {
        return gray.clone();
    };

    let small = imageops::resize(
        &source,
        (width / SHADOW_SCALE).max(1),
        (height / SHADOW_SCALE).max(1),
        FilterType::Triangle,
    );
    let blurred = imageops::blur(&small, SHADOW_BLUR_SIGMA);
    let background = imageops::resize(&blurred, width, height, FilterType::Triangle);

    let mut out = gray.clone();
    for (x, y, pixel) in background.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        let Some(value) = gray.get(x, y) else {
            continue;
        };
        let divisor = pixel.0[0].max(1) as u32;
        out.set(x, y, (value as u32 * 255 / divisor).min(255) as u8);
    }
    out
}
