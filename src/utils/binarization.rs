use crate::models::PixelMatrix;

/// Intensity written for pixels below the threshold
pub const DARK: u8 = 0;
/// Intensity written for pixels at or above the threshold
pub const BRIGHT: u8 = 255;

/// Binarize with Otsu's threshold; dark pixels become 0, the rest 255
pub fn otsu_binarize(gray: &PixelMatrix) -> PixelMatrix {
    let threshold = calculate_otsu_threshold(gray.as_bytes());
    threshold_binarize(gray, threshold)
}

/// Global threshold binarization: `value < threshold` maps to 0, else 255
pub fn threshold_binarize(gray: &PixelMatrix, threshold: u8) -> PixelMatrix {
    let mut binary = PixelMatrix::filled(gray.width(), gray.height(), BRIGHT);
    for y in 0..gray.height() {
        for (x, &value) in gray.row(y).iter().enumerate() {
            if value < threshold {
                binary.set(x, y, DARK);
            }
        }
    }
    binary
}

/// Calculate Otsu's optimal threshold
pub(crate) fn calculate_otsu_threshold(gray: &[u8]) -> u8 {
    // Build histogram
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total_pixels = gray.len() as f64;
    let total_sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(intensity, &count)| intensity as u64 * count)
        .sum();

    let mut max_variance = 0.0;
    let mut optimal_threshold = 128u8;

    // Class 1 holds intensities below the candidate threshold
    let mut class1_pixels = 0u64;
    let mut class1_sum = 0u64;

    for threshold in 1..=255usize {
        class1_pixels += histogram[threshold - 1];
        class1_sum += (threshold as u64 - 1) * histogram[threshold - 1];

        let class2_pixels = gray.len() as u64 - class1_pixels;
        if class1_pixels == 0 || class2_pixels == 0 {
            continue;
        }

        let class1_mean = class1_sum as f64 / class1_pixels as f64;
        let class2_mean = (total_sum - class1_sum) as f64 / class2_pixels as f64;

        let weight1 = class1_pixels as f64 / total_pixels;
        let weight2 = class2_pixels as f64 / total_pixels;

        let variance = weight1 * weight2 * (class1_mean - class2_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold as u8;
        }
    }

    optimal_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = PixelMatrix::from_raw(vec![100, 150, 200, 50], 2, 2).unwrap();
        let binary = threshold_binarize(&gray, 128);

        assert_eq!(binary.get(0, 0), Some(DARK)); // 100 < 128
        assert_eq!(binary.get(1, 0), Some(BRIGHT)); // 150 >= 128
        assert_eq!(binary.get(0, 1), Some(BRIGHT)); // 200 >= 128
        assert_eq!(binary.get(1, 1), Some(DARK)); // 50 < 128
    }

    #[test]
    fn test_otsu_binarize() {
        // Create a simple two-class image
        let mut gray = vec![50u8; 50]; // Dark class
        gray.extend(vec![200u8; 50]); // Light class
        let gray = PixelMatrix::from_raw(gray, 10, 10).unwrap();

        let threshold = calculate_otsu_threshold(gray.as_bytes());
        assert!(threshold > 50 && threshold <= 200);

        let binary = otsu_binarize(&gray);
        assert_eq!(binary.get(0, 0), Some(DARK));
        assert_eq!(binary.get(0, 7), Some(BRIGHT));
    }

    #[test]
    fn test_otsu_uniform_image() {
        let gray = PixelMatrix::filled(4, 4, 90);
        // No split exists; the fallback threshold applies
        assert_eq!(calculate_otsu_threshold(gray.as_bytes()), 128);
    }
}
