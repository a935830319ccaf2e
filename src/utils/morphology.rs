//! Grayscale morphology on [`PixelMatrix`]
//!
//! Dilation takes the maximum over the structuring element and erosion the
//! minimum, so on a dark-on-bright image a closing removes dark features the
//! element does not fit into. Pixels outside the matrix are ignored.

use crate::models::PixelMatrix;

/// Set of active offsets relative to the element origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    /// Build from a row-major mask; the origin is the mask center
    /// (rounded toward the top-left for even sizes)
    ///
    /// A zero width or height gives an empty element, which leaves images
    /// unchanged.
    pub fn from_mask(width: usize, height: usize, mask: &[bool]) -> Self {
        if width == 0 || height == 0 {
            return Self { offsets: Vec::new() };
        }
        let (ox, oy) = (((width - 1) / 2) as isize, ((height - 1) / 2) as isize);
        let offsets = mask
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .map(|(i, _)| ((i % width) as isize - ox, (i / width) as isize - oy))
            .collect();
        Self { offsets }
    }

    /// Solid `size x size` square
    pub fn square(size: usize) -> Self {
        Self::from_mask(size, size, &vec![true; size * size])
    }

    /// 3x6 element with only its outer columns set
    ///
    /// Closing with it erases dark strokes up to one pixel wide and dark
    /// blobs shorter than six rows, which keeps wide vertical guard bars.
    pub fn thin_guard() -> Self {
        let mask: Vec<bool> = (0..18).map(|i| i % 3 != 1).collect();
        Self::from_mask(3, 6, &mask)
    }

    /// Active offsets
    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }
}

fn apply(
    image: &PixelMatrix,
    element: &StructuringElement,
    sign: isize,
    pick: fn(u8, u8) -> u8,
) -> PixelMatrix {
    let (width, height) = (image.width() as isize, image.height() as isize);
    let mut out = image.clone();

    for y in 0..height {
        for x in 0..width {
            let mut acc: Option<u8> = None;
            for &(dx, dy) in element.offsets() {
                let (sx, sy) = (x + sign * dx, y + sign * dy);
                if sx < 0 || sy < 0 || sx >= width || sy >= height {
                    continue;
                }
                if let Some(value) = image.get(sx as usize, sy as usize) {
                    acc = Some(acc.map_or(value, |a| pick(a, value)));
                }
            }
            if let Some(value) = acc {
                out.set(x as usize, y as usize, value);
            }
        }
    }

    out
}

/// Maximum over the reflected element
pub fn dilate(image: &PixelMatrix, element: &StructuringElement) -> PixelMatrix {
    apply(image, element, -1, u8::max)
}

/// Minimum over the element
pub fn erode(image: &PixelMatrix, element: &StructuringElement) -> PixelMatrix {
    apply(image, element, 1, u8::min)
}

/// `iterations` dilations followed by as many erosions
pub fn close(image: &PixelMatrix, element: &StructuringElement, iterations: usize) -> PixelMatrix {
    let mut out = image.clone();
    for _ in 0..iterations {
        out = dilate(&out, element);
    }
    for _ in 0..iterations {
        out = erode(&out, element);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thin_guard_shape() {
        let element = StructuringElement::thin_guard();
        assert_eq!(element.offsets().len(), 12);
        assert!(element.offsets().iter().all(|&(dx, _)| dx != 0));
        assert!(element.offsets().contains(&(-1, -2)));
        assert!(element.offsets().contains(&(1, 3)));
    }

    #[test]
    fn test_close_removes_thin_stroke() {
        let mut image = PixelMatrix::filled(20, 20, 255);
        image.fill_rect(10, 2, 11, 18, 0);
        let closed = close(&image, &StructuringElement::thin_guard(), 1);
        assert!(closed.as_bytes().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_close_keeps_wide_bar() {
        let mut image = PixelMatrix::filled(30, 30, 255);
        image.fill_rect(8, 4, 16, 26, 0);
        let closed = close(&image, &StructuringElement::thin_guard(), 1);
        assert_eq!(closed, image);

        let squared = close(&image, &StructuringElement::square(3), 3);
        assert_eq!(squared, image);
    }

    #[test]
    fn test_empty_element_is_identity() {
        let element = StructuringElement::square(0);
        assert!(element.offsets().is_empty());
        assert!(StructuringElement::from_mask(0, 4, &[]).offsets().is_empty());

        let mut image = PixelMatrix::filled(8, 8, 255);
        image.fill_rect(2, 2, 4, 4, 0);
        assert_eq!(close(&image, &element, 2), image);
    }

    #[test]
    fn test_close_removes_speck() {
        let mut image = PixelMatrix::filled(12, 12, 255);
        image.fill_rect(5, 5, 7, 7, 0);
        let closed = close(&image, &StructuringElement::square(3), 3);
        assert_eq!(closed.get(5, 5), Some(255));
    }
}
