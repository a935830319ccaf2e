use crate::error::LocateError;
use crate::utils::grayscale::rgb_to_grayscale;

/// Row-major 8-bit pixel matrix (one intensity per pixel)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelMatrix {
    /// Create a matrix of the given size filled with `value`
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap existing row-major intensities
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize) -> Result<Self, LocateError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(LocateError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert a decoded image to luminance
    pub fn from_image(image: &image::DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        let gray = rgb_to_grayscale(rgb.as_raw(), width, height);
        Self {
            width,
            height,
            data: gray,
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-sized matrix
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get intensity at (x, y), `None` outside the matrix
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// Set intensity at (x, y); out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.data[y * self.width + x] = value;
    }

    /// Fill the axis-aligned block `[x0, x1) x [y0, y1)`, clipped to the matrix
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, value: u8) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.data[y * self.width + x] = value;
            }
        }
    }

    /// Borrow one pixel row. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Get raw data as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the matrix and return its bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

impl Default for PixelMatrix {
    fn default() -> Self {
        Self::filled(0, 0, 0)
    }
}
