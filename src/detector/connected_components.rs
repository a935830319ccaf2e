/// Connected components over dark pixels
/// Labels 4-connected foreground regions and keeps, per region, its pixel
/// count and boundary pixels (the input to rectangle fitting)
use crate::models::PixelMatrix;
use std::collections::HashMap;

/// Union-Find data structure
pub struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    /// Create `n` singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
        }
    }

    /// Representative of the set containing `x`
    pub fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            // Path halving
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merge the sets containing `x` and `y`; the smaller root wins
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x < root_y {
            self.parent[root_y as usize] = root_x;
        } else if root_y < root_x {
            self.parent[root_x as usize] = root_y;
        }
    }
}

/// One connected foreground region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Number of pixels in the region
    pub pixel_count: u32,
    /// Pixels with at least one 4-neighbour outside the region
    pub boundary: Vec<(usize, usize)>,
}

/// Label 4-connected regions of pixels at or below `intensity_threshold`,
/// in order of their first pixel (row-major)
pub fn find_dark_regions(pixels: &PixelMatrix, intensity_threshold: u8) -> Vec<Region> {
    let width = pixels.width();
    let height = pixels.height();
    let is_dark = |x: usize, y: usize| {
        pixels
            .get(x, y)
            .is_some_and(|value| value <= intensity_threshold)
    };

    let mut labels = vec![0u32; width * height];
    let mut next_label = 1u32;
    // Label 0 is background; worst case needs one label per pixel
    let mut uf = UnionFind::new(width * height + 1);

    // First pass: provisional labels from the left and upper neighbours
    for y in 0..height {
        for x in 0..width {
            if !is_dark(x, y) {
                continue;
            }

            let idx = y * width + x;
            let left = if x > 0 { labels[idx - 1] } else { 0 };
            let up = if y > 0 { labels[idx - width] } else { 0 };

            labels[idx] = match (left, up) {
                (0, 0) => {
                    next_label += 1;
                    next_label - 1
                }
                (l, 0) => l,
                (0, u) => u,
                (l, u) => {
                    uf.union(l, u);
                    l.min(u)
                }
            };
        }
    }

    // Second pass: gather statistics per root
    let mut index_of_root: HashMap<u32, usize> = HashMap::new();
    let mut regions: Vec<Region> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let label = labels[y * width + x];
            if label == 0 {
                continue;
            }
            let root = uf.find(label);
            let index = *index_of_root.entry(root).or_insert_with(|| {
                regions.push(Region {
                    pixel_count: 0,
                    boundary: Vec::new(),
                });
                regions.len() - 1
            });

            let region = &mut regions[index];
            region.pixel_count += 1;

            let on_boundary = x == 0
                || y == 0
                || !is_dark(x - 1, y)
                || !is_dark(x + 1, y)
                || !is_dark(x, y - 1)
                || !is_dark(x, y + 1);
            if on_boundary {
                region.boundary.push((x, y));
            }
        }
    }

    regions
}
