//! Bright-blob labeling: threshold + 4-connected component search.

use image::GrayImage;

use crate::config::DetectionConfig;

/// One detected bright blob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    /// Centroid x in pixels.
    pub center_x: f32,
    /// Centroid y in pixels.
    pub center_y: f32,
    /// Component area in pixels.
    pub area: u32,
}

impl Blob {
    /// Radius of a disc with this blob's area, used for marker sizing.
    pub fn radius(&self) -> f32 {
        (self.area as f32 / std::f32::consts::PI).sqrt()
    }
}

/// Finds all 4-connected components of pixels brighter than the threshold,
/// dropping components smaller than `min_blob_area`.
pub fn find_blobs(gray: &GrayImage, params: DetectionConfig) -> Vec<Blob> {
    let (width, height) = gray.dimensions();
    let w = width as usize;
    let h = height as usize;
    let bright = |x: u32, y: u32| gray.get_pixel(x, y).0[0] >= params.luminance_threshold;

    let mut visited = vec![false; w * h];
    let mut blobs = Vec::new();
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if visited[y as usize * w + x as usize] || !bright(x, y) {
                continue;
            }

            // Flood-fill one component, accumulating centroid sums.
            let mut area = 0u32;
            let mut sum_x = 0u64;
            let mut sum_y = 0u64;
            visited[y as usize * w + x as usize] = true;
            stack.push((x, y));
            while let Some((cx, cy)) = stack.pop() {
                area += 1;
                sum_x += cx as u64;
                sum_y += cy as u64;

                let mut neighbors = [(0u32, 0u32); 4];
                let mut n = 0;
                if cx > 0 {
                    neighbors[n] = (cx - 1, cy);
                    n += 1;
                }
                if cx + 1 < width {
                    neighbors[n] = (cx + 1, cy);
                    n += 1;
                }
                if cy > 0 {
                    neighbors[n] = (cx, cy - 1);
                    n += 1;
                }
                if cy + 1 < height {
                    neighbors[n] = (cx, cy + 1);
                    n += 1;
                }
                for &(nx, ny) in &neighbors[..n] {
                    let idx = ny as usize * w + nx as usize;
                    if !visited[idx] && bright(nx, ny) {
                        visited[idx] = true;
                        stack.push((nx, ny));
                    }
                }
            }

            if area >= params.min_blob_area {
                blobs.push(Blob {
                    center_x: sum_x as f32 / area as f32,
                    center_y: sum_y as f32 / area as f32,
                    area,
                });
            }
        }
    }

    blobs
}
