//! Detection markers: red circle outlines drawn on the original image.

use image::{Rgb, RgbImage};

use super::Blob;

const MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Minimum marker radius so tiny stars still get a visible circle.
const MIN_MARKER_RADIUS: i64 = 4;

/// Draws a circle outline around the blob's centroid, slightly larger than
/// the blob itself. Pixels outside the image are skipped.
pub fn draw_marker(img: &mut RgbImage, blob: &Blob) {
    let cx = blob.center_x.round() as i64;
    let cy = blob.center_y.round() as i64;
    let radius = ((blob.radius() * 1.5).ceil() as i64).max(MIN_MARKER_RADIUS);
    draw_circle(img, cx, cy, radius);
}

/// Midpoint circle algorithm with per-pixel bounds checking.
fn draw_circle(img: &mut RgbImage, cx: i64, cy: i64, radius: i64) {
    let mut x = radius;
    let mut y = 0i64;
    let mut err = 1 - radius;

    while x >= y {
        for &(px, py) in &[
            (cx + x, cy + y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx - x, cy + y),
            (cx - x, cy - y),
            (cx - y, cy - x),
            (cx + y, cy - x),
            (cx + x, cy - y),
        ] {
            put_checked(img, px, py);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

fn put_checked(img: &mut RgbImage, x: i64, y: i64) {
    let (w, h) = img.dimensions();
    if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
        img.put_pixel(x as u32, y as u32, MARKER_COLOR);
    }
}
