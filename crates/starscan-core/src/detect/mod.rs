//! Star detection for a single image.
//!
//! Decodes the image, thresholds its grayscale luminance, labels connected
//! bright components as blobs, annotates each detection with a red circle on
//! the original image, and writes the annotated copy. This is the CPU-bound
//! routine the analysis stage farms out to worker processes.

mod annotate;
mod label;

pub use label::{find_blobs, Blob};

use std::path::{Path, PathBuf};

use crate::config::DetectionConfig;

/// Error from the detection routine, classified so the parent process can
/// report what kind of unit failure aborted the batch.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Detects stars in `input`, writes the annotated image to `output`, and
/// returns the number of blobs found.
pub fn detect_and_annotate(
    input: &Path,
    output: &Path,
    params: DetectionConfig,
) -> Result<usize, DetectError> {
    let img = image::open(input).map_err(|source| DetectError::Decode {
        path: input.to_path_buf(),
        source,
    })?;

    let gray = img.to_luma8();
    let blobs = find_blobs(&gray, params);

    let mut annotated = img.to_rgb8();
    for blob in &blobs {
        annotate::draw_marker(&mut annotated, blob);
    }
    annotated.save(output).map_err(|source| DetectError::Encode {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        input = %input.display(),
        blobs = blobs.len(),
        "detection complete"
    );
    Ok(blobs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Black sky with bright square "stars" at the given top-left corners.
    fn synthetic_sky(size: u32, stars: &[(u32, u32, u32)]) -> RgbImage {
        let mut img = RgbImage::new(size, size);
        for &(x0, y0, side) in stars {
            for dy in 0..side {
                for dx in 0..side {
                    img.put_pixel(x0 + dx, y0 + dy, Rgb([255, 255, 255]));
                }
            }
        }
        img
    }

    #[test]
    fn counts_synthetic_stars() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sky.png");
        let output = dir.path().join("detected_sky.png");
        // Three 4x4 stars (area 16), well separated.
        synthetic_sky(64, &[(4, 4, 4), (30, 10, 4), (50, 50, 4)])
            .save(&input)
            .unwrap();

        let count =
            detect_and_annotate(&input, &output, DetectionConfig::default()).unwrap();
        assert_eq!(count, 3);
        assert!(output.exists(), "annotated image must be written");
    }

    #[test]
    fn small_blobs_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sky.png");
        let output = dir.path().join("out.png");
        // One 4x4 star (area 16) and one 2x2 speck (area 4, under min area 10).
        synthetic_sky(32, &[(4, 4, 4), (20, 20, 2)])
            .save(&input)
            .unwrap();

        let count =
            detect_and_annotate(&input, &output, DetectionConfig::default()).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn rerun_overwrites_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sky.png");
        let output = dir.path().join("out.png");
        synthetic_sky(32, &[(4, 4, 4)]).save(&input).unwrap();

        let first =
            detect_and_annotate(&input, &output, DetectionConfig::default()).unwrap();
        let second =
            detect_and_annotate(&input, &output, DetectionConfig::default()).unwrap();
        assert_eq!(first, second);
        assert!(output.exists());
    }

    #[test]
    fn missing_input_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = detect_and_annotate(
            &dir.path().join("nope.png"),
            &dir.path().join("out.png"),
            DetectionConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DetectError::Decode { .. }));
    }
}
