//! Hidden `starscan worker` mode: analyze one file and print the result line.
//!
//! This is the child side of the analysis process pool. Everything comes in
//! on the command line and the only output contract is a single JSON
//! `WorkerOutput` line on stdout; errors go to stderr via the normal error
//! path and a non-zero exit.

use anyhow::{Context, Result};
use starscan_core::config::DetectionConfig;
use starscan_core::detect;
use starscan_core::pool::WorkerOutput;
use std::path::Path;

pub fn run_worker(input: &Path, output: &Path, threshold: u8, min_area: u32) -> Result<()> {
    let params = DetectionConfig {
        luminance_threshold: threshold,
        min_blob_area: min_area,
    };
    let star_count = detect::detect_and_annotate(input, output, params)?;

    let filename = input
        .file_name()
        .and_then(|n| n.to_str())
        .context("input path has no usable filename")?
        .to_string();
    let result = WorkerOutput {
        filename,
        star_count,
    };
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn worker_analyzes_and_annotates_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("space_0.png");
        let output = dir.path().join("detected_space_0.png");

        // Black sky with one 4x4 bright square (area 16, over the default
        // minimum of 10).
        let mut img = RgbImage::new(32, 32);
        for y in 8..12 {
            for x in 8..12 {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        img.save(&input).unwrap();

        run_worker(&input, &output, 200, 10).expect("worker must succeed");
        assert!(output.exists(), "annotated image must be written");
    }

    #[test]
    fn worker_fails_on_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_worker(
            &dir.path().join("nope.png"),
            &dir.path().join("out.png"),
            200,
            10,
        )
        .expect_err("missing input must fail");
        assert!(err.to_string().contains("nope.png"), "unexpected error: {err:#}");
    }
}
