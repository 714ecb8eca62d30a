// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image loading and preprocessing for wall detection

use crate::error::{FloorPlanError, Result};
use image::{GrayImage, Luma};
use std::path::Path;

/// Load an image from disk and convert it to 8-bit grayscale
///
/// A missing or undecodable file is fatal; nothing partial is returned.
pub fn load_grayscale(path: impl AsRef<Path>) -> Result<GrayImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| FloorPlanError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = image.to_luma8();
    tracing::debug!(
        path = %path.display(),
        width = gray.width(),
        height = gray.height(),
        "loaded floor plan image"
    );
    Ok(gray)
}

/// Inverted binary threshold: dark ink becomes white foreground
///
/// Pixels strictly above `threshold` map to 0, everything else to 255.
pub fn threshold_inverted(image: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if image.get_pixel(x, y).0[0] > threshold {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Apply Canny edge detection
pub fn canny_edges(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    imageproc::edges::canny(image, low_threshold, high_threshold)
}

/// Morphological dilation - expands white regions
pub fn dilate(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::dilate(image, imageproc::distance_transform::Norm::LInf, radius)
}

/// Morphological erosion - shrinks white regions
pub fn erode(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::erode(image, imageproc::distance_transform::Norm::LInf, radius)
}

/// Morphological closing (dilate then erode) - fills small gaps
///
/// With the L-infinity norm a radius of 1 is the square 3x3 kernel.
pub fn morphological_close(image: &GrayImage, radius: u8) -> GrayImage {
    if radius == 0 {
        return image.clone();
    }
    erode(&dilate(image, radius), radius)
}
