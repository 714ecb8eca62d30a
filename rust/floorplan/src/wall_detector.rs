// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall detection from raster floor plans
//!
//! The scene pipeline only depends on the [`WallDetector`] trait: an image
//! goes in, a complete list of pixel-space segments comes out. The bundled
//! [`HoughWallDetector`] is a classical threshold / edge / Hough pipeline.

use crate::config::DetectionConfig;
use crate::error::Result;
use crate::image_ops::{canny_edges, morphological_close, threshold_inverted};
use crate::line_ops::{detect_lines, filter_short_lines, merge_collinear_lines};
use crate::types::DetectedSegment;
use image::GrayImage;

/// Extracts wall segments from a grayscale floor plan
///
/// Results are in pixel coordinates, in no particular order, and may be
/// empty. An implementation returns everything at once or an error.
pub trait WallDetector: Send + Sync {
    fn detect(&self, image: &GrayImage) -> Result<Vec<DetectedSegment>>;

    /// Short name for logs
    fn name(&self) -> &str {
        "wall-detector"
    }
}

/// Threshold, close, Canny, probabilistic Hough, length filter
#[derive(Debug, Clone, Default)]
pub struct HoughWallDetector {
    config: DetectionConfig,
}

impl HoughWallDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }
}

impl WallDetector for HoughWallDetector {
    fn detect(&self, image: &GrayImage) -> Result<Vec<DetectedSegment>> {
        let cfg = &self.config;

        let binary = threshold_inverted(image, cfg.binary_threshold);
        let closed = morphological_close(&binary, cfg.close_radius);
        let edges = canny_edges(&closed, cfg.canny_low, cfg.canny_high);

        let raw = detect_lines(
            &edges,
            cfg.hough_threshold,
            cfg.min_line_length,
            cfg.max_line_gap,
        );
        let mut lines = filter_short_lines(&raw, cfg.min_segment_length);
        if cfg.merge_collinear {
            lines = merge_collinear_lines(
                &lines,
                cfg.collinear_angle_tolerance,
                cfg.collinear_distance_tolerance,
            );
        }

        tracing::debug!(
            width = image.width(),
            height = image.height(),
            raw = raw.len(),
            kept = lines.len(),
            "hough wall detection finished"
        );
        Ok(lines)
    }

    fn name(&self) -> &str {
        "hough"
    }
}

/// Detector returning a fixed list; used for replays and tests
#[derive(Debug, Clone, Default)]
pub struct FixedWallDetector {
    segments: Vec<DetectedSegment>,
}

impl FixedWallDetector {
    pub fn new(segments: Vec<DetectedSegment>) -> Self {
        Self { segments }
    }
}

impl WallDetector for FixedWallDetector {
    fn detect(&self, _image: &GrayImage) -> Result<Vec<DetectedSegment>> {
        Ok(self.segments.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
