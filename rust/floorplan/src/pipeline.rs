// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image to wall list, in the foreground or on a worker thread
//!
//! The result crosses threads as one immutable [`DetectionSnapshot`], sent
//! exactly once. There is no cancellation; the caller blocks in
//! [`DetectionJob::wait`] until the worker finishes or fails.

use crate::error::{FloorPlanError, Result};
use crate::image_ops::load_grayscale;
use crate::normalize::Normalizer;
use crate::types::{DetectedSegment, FloorPlanInput};
use crate::wall_detector::WallDetector;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Fully computed detection result
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSnapshot {
    pub image_width: u32,
    pub image_height: u32,
    /// Wall segments in pixel space
    pub walls: Vec<DetectedSegment>,
    /// Meters per pixel for this image
    pub scale: f64,
}

impl DetectionSnapshot {
    /// Walls-only plan input for the scene builder
    pub fn to_plan_input(&self) -> FloorPlanInput {
        FloorPlanInput::from_walls(
            self.image_width,
            self.image_height,
            self.walls.iter().map(|w| w.to_segment()).collect(),
        )
    }
}

/// Load, detect and scale in the calling thread
pub fn detect_floor_plan(
    path: impl AsRef<Path>,
    detector: &dyn WallDetector,
    nominal_width: f64,
) -> Result<DetectionSnapshot> {
    let image = load_grayscale(path)?;
    let normalizer = Normalizer::new(image.width(), image.height(), nominal_width)?;
    let walls = detector.detect(&image)?;
    tracing::info!(
        detector = detector.name(),
        walls = walls.len(),
        scale = normalizer.scale(),
        "detection complete"
    );
    Ok(DetectionSnapshot {
        image_width: image.width(),
        image_height: image.height(),
        walls,
        scale: normalizer.scale(),
    })
}

/// Handle to a detection running on a worker thread
pub struct DetectionJob {
    receiver: Receiver<Result<DetectionSnapshot>>,
    path: PathBuf,
    result: Option<Result<DetectionSnapshot>>,
}

impl DetectionJob {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Poll without blocking; true once a result (or failure) is available
    pub fn is_finished(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.result = Some(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.result = Some(Err(worker_died(&self.path)));
                true
            }
        }
    }

    /// Block until the worker finishes and take its snapshot
    pub fn wait(self) -> Result<DetectionSnapshot> {
        if let Some(result) = self.result {
            return result;
        }
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(worker_died(&self.path)))
    }
}

fn worker_died(path: &Path) -> FloorPlanError {
    FloorPlanError::Detection(format!(
        "detection worker for '{}' stopped without a result",
        path.display()
    ))
}

/// Start detection on a named worker thread
pub fn spawn_detection(
    path: impl Into<PathBuf>,
    detector: Arc<dyn WallDetector>,
    nominal_width: f64,
) -> Result<DetectionJob> {
    let path = path.into();
    let (sender, receiver) = channel();

    let worker_path = path.clone();
    thread::Builder::new()
        .name("wall-detector".into())
        .spawn(move || {
            let result = detect_floor_plan(&worker_path, detector.as_ref(), nominal_width);
            if let Err(err) = &result {
                tracing::warn!(path = %worker_path.display(), error = %err, "detection failed");
            }
            // Receiver may already be gone; nothing left to report to
            let _ = sender.send(result);
        })
        .map_err(|e| FloorPlanError::Detection(format!("cannot spawn detection worker: {e}")))?;

    tracing::debug!(path = %path.display(), "detection started in background");
    Ok(DetectionJob {
        receiver,
        path,
        result: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wall_detector::FixedWallDetector;
    use image::{GrayImage, Luma};

    struct PanickingDetector;

    impl WallDetector for PanickingDetector {
        fn detect(&self, _image: &GrayImage) -> Result<Vec<DetectedSegment>> {
            panic!("detector crashed");
        }
    }

    fn write_blank_png(dir: &Path) -> PathBuf {
        let path = dir.join("blank.png");
        GrayImage::from_pixel(1000, 800, Luma([255])).save(&path).unwrap();
        path
    }

    #[test]
    fn test_background_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_blank_png(dir.path());
        let detector = Arc::new(FixedWallDetector::new(vec![DetectedSegment::from_coords(
            50.0, 50.0, 950.0, 50.0,
        )]));

        let snapshot = spawn_detection(&path, detector, 15.0).unwrap().wait().unwrap();
        assert_eq!(snapshot.image_width, 1000);
        assert_eq!(snapshot.image_height, 800);
        assert_eq!(snapshot.walls.len(), 1);
        assert!((snapshot.scale - 0.015).abs() < 1e-12);

        let input = snapshot.to_plan_input();
        assert_eq!(input.walls[0].to_coords(), (50.0, 50.0, 950.0, 50.0));
    }

    #[test]
    fn test_missing_image_fails_whole_job() {
        let detector = Arc::new(FixedWallDetector::default());
        let err = spawn_detection("/nonexistent/plan.png", detector, 15.0)
            .unwrap()
            .wait()
            .unwrap_err();
        assert!(matches!(err, FloorPlanError::ImageLoad { .. }));
    }

    #[test]
    fn test_panicking_worker_becomes_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_blank_png(dir.path());
        let err = spawn_detection(&path, Arc::new(PanickingDetector), 15.0)
            .unwrap()
            .wait()
            .unwrap_err();
        assert!(matches!(err, FloorPlanError::Detection(_)));
    }

    #[test]
    fn test_poll_then_wait() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_blank_png(dir.path());
        let mut job = spawn_detection(&path, Arc::new(FixedWallDetector::default()), 15.0).unwrap();
        while !job.is_finished() {
            std::thread::yield_now();
        }
        let snapshot = job.wait().unwrap();
        assert!(snapshot.walls.is_empty());
    }
}
