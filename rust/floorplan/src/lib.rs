// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan to 3D scene reconstruction
//!
//! This crate provides the pipeline that turns a 2D floor plan into solid
//! geometry:
//! 1. Wall segments come from a [`WallDetector`] run on a raster image, or
//!    from an authored plan ([`FloorPlanInput`])
//! 2. Every coordinate is normalized to meters with one scale factor
//! 3. Walls are extruded into oriented boxes, doors and windows are snapped
//!    onto the nearest wall, staircases are cut into ascending steps and
//!    furniture becomes catalog-sized boxes
//! 4. The resulting [`Scene`] is triangulated or written as OBJ/MTL
//!
//! # Usage
//!
//! ```rust,ignore
//! use floorplan3d::{floor_plan_to_scene, write_obj, HoughWallDetector, SceneConfig};
//!
//! let detector = HoughWallDetector::default();
//! let scene = floor_plan_to_scene("plan.png", &detector, &SceneConfig::default())?;
//! write_obj(&scene, "plan.obj")?;
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod furniture;
pub mod image_ops;
pub mod line_ops;
pub mod material;
pub mod normalize;
pub mod obj;
pub mod openings;
pub mod pipeline;
pub mod sample;
pub mod scene;
pub mod stairs;
pub mod types;
pub mod wall_detector;
pub mod walls;

// Re-export commonly used types and functions
pub use config::{DetectionConfig, OpeningConfig, SceneConfig};
pub use error::{FloorPlanError, Result};
pub use furniture::{extrude_furniture, validate_catalog, FurnitureKind};
pub use image_ops::load_grayscale;
pub use material::{palette, Color, Material};
pub use normalize::{NormalizedPlan, Normalizer};
pub use obj::write_obj;
pub use openings::{DoorGeometry, OpeningPlacer, WindowGeometry};
pub use pipeline::{detect_floor_plan, spawn_detection, DetectionJob, DetectionSnapshot};
pub use sample::sample_floor_plan;
pub use scene::{build_scene, Scene, SceneElement, SceneFace, SceneStats};
pub use stairs::{build_staircase, StairParams};
pub use types::{
    DetectedSegment, DoorSpec, FloorPlanInput, FurnitureSpec, Rect2, StairDirection, StairSpec,
    WindowSpec,
};
pub use wall_detector::{FixedWallDetector, HoughWallDetector, WallDetector};
pub use walls::extrude_wall;

use std::path::Path;

/// Detect walls in an image file and build its scene
///
/// Runs in the calling thread; see [`spawn_detection`] for the background
/// variant.
pub fn floor_plan_to_scene(
    path: impl AsRef<Path>,
    detector: &dyn WallDetector,
    config: &SceneConfig,
) -> Result<Scene> {
    config.validate()?;
    let snapshot = detect_floor_plan(path, detector, config.nominal_footprint_width)?;
    build_scene(&snapshot.to_plan_input(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_plan_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        sample_floor_plan().save(&path).unwrap();

        let scene =
            floor_plan_to_scene(&path, &HoughWallDetector::default(), &SceneConfig::default())
                .unwrap();

        let stats = scene.stats();
        assert!(stats.walls >= 4, "expected walls, got {}", stats.walls);
        assert_eq!(stats.faces, 1 + 6 * stats.walls);

        let (min, max) = scene.bounds().unwrap();
        assert!(min.x >= -0.5 && max.x <= 15.5);
        assert!(max.z <= 3.0 + 1e-9);
    }
}
