// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handoff from the editor into the 3D scene pipeline

use crate::error::{EditorError, Result};
use crate::model::EditorModel;
use crate::raster::render_walls_raster;
use floorplan3d::{
    build_scene, DoorSpec, FloorPlanInput, FurnitureSpec, Scene, SceneConfig, StairSpec,
    WallDetector, WindowSpec,
};
use image::DynamicImage;
use tracing::debug;

/// The model's collections as scene builder input, in canvas units
///
/// The canvas size stands in for the image size, so the canvas maps onto the
/// nominal footprint exactly as a raster of the same size would.
pub fn to_plan_input(model: &EditorModel) -> FloorPlanInput {
    let config = model.config();
    FloorPlanInput {
        image_width: config.canvas_width,
        image_height: config.canvas_height,
        walls: model.walls().map(|(_, wall)| wall.segment()).collect(),
        doors: model
            .doors()
            .map(|(_, door)| DoorSpec {
                anchor: door.anchor,
                width: door.width,
            })
            .collect(),
        windows: model
            .windows()
            .map(|(_, window)| WindowSpec {
                anchor: window.anchor,
            })
            .collect(),
        staircases: model
            .staircases()
            .map(|(_, stair)| StairSpec { rect: stair.rect })
            .collect(),
        furniture: model
            .furniture()
            .map(|(_, item)| FurnitureSpec {
                kind: item.kind,
                anchor: item.anchor,
                rotation: item.rotation,
            })
            .collect(),
    }
}

/// Build the 3D scene straight from the authored walls
pub fn build_preview(model: &EditorModel, config: &SceneConfig) -> Result<Scene> {
    if model.wall_count() == 0 {
        return Err(EditorError::NoWalls);
    }
    let scene = build_scene(&to_plan_input(model), config)?;
    debug!(faces = scene.faces.len(), "preview scene built");
    Ok(scene)
}

/// Build the 3D scene with walls re-detected from the walls-only raster
///
/// Openings, staircases and furniture still come from the model.
pub fn build_preview_detected(
    model: &EditorModel,
    detector: &dyn WallDetector,
    config: &SceneConfig,
) -> Result<Scene> {
    if model.wall_count() == 0 {
        return Err(EditorError::NoWalls);
    }
    let gray = DynamicImage::ImageRgb8(render_walls_raster(model)).to_luma8();
    let detected = detector.detect(&gray)?;
    debug!(
        detector = detector.name(),
        authored = model.wall_count(),
        detected = detected.len(),
        "walls re-detected from raster"
    );

    let mut input = to_plan_input(model);
    input.walls = detected.iter().map(|segment| segment.to_segment()).collect();
    Ok(build_scene(&input, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan3d::{DetectedSegment, FixedWallDetector, FurnitureKind};
    use nalgebra::Point2;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_plan_input_uses_canvas_size() {
        let mut model = EditorModel::default();
        model.add_wall(p(100.0, 100.0), p(500.0, 100.0));
        model.add_door(p(300.0, 100.0));
        model.add_furniture(FurnitureKind::Desk, p(200.0, 300.0));

        let input = to_plan_input(&model);
        assert_eq!((input.image_width, input.image_height), (1000, 700));
        assert_eq!(input.walls.len(), 1);
        assert_eq!(input.doors[0].width, 30.0);
        assert_eq!(input.furniture[0].kind, FurnitureKind::Desk);
        assert!(input.windows.is_empty());
    }

    #[test]
    fn test_preview_requires_walls() {
        let model = EditorModel::default();
        assert!(matches!(
            build_preview(&model, &SceneConfig::default()),
            Err(EditorError::NoWalls)
        ));
    }

    #[test]
    fn test_invalid_scene_config_is_reported() {
        let mut model = EditorModel::default();
        model.add_wall(p(100.0, 100.0), p(500.0, 100.0));
        let config = SceneConfig {
            wall_height: 9.0,
            ..Default::default()
        };
        assert!(matches!(
            build_preview(&model, &config),
            Err(EditorError::Scene(_))
        ));
    }

    #[test]
    fn test_detected_walls_replace_authored() {
        let mut model = EditorModel::default();
        model.add_wall(p(100.0, 100.0), p(500.0, 100.0));
        model.add_window(p(300.0, 100.0));

        let detector = FixedWallDetector::new(vec![
            DetectedSegment::from_coords(100.0, 100.0, 500.0, 100.0),
            DetectedSegment::from_coords(500.0, 100.0, 500.0, 400.0),
        ]);
        let scene = build_preview_detected(&model, &detector, &SceneConfig::default()).unwrap();
        assert_eq!(scene.stats().walls, 2);
        assert_eq!(scene.stats().windows, 1);
    }
}
