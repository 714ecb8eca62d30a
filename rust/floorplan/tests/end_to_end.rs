// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end scene construction through the public API

use approx::assert_relative_eq;
use floorplan3d::{
    build_scene, spawn_detection, write_obj, DetectedSegment, DoorSpec, FixedWallDetector,
    FloorPlanInput, FurnitureKind, FurnitureSpec, Material, Rect2, SceneConfig, SceneElement,
    StairSpec, WindowSpec,
};
use floorplan3d_geometry::{BoxFace, Point2, Segment2};
use image::{GrayImage, Luma};
use std::sync::Arc;

fn single_wall_plan() -> FloorPlanInput {
    FloorPlanInput::from_walls(
        1000,
        800,
        vec![Segment2::from_coords(50.0, 50.0, 950.0, 50.0)],
    )
}

#[test]
fn single_wall_normalizes_to_meters() {
    let scene = build_scene(&single_wall_plan(), &SceneConfig::default()).unwrap();
    assert_relative_eq!(scene.scale, 0.015, epsilon = 1e-12);

    // Floor quad spans [0, 15] x [0, 12]
    let floor: Vec<_> = scene.faces_of(SceneElement::Floor).collect();
    assert_eq!(floor.len(), 1);
    let (min, max) = floor[0].face.bounds();
    assert_relative_eq!(min.x, 0.0);
    assert_relative_eq!(min.y, 0.0);
    assert_relative_eq!(max.x, 15.0, epsilon = 1e-12);
    assert_relative_eq!(max.y, 12.0, epsilon = 1e-12);

    // The wall's bottom face runs from (0.75, 0.75) to (14.25, 0.75), +/- 0.1 in y
    let wall: Vec<_> = scene.faces_of(SceneElement::Wall(0)).collect();
    assert_eq!(wall.len(), 6);
    let bottom = &wall[BoxFace::Bottom as usize].face.vertices;
    assert_relative_eq!(bottom[0].x, 0.75, epsilon = 1e-12);
    assert_relative_eq!(bottom[0].y, 0.85, epsilon = 1e-12);
    assert_relative_eq!(bottom[1].x, 14.25, epsilon = 1e-12);
    assert_relative_eq!(bottom[2].y, 0.65, epsilon = 1e-12);
    assert!(wall.iter().all(|f| f.material == Material::Wall));
}

#[test]
fn authored_plan_with_every_entity() {
    let mut input = FloorPlanInput::from_walls(
        1000,
        700,
        vec![
            Segment2::from_coords(100.0, 100.0, 600.0, 100.0),
            Segment2::from_coords(600.0, 100.0, 600.0, 500.0),
        ],
    );
    input.doors.push(DoorSpec {
        anchor: Point2::new(300.0, 120.0),
        width: 50.0,
    });
    input.windows.push(WindowSpec {
        anchor: Point2::new(580.0, 300.0),
    });
    input.staircases.push(StairSpec {
        rect: Rect2::from_corners(Point2::new(200.0, 200.0), Point2::new(260.0, 400.0)),
    });
    input.furniture.push(FurnitureSpec {
        kind: FurnitureKind::Sofa,
        anchor: Point2::new(400.0, 300.0),
        rotation: 0.0,
    });

    let scene = build_scene(&input, &SceneConfig::default()).unwrap();
    let stats = scene.stats();
    assert_eq!(stats.walls, 2);
    assert_eq!(stats.doors, 1);
    assert_eq!(stats.windows, 1);
    // 200 units * 0.015 = 3.0 m / 0.3 = 10 steps
    assert_eq!(stats.steps, 10);
    assert_eq!(stats.furniture, 1);

    // Door snapped to the first wall: opening lies on its outer face
    let door = scene
        .faces_of(SceneElement::Door(0))
        .find(|f| f.material == Material::DoorOpening)
        .unwrap();
    let wall_y = 100.0 * 0.015;
    assert!(door
        .face
        .vertices
        .iter()
        .all(|v| (v.y - (wall_y + 0.1)).abs() < 1e-9));

    // Window snapped to the vertical wall at x = 9.0
    let window = scene
        .faces_of(SceneElement::Window(0))
        .find(|f| f.material == Material::WindowOpening)
        .unwrap();
    assert!(window.face.vertices.iter().all(|v| (v.x - 8.9).abs() < 1e-9));

    let top_step = scene
        .faces_of(SceneElement::Staircase { index: 0, step: 9 })
        .map(|f| f.face.bounds().1.z)
        .fold(0.0, f64::max);
    assert_relative_eq!(top_step, 3.0, epsilon = 1e-9);

    let mesh = scene.to_mesh().unwrap();
    assert_eq!(mesh.triangle_count(), 2 * stats.faces);
}

#[test]
fn plan_input_json_round_trip() {
    let mut input = single_wall_plan();
    input.furniture.push(FurnitureSpec {
        kind: FurnitureKind::DiningTable,
        anchor: Point2::new(500.0, 400.0),
        rotation: 0.0,
    });

    let json = serde_json::to_string(&input).unwrap();
    assert!(json.contains("\"dining_table\""));
    let back: FloorPlanInput = serde_json::from_str(&json).unwrap();
    assert_eq!(back, input);

    let unknown = json.replace("dining_table", "grand_piano");
    assert!(serde_json::from_str::<FloorPlanInput>(&unknown).is_err());
}

#[test]
fn background_detection_feeds_scene() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("plan.png");
    GrayImage::from_pixel(1000, 800, Luma([255]))
        .save(&image_path)
        .unwrap();

    let detector = Arc::new(FixedWallDetector::new(vec![
        DetectedSegment::from_coords(50.0, 50.0, 950.0, 50.0),
        DetectedSegment::from_coords(400.0, 400.0, 400.0, 400.0),
    ]));
    let snapshot = spawn_detection(&image_path, detector, 15.0)
        .unwrap()
        .wait()
        .unwrap();

    let scene = build_scene(&snapshot.to_plan_input(), &SceneConfig::default()).unwrap();
    assert_eq!(scene.stats().walls, 1);
    assert_eq!(scene.stats().skipped_walls, 1);

    let obj_path = dir.path().join("plan.obj");
    write_obj(&scene, &obj_path).unwrap();
    let text = std::fs::read_to_string(&obj_path).unwrap();
    assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 14);
    assert!(dir.path().join("plan.mtl").exists());
}

#[test]
fn empty_detection_gives_floor_only_scene() {
    let input = FloorPlanInput::from_walls(640, 480, Vec::new());
    let scene = build_scene(&input, &SceneConfig::default()).unwrap();
    assert_eq!(scene.faces.len(), 1);
    let (_, max) = scene.bounds().unwrap();
    assert_relative_eq!(max.x, 15.0, epsilon = 1e-12);
    assert_relative_eq!(max.y, 11.25, epsilon = 1e-12);
}
