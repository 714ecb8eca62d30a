// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 3D scene assembly from a floor plan
//!
//! The scene is a flat list of planar faces. Each face records its material
//! and the plan element it came from so the rendering side can group, color
//! or pick them.

use crate::config::SceneConfig;
use crate::error::Result;
use crate::furniture::extrude_furniture;
use crate::material::Material;
use crate::normalize::Normalizer;
use crate::openings::OpeningPlacer;
use crate::stairs::build_staircase;
use crate::types::FloorPlanInput;
use crate::walls::extrude_wall;
use floorplan3d_geometry::{Face, Mesh};
use nalgebra::Point3;
use serde::Serialize;

/// Plan element a face belongs to; indices refer to the input lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SceneElement {
    Floor,
    Wall(usize),
    Door(usize),
    Window(usize),
    Staircase { index: usize, step: usize },
    Furniture(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneFace {
    pub face: Face,
    pub material: Material,
    pub element: SceneElement,
}

/// Element counts for one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SceneStats {
    pub walls: usize,
    pub doors: usize,
    pub windows: usize,
    pub staircases: usize,
    pub steps: usize,
    pub furniture: usize,
    pub faces: usize,
    /// Zero-length walls that produced no geometry
    pub skipped_walls: usize,
    /// Openings with no host wall
    pub dropped_openings: usize,
}

/// A complete 3D scene in meters, Z up
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Meters per source unit used for this build
    pub scale: f64,
    pub faces: Vec<SceneFace>,
    stats: SceneStats,
}

impl Scene {
    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Axis-aligned bounds over all faces
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        self.faces
            .iter()
            .map(|f| f.face.bounds())
            .reduce(|(amin, amax), (bmin, bmax)| (amin.inf(&bmin), amax.sup(&bmax)))
    }

    /// Faces made of `material`
    pub fn faces_with(&self, material: Material) -> impl Iterator<Item = &SceneFace> {
        self.faces.iter().filter(move |f| f.material == material)
    }

    /// Faces belonging to `element`
    pub fn faces_of(&self, element: SceneElement) -> impl Iterator<Item = &SceneFace> {
        self.faces.iter().filter(move |f| f.element == element)
    }

    /// Triangulate every face into a single mesh
    pub fn to_mesh(&self) -> Result<Mesh> {
        Ok(Mesh::from_faces(self.faces.iter().map(|f| &f.face))?)
    }

    fn push(&mut self, face: Face, material: Material, element: SceneElement) {
        self.faces.push(SceneFace {
            face,
            material,
            element,
        });
    }

    fn extend(
        &mut self,
        faces: impl IntoIterator<Item = Face>,
        material: Material,
        element: SceneElement,
    ) {
        for face in faces {
            self.push(face, material, element);
        }
    }
}

/// Build the 3D scene for a floor plan
///
/// All coordinates are normalized with one scale factor. Emission order is
/// floor, walls, doors, windows, staircases, furniture.
pub fn build_scene(input: &FloorPlanInput, config: &SceneConfig) -> Result<Scene> {
    config.validate()?;

    let normalizer = Normalizer::new(
        input.image_width,
        input.image_height,
        config.nominal_footprint_width,
    )?;
    let plan = normalizer.normalize(input);

    let mut scene = Scene {
        scale: plan.scale,
        faces: Vec::new(),
        stats: SceneStats::default(),
    };

    let (width, depth) = plan.floor_extent;
    scene.push(
        Face::quad(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, depth, 0.0),
            Point3::new(0.0, depth, 0.0),
        ),
        Material::Floor,
        SceneElement::Floor,
    );

    for (i, wall) in plan.walls.iter().enumerate() {
        match extrude_wall(wall, config.wall_height, config.wall_thickness) {
            Some(faces) => {
                scene.extend(faces, Material::Wall, SceneElement::Wall(i));
                scene.stats.walls += 1;
            }
            None => scene.stats.skipped_walls += 1,
        }
    }

    let placer = OpeningPlacer::new(&plan.walls, config.wall_thickness, &config.openings);

    for (i, door) in plan.doors.iter().enumerate() {
        match placer.place_door(door) {
            Some(geometry) => {
                scene.push(geometry.opening, Material::DoorOpening, SceneElement::Door(i));
                scene.push(geometry.panel, Material::DoorPanel, SceneElement::Door(i));
                scene.stats.doors += 1;
            }
            None => scene.stats.dropped_openings += 1,
        }
    }

    for (i, window) in plan.windows.iter().enumerate() {
        match placer.place_window(window) {
            Some(geometry) => {
                scene.push(geometry.opening, Material::WindowOpening, SceneElement::Window(i));
                scene.push(geometry.frame, Material::WindowFrame, SceneElement::Window(i));
                scene.stats.windows += 1;
            }
            None => scene.stats.dropped_openings += 1,
        }
    }

    for (index, stair) in plan.staircases.iter().enumerate() {
        let steps = build_staircase(&stair.rect, &config.stairs);
        scene.stats.steps += steps.len();
        for (step, faces) in steps.into_iter().enumerate() {
            scene.extend(faces, Material::Stair, SceneElement::Staircase { index, step });
        }
        scene.stats.staircases += 1;
    }

    for (i, item) in plan.furniture.iter().enumerate() {
        let faces = extrude_furniture(item.kind, item.anchor, plan.scale);
        scene.extend(faces, Material::Furniture(item.kind), SceneElement::Furniture(i));
        scene.stats.furniture += 1;
    }

    scene.stats.faces = scene.faces.len();
    tracing::debug!(
        scale = plan.scale,
        walls = scene.stats.walls,
        doors = scene.stats.doors,
        windows = scene.stats.windows,
        steps = scene.stats.steps,
        furniture = scene.stats.furniture,
        faces = scene.stats.faces,
        "scene built"
    );

    Ok(scene)
}
