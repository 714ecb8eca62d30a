// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ/MTL export
//!
//! Scene coordinates are Z-up; OBJ is Y-up. Vertices and normals are
//! written as `(x, z, -y)`, a rotation about X, so triangles keep the
//! winding of their source face.

use crate::error::{FloorPlanError, Result};
use crate::material::Material;
use crate::scene::Scene;
use floorplan3d_geometry::triangulate_planar;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `scene` to `obj_path` and its materials next to it as `.mtl`
pub fn write_obj(scene: &Scene, obj_path: impl AsRef<Path>) -> Result<()> {
    let obj_path = obj_path.as_ref();
    let mtl_path = obj_path.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scene.mtl".into());

    let file = File::create(obj_path).map_err(|e| FloorPlanError::io(obj_path, e))?;
    let mut out = BufWriter::new(file);
    write_obj_to(scene, &mut out, Some(&mtl_name))?;
    out.flush().map_err(|e| FloorPlanError::io(obj_path, e))?;

    let file = File::create(&mtl_path).map_err(|e| FloorPlanError::io(&mtl_path, e))?;
    let mut out = BufWriter::new(file);
    write_mtl_to(scene, &mut out).map_err(|e| FloorPlanError::io(&mtl_path, e))?;
    out.flush().map_err(|e| FloorPlanError::io(&mtl_path, e))?;

    tracing::info!(
        obj = %obj_path.display(),
        mtl = %mtl_path.display(),
        faces = scene.faces.len(),
        "wrote OBJ"
    );
    Ok(())
}

/// Distinct materials in order of first use
pub fn scene_materials(scene: &Scene) -> Vec<Material> {
    let mut materials: Vec<Material> = Vec::new();
    for face in &scene.faces {
        if !materials.contains(&face.material) {
            materials.push(face.material);
        }
    }
    materials
}

/// OBJ body: one group per material, flat normals
pub fn write_obj_to<W: Write>(scene: &Scene, out: &mut W, mtllib: Option<&str>) -> Result<()> {
    let stats = scene.stats();
    let io_err = |e: io::Error| FloorPlanError::io("<obj stream>", e);

    writeln!(out, "# Generated by floorplan-to-3d (floorplan3d)").map_err(io_err)?;
    writeln!(
        out,
        "# {} walls, {} doors, {} windows, {} staircases, {} furniture",
        stats.walls, stats.doors, stats.windows, stats.staircases, stats.furniture
    )
    .map_err(io_err)?;
    writeln!(out, "# Coordinate system: Y-up (OBJ convention)").map_err(io_err)?;
    if let Some(lib) = mtllib {
        writeln!(out, "mtllib {lib}").map_err(io_err)?;
    }
    writeln!(out).map_err(io_err)?;

    let mut vertex_offset = 0usize;
    let mut normal_index = 0usize;

    for material in scene_materials(scene) {
        let name = material.name();
        writeln!(out, "g {name}").map_err(io_err)?;
        writeln!(out, "usemtl {name}").map_err(io_err)?;

        for scene_face in scene.faces_with(material) {
            let face = &scene_face.face;
            let triangles = triangulate_planar(&face.vertices)?;

            for p in &face.vertices {
                writeln!(out, "v {:.6} {:.6} {:.6}", p.x, p.z, -p.y).map_err(io_err)?;
            }
            let n = face.normal();
            writeln!(out, "vn {:.6} {:.6} {:.6}", n.x, n.z, -n.y).map_err(io_err)?;
            normal_index += 1;

            for tri in triangles.chunks_exact(3) {
                let [i0, i1, i2] = [tri[0], tri[1], tri[2]].map(|i| i + vertex_offset + 1);
                writeln!(
                    out,
                    "f {i0}//{normal_index} {i1}//{normal_index} {i2}//{normal_index}"
                )
                .map_err(io_err)?;
            }
            vertex_offset += face.vertices.len();
        }
        writeln!(out).map_err(io_err)?;
    }

    Ok(())
}

/// MTL body with diffuse colour and opacity per material
pub fn write_mtl_to<W: Write>(scene: &Scene, out: &mut W) -> io::Result<()> {
    writeln!(out, "# Generated by floorplan-to-3d (floorplan3d)")?;
    for material in scene_materials(scene) {
        let [r, g, b] = material.color().to_unit();
        writeln!(out)?;
        writeln!(out, "newmtl {}", material.name())?;
        writeln!(out, "Kd {r:.4} {g:.4} {b:.4}")?;
        writeln!(out, "d {:.2}", material.opacity())?;
        writeln!(out, "illum 1")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::scene::build_scene;
    use crate::types::FloorPlanInput;
    use floorplan3d_geometry::{Segment2, Vector3};

    fn one_wall_scene() -> Scene {
        let input = FloorPlanInput::from_walls(
            1000,
            800,
            vec![Segment2::from_coords(50.0, 50.0, 950.0, 50.0)],
        );
        build_scene(&input, &SceneConfig::default()).unwrap()
    }

    #[test]
    fn test_obj_counts() {
        let scene = one_wall_scene();
        let mut buf = Vec::new();
        write_obj_to(&scene, &mut buf, Some("scene.mtl")).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), 7 * 4);
        assert_eq!(count("vn "), 7);
        assert_eq!(count("f "), 7 * 2);
        assert_eq!(count("usemtl "), 2);
        assert!(text.contains("mtllib scene.mtl"));
    }

    #[test]
    fn test_obj_is_y_up() {
        let scene = one_wall_scene();
        let mut buf = Vec::new();
        write_obj_to(&scene, &mut buf, None).unwrap();
        let text = String::from_utf8(buf).unwrap();

        // Floor corner (15, 12, 0) maps to (15, 0, -12)
        assert!(text.contains("v 15.000000 0.000000 -12.000000"));
        let max_height = text
            .lines()
            .filter_map(|l| l.strip_prefix("v "))
            .filter_map(|l| l.split_whitespace().nth(1)?.parse::<f64>().ok())
            .fold(0.0, f64::max);
        assert_eq!(max_height, 3.0);
    }

    #[test]
    fn test_triangle_winding_matches_normals() {
        let scene = one_wall_scene();
        let mut buf = Vec::new();
        write_obj_to(&scene, &mut buf, None).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let triple = |rest: &str| -> Vector3<f64> {
            let c: Vec<f64> = rest
                .split_whitespace()
                .map(|t| t.parse().unwrap())
                .collect();
            Vector3::new(c[0], c[1], c[2])
        };
        let records = |prefix: &'static str| {
            text.lines()
                .filter_map(move |l| l.strip_prefix(prefix))
                .map(triple)
                .collect::<Vec<_>>()
        };
        let vertices = records("v ");
        let normals = records("vn ");

        let mut triangles = 0;
        for line in text.lines().filter_map(|l| l.strip_prefix("f ")) {
            let refs: Vec<(usize, usize)> = line
                .split_whitespace()
                .map(|r| {
                    let (v, n) = r.split_once("//").unwrap();
                    (v.parse().unwrap(), n.parse().unwrap())
                })
                .collect();
            let [a, b, c] = [0, 1, 2].map(|k| vertices[refs[k].0 - 1]);
            let geometric = (b - a).cross(&(c - a));
            let declared = normals[refs[0].1 - 1];
            assert!(
                geometric.dot(&declared) > 0.0,
                "face `{line}` winds against its normal"
            );
            triangles += 1;
        }
        assert_eq!(triangles, 7 * 2);
    }

    #[test]
    fn test_write_obj_creates_mtl() {
        let dir = tempfile::tempdir().unwrap();
        let obj = dir.path().join("house.obj");
        write_obj(&one_wall_scene(), &obj).unwrap();

        let mtl = std::fs::read_to_string(dir.path().join("house.mtl")).unwrap();
        assert!(mtl.contains("newmtl floor"));
        assert!(mtl.contains("newmtl wall"));
        let obj_text = std::fs::read_to_string(&obj).unwrap();
        assert!(obj_text.contains("mtllib house.mtl"));
    }
}
