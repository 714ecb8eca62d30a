// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face triangulation
//!
//! Quads and convex faces take a fan; anything else is flattened onto its own
//! plane and handed to earcutr.

use crate::{Error, Point2, Point3, Result, Vector3};

/// Check if a 2D polygon is convex (all turn directions share a sign)
fn is_convex(points: &[Point2<f64>]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut sign = 0i8;
    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];
        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > 1e-10 {
            let current = if cross > 0.0 { 1 } else { -1 };
            if sign == 0 {
                sign = current;
            } else if sign != current {
                return false;
            }
        }
    }
    true
}

fn fan_triangulate(n: usize) -> Vec<usize> {
    (1..n - 1).flat_map(|i| [0, i, i + 1]).collect()
}

/// Triangulate a simple 2D polygon, returning indices into `points`
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();
    if n < 3 {
        return Err(Error::Triangulation(format!(
            "need at least 3 points, got {}",
            n
        )));
    }

    if n <= 4 || is_convex(points) {
        return Ok(fan_triangulate(n));
    }

    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    earcutr::earcut(&flat, &[], 2).map_err(|e| Error::Triangulation(format!("{:?}", e)))
}

/// Triangulate a planar 3D polygon, returning indices into `points`
pub fn triangulate_planar(points: &[Point3<f64>]) -> Result<Vec<usize>> {
    let n = points.len();
    if n < 3 {
        return Err(Error::Triangulation(format!(
            "need at least 3 points, got {}",
            n
        )));
    }
    if n <= 4 {
        return Ok(fan_triangulate(n));
    }
    let normal = calculate_polygon_normal(points);
    let flat = project_to_plane(points, &normal);
    triangulate_polygon(&flat)
}

/// Express 3D points in a 2D basis spanning the plane with the given normal
pub fn project_to_plane(points: &[Point3<f64>], normal: &Vector3<f64>) -> Vec<Point2<f64>> {
    let Some(origin) = points.first() else {
        return Vec::new();
    };

    // Reference axis least parallel to the normal keeps the cross product stable
    let reference = if normal.x.abs() <= normal.y.abs() && normal.x.abs() <= normal.z.abs() {
        Vector3::x()
    } else if normal.y.abs() <= normal.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let u = normal.cross(&reference).normalize();
    let v = normal.cross(&u).normalize();

    points
        .iter()
        .map(|p| {
            let d = p - origin;
            Point2::new(d.dot(&u), d.dot(&v))
        })
        .collect()
}

/// Unit normal of a polygon following its winding
///
/// Newell's method, so slightly non-planar or partly collinear input still
/// gets a sensible answer. Degenerate polygons report +Z.
pub fn calculate_polygon_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let n = points.len();
    if n < 3 {
        return Vector3::z();
    }

    let mut normal = Vector3::<f64>::zeros();
    for i in 0..n {
        let current = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    let len = normal.norm();
    if len > 1e-10 {
        normal / len
    } else {
        Vector3::z()
    }
}
