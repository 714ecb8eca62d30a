// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar polygon faces

use crate::triangulation::calculate_polygon_normal;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A planar polygon in 3D, vertices in winding order
///
/// Almost every face the pipeline emits is a quad, so four vertices live
/// inline without a heap allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub vertices: SmallVec<[Point3<f64>; 4]>,
}

impl Face {
    pub fn new(vertices: impl IntoIterator<Item = Point3<f64>>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
        }
    }

    /// Four-vertex face
    pub fn quad(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>, d: Point3<f64>) -> Self {
        Self {
            vertices: SmallVec::from_buf([a, b, c, d]),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Unit normal following the vertex winding
    pub fn normal(&self) -> Vector3<f64> {
        calculate_polygon_normal(&self.vertices)
    }

    pub fn centroid(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Polygon area (Newell's method, valid for any planar polygon)
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = Vector3::zeros();
        for i in 0..n {
            let a = self.vertices[i].coords;
            let b = self.vertices[(i + 1) % n].coords;
            acc += a.cross(&b);
        }
        acc.norm() / 2.0
    }

    /// Whether every vertex lies within `tolerance` of the face plane
    pub fn is_planar(&self, tolerance: f64) -> bool {
        if self.vertices.len() <= 3 {
            return true;
        }
        let normal = self.normal();
        let origin = self.vertices[0];
        self.vertices
            .iter()
            .all(|p| (p - origin).dot(&normal).abs() <= tolerance)
    }

    /// Edge lengths in winding order (last edge closes the loop)
    pub fn edge_lengths(&self) -> SmallVec<[f64; 4]> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| (self.vertices[(i + 1) % n] - self.vertices[i]).norm())
            .collect()
    }

    /// Axis-aligned bounds as `(min, max)`
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);
        for p in &self.vertices {
            min = min.inf(p);
            max = max.sup(p);
        }
        (min, max)
    }

    /// Copy of this face translated by `offset`
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| p + offset).collect(),
        }
    }
}
