// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floorplan3D geometry primitives
//!
//! The plane geometry kernel (segments, clamped projection), planar faces,
//! footprint extrusion into six-face prisms and triangulation of faces into
//! a renderable mesh.

pub mod error;
pub mod extrusion;
pub mod face;
pub mod kernel;
pub mod mesh;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use error::{Error, Result};
pub use extrusion::{
    axis_aligned_box, extrude_footprint, oriented_box, segment_footprint, vertical_quad, BoxFace,
};
pub use face::Face;
pub use kernel::{
    distance_to_segment, nearest_segment, project_point_onto_segment, rot90, Projection,
    Segment2,
};
pub use mesh::Mesh;
pub use triangulation::{calculate_polygon_normal, triangulate_planar, triangulate_polygon};
