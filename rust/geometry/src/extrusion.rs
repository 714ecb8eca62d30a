// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion of 2D footprints into faceted prisms
//!
//! A footprint is four corners in the XY plane. Extruding it between two
//! heights gives eight vertices (`0..4` at the bottom, `4..8` on top) and six
//! quads in a fixed order, see [`BoxFace`].

use crate::face::Face;
use crate::kernel::Segment2;
use nalgebra::{Point2, Point3};

/// The six faces of an extruded footprint, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxFace {
    Bottom,
    Top,
    Front,
    Back,
    Left,
    Right,
}

impl BoxFace {
    pub const ALL: [BoxFace; 6] = [
        BoxFace::Bottom,
        BoxFace::Top,
        BoxFace::Front,
        BoxFace::Back,
        BoxFace::Left,
        BoxFace::Right,
    ];

    /// Vertex indices into the 8-vertex prism
    pub const fn indices(self) -> [usize; 4] {
        match self {
            BoxFace::Bottom => [0, 1, 2, 3],
            BoxFace::Top => [4, 5, 6, 7],
            BoxFace::Front => [0, 1, 5, 4],
            BoxFace::Back => [2, 3, 7, 6],
            BoxFace::Left => [0, 3, 7, 4],
            BoxFace::Right => [1, 2, 6, 5],
        }
    }

    /// The face on the other side of the prism
    pub const fn opposite(self) -> BoxFace {
        match self {
            BoxFace::Bottom => BoxFace::Top,
            BoxFace::Top => BoxFace::Bottom,
            BoxFace::Front => BoxFace::Back,
            BoxFace::Back => BoxFace::Front,
            BoxFace::Left => BoxFace::Right,
            BoxFace::Right => BoxFace::Left,
        }
    }
}

/// Extrude a four-corner footprint between `z0` and `z1`
pub fn extrude_footprint(corners: [Point2<f64>; 4], z0: f64, z1: f64) -> [Face; 6] {
    let vertex = |i: usize| {
        let c = corners[i % 4];
        Point3::new(c.x, c.y, if i < 4 { z0 } else { z1 })
    };
    BoxFace::ALL.map(|face| {
        let [a, b, c, d] = face.indices();
        Face::quad(vertex(a), vertex(b), vertex(c), vertex(d))
    })
}

/// Footprint of a segment thickened symmetrically about its centerline
///
/// Corners run `start + p`, `end + p`, `end - p`, `start - p` where `p` is the
/// perpendicular offset of half the thickness. `None` for zero-length input.
pub fn segment_footprint(segment: &Segment2, thickness: f64) -> Option<[Point2<f64>; 4]> {
    let p = segment.perpendicular_offset(thickness / 2.0)?;
    Some([
        segment.start + p,
        segment.end + p,
        segment.end - p,
        segment.start - p,
    ])
}

/// Prism whose long axis follows `segment`
pub fn oriented_box(segment: &Segment2, thickness: f64, z0: f64, z1: f64) -> Option<[Face; 6]> {
    segment_footprint(segment, thickness).map(|corners| extrude_footprint(corners, z0, z1))
}

/// Axis-aligned prism spanning `min`..`max`
pub fn axis_aligned_box(min: Point3<f64>, max: Point3<f64>) -> [Face; 6] {
    extrude_footprint(
        [
            Point2::new(min.x, min.y),
            Point2::new(max.x, min.y),
            Point2::new(max.x, max.y),
            Point2::new(min.x, max.y),
        ],
        min.z,
        max.z,
    )
}

/// Vertical quad standing on the edge `a`..`b`, spanning `z0`..`z1`
pub fn vertical_quad(a: Point2<f64>, b: Point2<f64>, z0: f64, z1: f64) -> Face {
    Face::quad(
        Point3::new(a.x, a.y, z0),
        Point3::new(b.x, b.y, z0),
        Point3::new(b.x, b.y, z1),
        Point3::new(a.x, a.y, z1),
    )
}
