// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall extrusion

use floorplan3d_geometry::{oriented_box, Face, Segment2};

/// Extrude a wall centerline into an oriented box
///
/// The box's long axis follows the segment, its short axis is `thickness`
/// centered on the segment and it spans `z` from 0 to `height`. A zero-length
/// segment gives `None` and is skipped by the scene builder.
pub fn extrude_wall(segment: &Segment2, height: f64, thickness: f64) -> Option<[Face; 6]> {
    let faces = oriented_box(segment, thickness, 0.0, height);
    if faces.is_none() {
        tracing::trace!(?segment, "skipping zero-length wall");
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use floorplan3d_geometry::BoxFace;

    #[test]
    fn test_wall_box_has_six_planar_quads() {
        let seg = Segment2::from_coords(0.75, 0.75, 14.25, 0.75);
        let faces = extrude_wall(&seg, 3.0, 0.2).unwrap();

        assert_eq!(faces.len(), 6);
        for face in &faces {
            assert_eq!(face.len(), 4);
            assert!(face.is_planar(1e-9));
        }
    }

    #[test]
    fn test_wall_box_vertices() {
        let seg = Segment2::from_coords(0.0, 0.0, 4.0, 0.0);
        let faces = extrude_wall(&seg, 3.0, 0.2).unwrap();
        let bottom = &faces[BoxFace::Bottom as usize];

        // start + p, end + p, end - p, start - p with p = (0, 0.1)
        let expected = [(0.0, 0.1), (4.0, 0.1), (4.0, -0.1), (0.0, -0.1)];
        for (v, (x, y)) in bottom.vertices.iter().zip(expected) {
            assert_relative_eq!(v.x, x, epsilon = 1e-12);
            assert_relative_eq!(v.y, y, epsilon = 1e-12);
            assert_relative_eq!(v.z, 0.0);
        }

        let top = &faces[BoxFace::Top as usize];
        assert!(top.vertices.iter().all(|v| v.z == 3.0));
    }

    #[test]
    fn test_opposite_faces_are_congruent() {
        let seg = Segment2::from_coords(1.0, 2.0, 4.0, 6.0);
        let faces = extrude_wall(&seg, 2.5, 0.3).unwrap();

        for face in BoxFace::ALL {
            let a = &faces[face as usize];
            let b = &faces[face.opposite() as usize];
            assert_relative_eq!(a.area(), b.area(), epsilon = 1e-9);

            let mut la = a.edge_lengths().to_vec();
            let mut lb = b.edge_lengths().to_vec();
            la.sort_by(f64::total_cmp);
            lb.sort_by(f64::total_cmp);
            for (x, y) in la.iter().zip(&lb) {
                assert_relative_eq!(*x, *y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_long_faces_follow_segment() {
        let seg = Segment2::from_coords(1.0, 2.0, 4.0, 6.0);
        let faces = extrude_wall(&seg, 2.5, 0.3).unwrap();
        assert_relative_eq!(faces[BoxFace::Front as usize].area(), 5.0 * 2.5, epsilon = 1e-9);
        assert_relative_eq!(faces[BoxFace::Left as usize].area(), 0.3 * 2.5, epsilon = 1e-9);
        assert_relative_eq!(faces[BoxFace::Bottom as usize].area(), 5.0 * 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_length_wall_is_skipped() {
        let seg = Segment2::from_coords(2.0, 2.0, 2.0, 2.0);
        assert!(extrude_wall(&seg, 3.0, 0.2).is_none());
    }
}
