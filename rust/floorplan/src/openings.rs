// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door and window placement on the nearest wall
//!
//! An anchor is projected onto every wall and bound to the closest one. The
//! opening quad is built in that wall's local frame: along its direction `d`
//! and pushed out along its normal `n` by half the wall thickness so it sits
//! on the outer face.

use crate::config::OpeningConfig;
use crate::types::{DoorSpec, WindowSpec};
use floorplan3d_geometry::{nearest_segment, vertical_quad, Face, Projection, Segment2};
use nalgebra::{Point2, Vector2};
use std::f64::consts::FRAC_PI_4;

/// Fixed opening angle of a door leaf
pub const DOOR_OPEN_ANGLE: f64 = FRAC_PI_4;

/// Door geometry snapped onto a wall
#[derive(Debug, Clone, PartialEq)]
pub struct DoorGeometry {
    /// Index of the host wall in the wall list
    pub wall: usize,
    /// Opening width after clamping, in meters
    pub width: f64,
    pub opening: Face,
    /// Half-open leaf hinged at the opening's first edge
    pub panel: Face,
}

/// Window geometry snapped onto a wall
#[derive(Debug, Clone, PartialEq)]
pub struct WindowGeometry {
    pub wall: usize,
    pub opening: Face,
    /// Frame quad standing proud of the opening
    pub frame: Face,
}

/// Snaps opening anchors onto a fixed set of normalized walls
pub struct OpeningPlacer<'a> {
    walls: &'a [Segment2],
    wall_thickness: f64,
    config: &'a OpeningConfig,
}

impl<'a> OpeningPlacer<'a> {
    pub fn new(walls: &'a [Segment2], wall_thickness: f64, config: &'a OpeningConfig) -> Self {
        Self {
            walls,
            wall_thickness,
            config,
        }
    }

    /// Closest wall to `anchor` and the projection onto it
    ///
    /// `None` when there are no usable walls or the anchor is farther than
    /// `max_snap_distance` from all of them.
    pub fn snap(&self, anchor: &Point2<f64>) -> Option<(usize, Projection)> {
        let Some((wall, proj)) = nearest_segment(anchor, self.walls) else {
            tracing::trace!(?anchor, "no wall to host opening, dropping it");
            return None;
        };
        if let Some(limit) = self.config.max_snap_distance {
            if proj.distance > limit {
                tracing::warn!(
                    x = anchor.x,
                    y = anchor.y,
                    distance = proj.distance,
                    limit,
                    "opening too far from any wall, rejected"
                );
                return None;
            }
        }
        Some((wall, proj))
    }

    /// Door opening plus its half-open panel; `spec.width` is in meters
    pub fn place_door(&self, spec: &DoorSpec) -> Option<DoorGeometry> {
        let (wall, proj) = self.snap(&spec.anchor)?;
        let width = self.config.door_width(spec.width);
        let height = self.config.door_height;

        let center = proj.point + proj.normal * (self.wall_thickness / 2.0);
        let (hinge, far) = span(center, proj.direction, width);
        let opening = vertical_quad(hinge, far, 0.0, height);

        let leaf = proj.direction * DOOR_OPEN_ANGLE.cos() + proj.normal * DOOR_OPEN_ANGLE.sin();
        let panel = vertical_quad(hinge, hinge + leaf * width, 0.0, height);

        Some(DoorGeometry {
            wall,
            width,
            opening,
            panel,
        })
    }

    /// Window opening plus its frame
    pub fn place_window(&self, spec: &WindowSpec) -> Option<WindowGeometry> {
        let (wall, proj) = self.snap(&spec.anchor)?;
        let cfg = self.config;
        let (z0, z1) = (cfg.window_sill, cfg.window_sill + cfg.window_height);

        let half_t = self.wall_thickness / 2.0;
        let center = proj.point + proj.normal * half_t;
        let (a, b) = span(center, proj.direction, cfg.window_width);
        let opening = vertical_quad(a, b, z0, z1);

        let frame_center = proj.point + proj.normal * (half_t + cfg.frame_thickness);
        let (a, b) = span(frame_center, proj.direction, cfg.window_width);
        let frame = vertical_quad(a, b, z0, z1);

        Some(WindowGeometry {
            wall,
            opening,
            frame,
        })
    }
}

/// Endpoints of a span of `width` centered on `center` along `direction`
fn span(center: Point2<f64>, direction: Vector2<f64>, width: f64) -> (Point2<f64>, Point2<f64>) {
    let half = direction * (width / 2.0);
    (center - half, center + half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn walls() -> Vec<Segment2> {
        vec![
            Segment2::from_coords(0.0, 0.0, 10.0, 0.0),
            Segment2::from_coords(10.0, 0.0, 10.0, 8.0),
        ]
    }

    #[test]
    fn test_door_snaps_to_nearest_wall() {
        let walls = walls();
        let config = OpeningConfig::default();
        let placer = OpeningPlacer::new(&walls, 0.2, &config);

        let door = placer
            .place_door(&DoorSpec {
                anchor: Point2::new(4.0, 0.5),
                width: 0.9,
            })
            .unwrap();

        assert_eq!(door.wall, 0);
        assert_relative_eq!(door.width, 0.9);

        // Normal of a +X wall is +Y, so the quad sits at y = 0.1
        let v = &door.opening.vertices;
        assert_relative_eq!(v[0].x, 3.55, epsilon = 1e-12);
        assert_relative_eq!(v[1].x, 4.45, epsilon = 1e-12);
        assert!(v.iter().all(|p| (p.y - 0.1).abs() < 1e-12));
        assert_relative_eq!(v[2].z, 2.1);
    }

    #[test]
    fn test_door_width_clamped() {
        let walls = walls();
        let config = OpeningConfig::default();
        let placer = OpeningPlacer::new(&walls, 0.2, &config);

        let narrow = placer
            .place_door(&DoorSpec {
                anchor: Point2::new(4.0, 0.0),
                width: 0.1,
            })
            .unwrap();
        let wide = placer
            .place_door(&DoorSpec {
                anchor: Point2::new(4.0, 0.0),
                width: 5.0,
            })
            .unwrap();
        assert_eq!(narrow.width, 0.6);
        assert_eq!(wide.width, 1.2);
    }

    #[test]
    fn test_panel_hinged_at_first_edge_and_open_45() {
        let walls = walls();
        let config = OpeningConfig::default();
        let placer = OpeningPlacer::new(&walls, 0.2, &config);

        let door = placer
            .place_door(&DoorSpec {
                anchor: Point2::new(5.0, -1.0),
                width: 1.0,
            })
            .unwrap();

        let hinge = door.opening.vertices[0];
        let panel = &door.panel.vertices;
        assert_eq!(panel[0], hinge);

        let leaf = panel[1] - panel[0];
        assert_relative_eq!(leaf.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(leaf.x, leaf.y, epsilon = 1e-12);
        assert!(leaf.y > 0.0);
    }

    #[test]
    fn test_door_on_vertical_wall_uses_wall_frame() {
        let walls = walls();
        let config = OpeningConfig::default();
        let placer = OpeningPlacer::new(&walls, 0.2, &config);

        let door = placer
            .place_door(&DoorSpec {
                anchor: Point2::new(9.5, 4.0),
                width: 1.0,
            })
            .unwrap();

        assert_eq!(door.wall, 1);
        // Direction +Y, normal -X: opening at x = 9.9 spanning y 3.5..4.5
        let v = &door.opening.vertices;
        assert!(v.iter().all(|p| (p.x - 9.9).abs() < 1e-12));
        assert_relative_eq!(v[0].y, 3.5, epsilon = 1e-12);
        assert_relative_eq!(v[1].y, 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_window_and_frame_offsets() {
        let walls = walls();
        let config = OpeningConfig::default();
        let placer = OpeningPlacer::new(&walls, 0.2, &config);

        let window = placer
            .place_window(&WindowSpec {
                anchor: Point2::new(3.0, 2.0),
            })
            .unwrap();

        let (min, max) = window.opening.bounds();
        assert_relative_eq!(min.x, 2.4, epsilon = 1e-12);
        assert_relative_eq!(max.x, 3.6, epsilon = 1e-12);
        assert_relative_eq!(min.y, 0.1, epsilon = 1e-12);
        assert_relative_eq!(min.z, 0.9);
        assert_relative_eq!(max.z, 2.1, epsilon = 1e-12);

        let (fmin, _) = window.frame.bounds();
        assert_relative_eq!(fmin.y, 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_no_walls_drops_opening() {
        let config = OpeningConfig::default();
        let placer = OpeningPlacer::new(&[], 0.2, &config);
        assert!(placer
            .place_window(&WindowSpec {
                anchor: Point2::new(1.0, 1.0)
            })
            .is_none());
    }

    #[test]
    fn test_degenerate_walls_are_ignored() {
        let walls = vec![
            Segment2::from_coords(1.0, 1.0, 1.0, 1.0),
            Segment2::from_coords(0.0, 5.0, 10.0, 5.0),
        ];
        let config = OpeningConfig::default();
        let placer = OpeningPlacer::new(&walls, 0.2, &config);
        let (wall, _) = placer.snap(&Point2::new(1.0, 1.0)).unwrap();
        assert_eq!(wall, 1);
    }

    #[test]
    fn test_far_anchor_binds_without_limit() {
        let walls = walls();
        let config = OpeningConfig::default();
        let placer = OpeningPlacer::new(&walls, 0.2, &config);
        assert!(placer.snap(&Point2::new(-50.0, -50.0)).is_some());
    }

    #[test]
    fn test_snap_limit_rejects_far_anchor() {
        let walls = walls();
        let config = OpeningConfig {
            max_snap_distance: Some(1.0),
            ..Default::default()
        };
        let placer = OpeningPlacer::new(&walls, 0.2, &config);
        assert!(placer.snap(&Point2::new(5.0, 0.8)).is_some());
        assert!(placer.snap(&Point2::new(5.0, 3.0)).is_none());
    }
}
