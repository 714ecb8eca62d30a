// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D segment primitives
//!
//! Everything the extrusion stages need from plane geometry: segment length,
//! unit direction, perpendicular offsets and the clamped nearest-point
//! projection that binds openings to walls.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Segments shorter than this are treated as zero-length.
pub const DEGENERATE_LENGTH: f64 = 1e-10;

/// A straight 2D segment between two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment2 {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Segment2 {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    /// Build a segment from an `(x1, y1, x2, y2)` tuple
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: Point2::new(x1, y1),
            end: Point2::new(x2, y2),
        }
    }

    /// Endpoints as an `(x1, y1, x2, y2)` tuple
    pub fn to_coords(&self) -> (f64, f64, f64, f64) {
        (self.start.x, self.start.y, self.end.x, self.end.y)
    }

    #[inline]
    pub fn vector(&self) -> Vector2<f64> {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length() < DEGENERATE_LENGTH
    }

    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Unit vector from start to end, `None` for zero-length segments
    pub fn direction(&self) -> Option<Vector2<f64>> {
        let v = self.vector();
        let len = v.norm();
        (len >= DEGENERATE_LENGTH).then(|| v / len)
    }

    /// Unit normal: the direction rotated by +90°
    pub fn normal(&self) -> Option<Vector2<f64>> {
        self.direction().map(rot90)
    }

    /// Perpendicular offset vector of the given length
    ///
    /// For a wall of thickness `T` this is called with `T / 2` and the two
    /// long faces sit at `±offset` from the centerline.
    pub fn perpendicular_offset(&self, length: f64) -> Option<Vector2<f64>> {
        self.normal().map(|n| n * length)
    }

    /// Multiply both endpoints by a uniform scale factor
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            start: Point2::from(self.start.coords * scale),
            end: Point2::from(self.end.coords * scale),
        }
    }

    /// Axis-aligned bounds as `(min, max)`
    pub fn bounds(&self) -> (Point2<f64>, Point2<f64>) {
        (
            Point2::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            Point2::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }
}

/// Rotate a vector counter-clockwise by 90°
#[inline]
pub fn rot90(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

/// Result of projecting a point onto a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Closest point on the segment
    pub point: Point2<f64>,
    /// Unit normal of the segment (direction rotated +90°)
    pub normal: Vector2<f64>,
    /// Unit direction of the segment
    pub direction: Vector2<f64>,
    /// Distance from the segment start to `point`, in `[0, length]`
    pub along: f64,
    /// Distance from the query point to `point`
    pub distance: f64,
}

/// Closest point on segment `AB` to `P`, clamped to the segment
///
/// Returns `None` for a zero-length segment; callers skip those.
pub fn project_point_onto_segment(p: &Point2<f64>, segment: &Segment2) -> Option<Projection> {
    let length = segment.length();
    if length < DEGENERATE_LENGTH {
        return None;
    }
    let direction = segment.vector() / length;

    let along = (p - segment.start).dot(&direction).clamp(0.0, length);
    let point = segment.start + direction * along;

    Some(Projection {
        point,
        normal: rot90(direction),
        direction,
        along,
        distance: (p - point).norm(),
    })
}

/// Distance from a point to a segment; falls back to the start point for
/// zero-length segments
pub fn distance_to_segment(p: &Point2<f64>, segment: &Segment2) -> f64 {
    project_point_onto_segment(p, segment)
        .map(|proj| proj.distance)
        .unwrap_or_else(|| (p - segment.start).norm())
}

/// Index and projection of the segment closest to `p`
///
/// Degenerate segments are never selected. On ties the earliest segment wins.
pub fn nearest_segment(p: &Point2<f64>, segments: &[Segment2]) -> Option<(usize, Projection)> {
    segments
        .iter()
        .enumerate()
        .filter_map(|(i, s)| project_point_onto_segment(p, s).map(|proj| (i, proj)))
        .fold(None, |best: Option<(usize, Projection)>, (i, proj)| match best {
            Some((_, b)) if b.distance <= proj.distance => best,
            _ => Some((i, proj)),
        })
}
