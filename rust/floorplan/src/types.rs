// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plan input
//!
//! Everything here is in source units: image pixels for detector output,
//! canvas units for editor output. The normalizer maps it to meters.

use crate::furniture::FurnitureKind;
use floorplan3d_geometry::Segment2;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Raw line segment reported by a wall detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedSegment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl DetectedSegment {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// `(x1, y1, x2, y2)`
    pub fn to_coords(&self) -> (f64, f64, f64, f64) {
        (self.start.x, self.start.y, self.end.x, self.end.y)
    }

    pub fn to_segment(&self) -> Segment2 {
        Segment2::new(self.start, self.end)
    }
}

/// Axis-aligned rectangle with `min <= max` on both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect2 {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Rect2 {
    /// Rectangle spanned by two opposite corners in any order
    pub fn from_corners(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn contains(&self, p: &Point2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grow every side by `margin`
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Point2::new(self.min.x - margin, self.min.y - margin),
            max: Point2::new(self.max.x + margin, self.max.y + margin),
        }
    }

    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            min: Point2::from(self.min.coords * scale),
            max: Point2::from(self.max.coords * scale),
        }
    }

    /// The four sides as segments: top, bottom, left, right
    pub fn sides(&self) -> [Segment2; 4] {
        let (x1, y1, x2, y2) = (self.min.x, self.min.y, self.max.x, self.max.y);
        [
            Segment2::from_coords(x1, y1, x2, y1),
            Segment2::from_coords(x1, y2, x2, y2),
            Segment2::from_coords(x1, y1, x1, y2),
            Segment2::from_coords(x2, y1, x2, y2),
        ]
    }
}

/// Primary axis a staircase climbs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StairDirection {
    Horizontal,
    Vertical,
}

impl StairDirection {
    /// Horizontal when the rectangle is wider than tall
    pub fn of(rect: &Rect2) -> Self {
        if rect.width() > rect.height() {
            StairDirection::Horizontal
        } else {
            StairDirection::Vertical
        }
    }
}

/// Door anchored at a point; width in source units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorSpec {
    pub anchor: Point2<f64>,
    pub width: f64,
}

/// Window anchored at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub anchor: Point2<f64>,
}

/// Staircase bounding rectangle; direction is derived from its shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairSpec {
    pub rect: Rect2,
}

impl StairSpec {
    pub fn direction(&self) -> StairDirection {
        StairDirection::of(&self.rect)
    }
}

/// Furniture item centered at `anchor`; footprint comes from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FurnitureSpec {
    pub kind: FurnitureKind,
    pub anchor: Point2<f64>,
    /// Always 0; boxes are emitted axis-aligned
    #[serde(default)]
    pub rotation: f64,
}

/// Everything the scene builder consumes, in source units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanInput {
    /// Source image (or canvas) width
    pub image_width: u32,
    /// Source image (or canvas) height
    pub image_height: u32,
    pub walls: Vec<Segment2>,
    #[serde(default)]
    pub doors: Vec<DoorSpec>,
    #[serde(default)]
    pub windows: Vec<WindowSpec>,
    #[serde(default)]
    pub staircases: Vec<StairSpec>,
    #[serde(default)]
    pub furniture: Vec<FurnitureSpec>,
}

impl FloorPlanInput {
    /// Plan with walls only, as produced by a detector run
    pub fn from_walls(image_width: u32, image_height: u32, walls: Vec<Segment2>) -> Self {
        Self {
            image_width,
            image_height,
            walls,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_corners_orders_axes() {
        let rect = Rect2::from_corners(Point2::new(10.0, 2.0), Point2::new(4.0, 8.0));
        assert_eq!(rect.min, Point2::new(4.0, 2.0));
        assert_eq!(rect.max, Point2::new(10.0, 8.0));
        assert_eq!(rect.width(), 6.0);
        assert_eq!(rect.height(), 6.0);
    }

    #[test]
    fn test_stair_direction() {
        let wide = Rect2::from_corners(Point2::new(0.0, 0.0), Point2::new(100.0, 40.0));
        let tall = Rect2::from_corners(Point2::new(0.0, 0.0), Point2::new(40.0, 100.0));
        let square = Rect2::from_corners(Point2::new(0.0, 0.0), Point2::new(60.0, 60.0));
        assert_eq!(StairDirection::of(&wide), StairDirection::Horizontal);
        assert_eq!(StairDirection::of(&tall), StairDirection::Vertical);
        assert_eq!(StairDirection::of(&square), StairDirection::Vertical);
    }

    #[test]
    fn test_rect_sides_cover_rectangle() {
        let rect = Rect2::from_corners(Point2::new(0.0, 0.0), Point2::new(40.0, 20.0));
        let sides = rect.sides();
        assert_eq!(sides[0].to_coords(), (0.0, 0.0, 40.0, 0.0));
        assert_eq!(sides[3].to_coords(), (40.0, 0.0, 40.0, 20.0));
    }

    #[test]
    fn test_detected_line_coords() {
        let line = DetectedSegment::from_coords(50.0, 50.0, 950.0, 50.0);
        assert_eq!(line.length(), 900.0);
        assert_eq!(line.to_segment().to_coords(), (50.0, 50.0, 950.0, 50.0));
    }
}
