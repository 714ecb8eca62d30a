// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity records owned by the editor model
//!
//! Records hold canvas-unit geometry only; screen primitives are derived from
//! them by [`crate::projection`].

use floorplan3d::{FurnitureKind, Rect2, StairDirection, StairParams};
use floorplan3d_geometry::Segment2;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Wall {
    pub fn segment(&self) -> Segment2 {
        Segment2::new(self.start, self.end)
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Decorative room outline; its walls are independent [`Wall`] records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub rect: Rect2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub anchor: Point2<f64>,
    pub width: f64,
}

impl Door {
    /// Centers of the left and right resize handles
    pub fn handle_centers(&self) -> [Point2<f64>; 2] {
        let half = self.width / 2.0;
        [
            Point2::new(self.anchor.x - half, self.anchor.y),
            Point2::new(self.anchor.x + half, self.anchor.y),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub anchor: Point2<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Staircase {
    pub rect: Rect2,
}

impl Staircase {
    pub fn direction(&self) -> StairDirection {
        StairDirection::of(&self.rect)
    }

    pub fn step_count(&self, params: &StairParams) -> usize {
        params.step_count(self.rect.width(), self.rect.height())
    }

    /// Interior dividing lines between consecutive steps
    pub fn step_lines(&self, params: &StairParams) -> Vec<Segment2> {
        let steps = self.step_count(params);
        let r = &self.rect;
        (1..steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                match self.direction() {
                    StairDirection::Horizontal => {
                        let x = r.min.x + t * r.width();
                        Segment2::from_coords(x, r.min.y, x, r.max.y)
                    }
                    StairDirection::Vertical => {
                        let y = r.min.y + t * r.height();
                        Segment2::from_coords(r.min.x, y, r.max.x, y)
                    }
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    pub kind: FurnitureKind,
    pub anchor: Point2<f64>,
    /// Always 0; carried for the document format
    #[serde(default)]
    pub rotation: f64,
}

impl FurnitureItem {
    pub fn new(kind: FurnitureKind, anchor: Point2<f64>) -> Self {
        Self {
            kind,
            anchor,
            rotation: 0.0,
        }
    }

    /// Catalog footprint centered on the anchor
    pub fn footprint(&self) -> Rect2 {
        footprint_at(self.kind, self.anchor)
    }
}

pub(crate) fn footprint_at(kind: FurnitureKind, anchor: Point2<f64>) -> Rect2 {
    let (w, h) = kind.footprint();
    Rect2::from_corners(
        Point2::new(anchor.x - w / 2.0, anchor.y - h / 2.0),
        Point2::new(anchor.x + w / 2.0, anchor.y + h / 2.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stair(w: f64, h: f64) -> Staircase {
        Staircase {
            rect: Rect2::from_corners(Point2::new(0.0, 0.0), Point2::new(w, h)),
        }
    }

    #[test]
    fn test_editor_step_count_clamps() {
        assert_eq!(stair(150.0, 40.0).step_count(&StairParams::EDITOR), 10);
        assert_eq!(stair(400.0, 40.0).step_count(&StairParams::EDITOR), 10);
        assert_eq!(stair(45.0, 40.0).step_count(&StairParams::EDITOR), 3);
        assert_eq!(stair(40.0, 90.0).step_count(&StairParams::EDITOR), 6);
    }

    #[test]
    fn test_step_lines_follow_long_axis() {
        let lines = stair(90.0, 40.0).step_lines(&StairParams::EDITOR);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], Segment2::from_coords(15.0, 0.0, 15.0, 40.0));

        let lines = stair(40.0, 60.0).step_lines(&StairParams::EDITOR);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.start.x == 0.0 && l.end.x == 40.0));
    }

    #[test]
    fn test_door_handles_straddle_anchor() {
        let door = Door {
            anchor: Point2::new(100.0, 60.0),
            width: 30.0,
        };
        let [left, right] = door.handle_centers();
        assert_eq!(left, Point2::new(85.0, 60.0));
        assert_eq!(right, Point2::new(115.0, 60.0));
    }

    #[test]
    fn test_furniture_footprint() {
        let item = FurnitureItem::new(FurnitureKind::Sofa, Point2::new(100.0, 100.0));
        let rect = item.footprint();
        assert_eq!(rect.min, Point2::new(60.0, 80.0));
        assert_eq!(rect.max, Point2::new(140.0, 120.0));
    }
}
