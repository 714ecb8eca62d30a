// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid snapping applied at commit time

use floorplan3d::Rect2;
use nalgebra::Point2;

/// Round to the nearest multiple of `grid` (ties away from zero)
#[inline]
pub fn snap(value: f64, grid: f64) -> f64 {
    (value / grid).round() * grid
}

#[inline]
pub fn snap_point(p: Point2<f64>, grid: f64) -> Point2<f64> {
    Point2::new(snap(p.x, grid), snap(p.y, grid))
}

/// Normalized rectangle spanned by two pointer positions, corners snapped
pub fn snap_rect(a: Point2<f64>, b: Point2<f64>, grid: f64) -> Rect2 {
    let rect = Rect2::from_corners(a, b);
    Rect2::from_corners(snap_point(rect.min, grid), snap_point(rect.max, grid))
}

pub fn is_on_grid(value: f64, grid: f64) -> bool {
    snap(value, grid) == value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_to_nearest() {
        assert_eq!(snap(29.0, 20.0), 20.0);
        assert_eq!(snap(31.0, 20.0), 40.0);
        assert_eq!(snap(30.0, 20.0), 40.0);
        assert_eq!(snap(-9.0, 20.0), 0.0);
        assert_eq!(snap(-11.0, 20.0), -20.0);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for grid in [20.0, 10.0, 0.1, 7.5] {
            let mut x = -1000.0;
            while x < 1000.0 {
                let once = snap(x, grid);
                assert_eq!(snap(once, grid), once, "x = {x}, grid = {grid}");
                assert!(is_on_grid(once, grid));
                x += 0.37;
            }
        }
    }

    #[test]
    fn test_snap_rect_orders_corners() {
        let rect = snap_rect(Point2::new(205.0, 98.0), Point2::new(41.0, 12.0), 20.0);
        assert_eq!(rect.min, Point2::new(40.0, 20.0));
        assert_eq!(rect.max, Point2::new(200.0, 100.0));
    }
}
