// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synthetic four-room floor plan for demos and tests

use crate::draw::{draw_rect_outline, draw_thick_line, rgb};
use crate::material::palette;
use crate::types::Rect2;
use image::RgbImage;
use nalgebra::Point2;

pub const SAMPLE_WIDTH: u32 = 1000;
pub const SAMPLE_HEIGHT: u32 = 800;

/// 1000x800 plan: an outer rectangle and three interior walls
///
/// The vertical wall at x = 500 splits the plan; the left half is divided at
/// y = 400 and the right half at y = 300.
pub fn sample_floor_plan() -> RgbImage {
    let mut img = RgbImage::from_pixel(SAMPLE_WIDTH, SAMPLE_HEIGHT, rgb(palette::WHITE));

    let outer = Rect2::from_corners(Point2::new(50.0, 50.0), Point2::new(950.0, 750.0));
    draw_rect_outline(&mut img, &outer, 8.0, palette::BLACK);

    let interior = [
        ((500.0, 50.0), (500.0, 750.0)),
        ((50.0, 400.0), (500.0, 400.0)),
        ((500.0, 300.0), (950.0, 300.0)),
    ];
    for ((x1, y1), (x2, y2)) in interior {
        draw_thick_line(&mut img, Point2::new(x1, y1), Point2::new(x2, y2), 6.0, palette::BLACK);
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_layout() {
        let img = sample_floor_plan();
        assert_eq!(img.dimensions(), (1000, 800));

        let black = rgb(palette::BLACK);
        let white = rgb(palette::WHITE);
        assert_eq!(*img.get_pixel(50, 400), black);
        assert_eq!(*img.get_pixel(500, 600), black);
        assert_eq!(*img.get_pixel(700, 300), black);
        assert_eq!(*img.get_pixel(250, 200), white);
        assert_eq!(*img.get_pixel(10, 10), white);
    }
}
