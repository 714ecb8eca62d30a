// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raster drawing helpers for plan images

use crate::material::Color;
use crate::types::Rect2;
use floorplan3d_geometry::{segment_footprint, Segment2};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use nalgebra::Point2;

pub fn rgb(color: Color) -> Rgb<u8> {
    Rgb([color.r, color.g, color.b])
}

/// Line of the given pixel width centered on `a`..`b`
pub fn draw_thick_line(
    img: &mut RgbImage,
    a: Point2<f64>,
    b: Point2<f64>,
    width: f64,
    color: Color,
) {
    let segment = Segment2::new(a, b);
    let corners = segment_footprint(&segment, width).map(|c| c.map(to_pixel));

    match corners {
        Some(poly) if width >= 1.5 && poly[0] != poly[3] && poly[0] != poly[1] => {
            draw_polygon_mut(img, &poly, rgb(color));
        }
        _ => draw_line_segment_mut(
            img,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            rgb(color),
        ),
    }
}

/// Filled axis-aligned rectangle; empty rectangles draw nothing
pub fn fill_rect(img: &mut RgbImage, rect: &Rect2, color: Color) {
    let x = rect.min.x.round() as i32;
    let y = rect.min.y.round() as i32;
    let w = (rect.max.x.round() as i32 - x).max(0) as u32;
    let h = (rect.max.y.round() as i32 - y).max(0) as u32;
    if w > 0 && h > 0 {
        draw_filled_rect_mut(img, Rect::at(x, y).of_size(w, h), rgb(color));
    }
}

/// Rectangle outline with square corners
pub fn draw_rect_outline(img: &mut RgbImage, rect: &Rect2, width: f64, color: Color) {
    for side in rect.sides() {
        draw_thick_line(img, side.start, side.end, width, color);
    }
    let half = width / 2.0;
    for corner in [
        rect.min,
        Point2::new(rect.max.x, rect.min.y),
        rect.max,
        Point2::new(rect.min.x, rect.max.y),
    ] {
        let square = Rect2::from_corners(
            Point2::new(corner.x - half, corner.y - half),
            Point2::new(corner.x + half, corner.y + half),
        );
        fill_rect(img, &square, color);
    }
}

/// Circular arc from `start_deg` to `end_deg`, counter-clockwise on screen
///
/// Angles follow the image convention: 0° points right and 90° points up.
pub fn draw_arc(
    img: &mut RgbImage,
    center: Point2<f64>,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    width: f64,
    color: Color,
) {
    let sweep = end_deg - start_deg;
    let steps = ((sweep.abs() / 5.0).ceil() as usize).max(1);
    let at = |deg: f64| {
        let rad = deg.to_radians();
        Point2::new(center.x + radius * rad.cos(), center.y - radius * rad.sin())
    };
    for i in 0..steps {
        let a = at(start_deg + sweep * i as f64 / steps as f64);
        let b = at(start_deg + sweep * (i + 1) as f64 / steps as f64);
        draw_thick_line(img, a, b, width, color);
    }
}

fn to_pixel(p: Point2<f64>) -> Point<i32> {
    Point::new(p.x.round() as i32, p.y.round() as i32)
}
