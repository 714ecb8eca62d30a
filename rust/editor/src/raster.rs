// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat raster export of the model
//!
//! The full render draws every entity kind on a white canvas of the
//! configured size. The walls-only render feeds a wall detector, so it draws
//! nothing the detector could mistake for a wall.

use crate::error::{EditorError, Result};
use crate::model::EditorModel;
use floorplan3d::draw::{draw_arc, draw_rect_outline, draw_thick_line, fill_rect, rgb};
use floorplan3d::{palette, Rect2};
use image::RgbImage;
use nalgebra::Point2;
use std::path::Path;
use tracing::info;

const WALL_WIDTH: f64 = 6.0;

fn blank_canvas(model: &EditorModel) -> RgbImage {
    let config = model.config();
    RgbImage::from_pixel(config.canvas_width, config.canvas_height, rgb(palette::WHITE))
}

fn draw_walls(img: &mut RgbImage, model: &EditorModel) {
    for (_, wall) in model.walls() {
        draw_thick_line(img, wall.start, wall.end, WALL_WIDTH, palette::BLACK);
    }
}

/// Walls only, black on white
pub fn render_walls_raster(model: &EditorModel) -> RgbImage {
    let mut img = blank_canvas(model);
    draw_walls(&mut img, model);
    img
}

/// Every entity kind: walls, room outlines, door swings, windows, staircases
/// with their step lines, then furniture on top
pub fn render_raster(model: &EditorModel) -> RgbImage {
    let config = model.config();
    let mut img = blank_canvas(model);

    draw_walls(&mut img, model);

    for (_, room) in model.rooms() {
        draw_rect_outline(&mut img, &room.rect, 2.0, palette::BLUE);
    }

    for (_, door) in model.doors() {
        draw_arc(&mut img, door.anchor, door.width / 2.0, 0.0, 90.0, 3.0, palette::BROWN);
    }

    for (_, window) in model.windows() {
        let half = config.window_size / 2.0;
        let rect = Rect2::from_corners(
            Point2::new(window.anchor.x - half, window.anchor.y - half),
            Point2::new(window.anchor.x + half, window.anchor.y + half),
        );
        fill_rect(&mut img, &rect, palette::LIGHT_BLUE);
        draw_rect_outline(&mut img, &rect, 2.0, palette::CYAN);
    }

    for (_, stair) in model.staircases() {
        fill_rect(&mut img, &stair.rect, palette::MOCCASIN);
        draw_rect_outline(&mut img, &stair.rect, 2.0, palette::ORANGE);
        for line in stair.step_lines(&config.stairs) {
            draw_thick_line(&mut img, line.start, line.end, 1.0, palette::ORANGE);
        }
    }

    for (_, item) in model.furniture() {
        let rect = item.footprint();
        fill_rect(&mut img, &rect, item.kind.color());
        draw_rect_outline(&mut img, &rect, 2.0, palette::BLACK);
    }

    img
}

/// Write the full render; the format follows the file extension
///
/// Refuses a plan without walls. The model is never modified.
pub fn save_png(model: &EditorModel, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if model.wall_count() == 0 {
        return Err(EditorError::NoWalls);
    }
    render_raster(model)
        .save(path)
        .map_err(|source| EditorError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), entities = model.entity_count(), "floor plan image written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan3d::FurnitureKind;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_canvas_size_follows_config() {
        let img = render_raster(&EditorModel::default());
        assert_eq!(img.dimensions(), (1000, 700));
        assert!(img.pixels().all(|px| *px == rgb(palette::WHITE)));
    }

    #[test]
    fn test_render_draws_each_kind() {
        let mut model = EditorModel::default();
        model.add_wall(p(100.0, 100.0), p(600.0, 100.0));
        model.add_window(p(300.0, 400.0));
        model.add_staircase(p(700.0, 300.0), p(900.0, 400.0));
        model.add_furniture(FurnitureKind::Bed, p(200.0, 500.0));

        let img = render_raster(&model);
        assert_eq!(*img.get_pixel(350, 100), rgb(palette::BLACK));
        assert_eq!(*img.get_pixel(300, 400), rgb(palette::LIGHT_BLUE));
        assert_eq!(*img.get_pixel(300, 385), rgb(palette::CYAN));
        assert_eq!(*img.get_pixel(810, 330), rgb(palette::MOCCASIN));
        assert_eq!(*img.get_pixel(200, 500), rgb(FurnitureKind::Bed.color()));
    }

    #[test]
    fn test_walls_raster_skips_other_kinds() {
        let mut model = EditorModel::default();
        model.add_wall(p(100.0, 100.0), p(600.0, 100.0));
        model.add_furniture(FurnitureKind::Bed, p(200.0, 500.0));

        let img = render_walls_raster(&model);
        assert_eq!(*img.get_pixel(350, 100), rgb(palette::BLACK));
        assert_eq!(*img.get_pixel(200, 500), rgb(palette::WHITE));
    }

    #[test]
    fn test_save_requires_walls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.png");
        let mut model = EditorModel::default();
        model.add_window(p(100.0, 100.0));

        assert!(matches!(save_png(&model, &path), Err(EditorError::NoWalls)));
        assert!(!path.exists());

        model.add_wall(p(0.0, 0.0), p(200.0, 0.0));
        save_png(&model, &path).unwrap();
        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (1000, 700));
    }

    #[test]
    fn test_failed_save_leaves_model_untouched() {
        let mut model = EditorModel::default();
        model.add_wall(p(0.0, 0.0), p(200.0, 0.0));
        let before = model.entity_count();

        let result = save_png(&model, "/nonexistent-dir/plan.png");
        assert!(matches!(result, Err(EditorError::Image { .. })));
        assert_eq!(model.entity_count(), before);
    }
}
