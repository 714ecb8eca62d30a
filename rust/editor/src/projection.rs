// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Screen projection of the editor model
//!
//! [`project`] is a pure function of the model: every call rebuilds the full
//! primitive list, bottom first. Each primitive names the entity that owns it,
//! so removing a record removes all of its handles, step lines and labels.

use floorplan3d::{palette, Color, Rect2};
use floorplan3d_geometry::{distance_to_segment, Segment2};
use nalgebra::Point2;

use crate::keys::EntityKey;
use crate::model::{EditorModel, Gesture};
use crate::tool::Tool;

/// Approximate label glyph box, in canvas units
const LABEL_CHAR_WIDTH: f64 = 6.0;
const LABEL_LINE_HEIGHT: f64 = 12.0;

/// Distance between a wall and its length label
const MEASUREMENT_OFFSET: f64 = 15.0;
/// Gap between a furniture footprint and its label
const FURNITURE_LABEL_GAP: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        start: Point2<f64>,
        end: Point2<f64>,
    },
    Rect(Rect2),
    /// Pie-slice arc; angles in degrees, counter-clockwise on screen from +x
    Arc {
        center: Point2<f64>,
        radius: f64,
        start_deg: f64,
        extent_deg: f64,
    },
    Label {
        at: Point2<f64>,
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Body,
    Handle(HandleSide),
    StepLine,
    Label,
    Measurement,
    /// Rubber band of a gesture in progress; never hit-tested
    Preview,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub owner: Option<EntityKey>,
    pub role: Role,
    pub shape: Shape,
    pub stroke: Color,
    pub fill: Option<Color>,
    pub width: f64,
}

impl Primitive {
    fn owned(owner: EntityKey, role: Role, shape: Shape, stroke: Color, width: f64) -> Self {
        Self {
            owner: Some(owner),
            role,
            shape,
            stroke,
            fill: None,
            width,
        }
    }

    fn filled(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Screen-space bounding box including the stroke
    pub fn bounds(&self) -> Rect2 {
        match &self.shape {
            Shape::Line { start, end } => {
                Rect2::from_corners(*start, *end).expanded(self.width / 2.0)
            }
            Shape::Rect(rect) => rect.expanded(self.width / 2.0),
            Shape::Arc {
                center,
                radius,
                start_deg,
                extent_deg,
            } => arc_bounds(*center, *radius, *start_deg, *extent_deg).expanded(self.width / 2.0),
            Shape::Label { at, text } => {
                let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
                let rows = text.lines().count().max(1);
                let half_w = columns as f64 * LABEL_CHAR_WIDTH / 2.0;
                let half_h = rows as f64 * LABEL_LINE_HEIGHT / 2.0;
                Rect2::from_corners(
                    Point2::new(at.x - half_w, at.y - half_h),
                    Point2::new(at.x + half_w, at.y + half_h),
                )
            }
        }
    }

    /// Whether `p` lies within `tolerance` of the drawn shape
    ///
    /// Lines use their true distance; everything else its bounding box.
    pub fn hit(&self, p: Point2<f64>, tolerance: f64) -> bool {
        match &self.shape {
            Shape::Line { start, end } => {
                let segment = Segment2::new(*start, *end);
                distance_to_segment(&p, &segment) <= self.width / 2.0 + tolerance
            }
            _ => self.bounds().expanded(tolerance).contains(&p),
        }
    }
}

fn arc_bounds(center: Point2<f64>, radius: f64, start_deg: f64, extent_deg: f64) -> Rect2 {
    let steps = ((extent_deg.abs() / 5.0).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| {
            let rad = (start_deg + extent_deg * i as f64 / steps as f64).to_radians();
            Point2::new(center.x + radius * rad.cos(), center.y - radius * rad.sin())
        })
        .fold(Rect2::from_corners(center, center), |r, p| Rect2 {
            min: Point2::new(r.min.x.min(p.x), r.min.y.min(p.y)),
            max: Point2::new(r.max.x.max(p.x), r.max.y.max(p.y)),
        })
}

/// Topmost owned primitive within `tolerance` of `p` that `accept` admits
pub fn pick<'a>(
    primitives: &'a [Primitive],
    p: Point2<f64>,
    tolerance: f64,
    accept: impl Fn(&Primitive) -> bool,
) -> Option<&'a Primitive> {
    primitives
        .iter()
        .rev()
        .filter(|prim| prim.owner.is_some() && prim.role != Role::Preview)
        .find(|prim| accept(prim) && prim.hit(p, tolerance))
}

/// Rebuild every screen primitive of `model`, bottom first
///
/// Room outlines are painted below everything else; the remaining entities
/// follow their insertion order, then the gesture preview on top.
pub fn project(model: &EditorModel) -> Vec<Primitive> {
    let config = model.config();
    let mpu = config.meters_per_unit();
    let mut out = Vec::new();

    for (key, room) in model.rooms() {
        let owner = EntityKey::Room(key);
        let inset = room.rect.expanded(-config.room_inset);
        out.push(
            Primitive::owned(owner, Role::Body, Shape::Rect(inset), palette::BLUE, 1.0)
                .filled(palette::LIGHT_BLUE),
        );
        if config.show_measurements {
            let text = format!(
                "{:.2}m × {:.2}m",
                room.rect.width() * mpu,
                room.rect.height() * mpu
            );
            out.push(label(owner, Role::Measurement, room.rect.center(), text, palette::BLUE));
        }
    }

    for &owner in model.order() {
        match owner {
            EntityKey::Room(_) => {}
            EntityKey::Wall(key) => {
                let Some(wall) = model.wall(key) else { continue };
                out.push(Primitive::owned(
                    owner,
                    Role::Body,
                    Shape::Line {
                        start: wall.start,
                        end: wall.end,
                    },
                    palette::BLACK,
                    6.0,
                ));
                if config.show_measurements {
                    let mid = nalgebra::center(&wall.start, &wall.end);
                    let d = wall.end - wall.start;
                    let at = if d.x.abs() > d.y.abs() {
                        Point2::new(mid.x, mid.y - MEASUREMENT_OFFSET)
                    } else {
                        Point2::new(mid.x - MEASUREMENT_OFFSET, mid.y)
                    };
                    let text = format!("{:.2}m", wall.length() * mpu);
                    out.push(label(owner, Role::Measurement, at, text, palette::BLUE));
                }
            }
            EntityKey::Door(key) => {
                let Some(door) = model.door(key) else { continue };
                out.push(Primitive::owned(
                    owner,
                    Role::Body,
                    Shape::Arc {
                        center: door.anchor,
                        radius: door.width / 2.0,
                        start_deg: 0.0,
                        extent_deg: 90.0,
                    },
                    palette::BROWN,
                    3.0,
                ));
                let [left, right] = door.handle_centers();
                for (side, center) in [(HandleSide::Left, left), (HandleSide::Right, right)] {
                    let half = config.handle_size / 2.0;
                    let rect = Rect2::from_corners(
                        Point2::new(center.x - half, center.y - half),
                        Point2::new(center.x + half, center.y + half),
                    );
                    let handle = Primitive::owned(
                        owner,
                        Role::Handle(side),
                        Shape::Rect(rect),
                        palette::DARK_RED,
                        1.0,
                    );
                    out.push(handle.filled(palette::RED));
                }
            }
            EntityKey::Window(key) => {
                let Some(window) = model.window(key) else { continue };
                out.push(
                    Primitive::owned(
                        owner,
                        Role::Body,
                        Shape::Rect(centered_square(window.anchor, config.window_size)),
                        palette::CYAN,
                        2.0,
                    )
                    .filled(palette::LIGHT_BLUE),
                );
            }
            EntityKey::Staircase(key) => {
                let Some(stair) = model.staircase(key) else { continue };
                let body = Primitive::owned(
                    owner,
                    Role::Body,
                    Shape::Rect(stair.rect),
                    palette::ORANGE,
                    2.0,
                );
                out.push(body.filled(palette::MOCCASIN));
                for line in stair.step_lines(&config.stairs) {
                    out.push(Primitive::owned(
                        owner,
                        Role::StepLine,
                        Shape::Line {
                            start: line.start,
                            end: line.end,
                        },
                        palette::ORANGE,
                        1.0,
                    ));
                }
            }
            EntityKey::Furniture(key) => {
                let (Some(item), Some(anchor)) =
                    (model.furniture_item(key), model.furniture_display_anchor(key))
                else {
                    continue;
                };
                let rect = crate::entities::footprint_at(item.kind, anchor);
                out.push(
                    Primitive::owned(owner, Role::Body, Shape::Rect(rect), palette::BLACK, 2.0)
                        .filled(item.kind.color()),
                );
                let text = format!(
                    "{}\n{:.1}m × {:.1}m",
                    item.kind.display_name(),
                    rect.width() * mpu,
                    rect.height() * mpu
                );
                let at = Point2::new(anchor.x, rect.max.y + FURNITURE_LABEL_GAP);
                out.push(label(owner, Role::Label, at, text, palette::BLACK));
            }
        }
    }

    if let Some(preview) = gesture_preview(model.gesture()) {
        out.push(preview);
    }
    out
}

fn label(owner: EntityKey, role: Role, at: Point2<f64>, text: String, color: Color) -> Primitive {
    Primitive::owned(owner, role, Shape::Label { at, text }, color, 1.0)
}

fn centered_square(center: Point2<f64>, size: f64) -> Rect2 {
    let half = size / 2.0;
    Rect2::from_corners(
        Point2::new(center.x - half, center.y - half),
        Point2::new(center.x + half, center.y + half),
    )
}

fn gesture_preview(gesture: &Gesture) -> Option<Primitive> {
    let Gesture::Drawing {
        tool,
        start,
        current,
    } = *gesture
    else {
        return None;
    };
    let (shape, stroke, width) = match tool {
        Tool::Wall => (Shape::Line { start, end: current }, palette::BLACK, 4.0),
        Tool::Room => (Shape::Rect(Rect2::from_corners(start, current)), palette::BLUE, 2.0),
        Tool::Staircase => (Shape::Rect(Rect2::from_corners(start, current)), palette::ORANGE, 2.0),
        _ => return None,
    };
    Some(Primitive {
        owner: None,
        role: Role::Preview,
        shape,
        stroke,
        fill: None,
        width,
    })
}
