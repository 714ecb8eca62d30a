// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON plan documents
//!
//! Slot map keys are not persisted; each kind is stored as a plain list in
//! paint order. Loading builds a fresh model through the regular add
//! operations and swaps it in only once every record has been accepted.

use std::path::Path;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EditorConfig;
use crate::entities::{Door, FurnitureItem, Room, Staircase, Wall, Window};
use crate::error::{EditorError, Result};
use crate::model::EditorModel;
use crate::tool::Tool;

pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub version: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub grid_size: f64,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub windows: Vec<Window>,
    #[serde(default)]
    pub staircases: Vec<Staircase>,
    #[serde(default)]
    pub furniture: Vec<FurnitureItem>,
}

impl EditorModel {
    pub fn to_document(&self) -> PlanDocument {
        let config = self.config();
        PlanDocument {
            version: DOCUMENT_VERSION,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            grid_size: config.grid_size,
            walls: self.walls().map(|(_, w)| *w).collect(),
            rooms: self.rooms().map(|(_, r)| *r).collect(),
            doors: self.doors().map(|(_, d)| *d).collect(),
            windows: self.windows().map(|(_, w)| *w).collect(),
            staircases: self.staircases().map(|(_, s)| *s).collect(),
            furniture: self.furniture().map(|(_, f)| *f).collect(),
        }
    }

    /// Replace the model's contents with `doc`
    ///
    /// The canvas size and grid come from the document; the other settings,
    /// the active tool and the furniture selection are kept. On error the
    /// model is left exactly as it was.
    pub fn load_document(&mut self, doc: &PlanDocument) -> Result<()> {
        if doc.version != DOCUMENT_VERSION {
            return Err(invalid(format!(
                "unsupported document version {} (expected {DOCUMENT_VERSION})",
                doc.version
            )));
        }

        let config = EditorConfig {
            canvas_width: doc.canvas_width,
            canvas_height: doc.canvas_height,
            grid_size: doc.grid_size,
            ..self.config().clone()
        };
        let mut fresh = EditorModel::new(config)?;

        for (i, wall) in doc.walls.iter().enumerate() {
            check_point("wall", i, &wall.start)?;
            check_point("wall", i, &wall.end)?;
            fresh
                .add_wall(wall.start, wall.end)
                .ok_or_else(|| invalid(format!("wall {i} has zero length")))?;
        }
        for (i, room) in doc.rooms.iter().enumerate() {
            check_point("room", i, &room.rect.min)?;
            check_point("room", i, &room.rect.max)?;
            fresh.add_room_outline(room.rect);
        }
        for (i, door) in doc.doors.iter().enumerate() {
            check_point("door", i, &door.anchor)?;
            if !door.width.is_finite() {
                return Err(invalid(format!("door {i} has no usable width")));
            }
            let key = fresh.add_door(door.anchor);
            fresh.resize_door(key, door.width);
        }
        for (i, window) in doc.windows.iter().enumerate() {
            check_point("window", i, &window.anchor)?;
            fresh.add_window(window.anchor);
        }
        for (i, stair) in doc.staircases.iter().enumerate() {
            check_point("staircase", i, &stair.rect.min)?;
            check_point("staircase", i, &stair.rect.max)?;
            fresh
                .add_staircase(stair.rect.min, stair.rect.max)
                .ok_or_else(|| invalid(format!("staircase {i} is empty")))?;
        }
        for (i, item) in doc.furniture.iter().enumerate() {
            check_point("furniture", i, &item.anchor)?;
            fresh.add_furniture(item.kind, item.anchor);
        }

        match self.selected_furniture_type() {
            Some(kind) if self.tool() == Tool::Furniture => fresh.select_furniture_type(kind),
            _ => fresh.set_tool(self.tool()),
        }
        *self = fresh;
        Ok(())
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.to_document())?;
        std::fs::write(path, json).map_err(|source| EditorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), entities = self.entity_count(), "plan saved");
        Ok(())
    }

    /// Load a plan saved by [`EditorModel::save_json`]; see [`EditorModel::load_document`]
    pub fn load_json(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EditorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: PlanDocument = serde_json::from_str(&text)?;
        self.load_document(&doc)?;
        info!(path = %path.display(), entities = self.entity_count(), "plan loaded");
        Ok(())
    }
}

fn check_point(kind: &str, index: usize, p: &Point2<f64>) -> Result<()> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{kind} {index} has a non-finite coordinate")))
    }
}

fn invalid(message: String) -> EditorError {
    EditorError::InvalidDocument(message)
}
