// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interactive floor plan authoring
//!
//! [`EditorModel`] is the single source of truth for an authored plan:
//! walls, rooms, doors, windows, staircases and furniture live in slot maps
//! keyed by [`EntityKey`]. Pointer gestures are fed in as press, drag and
//! release events and interpreted by the active [`Tool`]; committed geometry
//! is always snapped to the grid.
//!
//! Everything a front end draws comes from [`projection::project`], which is
//! recomputed from the records on demand. The model can be saved as a JSON
//! [`PlanDocument`], rendered to a raster, or handed to the 3D scene
//! pipeline through [`to_plan_input`] and [`build_preview`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use floorplan3d_editor::{build_preview, EditorModel, Tool};
//! use nalgebra::Point2;
//!
//! let mut model = EditorModel::default();
//! model.set_tool(Tool::Room);
//! model.press(Point2::new(100.0, 100.0));
//! model.drag(Point2::new(400.0, 300.0));
//! model.release(Point2::new(400.0, 300.0));
//!
//! let scene = build_preview(&model, &Default::default())?;
//! ```

pub mod config;
pub mod document;
pub mod entities;
pub mod error;
pub mod grid;
pub mod handoff;
pub mod keys;
pub mod model;
pub mod projection;
pub mod raster;
pub mod tool;

pub use config::EditorConfig;
pub use document::{PlanDocument, DOCUMENT_VERSION};
pub use entities::{Door, FurnitureItem, Room, Staircase, Wall, Window};
pub use error::{EditorError, Result};
pub use grid::{snap, snap_point};
pub use handoff::{build_preview, build_preview_detected, to_plan_input};
pub use keys::{
    DoorKey, EntityKey, EntityKind, FurnitureKey, RoomKey, StairKey, WallKey, WindowKey,
};
pub use model::{Edit, EditorModel, Gesture};
pub use projection::{HandleSide, Primitive, Role, Shape};
pub use raster::{render_raster, render_walls_raster, save_png};
pub use tool::Tool;
