// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the editor
//!
//! Interactive edits never fail; only persistence, export and the scene
//! handoff return these.

use floorplan3d::FloorPlanError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write image '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid plan document: {0}")]
    InvalidDocument(String),

    #[error("The plan has no walls")]
    NoWalls,

    #[error("Scene pipeline failed: {0}")]
    Scene(#[from] FloorPlanError),
}
