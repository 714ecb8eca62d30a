// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the floor plan pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type for floor plan operations
pub type Result<T> = std::result::Result<T, FloorPlanError>;

/// Errors that can occur while loading, detecting or extruding a floor plan
#[derive(Error, Debug)]
pub enum FloorPlanError {
    #[error("Cannot load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Wall detection failed: {0}")]
    Detection(String),

    #[error("Unknown furniture type: {0}")]
    UnknownFurniture(String),

    #[error("Geometry error: {0}")]
    Geometry(#[from] floorplan3d_geometry::Error),
}

impl FloorPlanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FloorPlanError::Io {
            path: path.into(),
            source,
        }
    }
}
