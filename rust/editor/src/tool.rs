// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authoring tools

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The single active tool; changed only through `EditorModel::set_tool`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Wall,
    Room,
    Door,
    Window,
    Staircase,
    Furniture,
    Erase,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Wall,
        Tool::Room,
        Tool::Door,
        Tool::Window,
        Tool::Staircase,
        Tool::Furniture,
        Tool::Erase,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Tool::Wall => "wall",
            Tool::Room => "room",
            Tool::Door => "door",
            Tool::Window => "window",
            Tool::Staircase => "staircase",
            Tool::Furniture => "furniture",
            Tool::Erase => "erase",
        }
    }

    /// One-line usage hint for a status bar
    pub const fn hint(self) -> &'static str {
        match self {
            Tool::Wall => "Click and drag to draw a wall",
            Tool::Room => "Click and drag to draw a room",
            Tool::Door => "Click on a wall to place a door, drag a handle to resize",
            Tool::Window => "Click on a wall to place a window",
            Tool::Staircase => "Click and drag to create a staircase",
            Tool::Furniture => "Select furniture, then click to place or drag to move",
            Tool::Erase => "Click on objects to erase them",
        }
    }

    /// Tools whose gesture is a rubber-band drag committed on release
    pub const fn draws_on_release(self) -> bool {
        matches!(self, Tool::Wall | Tool::Room | Tool::Staircase)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTool(pub String);

impl fmt::Display for UnknownTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tool '{}'", self.0)
    }
}

impl std::error::Error for UnknownTool {}

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.key() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}
