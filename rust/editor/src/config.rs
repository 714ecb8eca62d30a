// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Editor configuration
//!
//! All lengths are canvas units. The canvas maps onto the scene's nominal
//! footprint, so one unit is `nominal_footprint_width / max(width, height)`
//! meters (0.015 m for the default 1000x700 canvas).

use crate::error::{EditorError, Result};
use floorplan3d::StairParams;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Grid unit every committed coordinate is rounded to
    pub grid_size: f64,
    /// Shortest wall gesture that commits
    pub wall_min_length: f64,
    /// Both sides of a room or staircase gesture must exceed this
    pub rect_min_size: f64,
    pub default_door_width: f64,
    pub door_min_width: f64,
    pub door_max_width: f64,
    pub handle_size: f64,
    /// Pick radius for door resize handles
    pub handle_tolerance: f64,
    pub erase_tolerance: f64,
    pub furniture_pick_tolerance: f64,
    pub window_size: f64,
    /// Inset of the decorative room rectangle inside its walls
    pub room_inset: f64,
    pub show_measurements: bool,
    pub nominal_footprint_width: f64,
    pub stairs: StairParams,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            canvas_height: 700,
            grid_size: 20.0,
            wall_min_length: 5.0,
            rect_min_size: 20.0,
            default_door_width: 30.0,
            door_min_width: 15.0,
            door_max_width: 80.0,
            handle_size: 5.0,
            handle_tolerance: 5.0,
            erase_tolerance: 10.0,
            furniture_pick_tolerance: 10.0,
            window_size: 30.0,
            room_inset: 3.0,
            show_measurements: true,
            nominal_footprint_width: 15.0,
            stairs: StairParams::EDITOR,
        }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(invalid("canvas must not be empty".into()));
        }
        if !(self.grid_size > 0.0) {
            return Err(invalid(format!("grid_size must be positive, got {}", self.grid_size)));
        }
        if !(self.door_min_width > 0.0 && self.door_min_width <= self.door_max_width) {
            return Err(invalid(format!(
                "door width range [{}, {}] is invalid",
                self.door_min_width, self.door_max_width
            )));
        }
        if !self.door_width_range().contains(&self.default_door_width) {
            return Err(invalid(format!(
                "default door width {} is outside [{}, {}]",
                self.default_door_width, self.door_min_width, self.door_max_width
            )));
        }
        if !(self.nominal_footprint_width > 0.0) {
            return Err(invalid("nominal_footprint_width must be positive".into()));
        }
        let lengths = [
            ("wall_min_length", self.wall_min_length),
            ("rect_min_size", self.rect_min_size),
            ("handle_size", self.handle_size),
            ("handle_tolerance", self.handle_tolerance),
            ("erase_tolerance", self.erase_tolerance),
            ("furniture_pick_tolerance", self.furniture_pick_tolerance),
            ("window_size", self.window_size),
            ("room_inset", self.room_inset),
        ];
        for (name, value) in lengths {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(invalid(format!(
                    "{name} must be a non-negative length, got {value}"
                )));
            }
        }
        self.stairs
            .validate()
            .map_err(|e| invalid(format!("stairs: {e}")))
    }

    pub fn door_width_range(&self) -> RangeInclusive<f64> {
        self.door_min_width..=self.door_max_width
    }

    pub fn clamp_door_width(&self, width: f64) -> f64 {
        width.clamp(self.door_min_width, self.door_max_width)
    }

    /// Real-world length of one canvas unit
    pub fn meters_per_unit(&self) -> f64 {
        self.nominal_footprint_width / self.canvas_width.max(self.canvas_height) as f64
    }
}

fn invalid(message: String) -> EditorError {
    EditorError::InvalidConfig(message)
}
