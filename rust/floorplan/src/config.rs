// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration
//!
//! All lengths are meters unless the field says pixels.

use crate::error::{FloorPlanError, Result};
use crate::stairs::StairParams;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Allowed wall heights in meters
pub const WALL_HEIGHT_RANGE: RangeInclusive<f64> = 2.0..=5.0;

/// Allowed wall thicknesses in meters
pub const WALL_THICKNESS_RANGE: RangeInclusive<f64> = 0.1..=0.5;

/// Scene construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Wall height in meters
    pub wall_height: f64,
    /// Wall thickness in meters
    pub wall_thickness: f64,
    /// Real-world width assumed for the longer image side
    pub nominal_footprint_width: f64,
    /// Door and window dimensions
    pub openings: OpeningConfig,
    /// Step subdivision for exported staircases
    pub stairs: StairParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            wall_height: 3.0,
            wall_thickness: 0.2,
            nominal_footprint_width: 15.0,
            openings: OpeningConfig::default(),
            stairs: StairParams::EXPORT,
        }
    }
}

impl SceneConfig {
    /// Read a JSON config file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FloorPlanError::io(path, e))?;
        let config: SceneConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<()> {
        if !WALL_HEIGHT_RANGE.contains(&self.wall_height) {
            return Err(FloorPlanError::InvalidConfig(format!(
                "wall_height {} outside [{}, {}]",
                self.wall_height,
                WALL_HEIGHT_RANGE.start(),
                WALL_HEIGHT_RANGE.end()
            )));
        }
        if !WALL_THICKNESS_RANGE.contains(&self.wall_thickness) {
            return Err(FloorPlanError::InvalidConfig(format!(
                "wall_thickness {} outside [{}, {}]",
                self.wall_thickness,
                WALL_THICKNESS_RANGE.start(),
                WALL_THICKNESS_RANGE.end()
            )));
        }
        if !(self.nominal_footprint_width > 0.0) {
            return Err(FloorPlanError::InvalidConfig(format!(
                "nominal_footprint_width must be positive, got {}",
                self.nominal_footprint_width
            )));
        }
        self.openings.validate()?;
        self.stairs.validate()
    }
}

/// Door and window dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningConfig {
    pub door_min_width: f64,
    pub door_max_width: f64,
    pub door_height: f64,
    pub window_width: f64,
    pub window_height: f64,
    /// Height of the window's lower edge above the floor
    pub window_sill: f64,
    /// Extra outward offset of the window frame quad
    pub frame_thickness: f64,
    /// Reject openings farther than this from every wall.
    /// `None` binds to the nearest wall at any distance.
    pub max_snap_distance: Option<f64>,
}

impl Default for OpeningConfig {
    fn default() -> Self {
        Self {
            door_min_width: 0.6,
            door_max_width: 1.2,
            door_height: 2.1,
            window_width: 1.2,
            window_height: 1.2,
            window_sill: 0.9,
            frame_thickness: 0.05,
            max_snap_distance: None,
        }
    }
}

impl OpeningConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("door_min_width", self.door_min_width),
            ("door_height", self.door_height),
            ("window_width", self.window_width),
            ("window_height", self.window_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(FloorPlanError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.door_max_width >= self.door_min_width) {
            return Err(FloorPlanError::InvalidConfig(format!(
                "door width range [{}, {}] is empty",
                self.door_min_width, self.door_max_width
            )));
        }
        if !(self.window_sill >= 0.0 && self.frame_thickness >= 0.0) {
            return Err(FloorPlanError::InvalidConfig(
                "window_sill and frame_thickness must not be negative".into(),
            ));
        }
        if let Some(limit) = self.max_snap_distance {
            if !(limit >= 0.0) {
                return Err(FloorPlanError::InvalidConfig(format!(
                    "max_snap_distance must not be negative, got {limit}"
                )));
            }
        }
        Ok(())
    }

    /// Door opening width for a normalized (meter) authored width
    pub fn door_width(&self, width: f64) -> f64 {
        width.clamp(self.door_min_width, self.door_max_width)
    }
}

/// Parameters of the bundled Hough wall detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Gray level at or below which a pixel counts as ink
    pub binary_threshold: u8,
    /// Radius of the square closing kernel (1 = 3x3)
    pub close_radius: u8,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Minimum accumulator votes for a line
    pub hough_threshold: u32,
    /// Minimum Hough segment length in pixels
    pub min_line_length: f64,
    /// Maximum gap bridged inside one segment, in pixels
    pub max_line_gap: f64,
    /// Segments must be strictly longer than this, in pixels
    pub min_segment_length: f64,
    /// Merge collinear duplicates after extraction
    pub merge_collinear: bool,
    /// Radians
    pub collinear_angle_tolerance: f64,
    /// Pixels
    pub collinear_distance_tolerance: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            binary_threshold: 127,
            close_radius: 1,
            canny_low: 50.0,
            canny_high: 150.0,
            hough_threshold: 50,
            min_line_length: 30.0,
            max_line_gap: 10.0,
            min_segment_length: 20.0,
            merge_collinear: false,
            collinear_angle_tolerance: 0.087, // ~5 degrees
            collinear_distance_tolerance: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.wall_height, 3.0);
        assert_eq!(config.wall_thickness, 0.2);
        assert_eq!(config.nominal_footprint_width, 15.0);
        assert_eq!(config.openings.max_snap_distance, None);
    }

    #[test]
    fn test_wall_ranges_enforced() {
        let tall = SceneConfig {
            wall_height: 5.5,
            ..Default::default()
        };
        assert!(matches!(tall.validate(), Err(FloorPlanError::InvalidConfig(_))));

        let thin = SceneConfig {
            wall_thickness: 0.05,
            ..Default::default()
        };
        assert!(thin.validate().is_err());

        let edge = SceneConfig {
            wall_height: 2.0,
            wall_thickness: 0.5,
            ..Default::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_door_width_clamped() {
        let openings = OpeningConfig::default();
        assert_eq!(openings.door_width(0.45), 0.6);
        assert_eq!(openings.door_width(1.5), 1.2);
        assert_eq!(openings.door_width(0.9), 0.9);
    }

    #[test]
    fn test_rejects_nan_door_range() {
        let config = SceneConfig {
            openings: OpeningConfig {
                door_max_width: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let sill = OpeningConfig {
            window_sill: f64::NAN,
            ..Default::default()
        };
        assert!(sill.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = r#"{"wall_height": 2.5, "openings": {"max_snap_distance": 1.0}}"#;
        write!(file, "{json}").unwrap();

        let config = SceneConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.wall_height, 2.5);
        assert_eq!(config.wall_thickness, 0.2);
        assert_eq!(config.openings.max_snap_distance, Some(1.0));
        assert_eq!(config.openings.door_height, 2.1);
    }

    #[test]
    fn test_invalid_json_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"wall_thickness": 0.9}}"#).unwrap();
        assert!(SceneConfig::from_json_file(file.path()).is_err());
        assert!(matches!(
            SceneConfig::from_json_file("/nonexistent/config.json"),
            Err(FloorPlanError::Io { .. })
        ));
    }
}
