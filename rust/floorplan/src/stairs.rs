// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Staircase subdivision into ascending step boxes

use crate::error::{FloorPlanError, Result};
use crate::types::{Rect2, StairDirection};
use floorplan3d_geometry::{axis_aligned_box, Face};
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// How a staircase rectangle is cut into steps
///
/// Each stage carries its own parameters in its own coordinate space; the
/// editor preview works in canvas units and the 3D export in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairParams {
    /// Length along the longer side that makes one step
    pub divisor: f64,
    pub min_steps: usize,
    pub max_steps: usize,
    /// Height of the top step's upper face, in meters
    pub total_height: f64,
}

impl StairParams {
    /// Editor preview, in canvas units
    pub const EDITOR: StairParams = StairParams {
        divisor: 15.0,
        min_steps: 3,
        max_steps: 10,
        total_height: 3.0,
    };

    /// 3D export, in meters
    pub const EXPORT: StairParams = StairParams {
        divisor: 0.3,
        min_steps: 3,
        max_steps: 15,
        total_height: 3.0,
    };

    pub fn validate(&self) -> Result<()> {
        if !(self.divisor > 0.0) {
            return Err(FloorPlanError::InvalidConfig(format!(
                "stair divisor must be positive, got {}",
                self.divisor
            )));
        }
        if self.min_steps == 0 || self.max_steps < self.min_steps {
            return Err(FloorPlanError::InvalidConfig(format!(
                "stair step range [{}, {}] is invalid",
                self.min_steps, self.max_steps
            )));
        }
        if !(self.total_height > 0.0) {
            return Err(FloorPlanError::InvalidConfig(
                "stair total_height must be positive".into(),
            ));
        }
        Ok(())
    }

    /// `clamp(floor(max(w, h) / divisor), min_steps, max_steps)`
    pub fn step_count(&self, width: f64, height: f64) -> usize {
        let raw = (width.max(height) / self.divisor).floor();
        let raw = if raw.is_finite() && raw > 0.0 { raw as usize } else { 0 };
        raw.clamp(self.min_steps, self.max_steps)
    }

    /// Height of one step for `steps` steps
    pub fn riser(&self, steps: usize) -> f64 {
        self.total_height / steps as f64
    }
}

impl Default for StairParams {
    fn default() -> Self {
        Self::EXPORT
    }
}

/// Slice of the staircase rectangle occupied by step `index`
pub fn step_footprint(
    rect: &Rect2,
    direction: StairDirection,
    steps: usize,
    index: usize,
) -> Rect2 {
    let n = steps as f64;
    let i = index as f64;
    match direction {
        StairDirection::Horizontal => {
            let run = rect.width() / n;
            let x = rect.min.x + i * run;
            Rect2 {
                min: Point2::new(x, rect.min.y),
                max: Point2::new(x + run, rect.max.y),
            }
        }
        StairDirection::Vertical => {
            let run = rect.height() / n;
            let y = rect.min.y + i * run;
            Rect2 {
                min: Point2::new(rect.min.x, y),
                max: Point2::new(rect.max.x, y + run),
            }
        }
    }
}

/// Stack of step boxes climbing along the rectangle's primary axis
///
/// Step `i` covers the `i`-th equal slice and spans `z` from `i * riser` to
/// `(i + 1) * riser`, giving a solid block silhouette.
pub fn build_staircase(rect: &Rect2, params: &StairParams) -> Vec<[Face; 6]> {
    let direction = StairDirection::of(rect);
    let steps = params.step_count(rect.width(), rect.height());
    let riser = params.riser(steps);

    (0..steps)
        .map(|i| {
            let slice = step_footprint(rect, direction, steps, i);
            axis_aligned_box(
                Point3::new(slice.min.x, slice.min.y, i as f64 * riser),
                Point3::new(slice.max.x, slice.max.y, (i + 1) as f64 * riser),
            )
        })
        .collect()
}
