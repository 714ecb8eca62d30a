// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pixel to meter normalization
//!
//! One scale factor, `nominal_width / max(image_width, image_height)`, is
//! derived per run and applied to every entity kind. Snapping openings onto
//! walls only works when walls and anchors share that factor.

use crate::error::{FloorPlanError, Result};
use crate::types::{DoorSpec, FloorPlanInput, FurnitureSpec, Rect2, StairSpec, WindowSpec};
use floorplan3d_geometry::Segment2;
use nalgebra::Point2;

/// Uniform scale from source units to meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    scale: f64,
    image_width: u32,
    image_height: u32,
}

impl Normalizer {
    pub fn new(image_width: u32, image_height: u32, nominal_width: f64) -> Result<Self> {
        let longest = image_width.max(image_height);
        if longest == 0 {
            return Err(FloorPlanError::InvalidConfig(
                "source image has zero size".into(),
            ));
        }
        if !(nominal_width > 0.0) {
            return Err(FloorPlanError::InvalidConfig(format!(
                "nominal footprint width must be positive, got {nominal_width}"
            )));
        }
        Ok(Self {
            scale: nominal_width / longest as f64,
            image_width,
            image_height,
        })
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn length(&self, value: f64) -> f64 {
        value * self.scale
    }

    #[inline]
    pub fn point(&self, p: &Point2<f64>) -> Point2<f64> {
        Point2::from(p.coords * self.scale)
    }

    pub fn segment(&self, segment: &Segment2) -> Segment2 {
        segment.scaled(self.scale)
    }

    pub fn rect(&self, rect: &Rect2) -> Rect2 {
        rect.scaled(self.scale)
    }

    /// Floor extent `(width, depth)` in meters
    pub fn floor_extent(&self) -> (f64, f64) {
        (
            self.length(self.image_width as f64),
            self.length(self.image_height as f64),
        )
    }

    /// Scale every coordinate of `input`; door widths become meters
    pub fn normalize(&self, input: &FloorPlanInput) -> NormalizedPlan {
        NormalizedPlan {
            scale: self.scale,
            floor_extent: self.floor_extent(),
            walls: input.walls.iter().map(|w| self.segment(w)).collect(),
            doors: input
                .doors
                .iter()
                .map(|d| DoorSpec {
                    anchor: self.point(&d.anchor),
                    width: self.length(d.width),
                })
                .collect(),
            windows: input
                .windows
                .iter()
                .map(|w| WindowSpec {
                    anchor: self.point(&w.anchor),
                })
                .collect(),
            staircases: input
                .staircases
                .iter()
                .map(|s| StairSpec {
                    rect: self.rect(&s.rect),
                })
                .collect(),
            furniture: input
                .furniture
                .iter()
                .map(|f| FurnitureSpec {
                    anchor: self.point(&f.anchor),
                    ..*f
                })
                .collect(),
        }
    }
}

/// A floor plan with every coordinate in meters
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPlan {
    pub scale: f64,
    pub floor_extent: (f64, f64),
    pub walls: Vec<Segment2>,
    pub doors: Vec<DoorSpec>,
    pub windows: Vec<WindowSpec>,
    pub staircases: Vec<StairSpec>,
    pub furniture: Vec<FurnitureSpec>,
}
