// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Furniture catalog and box extrusion
//!
//! The catalog is a closed enum; every lookup is an exhaustive match so a new
//! variant cannot be added without its dimensions, height and colour.
//! Footprints are in editor canvas units, heights in meters.

use crate::error::{FloorPlanError, Result};
use crate::material::{palette, Color};
use floorplan3d_geometry::{axis_aligned_box, Face};
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureKind {
    Sofa,
    DiningTable,
    Bed,
    Chair,
    Desk,
    Tv,
    Refrigerator,
    Cabinet,
    Bookshelf,
    Table,
    Wardrobe,
    Bathtub,
}

impl FurnitureKind {
    pub const ALL: [FurnitureKind; 12] = [
        FurnitureKind::Sofa,
        FurnitureKind::DiningTable,
        FurnitureKind::Bed,
        FurnitureKind::Chair,
        FurnitureKind::Desk,
        FurnitureKind::Tv,
        FurnitureKind::Refrigerator,
        FurnitureKind::Cabinet,
        FurnitureKind::Bookshelf,
        FurnitureKind::Table,
        FurnitureKind::Wardrobe,
        FurnitureKind::Bathtub,
    ];

    /// Stable key used in documents and on the command line
    pub const fn key(self) -> &'static str {
        match self {
            FurnitureKind::Sofa => "sofa",
            FurnitureKind::DiningTable => "dining_table",
            FurnitureKind::Bed => "bed",
            FurnitureKind::Chair => "chair",
            FurnitureKind::Desk => "desk",
            FurnitureKind::Tv => "tv",
            FurnitureKind::Refrigerator => "refrigerator",
            FurnitureKind::Cabinet => "cabinet",
            FurnitureKind::Bookshelf => "bookshelf",
            FurnitureKind::Table => "table",
            FurnitureKind::Wardrobe => "wardrobe",
            FurnitureKind::Bathtub => "bathtub",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            FurnitureKind::Sofa => "Sofa",
            FurnitureKind::DiningTable => "Dining Table",
            FurnitureKind::Bed => "Bed",
            FurnitureKind::Chair => "Chair",
            FurnitureKind::Desk => "Desk",
            FurnitureKind::Tv => "TV",
            FurnitureKind::Refrigerator => "Refrigerator",
            FurnitureKind::Cabinet => "Cabinet",
            FurnitureKind::Bookshelf => "Bookshelf",
            FurnitureKind::Table => "Table",
            FurnitureKind::Wardrobe => "Wardrobe",
            FurnitureKind::Bathtub => "Bathtub",
        }
    }

    /// `(width, depth)` in editor canvas units
    pub const fn footprint(self) -> (f64, f64) {
        match self {
            FurnitureKind::Sofa => (80.0, 40.0),
            FurnitureKind::DiningTable => (60.0, 60.0),
            FurnitureKind::Bed => (60.0, 80.0),
            FurnitureKind::Chair => (25.0, 25.0),
            FurnitureKind::Desk => (50.0, 30.0),
            FurnitureKind::Tv => (40.0, 25.0),
            FurnitureKind::Refrigerator => (30.0, 50.0),
            FurnitureKind::Cabinet => (40.0, 30.0),
            FurnitureKind::Bookshelf => (30.0, 50.0),
            FurnitureKind::Table => (40.0, 40.0),
            FurnitureKind::Wardrobe => (50.0, 60.0),
            FurnitureKind::Bathtub => (50.0, 30.0),
        }
    }

    /// Extrusion height in meters
    pub const fn height(self) -> f64 {
        match self {
            FurnitureKind::Sofa | FurnitureKind::Chair => 0.4,
            FurnitureKind::DiningTable | FurnitureKind::Desk | FurnitureKind::Table => 0.75,
            FurnitureKind::Bed | FurnitureKind::Bathtub => 0.5,
            FurnitureKind::Tv => 0.6,
            FurnitureKind::Refrigerator => 1.8,
            FurnitureKind::Cabinet => 0.9,
            FurnitureKind::Bookshelf => 1.5,
            FurnitureKind::Wardrobe => 2.0,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            FurnitureKind::Sofa
            | FurnitureKind::Chair
            | FurnitureKind::Cabinet
            | FurnitureKind::Table => palette::SADDLE_BROWN,
            FurnitureKind::DiningTable
            | FurnitureKind::Desk
            | FurnitureKind::Bookshelf
            | FurnitureKind::Wardrobe => palette::DARK_BROWN,
            FurnitureKind::Bed => Color::rgb(0x41, 0x69, 0xE1),
            FurnitureKind::Tv => palette::BLACK,
            FurnitureKind::Refrigerator => Color::rgb(0xC0, 0xC0, 0xC0),
            FurnitureKind::Bathtub => Color::rgb(0x87, 0xCE, 0xEB),
        }
    }
}

impl fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FurnitureKind {
    type Err = FloorPlanError;

    fn from_str(s: &str) -> Result<Self> {
        FurnitureKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| FloorPlanError::UnknownFurniture(s.to_string()))
    }
}

/// Check that every catalog entry has a usable footprint and height
pub fn validate_catalog() -> Result<()> {
    for kind in FurnitureKind::ALL {
        let (w, d) = kind.footprint();
        if !(w > 0.0 && d > 0.0 && kind.height() > 0.0) {
            return Err(FloorPlanError::InvalidConfig(format!(
                "furniture '{}' has a non-positive dimension",
                kind.key()
            )));
        }
        if kind.key().parse::<FurnitureKind>()? != kind {
            return Err(FloorPlanError::InvalidConfig(format!(
                "furniture key '{}' does not round-trip",
                kind.key()
            )));
        }
    }
    tracing::debug!(entries = FurnitureKind::ALL.len(), "furniture catalog validated");
    Ok(())
}

/// Axis-aligned box centered on `anchor`, both already in meters
///
/// The catalog footprint is converted with the pipeline's uniform `scale`.
pub fn extrude_furniture(kind: FurnitureKind, anchor: Point2<f64>, scale: f64) -> [Face; 6] {
    let (w, d) = kind.footprint();
    let half_w = w * scale / 2.0;
    let half_d = d * scale / 2.0;
    axis_aligned_box(
        Point3::new(anchor.x - half_w, anchor.y - half_d, 0.0),
        Point3::new(anchor.x + half_w, anchor.y + half_d, kind.height()),
    )
}
