// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface materials attached to scene faces

use crate::furniture::FurnitureKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels scaled to `[0, 1]`
    pub fn to_unit(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| c as f32 / 255.0)
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Named colours shared by the scene and the raster export
pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const BEIGE: Color = Color::rgb(245, 245, 220);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const MOCCASIN: Color = Color::rgb(0xFF, 0xE4, 0xB5);
    pub const SADDLE_BROWN: Color = Color::rgb(0x8B, 0x45, 0x13);
    pub const DARK_BROWN: Color = Color::rgb(0x65, 0x43, 0x21);
    pub const BROWN: Color = Color::rgb(165, 42, 42);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const DARK_RED: Color = Color::rgb(0x8B, 0, 0);
}

/// What a scene face is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Floor,
    Wall,
    DoorOpening,
    DoorPanel,
    WindowOpening,
    WindowFrame,
    Stair,
    Furniture(FurnitureKind),
}

impl Material {
    pub fn color(&self) -> Color {
        match self {
            Material::Floor => palette::GRAY,
            Material::Wall => palette::BEIGE,
            Material::DoorOpening => palette::DARK_BROWN,
            Material::DoorPanel => palette::SADDLE_BROWN,
            Material::WindowOpening => palette::LIGHT_BLUE,
            Material::WindowFrame => palette::WHITE,
            Material::Stair => palette::MOCCASIN,
            Material::Furniture(kind) => kind.color(),
        }
    }

    /// Opacity in `[0, 1]`
    pub fn opacity(&self) -> f32 {
        match self {
            Material::Floor | Material::DoorOpening => 0.3,
            Material::Wall | Material::WindowFrame => 0.7,
            Material::WindowOpening => 0.5,
            Material::DoorPanel => 0.9,
            Material::Stair | Material::Furniture(_) => 0.8,
        }
    }

    /// Identifier used for MTL material names
    pub fn name(&self) -> String {
        match self {
            Material::Floor => "floor".into(),
            Material::Wall => "wall".into(),
            Material::DoorOpening => "door_opening".into(),
            Material::DoorPanel => "door_panel".into(),
            Material::WindowOpening => "window_opening".into(),
            Material::WindowFrame => "window_frame".into(),
            Material::Stair => "stair".into(),
            Material::Furniture(kind) => format!("furniture_{}", kind.key()),
        }
    }
}
