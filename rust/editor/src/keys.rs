// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity keys for the editor arena
//!
//! Keys are generational `slotmap` indices: a key to an erased entity never
//! resolves to a later one.

use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    pub struct WallKey;
    pub struct RoomKey;
    pub struct DoorKey;
    pub struct WindowKey;
    pub struct StairKey;
    pub struct FurnitureKey;
}

/// A key that can reference any editor entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Wall(WallKey),
    Room(RoomKey),
    Door(DoorKey),
    Window(WindowKey),
    Staircase(StairKey),
    Furniture(FurnitureKey),
}

impl EntityKey {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityKey::Wall(_) => EntityKind::Wall,
            EntityKey::Room(_) => EntityKind::Room,
            EntityKey::Door(_) => EntityKind::Door,
            EntityKey::Window(_) => EntityKind::Window,
            EntityKey::Staircase(_) => EntityKind::Staircase,
            EntityKey::Furniture(_) => EntityKind::Furniture,
        }
    }
}

macro_rules! impl_from_key {
    ($($key:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$key> for EntityKey {
                fn from(key: $key) -> Self {
                    EntityKey::$variant(key)
                }
            }
        )*
    };
}

impl_from_key! {
    WallKey => Wall,
    RoomKey => Room,
    DoorKey => Door,
    WindowKey => Window,
    StairKey => Staircase,
    FurnitureKey => Furniture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Wall,
    Room,
    Door,
    Window,
    Staircase,
    Furniture,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Wall => "wall",
            EntityKind::Room => "room",
            EntityKind::Door => "door",
            EntityKind::Window => "window",
            EntityKind::Staircase => "staircase",
            EntityKind::Furniture => "furniture",
        };
        f.write_str(name)
    }
}
