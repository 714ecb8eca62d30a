// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The editor model: the single owner of every authored entity.
//!
//! [`EditorModel`] keeps one slot map per entity kind plus a paint order
//! list, and interprets pointer gestures (press, drag, release) according to
//! the active [`Tool`]. Screen primitives are never stored; they are
//! recomputed from the records by [`crate::projection::project`], and
//! hit-testing (erase, handle and furniture picking) runs against that
//! projection.
//!
//! Every coordinate is snapped to the grid when an entity is committed, so
//! stored geometry never carries raw pointer positions.

use slotmap::{Key, SlotMap};
use tracing::{debug, trace};

use floorplan3d::{FurnitureKind, Rect2};
use nalgebra::Point2;

use crate::config::EditorConfig;
use crate::entities::{Door, FurnitureItem, Room, Staircase, Wall, Window};
use crate::error::Result;
use crate::grid::{snap_point, snap_rect};
use crate::keys::*;
use crate::projection::{self, pick, Primitive, Role};
use crate::tool::Tool;

/// Gesture in progress between a press and its release
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Rubber-band wall, room or staircase
    Drawing {
        tool: Tool,
        start: Point2<f64>,
        current: Point2<f64>,
    },
    ResizingDoor {
        door: DoorKey,
        press: Point2<f64>,
        width_at_press: f64,
    },
    MovingFurniture {
        item: FurnitureKey,
        press: Point2<f64>,
        anchor_at_press: Point2<f64>,
        current: Point2<f64>,
    },
}

/// What a pointer event did to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Created(EntityKey),
    Updated(EntityKey),
    Removed(EntityKey),
}

#[derive(Debug, Clone)]
pub struct EditorModel {
    config: EditorConfig,
    tool: Tool,
    furniture_type: Option<FurnitureKind>,

    pub(crate) walls: SlotMap<WallKey, Wall>,
    pub(crate) rooms: SlotMap<RoomKey, Room>,
    pub(crate) doors: SlotMap<DoorKey, Door>,
    pub(crate) windows: SlotMap<WindowKey, Window>,
    pub(crate) staircases: SlotMap<StairKey, Staircase>,
    pub(crate) furniture: SlotMap<FurnitureKey, FurnitureItem>,

    /// Paint order, bottom first
    order: Vec<EntityKey>,
    gesture: Gesture,
}

impl Default for EditorModel {
    fn default() -> Self {
        Self::with_checked_config(EditorConfig::default())
    }
}

impl EditorModel {
    /// Empty model on a validated `config`
    pub fn new(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_checked_config(config))
    }

    fn with_checked_config(config: EditorConfig) -> Self {
        Self {
            config,
            tool: Tool::default(),
            furniture_type: None,
            walls: SlotMap::with_key(),
            rooms: SlotMap::with_key(),
            doors: SlotMap::with_key(),
            windows: SlotMap::with_key(),
            staircases: SlotMap::with_key(),
            furniture: SlotMap::with_key(),
            order: Vec::new(),
            gesture: Gesture::Idle,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selected_furniture_type(&self) -> Option<FurnitureKind> {
        self.furniture_type
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Switch tools, abandoning any gesture in progress
    ///
    /// Leaving the furniture tool clears the selected furniture type.
    pub fn set_tool(&mut self, tool: Tool) {
        self.cancel_gesture();
        if tool != Tool::Furniture {
            self.furniture_type = None;
        }
        self.tool = tool;
        debug!(%tool, "tool selected");
    }

    /// Select a catalog entry for placement; activates the furniture tool
    pub fn select_furniture_type(&mut self, kind: FurnitureKind) {
        self.cancel_gesture();
        self.furniture_type = Some(kind);
        self.tool = Tool::Furniture;
        debug!(%kind, "furniture type selected");
    }

    pub fn cancel_gesture(&mut self) {
        if self.gesture != Gesture::Idle {
            trace!(gesture = ?self.gesture, "gesture abandoned");
        }
        self.gesture = Gesture::Idle;
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Pointer pressed at `p`
    ///
    /// Placement tools (door, window, furniture) and erase act immediately;
    /// the drawing tools only record the start point.
    pub fn press(&mut self, p: Point2<f64>) -> Option<Edit> {
        self.cancel_gesture();

        match self.tool {
            Tool::Erase => self.erase_at(p).map(Edit::Removed),
            Tool::Door => {
                if let Some(door) = self.door_handle_at(p) {
                    let width_at_press = self.doors.get(door)?.width;
                    self.gesture = Gesture::ResizingDoor {
                        door,
                        press: p,
                        width_at_press,
                    };
                    return None;
                }
                Some(Edit::Created(self.add_door(p).into()))
            }
            Tool::Window => Some(Edit::Created(self.add_window(p).into())),
            Tool::Furniture => {
                if let Some(item) = self.furniture_at(p) {
                    let anchor_at_press = self.furniture.get(item)?.anchor;
                    self.gesture = Gesture::MovingFurniture {
                        item,
                        press: p,
                        anchor_at_press,
                        current: p,
                    };
                    return None;
                }
                let kind = self.furniture_type?;
                Some(Edit::Created(self.add_furniture(kind, p).into()))
            }
            tool @ (Tool::Wall | Tool::Room | Tool::Staircase) => {
                self.gesture = Gesture::Drawing {
                    tool,
                    start: p,
                    current: p,
                };
                None
            }
        }
    }

    /// Pointer dragged to `p` while pressed
    ///
    /// Door resizing applies immediately; width follows twice the horizontal
    /// drag from the press point, so it grows symmetrically about the anchor.
    pub fn drag(&mut self, p: Point2<f64>) -> Option<Edit> {
        match &mut self.gesture {
            Gesture::Idle => None,
            Gesture::Drawing { current, .. } | Gesture::MovingFurniture { current, .. } => {
                *current = p;
                None
            }
            Gesture::ResizingDoor {
                door,
                press,
                width_at_press,
            } => {
                let (door, width) = (*door, *width_at_press + 2.0 * (p.x - press.x));
                self.resize_door(door, width)
                    .then_some(Edit::Updated(door.into()))
            }
        }
    }

    /// Pointer released at `p`; commits the gesture if it qualifies
    pub fn release(&mut self, p: Point2<f64>) -> Option<Edit> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => None,
            Gesture::Drawing { tool, start, .. } => self.commit_drawing(tool, start, p),
            Gesture::ResizingDoor {
                door,
                press,
                width_at_press,
            } => self
                .resize_door(door, width_at_press + 2.0 * (p.x - press.x))
                .then_some(Edit::Updated(door.into())),
            Gesture::MovingFurniture {
                item,
                press,
                anchor_at_press,
                ..
            } => self
                .move_furniture(item, anchor_at_press + (p - press))
                .then_some(Edit::Updated(item.into())),
        }
    }

    fn commit_drawing(&mut self, tool: Tool, start: Point2<f64>, end: Point2<f64>) -> Option<Edit> {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        let min_rect = self.config.rect_min_size;

        let created: Option<EntityKey> = match tool {
            Tool::Wall if (end - start).norm() > self.config.wall_min_length => {
                self.add_wall(start, end).map(Into::into)
            }
            Tool::Room if dx > min_rect && dy > min_rect => {
                self.add_room(start, end).map(Into::into)
            }
            Tool::Staircase if dx > min_rect && dy > min_rect => {
                self.add_staircase(start, end).map(Into::into)
            }
            _ => None,
        };

        if created.is_none() {
            trace!(%tool, dx, dy, "gesture below commit threshold, discarded");
        }
        created.map(Edit::Created)
    }

    // ========================================================================
    // Explicit adds
    // ========================================================================

    /// Add a wall between two snapped endpoints
    ///
    /// Returns `None` when both endpoints snap onto the same grid point.
    pub fn add_wall(&mut self, a: Point2<f64>, b: Point2<f64>) -> Option<WallKey> {
        let grid = self.config.grid_size;
        let wall = Wall {
            start: snap_point(a, grid),
            end: snap_point(b, grid),
        };
        if wall.start == wall.end {
            trace!(x = wall.start.x, y = wall.start.y, "wall collapsed onto one grid point");
            return None;
        }

        let key = self.walls.insert(wall);
        self.order.push(key.into());
        debug!(
            x1 = wall.start.x,
            y1 = wall.start.y,
            x2 = wall.end.x,
            y2 = wall.end.y,
            "wall added"
        );
        Some(key)
    }

    /// Add a room: four walls along the snapped rectangle plus its outline
    ///
    /// Rooms smaller than the minimum size in either dimension add nothing.
    pub fn add_room(&mut self, a: Point2<f64>, b: Point2<f64>) -> Option<RoomKey> {
        let rect = snap_rect(a, b, self.config.grid_size);
        if rect.width() < self.config.rect_min_size || rect.height() < self.config.rect_min_size {
            trace!(w = rect.width(), h = rect.height(), "room too small");
            return None;
        }

        for side in rect.sides() {
            self.add_wall(side.start, side.end);
        }
        Some(self.add_room_outline(rect))
    }

    /// Room record without its walls, used when loading documents
    pub(crate) fn add_room_outline(&mut self, rect: Rect2) -> RoomKey {
        let rect = snap_rect(rect.min, rect.max, self.config.grid_size);
        let key = self.rooms.insert(Room { rect });
        self.order.push(key.into());
        debug!(w = rect.width(), h = rect.height(), "room added");
        key
    }

    /// Place a door of the default width
    pub fn add_door(&mut self, p: Point2<f64>) -> DoorKey {
        let door = Door {
            anchor: snap_point(p, self.config.grid_size),
            width: self.config.default_door_width,
        };
        let key = self.doors.insert(door);
        self.order.push(key.into());
        debug!(x = door.anchor.x, y = door.anchor.y, "door added");
        key
    }

    pub fn add_window(&mut self, p: Point2<f64>) -> WindowKey {
        let window = Window {
            anchor: snap_point(p, self.config.grid_size),
        };
        let key = self.windows.insert(window);
        self.order.push(key.into());
        debug!(x = window.anchor.x, y = window.anchor.y, "window added");
        key
    }

    /// Add a staircase over the snapped rectangle; empty rectangles add nothing
    pub fn add_staircase(&mut self, a: Point2<f64>, b: Point2<f64>) -> Option<StairKey> {
        let rect = snap_rect(a, b, self.config.grid_size);
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            trace!("staircase collapsed after snapping");
            return None;
        }

        let stair = Staircase { rect };
        let key = self.staircases.insert(stair);
        self.order.push(key.into());
        debug!(
            direction = ?stair.direction(),
            steps = stair.step_count(&self.config.stairs),
            "staircase added"
        );
        Some(key)
    }

    pub fn add_furniture(&mut self, kind: FurnitureKind, p: Point2<f64>) -> FurnitureKey {
        let item = FurnitureItem::new(kind, snap_point(p, self.config.grid_size));
        let key = self.furniture.insert(item);
        self.order.push(key.into());
        debug!(%kind, x = item.anchor.x, y = item.anchor.y, "furniture added");
        key
    }

    // ========================================================================
    // In-place mutation and removal
    // ========================================================================

    /// Set a door's width, clamped to the configured range
    pub fn resize_door(&mut self, key: DoorKey, width: f64) -> bool {
        let width = self.config.clamp_door_width(width);
        match self.doors.get_mut(key) {
            Some(door) => {
                door.width = width;
                true
            }
            None => false,
        }
    }

    /// Move a furniture item; the new anchor is snapped to the grid
    pub fn move_furniture(&mut self, key: FurnitureKey, anchor: Point2<f64>) -> bool {
        let anchor = snap_point(anchor, self.config.grid_size);
        match self.furniture.get_mut(key) {
            Some(item) => {
                item.anchor = anchor;
                true
            }
            None => false,
        }
    }

    /// Remove the topmost entity drawn within the erase tolerance of `p`
    pub fn erase_at(&mut self, p: Point2<f64>) -> Option<EntityKey> {
        let primitives = self.primitives();
        let owner = pick(&primitives, p, self.config.erase_tolerance, |_| true)?.owner?;
        self.remove(owner).then(|| {
            debug!(kind = %owner.kind(), "entity erased");
            owner
        })
    }

    pub fn remove(&mut self, key: EntityKey) -> bool {
        let removed = match key {
            EntityKey::Wall(k) => self.walls.remove(k).is_some(),
            EntityKey::Room(k) => self.rooms.remove(k).is_some(),
            EntityKey::Door(k) => self.doors.remove(k).is_some(),
            EntityKey::Window(k) => self.windows.remove(k).is_some(),
            EntityKey::Staircase(k) => self.staircases.remove(k).is_some(),
            EntityKey::Furniture(k) => self.furniture.remove(k).is_some(),
        };
        if removed {
            self.order.retain(|k| *k != key);
            if self.gesture_refers_to(key) {
                self.gesture = Gesture::Idle;
            }
        }
        removed
    }

    /// Discard every entity, returning the collections to their initial state
    pub fn clear(&mut self) {
        self.walls.clear();
        self.rooms.clear();
        self.doors.clear();
        self.windows.clear();
        self.staircases.clear();
        self.furniture.clear();
        self.order.clear();
        self.gesture = Gesture::Idle;
        debug!("model cleared");
    }

    fn gesture_refers_to(&self, key: EntityKey) -> bool {
        match self.gesture {
            Gesture::ResizingDoor { door, .. } => key == EntityKey::Door(door),
            Gesture::MovingFurniture { item, .. } => key == EntityKey::Furniture(item),
            _ => false,
        }
    }

    // ========================================================================
    // Picking
    // ========================================================================

    /// Screen primitives for the current state, bottom first
    pub fn primitives(&self) -> Vec<Primitive> {
        projection::project(self)
    }

    /// Door whose resize handle lies within the handle tolerance of `p`
    pub fn door_handle_at(&self, p: Point2<f64>) -> Option<DoorKey> {
        let primitives = self.primitives();
        let hit = pick(&primitives, p, self.config.handle_tolerance, |prim| {
            matches!(prim.role, Role::Handle(_))
        })?;
        match hit.owner? {
            EntityKey::Door(door) => Some(door),
            _ => None,
        }
    }

    /// Furniture item whose body lies within the pick tolerance of `p`
    pub fn furniture_at(&self, p: Point2<f64>) -> Option<FurnitureKey> {
        let primitives = self.primitives();
        let hit = pick(&primitives, p, self.config.furniture_pick_tolerance, |prim| {
            prim.role == Role::Body && matches!(prim.owner, Some(EntityKey::Furniture(_)))
        })?;
        match hit.owner? {
            EntityKey::Furniture(item) => Some(item),
            _ => None,
        }
    }

    /// Where a furniture item is drawn, following an in-progress move
    pub fn furniture_display_anchor(&self, key: FurnitureKey) -> Option<Point2<f64>> {
        let item = self.furniture.get(key)?;
        match self.gesture {
            Gesture::MovingFurniture {
                item: moving,
                press,
                anchor_at_press,
                current,
            } if moving == key => Some(snap_point(
                anchor_at_press + (current - press),
                self.config.grid_size,
            )),
            _ => Some(item.anchor),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Every entity key in paint order, bottom first
    pub fn order(&self) -> &[EntityKey] {
        &self.order
    }

    pub fn contains(&self, key: EntityKey) -> bool {
        match key {
            EntityKey::Wall(k) => self.walls.contains_key(k),
            EntityKey::Room(k) => self.rooms.contains_key(k),
            EntityKey::Door(k) => self.doors.contains_key(k),
            EntityKey::Window(k) => self.windows.contains_key(k),
            EntityKey::Staircase(k) => self.staircases.contains_key(k),
            EntityKey::Furniture(k) => self.furniture.contains_key(k),
        }
    }

    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn wall(&self, key: WallKey) -> Option<&Wall> {
        self.walls.get(key)
    }

    pub fn room(&self, key: RoomKey) -> Option<&Room> {
        self.rooms.get(key)
    }

    pub fn door(&self, key: DoorKey) -> Option<&Door> {
        self.doors.get(key)
    }

    pub fn window(&self, key: WindowKey) -> Option<&Window> {
        self.windows.get(key)
    }

    pub fn staircase(&self, key: StairKey) -> Option<&Staircase> {
        self.staircases.get(key)
    }

    pub fn furniture_item(&self, key: FurnitureKey) -> Option<&FurnitureItem> {
        self.furniture.get(key)
    }

    pub fn walls(&self) -> impl Iterator<Item = (WallKey, &Wall)> + '_ {
        ordered(&self.order, &self.walls, |k| match k {
            EntityKey::Wall(k) => Some(k),
            _ => None,
        })
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomKey, &Room)> + '_ {
        ordered(&self.order, &self.rooms, |k| match k {
            EntityKey::Room(k) => Some(k),
            _ => None,
        })
    }

    pub fn doors(&self) -> impl Iterator<Item = (DoorKey, &Door)> + '_ {
        ordered(&self.order, &self.doors, |k| match k {
            EntityKey::Door(k) => Some(k),
            _ => None,
        })
    }

    pub fn windows(&self) -> impl Iterator<Item = (WindowKey, &Window)> + '_ {
        ordered(&self.order, &self.windows, |k| match k {
            EntityKey::Window(k) => Some(k),
            _ => None,
        })
    }

    pub fn staircases(&self) -> impl Iterator<Item = (StairKey, &Staircase)> + '_ {
        ordered(&self.order, &self.staircases, |k| match k {
            EntityKey::Staircase(k) => Some(k),
            _ => None,
        })
    }

    pub fn furniture(&self) -> impl Iterator<Item = (FurnitureKey, &FurnitureItem)> + '_ {
        ordered(&self.order, &self.furniture, |k| match k {
            EntityKey::Furniture(k) => Some(k),
            _ => None,
        })
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn staircase_count(&self) -> usize {
        self.staircases.len()
    }

    pub fn furniture_count(&self) -> usize {
        self.furniture.len()
    }
}

fn ordered<'a, K: Key, V>(
    order: &'a [EntityKey],
    map: &'a SlotMap<K, V>,
    select: fn(EntityKey) -> Option<K>,
) -> impl Iterator<Item = (K, &'a V)> + 'a {
    order
        .iter()
        .filter_map(move |&key| select(key))
        .filter_map(move |key| map.get(key).map(|value| (key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    fn gesture(model: &mut EditorModel, a: Point2<f64>, b: Point2<f64>) -> Option<Edit> {
        model.press(a);
        model.drag(b);
        model.release(b)
    }

    #[test]
    fn test_wall_gesture_snaps_endpoints() {
        let mut model = EditorModel::default();
        let edit = gesture(&mut model, p(103.0, 97.0), p(291.0, 112.0));
        assert!(matches!(edit, Some(Edit::Created(EntityKey::Wall(_)))));

        let (_, wall) = model.walls().next().unwrap();
        assert_eq!(wall.start, p(100.0, 100.0));
        assert_eq!(wall.end, p(300.0, 120.0));
    }

    #[test]
    fn test_short_wall_gesture_is_discarded() {
        let mut model = EditorModel::default();
        assert_eq!(gesture(&mut model, p(100.0, 100.0), p(103.0, 103.0)), None);
        // Long enough to commit but both ends snap to (100, 100)
        assert_eq!(gesture(&mut model, p(95.0, 100.0), p(105.0, 100.0)), None);
        assert!(model.is_empty());
    }

    #[test]
    fn test_room_gesture_adds_four_walls() {
        let mut model = EditorModel::default();
        model.set_tool(Tool::Room);
        let edit = gesture(&mut model, p(100.0, 100.0), p(300.0, 240.0));
        assert!(matches!(edit, Some(Edit::Created(EntityKey::Room(_)))));
        assert_eq!(model.wall_count(), 4);
        assert_eq!(model.room_count(), 1);
    }

    #[test]
    fn test_small_room_gesture_adds_nothing() {
        let mut model = EditorModel::default();
        model.set_tool(Tool::Room);
        assert_eq!(gesture(&mut model, p(100.0, 100.0), p(300.0, 115.0)), None);
        assert_eq!(gesture(&mut model, p(100.0, 100.0), p(120.0, 300.0)), None);
        assert!(model.is_empty());

        // add_room checks the snapped size as well
        assert_eq!(model.add_room(p(100.0, 100.0), p(109.0, 300.0)), None);
        assert!(model.is_empty());
    }

    #[test]
    fn test_door_press_places_default_width() {
        let mut model = EditorModel::default();
        model.set_tool(Tool::Door);
        let Some(Edit::Created(EntityKey::Door(key))) = model.press(p(205.0, 98.0)) else {
            panic!("expected a door");
        };
        model.release(p(205.0, 98.0));

        let door = model.door(key).unwrap();
        assert_eq!(door.anchor, p(200.0, 100.0));
        assert_eq!(door.width, 30.0);
    }

    #[test]
    fn test_door_handle_drag_resizes() {
        let mut model = EditorModel::default();
        let door = model.add_door(p(200.0, 100.0));
        model.set_tool(Tool::Door);

        // Right handle sits at x = 215
        assert_eq!(model.press(p(216.0, 101.0)), None);
        assert!(matches!(model.gesture(), Gesture::ResizingDoor { .. }));
        assert_eq!(model.drag(p(226.0, 101.0)), Some(Edit::Updated(door.into())));
        assert_eq!(model.door(door).unwrap().width, 50.0);

        // Width derives from the press, not from the previous drag
        model.drag(p(221.0, 101.0));
        assert_eq!(model.door(door).unwrap().width, 40.0);

        model.release(p(500.0, 101.0));
        assert_eq!(model.door(door).unwrap().width, 80.0);
        assert_eq!(model.door_count(), 1);
    }

    #[test]
    fn test_door_resize_is_monotonic_and_clamped() {
        let mut model = EditorModel::default();
        let door = model.add_door(p(200.0, 100.0));
        model.set_tool(Tool::Door);
        model.press(p(215.0, 100.0));

        let mut previous = f64::NEG_INFINITY;
        let mut dx = -60.0;
        while dx <= 60.0 {
            model.drag(p(215.0 + dx, 100.0));
            let width = model.door(door).unwrap().width;
            assert!((15.0..=80.0).contains(&width));
            assert!(width >= previous);
            previous = width;
            dx += 0.5;
        }
        assert_eq!(previous, 80.0);
    }

    #[test]
    fn test_window_press_places_window() {
        let mut model = EditorModel::default();
        model.set_tool(Tool::Window);
        assert!(matches!(
            model.press(p(51.0, 49.0)),
            Some(Edit::Created(EntityKey::Window(_)))
        ));
        assert_eq!(model.windows().next().unwrap().1.anchor, p(60.0, 40.0));
    }

    #[test]
    fn test_furniture_needs_selected_type() {
        let mut model = EditorModel::default();
        model.set_tool(Tool::Furniture);
        assert_eq!(model.press(p(300.0, 300.0)), None);

        model.select_furniture_type(FurnitureKind::Bed);
        assert_eq!(model.tool(), Tool::Furniture);
        assert!(model.press(p(300.0, 300.0)).is_some());
        assert_eq!(model.furniture_count(), 1);
    }

    #[test]
    fn test_leaving_furniture_tool_clears_selection() {
        let mut model = EditorModel::default();
        model.select_furniture_type(FurnitureKind::Tv);
        model.set_tool(Tool::Furniture);
        assert_eq!(model.selected_furniture_type(), Some(FurnitureKind::Tv));
        model.set_tool(Tool::Wall);
        assert_eq!(model.selected_furniture_type(), None);
    }

    #[test]
    fn test_furniture_drag_moves_and_snaps_on_release() {
        let mut model = EditorModel::default();
        model.select_furniture_type(FurnitureKind::Chair);
        let item = model.add_furniture(FurnitureKind::Chair, p(300.0, 300.0));

        // Pressing on an existing item starts a move instead of placing
        assert_eq!(model.press(p(305.0, 302.0)), None);
        model.drag(p(350.0, 330.0));
        assert_eq!(model.furniture_item(item).unwrap().anchor, p(300.0, 300.0));
        assert_eq!(model.furniture_display_anchor(item), Some(p(340.0, 320.0)));

        assert_eq!(model.release(p(368.0, 341.0)), Some(Edit::Updated(item.into())));
        assert_eq!(model.furniture_item(item).unwrap().anchor, p(360.0, 340.0));
        assert_eq!(model.furniture_count(), 1);
    }

    #[test]
    fn test_staircase_gesture() {
        let mut model = EditorModel::default();
        model.set_tool(Tool::Staircase);
        assert!(gesture(&mut model, p(100.0, 100.0), p(250.0, 140.0)).is_some());
        let (_, stair) = model.staircases().next().unwrap();
        assert_eq!(stair.rect.width(), 160.0);
        assert_eq!(stair.step_count(&model.config().stairs), 10);

        assert_eq!(gesture(&mut model, p(100.0, 300.0), p(250.0, 310.0)), None);
        assert_eq!(model.staircase_count(), 1);
    }

    #[test]
    fn test_erase_takes_topmost() {
        let mut model = EditorModel::default();
        let wall = model.add_wall(p(100.0, 100.0), p(400.0, 100.0)).unwrap();
        let window = model.add_window(p(200.0, 100.0));
        model.set_tool(Tool::Erase);

        assert_eq!(model.press(p(200.0, 100.0)), Some(Edit::Removed(window.into())));
        assert_eq!(model.press(p(200.0, 100.0)), Some(Edit::Removed(wall.into())));
        assert_eq!(model.press(p(200.0, 100.0)), None);
        assert!(model.is_empty());
    }

    #[test]
    fn test_erased_key_is_stale() {
        let mut model = EditorModel::default();
        let wall = model.add_wall(p(0.0, 0.0), p(100.0, 0.0)).unwrap();
        assert!(model.remove(wall.into()));
        let other = model.add_wall(p(0.0, 0.0), p(100.0, 0.0)).unwrap();
        assert_ne!(wall, other);
        assert!(model.wall(wall).is_none());
        assert!(!model.remove(wall.into()));
    }

    #[test]
    fn test_clear_resets_collections() {
        let mut model = EditorModel::default();
        model.add_room(p(0.0, 0.0), p(200.0, 200.0));
        model.add_door(p(100.0, 0.0));
        model.set_tool(Tool::Staircase);
        model.press(p(10.0, 10.0));
        model.clear();

        assert!(model.is_empty());
        assert_eq!(model.wall_count(), 0);
        assert_eq!(*model.gesture(), Gesture::Idle);
        assert_eq!(model.tool(), Tool::Staircase);
    }

    #[test]
    fn test_tool_change_abandons_gesture() {
        let mut model = EditorModel::default();
        model.press(p(0.0, 0.0));
        model.set_tool(Tool::Room);
        assert_eq!(model.release(p(200.0, 200.0)), None);
        assert!(model.is_empty());
    }
}
