//! Floors, rooms and canvases: switching, naming, delete/restore and
//! undo/redo across them.

use roomkit_core::{CanvasKey, FloorDef, RoomDef};
use tracing::info;

use super::DesignerState;
use crate::document::CanvasDocument;
use crate::history::DeletedCanvas;
use crate::interaction::Action;

/// A canvas as shown in a room's canvas list.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSummary {
    pub key: CanvasKey,
    pub name: String,
    pub unit_count: usize,
    pub is_active: bool,
}

/// Lowercase ASCII id from a display name, e.g. "Master Bedroom" -> "master-bedroom".
fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        String::from("item")
    } else {
        slug.to_string()
    }
}

/// `base`, or `base-2`, `base-3`, ... whichever is not taken.
fn unique_id(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|id| !taken(id))
        .unwrap_or_else(|| base.to_string())
}

impl DesignerState {
    /// Every known canvas, in key order.
    pub fn canvas_keys(&self) -> Vec<CanvasKey> {
        let mut keys: Vec<CanvasKey> = self.stored.keys().cloned().collect();
        keys.push(self.active_key.clone());
        keys.sort();
        keys.dedup();
        keys
    }

    /// Canvases of one room, by index.
    pub fn room_canvas_keys(&self, floor_id: &str, room_id: &str) -> Vec<CanvasKey> {
        self.canvas_keys()
            .into_iter()
            .filter(|k| k.floor_id == floor_id && k.room_id == room_id)
            .collect()
    }

    pub fn document_for(&self, key: &CanvasKey) -> Option<&CanvasDocument> {
        if key == &self.active_key {
            Some(&self.document)
        } else {
            self.stored.get(key)
        }
    }

    /// Display name of a canvas: the override if set, otherwise the first
    /// unit's type numbered among same-type canvases of the room
    /// ("Wardrobe 2"), or "Canvas N" while empty.
    pub fn canvas_name(&self, key: &CanvasKey) -> String {
        if let Some(name) = self.canvas_names.get(key) {
            return name.clone();
        }
        let Some(unit_type) = self.document_for(key).and_then(CanvasDocument::primary_unit_type)
        else {
            return format!("Canvas {}", key.canvas_index + 1);
        };
        let ordinal = self
            .room_canvas_keys(&key.floor_id, &key.room_id)
            .iter()
            .filter(|k| {
                self.document_for(k)
                    .and_then(CanvasDocument::primary_unit_type)
                    == Some(unit_type)
            })
            .position(|k| k == key)
            .map_or(1, |i| i + 1);
        format!("{} {}", unit_type.label(), ordinal)
    }

    pub fn list_canvases(&self, floor_id: &str, room_id: &str) -> Vec<CanvasSummary> {
        self.room_canvas_keys(floor_id, room_id)
            .into_iter()
            .map(|key| CanvasSummary {
                name: self.canvas_name(&key),
                unit_count: self.document_for(&key).map_or(0, |d| d.units.len()),
                is_active: key == self.active_key,
                key,
            })
            .collect()
    }

    /// Makes `key` the active canvas: stores the outgoing canvas, loads the
    /// incoming one (or starts it empty), and resets transient state and
    /// history.
    pub fn switch_canvas(&mut self, key: CanvasKey) -> Vec<Action> {
        if key == self.active_key {
            return Vec::new();
        }
        let mut actions = self.settle_gesture();

        let incoming = self.stored.remove(&key).unwrap_or_default();
        let outgoing = std::mem::replace(&mut self.document, incoming);
        let previous = std::mem::replace(&mut self.active_key, key);
        self.stored.insert(previous.clone(), outgoing);
        self.reset_transient();

        info!(from = %previous, to = %self.active_key, "Switched canvas");
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Switches to the lowest-index canvas of a room, or its index 0.
    pub fn switch_room(&mut self, floor_id: &str, room_id: &str) -> Vec<Action> {
        let key = self
            .room_canvas_keys(floor_id, room_id)
            .into_iter()
            .next()
            .unwrap_or_else(|| CanvasKey::new(floor_id, room_id, 0));
        self.switch_canvas(key)
    }

    /// Adds an empty canvas at the next free index of the active room.
    /// The active canvas does not change.
    pub fn add_canvas(&mut self) -> CanvasKey {
        let room_keys = self.room_canvas_keys(&self.active_key.floor_id, &self.active_key.room_id);
        let deleted = self.deleted_canvas.as_ref().map(|d| &d.key);
        let key = (0..)
            .map(|i| self.active_key.with_index(i))
            .find(|k| !room_keys.contains(k) && deleted != Some(k))
            .unwrap_or_else(|| self.active_key.clone());
        self.stored.insert(key.clone(), CanvasDocument::new());
        self.is_modified = true;
        info!(canvas = %key, "Added canvas");
        key
    }

    /// Sets or clears (`None` or blank) a canvas name override.
    pub fn rename_canvas(&mut self, key: &CanvasKey, name: Option<&str>) -> bool {
        if self.document_for(key).is_none() {
            return false;
        }
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => {
                self.canvas_names.insert(key.clone(), name.to_string());
            }
            None => {
                self.canvas_names.remove(key);
            }
        }
        self.is_modified = true;
        true
    }

    /// Deletes a canvas, keeping it in the one-slot deleted record so the
    /// next undo can restore it. Deleting the active canvas first moves to
    /// another canvas of the same room, or a fresh index 0.
    pub fn delete_canvas(&mut self, key: &CanvasKey) -> Vec<Action> {
        if self.document_for(key).is_none() {
            return Vec::new();
        }
        let mut actions = self.settle_gesture();
        let display_name = self.canvas_name(key);
        let name_override = self.canvas_names.remove(key);

        let document = if key == &self.active_key {
            let fallback = self
                .room_canvas_keys(&key.floor_id, &key.room_id)
                .into_iter()
                .find(|k| k != key)
                .unwrap_or_else(|| key.with_index(0));
            let incoming = self.stored.remove(&fallback).unwrap_or_default();
            let outgoing = std::mem::replace(&mut self.document, incoming);
            self.active_key = fallback;
            self.reset_transient();
            outgoing
        } else {
            self.stored.remove(key).unwrap_or_default()
        };

        info!(canvas = %key, name = %display_name, active = %self.active_key, "Deleted canvas");
        self.deleted_canvas = Some(DeletedCanvas {
            key: key.clone(),
            document,
            name_override,
            display_name,
        });
        self.is_modified = true;
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Undoes the last canvas deletion if there is one, otherwise the last
    /// committed change on the active canvas.
    pub fn undo(&mut self) -> Vec<Action> {
        let mut actions = self.settle_gesture();
        if let Some(deleted) = self.deleted_canvas.take() {
            actions.extend(self.restore_deleted(deleted));
            return actions;
        }
        let Some(entry) = self.history.undo() else {
            return actions;
        };
        info!(canvas = %self.active_key, description = %entry.description, "Undo");
        self.document = entry.snapshot.clone();
        self.interaction.clear_transient();
        self.is_modified = true;
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let mut actions = self.settle_gesture();
        let Some(entry) = self.history.redo() else {
            return actions;
        };
        info!(canvas = %self.active_key, description = %entry.description, "Redo");
        self.document = entry.snapshot.clone();
        self.interaction.clear_transient();
        self.is_modified = true;
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Adds a floor and returns its id.
    pub fn add_floor(&mut self, name: &str) -> String {
        let id = unique_id(&slugify(name), |id| self.floors.iter().any(|f| f.id == id));
        self.floors.push(FloorDef {
            id: id.clone(),
            name: name.trim().to_string(),
        });
        self.is_modified = true;
        info!(floor = %id, "Added floor");
        id
    }

    /// Adds a room to an existing floor and returns its id.
    pub fn add_room(&mut self, floor_id: &str, name: &str) -> Option<String> {
        if !self.floors.iter().any(|f| f.id == floor_id) {
            return None;
        }
        let id = unique_id(&slugify(name), |id| {
            self.rooms.iter().any(|r| r.floor_id == floor_id && r.id == id)
        });
        self.rooms.push(RoomDef {
            id: id.clone(),
            floor_id: floor_id.to_string(),
            name: name.trim().to_string(),
        });
        self.is_modified = true;
        info!(floor = floor_id, room = %id, "Added room");
        Some(id)
    }

    pub fn rooms_on_floor(&self, floor_id: &str) -> Vec<&RoomDef> {
        self.rooms.iter().filter(|r| r.floor_id == floor_id).collect()
    }

    /// Puts a deleted canvas back without changing the active canvas. If its
    /// key now holds drawn content, it moves to the next free index. The
    /// canvas keeps the name it had when it was deleted.
    fn restore_deleted(&mut self, deleted: DeletedCanvas) -> Vec<Action> {
        let DeletedCanvas {
            key,
            document,
            name_override,
            display_name,
        } = deleted;

        let occupied = |state: &Self, k: &CanvasKey| {
            state.document_for(k).is_some_and(|d| !d.is_empty())
        };
        let key = if occupied(self, &key) {
            (0..)
                .map(|i| key.with_index(i))
                .find(|k| self.document_for(k).is_none())
                .unwrap_or_else(|| key.clone())
        } else {
            key
        };

        if key == self.active_key {
            self.document = document;
            self.reset_transient();
        } else {
            self.stored.insert(key.clone(), document);
        }
        match name_override {
            Some(name) => {
                self.canvas_names.insert(key.clone(), name);
            }
            None => {
                self.canvas_names.remove(&key);
            }
        }
        // A new index or changed neighbours would derive a different name.
        if self.canvas_name(&key) != display_name {
            self.canvas_names.insert(key.clone(), display_name.clone());
        }
        self.is_modified = true;
        info!(canvas = %key, name = %display_name, "Restored deleted canvas");
        vec![Action::RenderNeeded]
    }

    /// Clears gesture, selection and active unit, and restarts history from
    /// the current document.
    pub(super) fn reset_transient(&mut self) {
        self.interaction.clear_transient();
        self.history.reset(self.document.clone());
    }
}
