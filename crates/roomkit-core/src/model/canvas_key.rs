//! Addressing for independent unit collections: floors, rooms and canvases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Composite address of one canvas: `(floor, room, canvas index)`.
///
/// Ordered by floor, then room, then index, so canvases of one room sort
/// together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanvasKey {
    pub floor_id: String,
    pub room_id: String,
    pub canvas_index: u32,
}

impl CanvasKey {
    pub fn new(floor_id: impl Into<String>, room_id: impl Into<String>, canvas_index: u32) -> Self {
        Self {
            floor_id: floor_id.into(),
            room_id: room_id.into(),
            canvas_index,
        }
    }

    /// Whether both keys address canvases of the same room.
    pub fn same_room(&self, other: &CanvasKey) -> bool {
        self.floor_id == other.floor_id && self.room_id == other.room_id
    }

    /// Another canvas of the same room.
    pub fn with_index(&self, canvas_index: u32) -> Self {
        Self {
            canvas_index,
            ..self.clone()
        }
    }
}

impl Default for CanvasKey {
    fn default() -> Self {
        Self::new("ground", "room-1", 0)
    }
}

impl fmt::Display for CanvasKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.floor_id, self.room_id, self.canvas_index)
    }
}

impl FromStr for CanvasKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidCanvasKey {
            key: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.trim().split('/').collect();
        let [floor, room, index] = parts.as_slice() else {
            return Err(invalid("expected floor/room/index"));
        };
        if floor.is_empty() || room.is_empty() {
            return Err(invalid("floor and room must not be empty"));
        }
        let index = index
            .parse::<u32>()
            .map_err(|_| invalid("canvas index must be a non-negative integer"))?;
        Ok(Self::new(*floor, *room, index))
    }
}

/// A user-defined floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorDef {
    pub id: String,
    pub name: String,
}

/// A user-defined room on a floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDef {
    pub id: String,
    pub floor_id: String,
    pub name: String,
}
