//! Floor-plan entities: walls, floors, kitchen runs, openings, appliances,
//! measurements and imported models.
//!
//! These live in the same pixel space as units but are independent top-level
//! entities. A [`FloorPlan`] carries its own `scale_mm_per_px`, so different
//! floors may be drawn at different scales.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geometry::{Point, Rect};
use super::unit::GroupId;
use crate::constants::DEFAULT_WALL_THICKNESS_MM;
use crate::units::px_to_mm;

/// Unique identifier for a floor-plan entity.
pub type EntityId = Uuid;

/// Lock, grouping and mirroring state shared by every floor-plan entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityFlags {
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
}

/// A straight wall between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanWall {
    pub id: EntityId,
    pub start: Point,
    pub end: Point,
    pub thickness_mm: f64,
    #[serde(flatten)]
    pub flags: EntityFlags,
}

impl FloorPlanWall {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            thickness_mm: DEFAULT_WALL_THICKNESS_MM,
            flags: EntityFlags::default(),
        }
    }

    pub fn length_px(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Physical wall length at the given floor-plan scale.
    pub fn length_mm(&self, scale_mm_per_px: f64) -> f64 {
        px_to_mm(self.length_px(), scale_mm_per_px)
    }
}

/// A floor area, drawn as a rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanFloor {
    pub id: EntityId,
    pub rect: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(flatten)]
    pub flags: EntityFlags,
}

impl FloorPlanFloor {
    pub fn new(rect: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            rect,
            material: None,
            flags: EntityFlags::default(),
        }
    }

    /// Floor area in square metres at the given floor-plan scale.
    pub fn area_m2(&self, scale_mm_per_px: f64) -> f64 {
        let w = px_to_mm(self.rect.width, scale_mm_per_px) / 1000.0;
        let d = px_to_mm(self.rect.height, scale_mm_per_px) / 1000.0;
        w * d
    }
}

/// Whether a kitchen run sits on the floor or hangs on the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KitchenRunKind {
    Base,
    Wall,
}

/// A straight run of kitchen cabinets; depth and height come from [`KitchenConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenRun {
    pub id: EntityId,
    pub kind: KitchenRunKind,
    pub start: Point,
    pub end: Point,
    #[serde(flatten)]
    pub flags: EntityFlags,
}

impl KitchenRun {
    pub fn new(kind: KitchenRunKind, start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            start,
            end,
            flags: EntityFlags::default(),
        }
    }

    pub fn length_mm(&self, scale_mm_per_px: f64) -> f64 {
        px_to_mm(self.start.distance_to(&self.end), scale_mm_per_px)
    }
}

/// Door or window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningKind {
    Door,
    Window,
}

/// An opening spanning a stretch of wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub id: EntityId,
    pub kind: OpeningKind,
    pub start: Point,
    pub end: Point,
    #[serde(flatten)]
    pub flags: EntityFlags,
}

impl Opening {
    pub fn new(kind: OpeningKind, start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            start,
            end,
            flags: EntityFlags::default(),
        }
    }

    pub fn width_mm(&self, scale_mm_per_px: f64) -> f64 {
        px_to_mm(self.start.distance_to(&self.end), scale_mm_per_px)
    }
}

/// A free-standing appliance footprint (fridge, washer, hob...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appliance {
    pub id: EntityId,
    pub rect: Rect,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub flags: EntityFlags,
}

impl Appliance {
    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            rect,
            label: label.into(),
            flags: EntityFlags::default(),
        }
    }
}

/// A dimension line drawn in measure mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: EntityId,
    pub start: Point,
    pub end: Point,
    #[serde(flatten)]
    pub flags: EntityFlags,
}

impl Measurement {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            flags: EntityFlags::default(),
        }
    }

    pub fn length_mm(&self, scale_mm_per_px: f64) -> f64 {
        px_to_mm(self.start.distance_to(&self.end), scale_mm_per_px)
    }
}

/// An externally supplied 3D model placed on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedModel {
    pub id: EntityId,
    pub name: String,
    /// Where the host can fetch the mesh from; opaque to the core.
    pub source: String,
    /// Footprint of the model on the plan.
    pub rect: Rect,
    #[serde(flatten)]
    pub flags: EntityFlags,
}

impl ImportedModel {
    pub fn new(name: impl Into<String>, source: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            source: source.into(),
            rect,
            flags: EntityFlags::default(),
        }
    }
}

/// Cabinet dimensions applied to every kitchen run on a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenConfig {
    pub base_depth_mm: f64,
    pub base_height_mm: f64,
    pub wall_depth_mm: f64,
    pub wall_height_mm: f64,
    pub wall_mount_height_mm: f64,
    pub countertop_thickness_mm: f64,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            base_depth_mm: 600.0,
            base_height_mm: 850.0,
            wall_depth_mm: 350.0,
            wall_height_mm: 700.0,
            wall_mount_height_mm: 1450.0,
            countertop_thickness_mm: 40.0,
        }
    }
}

impl KitchenConfig {
    /// `(depth_mm, height_mm)` for the given run kind.
    pub fn dimensions(&self, kind: KitchenRunKind) -> (f64, f64) {
        match kind {
            KitchenRunKind::Base => (self.base_depth_mm, self.base_height_mm),
            KitchenRunKind::Wall => (self.wall_depth_mm, self.wall_height_mm),
        }
    }
}

/// All floor-plan geometry of one canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub scale_mm_per_px: f64,
    /// Pixel position that maps to the scene origin.
    #[serde(default)]
    pub origin: Point,
    #[serde(default)]
    pub walls: Vec<FloorPlanWall>,
    #[serde(default)]
    pub floors: Vec<FloorPlanFloor>,
    #[serde(default)]
    pub kitchen_runs: Vec<KitchenRun>,
    #[serde(default)]
    pub openings: Vec<Opening>,
    #[serde(default)]
    pub appliances: Vec<Appliance>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub models: Vec<ImportedModel>,
    #[serde(default)]
    pub kitchen: KitchenConfig,
}

impl FloorPlan {
    /// Creates an empty floor plan. Non-positive or non-finite scales fall back to 1 mm/px.
    pub fn new(scale_mm_per_px: f64) -> Self {
        let scale = if scale_mm_per_px.is_finite() && scale_mm_per_px > 0.0 {
            scale_mm_per_px
        } else {
            1.0
        };
        Self {
            scale_mm_per_px: scale,
            origin: Point::default(),
            walls: Vec::new(),
            floors: Vec::new(),
            kitchen_runs: Vec::new(),
            openings: Vec::new(),
            appliances: Vec::new(),
            measurements: Vec::new(),
            models: Vec::new(),
            kitchen: KitchenConfig::default(),
        }
    }

    /// Total number of entities on the plan.
    pub fn entity_count(&self) -> usize {
        self.walls.len()
            + self.floors.len()
            + self.kitchen_runs.len()
            + self.openings.len()
            + self.appliances.len()
            + self.measurements.len()
            + self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }
}
