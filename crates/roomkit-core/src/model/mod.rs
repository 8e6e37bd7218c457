//! Unit & geometry model.
//!
//! Plain data shapes with no interaction behaviour: boxes, units, add-ons,
//! floor-plan entities, and canvas addressing.

mod canvas_key;
mod entity;
mod floor_plan;
mod geometry;
mod unit;

pub use canvas_key::{CanvasKey, FloorDef, RoomDef};
pub use entity::{EntityKind, PlanEntity};
pub use floor_plan::{
    Appliance, EntityFlags, EntityId, FloorPlan, FloorPlanFloor, FloorPlanWall, ImportedModel,
    KitchenConfig, KitchenRun, KitchenRunKind, Measurement, Opening, OpeningKind,
};
pub use geometry::{evenly_spaced, Edge, Point, Rect};
pub use unit::{AddOn, AddOnId, AddOnKind, DrawnUnit, GroupId, UnitId, UnitType};
