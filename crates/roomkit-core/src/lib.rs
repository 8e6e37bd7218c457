//! # RoomKit Core
//!
//! Core types, geometry model, and coordinate transforms for RoomKit.
//! Provides the data shapes every other crate works with: unit boxes,
//! dividers, add-ons, floor-plan entities, canvas addressing, and the
//! pixel / millimetre / metre conversion layer.

pub mod constants;
pub mod error;
pub mod model;
pub mod units;

pub use error::{Error, Result};

pub use model::{
    evenly_spaced, AddOn, AddOnId, AddOnKind, Appliance, CanvasKey, DrawnUnit, Edge, EntityFlags,
    EntityId, EntityKind, FloorDef, FloorPlan, FloorPlanFloor, FloorPlanWall, GroupId,
    ImportedModel, KitchenConfig, KitchenRun, KitchenRunKind, Measurement, Opening, OpeningKind,
    PlanEntity, Point, Rect, RoomDef, UnitId, UnitType,
};

pub use units::{
    format_length, format_mm, meters_to_mm, mm_to_meters, mm_to_px, parse_length, px_to_mm,
    segment_length_mm, DefaultRoomTransform, FloorPlanTransform, GridStep, LengthDisplay,
    SceneTransform, ScenePoint, SceneVector, TransformStrategy,
};
