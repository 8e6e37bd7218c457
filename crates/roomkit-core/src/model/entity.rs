//! Shared capability of everything that can be selected, locked, grouped
//! and dragged on the plan.
//!
//! Units and floor-plan entities are distinct types; code that needs to treat
//! them uniformly dispatches on [`EntityKind`] and calls through
//! [`PlanEntity`] rather than relying on a common base type.

use serde::{Deserialize, Serialize};

use super::floor_plan::{
    Appliance, FloorPlanFloor, FloorPlanWall, ImportedModel, KitchenRun, Measurement, Opening,
};
use super::geometry::{Point, Rect};
use super::unit::{DrawnUnit, GroupId};

/// Every kind of entity that can be selected. Selection never mixes kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Unit,
    Wall,
    Floor,
    KitchenRun,
    Opening,
    Appliance,
    Measurement,
    Model,
}

impl EntityKind {
    /// Hit-test priority, topmost first.
    pub const PICK_ORDER: [EntityKind; 8] = [
        EntityKind::Unit,
        EntityKind::Model,
        EntityKind::Appliance,
        EntityKind::Opening,
        EntityKind::KitchenRun,
        EntityKind::Measurement,
        EntityKind::Wall,
        EntityKind::Floor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Unit => "unit",
            EntityKind::Wall => "wall",
            EntityKind::Floor => "floor",
            EntityKind::KitchenRun => "kitchen run",
            EntityKind::Opening => "opening",
            EntityKind::Appliance => "appliance",
            EntityKind::Measurement => "measurement",
            EntityKind::Model => "model",
        }
    }
}

/// Capability interface shared by all plan entities.
///
/// All operations return new values; nothing is mutated in place.
pub trait PlanEntity: Clone {
    const KIND: EntityKind;

    fn locked(&self) -> bool;

    fn group_id(&self) -> Option<GroupId>;

    /// Axis-aligned footprint in pixel space.
    fn bounds(&self) -> Rect;

    /// Whether `p` picks this entity, with `tolerance` pixels of slop.
    fn hit_test(&self, p: Point, tolerance: f64) -> bool {
        self.bounds().inflated(tolerance).contains(p)
    }

    fn translated(&self, dx: f64, dy: f64) -> Self;

    fn with_locked(&self, locked: bool) -> Self;

    fn with_group(&self, group_id: Option<GroupId>) -> Self;
}

impl PlanEntity for DrawnUnit {
    const KIND: EntityKind = EntityKind::Unit;

    fn locked(&self) -> bool {
        self.locked
    }

    fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    fn bounds(&self) -> Rect {
        self.outer_rect()
    }

    fn hit_test(&self, p: Point, tolerance: f64) -> bool {
        self.rect.inflated(tolerance).contains(p)
            || self
                .loft_rect
                .is_some_and(|loft| loft.inflated(tolerance).contains(p))
    }

    /// Moves the box together with its loft and dividers. Add-ons are
    /// relative to the box and follow automatically.
    fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            rect: self.rect.translated(dx, dy),
            loft_rect: self.loft_rect.map(|loft| loft.translated(dx, dy)),
            shutter_divider_xs: self.shutter_divider_xs.iter().map(|x| x + dx).collect(),
            horizontal_divider_ys: self.horizontal_divider_ys.iter().map(|y| y + dy).collect(),
            ..self.clone()
        }
    }

    fn with_locked(&self, locked: bool) -> Self {
        Self {
            locked,
            ..self.clone()
        }
    }

    fn with_group(&self, group_id: Option<GroupId>) -> Self {
        Self {
            group_id,
            ..self.clone()
        }
    }
}

/// Implements the flag accessors for entities that carry [`EntityFlags`](super::EntityFlags).
macro_rules! flag_accessors {
    () => {
        fn locked(&self) -> bool {
            self.flags.locked
        }

        fn group_id(&self) -> Option<GroupId> {
            self.flags.group_id
        }

        fn with_locked(&self, locked: bool) -> Self {
            let mut next = self.clone();
            next.flags.locked = locked;
            next
        }

        fn with_group(&self, group_id: Option<GroupId>) -> Self {
            let mut next = self.clone();
            next.flags.group_id = group_id;
            next
        }
    };
}

/// Implements [`PlanEntity`] for a `start`/`end` segment entity.
macro_rules! segment_entity {
    ($ty:ty, $kind:expr) => {
        impl PlanEntity for $ty {
            const KIND: EntityKind = $kind;

            flag_accessors!();

            fn bounds(&self) -> Rect {
                let r = Rect::from_corners(self.start, self.end);
                Rect::new(r.x, r.y, r.width.max(1.0), r.height.max(1.0))
            }

            fn hit_test(&self, p: Point, tolerance: f64) -> bool {
                p.distance_to_segment(&self.start, &self.end) <= tolerance
            }

            fn translated(&self, dx: f64, dy: f64) -> Self {
                Self {
                    start: self.start.offset(dx, dy),
                    end: self.end.offset(dx, dy),
                    ..self.clone()
                }
            }
        }
    };
}

/// Implements [`PlanEntity`] for an entity positioned by a `rect`.
macro_rules! rect_entity {
    ($ty:ty, $kind:expr) => {
        impl PlanEntity for $ty {
            const KIND: EntityKind = $kind;

            flag_accessors!();

            fn bounds(&self) -> Rect {
                self.rect
            }

            fn translated(&self, dx: f64, dy: f64) -> Self {
                Self {
                    rect: self.rect.translated(dx, dy),
                    ..self.clone()
                }
            }
        }
    };
}

segment_entity!(FloorPlanWall, EntityKind::Wall);
segment_entity!(KitchenRun, EntityKind::KitchenRun);
segment_entity!(Opening, EntityKind::Opening);
segment_entity!(Measurement, EntityKind::Measurement);
rect_entity!(FloorPlanFloor, EntityKind::Floor);
rect_entity!(Appliance, EntityKind::Appliance);
rect_entity!(ImportedModel, EntityKind::Model);
