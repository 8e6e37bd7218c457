//! Geometry of a single canvas: its units and optional floor plan.
//!
//! Every entity is addressed by `(EntityKind, index)`. Edits replace the
//! addressed value with a new one; locked entities and out-of-range indices
//! are silently ignored.

use std::collections::BTreeSet;

use roomkit_core::{
    DrawnUnit, EntityKind, FloorPlan, GroupId, PlanEntity, Point, Rect, UnitType,
};
use serde::{Deserialize, Serialize};

/// Runs `$body` with `$items` bound to the entity vector for `$kind`, or
/// evaluates `$default` when the kind lives on a missing floor plan.
macro_rules! on_entities {
    ($doc:expr, $kind:expr, $default:expr, |$items:ident| $body:expr) => {
        match $kind {
            EntityKind::Unit => {
                let $items = &$doc.units;
                $body
            }
            EntityKind::Wall => match $doc.floor_plan.as_ref() {
                Some(plan) => {
                    let $items = &plan.walls;
                    $body
                }
                None => $default,
            },
            EntityKind::Floor => match $doc.floor_plan.as_ref() {
                Some(plan) => {
                    let $items = &plan.floors;
                    $body
                }
                None => $default,
            },
            EntityKind::KitchenRun => match $doc.floor_plan.as_ref() {
                Some(plan) => {
                    let $items = &plan.kitchen_runs;
                    $body
                }
                None => $default,
            },
            EntityKind::Opening => match $doc.floor_plan.as_ref() {
                Some(plan) => {
                    let $items = &plan.openings;
                    $body
                }
                None => $default,
            },
            EntityKind::Appliance => match $doc.floor_plan.as_ref() {
                Some(plan) => {
                    let $items = &plan.appliances;
                    $body
                }
                None => $default,
            },
            EntityKind::Measurement => match $doc.floor_plan.as_ref() {
                Some(plan) => {
                    let $items = &plan.measurements;
                    $body
                }
                None => $default,
            },
            EntityKind::Model => match $doc.floor_plan.as_ref() {
                Some(plan) => {
                    let $items = &plan.models;
                    $body
                }
                None => $default,
            },
        }
    };
}

/// Mutable counterpart of [`on_entities!`].
macro_rules! on_entities_mut {
    ($doc:expr, $kind:expr, $default:expr, |$items:ident| $body:expr) => {
        match $kind {
            EntityKind::Unit => {
                let $items = &mut $doc.units;
                $body
            }
            EntityKind::Wall => match $doc.floor_plan.as_mut() {
                Some(plan) => {
                    let $items = &mut plan.walls;
                    $body
                }
                None => $default,
            },
            EntityKind::Floor => match $doc.floor_plan.as_mut() {
                Some(plan) => {
                    let $items = &mut plan.floors;
                    $body
                }
                None => $default,
            },
            EntityKind::KitchenRun => match $doc.floor_plan.as_mut() {
                Some(plan) => {
                    let $items = &mut plan.kitchen_runs;
                    $body
                }
                None => $default,
            },
            EntityKind::Opening => match $doc.floor_plan.as_mut() {
                Some(plan) => {
                    let $items = &mut plan.openings;
                    $body
                }
                None => $default,
            },
            EntityKind::Appliance => match $doc.floor_plan.as_mut() {
                Some(plan) => {
                    let $items = &mut plan.appliances;
                    $body
                }
                None => $default,
            },
            EntityKind::Measurement => match $doc.floor_plan.as_mut() {
                Some(plan) => {
                    let $items = &mut plan.measurements;
                    $body
                }
                None => $default,
            },
            EntityKind::Model => match $doc.floor_plan.as_mut() {
                Some(plan) => {
                    let $items = &mut plan.models;
                    $body
                }
                None => $default,
            },
        }
    };
}

fn replace_with<E: PlanEntity>(items: &mut [E], index: usize, f: impl FnOnce(&E) -> E) -> bool {
    match items.get(index) {
        Some(item) if !item.locked() => {
            items[index] = f(item);
            true
        }
        _ => false,
    }
}

fn top_hit<E: PlanEntity>(items: &[E], p: Point, tolerance: f64) -> Option<usize> {
    items.iter().rposition(|item| item.hit_test(p, tolerance))
}

fn members<E: PlanEntity>(items: &[E], group: GroupId) -> BTreeSet<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.group_id() == Some(group))
        .map(|(i, _)| i)
        .collect()
}

fn remove_indices<E>(items: &mut Vec<E>, indices: &BTreeSet<usize>) -> usize {
    let before = items.len();
    let mut i = 0;
    items.retain(|_| {
        let keep = !indices.contains(&i);
        i += 1;
        keep
    });
    before - items.len()
}

/// Everything drawn on one canvas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    #[serde(default)]
    pub units: Vec<DrawnUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan: Option<FloorPlan>,
}

impl CanvasDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty() && self.floor_plan.as_ref().is_none_or(FloorPlan::is_empty)
    }

    /// Type of the first unit, which names the canvas.
    pub fn primary_unit_type(&self) -> Option<UnitType> {
        self.units.first().map(|u| u.unit_type)
    }

    /// The floor plan, created at `scale_mm_per_px` on first use.
    pub fn floor_plan_mut(&mut self, scale_mm_per_px: f64) -> &mut FloorPlan {
        self.floor_plan
            .get_or_insert_with(|| FloorPlan::new(scale_mm_per_px))
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        on_entities!(self, kind, 0, |items| items.len())
    }

    pub fn bounds(&self, kind: EntityKind, index: usize) -> Option<Rect> {
        on_entities!(self, kind, None, |items| items.get(index).map(PlanEntity::bounds))
    }

    pub fn is_locked(&self, kind: EntityKind, index: usize) -> Option<bool> {
        on_entities!(self, kind, None, |items| items.get(index).map(PlanEntity::locked))
    }

    pub fn group_of(&self, kind: EntityKind, index: usize) -> Option<GroupId> {
        on_entities!(self, kind, None, |items| items
            .get(index)
            .and_then(PlanEntity::group_id))
    }

    /// Indices of every entity of `kind` in `group`.
    pub fn group_members(&self, kind: EntityKind, group: GroupId) -> BTreeSet<usize> {
        on_entities!(self, kind, BTreeSet::new(), |items| members(items, group))
    }

    /// `index` together with the rest of its group, if it has one.
    pub fn with_group(&self, kind: EntityKind, index: usize) -> BTreeSet<usize> {
        match self.group_of(kind, index) {
            Some(group) => self.group_members(kind, group),
            None if index < self.len(kind) => BTreeSet::from([index]),
            None => BTreeSet::new(),
        }
    }

    /// Topmost entity under `p`, searching kinds in pick order.
    pub fn pick(&self, p: Point, tolerance: f64) -> Option<(EntityKind, usize)> {
        EntityKind::PICK_ORDER.into_iter().find_map(|kind| {
            on_entities!(self, kind, None, |items| top_hit(items, p, tolerance))
                .map(|i| (kind, i))
        })
    }

    /// Moves one entity. Returns `false` for locked entities or bad indices.
    pub fn translate(&mut self, kind: EntityKind, index: usize, dx: f64, dy: f64) -> bool {
        on_entities_mut!(self, kind, false, |items| replace_with(items, index, |e| e
            .translated(dx, dy)))
    }

    /// Locks or unlocks one entity; works on locked entities too.
    pub fn set_locked(&mut self, kind: EntityKind, index: usize, locked: bool) -> bool {
        on_entities_mut!(self, kind, false, |items| match items.get(index) {
            Some(item) => {
                items[index] = item.with_locked(locked);
                true
            }
            None => false,
        })
    }

    pub fn set_group(&mut self, kind: EntityKind, index: usize, group: Option<GroupId>) -> bool {
        on_entities_mut!(self, kind, false, |items| replace_with(items, index, |e| e
            .with_group(group)))
    }

    /// Removes the given entities, skipping locked ones. Returns how many went.
    pub fn remove(&mut self, kind: EntityKind, indices: &BTreeSet<usize>) -> usize {
        let unlocked: BTreeSet<usize> = indices
            .iter()
            .copied()
            .filter(|&i| self.is_locked(kind, i) == Some(false))
            .collect();
        on_entities_mut!(self, kind, 0, |items| remove_indices(items, &unlocked))
    }

    /// Bounds of every entity, except those listed in `exclude`.
    pub fn snap_bounds(&self, exclude: Option<(EntityKind, &BTreeSet<usize>)>) -> Vec<Rect> {
        let mut out = Vec::new();
        for kind in EntityKind::PICK_ORDER {
            for i in 0..self.len(kind) {
                if exclude.is_some_and(|(k, skip)| k == kind && skip.contains(&i)) {
                    continue;
                }
                if let Some(rect) = self.bounds(kind, i) {
                    out.push(rect);
                }
            }
        }
        out
    }
}
