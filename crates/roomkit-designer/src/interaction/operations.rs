//! Event handlers: pointer down/move/up/leave, blur and keys.

use std::collections::BTreeSet;

use roomkit_core::constants::HANDLE_TOLERANCE_PX;
use roomkit_core::{
    Appliance, DrawnUnit, Edge, EntityKind, FloorPlanFloor, FloorPlanWall, KitchenRun,
    KitchenRunKind, Measurement, Opening, OpeningKind, PlanEntity, Point, Rect, ScenePoint,
    SceneTransform, TransformStrategy,
};
use roomkit_settings::{EditingSettings, SnappingSettings};
use tracing::debug;

use super::types::{Action, DrawMode, Gesture, Key, KeyEvent, PointerEvent, PointerPosition};
use super::Interaction;
use crate::document::CanvasDocument;
use crate::resize::{drag_divider, hit_divider, hit_edge, resize_unit, DividerAxis, ResizeOptions};
use crate::snapping::{ortho_lock, snap_point, SnapTargets};

/// What the handlers need to know about the canvas beyond its geometry.
#[derive(Debug, Clone, Copy)]
pub struct InteractionContext<'a> {
    pub transform: &'a TransformStrategy,
    pub snapping: &'a SnappingSettings,
    pub editing: &'a EditingSettings,
}

impl InteractionContext<'_> {
    fn to_surface(&self, position: PointerPosition) -> Point {
        match position {
            PointerPosition::Surface(p) => p,
            PointerPosition::Scene(s) => self.transform.scene_to_surface(&s),
        }
    }

    fn to_scene(&self, position: PointerPosition) -> ScenePoint {
        match position {
            PointerPosition::Surface(p) => self.transform.surface_to_scene(p),
            PointerPosition::Scene(s) => s,
        }
    }

    fn snap(
        &self,
        doc: &CanvasDocument,
        p: Point,
        exclude: Option<(EntityKind, &BTreeSet<usize>)>,
    ) -> Point {
        let targets = if self.snapping.object_snap {
            SnapTargets::from_bounds(&doc.snap_bounds(exclude))
        } else {
            SnapTargets::default()
        };
        snap_point(p, &targets, self.snapping, self.transform.mm_per_px())
    }

    /// Gestures from the scene are measured in millimetres, surface gestures
    /// in pixels. Boxes need both sides over the minimum, segments their length.
    fn is_large_enough(&self, mode: DrawMode, start: Point, end: Point, from_scene: bool) -> bool {
        let (mut dx, mut dy) = ((end.x - start.x).abs(), (end.y - start.y).abs());
        let min = if from_scene {
            let (sx, sy) = self.transform.mm_per_px();
            dx *= sx;
            dy *= sy;
            self.editing.min_gesture_mm
        } else {
            self.editing.min_gesture_px
        };
        if mode.draws_segment() {
            dx.hypot(dy) >= min
        } else {
            dx >= min && dy >= min
        }
    }
}

fn describe(verb: &str, kind: EntityKind, count: usize) -> String {
    if count == 1 {
        format!("{verb} {}", kind.label())
    } else {
        format!("{verb} {count} {}s", kind.label())
    }
}

impl Interaction {
    /// Switches mode, abandoning any draft in progress.
    pub fn set_mode(
        &mut self,
        doc: &mut CanvasDocument,
        mode: DrawMode,
        ctx: &InteractionContext<'_>,
    ) -> Vec<Action> {
        let mut actions = self.end_gesture(doc, ctx, false);
        if self.mode != mode {
            debug!(from = ?self.mode, to = ?mode, "Draw mode changed");
            self.mode = mode;
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn pointer_down(
        &mut self,
        doc: &mut CanvasDocument,
        event: &PointerEvent,
        ctx: &InteractionContext<'_>,
    ) -> Vec<Action> {
        // A down without a matching up: settle the stale gesture first.
        let mut actions = self.end_gesture(doc, ctx, false);
        let p = ctx.to_surface(event.position);
        if !event.is_scene() {
            self.focused = true;
        }

        match self.mode {
            DrawMode::Pan => {
                self.gesture = Gesture::Panning { last: p };
                actions.push(Action::CapturePointer);
            }
            DrawMode::Select => {
                self.click_select(doc, p, event.modifiers.shift);
                actions.push(Action::RenderNeeded);
            }
            DrawMode::Move => actions.extend(self.begin_move(doc, p, event, ctx)),
            DrawMode::None => actions.extend(self.begin_unit_gesture(doc, p, event, ctx)),
            mode => actions.extend(self.begin_draft(doc, mode, p, event, ctx)),
        }
        actions
    }

    pub fn pointer_move(
        &mut self,
        doc: &mut CanvasDocument,
        event: &PointerEvent,
        ctx: &InteractionContext<'_>,
    ) -> Vec<Action> {
        let p = ctx.to_surface(event.position);
        match &mut self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Drawing {
                mode,
                start,
                current,
                ..
            } => {
                let mut end = ctx.snap(doc, p, None);
                if mode.is_ortho() && ctx.snapping.ortho_lock {
                    end = ortho_lock(*start, end);
                }
                if end == *current {
                    return Vec::new();
                }
                *current = end;
                vec![Action::RenderNeeded]
            }
            Gesture::Moving {
                kind,
                indices,
                last,
                moved,
            } => {
                let at = ctx.to_scene(event.position);
                let (dx, dy) = ctx.transform.scene_delta_to_surface(&(at - *last));
                if dx == 0.0 && dy == 0.0 {
                    return Vec::new();
                }
                // The top-left of the moving set is what snaps.
                let Some(anchor) = indices
                    .iter()
                    .filter_map(|&i| doc.bounds(*kind, i))
                    .reduce(|a, b| a.union(&b))
                    .map(|r| Point::new(r.x, r.y))
                else {
                    return Vec::new();
                };
                let moving: BTreeSet<usize> = indices.iter().copied().collect();
                let proposed = anchor.offset(dx, dy);
                let snapped = ctx.snap(doc, proposed, Some((*kind, &moving)));
                let dx = if snapped.x == proposed.x {
                    dx
                } else {
                    snapped.x - anchor.x
                };
                let dy = if snapped.y == proposed.y {
                    dy
                } else {
                    snapped.y - anchor.y
                };
                if snapped == proposed {
                    *last = at;
                } else {
                    // Re-base on what was applied so the snapped-off remainder
                    // carries into the next step.
                    let origin = ctx.transform.scene_to_surface(&*last);
                    *last = ctx.transform.surface_to_scene(origin.offset(dx, dy));
                }
                if dx == 0.0 && dy == 0.0 {
                    return Vec::new();
                }
                for &index in indices.iter() {
                    doc.translate(*kind, index, dx, dy);
                }
                *moved = true;
                vec![Action::RenderNeeded]
            }
            Gesture::Resizing {
                index,
                edge,
                options,
                ..
            } => {
                let exclude = BTreeSet::from([*index]);
                let pointer = ctx.snap(doc, p, Some((EntityKind::Unit, &exclude)));
                let Some(unit) = doc.units.get(*index) else {
                    return Vec::new();
                };
                let next = resize_unit(unit, *edge, pointer, *options);
                if next == *unit {
                    return Vec::new();
                }
                doc.units[*index] = next;
                vec![Action::RenderNeeded]
            }
            Gesture::DividerDrag {
                index,
                axis,
                divider,
                ..
            } => {
                let position = match axis {
                    DividerAxis::Shutter => p.x,
                    DividerAxis::Section => p.y,
                };
                let Some(unit) = doc.units.get(*index) else {
                    return Vec::new();
                };
                let next = drag_divider(unit, *axis, *divider, position);
                if next == *unit {
                    return Vec::new();
                }
                doc.units[*index] = next;
                vec![Action::RenderNeeded]
            }
            Gesture::Panning { last } => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                *last = p;
                if dx == 0.0 && dy == 0.0 {
                    Vec::new()
                } else {
                    vec![Action::PanBy { dx, dy }]
                }
            }
        }
    }

    /// Applies the final position and ends the gesture, committing drafts
    /// that are large enough.
    pub fn pointer_up(
        &mut self,
        doc: &mut CanvasDocument,
        event: &PointerEvent,
        ctx: &InteractionContext<'_>,
    ) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .pointer_move(doc, event, ctx)
            .into_iter()
            .filter(|a| matches!(a, Action::PanBy { .. }))
            .collect();
        actions.extend(self.end_gesture(doc, ctx, true));
        actions
    }

    /// Ends the gesture without committing a draft.
    pub fn pointer_leave(
        &mut self,
        doc: &mut CanvasDocument,
        ctx: &InteractionContext<'_>,
    ) -> Vec<Action> {
        self.end_gesture(doc, ctx, false)
    }

    /// Focus loss: ends the gesture and stops keyboard handling.
    pub fn blur(&mut self, doc: &mut CanvasDocument, ctx: &InteractionContext<'_>) -> Vec<Action> {
        self.focused = false;
        self.end_gesture(doc, ctx, false)
    }

    pub fn key_down(
        &mut self,
        doc: &mut CanvasDocument,
        event: &KeyEvent,
        ctx: &InteractionContext<'_>,
    ) -> Vec<Action> {
        if !self.focused {
            return Vec::new();
        }
        let step = if event.modifiers.shift {
            ctx.editing.nudge_step_large_px
        } else {
            ctx.editing.nudge_step_px
        };
        match event.key {
            Key::ArrowLeft => self.nudge(doc, -step, 0.0),
            Key::ArrowRight => self.nudge(doc, step, 0.0),
            Key::ArrowUp => self.nudge(doc, 0.0, -step),
            Key::ArrowDown => self.nudge(doc, 0.0, step),
            Key::Delete | Key::Backspace => self.delete_targets(doc),
            Key::Escape => self.escape(),
            Key::Char(_) => Vec::new(),
        }
    }

    /// Ends whatever gesture is in progress. Moves, resizes and divider drags
    /// that changed something are always committed; drafts only when
    /// `commit_draft` is set.
    pub(crate) fn end_gesture(
        &mut self,
        doc: &mut CanvasDocument,
        ctx: &InteractionContext<'_>,
        commit_draft: bool,
    ) -> Vec<Action> {
        let mut actions = vec![Action::ReleasePointer, Action::RenderNeeded];
        let committed = match std::mem::take(&mut self.gesture) {
            Gesture::Idle => return Vec::new(),
            Gesture::Panning { .. } => return vec![Action::ReleasePointer],
            Gesture::Drawing {
                mode,
                start,
                current,
                from_scene,
            } => {
                if !commit_draft {
                    debug!(?mode, "Draft discarded");
                    None
                } else if !ctx.is_large_enough(mode, start, current, from_scene) {
                    debug!(?mode, from_scene, "Draft below minimum gesture size");
                    None
                } else {
                    self.commit_draft(doc, mode, start, current, ctx)
                }
            }
            Gesture::Moving {
                kind,
                indices,
                moved,
                ..
            } => moved.then(|| describe("Move", kind, indices.len())),
            Gesture::Resizing {
                index, original, ..
            } => doc
                .units
                .get(index)
                .is_some_and(|u| u.rect != original)
                .then(|| String::from("Resize unit")),
            Gesture::DividerDrag {
                index, original, ..
            } => doc
                .units
                .get(index)
                .is_some_and(|u| *u != *original)
                .then(|| String::from("Move divider")),
        };
        if let Some(description) = committed {
            actions.push(Action::Committed(description));
        }
        actions
    }

    fn begin_draft(
        &mut self,
        doc: &CanvasDocument,
        mode: DrawMode,
        p: Point,
        event: &PointerEvent,
        ctx: &InteractionContext<'_>,
    ) -> Vec<Action> {
        let start = ctx.snap(doc, p, None);
        self.gesture = Gesture::Drawing {
            mode,
            start,
            current: start,
            from_scene: event.is_scene(),
        };
        vec![Action::CapturePointer, Action::RenderNeeded]
    }

    fn click_select(&mut self, doc: &CanvasDocument, p: Point, extend: bool) {
        match doc.pick(p, HANDLE_TOLERANCE_PX) {
            Some((kind, index)) => {
                let members = doc.with_group(kind, index);
                if extend {
                    self.selection.extend(kind, members);
                } else {
                    self.selection.toggle(kind, members);
                }
                if kind == EntityKind::Unit {
                    self.active = Some(index);
                }
            }
            None => self.selection.clear(),
        }
    }

    fn begin_move(
        &mut self,
        doc: &CanvasDocument,
        p: Point,
        event: &PointerEvent,
        ctx: &InteractionContext<'_>,
    ) -> Vec<Action> {
        let Some((kind, index)) = doc.pick(p, HANDLE_TOLERANCE_PX) else {
            self.selection.clear();
            return vec![Action::RenderNeeded];
        };
        if !self.selection.contains(kind, index) {
            self.selection.select_only(kind, doc.with_group(kind, index));
        }
        if kind == EntityKind::Unit {
            self.active = Some(index);
        }
        self.start_moving(doc, kind, ctx.to_scene(event.position))
    }

    fn start_moving(
        &mut self,
        doc: &CanvasDocument,
        kind: EntityKind,
        at: ScenePoint,
    ) -> Vec<Action> {
        let indices: Vec<usize> = self
            .selection
            .indices()
            .iter()
            .copied()
            .filter(|&i| doc.is_locked(kind, i) == Some(false))
            .collect();
        if indices.is_empty() {
            return vec![Action::RenderNeeded];
        }
        self.gesture = Gesture::Moving {
            kind,
            indices,
            last: at,
            moved: false,
        };
        vec![Action::CapturePointer, Action::RenderNeeded]
    }

    /// Unit surface: active unit handles first, then unit bodies, then a new
    /// unit box on empty space.
    fn begin_unit_gesture(
        &mut self,
        doc: &CanvasDocument,
        p: Point,
        event: &PointerEvent,
        ctx: &InteractionContext<'_>,
    ) -> Vec<Action> {
        if let Some(index) = self.active.filter(|&i| i < doc.units.len()) {
            let unit = &doc.units[index];
            if !unit.locked {
                let lock_top = event.fit_mode_locked_top;
                let edge = hit_edge(&unit.rect, p, HANDLE_TOLERANCE_PX)
                    .filter(|&edge| !(lock_top && edge == Edge::Top));
                if let Some(edge) = edge {
                    self.gesture = Gesture::Resizing {
                        index,
                        edge,
                        options: ResizeOptions { lock_top },
                        original: unit.rect,
                    };
                    return vec![Action::CapturePointer];
                }
                if let Some((axis, divider)) = hit_divider(unit, p, HANDLE_TOLERANCE_PX) {
                    self.gesture = Gesture::DividerDrag {
                        index,
                        axis,
                        divider,
                        original: Box::new(unit.clone()),
                    };
                    return vec![Action::CapturePointer];
                }
            }
        }

        if let Some(index) = doc.units.iter().rposition(|u| u.hit_test(p, 0.0)) {
            self.active = Some(index);
            self.selection
                .select_only(EntityKind::Unit, doc.with_group(EntityKind::Unit, index));
            return self.start_moving(doc, EntityKind::Unit, ctx.to_scene(event.position));
        }

        self.active = None;
        self.selection.clear();
        self.begin_draft(doc, DrawMode::None, p, event, ctx)
    }

    fn commit_draft(
        &mut self,
        doc: &mut CanvasDocument,
        mode: DrawMode,
        start: Point,
        end: Point,
        ctx: &InteractionContext<'_>,
    ) -> Option<String> {
        let rect = Rect::from_corners(start, end);
        let scale = ctx.editing.default_scale_mm_per_px;
        let description = match mode {
            DrawMode::None => {
                doc.units
                    .push(DrawnUnit::new(self.unit_type, rect, ctx.transform.mm_per_px()));
                let index = doc.units.len() - 1;
                self.active = Some(index);
                self.selection
                    .select_only(EntityKind::Unit, BTreeSet::from([index]));
                format!("Add {}", self.unit_type)
            }
            DrawMode::Wall => {
                doc.floor_plan_mut(scale)
                    .walls
                    .push(FloorPlanWall::new(start, end));
                String::from("Add wall")
            }
            DrawMode::Floor => {
                doc.floor_plan_mut(scale)
                    .floors
                    .push(FloorPlanFloor::new(rect));
                String::from("Add floor")
            }
            DrawMode::KitchenBase => {
                doc.floor_plan_mut(scale)
                    .kitchen_runs
                    .push(KitchenRun::new(KitchenRunKind::Base, start, end));
                String::from("Add base kitchen run")
            }
            DrawMode::KitchenWall => {
                doc.floor_plan_mut(scale)
                    .kitchen_runs
                    .push(KitchenRun::new(KitchenRunKind::Wall, start, end));
                String::from("Add wall kitchen run")
            }
            DrawMode::Door => {
                doc.floor_plan_mut(scale)
                    .openings
                    .push(Opening::new(OpeningKind::Door, start, end));
                String::from("Add door")
            }
            DrawMode::Window => {
                doc.floor_plan_mut(scale)
                    .openings
                    .push(Opening::new(OpeningKind::Window, start, end));
                String::from("Add window")
            }
            DrawMode::Appliance => {
                doc.floor_plan_mut(scale)
                    .appliances
                    .push(Appliance::new(rect, "Appliance"));
                String::from("Add appliance")
            }
            DrawMode::Measure => {
                doc.floor_plan_mut(scale)
                    .measurements
                    .push(Measurement::new(start, end));
                String::from("Add measurement")
            }
            DrawMode::Select | DrawMode::Move | DrawMode::Pan => return None,
        };
        debug!(?mode, %description, "Draft committed");
        Some(description)
    }

    /// Selected entities, or the active unit when nothing is selected.
    pub(crate) fn targets(&self) -> Option<(EntityKind, BTreeSet<usize>)> {
        match self.selection.kind() {
            Some(kind) => Some((kind, self.selection.indices().clone())),
            None => self
                .active
                .map(|index| (EntityKind::Unit, BTreeSet::from([index]))),
        }
    }

    fn nudge(&mut self, doc: &mut CanvasDocument, dx: f64, dy: f64) -> Vec<Action> {
        if self.is_dragging() {
            return Vec::new();
        }
        let Some((kind, indices)) = self.targets() else {
            return Vec::new();
        };
        let moved = indices
            .iter()
            .filter(|&&i| doc.translate(kind, i, dx, dy))
            .count();
        if moved == 0 {
            return Vec::new();
        }
        vec![
            Action::RenderNeeded,
            Action::Committed(describe("Nudge", kind, moved)),
        ]
    }

    pub(crate) fn delete_targets(&mut self, doc: &mut CanvasDocument) -> Vec<Action> {
        if self.is_dragging() {
            return Vec::new();
        }
        let Some((kind, indices)) = self.targets() else {
            return Vec::new();
        };
        let removed = doc.remove(kind, &indices);
        if removed == 0 {
            return Vec::new();
        }
        self.selection.clear();
        self.active = None;
        vec![
            Action::RenderNeeded,
            Action::Committed(describe("Delete", kind, removed)),
        ]
    }

    fn escape(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if matches!(self.gesture, Gesture::Drawing { .. }) {
            self.gesture = Gesture::Idle;
            actions.push(Action::ReleasePointer);
        }
        self.mode = DrawMode::None;
        actions.push(Action::RenderNeeded);
        actions
    }
}
