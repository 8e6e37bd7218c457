//! Edits of the active unit and of the current selection.
//!
//! Unit edits go through the active unit and are ignored when it is locked
//! or missing. Lock, group and delete work on the selection, falling back
//! to the active unit.

use roomkit_core::constants::DEFAULT_LOFT_HEIGHT_PX;
use roomkit_core::{AddOn, AddOnId, DrawnUnit};
use tracing::debug;
use uuid::Uuid;

use super::DesignerState;
use crate::interaction::Action;
use crate::resize::{set_divider_counts, with_loft};

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

impl DesignerState {
    /// The active unit, if any.
    pub fn active_unit(&self) -> Option<&DrawnUnit> {
        self.interaction
            .active()
            .and_then(|i| self.document.units.get(i))
    }

    /// Replaces the active unit with `edit(unit)` and commits when it changed.
    fn edit_active_unit(
        &mut self,
        description: &str,
        edit: impl FnOnce(&DrawnUnit) -> DrawnUnit,
    ) -> Vec<Action> {
        if self.interaction.is_dragging() {
            return Vec::new();
        }
        let Some(index) = self.interaction.active() else {
            return Vec::new();
        };
        let Some(unit) = self.document.units.get(index) else {
            return Vec::new();
        };
        if unit.locked {
            debug!(index, "Ignoring edit of locked unit");
            return Vec::new();
        }
        let next = edit(unit);
        if next == *unit {
            return Vec::new();
        }
        self.document.units[index] = next;
        self.apply(vec![
            Action::RenderNeeded,
            Action::Committed(description.to_string()),
        ])
    }

    /// Adds a loft on top of the active unit, replacing an existing one.
    pub fn add_loft(&mut self, height_px: Option<f64>) -> Vec<Action> {
        let height = positive(height_px).unwrap_or(DEFAULT_LOFT_HEIGHT_PX);
        self.edit_active_unit("Add loft", |unit| with_loft(unit, height))
    }

    pub fn remove_loft(&mut self) -> Vec<Action> {
        self.edit_active_unit("Remove loft", |unit| DrawnUnit {
            loft_rect: None,
            ..unit.clone()
        })
    }

    /// Re-spaces shutter dividers evenly for `count` shutters.
    pub fn set_shutter_count(&mut self, count: usize) -> Vec<Action> {
        self.edit_active_unit("Set shutter count", |unit| {
            set_divider_counts(unit, count, unit.section_count())
        })
    }

    /// Re-spaces section dividers evenly for `count` sections.
    pub fn set_section_count(&mut self, count: usize) -> Vec<Action> {
        self.edit_active_unit("Set section count", |unit| {
            set_divider_counts(unit, unit.shutter_count(), count)
        })
    }

    /// Attaches an add-on, clamped into the unit's box.
    pub fn add_add_on(&mut self, add_on: AddOn) -> Vec<Action> {
        self.edit_active_unit("Add add-on", |unit| {
            let mut next = unit.clone();
            next.add_ons
                .push(add_on.clamped_to(unit.rect.width, unit.rect.height));
            next
        })
    }

    pub fn remove_add_on(&mut self, id: AddOnId) -> Vec<Action> {
        self.edit_active_unit("Remove add-on", |unit| {
            let mut next = unit.clone();
            next.add_ons.retain(|a| a.id != id);
            next
        })
    }

    /// Sets physical dimensions. `None` or non-positive values leave that
    /// dimension unchanged; the drawn box is not touched.
    pub fn set_unit_dimensions(
        &mut self,
        width_mm: Option<f64>,
        height_mm: Option<f64>,
        depth_mm: Option<f64>,
    ) -> Vec<Action> {
        self.edit_active_unit("Set dimensions", |unit| DrawnUnit {
            width_mm: positive(width_mm).unwrap_or(unit.width_mm),
            height_mm: positive(height_mm).unwrap_or(unit.height_mm),
            depth_mm: positive(depth_mm).unwrap_or(unit.depth_mm),
            ..unit.clone()
        })
    }

    /// Locks or unlocks the selection (or the active unit).
    pub fn set_locked(&mut self, locked: bool) -> Vec<Action> {
        let Some((kind, indices)) = self.interaction.targets() else {
            return Vec::new();
        };
        let mut changed = 0;
        for &i in &indices {
            if self.document.is_locked(kind, i) == Some(!locked)
                && self.document.set_locked(kind, i, locked)
            {
                changed += 1;
            }
        }
        if changed == 0 {
            return Vec::new();
        }
        let verb = if locked { "Lock" } else { "Unlock" };
        self.apply(vec![
            Action::RenderNeeded,
            Action::Committed(format!("{verb} {}", kind.label())),
        ])
    }

    /// Puts every selected entity into one new group. Needs at least two.
    pub fn group_selection(&mut self) -> Vec<Action> {
        let Some(kind) = self.interaction.selection().kind() else {
            return Vec::new();
        };
        let indices = self.interaction.selection().indices().clone();
        if indices.len() < 2 {
            return Vec::new();
        }
        let group = Uuid::new_v4();
        let grouped = indices
            .iter()
            .filter(|&&i| self.document.set_group(kind, i, Some(group)))
            .count();
        if grouped == 0 {
            return Vec::new();
        }
        debug!(%group, grouped, "Grouped selection");
        self.apply(vec![
            Action::RenderNeeded,
            Action::Committed(format!("Group {grouped} {}s", kind.label())),
        ])
    }

    pub fn ungroup_selection(&mut self) -> Vec<Action> {
        let Some(kind) = self.interaction.selection().kind() else {
            return Vec::new();
        };
        let indices = self.interaction.selection().indices().clone();
        let mut ungrouped = 0;
        for &i in &indices {
            if self.document.group_of(kind, i).is_some() && self.document.set_group(kind, i, None) {
                ungrouped += 1;
            }
        }
        if ungrouped == 0 {
            return Vec::new();
        }
        self.apply(vec![
            Action::RenderNeeded,
            Action::Committed(String::from("Ungroup")),
        ])
    }

    /// Deletes the selection (or the active unit), skipping locked entities.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let actions = self.interaction.delete_targets(&mut self.document);
        self.apply(actions)
    }
}
