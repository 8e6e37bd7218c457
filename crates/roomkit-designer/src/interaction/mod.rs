//! Pointer and keyboard interaction for the drawing surface.
//!
//! [`Interaction`] holds the transient editing state: the current mode, the
//! gesture in progress, the active unit and the selection. The handlers in
//! [`operations`] turn pointer and key events into document edits and host
//! [`Action`]s. Nothing here touches history; the designer state records a
//! snapshot whenever a handler reports [`Action::Committed`].

mod operations;
mod types;

pub use operations::InteractionContext;
pub use types::{
    Action, DraftShape, DrawMode, Gesture, Key, KeyEvent, Modifiers, PointerEvent,
    PointerPosition,
};

use roomkit_core::{Rect, UnitType};

use crate::selection_manager::SelectionManager;

/// Transient editing state of one canvas.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    mode: DrawMode,
    gesture: Gesture,
    active: Option<usize>,
    selection: SelectionManager,
    unit_type: UnitType,
    focused: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Index of the active unit, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn set_active(&mut self, active: Option<usize>) {
        self.active = active;
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionManager {
        &mut self.selection
    }

    /// Unit type used for newly drawn units.
    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn set_unit_type(&mut self, unit_type: UnitType) {
        self.unit_type = unit_type;
    }

    /// Whether the surface has keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_dragging(&self) -> bool {
        !self.gesture.is_idle()
    }

    /// The rubber-band shape being drawn, for the renderer.
    pub fn draft(&self) -> Option<DraftShape> {
        match &self.gesture {
            Gesture::Drawing {
                mode,
                start,
                current,
                ..
            } => Some(if mode.draws_segment() {
                DraftShape::Segment {
                    start: *start,
                    end: *current,
                }
            } else {
                DraftShape::Box(Rect::from_corners(*start, *current))
            }),
            _ => None,
        }
    }

    /// Drops the gesture, active unit and selection. Mode, unit type and
    /// focus survive.
    pub fn clear_transient(&mut self) {
        self.gesture = Gesture::Idle;
        self.active = None;
        self.selection.clear();
    }
}
