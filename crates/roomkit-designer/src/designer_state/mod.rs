//! Designer state manager for UI integration.
//!
//! One [`DesignerState`] owns every canvas of every room, the single active
//! canvas and its editing state. Hosts drive it either through the direct
//! methods or through [`DesignerState::dispatch`] with a [`DesignerAction`].
//!
//! This module is split into submodules:
//! - `canvases`: floors, rooms, canvas switching, naming, delete/restore, undo/redo
//! - `units`: per-unit edits (loft, dividers, add-ons, lock, group, dimensions)
//! - `file_io`: Save/load operations

mod canvases;
mod file_io;
mod units;

pub use canvases::CanvasSummary;

use std::collections::BTreeMap;
use std::path::PathBuf;

use roomkit_core::{
    mm_to_meters, AddOn, AddOnId, CanvasKey, DrawnUnit, FloorDef, FloorPlan, RoomDef,
    SceneTransform, ScenePoint, SceneVector, TransformStrategy, UnitType,
};
use roomkit_settings::Config;
use tracing::debug;

use crate::document::CanvasDocument;
use crate::history::{DeletedCanvas, UndoRedoManager};
use crate::interaction::{
    Action, DraftShape, DrawMode, Interaction, InteractionContext, Key, KeyEvent, PointerEvent,
};
use crate::selection_manager::SelectionManager;
use crate::serialization::ProjectMetadata;
use crate::viewport::Viewport;

/// Axis-aligned box of a unit in scene metres, resting on the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBox {
    pub center: ScenePoint,
    /// Full extent along scene X, Y (up) and Z.
    pub size: SceneVector,
}

/// Everything a host can ask the designer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignerAction {
    SetMode(DrawMode),
    SetUnitType(UnitType),
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    PointerLeave,
    Focus,
    Blur,
    KeyDown(KeyEvent),
    ResizeViewport { width: f64, height: f64 },
    Undo,
    Redo,
    AddFloor(String),
    AddRoom { floor_id: String, name: String },
    AddCanvas,
    SwitchCanvas(CanvasKey),
    RenameCanvas { key: CanvasKey, name: Option<String> },
    DeleteCanvas(CanvasKey),
    AddLoft(Option<f64>),
    RemoveLoft,
    SetShutterCount(usize),
    SetSectionCount(usize),
    AddAddOn(AddOn),
    RemoveAddOn(AddOnId),
    SetLocked(bool),
    GroupSelection,
    UngroupSelection,
    DeleteSelected,
    SetUnitDimensions {
        width_mm: Option<f64>,
        height_mm: Option<f64>,
        depth_mm: Option<f64>,
    },
}

/// Designer state for UI integration
#[derive(Debug, Clone)]
pub struct DesignerState {
    config: Config,
    active_key: CanvasKey,
    document: CanvasDocument,
    /// Every canvas except the active one.
    stored: BTreeMap<CanvasKey, CanvasDocument>,
    /// User overrides of derived canvas names.
    canvas_names: BTreeMap<CanvasKey, String>,
    floors: Vec<FloorDef>,
    rooms: Vec<RoomDef>,
    interaction: Interaction,
    history: UndoRedoManager,
    deleted_canvas: Option<DeletedCanvas>,
    viewport: Viewport,
    /// Metadata of the loaded project; carried into the next save.
    metadata: Option<ProjectMetadata>,
    pub current_file_path: Option<PathBuf>,
    pub is_modified: bool,
    pub design_name: String,
}

impl DesignerState {
    /// Creates a designer with one empty canvas in a default room.
    pub fn new(config: Config) -> Self {
        let active_key = CanvasKey::default();
        let mut history = UndoRedoManager::new(config.history.limit);
        history.reset(CanvasDocument::new());
        let viewport = Viewport::default().with_room(config.room.clone());
        Self {
            floors: vec![FloorDef {
                id: active_key.floor_id.clone(),
                name: String::from("Ground Floor"),
            }],
            rooms: vec![RoomDef {
                id: active_key.room_id.clone(),
                floor_id: active_key.floor_id.clone(),
                name: String::from("Room 1"),
            }],
            config,
            active_key,
            document: CanvasDocument::new(),
            stored: BTreeMap::new(),
            canvas_names: BTreeMap::new(),
            interaction: Interaction::new(),
            history,
            deleted_canvas: None,
            viewport,
            metadata: None,
            current_file_path: None,
            is_modified: false,
            design_name: String::from("Untitled"),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn active_key(&self) -> &CanvasKey {
        &self.active_key
    }

    /// Geometry of the active canvas.
    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    pub fn units(&self) -> &[DrawnUnit] {
        &self.document.units
    }

    pub fn floor_plan(&self) -> Option<&FloorPlan> {
        self.document.floor_plan.as_ref()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn selection(&self) -> &SelectionManager {
        self.interaction.selection()
    }

    pub fn mode(&self) -> DrawMode {
        self.interaction.mode()
    }

    pub fn draft(&self) -> Option<DraftShape> {
        self.interaction.draft()
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }

    pub fn history(&self) -> &UndoRedoManager {
        &self.history
    }

    pub fn deleted_canvas(&self) -> Option<&DeletedCanvas> {
        self.deleted_canvas.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn floors(&self) -> &[FloorDef] {
        &self.floors
    }

    pub fn rooms(&self) -> &[RoomDef] {
        &self.rooms
    }

    /// Scene transform of the active canvas.
    pub fn transform(&self) -> TransformStrategy {
        self.viewport.transform_for(self.document.floor_plan.as_ref())
    }

    /// Scene box of unit `index`, centred over its footprint and resting on
    /// the floor. Sized from the unit's physical dimensions.
    pub fn unit_scene_box(&self, index: usize) -> Option<SceneBox> {
        let unit = self.document.units.get(index)?;
        let footprint = self.transform().surface_to_scene(unit.rect.center());
        let height = mm_to_meters(unit.height_mm);
        Some(SceneBox {
            center: ScenePoint::new(footprint.x, height / 2.0, footprint.z),
            size: SceneVector::new(
                mm_to_meters(unit.width_mm),
                height,
                mm_to_meters(unit.depth_mm),
            ),
        })
    }

    pub fn scene_boxes(&self) -> Vec<SceneBox> {
        (0..self.document.units.len())
            .filter_map(|i| self.unit_scene_box(i))
            .collect()
    }

    pub fn set_mode(&mut self, mode: DrawMode) -> Vec<Action> {
        self.route(|ix, doc, ctx| ix.set_mode(doc, mode, ctx))
    }

    pub fn set_unit_type(&mut self, unit_type: UnitType) {
        self.interaction.set_unit_type(unit_type);
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) -> Vec<Action> {
        self.route(|ix, doc, ctx| ix.pointer_down(doc, event, ctx))
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> Vec<Action> {
        self.route(|ix, doc, ctx| ix.pointer_move(doc, event, ctx))
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) -> Vec<Action> {
        self.route(|ix, doc, ctx| ix.pointer_up(doc, event, ctx))
    }

    pub fn pointer_leave(&mut self) -> Vec<Action> {
        self.route(|ix, doc, ctx| ix.pointer_leave(doc, ctx))
    }

    pub fn focus(&mut self) {
        self.interaction.set_focused(true);
    }

    pub fn blur(&mut self) -> Vec<Action> {
        self.route(|ix, doc, ctx| ix.blur(doc, ctx))
    }

    /// Keyboard input. Undo and redo shortcuts are handled here; everything
    /// else goes to the interaction handlers.
    pub fn key_down(&mut self, event: &KeyEvent) -> Vec<Action> {
        if self.interaction.is_focused() && event.modifiers.ctrl {
            match event.key {
                Key::Char('z') | Key::Char('Z') if event.modifiers.shift => return self.redo(),
                Key::Char('z') | Key::Char('Z') => return self.undo(),
                Key::Char('y') | Key::Char('Y') => return self.redo(),
                _ => {}
            }
        }
        self.route(|ix, doc, ctx| ix.key_down(doc, event, ctx))
    }

    /// The host resized the drawing surface.
    pub fn resize_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport.set_surface_size(width, height);
        vec![Action::RenderNeeded]
    }

    /// Applies one action and returns what the host should do next.
    pub fn dispatch(&mut self, action: DesignerAction) -> Vec<Action> {
        match action {
            DesignerAction::SetMode(mode) => self.set_mode(mode),
            DesignerAction::SetUnitType(unit_type) => {
                self.set_unit_type(unit_type);
                Vec::new()
            }
            DesignerAction::PointerDown(event) => self.pointer_down(&event),
            DesignerAction::PointerMove(event) => self.pointer_move(&event),
            DesignerAction::PointerUp(event) => self.pointer_up(&event),
            DesignerAction::PointerLeave => self.pointer_leave(),
            DesignerAction::Focus => {
                self.focus();
                Vec::new()
            }
            DesignerAction::Blur => self.blur(),
            DesignerAction::KeyDown(event) => self.key_down(&event),
            DesignerAction::ResizeViewport { width, height } => self.resize_viewport(width, height),
            DesignerAction::Undo => self.undo(),
            DesignerAction::Redo => self.redo(),
            DesignerAction::AddFloor(name) => {
                self.add_floor(&name);
                vec![Action::RenderNeeded]
            }
            DesignerAction::AddRoom { floor_id, name } => match self.add_room(&floor_id, &name) {
                Some(_) => vec![Action::RenderNeeded],
                None => Vec::new(),
            },
            DesignerAction::AddCanvas => {
                self.add_canvas();
                vec![Action::RenderNeeded]
            }
            DesignerAction::SwitchCanvas(key) => self.switch_canvas(key),
            DesignerAction::RenameCanvas { key, name } => {
                if self.rename_canvas(&key, name.as_deref()) {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            DesignerAction::DeleteCanvas(key) => self.delete_canvas(&key),
            DesignerAction::AddLoft(height_px) => self.add_loft(height_px),
            DesignerAction::RemoveLoft => self.remove_loft(),
            DesignerAction::SetShutterCount(count) => self.set_shutter_count(count),
            DesignerAction::SetSectionCount(count) => self.set_section_count(count),
            DesignerAction::AddAddOn(add_on) => self.add_add_on(add_on),
            DesignerAction::RemoveAddOn(id) => self.remove_add_on(id),
            DesignerAction::SetLocked(locked) => self.set_locked(locked),
            DesignerAction::GroupSelection => self.group_selection(),
            DesignerAction::UngroupSelection => self.ungroup_selection(),
            DesignerAction::DeleteSelected => self.delete_selected(),
            DesignerAction::SetUnitDimensions {
                width_mm,
                height_mm,
                depth_mm,
            } => self.set_unit_dimensions(width_mm, height_mm, depth_mm),
        }
    }

    /// Reducer form of [`dispatch`](Self::dispatch): consumes the state and
    /// returns the next one. Host actions are dropped.
    pub fn reduce(mut self, action: DesignerAction) -> Self {
        self.dispatch(action);
        self
    }

    /// Runs an interaction handler against the active canvas and records
    /// any committed change.
    fn route(
        &mut self,
        handler: impl FnOnce(
            &mut Interaction,
            &mut CanvasDocument,
            &InteractionContext<'_>,
        ) -> Vec<Action>,
    ) -> Vec<Action> {
        let transform = self.transform();
        let ctx = InteractionContext {
            transform: &transform,
            snapping: &self.config.snapping,
            editing: &self.config.editing,
        };
        let actions = handler(&mut self.interaction, &mut self.document, &ctx);
        self.apply(actions)
    }

    /// Ends any gesture in progress without committing a draft.
    fn settle_gesture(&mut self) -> Vec<Action> {
        self.route(|ix, doc, ctx| ix.end_gesture(doc, ctx, false))
    }

    fn apply(&mut self, actions: Vec<Action>) -> Vec<Action> {
        for action in &actions {
            match action {
                Action::Committed(description) => self.record(description),
                Action::PanBy { dx, dy } => self.viewport.pan_by(*dx, *dy),
                _ => {}
            }
        }
        actions
    }

    fn record(&mut self, description: &str) {
        self.history.record(self.document.clone(), description);
        self.is_modified = true;
        debug!(canvas = %self.active_key, description, "Committed to history");
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
