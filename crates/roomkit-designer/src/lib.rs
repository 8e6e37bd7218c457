//! # RoomKit Designer
//!
//! Interactive layer of RoomKit: everything between raw pointer/keyboard
//! events and the unit geometry in `roomkit-core`.
//!
//! ## Core Components
//!
//! - **Document**: units and floor plan of one canvas, addressed by entity kind and index
//! - **Resize**: edge resize with minimum-size clamp, divider drag and re-spacing
//! - **Snapping**: millimetre grid, object snap and ortho lock
//! - **Interaction**: draw / select / move / pan modes and the gesture lifecycle
//! - **History**: bounded snapshot undo/redo plus the last deleted canvas
//! - **Designer state**: floors, rooms and canvases with one active canvas
//! - **Serialization**: `.roomkit` project files
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (one active CanvasKey)
//!   ├── CanvasDocument (active) + stored canvases
//!   ├── Interaction (mode, gesture, active unit, selection)
//!   │     ├── Resize engine
//!   │     └── Snapping
//!   ├── UndoRedoManager + DeletedCanvas
//!   └── Viewport (surface size, zoom/pan, scene transform)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use roomkit_designer::{DesignerState, PointerEvent};
//!
//! let mut state = DesignerState::default();
//! state.pointer_down(&PointerEvent::surface(100.0, 100.0));
//! state.pointer_move(&PointerEvent::surface(300.0, 250.0));
//! state.pointer_up(&PointerEvent::surface(300.0, 250.0));
//! assert_eq!(state.units().len(), 1);
//! ```

pub mod designer_state;
pub mod document;
pub mod history;
pub mod interaction;
pub mod resize;
pub mod selection_manager;
pub mod serialization;
pub mod snapping;
pub mod viewport;

pub use designer_state::{CanvasSummary, DesignerAction, DesignerState, SceneBox};
pub use document::CanvasDocument;
pub use history::{DeletedCanvas, HistoryEntry, UndoRedoManager};
pub use interaction::{
    Action, DraftShape, DrawMode, Gesture, Interaction, InteractionContext, Key, KeyEvent,
    Modifiers, PointerEvent, PointerPosition,
};
pub use resize::{DividerAxis, ResizeOptions};
pub use selection_manager::SelectionManager;
pub use serialization::{CanvasRecord, ProjectFile, ProjectMetadata, ViewportState};
pub use viewport::Viewport;
