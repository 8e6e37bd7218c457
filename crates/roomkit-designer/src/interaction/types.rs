//! Interaction type definitions: DrawMode, PointerEvent, KeyEvent, Action, Gesture.

use roomkit_core::{DrawnUnit, Edge, EntityKind, Point, Rect, ScenePoint};
use serde::{Deserialize, Serialize};

use crate::resize::{DividerAxis, ResizeOptions};

/// Interaction modes of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// Unit editing: resize, divider drag, move, and drawing new units.
    #[default]
    None,
    Select,
    Move,
    Pan,
    Wall,
    Floor,
    KitchenBase,
    KitchenWall,
    Door,
    Window,
    Appliance,
    Measure,
}

impl DrawMode {
    pub const ALL: [DrawMode; 12] = [
        DrawMode::None,
        DrawMode::Select,
        DrawMode::Move,
        DrawMode::Pan,
        DrawMode::Wall,
        DrawMode::Floor,
        DrawMode::KitchenBase,
        DrawMode::KitchenWall,
        DrawMode::Door,
        DrawMode::Window,
        DrawMode::Appliance,
        DrawMode::Measure,
    ];

    /// Modes where pointer-down starts a rubber-band floor-plan draft.
    pub fn is_drawing(self) -> bool {
        !matches!(
            self,
            DrawMode::None | DrawMode::Select | DrawMode::Move | DrawMode::Pan
        )
    }

    /// Drafts constrained to horizontal or vertical lines.
    pub fn is_ortho(self) -> bool {
        matches!(
            self,
            DrawMode::Wall | DrawMode::KitchenBase | DrawMode::KitchenWall
        )
    }

    /// Drafts that produce a segment rather than a box.
    pub fn draws_segment(self) -> bool {
        matches!(
            self,
            DrawMode::Wall
                | DrawMode::KitchenBase
                | DrawMode::KitchenWall
                | DrawMode::Door
                | DrawMode::Window
                | DrawMode::Measure
        )
    }
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };
}

/// Where a pointer event happened: on the 2D surface or in the 3D scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerPosition {
    /// Drawing-surface pixels.
    Surface(Point),
    /// Scene metres, already projected onto the floor by the host.
    Scene(ScenePoint),
}

/// A pointer event from either view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: PointerPosition,
    pub modifiers: Modifiers,
    /// Fit mode: the top edge of a unit must not be dragged in this gesture.
    pub fit_mode_locked_top: bool,
}

impl PointerEvent {
    pub fn surface(x: f64, y: f64) -> Self {
        Self {
            position: PointerPosition::Surface(Point::new(x, y)),
            modifiers: Modifiers::NONE,
            fit_mode_locked_top: false,
        }
    }

    pub fn scene(point: ScenePoint) -> Self {
        Self {
            position: PointerPosition::Scene(point),
            modifiers: Modifiers::NONE,
            fit_mode_locked_top: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_locked_top(mut self) -> Self {
        self.fit_mode_locked_top = true;
        self
    }

    pub fn is_scene(&self) -> bool {
        matches!(self.position, PointerPosition::Scene(_))
    }
}

/// Keys the designer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Delete,
    Backspace,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Requests from the designer to its host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Route further pointer events to the surface until released.
    CapturePointer,
    ReleasePointer,
    /// Something visible changed.
    RenderNeeded,
    /// The view was panned by `(dx, dy)` surface pixels.
    PanBy { dx: f64, dy: f64 },
    /// A mutation was committed to history.
    Committed(String),
}

/// The in-progress draft shape, for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftShape {
    Box(Rect),
    Segment { start: Point, end: Point },
}

/// The pointer gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Drawing {
        mode: DrawMode,
        start: Point,
        current: Point,
        from_scene: bool,
    },
    Moving {
        kind: EntityKind,
        indices: Vec<usize>,
        /// Scene position of the previous step; deltas are taken from here.
        last: ScenePoint,
        moved: bool,
    },
    Resizing {
        index: usize,
        edge: Edge,
        options: ResizeOptions,
        original: Rect,
    },
    DividerDrag {
        index: usize,
        axis: DividerAxis,
        divider: usize,
        original: Box<DrawnUnit>,
    },
    Panning {
        last: Point,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}
