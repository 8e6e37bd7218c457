//! Shared numeric constants for the geometry core.

// ── Geometry ────────────────────────────────────────────────────

/// Minimum width and height of any unit box, in drawing-surface pixels.
pub const MIN_SIZE: f64 = 20.0;

/// Minimum spacing kept between a dragged divider and its neighbours, in pixels.
pub const MIN_DIVIDER_GAP_PX: f64 = 4.0;

/// Default loft height when a loft is added without an explicit size, in pixels.
pub const DEFAULT_LOFT_HEIGHT_PX: f64 = 60.0;

// ── Gestures ────────────────────────────────────────────────────

/// Smallest rubber-band gesture committed from the 2D surface, in pixels.
pub const MIN_GESTURE_PX: f64 = 20.0;

/// Smallest rubber-band gesture committed from the 3D scene, in millimetres.
pub const MIN_GESTURE_MM: f64 = 100.0;

/// Hit slop for edge and divider handles, in pixels.
pub const HANDLE_TOLERANCE_PX: f64 = 6.0;

/// Arrow-key nudge distance, in pixels.
pub const NUDGE_STEP_PX: f64 = 1.0;

/// Arrow-key nudge distance with the modifier held, in pixels.
pub const NUDGE_STEP_LARGE_PX: f64 = 10.0;

// ── Snapping ────────────────────────────────────────────────────

/// Object-snap capture radius, in pixels.
pub const OBJECT_SNAP_THRESHOLD_PX: f64 = 8.0;

// ── History ─────────────────────────────────────────────────────

/// Maximum number of snapshots retained by the undo/redo history.
pub const HISTORY_LIMIT: usize = 50;

// ── Rooms ───────────────────────────────────────────────────────

/// Floor-plan scale used when a floor plan is created implicitly.
pub const DEFAULT_SCALE_MM_PER_PX: f64 = 10.0;

/// Footprint width of the fallback room when no floor plan exists.
pub const DEFAULT_ROOM_WIDTH_MM: f64 = 4000.0;

/// Footprint depth of the fallback room when no floor plan exists.
pub const DEFAULT_ROOM_DEPTH_MM: f64 = 3000.0;

/// Ceiling height of the fallback room.
pub const DEFAULT_ROOM_HEIGHT_MM: f64 = 2700.0;

/// Default wall thickness for walls drawn on a floor plan.
pub const DEFAULT_WALL_THICKNESS_MM: f64 = 115.0;
