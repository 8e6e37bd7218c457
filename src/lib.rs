//! # RoomKit
//!
//! Designer core for laying out furniture units (wardrobes, kitchens, TV
//! units, lofts, shelving) over a room or floor plan.
//!
//! ## Architecture
//!
//! RoomKit is organized as a workspace with multiple crates:
//!
//! 1. **roomkit-core** - Geometry, units, floor plan entities, canvas keys and
//!    coordinate transforms
//! 2. **roomkit-settings** - Snapping, editing, room and history configuration
//! 3. **roomkit-designer** - Interaction, resize engine, history and canvas/room state
//! 4. **roomkit** - This crate: re-exports, logging setup and the `roomkit` CLI
//!
//! ## Features
//!
//! - **Drawing**: units on a pixel surface with grid and object snapping
//! - **Editing**: move, edge resize with minimum size, dividers, lofts, add-ons
//! - **Floor plans**: walls, floors, kitchen runs, doors, windows, appliances, measurements
//! - **Canvases**: several canvases per room, derived names, delete with undo
//! - **3D**: scene boxes in metres for every unit

pub use roomkit_core as geometry;
pub use roomkit_designer as designer;
pub use roomkit_settings as settings;

pub use roomkit_core::{
    CanvasKey, DrawnUnit, EntityKind, FloorPlan, Point, Rect, SceneTransform, TransformStrategy,
    UnitType,
};
pub use roomkit_designer::{
    Action, DesignerAction, DesignerState, DrawMode, KeyEvent, PointerEvent, ProjectFile,
};
pub use roomkit_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support, `info` by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
