//! Viewport for the drawing surface.
//!
//! Tracks the surface size reported by the host, the view zoom and pan, and
//! the fallback room used to place units in the 3D scene when a canvas has
//! no floor plan. Picks the scene transform for a canvas.

use roomkit_core::{DefaultRoomTransform, FloorPlan, FloorPlanTransform, TransformStrategy};
use roomkit_settings::RoomSettings;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 50.0;

/// Represents the viewport state (surface size, zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    surface_width: f64,
    surface_height: f64,
    room: RoomSettings,
}

impl Viewport {
    /// Creates a new viewport for a surface of the given size.
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            surface_width: surface_width.max(1.0),
            surface_height: surface_height.max(1.0),
            room: RoomSettings::default(),
        }
    }

    /// Uses the given fallback room footprint.
    pub fn with_room(mut self, room: RoomSettings) -> Self {
        self.room = room;
        self
    }

    pub fn surface_width(&self) -> f64 {
        self.surface_width
    }

    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    /// Sets the surface dimensions (called when the host resizes).
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.surface_width = width.max(1.0);
        self.surface_height = height.max(1.0);
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, ignored outside 0.1 to 50.0.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Applies a pan gesture step.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Transform that stretches the whole surface over the fallback room.
    pub fn default_room_transform(&self) -> DefaultRoomTransform {
        DefaultRoomTransform::new(self.surface_width, self.surface_height).with_room(
            self.room.width_mm,
            self.room.depth_mm,
            self.room.height_mm,
        )
    }

    /// Scene transform for a canvas: its floor plan's when it has one,
    /// otherwise the fallback room.
    pub fn transform_for(&self, floor_plan: Option<&FloorPlan>) -> TransformStrategy {
        match floor_plan {
            Some(plan) => TransformStrategy::FloorPlan(FloorPlanTransform::from_plan(plan)),
            None => TransformStrategy::DefaultRoom(self.default_room_transform()),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
