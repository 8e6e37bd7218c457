//! Unit conversion utilities
//!
//! Converts between the three coordinate spaces the designer works in:
//! drawing-surface pixels, physical millimetres and 3D-scene metres. Pixel
//! X/Y map to scene X/Z; scene Y is vertical. Also formats and parses
//! lengths for display.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_ROOM_DEPTH_MM, DEFAULT_ROOM_HEIGHT_MM, DEFAULT_ROOM_WIDTH_MM};
use crate::error::Error;
use crate::model::{FloorPlan, Point};

/// A position in the 3D scene, in metres.
pub type ScenePoint = Point3<f64>;

/// A displacement in the 3D scene, in metres.
pub type SceneVector = Vector3<f64>;

/// Scales that are zero, negative or not finite fall back to 1 mm/px.
fn sane_scale(scale_mm_per_px: f64) -> f64 {
    if scale_mm_per_px.is_finite() && scale_mm_per_px > 0.0 {
        scale_mm_per_px
    } else {
        1.0
    }
}

/// Pixels to millimetres at the given scale.
pub fn px_to_mm(px: f64, scale_mm_per_px: f64) -> f64 {
    px * sane_scale(scale_mm_per_px)
}

/// Millimetres to pixels at the given scale.
pub fn mm_to_px(mm: f64, scale_mm_per_px: f64) -> f64 {
    mm / sane_scale(scale_mm_per_px)
}

pub fn mm_to_meters(mm: f64) -> f64 {
    mm / 1000.0
}

pub fn meters_to_mm(m: f64) -> f64 {
    m * 1000.0
}

/// Physical length of the pixel segment `a`–`b`.
pub fn segment_length_mm(a: Point, b: Point, scale_mm_per_px: f64) -> f64 {
    px_to_mm(a.distance_to(&b), scale_mm_per_px)
}

/// Mapping between the drawing surface and the 3D scene.
///
/// Implementations must be invertible: `scene_to_surface(surface_to_scene(p))`
/// returns `p` to within floating-point error.
pub trait SceneTransform {
    /// Millimetres per pixel along surface X and surface Y.
    fn mm_per_px(&self) -> (f64, f64);

    /// Surface point to a scene point on the floor (`y = 0`).
    fn surface_to_scene(&self, p: Point) -> ScenePoint;

    /// Scene point to surface point; the vertical component is ignored.
    fn scene_to_surface(&self, p: &ScenePoint) -> Point;

    /// Converts a scene displacement into a surface `(dx, dy)` in pixels.
    fn scene_delta_to_surface(&self, delta: &SceneVector) -> (f64, f64) {
        let (sx, sy) = self.mm_per_px();
        (meters_to_mm(delta.x) / sx, meters_to_mm(delta.z) / sy)
    }

    /// Converts a surface `(dx, dy)` in pixels into a scene displacement.
    fn surface_delta_to_scene(&self, dx: f64, dy: f64) -> SceneVector {
        let (sx, sy) = self.mm_per_px();
        SceneVector::new(mm_to_meters(dx * sx), 0.0, mm_to_meters(dy * sy))
    }

    /// Physical length of a surface displacement.
    fn length_px_to_mm(&self, dx: f64, dy: f64) -> f64 {
        let (sx, sy) = self.mm_per_px();
        (dx * sx).hypot(dy * sy)
    }
}

/// Transform of a canvas that has a floor plan: uniform scale about the
/// plan's pixel origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorPlanTransform {
    pub scale_mm_per_px: f64,
    pub origin: Point,
}

impl FloorPlanTransform {
    pub fn new(scale_mm_per_px: f64, origin: Point) -> Self {
        Self {
            scale_mm_per_px: sane_scale(scale_mm_per_px),
            origin,
        }
    }

    pub fn from_plan(plan: &FloorPlan) -> Self {
        Self::new(plan.scale_mm_per_px, plan.origin)
    }
}

impl SceneTransform for FloorPlanTransform {
    fn mm_per_px(&self) -> (f64, f64) {
        (self.scale_mm_per_px, self.scale_mm_per_px)
    }

    fn surface_to_scene(&self, p: Point) -> ScenePoint {
        ScenePoint::new(
            mm_to_meters(px_to_mm(p.x - self.origin.x, self.scale_mm_per_px)),
            0.0,
            mm_to_meters(px_to_mm(p.y - self.origin.y, self.scale_mm_per_px)),
        )
    }

    fn scene_to_surface(&self, p: &ScenePoint) -> Point {
        Point::new(
            self.origin.x + mm_to_px(meters_to_mm(p.x), self.scale_mm_per_px),
            self.origin.y + mm_to_px(meters_to_mm(p.z), self.scale_mm_per_px),
        )
    }
}

/// Fallback transform when a canvas has no floor plan: the whole drawing
/// surface is stretched over a fixed room footprint centred on the scene
/// origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultRoomTransform {
    pub surface_width_px: f64,
    pub surface_height_px: f64,
    pub room_width_mm: f64,
    pub room_depth_mm: f64,
    pub room_height_mm: f64,
}

impl DefaultRoomTransform {
    /// Creates a transform for a surface of the given size; degenerate sizes
    /// are treated as one pixel.
    pub fn new(surface_width_px: f64, surface_height_px: f64) -> Self {
        Self {
            surface_width_px: surface_width_px.max(1.0),
            surface_height_px: surface_height_px.max(1.0),
            room_width_mm: DEFAULT_ROOM_WIDTH_MM,
            room_depth_mm: DEFAULT_ROOM_DEPTH_MM,
            room_height_mm: DEFAULT_ROOM_HEIGHT_MM,
        }
    }

    /// Overrides the room footprint.
    pub fn with_room(mut self, width_mm: f64, depth_mm: f64, height_mm: f64) -> Self {
        self.room_width_mm = width_mm;
        self.room_depth_mm = depth_mm;
        self.room_height_mm = height_mm;
        self
    }
}

impl SceneTransform for DefaultRoomTransform {
    fn mm_per_px(&self) -> (f64, f64) {
        (
            self.room_width_mm / self.surface_width_px,
            self.room_depth_mm / self.surface_height_px,
        )
    }

    fn surface_to_scene(&self, p: Point) -> ScenePoint {
        let (sx, sy) = self.mm_per_px();
        ScenePoint::new(
            mm_to_meters(p.x * sx - self.room_width_mm / 2.0),
            0.0,
            mm_to_meters(p.y * sy - self.room_depth_mm / 2.0),
        )
    }

    fn scene_to_surface(&self, p: &ScenePoint) -> Point {
        let (sx, sy) = self.mm_per_px();
        Point::new(
            (meters_to_mm(p.x) + self.room_width_mm / 2.0) / sx,
            (meters_to_mm(p.z) + self.room_depth_mm / 2.0) / sy,
        )
    }
}

/// The transform a canvas uses, chosen explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformStrategy {
    FloorPlan(FloorPlanTransform),
    DefaultRoom(DefaultRoomTransform),
}

impl TransformStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            TransformStrategy::FloorPlan(_) => "floor_plan",
            TransformStrategy::DefaultRoom(_) => "default_room",
        }
    }

    fn inner(&self) -> &dyn SceneTransform {
        match self {
            TransformStrategy::FloorPlan(t) => t,
            TransformStrategy::DefaultRoom(t) => t,
        }
    }
}

impl SceneTransform for TransformStrategy {
    fn mm_per_px(&self) -> (f64, f64) {
        self.inner().mm_per_px()
    }

    fn surface_to_scene(&self, p: Point) -> ScenePoint {
        self.inner().surface_to_scene(p)
    }

    fn scene_to_surface(&self, p: &ScenePoint) -> Point {
        self.inner().scene_to_surface(p)
    }
}

/// Supported grid-snap steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum GridStep {
    Mm10,
    Mm25,
    #[default]
    Mm50,
    Mm100,
    Mm200,
}

impl GridStep {
    pub const ALL: [GridStep; 5] = [
        GridStep::Mm10,
        GridStep::Mm25,
        GridStep::Mm50,
        GridStep::Mm100,
        GridStep::Mm200,
    ];

    pub fn mm(self) -> u32 {
        match self {
            GridStep::Mm10 => 10,
            GridStep::Mm25 => 25,
            GridStep::Mm50 => 50,
            GridStep::Mm100 => 100,
            GridStep::Mm200 => 200,
        }
    }
}

impl TryFrom<u32> for GridStep {
    type Error = Error;

    fn try_from(mm: u32) -> Result<Self, Self::Error> {
        GridStep::ALL
            .into_iter()
            .find(|step| step.mm() == mm)
            .ok_or(Error::InvalidGridStep(mm))
    }
}

impl From<GridStep> for u32 {
    fn from(step: GridStep) -> Self {
        step.mm()
    }
}

impl fmt::Display for GridStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mm", self.mm())
    }
}

impl FromStr for GridStep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches("mm").trim();
        let mm = digits
            .parse::<u32>()
            .map_err(|_| Error::InvalidLength(s.to_string()))?;
        GridStep::try_from(mm)
    }
}

/// How lengths are presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthDisplay {
    /// Whole millimetres
    #[default]
    Millimeters,
    /// Metres with two decimals
    Meters,
}

/// Format length value for display
///
/// * `value_mm` - Value in millimetres
/// * `display` - Target presentation
pub fn format_length(value_mm: f64, display: LengthDisplay) -> String {
    match display {
        LengthDisplay::Millimeters => format!("{:.0} mm", value_mm),
        LengthDisplay::Meters => format!("{:.2} m", mm_to_meters(value_mm)),
    }
}

/// Shorthand for [`format_length`] in millimetres.
pub fn format_mm(value_mm: f64) -> String {
    format_length(value_mm, LengthDisplay::Millimeters)
}

/// Parse length string to millimetres
///
/// Accepts an optional `mm`, `cm` or `m` suffix; a bare number is read in
/// the given display unit.
pub fn parse_length(input: &str, display: LengthDisplay) -> crate::Result<f64> {
    let trimmed = input.trim().to_lowercase();
    if trimmed.is_empty() {
        return Err(Error::InvalidLength(input.to_string()));
    }

    let (number, factor) = if let Some(n) = trimmed.strip_suffix("mm") {
        (n, 1.0)
    } else if let Some(n) = trimmed.strip_suffix("cm") {
        (n, 10.0)
    } else if let Some(n) = trimmed.strip_suffix('m') {
        (n, 1000.0)
    } else {
        let factor = match display {
            LengthDisplay::Millimeters => 1.0,
            LengthDisplay::Meters => 1000.0,
        };
        (trimmed.as_str(), factor)
    };

    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidLength(input.to_string()))?;
    if !value.is_finite() {
        return Err(Error::InvalidLength(input.to_string()));
    }
    Ok(value * factor)
}
