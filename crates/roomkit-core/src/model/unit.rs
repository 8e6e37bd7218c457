//! Placed furniture units, their lofts, dividers and add-ons.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geometry::{evenly_spaced, Rect};
use crate::error::Error;

/// Unique identifier for a drawn unit.
pub type UnitId = Uuid;

/// Identifier shared by every member of a group.
pub type GroupId = Uuid;

/// Unique identifier for an add-on.
pub type AddOnId = Uuid;

/// The kind of furniture a unit represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    #[default]
    Wardrobe,
    Kitchen,
    TvUnit,
    Loft,
    StudyTable,
    ShoeRack,
    Bookshelf,
    Crockery,
    Dresser,
    Vanity,
    Other,
}

impl UnitType {
    pub const ALL: [UnitType; 11] = [
        UnitType::Wardrobe,
        UnitType::Kitchen,
        UnitType::TvUnit,
        UnitType::Loft,
        UnitType::StudyTable,
        UnitType::ShoeRack,
        UnitType::Bookshelf,
        UnitType::Crockery,
        UnitType::Dresser,
        UnitType::Vanity,
        UnitType::Other,
    ];

    /// Human readable label, also used when deriving canvas names.
    pub fn label(self) -> &'static str {
        match self {
            UnitType::Wardrobe => "Wardrobe",
            UnitType::Kitchen => "Kitchen",
            UnitType::TvUnit => "TV Unit",
            UnitType::Loft => "Loft",
            UnitType::StudyTable => "Study Table",
            UnitType::ShoeRack => "Shoe Rack",
            UnitType::Bookshelf => "Bookshelf",
            UnitType::Crockery => "Crockery Unit",
            UnitType::Dresser => "Dresser",
            UnitType::Vanity => "Vanity",
            UnitType::Other => "Unit",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            UnitType::Wardrobe => "wardrobe",
            UnitType::Kitchen => "kitchen",
            UnitType::TvUnit => "tv_unit",
            UnitType::Loft => "loft",
            UnitType::StudyTable => "study_table",
            UnitType::ShoeRack => "shoe_rack",
            UnitType::Bookshelf => "bookshelf",
            UnitType::Crockery => "crockery",
            UnitType::Dresser => "dresser",
            UnitType::Vanity => "vanity",
            UnitType::Other => "other",
        }
    }

    /// Carcass depth assigned to a freshly drawn unit.
    pub fn default_depth_mm(self) -> f64 {
        match self {
            UnitType::Wardrobe => 600.0,
            UnitType::Kitchen => 560.0,
            UnitType::TvUnit => 450.0,
            UnitType::Loft => 600.0,
            UnitType::StudyTable => 550.0,
            UnitType::ShoeRack => 350.0,
            UnitType::Bookshelf => 300.0,
            UnitType::Crockery => 450.0,
            UnitType::Dresser => 450.0,
            UnitType::Vanity => 500.0,
            UnitType::Other => 450.0,
        }
    }

    /// Number of shutters a freshly drawn unit is split into.
    pub fn default_shutter_count(self) -> usize {
        match self {
            UnitType::Wardrobe | UnitType::Crockery => 2,
            UnitType::Kitchen | UnitType::TvUnit | UnitType::Loft => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UnitType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace([' ', '-'], "_");
        UnitType::ALL
            .into_iter()
            .find(|t| t.slug() == needle || t.label().to_lowercase().replace(' ', "_") == needle)
            .ok_or_else(|| Error::UnknownUnitType(s.to_string()))
    }
}

/// Fittings that can be placed inside a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    Drawer,
    Shelf,
    HangingRod,
    Mirror,
    Light,
    Handle,
    Other,
}

/// A sub-rectangle owned by exactly one unit, positioned relative to the
/// parent box's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: AddOnId,
    pub kind: AddOnKind,
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
}

impl AddOn {
    /// Creates an add-on with a fresh id.
    pub fn new(kind: AddOnKind, offset_x: f64, offset_y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            offset_x,
            offset_y,
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Position of the add-on on the drawing surface for the given parent box.
    pub fn absolute_rect(&self, parent: &Rect) -> Rect {
        Rect::new(
            parent.x + self.offset_x,
            parent.y + self.offset_y,
            self.width,
            self.height,
        )
    }

    /// Returns a copy shrunk and shifted so it lies inside a parent of the given size.
    pub fn clamped_to(&self, parent_width: f64, parent_height: f64) -> Self {
        let width = self.width.min(parent_width);
        let height = self.height.min(parent_height);
        Self {
            offset_x: self.offset_x.clamp(0.0, parent_width - width),
            offset_y: self.offset_y.clamp(0.0, parent_height - height),
            width,
            height,
            ..self.clone()
        }
    }
}

/// A placed furniture unit.
///
/// The pixel `rect` is a view of the unit; `width_mm`, `height_mm` and
/// `depth_mm` are its physical size and are only changed explicitly.
/// Divider positions are absolute pixel coordinates, sorted ascending and
/// strictly inside `rect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnUnit {
    pub id: UnitId,
    pub unit_type: UnitType,
    pub rect: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loft_rect: Option<Rect>,
    #[serde(default)]
    pub shutter_divider_xs: Vec<f64>,
    #[serde(default)]
    pub horizontal_divider_ys: Vec<f64>,
    pub width_mm: f64,
    pub height_mm: f64,
    pub depth_mm: f64,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

impl DrawnUnit {
    /// Creates a unit from a drawn box.
    ///
    /// `mm_per_px` is the `(x, y)` scale of the active transform and seeds the
    /// physical width and height.
    pub fn new(unit_type: UnitType, rect: Rect, mm_per_px: (f64, f64)) -> Self {
        let rect = Rect::with_min_size(rect.x, rect.y, rect.width, rect.height);
        Self {
            id: Uuid::new_v4(),
            unit_type,
            shutter_divider_xs: evenly_spaced(
                rect.x,
                rect.width,
                unit_type.default_shutter_count(),
            ),
            horizontal_divider_ys: Vec::new(),
            width_mm: rect.width * mm_per_px.0,
            height_mm: rect.height * mm_per_px.1,
            depth_mm: unit_type.default_depth_mm(),
            rect,
            loft_rect: None,
            add_ons: Vec::new(),
            locked: false,
            group_id: None,
        }
    }

    /// Number of shutters, always at least one.
    pub fn shutter_count(&self) -> usize {
        self.shutter_divider_xs.len() + 1
    }

    /// Number of horizontal sections, always at least one.
    pub fn section_count(&self) -> usize {
        self.horizontal_divider_ys.len() + 1
    }

    /// Box covering the unit and its loft.
    pub fn outer_rect(&self) -> Rect {
        match &self.loft_rect {
            Some(loft) => self.rect.union(loft),
            None => self.rect,
        }
    }

    /// Returns a copy with dividers recomputed evenly across the current box.
    pub fn with_even_dividers(&self, shutters: usize, sections: usize) -> Self {
        Self {
            shutter_divider_xs: evenly_spaced(self.rect.x, self.rect.width, shutters),
            horizontal_divider_ys: evenly_spaced(self.rect.y, self.rect.height, sections),
            ..self.clone()
        }
    }
}
