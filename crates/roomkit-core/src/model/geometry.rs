//! Pixel-space geometry primitives: points, edges, and rotated boxes.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_SIZE;

/// A point in drawing-surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Distance from this point to the segment `a`–`b`.
    pub fn distance_to_segment(&self, a: &Point, b: &Point) -> f64 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq < f64::EPSILON {
            return self.distance_to(a);
        }
        let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
        self.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
    }
}

/// One side of a box, used to address resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// The edge on the other side of the box.
    pub fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    /// Whether dragging this edge changes the box width (as opposed to height).
    pub fn is_vertical(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }
}

/// Axis-aligned rectangle with a rotation in degrees about its center.
///
/// `x`/`y` is the top-left corner in pixel space (Y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Rect {
    /// Creates a rectangle exactly as given.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Creates a rectangle whose width and height are raised to at least [`MIN_SIZE`].
    pub fn with_min_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, width.max(MIN_SIZE), height.max(MIN_SIZE))
    }

    /// Normalised rectangle spanning two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Pixel coordinate of the given edge (X for left/right, Y for top/bottom).
    pub fn edge_coordinate(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Left => self.x,
            Edge::Right => self.right(),
            Edge::Top => self.y,
            Edge::Bottom => self.bottom(),
        }
    }

    /// Returns a copy moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Returns a copy grown by `amount` on every side.
    pub fn inflated(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
            rotation: self.rotation,
        }
    }

    /// Unrotated corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Maps a surface point into this rectangle's unrotated frame.
    pub fn to_local(&self, p: Point) -> Point {
        if self.rotation.abs() < f64::EPSILON {
            return p;
        }
        let c = self.center();
        let (sin, cos) = (-self.rotation.to_radians()).sin_cos();
        let (dx, dy) = (p.x - c.x, p.y - c.y);
        Point::new(c.x + dx * cos - dy * sin, c.y + dx * sin + dy * cos)
    }

    /// Point-in-rectangle test honouring rotation.
    pub fn contains(&self, p: Point) -> bool {
        let p = self.to_local(p);
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Smallest unrotated rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// Evenly spaced interior divider positions across `length` starting at `start`.
///
/// Returns `count - 1` offsets `start + (length / count) * i`. A `count` of
/// zero is treated as one, so the result is empty rather than a division by zero.
pub fn evenly_spaced(start: f64, length: f64, count: usize) -> Vec<f64> {
    let count = count.max(1);
    let step = length / count as f64;
    (1..count).map(|i| start + step * i as f64).collect()
}
