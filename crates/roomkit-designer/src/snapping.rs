//! Grid, object and orthogonal snapping for pointer positions.
//!
//! Each axis is snapped independently. Object snap pulls a coordinate onto
//! a nearby edge, corner or center of another entity; when it finds nothing
//! within the threshold, the grid takes over.

use roomkit_core::{Point, Rect};
use roomkit_settings::SnappingSettings;

/// Rounds `value_px` to the nearest multiple of a millimetre grid step.
pub fn snap_to_grid(value_px: f64, step_mm: f64, mm_per_px: f64) -> f64 {
    if !(step_mm > 0.0 && mm_per_px > 0.0) {
        return value_px;
    }
    let step_px = step_mm / mm_per_px;
    (value_px / step_px).round() * step_px
}

/// Candidate snap lines gathered from other entities.
#[derive(Debug, Clone, Default)]
pub struct SnapTargets {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SnapTargets {
    /// Edges and centers of every box; corners are covered by the edge pairs.
    pub fn from_bounds(bounds: &[Rect]) -> Self {
        let mut targets = Self::default();
        for rect in bounds {
            let center = rect.center();
            targets.xs.extend([rect.x, center.x, rect.right()]);
            targets.ys.extend([rect.y, center.y, rect.bottom()]);
        }
        targets
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty() && self.ys.is_empty()
    }
}

fn nearest_within(value: f64, candidates: &[f64], threshold: f64) -> Option<f64> {
    candidates
        .iter()
        .copied()
        .map(|c| (c, (c - value).abs()))
        .filter(|(_, d)| *d <= threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}

/// Snaps a point per axis: object snap first, then grid, else unchanged.
pub fn snap_point(
    p: Point,
    targets: &SnapTargets,
    settings: &SnappingSettings,
    mm_per_px: (f64, f64),
) -> Point {
    let step_mm = f64::from(settings.grid_step.mm());
    let axis = |value: f64, candidates: &[f64], scale: f64| {
        if settings.object_snap {
            if let Some(hit) = nearest_within(value, candidates, settings.threshold_px) {
                return hit;
            }
        }
        if settings.grid_enabled {
            snap_to_grid(value, step_mm, scale)
        } else {
            value
        }
    };
    Point::new(
        axis(p.x, &targets.xs, mm_per_px.0),
        axis(p.y, &targets.ys, mm_per_px.1),
    )
}

/// Constrains `end` to the horizontal or vertical line through `start`,
/// whichever is closer to the pointer.
pub fn ortho_lock(start: Point, end: Point) -> Point {
    if (end.x - start.x).abs() >= (end.y - start.y).abs() {
        Point::new(end.x, start.y)
    } else {
        Point::new(start.x, end.y)
    }
}
