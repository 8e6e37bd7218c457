//! Edge-resize and divider-drag engine.
//!
//! All functions are pure: they take a box or unit and return a new one.
//! Sizes never drop below [`MIN_SIZE`]; when a drag would shrink a box past
//! the minimum, the moving edge stops so the opposite edge stays put.

use roomkit_core::constants::{MIN_DIVIDER_GAP_PX, MIN_SIZE};
use roomkit_core::{evenly_spaced, DrawnUnit, Edge, Point, Rect};

/// Per-gesture resize options supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeOptions {
    /// Fit mode: the top edge is pinned and cannot be dragged.
    pub lock_top: bool,
}

/// Which divider list a divider belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DividerAxis {
    /// Vertical lines between shutters (`shutter_divider_xs`).
    Shutter,
    /// Horizontal lines between sections (`horizontal_divider_ys`).
    Section,
}

/// Drags `edge` of `rect` to `pointer`, keeping the opposite edge fixed.
pub fn resize_edge(rect: &Rect, edge: Edge, pointer: Point, options: ResizeOptions) -> Rect {
    if options.lock_top && edge == Edge::Top {
        return *rect;
    }

    let fixed = rect.edge_coordinate(edge.opposite());
    let mut next = *rect;
    match edge {
        Edge::Left => {
            next.width = (fixed - pointer.x).max(MIN_SIZE);
            next.x = fixed - next.width;
        }
        Edge::Right => {
            next.width = (pointer.x - fixed).max(MIN_SIZE);
        }
        Edge::Top => {
            next.height = (fixed - pointer.y).max(MIN_SIZE);
            next.y = fixed - next.height;
        }
        Edge::Bottom => {
            next.height = (pointer.y - fixed).max(MIN_SIZE);
        }
    }
    next
}

/// Edge of `rect` within `tolerance` pixels of `p`, if any.
///
/// Vertical edges win over horizontal ones at the corners.
pub fn hit_edge(rect: &Rect, p: Point, tolerance: f64) -> Option<Edge> {
    let within_y = p.y >= rect.y - tolerance && p.y <= rect.bottom() + tolerance;
    let within_x = p.x >= rect.x - tolerance && p.x <= rect.right() + tolerance;

    Edge::ALL.into_iter().find(|&edge| {
        let d = if edge.is_vertical() {
            (p.x - rect.edge_coordinate(edge)).abs()
        } else {
            (p.y - rect.edge_coordinate(edge)).abs()
        };
        d <= tolerance && if edge.is_vertical() { within_y } else { within_x }
    })
}

/// Resizes a unit's body and brings everything attached to it along.
///
/// Dividers are re-spaced evenly across the new box keeping their counts,
/// the loft is re-seated flush on top of the body, and add-ons are clamped
/// into the new box. Physical dimensions are left alone.
pub fn resize_unit(
    unit: &DrawnUnit,
    edge: Edge,
    pointer: Point,
    options: ResizeOptions,
) -> DrawnUnit {
    let rect = resize_edge(&unit.rect, edge, pointer, options);
    if rect == unit.rect {
        return unit.clone();
    }

    DrawnUnit {
        rect,
        loft_rect: unit
            .loft_rect
            .map(|loft| Rect::new(rect.x, rect.y - loft.height, rect.width, loft.height)),
        shutter_divider_xs: evenly_spaced(rect.x, rect.width, unit.shutter_count()),
        horizontal_divider_ys: evenly_spaced(rect.y, rect.height, unit.section_count()),
        add_ons: unit
            .add_ons
            .iter()
            .map(|a| a.clamped_to(rect.width, rect.height))
            .collect(),
        ..unit.clone()
    }
}

/// Divider of `unit` within `tolerance` pixels of `p`, if any.
pub fn hit_divider(unit: &DrawnUnit, p: Point, tolerance: f64) -> Option<(DividerAxis, usize)> {
    let rect = &unit.rect;
    if !rect.contains(p) {
        return None;
    }
    unit.shutter_divider_xs
        .iter()
        .position(|x| (p.x - x).abs() <= tolerance)
        .map(|i| (DividerAxis::Shutter, i))
        .or_else(|| {
            unit.horizontal_divider_ys
                .iter()
                .position(|y| (p.y - y).abs() <= tolerance)
                .map(|i| (DividerAxis::Section, i))
        })
}

/// Moves one divider to `position`, clamped strictly between its neighbours
/// (or the box edges) with [`MIN_DIVIDER_GAP_PX`] clearance.
pub fn drag_divider(unit: &DrawnUnit, axis: DividerAxis, index: usize, position: f64) -> DrawnUnit {
    let (dividers, start, end) = match axis {
        DividerAxis::Shutter => (&unit.shutter_divider_xs, unit.rect.x, unit.rect.right()),
        DividerAxis::Section => (&unit.horizontal_divider_ys, unit.rect.y, unit.rect.bottom()),
    };
    if index >= dividers.len() {
        return unit.clone();
    }

    let lower = if index == 0 { start } else { dividers[index - 1] } + MIN_DIVIDER_GAP_PX;
    let upper = dividers.get(index + 1).copied().unwrap_or(end) - MIN_DIVIDER_GAP_PX;
    if lower > upper {
        return unit.clone();
    }

    let mut moved = dividers.clone();
    moved[index] = position.clamp(lower, upper);

    let mut next = unit.clone();
    match axis {
        DividerAxis::Shutter => next.shutter_divider_xs = moved,
        DividerAxis::Section => next.horizontal_divider_ys = moved,
    }
    next
}

/// Re-spaces a unit's dividers for the given shutter and section counts.
/// Counts below one are treated as one.
pub fn set_divider_counts(unit: &DrawnUnit, shutters: usize, sections: usize) -> DrawnUnit {
    unit.with_even_dividers(shutters.max(1), sections.max(1))
}

/// A unit with a loft of `height_px` seated on top of the body.
pub fn with_loft(unit: &DrawnUnit, height_px: f64) -> DrawnUnit {
    let rect = unit.rect;
    let height = height_px.max(MIN_SIZE);
    DrawnUnit {
        loft_rect: Some(Rect::new(rect.x, rect.y - height, rect.width, height)),
        ..unit.clone()
    }
}
