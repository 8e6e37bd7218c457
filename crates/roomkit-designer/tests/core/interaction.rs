use std::collections::BTreeSet;

use roomkit_core::{EntityKind, Rect, SceneTransform, UnitType};
use roomkit_designer::{
    Action, DesignerState, DrawMode, Key, KeyEvent, Modifiers, PointerEvent,
};
use roomkit_settings::Config;

/// 800x600 surface over the default 4 m x 3 m room: 5 mm per pixel.
fn state() -> DesignerState {
    let mut config = Config::default();
    config.snapping.grid_enabled = false;
    config.snapping.object_snap = false;
    let mut state = DesignerState::new(config);
    state.resize_viewport(800.0, 600.0);
    state
}

fn drag(state: &mut DesignerState, from: (f64, f64), to: (f64, f64)) -> Vec<Action> {
    let mut actions = state.pointer_down(&PointerEvent::surface(from.0, from.1));
    actions.extend(state.pointer_move(&PointerEvent::surface(
        (from.0 + to.0) / 2.0,
        (from.1 + to.1) / 2.0,
    )));
    actions.extend(state.pointer_up(&PointerEvent::surface(to.0, to.1)));
    actions
}

fn click(state: &mut DesignerState, x: f64, y: f64, modifiers: Modifiers) {
    let event = PointerEvent::surface(x, y).with_modifiers(modifiers);
    state.pointer_down(&event);
    state.pointer_up(&event);
}

fn commits(actions: &[Action]) -> Vec<&str> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Committed(description) => Some(description.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_draw_commits_unit() {
    let mut state = state();
    let actions = drag(&mut state, (100.0, 100.0), (300.0, 250.0));

    assert_eq!(commits(&actions), vec!["Add Wardrobe"]);
    assert!(actions.contains(&Action::CapturePointer));
    assert!(actions.contains(&Action::ReleasePointer));
    let unit = &state.units()[0];
    assert_eq!(unit.rect, Rect::new(100.0, 100.0, 200.0, 150.0));
    assert_eq!(unit.width_mm, 1000.0);
    assert_eq!(unit.height_mm, 750.0);
    assert_eq!(state.interaction().active(), Some(0));
    assert_eq!(state.history().undo_depth(), 1);
    assert!(!state.is_dragging());
}

#[test]
fn test_small_gesture_is_discarded() {
    let mut state = state();
    let actions = drag(&mut state, (100.0, 100.0), (115.0, 300.0));
    assert!(commits(&actions).is_empty());
    assert!(state.units().is_empty());
    assert!(!state.history().can_undo());
}

#[test]
fn test_unit_body_drag_moves_everything_once() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));

    let actions = drag(&mut state, (150.0, 175.0), (170.0, 195.0));
    assert_eq!(commits(&actions), vec!["Move unit"]);

    let unit = &state.units()[0];
    assert!((unit.rect.x - 120.0).abs() < 1e-6);
    assert!((unit.rect.y - 120.0).abs() < 1e-6);
    assert!((unit.shutter_divider_xs[0] - 220.0).abs() < 1e-6);
    assert_eq!(state.history().undo_depth(), 2);
}

#[test]
fn test_edge_drag_resizes_active_unit() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));

    let actions = drag(&mut state, (301.0, 175.0), (400.0, 175.0));
    assert_eq!(commits(&actions), vec!["Resize unit"]);
    let unit = &state.units()[0];
    assert_eq!(unit.rect, Rect::new(100.0, 100.0, 300.0, 150.0));
    assert_eq!(unit.shutter_divider_xs, vec![250.0]);
    // physical size only changes explicitly
    assert_eq!(unit.width_mm, 1000.0);
}

#[test]
fn test_fit_mode_keeps_top_fixed() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));

    let down = PointerEvent::surface(150.0, 250.0).with_locked_top();
    state.pointer_down(&down);
    state.pointer_move(&PointerEvent::surface(150.0, 320.0).with_locked_top());
    state.pointer_up(&PointerEvent::surface(150.0, 320.0).with_locked_top());

    let unit = &state.units()[0];
    assert_eq!(unit.rect.y, 100.0);
    assert_eq!(unit.rect.height, 220.0);
}

#[test]
fn test_divider_drag() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));

    let actions = drag(&mut state, (200.0, 175.0), (240.0, 175.0));
    assert_eq!(commits(&actions), vec!["Move divider"]);
    assert_eq!(state.units()[0].shutter_divider_xs, vec![240.0]);
}

#[test]
fn test_scene_drag_converts_metres_to_pixels() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));

    let transform = state.transform();
    let start = transform.surface_to_scene(roomkit_core::Point::new(150.0, 175.0));
    let mut end = start;
    end.x += 0.1;

    state.pointer_down(&PointerEvent::scene(start));
    state.pointer_move(&PointerEvent::scene(end));
    let actions = state.pointer_up(&PointerEvent::scene(end));

    assert_eq!(commits(&actions), vec!["Move unit"]);
    // 100 mm at 5 mm/px
    assert!((state.units()[0].rect.x - 120.0).abs() < 1e-6);
}

#[test]
fn test_pointer_leave_ends_move() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));

    state.pointer_down(&PointerEvent::surface(150.0, 175.0));
    state.pointer_move(&PointerEvent::surface(160.0, 175.0));
    assert!(state.is_dragging());
    let actions = state.pointer_leave();

    assert!(!state.is_dragging());
    assert!(actions.contains(&Action::ReleasePointer));
    assert_eq!(commits(&actions), vec!["Move unit"]);
}

#[test]
fn test_blur_discards_draft() {
    let mut state = state();
    state.pointer_down(&PointerEvent::surface(100.0, 100.0));
    state.pointer_move(&PointerEvent::surface(300.0, 300.0));
    assert!(state.draft().is_some());

    let actions = state.blur();
    assert!(actions.contains(&Action::ReleasePointer));
    assert!(state.draft().is_none());
    assert!(state.units().is_empty());
    assert!(!state.interaction().is_focused());
}

#[test]
fn test_select_toggle_extend_and_clear() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));
    drag(&mut state, (400.0, 100.0), (600.0, 250.0));
    state.set_mode(DrawMode::Select);

    click(&mut state, 150.0, 175.0, Modifiers::NONE);
    assert_eq!(state.selection().indices(), &BTreeSet::from([0]));
    click(&mut state, 150.0, 175.0, Modifiers::NONE);
    assert!(state.selection().is_empty());

    click(&mut state, 150.0, 175.0, Modifiers::NONE);
    click(&mut state, 450.0, 175.0, Modifiers::SHIFT);
    assert_eq!(state.selection().indices(), &BTreeSet::from([0, 1]));

    click(&mut state, 700.0, 500.0, Modifiers::NONE);
    assert!(state.selection().is_empty());
    assert_eq!(state.selection().kind(), None);
}

#[test]
fn test_selecting_across_kinds_replaces() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));
    state.set_mode(DrawMode::Measure);
    drag(&mut state, (100.0, 400.0), (500.0, 400.0));
    state.set_mode(DrawMode::Select);

    click(&mut state, 150.0, 175.0, Modifiers::NONE);
    assert_eq!(state.selection().kind(), Some(EntityKind::Unit));
    click(&mut state, 300.0, 401.0, Modifiers::SHIFT);
    assert_eq!(state.selection().kind(), Some(EntityKind::Measurement));
    assert_eq!(state.selection().len(), 1);
}

#[test]
fn test_grouped_units_select_and_move_together() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));
    drag(&mut state, (400.0, 100.0), (600.0, 250.0));
    state.set_mode(DrawMode::Select);
    click(&mut state, 150.0, 175.0, Modifiers::NONE);
    click(&mut state, 450.0, 175.0, Modifiers::SHIFT);
    assert_eq!(commits(&state.group_selection()), vec!["Group 2 units"]);

    click(&mut state, 700.0, 500.0, Modifiers::NONE);
    click(&mut state, 450.0, 175.0, Modifiers::NONE);
    assert_eq!(state.selection().indices(), &BTreeSet::from([0, 1]));

    state.set_mode(DrawMode::Move);
    drag(&mut state, (450.0, 175.0), (450.0, 195.0));
    assert!((state.units()[0].rect.y - 120.0).abs() < 1e-6);
    assert!((state.units()[1].rect.y - 120.0).abs() < 1e-6);
}

#[test]
fn test_locked_unit_does_not_move() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));
    state.set_locked(true);

    state.set_mode(DrawMode::Move);
    let actions = drag(&mut state, (150.0, 175.0), (250.0, 275.0));
    assert!(commits(&actions).is_empty());
    assert_eq!(state.units()[0].rect.x, 100.0);

    state.set_mode(DrawMode::None);
    let actions = drag(&mut state, (300.0, 175.0), (400.0, 175.0));
    assert!(commits(&actions).is_empty());
    assert_eq!(state.units()[0].rect.width, 200.0);
}

#[test]
fn test_pan_mode_only_pans() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));
    state.set_mode(DrawMode::Pan);

    let actions = drag(&mut state, (150.0, 175.0), (250.0, 175.0));
    let panned: f64 = actions
        .iter()
        .filter_map(|a| match a {
            Action::PanBy { dx, .. } => Some(*dx),
            _ => None,
        })
        .sum();
    assert!((panned - 100.0).abs() < 1e-9);
    assert!((state.viewport().pan_x() - 100.0).abs() < 1e-9);
    assert_eq!(state.viewport().pan_y(), 0.0);
    assert!(commits(&actions).is_empty());
    assert_eq!(state.units()[0].rect.x, 100.0);
}

#[test]
fn test_escape_aborts_draw_and_returns_to_none() {
    let mut state = state();
    state.set_mode(DrawMode::Wall);
    state.pointer_down(&PointerEvent::surface(100.0, 100.0));
    state.pointer_move(&PointerEvent::surface(300.0, 110.0));

    let actions = state.key_down(&KeyEvent::new(Key::Escape));
    assert!(actions.contains(&Action::ReleasePointer));
    assert_eq!(state.mode(), DrawMode::None);
    assert!(!state.is_dragging());
    assert!(state.floor_plan().is_none());
}

#[test]
fn test_wall_is_ortho_locked() {
    let mut state = state();
    state.set_mode(DrawMode::Wall);
    drag(&mut state, (100.0, 100.0), (300.0, 130.0));

    let wall = &state.floor_plan().unwrap().walls[0];
    assert_eq!(wall.start.y, wall.end.y);
    assert_eq!(wall.end.x, 300.0);
}

#[test]
fn test_wall_follows_pointer_without_ortho_lock() {
    let mut config = Config::default();
    config.snapping.grid_enabled = false;
    config.snapping.object_snap = false;
    config.snapping.ortho_lock = false;
    config.editing.default_scale_mm_per_px = 5.0;
    let mut state = DesignerState::new(config);
    state.set_mode(DrawMode::Wall);
    let actions = drag(&mut state, (100.0, 100.0), (300.0, 250.0));

    assert_eq!(commits(&actions), vec!["Add wall"]);
    let plan = state.floor_plan().unwrap();
    assert_eq!(plan.walls[0].length_mm(plan.scale_mm_per_px), 1250.0);
}

/// Grid and object snap on: a 50 mm grid is 10 px at 5 mm/px.
fn snapping_state() -> DesignerState {
    let mut config = Config::default();
    config.snapping.grid_step = roomkit_core::GridStep::Mm50;
    let mut state = DesignerState::new(config);
    state.resize_viewport(800.0, 600.0);
    state
}

#[test]
fn test_move_snaps_to_grid() {
    let mut state = snapping_state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));
    assert_eq!(state.units()[0].rect, Rect::new(100.0, 100.0, 200.0, 150.0));
    state.set_mode(DrawMode::Move);

    state.pointer_down(&PointerEvent::surface(150.0, 175.0));
    state.pointer_move(&PointerEvent::surface(153.0, 178.0));
    assert_eq!(state.units()[0].rect.x, 100.0);
    assert_eq!(state.units()[0].rect.y, 100.0);

    state.pointer_move(&PointerEvent::surface(156.0, 181.0));
    let actions = state.pointer_up(&PointerEvent::surface(156.0, 181.0));
    assert_eq!(commits(&actions), vec!["Move unit"]);
    let unit = &state.units()[0];
    assert_eq!(unit.rect.x, 110.0);
    assert_eq!(unit.rect.y, 110.0);
    assert_eq!(unit.rect.width, 200.0);
}

#[test]
fn test_move_snaps_to_neighbour_edge() {
    let mut config = Config::default();
    config.snapping.grid_enabled = false;
    let mut state = DesignerState::new(config);
    state.resize_viewport(800.0, 600.0);
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));
    drag(&mut state, (400.0, 100.0), (500.0, 200.0));
    assert_eq!(state.units()[1].rect, Rect::new(400.0, 100.0, 100.0, 100.0));
    state.set_mode(DrawMode::Move);

    state.pointer_down(&PointerEvent::surface(450.0, 150.0));
    state.pointer_move(&PointerEvent::surface(401.5, 150.0));
    assert!((state.units()[1].rect.x - 351.5).abs() < 1e-6);
    state.pointer_up(&PointerEvent::surface(353.0, 150.0));

    // 303 is within the object-snap radius of the first unit's right edge
    let moved = &state.units()[1];
    assert!((moved.rect.x - 300.0).abs() < 1e-9);
    assert_eq!(moved.rect.y, 100.0);
    assert_eq!(state.units()[0].rect.x, 100.0);
}

#[test]
fn test_measure_reports_millimetres() {
    let mut config = Config::default();
    config.snapping.grid_enabled = false;
    config.snapping.object_snap = false;
    config.editing.default_scale_mm_per_px = 5.0;
    let mut state = DesignerState::new(config);
    state.set_mode(DrawMode::Measure);
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));

    let plan = state.floor_plan().unwrap();
    assert_eq!(plan.measurements[0].length_mm(plan.scale_mm_per_px), 1250.0);
}

#[test]
fn test_keyboard_nudge_delete_and_undo() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));

    state.key_down(&KeyEvent::new(Key::ArrowRight));
    state.key_down(&KeyEvent::new(Key::ArrowDown).with_modifiers(Modifiers::SHIFT));
    assert_eq!(state.units()[0].rect.x, 101.0);
    assert_eq!(state.units()[0].rect.y, 110.0);

    let actions = state.key_down(&KeyEvent::new(Key::Delete));
    assert_eq!(commits(&actions), vec!["Delete unit"]);
    assert!(state.units().is_empty());

    let undo = KeyEvent::new(Key::Char('z')).with_modifiers(Modifiers::CTRL);
    state.key_down(&undo);
    assert_eq!(state.units().len(), 1);
    assert_eq!(state.units()[0].rect.y, 110.0);
    // undo clears transient state
    assert_eq!(state.interaction().active(), None);
}

#[test]
fn test_keys_ignored_without_focus() {
    let mut state = state();
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));
    state.blur();
    assert!(state
        .key_down(&KeyEvent::new(Key::Delete))
        .is_empty());
    assert_eq!(state.units().len(), 1);
}

#[test]
fn test_unit_type_for_new_units() {
    let mut state = state();
    state.set_unit_type(UnitType::TvUnit);
    drag(&mut state, (100.0, 100.0), (300.0, 250.0));
    assert_eq!(state.units()[0].unit_type, UnitType::TvUnit);
    assert_eq!(state.units()[0].depth_mm, UnitType::TvUnit.default_depth_mm());
}
