use roomkit_core::{AddOn, AddOnKind, CanvasKey, Rect, UnitType};
use roomkit_designer::{Action, DesignerAction, DesignerState, PointerEvent};
use roomkit_settings::Config;

fn state() -> DesignerState {
    let mut config = Config::default();
    config.snapping.grid_enabled = false;
    config.snapping.object_snap = false;
    let mut state = DesignerState::new(config);
    state.resize_viewport(800.0, 600.0);
    state
}

fn draw(state: &mut DesignerState, x: f64, y: f64, w: f64, h: f64) {
    state.pointer_down(&PointerEvent::surface(x, y));
    state.pointer_move(&PointerEvent::surface(x + w, y + h));
    state.pointer_up(&PointerEvent::surface(x + w, y + h));
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_initial_state() {
    let state = DesignerState::default();
    assert_eq!(state.active_key(), &CanvasKey::default());
    assert_eq!(state.floors().len(), 1);
    assert_eq!(state.rooms().len(), 1);
    assert!(state.units().is_empty());
    assert!(!state.history().can_undo());
    assert!(!state.is_modified);
    assert_eq!(state.display_name(), "Untitled");
}

#[test]
fn test_switch_canvas_keeps_documents_and_resets_history() {
    let mut state = state();
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    let first = state.active_key().clone();

    let second = state.add_canvas();
    assert_eq!(second.canvas_index, 1);
    assert_eq!(state.active_key(), &first);

    state.switch_canvas(second.clone());
    assert!(state.units().is_empty());
    assert!(!state.history().can_undo());
    draw(&mut state, 50.0, 50.0, 100.0, 100.0);
    draw(&mut state, 400.0, 50.0, 100.0, 100.0);

    state.switch_canvas(first.clone());
    assert_eq!(state.units().len(), 1);
    assert!(!state.history().can_undo());
    assert_eq!(state.interaction().active(), None);
    assert_eq!(state.document_for(&second).map(|d| d.units.len()), Some(2));
}

#[test]
fn test_canvas_names_are_derived_and_overridable() {
    let mut state = state();
    let first = state.active_key().clone();
    assert_eq!(state.canvas_name(&first), "Canvas 1");

    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    assert_eq!(state.canvas_name(&first), "Wardrobe 1");

    let second = state.add_canvas();
    state.switch_canvas(second.clone());
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    assert_eq!(state.canvas_name(&second), "Wardrobe 2");

    let third = state.add_canvas();
    state.switch_canvas(third.clone());
    state.set_unit_type(UnitType::Kitchen);
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    assert_eq!(state.canvas_name(&third), "Kitchen 1");

    assert!(state.rename_canvas(&second, Some("  Master bedroom ")));
    assert_eq!(state.canvas_name(&second), "Master bedroom");
    assert!(state.rename_canvas(&second, Some("   ")));
    assert_eq!(state.canvas_name(&second), "Wardrobe 2");
    assert!(!state.rename_canvas(&first.with_index(9), Some("Nowhere")));

    let names: Vec<String> = state
        .list_canvases("ground", "room-1")
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Wardrobe 1", "Wardrobe 2", "Kitchen 1"]);
}

#[test]
fn test_delete_restore_then_history_undo() {
    let mut state = state();
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    let first = state.active_key().clone();

    let second = state.add_canvas();
    state.switch_canvas(second.clone());
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    state.rename_canvas(&second, Some("Guest"));
    state.switch_canvas(first.clone());
    draw(&mut state, 400.0, 100.0, 100.0, 100.0);
    assert_eq!(state.units().len(), 2);

    state.delete_canvas(&second);
    assert!(state.document_for(&second).is_none());
    let deleted = state.deleted_canvas().unwrap();
    assert_eq!(deleted.display_name, "Guest");

    // First undo restores the canvas without switching to it
    state.undo();
    assert!(state.deleted_canvas().is_none());
    assert_eq!(state.active_key(), &first);
    assert_eq!(state.document_for(&second).map(|d| d.units.len()), Some(1));
    assert_eq!(state.canvas_name(&second), "Guest");
    assert_eq!(state.units().len(), 2);

    // The next undo goes to the active canvas history
    state.undo();
    assert_eq!(state.units().len(), 1);
}

#[test]
fn test_deleting_active_canvas_moves_within_room() {
    let mut state = state();
    let first = state.active_key().clone();
    let second = state.add_canvas();
    state.switch_canvas(second.clone());
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);

    let actions = state.delete_canvas(&second);
    assert!(actions.contains(&Action::RenderNeeded));
    assert_eq!(state.active_key(), &first);
    assert!(state.units().is_empty());
    assert_eq!(state.canvas_keys(), vec![first]);
}

#[test]
fn test_deleting_only_canvas_leaves_fresh_index_zero() {
    let mut state = state();
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    let key = state.active_key().clone();

    state.delete_canvas(&key);
    assert_eq!(state.active_key().canvas_index, 0);
    assert!(state.units().is_empty());

    state.undo();
    assert_eq!(state.units().len(), 1);
}

#[test]
fn test_restored_canvas_keeps_its_name_at_a_new_index() {
    let mut state = state();
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    let key = state.active_key().clone();
    assert_eq!(state.canvas_name(&key), "Wardrobe 1");

    state.delete_canvas(&key);
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    assert_eq!(state.canvas_name(&key), "Wardrobe 1");

    state.undo();
    let restored = key.with_index(1);
    assert_eq!(state.active_key(), &key);
    assert_eq!(state.document_for(&restored).map(|d| d.units.len()), Some(1));
    assert_eq!(state.canvas_name(&restored), "Wardrobe 1");
    assert_eq!(state.canvas_name(&key), "Wardrobe 1");
}

#[test]
fn test_restore_drops_name_left_on_its_key() {
    let mut state = state();
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    let key = state.active_key().clone();

    state.delete_canvas(&key);
    assert!(state.rename_canvas(&key, Some("Scratch")));
    state.undo();

    assert_eq!(state.units().len(), 1);
    assert_eq!(state.canvas_name(&key), "Wardrobe 1");
}

#[test]
fn test_second_delete_replaces_restorable_canvas() {
    let mut state = state();
    let second = state.add_canvas();
    let third = state.add_canvas();
    assert_eq!(third.canvas_index, 2);

    state.delete_canvas(&second);
    state.delete_canvas(&third);
    assert_eq!(state.deleted_canvas().map(|d| d.key.clone()), Some(third.clone()));

    state.undo();
    assert!(state.document_for(&third).is_some());
    assert!(state.document_for(&second).is_none());
}

#[test]
fn test_add_canvas_skips_deleted_slot() {
    let mut state = state();
    let second = state.add_canvas();
    state.delete_canvas(&second);
    let next = state.add_canvas();
    assert_ne!(next, second);
    assert_eq!(next.canvas_index, 2);
}

#[test]
fn test_floors_and_rooms() {
    let mut state = state();
    let floor = state.add_floor("First Floor");
    assert_eq!(floor, "first-floor");
    assert_eq!(state.add_floor("First Floor"), "first-floor-2");

    let room = state.add_room(&floor, "Master Bedroom").unwrap();
    assert_eq!(room, "master-bedroom");
    assert!(state.add_room("attic", "Store").is_none());
    assert_eq!(state.rooms_on_floor(&floor).len(), 1);

    state.switch_room(&floor, &room);
    assert_eq!(state.active_key(), &CanvasKey::new(floor.clone(), room.clone(), 0));
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);

    // The ground floor canvas is still there, untouched
    let ground = CanvasKey::default();
    assert_eq!(state.document_for(&ground).map(|d| d.units.len()), Some(0));
    assert_eq!(state.list_canvases(&floor, &room).len(), 1);
}

#[test]
fn test_dispatch_and_reduce() {
    let state = state()
        .reduce(DesignerAction::SetUnitType(UnitType::Bookshelf))
        .reduce(DesignerAction::PointerDown(PointerEvent::surface(100.0, 100.0)))
        .reduce(DesignerAction::PointerMove(PointerEvent::surface(300.0, 250.0)))
        .reduce(DesignerAction::PointerUp(PointerEvent::surface(300.0, 250.0)))
        .reduce(DesignerAction::SetSectionCount(3));

    assert_eq!(state.units()[0].unit_type, UnitType::Bookshelf);
    assert_eq!(state.units()[0].section_count(), 3);

    let mut state = state;
    let actions = state.dispatch(DesignerAction::Undo);
    assert!(actions.contains(&Action::RenderNeeded));
    assert_eq!(state.units()[0].section_count(), 1);
    state.dispatch(DesignerAction::Redo);
    assert_eq!(state.units()[0].section_count(), 3);

    assert!(state
        .dispatch(DesignerAction::RenameCanvas {
            key: CanvasKey::new("nowhere", "none", 3),
            name: Some(String::from("x")),
        })
        .is_empty());
}

#[test]
fn test_unit_edits_on_active_unit() {
    let mut state = state();
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);

    state.add_loft(None);
    let loft = state.active_unit().unwrap().loft_rect.unwrap();
    assert_eq!(loft, Rect::new(100.0, 40.0, 200.0, 60.0));
    state.remove_loft();
    assert!(state.active_unit().unwrap().loft_rect.is_none());

    state.set_shutter_count(4);
    assert_eq!(
        state.active_unit().unwrap().shutter_divider_xs,
        vec![150.0, 200.0, 250.0]
    );

    state.add_add_on(AddOn::new(AddOnKind::Drawer, 180.0, 0.0, 60.0, 30.0));
    let add_on = state.active_unit().unwrap().add_ons[0].clone();
    assert!(add_on.offset_x + add_on.width <= 200.0);
    state.remove_add_on(add_on.id);
    assert!(state.active_unit().unwrap().add_ons.is_empty());

    state.set_unit_dimensions(Some(1200.0), Some(-5.0), None);
    let unit = state.active_unit().unwrap();
    assert_eq!(unit.width_mm, 1200.0);
    assert_eq!(unit.height_mm, 750.0);
    assert_eq!(unit.rect.width, 200.0);
    assert_eq!(state.history().undo_description(), Some("Set dimensions"));
}

#[test]
fn test_locked_unit_ignores_edits() {
    let mut state = state();
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    state.set_locked(true);
    let depth = state.history().undo_depth();

    assert!(state.set_shutter_count(3).is_empty());
    assert!(state.add_loft(Some(80.0)).is_empty());
    assert!(state.delete_selected().is_empty());
    assert_eq!(state.history().undo_depth(), depth);

    state.set_locked(false);
    assert!(!state.set_shutter_count(3).is_empty());
}

#[test]
fn test_unit_scene_box() {
    let mut state = state();
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);

    let scene = state.unit_scene_box(0).unwrap();
    assert!(approx(scene.center.x, -1.0));
    assert!(approx(scene.center.y, 0.375));
    assert!(approx(scene.center.z, -0.625));
    assert!(approx(scene.size.x, 1.0));
    assert!(approx(scene.size.y, 0.75));
    assert!(approx(scene.size.z, 0.6));

    assert!(state.unit_scene_box(1).is_none());
    assert_eq!(state.scene_boxes().len(), 1);
}

#[test]
fn test_new_design_keeps_unit_type() {
    let mut state = state();
    state.set_unit_type(UnitType::Vanity);
    draw(&mut state, 100.0, 100.0, 200.0, 150.0);
    assert!(state.is_modified);
    assert_eq!(state.display_name(), "Untitled *");

    state.new_design();
    assert!(state.units().is_empty());
    assert!(!state.is_modified);
    assert_eq!(state.interaction().unit_type(), UnitType::Vanity);
    assert_eq!(state.viewport().surface_width(), 800.0);
}
