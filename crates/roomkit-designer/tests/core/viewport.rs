use roomkit_core::{FloorPlan, Point, SceneTransform};
use roomkit_designer::Viewport;
use roomkit_settings::RoomSettings;

#[test]
fn test_default_room_maps_surface_onto_room() {
    let vp = Viewport::new(800.0, 600.0);
    let t = vp.transform_for(None);
    let corner = t.surface_to_scene(Point::new(0.0, 0.0));
    assert!((corner.x + 2.0).abs() < 1e-9);
    assert!((corner.z + 1.5).abs() < 1e-9);
    let center = t.surface_to_scene(Point::new(400.0, 300.0));
    assert!(center.x.abs() < 1e-9 && center.z.abs() < 1e-9);
}

#[test]
fn test_custom_room() {
    let vp = Viewport::new(1000.0, 500.0).with_room(RoomSettings {
        width_mm: 5000.0,
        depth_mm: 5000.0,
        height_mm: 3000.0,
    });
    assert_eq!(vp.transform_for(None).mm_per_px(), (5.0, 10.0));
}

#[test]
fn test_floor_plan_transform_wins() {
    let vp = Viewport::new(1000.0, 500.0);
    let mut plan = FloorPlan::new(5.0);
    plan.origin = Point::new(100.0, 100.0);
    let t = vp.transform_for(Some(&plan));
    let p = t.surface_to_scene(Point::new(300.0, 250.0));
    assert!((p.x - 1.0).abs() < 1e-9);
    assert!((p.z - 0.75).abs() < 1e-9);
}

#[test]
fn test_zoom_limits() {
    let mut vp = Viewport::default();
    vp.set_zoom(100.0);
    assert_eq!(vp.zoom(), 1.0);
    vp.set_zoom(0.01);
    assert_eq!(vp.zoom(), 1.0);
    vp.set_zoom(2.5);
    assert_eq!(vp.zoom(), 2.5);
}
