use roomkit_core::{GridStep, Point, Rect};
use roomkit_designer::snapping::{snap_point, snap_to_grid, SnapTargets};
use roomkit_designer::{DesignerState, PointerEvent};
use roomkit_settings::{Config, SnappingSettings};

#[test]
fn test_every_grid_step() {
    // 5 mm per pixel
    let cases = [
        (GridStep::Mm10, 2.0),
        (GridStep::Mm25, 5.0),
        (GridStep::Mm50, 10.0),
        (GridStep::Mm100, 20.0),
        (GridStep::Mm200, 40.0),
    ];
    for (step, px) in cases {
        let snapped = snap_to_grid(px * 3.4, f64::from(step.mm()), 5.0);
        assert!((snapped - px * 3.0).abs() < 1e-9, "{step}: {snapped}");
    }
}

#[test]
fn test_object_snap_to_center() {
    let settings = SnappingSettings {
        grid_enabled: false,
        ..SnappingSettings::default()
    };
    let targets = SnapTargets::from_bounds(&[Rect::new(0.0, 0.0, 100.0, 60.0)]);
    let p = snap_point(Point::new(47.0, 33.0), &targets, &settings, (5.0, 5.0));
    assert_eq!(p, Point::new(50.0, 30.0));
}

#[test]
fn test_drawn_unit_snaps_to_neighbour() {
    let mut state = DesignerState::new(Config::default());
    state.resize_viewport(800.0, 600.0);

    state.pointer_down(&PointerEvent::surface(100.0, 100.0));
    state.pointer_up(&PointerEvent::surface(300.0, 250.0));

    state.pointer_down(&PointerEvent::surface(307.0, 103.0));
    state.pointer_move(&PointerEvent::surface(400.0, 200.0));
    state.pointer_up(&PointerEvent::surface(502.0, 247.0));

    assert_eq!(state.units().len(), 2);
    assert_eq!(state.units()[1].rect, Rect::new(300.0, 100.0, 200.0, 150.0));
}
