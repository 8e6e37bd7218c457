use proptest::prelude::*;
use roomkit_core::constants::MIN_SIZE;
use roomkit_core::{AddOn, AddOnKind, DrawnUnit, Edge, Point, Rect, UnitType};
use roomkit_designer::resize::{
    drag_divider, resize_edge, resize_unit, set_divider_counts, with_loft, DividerAxis,
    ResizeOptions,
};

fn edge() -> impl Strategy<Value = Edge> {
    prop_oneof![
        Just(Edge::Left),
        Just(Edge::Right),
        Just(Edge::Top),
        Just(Edge::Bottom),
    ]
}

proptest! {
    #[test]
    fn resize_respects_min_size_and_fixed_edge(
        x in -500.0..500.0f64,
        y in -500.0..500.0f64,
        w in MIN_SIZE..400.0,
        h in MIN_SIZE..400.0,
        px in -1000.0..1000.0f64,
        py in -1000.0..1000.0f64,
        edge in edge(),
        lock_top in any::<bool>(),
    ) {
        let rect = Rect::new(x, y, w, h);
        let resized = resize_edge(&rect, edge, Point::new(px, py), ResizeOptions { lock_top });

        prop_assert!(resized.width >= MIN_SIZE);
        prop_assert!(resized.height >= MIN_SIZE);
        let fixed = edge.opposite();
        prop_assert!((resized.edge_coordinate(fixed) - rect.edge_coordinate(fixed)).abs() < 1e-9);
    }
}

#[test]
fn test_sections_rederived_after_resize() {
    let unit = DrawnUnit::new(
        UnitType::Wardrobe,
        Rect::new(100.0, 100.0, 200.0, 300.0),
        (5.0, 5.0),
    );
    let unit = set_divider_counts(&unit, 3, 4);
    let resized = resize_unit(
        &unit,
        Edge::Bottom,
        Point::new(0.0, 500.0),
        ResizeOptions::default(),
    );

    assert_eq!(resized.rect.height, 400.0);
    assert_eq!(resized.horizontal_divider_ys, vec![200.0, 300.0, 400.0]);
    assert_eq!(resized.shutter_count(), 3);
    assert_eq!(resized.height_mm, unit.height_mm);
}

#[test]
fn test_left_resize_moves_loft_and_clamps_add_ons() {
    let mut unit = DrawnUnit::new(
        UnitType::Wardrobe,
        Rect::new(100.0, 100.0, 200.0, 200.0),
        (5.0, 5.0),
    );
    unit.add_ons
        .push(AddOn::new(AddOnKind::Drawer, 150.0, 20.0, 40.0, 30.0));
    let unit = with_loft(&unit, 50.0);

    let resized = resize_unit(
        &unit,
        Edge::Left,
        Point::new(220.0, 150.0),
        ResizeOptions::default(),
    );

    assert_eq!(resized.rect, Rect::new(220.0, 100.0, 80.0, 200.0));
    assert_eq!(resized.loft_rect, Some(Rect::new(220.0, 50.0, 80.0, 50.0)));
    let add_on = &resized.add_ons[0];
    assert!(add_on.offset_x + add_on.width <= resized.rect.width + 1e-9);
}

#[test]
fn test_divider_drag_keeps_order() {
    let unit = DrawnUnit::new(
        UnitType::Bookshelf,
        Rect::new(0.0, 0.0, 300.0, 300.0),
        (1.0, 1.0),
    );
    let unit = set_divider_counts(&unit, 1, 3);
    assert_eq!(unit.horizontal_divider_ys, vec![100.0, 200.0]);

    let dragged = drag_divider(&unit, DividerAxis::Section, 1, 20.0);
    let ys = &dragged.horizontal_divider_ys;
    assert!(ys[0] < ys[1]);
    assert!(ys[1] > 100.0);

    // out-of-range divider is a no-op
    assert_eq!(drag_divider(&unit, DividerAxis::Section, 5, 20.0), unit);
}

#[test]
fn test_zero_counts_treated_as_one() {
    let unit = DrawnUnit::new(
        UnitType::Wardrobe,
        Rect::new(0.0, 0.0, 100.0, 100.0),
        (1.0, 1.0),
    );
    let unit = set_divider_counts(&unit, 0, 0);
    assert!(unit.shutter_divider_xs.is_empty());
    assert!(unit.horizontal_divider_ys.is_empty());
    assert_eq!(unit.shutter_count(), 1);
}
