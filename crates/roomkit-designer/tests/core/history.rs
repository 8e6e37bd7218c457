use roomkit_core::{DrawnUnit, Rect, UnitType};
use roomkit_designer::{CanvasDocument, UndoRedoManager};

fn doc(units: usize) -> CanvasDocument {
    let mut doc = CanvasDocument::new();
    for i in 0..units {
        doc.units.push(DrawnUnit::new(
            UnitType::Dresser,
            Rect::new(i as f64 * 30.0, 0.0, 25.0, 25.0),
            (10.0, 10.0),
        ));
    }
    doc
}

#[test]
fn test_fifty_one_pushes_retain_fifty() {
    let mut history = UndoRedoManager::new(50);
    for i in 1..=51 {
        history.record(doc(i), format!("step {i}"));
    }
    assert_eq!(history.len(), 50);
    assert_eq!(history.undo_depth(), 49);

    let mut last = None;
    while let Some(entry) = history.undo() {
        last = Some(entry.snapshot.units.len());
    }
    // step 1 was evicted; the oldest kept snapshot is step 2
    assert_eq!(last, Some(2));
}

#[test]
fn test_undo_redo_round_trip() {
    let mut history = UndoRedoManager::default();
    history.reset(doc(0));
    history.record(doc(1), "Add Dresser");
    history.record(doc(2), "Add Dresser");

    assert_eq!(history.undo().map(|e| e.snapshot.units.len()), Some(1));
    assert_eq!(history.undo().map(|e| e.snapshot.units.len()), Some(0));
    assert!(!history.can_undo());
    assert_eq!(history.redo_depth(), 2);
    assert_eq!(history.redo_description(), Some("Add Dresser"));

    assert_eq!(history.redo().map(|e| e.snapshot.units.len()), Some(1));
    assert_eq!(history.redo().map(|e| e.snapshot.units.len()), Some(2));
    assert!(history.redo().is_none());
}

#[test]
fn test_limit_is_at_least_one() {
    let mut history = UndoRedoManager::new(0);
    history.record(doc(1), "a");
    history.record(doc(2), "b");
    assert_eq!(history.limit(), 1);
    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());
}
