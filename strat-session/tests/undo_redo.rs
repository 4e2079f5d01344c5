use strat_core::{CanvasItem, CanvasState, MapId, Marker, MarkerKind, Point, Stroke};
use strat_session::HistoryStore;

fn stroke_item() -> CanvasItem {
    CanvasItem::Stroke(Stroke::pencil(Point::new(50.0, 60.0)))
}

fn marker_item(kind: MarkerKind) -> CanvasItem {
    CanvasItem::Marker(Marker::new(kind, Point::new(400.0, 400.0)))
}

#[test]
fn full_undo_then_full_redo_restores_every_snapshot() {
    let mut store = HistoryStore::new();
    let map = MapId::new("dust2");

    let mut snapshots = Vec::new();
    let mut state = CanvasState::new();
    for i in 0..5 {
        let kind = MarkerKind::ALL[i % MarkerKind::ALL.len()];
        state = state.with_item(marker_item(kind));
        snapshots.push(state.clone());
        store.commit(&map, state.clone());
    }

    // n undos return the board to empty.
    for _ in 0..5 {
        assert!(store.undo(&map));
    }
    assert!(store.current_items(&map).is_empty());
    assert!(!store.undo(&map));

    // n redos restore the final snapshot, item for item.
    for _ in 0..5 {
        assert!(store.redo(&map));
    }
    assert_eq!(store.current_state(&map), snapshots[4]);
    assert!(!store.redo(&map));
}

#[test]
fn commit_with_pending_redo_empties_the_future() {
    let mut store = HistoryStore::new();
    let map = MapId::new("inferno");

    store.commit(&map, CanvasState::new().with_item(stroke_item()));
    store.commit(
        &map,
        store.current_state(&map).with_item(marker_item(MarkerKind::Smoke)),
    );
    store.undo(&map);
    assert!(store.can_redo(&map));

    store.commit(
        &map,
        store.current_state(&map).with_item(marker_item(MarkerKind::He)),
    );
    assert!(!store.can_redo(&map));
    assert_eq!(store.redo_depth(&map), 0);
}

#[test]
fn current_state_with_no_commits_is_empty() {
    let store = HistoryStore::new();
    let map = MapId::new("nuke");

    assert!(store.current_items(&map).is_empty());
    assert_eq!(store.current_state(&map), CanvasState::new());
}

#[test]
fn operations_on_one_map_never_touch_another() {
    let mut store = HistoryStore::new();
    let dust2 = MapId::new("dust2");
    let mirage = MapId::new("mirage");

    let dust2_state = CanvasState::new().with_item(stroke_item());
    store.commit(&dust2, dust2_state.clone());

    store.commit(&mirage, CanvasState::new().with_item(marker_item(MarkerKind::Flash)));
    store.commit(
        &mirage,
        store
            .current_state(&mirage)
            .with_item(marker_item(MarkerKind::Molotov)),
    );
    store.undo(&mirage);
    store.redo(&mirage);
    store.undo(&mirage);
    store.clear(&mirage);

    assert_eq!(store.current_state(&dust2), dust2_state);
    assert_eq!(store.undo_depth(&dust2), 1);
    assert_eq!(store.redo_depth(&dust2), 0);
}

#[test]
fn marker_relocation_preserves_identity_and_order() {
    let mut store = HistoryStore::new();
    let map = MapId::new("dust2");

    let stroke = stroke_item();
    let marker = Marker::new(MarkerKind::Smoke, Point::new(120.0, 340.0));
    let tail = marker_item(MarkerKind::He);

    let state = CanvasState::new()
        .with_item(stroke.clone())
        .with_item(CanvasItem::Marker(marker))
        .with_item(tail.clone());
    store.commit(&map, state.clone());

    let moved = state
        .with_marker_moved(marker.id, Point::new(700.0, 80.0))
        .unwrap();
    store.commit(&map, moved);

    let items = store.current_items(&map);
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], stroke);
    assert_eq!(items[2], tail);

    let CanvasItem::Marker(relocated) = &items[1] else {
        panic!("expected a marker");
    };
    assert_eq!(relocated.id, marker.id);
    assert_eq!(relocated.kind, marker.kind);
    assert_eq!(relocated.pos, Point::new(700.0, 80.0));
}

#[test]
fn stroke_then_marker_undo_redo_walkthrough() {
    let mut store = HistoryStore::new();
    let map = MapId::new("dust2");

    let s1 = stroke_item();
    let k1 = marker_item(MarkerKind::Smoke);

    let after_s1 = CanvasState::new().with_item(s1.clone());
    store.commit(&map, after_s1.clone());
    let after_k1 = after_s1.with_item(k1.clone());
    store.commit(&map, after_k1.clone());

    store.undo(&map);
    assert_eq!(store.current_items(&map), &[s1.clone()][..]);

    store.undo(&map);
    assert!(store.current_items(&map).is_empty());

    store.redo(&map);
    assert_eq!(store.current_items(&map), &[s1][..]);

    store.redo(&map);
    assert_eq!(store.current_state(&map), after_k1);
}

#[test]
fn undo_on_a_map_with_zero_commits_is_a_no_op() {
    let mut store = HistoryStore::new();
    let map = MapId::new("mirage");

    assert!(!store.undo(&map));
    assert!(store.current_items(&map).is_empty());
    assert_eq!(store.undo_depth(&map), 0);
    assert_eq!(store.redo_depth(&map), 0);
}

#[test]
fn clear_then_undo_restores_the_previous_board() {
    let mut store = HistoryStore::new();
    let map = MapId::new("dust2");

    let full = CanvasState::new()
        .with_item(stroke_item())
        .with_item(marker_item(MarkerKind::Molotov))
        .with_item(marker_item(MarkerKind::Flash));
    store.commit(&map, full.clone());

    store.clear(&map);
    assert!(store.current_items(&map).is_empty());

    assert!(store.undo(&map));
    assert_eq!(store.current_state(&map), full);
}
