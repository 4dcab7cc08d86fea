use super::*;
use crate::core::test_support::PointMarker;

fn assert_partition(collection: &SelectableCollection<PointMarker>) {
    let order: Vec<MarkerKey> = collection.iter().map(|(key, _)| key).collect();
    assert_eq!(order.len(), collection.len(), "jeder Marker genau einmal");

    let mut seen_selected = false;
    for key in &order {
        let in_selected = collection.is_in_selected_bucket(*key);
        let in_unselected = collection.is_in_unselected_bucket(*key);
        assert!(in_selected ^ in_unselected, "Marker {key:?} in genau einem Bucket");

        let marker = collection.get(*key).expect("Marker vorhanden");
        assert_eq!(marker.is_selected(), in_selected);

        if in_selected {
            seen_selected = true;
        } else {
            assert!(!seen_selected, "unselektierte Marker vor selektierten");
        }
    }
}

fn single_key(handle: &MarkerHandle) -> MarkerKey {
    handle.member_key(0).expect("Single-Handle")
}

#[test]
fn test_insert_places_marker_by_selection_state() {
    let mut collection = SelectableCollection::new();
    let plain = collection.insert(PointMarker::new("a", 0.0, 0.0));

    let mut preselected = PointMarker::new("b", 1.0, 0.0);
    preselected.selected = true;
    let selected = collection.insert(preselected);

    assert!(collection.is_in_unselected_bucket(single_key(&plain)));
    assert!(collection.is_in_selected_bucket(single_key(&selected)));
    assert_eq!(collection.selected_len(), 1);
    assert_partition(&collection);
}

#[test]
fn test_partition_invariant_over_mixed_sequence() {
    let mut collection = SelectableCollection::new();
    let keys: Vec<MarkerKey> = (0..8)
        .map(|i| single_key(&collection.insert(PointMarker::new(&format!("m{i}"), i as f32, 0.0))))
        .collect();

    let steps = [
        (0, true),
        (3, true),
        (5, true),
        (3, false),
        (7, true),
        (0, true),
        (5, false),
        (1, true),
        (7, false),
    ];

    for (index, selected) in steps {
        collection
            .set_selected(keys[index], selected)
            .expect("Schlüssel existiert");
        assert_partition(&collection);
    }

    let selected_ids: Vec<&str> = collection
        .iter()
        .filter(|(_, m)| m.is_selected())
        .map(|(_, m)| m.id().as_str())
        .collect();
    assert_eq!(selected_ids.len(), 2);
    assert!(selected_ids.contains(&"m0"));
    assert!(selected_ids.contains(&"m1"));
}

#[test]
fn test_set_selected_is_idempotent() {
    let mut collection = SelectableCollection::new();
    let key = single_key(&collection.insert(PointMarker::new("a", 0.0, 0.0)));

    let changed = collection.set_selected(key, false).expect("vorhanden");
    assert!(!changed);
    assert_eq!(collection.get(key).map(|m| m.selection_writes), Some(0));

    assert!(collection.set_selected(key, true).expect("vorhanden"));
    assert!(!collection.set_selected(key, true).expect("vorhanden"));
    assert_eq!(collection.get(key).map(|m| m.selection_writes), Some(1));
    assert!(collection.is_in_selected_bucket(key));
}

#[test]
fn test_update_rebuckets_when_flag_changes_inside_closure() {
    let mut collection = SelectableCollection::new();
    let key = single_key(&collection.insert(PointMarker::new("a", 0.0, 0.0)));

    collection
        .update(key, |m| m.selected = true)
        .expect("vorhanden");

    assert!(collection.is_in_selected_bucket(key));
    assert_partition(&collection);
}

#[test]
fn test_iter_is_restartable_snapshot_of_current_membership() {
    let mut collection = SelectableCollection::new();
    let a = single_key(&collection.insert(PointMarker::new("a", 0.0, 0.0)));
    collection.insert(PointMarker::new("b", 0.0, 0.0));

    let first: Vec<MarkerKey> = collection.iter().map(|(k, _)| k).collect();
    collection.set_selected(a, true).expect("vorhanden");
    let second: Vec<MarkerKey> = collection.iter().map(|(k, _)| k).collect();

    assert_eq!(first.len(), 2);
    assert_eq!(second.last(), Some(&a));
}

#[test]
fn test_remove_unknown_or_empty_handle_fails() {
    let mut collection = SelectableCollection::new();
    let handle = collection.insert(PointMarker::new("a", 0.0, 0.0));

    assert_eq!(
        collection.remove(&MarkerHandle::Empty).unwrap_err(),
        CollectionError::EmptyHandle
    );

    let removed = collection.remove(&handle).expect("erstes Entfernen klappt");
    assert_eq!(removed.len(), 1);
    assert!(collection.is_empty());

    let key = single_key(&handle);
    assert_eq!(
        collection.remove(&handle).unwrap_err(),
        CollectionError::UnknownMarker(key)
    );
    assert_eq!(
        collection.set_selected(key, true).unwrap_err(),
        CollectionError::UnknownMarker(key)
    );
}

#[test]
fn test_remove_selected_marker_clears_bucket() {
    let mut collection = SelectableCollection::new();
    let handle = collection.insert(PointMarker::new("a", 0.0, 0.0));
    collection
        .set_selected(single_key(&handle), true)
        .expect("vorhanden");

    collection.remove(&handle).expect("vorhanden");

    assert_eq!(collection.selected_len(), 0);
    assert_eq!(collection.iter().count(), 0);
}
