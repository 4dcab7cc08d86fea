use super::*;
use crate::app::data_provider::{Dataset, InMemoryDataProvider};

/// Drei Organisationen in zwei Ländern plus eine ohne Land.
///
/// Gewichte: Org1–Org2 = 5, Org1–Org3 = 2, Org2–Org3 = 3.
pub(crate) const SAMPLE_DATASET: &str = r#"{
    "organizations": [
        {"name": "Org1", "country": "CountryX", "location": [0.0, 0.0]},
        {"name": "Org2", "country": "CountryX", "location": [100.0, 0.0]},
        {"name": "Org3", "country": "CountryY", "location": [500.0, 500.0]},
        {"name": "Org4", "location": [900.0, 900.0]}
    ],
    "countries": [
        {"name": "CountryX", "location": [50.0, 50.0]},
        {"name": "CountryY", "location": [500.0, 600.0]}
    ],
    "cooperations": [
        {"a": "Org1", "b": "Org2", "weight": 5},
        {"a": "Org3", "b": "Org1", "weight": 2},
        {"a": "Org2", "b": "Org3", "weight": 3}
    ],
    "conferences": [
        {"conference": "LAK", "year": 2012,
         "organizations": ["Org1", "Org3"],
         "cooperations": [{"a": "Org1", "b": "Org3", "weight": 2}]},
        {"conference": "LAK", "year": 2013,
         "organizations": ["Org1", "Org2", "Org3"],
         "cooperations": [{"a": "Org1", "b": "Org2", "weight": 5},
                          {"a": "Org2", "b": "Org3", "weight": 3}]}
    ]
}"#;

pub(crate) fn sample_provider() -> InMemoryDataProvider {
    let dataset = Dataset::from_json(SAMPLE_DATASET).expect("gültiger Testdatensatz");
    InMemoryDataProvider::from_dataset(&dataset)
}

pub(crate) fn sample_view() -> MapView {
    let mut view = MapView::new(
        Arc::new(sample_provider()),
        ViewerOptions::instant(),
        HitPublisher::new(),
    );
    view.populate();
    view
}

#[test]
fn test_populate_skips_entities_without_group() {
    let view = sample_view();

    assert_eq!(view.nodes().len(), 3);
    assert!(view.node("Org4").is_none());
    assert_eq!(view.edges().len(), 3);
}

#[test]
fn test_fine_lookup_returns_single_handle() {
    let view = sample_view();

    let handle = view.lookup(&MarkerId::from("Org1"));
    assert!(matches!(handle, MarkerHandle::Single(_)));
    assert_eq!(handle.id(view.nodes()), "Org1");
}

#[test]
fn test_coarse_lookup_groups_all_members() {
    let mut view = sample_view();
    view.set_granularity(true);

    let group = view.lookup_group(&GroupKey::from("CountryX"));
    assert!(group.is_grouped());
    assert_eq!(group.member_count(), 2);

    let via_member = view.lookup(&MarkerId::from("Org2"));
    assert_eq!(via_member.keys(), group.keys());

    // Einzelnes Land bleibt gruppiert
    let single_member = view.lookup(&MarkerId::from("Org3"));
    assert!(single_member.is_grouped());
    assert_eq!(single_member.member_count(), 1);
}

#[test]
fn test_lookup_misses_yield_empty_handles() {
    let mut view = sample_view();

    assert!(view.lookup(&MarkerId::from("Unbekannt")).is_empty());
    assert!(view.lookup_edge(&EdgeKey::new("Org1", "Unbekannt")).is_empty());

    view.set_granularity(true);
    assert!(view.lookup(&MarkerId::from("Org4")).is_empty());
    assert!(view.lookup_group(&GroupKey::from("CountryZ")).is_empty());
}

#[test]
fn test_coarse_edge_lookup_spans_group_pair() {
    let mut view = sample_view();
    view.set_granularity(true);

    let between = view.lookup_edge(&EdgeKey::new("Org2", "Org3"));
    assert!(between.is_grouped());
    assert_eq!(between.member_count(), 2);

    // Innerhalb eines Landes gibt es grob keine Kante
    assert!(view.lookup_edge(&EdgeKey::new("Org1", "Org2")).is_empty());
}

#[test]
fn test_coarse_nodes_show_group_identity() {
    let mut view = sample_view();
    view.set_granularity(true);

    let node = view.node("Org1").expect("Knoten");
    assert_eq!(node.current_label(), "CountryX");
    assert_eq!(node.location(), Vec2::new(50.0, 50.0));
    assert_eq!(node.id().as_str(), "Org1");
}

#[test]
fn test_populate_publishes_hit_snapshot() {
    let view = sample_view();
    let snapshot = view.hits.current();

    assert_eq!(snapshot.node_count(), 3);
    assert_eq!(snapshot.edge_count(), 3);
    assert_eq!(
        snapshot.hit_nodes(Vec2::new(1.0, 1.0)),
        vec![MarkerId::from("Org1")]
    );
}
