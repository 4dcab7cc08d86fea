//! Use-Case: Hover-Ergebnis auf die Selektion abbilden.
//!
//! Jeder konkrete Marker wird genau dann selektiert, wenn er im Treffer-Set
//! liegt. Kanten laufen über die Kaskade, damit ihre Endpunkte aufklappen.

use crate::app::requests::ViewRequests;
use crate::app::MapView;
use crate::core::{HitSet, Marker};

use super::selection::set_edge_selected;

/// Wendet das zuletzt gemeldete Hover-Ergebnis an, falls eines vorliegt.
pub fn apply_pending(view: &mut MapView, requests: &ViewRequests) {
    if let Some(hits) = requests.take_hover() {
        apply_hover(view, &hits);
    }
}

/// Selektiert genau die getroffenen Kanten und Knoten.
pub fn apply_hover(view: &mut MapView, hits: &HitSet) {
    log::trace!(
        "Hover: {} Knoten, {} Kanten getroffen",
        hits.nodes.len(),
        hits.edges.len()
    );

    let edge_targets: Vec<_> = view
        .edges
        .iter()
        .map(|(key, edge)| (key, hits.contains_edge(edge.key())))
        .collect();
    for (key, hit) in edge_targets {
        if let Err(e) = set_edge_selected(view, key, hit) {
            log::warn!("Hover auf Kante ignoriert: {}", e);
        }
    }

    let node_targets: Vec<_> = view
        .nodes
        .iter()
        .map(|(key, node)| (key, hits.contains_node(node.id())))
        .collect();
    for (key, hit) in node_targets {
        if let Err(e) = view.nodes.set_selected(key, hit) {
            log::warn!("Hover auf Knoten ignoriert: {}", e);
        }
    }

    view.publish_hits();
}
