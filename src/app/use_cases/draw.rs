//! Use-Case: Zeichen-Szene aus dem aktuellen Karten-Zustand bauen.

use std::sync::Arc;

use crate::app::MapView;
use crate::core::Marker;
use crate::shared::{DrawScene, EdgeDrawItem, NodeDrawItem};

/// Baut die Szene: Kanten vor Knoten, jeweils unselektierte vor selektierten.
///
/// Vollständig ausgeblendete Marker (versteckt, Deckkraft 0) entfallen;
/// ausblendende bleiben bis zum Ende ihrer Überblendung enthalten.
pub fn build(view: &MapView) -> DrawScene {
    let options = &view.options;
    let mut animating = false;

    let edges: Vec<EdgeDrawItem> = view
        .edges
        .iter()
        .filter(|(_, edge)| !(edge.is_hidden() && edge.opacity() <= 0.0))
        .map(|(_, edge)| {
            animating |= edge.is_animating();
            let selected = edge.is_selected();
            EdgeDrawItem {
                key: edge.key().clone(),
                start: edge.start,
                end: edge.end,
                width: edge.width(),
                opacity: edge.opacity(),
                color: if selected {
                    options.edge_color_selected
                } else {
                    edge.color()
                },
                selected,
            }
        })
        .collect();

    let nodes: Vec<NodeDrawItem> = view
        .nodes
        .iter()
        .filter(|(_, node)| !(node.is_hidden() && node.opacity() <= 0.0))
        .map(|(_, node)| {
            animating |= node.is_animating();
            let selected = node.is_effectively_selected();
            NodeDrawItem {
                id: node.id().clone(),
                label: node.current_label().to_string(),
                position: node.location(),
                ring_radius: node.expand_radius(),
                ring_stroke_width: node.ring_stroke_width(),
                label_alpha: node.label_alpha(),
                opacity: node.opacity(),
                color: if selected {
                    options.node_color_selected
                } else {
                    node.color()
                },
                selected,
            }
        })
        .collect();

    DrawScene {
        coarse: view.coarse,
        edges: Arc::new(edges),
        nodes: Arc::new(nodes),
        animating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::map_view::tests::sample_view;
    use crate::core::{EdgeKey, MarkerId};

    #[test]
    fn test_selected_items_are_drawn_last() {
        let mut view = sample_view();
        view.set_node_selected(&MarkerId::from("Org1"), true);
        view.set_edge_selected(&EdgeKey::new("Org2", "Org3"), true);

        let scene = build(&view);

        let last_edge = scene.edges.last().expect("Kanten vorhanden");
        assert_eq!(last_edge.key, EdgeKey::new("Org2", "Org3"));
        assert!(last_edge.selected);
        assert_eq!(last_edge.color, view.options().edge_color_selected);

        // Org1 direkt, Org2/Org3 über die Kante
        assert!(scene.nodes.iter().all(|item| item.selected));
        assert_eq!(scene.nodes.len(), 3);
    }

    #[test]
    fn test_hidden_markers_are_skipped() {
        let mut view = sample_view();
        view.set_granularity(true);

        let scene = build(&view);

        assert!(scene.coarse);
        assert!(scene.edge(&EdgeKey::new("Org1", "Org2")).is_none());
        assert_eq!(scene.edges.len(), 2);
        assert_eq!(scene.node("Org1").map(|n| n.label.as_str()), Some("CountryX"));
        assert!(!scene.animating);
    }

    #[test]
    fn test_unselected_nodes_show_plain_point() {
        let view = sample_view();
        let scene = build(&view);

        let org1 = scene.node("Org1").expect("Knoten");
        assert_eq!(org1.ring_radius, 0.0);
        assert_eq!(org1.label_alpha, 0.0);
        assert_eq!(org1.color, view.options().node_color_default);
    }
}
