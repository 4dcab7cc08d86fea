//! Use-Case: Karte aus dem Datenbestand befüllen.

use crate::app::MapView;
use crate::core::{EdgeMarker, Identity, Marker, MarkerHandle, NodeMarker};

/// Erzeugt alle Knoten und danach alle Kanten.
pub fn populate(view: &mut MapView) {
    log::debug!("Befülle Karte");
    create_node_markers(view);
    create_edge_markers(view);
    view.publish_hits();
    log::info!(
        "Karte befüllt: {} Knoten, {} Kanten",
        view.nodes.len(),
        view.edges.len()
    );
}

/// Ein Knoten pro Entität mit Gruppe und beiden Positionen.
///
/// Entitäten ohne Gruppe oder Position werden mit Fehler-Log übersprungen.
fn create_node_markers(view: &mut MapView) {
    let animation = view.options.animation_settings();
    let color = view.options.node_color_default;

    for id in view.provider.all_entities() {
        if view.node_index.contains_key(&id) {
            continue;
        }

        let Some(group) = view.provider.group_key_of(&id) else {
            log::error!("Keine Gruppe für {} gefunden", id);
            continue;
        };
        let Some(location) = view.provider.location_of(&id) else {
            log::error!("Keine Position für {} gefunden", id);
            continue;
        };
        let Some(group_location) = view.provider.group_location(&group) else {
            log::error!("Keine Position für Gruppe {} gefunden", group);
            continue;
        };

        let mut node = NodeMarker::new(
            Identity::new(id.as_str(), location),
            Identity::new(group.as_str(), group_location),
            view.coarse,
            animation,
        );
        node.set_color(color);

        if let MarkerHandle::Single(key) = view.nodes.insert(node) {
            view.node_index.insert(id, key);
        }
    }
}

/// Eine Kante pro Kooperation, deren beide Endpunkte als Knoten existieren.
///
/// Paare ohne Gewicht in der aktuellen Granularität starten versteckt.
fn create_edge_markers(view: &mut MapView) {
    let raw = view.provider.cooperation_weights();
    view.cooperation_data = Some(raw.clone());
    let effective = view.cooperation_data();
    let animation = view.options.animation_settings();
    let color = view.options.edge_color_default;

    for pair in raw.keys() {
        if view.edge_index.contains_key(pair) {
            continue;
        }
        let (Some(start), Some(end)) = (
            view.node_position(pair.first()),
            view.node_position(pair.second()),
        ) else {
            log::trace!("Kante {} ohne Endpunkt-Knoten übersprungen", pair);
            continue;
        };

        let width = effective
            .get(pair)
            .map(|weight| view.options.edge_width_for(*weight));
        let mut edge = EdgeMarker::new(pair.clone(), start, end, width.unwrap_or(0.0), animation);
        edge.set_color(color);
        if width.is_none() {
            edge.set_hidden_immediately(true);
        }

        log::trace!("Kante {} erzeugt", pair);
        if let MarkerHandle::Single(key) = view.edges.insert(edge) {
            view.edge_index.insert(pair.clone(), key);
        }
    }
}
