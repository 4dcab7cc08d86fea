//! Use-Case: Selektion von Knoten und Kanten inklusive Kanten→Knoten-Kaskade.

use crate::app::MapView;
use crate::core::{CollectionError, EdgeKey, Marker, MarkerId, MarkerKey};

/// Selektiert die Knoten hinter einer ID (grob: alle Knoten der Gruppe).
pub fn select_node(view: &mut MapView, id: &MarkerId, selected: bool) {
    let handle = view.lookup(id);
    handle.set_selected(&mut view.nodes, selected);
}

/// Selektiert alle Kanten hinter dem Paar (grob: alle Kanten zwischen den Gruppen).
///
/// Gibt die Anzahl tatsächlich umgeschalteter Kanten zurück.
pub fn select_edge(view: &mut MapView, key: &EdgeKey, selected: bool) -> usize {
    let handle = view.lookup_edge(key);
    let mut changed = 0;
    for edge_key in handle.keys() {
        match set_edge_selected(view, edge_key, selected) {
            Ok(true) => changed += 1,
            Ok(false) => {}
            Err(e) => log::warn!("Kanten-Selektion für {} ignoriert: {}", key, e),
        }
    }
    changed
}

/// Setzt die Selektion einer konkreten Kante und kaskadiert auf ihre Endpunkte.
///
/// 1. Unveränderter Zustand: No-op.
/// 2. Endpunkte über ihre IDs auflösen (grob: ganze Gruppen).
/// 3. Zähler jedes konkreten Endpunkts erhöhen bzw. (bei 0 gedeckelt) senken.
/// 4. Zuletzt das eigene Flag der Kante setzen.
///
/// Beim Abwählen werden genau die Knoten gesenkt, die beim Anwählen erhöht
/// wurden, auch wenn sich die Granularität dazwischen geändert hat.
pub fn set_edge_selected(
    view: &mut MapView,
    edge: MarkerKey,
    selected: bool,
) -> Result<bool, CollectionError> {
    let marker = view
        .edges
        .get(edge)
        .ok_or(CollectionError::UnknownMarker(edge))?;
    if marker.is_selected() == selected {
        return Ok(false);
    }
    let pair = marker.key().clone();

    let targets = if selected {
        let targets = resolve_endpoints(view, &pair);
        view.cascade_targets.insert(edge, targets.clone());
        targets
    } else {
        view.cascade_targets
            .remove(&edge)
            .unwrap_or_else(|| resolve_endpoints(view, &pair))
    };

    log::trace!(
        "Kante {} {} ({} Endpunkt-Knoten)",
        pair,
        if selected { "selektiert" } else { "abgewählt" },
        targets.len()
    );

    for node in targets {
        let result = view.nodes.update(node, |marker| {
            if selected {
                marker.add_selected_line();
            } else {
                marker.remove_selected_line();
            }
        });
        if let Err(e) = result {
            log::warn!("Endpunkt von {} nicht mehr vorhanden: {}", pair, e);
        }
    }

    view.edges.set_selected(edge, selected)
}

fn resolve_endpoints(view: &MapView, pair: &EdgeKey) -> Vec<MarkerKey> {
    let mut targets = view.lookup(pair.first()).keys();
    targets.extend(view.lookup(pair.second()).keys());
    targets
}
