//! Use-Case: Animationen fortschreiben und Kanten-Geometrie nachführen.

use crate::app::MapView;

/// Schreibt alle Animationen um `dt` Sekunden fort.
///
/// Kanten folgen den (ggf. wandernden) Positionen ihrer Endpunkte. Solange
/// sich etwas bewegt, wird der Hit-Test-Snapshot neu veröffentlicht.
/// Gibt `true` zurück, solange noch eine Animation läuft.
pub fn advance(view: &mut MapView, dt: f32) -> bool {
    let was_animating = view.nodes.iter().any(|(_, node)| node.is_animating())
        || view.edges.iter().any(|(_, edge)| edge.is_animating());
    if !was_animating {
        return false;
    }

    let mut animating = false;
    view.nodes.update_all(|node| animating |= node.tick(dt));
    sync_edge_geometry(view);
    view.edges.update_all(|edge| animating |= edge.tick(dt));

    view.publish_hits();
    animating
}

/// Setzt Start und Ende jeder Kante auf die aktuellen Positionen ihrer Endpunkte.
pub fn sync_edge_geometry(view: &mut MapView) {
    let geometry: Vec<_> = view
        .edges
        .iter()
        .filter_map(|(key, edge)| {
            let start = view.node_position(edge.key().first())?;
            let end = view.node_position(edge.key().second())?;
            Some((key, start, end))
        })
        .collect();
    for (key, start, end) in geometry {
        if let Err(e) = view
            .edges
            .update(key, |edge| edge.update_geometry(start, end))
        {
            log::warn!("Kante beim Nachführen verschwunden: {}", e);
        }
    }
}
