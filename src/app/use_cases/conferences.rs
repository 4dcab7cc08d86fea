//! Use-Case: Konferenz-Filter auf die Karte anwenden.

use std::collections::BTreeSet;

use crate::app::data_provider::{merge_weights, CooperationWeights};
use crate::app::MapView;
use crate::core::{Marker, MarkerId};

/// Zeigt alle Knoten und alle Kanten des gesamten Datenbestands.
pub fn show_all_conferences(view: &mut MapView) {
    log::debug!("Zeige alle Konferenzen");
    view.nodes.update_all(|node| node.set_hidden(false));
    show_all_edges(view);
    view.publish_hits();
}

/// Setzt die Gesamtgewichte und blendet Kanten passend ein bzw. aus.
fn show_all_edges(view: &mut MapView) {
    let raw = view.provider.cooperation_weights();
    view.cooperation_data = Some(raw.clone());
    let effective = view.cooperation_data();

    for pair in raw.keys() {
        let handle = view.lookup_edge(pair);
        match effective.get(pair) {
            None => handle.set_hidden(&mut view.edges, true),
            Some(weight) => {
                let width = view.options.edge_width_for(*weight);
                handle.set_hidden(&mut view.edges, false);
                handle.update(&mut view.edges, |edge| edge.set_width_animated(width));
            }
        }
    }
}

/// Zeigt nur Teilnehmer und Kooperationen der angegebenen Konferenz-Kürzel.
///
/// Gewichte mehrerer Kürzel werden summiert. Grob werden ganze Länder
/// eingeblendet, sobald eine ihrer Organisationen teilgenommen hat.
pub fn show_conferences(view: &mut MapView, acronyms: &[String]) {
    log::debug!("Zeige Konferenzen: {}", acronyms.join(", "));

    let mut entities: BTreeSet<MarkerId> = BTreeSet::new();
    let mut weights = CooperationWeights::new();
    for acronym in acronyms {
        entities.extend(view.provider.entities_for(acronym));
        merge_weights(&mut weights, &view.provider.cooperation_weights_for(acronym));
    }

    view.cooperation_data = Some(weights);
    let effective = view.cooperation_data();

    view.nodes.update_all(|node| node.set_hidden(true));
    view.edges.update_all(|edge| edge.set_hidden(true));

    for id in &entities {
        let handle = view.lookup(id);
        handle.set_hidden(&mut view.nodes, false);
    }

    for (pair, weight) in &effective {
        let handle = view.lookup_edge(pair);
        let width = view.options.edge_width_for(*weight);
        handle.set_hidden(&mut view.edges, false);
        handle.update(&mut view.edges, |edge| edge.set_width_animated(width));
    }

    log::debug!(
        "{} Organisationen und {} Kooperationen sichtbar",
        entities.len(),
        effective.len()
    );
    view.publish_hits();
}
