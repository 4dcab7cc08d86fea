//! Use-Case: gesammelte Anfragen in einem Durchgang anwenden.

use crate::app::conference_filter::FilterScope;
use crate::app::requests::{RefreshBatch, ViewRequests};
use crate::app::MapView;

/// Entnimmt alle vorgemerkten Anfragen und wendet sie an.
pub fn apply_pending(view: &mut MapView, requests: &ViewRequests) {
    let batch = requests.take_refresh();
    if batch.is_empty() {
        log::trace!("Refresh ohne Änderungen");
        return;
    }
    apply_batch(view, batch);
}

/// Wendet einen Anfrage-Stapel an.
///
/// Reihenfolge: Granularität, Filter, Knoten-, dann Kanten-Selektionen. So
/// lösen Selektionen bereits in der neuen Granularität auf.
pub fn apply_batch(view: &mut MapView, batch: RefreshBatch) {
    if let Some(coarse) = batch.granularity {
        view.set_granularity(coarse);
    }

    match batch.filter {
        Some(FilterScope::All) => view.show_all_conferences(),
        Some(FilterScope::Acronyms(acronyms)) => view.show_conferences(&acronyms),
        None => {}
    }

    for (id, selected) in &batch.node_selections {
        view.set_node_selected(id, *selected);
    }
    for (key, selected) in &batch.edge_selections {
        view.set_edge_selected(key, *selected);
    }

    view.publish_hits();
}
