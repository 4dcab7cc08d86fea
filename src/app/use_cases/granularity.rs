//! Use-Case: Wechsel zwischen feiner (Organisation) und grober (Land) Darstellung.

use std::collections::HashMap;

use crate::app::data_provider::CooperationWeights;
use crate::app::MapView;
use crate::core::{GroupKey, Marker};

/// Kooperationsdaten in der aktuellen Granularität.
///
/// Grob wird pro Gruppenpaar summiert; jedes Entitätspaar über Gruppengrenzen
/// erhält die Summe seines Gruppenpaars, Paare innerhalb einer Gruppe entfallen.
pub fn effective_cooperation_data(view: &MapView) -> CooperationWeights {
    let Some(data) = view.cooperation_data.as_ref() else {
        return CooperationWeights::new();
    };
    if !view.coarse {
        return data.clone();
    }

    let groups_of = |pair: &crate::core::EdgeKey| -> Option<(GroupKey, GroupKey)> {
        let a = view.provider.group_key_of(pair.first())?;
        let b = view.provider.group_key_of(pair.second())?;
        Some(if a <= b { (a, b) } else { (b, a) })
    };

    let mut group_sums: HashMap<(GroupKey, GroupKey), u32> = HashMap::new();
    for (pair, weight) in data {
        if let Some(groups) = groups_of(pair) {
            let sum = group_sums.entry(groups).or_insert(0);
            *sum = sum.saturating_add(*weight);
        }
    }

    data.keys()
        .filter_map(|pair| {
            let groups = groups_of(pair)?;
            if groups.0 == groups.1 {
                return None;
            }
            group_sums.get(&groups).map(|sum| (pair.clone(), *sum))
        })
        .collect()
}

/// Setzt die Granularität; unverändert ist das ein No-op.
pub fn set_granularity(view: &mut MapView, coarse: bool) {
    if view.coarse == coarse {
        log::trace!("Granularität unverändert (grob: {})", coarse);
        return;
    }
    log::debug!("Wechsle Granularität (grob: {})", coarse);
    view.coarse = coarse;

    let data = effective_cooperation_data(view);

    view.nodes.update_all(|node| node.switch_to_second(coarse));
    // Ohne Animation stehen die Knoten bereits am Ziel
    super::animate::sync_edge_geometry(view);

    if data.is_empty() {
        return;
    }

    let options = view.options.clone();
    view.edges.update_all(|edge| match data.get(edge.key()) {
        None => {
            log::trace!("Verstecke {}", edge.key());
            edge.set_hidden_immediately(true);
        }
        Some(weight) => {
            let width = options.edge_width_for(*weight);
            if edge.is_hidden() {
                edge.set_width(width);
                edge.set_hidden_immediately(false);
            } else {
                edge.set_width_animated(width);
            }
        }
    });
}
