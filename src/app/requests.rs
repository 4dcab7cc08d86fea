//! Eingang für Anfragen von Eingabe-Threads an die Karten-Ansicht.
//!
//! Aufrufer schreiben hier ihren Wunschzustand (letzter Wert gewinnt) und
//! fordern danach einen entprellten Refresh an. Der Refresh leert den Eingang
//! auf dem Worker und wendet den Stand zum Ausführungszeitpunkt an.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use super::conference_filter::FilterScope;
use crate::core::{EdgeKey, HitSet, MarkerId};

/// Gesammelte Änderungswünsche für den nächsten Refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshBatch {
    /// Gewünschte Granularität (`true` = grob)
    pub granularity: Option<bool>,
    /// Gewünschter Konferenz-Filter
    pub filter: Option<FilterScope>,
    /// Gewünschte Knoten-Selektionen in Anfragereihenfolge
    pub node_selections: IndexMap<MarkerId, bool>,
    /// Gewünschte Kanten-Selektionen in Anfragereihenfolge
    pub edge_selections: IndexMap<EdgeKey, bool>,
}

impl RefreshBatch {
    pub fn is_empty(&self) -> bool {
        self.granularity.is_none()
            && self.filter.is_none()
            && self.node_selections.is_empty()
            && self.edge_selections.is_empty()
    }
}

#[derive(Debug, Default)]
struct Inbox {
    refresh: RefreshBatch,
    hover: Option<HitSet>,
}

/// Thread-sicherer, kurz gesperrter Anfrage-Eingang.
#[derive(Debug, Clone, Default)]
pub struct ViewRequests {
    inbox: Arc<Mutex<Inbox>>,
}

impl ViewRequests {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inbox> {
        self.inbox.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_granularity(&self, coarse: bool) {
        self.lock().refresh.granularity = Some(coarse);
    }

    pub fn set_filter(&self, scope: FilterScope) {
        self.lock().refresh.filter = Some(scope);
    }

    /// Merkt eine Knoten-Selektion vor; eine ältere für dieselbe ID wird ersetzt.
    pub fn select_node(&self, id: MarkerId, selected: bool) {
        let mut inbox = self.lock();
        // Neu einsortieren, damit die Anwendungsreihenfolge der letzten Anfrage folgt
        inbox.refresh.node_selections.shift_remove(&id);
        inbox.refresh.node_selections.insert(id, selected);
    }

    /// Merkt eine Kanten-Selektion vor; eine ältere für dasselbe Paar wird ersetzt.
    pub fn select_edge(&self, key: EdgeKey, selected: bool) {
        let mut inbox = self.lock();
        inbox.refresh.edge_selections.shift_remove(&key);
        inbox.refresh.edge_selections.insert(key, selected);
    }

    /// Ersetzt das zuletzt gemeldete Hover-Ergebnis.
    pub fn set_hover(&self, hits: HitSet) {
        self.lock().hover = Some(hits);
    }

    /// Entnimmt alle vorgemerkten Refresh-Wünsche.
    pub fn take_refresh(&self) -> RefreshBatch {
        std::mem::take(&mut self.lock().refresh)
    }

    /// Entnimmt das zuletzt gemeldete Hover-Ergebnis.
    pub fn take_hover(&self) -> Option<HitSet> {
        self.lock().hover.take()
    }
}
