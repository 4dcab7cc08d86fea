//! Karten-Ansicht: besitzt Knoten- und Kanten-Collections und löst IDs in Handles auf.
//!
//! Eine `MapView` lebt exklusiv auf dem Worker-Thread der Karte. Handles,
//! die sie liefert, sind nur bis zum nächsten Granularitätswechsel gültig
//! und werden deshalb pro Refresh neu nachgeschlagen.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use glam::Vec2;

use super::data_provider::{CooperationWeights, DataProvider};
use super::use_cases;
use crate::core::{
    EdgeKey, EdgeMarker, GroupKey, HitSnapshot, Marker, MarkerHandle, MarkerId, MarkerKey,
    NodeMarker, SelectableCollection,
};
use crate::shared::{DrawScene, ViewerOptions};

/// Veröffentlicht den jeweils aktuellen Hit-Test-Snapshot für Eingabe-Threads.
#[derive(Debug, Clone, Default)]
pub struct HitPublisher {
    current: Arc<RwLock<Arc<HitSnapshot>>>,
}

impl HitPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktueller Snapshot (billiger `Arc`-Clone).
    pub fn current(&self) -> Arc<HitSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Ersetzt den Snapshot.
    pub fn publish(&self, snapshot: HitSnapshot) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
    }
}

/// Zustand der Karte: Marker, Indizes, Granularität und Kooperationsdaten.
pub struct MapView {
    pub(crate) provider: Arc<dyn DataProvider>,
    pub(crate) options: ViewerOptions,
    pub(crate) nodes: SelectableCollection<NodeMarker>,
    pub(crate) edges: SelectableCollection<EdgeMarker>,
    pub(crate) node_index: HashMap<MarkerId, MarkerKey>,
    pub(crate) edge_index: HashMap<EdgeKey, MarkerKey>,
    /// Konkrete Knoten, deren Zähler eine selektierte Kante erhöht hat
    pub(crate) cascade_targets: HashMap<MarkerKey, Vec<MarkerKey>>,
    pub(crate) coarse: bool,
    /// Feine (ungruppierte) Kooperationsdaten des aktuellen Filters
    pub(crate) cooperation_data: Option<CooperationWeights>,
    pub(crate) hits: HitPublisher,
}

impl MapView {
    /// Erstellt eine leere Ansicht; gefüllt wird sie mit [`MapView::populate`].
    pub fn new(provider: Arc<dyn DataProvider>, options: ViewerOptions, hits: HitPublisher) -> Self {
        Self {
            provider,
            options,
            nodes: SelectableCollection::new(),
            edges: SelectableCollection::new(),
            node_index: HashMap::new(),
            edge_index: HashMap::new(),
            cascade_targets: HashMap::new(),
            coarse: false,
            cooperation_data: None,
            hits,
        }
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// `true` bei grober Darstellung (Länder).
    pub fn is_coarse(&self) -> bool {
        self.coarse
    }

    pub fn nodes(&self) -> &SelectableCollection<NodeMarker> {
        &self.nodes
    }

    pub fn edges(&self) -> &SelectableCollection<EdgeMarker> {
        &self.edges
    }

    /// Knoten mit der gegebenen (feinen) ID.
    pub fn node(&self, id: &str) -> Option<&NodeMarker> {
        self.node_index
            .get(&MarkerId::from(id))
            .and_then(|key| self.nodes.get(*key))
    }

    /// Kante mit dem gegebenen (feinen) Schlüssel.
    pub fn edge(&self, key: &EdgeKey) -> Option<&EdgeMarker> {
        self.edge_index.get(key).and_then(|k| self.edges.get(*k))
    }

    /// Handle auf genau den Knoten dieser ID, unabhängig von der Granularität.
    pub fn lookup_fine(&self, id: &MarkerId) -> MarkerHandle {
        match self.node_index.get(id) {
            Some(key) => MarkerHandle::Single(*key),
            None => MarkerHandle::Empty,
        }
    }

    /// Handle für eine Entität.
    ///
    /// Fein: der eine Knoten. Grob: alle Knoten der Gruppe der Entität.
    pub fn lookup(&self, id: &MarkerId) -> MarkerHandle {
        if !self.coarse {
            let handle = self.lookup_fine(id);
            if handle.is_empty() {
                log::warn!("Kein Knoten für {} gefunden", id);
            }
            return handle;
        }

        match self.provider.group_key_of(id) {
            Some(group) => self.lookup_group(&group),
            None => {
                log::error!("Keine Gruppe für {} gefunden", id);
                MarkerHandle::Empty
            }
        }
    }

    /// Gruppiertes Handle über alle Knoten einer Gruppe (nie `Single`).
    pub fn lookup_group(&self, group: &GroupKey) -> MarkerHandle {
        let members: Vec<MarkerHandle> = self
            .provider
            .group_members(group)
            .iter()
            .filter_map(|member| {
                let handle = self.lookup_fine(member);
                if handle.is_empty() {
                    log::error!("Kein Knoten für {} in Gruppe {} gefunden", member, group);
                    None
                } else {
                    Some(handle)
                }
            })
            .collect();

        if members.is_empty() {
            log::error!("Gruppe {} hat keine Knoten", group);
            return MarkerHandle::Empty;
        }
        MarkerHandle::grouped(members)
    }

    /// Handle auf genau die Kante dieses Paars, unabhängig von der Granularität.
    pub fn lookup_edge_fine(&self, key: &EdgeKey) -> MarkerHandle {
        match self.edge_index.get(key) {
            Some(marker_key) => MarkerHandle::Single(*marker_key),
            None => MarkerHandle::Empty,
        }
    }

    /// Handle für eine Kooperation.
    ///
    /// Grob: alle Kanten zwischen den beiden Gruppen; innerhalb einer Gruppe
    /// oder ohne bekannte Gruppe `Empty`.
    pub fn lookup_edge(&self, key: &EdgeKey) -> MarkerHandle {
        if !self.coarse {
            let handle = self.lookup_edge_fine(key);
            if handle.is_empty() {
                log::trace!("Keine Kante für {} vorhanden", key);
            }
            return handle;
        }

        let groups = (
            self.provider.group_key_of(key.first()),
            self.provider.group_key_of(key.second()),
        );
        let (Some(a), Some(b)) = groups else {
            return MarkerHandle::Empty;
        };
        if a == b {
            return MarkerHandle::Empty;
        }

        let edges: Vec<MarkerHandle> = self
            .provider
            .cooperations_between_groups(&a, &b)
            .iter()
            .map(|pair| self.lookup_edge_fine(pair))
            .filter(|handle| !handle.is_empty())
            .collect();

        if edges.is_empty() {
            log::error!(
                "Keine Kanten zwischen {} und {}, obwohl {} bekannt ist",
                a,
                b,
                key
            );
            return MarkerHandle::Empty;
        }
        MarkerHandle::grouped(edges)
    }

    /// Kooperationsdaten in der aktuellen Granularität.
    ///
    /// Grob bekommt jedes Paar über Gruppengrenzen das summierte
    /// Gruppengewicht; Paare innerhalb einer Gruppe entfallen.
    pub fn cooperation_data(&self) -> CooperationWeights {
        use_cases::granularity::effective_cooperation_data(self)
    }

    /// Position des konkreten Knotens einer Entität.
    pub fn node_position(&self, id: &MarkerId) -> Option<Vec2> {
        self.node_index
            .get(id)
            .and_then(|key| self.nodes.get(*key))
            .map(|node| node.location())
    }

    /// Erzeugt alle Knoten und Kanten aus dem Datenbestand.
    pub fn populate(&mut self) {
        use_cases::populate::populate(self);
    }

    /// Wechselt die Granularität (Identitätswechsel aller Knoten, Kanten neu gewichtet).
    pub fn set_granularity(&mut self, coarse: bool) {
        use_cases::granularity::set_granularity(self, coarse);
    }

    /// Selektiert alle Kanten hinter dem Paar inklusive Kaskade auf die Endpunkte.
    ///
    /// Gibt die Anzahl tatsächlich umgeschalteter Kanten zurück.
    pub fn set_edge_selected(&mut self, key: &EdgeKey, selected: bool) -> usize {
        use_cases::selection::select_edge(self, key, selected)
    }

    /// Selektiert die Knoten hinter einer ID (fein: einer, grob: die Gruppe).
    pub fn set_node_selected(&mut self, id: &MarkerId, selected: bool) {
        use_cases::selection::select_node(self, id, selected);
    }

    /// Zeigt den gesamten Datenbestand.
    pub fn show_all_conferences(&mut self) {
        use_cases::conferences::show_all_conferences(self);
    }

    /// Zeigt nur die angegebenen Konferenz-Kürzel.
    pub fn show_conferences(&mut self, acronyms: &[String]) {
        use_cases::conferences::show_conferences(self, acronyms);
    }

    /// Schreibt alle Animationen fort; `true`, solange noch etwas läuft.
    pub fn advance_animations(&mut self, dt: f32) -> bool {
        use_cases::animate::advance(self, dt)
    }

    /// Baut die Zeichen-Szene des aktuellen Zustands.
    pub fn draw_scene(&self) -> DrawScene {
        use_cases::draw::build(self)
    }

    /// Baut den Hit-Test-Snapshot neu und veröffentlicht ihn.
    pub fn publish_hits(&self) {
        self.hits.publish(HitSnapshot::build(&self.nodes, &self.edges));
    }
}

#[cfg(test)]
pub(crate) mod tests;
