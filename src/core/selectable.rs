//! Collection mit Zwei-Zustands-Partition (unselektiert / selektiert).
//!
//! Selektierte Marker werden immer zuletzt (oben) gezeichnet. Jede Mutation
//! läuft über die Collection, die danach den Bucket des Markers nachführt.

use super::{Marker, MarkerHandle};
use indexmap::IndexSet;
use std::collections::HashMap;

/// Stabiler Schlüssel eines Markers innerhalb genau einer Collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerKey(u64);

impl MarkerKey {
    /// Rohwert des Schlüssels (nur für Logging).
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Fehler bei Zugriffen auf eine [`SelectableCollection`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// Der Schlüssel gehört zu keinem (mehr) enthaltenen Marker.
    #[error("Marker {0:?} ist nicht in der Collection enthalten")]
    UnknownMarker(MarkerKey),
    /// Ein leeres Handle referenziert nichts, das entfernt werden könnte.
    #[error("Leeres Handle kann nicht entfernt werden")]
    EmptyHandle,
}

/// Container, der seine Marker in „selektiert" und „unselektiert" partitioniert.
///
/// Invariante: jeder Schlüssel liegt in genau einem der beiden Buckets, und
/// zwar in dem, der `Marker::is_effectively_selected()` entspricht.
#[derive(Debug, Clone)]
pub struct SelectableCollection<M> {
    markers: HashMap<MarkerKey, M>,
    selected: IndexSet<MarkerKey>,
    unselected: IndexSet<MarkerKey>,
    next_key: u64,
}

impl<M: Marker> SelectableCollection<M> {
    /// Erstellt eine leere Collection.
    pub fn new() -> Self {
        Self {
            markers: HashMap::new(),
            selected: IndexSet::new(),
            unselected: IndexSet::new(),
            next_key: 0,
        }
    }

    /// Nimmt einen Marker auf und liefert ein Handle auf ihn.
    ///
    /// Der Marker landet im unselektierten Bucket, außer er ist bereits selektiert.
    pub fn insert(&mut self, marker: M) -> MarkerHandle {
        let key = MarkerKey(self.next_key);
        self.next_key += 1;

        if marker.is_effectively_selected() {
            self.selected.insert(key);
        } else {
            self.unselected.insert(key);
        }
        self.markers.insert(key, marker);

        MarkerHandle::Single(key)
    }

    /// Entfernt alle vom Handle referenzierten Marker.
    ///
    /// Fehlt auch nur einer davon, wird nichts entfernt.
    pub fn remove(&mut self, handle: &MarkerHandle) -> Result<Vec<M>, CollectionError> {
        let keys = handle.keys();
        if keys.is_empty() {
            return Err(CollectionError::EmptyHandle);
        }
        if let Some(missing) = keys.iter().find(|key| !self.markers.contains_key(*key)) {
            return Err(CollectionError::UnknownMarker(*missing));
        }

        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            if !self.unselected.swap_remove(&key) {
                self.selected.swap_remove(&key);
            }
            if let Some(marker) = self.markers.remove(&key) {
                removed.push(marker);
            }
        }
        Ok(removed)
    }

    /// Entfernt alle Marker.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.selected.clear();
        self.unselected.clear();
    }

    /// Read-only Zugriff auf einen Marker.
    pub fn get(&self, key: MarkerKey) -> Option<&M> {
        self.markers.get(&key)
    }

    /// Prüft ob der Schlüssel enthalten ist.
    pub fn contains(&self, key: MarkerKey) -> bool {
        self.markers.contains_key(&key)
    }

    /// Anzahl aller Marker.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Gibt `true` zurück, wenn keine Marker enthalten sind.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Anzahl der Marker im selektierten Bucket.
    pub fn selected_len(&self) -> usize {
        self.selected.len()
    }

    /// Prüft ob der Marker aktuell im selektierten Bucket liegt.
    pub fn is_in_selected_bucket(&self, key: MarkerKey) -> bool {
        self.selected.contains(&key)
    }

    /// Prüft ob der Marker aktuell im unselektierten Bucket liegt.
    pub fn is_in_unselected_bucket(&self, key: MarkerKey) -> bool {
        self.unselected.contains(&key)
    }

    /// Setzt das Selektions-Flag eines Markers.
    ///
    /// Entspricht der neue Zustand dem aktuellen, passiert nichts (idempotent,
    /// Kaskaden rufen das regelmäßig mit unverändertem Wert auf).
    /// Gibt `true` zurück, wenn sich das Flag geändert hat.
    pub fn set_selected(&mut self, key: MarkerKey, selected: bool) -> Result<bool, CollectionError> {
        let marker = self
            .markers
            .get_mut(&key)
            .ok_or(CollectionError::UnknownMarker(key))?;

        if marker.is_selected() == selected {
            return Ok(false);
        }

        marker.set_selected(selected);
        self.rebucket(key);
        Ok(true)
    }

    /// Führt eine beliebige Mutation auf einem Marker aus und sortiert ihn danach neu ein.
    pub fn update<R>(
        &mut self,
        key: MarkerKey,
        mutate: impl FnOnce(&mut M) -> R,
    ) -> Result<R, CollectionError> {
        let marker = self
            .markers
            .get_mut(&key)
            .ok_or(CollectionError::UnknownMarker(key))?;
        let result = mutate(marker);
        self.rebucket(key);
        Ok(result)
    }

    /// Führt eine Mutation auf allen Markern aus (Zeichenreihenfolge).
    pub fn update_all(&mut self, mut mutate: impl FnMut(&mut M)) {
        for key in self.keys() {
            // Schlüssel stammen aus dem aktuellen Bestand
            let _ = self.update(key, &mut mutate);
        }
    }

    /// Iteriert unselektierte Marker vor selektierten (Zeichenreihenfolge).
    ///
    /// Jeder Aufruf liefert eine frische Sequenz über den aktuellen Bestand.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerKey, &M)> + '_ {
        self.unselected
            .iter()
            .chain(self.selected.iter())
            .filter_map(move |key| self.markers.get(key).map(|marker| (*key, marker)))
    }

    /// Materialisierte Schlüsselliste in Zeichenreihenfolge.
    pub fn keys(&self) -> Vec<MarkerKey> {
        self.unselected
            .iter()
            .chain(self.selected.iter())
            .copied()
            .collect()
    }

    fn rebucket(&mut self, key: MarkerKey) {
        let Some(marker) = self.markers.get(&key) else {
            return;
        };

        if marker.is_effectively_selected() {
            if self.unselected.swap_remove(&key) {
                self.selected.insert(key);
            }
        } else if self.selected.swap_remove(&key) {
            self.unselected.insert(key);
        }
    }
}

impl<M: Marker> Default for SelectableCollection<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
