//! Marker-Handles: einheitlicher Zugriff auf 0, 1 oder N konkrete Marker.
//!
//! Ein Handle besitzt selbst keine Marker, sondern nur Schlüssel in eine
//! [`SelectableCollection`]. Alle Abfragen und Mutationen bekommen die
//! Collection übergeben, damit das Bucket-Tracking nicht umgangen werden kann.
//!
//! Handles sind kurzlebig: nach einem Granularitätswechsel ändert sich die
//! Gruppenzugehörigkeit, daher wird pro Refresh neu nachgeschlagen statt gecacht.

use super::{Marker, MarkerKey, Rgba, SelectableCollection};
use glam::Vec2;

/// Fehler bei Mitglieder-Zugriffen über ein Handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    /// Index außerhalb von `0..member_count()`.
    #[error("Mitglied {index} existiert nicht (Anzahl: {count})")]
    OutOfRange { index: usize, count: usize },
    /// Das Handle verweist auf einen Marker, der nicht mehr in der Collection liegt.
    #[error("Handle verweist auf entfernten Marker {0:?}")]
    Dangling(MarkerKey),
}

/// Nicht-leere, geordnete Liste von Handles.
///
/// Kann nur über [`MarkerHandle::grouped`] entstehen, das bei null
/// Mitgliedern `Empty` liefert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleGroup {
    members: Vec<MarkerHandle>,
}

impl HandleGroup {
    /// Alle Mitglieder in Listenreihenfolge.
    pub fn members(&self) -> &[MarkerHandle] {
        &self.members
    }

    /// Repräsentant der Gruppe (erstes Mitglied).
    pub fn first(&self) -> &MarkerHandle {
        self.members.first().unwrap_or(&EMPTY_HANDLE)
    }
}

static EMPTY_HANDLE: MarkerHandle = MarkerHandle::Empty;

/// Polymorphe Referenz auf keinen, einen oder mehrere Marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MarkerHandle {
    /// Sentinel für fehlgeschlagene Lookups: Abfragen liefern neutrale Werte,
    /// Mutationen sind No-ops.
    #[default]
    Empty,
    /// Genau ein Marker.
    Single(MarkerKey),
    /// Mehrere Handles: Mutationen werden an alle verteilt, skalare Getter
    /// lesen vom ersten Mitglied.
    Grouped(HandleGroup),
}

impl MarkerHandle {
    /// Baut ein gruppiertes Handle.
    ///
    /// Leere Mitglieder werden verworfen; bleibt nichts übrig, entsteht
    /// `Empty` statt einer leeren Gruppe.
    pub fn grouped(members: impl IntoIterator<Item = MarkerHandle>) -> Self {
        let members: Vec<MarkerHandle> = members.into_iter().filter(|m| !m.is_empty()).collect();

        if members.is_empty() {
            log::debug!("Gruppiertes Handle ohne Mitglieder angefragt, verwende Empty");
            return Self::Empty;
        }

        Self::Grouped(HandleGroup { members })
    }

    /// `true` für das leere Handle.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// `true` für gruppierte Handles.
    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped(_))
    }

    /// Anzahl direkter Mitglieder (Empty: 0, Single: 1, Grouped: Listenlänge).
    pub fn member_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Grouped(group) => group.members.len(),
        }
    }

    /// Direktes Mitglied `index` als Handle.
    pub fn member_handle(&self, index: usize) -> Result<&MarkerHandle, HandleError> {
        let count = self.member_count();
        match self {
            Self::Single(_) if index == 0 => Ok(self),
            Self::Grouped(group) => group
                .members
                .get(index)
                .ok_or(HandleError::OutOfRange { index, count }),
            _ => Err(HandleError::OutOfRange { index, count }),
        }
    }

    /// Schlüssel des Repräsentanten von Mitglied `index`.
    pub fn member_key(&self, index: usize) -> Result<MarkerKey, HandleError> {
        let count = self.member_count();
        self.member_handle(index)?
            .representative_key()
            .ok_or(HandleError::OutOfRange { index, count })
    }

    /// Marker von Mitglied `index`.
    pub fn member<'a, M: Marker>(
        &self,
        collection: &'a SelectableCollection<M>,
        index: usize,
    ) -> Result<&'a M, HandleError> {
        let key = self.member_key(index)?;
        collection.get(key).ok_or(HandleError::Dangling(key))
    }

    /// Schlüssel des Repräsentanten (Grouped: erstes Mitglied).
    pub fn representative_key(&self) -> Option<MarkerKey> {
        match self {
            Self::Empty => None,
            Self::Single(key) => Some(*key),
            Self::Grouped(group) => group.first().representative_key(),
        }
    }

    /// Alle konkreten Schlüssel in Listenreihenfolge (verschachtelte Gruppen werden aufgelöst).
    pub fn keys(&self) -> Vec<MarkerKey> {
        let mut keys = Vec::with_capacity(self.member_count());
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(&self, keys: &mut Vec<MarkerKey>) {
        match self {
            Self::Empty => {}
            Self::Single(key) => keys.push(*key),
            Self::Grouped(group) => {
                for member in &group.members {
                    member.collect_keys(keys);
                }
            }
        }
    }

    fn representative<'a, M: Marker>(&self, collection: &'a SelectableCollection<M>) -> Option<&'a M> {
        self.representative_key().and_then(|key| collection.get(key))
    }

    /// ID des Repräsentanten, `""` für Empty.
    pub fn id<'a, M: Marker>(&self, collection: &'a SelectableCollection<M>) -> &'a str {
        self.representative(collection)
            .map(|marker| marker.id().as_str())
            .unwrap_or("")
    }

    /// Position des Repräsentanten.
    ///
    /// Für Gruppen ist das nur die Position des ersten Mitglieds und damit
    /// für räumliche Berechnungen über die ganze Gruppe nicht aussagekräftig.
    pub fn location<M: Marker>(&self, collection: &SelectableCollection<M>) -> Option<Vec2> {
        self.representative(collection).map(|marker| marker.location())
    }

    /// Selektions-Flag des Repräsentanten (Empty: `false`).
    pub fn is_selected<M: Marker>(&self, collection: &SelectableCollection<M>) -> bool {
        self.representative(collection)
            .is_some_and(|marker| marker.is_selected())
    }

    /// Hidden-Flag des Repräsentanten (Empty: `true`).
    pub fn is_hidden<M: Marker>(&self, collection: &SelectableCollection<M>) -> bool {
        self.representative(collection)
            .is_none_or(|marker| marker.is_hidden())
    }

    /// Distanz des Repräsentanten zur Position (Empty: 0).
    pub fn distance_to<M: Marker>(&self, collection: &SelectableCollection<M>, point: Vec2) -> f32 {
        self.representative(collection)
            .map(|marker| marker.distance_to(point))
            .unwrap_or(0.0)
    }

    /// Setzt die Selektion aller referenzierten Marker.
    pub fn set_selected<M: Marker>(&self, collection: &mut SelectableCollection<M>, selected: bool) {
        for key in self.keys() {
            if let Err(e) = collection.set_selected(key, selected) {
                log::warn!("Selektion über veraltetes Handle ignoriert: {}", e);
            }
        }
    }

    /// Setzt das Hidden-Flag aller referenzierten Marker.
    pub fn set_hidden<M: Marker>(&self, collection: &mut SelectableCollection<M>, hidden: bool) {
        self.update(collection, |marker| marker.set_hidden(hidden));
    }

    /// Setzt die Farbe aller referenzierten Marker.
    pub fn set_color<M: Marker>(&self, collection: &mut SelectableCollection<M>, color: Rgba) {
        self.update(collection, |marker| marker.set_color(color));
    }

    /// Setzt die Linienstärke aller referenzierten Marker.
    pub fn set_stroke_width<M: Marker>(&self, collection: &mut SelectableCollection<M>, width: f32) {
        self.update(collection, |marker| marker.set_stroke_width(width));
    }

    /// Verteilt eine beliebige Mutation auf alle referenzierten Marker.
    pub fn update<M: Marker>(
        &self,
        collection: &mut SelectableCollection<M>,
        mut mutate: impl FnMut(&mut M),
    ) {
        for key in self.keys() {
            if let Err(e) = collection.update(key, &mut mutate) {
                log::warn!("Mutation über veraltetes Handle ignoriert: {}", e);
            }
        }
    }
}
