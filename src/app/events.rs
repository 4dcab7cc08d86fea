//! Eingaben aus UI/System an die Karte.

use glam::Vec2;

use crate::core::{EdgeKey, MarkerId};

/// Karten-Intent.
/// Intents beschreiben Eingaben ohne eigene Mutationslogik; der Controller
/// übersetzt sie in Anfragen an die Karten-Ansicht.
#[derive(Debug, Clone, PartialEq)]
pub enum MapIntent {
    /// Zoom-Stufe der Kamera hat sich geändert
    ZoomChanged { level: f32 },
    /// Granularität explizit setzen (`true` = Länder)
    GranularityRequested { coarse: bool },
    /// Mauszeiger bewegt (Weltkoordinaten)
    PointerMoved { world_pos: Vec2 },
    /// Mausklick (Weltkoordinaten)
    PointerClicked { world_pos: Vec2 },
    /// Organisation von außen (Liste, Chart) selektieren bzw. abwählen
    OrganizationSelectionRequested { id: MarkerId, selected: bool },
    /// Kooperation von außen selektieren bzw. abwählen
    CooperationSelectionRequested { key: EdgeKey, selected: bool },
    /// Konferenz in der Auswahl an-/abgewählt
    ConferenceToggled { conference: String, selected: bool },
    /// Jahr in der Auswahl an-/abgewählt
    YearToggled { year: i32, selected: bool },
    /// Gesamten Datenbestand zeigen (Auswahl bleibt erhalten)
    ShowAllRequested,
}
