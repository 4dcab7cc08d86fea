//! Zeichen-Szene als expliziter Übergabevertrag zwischen Karten-Ansicht und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und ein externer Renderer sie
//! konsumiert. Die Reihenfolge der Listen ist die Zeichenreihenfolge.

use crate::core::{EdgeKey, MarkerId, Rgba};
use glam::Vec2;
use std::sync::Arc;

/// Zeichendaten eines Knotens.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDrawItem {
    pub id: MarkerId,
    /// Aktuelles Label (folgt der Identitätsphase)
    pub label: String,
    pub position: Vec2,
    /// Radius des Aufklapp-Rings (0 = nur Punkt)
    pub ring_radius: f32,
    pub ring_stroke_width: f32,
    pub label_alpha: f32,
    pub opacity: f32,
    pub color: Rgba,
    /// Direkt selektiert oder über selektierte Kanten
    pub selected: bool,
}

/// Zeichendaten einer Kante.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDrawItem {
    pub key: EdgeKey,
    pub start: Vec2,
    pub end: Vec2,
    pub width: f32,
    pub opacity: f32,
    pub color: Rgba,
    pub selected: bool,
}

/// Read-only Daten für einen Frame.
///
/// Kanten werden vor Knoten gezeichnet, innerhalb jeder Liste unselektierte
/// vor selektierten.
#[derive(Debug, Clone, Default)]
pub struct DrawScene {
    /// Grobe Darstellung (Länder) aktiv
    pub coarse: bool,
    /// Kanten in Zeichenreihenfolge
    pub edges: Arc<Vec<EdgeDrawItem>>,
    /// Knoten in Zeichenreihenfolge
    pub nodes: Arc<Vec<NodeDrawItem>>,
    /// Mindestens eine Animation läuft noch
    pub animating: bool,
}

impl DrawScene {
    /// Gibt zurück, ob überhaupt etwas zu zeichnen ist.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.nodes.is_empty()
    }

    /// Knoten-Eintrag mit der gegebenen ID.
    pub fn node(&self, id: &str) -> Option<&NodeDrawItem> {
        self.nodes.iter().find(|item| item.id.as_str() == id)
    }

    /// Kanten-Eintrag mit dem gegebenen Schlüssel.
    pub fn edge(&self, key: &EdgeKey) -> Option<&EdgeDrawItem> {
        self.edges.iter().find(|item| &item.key == key)
    }
}
