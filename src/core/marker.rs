//! Gemeinsame Fähigkeiten aller konkreten Marker (Nodes und Kanten).

use super::MarkerId;
use glam::Vec2;

/// RGBA-Farbe (0.0..=1.0 pro Kanal).
pub type Rgba = [f32; 4];

/// Vertrag eines konkreten, zeichenbaren Markers.
///
/// Marker werden nie direkt geteilt; Zugriffe laufen über
/// [`super::SelectableCollection`] und [`super::MarkerHandle`].
pub trait Marker {
    /// Stabile ID des Markers.
    fn id(&self) -> &MarkerId;

    /// Aktuelle Position in Weltkoordinaten.
    fn location(&self) -> Vec2;

    /// Direktes Selektions-Flag.
    fn is_selected(&self) -> bool;

    /// Setzt das direkte Selektions-Flag.
    fn set_selected(&mut self, selected: bool);

    /// Selektion, nach der gezeichnet und einsortiert wird.
    ///
    /// Standard: identisch mit [`Marker::is_selected`].
    fn is_effectively_selected(&self) -> bool {
        self.is_selected()
    }

    fn is_hidden(&self) -> bool;

    fn set_hidden(&mut self, hidden: bool);

    fn set_color(&mut self, color: Rgba);

    fn set_stroke_width(&mut self, width: f32);

    /// Euklidische Distanz zur gegebenen Position.
    fn distance_to(&self, point: Vec2) -> f32 {
        self.location().distance(point)
    }
}
