//! Kooperations-Kante zwischen zwei Knoten.

use super::animation::{AnimationSettings, Easing, Tween};
use super::{EdgeKey, Marker, MarkerId, Rgba};
use glam::Vec2;

/// Kante zwischen zwei Knoten, identifiziert über das ungeordnete Namenspaar.
#[derive(Debug, Clone)]
pub struct EdgeMarker {
    key: EdgeKey,
    id: MarkerId,
    /// Start-Position (Position des ersten Endpunkts)
    pub start: Vec2,
    /// End-Position (Position des zweiten Endpunkts)
    pub end: Vec2,
    /// Mittelpunkt der Kante
    pub midpoint: Vec2,
    /// Winkel der Kante (Radiant)
    pub angle: f32,

    width: f32,
    width_tween: Option<Tween>,

    selected: bool,
    hidden: bool,
    opacity: f32,
    opacity_tween: Option<Tween>,

    color: Rgba,
    animation: AnimationSettings,
}

impl EdgeMarker {
    /// Erstellt eine sichtbare, unselektierte Kante.
    pub fn new(
        key: EdgeKey,
        start: Vec2,
        end: Vec2,
        width: f32,
        animation: AnimationSettings,
    ) -> Self {
        let (midpoint, angle) = Self::calculate_geometry(start, end);

        Self {
            id: MarkerId::new(key.to_string()),
            key,
            start,
            end,
            midpoint,
            angle,
            width,
            width_tween: None,
            selected: false,
            hidden: false,
            opacity: 1.0,
            opacity_tween: None,
            color: [0.0, 0.0, 0.0, 1.0],
            animation,
        }
    }

    /// Ungeordnetes Namenspaar der Endpunkte.
    pub fn key(&self) -> &EdgeKey {
        &self.key
    }

    /// Aktuelle (ggf. animierte) Linienbreite.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Breite, auf die gerade animiert wird (oder die aktuelle Breite).
    pub fn target_width(&self) -> f32 {
        self.width_tween
            .as_ref()
            .map(Tween::target)
            .unwrap_or(self.width)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Setzt die Breite sofort und bricht eine laufende Breiten-Animation ab.
    pub fn set_width(&mut self, width: f32) {
        self.width_tween = None;
        self.width = width;
    }

    /// Animiert die Breite von ihrem aktuellen Wert zum Ziel.
    pub fn set_width_animated(&mut self, width: f32) {
        if !self.animation.enabled {
            self.set_width(width);
            return;
        }
        self.width_tween = Some(Tween::new(
            self.width,
            width,
            self.animation.duration_secs,
            Easing::Linear,
        ));
    }

    /// Versteckt/zeigt die Kante ohne Überblendung.
    pub fn set_hidden_immediately(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.opacity_tween = None;
        self.opacity = if hidden { 0.0 } else { 1.0 };
    }

    /// Aktualisiert die Geometrie auf Basis der Endpunkt-Positionen.
    pub fn update_geometry(&mut self, start: Vec2, end: Vec2) {
        let (midpoint, angle) = Self::calculate_geometry(start, end);
        self.start = start;
        self.end = end;
        self.midpoint = midpoint;
        self.angle = angle;
    }

    fn calculate_geometry(start: Vec2, end: Vec2) -> (Vec2, f32) {
        let midpoint = (start + end) * 0.5;
        let delta = end - start;
        let angle = delta.y.atan2(delta.x);

        (midpoint, angle)
    }

    /// `true`, solange Breite oder Deckkraft animiert werden.
    pub fn is_animating(&self) -> bool {
        self.width_tween.is_some() || self.opacity_tween.is_some()
    }

    /// Prüft ob die Position auf der Linie liegt (Abstand kleiner als die Breite).
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.distance_to(point) < self.width
    }

    /// Schreibt Breiten- und Deckkraft-Animation um `dt` Sekunden fort.
    pub fn tick(&mut self, dt: f32) -> bool {
        if let Some(tween) = self.width_tween.as_mut() {
            self.width = tween.advance(dt);
            if tween.is_finished() {
                self.width_tween = None;
            }
        }

        if let Some(tween) = self.opacity_tween.as_mut() {
            self.opacity = tween.advance(dt);
            if tween.is_finished() {
                self.opacity_tween = None;
            }
        }

        self.is_animating()
    }
}

impl Marker for EdgeMarker {
    fn id(&self) -> &MarkerId {
        &self.id
    }

    fn location(&self) -> Vec2 {
        self.midpoint
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        if hidden == self.hidden {
            return;
        }
        if !self.animation.enabled {
            self.set_hidden_immediately(hidden);
            return;
        }
        self.hidden = hidden;
        let target = if hidden { 0.0 } else { 1.0 };
        let easing = if hidden { Easing::QuadOut } else { Easing::QuadIn };
        self.opacity_tween = Some(Tween::new(
            self.opacity,
            target,
            self.animation.duration_secs,
            easing,
        ));
    }

    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.set_width(width);
    }

    /// Abstand zur Strecke zwischen den Endpunkten.
    fn distance_to(&self, point: Vec2) -> f32 {
        let segment = self.end - self.start;
        let length_sq = segment.length_squared();
        if length_sq <= f32::EPSILON {
            return self.start.distance(point);
        }
        let t = ((point - self.start).dot(segment) / length_sq).clamp(0.0, 1.0);
        (self.start + segment * t).distance(point)
    }
}
