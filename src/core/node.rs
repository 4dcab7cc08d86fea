//! Knoten-Marker mit zwei austauschbaren Identitäten (z.B. Organisation / Land).
//!
//! Zwei unabhängige Zustandsachsen:
//! - Identität: `AtFirst → MovingToSecond → AtSecond → MovingToFirst`,
//!   die Position folgt dem kontinuierlichen Fortschritt, das Label nur der Phase.
//! - Darstellung: `Hidden → Appearing → Shown → Disappearing`, getrieben von der
//!   effektiven Selektion (direkt selektiert ODER mindestens eine selektierte Kante).

use super::animation::{AnimationSettings, Easing, Tween};
use super::{Marker, MarkerId, Rgba};
use glam::Vec2;

/// Radius des aufgeklappten Rings.
pub const EXPANDED_RADIUS: f32 = 44.0;
/// Linienstärke des vollständig aufgeklappten Rings.
pub const EXPANDED_STROKE_WIDTH: f32 = 12.0;
/// Standard-Radius des Punkt-Markers.
pub const POINT_RADIUS: f32 = 10.0;
/// Anteil der Aufklapp-Animation, in dem der Ring wächst; der Rest blendet das Label ein.
const RING_SHARE: f32 = 0.8;

/// Label und Position einer Identität.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub label: String,
    pub location: Vec2,
}

impl Identity {
    pub fn new(label: impl Into<String>, location: Vec2) -> Self {
        Self {
            label: label.into(),
            location,
        }
    }
}

/// Phase der Identitätsachse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchPhase {
    AtFirst,
    MovingToSecond,
    AtSecond,
    MovingToFirst,
}

/// Phase der Darstellungsachse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandPhase {
    Hidden,
    Appearing,
    Shown,
    Disappearing,
}

/// Umschaltbarer Knoten-Marker.
#[derive(Debug, Clone)]
pub struct NodeMarker {
    id: MarkerId,
    first: Identity,
    second: Identity,
    location: Vec2,

    switch_phase: SwitchPhase,
    switch_progress: f32,
    switch_tween: Option<Tween>,

    expand_phase: ExpandPhase,
    expand_progress: f32,
    expand_tween: Option<Tween>,

    selected: bool,
    selected_line_count: u32,

    hidden: bool,
    opacity: f32,
    opacity_tween: Option<Tween>,

    color: Rgba,
    stroke_width: f32,
    point_radius: f32,
    animation: AnimationSettings,
}

impl NodeMarker {
    /// Erstellt einen Knoten, der bei `show_second` direkt in der zweiten Identität startet.
    ///
    /// Die ID ist das Label der ersten Identität.
    pub fn new(
        first: Identity,
        second: Identity,
        show_second: bool,
        animation: AnimationSettings,
    ) -> Self {
        let (switch_phase, switch_progress, location) = if show_second {
            (SwitchPhase::AtSecond, 1.0, second.location)
        } else {
            (SwitchPhase::AtFirst, 0.0, first.location)
        };

        Self {
            id: MarkerId::new(first.label.clone()),
            first,
            second,
            location,
            switch_phase,
            switch_progress,
            switch_tween: None,
            expand_phase: ExpandPhase::Hidden,
            expand_progress: 0.0,
            expand_tween: None,
            selected: false,
            selected_line_count: 0,
            hidden: false,
            opacity: 1.0,
            opacity_tween: None,
            color: [0.0, 0.0, 0.0, 1.0],
            stroke_width: 1.0,
            point_radius: POINT_RADIUS,
            animation,
        }
    }

    pub fn first(&self) -> &Identity {
        &self.first
    }

    pub fn second(&self) -> &Identity {
        &self.second
    }

    pub fn switch_phase(&self) -> SwitchPhase {
        self.switch_phase
    }

    /// Fortschritt der Identitätsumschaltung (0 = erste, 1 = zweite Identität).
    pub fn switch_progress(&self) -> f32 {
        self.switch_progress
    }

    pub fn expand_phase(&self) -> ExpandPhase {
        self.expand_phase
    }

    /// Fortschritt der Aufklapp-Animation in `0.0..=1.0`.
    pub fn expand_progress(&self) -> f32 {
        self.expand_progress
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Anzahl aktuell selektierter Kanten an diesem Knoten.
    pub fn selected_line_count(&self) -> u32 {
        self.selected_line_count
    }

    /// Aktuelles Label: zweites nur in `AtSecond`, sonst das erste.
    pub fn current_label(&self) -> &str {
        if self.switch_phase == SwitchPhase::AtSecond {
            &self.second.label
        } else {
            &self.first.label
        }
    }

    /// `true`, solange irgendein Tween läuft.
    pub fn is_animating(&self) -> bool {
        self.switch_tween.is_some() || self.expand_tween.is_some() || self.opacity_tween.is_some()
    }

    /// Schaltet zur zweiten (`true`) bzw. ersten Identität.
    ///
    /// Ist der Knoten bereits dort oder unterwegs dorthin, passiert nichts.
    pub fn switch_to_second(&mut self, to_second: bool) {
        let already_there = if to_second {
            matches!(
                self.switch_phase,
                SwitchPhase::AtSecond | SwitchPhase::MovingToSecond
            )
        } else {
            matches!(
                self.switch_phase,
                SwitchPhase::AtFirst | SwitchPhase::MovingToFirst
            )
        };
        if already_there {
            return;
        }

        let target = if to_second { 1.0 } else { 0.0 };

        if !self.animation.enabled {
            self.switch_tween = None;
            self.switch_progress = target;
            self.switch_phase = if to_second {
                SwitchPhase::AtSecond
            } else {
                SwitchPhase::AtFirst
            };
            self.update_location();
            return;
        }

        self.switch_phase = if to_second {
            SwitchPhase::MovingToSecond
        } else {
            SwitchPhase::MovingToFirst
        };
        self.switch_tween = Some(Tween::new(
            self.switch_progress,
            target,
            self.animation.duration_secs,
            Easing::Linear,
        ));
    }

    /// Zählt eine weitere selektierte Kante an diesem Knoten.
    pub fn add_selected_line(&mut self) {
        self.selected_line_count += 1;
        self.on_selection_changed();
    }

    /// Nimmt eine selektierte Kante weg; der Zähler bleibt bei 0 stehen.
    pub fn remove_selected_line(&mut self) {
        self.selected_line_count = self.selected_line_count.saturating_sub(1);
        self.on_selection_changed();
    }

    /// Startet bei Bedarf die Auf-/Zuklapp-Animation passend zur effektiven Selektion.
    fn on_selection_changed(&mut self) {
        let effective = self.is_effectively_selected();

        if !self.animation.enabled {
            self.expand_tween = None;
            (self.expand_phase, self.expand_progress) = if effective {
                (ExpandPhase::Shown, 1.0)
            } else {
                (ExpandPhase::Hidden, 0.0)
            };
            return;
        }

        match (effective, self.expand_phase) {
            (true, ExpandPhase::Hidden | ExpandPhase::Disappearing) => {
                self.expand_phase = ExpandPhase::Appearing;
                self.expand_tween = Some(Tween::new(
                    self.expand_progress,
                    1.0,
                    self.animation.duration_secs,
                    Easing::QuadIn,
                ));
            }
            (false, ExpandPhase::Appearing | ExpandPhase::Shown) => {
                self.expand_phase = ExpandPhase::Disappearing;
                self.expand_tween = Some(Tween::new(
                    self.expand_progress,
                    0.0,
                    self.animation.duration_secs,
                    Easing::QuadOut,
                ));
            }
            _ => {}
        }
    }

    /// Schreibt alle laufenden Animationen um `dt` Sekunden fort.
    ///
    /// Gibt `true` zurück, solange noch eine Animation läuft.
    pub fn tick(&mut self, dt: f32) -> bool {
        if let Some(tween) = self.switch_tween.as_mut() {
            self.switch_progress = tween.advance(dt);
            if tween.is_finished() {
                self.switch_tween = None;
                self.switch_phase = match self.switch_phase {
                    SwitchPhase::MovingToSecond => SwitchPhase::AtSecond,
                    SwitchPhase::MovingToFirst => SwitchPhase::AtFirst,
                    settled => settled,
                };
            }
            self.update_location();
        }

        if let Some(tween) = self.expand_tween.as_mut() {
            self.expand_progress = tween.advance(dt);
            if tween.is_finished() {
                self.expand_tween = None;
                self.expand_phase = match self.expand_phase {
                    ExpandPhase::Appearing => ExpandPhase::Shown,
                    ExpandPhase::Disappearing => ExpandPhase::Hidden,
                    settled => settled,
                };
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

    fn update_location(&mut self) {
        self.location = match self.switch_phase {
            SwitchPhase::AtFirst => self.first.location,
            SwitchPhase::AtSecond => self.second.location,
            SwitchPhase::MovingToSecond | SwitchPhase::MovingToFirst => self
                .first
                .location
                .lerp(self.second.location, self.switch_progress),
        };
    }

    fn ring_step(&self) -> f32 {
        self.expand_progress.min(RING_SHARE) / RING_SHARE
    }

    /// Radius des aufgeklappten Rings.
    pub fn expand_radius(&self) -> f32 {
        EXPANDED_RADIUS * self.ring_step()
    }

    /// Linienstärke des Rings, wächst vom Punkt-Radius auf die volle Ringstärke.
    pub fn ring_stroke_width(&self) -> f32 {
        self.point_radius + (EXPANDED_STROKE_WIDTH - self.point_radius) * self.ring_step()
    }

    /// Deckkraft des Labels (erst im letzten Teil der Aufklapp-Animation).
    pub fn label_alpha(&self) -> f32 {
        ((self.expand_progress - RING_SHARE).max(0.0) / (1.0 - RING_SHARE)).min(1.0)
    }

    /// Trefferradius für Hover/Klick.
    pub fn hit_radius(&self) -> f32 {
        if self.expand_phase == ExpandPhase::Hidden {
            self.point_radius
        } else {
            (self.expand_radius() - self.ring_stroke_width())
                .abs()
                .max(self.point_radius)
        }
    }

    /// Prüft ob die Position den Knoten trifft.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.location.distance(point) < self.hit_radius()
    }
}

impl Marker for NodeMarker {
    fn id(&self) -> &MarkerId {
        &self.id
    }

    fn location(&self) -> Vec2 {
        self.location
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        if selected == self.selected {
            return;
        }
        self.selected = selected;
        self.on_selection_changed();
    }

    /// Direkt selektiert oder mindestens eine selektierte Kante.
    fn is_effectively_selected(&self) -> bool {
        self.selected || self.selected_line_count > 0
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        if hidden == self.hidden {
            return;
        }
        self.hidden = hidden;

        if !self.animation.enabled {
            self.opacity_tween = None;
            self.opacity = if hidden { 0.0 } else { 1.0 };
            return;
        }

        let duration = self.animation.duration_secs;
        self.opacity_tween = Some(if hidden {
            // Ausblenden erst nach einer Animationsdauer
            Tween::delayed(self.opacity, 0.0, duration, duration, Easing::QuadOut)
        } else {
            Tween::new(self.opacity, 1.0, duration, Easing::QuadIn)
        });
    }

    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }
}
