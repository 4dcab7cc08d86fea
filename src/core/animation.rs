//! Zeitbasierte Interpolation (Tweens) für Marker-Animationen.
//!
//! Ein Tween gehört immer genau einem Marker und wird über `advance(dt)`
//! fortgeschrieben; es gibt keine Timer-Threads.

/// Easing-Kurven der Animationen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Langsamer Start (t²)
    QuadIn,
    /// Langsames Ende (1 - (1 - t)²)
    QuadOut,
}

impl Easing {
    /// Wendet die Kurve auf `t` in `0.0..=1.0` an.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Animations-Einstellungen eines Markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// Ohne Animation springen alle Zustände sofort ans Ziel.
    pub enabled: bool,
    /// Dauer einer Animation in Sekunden
    pub duration_secs: f32,
}

impl AnimationSettings {
    /// Sofortige Zustandswechsel ohne Animation.
    pub const INSTANT: Self = Self {
        enabled: false,
        duration_secs: 0.0,
    };
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_secs: 0.5,
        }
    }
}

/// Laufende Interpolation eines Skalars von `from` nach `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    delay: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    /// Startet einen Tween ohne Verzögerung.
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::delayed(from, to, duration, 0.0, easing)
    }

    /// Startet einen Tween, der erst nach `delay` Sekunden losläuft.
    pub fn delayed(from: f32, to: f32, duration: f32, delay: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            delay: delay.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Zielwert des Tweens.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Aktueller Wert.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let running = self.elapsed - self.delay;
        if running <= 0.0 {
            return self.from;
        }
        let t = self.easing.apply(running / self.duration);
        self.from + (self.to - self.from) * t
    }

    /// `true`, sobald der Zielwert erreicht ist.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }

    /// Schreibt den Tween um `dt` Sekunden fort und liefert den neuen Wert.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.delay + self.duration);
        }
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_tween_reaches_target() {
        let mut tween = Tween::new(0.0, 1.0, 0.5, Easing::Linear);

        assert_relative_eq!(tween.advance(0.25), 0.5);
        assert!(!tween.is_finished());
        assert_relative_eq!(tween.advance(1.0), 1.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_delayed_tween_holds_start_value() {
        let mut tween = Tween::delayed(1.0, 0.0, 0.5, 0.5, Easing::QuadOut);

        assert_relative_eq!(tween.advance(0.4), 1.0);
        assert!(tween.advance(0.35) < 1.0);
        tween.advance(1.0);
        assert!(tween.is_finished());
        assert_relative_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let tween = Tween::new(0.0, 1.0, 0.0, Easing::QuadIn);
        assert!(tween.is_finished());
        assert_relative_eq!(tween.value(), 1.0);
    }

    #[test]
    fn test_easing_curves_keep_endpoints() {
        for easing in [Easing::Linear, Easing::QuadIn, Easing::QuadOut] {
            assert_relative_eq!(easing.apply(0.0), 0.0);
            assert_relative_eq!(easing.apply(1.0), 1.0);
        }
        assert!(Easing::QuadIn.apply(0.5) < 0.5);
        assert!(Easing::QuadOut.apply(0.5) > 0.5);
    }
}
