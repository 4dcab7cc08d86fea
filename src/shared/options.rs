//! Zentrale Konfiguration für den Kooperations-Kartenviewer.
//!
//! `ViewerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::core::AnimationSettings;

// ── Granularität ────────────────────────────────────────────────────

/// Zoom-Stufe, bis zu der (einschließlich) grob nach Ländern aggregiert wird.
pub const COARSE_ZOOM_THRESHOLD: f32 = 4.0;

// ── Animation ───────────────────────────────────────────────────────

/// Dauer einer Marker-Animation in Sekunden.
pub const ANIMATION_DURATION_SECS: f32 = 0.5;
/// Zeitschritt eines Animations-Ticks im Demo-Lauf (60 Hz).
pub const FRAME_INTERVAL_SECS: f32 = 1.0 / 60.0;

// ── Knoten ──────────────────────────────────────────────────────────

/// Standard-Farbe der Knoten (RGBA: Dunkelblau).
pub const NODE_COLOR_DEFAULT: [f32; 4] = [0.1, 0.2, 0.6, 0.9];
/// Farbe effektiv selektierter Knoten (RGBA: Orange).
pub const NODE_COLOR_SELECTED: [f32; 4] = [1.0, 0.55, 0.0, 1.0];

// ── Kanten ──────────────────────────────────────────────────────────

/// Standard-Farbe der Kanten (RGBA: Grau, halbtransparent).
pub const EDGE_COLOR_DEFAULT: [f32; 4] = [0.3, 0.3, 0.3, 0.6];
/// Farbe selektierter Kanten (RGBA: Orange).
pub const EDGE_COLOR_SELECTED: [f32; 4] = [1.0, 0.55, 0.0, 1.0];
/// Linienbreite pro Kooperation.
pub const EDGE_WIDTH_PER_WEIGHT: f32 = 1.0;
/// Obergrenze der Linienbreite.
pub const EDGE_WIDTH_MAX: f32 = 20.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Viewer-Optionen.
/// Wird als `coop_map_viewer.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerOptions {
    // ── Granularität ─────────────────────────────────────────────
    /// Zoom-Stufe, bis zu der Länder statt Organisationen gezeigt werden
    pub coarse_zoom_threshold: f32,

    // ── Animation ────────────────────────────────────────────────
    /// Animationen aktiv (sonst springen alle Zustände sofort)
    pub animated: bool,
    /// Dauer einer Animation in Sekunden
    pub animation_duration_secs: f32,
    /// Tick-Intervall des Demo-Laufs in Sekunden
    #[serde(default = "default_frame_interval_secs")]
    pub frame_interval_secs: f32,

    // ── Knoten ───────────────────────────────────────────────────
    /// Standard-Farbe der Knoten (RGBA)
    pub node_color_default: [f32; 4],
    /// Farbe effektiv selektierter Knoten (RGBA)
    pub node_color_selected: [f32; 4],

    // ── Kanten ───────────────────────────────────────────────────
    /// Standard-Farbe der Kanten (RGBA)
    pub edge_color_default: [f32; 4],
    /// Farbe selektierter Kanten (RGBA)
    pub edge_color_selected: [f32; 4],
    /// Linienbreite pro Kooperation
    pub edge_width_per_weight: f32,
    /// Obergrenze der Linienbreite
    #[serde(default = "default_edge_width_max")]
    pub edge_width_max: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            coarse_zoom_threshold: COARSE_ZOOM_THRESHOLD,

            animated: true,
            animation_duration_secs: ANIMATION_DURATION_SECS,
            frame_interval_secs: FRAME_INTERVAL_SECS,

            node_color_default: NODE_COLOR_DEFAULT,
            node_color_selected: NODE_COLOR_SELECTED,

            edge_color_default: EDGE_COLOR_DEFAULT,
            edge_color_selected: EDGE_COLOR_SELECTED,
            edge_width_per_weight: EDGE_WIDTH_PER_WEIGHT,
            edge_width_max: EDGE_WIDTH_MAX,
        }
    }
}

/// Serde-Default für `frame_interval_secs` (Abwärtskompatibilität).
fn default_frame_interval_secs() -> f32 {
    FRAME_INTERVAL_SECS
}

/// Serde-Default für `edge_width_max` (Abwärtskompatibilität).
fn default_edge_width_max() -> f32 {
    EDGE_WIDTH_MAX
}

impl ViewerOptions {
    /// Optionen ohne Animation (Zustände wechseln sofort).
    pub fn instant() -> Self {
        Self {
            animated: false,
            ..Self::default()
        }
    }

    /// Lädt Optionen aus einer TOML-Datei oder gibt Standardwerte zurück.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("coop-map-viewer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("coop_map_viewer.toml")
    }

    /// Animations-Einstellungen für neu erzeugte Marker.
    pub fn animation_settings(&self) -> AnimationSettings {
        if self.animated {
            AnimationSettings {
                enabled: true,
                duration_secs: self.animation_duration_secs,
            }
        } else {
            AnimationSettings::INSTANT
        }
    }

    /// `true`, wenn die Zoom-Stufe die grobe Darstellung verlangt.
    pub fn is_coarse_zoom(&self, zoom_level: f32) -> bool {
        zoom_level <= self.coarse_zoom_threshold
    }

    /// Linienbreite einer Kante mit `weight` Kooperationen.
    pub fn edge_width_for(&self, weight: u32) -> f32 {
        (weight as f32 * self.edge_width_per_weight).min(self.edge_width_max)
    }
}
