//! Coop Map Viewer.
//!
//! Headless-Lauf der Kooperations-Karte: lädt einen Datensatz (Pfad als
//! erstes Argument, sonst den mitgelieferten Beispiel-Datensatz), spielt
//! eine Folge typischer Eingaben ab und loggt die resultierenden Szenen.

use std::path::Path;
use std::sync::Arc;

use coop_map_viewer::{
    Dataset, DrawScene, InMemoryDataProvider, MapController, MapIntent, MarkerId, ViewerOptions,
};

/// Mitgelieferter Beispiel-Datensatz.
const BUNDLED_DATASET: &str = include_str!("../demos/sample_dataset.json");

/// Obergrenze der Frames, bis alle Animationen ausgelaufen sein müssen.
const MAX_SETTLE_FRAMES: usize = 10_000;

fn main() -> anyhow::Result<()> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Coop Map Viewer v{} startet...", env!("CARGO_PKG_VERSION"));

        let options = ViewerOptions::load_from_file(&ViewerOptions::config_path());
        let dataset = match std::env::args_os().nth(1) {
            Some(path) => Dataset::load_json(Path::new(&path))?,
            None => {
                log::info!("Kein Datensatz angegeben, verwende Beispiel-Datensatz");
                Dataset::from_json(BUNDLED_DATASET)?
            }
        };

        let provider = Arc::new(InMemoryDataProvider::from_dataset(&dataset));
        let controller = MapController::from_provider(provider, options)?;
        controller.add_click_listener(|id: &MarkerId| {
            log::info!("Organisation angeklickt: {}", id);
        });

        Self::settle(&controller)?;
        Self::log_scene("Start", &controller.draw_scene()?);

        controller.handle_intent(MapIntent::ZoomChanged { level: 3.0 });
        Self::settle(&controller)?;
        Self::log_scene("Länder", &controller.draw_scene()?);

        controller.handle_intent(MapIntent::ZoomChanged { level: 6.0 });
        controller.handle_intent(MapIntent::ConferenceToggled {
            conference: "LAK".to_string(),
            selected: true,
        });
        controller.handle_intent(MapIntent::YearToggled {
            year: 2013,
            selected: true,
        });
        Self::settle(&controller)?;
        Self::log_scene("LAK 2013", &controller.draw_scene()?);

        let scene = controller.draw_scene()?;
        if let Some(node) = scene.nodes.first() {
            let hits = controller.mouse_moved(node.position);
            log::info!(
                "Hover über {}: {} Knoten, {} Kanten",
                node.id,
                hits.nodes.len(),
                hits.edges.len()
            );
            controller.handle_intent(MapIntent::PointerClicked {
                world_pos: node.position,
            });
        }
        Self::settle(&controller)?;
        Self::log_scene("Hover", &controller.draw_scene()?);

        controller.handle_intent(MapIntent::ShowAllRequested);
        Self::settle(&controller)?;
        Self::log_scene("Alle Konferenzen", &controller.draw_scene()?);

        log::info!("Coop Map Viewer beendet");
        Ok(())
    }

    /// Wartet alle Anfragen ab und spielt Frames, bis keine Animation mehr läuft.
    fn settle(controller: &MapController) -> anyhow::Result<()> {
        controller.flush()?;
        let dt = controller.options().frame_interval_secs;
        for frame in 0..MAX_SETTLE_FRAMES {
            if !controller.advance_animations(dt)? {
                log::debug!("Animationen nach {} Frames ausgelaufen", frame);
                return Ok(());
            }
        }
        log::warn!("Animationen nach {} Frames nicht ausgelaufen", MAX_SETTLE_FRAMES);
        Ok(())
    }

    fn log_scene(title: &str, scene: &DrawScene) {
        let selected_nodes = scene.nodes.iter().filter(|n| n.selected).count();
        let selected_edges = scene.edges.iter().filter(|e| e.selected).count();
        log::info!(
            "[{}] grob: {}, {} Knoten ({} selektiert), {} Kanten ({} selektiert)",
            title,
            scene.coarse,
            scene.nodes.len(),
            selected_nodes,
            scene.edges.len(),
            selected_edges
        );
        for edge in scene.edges.iter() {
            log::debug!("  Kante {} Breite {:.1}", edge.key, edge.width);
        }
    }
}
