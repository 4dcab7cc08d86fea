//! Map-Controller: nimmt Eingaben beliebiger Threads entgegen und reiht die
//! Arbeit auf dem Worker der Karten-Ansicht ein.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;

use super::conference_filter::{ConferenceSelection, FilterScope};
use super::data_provider::{ConferenceCatalog, DataProvider, InMemoryDataProvider};
use super::events::MapIntent;
use super::map_view::{HitPublisher, MapView};
use super::requests::ViewRequests;
use super::use_cases;
use crate::core::{EdgeKey, HitSet, HitSnapshot, MarkerId};
use crate::shared::{DrawScene, ViewerOptions};
use crate::task::{DebounceScheduler, TaskError, WorkerQueue};

/// Empfänger für Klicks auf genau eine Organisation.
pub trait ClickListener: Send {
    fn organization_clicked(&mut self, id: &MarkerId);
}

impl<F> ClickListener for F
where
    F: FnMut(&MarkerId) + Send,
{
    fn organization_clicked(&mut self, id: &MarkerId) {
        self(id)
    }
}

type Listeners = Vec<Box<dyn ClickListener>>;

/// Orchestriert Eingaben, Anfrage-Eingang und Worker der Karte.
///
/// Alle Methoden sind aus beliebigen Threads aufrufbar und kehren sofort
/// zurück; nur `query`, `draw_scene`, `advance_animations` und `flush`
/// warten auf den Worker.
pub struct MapController {
    map: WorkerQueue<MapView>,
    listeners: WorkerQueue<Listeners>,
    refresh: DebounceScheduler<MapView>,
    hover: DebounceScheduler<MapView>,
    requests: ViewRequests,
    hits: HitPublisher,
    selection: Mutex<ConferenceSelection>,
    catalog: Arc<dyn ConferenceCatalog>,
    options: ViewerOptions,
}

impl MapController {
    /// Startet die Worker und reiht das Befüllen der Karte ein.
    pub fn new(
        provider: Arc<dyn DataProvider>,
        catalog: Arc<dyn ConferenceCatalog>,
        options: ViewerOptions,
    ) -> anyhow::Result<Self> {
        let hits = HitPublisher::new();
        let view = MapView::new(provider, options.clone(), hits.clone());

        let map = WorkerQueue::spawn("map-worker", view)?;
        let listeners = WorkerQueue::spawn("map-listeners", Listeners::new())?;
        let requests = ViewRequests::new();

        let refresh = {
            let requests = requests.clone();
            DebounceScheduler::new("refresh", map.clone(), move |view: &mut MapView| {
                use_cases::refresh::apply_pending(view, &requests);
                Ok(())
            })
        };
        let hover = {
            let requests = requests.clone();
            DebounceScheduler::new("mouse-moved", map.clone(), move |view: &mut MapView| {
                use_cases::hover::apply_pending(view, &requests);
                Ok(())
            })
        };

        let _ = map.submit("populate", |view| {
            view.populate();
            Ok(())
        });

        log::info!("Map-Controller gestartet");

        Ok(Self {
            map,
            listeners,
            refresh,
            hover,
            requests,
            hits,
            selection: Mutex::new(ConferenceSelection::new()),
            catalog,
            options,
        })
    }

    /// Controller über einem In-Memory-Datenbestand (Daten und Katalog in einem).
    pub fn from_provider(
        provider: Arc<InMemoryDataProvider>,
        options: ViewerOptions,
    ) -> anyhow::Result<Self> {
        Self::new(provider.clone(), provider, options)
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    fn selection(&self) -> MutexGuard<'_, ConferenceSelection> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Verarbeitet einen Intent; kehrt sofort zurück.
    pub fn handle_intent(&self, intent: MapIntent) {
        log::trace!("Intent: {:?}", intent);
        match intent {
            MapIntent::ZoomChanged { level } => self.on_zoom_level(level),
            MapIntent::GranularityRequested { coarse } => self.set_granularity(coarse),
            MapIntent::PointerMoved { world_pos } => {
                self.mouse_moved(world_pos);
            }
            MapIntent::PointerClicked { world_pos } => {
                self.mouse_clicked(world_pos);
            }
            MapIntent::OrganizationSelectionRequested { id, selected } => {
                self.request_selection(id, selected)
            }
            MapIntent::CooperationSelectionRequested { key, selected } => {
                self.request_edge_selection(key, selected)
            }
            MapIntent::ConferenceToggled {
                conference,
                selected: true,
            } => self.conference_selected(&conference),
            MapIntent::ConferenceToggled {
                conference,
                selected: false,
            } => self.conference_unselected(&conference),
            MapIntent::YearToggled {
                year,
                selected: true,
            } => self.year_selected(year),
            MapIntent::YearToggled {
                year,
                selected: false,
            } => self.year_unselected(year),
            MapIntent::ShowAllRequested => self.show_all_conferences(),
        }
    }

    // ── Granularität ─────────────────────────────────────────────

    /// Fordert die grobe (`true`) oder feine Darstellung an.
    pub fn set_granularity(&self, coarse: bool) {
        self.requests.set_granularity(coarse);
        self.refresh.request_refresh();
    }

    /// Leitet die Granularität aus der Zoom-Stufe ab.
    pub fn on_zoom_level(&self, level: f32) {
        self.set_granularity(self.options.is_coarse_zoom(level));
    }

    // ── Selektion ────────────────────────────────────────────────

    /// Fordert die Selektion einer Organisation an (grob: ihres Landes).
    pub fn request_selection(&self, id: MarkerId, selected: bool) {
        self.requests.select_node(id, selected);
        self.refresh.request_refresh();
    }

    /// Fordert die Selektion einer Kooperation an (inklusive Endpunkte).
    pub fn request_edge_selection(&self, key: EdgeKey, selected: bool) {
        self.requests.select_edge(key, selected);
        self.refresh.request_refresh();
    }

    // ── Maus ─────────────────────────────────────────────────────

    /// Hover: Treffer gegen den aktuellen Snapshot, Anwendung entprellt auf dem Worker.
    pub fn mouse_moved(&self, point: Vec2) -> HitSet {
        let hits = self.hits.current().hit_test(point);
        self.requests.set_hover(hits.clone());
        self.hover.request_refresh();
        hits
    }

    /// Klick: trifft er genau einen Knoten, werden die Listener benachrichtigt.
    ///
    /// Gibt `true` zurück, wenn eine Benachrichtigung eingereiht wurde.
    pub fn mouse_clicked(&self, point: Vec2) -> bool {
        let hits = self.hits.current().hit_nodes(point);
        log::debug!(
            "Klick bei ({:.1}, {:.1}), {} Knoten getroffen",
            point.x,
            point.y,
            hits.len()
        );
        let [id] = hits.as_slice() else {
            return false;
        };

        let id = id.clone();
        let _ = self.listeners.submit("mouse-clicked", move |listeners| {
            for listener in listeners.iter_mut() {
                listener.organization_clicked(&id);
            }
            Ok(())
        });
        true
    }

    /// Registriert einen Klick-Listener.
    pub fn add_click_listener(&self, listener: impl ClickListener + 'static) {
        let _ = self.listeners.submit("add-listener", move |listeners| {
            listeners.push(Box::new(listener));
            Ok(())
        });
    }

    // ── Konferenz-Filter ─────────────────────────────────────────

    pub fn conference_selected(&self, conference: &str) {
        self.update_selection(|selection, catalog| {
            selection.conference_selected(conference, catalog)
        });
    }

    pub fn conference_unselected(&self, conference: &str) {
        self.update_selection(|selection, _| selection.conference_unselected(conference));
    }

    pub fn year_selected(&self, year: i32) {
        self.update_selection(|selection, catalog| selection.year_selected(year, catalog));
    }

    pub fn year_unselected(&self, year: i32) {
        self.update_selection(|selection, _| selection.year_unselected(year));
    }

    /// Zeigt den gesamten Datenbestand, unabhängig von der Auswahl.
    pub fn show_all_conferences(&self) {
        self.requests.set_filter(FilterScope::All);
        self.refresh.request_refresh();
    }

    /// Aktuell aus der Auswahl abgeleiteter Filter.
    pub fn conference_scope(&self) -> FilterScope {
        self.selection().scope(self.catalog.as_ref())
    }

    /// Ändert die Auswahl und merkt den daraus folgenden Filter vor.
    ///
    /// Der Filter wird noch unter der Auswahl-Sperre in den Eingang
    /// geschrieben, damit dort immer der Stand der letzten Änderung liegt.
    fn update_selection(
        &self,
        change: impl FnOnce(&mut ConferenceSelection, &dyn ConferenceCatalog),
    ) {
        {
            let mut selection = self.selection();
            change(&mut *selection, self.catalog.as_ref());
            let scope = selection.scope(self.catalog.as_ref());
            log::debug!("Konferenz-Filter: {:?}", scope);
            self.requests.set_filter(scope);
        }
        self.refresh.request_refresh();
    }

    // ── Frame-Schnittstelle ──────────────────────────────────────

    /// Schreibt die Animationen fort; `true`, solange noch etwas läuft.
    pub fn advance_animations(&self, dt: f32) -> Result<bool, TaskError> {
        self.map
            .query("animate", move |view| view.advance_animations(dt))
    }

    /// Zeichen-Szene des aktuellen Zustands.
    pub fn draw_scene(&self) -> Result<DrawScene, TaskError> {
        self.map.query("draw-scene", |view| view.draw_scene())
    }

    /// Führt eine lesende Abfrage auf dem Worker aus.
    pub fn query<T, F>(&self, task: &str, f: F) -> Result<T, TaskError>
    where
        T: Send + 'static,
        F: FnOnce(&mut MapView) -> T + Send + 'static,
    {
        self.map.query(task, f)
    }

    /// Wartet, bis alle bisher eingereihten Karten- und Listener-Tasks gelaufen sind.
    pub fn flush(&self) -> Result<(), TaskError> {
        self.map.flush()?;
        self.listeners.flush()
    }

    /// Aktueller Hit-Test-Snapshot.
    pub fn hit_snapshot(&self) -> Arc<HitSnapshot> {
        self.hits.current()
    }
}
