//! Application-Layer: Controller, Karten-Ansicht, Anfragen und Use-Cases.

pub mod conference_filter;
pub mod controller;
pub mod data_provider;
pub mod events;
/// Karten-Ansicht
///
/// Besitzt die Marker-Collections und löst IDs in Handles auf.
pub mod map_view;
pub mod requests;
pub mod use_cases;

pub use conference_filter::{ConferenceSelection, FilterScope};
pub use controller::{ClickListener, MapController};
pub use data_provider::{
    conference_acronym, ConferenceCatalog, CooperationWeights, DataProvider, Dataset,
    InMemoryDataProvider,
};
pub use events::MapIntent;
pub use map_view::{HitPublisher, MapView};
pub use requests::{RefreshBatch, ViewRequests};
