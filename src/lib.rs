//! Kooperations-Karte (Organisationen/Länder) als Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;
pub mod task;

pub use app::{
    ClickListener, ConferenceCatalog, DataProvider, Dataset, FilterScope, InMemoryDataProvider,
    MapController, MapIntent, MapView,
};
pub use core::{
    EdgeKey, EdgeMarker, GroupKey, HitSet, HitSnapshot, Marker, MarkerHandle, MarkerId, NodeMarker,
    SelectableCollection,
};
pub use shared::{DrawScene, ViewerOptions};
pub use task::{DebounceScheduler, TaskError, WorkerQueue};
