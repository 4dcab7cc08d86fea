//! Core-Domänentypen: Marker, Handles, selektierbare Collections, Hit-Tests.

pub mod animation;
pub mod edge;
pub mod handle;
pub mod ids;
pub mod marker;
/// Umschaltbare Knoten-Marker
///
/// Ein Knoten trägt zwei Identitäten (fein: Organisation, grob: Land) und
/// wechselt animiert zwischen ihnen. Zusätzlich zählt er die selektierten
/// Kanten, die an ihm hängen, und klappt sich auf, solange er effektiv
/// selektiert ist.
pub mod node;
pub mod selectable;
pub mod spatial;

#[cfg(test)]
pub(crate) mod test_support;

pub use animation::{AnimationSettings, Easing, Tween};
pub use edge::EdgeMarker;
pub use handle::{HandleError, HandleGroup, MarkerHandle};
pub use ids::{EdgeKey, GroupKey, MarkerId};
pub use marker::{Marker, Rgba};
pub use node::{ExpandPhase, Identity, NodeMarker, SwitchPhase};
pub use selectable::{CollectionError, MarkerKey, SelectableCollection};
pub use spatial::{EdgeHitEntry, HitSet, HitSnapshot, NodeHitEntry};
