//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app` und einem externen Renderer geteilt
//! werden, um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod draw_scene;

pub use draw_scene::{DrawScene, EdgeDrawItem, NodeDrawItem};
pub use options::ViewerOptions;
pub use options::{COARSE_ZOOM_THRESHOLD, FRAME_INTERVAL_SECS};
