//! Minimaler Punkt-Marker für Unit-Tests.

use super::{Marker, MarkerId, Rgba};
use glam::Vec2;

#[derive(Debug, Clone)]
pub(crate) struct PointMarker {
    pub id: MarkerId,
    pub location: Vec2,
    pub selected: bool,
    pub hidden: bool,
    pub color: Rgba,
    pub stroke_width: f32,
    pub selection_writes: usize,
}

impl PointMarker {
    pub(crate) fn new(id: &str, x: f32, y: f32) -> Self {
        Self {
            id: MarkerId::from(id),
            location: Vec2::new(x, y),
            selected: false,
            hidden: false,
            color: [0.0, 0.0, 0.0, 1.0],
            stroke_width: 1.0,
            selection_writes: 0,
        }
    }
}

impl Marker for PointMarker {
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
        self.selection_writes += 1;
        self.selected = selected;
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }
}
