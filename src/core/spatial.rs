//! Hit-Test-Snapshot (KD-Tree) für Hover- und Klick-Abfragen.
//!
//! Der Snapshot wird nach jeder Änderung auf dem Worker gebaut und als
//! `Arc` veröffentlicht; Abfragen laufen damit synchron auf dem Eingabe-Thread,
//! ohne die Marker-Collections zu berühren.

use std::collections::HashMap;

use glam::Vec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::{EdgeKey, EdgeMarker, Marker, MarkerId, NodeMarker, SelectableCollection};

/// Knoten-Eintrag im Snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeHitEntry {
    pub id: MarkerId,
    pub position: Vec2,
    pub radius: f32,
}

/// Kanten-Eintrag im Snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeHitEntry {
    pub key: EdgeKey,
    pub start: Vec2,
    pub end: Vec2,
    pub width: f32,
}

impl EdgeHitEntry {
    fn distance_to(&self, point: Vec2) -> f32 {
        let segment = self.end - self.start;
        let length_sq = segment.length_squared();
        if length_sq <= f32::EPSILON {
            return self.start.distance(point);
        }
        let t = ((point - self.start).dot(segment) / length_sq).clamp(0.0, 1.0);
        (self.start + segment * t).distance(point)
    }
}

/// Ergebnis eines Hit-Tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitSet {
    /// Getroffene Knoten (sortiert nach Distanz)
    pub nodes: Vec<MarkerId>,
    /// Getroffene Kanten
    pub edges: Vec<EdgeKey>,
}

impl HitSet {
    pub fn contains_node(&self, id: &MarkerId) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, key: &EdgeKey) -> bool {
        self.edges.contains(key)
    }
}

/// Read-only Snapshot aller sichtbaren Knoten und Kanten.
///
/// Im groben Modus liegen viele Knoten exakt auf derselben Position; der
/// KD-Tree indexiert daher nur eindeutige Positionen, `slots` ordnet jeder
/// Position ihre Knoten zu.
#[derive(Debug, Clone)]
pub struct HitSnapshot {
    tree: KdTree<f64, 2>,
    slots: Vec<Vec<usize>>,
    nodes: Vec<NodeHitEntry>,
    max_radius: f32,
    edges: Vec<EdgeHitEntry>,
}

impl HitSnapshot {
    /// Erstellt einen leeren Snapshot.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            slots: Vec::new(),
            nodes: Vec::new(),
            max_radius: 0.0,
            edges: Vec::new(),
        }
    }

    /// Baut einen Snapshot aus den sichtbaren Markern.
    pub fn build(
        nodes: &SelectableCollection<NodeMarker>,
        edges: &SelectableCollection<EdgeMarker>,
    ) -> Self {
        let node_entries: Vec<NodeHitEntry> = nodes
            .iter()
            .filter(|(_, node)| !node.is_hidden())
            .map(|(_, node)| NodeHitEntry {
                id: node.id().clone(),
                position: node.location(),
                radius: node.hit_radius(),
            })
            .collect();

        let edge_entries = edges
            .iter()
            .filter(|(_, edge)| !edge.is_hidden())
            .map(|(_, edge)| EdgeHitEntry {
                key: edge.key().clone(),
                start: edge.start,
                end: edge.end,
                width: edge.width(),
            })
            .collect();

        Self::from_entries(node_entries, edge_entries)
    }

    /// Baut einen Snapshot aus fertigen Einträgen.
    pub fn from_entries(nodes: Vec<NodeHitEntry>, edges: Vec<EdgeHitEntry>) -> Self {
        let mut slot_of_position: HashMap<(u32, u32), usize> = HashMap::new();
        let mut points: Vec<[f64; 2]> = Vec::new();
        let mut slots: Vec<Vec<usize>> = Vec::new();

        for (index, entry) in nodes.iter().enumerate() {
            let bits = (entry.position.x.to_bits(), entry.position.y.to_bits());
            let slot = *slot_of_position.entry(bits).or_insert_with(|| {
                points.push([entry.position.x as f64, entry.position.y as f64]);
                slots.push(Vec::new());
                slots.len() - 1
            });
            slots[slot].push(index);
        }

        let tree: KdTree<f64, 2> = (&points).into();
        let max_radius = nodes.iter().map(|entry| entry.radius).fold(0.0, f32::max);

        Self {
            tree,
            slots,
            nodes,
            max_radius,
            edges,
        }
    }

    /// Anzahl indexierter Knoten.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Anzahl indexierter Kanten.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Alle Knoten, deren Trefferradius die Position einschließt.
    ///
    /// Vorfilter über den KD-Tree mit dem größten Radius, danach exakte Prüfung
    /// gegen den Radius jedes Knotens.
    pub fn hit_nodes(&self, point: Vec2) -> Vec<MarkerId> {
        if self.nodes.is_empty() || self.max_radius <= 0.0 {
            return Vec::new();
        }

        let radius_sq = (self.max_radius * self.max_radius) as f64;
        let mut candidates = self
            .tree
            .within::<SquaredEuclidean>(&[point.x as f64, point.y as f64], radius_sq)
            .into_iter()
            .flat_map(|entry| {
                let distance = (entry.distance as f32).sqrt();
                self.slots
                    .get(entry.item as usize)
                    .into_iter()
                    .flatten()
                    .filter_map(move |index| self.nodes.get(*index))
                    .filter(move |node| distance < node.radius)
                    .map(move |node| (distance, node))
            })
            .collect::<Vec<_>>();

        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
        candidates
            .into_iter()
            .map(|(_, node)| node.id.clone())
            .collect()
    }

    /// Alle Kanten, deren Abstand zur Position kleiner als ihre Breite ist.
    pub fn hit_edges(&self, point: Vec2) -> Vec<EdgeKey> {
        self.edges
            .iter()
            .filter(|edge| edge.distance_to(point) < edge.width)
            .map(|edge| edge.key.clone())
            .collect()
    }

    /// Knoten- und Kanten-Treffer an der Position.
    pub fn hit_test(&self, point: Vec2) -> HitSet {
        HitSet {
            nodes: self.hit_nodes(point),
            edges: self.hit_edges(point),
        }
    }
}

impl Default for HitSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
