//! Vertices: a label, optional display position, and outgoing adjacency.

use serde::{Deserialize, Serialize};

/// Integer edge weight. Distances use the same type.
pub type Weight = i64;

/// Largest accepted edge weight magnitude. `Weight::MAX` is kept free as the
/// unreachable-distance sentinel and `Weight::MIN` has no absolute value.
pub const MAX_WEIGHT: Weight = Weight::MAX - 1;

/// A typed wrapper around `usize` identifying a vertex slot in a graph.
///
/// Ids are stable: removing a vertex never renumbers the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

/// Display coordinates carried alongside a vertex. The engine never reads
/// them; they ride along so callers can redraw result graphs in place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A named vertex with its outgoing neighbours.
///
/// The neighbour list doubles as the weight map: each entry is a neighbour
/// id with the stored (absolute) weight of the edge towards it, in the order
/// the edges were added.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    name: String,
    position: Option<Point>,
    neighbours: Vec<(VertexId, Weight)>,
}

impl Vertex {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
            neighbours: Vec::new(),
        }
    }

    /// Builder-style constructor for a vertex placed on the canvas.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn set_position(&mut self, position: Option<Point>) {
        self.position = position;
    }

    /// Outgoing neighbours with weights, in insertion order.
    pub fn neighbours(&self) -> &[(VertexId, Weight)] {
        &self.neighbours
    }

    /// Weight of the edge towards `to`, if any.
    pub fn weight_to(&self, to: VertexId) -> Option<Weight> {
        self.neighbours
            .iter()
            .find(|(id, _)| *id == to)
            .map(|&(_, w)| w)
    }

    pub fn has_neighbour(&self, to: VertexId) -> bool {
        self.weight_to(to).is_some()
    }

    pub fn out_degree(&self) -> usize {
        self.neighbours.len()
    }

    pub(crate) fn insert_neighbour(&mut self, to: VertexId, weight: Weight) {
        self.neighbours.push((to, weight.saturating_abs()));
    }

    /// Remove the edge towards `to`. Returns whether one existed.
    pub(crate) fn remove_neighbour(&mut self, to: VertexId) -> bool {
        let before = self.neighbours.len();
        self.neighbours.retain(|(id, _)| *id != to);
        self.neighbours.len() != before
    }

    /// Drop adjacency carried over from another graph.
    pub(crate) fn clear_neighbours(&mut self) {
        self.neighbours.clear();
    }
}
