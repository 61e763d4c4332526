//! Edge records kept next to the vertex-level adjacency.

use crate::vertex::{VertexId, Weight};
use serde::{Deserialize, Serialize};

/// A directed edge record.
///
/// `weight` keeps the sign the caller supplied, unlike the vertex-level
/// adjacency which stores absolute values. `both_ways` is set when the
/// reverse edge was added with the same weight; such a pair is one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Weight,
    pub both_ways: bool,
}

impl Edge {
    pub fn new(from: VertexId, to: VertexId, weight: Weight) -> Self {
        Self {
            from,
            to,
            weight,
            both_ways: false,
        }
    }

    pub fn touches(&self, id: VertexId) -> bool {
        self.from == id || self.to == id
    }

    /// Whether this record covers the directed pair `from -> to`.
    pub fn covers(&self, from: VertexId, to: VertexId) -> bool {
        (self.from == from && self.to == to)
            || (self.both_ways && self.from == to && self.to == from)
    }

    /// The directed `(from, to, weight)` triples this record stands for.
    pub fn directions(&self) -> impl Iterator<Item = (VertexId, VertexId, Weight)> {
        let forward = (self.from, self.to, self.weight);
        let reverse = if self.both_ways && self.from != self.to {
            Some((self.to, self.from, self.weight))
        } else {
            None
        };
        std::iter::once(forward).chain(reverse)
    }
}
