//! The mutable weighted graph.
//!
//! Vertices live in an arena addressed by [`VertexId`]; a name index maps
//! labels to ids. Insertion order of the live vertices defines row/column
//! order of every derived matrix. Removing a vertex leaves an empty slot so
//! the remaining ids stay valid.

use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::vertex::{Point, Vertex, VertexId, Weight, MAX_WEIGHT};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Spreadsheet-style label for a matrix position: `A`..`Z`, `AA`, `AB`, ...
pub fn vertex_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Reject weights whose magnitude does not fit below the distance sentinel.
fn check_weight(weight: Weight) -> GraphResult<()> {
    match weight.checked_abs() {
        Some(w) if w <= MAX_WEIGHT => Ok(()),
        _ => Err(GraphError::WeightOutOfRange(weight)),
    }
}

/// If exactly one name is empty it stands for the other one.
fn coerce_empty<'n>(from: &'n str, to: &'n str) -> (&'n str, &'n str) {
    match (from.is_empty(), to.is_empty()) {
        (false, true) => (from, from),
        (true, false) => (to, to),
        _ => (from, to),
    }
}

/// One unordered connection in the deduplicated edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UndirectedEdge {
    pub a: VertexId,
    pub b: VertexId,
    pub weight: Weight,
}

/// Dense, index-addressed view of the live vertices used by the algorithms.
///
/// Position `i` corresponds to row/column `i` of the adjacency matrix.
pub(crate) struct Layout<'g> {
    pub ids: Vec<VertexId>,
    pub vertices: Vec<&'g Vertex>,
    positions: HashMap<VertexId, usize>,
}

impl<'g> Layout<'g> {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Outgoing neighbours of position `i` as `(position, weight)`, in the
    /// vertex's insertion order.
    pub fn neighbours(&self, i: usize) -> impl Iterator<Item = (usize, Weight)> + '_ {
        self.vertices[i]
            .neighbours()
            .iter()
            .filter_map(|&(id, w)| self.index_of(id).map(|j| (j, w)))
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A directed weighted graph with named vertices.
///
/// Undirected connections are two directed edges added with
/// [`add_edge_both_ways`](Graph::add_edge_both_ways).
///
/// Slots of removed vertices are never reused, so the arena grows with every
/// add; fine for the hand-drawn sizes this is meant for.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    slots: Vec<Option<Vertex>>,
    index: HashMap<String, VertexId>,
    edges: Vec<Edge>,
}

impl Graph {
    // -- Construction -------------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a square matrix. Vertices are named by position
    /// ([`vertex_label`]) and every nonzero cell becomes a directed edge.
    pub fn from_matrix(rows: &[Vec<Weight>]) -> GraphResult<Self> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != n) {
            return Err(GraphError::Shape {
                rows: n,
                cols: bad.len(),
            });
        }

        let mut graph = Graph::new();
        let names: Vec<String> = (0..n).map(vertex_label).collect();
        for name in &names {
            graph.add_vertex(name)?;
        }
        for (i, row) in rows.iter().enumerate() {
            for (j, &weight) in row.iter().enumerate() {
                graph.add_edge(&names[i], &names[j], weight)?;
            }
        }
        tracing::debug!(vertices = n, edges = graph.edges.len(), "graph imported from matrix");
        Ok(graph)
    }

    // -- Vertex operations --------------------------------------------------

    /// Add a vertex with no edges.
    ///
    /// An empty name is ignored and yields `Ok(None)`.
    pub fn add_vertex(&mut self, name: &str) -> GraphResult<Option<VertexId>> {
        self.add_vertex_with(Vertex::new(name))
    }

    /// Add a pre-built vertex, keeping its display position. Any adjacency
    /// the vertex carries is discarded; edges are added through the graph.
    pub fn add_vertex_with(&mut self, mut vertex: Vertex) -> GraphResult<Option<VertexId>> {
        if vertex.name().is_empty() {
            return Ok(None);
        }
        if self.index.contains_key(vertex.name()) {
            return Err(GraphError::DuplicateName(vertex.name().to_string()));
        }
        vertex.clear_neighbours();
        let id = VertexId(self.slots.len());
        tracing::trace!(name = vertex.name(), id = id.0, "add vertex");
        self.index.insert(vertex.name().to_string(), id);
        self.slots.push(Some(vertex));
        Ok(Some(id))
    }

    /// Remove a vertex together with every edge that touches it.
    pub fn remove_vertex(&mut self, name: &str) -> GraphResult<()> {
        let id = self.require(name)?;
        self.index.remove(name);
        self.slots[id.0] = None;
        for vertex in self.slots.iter_mut().flatten() {
            vertex.remove_neighbour(id);
        }
        self.edges.retain(|e| !e.touches(id));
        tracing::trace!(name, "remove vertex");
        Ok(())
    }

    /// Set or clear a vertex's display position.
    pub fn set_position(&mut self, name: &str, position: Option<Point>) -> GraphResult<()> {
        let id = self.require(name)?;
        if let Some(vertex) = self.slots[id.0].as_mut() {
            vertex.set_position(position);
        }
        Ok(())
    }

    /// The first position label, starting at the current vertex count, that
    /// no vertex uses yet.
    pub fn next_free_name(&self) -> String {
        let mut i = self.vertex_count();
        loop {
            let name = vertex_label(i);
            if !self.index.contains_key(&name) {
                return name;
            }
            i += 1;
        }
    }

    // -- Edge operations ----------------------------------------------------

    /// Add the directed edge `from -> to`.
    ///
    /// A zero weight is a no-op. The adjacency stores `|weight|`; the edge
    /// record keeps the sign for Bellman-Ford. Adding an existing ordered
    /// pair, or a weight beyond [`MAX_WEIGHT`] in magnitude, fails and
    /// leaves the graph untouched.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: Weight) -> GraphResult<()> {
        if weight == 0 {
            return Ok(());
        }
        check_weight(weight)?;
        let (from, to) = coerce_empty(from, to);
        let a = self.require(from)?;
        let b = self.require(to)?;
        self.ensure_absent(a, b)?;
        self.link(a, b, weight);
        Ok(())
    }

    /// Add `from -> to` and `to -> from` with the same weight. A self loop is
    /// added once. Both directions are validated before anything changes.
    pub fn add_edge_both_ways(&mut self, from: &str, to: &str, weight: Weight) -> GraphResult<()> {
        if weight == 0 {
            return Ok(());
        }
        check_weight(weight)?;
        let (from, to) = coerce_empty(from, to);
        let a = self.require(from)?;
        let b = self.require(to)?;
        self.ensure_absent(a, b)?;
        if a != b {
            self.ensure_absent(b, a)?;
        }
        self.link(a, b, weight);
        if a != b {
            self.link(b, a, weight);
        }
        Ok(())
    }

    /// Remove the adjacency between two vertices in both directions.
    pub fn remove_edge(&mut self, first: &str, second: &str) -> GraphResult<()> {
        let a = self.require(first)?;
        let b = self.require(second)?;
        if let Some(vertex) = self.slots[a.0].as_mut() {
            vertex.remove_neighbour(b);
        }
        if let Some(vertex) = self.slots[b.0].as_mut() {
            vertex.remove_neighbour(a);
        }
        self.edges.retain(|e| !(e.covers(a, b) || e.covers(b, a)));
        tracing::trace!(first, second, "remove edge");
        Ok(())
    }

    fn ensure_absent(&self, a: VertexId, b: VertexId) -> GraphResult<()> {
        match self.vertex(a) {
            Some(v) if v.has_neighbour(b) => Err(GraphError::DuplicateEdge {
                from: self.name_of(a).to_string(),
                to: self.name_of(b).to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Insert a validated edge into the adjacency and the edge records.
    fn link(&mut self, a: VertexId, b: VertexId, weight: Weight) {
        if let Some(vertex) = self.slots[a.0].as_mut() {
            vertex.insert_neighbour(b, weight);
        }
        let reverse = self
            .edges
            .iter_mut()
            .find(|e| a != b && e.from == b && e.to == a && !e.both_ways && e.weight == weight);
        match reverse {
            Some(record) => record.both_ways = true,
            None => self.edges.push(Edge::new(a, b, weight)),
        }
        tracing::trace!(from = a.0, to = b.0, weight, "add edge");
    }

    // -- Lookups ------------------------------------------------------------

    pub fn find(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    pub(crate) fn require(&self, name: &str) -> GraphResult<VertexId> {
        self.find(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn vertex_by_name(&self, name: &str) -> Option<&Vertex> {
        self.find(name).and_then(|id| self.vertex(id))
    }

    /// Name of a vertex, or `""` for an id that is not live.
    pub fn name_of(&self, id: VertexId) -> &str {
        self.vertex(id).map(Vertex::name).unwrap_or("")
    }

    /// Number of live vertices (N).
    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of directed edges in the adjacency.
    pub fn edge_count(&self) -> usize {
        self.slots.iter().flatten().map(Vertex::out_degree).sum()
    }

    /// Edge records: one per directed edge, or one per same-weight pair.
    pub fn edge_records(&self) -> &[Edge] {
        &self.edges
    }

    /// Live vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (VertexId(i), v)))
    }

    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices().map(|(id, _)| id).collect()
    }

    pub fn vertex_names(&self) -> Vec<&str> {
        self.vertices().map(|(_, v)| v.name()).collect()
    }

    /// Row/column of `id` in the derived matrices.
    pub fn position_of(&self, id: VertexId) -> Option<usize> {
        self.vertices().position(|(other, _)| other == id)
    }

    pub fn names(&self, ids: &[VertexId]) -> Vec<String> {
        ids.iter().map(|&id| self.name_of(id).to_string()).collect()
    }

    /// Concatenated vertex names, e.g. `"ABCD"` for a traversal.
    pub fn join_names(&self, ids: &[VertexId]) -> String {
        ids.iter().map(|&id| self.name_of(id)).collect()
    }

    pub(crate) fn layout(&self) -> Layout<'_> {
        let mut ids = Vec::with_capacity(self.vertex_count());
        let mut vertices = Vec::with_capacity(self.vertex_count());
        let mut positions = HashMap::with_capacity(self.vertex_count());
        for (id, vertex) in self.vertices() {
            positions.insert(id, ids.len());
            ids.push(id);
            vertices.push(vertex);
        }
        Layout {
            ids,
            vertices,
            positions,
        }
    }

    // -- Matrices -----------------------------------------------------------

    /// N×N matrix of stored weights, 0 where there is no edge.
    pub fn adj_matrix(&self) -> Vec<Vec<Weight>> {
        let layout = self.layout();
        let n = layout.len();
        let mut matrix = vec![vec![0; n]; n];
        for (i, row) in matrix.iter_mut().enumerate() {
            for (j, w) in layout.neighbours(i) {
                row[j] = w;
            }
        }
        matrix
    }

    /// N×E matrix with one column per edge record. The `from` row holds +1
    /// for a both-ways record and −1 otherwise; the `to` row holds +1.
    pub fn incidence_matrix(&self) -> Vec<Vec<i32>> {
        let layout = self.layout();
        let mut matrix = vec![vec![0; self.edges.len()]; layout.len()];
        for (col, edge) in self.edges.iter().enumerate() {
            let (Some(from), Some(to)) = (layout.index_of(edge.from), layout.index_of(edge.to))
            else {
                continue;
            };
            matrix[from][col] = if edge.both_ways { 1 } else { -1 };
            matrix[to][col] = 1;
        }
        matrix
    }

    /// The adjacency matrix as aligned text rows.
    pub fn matrix_string(&self) -> String {
        let matrix = self.adj_matrix();
        let width = matrix
            .iter()
            .flatten()
            .map(|w| w.to_string().len())
            .max()
            .unwrap_or(1);
        let mut out = String::new();
        for row in &matrix {
            let cells: Vec<String> = row.iter().map(|w| format!("{:>width$}", w)).collect();
            let _ = writeln!(out, "{}", cells.join(" "));
        }
        out
    }

    /// Each unordered pair once, first-seen weight, in row-major discovery
    /// order of the adjacency matrix.
    pub fn undirected_edges(&self) -> Vec<UndirectedEdge> {
        let layout = self.layout();
        let matrix = self.adj_matrix();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut result = Vec::new();
        for (i, row) in matrix.iter().enumerate() {
            for (j, &weight) in row.iter().enumerate() {
                if weight == 0 || seen.contains(&(i, j)) {
                    continue;
                }
                seen.insert((j, i));
                result.push(UndirectedEdge {
                    a: layout.ids[i],
                    b: layout.ids[j],
                    weight,
                });
            }
        }
        result
    }

    /// Sum of the weights of [`undirected_edges`](Graph::undirected_edges).
    pub fn total_weight(&self) -> Weight {
        self.undirected_edges()
            .iter()
            .fold(0, |total: Weight, e| total.saturating_add(e.weight))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
