//! Eulerian cycles over the undirected view of the graph.
//!
//! `i ~ j` whenever either direction is stored; a self loop adds 2 to its
//! vertex's degree. A graph without edges, a disconnected graph, or one with
//! an odd-degree vertex has no Euler cycle and yields an empty walk.

use crate::error::GraphResult;
use crate::graph::Graph;
use crate::observer::{Color, RunContext};
use crate::vertex::VertexId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Walk construction used by [`Graph::euler_cycle`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EulerStrategy {
    /// Edge-consuming walk from the first vertex.
    #[default]
    Hierholzer,
    /// Stack walk removing the lowest-indexed remaining edge.
    Fleury,
}

/// The undirected multigraph an Euler walk runs over, by matrix position.
struct EulerInput {
    n: usize,
    /// `(a, b)` endpoint pairs; `a == b` for a self loop.
    edges: Vec<(usize, usize)>,
    degrees: Vec<usize>,
}

impl EulerInput {
    fn incident(&self) -> Vec<Vec<usize>> {
        let mut incident = vec![Vec::new(); self.n];
        for (e, &(a, b)) in self.edges.iter().enumerate() {
            incident[a].push(e);
            if a != b {
                incident[b].push(e);
            }
        }
        incident
    }

    fn is_connected(&self) -> bool {
        if self.n == 0 {
            return false;
        }
        let incident = self.incident();
        let mut seen = vec![false; self.n];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        while let Some(v) = queue.pop_front() {
            for &e in &incident[v] {
                let (a, b) = self.edges[e];
                let other = if a == v { b } else { a };
                if !seen[other] {
                    seen[other] = true;
                    queue.push_back(other);
                }
            }
        }
        seen.iter().all(|&s| s)
    }

    fn admits_cycle(&self) -> bool {
        !self.edges.is_empty() && self.degrees.iter().all(|d| d % 2 == 0) && self.is_connected()
    }
}

impl Graph {
    /// Euler cycle using `strategy`.
    pub fn euler_cycle(
        &self,
        strategy: EulerStrategy,
        ctx: &mut RunContext<'_>,
    ) -> GraphResult<Vec<VertexId>> {
        match strategy {
            EulerStrategy::Hierholzer => self.euler_hierholzer(ctx),
            EulerStrategy::Fleury => self.euler_fleury(ctx),
        }
    }

    /// Hierholzer's algorithm from the first vertex. Edges leave each vertex
    /// in discovery order of [`Graph::undirected_edges`].
    pub fn euler_hierholzer(&self, ctx: &mut RunContext<'_>) -> GraphResult<Vec<VertexId>> {
        let Some(input) = self.euler_input() else {
            return Ok(Vec::new());
        };
        let incident = input.incident();
        let mut used = vec![false; input.edges.len()];
        let mut cursor = vec![0usize; input.n];
        let mut stack = vec![0usize];
        let mut circuit = Vec::with_capacity(input.edges.len() + 1);

        while let Some(&v) = stack.last() {
            ctx.checkpoint()?;
            while cursor[v] < incident[v].len() && used[incident[v][cursor[v]]] {
                cursor[v] += 1;
            }
            match incident[v].get(cursor[v]) {
                Some(&e) => {
                    used[e] = true;
                    let (a, b) = input.edges[e];
                    stack.push(if a == v { b } else { a });
                }
                None => {
                    stack.pop();
                    circuit.push(v);
                }
            }
        }
        circuit.reverse();
        Ok(self.finish_walk(&circuit, ctx))
    }

    /// Stack walk that repeatedly removes the lowest-indexed remaining edge
    /// of the vertex on top of the stack.
    ///
    /// The walk starts at the first odd-degree vertex if there is one.
    /// The precondition check already rejects odd degrees, so in
    /// practice this is always the first vertex.
    pub fn euler_fleury(&self, ctx: &mut RunContext<'_>) -> GraphResult<Vec<VertexId>> {
        let Some(input) = self.euler_input() else {
            return Ok(Vec::new());
        };
        let n = input.n;
        let mut remaining = vec![vec![false; n]; n];
        for &(a, b) in &input.edges {
            remaining[a][b] = true;
            remaining[b][a] = true;
        }
        let start = input.degrees.iter().position(|d| d % 2 == 1).unwrap_or(0);

        let mut stack = vec![start];
        let mut circuit = Vec::with_capacity(input.edges.len() + 1);
        while let Some(&v) = stack.last() {
            ctx.checkpoint()?;
            match remaining[v].iter().position(|&r| r) {
                Some(next) => {
                    remaining[v][next] = false;
                    remaining[next][v] = false;
                    stack.push(next);
                }
                None => {
                    stack.pop();
                    circuit.push(v);
                }
            }
        }
        circuit.reverse();
        Ok(self.finish_walk(&circuit, ctx))
    }

    fn euler_input(&self) -> Option<EulerInput> {
        let layout = self.layout();
        let n = layout.len();
        let mut edges = Vec::new();
        let mut degrees = vec![0; n];
        for edge in self.undirected_edges() {
            let (Some(a), Some(b)) = (layout.index_of(edge.a), layout.index_of(edge.b)) else {
                continue;
            };
            degrees[a] += 1;
            degrees[b] += 1;
            edges.push((a, b));
        }
        let input = EulerInput { n, edges, degrees };
        if input.admits_cycle() {
            Some(input)
        } else {
            tracing::debug!("graph has no euler cycle");
            None
        }
    }

    /// Map positions to ids and highlight the walked edges.
    fn finish_walk(&self, circuit: &[usize], ctx: &mut RunContext<'_>) -> Vec<VertexId> {
        let layout = self.layout();
        for pair in circuit.windows(2) {
            ctx.paint_edge(
                layout.vertices[pair[0]],
                layout.vertices[pair[1]],
                Color::Highlight,
            );
        }
        circuit.iter().map(|&i| layout.ids[i]).collect()
    }
}
