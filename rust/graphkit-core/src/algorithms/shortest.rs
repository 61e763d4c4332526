//! Shortest paths: Dijkstra and Bellman-Ford from a single source,
//! Floyd–Warshall for all pairs with path reconstruction.
//!
//! Distances are indexed by matrix position. Unreachable vertices hold
//! [`INFINITY`], which absorbs any addition; finite sums saturate just
//! below it so no path length can be mistaken for "unreachable".

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::observer::{Color, RunContext};
use crate::vertex::{VertexId, Weight};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Distance of an unreachable vertex.
pub const INFINITY: Weight = Weight::MAX;

/// Add two distances. `INFINITY` absorbs; finite results are clamped below
/// `INFINITY`.
pub fn add_distance(a: Weight, b: Weight) -> Weight {
    if a == INFINITY || b == INFINITY {
        INFINITY
    } else {
        a.saturating_add(b).min(INFINITY - 1)
    }
}

/// All-pairs distances with the successor matrix used to rebuild paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloydResult {
    /// Vertex at each matrix position.
    pub ids: Vec<VertexId>,
    pub dist: Vec<Vec<Weight>>,
    /// `next[i][j]` is the position after `i` on a shortest `i -> j` path.
    pub next: Vec<Vec<Option<usize>>>,
}

impl FloydResult {
    /// Positions along a shortest path from `from` to `to`, both inclusive.
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        self.next.get(from)?.get(to)?.as_ref()?;
        let mut path = vec![from];
        let mut current = from;
        while current != to {
            current = self.next[current][to]?;
            path.push(current);
            if path.len() > self.ids.len() {
                return None;
            }
        }
        Some(path)
    }
}

impl Graph {
    /// Dijkstra's algorithm over the adjacency matrix.
    ///
    /// Fails with [`GraphError::NegativeWeight`] if any edge was added with a
    /// negative weight, since the matrix only holds magnitudes and the
    /// result would silently differ from Bellman-Ford.
    pub fn dijkstra(&self, start: &str, ctx: &mut RunContext<'_>) -> GraphResult<Vec<Weight>> {
        let start = self.require(start)?;
        if let Some(edge) = self.edge_records().iter().find(|e| e.weight < 0) {
            return Err(GraphError::NegativeWeight {
                from: self.name_of(edge.from).to_string(),
                to: self.name_of(edge.to).to_string(),
                weight: edge.weight,
            });
        }
        let layout = self.layout();
        let matrix = self.adj_matrix();
        let n = layout.len();

        let mut dist = vec![INFINITY; n];
        let mut done = vec![false; n];
        let mut heap = BinaryHeap::new();
        if let Some(s) = layout.index_of(start) {
            dist[s] = 0;
            heap.push(Reverse((0, s)));
        }

        while let Some(Reverse((d, u))) = heap.pop() {
            if done[u] || d > dist[u] {
                continue;
            }
            ctx.checkpoint()?;
            done[u] = true;
            for (v, &w) in matrix[u].iter().enumerate() {
                if w == 0 || done[v] {
                    continue;
                }
                let candidate = add_distance(d, w);
                if candidate < dist[v] {
                    dist[v] = candidate;
                    heap.push(Reverse((candidate, v)));
                }
            }
        }
        Ok(dist)
    }

    /// Bellman-Ford over the signed edge records.
    ///
    /// Runs N−1 relaxation rounds, then one more pass: any edge that can
    /// still relax lies on a negative cycle reachable from `start`.
    pub fn bellman_ford(&self, start: &str, ctx: &mut RunContext<'_>) -> GraphResult<Vec<Weight>> {
        let start = self.require(start)?;
        let layout = self.layout();
        let n = layout.len();
        let edges: Vec<(usize, usize, Weight)> = self
            .edge_records()
            .iter()
            .flat_map(|e| e.directions())
            .filter_map(|(from, to, w)| Some((layout.index_of(from)?, layout.index_of(to)?, w)))
            .collect();

        let mut dist = vec![INFINITY; n];
        if let Some(s) = layout.index_of(start) {
            dist[s] = 0;
        }

        for _ in 1..n {
            ctx.checkpoint()?;
            let mut changed = false;
            for &(from, to, w) in &edges {
                if dist[from] == INFINITY {
                    continue;
                }
                let candidate = add_distance(dist[from], w);
                if candidate < dist[to] {
                    dist[to] = candidate;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let relaxable = edges
            .iter()
            .any(|&(from, to, w)| dist[from] != INFINITY && add_distance(dist[from], w) < dist[to]);
        if relaxable {
            tracing::debug!(start = self.name_of(start), "negative cycle detected");
            return Err(GraphError::NegativeCycle);
        }
        Ok(dist)
    }

    /// Floyd–Warshall over the adjacency matrix. The diagonal is zero.
    pub fn floyd(&self, ctx: &mut RunContext<'_>) -> GraphResult<FloydResult> {
        let layout = self.layout();
        let matrix = self.adj_matrix();
        let n = layout.len();

        let mut dist = vec![vec![INFINITY; n]; n];
        let mut next = vec![vec![None; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    dist[i][j] = 0;
                    next[i][j] = Some(i);
                } else if matrix[i][j] != 0 {
                    dist[i][j] = matrix[i][j];
                    next[i][j] = Some(j);
                }
            }
        }

        for k in 0..n {
            ctx.checkpoint()?;
            for i in 0..n {
                if dist[i][k] == INFINITY {
                    continue;
                }
                for j in 0..n {
                    let through = add_distance(dist[i][k], dist[k][j]);
                    if through < dist[i][j] {
                        dist[i][j] = through;
                        next[i][j] = next[i][k];
                    }
                }
            }
        }

        Ok(FloydResult {
            ids: layout.ids,
            dist,
            next,
        })
    }

    /// Shortest path from `from` to `to` rebuilt from the Floyd successor
    /// matrix. Path edges are highlighted through the observer.
    pub fn floyd_path(
        &self,
        from: &str,
        to: &str,
        ctx: &mut RunContext<'_>,
    ) -> GraphResult<Vec<VertexId>> {
        let from_id = self.require(from)?;
        let to_id = self.require(to)?;
        let result = self.floyd(ctx)?;
        let unreachable = || GraphError::Unreachable {
            from: from.to_string(),
            to: to.to_string(),
        };

        let (Some(s), Some(t)) = (self.position_of(from_id), self.position_of(to_id)) else {
            return Err(unreachable());
        };
        let positions = result.path(s, t).ok_or_else(unreachable)?;
        let path: Vec<VertexId> = positions.iter().map(|&p| result.ids[p]).collect();

        for pair in path.windows(2) {
            if let (Some(a), Some(b)) = (self.vertex(pair[0]), self.vertex(pair[1])) {
                ctx.paint_edge(a, b, Color::Highlight);
                ctx.paint_edge(b, a, Color::Highlight);
            }
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;
    use crate::vertex::MAX_WEIGHT;

    fn scenario() -> Graph {
        let mut g = Graph::new();
        for name in ["A", "B", "C", "D"] {
            g.add_vertex(name).unwrap();
        }
        g.add_edge_both_ways("A", "B", 1).unwrap();
        g.add_edge_both_ways("B", "C", 2).unwrap();
        g.add_edge_both_ways("C", "D", 1).unwrap();
        g.add_edge_both_ways("D", "A", 4).unwrap();
        g.add_edge_both_ways("A", "C", 5).unwrap();
        g
    }

    fn triangle(weight_back: Weight) -> Graph {
        let mut g = Graph::new();
        for name in ["A", "B", "C"] {
            g.add_vertex(name).unwrap();
        }
        g.add_edge("A", "B", 1).unwrap();
        g.add_edge("B", "C", 1).unwrap();
        g.add_edge("C", "A", weight_back).unwrap();
        g
    }

    // -- Arithmetic ---------------------------------------------------------

    #[test]
    fn infinity_absorbs_and_finite_saturates() {
        assert_eq!(add_distance(INFINITY, 5), INFINITY);
        assert_eq!(add_distance(3, INFINITY), INFINITY);
        assert_eq!(add_distance(INFINITY - 1, 10), INFINITY - 1);
        assert_eq!(add_distance(2, -5), -3);
    }

    // -- Dijkstra -----------------------------------------------------------

    #[test]
    fn dijkstra_scenario() {
        let dist = scenario().dijkstra("A", &mut RunContext::new()).unwrap();
        assert_eq!(dist, vec![0, 1, 3, 4]);
    }

    #[test]
    fn dijkstra_marks_unreachable_with_infinity() {
        let mut g = triangle(1);
        g.add_vertex("D").unwrap();
        let dist = g.dijkstra("A", &mut RunContext::new()).unwrap();
        assert_eq!(dist, vec![0, 1, 2, INFINITY]);
    }

    #[test]
    fn dijkstra_rejects_negative_weights() {
        let err = triangle(-5).dijkstra("A", &mut RunContext::new()).unwrap_err();
        assert!(matches!(err, GraphError::NegativeWeight { weight: -5, .. }));
    }

    #[test]
    fn dijkstra_huge_weights_do_not_wrap() {
        let big = Weight::MAX / 2 + 10;
        let mut g = Graph::new();
        for name in ["A", "B", "C"] {
            g.add_vertex(name).unwrap();
        }
        g.add_edge("A", "B", big).unwrap();
        g.add_edge("B", "C", big).unwrap();
        let dist = g.dijkstra("A", &mut RunContext::new()).unwrap();
        assert_eq!(dist[2], INFINITY - 1);
        assert!(dist[2] > 0);
    }

    #[test]
    fn heaviest_edge_stays_distinct_from_unreachable() {
        let mut g = Graph::new();
        for name in ["A", "B", "C"] {
            g.add_vertex(name).unwrap();
        }
        g.add_edge("A", "B", MAX_WEIGHT).unwrap();
        let dist = g.dijkstra("A", &mut RunContext::new()).unwrap();
        assert_eq!(dist, vec![0, MAX_WEIGHT, INFINITY]);
        let floyd = g.floyd(&mut RunContext::new()).unwrap();
        assert_eq!(floyd.dist[0][1], MAX_WEIGHT);
        assert_eq!(floyd.path(0, 1), Some(vec![0, 1]));
        assert_eq!(floyd.path(0, 2), None);
    }

    #[test]
    fn dijkstra_missing_start() {
        assert!(matches!(
            scenario().dijkstra("X", &mut RunContext::new()),
            Err(GraphError::NotFound(_))
        ));
    }

    // -- Bellman-Ford -------------------------------------------------------

    #[test]
    fn bellman_ford_matches_dijkstra_on_scenario() {
        let g = scenario();
        let bf = g.bellman_ford("A", &mut RunContext::new()).unwrap();
        let dj = g.dijkstra("A", &mut RunContext::new()).unwrap();
        assert_eq!(bf, dj);
    }

    #[test]
    fn bellman_ford_detects_negative_cycle() {
        let err = triangle(-5).bellman_ford("A", &mut RunContext::new()).unwrap_err();
        assert!(matches!(err, GraphError::NegativeCycle));
    }

    #[test]
    fn bellman_ford_handles_negative_edge_without_cycle() {
        let mut g = Graph::new();
        for name in ["A", "B", "C"] {
            g.add_vertex(name).unwrap();
        }
        g.add_edge("A", "B", 5).unwrap();
        g.add_edge("A", "C", 2).unwrap();
        g.add_edge("C", "B", -4).unwrap();
        let dist = g.bellman_ford("A", &mut RunContext::new()).unwrap();
        assert_eq!(dist, vec![0, -2, 2]);
    }

    #[test]
    fn bellman_ford_ignores_unreachable_negative_cycle() {
        let mut g = triangle(-5);
        g.add_vertex("S").unwrap();
        let dist = g.bellman_ford("S", &mut RunContext::new()).unwrap();
        assert_eq!(dist, vec![INFINITY, INFINITY, INFINITY, 0]);
    }

    #[test]
    fn bellman_ford_negative_undirected_edge_is_a_cycle() {
        let mut g = Graph::new();
        g.add_vertex("A").unwrap();
        g.add_vertex("B").unwrap();
        g.add_edge_both_ways("A", "B", -1).unwrap();
        assert!(matches!(
            g.bellman_ford("A", &mut RunContext::new()),
            Err(GraphError::NegativeCycle)
        ));
    }

    // -- Floyd --------------------------------------------------------------

    #[test]
    fn floyd_scenario_distances() {
        let result = scenario().floyd(&mut RunContext::new()).unwrap();
        assert_eq!(
            result.dist,
            vec![
                vec![0, 1, 3, 4],
                vec![1, 0, 2, 3],
                vec![3, 2, 0, 1],
                vec![4, 3, 1, 0],
            ]
        );
    }

    #[test]
    fn floyd_unreachable_is_infinity() {
        let mut g = Graph::new();
        g.add_vertex("A").unwrap();
        g.add_vertex("B").unwrap();
        g.add_edge("A", "B", 7).unwrap();
        let result = g.floyd(&mut RunContext::new()).unwrap();
        assert_eq!(result.dist, vec![vec![0, 7], vec![INFINITY, 0]]);
        assert_eq!(result.path(1, 0), None);
    }

    #[test]
    fn floyd_diagonal_ignores_self_loop() {
        let mut g = Graph::new();
        g.add_vertex("A").unwrap();
        g.add_edge("A", "A", 3).unwrap();
        let result = g.floyd(&mut RunContext::new()).unwrap();
        assert_eq!(result.dist, vec![vec![0]]);
    }

    #[test]
    fn floyd_path_follows_direction() {
        let g = triangle(1);
        let path = g.floyd_path("A", "C", &mut RunContext::new()).unwrap();
        assert_eq!(g.join_names(&path), "ABC");
        let back = g.floyd_path("C", "B", &mut RunContext::new()).unwrap();
        assert_eq!(g.join_names(&back), "CAB");
    }

    #[test]
    fn floyd_path_unreachable() {
        let mut g = triangle(1);
        g.add_vertex("D").unwrap();
        let err = g.floyd_path("A", "D", &mut RunContext::new()).unwrap_err();
        assert!(matches!(err, GraphError::Unreachable { .. }));
    }

    #[test]
    fn floyd_path_to_self_is_single_vertex() {
        let g = scenario();
        let path = g.floyd_path("B", "B", &mut RunContext::new()).unwrap();
        assert_eq!(g.join_names(&path), "B");
    }

    #[test]
    fn floyd_path_highlights_edges() {
        let g = triangle(1);
        let mut rec = RecordingObserver::new();
        g.floyd_path("A", "C", &mut RunContext::new().with_observer(&mut rec))
            .unwrap();
        assert_eq!(
            rec.edges_highlighted(),
            vec![
                ("A".to_string(), "B".to_string()),
                ("B".to_string(), "A".to_string()),
                ("B".to_string(), "C".to_string()),
                ("C".to_string(), "B".to_string()),
            ]
        );
    }
}
