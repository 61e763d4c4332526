//! Minimum spanning trees (Kruskal, Prim) over the undirected view of the
//! graph.
//!
//! Both algorithms read [`Graph::undirected_edges`] and return a fresh graph
//! holding the selected edges both ways. A disconnected input yields a
//! forest (Kruskal) or the tree of the first vertex's component (Prim).

use crate::error::GraphResult;
use crate::graph::{Graph, UndirectedEdge};
use crate::observer::{Color, RunContext};

/// Disjoint-set union with path halving and union by rank.
#[derive(Debug, Clone)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`. Returns `false` if they were already
    /// the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

impl Graph {
    /// Kruskal's algorithm: edges in ascending weight (ties in discovery
    /// order), each kept when it joins two different components.
    pub fn kruskal(&self, ctx: &mut RunContext<'_>) -> GraphResult<Graph> {
        let layout = self.layout();
        let mut edges = self.undirected_edges();
        edges.sort_by_key(|e| e.weight);

        let mut sets = DisjointSet::new(layout.len());
        let mut chosen = Vec::new();
        for edge in edges {
            ctx.checkpoint()?;
            let (Some(a), Some(b)) = (layout.index_of(edge.a), layout.index_of(edge.b)) else {
                continue;
            };
            if sets.union(a, b) {
                chosen.push(edge);
            }
        }
        tracing::debug!(edges = chosen.len(), "kruskal selected edges");
        self.tree_from_edges(&chosen, ctx)
    }

    /// Prim's algorithm grown from the first vertex.
    pub fn prim(&self, ctx: &mut RunContext<'_>) -> GraphResult<Graph> {
        let layout = self.layout();
        let n = layout.len();
        let edges = self.undirected_edges();
        if n == 0 {
            return Ok(Graph::new());
        }

        let mut in_tree = vec![false; n];
        in_tree[0] = true;
        let mut included = 1;
        let mut chosen = Vec::new();

        while included < n {
            ctx.checkpoint()?;
            let best = edges
                .iter()
                .filter_map(|e| {
                    let a = layout.index_of(e.a)?;
                    let b = layout.index_of(e.b)?;
                    (in_tree[a] != in_tree[b]).then_some((e, a, b))
                })
                .min_by_key(|(e, _, _)| e.weight);
            let Some((edge, a, b)) = best else {
                break;
            };
            in_tree[a] = true;
            in_tree[b] = true;
            included += 1;
            chosen.push(*edge);
        }
        tracing::debug!(edges = chosen.len(), "prim selected edges");
        self.tree_from_edges(&chosen, ctx)
    }

    /// Build the result graph, copying vertex positions from `self` and
    /// highlighting each selected edge.
    fn tree_from_edges(
        &self,
        edges: &[UndirectedEdge],
        ctx: &mut RunContext<'_>,
    ) -> GraphResult<Graph> {
        let mut tree = Graph::new();
        for edge in edges {
            let (Some(a), Some(b)) = (self.vertex(edge.a), self.vertex(edge.b)) else {
                continue;
            };
            for vertex in [a, b] {
                if tree.find(vertex.name()).is_none() {
                    tree.add_vertex_with(vertex.clone())?;
                }
            }
            ctx.paint_edge(a, b, Color::Highlight);
            ctx.paint_edge(b, a, Color::Highlight);
            tree.add_edge_both_ways(a.name(), b.name(), edge.weight)?;
        }
        Ok(tree)
    }
}
