//! Strongly connected components (Kosaraju).

use crate::error::GraphResult;
use crate::graph::Graph;
use crate::observer::{Color, RunContext};
use crate::vertex::VertexId;

use super::traversal::neighbour_lists;

impl Graph {
    /// Kosaraju's two-pass algorithm.
    ///
    /// The first pass records vertices in DFS finish order; the second pops
    /// that stack and runs DFS on the transposed graph. Each second-pass tree
    /// is one component, listed in visitation order and painted with its own
    /// [`Color::Component`].
    pub fn scc(&self, ctx: &mut RunContext<'_>) -> GraphResult<Vec<Vec<VertexId>>> {
        let layout = self.layout();
        let adjacency = neighbour_lists(&layout);
        let n = layout.len();

        let finished = finish_order(&adjacency, ctx)?;

        let mut transpose = vec![Vec::new(); n];
        for (i, targets) in adjacency.iter().enumerate() {
            for &j in targets {
                transpose[j].push(i);
            }
        }

        let mut assigned = vec![false; n];
        let mut components = Vec::new();
        for &root in finished.iter().rev() {
            if assigned[root] {
                continue;
            }
            let members = collect_tree(&transpose, root, &mut assigned, ctx)?;
            let color = Color::Component(components.len());
            for &i in &members {
                ctx.paint_vertex(layout.vertices[i], color);
            }
            components.push(members.into_iter().map(|i| layout.ids[i]).collect::<Vec<_>>());
        }
        tracing::debug!(components = components.len(), "scc finished");
        Ok(components)
    }
}

/// Positions in the order their DFS calls return, over every root.
fn finish_order(adjacency: &[Vec<usize>], ctx: &RunContext<'_>) -> GraphResult<Vec<usize>> {
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        ctx.checkpoint()?;
        visited[root] = true;
        stack.push((root, 0));
        while let Some(top) = stack.last_mut() {
            let (v, cursor) = *top;
            match adjacency[v].get(cursor) {
                Some(&next) => {
                    top.1 += 1;
                    if !visited[next] {
                        ctx.checkpoint()?;
                        visited[next] = true;
                        stack.push((next, 0));
                    }
                }
                None => {
                    stack.pop();
                    order.push(v);
                }
            }
        }
    }
    Ok(order)
}

/// Preorder of the DFS tree rooted at `root`, skipping assigned vertices.
fn collect_tree(
    adjacency: &[Vec<usize>],
    root: usize,
    assigned: &mut [bool],
    ctx: &RunContext<'_>,
) -> GraphResult<Vec<usize>> {
    let mut members = vec![root];
    assigned[root] = true;
    let mut stack = vec![(root, 0usize)];
    while let Some(top) = stack.last_mut() {
        let (v, cursor) = *top;
        match adjacency[v].get(cursor) {
            Some(&next) => {
                top.1 += 1;
                if !assigned[next] {
                    ctx.checkpoint()?;
                    assigned[next] = true;
                    members.push(next);
                    stack.push((next, 0));
                }
            }
            None => {
                stack.pop();
            }
        }
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelToken;
    use crate::observer::{ObserverEvent, RecordingObserver};

    fn two_cycles() -> Graph {
        let mut g = Graph::new();
        for name in ["A", "B", "C", "D", "E"] {
            g.add_vertex(name).unwrap();
        }
        g.add_edge("A", "B", 1).unwrap();
        g.add_edge("B", "C", 1).unwrap();
        g.add_edge("C", "A", 1).unwrap();
        g.add_edge("C", "D", 1).unwrap();
        g.add_edge("D", "E", 1).unwrap();
        g.add_edge("E", "D", 1).unwrap();
        g
    }

    fn joined(g: &Graph, components: &[Vec<VertexId>]) -> Vec<String> {
        components.iter().map(|c| g.join_names(c)).collect()
    }

    #[test]
    fn finds_components_in_visitation_order() {
        let g = two_cycles();
        let components = g.scc(&mut RunContext::new()).unwrap();
        assert_eq!(joined(&g, &components), vec!["ACB", "DE"]);
    }

    #[test]
    fn acyclic_graph_gives_singletons() {
        let mut g = Graph::new();
        for name in ["A", "B", "C"] {
            g.add_vertex(name).unwrap();
        }
        g.add_edge("A", "B", 1).unwrap();
        g.add_edge("B", "C", 1).unwrap();
        let components = g.scc(&mut RunContext::new()).unwrap();
        assert_eq!(joined(&g, &components), vec!["A", "B", "C"]);
    }

    #[test]
    fn every_vertex_lands_in_exactly_one_component() {
        let mut g = two_cycles();
        g.add_vertex("F").unwrap();
        g.add_edge("F", "F", 2).unwrap();
        let components = g.scc(&mut RunContext::new()).unwrap();
        let mut all: Vec<VertexId> = components.concat();
        all.sort();
        assert_eq!(all, g.vertex_ids());
    }

    #[test]
    fn empty_graph_has_no_components() {
        assert!(Graph::new().scc(&mut RunContext::new()).unwrap().is_empty());
    }

    #[test]
    fn components_get_distinct_colors() {
        let g = two_cycles();
        let mut rec = RecordingObserver::new();
        g.scc(&mut RunContext::new().with_observer(&mut rec)).unwrap();
        assert_eq!(rec.vertices_painted(Color::Component(0)), vec!["A", "C", "B"]);
        assert_eq!(rec.vertices_painted(Color::Component(1)), vec!["D", "E"]);
        assert!(rec
            .events
            .iter()
            .all(|e| matches!(e, ObserverEvent::Vertex { .. })));
    }

    #[test]
    fn cancelled_token_stops_run() {
        let token = CancelToken::new();
        token.cancel();
        let err = two_cycles()
            .scc(&mut RunContext::new().with_cancel(&token))
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
