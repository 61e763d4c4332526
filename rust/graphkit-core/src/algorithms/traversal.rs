//! Breadth- and depth-first traversal, over the neighbour maps and over the
//! adjacency matrix.
//!
//! Every visited vertex is reported to the observer twice ("visiting", then
//! "visited") and the cancellation token is polled before each visit.

use crate::error::GraphResult;
use crate::graph::{Graph, Layout};
use crate::observer::{Color, RunContext};
use crate::vertex::VertexId;
use std::collections::VecDeque;

impl Graph {
    /// Breadth-first traversal from `start`, walking neighbour maps.
    pub fn bfs(&self, start: &str, ctx: &mut RunContext<'_>) -> GraphResult<Vec<VertexId>> {
        let start = self.require(start)?;
        let layout = self.layout();
        let adjacency = neighbour_lists(&layout);
        ctx.paint_all(Color::Unvisited);

        let n = layout.len();
        let mut seen = vec![false; n];
        let mut queue = VecDeque::new();
        let mut order = Vec::with_capacity(n);

        if let Some(s) = layout.index_of(start) {
            seen[s] = true;
            queue.push_back(s);
        }
        while let Some(i) = queue.pop_front() {
            ctx.checkpoint()?;
            ctx.visit(layout.vertices[i]);
            order.push(layout.ids[i]);
            for &j in &adjacency[i] {
                if !seen[j] {
                    seen[j] = true;
                    queue.push_back(j);
                }
            }
        }
        tracing::debug!(start = self.name_of(start), visited = order.len(), "bfs finished");
        Ok(order)
    }

    /// Breadth-first traversal from `start`, scanning adjacency matrix rows.
    pub fn bfs_matrix(&self, start: &str, ctx: &mut RunContext<'_>) -> GraphResult<Vec<VertexId>> {
        let start = self.require(start)?;
        let layout = self.layout();
        let matrix = self.adj_matrix();
        ctx.paint_all(Color::Unvisited);

        let n = layout.len();
        let mut seen = vec![false; n];
        let mut queue = VecDeque::new();
        let mut order = Vec::with_capacity(n);

        if let Some(s) = layout.index_of(start) {
            seen[s] = true;
            queue.push_back(s);
        }
        while let Some(i) = queue.pop_front() {
            ctx.checkpoint()?;
            ctx.visit(layout.vertices[i]);
            order.push(layout.ids[i]);
            for j in 0..n {
                if matrix[i][j] != 0 && !seen[j] {
                    seen[j] = true;
                    queue.push_back(j);
                }
            }
        }
        Ok(order)
    }

    /// Depth-first traversal from `start`, walking neighbour maps.
    ///
    /// Visits in the same order as the recursive formulation; the explicit
    /// stack holds each vertex's position in its neighbour list.
    pub fn dfs(&self, start: &str, ctx: &mut RunContext<'_>) -> GraphResult<Vec<VertexId>> {
        let start = self.require(start)?;
        let layout = self.layout();
        let adjacency = neighbour_lists(&layout);
        ctx.paint_all(Color::Unvisited);

        let n = layout.len();
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut stack: Vec<(usize, usize)> = Vec::new();

        if let Some(s) = layout.index_of(start) {
            ctx.checkpoint()?;
            visited[s] = true;
            ctx.visit(layout.vertices[s]);
            order.push(layout.ids[s]);
            stack.push((s, 0));
        }
        while let Some(frame) = stack.last_mut() {
            let (i, cursor) = *frame;
            let next = adjacency[i][cursor..]
                .iter()
                .position(|&j| !visited[j])
                .map(|k| cursor + k);
            match next {
                Some(k) => {
                    frame.1 = k + 1;
                    let j = adjacency[i][k];
                    ctx.checkpoint()?;
                    visited[j] = true;
                    ctx.visit(layout.vertices[j]);
                    order.push(layout.ids[j]);
                    stack.push((j, 0));
                }
                None => {
                    stack.pop();
                }
            }
        }
        tracing::debug!(start = self.name_of(start), visited = order.len(), "dfs finished");
        Ok(order)
    }

    /// Depth-first traversal from `start`, scanning adjacency matrix rows
    /// in column order.
    pub fn dfs_matrix(&self, start: &str, ctx: &mut RunContext<'_>) -> GraphResult<Vec<VertexId>> {
        let start = self.require(start)?;
        let layout = self.layout();
        let matrix = self.adj_matrix();
        ctx.paint_all(Color::Unvisited);

        let n = layout.len();
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        // (row, next column to inspect)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        if let Some(s) = layout.index_of(start) {
            ctx.checkpoint()?;
            visited[s] = true;
            ctx.visit(layout.vertices[s]);
            order.push(layout.ids[s]);
            stack.push((s, 0));
        }
        while let Some(frame) = stack.last_mut() {
            let (i, cursor) = *frame;
            match (cursor..n).find(|&j| matrix[i][j] != 0 && !visited[j]) {
                Some(j) => {
                    frame.1 = j + 1;
                    ctx.checkpoint()?;
                    visited[j] = true;
                    ctx.visit(layout.vertices[j]);
                    order.push(layout.ids[j]);
                    stack.push((j, 0));
                }
                None => {
                    stack.pop();
                }
            }
        }
        Ok(order)
    }
}

/// Neighbour positions of every vertex, in neighbour-map insertion order.
pub(crate) fn neighbour_lists(layout: &Layout<'_>) -> Vec<Vec<usize>> {
    (0..layout.len())
        .map(|i| layout.neighbours(i).map(|(j, _)| j).collect())
        .collect()
}
