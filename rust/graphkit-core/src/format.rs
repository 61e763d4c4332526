//! Plain-text persistence.
//!
//! ```text
//! 0 1 0
//! 1 0 2
//! 0 2 0
//! -----
//! 40;60
//! 120;60
//! 80;140
//! ```
//!
//! The adjacency matrix, one row per line, then the separator line, then one
//! `x;y` pair per vertex in matrix order. Blank lines and carriage returns
//! are ignored on load. A file without a separator is a bare matrix and
//! loads with no positions. Vertex names are not stored; loading re-derives
//! them from matrix position. A vertex without a position is written as
//! `0;0` and so comes back placed at the origin.

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::vertex::{Point, Weight, MAX_WEIGHT};
use std::fmt::Write as _;
use std::path::Path;

/// Line between the matrix and the coordinate section.
pub const SEPARATOR: &str = "-----";

impl Graph {
    /// Serialize to the text format. A vertex without a position is written
    /// as `0;0`. An empty graph serializes to an empty string.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in self.adj_matrix() {
            let cells: Vec<String> = row.iter().map(Weight::to_string).collect();
            let _ = writeln!(out, "{}", cells.join(" "));
        }
        if out.is_empty() {
            return out;
        }
        let _ = writeln!(out, "{SEPARATOR}");
        for (_, vertex) in self.vertices() {
            let p = vertex.position().unwrap_or_default();
            let _ = writeln!(out, "{};{}", p.x, p.y);
        }
        out
    }

    /// Parse the text format.
    pub fn from_text(text: &str) -> GraphResult<Graph> {
        let mut rows: Vec<Vec<Weight>> = Vec::new();
        let mut points: Vec<(usize, Point)> = Vec::new();
        let mut in_matrix = true;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end_matches('\r').trim();
            if line.is_empty() {
                continue;
            }
            if line == SEPARATOR {
                in_matrix = false;
                continue;
            }
            if in_matrix {
                rows.push(parse_row(line, line_no)?);
            } else {
                points.push((line_no, parse_point(line, line_no)?));
            }
        }

        let mut graph = Graph::from_matrix(&rows)?;
        if in_matrix {
            return Ok(graph);
        }
        if points.len() != graph.vertex_count() {
            let line = points.last().map(|(l, _)| *l).unwrap_or(0);
            return Err(GraphError::Parse {
                line,
                message: format!(
                    "expected {} coordinate lines, found {}",
                    graph.vertex_count(),
                    points.len()
                ),
            });
        }
        let names: Vec<String> = graph.vertex_names().into_iter().map(str::to_string).collect();
        for (name, (_, point)) in names.iter().zip(points) {
            graph.set_position(name, Some(point))?;
        }
        Ok(graph)
    }

    /// Write the text format to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> GraphResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_text())?;
        tracing::debug!(path = %path.display(), vertices = self.vertex_count(), "graph saved");
        Ok(())
    }

    /// Read a graph from `path`.
    pub fn load(path: impl AsRef<Path>) -> GraphResult<Graph> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let graph = Graph::from_text(&text)?;
        tracing::debug!(path = %path.display(), vertices = graph.vertex_count(), "graph loaded");
        Ok(graph)
    }
}

fn parse_row(line: &str, line_no: usize) -> GraphResult<Vec<Weight>> {
    line.split_whitespace()
        .map(|cell| {
            match cell.parse::<Weight>() {
                Ok(w) if w.checked_abs().is_some_and(|a| a <= MAX_WEIGHT) => Ok(w),
                Ok(_) => Err(GraphError::Parse {
                    line: line_no,
                    message: format!("weight `{cell}` is out of range"),
                }),
                Err(_) => Err(GraphError::Parse {
                    line: line_no,
                    message: format!("invalid weight `{cell}`"),
                }),
            }
        })
        .collect()
}

fn parse_point(line: &str, line_no: usize) -> GraphResult<Point> {
    let invalid = || GraphError::Parse {
        line: line_no,
        message: format!("invalid coordinates `{line}`, expected `x;y`"),
    };
    let (x, y) = line.split_once(';').ok_or_else(invalid)?;
    let x = x.trim().parse::<f32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f32>().map_err(|_| invalid())?;
    Ok(Point::new(x, y))
}
