//! Subcommand implementations.
//!
//! Each command returns a [`Report`] holding both renderings of its result;
//! `main` picks one according to `--json` or the configured output format.

use crate::colors::Palette;
use crate::config::{GraphkitConfig, OutputFormat, CONFIG_FILE};
use crate::error::{CliError, CliResult};
use crate::observer::TracingObserver;
use graphkit_core::{
    add_distance, CancelToken, EulerStrategy, Graph, GraphResult, HamiltonMethod, Point, RunContext, VertexId,
    Weight, INFINITY,
};
use serde::Serialize;
use serde_json::json;
use std::fmt::Write as _;
use std::path::Path;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Result of one command, ready for either output format.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub text: String,
    pub json: serde_json::Value,
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> CliResult<String> {
        match format {
            OutputFormat::Text => Ok(self.text.clone()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&self.json)?),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Traversal {
    Bfs,
    Dfs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SpanningTree {
    Kruskal,
    Prim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SingleSource {
    Dijkstra,
    BellmanFord,
}

#[derive(Debug, Serialize)]
struct Distance<'a> {
    vertex: &'a str,
    /// `None` for an unreachable vertex.
    distance: Option<Weight>,
}

#[derive(Debug, Serialize)]
struct TreeEdge<'a> {
    a: &'a str,
    b: &'a str,
    weight: Weight,
}

fn finite(d: Weight) -> Option<Weight> {
    (d != INFINITY).then_some(d)
}

fn show_distance(d: Weight) -> String {
    finite(d).map_or_else(|| "inf".to_string(), |d| d.to_string())
}

/// Right-align every cell to the widest one.
fn aligned(rows: &[Vec<String>]) -> String {
    let width = rows.iter().flatten().map(String::len).max().unwrap_or(1);
    let mut out = String::new();
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| format!("{:>width$}", c)).collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Everything a command needs besides its arguments.
pub struct Session {
    config: GraphkitConfig,
    cancel: CancelToken,
    palette: Palette,
}

impl Session {
    pub fn new(config: GraphkitConfig, cancel: CancelToken, palette: Palette) -> Self {
        Self {
            config,
            cancel,
            palette,
        }
    }

    /// Run an algorithm with the terminal observer, the session's
    /// cancellation token and the configured step delay.
    fn run<T>(&self, f: impl FnOnce(&mut RunContext<'_>) -> GraphResult<T>) -> CliResult<T> {
        let mut observer = TracingObserver::new();
        let result = {
            let mut ctx = RunContext::new()
                .with_observer(&mut observer)
                .with_cancel(&self.cancel)
                .with_step_delay(self.config.run.step_delay());
            f(&mut ctx)
        };
        tracing::debug!(frames = observer.frames(), ok = result.is_ok(), "run finished");
        Ok(result?)
    }

    fn nothing(&self, message: &str) -> String {
        format!("{}\n", self.palette.gray(message))
    }

    // -- Files --------------------------------------------------------------

    /// Write the default config template into `dir`.
    pub fn init(&self, dir: &Path) -> CliResult<Report> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            return Err(CliError::Usage(format!("{} already exists", path.display())));
        }
        std::fs::write(&path, GraphkitConfig::default_template())?;
        Ok(Report {
            text: format!("{} {}\n", self.palette.status_label("Created"), path.display()),
            json: json!({ "created": path.display().to_string() }),
        })
    }

    /// Read a bare matrix (or a full graph file), lay out unplaced vertices
    /// on a grid, and save it in the graph format.
    pub fn import(&self, input: &Path, output: &Path) -> CliResult<Report> {
        let mut graph = Graph::load(input)?;
        grid_layout(&mut graph)?;
        graph.save(output)?;
        Ok(Report {
            text: format!(
                "{} {} ({} vertices, {} edges)\n",
                self.palette.status_label("Imported"),
                output.display(),
                graph.vertex_count(),
                graph.edge_count()
            ),
            json: json!({
                "output": output.display().to_string(),
                "vertices": graph.vertex_count(),
                "edges": graph.edge_count(),
            }),
        })
    }

    // -- Matrices -----------------------------------------------------------

    pub fn matrix(&self, graph: &Graph) -> CliResult<Report> {
        Ok(Report {
            text: graph.matrix_string(),
            json: json!({
                "vertices": graph.vertex_names(),
                "matrix": graph.adj_matrix(),
            }),
        })
    }

    pub fn incidence(&self, graph: &Graph) -> CliResult<Report> {
        let matrix = graph.incidence_matrix();
        let rows: Vec<Vec<String>> = matrix
            .iter()
            .map(|row| row.iter().map(i32::to_string).collect())
            .collect();
        let text = if graph.edge_records().is_empty() {
            self.nothing("no edges")
        } else {
            aligned(&rows)
        };
        Ok(Report {
            text,
            json: json!({
                "vertices": graph.vertex_names(),
                "matrix": matrix,
            }),
        })
    }

    // -- Algorithms ---------------------------------------------------------

    pub fn traverse(
        &self,
        graph: &Graph,
        kind: Traversal,
        from: &str,
        use_matrix: bool,
    ) -> CliResult<Report> {
        let order = self.run(|ctx| match (kind, use_matrix) {
            (Traversal::Bfs, false) => graph.bfs(from, ctx),
            (Traversal::Bfs, true) => graph.bfs_matrix(from, ctx),
            (Traversal::Dfs, false) => graph.dfs(from, ctx),
            (Traversal::Dfs, true) => graph.dfs_matrix(from, ctx),
        })?;
        let names = graph.names(&order);
        Ok(Report {
            text: format!("{}\n", names.join(" ")),
            json: json!({
                "algorithm": kind.to_string(),
                "matrix": use_matrix,
                "start": from,
                "order": names,
            }),
        })
    }

    pub fn spanning_tree(
        &self,
        graph: &Graph,
        kind: SpanningTree,
        output: Option<&Path>,
    ) -> CliResult<Report> {
        let tree = self.run(|ctx| match kind {
            SpanningTree::Kruskal => graph.kruskal(ctx),
            SpanningTree::Prim => graph.prim(ctx),
        })?;
        let edges: Vec<TreeEdge<'_>> = tree
            .undirected_edges()
            .iter()
            .map(|e| TreeEdge {
                a: tree.name_of(e.a),
                b: tree.name_of(e.b),
                weight: e.weight,
            })
            .collect();

        let mut text = String::new();
        for e in &edges {
            let _ = writeln!(text, "{} - {}  {}", e.a, e.b, e.weight);
        }
        let _ = writeln!(
            text,
            "{} {}",
            self.palette.bold("total weight:"),
            tree.total_weight()
        );
        if let Some(path) = output {
            tree.save(path)?;
            let _ = writeln!(text, "{} {}", self.palette.status_label("Saved"), path.display());
        }
        Ok(Report {
            text,
            json: json!({
                "algorithm": kind.to_string(),
                "edges": edges,
                "total_weight": tree.total_weight(),
            }),
        })
    }

    pub fn distances(&self, graph: &Graph, kind: SingleSource, from: &str) -> CliResult<Report> {
        let dist = self.run(|ctx| match kind {
            SingleSource::Dijkstra => graph.dijkstra(from, ctx),
            SingleSource::BellmanFord => graph.bellman_ford(from, ctx),
        })?;
        let names = graph.vertex_names();
        let rows: Vec<Distance<'_>> = names
            .iter()
            .zip(&dist)
            .map(|(&vertex, &d)| Distance {
                vertex,
                distance: finite(d),
            })
            .collect();

        let mut text = String::new();
        for (name, &d) in names.iter().zip(&dist) {
            let _ = writeln!(text, "{}: {}", self.palette.cyan(name), show_distance(d));
        }
        Ok(Report {
            text,
            json: json!({
                "algorithm": kind.to_string(),
                "start": from,
                "distances": rows,
            }),
        })
    }

    pub fn floyd(&self, graph: &Graph) -> CliResult<Report> {
        let result = self.run(|ctx| graph.floyd(ctx))?;
        let names = graph.vertex_names();
        let mut rows = vec![std::iter::once(String::new())
            .chain(names.iter().map(|n| n.to_string()))
            .collect::<Vec<_>>()];
        for (name, row) in names.iter().zip(&result.dist) {
            rows.push(
                std::iter::once(name.to_string())
                    .chain(row.iter().map(|&d| show_distance(d)))
                    .collect(),
            );
        }
        let dist: Vec<Vec<Option<Weight>>> = result
            .dist
            .iter()
            .map(|row| row.iter().map(|&d| finite(d)).collect())
            .collect();
        let text = if names.is_empty() {
            self.nothing("empty graph")
        } else {
            aligned(&rows)
        };
        Ok(Report {
            text,
            json: json!({
                "vertices": names,
                "dist": dist,
            }),
        })
    }

    pub fn path(&self, graph: &Graph, from: &str, to: &str) -> CliResult<Report> {
        let path = self.run(|ctx| graph.floyd_path(from, to, ctx))?;
        let weight = path_weight(graph, &path);
        let names = graph.names(&path);
        Ok(Report {
            text: format!(
                "{}  {}\n",
                names.join(" -> "),
                self.palette.gray(&format!("(weight {weight})"))
            ),
            json: json!({
                "from": from,
                "to": to,
                "path": names,
                "weight": weight,
            }),
        })
    }

    pub fn scc(&self, graph: &Graph) -> CliResult<Report> {
        let components = self.run(|ctx| graph.scc(ctx))?;
        let named: Vec<Vec<String>> = components.iter().map(|c| graph.names(c)).collect();
        let mut text = String::new();
        for (i, names) in named.iter().enumerate() {
            let _ = writeln!(
                text,
                "{} {}",
                self.palette.bold(&format!("{}:", i + 1)),
                names.join(" ")
            );
        }
        if named.is_empty() {
            text = self.nothing("empty graph");
        }
        Ok(Report {
            text,
            json: json!({ "components": named }),
        })
    }

    pub fn euler(&self, graph: &Graph, strategy: Option<EulerStrategy>) -> CliResult<Report> {
        let strategy = strategy.unwrap_or(self.config.run.euler_strategy);
        let cycle = self.run(|ctx| graph.euler_cycle(strategy, ctx))?;
        let names = graph.names(&cycle);
        let text = if names.is_empty() {
            self.nothing("no euler cycle")
        } else {
            format!("{}\n", self.palette.green(&names.join(" ")))
        };
        Ok(Report {
            text,
            json: json!({
                "strategy": strategy.to_string(),
                "cycle": names,
            }),
        })
    }

    pub fn hamilton(
        &self,
        graph: &Graph,
        method: Option<HamiltonMethod>,
        from: Option<&str>,
        show_matrix: bool,
    ) -> CliResult<Report> {
        let method = method.unwrap_or(self.config.run.hamilton_method);
        let first = start_of(graph);
        let start = from.unwrap_or(first);
        if method == HamiltonMethod::Backtracking && start != first {
            return Err(CliError::Usage(
                "backtracking always starts at the first vertex".to_string(),
            ));
        }

        let cycles: Vec<Vec<VertexId>> = self.run(|ctx| match method {
            HamiltonMethod::Backtracking => {
                Ok(graph.hamilton_backtracking(ctx)?.into_iter().collect())
            }
            HamiltonMethod::Algebraic => graph.hamilton_algebraic(start, ctx),
            HamiltonMethod::RobertsFlores => graph.hamilton_roberts_flores(start, ctx),
        })?;
        let named: Vec<Vec<String>> = cycles.iter().map(|c| graph.names(c)).collect();

        let mut text = String::new();
        if show_matrix {
            let power = self.run(|ctx| graph.hamilton_matrix(ctx))?;
            let _ = write!(text, "{}", power);
        }
        for names in &named {
            let _ = writeln!(text, "{}", self.palette.green(&names.join(" ")));
        }
        if named.is_empty() {
            text.push_str(&self.nothing("no hamiltonian cycle"));
        }
        Ok(Report {
            text,
            json: json!({
                "method": method.to_string(),
                "cycles": named,
            }),
        })
    }
}

fn start_of(graph: &Graph) -> &str {
    graph.vertex_names().first().copied().unwrap_or("")
}

/// Sum of adjacency weights along consecutive vertices of `path`.
fn path_weight(graph: &Graph, path: &[VertexId]) -> Weight {
    path.windows(2)
        .filter_map(|pair| graph.vertex(pair[0])?.weight_to(pair[1]))
        .fold(0, add_distance)
}

/// Place every vertex that has no position on a square grid.
fn grid_layout(graph: &mut Graph) -> CliResult<()> {
    let n = graph.vertex_count();
    let cols = (1..=n).find(|c| c * c >= n).unwrap_or(1);
    let unplaced: Vec<(usize, String)> = graph
        .vertices()
        .enumerate()
        .filter(|(_, (_, v))| v.position().is_none())
        .map(|(i, (_, v))| (i, v.name().to_string()))
        .collect();
    for (i, name) in unplaced {
        let x = 80.0 + 120.0 * (i % cols) as f32;
        let y = 80.0 + 120.0 * (i / cols) as f32;
        graph.set_position(&name, Some(Point::new(x, y)))?;
    }
    Ok(())
}
