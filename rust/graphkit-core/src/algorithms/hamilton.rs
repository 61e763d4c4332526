//! Hamiltonian cycle search.
//!
//! Three independent methods over directed adjacency (a nonzero matrix
//! cell). All of them are exponential and meant for small graphs; each
//! extension step polls the cancellation token. Graphs with fewer than two
//! vertices have no Hamiltonian cycle. Cycles are returned with the start
//! vertex repeated at the end.

use crate::error::GraphResult;
use crate::graph::Graph;
use crate::observer::RunContext;
use crate::vertex::{VertexId, Weight};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Search method used by the command-line harness.
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
pub enum HamiltonMethod {
    #[default]
    Backtracking,
    Algebraic,
    RobertsFlores,
}

// ---------------------------------------------------------------------------
// Symbolic matrix
// ---------------------------------------------------------------------------

/// A walk stored as the vertex positions after its row vertex, ending in its
/// column vertex.
pub type Walk = Vec<usize>;

/// Matrix whose cells are sets of walks rather than numbers.
///
/// Cell `(i, j)` of the k-th power holds every simple walk of length k from
/// `i` to `j`. Multiplying by the adjacency structure extends each walk by
/// one hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolicMatrix {
    names: Vec<String>,
    cells: Vec<Vec<Vec<Walk>>>,
}

impl SymbolicMatrix {
    /// First power: `{j}` in cell `(i, j)` for every edge with `i != j`.
    fn initial(names: Vec<String>, adjacency: &[Vec<Weight>]) -> Self {
        let cells = adjacency
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, &w)| if w != 0 && i != j { vec![vec![j]] } else { Vec::new() })
                    .collect()
            })
            .collect();
        Self { names, cells }
    }

    /// Next power. A walk is extended to `j` only if it does not already
    /// pass through `j`; returning to the row vertex is allowed on the
    /// `closing` step only.
    fn extend(
        &self,
        adjacency: &[Vec<Weight>],
        closing: bool,
        ctx: &RunContext<'_>,
    ) -> GraphResult<Self> {
        let n = self.size();
        let mut cells = vec![vec![Vec::new(); n]; n];
        for (i, row) in cells.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                if j == i && !closing {
                    continue;
                }
                for m in 0..n {
                    if m == j || adjacency[m][j] == 0 {
                        continue;
                    }
                    for walk in &self.cells[i][m] {
                        ctx.checkpoint()?;
                        if walk.contains(&j) {
                            continue;
                        }
                        let mut longer = walk.clone();
                        longer.push(j);
                        cell.push(longer);
                    }
                }
            }
        }
        Ok(Self {
            names: self.names.clone(),
            cells,
        })
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, i: usize, j: usize) -> &[Walk] {
        &self.cells[i][j]
    }

    /// Diagonal terms at `i` that visit every other vertex exactly once.
    pub fn cycles_through(&self, i: usize) -> Vec<Walk> {
        let n = self.size();
        self.cells[i][i]
            .iter()
            .filter(|walk| {
                let hops = &walk[..walk.len().saturating_sub(1)];
                walk.len() == n && hops.iter().all(|&h| h != i)
            })
            .cloned()
            .collect()
    }

    fn render_walk(&self, row: usize, walk: &[usize]) -> String {
        std::iter::once(row)
            .chain(walk.iter().copied())
            .map(|p| self.names[p].as_str())
            .collect()
    }
}

impl fmt::Display for SymbolicMatrix {
    /// One line per row, cells separated by ` | `, walks within a cell by a
    /// space, `0` for an empty cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            let rendered: Vec<String> = row
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        "0".to_string()
                    } else {
                        cell.iter()
                            .map(|walk| self.render_walk(i, walk))
                            .collect::<Vec<_>>()
                            .join(" ")
                    }
                })
                .collect();
            writeln!(f, "{}", rendered.join(" | "))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Search methods
// ---------------------------------------------------------------------------

impl Graph {
    /// Depth-first permutation search from the first vertex, pruned by
    /// adjacency. Returns the first cycle found.
    pub fn hamilton_backtracking(
        &self,
        ctx: &mut RunContext<'_>,
    ) -> GraphResult<Option<Vec<VertexId>>> {
        let matrix = self.adj_matrix();
        let n = matrix.len();
        if n < 2 {
            return Ok(None);
        }

        let mut path = vec![0usize];
        let mut on_path = vec![false; n];
        on_path[0] = true;
        // cursors[d]: next column to try after path[d]
        let mut cursors = vec![0usize];

        loop {
            ctx.checkpoint()?;
            let depth = path.len();
            let last = path[depth - 1];
            if depth == n && matrix[last][0] != 0 {
                path.push(0);
                return Ok(Some(self.ids_at(&path)));
            }
            let next = (cursors[depth - 1]..n).find(|&j| matrix[last][j] != 0 && !on_path[j]);
            match next {
                Some(j) => {
                    cursors[depth - 1] = j + 1;
                    on_path[j] = true;
                    path.push(j);
                    cursors.push(0);
                }
                None if depth == 1 => return Ok(None),
                None => {
                    on_path[last] = false;
                    path.pop();
                    cursors.pop();
                }
            }
        }
    }

    /// The symbolic adjacency matrix raised through N−1 multiplications.
    pub fn hamilton_matrix(&self, ctx: &mut RunContext<'_>) -> GraphResult<SymbolicMatrix> {
        let matrix = self.adj_matrix();
        let n = matrix.len();
        let names = self.vertex_names().into_iter().map(str::to_string).collect();
        let mut power = SymbolicMatrix::initial(names, &matrix);
        for step in 1..n {
            power = power.extend(&matrix, step + 1 == n, ctx)?;
        }
        Ok(power)
    }

    /// Hamiltonian cycles through `start` read off the diagonal of the
    /// symbolic matrix power.
    pub fn hamilton_algebraic(
        &self,
        start: &str,
        ctx: &mut RunContext<'_>,
    ) -> GraphResult<Vec<Vec<VertexId>>> {
        let start = self.require(start)?;
        if self.vertex_count() < 2 {
            return Ok(Vec::new());
        }
        let Some(s) = self.position_of(start) else {
            return Ok(Vec::new());
        };
        let power = self.hamilton_matrix(ctx)?;
        let cycles: Vec<Vec<VertexId>> = power
            .cycles_through(s)
            .iter()
            .map(|walk| {
                let mut full = vec![s];
                full.extend_from_slice(walk);
                self.ids_at(&full)
            })
            .collect();
        tracing::debug!(cycles = cycles.len(), "algebraic search finished");
        Ok(cycles)
    }

    /// Roberts–Flores enumeration of every Hamiltonian cycle from `start`.
    ///
    /// Each vertex keeps a counter into its candidate list (its successors in
    /// column order); backtracking out of a vertex resets its counter.
    pub fn hamilton_roberts_flores(
        &self,
        start: &str,
        ctx: &mut RunContext<'_>,
    ) -> GraphResult<Vec<Vec<VertexId>>> {
        let start = self.require(start)?;
        let matrix = self.adj_matrix();
        let n = matrix.len();
        let Some(s) = self.position_of(start) else {
            return Ok(Vec::new());
        };
        if n < 2 {
            return Ok(Vec::new());
        }

        let candidates: Vec<Vec<usize>> = matrix
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(j, &w)| w != 0 && j != i)
                    .map(|(j, _)| j)
                    .collect()
            })
            .collect();
        let mut counter = vec![0usize; n];
        let mut on_path = vec![false; n];
        let mut path = vec![s];
        on_path[s] = true;
        let mut cycles = Vec::new();

        while let Some(&v) = path.last() {
            ctx.checkpoint()?;
            if path.len() == n && matrix[v][s] != 0 {
                let mut cycle = path.clone();
                cycle.push(s);
                cycles.push(self.ids_at(&cycle));
            }
            let next = candidates[v][counter[v]..]
                .iter()
                .position(|&c| !on_path[c])
                .map(|offset| counter[v] + offset);
            match next {
                Some(k) => {
                    counter[v] = k + 1;
                    let c = candidates[v][k];
                    on_path[c] = true;
                    path.push(c);
                }
                None => {
                    counter[v] = 0;
                    on_path[v] = false;
                    path.pop();
                }
            }
        }
        tracing::debug!(cycles = cycles.len(), "roberts-flores finished");
        Ok(cycles)
    }

    fn ids_at(&self, positions: &[usize]) -> Vec<VertexId> {
        let ids = self.vertex_ids();
        positions.iter().map(|&p| ids[p]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelToken;
    use crate::error::GraphError;

    fn undirected(names: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new();
        for name in names {
            g.add_vertex(name).unwrap();
        }
        for (a, b) in edges {
            g.add_edge_both_ways(a, b, 1).unwrap();
        }
        g
    }

    fn square() -> Graph {
        undirected(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        )
    }

    fn complete4() -> Graph {
        undirected(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("A", "D"), ("B", "C"), ("B", "D"), ("C", "D")],
        )
    }

    fn star() -> Graph {
        undirected(&["A", "B", "C", "D"], &[("A", "B"), ("A", "C"), ("A", "D")])
    }

    fn joined(g: &Graph, cycles: &[Vec<VertexId>]) -> Vec<String> {
        cycles.iter().map(|c| g.join_names(c)).collect()
    }

    // -- Backtracking -------------------------------------------------------

    #[test]
    fn backtracking_finds_square_cycle() {
        let g = square();
        let cycle = g.hamilton_backtracking(&mut RunContext::new()).unwrap().unwrap();
        assert_eq!(g.join_names(&cycle), "ABCDA");
    }

    #[test]
    fn backtracking_reports_none_for_star() {
        assert!(star().hamilton_backtracking(&mut RunContext::new()).unwrap().is_none());
    }

    #[test]
    fn backtracking_needs_two_vertices() {
        let mut g = Graph::new();
        g.add_vertex("A").unwrap();
        g.add_edge("A", "A", 1).unwrap();
        assert!(g.hamilton_backtracking(&mut RunContext::new()).unwrap().is_none());
        assert!(Graph::new().hamilton_backtracking(&mut RunContext::new()).unwrap().is_none());
    }

    #[test]
    fn backtracking_respects_direction() {
        let g = Graph::from_matrix(&[vec![0, 0, 1], vec![1, 0, 0], vec![0, 1, 0]]).unwrap();
        let cycle = g.hamilton_backtracking(&mut RunContext::new()).unwrap().unwrap();
        assert_eq!(g.join_names(&cycle), "ACBA");
    }

    #[test]
    fn two_vertex_cycle() {
        let g = undirected(&["A", "B"], &[("A", "B")]);
        let cycle = g.hamilton_backtracking(&mut RunContext::new()).unwrap().unwrap();
        assert_eq!(g.join_names(&cycle), "ABA");
    }

    // -- Algebraic ----------------------------------------------------------

    #[test]
    fn algebraic_square_has_both_orientations() {
        let g = square();
        let cycles = g.hamilton_algebraic("A", &mut RunContext::new()).unwrap();
        let mut names = joined(&g, &cycles);
        names.sort();
        assert_eq!(names, vec!["ABCDA", "ADCBA"]);
    }

    #[test]
    fn algebraic_complete_graph_has_six_cycles() {
        let g = complete4();
        let cycles = g.hamilton_algebraic("B", &mut RunContext::new()).unwrap();
        assert_eq!(cycles.len(), 6);
        assert!(cycles.iter().all(|c| g.name_of(c[0]) == "B" && c.len() == 5));
    }

    #[test]
    fn algebraic_star_has_none() {
        assert!(star().hamilton_algebraic("A", &mut RunContext::new()).unwrap().is_empty());
    }

    #[test]
    fn algebraic_missing_start() {
        assert!(matches!(
            square().hamilton_algebraic("Z", &mut RunContext::new()),
            Err(GraphError::NotFound(_))
        ));
    }

    #[test]
    fn symbolic_matrix_first_power_renders_edges() {
        let g = undirected(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let power = SymbolicMatrix::initial(
            vec!["A".into(), "B".into(), "C".into()],
            &g.adj_matrix(),
        );
        assert_eq!(power.to_string(), "0 | AB | 0\nBA | 0 | BC\n0 | CB | 0\n");
    }

    #[test]
    fn symbolic_matrix_final_power_of_triangle() {
        let g = undirected(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let power = g.hamilton_matrix(&mut RunContext::new()).unwrap();
        assert_eq!(power.size(), 3);
        assert_eq!(power.cell(0, 0), &[vec![2, 1, 0], vec![1, 2, 0]]);
        assert!(power.cell(0, 1).is_empty());
    }

    // -- Roberts–Flores -----------------------------------------------------

    #[test]
    fn roberts_flores_enumerates_square() {
        let g = square();
        let cycles = g.hamilton_roberts_flores("A", &mut RunContext::new()).unwrap();
        assert_eq!(joined(&g, &cycles), vec!["ABCDA", "ADCBA"]);
    }

    #[test]
    fn roberts_flores_agrees_with_algebraic() {
        let g = complete4();
        let mut rf = joined(&g, &g.hamilton_roberts_flores("C", &mut RunContext::new()).unwrap());
        let mut alg = joined(&g, &g.hamilton_algebraic("C", &mut RunContext::new()).unwrap());
        rf.sort();
        alg.sort();
        assert_eq!(rf, alg);
        assert_eq!(rf.len(), 6);
    }

    #[test]
    fn roberts_flores_star_has_none() {
        assert!(star()
            .hamilton_roberts_flores("B", &mut RunContext::new())
            .unwrap()
            .is_empty());
    }

    // -- Cancellation -------------------------------------------------------

    #[test]
    fn every_method_polls_the_token() {
        let token = CancelToken::new();
        token.cancel();
        let g = complete4();
        let mut ctx = RunContext::new().with_cancel(&token);
        assert!(g.hamilton_backtracking(&mut ctx).unwrap_err().is_cancelled());
        assert!(g.hamilton_algebraic("A", &mut ctx).unwrap_err().is_cancelled());
        assert!(g
            .hamilton_roberts_flores("A", &mut ctx)
            .unwrap_err()
            .is_cancelled());
    }

    #[test]
    fn method_names_are_kebab_case() {
        assert_eq!(HamiltonMethod::RobertsFlores.to_string(), "roberts-flores");
        assert_eq!(
            "algebraic".parse::<HamiltonMethod>().unwrap(),
            HamiltonMethod::Algebraic
        );
    }
}
