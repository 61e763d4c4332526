//! The algorithm suite. Every algorithm is an inherent method on
//! [`Graph`](crate::Graph) taking a [`RunContext`](crate::RunContext).

pub mod euler;
pub mod hamilton;
pub mod mst;
pub mod scc;
pub mod shortest;
pub mod traversal;

pub use euler::EulerStrategy;
pub use hamilton::{HamiltonMethod, SymbolicMatrix, Walk};
pub use shortest::{add_distance, FloydResult, INFINITY};
