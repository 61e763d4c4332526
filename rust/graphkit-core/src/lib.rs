//! graphkit core
//!
//! A mutable weighted graph with named vertices and the classic algorithm
//! suite run against it: traversal, minimum spanning trees, shortest paths,
//! strongly connected components, Euler and Hamiltonian cycles.
//!
//! Algorithms are methods on [`Graph`] and take a [`RunContext`] carrying an
//! optional [`GraphObserver`] for visualization and an optional
//! [`CancelToken`].

pub mod algorithms;
pub mod cancel;
pub mod edge;
pub mod error;
pub mod format;
pub mod graph;
pub mod observer;
pub mod vertex;

pub use algorithms::{
    add_distance, EulerStrategy, FloydResult, HamiltonMethod, SymbolicMatrix, Walk, INFINITY,
};
pub use cancel::CancelToken;
pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use graph::{vertex_label, Graph, UndirectedEdge};
pub use observer::{Color, GraphObserver, NoopObserver, ObserverEvent, RecordingObserver, RunContext};
pub use vertex::{Point, Vertex, VertexId, Weight, MAX_WEIGHT};
