//! Visualization hooks and the per-run context threaded through algorithms.
//!
//! An algorithm never draws anything itself. It reports progress to an
//! optional [`GraphObserver`] passed in through a [`RunContext`]; every
//! callback defaults to a no-op, so an observer only overrides what it
//! renders. The context also carries the cancellation token and the step
//! delay hint used for animation.

use crate::cancel::CancelToken;
use crate::error::{GraphError, GraphResult};
use crate::vertex::Vertex;
use serde::Serialize;
use std::time::Duration;

/// Colors the engine asks an observer to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Color {
    /// Reset state painted over every vertex before a traversal.
    Unvisited,
    /// Transient state while a vertex is being processed.
    Visiting,
    /// Final state of a processed vertex.
    Visited,
    /// Edges selected by MST, path reconstruction or an Euler walk.
    Highlight,
    /// Membership in the n-th strongly connected component.
    Component(usize),
}

/// Receives drawing callbacks during a run.
pub trait GraphObserver {
    /// Paint one vertex. `delay` is how long the frame should stay visible;
    /// observers that do not animate ignore it.
    fn draw_vertex(&mut self, _vertex: &Vertex, _color: Color, _delay: Duration) {}

    /// Paint every vertex of the graph.
    fn draw_vertices(&mut self, _color: Color) {}

    /// Paint the directed edge `from -> to`.
    fn draw_edge(&mut self, _from: &Vertex, _to: &Vertex, _color: Color) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl GraphObserver for NoopObserver {}

/// One recorded observer callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ObserverEvent {
    Vertex {
        name: String,
        color: Color,
        delay: Duration,
    },
    AllVertices {
        color: Color,
    },
    Edge {
        from: String,
        to: String,
        color: Color,
    },
}

/// Observer that records every callback, for tests and replay.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<ObserverEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of vertices painted with `color`, in callback order.
    pub fn vertices_painted(&self, color: Color) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ObserverEvent::Vertex { name, color: c, .. } if *c == color => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(from, to)` pairs of highlighted edges, in callback order.
    pub fn edges_highlighted(&self) -> Vec<(String, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ObserverEvent::Edge {
                    from,
                    to,
                    color: Color::Highlight,
                } => Some((from.clone(), to.clone())),
                _ => None,
            })
            .collect()
    }
}

impl GraphObserver for RecordingObserver {
    fn draw_vertex(&mut self, vertex: &Vertex, color: Color, delay: Duration) {
        self.events.push(ObserverEvent::Vertex {
            name: vertex.name().to_string(),
            color,
            delay,
        });
    }

    fn draw_vertices(&mut self, color: Color) {
        self.events.push(ObserverEvent::AllVertices { color });
    }

    fn draw_edge(&mut self, from: &Vertex, to: &Vertex, color: Color) {
        self.events.push(ObserverEvent::Edge {
            from: from.name().to_string(),
            to: to.name().to_string(),
            color,
        });
    }
}

/// Per-run state: observer, cancellation token and step delay.
#[derive(Default)]
pub struct RunContext<'a> {
    observer: Option<&'a mut dyn GraphObserver>,
    cancel: Option<&'a CancelToken>,
    step_delay: Duration,
}

impl<'a> RunContext<'a> {
    /// A context with no observer, no cancellation and no delay.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(mut self, observer: &'a mut dyn GraphObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_cancel(mut self, token: &'a CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Fails with [`GraphError::Cancelled`] once the token has been tripped.
    pub(crate) fn checkpoint(&self) -> GraphResult<()> {
        match self.cancel {
            Some(token) if token.is_cancelled() => {
                tracing::debug!("run cancelled");
                Err(GraphError::Cancelled)
            }
            _ => Ok(()),
        }
    }

    /// The two-phase visit callback: "visiting" held for the step delay,
    /// then "visited".
    pub(crate) fn visit(&mut self, vertex: &Vertex) {
        let delay = self.step_delay;
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.draw_vertex(vertex, Color::Visiting, delay);
            observer.draw_vertex(vertex, Color::Visited, Duration::ZERO);
        }
    }

    pub(crate) fn paint_vertex(&mut self, vertex: &Vertex, color: Color) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.draw_vertex(vertex, color, Duration::ZERO);
        }
    }

    pub(crate) fn paint_all(&mut self, color: Color) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.draw_vertices(color);
        }
    }

    pub(crate) fn paint_edge(&mut self, from: &Vertex, to: &Vertex, color: Color) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.draw_edge(from, to, color);
        }
    }
}
