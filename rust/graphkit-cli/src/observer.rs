//! Terminal observer: logs each drawing callback and honours the step delay.

use graphkit_core::{Color, GraphObserver, Vertex};
use std::time::Duration;

/// Logs callbacks through `tracing` and sleeps for the requested frame delay.
#[derive(Debug, Default)]
pub struct TracingObserver {
    frames: usize,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks received so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl GraphObserver for TracingObserver {
    fn draw_vertex(&mut self, vertex: &Vertex, color: Color, delay: Duration) {
        self.frames += 1;
        tracing::debug!(vertex = vertex.name(), %color, "vertex");
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    fn draw_vertices(&mut self, color: Color) {
        self.frames += 1;
        tracing::debug!(%color, "all vertices");
    }

    fn draw_edge(&mut self, from: &Vertex, to: &Vertex, color: Color) {
        self.frames += 1;
        tracing::debug!(from = from.name(), to = to.name(), %color, "edge");
    }
}
