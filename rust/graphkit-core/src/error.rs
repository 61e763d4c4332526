//! Error taxonomy for graph mutation, algorithms and persistence.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex not found: {0}")]
    NotFound(String),
    #[error("vertex already exists: {0}")]
    DuplicateName(String),
    #[error("edge already exists: {from} -> {to}")]
    DuplicateEdge { from: String, to: String },
    #[error("matrix must be square, got {rows} rows and a row of {cols} columns")]
    Shape { rows: usize, cols: usize },
    #[error("graph contains a negative-weight cycle")]
    NegativeCycle,
    #[error("edge weight {0} is out of range")]
    WeightOutOfRange(i64),
    #[error("negative edge weight {weight} on {from} -> {to}")]
    NegativeWeight { from: String, to: String, weight: i64 },
    #[error("no path from {from} to {to}")]
    Unreachable { from: String, to: String },
    #[error("run cancelled")]
    Cancelled,
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// True for cooperative cancellation, which callers render as an empty
    /// result rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GraphError::Cancelled)
    }

    /// The message to show an end user, or `None` for a cancelled run.
    pub fn user_message(&self) -> Option<String> {
        if self.is_cancelled() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
