//! Errors surfaced by the command-line harness.

use graphkit_core::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("config: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// True when the run stopped because the user pressed Ctrl-C.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CliError::Graph(e) if e.is_cancelled())
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_graph_error_is_cancelled() {
        assert!(CliError::from(GraphError::Cancelled).is_cancelled());
        assert!(!CliError::Usage("x".into()).is_cancelled());
    }

    #[test]
    fn graph_errors_display_transparently() {
        let err = CliError::from(GraphError::NotFound("Q".into()));
        assert_eq!(err.to_string(), "vertex not found: Q");
    }
}
