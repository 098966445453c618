//! Structured error types for the Eulera workspace.

use thiserror::Error;

/// Unified error type for all Eulera operations.
#[derive(Debug, Error)]
pub enum EuleraError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed read file)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad k, malformed configuration)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The degree imbalance of the graph rules out an Eulerian path.
    ///
    /// `sources` counts nodes with `out - in == 1`, `sinks` counts nodes with
    /// `in - out == 1`.
    #[error("unbalanced graph ({sources} sources, {sinks} sinks): {detail}")]
    UnbalancedGraph {
        sources: usize,
        sinks: usize,
        detail: String,
    },

    /// The edges span more than one component, so a walk from the start node
    /// covers only `consumed` of the `total` edges.
    #[error("disconnected graph: traversal consumed {consumed} of {total} edges")]
    DisconnectedGraph { consumed: usize, total: usize },
}

/// Convenience alias used throughout the Eulera workspace.
pub type Result<T> = std::result::Result<T, EuleraError>;
