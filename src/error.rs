//! Error types for the Eight Puzzle solver.

use thiserror::Error;

/// Main error type for the solver library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board configuration '{digits}': {reason}")]
    InvalidConfiguration { digits: String, reason: String },

    #[error("unknown algorithm '{name}' (expected one of: random, BFS, DFS, Greedy, A*)")]
    UnknownAlgorithm { name: String },

    #[error("unknown heuristic '{name}' (expected one of: h0, h1, h2)")]
    UnknownHeuristic { name: String },

    #[error("algorithm '{algorithm}' expects {expected}")]
    ParameterMismatch {
        algorithm: String,
        expected: &'static str,
    },

    #[error("invalid depth limit '{value}': must be an integer no larger than {max}")]
    InvalidDepthLimit { value: String, max: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install the Ctrl-C handler: {source}")]
    Signal {
        #[source]
        source: ctrlc::Error,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
