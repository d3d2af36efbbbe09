//! Crate error types.

use thiserror::Error as ThisError;

/// Errors produced by the m-TSP engine.
///
/// Heuristic search never "fails to find an answer" — both error kinds are
/// structural: either the inputs were rejected before any iteration ran, or
/// an internal invariant broke mid-run (a defect, not a runtime condition).
/// Numeric degeneracy (pheromone underflow, zero-length edges) is clamped
/// locally and never surfaced through this type.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Inputs rejected synchronously: non-divisible city/salesman counts,
    /// empty point set, or non-positive parameter values.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A structural invariant was violated during a run, e.g. a balance
    /// repair that cannot restore equal cluster sizes. Fatal, never retried.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an [`Error::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an [`Error::InternalInvariant`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalInvariant(message.into())
    }
}
