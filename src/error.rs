//! Error kinds for the core. `Unreachable` is deliberately absent here: it is a
//! structured result of `driver::solve`, not an exception.

use crate::model::State;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// JSON parse failure, missing required field, or an edge referencing a state
    /// that otherwise never occurs. Callers should treat this as fatal (CLI: exit 2).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// `Vass::transition(p, q)` was called on a non-adjacent pair. This signals a
    /// bug in LPS construction (label-stripping produced a pair with no underlying
    /// edge); the end-to-end test suite asserts this is never observed.
    #[error("no transition between {p} and {q}")]
    NoSuchTransition { p: State, q: State },

    /// The solver's `check()` did not finish before the caller-supplied deadline.
    #[error("solver timed out")]
    SolverTimeout,

    /// The solver reported `unknown` (incomplete theory, or gave up for another
    /// reason unrelated to the deadline).
    #[error("solver returned unknown: {0}")]
    SolverUnknown(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::MalformedInput(value.to_string())
    }
}
