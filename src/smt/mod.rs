//! The SMT adapter: a thin interface over an external linear/real-arithmetic
//! solver. The core only ever sees [`EtrBackend`]; the concrete decision
//! procedure is an external collaborator.

mod z3_backend;

use crate::error::Error;
use crate::etr::Formula;
use std::collections::HashMap;
use std::time::Duration;

pub use z3_backend::Z3Backend;

/// The result of a satisfiability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    Sat,
    Unsat,
}

/// A satisfying assignment, read back from the backend after a `Sat` check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model(pub HashMap<String, f64>);

impl Model {
    pub fn get(&self, var: &str) -> Option<f64> {
        self.0.get(var).copied()
    }
}

/// Add linear (in)equalities, add disjunctions, check satisfiability, read a
/// model. Any sound and complete decision procedure for the theory of reals
/// suffices here.
pub trait EtrBackend {
    /// Discard every previously asserted formula and any cached model.
    fn reset(&mut self);

    /// Assert a formula. Conjoined with everything else asserted since the last
    /// `reset`.
    fn assert(&mut self, formula: Formula);

    /// Check satisfiability of everything asserted since the last `reset`,
    /// bounded by `deadline` (the only suspension point in the system).
    /// Returns `Error::SolverTimeout` if the deadline elapses, or
    /// `Error::SolverUnknown` if the backend gives up for another reason.
    fn check(&mut self, deadline: Option<Duration>) -> Result<CheckResult, Error>;

    /// Re-check the current asserted state without re-adding anything. Distinct
    /// from `check` only in that it never resets: a no-op replay of the last
    /// `check` assuming nothing changed since.
    fn verify(&mut self) -> Result<CheckResult, Error> {
        self.check(None)
    }

    /// The satisfying model from the most recent `Sat` result, if any.
    fn model(&self) -> Option<Model>;
}
