//! Label uniquing: every occurrence of an underlying state in an emitted
//! LPS gets a globally unique label `state_k`, using two separate counters so path
//! occurrences and cycle endpoints don't collide.

use crate::model::State;
use std::collections::HashMap;

/// Recovers the underlying state from a unique label via the `label[:label.rfind('_')]`
/// convention.
pub fn underlying(label: &State) -> State {
    match label.0.rfind('_') {
        Some(idx) => State(label.0[..idx].to_string()),
        None => label.clone(),
    }
}

/// Tracks the two counters needed to label one LPS: `path_ctr` for path
/// occurrences (also consumed by cycle-interior states), and `cycle_ctr` for
/// cycle endpoints (so a cycle's anchor open/close pair can share one label).
#[derive(Default)]
pub struct LabelAllocator {
    path_ctr: HashMap<State, u64>,
    cycle_ctr: HashMap<State, u64>,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next label for a path occurrence (or a cycle-interior state).
    pub fn next_path_label(&mut self, state: &State) -> State {
        let n = self.path_ctr.entry(state.clone()).or_insert(0);
        let label = State(format!("{}_{}", state.0, n));
        *n += 1;
        label
    }

    /// Peek the label a cycle's anchor endpoints would get, without consuming it.
    pub fn peek_cycle_label(&self, state: &State) -> State {
        let n = self.cycle_ctr.get(state).copied().unwrap_or(0);
        State(format!("{}_{}", state.0, n))
    }

    /// Advance the cycle counter for `state` after both its endpoints have been
    /// labeled with `peek_cycle_label`.
    pub fn commit_cycle_label(&mut self, state: &State) {
        *self.cycle_ctr.entry(state.clone()).or_insert(0) += 1;
    }
}
