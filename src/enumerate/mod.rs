//! Path and cycle enumeration: an iterative pre-order DFS over the
//! reachability tree that extracts every simple path from `start` to `end` and
//! every simple cycle reachable from `start`, deduplicated up to rotation.

use crate::model::State;
use crate::tree::{NodeId, ReachabilityTree};
use log::trace;
use std::collections::HashSet;

#[cfg(test)]
mod tests;

/// An ordered list of distinct states from `start` to `end`.
pub type Path = Vec<State>;
/// An ordered list of states beginning and ending at the same state, with no
/// repeated state other than the endpoints.
pub type Cycle = Vec<State>;

/// Rotate `cycle` so that `pivot` becomes its start and end. A no-op if `pivot` is
/// not in the cycle, or is already the head.
pub fn rotate_cycle(cycle: &Cycle, pivot: &State) -> Cycle {
    if cycle.first() != Some(pivot) {
        if let Some(idx) = cycle.iter().position(|s| s == pivot) {
            let mut rotated: Vec<State> = cycle[idx..].to_vec();
            rotated.extend_from_slice(&cycle[1..idx]);
            rotated.push(pivot.clone());
            return rotated;
        }
    }
    cycle.clone()
}

/// Whether `new_cycle` is a rotation of some cycle already in `cycles`: same
/// length, same state set, and an actual rotation of one onto the other (all
/// three conditions — set equality alone is not enough).
fn cycle_exists(cycles: &[Cycle], new_cycle: &Cycle) -> bool {
    let new_set: HashSet<&State> = new_cycle.iter().collect();
    cycles.iter().any(|cycle| {
        if cycle.len() != new_cycle.len() {
            return false;
        }
        let set: HashSet<&State> = cycle.iter().collect();
        if set.intersection(&new_set).count() != new_set.len() {
            return false;
        }
        rotate_cycle(cycle, &new_cycle[0]) == *new_cycle
    })
}

/// Enumerate every simple path from `start` to `end` and every simple cycle
/// reachable from `start`, walking the reachability tree iteratively in
/// pre-order. After a cycle is emitted at a node, that node is not descended
/// into further (the cycle would just loop).
pub fn find_paths_and_cycles(tree: &ReachabilityTree, end: &State) -> (Vec<Path>, Vec<Cycle>) {
    let mut paths = Vec::new();
    let mut cycles: Vec<Cycle> = Vec::new();

    let root = tree.root();
    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(root);
    let mut stack: Vec<NodeId> = vec![root];

    while let Some(&top) = stack.last() {
        let children = tree.node(top).children.clone();
        let mut descended = false;

        for child in children {
            if visited.contains(&child) {
                continue;
            }
            visited.insert(child);

            let child_state = tree.node(child).state.clone();
            let ancestors: Vec<State> = tree.ancestors(child).into_iter().cloned().collect();
            let is_ancestor_state = ancestors.contains(&child_state);

            if is_ancestor_state {
                // Cycle: walk the ancestor chain (root-to-parent order) and keep
                // everything from the first occurrence of `child_state` onward,
                // then close the loop with `child_state` itself.
                let root_to_parent: Vec<State> = ancestors.into_iter().rev().collect();
                let start_idx = root_to_parent
                    .iter()
                    .position(|s| *s == child_state)
                    .expect("child_state was just confirmed to be an ancestor");
                let mut cycle: Cycle = root_to_parent[start_idx..].to_vec();
                cycle.push(child_state.clone());

                if !cycle_exists(&cycles, &cycle) {
                    trace!("discovered cycle {:?}", cycle);
                    cycles.push(cycle);
                }
                // Do not descend further from a cycle-closing node.
                continue;
            }

            if child_state == *end {
                let root_to_parent: Vec<State> = ancestors.into_iter().rev().collect();
                let mut path: Path = root_to_parent;
                path.push(child_state.clone());
                trace!("discovered path {:?}", path);
                paths.push(path);
            }

            stack.push(child);
            descended = true;
            break;
        }

        if !descended {
            stack.pop();
        }
    }

    (paths, cycles)
}
