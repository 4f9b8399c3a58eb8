//! The LPS compiler: glues simple paths with simple cycles into a finite
//! list of Linear Path Schemes, duplicating anchor states when a state supports
//! more than one cycle, and flattening cycles not directly anchored on the path
//! into whichever anchor cycle already reaches their states.

mod label;

use crate::enumerate::{rotate_cycle, Cycle, Path};
use crate::error::Error;
use crate::model::{State, Transition, Value, Vass};
use indexmap::IndexMap;
use label::LabelAllocator;
use log::debug;
use std::collections::HashSet;


/// One Linear Path Scheme: a labeled path plus the cycles anchored on it, keyed
/// by synthetic names `c1`, `c2`, ... in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct Lps {
    pub path: Vec<Transition>,
    pub cycles: IndexMap<String, Vec<Transition>>,
}

/// Compile every simple path (with its compatible cycles) into one or more LPS,
/// applying a flattening loop for cycles that aren't directly anchored on the
/// path.
pub fn compile(vass: &Vass, paths: &[Path], cycles: &[Cycle]) -> Result<Vec<Lps>, Error> {
    debug!("compiling LPS from {} path(s), {} cycle(s)", paths.len(), cycles.len());
    let mut lpss = Vec::new();

    for path in paths {
        let mut path: Vec<State> = path.clone();
        let mut visited: Vec<State> = Vec::new();
        let mut to_flatten: Vec<Cycle> = Vec::new();
        let mut basic_cycles: Vec<Cycle> = Vec::new();

        for cycle in cycles {
            let mut cycle = cycle.clone();
            let mut anchored = true;
            if !path.contains(&cycle[0]) {
                match cycle.iter().find(|s| path.contains(s)).cloned() {
                    Some(pivot) => cycle = rotate_cycle(&cycle, &pivot),
                    None => {
                        anchored = false;
                        if !to_flatten.contains(&cycle) {
                            to_flatten.push(cycle.clone());
                        }
                    }
                }
            }

            if anchored {
                anchor(&mut path, &mut visited, &mut basic_cycles, cycle);
            }
        }

        lpss.push(export_lps(vass, &path, &basic_cycles)?);

        while !to_flatten.is_empty() {
            let mut candidates: Vec<Cycle> = basic_cycles.clone();
            candidates.sort_by_key(|c| std::cmp::Reverse(c.len()));
            let all_states: HashSet<State> =
                to_flatten.iter().flatten().cloned().collect();

            let cycle_to_flatten = candidates
                .into_iter()
                .find(|c| c.iter().any(|s| all_states.contains(s)));

            let Some(cycle_to_flatten) = cycle_to_flatten else {
                break;
            };

            let idx = path
                .iter()
                .position(|s| *s == cycle_to_flatten[0])
                .expect("anchor cycles are always on the path");
            path.splice(idx + 1..idx + 1, cycle_to_flatten[1..].iter().cloned());

            let mut visited_this_round: Vec<State> = Vec::new();
            let mut consumed: Vec<usize> = Vec::new();
            for (i, cycle) in to_flatten.iter().enumerate() {
                if let Some(pivot) = cycle.iter().find(|s| path.contains(s)).cloned() {
                    consumed.push(i);
                    let rotated = rotate_cycle(cycle, &pivot);
                    anchor(&mut path, &mut visited_this_round, &mut basic_cycles, rotated);
                }
            }

            lpss.push(export_lps(vass, &path, &basic_cycles)?);

            for i in consumed.into_iter().rev() {
                to_flatten.remove(i);
            }
        }
    }

    Ok(lpss)
}

/// Place `cycle` into `basic_cycles`, duplicating its anchor state on `path` if
/// another cycle already claimed that anchor this round (only the *second and
/// later* cycle on a shared anchor gets a duplicate).
fn anchor(path: &mut Vec<State>, visited: &mut Vec<State>, basic_cycles: &mut Vec<Cycle>, cycle: Cycle) {
    let anchor_state = cycle[0].clone();
    basic_cycles.push(cycle);
    if !visited.contains(&anchor_state) {
        visited.push(anchor_state);
    } else {
        let idx = path
            .iter()
            .position(|s| *s == anchor_state)
            .expect("anchor state must already be on the path");
        path.insert(idx, anchor_state);
    }
}

/// Assign unique labels and resolve transitions for one path + its cycles.
fn export_lps(vass: &Vass, path: &[State], cycles: &[Cycle]) -> Result<Lps, Error> {
    let mut labels = LabelAllocator::new();

    let labeled_path: Vec<State> = path.iter().map(|s| labels.next_path_label(s)).collect();

    let mut path_transitions = Vec::with_capacity(labeled_path.len().saturating_sub(1));
    for pair in labeled_path.windows(2) {
        let (p, q) = (&pair[0], &pair[1]);
        let orig_p = label::underlying(p);
        let orig_q = label::underlying(q);
        let (x, y) = if orig_p == orig_q {
            (Value::Const(0), Value::Const(0))
        } else {
            vass.transition(&orig_p, &orig_q)?
        };
        path_transitions.push(Transition {
            p: p.clone(),
            x,
            y,
            q: q.clone(),
        });
    }

    let mut out_cycles = IndexMap::new();
    for (i, cycle) in cycles.iter().enumerate() {
        let anchor_state = cycle[0].clone();
        let anchor_label = labels.peek_cycle_label(&anchor_state);
        let last = cycle.len() - 1;

        let labeled_cycle: Vec<State> = cycle
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i == 0 || i == last {
                    anchor_label.clone()
                } else {
                    labels.next_path_label(s)
                }
            })
            .collect();
        labels.commit_cycle_label(&anchor_state);

        let mut transitions = Vec::with_capacity(labeled_cycle.len().saturating_sub(1));
        for pair in labeled_cycle.windows(2) {
            let (p, q) = (&pair[0], &pair[1]);
            let orig_p = label::underlying(p);
            let orig_q = label::underlying(q);
            let (x, y) = vass.transition(&orig_p, &orig_q)?;
            transitions.push(Transition {
                p: p.clone(),
                x,
                y,
                q: q.clone(),
            });
        }
        out_cycles.insert(format!("c{}", i + 1), transitions);
    }

    Ok(Lps {
        path: path_transitions,
        cycles: out_cycles,
    })
}
