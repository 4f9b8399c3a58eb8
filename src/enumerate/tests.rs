use super::*;
use crate::model::{EdgeData, Value, VassData};
use crate::tree;

fn edge(p: &str, q: &str) -> EdgeData {
    EdgeData {
        p: p.into(),
        q: q.into(),
        x: Value::Const(1),
        y: Value::Const(0),
    }
}

fn vass(edges: Vec<EdgeData>, start: &str, end: &str) -> crate::model::Vass {
    crate::model::Vass::load(VassData {
        start: start.into(),
        end: end.into(),
        start_x: 0,
        start_y: 0,
        end_x: 0,
        end_y: 0,
        edges,
    })
}

#[test]
fn finds_the_single_basic_path() {
    let vass = vass(vec![edge("q0", "q1"), edge("q1", "q2")], "q0", "q2");
    let tree = tree::build(&vass);
    let (paths, cycles) = find_paths_and_cycles(&tree, &vass.end);
    assert_eq!(paths, vec![vec![State::from("q0"), State::from("q1"), State::from("q2")]]);
    assert!(cycles.is_empty());
}

#[test]
fn finds_a_basic_cycle() {
    let vass = vass(
        vec![edge("q0", "q1"), edge("q1", "q0"), edge("q1", "q2")],
        "q0",
        "q2",
    );
    let tree = tree::build(&vass);
    let (paths, cycles) = find_paths_and_cycles(&tree, &vass.end);
    assert_eq!(paths, vec![vec![State::from("q0"), State::from("q1"), State::from("q2")]]);
    assert_eq!(cycles.len(), 1);
    assert_eq!(
        cycles[0],
        vec![State::from("q0"), State::from("q1"), State::from("q0")]
    );
}

#[test]
fn deduplicates_rotations_of_the_same_cycle() {
    let c1 = vec![State::from("q0"), State::from("q1"), State::from("q0")];
    let c2 = vec![State::from("q1"), State::from("q0"), State::from("q1")];
    assert!(cycle_exists(&[c1.clone()], &c2));
    assert_eq!(rotate_cycle(&c2, &State::from("q0")), c1);
}

#[test]
fn rotate_cycle_is_a_noop_when_pivot_already_head_or_absent() {
    let cycle = vec![State::from("q0"), State::from("q1"), State::from("q0")];
    assert_eq!(rotate_cycle(&cycle, &State::from("q0")), cycle);
    assert_eq!(rotate_cycle(&cycle, &State::from("qX")), cycle);
}

#[test]
fn rotate_cycle_moves_pivot_to_head_and_tail() {
    let cycle = vec![
        State::from("q0"),
        State::from("q1"),
        State::from("q2"),
        State::from("q0"),
    ];
    let rotated = rotate_cycle(&cycle, &State::from("q1"));
    assert_eq!(
        rotated,
        vec![
            State::from("q1"),
            State::from("q2"),
            State::from("q0"),
            State::from("q1"),
        ]
    );
}

#[test]
fn cycle_exists_requires_same_length_same_states_and_an_actual_rotation() {
    let base = vec![State::from("q0"), State::from("q1"), State::from("q0")];
    let rotation = vec![State::from("q1"), State::from("q0"), State::from("q1")];
    assert!(cycle_exists(&[base.clone()], &rotation));

    let different_states = vec![State::from("q2"), State::from("q3"), State::from("q2")];
    assert!(!cycle_exists(&[base.clone()], &different_states));

    let different_length = vec![
        State::from("q0"),
        State::from("q1"),
        State::from("q2"),
        State::from("q0"),
    ];
    assert!(!cycle_exists(&[base], &different_length));
}

#[test]
fn finds_multiple_distinct_cycles_reachable_from_start() {
    let vass = vass(
        vec![
            edge("q0", "q1"),
            edge("q1", "q0"),
            edge("q1", "q2"),
            edge("q2", "q1"),
            edge("q2", "q3"),
        ],
        "q0",
        "q3",
    );
    let tree = tree::build(&vass);
    let (_, cycles) = find_paths_and_cycles(&tree, &vass.end);
    assert_eq!(cycles.len(), 2);
}
