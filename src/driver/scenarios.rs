//! End-to-end acceptance scenarios, run against the real `z3` backend rather
//! than a fake one.

use super::{discharge_all, solve, DriverConfig, Verdict};
use crate::lps::Lps;
use crate::model::{EdgeData, Transition, Value, Vass, VassData};
use crate::smt::Z3Backend;
use indexmap::IndexMap;

fn t(p: &str, x: Value, y: Value, q: &str) -> Transition {
    Transition {
        p: p.into(),
        x,
        y,
        q: q.into(),
    }
}

fn const_path(edges: &[(&str, i64, i64, &str)]) -> Vec<Transition> {
    edges
        .iter()
        .map(|(p, x, y, q)| t(p, Value::Const(*x), Value::Const(*y), q))
        .collect()
}

fn lps(path: Vec<Transition>, cycles: Vec<(&str, Vec<Transition>)>) -> Lps {
    let mut map = IndexMap::new();
    for (name, ts) in cycles {
        map.insert(name.to_string(), ts);
    }
    Lps { path, cycles: map }
}

fn solve_one(l: &Lps, x: f64, y: f64) -> Verdict {
    let mut backend = Z3Backend::new();
    discharge_all(&[l.clone()], x, y, &DriverConfig::new(), &mut backend).unwrap()
}

#[test]
fn s1_basic_path_is_sat_for_every_diagonal_target() {
    let path = const_path(&[
        ("0", 1, 1, "1"),
        ("1", 2, 2, "2"),
        ("2", -1, 0, "3"),
        ("3", 3, -5, "4"),
        ("4", 2, 6, "5"),
        ("5", 1, 0, "6"),
        ("6", 0, -2, "7"),
    ]);
    let l = lps(path, vec![]);

    for x in 0..=7 {
        let verdict = solve_one(&l, x as f64, x as f64);
        assert!(
            matches!(verdict, Verdict::Reachable { .. }),
            "solve({x}, {x}) should be sat"
        );
    }
}

#[test]
fn s2_basic_cycle_matches_every_reference_target() {
    let path: Vec<Transition> = vec![];
    let cycle = const_path(&[("0", 1, 1, "1"), ("1", 1, 0, "0")]);
    let l = lps(path, vec![("c1", cycle)]);

    assert!(matches!(solve_one(&l, 0.0, 0.0), Verdict::Reachable { .. }));
    assert!(matches!(solve_one(&l, 2.0, 1.0), Verdict::Reachable { .. }));
    assert!(matches!(solve_one(&l, 2.0, 2.0), Verdict::Unreachable));
    assert!(matches!(solve_one(&l, 10.0, 0.0), Verdict::Unreachable));
}

#[test]
fn s3_multiple_cycles_on_one_path() {
    let path = const_path(&[("0", 0, 0, "2")]);
    let c1 = const_path(&[("0", 1, 1, "1"), ("1", 1, 0, "0")]);
    let c2 = const_path(&[("2", 0, 1, "3"), ("3", 2, 2, "2")]);
    let l = lps(path, vec![("c1", c1), ("c2", c2)]);

    assert!(matches!(solve_one(&l, 2.0, 1.0), Verdict::Reachable { .. }));
    assert!(matches!(solve_one(&l, 2.0, 2.0), Verdict::Reachable { .. }));
    assert!(matches!(solve_one(&l, 10.0, 0.0), Verdict::Unreachable));
}

#[test]
fn s4_symbolic_path_variable() {
    let path = vec![
        t("0", Value::Symbol("X".to_string()), Value::Const(10), "1"),
        t("1", Value::Symbol("-X".to_string()), Value::Const(2), "2"),
    ];
    let l = lps(path, vec![]);

    assert!(matches!(solve_one(&l, 0.0, 12.0), Verdict::Reachable { .. }));
    for i in 1..19 {
        assert!(
            matches!(solve_one(&l, i as f64, 12.0), Verdict::Unreachable),
            "solve({i}, 12) should be unsat"
        );
    }
    for i in 1..19 {
        assert!(
            matches!(solve_one(&l, i as f64, 11.9), Verdict::Reachable { .. }),
            "solve({i}, 11.9) should be sat"
        );
    }
}

#[test]
fn s5_symbolic_cycle_variable() {
    let path: Vec<Transition> = vec![];
    let cycle = vec![
        t("0", Value::Symbol("X".to_string()), Value::Const(1), "1"),
        t("1", Value::Const(-1), Value::Const(2), "0"),
    ];
    let l = lps(path, vec![("c1", cycle)]);

    for i in -10..=10 {
        assert!(matches!(solve_one(&l, i as f64, -5.0), Verdict::Unreachable));
        assert!(matches!(solve_one(&l, i as f64, 20.0), Verdict::Reachable { .. }));
    }
}

#[test]
fn s6_vass_end_to_end_compiles_one_lps_with_an_anchored_cycle() {
    let vass = Vass::load(VassData {
        start: "q0".into(),
        end: "q2".into(),
        start_x: 0,
        start_y: 0,
        end_x: 1,
        end_y: 5,
        edges: vec![
            EdgeData {
                p: "q0".into(),
                q: "q1".into(),
                x: Value::Const(1),
                y: Value::Const(0),
            },
            EdgeData {
                p: "q1".into(),
                q: "q1".into(),
                x: Value::Const(0),
                y: Value::Const(1),
            },
            EdgeData {
                p: "q1".into(),
                q: "q2".into(),
                x: Value::Const(0),
                y: Value::Const(0),
            },
        ],
    });

    // The path contributes only x (1 unit, at alpha = 1); the self-loop cycle
    // contributes only y (1 unit per iteration, taken 5 times).
    let mut backend = Z3Backend::new();
    let verdict = solve(&vass, 1.0, 5.0, &DriverConfig::new(), &mut backend).unwrap();
    assert!(matches!(verdict, Verdict::Reachable { .. }));
}
