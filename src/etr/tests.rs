use super::*;
use crate::lps::Lps;
use crate::model::State;
use indexmap::IndexMap;

fn t(p: &str, x: Value, y: Value, q: &str) -> Transition {
    Transition {
        p: State::from(p),
        x,
        y,
        q: State::from(q),
    }
}

#[test]
fn encodes_a_path_only_lps_with_pinned_weights_and_bounded_alphas() {
    let lps = Lps {
        path: vec![
            t("q0_0", Value::Const(1), Value::Const(0), "q1_0"),
            t("q1_0", Value::Const(0), Value::Const(1), "q2_0"),
        ],
        cycles: IndexMap::new(),
    };

    let formula = encode(&lps, 1.0, 1.0);
    let Formula::And(top) = formula else {
        panic!("top-level formula must be a conjunction");
    };
    // 2 transitions * 4 atoms (x pin, y pin, alpha>0, alpha<=1) + target x + target y + negation links.
    assert_eq!(top.len(), 2 * 4 + 3);
}

#[test]
fn cycle_encoding_offers_a_taken_or_skipped_disjunction() {
    let mut cycles = IndexMap::new();
    cycles.insert(
        "c1".to_string(),
        vec![t("q1_0", Value::Const(2), Value::Const(0), "q1_0")],
    );
    let lps = Lps {
        path: vec![t("q0_0", Value::Const(0), Value::Const(0), "q1_0")],
        cycles,
    };

    let formula = encode(&lps, 4.0, 0.0);
    let Formula::And(top) = formula else {
        panic!("expected conjunction");
    };
    let has_disjunction = top.iter().any(|f| matches!(f, Formula::Or(_)));
    assert!(has_disjunction, "cycle taken-or-skipped disjunction must appear");
}

#[test]
fn negation_links_one_equation_per_distinct_negative_symbol() {
    let lps = Lps {
        path: vec![
            t("q0_0", Value::Symbol("-k".to_string()), Value::Const(0), "q1_0"),
            t("q1_0", Value::Symbol("-k".to_string()), Value::Const(0), "q2_0"),
        ],
        cycles: IndexMap::new(),
    };

    let Formula::And(links) = negation_links(&lps) else {
        panic!("expected conjunction");
    };
    assert_eq!(links.len(), 1);
}

#[test]
fn negation_links_ignore_positive_symbols() {
    let lps = Lps {
        path: vec![t("q0_0", Value::Symbol("k".to_string()), Value::Const(0), "q1_0")],
        cycles: IndexMap::new(),
    };
    let Formula::And(links) = negation_links(&lps) else {
        panic!("expected conjunction");
    };
    assert!(links.is_empty());
}

#[test]
fn variable_names_follow_the_p_q_convention() {
    let transition = t("q0_0", Value::Const(1), Value::Const(2), "q1_0");
    assert_eq!(x_var(&transition), "x_q0_0_q1_0");
    assert_eq!(y_var(&transition), "y_q0_0_q1_0");
    assert_eq!(alpha_var(&transition), "a_q0_0_q1_0");
}
