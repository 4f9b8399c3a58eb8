//! A concrete [`EtrBackend`] backed by the `z3` theorem prover, used over its
//! real-arithmetic (`QF_NRA`) fragment since path/cycle weights multiply a
//! traversal count by a possibly-symbolic update value.

use crate::error::Error;
use crate::etr::{Atom, Expr, Formula};
use crate::smt::{CheckResult, EtrBackend, Model};
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::time::Duration;
use z3::ast::{Ast, Bool, Real};
use z3::{Config, Context, SatResult, Solver};

#[derive(Default)]
pub struct Z3Backend {
    asserted: Vec<Formula>,
    model: Option<Model>,
}

impl Z3Backend {
    pub fn new() -> Self {
        Self::default()
    }

    fn run(&self, deadline: Option<Duration>) -> Result<(SatResult, Option<Model>), Error> {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let solver = Solver::new(&ctx);

        if let Some(d) = deadline {
            let mut params = z3::Params::new(&ctx);
            params.set_u32("timeout", d.as_millis().min(u32::MAX as u128) as u32);
            solver.set_params(&params);
        }

        let mut vars: HashMap<String, Real> = HashMap::new();
        for formula in &self.asserted {
            let bool_ast = to_bool(&ctx, &mut vars, formula);
            trace!("asserting: {bool_ast}");
            solver.assert(&bool_ast);
        }

        let outcome = match deadline {
            Some(d) => cancel_this::on_timeout(d, || solver.check()).unwrap_or(SatResult::Unknown),
            None => solver.check(),
        };

        let model = if outcome == SatResult::Sat {
            let z3_model = solver.get_model().expect("sat check must yield a model");
            let mut values = HashMap::new();
            for (name, var) in &vars {
                if let Some(value) = z3_model.eval(var, true).and_then(|v| real_to_f64(&v)) {
                    values.insert(name.clone(), value);
                }
            }
            Some(Model(values))
        } else {
            None
        };

        Ok((outcome, model))
    }
}

impl EtrBackend for Z3Backend {
    fn reset(&mut self) {
        debug!("resetting ETR backend ({} formula(s) discarded)", self.asserted.len());
        self.asserted.clear();
        self.model = None;
    }

    fn assert(&mut self, formula: Formula) {
        self.asserted.push(formula);
    }

    fn check(&mut self, deadline: Option<Duration>) -> Result<CheckResult, Error> {
        let (outcome, model) = self.run(deadline)?;
        self.model = model;
        match outcome {
            SatResult::Sat => Ok(CheckResult::Sat),
            SatResult::Unsat => Ok(CheckResult::Unsat),
            SatResult::Unknown => {
                if deadline.is_some() {
                    warn!("ETR check returned unknown, treating as timeout");
                    Err(Error::SolverTimeout)
                } else {
                    Err(Error::SolverUnknown("z3 returned unknown".to_string()))
                }
            }
        }
    }

    fn verify(&mut self) -> Result<CheckResult, Error> {
        self.check(None)
    }

    fn model(&self) -> Option<Model> {
        self.model.clone()
    }
}

fn to_bool<'c>(ctx: &'c Context, vars: &mut HashMap<String, Real<'c>>, formula: &Formula) -> Bool<'c> {
    match formula {
        Formula::Atom(atom) => to_atom(ctx, vars, atom),
        Formula::Not(inner) => to_bool(ctx, vars, inner).not(),
        Formula::And(parts) => {
            let asts: Vec<Bool> = parts.iter().map(|p| to_bool(ctx, vars, p)).collect();
            if asts.is_empty() {
                Bool::from_bool(ctx, true)
            } else {
                Bool::and(ctx, &asts.iter().collect::<Vec<_>>())
            }
        }
        Formula::Or(parts) => {
            let asts: Vec<Bool> = parts.iter().map(|p| to_bool(ctx, vars, p)).collect();
            if asts.is_empty() {
                Bool::from_bool(ctx, false)
            } else {
                Bool::or(ctx, &asts.iter().collect::<Vec<_>>())
            }
        }
    }
}

fn to_atom<'c>(ctx: &'c Context, vars: &mut HashMap<String, Real<'c>>, atom: &Atom) -> Bool<'c> {
    match atom {
        Atom::Eq(a, b) => to_real(ctx, vars, a)._eq(&to_real(ctx, vars, b)),
        Atom::Le(a, b) => to_real(ctx, vars, a).le(&to_real(ctx, vars, b)),
        Atom::Lt(a, b) => to_real(ctx, vars, a).lt(&to_real(ctx, vars, b)),
        Atom::Ge(a, b) => to_real(ctx, vars, a).ge(&to_real(ctx, vars, b)),
        Atom::Gt(a, b) => to_real(ctx, vars, a).gt(&to_real(ctx, vars, b)),
    }
}

fn to_real<'c>(ctx: &'c Context, vars: &mut HashMap<String, Real<'c>>, expr: &Expr) -> Real<'c> {
    match expr {
        Expr::Var(name) => vars
            .entry(name.clone())
            .or_insert_with(|| Real::new_const(ctx, name.as_str()))
            .clone(),
        Expr::Const(c) => {
            let (num, den) = decimal_to_ratio(*c);
            Real::from_real_str(ctx, &num.to_string(), &den.to_string())
                .expect("decimal_to_ratio always produces a valid integer ratio")
        }
        Expr::Add(terms) => {
            let asts: Vec<Real> = terms.iter().map(|t| to_real(ctx, vars, t)).collect();
            if asts.is_empty() {
                Real::from_real(ctx, 0, 1)
            } else {
                Real::add(ctx, &asts.iter().collect::<Vec<_>>())
            }
        }
        Expr::Mul(a, b) => {
            let a = to_real(ctx, vars, a);
            let b = to_real(ctx, vars, b);
            Real::mul(ctx, &[&a, &b])
        }
    }
}

/// Convert an `f64` target/constant into an exact `num/den` ratio, preserving up
/// to six fractional digits (enough for fractional targets like `11.9`). Kept as
/// `i64` throughout and handed to z3 via `from_real_str` rather than `from_real`,
/// since the latter's `i32` arguments overflow for large but legitimate targets.
fn decimal_to_ratio(value: f64) -> (i64, i64) {
    const SCALE: i64 = 1_000_000;
    let scaled = (value * SCALE as f64).round() as i64;
    let mut num = scaled;
    let mut den = SCALE;
    let gcd = gcd(num.unsigned_abs(), den.unsigned_abs()).max(1);
    num /= gcd as i64;
    den /= gcd as i64;
    (num, den)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a.max(1)
    } else {
        gcd(b, a % b)
    }
}

fn real_to_f64(value: &Real) -> Option<f64> {
    value.as_real().map(|(num, den)| num as f64 / den as f64)
}
