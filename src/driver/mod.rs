//! The driver: iterate the LPSes produced from a VASS, discharge each
//! against a target in the defined order, and return the first witness.

use crate::error::Error;
use crate::etr;
use crate::lps::{self, Lps};
use crate::model::Vass;
use crate::smt::{CheckResult, EtrBackend, Model};
use crate::{enumerate, tree};
use log::{debug, info};
use std::time::Duration;


#[cfg(test)]
mod scenarios;

/// Tunables for a `solve` run.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Upper bound on how long a single LPS's `check()` may run before it is
    /// reported as `Error::SolverTimeout`. `None` means unbounded.
    pub deadline: Option<Duration>,
    /// Upper bound on how many LPSes are discharged before giving up and
    /// reporting `Unreachable`. `None` means exhaust all of them; this is
    /// where a caller opts into a cap on worst-case work.
    pub max_lps: Option<usize>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            deadline: None,
            max_lps: None,
        }
    }
}

impl DriverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn max_lps(mut self, max_lps: usize) -> Self {
        self.max_lps = Some(max_lps);
        self
    }
}

/// The outcome of a `solve` call. `Unreachable` is a structured result, not
/// an exception.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Reachable { lps: Lps, model: Model },
    Unreachable,
}

/// Compile every LPS reachable from `vass.start` to `vass.end`, then discharge
/// them in order against `(target_x, target_y)`, returning the first witness:
/// baseline LPSes in path-discovery order, then flattened LPSes in flattening
/// order — i.e. exactly the order `lps::compile` emits them in.
pub fn solve(
    vass: &Vass,
    target_x: f64,
    target_y: f64,
    config: &DriverConfig,
    backend: &mut impl EtrBackend,
) -> Result<Verdict, Error> {
    let tree = tree::build(vass);
    let (paths, cycles) = enumerate::find_paths_and_cycles(&tree, &vass.end);
    info!("found {} path(s), {} cycle(s)", paths.len(), cycles.len());

    let lpss = lps::compile(vass, &paths, &cycles)?;
    info!("compiled {} linear path scheme(s)", lpss.len());

    discharge_all(&lpss, target_x, target_y, config, backend)
}

/// Discharge a pre-built list of LPSes against a target, in the order given.
/// Exposed separately from [`solve`] so a single already-parsed LPS can be
/// discharged without a VASS at all.
pub fn discharge_all(
    lpss: &[Lps],
    target_x: f64,
    target_y: f64,
    config: &DriverConfig,
    backend: &mut impl EtrBackend,
) -> Result<Verdict, Error> {
    let limit = config.max_lps.unwrap_or(lpss.len());
    if lpss.len() > limit {
        debug!("capping LPS discharge at {limit} of {} candidates", lpss.len());
    }

    for (index, lps) in lpss.iter().take(limit).enumerate() {
        debug!("discharging LPS #{index}");
        let result = discharge_one(lps, target_x, target_y, config.deadline, backend)?;
        if let CheckResult::Sat = result {
            let model = backend.model().expect("sat check must yield a model");
            return Ok(Verdict::Reachable {
                lps: lps.clone(),
                model,
            });
        }
    }

    info!("all LPS candidates exhausted, unreachable");
    Ok(Verdict::Unreachable)
}

fn discharge_one(
    lps: &Lps,
    target_x: f64,
    target_y: f64,
    deadline: Option<Duration>,
    backend: &mut impl EtrBackend,
) -> Result<CheckResult, Error> {
    backend.reset();
    let formula = etr::encode(lps, target_x, target_y);
    backend.assert(formula);
    backend.check(deadline)
}
