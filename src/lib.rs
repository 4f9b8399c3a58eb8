//! Reachability and witness construction for 2-dimensional Vector Addition
//! Systems with States (2-VASS), via Linear Path Schemes (LPS) and an
//! existential-theory-of-reals (ETR) discharge.
//!
//! # Main Modules
//!
//! - [`model`]: the 2-VASS graph — states, transitions, edge-splitting normalization
//! - [`tree`] / [`enumerate`]: reachability tree construction and simple path/cycle enumeration
//! - [`lps`]: gluing paths and cycles into Linear Path Schemes
//! - [`etr`]: encoding one LPS + target into a linear-arithmetic formula
//! - [`smt`]: the abstract solver interface, plus a `z3`-backed implementation
//! - [`driver`]: `solve(vass, target)`, iterating LPSes until one is satisfiable
//!
//! # Quick Start
//!
//! ```no_run
//! use vass_reach::driver::{self, DriverConfig, Verdict};
//! use vass_reach::io;
//! use vass_reach::smt::Z3Backend;
//!
//! let json = std::fs::read_to_string("vass.json").unwrap();
//! let vass = io::parse_vass(&json).unwrap();
//!
//! let mut backend = Z3Backend::new();
//! let verdict = driver::solve(&vass, 3.0, 5.0, &DriverConfig::new(), &mut backend).unwrap();
//! match verdict {
//!     Verdict::Reachable { model, .. } => println!("reachable: {:?}", model),
//!     Verdict::Unreachable => println!("unreachable"),
//! }
//! ```

pub mod driver;
pub mod enumerate;
pub mod error;
pub mod etr;
pub mod io;
pub mod lps;
pub mod model;
pub mod smt;
pub mod tree;

#[cfg(test)]
mod test_utils;
