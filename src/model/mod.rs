//! The 2-VASS graph model: states, edge-labeled transitions and the edge-splitting
//! normalization that keeps at most one transition per ordered state pair.
//!
//! # Example
//!
//! ```
//! use vass_reach::model::{Value, Vass, VassData, EdgeData};
//!
//! let data = VassData {
//!     start: "q0".into(),
//!     end: "q1".into(),
//!     start_x: 0,
//!     start_y: 0,
//!     end_x: 1,
//!     end_y: 0,
//!     edges: vec![EdgeData {
//!         p: "q0".into(),
//!         q: "q1".into(),
//!         x: Value::Const(1),
//!         y: Value::Const(0),
//!     }],
//! };
//! let vass = Vass::load(data);
//! assert_eq!(vass.transition(&"q0".into(), &"q1".into()).unwrap(), (Value::Const(1), Value::Const(0)));
//! ```

use crate::error::Error;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;


/// An opaque state identifier. Always normalized to a string, so that synthetic
/// states introduced by edge-splitting or label-uniquing share the same type as
/// states that came straight from the input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(pub String);

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<T: Into<String>> From<T> for State {
    fn from(value: T) -> Self {
        State(value.into())
    }
}

/// An edge weight: either an integer constant, or the name of a free real variable.
/// A name starting with `-` denotes algebraic negation of the variable with that
/// name stripped of the leading `-` (see `etr::negation_links`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Const(i64),
    Symbol(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Const(c) => write!(f, "{c}"),
            Value::Symbol(s) => write!(f, "{s}"),
        }
    }
}

/// One transition `(p, x, y, q)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub p: State,
    pub x: Value,
    pub y: Value,
    pub q: State,
}

/// Raw edge as it appears in the JSON input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeData {
    pub p: State,
    pub q: State,
    pub x: Value,
    pub y: Value,
}

/// Raw VASS input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VassData {
    pub start: State,
    pub end: State,
    pub start_x: i64,
    pub start_y: i64,
    pub end_x: i64,
    pub end_y: i64,
    pub edges: Vec<EdgeData>,
}

/// The immutable, normalized 2-VASS: states, at-most-one-edge-per-pair transitions,
/// and the source/target counter values carried along for the driver.
#[derive(Debug, Clone)]
pub struct Vass {
    pub start: State,
    pub end: State,
    pub start_x: i64,
    pub start_y: i64,
    pub end_x: i64,
    pub end_y: i64,
    edges: Vec<Transition>,
}

impl Vass {
    /// Load a VASS from raw input, normalizing parallel edges by edge-splitting.
    /// For each state `p`, the n-th split introduces a fresh state
    /// `p-n` (`n` monotone per `p`).
    pub fn load(data: VassData) -> Vass {
        let mut edges: Vec<Transition> = Vec::with_capacity(data.edges.len());
        let mut split_ctr: BTreeMap<State, u64> = BTreeMap::new();

        for edge in data.edges {
            let exists = edges.iter().any(|t| t.p == edge.p && t.q == edge.q);
            if exists {
                let n = split_ctr.entry(edge.p.clone()).or_insert(0);
                let fresh = State(format!("{}-{}", edge.p.0, n));
                *n += 1;
                trace!("edge-splitting {} -> {} via fresh state {}", edge.p, edge.q, fresh);
                edges.push(Transition {
                    p: edge.p.clone(),
                    x: Value::Const(0),
                    y: Value::Const(0),
                    q: fresh.clone(),
                });
                edges.push(Transition {
                    p: fresh,
                    x: edge.x,
                    y: edge.y,
                    q: edge.q,
                });
            } else {
                edges.push(Transition {
                    p: edge.p,
                    x: edge.x,
                    y: edge.y,
                    q: edge.q,
                });
            }
        }

        Vass {
            start: data.start,
            end: data.end,
            start_x: data.start_x,
            start_y: data.start_y,
            end_x: data.end_x,
            end_y: data.end_y,
            edges,
        }
    }

    /// All states mentioned by any edge endpoint.
    pub fn states(&self) -> Vec<State> {
        let mut set: Vec<State> = Vec::new();
        for edge in &self.edges {
            if !set.contains(&edge.p) {
                set.push(edge.p.clone());
            }
            if !set.contains(&edge.q) {
                set.push(edge.q.clone());
            }
        }
        set
    }

    /// Sorted adjacency: state -> sorted list of direct successors.
    pub fn adjacency(&self) -> BTreeMap<State, Vec<State>> {
        let mut adj: BTreeMap<State, Vec<State>> = BTreeMap::new();
        for edge in &self.edges {
            adj.entry(edge.p.clone()).or_default().push(edge.q.clone());
        }
        for successors in adj.values_mut() {
            successors.sort();
        }
        adj
    }

    /// The unique `(x, y)` update between `p` and `q`, or `NoSuchTransition` if no
    /// edge connects them. After `load`, at most one edge per ordered pair exists,
    /// so this lookup is unambiguous.
    pub fn transition(&self, p: &State, q: &State) -> Result<(Value, Value), Error> {
        self.edges
            .iter()
            .find(|t| &t.p == p && &t.q == q)
            .map(|t| (t.x.clone(), t.y.clone()))
            .ok_or_else(|| Error::NoSuchTransition {
                p: p.clone(),
                q: q.clone(),
            })
    }

    pub fn edges(&self) -> &[Transition] {
        &self.edges
    }
}
