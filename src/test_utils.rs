//! Shared test helpers: logger setup and terse VASS fixture builders.

use crate::model::{EdgeData, State, Value, Vass, VassData};

/// Initialize `env_logger` for a test. Safe to call more than once.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Build an edge with constant weights, for tests that don't care about symbolic values.
pub fn edge(p: &str, q: &str, x: i64, y: i64) -> EdgeData {
    EdgeData {
        p: State::from(p),
        q: State::from(q),
        x: Value::Const(x),
        y: Value::Const(y),
    }
}

/// Build a normalized [`Vass`] from a list of edges, with `start`/`end` states and
/// target counters.
pub fn vass(
    start: &str,
    end: &str,
    target: (i64, i64),
    edges: Vec<EdgeData>,
) -> Vass {
    Vass::load(VassData {
        start: State::from(start),
        end: State::from(end),
        start_x: 0,
        start_y: 0,
        end_x: target.0,
        end_y: target.1,
        edges,
    })
}
