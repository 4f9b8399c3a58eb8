//! JSON ingestion: thin wrappers around the `Vass` and `Lps` constructors.
//! The VASS schema is an object per edge; the LPS schema represents each
//! transition as the 4-tuple `[p, x, y, q]`.

use crate::error::Error;
use crate::lps::Lps;
use crate::model::{State, Transition, Value, Vass, VassData};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};


/// One `[p, x, y, q]` transition as it appears in LPS JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTransition(State, Value, Value, State);

impl From<&Transition> for RawTransition {
    fn from(t: &Transition) -> Self {
        RawTransition(t.p.clone(), t.x.clone(), t.y.clone(), t.q.clone())
    }
}

impl From<RawTransition> for Transition {
    fn from(r: RawTransition) -> Self {
        Transition {
            p: r.0,
            x: r.1,
            y: r.2,
            q: r.3,
        }
    }
}

/// Raw LPS input/output: `{"path": [...], "cycles": {"c1": [...], ...}}`.
/// Either field may be absent (empty default).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LpsData {
    #[serde(default)]
    path: Vec<RawTransition>,
    #[serde(default)]
    cycles: IndexMap<String, Vec<RawTransition>>,
}

impl From<&Lps> for LpsData {
    fn from(lps: &Lps) -> Self {
        LpsData {
            path: lps.path.iter().map(RawTransition::from).collect(),
            cycles: lps
                .cycles
                .iter()
                .map(|(name, ts)| (name.clone(), ts.iter().map(RawTransition::from).collect()))
                .collect(),
        }
    }
}

impl From<LpsData> for Lps {
    fn from(data: LpsData) -> Self {
        Lps {
            path: data.path.into_iter().map(Transition::from).collect(),
            cycles: data
                .cycles
                .into_iter()
                .map(|(name, ts)| (name, ts.into_iter().map(Transition::from).collect()))
                .collect(),
        }
    }
}

pub fn parse_vass(json: &str) -> Result<Vass, Error> {
    let data: VassData = serde_json::from_str(json)?;
    Ok(Vass::load(data))
}

pub fn parse_lps(json: &str) -> Result<Lps, Error> {
    let data: LpsData = serde_json::from_str(json)?;
    Ok(data.into())
}

pub fn serialize_lps(lps: &Lps) -> Result<String, Error> {
    let data = LpsData::from(lps);
    serde_json::to_string_pretty(&data).map_err(Error::from)
}

/// The VASS's own configured target counters, for a caller that just wants to
/// "solve this VASS as stated" rather than pass an explicit target.
pub fn configured_target(vass: &Vass) -> (i64, i64) {
    (vass.end_x, vass.end_y)
}
