//! The built-in benzene/toluene flash drum case.

use crate::LATEST_VERSION;
use crate::schema::{Case, ComponentDef, FeedDef, InitialGuessDef, MixingRuleDef, SolverDef};

/// 75/25 benzene/toluene feed flashed at 85 °C and 1.01 bar with
/// Peng-Robinson and MHV-UNIFAC.
pub fn reference_case() -> Case {
    Case {
        version: LATEST_VERSION,
        name: "benzene-toluene flash drum".to_string(),
        components: vec![
            ComponentDef::Preset {
                name: "benzene".to_string(),
            },
            ComponentDef::Preset {
                name: "toluene".to_string(),
            },
        ],
        mixing_rule: MixingRuleDef::default(),
        feed: FeedDef {
            flow_kmol_h: 1000.0,
            temperature_k: 358.15,
            pressure_bar: 1.01,
            composition: vec![0.75, 0.25],
        },
        initial_guess: Some(InitialGuessDef {
            x: vec![0.4, 0.6],
            y: vec![0.2, 0.8],
        }),
        solver: SolverDef::default(),
    }
}
