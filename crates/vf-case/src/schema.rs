//! Case file schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub version: u32,
    pub name: String,
    pub components: Vec<ComponentDef>,
    #[serde(default)]
    pub mixing_rule: MixingRuleDef,
    pub feed: FeedDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_guess: Option<InitialGuessDef>,
    #[serde(default)]
    pub solver: SolverDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ComponentDef {
    /// Built-in constants looked up by name.
    Preset { name: String },
    Custom {
        name: String,
        tc_k: f64,
        pc_bar: f64,
        zc: f64,
        vc_cm3_per_mol: f64,
        omega: f64,
        /// `[A, B, C]` for ln P[kPa] = A - B / (T[°C] + C)
        antoine: [f64; 3],
        #[serde(default)]
        groups: Vec<GroupCountDef>,
    },
}

impl ComponentDef {
    pub fn name(&self) -> &str {
        match self {
            ComponentDef::Preset { name } => name,
            ComponentDef::Custom { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupCountDef {
    pub group: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum MixingRuleDef {
    #[serde(rename = "mhv_unifac")]
    MhvUnifac {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        subgroups: Vec<SubgroupDef>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        interactions: Vec<InteractionDef>,
    },
    #[serde(rename = "quadratic")]
    Quadratic {
        /// Symmetric binary interaction matrix; empty means all zero.
        #[serde(default)]
        kij: Vec<Vec<f64>>,
    },
}

impl Default for MixingRuleDef {
    fn default() -> Self {
        MixingRuleDef::MhvUnifac {
            subgroups: Vec::new(),
            interactions: Vec::new(),
        }
    }
}

/// Extra or overriding UNIFAC subgroup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubgroupDef {
    pub name: String,
    pub main_group: String,
    pub r: f64,
    pub q: f64,
}

/// Extra or overriding directed main-group interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionDef {
    pub from: String,
    pub to: String,
    pub a: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default)]
    pub c: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedDef {
    pub flow_kmol_h: f64,
    pub temperature_k: f64,
    pub pressure_bar: f64,
    pub composition: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitialGuessDef {
    /// Liquid mole fractions.
    pub x: Vec<f64>,
    /// Vapor mole fractions.
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SolverDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ss_iterations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accel_every: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_newton_iterations: Option<usize>,
}
