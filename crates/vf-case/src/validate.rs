//! Case validation logic.

use crate::schema::{Case, ComponentDef, FeedDef, InitialGuessDef, MixingRuleDef, SolverDef};
use std::collections::HashSet;
use vf_thermo::Component;

/// Allowed deviation of a composition sum from one.
const SUM_TOL: f64 = 1e-6;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    let n = case.components.len();
    if n < 2 {
        return Err(invalid("components", n, "at least two components required"));
    }

    let mut names = HashSet::new();
    for comp in &case.components {
        if !names.insert(comp.name().to_lowercase()) {
            return Err(ValidationError::DuplicateId {
                id: comp.name().to_string(),
                context: "components".to_string(),
            });
        }
        validate_component(comp)?;
    }

    validate_mixing_rule(&case.mixing_rule, n)?;
    validate_feed(&case.feed, n)?;
    if let Some(guess) = &case.initial_guess {
        validate_guess(guess, n)?;
    }
    validate_solver(&case.solver)?;
    Ok(())
}

fn validate_component(comp: &ComponentDef) -> Result<(), ValidationError> {
    match comp {
        ComponentDef::Preset { name } => {
            if Component::preset(name).is_none() {
                return Err(ValidationError::UnknownPreset { name: name.clone() });
            }
        }
        ComponentDef::Custom {
            name,
            tc_k,
            pc_bar,
            zc,
            vc_cm3_per_mol,
            omega,
            antoine,
            groups,
        } => {
            if name.trim().is_empty() {
                return Err(invalid("component.name", name, "must not be empty"));
            }
            for (field, v) in [
                ("tc_k", tc_k),
                ("pc_bar", pc_bar),
                ("zc", zc),
                ("vc_cm3_per_mol", vc_cm3_per_mol),
            ] {
                if !v.is_finite() || *v <= 0.0 {
                    return Err(invalid(
                        &format!("{name}.{field}"),
                        v,
                        "must be positive and finite",
                    ));
                }
            }
            if !omega.is_finite() {
                return Err(invalid(&format!("{name}.omega"), omega, "must be finite"));
            }
            if antoine.iter().any(|v| !v.is_finite()) {
                return Err(invalid(
                    &format!("{name}.antoine"),
                    format!("{antoine:?}"),
                    "coefficients must be finite",
                ));
            }
            for g in groups {
                if g.count == 0 {
                    return Err(invalid(
                        &format!("{name}.groups.{}", g.group),
                        g.count,
                        "count must be positive",
                    ));
                }
            }
        }
    }
    Ok(())
}

fn validate_mixing_rule(rule: &MixingRuleDef, n: usize) -> Result<(), ValidationError> {
    match rule {
        MixingRuleDef::Quadratic { kij } => {
            if kij.is_empty() {
                return Ok(());
            }
            if kij.len() != n || kij.iter().any(|row| row.len() != n) {
                return Err(invalid(
                    "mixing_rule.kij",
                    format!("{}x?", kij.len()),
                    "must be an n-by-n matrix",
                ));
            }
            for i in 0..n {
                for j in 0..n {
                    if !kij[i][j].is_finite() || (kij[i][j] - kij[j][i]).abs() > 1e-12 {
                        return Err(invalid(
                            &format!("mixing_rule.kij[{i}][{j}]"),
                            kij[i][j],
                            "matrix must be finite and symmetric",
                        ));
                    }
                }
                if kij[i][i] != 0.0 {
                    return Err(invalid(
                        &format!("mixing_rule.kij[{i}][{i}]"),
                        kij[i][i],
                        "diagonal must be zero",
                    ));
                }
            }
        }
        MixingRuleDef::MhvUnifac {
            subgroups,
            interactions,
        } => {
            for sg in subgroups {
                if !(sg.r > 0.0 && sg.q >= 0.0) {
                    return Err(invalid(
                        &format!("mixing_rule.subgroups.{}", sg.name),
                        format!("r={}, q={}", sg.r, sg.q),
                        "r must be positive and q non-negative",
                    ));
                }
            }
            for gi in interactions {
                if ![gi.a, gi.b, gi.c].iter().all(|v| v.is_finite()) {
                    return Err(invalid(
                        &format!("mixing_rule.interactions.{}-{}", gi.from, gi.to),
                        format!("a={}, b={}, c={}", gi.a, gi.b, gi.c),
                        "parameters must be finite",
                    ));
                }
            }
        }
    }
    Ok(())
}

fn validate_fractions(field: &str, values: &[f64], n: usize) -> Result<(), ValidationError> {
    if values.len() != n {
        return Err(invalid(
            field,
            values.len(),
            "length must match the component count",
        ));
    }
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(invalid(
            field,
            format!("{values:?}"),
            "fractions must be finite and non-negative",
        ));
    }
    let sum: f64 = values.iter().sum();
    if (sum - 1.0).abs() > SUM_TOL {
        return Err(invalid(field, sum, "fractions must sum to 1"));
    }
    Ok(())
}

fn validate_feed(feed: &FeedDef, n: usize) -> Result<(), ValidationError> {
    if !feed.flow_kmol_h.is_finite() || feed.flow_kmol_h < 0.0 {
        return Err(invalid(
            "feed.flow_kmol_h",
            feed.flow_kmol_h,
            "must be non-negative and finite",
        ));
    }
    if !feed.temperature_k.is_finite() || feed.temperature_k <= 0.0 {
        return Err(invalid(
            "feed.temperature_k",
            feed.temperature_k,
            "must be positive",
        ));
    }
    if !feed.pressure_bar.is_finite() || feed.pressure_bar <= 0.0 {
        return Err(invalid(
            "feed.pressure_bar",
            feed.pressure_bar,
            "must be positive",
        ));
    }
    validate_fractions("feed.composition", &feed.composition, n)
}

fn validate_guess(guess: &InitialGuessDef, n: usize) -> Result<(), ValidationError> {
    validate_fractions("initial_guess.x", &guess.x, n)?;
    validate_fractions("initial_guess.y", &guess.y, n)?;
    if guess.x.iter().chain(&guess.y).any(|v| *v <= 0.0) {
        return Err(invalid(
            "initial_guess",
            "0",
            "guesses must be strictly positive",
        ));
    }
    Ok(())
}

fn validate_solver(solver: &SolverDef) -> Result<(), ValidationError> {
    if let Some(tol) = solver.tol {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(invalid("solver.tol", tol, "must be positive"));
        }
    }
    if solver.max_ss_iterations == Some(0) {
        return Err(invalid("solver.max_ss_iterations", 0, "must be positive"));
    }
    Ok(())
}
