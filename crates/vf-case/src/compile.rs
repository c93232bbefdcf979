//! Turn a validated case into a ready-to-run equation of state and flash problem.

use crate::CaseResult;
use crate::schema::{Case, ComponentDef, MixingRuleDef, SolverDef};
use crate::validate::{ValidationError, validate_case};
use vf_core::units::{bar, k};
use vf_solver::{FlashOptions, FlashSpec};
use vf_thermo::{
    Antoine, Component, GroupInteraction, MixingRule, Mixture, MoleFractions, PengRobinson,
    Subgroup, UnifacParameters,
};

/// Everything needed to run the separator for one case.
#[derive(Debug, Clone)]
pub struct CompiledCase {
    pub name: String,
    pub eos: PengRobinson,
    pub spec: FlashSpec,
    pub options: FlashOptions,
}

impl CompiledCase {
    pub fn component_names(&self) -> Vec<&str> {
        self.eos.mixture().names()
    }
}

pub fn compile_case(case: &Case) -> CaseResult<CompiledCase> {
    validate_case(case)?;

    let components = case
        .components
        .iter()
        .map(build_component)
        .collect::<Result<Vec<_>, _>>()?;
    let n = components.len();
    let rule = build_rule(&case.mixing_rule, n);
    let eos = PengRobinson::new(Mixture::new(components, rule)?)?;

    let z = MoleFractions::with_len(case.feed.composition.clone(), n)?;
    let mut spec = FlashSpec::new(
        case.feed.flow_kmol_h,
        k(case.feed.temperature_k),
        bar(case.feed.pressure_bar),
        z,
    );
    if let Some(guess) = &case.initial_guess {
        spec = spec.with_initial_guess(
            MoleFractions::with_len(guess.x.clone(), n)?,
            MoleFractions::with_len(guess.y.clone(), n)?,
        );
    }

    Ok(CompiledCase {
        name: case.name.clone(),
        eos,
        spec,
        options: build_options(&case.solver),
    })
}

fn build_component(def: &ComponentDef) -> Result<Component, ValidationError> {
    match def {
        ComponentDef::Preset { name } => {
            Component::preset(name).ok_or_else(|| ValidationError::UnknownPreset {
                name: name.clone(),
            })
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
        } => Ok(Component {
            name: name.clone(),
            tc: *tc_k,
            pc: *pc_bar,
            zc: *zc,
            vc: *vc_cm3_per_mol,
            omega: *omega,
            antoine: Antoine::new(antoine[0], antoine[1], antoine[2]),
            groups: groups.iter().map(|g| (g.group.clone(), g.count)).collect(),
        }),
    }
}

fn build_rule(def: &MixingRuleDef, n: usize) -> MixingRule {
    match def {
        MixingRuleDef::Quadratic { kij } if kij.is_empty() => MixingRule::quadratic_zero(n),
        MixingRuleDef::Quadratic { kij } => MixingRule::Quadratic { kij: kij.clone() },
        MixingRuleDef::MhvUnifac {
            subgroups,
            interactions,
        } => {
            let mut parameters = UnifacParameters::dortmund();
            for sg in subgroups {
                parameters =
                    parameters.with_subgroup(Subgroup::new(&sg.name, &sg.main_group, sg.r, sg.q));
            }
            for gi in interactions {
                parameters = parameters
                    .with_interaction(GroupInteraction::new(&gi.from, &gi.to, gi.a, gi.b, gi.c));
            }
            MixingRule::MhvUnifac { parameters }
        }
    }
}

fn build_options(def: &SolverDef) -> FlashOptions {
    let mut options = FlashOptions::default();
    if let Some(tol) = def.tol {
        options.tol = tol;
    }
    if let Some(max) = def.max_ss_iterations {
        options.max_ss_iterations = max;
    }
    if let Some(every) = def.accel_every {
        options.accel_every = every;
    }
    if let Some(max) = def.max_newton_iterations {
        options.newton.max_iterations = max;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CaseError;
    use crate::reference::reference_case;
    use crate::schema::{GroupCountDef, InteractionDef};
    use vf_thermo::{FugacityModel, Phase};

    #[test]
    fn reference_compiles() {
        let compiled = compile_case(&reference_case()).unwrap();
        assert_eq!(compiled.component_names(), vec!["benzene", "toluene"]);
        assert_eq!(compiled.eos.mixture().rule().label(), "mhv_unifac");
        assert_eq!(compiled.spec.feed_flow, 1000.0);
        assert!(compiled.spec.x0.is_some());
        assert_eq!(compiled.options.accel_every, 5);
    }

    #[test]
    fn solver_overrides_apply() {
        let mut case = reference_case();
        case.solver.tol = Some(1e-8);
        case.solver.max_newton_iterations = Some(7);
        let compiled = compile_case(&case).unwrap();
        assert_eq!(compiled.options.tol, 1e-8);
        assert_eq!(compiled.options.newton.max_iterations, 7);
    }

    #[test]
    fn empty_kij_means_zero_matrix() {
        let mut case = reference_case();
        case.mixing_rule = MixingRuleDef::Quadratic { kij: Vec::new() };
        let compiled = compile_case(&case).unwrap();
        assert_eq!(
            compiled.eos.mixture().rule(),
            &MixingRule::quadratic_zero(2)
        );
    }

    #[test]
    fn custom_component_without_table_entry_fails() {
        let mut case = reference_case();
        case.components[1] = ComponentDef::Custom {
            name: "water".to_string(),
            tc_k: 647.1,
            pc_bar: 220.6,
            zc: 0.229,
            vc_cm3_per_mol: 55.9,
            omega: 0.345,
            antoine: [16.3872, 3885.7, 230.17],
            groups: vec![GroupCountDef {
                group: "H2O".to_string(),
                count: 1,
            }],
        };
        let err = compile_case(&case).unwrap_err();
        assert!(matches!(err, CaseError::Thermo(_)), "{err}");
    }

    #[test]
    fn interaction_override_changes_model() {
        let base = compile_case(&reference_case()).unwrap();
        let mut case = reference_case();
        case.mixing_rule = MixingRuleDef::MhvUnifac {
            subgroups: Vec::new(),
            interactions: vec![
                InteractionDef {
                    from: "CH2".to_string(),
                    to: "C=C".to_string(),
                    a: 300.0,
                    b: 0.0,
                    c: 0.0,
                },
                InteractionDef {
                    from: "C=C".to_string(),
                    to: "CH2".to_string(),
                    a: 50.0,
                    b: 0.0,
                    c: 0.0,
                },
            ],
        };
        let tuned = compile_case(&case).unwrap();
        let x = [0.5, 0.5];
        let t = base.spec.t;
        let p = base.spec.p;
        let a = base.eos.ln_phi(&x, t, p, Phase::Liquid).unwrap();
        let b = tuned.eos.ln_phi(&x, t, p, Phase::Liquid).unwrap();
        assert!((a[0] - b[0]).abs() > 1e-6);
    }
}
