//! Mixtures of pure components and their mixing rule.

use crate::component::Component;
use crate::error::{ThermoError, ThermoResult};
use crate::unifac::UnifacParameters;

/// How the equation-of-state attraction parameter of the mixture is built.
#[derive(Debug, Clone, PartialEq)]
pub enum MixingRule {
    /// van der Waals one-fluid rule, `a_ij = √(a_i a_j)(1 - k_ij)`.
    Quadratic { kij: Vec<Vec<f64>> },
    /// First-order modified Huron-Vidal rule with Dortmund UNIFAC excess Gibbs energy.
    MhvUnifac { parameters: UnifacParameters },
}

impl MixingRule {
    /// Quadratic rule with all interaction parameters zero.
    pub fn quadratic_zero(n: usize) -> Self {
        MixingRule::Quadratic {
            kij: vec![vec![0.0; n]; n],
        }
    }

    /// MHV rule with the built-in Dortmund table.
    pub fn mhv_unifac() -> Self {
        MixingRule::MhvUnifac {
            parameters: UnifacParameters::dortmund(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MixingRule::Quadratic { .. } => "quadratic",
            MixingRule::MhvUnifac { .. } => "mhv_unifac",
        }
    }
}

/// Ordered set of components plus mixing rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    components: Vec<Component>,
    rule: MixingRule,
}

impl Mixture {
    pub fn new(components: Vec<Component>, rule: MixingRule) -> ThermoResult<Self> {
        if components.len() < 2 {
            return Err(ThermoError::InvalidArg {
                what: "mixture needs at least two components",
            });
        }
        for comp in &components {
            comp.validate()?;
        }
        for (i, a) in components.iter().enumerate() {
            if components[..i].iter().any(|b| b.name == a.name) {
                return Err(ThermoError::InvalidArg {
                    what: "duplicate component name in mixture",
                });
            }
        }

        if let MixingRule::Quadratic { kij } = &rule {
            let n = components.len();
            if kij.len() != n || kij.iter().any(|row| row.len() != n) {
                return Err(ThermoError::LengthMismatch {
                    what: "kij matrix",
                    expected: n,
                    got: kij.len(),
                });
            }
            for i in 0..n {
                if kij[i][i] != 0.0 {
                    return Err(ThermoError::InvalidArg {
                        what: "kij diagonal must be zero",
                    });
                }
                for j in 0..n {
                    if !kij[i][j].is_finite() || (kij[i][j] - kij[j][i]).abs() > 1e-12 {
                        return Err(ThermoError::InvalidArg {
                            what: "kij matrix must be finite and symmetric",
                        });
                    }
                }
            }
        }

        Ok(Self { components, rule })
    }

    /// Two-component mixture.
    pub fn binary(first: Component, second: Component, rule: MixingRule) -> ThermoResult<Self> {
        Self::new(vec![first, second], rule)
    }

    /// Benzene/toluene with the MHV-UNIFAC rule.
    pub fn benzene_toluene_mhv() -> Self {
        Self {
            components: vec![Component::benzene(), Component::toluene()],
            rule: MixingRule::mhv_unifac(),
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn rule(&self) -> &MixingRule {
        &self.rule
    }

    pub fn names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_mixture() {
        let mix = Mixture::benzene_toluene_mhv();
        assert_eq!(mix.names(), vec!["benzene", "toluene"]);
        assert_eq!(mix.rule().label(), "mhv_unifac");
    }

    #[test]
    fn single_component_rejected() {
        let err = Mixture::new(vec![Component::benzene()], MixingRule::quadratic_zero(1));
        assert!(err.is_err());
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = Mixture::binary(
            Component::benzene(),
            Component::benzene(),
            MixingRule::mhv_unifac(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn asymmetric_kij_rejected() {
        let rule = MixingRule::Quadratic {
            kij: vec![vec![0.0, 0.01], vec![0.02, 0.0]],
        };
        let err = Mixture::binary(Component::benzene(), Component::toluene(), rule).unwrap_err();
        assert!(matches!(err, ThermoError::InvalidArg { .. }));
    }

    #[test]
    fn wrong_kij_shape_rejected() {
        let rule = MixingRule::Quadratic {
            kij: vec![vec![0.0]],
        };
        let err = Mixture::binary(Component::benzene(), Component::toluene(), rule).unwrap_err();
        assert!(matches!(err, ThermoError::LengthMismatch { .. }));
    }
}
