//! Peng-Robinson cubic equation of state.
//!
//! Pure parameters:
//! - `a_i = 0.45724 R² Tc² / Pc · [1 + κ(1 - √Tr)]²`
//! - `κ = 0.37464 + 1.54226ω - 0.26992ω²`
//! - `b_i = 0.07780 R Tc / Pc`
//!
//! Fugacity coefficients use the generic cubic form
//! `ln φ_i = (b_i/b)(Z-1) - ln(Z-β) - q̄_i·I` with `q = a/(bRT)`,
//! `β = bP/RT` and `q̄_i = ∂(nq)/∂n_i` from the mixing rule.

use crate::component::Component;
use crate::cubic::real_roots;
use crate::error::{ThermoError, ThermoResult};
use crate::mixture::{MixingRule, Mixture};
use crate::model::{FugacityModel, Phase};
use crate::unifac::Unifac;
use std::f64::consts::SQRT_2;
use tracing::debug;
use vf_core::numeric::{ensure_all_finite, ensure_len};
use vf_core::units::constants::R_BAR_CM3;
use vf_core::units::{Pressure, Temperature, to_bar, to_kelvin};

/// MHV1 constant for Peng-Robinson.
pub const MHV_Q1: f64 = -0.53;

const SIGMA: f64 = 1.0 + SQRT_2;
const EPSILON: f64 = 1.0 - SQRT_2;

#[derive(Debug, Clone)]
enum RuleModel {
    Quadratic(Vec<Vec<f64>>),
    Mhv(Unifac),
}

/// Mixture parameters at fixed temperature and composition.
#[derive(Debug, Clone)]
struct MixParams {
    b: f64,
    q: f64,
    q_bar: Vec<f64>,
}

/// Peng-Robinson model for a fixed mixture.
#[derive(Debug, Clone)]
pub struct PengRobinson {
    mixture: Mixture,
    name: String,
    ac: Vec<f64>,
    kappa: Vec<f64>,
    b: Vec<f64>,
    rule: RuleModel,
}

impl PengRobinson {
    pub fn new(mixture: Mixture) -> ThermoResult<Self> {
        let comps = mixture.components();
        let ac = comps
            .iter()
            .map(|c| 0.45724 * (R_BAR_CM3 * c.tc).powi(2) / c.pc)
            .collect();
        let kappa = comps
            .iter()
            .map(|c| 0.37464 + 1.54226 * c.omega - 0.26992 * c.omega * c.omega)
            .collect();
        let b = comps
            .iter()
            .map(|c| 0.07780 * R_BAR_CM3 * c.tc / c.pc)
            .collect();

        let rule = match mixture.rule() {
            MixingRule::Quadratic { kij } => RuleModel::Quadratic(kij.clone()),
            MixingRule::MhvUnifac { parameters } => {
                RuleModel::Mhv(Unifac::new(comps, parameters)?)
            }
        };
        let name = format!("Peng-Robinson ({})", mixture.rule().label());
        debug!(model = %name, components = ?mixture.names(), "built equation of state");

        Ok(Self {
            mixture,
            name,
            ac,
            kappa,
            b,
            rule,
        })
    }

    pub fn mixture(&self) -> &Mixture {
        &self.mixture
    }

    /// Temperature-dependent attraction parameters `a_i(T)` [bar·cm⁶/mol²].
    pub fn attraction(&self, t_k: f64) -> Vec<f64> {
        self.mixture
            .components()
            .iter()
            .zip(self.ac.iter().zip(&self.kappa))
            .map(|(c, (ac, kappa))| {
                let alpha = 1.0 + kappa * (1.0 - (t_k / c.tc).sqrt());
                ac * alpha * alpha
            })
            .collect()
    }

    /// Molar volume [cm³/mol] of the requested phase.
    pub fn molar_volume(
        &self,
        x: &[f64],
        t: Temperature,
        p: Pressure,
        phase: Phase,
    ) -> ThermoResult<f64> {
        let z = self.compressibility(x, t, p, phase)?;
        Ok(z * R_BAR_CM3 * to_kelvin(t) / to_bar(p))
    }

    fn check_inputs(&self, x: &[f64], t: Temperature, p: Pressure) -> ThermoResult<(f64, f64)> {
        ensure_len(x, self.b.len(), "composition")?;
        ensure_all_finite(x, "mole fraction")?;
        let t_k = to_kelvin(t);
        let p_bar = to_bar(p);
        if !t_k.is_finite() || t_k <= 0.0 {
            return Err(ThermoError::NonPhysical { what: "temperature" });
        }
        if !p_bar.is_finite() || p_bar <= 0.0 {
            return Err(ThermoError::NonPhysical { what: "pressure" });
        }
        Ok((t_k, p_bar))
    }

    fn mix_params(&self, x: &[f64], t_k: f64) -> ThermoResult<MixParams> {
        let a = self.attraction(t_k);
        let rt = R_BAR_CM3 * t_k;
        let b: f64 = x.iter().zip(&self.b).map(|(xi, bi)| xi * bi).sum();
        if b <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "mixture co-volume",
            });
        }

        match &self.rule {
            RuleModel::Quadratic(kij) => {
                let n = x.len();
                // a_bar[i] = Σ_j x_j a_ij, so a_mix = Σ_i x_i a_bar[i]
                let a_bar: Vec<f64> = (0..n)
                    .map(|i| {
                        (0..n)
                            .map(|j| x[j] * (a[i] * a[j]).sqrt() * (1.0 - kij[i][j]))
                            .sum()
                    })
                    .collect();
                let a_mix: f64 = x.iter().zip(&a_bar).map(|(xi, ai)| xi * ai).sum();
                let q = a_mix / (b * rt);
                let q_bar = (0..n)
                    .map(|i| q * (2.0 * a_bar[i] / a_mix - self.b[i] / b))
                    .collect();
                Ok(MixParams { b, q, q_bar })
            }
            RuleModel::Mhv(unifac) => {
                let alpha: Vec<f64> = a
                    .iter()
                    .zip(&self.b)
                    .map(|(ai, bi)| ai / (bi * rt))
                    .collect();
                let ln_gamma = unifac.ln_gamma(x, t_k)?;
                let mut q = 0.0;
                let mut ge = 0.0;
                let mut ln_b_ratio = 0.0;
                for i in 0..x.len() {
                    q += x[i] * alpha[i];
                    ge += x[i] * ln_gamma[i];
                    ln_b_ratio += x[i] * (b / self.b[i]).ln();
                }
                q += (ge + ln_b_ratio) / MHV_Q1;
                let q_bar = (0..x.len())
                    .map(|i| {
                        alpha[i]
                            + (ln_gamma[i] + (b / self.b[i]).ln() + self.b[i] / b - 1.0) / MHV_Q1
                    })
                    .collect();
                Ok(MixParams { b, q, q_bar })
            }
        }
    }

    fn solve_z(q: f64, beta: f64, phase: Phase) -> ThermoResult<f64> {
        let a = q * beta;
        let roots = real_roots(
            -(1.0 - beta),
            a - 3.0 * beta * beta - 2.0 * beta,
            -(a * beta - beta * beta - beta.powi(3)),
        );
        let admissible: Vec<f64> = roots.into_iter().filter(|z| *z > beta).collect();
        let z = match phase {
            Phase::Liquid => admissible.first(),
            Phase::Vapor => admissible.last(),
        };
        z.copied().ok_or(ThermoError::NoRoot {
            what: phase.label(),
        })
    }
}

impl FugacityModel for PengRobinson {
    fn name(&self) -> &str {
        &self.name
    }

    fn components(&self) -> &[Component] {
        self.mixture.components()
    }

    fn ln_phi(
        &self,
        x: &[f64],
        t: Temperature,
        p: Pressure,
        phase: Phase,
    ) -> ThermoResult<Vec<f64>> {
        let (t_k, p_bar) = self.check_inputs(x, t, p)?;
        let mp = self.mix_params(x, t_k)?;
        let beta = mp.b * p_bar / (R_BAR_CM3 * t_k);
        let z = Self::solve_z(mp.q, beta, phase)?;
        let integral = ((z + SIGMA * beta) / (z + EPSILON * beta)).ln() / (SIGMA - EPSILON);
        let ln_z_beta = (z - beta).ln();

        let ln_phi: Vec<f64> = self
            .b
            .iter()
            .zip(&mp.q_bar)
            .map(|(bi, qi)| bi / mp.b * (z - 1.0) - ln_z_beta - qi * integral)
            .collect();
        ensure_all_finite(&ln_phi, "ln phi")?;
        Ok(ln_phi)
    }

    fn compressibility(
        &self,
        x: &[f64],
        t: Temperature,
        p: Pressure,
        phase: Phase,
    ) -> ThermoResult<f64> {
        let (t_k, p_bar) = self.check_inputs(x, t, p)?;
        let mp = self.mix_params(x, t_k)?;
        let beta = mp.b * p_bar / (R_BAR_CM3 * t_k);
        Self::solve_z(mp.q, beta, phase)
    }
}
