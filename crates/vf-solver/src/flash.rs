//! Isothermal two-phase flash at fixed temperature and pressure.
//!
//! Successive substitution on `K_i = φ_i^L / φ_i^V` with dominant-eigenvalue
//! acceleration, followed by a Newton fallback on `ln K` when substitution
//! has not converged within its iteration budget.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::FiniteDifference;
use crate::newton::{NewtonConfig, newton_solve};
use crate::rachford_rice::{PhaseSplit, solve_rachford_rice};
use nalgebra::DVector;
use tracing::{debug, warn};
use vf_core::numeric::max_abs_diff;
use vf_core::units::{Pressure, Temperature, to_bar, to_kelvin};
use vf_thermo::{FugacityModel, MoleFractions, Phase};

/// Process conditions for a flash.
#[derive(Debug, Clone)]
pub struct FlashSpec {
    /// Feed molar flow [kmol/h].
    pub feed_flow: f64,
    pub t: Temperature,
    pub p: Pressure,
    /// Overall composition.
    pub z: MoleFractions,
    /// Liquid composition guess.
    pub x0: Option<MoleFractions>,
    /// Vapor composition guess.
    pub y0: Option<MoleFractions>,
}

impl FlashSpec {
    pub fn new(feed_flow: f64, t: Temperature, p: Pressure, z: MoleFractions) -> Self {
        Self {
            feed_flow,
            t,
            p,
            z,
            x0: None,
            y0: None,
        }
    }

    /// Start from phase composition guesses instead of Wilson K values.
    pub fn with_initial_guess(mut self, x0: MoleFractions, y0: MoleFractions) -> Self {
        self.x0 = Some(x0);
        self.y0 = Some(y0);
        self
    }
}

/// Flash solver configuration.
#[derive(Debug, Clone)]
pub struct FlashOptions {
    /// Convergence tolerance on `max |Δ ln K|`.
    pub tol: f64,
    /// Successive substitution iterations before the Newton fallback.
    pub max_ss_iterations: usize,
    /// Apply acceleration every this many substitution steps (0 disables it).
    pub accel_every: usize,
    /// `max |ln K|` below which the iteration is considered trivial.
    pub trivial_tol: f64,
    pub newton: NewtonConfig,
    /// Jacobian scheme for the Newton fallback.
    pub jacobian: FiniteDifference,
}

impl Default for FlashOptions {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_ss_iterations: 200,
            accel_every: 5,
            trivial_tol: 1e-4,
            newton: NewtonConfig::default(),
            jacobian: FiniteDifference::default(),
        }
    }
}

/// Which stage produced the converged K values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashMethod {
    SuccessiveSubstitution,
    Newton,
}

impl FlashMethod {
    pub fn label(&self) -> &'static str {
        match self {
            FlashMethod::SuccessiveSubstitution => "successive substitution",
            FlashMethod::Newton => "newton",
        }
    }
}

/// Converged flash state.
#[derive(Debug, Clone)]
pub struct FlashResult {
    /// Vapor mole fractions.
    pub y: Vec<f64>,
    /// Liquid mole fractions.
    pub x: Vec<f64>,
    /// Vapor fraction of the feed (may leave [0, 1] for a single-phase feed).
    pub beta: f64,
    pub k: Vec<f64>,
    pub iterations: usize,
    pub method: FlashMethod,
    /// `max |ln K_i + ln φ_i^V - ln φ_i^L|` at the returned compositions.
    pub residual: f64,
}

impl FlashResult {
    /// True when the feed actually splits into two phases.
    pub fn is_two_phase(&self) -> bool {
        self.beta > 0.0 && self.beta < 1.0
    }
}

/// Run an isothermal flash.
pub fn flash<M: FugacityModel + ?Sized>(
    model: &M,
    spec: &FlashSpec,
    options: &FlashOptions,
) -> SolverResult<FlashResult> {
    let n = model.n_components();
    let z = spec.z.as_slice();
    if z.len() != n {
        return Err(SolverError::ProblemSetup {
            what: format!("feed has {} fractions for {} components", z.len(), n),
        });
    }
    if !spec.feed_flow.is_finite() || spec.feed_flow < 0.0 {
        return Err(SolverError::ProblemSetup {
            what: format!("feed flow must be non-negative, got {}", spec.feed_flow),
        });
    }

    let mut ln_k = initial_ln_k(model, spec)?;
    let mut prev_delta: Option<Vec<f64>> = None;

    for iter in 1..=options.max_ss_iterations {
        let split = solve_rachford_rice(z, &exp_all(&ln_k))?;
        let ln_k_new = fugacity_ln_k(model, spec, &split)?;

        let delta: Vec<f64> = ln_k_new.iter().zip(&ln_k).map(|(a, b)| a - b).collect();
        let err = max_abs_diff(&ln_k_new, &ln_k);
        let mut next = ln_k_new;

        if options.accel_every > 0 && iter % options.accel_every == 0 {
            if let Some(prev) = &prev_delta {
                accelerate(&mut next, &delta, prev);
            }
        }

        if next.iter().all(|v| v.abs() < options.trivial_tol) {
            return Err(SolverError::TrivialSolution {
                what: format!("K values collapsed to unity after {iter} iterations"),
            });
        }

        debug!(iter, err, beta = split.beta, "flash substitution step");
        ln_k = next;
        prev_delta = Some(delta);

        if err < options.tol {
            return finish(model, spec, &ln_k, iter, FlashMethod::SuccessiveSubstitution);
        }
    }

    warn!(
        iterations = options.max_ss_iterations,
        "successive substitution did not converge, switching to Newton"
    );

    let residual = |v: &DVector<f64>| -> SolverResult<DVector<f64>> {
        let ln_k: Vec<f64> = v.iter().copied().collect();
        let split = solve_rachford_rice(z, &exp_all(&ln_k))?;
        let target = fugacity_ln_k(model, spec, &split)?;
        Ok(DVector::from_iterator(
            n,
            ln_k.iter().zip(&target).map(|(a, b)| a - b),
        ))
    };
    let scheme = options.jacobian;
    let jacobian = |v: &DVector<f64>| scheme.jacobian(v, residual, 1e-6);
    let result = newton_solve(DVector::from_vec(ln_k), residual, jacobian, &options.newton)?;
    let ln_k: Vec<f64> = result.x.iter().copied().collect();

    if ln_k.iter().all(|v| v.abs() < options.trivial_tol) {
        return Err(SolverError::TrivialSolution {
            what: "Newton converged to unit K values".to_string(),
        });
    }
    finish(
        model,
        spec,
        &ln_k,
        options.max_ss_iterations + result.iterations,
        FlashMethod::Newton,
    )
}

fn initial_ln_k<M: FugacityModel + ?Sized>(model: &M, spec: &FlashSpec) -> SolverResult<Vec<f64>> {
    let n = model.n_components();
    match (&spec.x0, &spec.y0) {
        (Some(x0), Some(y0)) => {
            if x0.len() != n || y0.len() != n {
                return Err(SolverError::ProblemSetup {
                    what: "initial guesses must match the component count".to_string(),
                });
            }
            if x0.iter().chain(y0.iter()).any(|v| v <= 0.0) {
                return Err(SolverError::ProblemSetup {
                    what: "initial guesses must be strictly positive".to_string(),
                });
            }
            Ok(y0.iter().zip(x0.iter()).map(|(y, x)| (y / x).ln()).collect())
        }
        (None, None) => {
            let t_k = to_kelvin(spec.t);
            let p_bar = to_bar(spec.p);
            Ok(model
                .components()
                .iter()
                .map(|c| c.wilson_k(t_k, p_bar).ln())
                .collect())
        }
        _ => Err(SolverError::ProblemSetup {
            what: "both liquid and vapor guesses are required".to_string(),
        }),
    }
}

/// `ln K` implied by the fugacity coefficients of the two phases.
fn fugacity_ln_k<M: FugacityModel + ?Sized>(
    model: &M,
    spec: &FlashSpec,
    split: &PhaseSplit,
) -> SolverResult<Vec<f64>> {
    let ln_phi_l = model.ln_phi(&split.x, spec.t, spec.p, Phase::Liquid)?;
    let ln_phi_v = model.ln_phi(&split.y, spec.t, spec.p, Phase::Vapor)?;
    Ok(ln_phi_l.iter().zip(&ln_phi_v).map(|(l, v)| l - v).collect())
}

/// Dominant eigenvalue extrapolation of the substitution sequence.
fn accelerate(ln_k: &mut [f64], delta: &[f64], prev_delta: &[f64]) {
    let num: f64 = delta.iter().map(|d| d * d).sum();
    let den: f64 = delta.iter().zip(prev_delta).map(|(d, p)| d * p).sum();
    if den.abs() < f64::MIN_POSITIVE {
        return;
    }
    let lambda = num / den;
    if lambda > 0.0 && lambda < 1.0 {
        let factor = lambda / (1.0 - lambda);
        for (v, d) in ln_k.iter_mut().zip(delta) {
            *v += factor * d;
        }
    }
}

fn finish<M: FugacityModel + ?Sized>(
    model: &M,
    spec: &FlashSpec,
    ln_k: &[f64],
    iterations: usize,
    method: FlashMethod,
) -> SolverResult<FlashResult> {
    let k = exp_all(ln_k);
    let split = solve_rachford_rice(spec.z.as_slice(), &k)?;
    let target = fugacity_ln_k(model, spec, &split)?;
    let residual = max_abs_diff(ln_k, &target);

    if !(split.beta > 0.0 && split.beta < 1.0) {
        warn!(
            beta = split.beta,
            "feed lies outside the two-phase region at these conditions"
        );
    }
    debug!(iterations, method = method.label(), residual, "flash converged");

    Ok(FlashResult {
        y: split.y,
        x: split.x,
        beta: split.beta,
        k,
        iterations,
        method,
        residual,
    })
}

fn exp_all(v: &[f64]) -> Vec<f64> {
    v.iter().map(|x| x.exp()).collect()
}
