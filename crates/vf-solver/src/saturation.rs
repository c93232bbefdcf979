//! Bubble and dew point pressures at fixed temperature.
//!
//! Pressure and incipient-phase composition are updated together by
//! successive substitution, starting from Raoult's law with Antoine vapor
//! pressures.

use crate::error::{SolverError, SolverResult};
use tracing::debug;
use vf_core::numeric::max_abs_diff;
use vf_core::units::{Pressure, Temperature, bar, to_bar};
use vf_thermo::{FugacityModel, MoleFractions, Phase};

/// Saturation solver configuration.
#[derive(Debug, Clone)]
pub struct SaturationOptions {
    pub tol: f64,
    pub max_iterations: usize,
    /// `max |ln K|` below which the iteration is considered trivial.
    pub trivial_tol: f64,
}

impl Default for SaturationOptions {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_iterations: 200,
            trivial_tol: 1e-4,
        }
    }
}

/// Saturation pressure and the composition of the incipient phase.
#[derive(Debug, Clone)]
pub struct SaturationResult {
    pub pressure: Pressure,
    /// Vapor composition at a bubble point, liquid composition at a dew point.
    pub incipient: Vec<f64>,
    pub k: Vec<f64>,
    pub iterations: usize,
}

/// Bubble point pressure of liquid `x` at temperature `t`.
pub fn bubble_pressure<M: FugacityModel + ?Sized>(
    model: &M,
    x: &MoleFractions,
    t: Temperature,
    options: &SaturationOptions,
) -> SolverResult<SaturationResult> {
    let psat = antoine_pressures(model, x, t)?;
    let x = x.as_slice();

    let mut p_bar: f64 = x.iter().zip(&psat).map(|(xi, pi)| xi * pi).sum();
    let mut k: Vec<f64> = psat.iter().map(|pi| pi / p_bar).collect();
    let mut y = normalized_product(x, &k);

    for iter in 1..=options.max_iterations {
        let p = bar(p_bar);
        let ln_phi_l = model.ln_phi(x, t, p, Phase::Liquid)?;
        let ln_phi_v = model.ln_phi(&y, t, p, Phase::Vapor)?;
        k = ln_phi_l
            .iter()
            .zip(&ln_phi_v)
            .map(|(l, v)| (l - v).exp())
            .collect();
        check_trivial(&k, options.trivial_tol, "bubble point")?;

        let sum: f64 = x.iter().zip(&k).map(|(xi, ki)| xi * ki).sum();
        let y_new = normalized_product(x, &k);
        let dy = max_abs_diff(&y_new, &y);
        y = y_new;
        p_bar *= sum;
        check_pressure(p_bar, "bubble point")?;
        debug!(iter, p_bar, sum, "bubble point step");

        if (sum - 1.0).abs() < options.tol && dy < options.tol {
            return Ok(SaturationResult {
                pressure: bar(p_bar),
                incipient: y,
                k,
                iterations: iter,
            });
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "bubble point did not converge in {} iterations",
            options.max_iterations
        ),
    })
}

/// Dew point pressure of vapor `y` at temperature `t`.
pub fn dew_pressure<M: FugacityModel + ?Sized>(
    model: &M,
    y: &MoleFractions,
    t: Temperature,
    options: &SaturationOptions,
) -> SolverResult<SaturationResult> {
    let psat = antoine_pressures(model, y, t)?;
    let y = y.as_slice();

    let mut p_bar = 1.0 / y.iter().zip(&psat).map(|(yi, pi)| yi / pi).sum::<f64>();
    let mut k: Vec<f64> = psat.iter().map(|pi| pi / p_bar).collect();
    let mut x = normalized_quotient(y, &k);

    for iter in 1..=options.max_iterations {
        let p = bar(p_bar);
        let ln_phi_l = model.ln_phi(&x, t, p, Phase::Liquid)?;
        let ln_phi_v = model.ln_phi(y, t, p, Phase::Vapor)?;
        k = ln_phi_l
            .iter()
            .zip(&ln_phi_v)
            .map(|(l, v)| (l - v).exp())
            .collect();
        check_trivial(&k, options.trivial_tol, "dew point")?;

        let sum: f64 = y.iter().zip(&k).map(|(yi, ki)| yi / ki).sum();
        let x_new = normalized_quotient(y, &k);
        let dx = max_abs_diff(&x_new, &x);
        x = x_new;
        p_bar /= sum;
        check_pressure(p_bar, "dew point")?;
        debug!(iter, p_bar, sum, "dew point step");

        if (sum - 1.0).abs() < options.tol && dx < options.tol {
            return Ok(SaturationResult {
                pressure: bar(p_bar),
                incipient: x,
                k,
                iterations: iter,
            });
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "dew point did not converge in {} iterations",
            options.max_iterations
        ),
    })
}

fn antoine_pressures<M: FugacityModel + ?Sized>(
    model: &M,
    comp: &MoleFractions,
    t: Temperature,
) -> SolverResult<Vec<f64>> {
    let n = model.n_components();
    if comp.len() != n {
        return Err(SolverError::ProblemSetup {
            what: format!("composition has {} fractions for {} components", comp.len(), n),
        });
    }
    (0..n)
        .map(|i| -> SolverResult<f64> { Ok(to_bar(model.psat_estimate(i, t)?)) })
        .collect()
}

fn normalized_product(x: &[f64], k: &[f64]) -> Vec<f64> {
    let v: Vec<f64> = x.iter().zip(k).map(|(xi, ki)| xi * ki).collect();
    let sum: f64 = v.iter().sum();
    v.into_iter().map(|vi| vi / sum).collect()
}

fn normalized_quotient(y: &[f64], k: &[f64]) -> Vec<f64> {
    let v: Vec<f64> = y.iter().zip(k).map(|(yi, ki)| yi / ki).collect();
    let sum: f64 = v.iter().sum();
    v.into_iter().map(|vi| vi / sum).collect()
}

fn check_trivial(k: &[f64], tol: f64, what: &str) -> SolverResult<()> {
    if k.iter().all(|ki| ki.ln().abs() < tol) {
        return Err(SolverError::TrivialSolution {
            what: format!("{what} iteration collapsed to unit K values"),
        });
    }
    Ok(())
}

fn check_pressure(p_bar: f64, what: &str) -> SolverResult<()> {
    if !p_bar.is_finite() || p_bar <= 0.0 {
        return Err(SolverError::Numeric {
            what: format!("{what} pressure became non-physical ({p_bar})"),
        });
    }
    Ok(())
}
