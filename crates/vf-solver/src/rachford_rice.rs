//! Rachford-Rice vapor fraction solve.
//!
//! `g(β) = Σ z_i (K_i - 1) / (1 + β(K_i - 1)) = 0`
//!
//! Solved on the negative-flash window `(1/(1 - K_max), 1/(1 - K_min))`, so
//! the vapor fraction may leave [0, 1] when the feed lies outside the
//! two-phase region while the K values still describe a tie line. When every
//! K is on one side of unity the feed is a single phase: `β = 0` (all K ≤ 1)
//! or `β = 1` (all K ≥ 1), with the other phase as the incipient composition.

use crate::error::{SolverError, SolverResult};

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-14;

/// Vapor fraction and the phase compositions it implies.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSplit {
    pub beta: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Rachford-Rice objective at `beta`.
pub fn rachford_rice_residual(z: &[f64], k: &[f64], beta: f64) -> f64 {
    z.iter()
        .zip(k)
        .map(|(zi, ki)| zi * (ki - 1.0) / (1.0 + beta * (ki - 1.0)))
        .sum()
}

fn rachford_rice_derivative(z: &[f64], k: &[f64], beta: f64) -> f64 {
    -z.iter()
        .zip(k)
        .map(|(zi, ki)| {
            let d = 1.0 + beta * (ki - 1.0);
            zi * (ki - 1.0) * (ki - 1.0) / (d * d)
        })
        .sum::<f64>()
}

/// Solve for the vapor fraction and phase compositions.
pub fn solve_rachford_rice(z: &[f64], k: &[f64]) -> SolverResult<PhaseSplit> {
    if z.len() != k.len() || z.is_empty() {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "Rachford-Rice needs matching z and K (got {} and {})",
                z.len(),
                k.len()
            ),
        });
    }
    if k.iter().any(|ki| !ki.is_finite() || *ki <= 0.0) {
        return Err(SolverError::Numeric {
            what: "K values must be positive and finite".to_string(),
        });
    }

    let present = || z.iter().zip(k).filter(|(zi, _)| **zi > 0.0).map(|(_, ki)| *ki);
    let k_max = present().fold(f64::NEG_INFINITY, f64::max);
    let k_min = present().fold(f64::INFINITY, f64::min);
    if k_max <= 1.0 && k_min >= 1.0 {
        return Err(SolverError::NoPhaseSplit {
            what: "all K values equal unity".to_string(),
        });
    }
    // One-sided K values: the feed is a single phase, the other is incipient
    if k_max <= 1.0 {
        return Ok(compositions(z, k, 0.0));
    }
    if k_min >= 1.0 {
        return Ok(compositions(z, k, 1.0));
    }

    let mut lo = 1.0 / (1.0 - k_max);
    let mut hi = 1.0 / (1.0 - k_min);
    let mut beta = 0.5_f64.clamp(lo, hi);
    if beta <= lo || beta >= hi {
        beta = 0.5 * (lo + hi);
    }

    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let g = rachford_rice_residual(z, k, beta);
        if g.abs() < TOLERANCE {
            converged = true;
            break;
        }
        // g decreases monotonically in beta
        if g > 0.0 {
            lo = beta;
        } else {
            hi = beta;
        }
        let dg = rachford_rice_derivative(z, k, beta);
        let mut next = beta - g / dg;
        if !next.is_finite() || next <= lo || next >= hi {
            next = 0.5 * (lo + hi);
        }
        if (next - beta).abs() < TOLERANCE * beta.abs().max(1.0) {
            beta = next;
            converged = true;
            break;
        }
        beta = next;
    }

    if !converged {
        return Err(SolverError::ConvergenceFailed {
            what: format!("Rachford-Rice did not converge (beta = {beta})"),
        });
    }

    Ok(compositions(z, k, beta))
}

fn compositions(z: &[f64], k: &[f64], beta: f64) -> PhaseSplit {
    let x: Vec<f64> = z
        .iter()
        .zip(k)
        .map(|(zi, ki)| zi / (1.0 + beta * (ki - 1.0)))
        .collect();
    let y: Vec<f64> = x.iter().zip(k).map(|(xi, ki)| xi * ki).collect();
    PhaseSplit {
        beta,
        x: normalized(x),
        y: normalized(y),
    }
}

fn normalized(mut v: Vec<f64>) -> Vec<f64> {
    let sum: f64 = v.iter().sum();
    if sum > 0.0 {
        v.iter_mut().for_each(|vi| *vi /= sum);
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_closed_form() {
        // For two components x1 = (1 - K2)/(K1 - K2)
        let z = [0.75, 0.25];
        let k = [1.3, 0.45];
        let split = solve_rachford_rice(&z, &k).unwrap();
        let x1 = (1.0 - k[1]) / (k[0] - k[1]);
        assert!((split.x[0] - x1).abs() < 1e-12);
        assert!((split.y[0] - k[0] * x1).abs() < 1e-12);
        let beta = (z[0] - x1) / (k[0] * x1 - x1);
        assert!((split.beta - beta).abs() < 1e-10);
    }

    #[test]
    fn negative_flash_allowed() {
        // z1 below the bubble composition: subcooled, beta < 0
        let split = solve_rachford_rice(&[0.3, 0.7], &[2.0, 0.5]).unwrap();
        assert!(split.beta < 0.0, "beta = {}", split.beta);
        assert!(split.x.iter().all(|v| *v > 0.0));
    }

    #[test]
    fn k_above_unity_gives_saturated_vapor() {
        let split = solve_rachford_rice(&[0.5, 0.5], &[1.5, 1.2]).unwrap();
        assert_eq!(split.beta, 1.0);
        assert!((split.y[0] - 0.5).abs() < 1e-12);
        // Incipient liquid is richer in the less volatile component
        let x1 = (0.5 / 1.5) / (0.5 / 1.5 + 0.5 / 1.2);
        assert!((split.x[0] - x1).abs() < 1e-12);
    }

    #[test]
    fn k_below_unity_gives_saturated_liquid() {
        let split = solve_rachford_rice(&[0.75, 0.25], &[0.98, 0.46]).unwrap();
        assert_eq!(split.beta, 0.0);
        assert!((split.x[0] - 0.75).abs() < 1e-12);
        assert!(split.y[0] > split.x[0]);
        assert!((split.y.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unit_k_has_no_split() {
        let err = solve_rachford_rice(&[0.5, 0.5], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, SolverError::NoPhaseSplit { .. }));
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = solve_rachford_rice(&[0.5, 0.5], &[1.5]).unwrap_err();
        assert!(matches!(err, SolverError::ProblemSetup { .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn residual_vanishes_and_compositions_sum_to_one(
            z1 in 0.05_f64..0.95,
            k1 in 1.05_f64..20.0,
            k2 in 0.01_f64..0.95,
        ) {
            let z = [z1, 1.0 - z1];
            let k = [k1, k2];
            let split = solve_rachford_rice(&z, &k).unwrap();
            prop_assert!(rachford_rice_residual(&z, &k, split.beta).abs() < 1e-10);
            prop_assert!((split.x.iter().sum::<f64>() - 1.0).abs() < 1e-12);
            prop_assert!((split.y.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
    }
}
