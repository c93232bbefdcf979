//! Vapor/liquid flow split from the material balance.
//!
//! Solves `y_i·V + x_i·L = F·z_i`. Two components give the square system
//! `[[y1, x1], [y2, x2]]·[V, L] = F·[z1, z2]`; more components give an
//! overdetermined system solved in the least-squares sense.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector, Matrix2, Vector2};

/// Relative determinant below which the 2x2 split is treated as singular.
const SINGULAR_TOL: f64 = 1e-12;

/// Phase molar flows [kmol/h].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseFlows {
    pub vapor: f64,
    pub liquid: f64,
}

impl PhaseFlows {
    pub fn total(&self) -> f64 {
        self.vapor + self.liquid
    }
}

/// Solve the component balances for the vapor and liquid flows.
pub fn phase_flows(feed_flow: f64, z: &[f64], y: &[f64], x: &[f64]) -> SolverResult<PhaseFlows> {
    let n = z.len();
    if n < 2 || y.len() != n || x.len() != n {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "split needs matching compositions of at least two components (z={}, y={}, x={})",
                n,
                y.len(),
                x.len()
            ),
        });
    }
    if !feed_flow.is_finite() || feed_flow < 0.0 {
        return Err(SolverError::ProblemSetup {
            what: format!("feed flow must be non-negative, got {feed_flow}"),
        });
    }

    if n == 2 {
        let a = Matrix2::new(y[0], x[0], y[1], x[1]);
        let scale = a.amax().max(f64::MIN_POSITIVE);
        if a.determinant().abs() < SINGULAR_TOL * scale * scale {
            return Err(SolverError::Singular {
                what: "vapor and liquid compositions coincide".to_string(),
            });
        }
        let rhs = Vector2::new(feed_flow * z[0], feed_flow * z[1]);
        let sol = a.lu().solve(&rhs).ok_or_else(|| SolverError::Singular {
            what: "split matrix LU failed".to_string(),
        })?;
        return Ok(PhaseFlows {
            vapor: sol[0],
            liquid: sol[1],
        });
    }

    let a = DMatrix::from_fn(n, 2, |i, j| if j == 0 { y[i] } else { x[i] });
    let rhs = DVector::from_iterator(n, z.iter().map(|zi| feed_flow * zi));
    let svd = a.svd(true, true);
    let smax = svd.singular_values.max();
    let smin = svd.singular_values.min();
    if smin <= SINGULAR_TOL * smax {
        return Err(SolverError::Singular {
            what: "vapor and liquid compositions coincide".to_string(),
        });
    }
    let sol = svd
        .solve(&rhs, SINGULAR_TOL)
        .map_err(|e| SolverError::Singular {
            what: e.to_string(),
        })?;
    Ok(PhaseFlows {
        vapor: sol[0],
        liquid: sol[1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_split_matches_lever_rule() {
        let (z, y, x) = ([0.5, 0.5], [0.8, 0.2], [0.3, 0.7]);
        let flows = phase_flows(1000.0, &z, &y, &x).unwrap();
        // Lever rule: V/F = (z - x)/(y - x)
        assert!((flows.vapor - 400.0).abs() < 1e-9);
        assert!((flows.liquid - 600.0).abs() < 1e-9);
        assert!((flows.total() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn identical_phases_are_singular() {
        let err = phase_flows(1000.0, &[0.5, 0.5], &[0.6, 0.4], &[0.6, 0.4]).unwrap_err();
        assert!(matches!(err, SolverError::Singular { .. }));
    }

    #[test]
    fn ternary_least_squares_recovers_exact_split() {
        let y = [0.6, 0.3, 0.1];
        let x = [0.2, 0.3, 0.5];
        let (v, l) = (250.0, 750.0);
        let z: Vec<f64> = (0..3).map(|i| (y[i] * v + x[i] * l) / 1000.0).collect();
        let flows = phase_flows(1000.0, &z, &y, &x).unwrap();
        assert!((flows.vapor - v).abs() < 1e-8);
        assert!((flows.liquid - l).abs() < 1e-8);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = phase_flows(1.0, &[0.5, 0.5], &[1.0], &[0.5, 0.5]).unwrap_err();
        assert!(matches!(err, SolverError::ProblemSetup { .. }));
    }
}
