//! Finite difference Jacobian computation.

use crate::error::SolverResult;
use nalgebra::{DMatrix, DVector};

/// Finite difference scheme for numerical Jacobians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FiniteDifference {
    Forward,
    /// Second-order accurate, twice the residual evaluations.
    #[default]
    Central,
}

impl FiniteDifference {
    /// Jacobian of `f` at `x` with the chosen scheme.
    pub fn jacobian<F>(&self, x: &DVector<f64>, f: F, epsilon: f64) -> SolverResult<DMatrix<f64>>
    where
        F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    {
        match self {
            FiniteDifference::Forward => finite_difference_jacobian(x, f, epsilon),
            FiniteDifference::Central => central_difference_jacobian(x, f, epsilon),
        }
    }
}

/// Compute Jacobian using forward finite differences.
///
/// For each column j, perturbs x[j] by epsilon and computes (f(x+e) - f(x))/epsilon.
pub fn finite_difference_jacobian<F>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let f_x = f(x)?;
    let mut jac = DMatrix::zeros(f_x.len(), x.len());

    for j in 0..x.len() {
        let mut x_perturbed = x.clone();
        let dx = epsilon * x[j].abs().max(1.0);
        x_perturbed[j] += dx;

        let df = (f(&x_perturbed)? - &f_x) / dx;
        jac.set_column(j, &df);
    }

    Ok(jac)
}

/// Compute Jacobian using central finite differences (more accurate but 2x cost).
pub fn central_difference_jacobian<F>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let m = f(x)?.len();
    let mut jac = DMatrix::zeros(m, x.len());

    for j in 0..x.len() {
        let dx = epsilon * x[j].abs().max(1.0);

        let mut x_plus = x.clone();
        x_plus[j] += dx;
        let mut x_minus = x.clone();
        x_minus[j] -= dx;

        let df = (f(&x_plus)? - f(&x_minus)?) / (2.0 * dx);
        jac.set_column(j, &df);
    }

    Ok(jac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jacobian_linear() {
        // f(x) = 2*x, J = 2
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 2.0 * x[0]))
        };

        let x = DVector::from_element(1, 3.0);
        let jac = finite_difference_jacobian(&x, f, 1e-7).unwrap();

        assert!((jac[(0, 0)] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn jacobian_coupled() {
        // f = (x0 * x1, x0 + x1²), J = [[x1, x0], [1, 2 x1]]
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![x[0] * x[1], x[0] + x[1] * x[1]]))
        };

        let x = DVector::from_vec(vec![2.0, 3.0]);
        let jac = central_difference_jacobian(&x, f, 1e-6).unwrap();

        assert!((jac[(0, 0)] - 3.0).abs() < 1e-6);
        assert!((jac[(0, 1)] - 2.0).abs() < 1e-6);
        assert!((jac[(1, 0)] - 1.0).abs() < 1e-6);
        assert!((jac[(1, 1)] - 6.0).abs() < 1e-6);
    }

    #[test]
    fn schemes_agree_on_smooth_function() {
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![x[0].exp() + x[1], x[0] * x[1].sin()]))
        };
        let x = DVector::from_vec(vec![0.3, 1.1]);
        let fwd = FiniteDifference::Forward.jacobian(&x, f, 1e-7).unwrap();
        let cen = FiniteDifference::Central.jacobian(&x, f, 1e-6).unwrap();
        assert!((fwd - &cen).amax() < 1e-5);
        assert!((cen[(1, 1)] - 0.3 * 1.1_f64.cos()).abs() < 1e-9);
    }
}
