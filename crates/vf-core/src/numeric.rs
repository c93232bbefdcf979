use crate::VfError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, VfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(VfError::NonFinite { what, value: v })
    }
}

/// Fail unless every entry of `values` is finite.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> Result<(), VfError> {
    for &v in values {
        ensure_finite(v, what)?;
    }
    Ok(())
}

pub fn ensure_len(values: &[Real], expected: usize, what: &'static str) -> Result<(), VfError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(VfError::LengthMismatch {
            what,
            expected,
            got: values.len(),
        })
    }
}

/// Largest absolute elementwise difference; both slices must have equal length.
pub fn max_abs_diff(a: &[Real], b: &[Real]) -> Real {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, Real::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_len_reports_mismatch() {
        let err = ensure_len(&[0.5, 0.5, 0.0], 2, "composition").unwrap_err();
        assert!(matches!(
            err,
            VfError::LengthMismatch {
                expected: 2,
                got: 3,
                ..
            }
        ));
    }

    #[test]
    fn max_abs_diff_picks_largest() {
        assert_eq!(max_abs_diff(&[1.0, 2.0, 3.0], &[1.5, 2.0, 1.0]), 2.0);
        assert_eq!(max_abs_diff(&[], &[]), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }
    }
}
