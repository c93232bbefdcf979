//! Mole fraction vectors.

use crate::error::{ThermoError, ThermoResult};

/// Mole fractions indexed by component position in a mixture.
///
/// Always normalized (fractions sum to 1.0). Zero entries are kept so that
/// indices stay aligned with the mixture's component list.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleFractions {
    values: Vec<f64>,
}

impl MoleFractions {
    /// Create mole fractions from raw amounts.
    ///
    /// Validates that all entries are finite, non-negative, and have a positive sum,
    /// then normalizes to sum=1.
    pub fn new(values: Vec<f64>) -> ThermoResult<Self> {
        if values.is_empty() {
            return Err(ThermoError::InvalidArg {
                what: "empty composition",
            });
        }

        let mut sum = 0.0;
        for v in &values {
            if !v.is_finite() {
                return Err(ThermoError::NonPhysical {
                    what: "non-finite mole fraction",
                });
            }
            if *v < 0.0 {
                return Err(ThermoError::NonPhysical {
                    what: "negative mole fraction",
                });
            }
            sum += v;
        }

        if sum <= 0.0 || !sum.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "mole fractions sum to zero or non-finite",
            });
        }

        Ok(Self {
            values: values.into_iter().map(|v| v / sum).collect(),
        })
    }

    /// Like [`MoleFractions::new`] but also checks the expected component count.
    pub fn with_len(values: Vec<f64>, n: usize) -> ThermoResult<Self> {
        if values.len() != n {
            return Err(ThermoError::LengthMismatch {
                what: "mole fractions",
                expected: n,
                got: values.len(),
            });
        }
        Self::new(values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_core::numeric::{Tolerances, nearly_equal};

    fn tol() -> Tolerances {
        Tolerances {
            abs: 1e-10,
            rel: 1e-10,
        }
    }

    #[test]
    fn mixture_normalization_non_unit_sum() {
        let comp = MoleFractions::new(vec![2.0, 8.0]).unwrap();

        // Should normalize to 0.2 and 0.8
        assert!(nearly_equal(comp.as_slice()[0], 0.2, tol()));
        assert!(nearly_equal(comp.as_slice()[1], 0.8, tol()));
    }

    #[test]
    fn zero_entries_keep_position() {
        let comp = MoleFractions::new(vec![0.0, 3.0, 1.0]).unwrap();
        assert_eq!(comp.len(), 3);
        assert_eq!(comp.as_slice()[0], 0.0);
        assert!(nearly_equal(comp.as_slice()[2], 0.25, tol()));
    }

    #[test]
    fn invalid_negative_fraction() {
        assert!(MoleFractions::new(vec![-0.5, 1.5]).is_err());
    }

    #[test]
    fn invalid_zero_sum() {
        assert!(MoleFractions::new(vec![0.0, 0.0]).is_err());
    }

    #[test]
    fn invalid_non_finite() {
        assert!(MoleFractions::new(vec![f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn with_len_checks_count() {
        let err = MoleFractions::with_len(vec![0.75, 0.25], 3).unwrap_err();
        assert!(matches!(
            err,
            ThermoError::LengthMismatch {
                expected: 3,
                got: 2,
                ..
            }
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use vf_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_sum_is_one(fracs in prop::collection::vec(0.0_f64..1.0_f64, 1..6)) {
            if let Ok(comp) = MoleFractions::new(fracs.clone()) {
                let sum: f64 = comp.iter().sum();
                let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
                prop_assert!(nearly_equal(sum, 1.0, tol));
                prop_assert_eq!(comp.len(), fracs.len());
            }
        }
    }
}
