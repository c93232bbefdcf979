//! Fugacity model trait.

use crate::component::Component;
use crate::error::{ThermoError, ThermoResult};
use vf_core::units::{Pressure, Temperature};

/// Phase whose compressibility root is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Liquid,
    Vapor,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Liquid => "liquid",
            Phase::Vapor => "vapor",
        }
    }
}

/// Trait for models that provide fugacity coefficients.
///
/// Implementations must be thread-safe (Send + Sync) so solvers can be shared.
/// All methods should validate inputs and outputs for physical plausibility.
pub trait FugacityModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Components in mixture order.
    fn components(&self) -> &[Component];

    fn n_components(&self) -> usize {
        self.components().len()
    }

    /// Natural log of the fugacity coefficients of each component at
    /// composition `x` in the requested phase.
    fn ln_phi(
        &self,
        x: &[f64],
        t: Temperature,
        p: Pressure,
        phase: Phase,
    ) -> ThermoResult<Vec<f64>>;

    /// Compressibility factor `Z = PV/RT` of the requested phase.
    fn compressibility(
        &self,
        x: &[f64],
        t: Temperature,
        p: Pressure,
        phase: Phase,
    ) -> ThermoResult<f64>;

    /// Antoine vapor pressure of component `index`.
    fn psat_estimate(&self, index: usize, t: Temperature) -> ThermoResult<Pressure> {
        let comp = self
            .components()
            .get(index)
            .ok_or(ThermoError::InvalidArg {
                what: "component index out of range",
            })?;
        comp.antoine.psat(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_labels() {
        assert_eq!(Phase::Liquid.label(), "liquid");
        assert_eq!(Phase::Vapor.label(), "vapor");
    }
}
