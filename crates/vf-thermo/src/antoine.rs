//! Antoine vapor pressure correlation.
//!
//! `ln P[kPa] = A - B / (T[°C] + C)`

use crate::error::{ThermoError, ThermoResult};
use vf_core::units::{Pressure, Temperature, celsius, kpa, to_celsius, to_kpa};

/// Antoine coefficients for natural log, kPa and degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Antoine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Antoine {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Saturation pressure at temperature `t`.
    pub fn psat(&self, t: Temperature) -> ThermoResult<Pressure> {
        let denom = to_celsius(t) + self.c;
        if !denom.is_finite() || denom <= 0.0 {
            return Err(ThermoError::OutOfRange {
                what: "Antoine temperature",
            });
        }
        let ln_p = self.a - self.b / denom;
        Ok(kpa(ln_p.exp()))
    }

    /// Saturation temperature at pressure `p` (inverse of [`Antoine::psat`]).
    pub fn tsat(&self, p: Pressure) -> ThermoResult<Temperature> {
        let p_kpa = to_kpa(p);
        if !p_kpa.is_finite() || p_kpa <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "Antoine pressure",
            });
        }
        let denom = self.a - p_kpa.ln();
        if denom <= 0.0 {
            return Err(ThermoError::OutOfRange {
                what: "Antoine pressure",
            });
        }
        Ok(celsius(self.b / denom - self.c))
    }
}
