//! Pure component constants.

use crate::antoine::Antoine;
use crate::error::{ThermoError, ThermoResult};

/// Pure component data needed by the equation of state and UNIFAC.
///
/// Units: `tc` in K, `pc` in bar, `vc` in cm³/mol.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub tc: f64,
    pub pc: f64,
    pub zc: f64,
    pub vc: f64,
    /// Acentric factor
    pub omega: f64,
    pub antoine: Antoine,
    /// UNIFAC subgroup counts, in declaration order.
    pub groups: Vec<(String, u32)>,
}

impl Component {
    /// Benzene (C₆H₆).
    pub fn benzene() -> Self {
        Self {
            name: "benzene".to_string(),
            tc: 562.2,
            pc: 48.98,
            zc: 0.271,
            vc: 259.0,
            omega: 0.210,
            antoine: Antoine::new(13.7819, 2726.81, 217.572),
            groups: vec![("CH=C".to_string(), 6)],
        }
    }

    /// Toluene (C₇H₈).
    pub fn toluene() -> Self {
        Self {
            name: "toluene".to_string(),
            tc: 591.8,
            pc: 41.06,
            zc: 0.264,
            vc: 316.0,
            omega: 0.262,
            antoine: Antoine::new(13.9320, 3056.96, 217.625),
            groups: vec![("CH=C".to_string(), 6), ("CH3".to_string(), 1)],
        }
    }

    /// Look up a built-in component by name (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "benzene" | "c6h6" => Some(Self::benzene()),
            "toluene" | "c7h8" | "methylbenzene" => Some(Self::toluene()),
            _ => None,
        }
    }

    /// Check that the constants are physically meaningful.
    pub fn validate(&self) -> ThermoResult<()> {
        if self.name.trim().is_empty() {
            return Err(ThermoError::InvalidArg {
                what: "component name is empty",
            });
        }
        for (v, what) in [
            (self.tc, "critical temperature"),
            (self.pc, "critical pressure"),
            (self.zc, "critical compressibility"),
            (self.vc, "critical volume"),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ThermoError::NonPhysical { what });
            }
        }
        if !self.omega.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "acentric factor",
            });
        }
        if self.groups.iter().any(|(_, n)| *n == 0) {
            return Err(ThermoError::InvalidArg {
                what: "UNIFAC group count must be positive",
            });
        }
        Ok(())
    }

    /// Wilson's K-value estimate `K = Pc/P · exp(5.373 (1 + ω)(1 - Tc/T))`.
    pub fn wilson_k(&self, t_k: f64, p_bar: f64) -> f64 {
        self.pc / p_bar * (5.373 * (1.0 + self.omega) * (1.0 - self.tc / t_k)).exp()
    }
}
