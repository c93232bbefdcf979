//! Thermodynamic model errors.

use thiserror::Error;
use vf_core::VfError;

/// Result type for thermodynamic model operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors that can occur while building or evaluating a thermodynamic model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Non-physical values (negative pressure, mole fraction, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of the correlation's valid range.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Vector length does not match the number of components.
    #[error("Length mismatch for {what}: expected {expected}, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// UNIFAC subgroup not present in the parameter table.
    #[error("Unknown UNIFAC subgroup '{name}'")]
    UnknownGroup { name: String },

    /// UNIFAC main-group pair without interaction parameters.
    #[error("Missing UNIFAC interaction parameters between main groups {first} and {second}")]
    MissingInteraction { first: String, second: String },

    /// Cubic equation of state has no admissible root.
    #[error("No admissible compressibility root for {what}")]
    NoRoot { what: &'static str },
}

impl From<VfError> for ThermoError {
    fn from(err: VfError) -> Self {
        match err {
            VfError::NonFinite { what, .. } => ThermoError::NonPhysical { what },
            VfError::InvalidArg { what } => ThermoError::InvalidArg { what },
            VfError::LengthMismatch {
                what,
                expected,
                got,
            } => ThermoError::LengthMismatch {
                what,
                expected,
                got,
            },
            VfError::Invariant { what } => ThermoError::NonPhysical { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ThermoError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));

        let err = ThermoError::UnknownGroup {
            name: "CH2OH".into(),
        };
        assert!(err.to_string().contains("CH2OH"));
    }

    #[test]
    fn core_error_converts() {
        let core = VfError::LengthMismatch {
            what: "x",
            expected: 2,
            got: 3,
        };
        let err: ThermoError = core.into();
        assert!(matches!(err, ThermoError::LengthMismatch { got: 3, .. }));
    }
}
