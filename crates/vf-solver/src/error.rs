//! Error types for solver operations.

use thiserror::Error;
use vf_core::VfError;
use vf_thermo::ThermoError;

/// Errors that can occur during equilibrium solving.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Trivial solution: {what}")]
    TrivialSolution { what: String },

    #[error("No phase split: {what}")]
    NoPhaseSplit { what: String },

    #[error("Singular system: {what}")]
    Singular { what: String },

    #[error("Thermodynamic model error: {0}")]
    Thermo(#[from] ThermoError),

    #[error("Core error: {0}")]
    Core(#[from] VfError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thermo_error_wraps() {
        let err: SolverError = ThermoError::NoRoot { what: "vapor" }.into();
        assert!(err.to_string().contains("vapor"));
        assert!(matches!(err, SolverError::Thermo(_)));
    }
}
