//! Phase equilibrium solvers for vleflash.
//!
//! This crate provides the isothermal flash (successive substitution with
//! dominant-eigenvalue acceleration and a Newton fallback on ln K), the
//! Rachford-Rice vapor fraction solve, bubble/dew pressures, and the linear
//! material-balance split of a feed into vapor and liquid flows.

pub mod error;
pub mod flash;
pub mod jacobian;
pub mod newton;
pub mod rachford_rice;
pub mod saturation;
pub mod separator;
pub mod split;

pub use error::{SolverError, SolverResult};
pub use flash::{FlashMethod, FlashOptions, FlashResult, FlashSpec, flash};
pub use jacobian::FiniteDifference;
pub use newton::{NewtonConfig, NewtonResult};
pub use rachford_rice::{PhaseSplit, solve_rachford_rice};
pub use saturation::{SaturationOptions, SaturationResult, bubble_pressure, dew_pressure};
pub use separator::{SeparatorSolution, solve_separator};
pub use split::{PhaseFlows, phase_flows};
