//! vf-thermo: thermodynamic models for vleflash.
//!
//! Provides:
//! - Pure component constants (critical point, acentric factor, Antoine, UNIFAC groups)
//! - Mole fraction vectors with validation and normalization
//! - Antoine vapor pressure correlation
//! - Dortmund modified UNIFAC activity coefficients
//! - Peng-Robinson equation of state with quadratic or MHV-UNIFAC mixing rules
//!
//! # Architecture
//!
//! The solver crates only see the [`FugacityModel`] trait. Peng-Robinson is the
//! one implementation today; other cubic or SAFT-type models slot in behind the
//! same trait.
//!
//! # Example
//!
//! ```no_run
//! use vf_thermo::{FugacityModel, Mixture, PengRobinson, Phase};
//! use vf_core::units::{bar, k};
//!
//! let eos = PengRobinson::new(Mixture::benzene_toluene_mhv()).unwrap();
//! let ln_phi = eos.ln_phi(&[0.5, 0.5], k(358.15), bar(1.01), Phase::Liquid).unwrap();
//! println!("ln phi = {ln_phi:?}");
//! ```

pub mod antoine;
pub mod component;
pub mod composition;
pub mod cubic;
pub mod error;
pub mod mixture;
pub mod model;
pub mod peng_robinson;
pub mod unifac;

// Re-exports for ergonomics
pub use antoine::Antoine;
pub use component::Component;
pub use composition::MoleFractions;
pub use error::{ThermoError, ThermoResult};
pub use mixture::{MixingRule, Mixture};
pub use model::{FugacityModel, Phase};
pub use peng_robinson::PengRobinson;
pub use unifac::{GroupInteraction, Subgroup, Unifac, UnifacParameters};
