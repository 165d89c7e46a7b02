//! Pressure-dependent standard-state properties of a single species.
//!
//! The central type is [`StandardState`], which owns the temperature and
//! density of one species and combines reference-pressure properties from a
//! [`ReferenceTables`] arena with the pressure correction of an
//! [`EquationOfState`](eos::EquationOfState) variant.
//!
//! # Typical sequence
//!
//! ```
//! use twine_standard_state::support::thermo::{
//!     ReferenceTables, StandardState,
//!     eos::IdealGas,
//!     species::{Nitrogen, SpeciesData},
//! };
//! use uom::si::{
//!     f64::{Pressure, ThermodynamicTemperature},
//!     molar_energy::joule_per_mole,
//!     pressure::bar,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! let mut reference = ReferenceTables::new();
//! let k = reference.add_species(Nitrogen::reference_thermo());
//!
//! let mut n2 = StandardState::new(IdealGas, k, Nitrogen::molecular_weight()).unwrap();
//! n2.set_state_tp(
//!     ThermodynamicTemperature::new::<kelvin>(500.0),
//!     Pressure::new::<bar>(5.0),
//!     &mut reference,
//! )
//! .unwrap();
//!
//! let h = n2.enthalpy(&reference).unwrap();
//! assert!(h.get::<joule_per_mole>() > 5000.0);
//! ```

mod error;
mod owner;
mod state;

pub mod document;
pub mod eos;
pub mod reference;
pub mod species;
pub mod standard_state;

pub use error::{ConfigError, PropertyError};
pub use owner::{OwnerPhase, OwnerRef};
pub use reference::{ReferenceProperties, ReferenceTables, ReferenceThermo};
pub use standard_state::{Lifecycle, StandardState, StandardStateProperties};
pub use state::State;
