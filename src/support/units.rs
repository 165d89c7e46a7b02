//! Extensions to [`uom`] for molar thermodynamics.
//!
//! This crate uses [`uom`] for all physical units (e.g., temperature, pressure, density).
//! Standard-state properties are molar, so this module provides the molar
//! quantities that [`uom`] does not name directly, along with the molar gas constant.
//!
//! ## Molar volume
//!
//! A molar volume is usually obtained by dividing a molar mass by a density:
//!
//! ```
//! use uom::si::{
//!     f64::{MassDensity, MolarMass},
//!     mass_density::kilogram_per_cubic_meter,
//!     molar_mass::gram_per_mole,
//! };
//! use twine_standard_state::support::units::MolarVolume;
//!
//! let mw = MolarMass::new::<gram_per_mole>(18.0);
//! let rho = MassDensity::new::<kilogram_per_cubic_meter>(1000.0);
//! let v: MolarVolume = mw / rho;
//! assert!((v.value - 1.8e-5).abs() < 1e-12);
//! ```

mod quantities;

pub use quantities::{
    MolarEnthalpy, MolarEntropy, MolarGibbsEnergy, MolarInternalEnergy, MolarVolume,
};

use uom::si::{
    amount_of_substance::mole,
    f64::{AmountOfSubstance, MolarHeatCapacity, Volume},
    molar_heat_capacity::joule_per_kelvin_mole,
    volume::cubic_meter,
};

/// Molar gas constant, J/(mol·K).
pub const MOLAR_GAS_CONSTANT: f64 = 8.314_462_618;

/// Returns the molar gas constant as a typed quantity.
#[must_use]
pub fn gas_constant() -> MolarHeatCapacity {
    MolarHeatCapacity::new::<joule_per_kelvin_mole>(MOLAR_GAS_CONSTANT)
}

/// Creates a molar volume from a value in m³/mol.
#[must_use]
pub fn molar_volume(cubic_meters_per_mole: f64) -> MolarVolume {
    Volume::new::<cubic_meter>(cubic_meters_per_mole) / AmountOfSubstance::new::<mole>(1.0)
}
