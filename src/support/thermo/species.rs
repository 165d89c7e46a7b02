//! Data presets for common species.
//!
//! A species type names a substance and supplies the constants a standard
//! state needs: molecular weight, a reference-state fit, and critical
//! constants for real-fluid equations of state.

mod carbon_dioxide;
mod nitrogen;
mod water;

pub use carbon_dioxide::CarbonDioxide;
pub use nitrogen::Nitrogen;
pub use water::Water;

use uom::si::f64::{MassDensity, MolarMass, Pressure, ThermodynamicTemperature};

use super::{ConfigError, eos::VanDerWaals, reference::Nasa7};

/// Constants describing one species.
pub trait SpeciesData {
    /// Chemical formula used as the species name.
    const NAME: &'static str;

    /// Returns the molecular weight.
    fn molecular_weight() -> MolarMass;

    /// Returns the NASA-7 reference-state fit at one atmosphere.
    fn reference_thermo() -> Nasa7;

    /// Returns the critical temperature.
    fn critical_temperature() -> ThermodynamicTemperature;

    /// Returns the critical pressure.
    fn critical_pressure() -> Pressure;

    /// Returns a typical liquid density, if the species is commonly handled as a liquid.
    fn liquid_density() -> Option<MassDensity> {
        None
    }

    /// Returns a van der Waals equation of state fitted to the critical point.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the critical constants are not physical.
    fn van_der_waals() -> Result<VanDerWaals, ConfigError> {
        VanDerWaals::new(Self::critical_temperature(), Self::critical_pressure())
    }
}
