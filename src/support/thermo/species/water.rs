use uom::si::{
    f64::{MassDensity, MolarMass, Pressure, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    molar_mass::gram_per_mole,
    pressure::megapascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::thermo::reference::Nasa7;

use super::SpeciesData;

/// Canonical identifier for water.
///
/// The reference fit describes water vapor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Water;

impl SpeciesData for Water {
    const NAME: &'static str = "H2O";

    fn molecular_weight() -> MolarMass {
        MolarMass::new::<gram_per_mole>(18.015_28)
    }

    fn reference_thermo() -> Nasa7 {
        Nasa7::new_unchecked(
            [200.0, 1000.0, 3500.0],
            [
                4.198_640_56,
                -2.036_434_1e-3,
                6.520_402_11e-6,
                -5.487_970_62e-9,
                1.771_978_17e-12,
                -30_293.726_7,
                -0.849_032_208,
            ],
            [
                3.033_992_49,
                2.176_918_04e-3,
                -1.640_725_18e-7,
                -9.704_198_7e-11,
                1.682_009_92e-14,
                -30_004.297_1,
                4.966_770_1,
            ],
        )
    }

    fn critical_temperature() -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(647.096)
    }

    fn critical_pressure() -> Pressure {
        Pressure::new::<megapascal>(22.064)
    }

    fn liquid_density() -> Option<MassDensity> {
        Some(MassDensity::new::<kilogram_per_cubic_meter>(997.047))
    }
}
