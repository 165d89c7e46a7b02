use uom::si::{
    f64::{MolarMass, Pressure, ThermodynamicTemperature},
    molar_mass::gram_per_mole,
    pressure::megapascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::thermo::reference::Nasa7;

use super::SpeciesData;

/// Canonical identifier for carbon dioxide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarbonDioxide;

impl SpeciesData for CarbonDioxide {
    const NAME: &'static str = "CO2";

    fn molecular_weight() -> MolarMass {
        MolarMass::new::<gram_per_mole>(44.0095)
    }

    fn reference_thermo() -> Nasa7 {
        Nasa7::new_unchecked(
            [200.0, 1000.0, 3500.0],
            [
                2.356_773_52,
                8.984_596_77e-3,
                -7.123_562_69e-6,
                2.459_190_22e-9,
                -1.436_995_48e-13,
                -48_371.969_7,
                9.901_052_22,
            ],
            [
                3.857_460_29,
                4.414_370_26e-3,
                -2.214_814_04e-6,
                5.234_901_88e-10,
                -4.720_841_64e-14,
                -48_759.166,
                2.271_638_06,
            ],
        )
    }

    fn critical_temperature() -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(304.13)
    }

    fn critical_pressure() -> Pressure {
        Pressure::new::<megapascal>(7.3773)
    }
}
