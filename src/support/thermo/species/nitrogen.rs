use uom::si::{
    f64::{MolarMass, Pressure, ThermodynamicTemperature},
    molar_mass::gram_per_mole,
    pressure::megapascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::thermo::reference::Nasa7;

use super::SpeciesData;

/// Canonical identifier for nitrogen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nitrogen;

impl SpeciesData for Nitrogen {
    const NAME: &'static str = "N2";

    fn molecular_weight() -> MolarMass {
        MolarMass::new::<gram_per_mole>(28.0134)
    }

    fn reference_thermo() -> Nasa7 {
        Nasa7::new_unchecked(
            [300.0, 1000.0, 5000.0],
            [
                3.298_677,
                1.408_240_4e-3,
                -3.963_222e-6,
                5.641_515e-9,
                -2.444_854e-12,
                -1_020.899_9,
                3.950_372,
            ],
            [
                2.926_64,
                1.487_976_8e-3,
                -5.684_76e-7,
                1.009_703_8e-10,
                -6.753_351e-15,
                -922.797_7,
                5.980_528,
            ],
        )
    }

    fn critical_temperature() -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(126.19)
    }

    fn critical_pressure() -> Pressure {
        Pressure::new::<megapascal>(3.3958)
    }
}
