use uom::{
    ConstZero,
    si::{
        f64::{MolarHeatCapacity, Pressure, ThermodynamicTemperature},
        molar_heat_capacity::joule_per_kelvin_mole,
        pressure::pascal,
    },
};

use crate::support::{
    thermo::PropertyError,
    units::{MOLAR_GAS_CONSTANT, MolarEnthalpy, MolarEntropy, MolarVolume, gas_constant},
};

use super::{
    EosKind, EquationOfState,
    pressure_independent::{ideal_molar_volume, ideal_pressure},
};

/// Ideal-gas standard state.
///
/// Enthalpy and heat capacity do not depend on pressure, while entropy falls
/// by `R·ln(P/P₀)`:
///
/// - `s(T, P) = s0(T) − R·ln(P/P₀)`
/// - `g(T, P) = g0(T) + RT·ln(P/P₀)`
/// - `cv = cp − R`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdealGas;

impl EquationOfState for IdealGas {
    fn kind(&self) -> EosKind {
        EosKind::IdealGas
    }

    fn molar_volume(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<MolarVolume, PropertyError> {
        ideal_molar_volume(temperature, pressure)
    }

    fn pressure(
        &self,
        temperature: ThermodynamicTemperature,
        molar_volume: MolarVolume,
    ) -> Result<Pressure, PropertyError> {
        ideal_pressure(temperature, molar_volume)
    }

    fn enthalpy_delta(
        &self,
        _temperature: ThermodynamicTemperature,
        _pressure: Pressure,
        _reference_pressure: Pressure,
    ) -> Result<MolarEnthalpy, PropertyError> {
        Ok(MolarEnthalpy::ZERO)
    }

    fn entropy_delta(
        &self,
        _temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarEntropy, PropertyError> {
        let ratio = pressure.get::<pascal>() / reference_pressure.get::<pascal>();
        if !(ratio > 0.0 && ratio.is_finite()) {
            return Err(PropertyError::out_of_domain(format!(
                "ideal-gas entropy at pressure ratio {ratio}"
            )));
        }
        Ok(MolarEntropy::new::<joule_per_kelvin_mole>(
            -MOLAR_GAS_CONSTANT * ratio.ln(),
        ))
    }

    fn cp_delta(
        &self,
        _temperature: ThermodynamicTemperature,
        _pressure: Pressure,
        _reference_pressure: Pressure,
    ) -> Result<MolarHeatCapacity, PropertyError> {
        Ok(MolarHeatCapacity::ZERO)
    }

    fn heat_capacity_gap(
        &self,
        _temperature: ThermodynamicTemperature,
        _pressure: Pressure,
    ) -> Result<MolarHeatCapacity, PropertyError> {
        Ok(gas_constant())
    }
}
