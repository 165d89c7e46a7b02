use uom::{
    ConstZero,
    si::{
        f64::{MolarHeatCapacity, Pressure, ThermodynamicTemperature},
        pressure::pascal,
        thermodynamic_temperature::kelvin,
    },
};

use crate::support::{
    thermo::PropertyError,
    units::{
        MOLAR_GAS_CONSTANT, MolarEnthalpy, MolarEntropy, MolarVolume, gas_constant, molar_volume,
    },
};

use super::{EosKind, EquationOfState};

/// Standard state whose properties do not depend on pressure.
///
/// Every pressure correction is zero, so standard-state properties equal the
/// reference-pressure values at any pressure. Pressure and density are still
/// related through the ideal-gas law so that a density-derived pressure exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressureIndependent;

impl EquationOfState for PressureIndependent {
    fn kind(&self) -> EosKind {
        EosKind::PressureIndependent
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
        _pressure: Pressure,
        _reference_pressure: Pressure,
    ) -> Result<MolarEntropy, PropertyError> {
        Ok(MolarEntropy::ZERO)
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

/// Returns `RT/P`.
pub(super) fn ideal_molar_volume(
    temperature: ThermodynamicTemperature,
    pressure: Pressure,
) -> Result<MolarVolume, PropertyError> {
    let t = temperature.get::<kelvin>();
    let p = pressure.get::<pascal>();
    if !(p > 0.0 && p.is_finite()) {
        return Err(PropertyError::out_of_domain(format!(
            "ideal-gas volume at non-positive pressure {p} Pa"
        )));
    }
    Ok(molar_volume(MOLAR_GAS_CONSTANT * t / p))
}

/// Returns `RT/v`.
pub(super) fn ideal_pressure(
    temperature: ThermodynamicTemperature,
    molar_volume: MolarVolume,
) -> Result<Pressure, PropertyError> {
    let v = molar_volume.value;
    if !(v > 0.0 && v.is_finite()) {
        return Err(PropertyError::out_of_domain(format!(
            "ideal-gas pressure at non-positive molar volume {v} m3/mol"
        )));
    }
    Ok(Pressure::new::<pascal>(
        MOLAR_GAS_CONSTANT * temperature.get::<kelvin>() / v,
    ))
}
