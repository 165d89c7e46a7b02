use uom::{
    ConstZero,
    si::{
        f64::{MassDensity, MolarHeatCapacity, MolarMass, Pressure, ThermodynamicTemperature},
        mass_density::kilogram_per_cubic_meter,
        pressure::pascal,
    },
};

use crate::support::{
    constraint::{Constraint, FinitePositive},
    thermo::{ConfigError, PropertyError},
    units::{MolarEnthalpy, MolarEntropy, MolarVolume, molar_volume},
};

use super::{EosKind, EosParameters, EquationOfState};

/// Incompressible standard state with a fixed molar volume `v₀`.
///
/// - `h(T, P) = h0(T) + v₀·(P − P₀)`
/// - `s(T, P) = s0(T)`
/// - `cv = cp`
///
/// Pressure is an independent variable. It cannot be derived from density,
/// and the only admissible density is `M/v₀`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantVolume {
    v0: MolarVolume,
}

impl ConstantVolume {
    /// Creates a constant-volume standard state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if the volume is not strictly positive.
    pub fn new(molar_volume: MolarVolume) -> Result<Self, ConfigError> {
        if FinitePositive::check(&molar_volume.value).is_err() {
            return Err(ConfigError::invalid("molar_volume", molar_volume.value));
        }
        Ok(Self { v0: molar_volume })
    }

    /// Creates a constant-volume standard state from a mass density.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if the density or molecular
    /// weight is not strictly positive.
    pub fn from_density(
        density: MassDensity,
        molecular_weight: MolarMass,
    ) -> Result<Self, ConfigError> {
        let rho = density.get::<kilogram_per_cubic_meter>();
        if FinitePositive::check(&rho).is_err() {
            return Err(ConfigError::invalid("density", rho));
        }
        Self::new(molecular_weight / density)
    }

    /// Builds the variant from `molar_volume` (m³/mol) or `density` (kg/m³).
    ///
    /// `molar_volume` wins when both are given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingParameter`] if neither is given.
    pub fn from_parameters(
        parameters: &EosParameters,
        molecular_weight: MolarMass,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = parameters.positive("molar_volume")? {
            return Self::new(molar_volume(v));
        }
        match parameters.positive("density")? {
            Some(rho) => Self::from_density(
                MassDensity::new::<kilogram_per_cubic_meter>(rho),
                molecular_weight,
            ),
            None => Err(ConfigError::missing("molar_volume")),
        }
    }
}

impl EquationOfState for ConstantVolume {
    fn kind(&self) -> EosKind {
        EosKind::ConstantVolume
    }

    fn molar_volume(
        &self,
        _temperature: ThermodynamicTemperature,
        _pressure: Pressure,
    ) -> Result<MolarVolume, PropertyError> {
        Ok(self.v0)
    }

    fn pressure(
        &self,
        _temperature: ThermodynamicTemperature,
        _molar_volume: MolarVolume,
    ) -> Result<Pressure, PropertyError> {
        Err(PropertyError::unsupported(
            "constant-volume pressure is not a function of density",
        ))
    }

    fn fixed_molar_volume(&self) -> Option<MolarVolume> {
        Some(self.v0)
    }

    fn enthalpy_delta(
        &self,
        _temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarEnthalpy, PropertyError> {
        let dp = Pressure::new::<pascal>(
            pressure.get::<pascal>() - reference_pressure.get::<pascal>(),
        );
        Ok(dp * self.v0)
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
        Ok(MolarHeatCapacity::ZERO)
    }

    fn apply_parameters(
        &mut self,
        parameters: &EosParameters,
        molecular_weight: MolarMass,
    ) -> Result<(), ConfigError> {
        if parameters.get("molar_volume").is_some() || parameters.get("density").is_some() {
            *self = Self::from_parameters(parameters, molecular_weight)?;
        }
        Ok(())
    }
}
