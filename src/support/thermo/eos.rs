//! Equation-of-state variants for standard states.
//!
//! An [`EquationOfState`] decides how a species' pressure, temperature, and
//! molar volume relate, and how its standard-state properties at pressure `P`
//! differ from the reference-pressure values at `P₀`. Every "delta" is
//! `property(T, P) − property(T, P₀)`, so all deltas vanish at `P = P₀`.
//!
//! Variants are ordinary types implementing the trait. [`EosModel`] wraps
//! the provided variants so that one can be selected at runtime from
//! configuration.

mod constant_volume;
mod cubic;
mod ideal_gas;
mod pressure_independent;
mod van_der_waals;

pub use constant_volume::ConstantVolume;
pub use ideal_gas::IdealGas;
pub use pressure_independent::PressureIndependent;
pub use van_der_waals::{SaturationConfig, VanDerWaals};

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{MolarHeatCapacity, MolarMass, Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_heat_capacity::joule_per_kelvin_mole,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constraint, FinitePositive},
    units::{MolarEnthalpy, MolarEntropy, MolarGibbsEnergy, MolarVolume},
};

use super::{ConfigError, PropertyError};

/// Identifies an equation-of-state variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EosKind {
    PressureIndependent,
    IdealGas,
    ConstantVolume,
    VanDerWaals,
}

impl fmt::Display for EosKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PressureIndependent => "pressure-independent",
            Self::IdealGas => "ideal-gas",
            Self::ConstantVolume => "constant-volume",
            Self::VanDerWaals => "van-der-waals",
        })
    }
}

/// Pressure correction and mechanical behavior of a standard state.
///
/// Only [`molar_volume`](Self::molar_volume), [`pressure`](Self::pressure),
/// and the enthalpy, entropy, and heat capacity corrections are required.
/// Critical-point and saturation queries default to
/// [`PropertyError::Unsupported`], since many variants have no vapor-liquid model.
pub trait EquationOfState {
    /// Returns the variant tag.
    fn kind(&self) -> EosKind;

    /// Returns the molar volume at the given temperature and pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if no physical volume exists at the state.
    fn molar_volume(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<MolarVolume, PropertyError>;

    /// Returns the pressure at the given temperature and molar volume.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] for variants where pressure is
    /// an independent variable rather than a function of density.
    fn pressure(
        &self,
        temperature: ThermodynamicTemperature,
        molar_volume: MolarVolume,
    ) -> Result<Pressure, PropertyError>;

    /// Returns the molar volume if the variant fixes it regardless of state.
    fn fixed_molar_volume(&self) -> Option<MolarVolume> {
        None
    }

    /// Returns `h(T, P) − h(T, P₀)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the correction cannot be calculated.
    fn enthalpy_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarEnthalpy, PropertyError>;

    /// Returns `s(T, P) − s(T, P₀)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the correction cannot be calculated.
    fn entropy_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarEntropy, PropertyError>;

    /// Returns `g(T, P) − g(T, P₀)`, computed as `Δh − T·Δs`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if either underlying correction fails.
    fn gibbs_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarGibbsEnergy, PropertyError> {
        let dh = self.enthalpy_delta(temperature, pressure, reference_pressure)?;
        let ds = self.entropy_delta(temperature, pressure, reference_pressure)?;

        Ok(MolarGibbsEnergy::new::<joule_per_mole>(
            dh.get::<joule_per_mole>()
                - temperature.get::<kelvin>() * ds.get::<joule_per_kelvin_mole>(),
        ))
    }

    /// Returns `cp(T, P) − cp(T, P₀)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the correction cannot be calculated.
    fn cp_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarHeatCapacity, PropertyError>;

    /// Returns `cp − cv` at the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the difference is undefined at the state.
    fn heat_capacity_gap(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<MolarHeatCapacity, PropertyError>;

    /// Returns the critical temperature.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] unless the variant defines a critical point.
    fn critical_temperature(&self) -> Result<ThermodynamicTemperature, PropertyError> {
        Err(PropertyError::unsupported(format!(
            "{} has no critical temperature",
            self.kind()
        )))
    }

    /// Returns the critical pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] unless the variant defines a critical point.
    fn critical_pressure(&self) -> Result<Pressure, PropertyError> {
        Err(PropertyError::unsupported(format!(
            "{} has no critical pressure",
            self.kind()
        )))
    }

    /// Returns the critical molar volume.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] unless the variant defines a critical point.
    fn critical_molar_volume(&self) -> Result<MolarVolume, PropertyError> {
        Err(PropertyError::unsupported(format!(
            "{} has no critical volume",
            self.kind()
        )))
    }

    /// Returns the vapor pressure at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] unless the variant models vapor-liquid equilibrium.
    fn saturation_pressure(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Pressure, PropertyError> {
        let _ = temperature;
        Err(PropertyError::unsupported(format!(
            "{} has no saturation curve",
            self.kind()
        )))
    }

    /// Updates the variant from named parameters.
    ///
    /// Parameters the variant does not recognize are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a recognized parameter is invalid.
    fn apply_parameters(
        &mut self,
        parameters: &EosParameters,
        molecular_weight: MolarMass,
    ) -> Result<(), ConfigError> {
        let _ = (parameters, molecular_weight);
        Ok(())
    }
}

/// Named equation-of-state parameters in SI units.
///
/// ```
/// use twine_standard_state::support::thermo::eos::EosParameters;
///
/// let params = EosParameters::new()
///     .with("critical_temperature", 304.13)
///     .with("critical_pressure", 7.3773e6);
/// assert_eq!(params.get("critical_temperature"), Some(304.13));
/// assert!(params.require("acentric_factor").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EosParameters(BTreeMap<String, f64>);

impl EosParameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set with `name` bound to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Returns the value bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingParameter`] if `name` is not bound.
    pub fn require(&self, name: &str) -> Result<f64, ConfigError> {
        self.get(name).ok_or_else(|| ConfigError::missing(name))
    }

    /// Returns the value bound to `name` if it is present, checking that it is
    /// finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for a non-positive value.
    pub fn positive(&self, name: &str) -> Result<Option<f64>, ConfigError> {
        match self.get(name) {
            Some(value) if FinitePositive::check(&value).is_err() => {
                Err(ConfigError::invalid(name, value))
            }
            other => Ok(other),
        }
    }

    /// Returns `true` if no parameters are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Runtime-selected equation-of-state variant.
#[derive(Debug, Clone, PartialEq)]
pub enum EosModel {
    PressureIndependent(PressureIndependent),
    IdealGas(IdealGas),
    ConstantVolume(ConstantVolume),
    VanDerWaals(VanDerWaals),
}

impl EosModel {
    /// Builds the variant named by `kind` from its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required parameter is missing or invalid.
    pub fn from_parameters(
        kind: EosKind,
        parameters: &EosParameters,
        molecular_weight: MolarMass,
    ) -> Result<Self, ConfigError> {
        Ok(match kind {
            EosKind::PressureIndependent => Self::PressureIndependent(PressureIndependent),
            EosKind::IdealGas => Self::IdealGas(IdealGas),
            EosKind::ConstantVolume => Self::ConstantVolume(ConstantVolume::from_parameters(
                parameters,
                molecular_weight,
            )?),
            EosKind::VanDerWaals => Self::VanDerWaals(VanDerWaals::from_parameters(parameters)?),
        })
    }

    fn inner(&self) -> &dyn EquationOfState {
        match self {
            Self::PressureIndependent(eos) => eos,
            Self::IdealGas(eos) => eos,
            Self::ConstantVolume(eos) => eos,
            Self::VanDerWaals(eos) => eos,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn EquationOfState {
        match self {
            Self::PressureIndependent(eos) => eos,
            Self::IdealGas(eos) => eos,
            Self::ConstantVolume(eos) => eos,
            Self::VanDerWaals(eos) => eos,
        }
    }
}

impl Default for EosModel {
    fn default() -> Self {
        Self::PressureIndependent(PressureIndependent)
    }
}

impl From<PressureIndependent> for EosModel {
    fn from(eos: PressureIndependent) -> Self {
        Self::PressureIndependent(eos)
    }
}

impl From<IdealGas> for EosModel {
    fn from(eos: IdealGas) -> Self {
        Self::IdealGas(eos)
    }
}

impl From<ConstantVolume> for EosModel {
    fn from(eos: ConstantVolume) -> Self {
        Self::ConstantVolume(eos)
    }
}

impl From<VanDerWaals> for EosModel {
    fn from(eos: VanDerWaals) -> Self {
        Self::VanDerWaals(eos)
    }
}

impl EquationOfState for EosModel {
    fn kind(&self) -> EosKind {
        self.inner().kind()
    }

    fn molar_volume(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<MolarVolume, PropertyError> {
        self.inner().molar_volume(temperature, pressure)
    }

    fn pressure(
        &self,
        temperature: ThermodynamicTemperature,
        molar_volume: MolarVolume,
    ) -> Result<Pressure, PropertyError> {
        self.inner().pressure(temperature, molar_volume)
    }

    fn fixed_molar_volume(&self) -> Option<MolarVolume> {
        self.inner().fixed_molar_volume()
    }

    fn enthalpy_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarEnthalpy, PropertyError> {
        self.inner()
            .enthalpy_delta(temperature, pressure, reference_pressure)
    }

    fn entropy_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarEntropy, PropertyError> {
        self.inner()
            .entropy_delta(temperature, pressure, reference_pressure)
    }

    fn gibbs_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarGibbsEnergy, PropertyError> {
        self.inner()
            .gibbs_delta(temperature, pressure, reference_pressure)
    }

    fn cp_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarHeatCapacity, PropertyError> {
        self.inner().cp_delta(temperature, pressure, reference_pressure)
    }

    fn heat_capacity_gap(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<MolarHeatCapacity, PropertyError> {
        self.inner().heat_capacity_gap(temperature, pressure)
    }

    fn critical_temperature(&self) -> Result<ThermodynamicTemperature, PropertyError> {
        self.inner().critical_temperature()
    }

    fn critical_pressure(&self) -> Result<Pressure, PropertyError> {
        self.inner().critical_pressure()
    }

    fn critical_molar_volume(&self) -> Result<MolarVolume, PropertyError> {
        self.inner().critical_molar_volume()
    }

    fn saturation_pressure(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Pressure, PropertyError> {
        self.inner().saturation_pressure(temperature)
    }

    fn apply_parameters(
        &mut self,
        parameters: &EosParameters,
        molecular_weight: MolarMass,
    ) -> Result<(), ConfigError> {
        self.inner_mut().apply_parameters(parameters, molecular_weight)
    }
}
