//! Constant heat capacity reference state.
//!
//! Properties vary about a reference point (`T₀`, `h₀`, `s₀`) with a constant `cp`:
//!
//! - `h0(T) = h₀ + cp·(T − T₀)`
//! - `s0(T) = s₀ + cp·ln(T/T₀)`

use uom::{
    ConstZero,
    si::{
        f64::{MolarHeatCapacity, Pressure, ThermodynamicTemperature},
        molar_energy::joule_per_mole,
        molar_heat_capacity::joule_per_kelvin_mole,
        pressure::{atmosphere, pascal},
        thermodynamic_temperature::kelvin,
    },
};

use crate::support::{
    constraint::{Constraint, FinitePositive},
    thermo::{ConfigError, PropertyError},
    units::{MOLAR_GAS_CONSTANT, MolarEnthalpy, MolarEntropy},
};

use super::{ReferenceProperties, ReferenceThermo};

/// Reference point of a [`ConstantCp`] source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCpReference {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub enthalpy: MolarEnthalpy,
    pub entropy: MolarEntropy,
}

impl ConstantCpReference {
    /// Returns a standard reference: 298.15 K, 1 atm, `h₀ = 0`, `s₀ = 0`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            temperature: ThermodynamicTemperature::new::<kelvin>(298.15),
            pressure: Pressure::new::<atmosphere>(1.0),
            enthalpy: MolarEnthalpy::ZERO,
            entropy: MolarEntropy::ZERO,
        }
    }
}

/// Reference-state source with a constant molar heat capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCp {
    cp: f64,
    t_ref: f64,
    p_ref: Pressure,
    h_ref: f64,
    s_ref: f64,
}

impl ConstantCp {
    /// Creates a constant-`cp` source about the given reference point.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if `cp`, the reference
    /// temperature, or the reference pressure is not strictly positive.
    pub fn new(cp: MolarHeatCapacity, reference: ConstantCpReference) -> Result<Self, ConfigError> {
        let cp = cp.get::<joule_per_kelvin_mole>();
        if FinitePositive::check(&cp).is_err() {
            return Err(ConfigError::invalid("cp", cp));
        }

        let t_ref = reference.temperature.get::<kelvin>();
        if FinitePositive::check(&t_ref).is_err() {
            return Err(ConfigError::invalid("reference_temperature", t_ref));
        }

        let p_ref = reference.pressure.get::<pascal>();
        if FinitePositive::check(&p_ref).is_err() {
            return Err(ConfigError::invalid("reference_pressure", p_ref));
        }

        Ok(Self {
            cp,
            t_ref,
            p_ref: reference.pressure,
            h_ref: reference.enthalpy.get::<joule_per_mole>(),
            s_ref: reference.entropy.get::<joule_per_kelvin_mole>(),
        })
    }
}

impl ReferenceThermo for ConstantCp {
    fn reference_pressure(&self) -> Pressure {
        self.p_ref
    }

    fn evaluate(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<ReferenceProperties, PropertyError> {
        let t = temperature.get::<kelvin>();
        if FinitePositive::check(&t).is_err() {
            return Err(PropertyError::out_of_domain(format!(
                "constant-cp reference evaluated at {t} K"
            )));
        }

        let r = MOLAR_GAS_CONSTANT;
        let h = self.h_ref + self.cp * (t - self.t_ref);
        let s = self.s_ref + self.cp * (t / self.t_ref).ln();

        Ok(ReferenceProperties::new(self.cp / r, h / (r * t), s / r))
    }
}
