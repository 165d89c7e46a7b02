//! Van der Waals real-fluid standard state.
//!
//! The fluid follows `P = RT/(v − b) − a/v²` with constants fixed by the
//! critical point:
//!
//! - `a = 27·R²·Tc²/(64·Pc)`
//! - `b = R·Tc/(8·Pc)`
//!
//! At a given `(T, P)` the molar volume is the real root of the compressibility
//! cubic with the lowest fugacity. Pressure corrections are differences of
//! departure functions between `P` and `P₀`, plus the ideal-gas entropy term.

mod saturation;

pub use saturation::SaturationConfig;

use uom::si::{
    f64::{MolarHeatCapacity, MolarMass, Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_heat_capacity::joule_per_kelvin_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constraint, FinitePositive},
    thermo::{ConfigError, PropertyError},
    units::{MOLAR_GAS_CONSTANT, MolarEnthalpy, MolarEntropy, MolarVolume, molar_volume},
};

use super::{EosKind, EosParameters, EquationOfState, cubic};

/// Van der Waals equation of state built from critical constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanDerWaals {
    tc: f64,
    pc: f64,
    a: f64,
    b: f64,
    saturation: SaturationConfig,
}

/// Departure of the real fluid from an ideal gas at the same `(T, P)`.
#[derive(Debug, Clone, Copy)]
struct Departure {
    enthalpy: f64,
    entropy: f64,
    gap: f64,
}

impl VanDerWaals {
    /// Creates the equation of state from a critical temperature and pressure.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if either constant is not strictly positive.
    pub fn new(
        critical_temperature: ThermodynamicTemperature,
        critical_pressure: Pressure,
    ) -> Result<Self, ConfigError> {
        let tc = critical_temperature.get::<kelvin>();
        if FinitePositive::check(&tc).is_err() {
            return Err(ConfigError::invalid("critical_temperature", tc));
        }
        let pc = critical_pressure.get::<pascal>();
        if FinitePositive::check(&pc).is_err() {
            return Err(ConfigError::invalid("critical_pressure", pc));
        }

        let r = MOLAR_GAS_CONSTANT;
        Ok(Self {
            tc,
            pc,
            a: 27.0 * r * r * tc * tc / (64.0 * pc),
            b: r * tc / (8.0 * pc),
            saturation: SaturationConfig::default(),
        })
    }

    /// Builds the variant from `critical_temperature` (K) and `critical_pressure` (Pa).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either parameter is missing or invalid.
    pub fn from_parameters(parameters: &EosParameters) -> Result<Self, ConfigError> {
        let tc = parameters.require("critical_temperature")?;
        let pc = parameters.require("critical_pressure")?;
        Self::new(
            ThermodynamicTemperature::new::<kelvin>(tc),
            Pressure::new::<pascal>(pc),
        )
    }

    /// Returns the equation of state with a different vapor-pressure solver configuration.
    #[must_use]
    pub fn with_saturation_config(mut self, config: SaturationConfig) -> Self {
        self.saturation = config;
        self
    }

    /// Returns the dimensionless `(A, B) = (aP/(RT)², bP/(RT))`.
    fn reduced(&self, t: f64, p: f64) -> (f64, f64) {
        let rt = MOLAR_GAS_CONSTANT * t;
        (self.a * p / (rt * rt), self.b * p / rt)
    }

    /// Returns the physical compressibility roots (`Z > B`), sorted ascending.
    fn compressibility_roots(&self, a: f64, b: f64) -> Vec<f64> {
        cubic::real_roots(-(1.0 + b), a, -a * b)
            .into_iter()
            .filter(|&z| z > b)
            .collect()
    }

    /// Returns `ln φ` for compressibility `z`.
    fn ln_phi(z: f64, a: f64, b: f64) -> f64 {
        z - 1.0 - (z - b).ln() - a / z
    }

    fn check_state(t: f64, p: f64) -> Result<(), PropertyError> {
        if FinitePositive::check(&t).is_err() || FinitePositive::check(&p).is_err() {
            return Err(PropertyError::out_of_domain(format!(
                "van der Waals state requires positive T and P, got {t} K and {p} Pa"
            )));
        }
        Ok(())
    }

    /// Returns the compressibility of the stable phase at `(t, p)`.
    fn compressibility(&self, t: f64, p: f64) -> Result<f64, PropertyError> {
        Self::check_state(t, p)?;
        let (a, b) = self.reduced(t, p);
        self.compressibility_roots(a, b)
            .into_iter()
            .map(|z| (z, Self::ln_phi(z, a, b)))
            .min_by(|x, y| x.1.total_cmp(&y.1))
            .map(|(z, _)| z)
            .ok_or_else(|| {
                PropertyError::calculation(format!("no real volume at {t} K and {p} Pa"))
            })
    }

    fn departure(&self, t: f64, p: f64) -> Result<Departure, PropertyError> {
        let r = MOLAR_GAS_CONSTANT;
        let z = self.compressibility(t, p)?;
        let (_, b_red) = self.reduced(t, p);
        let v = z * r * t / p;

        let dp_dv = -r * t / ((v - self.b) * (v - self.b)) + 2.0 * self.a / (v * v * v);
        if dp_dv >= 0.0 {
            return Err(PropertyError::calculation(format!(
                "mechanically unstable volume {v} m3/mol at {t} K"
            )));
        }
        let dp_dt = r / (v - self.b);

        Ok(Departure {
            enthalpy: r * t * (z - 1.0) - self.a / v,
            entropy: r * (z - b_red).ln(),
            gap: -t * dp_dt * dp_dt / dp_dv,
        })
    }
}

impl EquationOfState for VanDerWaals {
    fn kind(&self) -> EosKind {
        EosKind::VanDerWaals
    }

    fn molar_volume(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<MolarVolume, PropertyError> {
        let t = temperature.get::<kelvin>();
        let p = pressure.get::<pascal>();
        let z = self.compressibility(t, p)?;
        Ok(molar_volume(z * MOLAR_GAS_CONSTANT * t / p))
    }

    fn pressure(
        &self,
        temperature: ThermodynamicTemperature,
        molar_volume: MolarVolume,
    ) -> Result<Pressure, PropertyError> {
        let t = temperature.get::<kelvin>();
        let v = molar_volume.value;
        if v <= self.b || !v.is_finite() {
            return Err(PropertyError::out_of_domain(format!(
                "molar volume {v} m3/mol not above co-volume {} m3/mol",
                self.b
            )));
        }

        let p = MOLAR_GAS_CONSTANT * t / (v - self.b) - self.a / (v * v);
        if p <= 0.0 {
            return Err(PropertyError::out_of_domain(format!(
                "density at {t} K implies non-positive pressure {p} Pa"
            )));
        }
        Ok(Pressure::new::<pascal>(p))
    }

    fn enthalpy_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarEnthalpy, PropertyError> {
        let t = temperature.get::<kelvin>();
        let at_p = self.departure(t, pressure.get::<pascal>())?;
        let at_p0 = self.departure(t, reference_pressure.get::<pascal>())?;
        Ok(MolarEnthalpy::new::<joule_per_mole>(
            at_p.enthalpy - at_p0.enthalpy,
        ))
    }

    fn entropy_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarEntropy, PropertyError> {
        let t = temperature.get::<kelvin>();
        let p = pressure.get::<pascal>();
        let p0 = reference_pressure.get::<pascal>();
        let at_p = self.departure(t, p)?;
        let at_p0 = self.departure(t, p0)?;
        Ok(MolarEntropy::new::<joule_per_kelvin_mole>(
            at_p.entropy - at_p0.entropy - MOLAR_GAS_CONSTANT * (p / p0).ln(),
        ))
    }

    fn cp_delta(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference_pressure: Pressure,
    ) -> Result<MolarHeatCapacity, PropertyError> {
        let t = temperature.get::<kelvin>();
        let at_p = self.departure(t, pressure.get::<pascal>())?;
        let at_p0 = self.departure(t, reference_pressure.get::<pascal>())?;
        Ok(MolarHeatCapacity::new::<joule_per_kelvin_mole>(
            at_p.gap - at_p0.gap,
        ))
    }

    fn heat_capacity_gap(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<MolarHeatCapacity, PropertyError> {
        let departure = self.departure(temperature.get::<kelvin>(), pressure.get::<pascal>())?;
        Ok(MolarHeatCapacity::new::<joule_per_kelvin_mole>(
            departure.gap,
        ))
    }

    fn critical_temperature(&self) -> Result<ThermodynamicTemperature, PropertyError> {
        Ok(ThermodynamicTemperature::new::<kelvin>(self.tc))
    }

    fn critical_pressure(&self) -> Result<Pressure, PropertyError> {
        Ok(Pressure::new::<pascal>(self.pc))
    }

    fn critical_molar_volume(&self) -> Result<MolarVolume, PropertyError> {
        Ok(molar_volume(3.0 * self.b))
    }

    fn saturation_pressure(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Pressure, PropertyError> {
        saturation::saturation_pressure(self, temperature)
    }

    fn apply_parameters(
        &mut self,
        parameters: &EosParameters,
        _molecular_weight: MolarMass,
    ) -> Result<(), ConfigError> {
        let tc = parameters.positive("critical_temperature")?.unwrap_or(self.tc);
        let pc = parameters.positive("critical_pressure")?.unwrap_or(self.pc);
        *self = Self::new(
            ThermodynamicTemperature::new::<kelvin>(tc),
            Pressure::new::<pascal>(pc),
        )?
        .with_saturation_config(self.saturation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{molar_mass::gram_per_mole, pressure::megapascal};

    fn carbon_dioxide() -> VanDerWaals {
        VanDerWaals::new(
            ThermodynamicTemperature::new::<kelvin>(304.13),
            Pressure::new::<megapascal>(7.3773),
        )
        .unwrap()
    }

    fn temp(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(t)
    }

    #[test]
    fn critical_constants() {
        let eos = carbon_dioxide();
        let r = MOLAR_GAS_CONSTANT;
        let tc = 304.13;
        let pc = 7.3773e6;

        assert_relative_eq!(eos.a, 27.0 * r * r * tc * tc / (64.0 * pc));
        assert_relative_eq!(eos.b, r * tc / (8.0 * pc));
        assert_relative_eq!(eos.critical_temperature().unwrap().get::<kelvin>(), tc);
        assert_relative_eq!(eos.critical_pressure().unwrap().get::<pascal>(), pc);

        // Zc = Pc·vc/(R·Tc) = 3/8 for every van der Waals fluid.
        let vc = eos.critical_molar_volume().unwrap().value;
        assert_relative_eq!(pc * vc / (r * tc), 0.375, epsilon = 1e-12);
    }

    #[test]
    fn volume_and_pressure_round_trip() {
        let eos = carbon_dioxide();
        for (t, p) in [(350.0, 1.0e5), (350.0, 2.0e7), (250.0, 1.0e6), (250.0, 1.0e7)] {
            let v = eos.molar_volume(temp(t), Pressure::new::<pascal>(p)).unwrap();
            let back = eos.pressure(temp(t), v).unwrap();
            assert_relative_eq!(back.get::<pascal>(), p, max_relative = 1e-9);
        }
    }

    #[test]
    fn picks_liquid_above_vapor_pressure() {
        let eos = carbon_dioxide();
        let t = temp(250.0);
        let p_sat = eos.saturation_pressure(t).unwrap();

        let above = eos.molar_volume(t, p_sat * 1.05).unwrap().value;
        let below = eos.molar_volume(t, p_sat * 0.95).unwrap().value;
        let vc = eos.critical_molar_volume().unwrap().value;
        assert!(above < vc);
        assert!(below > vc);
    }

    #[test]
    fn approaches_ideal_gas_at_low_pressure() {
        let eos = carbon_dioxide();
        let t = temp(600.0);
        let p = Pressure::new::<pascal>(1.0);
        let v = eos.molar_volume(t, p).unwrap().value;
        assert_relative_eq!(v, MOLAR_GAS_CONSTANT * 600.0, max_relative = 1e-6);
        assert_relative_eq!(
            eos.heat_capacity_gap(t, p).unwrap().get::<joule_per_kelvin_mole>(),
            MOLAR_GAS_CONSTANT,
            max_relative = 1e-5
        );
    }

    #[test]
    fn deltas_vanish_at_reference_pressure() {
        let eos = carbon_dioxide();
        let t = temp(400.0);
        let p0 = Pressure::new::<pascal>(101_325.0);

        assert_eq!(eos.enthalpy_delta(t, p0, p0).unwrap().get::<joule_per_mole>(), 0.0);
        assert_eq!(
            eos.entropy_delta(t, p0, p0).unwrap().get::<joule_per_kelvin_mole>(),
            0.0
        );
        assert_eq!(eos.cp_delta(t, p0, p0).unwrap().get::<joule_per_kelvin_mole>(), 0.0);
    }

    #[test]
    fn enthalpy_delta_matches_temperature_derivative_of_gibbs() {
        // h = g − T·∂g/∂T at constant pressure, applied to the deltas.
        let eos = carbon_dioxide();
        let p0 = Pressure::new::<pascal>(101_325.0);
        let p = Pressure::new::<megapascal>(5.0);
        let t = 400.0;
        let dt = 1e-3;

        let g = |t: f64| {
            eos.gibbs_delta(temp(t), p, p0)
                .unwrap()
                .get::<joule_per_mole>()
        };
        let dg_dt = (g(t + dt) - g(t - dt)) / (2.0 * dt);
        let dh = eos.enthalpy_delta(temp(t), p, p0).unwrap().get::<joule_per_mole>();
        assert_relative_eq!(dh, g(t) - t * dg_dt, max_relative = 1e-6);
    }

    #[test]
    fn cp_delta_matches_temperature_derivative_of_enthalpy() {
        let eos = carbon_dioxide();
        let p0 = Pressure::new::<pascal>(101_325.0);
        let p = Pressure::new::<megapascal>(5.0);
        let t = 400.0;
        let dt = 1e-3;

        let h = |t: f64| {
            eos.enthalpy_delta(temp(t), p, p0)
                .unwrap()
                .get::<joule_per_mole>()
        };
        let dcp = eos.cp_delta(temp(t), p, p0).unwrap().get::<joule_per_kelvin_mole>();
        assert_relative_eq!(dcp, (h(t + dt) - h(t - dt)) / (2.0 * dt), max_relative = 1e-5);
    }

    #[test]
    fn pressure_refused_inside_co_volume() {
        let eos = carbon_dioxide();
        assert!(matches!(
            eos.pressure(temp(300.0), molar_volume(0.5 * eos.b)),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn parameters_override_critical_point() {
        let mw = MolarMass::new::<gram_per_mole>(44.01);
        let mut eos = carbon_dioxide();
        eos.apply_parameters(&EosParameters::new().with("critical_temperature", 300.0), mw)
            .unwrap();
        assert_relative_eq!(eos.critical_temperature().unwrap().get::<kelvin>(), 300.0);
        assert_relative_eq!(eos.critical_pressure().unwrap().get::<pascal>(), 7.3773e6);

        let missing = EosParameters::new().with("critical_temperature", 300.0);
        assert!(matches!(
            VanDerWaals::from_parameters(&missing),
            Err(ConfigError::MissingParameter { .. })
        ));
    }

}
