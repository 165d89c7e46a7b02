//! Two-range NASA 7-coefficient polynomial fits.
//!
//! Each temperature range carries coefficients `a1..a7` with
//!
//! - `cp0/R = a1 + a2·T + a3·T² + a4·T³ + a5·T⁴`
//! - `h0/RT = a1 + a2·T/2 + a3·T²/3 + a4·T³/4 + a5·T⁴/5 + a6/T`
//! - `s0/R  = a1·ln(T) + a2·T + a3·T²/2 + a4·T³/3 + a5·T⁴/4 + a7`
//!
//! Temperatures outside the fitted range are extrapolated with the nearest set.

use log::debug;
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::{atmosphere, pascal},
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constraint, FinitePositive, StrictlyPositive},
    thermo::{ConfigError, PropertyError},
};

use super::{ReferenceProperties, ReferenceThermo};

/// NASA 7-coefficient polynomials over a low and a high temperature range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nasa7 {
    t_min: f64,
    t_mid: f64,
    t_max: f64,
    low: [f64; 7],
    high: [f64; 7],
    p_ref: Pressure,
}

impl Nasa7 {
    /// Creates a fit from its range boundaries `[T_min, T_mid, T_max]` and coefficient sets.
    ///
    /// The reference pressure defaults to one atmosphere.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if the boundaries are not
    /// positive and increasing or a coefficient is not finite.
    pub fn new(
        temperature_ranges: [ThermodynamicTemperature; 3],
        low: [f64; 7],
        high: [f64; 7],
    ) -> Result<Self, ConfigError> {
        let [t_min, t_mid, t_max] = temperature_ranges.map(|t| t.get::<kelvin>());

        if StrictlyPositive::check(&t_min).is_err() {
            return Err(ConfigError::invalid("t_min", t_min));
        }
        if t_mid <= t_min {
            return Err(ConfigError::invalid("t_mid", t_mid));
        }
        if t_max <= t_mid {
            return Err(ConfigError::invalid("t_max", t_max));
        }
        if let Some(bad) = low.iter().chain(high.iter()).find(|a| !a.is_finite()) {
            return Err(ConfigError::invalid("coefficient", *bad));
        }

        Ok(Self {
            t_min,
            t_mid,
            t_max,
            low,
            high,
            p_ref: Pressure::new::<atmosphere>(1.0),
        })
    }

    /// Creates a fit from trusted coefficients, skipping validation.
    pub(crate) fn new_unchecked(
        temperature_ranges: [f64; 3],
        low: [f64; 7],
        high: [f64; 7],
    ) -> Self {
        let [t_min, t_mid, t_max] = temperature_ranges;
        Self {
            t_min,
            t_mid,
            t_max,
            low,
            high,
            p_ref: Pressure::new::<atmosphere>(1.0),
        }
    }

    /// Returns the fit with a different reference pressure.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if the pressure is not strictly positive.
    pub fn with_reference_pressure(mut self, pressure: Pressure) -> Result<Self, ConfigError> {
        let p = pressure.get::<pascal>();
        if FinitePositive::check(&p).is_err() {
            return Err(ConfigError::invalid("reference_pressure", p));
        }
        self.p_ref = pressure;
        Ok(self)
    }

    fn coefficients(&self, t: f64) -> &[f64; 7] {
        if t < self.t_min || t > self.t_max {
            debug!(
                "extrapolating NASA-7 fit to {t} K outside [{}, {}] K",
                self.t_min, self.t_max
            );
        }
        if t < self.t_mid { &self.low } else { &self.high }
    }
}

impl ReferenceThermo for Nasa7 {
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
                "NASA-7 fit evaluated at {t} K"
            )));
        }

        let [a1, a2, a3, a4, a5, a6, a7] = *self.coefficients(t);
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;

        let cp_r = a1 + a2 * t + a3 * t2 + a4 * t3 + a5 * t4;
        let h_rt = a1 + a2 * t / 2.0 + a3 * t2 / 3.0 + a4 * t3 / 4.0 + a5 * t4 / 5.0 + a6 / t;
        let s_r = a1 * t.ln() + a2 * t + a3 * t2 / 2.0 + a4 * t3 / 3.0 + a5 * t4 / 4.0 + a7;

        Ok(ReferenceProperties::new(cp_r, h_rt, s_r))
    }
}
