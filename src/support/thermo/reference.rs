//! Reference-state properties at a fixed reference pressure.
//!
//! A [`ReferenceThermo`] source supplies the dimensionless properties
//! `cp0/R`, `h0/RT`, `s0/R`, and `g0/RT` of one species as functions of
//! temperature at its reference pressure.
//!
//! [`ReferenceTables`] gathers the sources of every species in a phase and
//! holds the four per-species buffers evaluated at one temperature. The
//! tables are owned by the phase and lent to each
//! [`StandardState`](super::StandardState), which reads its own row by
//! species index and never writes to them except through
//! [`ReferenceTables::update`].

mod constant_cp;
mod nasa7;

pub use constant_cp::{ConstantCp, ConstantCpReference};
pub use nasa7::Nasa7;

use std::{fmt, sync::Arc};

use log::debug;
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

use super::PropertyError;

/// A source of reference-state properties for one species.
pub trait ReferenceThermo: fmt::Debug {
    /// Returns the pressure at which the reference properties are defined.
    fn reference_pressure(&self) -> Pressure;

    /// Returns the dimensionless reference properties at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the properties cannot be evaluated at `temperature`.
    fn evaluate(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<ReferenceProperties, PropertyError>;
}

/// Dimensionless reference-state properties at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceProperties {
    /// Heat capacity at constant pressure, `cp0/R`.
    pub cp_r: f64,
    /// Enthalpy, `h0/RT`.
    pub h_rt: f64,
    /// Entropy, `s0/R`.
    pub s_r: f64,
    /// Gibbs energy, `g0/RT`.
    pub g_rt: f64,
}

impl ReferenceProperties {
    /// Creates reference properties, deriving `g0/RT = h0/RT − s0/R`.
    #[must_use]
    pub fn new(cp_r: f64, h_rt: f64, s_r: f64) -> Self {
        Self {
            cp_r,
            h_rt,
            s_r,
            g_rt: h_rt - s_r,
        }
    }
}

/// Per-species reference-state buffers shared by the standard states of a phase.
///
/// The buffers are valid for the temperature reported by
/// [`temperature`](Self::temperature). Adding a species invalidates them until
/// the next [`update`](Self::update).
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    sources: Vec<Arc<dyn ReferenceThermo>>,
    temperature: Option<ThermodynamicTemperature>,
    cp0_r: Vec<f64>,
    h0_rt: Vec<f64>,
    s0_r: Vec<f64>,
    g0_rt: Vec<f64>,
}

impl ReferenceTables {
    /// Creates empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a species and returns its index.
    pub fn add_species(&mut self, source: impl ReferenceThermo + 'static) -> usize {
        self.add_shared(Arc::new(source))
    }

    /// Adds a species whose source is shared with other tables and returns its index.
    pub fn add_shared(&mut self, source: Arc<dyn ReferenceThermo>) -> usize {
        self.sources.push(source);
        self.temperature = None;
        self.cp0_r.push(f64::NAN);
        self.h0_rt.push(f64::NAN);
        self.s0_r.push(f64::NAN);
        self.g0_rt.push(f64::NAN);
        self.sources.len() - 1
    }

    /// Returns the number of species.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if the tables hold no species.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Returns the temperature the buffers were last evaluated at.
    #[must_use]
    pub fn temperature(&self) -> Option<ThermodynamicTemperature> {
        self.temperature
    }

    /// Returns the reference pressure of the species at `index`.
    #[must_use]
    pub fn reference_pressure(&self, index: usize) -> Option<Pressure> {
        self.sources.get(index).map(|source| source.reference_pressure())
    }

    /// Evaluates every species at `temperature`.
    ///
    /// Does nothing if the buffers already hold values for `temperature`.
    /// On failure the buffers are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first [`PropertyError`] raised by a species source.
    pub fn update(&mut self, temperature: ThermodynamicTemperature) -> Result<(), PropertyError> {
        if self.temperature == Some(temperature) {
            return Ok(());
        }

        let evaluated = self
            .sources
            .iter()
            .map(|source| source.evaluate(temperature))
            .collect::<Result<Vec<_>, _>>()?;

        for (k, props) in evaluated.into_iter().enumerate() {
            self.cp0_r[k] = props.cp_r;
            self.h0_rt[k] = props.h_rt;
            self.s0_r[k] = props.s_r;
            self.g0_rt[k] = props.g_rt;
        }
        self.temperature = Some(temperature);

        debug!(
            "reference tables refreshed for {} species at {} K",
            self.len(),
            temperature.get::<kelvin>()
        );
        Ok(())
    }

    /// Returns the `cp0/R` buffer.
    #[must_use]
    pub fn cp0_r(&self) -> &[f64] {
        &self.cp0_r
    }

    /// Returns the `h0/RT` buffer.
    #[must_use]
    pub fn h0_rt(&self) -> &[f64] {
        &self.h0_rt
    }

    /// Returns the `s0/R` buffer.
    #[must_use]
    pub fn s0_r(&self) -> &[f64] {
        &self.s0_r
    }

    /// Returns the `g0/RT` buffer.
    #[must_use]
    pub fn g0_rt(&self) -> &[f64] {
        &self.g0_rt
    }

    /// Returns the row for `index`, provided the buffers were evaluated at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::StaleReference`] if the buffers hold values for
    /// another temperature (or none), and [`PropertyError::InvalidState`] if
    /// `index` is not a species of these tables.
    pub fn properties(
        &self,
        index: usize,
        temperature: ThermodynamicTemperature,
    ) -> Result<ReferenceProperties, PropertyError> {
        if index >= self.len() {
            return Err(PropertyError::invalid_state(format!(
                "species index {index} not in reference tables of {} species",
                self.len()
            )));
        }

        match self.temperature {
            Some(t) if t == temperature => Ok(ReferenceProperties {
                cp_r: self.cp0_r[index],
                h_rt: self.h0_rt[index],
                s_r: self.s0_r[index],
                g_rt: self.g0_rt[index],
            }),
            Some(t) => Err(PropertyError::StaleReference {
                context: format!(
                    "tables at {} K, state at {} K",
                    t.get::<kelvin>(),
                    temperature.get::<kelvin>()
                ),
            }),
            None => Err(PropertyError::StaleReference {
                context: "tables have not been evaluated".into(),
            }),
        }
    }
}
