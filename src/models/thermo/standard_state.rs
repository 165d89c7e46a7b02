//! A [`Model`] adapter over the standard-state evaluator.
//!
//! [`StandardStateModel`] holds a configured [`StandardState`] together with
//! the reference tables of its phase. Each call evaluates the species at the
//! requested temperature and pressure and returns every property.

use twine_core::Model;
use uom::si::f64::{Pressure, ThermodynamicTemperature};

use crate::support::thermo::{
    ConfigError, PropertyError, ReferenceTables, StandardState, StandardStateProperties,
    eos::{EosModel, EquationOfState},
};

/// Temperature and pressure at which to evaluate a species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
}

/// Evaluates standard-state properties of one species at given conditions.
///
/// The evaluator and tables held here are templates: each call works on its
/// own copy, so the model stays immutable and calls do not affect each other.
#[derive(Debug, Clone)]
pub struct StandardStateModel<E = EosModel> {
    evaluator: StandardState<E>,
    reference: ReferenceTables,
}

impl<E: EquationOfState + Clone> StandardStateModel<E> {
    /// Creates a model from an evaluator and the tables it reads.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SpeciesIndex`] if the tables have no row for the
    /// evaluator's species.
    pub fn new(
        evaluator: StandardState<E>,
        reference: ReferenceTables,
    ) -> Result<Self, ConfigError> {
        evaluator.initialize(&reference)?;
        Ok(Self {
            evaluator,
            reference,
        })
    }

    /// Returns the evaluator template.
    pub fn evaluator(&self) -> &StandardState<E> {
        &self.evaluator
    }
}

impl<E: EquationOfState + Clone> Model for StandardStateModel<E> {
    type Input = Conditions;
    type Output = StandardStateProperties;
    type Error = PropertyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut evaluator = self.evaluator.clone();
        let mut reference = self.reference.clone();
        evaluator.set_state_tp(input.temperature, input.pressure, &mut reference)?;
        evaluator.properties(&reference)
    }
}
