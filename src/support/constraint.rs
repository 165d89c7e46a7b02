//! Numeric constraints checked when parameters and states are accepted.
//!
//! Equation-of-state parameters, molecular weights, temperatures, pressures,
//! and densities must all be strictly positive before they can define a
//! standard state. [`StrictlyPositive`] captures that invariant so that
//! validation reads the same everywhere it is applied.
//!
//! # Extending
//!
//! You can define custom numeric invariants by implementing [`Constraint<T>`]
//! for your own zero-sized marker types.

use std::cmp::Ordering;

use num_traits::Zero;
use thiserror::Error;

/// A trait for enforcing numeric invariants.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is not finite")]
    Infinite,
}

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// # Examples
///
/// ```
/// use twine_standard_state::support::constraint::{Constraint, StrictlyPositive};
///
/// assert!(StrictlyPositive::check(&298.15).is_ok());
/// assert!(StrictlyPositive::check(&0.0).is_err());
/// assert!(StrictlyPositive::check(&f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker type enforcing that an `f64` is finite and strictly positive.
///
/// Physical state variables pass through this check, since an infinite
/// temperature or pressure satisfies [`StrictlyPositive`] but cannot define a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FinitePositive;

impl Constraint<f64> for FinitePositive {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        if value.is_infinite() {
            return Err(ConstraintError::Infinite);
        }
        StrictlyPositive::check(value)
    }
}
