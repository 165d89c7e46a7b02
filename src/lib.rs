//! # Twine Standard State
//!
//! Pressure-dependent standard-state properties of single species for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! A standard state combines a species' reference-state properties at `P₀`
//! with a pressure correction from an equation of state. The correction is
//! selected per species: pressure independent, ideal gas, constant molar
//! volume, or van der Waals.
//!
//! ## Crate layout
//!
//! - [`models`]: [`twine_core::Model`] adapters over the evaluator.
//! - [`support`]: The evaluator, its equations of state, reference-state fits,
//!   phase documents, and the unit and constraint utilities they build on.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
