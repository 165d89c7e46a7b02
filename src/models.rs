//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Each model is a thin [`twine_core::Model`] adapter over an evaluator in
//! [`crate::support`]. The adapter owns whatever the evaluator needs and maps
//! a plain input type onto the evaluator's setters and queries.

pub mod thermo;
