//! Supporting utilities used by models.
//!
//! The standard-state evaluator and everything it is built from live here:
//! unit extensions, numeric constraints, and the thermodynamic building blocks
//! in [`thermo`].

pub mod constraint;
pub mod thermo;
pub mod units;
