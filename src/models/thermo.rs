//! Thermodynamic property models.

pub mod standard_state;
