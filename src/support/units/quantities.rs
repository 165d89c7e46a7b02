use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P1, P2, P3, Z0},
};

/// Molar enthalpy, J/mol in SI.
pub type MolarEnthalpy = Quantity<ISQ<P2, P1, N2, Z0, Z0, N1, Z0>, SI<f64>, f64>;

/// Molar internal energy, J/mol in SI.
pub type MolarInternalEnergy = Quantity<ISQ<P2, P1, N2, Z0, Z0, N1, Z0>, SI<f64>, f64>;

/// Molar Gibbs energy (chemical potential of a pure species), J/mol in SI.
pub type MolarGibbsEnergy = Quantity<ISQ<P2, P1, N2, Z0, Z0, N1, Z0>, SI<f64>, f64>;

/// Molar entropy, J/(mol·K) in SI.
pub type MolarEntropy = Quantity<ISQ<P2, P1, N2, Z0, N1, N1, Z0>, SI<f64>, f64>;

/// Molar volume, m³/mol in SI.
pub type MolarVolume = Quantity<ISQ<P3, Z0, Z0, Z0, Z0, N1, Z0>, SI<f64>, f64>;
