//! Vapor pressure of a van der Waals fluid.
//!
//! Below the critical temperature the isotherm has a liquid and a vapor branch
//! between the two spinodal pressures. The vapor pressure is the pressure in
//! that window where both branches have the same fugacity, found by bisection
//! on `ln φ_vapor − ln φ_liquid`.

use std::convert::Infallible;

use log::trace;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::{thermo::PropertyError, units::MOLAR_GAS_CONSTANT};

use super::{VanDerWaals, cubic};

/// Solver configuration for the vapor-pressure search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on pressure.
    pub pressure_abs_tol: Pressure,

    /// Relative tolerance on pressure.
    pub pressure_rel_tol: f64,

    /// Tolerance on the log-fugacity residual.
    pub residual_tol: f64,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            pressure_abs_tol: Pressure::new::<pascal>(1e-9),
            pressure_rel_tol: 1e-13,
            residual_tol: 1e-14,
        }
    }
}

impl SaturationConfig {
    /// Converts this configuration into a bisection solver configuration.
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.pressure_abs_tol.get::<pascal>(),
            x_rel_tol: self.pressure_rel_tol,
            residual_tol: self.residual_tol,
        }
    }
}

/// Log fugacity coefficients of the branches present at one pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Branches {
    Both { liquid: f64, vapor: f64 },
    LiquidOnly,
    VaporOnly,
}

/// Result of evaluating the isotherm at one pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Coexistence {
    pub(super) pressure: Pressure,
    pub(super) branches: Branches,
}

impl Coexistence {
    /// Returns `ln φ_vapor − ln φ_liquid`.
    ///
    /// A lone vapor root means the pressure is below the vapor pressure and a
    /// lone liquid root means it is above, so each maps to a unit residual of
    /// the matching sign.
    fn residual(&self) -> f64 {
        match self.branches {
            Branches::Both { liquid, vapor } => vapor - liquid,
            Branches::VaporOnly => -1.0,
            Branches::LiquidOnly => 1.0,
        }
    }
}

/// Evaluates the liquid and vapor branches of one isotherm.
pub(super) struct CoexistenceModel<'a> {
    eos: &'a VanDerWaals,
    temperature: f64,
}

impl Model for CoexistenceModel<'_> {
    type Input = Pressure;
    type Output = Coexistence;
    type Error = PropertyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let p = input.get::<pascal>();
        let (a, b) = self.eos.reduced(self.temperature, p);
        let roots = self.eos.compressibility_roots(a, b);

        let branches = match (roots.first(), roots.last()) {
            (Some(&liquid), Some(&vapor)) if roots.len() > 1 => Branches::Both {
                liquid: VanDerWaals::ln_phi(liquid, a, b),
                vapor: VanDerWaals::ln_phi(vapor, a, b),
            },
            (Some(&z), _) => {
                let v = z * MOLAR_GAS_CONSTANT * self.temperature / p;
                if v > 3.0 * self.eos.b {
                    Branches::VaporOnly
                } else {
                    Branches::LiquidOnly
                }
            }
            _ => {
                return Err(PropertyError::calculation(format!(
                    "no real volume at {} K and {p} Pa",
                    self.temperature
                )));
            }
        };

        trace!("saturation search at {p} Pa: {branches:?}");
        Ok(Coexistence {
            pressure: *input,
            branches,
        })
    }
}

/// Drives the fugacity difference between branches to zero.
pub(super) struct SaturationProblem;

impl EquationProblem<1> for SaturationProblem {
    type Input = Pressure;
    type Output = Coexistence;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Pressure::new::<pascal>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.residual()])
    }
}

/// Returns the spinodal pressures `(liquid, vapor)` of an isotherm.
///
/// These are the local minimum and maximum of `P(v)` for `v > b`.
fn spinodal_pressures(eos: &VanDerWaals, t: f64) -> Result<(f64, f64), PropertyError> {
    let rt = MOLAR_GAS_CONSTANT * t;
    let (a, b) = (eos.a, eos.b);

    let pressures: Vec<f64> =
        cubic::real_roots(-2.0 * a / rt, 4.0 * a * b / rt, -2.0 * a * b * b / rt)
            .into_iter()
            .filter(|&v| v > b)
            .map(|v| rt / (v - b) - a / (v * v))
            .collect();

    match pressures.as_slice() {
        [first, second] => Ok((first.min(*second), first.max(*second))),
        _ => Err(PropertyError::calculation(format!(
            "isotherm at {t} K has no spinodal pair"
        ))),
    }
}

/// Finds the vapor pressure at `temperature`.
pub(super) fn saturation_pressure(
    eos: &VanDerWaals,
    temperature: ThermodynamicTemperature,
) -> Result<Pressure, PropertyError> {
    let t = temperature.get::<kelvin>();
    if !(t > 0.0 && t < eos.tc) {
        return Err(PropertyError::out_of_domain(format!(
            "saturation requires 0 < T < Tc = {} K, got {t} K",
            eos.tc
        )));
    }

    let (p_liquid, p_vapor) = spinodal_pressures(eos, t)?;
    let span = p_vapor - p_liquid.max(0.0);
    let lo = if p_liquid > 0.0 {
        p_liquid + 1e-9 * span
    } else {
        1e-10 * p_vapor
    };
    let hi = p_vapor - 1e-9 * span;

    let model = CoexistenceModel {
        eos,
        temperature: t,
    };

    let solution = bisection::solve(
        &model,
        &SaturationProblem,
        [lo, hi],
        &eos.saturation.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // A pressure with no real volume lies past a spinodal, where the
            // liquid branch dominates.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )
    .map_err(|err| PropertyError::calculation(format!("saturation bisection failed: {err}")))?;

    if solution.status != bisection::Status::Converged {
        return Err(PropertyError::calculation(format!(
            "saturation pressure at {t} K not converged after {} iterations, residual {}",
            solution.iters, solution.residual
        )));
    }

    Ok(solution.snapshot.output.pressure)
}
