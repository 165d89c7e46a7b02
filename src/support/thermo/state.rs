use uom::si::f64::{MassDensity, Pressure, ThermodynamicTemperature};

/// A complete thermodynamic state of a single species.
///
/// Temperature and density are the variables a
/// [`StandardState`](super::StandardState) owns. Pressure is carried alongside
/// them: it is derived from density for density-explicit equations of state
/// and is an independent variable for constant-volume ones.
///
/// # Example
///
/// ```
/// use twine_standard_state::support::thermo::State;
/// use uom::si::{
///     f64::{MassDensity, Pressure, ThermodynamicTemperature},
///     mass_density::kilogram_per_cubic_meter,
///     pressure::atmosphere,
///     thermodynamic_temperature::kelvin,
/// };
///
/// let state = State::new(
///     ThermodynamicTemperature::new::<kelvin>(300.0),
///     MassDensity::new::<kilogram_per_cubic_meter>(1.14),
///     Pressure::new::<atmosphere>(1.0),
/// );
/// assert_eq!(state.temperature.get::<kelvin>(), 300.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub temperature: ThermodynamicTemperature,
    pub density: MassDensity,
    pub pressure: Pressure,
}

impl State {
    /// Creates a new state with the given temperature, density, and pressure.
    #[must_use]
    pub fn new(
        temperature: ThermodynamicTemperature,
        density: MassDensity,
        pressure: Pressure,
    ) -> Self {
        Self {
            temperature,
            density,
            pressure,
        }
    }
}
