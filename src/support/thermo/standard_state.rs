//! The standard-state evaluator for one species.
//!
//! A [`StandardState`] is the single owner of its species' temperature,
//! density, and pressure. Properties combine the species' row of a shared
//! [`ReferenceTables`] with the pressure correction of an
//! [`EquationOfState`]:
//!
//! - `h = h0 + Δh`, `s = s0 + Δs`, `g = g0 + Δg`, `cp = cp0 + Δcp`
//! - `u = h − P·v`, with `v = M/ρ`
//! - `cv = cp − (cp − cv)`, using the variant's heat capacity gap
//!
//! # Lifecycle
//!
//! A new evaluator is [`Lifecycle::Bound`]: it knows its species index and
//! molecular weight but has no state. Any sequence of setters that fixes
//! temperature, density, and pressure moves it to [`Lifecycle::Ready`], where
//! it stays. Property queries in the bound state fail with
//! [`PropertyError::NotReady`].
//!
//! # Reference refresh
//!
//! [`set_temperature`](StandardState::set_temperature) and
//! [`set_state_tp`](StandardState::set_state_tp) refresh the reference tables
//! before returning. Every query that reads the tables checks that they hold
//! values for the evaluator's temperature and fails with
//! [`PropertyError::StaleReference`] otherwise, so a table refreshed at another
//! temperature by a sibling species is never read silently.

use std::{path::Path, rc::Rc};

use log::{debug, info};
use uom::si::{
    f64::{MassDensity, MolarHeatCapacity, MolarMass, Pressure, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    molar_energy::joule_per_mole,
    molar_heat_capacity::joule_per_kelvin_mole,
    molar_mass::kilogram_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constraint, FinitePositive},
    units::{
        MOLAR_GAS_CONSTANT, MolarEnthalpy, MolarEntropy, MolarGibbsEnergy, MolarInternalEnergy,
        MolarVolume,
    },
};

use super::{
    ConfigError, OwnerPhase, OwnerRef, PropertyError, ReferenceProperties, ReferenceTables, State,
    document::{PhaseDocument, StandardStateEntry},
    eos::{EosKind, EosModel, EosParameters, EquationOfState},
};

/// Configuration progress of a [`StandardState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Species index and molecular weight are set, but the state is incomplete.
    Bound,
    /// Temperature, density, and pressure are set and properties may be queried.
    Ready,
}

/// Every molar standard-state property at one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardStateProperties {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub density: MassDensity,
    pub molar_volume: MolarVolume,
    pub enthalpy: MolarEnthalpy,
    pub entropy: MolarEntropy,
    pub gibbs: MolarGibbsEnergy,
    pub internal_energy: MolarInternalEnergy,
    pub cp: MolarHeatCapacity,
    pub cv: MolarHeatCapacity,
}

/// Pressure-dependent standard-state properties of one species.
///
/// The equation of state defaults to the runtime-selected [`EosModel`];
/// any concrete variant may be used directly instead.
#[derive(Debug, Clone)]
pub struct StandardState<E = EosModel> {
    eos: E,
    species_index: usize,
    molecular_weight: MolarMass,
    owner: OwnerRef,
    temperature: Option<ThermodynamicTemperature>,
    density: Option<MassDensity>,
    pressure: Option<Pressure>,
}

/// Relative tolerance between a set molar volume and the stable volume at its pressure.
const STABLE_VOLUME_TOLERANCE: f64 = 1e-8;

fn check_molecular_weight(molecular_weight: MolarMass) -> Result<(), ConfigError> {
    let mw = molecular_weight.get::<kilogram_per_mole>();
    if FinitePositive::check(&mw).is_err() {
        return Err(ConfigError::invalid("molecular_weight", mw));
    }
    Ok(())
}

impl<E: EquationOfState> StandardState<E> {
    /// Creates a standalone evaluator with no owning phase.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if the molecular weight is not strictly positive.
    pub fn new(
        eos: E,
        species_index: usize,
        molecular_weight: MolarMass,
    ) -> Result<Self, ConfigError> {
        check_molecular_weight(molecular_weight)?;
        Ok(Self {
            eos,
            species_index,
            molecular_weight,
            owner: OwnerRef::none(),
            temperature: None,
            density: None,
            pressure: None,
        })
    }

    /// Creates an evaluator for species `species_index` of `owner`, taking the
    /// molecular weight from the owner.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SpeciesIndex`] if the owner has no such species,
    /// and [`ConfigError::MissingParameter`] if it does not know its molecular weight.
    pub fn from_owner<P: OwnerPhase + 'static>(
        owner: &Rc<P>,
        species_index: usize,
        eos: E,
    ) -> Result<Self, ConfigError> {
        check_species_index(&**owner, species_index)?;
        let molecular_weight = owner
            .molecular_weight(species_index)
            .ok_or_else(|| ConfigError::missing("molecular_weight"))?;

        let mut state = Self::new(eos, species_index, molecular_weight)?;
        state.owner = OwnerRef::new(owner);
        Ok(state)
    }

    /// Checks that the evaluator can read its row of `reference`.
    ///
    /// Call once after the phase has built its tables and before the first state is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SpeciesIndex`] if the tables, or the live owner,
    /// have no species at this evaluator's index.
    pub fn initialize(&self, reference: &ReferenceTables) -> Result<(), ConfigError> {
        if self.species_index >= reference.len() {
            return Err(ConfigError::SpeciesIndex {
                index: self.species_index,
                count: reference.len(),
            });
        }
        if let Some(owner) = self.owner.get() {
            check_species_index(&*owner, self.species_index)?;
        }
        debug!(
            "{} standard state for {} bound to reference tables of {} species",
            self.eos.kind(),
            self.species_label(),
            reference.len()
        );
        Ok(())
    }

    /// Applies equation-of-state parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a parameter is invalid, or if a state has
    /// already been set.
    pub fn apply_parameters(&mut self, parameters: &EosParameters) -> Result<(), ConfigError> {
        self.require_unset("apply parameters")?;
        self.eos.apply_parameters(parameters, self.molecular_weight)
    }

    /// Returns the equation-of-state variant.
    pub fn kind(&self) -> EosKind {
        self.eos.kind()
    }

    /// Returns the equation of state.
    pub fn eos(&self) -> &E {
        &self.eos
    }

    /// Returns the configuration progress.
    pub fn status(&self) -> Lifecycle {
        match (self.temperature, self.density, self.pressure) {
            (Some(_), Some(_), Some(_)) => Lifecycle::Ready,
            _ => Lifecycle::Bound,
        }
    }

    /// Returns the current state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotReady`] if any state variable is unset.
    pub fn state(&self) -> Result<State, PropertyError> {
        match (self.temperature, self.density, self.pressure) {
            (Some(t), Some(rho), Some(p)) => Ok(State::new(t, rho, p)),
            (t, rho, p) => Err(PropertyError::not_ready(format!(
                "{}: temperature {}, density {}, pressure {}",
                self.species_label(),
                set_or_unset(t.is_some()),
                set_or_unset(rho.is_some()),
                set_or_unset(p.is_some()),
            ))),
        }
    }

    /// Returns the current temperature.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotReady`] if it has not been set.
    pub fn temperature(&self) -> Result<ThermodynamicTemperature, PropertyError> {
        self.temperature
            .ok_or_else(|| PropertyError::not_ready("temperature has not been set"))
    }

    /// Returns the current density.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotReady`] if it has not been set.
    pub fn density(&self) -> Result<MassDensity, PropertyError> {
        self.density
            .ok_or_else(|| PropertyError::not_ready("density has not been set"))
    }

    /// Returns the current pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotReady`] if it has not been set or derived.
    pub fn pressure(&self) -> Result<Pressure, PropertyError> {
        self.pressure
            .ok_or_else(|| PropertyError::not_ready("pressure has not been set"))
    }

    /// Returns the molar volume `M/ρ`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotReady`] if the density has not been set.
    pub fn molar_volume(&self) -> Result<MolarVolume, PropertyError> {
        Ok(self.molecular_weight / self.density()?)
    }

    /// Returns the species index within the owning phase.
    pub fn species_index(&self) -> usize {
        self.species_index
    }

    /// Returns the reference to the owning phase.
    pub fn owner(&self) -> &OwnerRef {
        &self.owner
    }

    /// Returns the species name known to the owner, or a name built from the
    /// species index when there is no live owner.
    pub fn species_label(&self) -> String {
        self.owner
            .get()
            .and_then(|owner| owner.species_name(self.species_index).map(str::to_owned))
            .unwrap_or_else(|| format!("species {}", self.species_index))
    }

    /// Returns the molecular weight.
    pub fn molecular_weight(&self) -> MolarMass {
        self.molecular_weight
    }

    /// Replaces the molecular weight.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the value is not strictly positive, or if a
    /// state has already been set.
    pub fn set_molecular_weight(&mut self, molecular_weight: MolarMass) -> Result<(), ConfigError> {
        self.require_unset("change molecular weight")?;
        check_molecular_weight(molecular_weight)?;
        self.molecular_weight = molecular_weight;
        Ok(())
    }

    /// Sets temperature and pressure, resolving density through the equation of state.
    ///
    /// The reference tables are refreshed at `temperature`. On failure the
    /// evaluator keeps its previous state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the state is outside the model's domain or
    /// the reference tables cannot be evaluated at `temperature`.
    pub fn set_state_tp(
        &mut self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        reference: &mut ReferenceTables,
    ) -> Result<(), PropertyError> {
        check_temperature(temperature)?;
        check_pressure(pressure)?;

        let v = self.eos.molar_volume(temperature, pressure)?;
        reference.update(temperature)?;

        self.temperature = Some(temperature);
        self.pressure = Some(pressure);
        self.density = Some(self.molecular_weight / v);

        debug!(
            "{} state set to {} K, {} Pa",
            self.species_label(),
            temperature.get::<kelvin>(),
            pressure.get::<pascal>()
        );
        Ok(())
    }

    /// Sets the temperature at constant density and refreshes the reference tables.
    ///
    /// Pressure is re-derived from density when the equation of state allows
    /// it. Otherwise the current pressure is kept.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if the held density is not the
    /// stable phase at the derived pressure, or another [`PropertyError`] if the
    /// new state is outside the model's domain. On failure the evaluator keeps
    /// its previous state.
    pub fn set_temperature(
        &mut self,
        temperature: ThermodynamicTemperature,
        reference: &mut ReferenceTables,
    ) -> Result<(), PropertyError> {
        check_temperature(temperature)?;

        let pressure = match self.density {
            Some(rho) => self.derived_pressure(temperature, rho)?,
            None => self.pressure,
        };
        reference.update(temperature)?;

        self.temperature = Some(temperature);
        self.pressure = pressure;

        debug!(
            "{} temperature set to {} K",
            self.species_label(),
            temperature.get::<kelvin>()
        );
        Ok(())
    }

    /// Sets the density at constant temperature.
    ///
    /// Pressure is re-derived when the temperature is known and the equation
    /// of state allows it.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if the variant fixes a different
    /// molar volume or the density is not the stable phase at the derived
    /// pressure, or another [`PropertyError`] if the state is outside the
    /// model's domain.
    pub fn set_density(&mut self, density: MassDensity) -> Result<(), PropertyError> {
        let rho = density.get::<kilogram_per_cubic_meter>();
        if FinitePositive::check(&rho).is_err() {
            return Err(PropertyError::out_of_domain(format!("density {rho} kg/m3")));
        }

        if let Some(v0) = self.eos.fixed_molar_volume() {
            let fixed = (self.molecular_weight / v0).get::<kilogram_per_cubic_meter>();
            if (rho - fixed).abs() > 1e-12 * fixed {
                return Err(PropertyError::invalid_state(format!(
                    "{} model fixes density at {fixed} kg/m3, got {rho} kg/m3",
                    self.eos.kind()
                )));
            }
        }

        let pressure = match self.temperature {
            Some(t) => self.derived_pressure(t, density)?,
            None => self.pressure,
        };

        self.density = Some(density);
        self.pressure = pressure;
        debug!("{} density set to {rho} kg/m3", self.species_label());
        Ok(())
    }

    /// Sets the pressure at constant temperature, resolving density through
    /// the equation of state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotReady`] if the temperature has not been set,
    /// or another [`PropertyError`] if the state is outside the model's domain.
    pub fn set_pressure(&mut self, pressure: Pressure) -> Result<(), PropertyError> {
        let t = self.temperature()?;
        check_pressure(pressure)?;

        let v = self.eos.molar_volume(t, pressure)?;
        self.pressure = Some(pressure);
        self.density = Some(self.molecular_weight / v);

        debug!(
            "{} pressure set to {} Pa",
            self.species_label(),
            pressure.get::<pascal>()
        );
        Ok(())
    }

    /// Returns the reference pressure of this species.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if the tables have no row for this species.
    pub fn reference_pressure(
        &self,
        reference: &ReferenceTables,
    ) -> Result<Pressure, PropertyError> {
        reference.reference_pressure(self.species_index).ok_or_else(|| {
            PropertyError::invalid_state(format!(
                "species index {} not in reference tables of {} species",
                self.species_index,
                reference.len()
            ))
        })
    }

    /// Returns the molar enthalpy.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the evaluator is not ready, the tables are
    /// stale, or the pressure correction fails.
    pub fn enthalpy(&self, reference: &ReferenceTables) -> Result<MolarEnthalpy, PropertyError> {
        let (t, row) = self.reference_row(reference)?;
        Ok(molar_energy(row.h_rt * rt(t)) + self.enthalpy_delta(reference)?)
    }

    /// Returns the molar entropy.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] under the same conditions as [`enthalpy`](Self::enthalpy).
    pub fn entropy(&self, reference: &ReferenceTables) -> Result<MolarEntropy, PropertyError> {
        let (_, row) = self.reference_row(reference)?;
        Ok(molar_entropy(row.s_r * MOLAR_GAS_CONSTANT) + self.entropy_delta(reference)?)
    }

    /// Returns the molar Gibbs energy.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] under the same conditions as [`enthalpy`](Self::enthalpy).
    pub fn gibbs(&self, reference: &ReferenceTables) -> Result<MolarGibbsEnergy, PropertyError> {
        let (t, row) = self.reference_row(reference)?;
        Ok(molar_energy(row.g_rt * rt(t)) + self.gibbs_delta(reference)?)
    }

    /// Returns the molar internal energy `h − P·v`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] under the same conditions as [`enthalpy`](Self::enthalpy).
    pub fn internal_energy(
        &self,
        reference: &ReferenceTables,
    ) -> Result<MolarInternalEnergy, PropertyError> {
        let h = self.enthalpy(reference)?;
        Ok(h - self.pressure()? * self.molar_volume()?)
    }

    /// Returns the molar heat capacity at constant pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] under the same conditions as [`enthalpy`](Self::enthalpy).
    pub fn cp(&self, reference: &ReferenceTables) -> Result<MolarHeatCapacity, PropertyError> {
        let (_, row) = self.reference_row(reference)?;
        Ok(molar_heat_capacity(row.cp_r * MOLAR_GAS_CONSTANT) + self.cp_delta(reference)?)
    }

    /// Returns the molar heat capacity at constant volume.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] under the same conditions as [`enthalpy`](Self::enthalpy).
    pub fn cv(&self, reference: &ReferenceTables) -> Result<MolarHeatCapacity, PropertyError> {
        let (t, p, _) = self.ready()?;
        Ok(self.cp(reference)? - self.eos.heat_capacity_gap(t, p)?)
    }

    /// Returns `h(T, P) − h(T, P₀)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the evaluator is not ready or the correction fails.
    pub fn enthalpy_delta(
        &self,
        reference: &ReferenceTables,
    ) -> Result<MolarEnthalpy, PropertyError> {
        let (t, p, p0) = self.delta_state(reference)?;
        self.eos.enthalpy_delta(t, p, p0)
    }

    /// Returns `u(T, P) − u(T, P₀)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the evaluator is not ready or the correction fails.
    pub fn internal_energy_delta(
        &self,
        reference: &ReferenceTables,
    ) -> Result<MolarInternalEnergy, PropertyError> {
        let (t, p, p0) = self.delta_state(reference)?;
        let dh = self.eos.enthalpy_delta(t, p, p0)?;
        let pv = p * self.eos.molar_volume(t, p)?;
        let pv0 = p0 * self.eos.molar_volume(t, p0)?;
        Ok(dh - (pv - pv0))
    }

    /// Returns `s(T, P) − s(T, P₀)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the evaluator is not ready or the correction fails.
    pub fn entropy_delta(
        &self,
        reference: &ReferenceTables,
    ) -> Result<MolarEntropy, PropertyError> {
        let (t, p, p0) = self.delta_state(reference)?;
        self.eos.entropy_delta(t, p, p0)
    }

    /// Returns `g(T, P) − g(T, P₀)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the evaluator is not ready or the correction fails.
    pub fn gibbs_delta(
        &self,
        reference: &ReferenceTables,
    ) -> Result<MolarGibbsEnergy, PropertyError> {
        let (t, p, p0) = self.delta_state(reference)?;
        self.eos.gibbs_delta(t, p, p0)
    }

    /// Returns `cp(T, P) − cp(T, P₀)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the evaluator is not ready or the correction fails.
    pub fn cp_delta(
        &self,
        reference: &ReferenceTables,
    ) -> Result<MolarHeatCapacity, PropertyError> {
        let (t, p, p0) = self.delta_state(reference)?;
        self.eos.cp_delta(t, p, p0)
    }

    /// Returns `cv(T, P) − cv(T, P₀)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the evaluator is not ready or the correction fails.
    pub fn cv_delta(
        &self,
        reference: &ReferenceTables,
    ) -> Result<MolarHeatCapacity, PropertyError> {
        let (t, p, p0) = self.delta_state(reference)?;
        let dcp = self.eos.cp_delta(t, p, p0)?;
        let gap = self.eos.heat_capacity_gap(t, p)?;
        let gap0 = self.eos.heat_capacity_gap(t, p0)?;
        Ok(dcp - (gap - gap0))
    }

    /// Writes the chemical potential into the first slot of `mu`.
    ///
    /// For a single species in its standard state it equals the molar Gibbs energy.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if `mu` is empty, or the error
    /// raised by [`gibbs`](Self::gibbs).
    pub fn chemical_potentials(
        &self,
        reference: &ReferenceTables,
        mu: &mut [MolarGibbsEnergy],
    ) -> Result<(), PropertyError> {
        let Some(slot) = mu.first_mut() else {
            return Err(PropertyError::invalid_state(
                "chemical potential output has no slots",
            ));
        };
        *slot = self.gibbs(reference)?;
        Ok(())
    }

    /// Returns the critical temperature.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] if the variant has no critical point.
    pub fn critical_temperature(&self) -> Result<ThermodynamicTemperature, PropertyError> {
        self.eos.critical_temperature()
    }

    /// Returns the critical pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] if the variant has no critical point.
    pub fn critical_pressure(&self) -> Result<Pressure, PropertyError> {
        self.eos.critical_pressure()
    }

    /// Returns the critical density.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] if the variant has no critical point.
    pub fn critical_density(&self) -> Result<MassDensity, PropertyError> {
        Ok(self.molecular_weight / self.eos.critical_molar_volume()?)
    }

    /// Returns the vapor pressure at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] if the variant has no saturation
    /// curve, or another [`PropertyError`] if it cannot be found.
    pub fn saturation_pressure(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Pressure, PropertyError> {
        self.eos.saturation_pressure(temperature)
    }

    /// Returns every property at the current state.
    ///
    /// # Errors
    ///
    /// Returns the first [`PropertyError`] raised by an individual property.
    pub fn properties(
        &self,
        reference: &ReferenceTables,
    ) -> Result<StandardStateProperties, PropertyError> {
        let state = self.state()?;
        let enthalpy = self.enthalpy(reference)?;
        let molar_volume = self.molar_volume()?;
        let cp = self.cp(reference)?;

        Ok(StandardStateProperties {
            temperature: state.temperature,
            pressure: state.pressure,
            density: state.density,
            molar_volume,
            enthalpy,
            entropy: self.entropy(reference)?,
            gibbs: self.gibbs(reference)?,
            internal_energy: enthalpy - state.pressure * molar_volume,
            cp,
            cv: cp - self.eos.heat_capacity_gap(state.temperature, state.pressure)?,
        })
    }

    fn ready(&self) -> Result<(ThermodynamicTemperature, Pressure, MassDensity), PropertyError> {
        let state = self.state()?;
        Ok((state.temperature, state.pressure, state.density))
    }

    fn delta_state(
        &self,
        reference: &ReferenceTables,
    ) -> Result<(ThermodynamicTemperature, Pressure, Pressure), PropertyError> {
        let (t, p, _) = self.ready()?;
        Ok((t, p, self.reference_pressure(reference)?))
    }

    fn reference_row(
        &self,
        reference: &ReferenceTables,
    ) -> Result<(ThermodynamicTemperature, ReferenceProperties), PropertyError> {
        let (t, _, _) = self.ready()?;
        Ok((t, reference.properties(self.species_index, t)?))
    }

    fn derived_pressure(
        &self,
        temperature: ThermodynamicTemperature,
        density: MassDensity,
    ) -> Result<Option<Pressure>, PropertyError> {
        let v = self.molecular_weight / density;
        let p = match self.eos.pressure(temperature, v) {
            Ok(p) => p,
            Err(PropertyError::Unsupported { .. }) => return Ok(self.pressure),
            Err(err) => return Err(err),
        };

        // Pressure corrections are evaluated on the stable branch at (T, P),
        // so a density on any other branch has no consistent properties.
        let stable = self.eos.molar_volume(temperature, p)?;
        if (stable.value - v.value).abs() > STABLE_VOLUME_TOLERANCE * v.value {
            return Err(PropertyError::invalid_state(format!(
                "density {} kg/m3 at {} K is not the stable phase at {} Pa",
                density.get::<kilogram_per_cubic_meter>(),
                temperature.get::<kelvin>(),
                p.get::<pascal>()
            )));
        }
        Ok(Some(p))
    }

    fn require_unset(&self, action: &str) -> Result<(), ConfigError> {
        if self.temperature.is_some() || self.density.is_some() || self.pressure.is_some() {
            return Err(PropertyError::invalid_state(format!(
                "cannot {action} for {} after its state has been set",
                self.species_label()
            ))
            .into());
        }
        Ok(())
    }
}

impl StandardState<EosModel> {
    /// Creates an evaluator for species `species_index` of `owner` from the
    /// document entry named `id`.
    ///
    /// The molecular weight comes from the entry, or from the owner if the
    /// entry has none.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the species is unknown, the index is out of
    /// range, or the model parameters are missing or invalid.
    pub fn from_document<P: OwnerPhase + 'static>(
        owner: &Rc<P>,
        species_index: usize,
        document: &PhaseDocument,
        id: &str,
    ) -> Result<Self, ConfigError> {
        check_species_index(&**owner, species_index)?;
        let (_, entry) = document.species(id)?;
        let molecular_weight = entry
            .molecular_weight()
            .or_else(|| owner.molecular_weight(species_index))
            .ok_or_else(|| ConfigError::missing("molecular_weight"))?;

        let mut state = Self::new(EosModel::default(), species_index, molecular_weight)?;
        state.owner = OwnerRef::new(owner);
        state.initialize_from_document(&entry.standard_state)?;

        info!(
            "{} standard state for `{id}` created from phase `{}`",
            state.kind(),
            document.name
        );
        Ok(state)
    }

    /// Creates an evaluator from the species named `id` in the JSON document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or under
    /// the conditions of [`from_document`](Self::from_document).
    pub fn from_file<P: OwnerPhase + 'static>(
        owner: &Rc<P>,
        species_index: usize,
        path: impl AsRef<Path>,
        id: &str,
    ) -> Result<Self, ConfigError> {
        let document = PhaseDocument::from_path(path)?;
        Self::from_document(owner, species_index, &document, id)
    }

    /// Replaces the equation of state with the model and parameters of a document entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the parameters are missing or invalid, or if a
    /// state has already been set. On failure the evaluator is unchanged.
    pub fn initialize_from_document(
        &mut self,
        entry: &StandardStateEntry,
    ) -> Result<(), ConfigError> {
        self.require_unset("reconfigure")?;
        self.eos =
            EosModel::from_parameters(entry.model, &entry.parameters, self.molecular_weight)?;
        Ok(())
    }
}

fn check_species_index(owner: &dyn OwnerPhase, index: usize) -> Result<(), ConfigError> {
    let count = owner.species_count();
    if index >= count {
        return Err(ConfigError::SpeciesIndex { index, count });
    }
    Ok(())
}

fn check_temperature(temperature: ThermodynamicTemperature) -> Result<(), PropertyError> {
    let t = temperature.get::<kelvin>();
    if FinitePositive::check(&t).is_err() {
        return Err(PropertyError::out_of_domain(format!("temperature {t} K")));
    }
    Ok(())
}

fn check_pressure(pressure: Pressure) -> Result<(), PropertyError> {
    let p = pressure.get::<pascal>();
    if FinitePositive::check(&p).is_err() {
        return Err(PropertyError::out_of_domain(format!("pressure {p} Pa")));
    }
    Ok(())
}

fn set_or_unset(is_set: bool) -> &'static str {
    if is_set { "set" } else { "unset" }
}

fn rt(temperature: ThermodynamicTemperature) -> f64 {
    MOLAR_GAS_CONSTANT * temperature.get::<kelvin>()
}

fn molar_energy(value: f64) -> MolarEnthalpy {
    MolarEnthalpy::new::<joule_per_mole>(value)
}

fn molar_entropy(value: f64) -> MolarEntropy {
    MolarEntropy::new::<joule_per_kelvin_mole>(value)
}

fn molar_heat_capacity(value: f64) -> MolarHeatCapacity {
    MolarHeatCapacity::new::<joule_per_kelvin_mole>(value)
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use approx::assert_relative_eq;
    use uom::{
        ConstZero,
        si::{molar_mass::gram_per_mole, pressure::atmosphere},
    };

    use crate::support::thermo::{
        document::test_support::MIXED_PHASE,
        eos::{ConstantVolume, IdealGas, PressureIndependent, VanDerWaals},
        reference::{ConstantCp, ConstantCpReference},
        species::{CarbonDioxide, Nitrogen, SpeciesData, Water},
    };

    use test_support::TestPhase;

    fn temp(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(t)
    }

    fn atm(p: f64) -> Pressure {
        Pressure::new::<atmosphere>(p)
    }

    fn j_mol(h: MolarEnthalpy) -> f64 {
        h.get::<joule_per_mole>()
    }

    /// Nitrogen-like species with `h0 = 0` at 298.15 K.
    fn flat_nitrogen() -> ReferenceTables {
        let mut reference = ReferenceTables::new();
        reference.add_species(
            ConstantCp::new(
                MolarHeatCapacity::new::<joule_per_kelvin_mole>(29.1),
                ConstantCpReference::standard(),
            )
            .unwrap(),
        );
        reference
    }

    /// One evaluator per variant, each with its own tables.
    fn every_variant() -> Vec<(StandardState, ReferenceTables)> {
        let mut gas = ReferenceTables::new();
        gas.add_species(Nitrogen::reference_thermo());

        let mut liquid = ReferenceTables::new();
        liquid.add_species(
            ConstantCp::new(
                MolarHeatCapacity::new::<joule_per_kelvin_mole>(75.3),
                ConstantCpReference::standard(),
            )
            .unwrap(),
        );

        let n2 = Nitrogen::molecular_weight();
        let h2o = Water::molecular_weight();
        let liquid_eos =
            ConstantVolume::from_density(Water::liquid_density().unwrap(), h2o).unwrap();

        vec![
            (
                StandardState::new(EosModel::from(PressureIndependent), 0, n2).unwrap(),
                gas.clone(),
            ),
            (
                StandardState::new(EosModel::from(IdealGas), 0, n2).unwrap(),
                gas.clone(),
            ),
            (
                StandardState::new(EosModel::from(Nitrogen::van_der_waals().unwrap()), 0, n2)
                    .unwrap(),
                gas,
            ),
            (
                StandardState::new(EosModel::from(liquid_eos), 0, h2o).unwrap(),
                liquid,
            ),
        ]
    }

    #[test]
    fn enthalpy_is_zero_at_reference_point() {
        let mut reference = flat_nitrogen();
        let mw = MolarMass::new::<gram_per_mole>(28.0);
        let mut n2 = StandardState::new(IdealGas, 0, mw).unwrap();
        let p0 = reference.reference_pressure(0).unwrap();

        n2.set_state_tp(temp(298.15), p0, &mut reference).unwrap();
        assert_relative_eq!(j_mol(n2.enthalpy(&reference).unwrap()), 0.0, epsilon = 1e-9);
        assert_eq!(j_mol(n2.enthalpy_delta(&reference).unwrap()), 0.0);

        n2.set_state_tp(temp(298.15), p0 * 2.0, &mut reference).unwrap();
        assert_relative_eq!(j_mol(n2.enthalpy(&reference).unwrap()), 0.0, epsilon = 1e-9);
        assert_eq!(j_mol(n2.enthalpy_delta(&reference).unwrap()), 0.0);
        assert_relative_eq!(
            n2.entropy_delta(&reference).unwrap().get::<joule_per_kelvin_mole>(),
            -MOLAR_GAS_CONSTANT * 2.0_f64.ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn gibbs_and_internal_energy_are_consistent() {
        for (mut ss, mut reference) in every_variant() {
            for (t, p) in [(300.0, 1.0), (450.0, 0.2), (600.0, 40.0)] {
                ss.set_state_tp(temp(t), atm(p), &mut reference).unwrap();

                let h = j_mol(ss.enthalpy(&reference).unwrap());
                let s = ss.entropy(&reference).unwrap().get::<joule_per_kelvin_mole>();
                let g = ss.gibbs(&reference).unwrap().get::<joule_per_mole>();
                assert_relative_eq!(g, h - t * s, epsilon = 1e-6, max_relative = 1e-10);

                let u = ss.internal_energy(&reference).unwrap().get::<joule_per_mole>();
                let v = (ss.molecular_weight() / ss.density().unwrap()).value;
                let pv = ss.pressure().unwrap().get::<pascal>() * v;
                assert_relative_eq!(h, u + pv, epsilon = 1e-6, max_relative = 1e-10);
            }
        }
    }

    #[test]
    fn deltas_vanish_at_reference_pressure() {
        for (mut ss, mut reference) in every_variant() {
            let p0 = ss.reference_pressure(&reference).unwrap();
            ss.set_state_tp(temp(350.0), p0, &mut reference).unwrap();

            assert_eq!(j_mol(ss.enthalpy_delta(&reference).unwrap()), 0.0);
            assert_eq!(
                ss.internal_energy_delta(&reference).unwrap().get::<joule_per_mole>(),
                0.0
            );
            assert_eq!(ss.entropy_delta(&reference).unwrap(), MolarEntropy::ZERO);
            assert_eq!(
                ss.gibbs_delta(&reference).unwrap().get::<joule_per_mole>(),
                0.0
            );
            assert_eq!(ss.cp_delta(&reference).unwrap(), MolarHeatCapacity::ZERO);
            assert_eq!(ss.cv_delta(&reference).unwrap(), MolarHeatCapacity::ZERO);
        }
    }

    #[test]
    fn repeated_state_gives_identical_properties() {
        for (mut ss, mut reference) in every_variant() {
            ss.set_state_tp(temp(410.0), atm(3.0), &mut reference).unwrap();
            let first = ss.properties(&reference).unwrap();
            ss.set_state_tp(temp(410.0), atm(3.0), &mut reference).unwrap();
            assert_eq!(ss.properties(&reference).unwrap(), first);
        }
    }

    #[test]
    fn pressure_independent_contract() {
        let mut reference = ReferenceTables::new();
        reference.add_species(Nitrogen::reference_thermo());
        let mut ss = StandardState::new(PressureIndependent, 0, Nitrogen::molecular_weight())
            .unwrap();

        for p in [0.01, 1.0, 25.0] {
            ss.set_state_tp(temp(500.0), atm(p), &mut reference).unwrap();
            assert_eq!(ss.enthalpy_delta(&reference).unwrap(), MolarEnthalpy::ZERO);
            assert_eq!(
                ss.internal_energy_delta(&reference).unwrap().get::<joule_per_mole>(),
                0.0
            );
            assert_eq!(ss.entropy_delta(&reference).unwrap(), MolarEntropy::ZERO);
            assert_eq!(ss.cp_delta(&reference).unwrap(), MolarHeatCapacity::ZERO);
            assert_eq!(ss.cv_delta(&reference).unwrap(), MolarHeatCapacity::ZERO);

            let mut mu = [MolarGibbsEnergy::ZERO];
            ss.chemical_potentials(&reference, &mut mu).unwrap();
            assert_eq!(mu[0], ss.gibbs(&reference).unwrap());
        }

        assert!(matches!(
            ss.chemical_potentials(&reference, &mut []),
            Err(PropertyError::InvalidState { .. })
        ));
    }

    #[test]
    fn ideal_gas_heat_capacities_differ_by_r() {
        let mut reference = ReferenceTables::new();
        reference.add_species(Nitrogen::reference_thermo());
        let mut ss = StandardState::new(IdealGas, 0, Nitrogen::molecular_weight()).unwrap();
        ss.set_state_tp(temp(298.15), atm(1.0), &mut reference).unwrap();

        let cp = ss.cp(&reference).unwrap().get::<joule_per_kelvin_mole>();
        let cv = ss.cv(&reference).unwrap().get::<joule_per_kelvin_mole>();
        assert_relative_eq!(cp, 29.07, max_relative = 1e-3);
        assert_relative_eq!(cp - cv, MOLAR_GAS_CONSTANT, epsilon = 1e-12);
        assert_relative_eq!(
            ss.density().unwrap().get::<kilogram_per_cubic_meter>(),
            1.145,
            max_relative = 1e-3
        );
    }

    #[test]
    fn queries_before_ready_fail() {
        let reference = flat_nitrogen();
        let ss = StandardState::new(IdealGas, 0, Nitrogen::molecular_weight()).unwrap();

        assert_eq!(ss.status(), Lifecycle::Bound);
        assert!(matches!(ss.state(), Err(PropertyError::NotReady { .. })));
        assert!(matches!(
            ss.enthalpy(&reference),
            Err(PropertyError::NotReady { .. })
        ));
        assert!(matches!(
            ss.gibbs_delta(&reference),
            Err(PropertyError::NotReady { .. })
        ));
    }

    #[test]
    fn stale_tables_are_detected() {
        let mut reference = ReferenceTables::new();
        reference.add_species(Nitrogen::reference_thermo());
        reference.add_species(Water::reference_thermo());

        let mut n2 = StandardState::new(IdealGas, 0, Nitrogen::molecular_weight()).unwrap();
        let mut h2o = StandardState::new(IdealGas, 1, Water::molecular_weight()).unwrap();

        n2.set_state_tp(temp(300.0), atm(1.0), &mut reference).unwrap();
        h2o.set_state_tp(temp(500.0), atm(1.0), &mut reference).unwrap();

        assert!(h2o.enthalpy(&reference).is_ok());
        assert!(matches!(
            n2.enthalpy(&reference),
            Err(PropertyError::StaleReference { .. })
        ));

        n2.set_temperature(temp(300.0), &mut reference).unwrap();
        assert!(n2.enthalpy(&reference).is_ok());
    }

    #[test]
    fn temperature_and_density_reach_ready() {
        let mut reference = ReferenceTables::new();
        reference.add_species(Nitrogen::reference_thermo());
        let mut ss = StandardState::new(IdealGas, 0, Nitrogen::molecular_weight()).unwrap();

        ss.set_density(MassDensity::new::<kilogram_per_cubic_meter>(1.0))
            .unwrap();
        assert_eq!(ss.status(), Lifecycle::Bound);

        ss.set_temperature(temp(400.0), &mut reference).unwrap();
        assert_eq!(ss.status(), Lifecycle::Ready);

        let v = 0.028_013_4;
        assert_relative_eq!(
            ss.pressure().unwrap().get::<pascal>(),
            MOLAR_GAS_CONSTANT * 400.0 / v,
            max_relative = 1e-12
        );

        // Doubling temperature at fixed density doubles pressure.
        let p = ss.pressure().unwrap();
        ss.set_temperature(temp(800.0), &mut reference).unwrap();
        assert_relative_eq!(
            ss.pressure().unwrap().get::<pascal>(),
            2.0 * p.get::<pascal>(),
            max_relative = 1e-12
        );

        ss.set_pressure(p).unwrap();
        assert_relative_eq!(
            ss.density().unwrap().get::<kilogram_per_cubic_meter>(),
            0.5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn constant_volume_density_is_fixed() {
        let mut reference = flat_nitrogen();
        let mw = Water::molecular_weight();
        let eos = ConstantVolume::from_density(Water::liquid_density().unwrap(), mw).unwrap();
        let mut ss = StandardState::new(eos, 0, mw).unwrap();

        ss.set_state_tp(temp(300.0), atm(10.0), &mut reference).unwrap();
        assert_relative_eq!(
            ss.density().unwrap().get::<kilogram_per_cubic_meter>(),
            997.047,
            max_relative = 1e-12
        );

        assert!(matches!(
            ss.set_density(MassDensity::new::<kilogram_per_cubic_meter>(1000.0)),
            Err(PropertyError::InvalidState { .. })
        ));

        // Pressure is independent of density, so a temperature change keeps it.
        ss.set_temperature(temp(320.0), &mut reference).unwrap();
        assert_relative_eq!(ss.pressure().unwrap().get::<atmosphere>(), 10.0);

        let cp = ss.cp(&reference).unwrap();
        assert_eq!(ss.cv(&reference).unwrap(), cp);
    }

    #[test]
    fn failed_update_keeps_previous_state() {
        let mut reference = ReferenceTables::new();
        reference.add_species(Nitrogen::reference_thermo());
        let mut ss = StandardState::new(IdealGas, 0, Nitrogen::molecular_weight()).unwrap();
        ss.set_state_tp(temp(300.0), atm(1.0), &mut reference).unwrap();
        let before = ss.state().unwrap();

        assert!(ss.set_state_tp(temp(-5.0), atm(1.0), &mut reference).is_err());
        assert!(ss.set_state_tp(temp(300.0), Pressure::ZERO, &mut reference).is_err());
        assert!(ss.set_density(MassDensity::ZERO).is_err());
        assert_eq!(ss.state().unwrap(), before);
        assert_eq!(reference.temperature(), Some(temp(300.0)));
    }

    #[test]
    fn critical_queries_depend_on_variant() {
        let ideal = StandardState::new(IdealGas, 0, Nitrogen::molecular_weight()).unwrap();
        assert!(matches!(
            ideal.critical_temperature(),
            Err(PropertyError::Unsupported { .. })
        ));
        assert!(matches!(
            ideal.critical_pressure(),
            Err(PropertyError::Unsupported { .. })
        ));
        assert!(matches!(
            ideal.critical_density(),
            Err(PropertyError::Unsupported { .. })
        ));
        assert!(matches!(
            ideal.saturation_pressure(temp(100.0)),
            Err(PropertyError::Unsupported { .. })
        ));

        let vdw = StandardState::new(
            Nitrogen::van_der_waals().unwrap(),
            0,
            Nitrogen::molecular_weight(),
        )
        .unwrap();
        let tc = vdw.critical_temperature().unwrap();
        let pc = vdw.critical_pressure().unwrap();
        assert_relative_eq!(tc.get::<kelvin>(), 126.19);

        // ρc = M/(3b) with b = R·Tc/(8·Pc).
        let b = MOLAR_GAS_CONSTANT * 126.19 / (8.0 * pc.get::<pascal>());
        assert_relative_eq!(
            vdw.critical_density().unwrap().get::<kilogram_per_cubic_meter>(),
            0.028_013_4 / (3.0 * b),
            max_relative = 1e-12
        );

        let p_sat = vdw.saturation_pressure(temp(0.9 * 126.19)).unwrap();
        assert_relative_eq!(
            p_sat.get::<pascal>() / pc.get::<pascal>(),
            0.646_998_351_872_251_2,
            max_relative = 1e-5
        );
    }

    #[test]
    fn owner_context_is_optional() {
        let phase = Rc::new(TestPhase::nitrogen_and_water());
        let mut reference = ReferenceTables::new();
        reference.add_species(Nitrogen::reference_thermo());
        reference.add_species(Water::reference_thermo());

        let mut h2o = StandardState::from_owner(&phase, 1, IdealGas).unwrap();
        h2o.initialize(&reference).unwrap();
        assert_eq!(h2o.species_label(), "H2O");
        assert_relative_eq!(
            h2o.molecular_weight().get::<gram_per_mole>(),
            18.015_28
        );

        drop(phase);
        assert_eq!(h2o.species_label(), "species 1");
        assert!(h2o.owner().is_bound());

        h2o.set_state_tp(temp(400.0), atm(1.0), &mut reference).unwrap();
        assert!(h2o.enthalpy(&reference).is_ok());
    }

    #[test]
    fn owner_must_know_the_species() {
        let phase = Rc::new(TestPhase::nitrogen_and_water());
        assert!(matches!(
            StandardState::from_owner(&phase, 2, IdealGas),
            Err(ConfigError::SpeciesIndex { index: 2, count: 2 })
        ));

        let unknown = Rc::new(TestPhase::unnamed_weight());
        assert!(matches!(
            StandardState::from_owner(&unknown, 0, IdealGas),
            Err(ConfigError::MissingParameter { .. })
        ));

        let standalone = StandardState::new(IdealGas, 3, Nitrogen::molecular_weight()).unwrap();
        assert!(matches!(
            standalone.initialize(&flat_nitrogen()),
            Err(ConfigError::SpeciesIndex { index: 3, count: 1 })
        ));
    }

    #[test]
    fn molecular_weight_fixed_once_state_is_set() {
        let mut reference = flat_nitrogen();
        let mut ss = StandardState::new(IdealGas, 0, Nitrogen::molecular_weight()).unwrap();

        ss.set_molecular_weight(MolarMass::new::<gram_per_mole>(28.0))
            .unwrap();
        assert!(matches!(
            ss.set_molecular_weight(MolarMass::ZERO),
            Err(ConfigError::InvalidParameter { .. })
        ));

        ss.set_state_tp(temp(300.0), atm(1.0), &mut reference).unwrap();
        assert!(matches!(
            ss.set_molecular_weight(MolarMass::new::<gram_per_mole>(32.0)),
            Err(ConfigError::Property(PropertyError::InvalidState { .. }))
        ));
        assert_relative_eq!(ss.molecular_weight().get::<gram_per_mole>(), 28.0);
    }

    #[test]
    fn builds_from_document() {
        let document: PhaseDocument = MIXED_PHASE.parse().unwrap();
        let phase = Rc::new(document.clone());
        let mut reference = document.reference_tables().unwrap();

        let mut co2 = StandardState::from_document(&phase, 1, &document, "CO2").unwrap();
        co2.initialize(&reference).unwrap();
        assert_eq!(co2.kind(), EosKind::VanDerWaals);
        assert_eq!(co2.species_label(), "CO2");

        co2.set_state_tp(temp(350.0), atm(50.0), &mut reference)
            .unwrap();
        assert!(j_mol(co2.enthalpy_delta(&reference).unwrap()) < 0.0);

        let water = StandardState::from_document(&phase, 2, &document, "H2O(l)").unwrap();
        assert_eq!(water.kind(), EosKind::ConstantVolume);

        assert!(matches!(
            StandardState::from_document(&phase, 0, &document, "Ar"),
            Err(ConfigError::UnknownSpecies { .. })
        ));
    }

    #[test]
    fn builds_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MIXED_PHASE.as_bytes()).unwrap();

        let phase = Rc::new(TestPhase::nitrogen_and_water());
        let n2 = StandardState::from_file(&phase, 0, file.path(), "N2").unwrap();
        assert_eq!(n2.kind(), EosKind::IdealGas);
        assert_relative_eq!(n2.molecular_weight().get::<gram_per_mole>(), 28.0134);
    }

    #[test]
    fn reconfiguration_only_before_state() {
        let mut reference = flat_nitrogen();
        let mut ss: StandardState =
            StandardState::new(EosModel::default(), 0, Nitrogen::molecular_weight()).unwrap();

        let entry = StandardStateEntry {
            model: EosKind::VanDerWaals,
            parameters: EosParameters::new().with("critical_temperature", 126.19),
        };
        assert!(matches!(
            ss.initialize_from_document(&entry),
            Err(ConfigError::MissingParameter { .. })
        ));
        assert_eq!(ss.kind(), EosKind::PressureIndependent);

        let entry = StandardStateEntry {
            parameters: entry.parameters.with("critical_pressure", 3.3958e6),
            ..entry
        };
        ss.initialize_from_document(&entry).unwrap();
        assert_eq!(ss.kind(), EosKind::VanDerWaals);

        ss.apply_parameters(&EosParameters::new().with("critical_temperature", 130.0))
            .unwrap();
        assert_relative_eq!(ss.critical_temperature().unwrap().get::<kelvin>(), 130.0);

        ss.set_state_tp(temp(300.0), atm(1.0), &mut reference).unwrap();
        assert!(ss.apply_parameters(&EosParameters::new()).is_err());
        assert!(ss.initialize_from_document(&entry).is_err());
    }

    #[test]
    fn snapshot_matches_individual_queries() {
        let mut reference = ReferenceTables::new();
        reference.add_species(Nitrogen::reference_thermo());
        let mut ss = StandardState::new(
            VanDerWaals::new(Nitrogen::critical_temperature(), Nitrogen::critical_pressure())
                .unwrap(),
            0,
            Nitrogen::molecular_weight(),
        )
        .unwrap();
        ss.set_state_tp(temp(200.0), atm(80.0), &mut reference).unwrap();

        let props = ss.properties(&reference).unwrap();
        assert_eq!(props.enthalpy, ss.enthalpy(&reference).unwrap());
        assert_eq!(props.entropy, ss.entropy(&reference).unwrap());
        assert_eq!(props.gibbs, ss.gibbs(&reference).unwrap());
        assert_eq!(props.internal_energy, ss.internal_energy(&reference).unwrap());
        assert_eq!(props.cp, ss.cp(&reference).unwrap());
        assert_eq!(props.cv, ss.cv(&reference).unwrap());
        assert!(props.cp > props.cv);
    }

    #[test]
    fn density_path_matches_pressure_path() {
        for (mut ss, mut reference) in every_variant() {
            let mut by_tp = ss.clone();
            let mut tp_reference = reference.clone();
            by_tp
                .set_state_tp(temp(320.0), atm(5.0), &mut tp_reference)
                .unwrap();

            ss.set_density(by_tp.density().unwrap()).unwrap();
            ss.set_temperature(temp(320.0), &mut reference).unwrap();
            if ss.status() == Lifecycle::Bound {
                // Constant-volume species carry pressure as an independent variable.
                ss.set_pressure(atm(5.0)).unwrap();
            }

            assert_relative_eq!(
                ss.pressure().unwrap().get::<pascal>(),
                by_tp.pressure().unwrap().get::<pascal>(),
                max_relative = 1e-9
            );
            assert_relative_eq!(
                j_mol(ss.enthalpy(&reference).unwrap()),
                j_mol(by_tp.enthalpy(&tp_reference).unwrap()),
                epsilon = 1e-6,
                max_relative = 1e-9
            );
            assert_relative_eq!(
                ss.internal_energy(&reference).unwrap().get::<joule_per_mole>(),
                by_tp.internal_energy(&tp_reference).unwrap().get::<joule_per_mole>(),
                epsilon = 1e-6,
                max_relative = 1e-9
            );
            assert_relative_eq!(
                ss.entropy(&reference).unwrap().get::<joule_per_kelvin_mole>(),
                by_tp.entropy(&tp_reference).unwrap().get::<joule_per_kelvin_mole>(),
                epsilon = 1e-9,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn internal_energy_delta_recovers_reference_value() {
        for (mut ss, mut reference) in every_variant() {
            let p0 = ss.reference_pressure(&reference).unwrap();
            ss.set_state_tp(temp(350.0), p0, &mut reference).unwrap();
            let u0 = ss.internal_energy(&reference).unwrap().get::<joule_per_mole>();

            for p in [0.1, 20.0, 60.0] {
                ss.set_state_tp(temp(350.0), atm(p), &mut reference).unwrap();
                let u = ss.internal_energy(&reference).unwrap().get::<joule_per_mole>();
                let du = ss
                    .internal_energy_delta(&reference)
                    .unwrap()
                    .get::<joule_per_mole>();
                assert_relative_eq!(u - du, u0, epsilon = 1e-6, max_relative = 1e-10);
            }
        }
    }

    #[test]
    fn density_off_the_stable_branch_is_rejected() {
        let mut reference = ReferenceTables::new();
        reference.add_species(CarbonDioxide::reference_thermo());
        let mut co2 = StandardState::new(
            CarbonDioxide::van_der_waals().unwrap(),
            0,
            CarbonDioxide::molecular_weight(),
        )
        .unwrap();
        let t = temp(250.0);
        let p_sat = co2.saturation_pressure(t).unwrap();
        co2.set_temperature(t, &mut reference).unwrap();

        // Compressed liquid above the vapor pressure.
        co2.set_density(MassDensity::new::<kilogram_per_cubic_meter>(655.0))
            .unwrap();
        assert!(co2.pressure().unwrap() > p_sat);
        let before = co2.state().unwrap();

        // Liquid stretched below the vapor pressure, where vapor is stable.
        assert!(matches!(
            co2.set_density(MassDensity::new::<kilogram_per_cubic_meter>(636.55)),
            Err(PropertyError::InvalidState { .. })
        ));
        assert_eq!(co2.state().unwrap(), before);

        // Vapor below the vapor pressure.
        co2.set_density(MassDensity::new::<kilogram_per_cubic_meter>(40.0))
            .unwrap();
        assert!(co2.pressure().unwrap() < p_sat);
        let v = co2.molar_volume().unwrap();
        let h = j_mol(co2.enthalpy(&reference).unwrap());
        let u = co2.internal_energy(&reference).unwrap().get::<joule_per_mole>();
        assert_relative_eq!(
            h - u,
            co2.pressure().unwrap().get::<pascal>() * v.value,
            max_relative = 1e-12
        );
    }
}
