//! JSON phase documents.
//!
//! A document names a phase and lists its species. Each species entry carries
//! a molecular weight in g/mol, an optional reference-state fit, and the
//! standard-state model with its parameters:
//!
//! ```
//! use twine_standard_state::support::thermo::{document::PhaseDocument, eos::EosKind};
//!
//! let doc: PhaseDocument = r#"{
//!     "name": "gas",
//!     "species": [{
//!         "name": "N2",
//!         "molecular_weight": 28.0134,
//!         "reference": { "kind": "constant-cp", "cp": 29.1 },
//!         "standard_state": { "model": "ideal-gas" }
//!     }]
//! }"#
//! .parse()
//! .unwrap();
//!
//! let (k, entry) = doc.species("N2").unwrap();
//! assert_eq!(k, 0);
//! assert_eq!(entry.standard_state.model, EosKind::IdealGas);
//! ```

use std::{fs, path::Path, str::FromStr, sync::Arc};

use log::info;
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{MolarHeatCapacity, MolarMass, Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_heat_capacity::joule_per_kelvin_mole,
    molar_mass::gram_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::{MolarEnthalpy, MolarEntropy};

use super::{
    ConfigError, OwnerPhase, ReferenceTables, ReferenceThermo,
    eos::{EosKind, EosParameters},
    reference::{ConstantCp, ConstantCpReference, Nasa7},
};

/// A phase and the definitions of its species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseDocument {
    pub name: String,
    pub species: Vec<SpeciesEntry>,
}

/// Definition of one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub name: String,

    /// Molecular weight in g/mol.
    #[serde(default)]
    pub molecular_weight: Option<f64>,

    #[serde(default)]
    pub reference: Option<ReferenceEntry>,

    pub standard_state: StandardStateEntry,
}

/// Standard-state model selection and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardStateEntry {
    pub model: EosKind,

    #[serde(default)]
    pub parameters: EosParameters,
}

/// Reference-state fit of one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ReferenceEntry {
    /// Two-range NASA polynomials, with the reference pressure in Pa.
    Nasa7 {
        temperature_ranges: [f64; 3],
        low: [f64; 7],
        high: [f64; 7],
        #[serde(default)]
        reference_pressure: Option<f64>,
    },

    /// Constant heat capacity in J/(mol·K) about a reference point.
    ConstantCp {
        cp: f64,
        #[serde(default = "default_temperature")]
        temperature: f64,
        #[serde(default = "default_pressure")]
        pressure: f64,
        #[serde(default)]
        enthalpy: f64,
        #[serde(default)]
        entropy: f64,
    },
}

fn default_temperature() -> f64 {
    298.15
}

fn default_pressure() -> f64 {
    101_325.0
}

impl ReferenceEntry {
    /// Builds the reference-state source this entry describes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for non-physical values.
    pub fn to_source(&self) -> Result<Arc<dyn ReferenceThermo>, ConfigError> {
        match self {
            Self::Nasa7 {
                temperature_ranges,
                low,
                high,
                reference_pressure,
            } => {
                let fit = Nasa7::new(
                    (*temperature_ranges).map(ThermodynamicTemperature::new::<kelvin>),
                    *low,
                    *high,
                )?;
                let fit = match reference_pressure {
                    Some(p) => fit.with_reference_pressure(Pressure::new::<pascal>(*p))?,
                    None => fit,
                };
                Ok(Arc::new(fit))
            }
            Self::ConstantCp {
                cp,
                temperature,
                pressure,
                enthalpy,
                entropy,
            } => Ok(Arc::new(ConstantCp::new(
                MolarHeatCapacity::new::<joule_per_kelvin_mole>(*cp),
                ConstantCpReference {
                    temperature: ThermodynamicTemperature::new::<kelvin>(*temperature),
                    pressure: Pressure::new::<pascal>(*pressure),
                    enthalpy: MolarEnthalpy::new::<joule_per_mole>(*enthalpy),
                    entropy: MolarEntropy::new::<joule_per_kelvin_mole>(*entropy),
                },
            )?)),
        }
    }
}

impl SpeciesEntry {
    /// Returns the molecular weight, if the entry gives one.
    #[must_use]
    pub fn molecular_weight(&self) -> Option<MolarMass> {
        self.molecular_weight.map(MolarMass::new::<gram_per_mole>)
    }
}

impl PhaseDocument {
    /// Reads a document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Document`] if it is not a valid document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let doc: Self = fs::read_to_string(path)?.parse()?;
        info!(
            "loaded phase `{}` with {} species from {}",
            doc.name,
            doc.species.len(),
            path.display()
        );
        Ok(doc)
    }

    /// Returns the index and entry of the species named `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownSpecies`] if no species has that name.
    pub fn species(&self, id: &str) -> Result<(usize, &SpeciesEntry), ConfigError> {
        self.species
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.name == id)
            .ok_or_else(|| ConfigError::UnknownSpecies { id: id.to_owned() })
    }

    /// Builds reference tables holding every species, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingParameter`] if a species has no reference
    /// entry, or the error raised while building its source.
    pub fn reference_tables(&self) -> Result<ReferenceTables, ConfigError> {
        let mut tables = ReferenceTables::new();
        for entry in &self.species {
            let source = entry
                .reference
                .as_ref()
                .ok_or_else(|| ConfigError::missing(format!("{}.reference", entry.name)))?
                .to_source()?;
            tables.add_shared(source);
        }
        Ok(tables)
    }
}

impl FromStr for PhaseDocument {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

impl OwnerPhase for PhaseDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn species_count(&self) -> usize {
        self.species.len()
    }

    fn species_name(&self, index: usize) -> Option<&str> {
        self.species.get(index).map(|entry| entry.name.as_str())
    }

    fn molecular_weight(&self, index: usize) -> Option<MolarMass> {
        self.species.get(index).and_then(SpeciesEntry::molecular_weight)
    }
}
