use thiserror::Error;

/// Errors that may occur when evaluating standard-state properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is not defined by the active equation of state.
    ///
    /// For example, the critical point of an ideal gas.
    #[error("unsupported: {context}")]
    Unsupported { context: String },

    /// The evaluator has not been given a complete state yet.
    #[error("state not ready: {context}")]
    NotReady { context: String },

    /// The reference tables were evaluated at a different temperature.
    #[error("stale reference properties: {context}")]
    StaleReference { context: String },

    /// The input state is outside the model's valid domain.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The provided state is invalid or inconsistent.
    #[error("invalid state: {context}")]
    InvalidState { context: String },

    /// The calculation failed due to a numerical or internal error.
    ///
    /// For example, division by zero or a failure to converge.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}

impl PropertyError {
    pub(crate) fn unsupported(context: impl Into<String>) -> Self {
        Self::Unsupported {
            context: context.into(),
        }
    }

    pub(crate) fn not_ready(context: impl Into<String>) -> Self {
        Self::NotReady {
            context: context.into(),
        }
    }

    pub(crate) fn out_of_domain(context: impl Into<String>) -> Self {
        Self::OutOfDomain {
            context: context.into(),
        }
    }

    pub(crate) fn invalid_state(context: impl Into<String>) -> Self {
        Self::InvalidState {
            context: context.into(),
        }
    }

    pub(crate) fn calculation(context: impl Into<String>) -> Self {
        Self::Calculation {
            context: context.into(),
        }
    }
}

/// Errors raised while configuring a standard state.
///
/// A failed configuration never yields a partially valid evaluator.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required equation-of-state parameter was not provided.
    #[error("missing parameter `{name}`")]
    MissingParameter { name: String },

    /// A parameter was provided with a non-physical value.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: String, value: f64 },

    /// No species with the requested identifier exists in the document.
    #[error("unknown species `{id}`")]
    UnknownSpecies { id: String },

    /// The species index does not refer to a species of the owning phase.
    #[error("species index {index} out of range for a phase with {count} species")]
    SpeciesIndex { index: usize, count: usize },

    /// The document could not be parsed.
    #[error("malformed document")]
    Document(#[from] serde_json::Error),

    /// The document could not be read.
    #[error("failed to read document")]
    Io(#[from] std::io::Error),

    /// The change conflicts with the evaluator's current state or model.
    #[error(transparent)]
    Property(#[from] PropertyError),
}

impl ConfigError {
    pub(crate) fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub(crate) fn invalid(name: impl Into<String>, value: f64) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
        }
    }
}
