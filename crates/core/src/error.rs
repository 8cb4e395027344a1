//! Error types for profile validation and simulation control

use thiserror::Error;

/// Errors raised while resolving or validating a climate profile.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// A required field was not supplied and has no template fallback
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A field was supplied but lies outside its documented range
    #[error("field '{field}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A field holds NaN or infinity
    #[error("field '{0}' is not a finite number")]
    NonFinite(&'static str),

    /// The biome tag does not name a known template
    #[error("unknown biome '{0}'")]
    UnknownBiome(String),

    /// A special factor key is not one of the enumerated factors
    #[error("unknown special factor '{0}'")]
    UnknownSpecialFactor(String),

    /// The latitude band string did not parse
    #[error("unknown latitude band '{0}'")]
    UnknownLatitudeBand(String),
}

/// Errors raised by a running simulation or the engine registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The climate profile failed validation; no simulation was built
    #[error("invalid climate profile: {0}")]
    InvalidProfile(#[from] ProfileError),

    /// An engine configuration value failed validation
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// A call argument was rejected before any work was done
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A computed field came out NaN or infinite; the instance is now poisoned
    #[error("non-finite value in '{field}' at hour {hour}")]
    NonFinite { field: &'static str, hour: u64 },

    /// The instance hit an earlier invariant violation and refuses further work
    #[error("simulation is poisoned by an earlier invariant violation")]
    Poisoned,

    /// No simulation is registered under this handle
    #[error("unknown simulation handle {0}")]
    UnknownHandle(u64),

    /// A checkpoint could not be encoded or decoded
    #[error("checkpoint error: {0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
