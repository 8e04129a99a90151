//! Error taxonomy: per-subsystem enums wrapped by [`NotaryError`].
//!
//! There is no `NotFound` variant: an empty result is a valid negative
//! answer everywhere in this workspace, never an error.

mod index_error;
mod match_error;
mod simulation_error;

pub use index_error::IndexError;
pub use match_error::MatchError;
pub use simulation_error::SimulationError;

/// Top-level error for all notary operations.
#[derive(Debug, thiserror::Error)]
pub enum NotaryError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type NotaryResult<T> = Result<T, NotaryError>;
