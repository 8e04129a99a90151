use chrono::{DateTime, Utc};

/// Point-in-time simulation errors.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The supplied timestamp sequence is empty or not ascending.
    #[error("invalid simulation input: {reason}")]
    InvalidInput { reason: String },

    /// The clock is already engaged by another simulation run. Concurrent
    /// what-if queries need independent clock instances.
    #[error("point-in-time clock is already engaged")]
    ClockBusy,

    /// The simulation body failed for one timestamp. The clock has been
    /// restored to live mode before this error propagates.
    #[error("simulation step at {at} failed: {source}")]
    StepFailed {
        at: DateTime<Utc>,
        #[source]
        source: Box<crate::errors::NotaryError>,
    },
}
