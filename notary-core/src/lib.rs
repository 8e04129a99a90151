//! # notary-core
//!
//! Core types, traits, errors, and configuration for the notary commitment
//! query engine.
//!
//! A commitment is a (fingerprint, timestamp, owner) triple recorded through
//! an external write path; this workspace only ever reads, filters, scores,
//! and orders such records. `notary-core` defines the shared vocabulary:
//!
//! - [`models`] — `CommitmentRecord` and the matching request/result types.
//! - [`traits`] — [`ICommitmentIndex`], the uniform read capability that
//!   concrete backends and the compositions in `notary-index` implement.
//! - [`errors`] — per-subsystem error enums wrapped by [`NotaryError`].
//! - [`config`] — subsystem configuration with TOML overrides.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{IndexError, MatchError, NotaryError, NotaryResult, SimulationError};
pub use models::{
    Address, BackendId, Cid, CommitmentRecord, MatchCriteria, MatchResult, ObjectAtTime,
};
pub use traits::ICommitmentIndex;
