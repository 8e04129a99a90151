//! # notary-match
//!
//! The reverse lookup: given an unlabeled list of (fingerprint, observed
//! time) pairs, find which previously committed, owner-unknown set best
//! matches. Tolerates partial overlap (missing members, extra members,
//! near-timestamp jitter) because real re-submission workflows never
//! reproduce a byte-identical candidate set.
//!
//! Pipeline: normalize candidates → probe the index per fingerprint
//! (concurrently) → bucket records per `(owner, set)` → pair candidates to
//! records through an [`IMatchingStrategy`] → score, rank, truncate.

pub mod buckets;
pub mod matcher;
pub mod strategy;

pub use matcher::SetMatcher;
pub use strategy::{AnyWithinToleranceStrategy, IMatchingStrategy, NearestRecordStrategy};
