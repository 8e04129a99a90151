//! # notary-index
//!
//! Backend composition for commitment queries. Two composition policies
//! over the same [`ICommitmentIndex`](notary_core::ICommitmentIndex)
//! capability, chosen by what the caller values:
//!
//! - [`AggregateIndex`] — queries **all** backends concurrently and merges,
//!   trading cost for completeness. Individual failures are absorbed into a
//!   diagnostic log; only total exhaustion fails the call.
//! - [`FailoverIndex`] — trusts **one** backend at a time in priority
//!   order, trading completeness for latency and cost. A clean answer
//!   (found or empty) is terminal; only errors escalate.
//!
//! Both compositions implement `ICommitmentIndex` themselves, so they nest
//! and feed the matcher and dataset replay unchanged. [`MemoryBackend`] is
//! the in-process reference backend used by tests, benches, and examples.

pub mod aggregate;
pub mod failover;
pub mod memory;

pub use aggregate::{Aggregated, AggregateIndex, BackendFailure};
pub use failover::FailoverIndex;
pub use memory::MemoryBackend;
