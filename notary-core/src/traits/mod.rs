//! Cross-crate capability traits.

mod commitment_index;

pub use commitment_index::ICommitmentIndex;
