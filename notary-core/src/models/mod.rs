//! Data model: identifiers, commitment records, and matching types.

mod criteria;
mod ids;
mod match_result;
mod record;

pub use criteria::{MatchCriteria, ObjectAtTime};
pub use ids::{Address, BackendId, Cid};
pub use match_result::MatchResult;
pub use record::CommitmentRecord;
