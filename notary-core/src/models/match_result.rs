//! MatchResult — one ranked candidate set from the reverse lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{Address, Cid};

/// One `(owner, set)` pair scored against a candidate query.
///
/// Invariant: `score == matched_pairs as f64 / total_pairs as f64`, always
/// in `[0, 1]`. A candidate pair counts as matched only when some committed
/// record of the same fingerprint lies within the configured tolerance
/// window of the pair's observed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub owner: Address,
    pub set_cid: Cid,

    /// Fraction of candidate pairs matched, in `[0, 1]`.
    pub score: f64,

    pub matched_pairs: usize,
    pub total_pairs: usize,

    /// Earliest commitment time seen for this `(owner, set)` pair among the
    /// probed records.
    pub first_committed_at: DateTime<Utc>,
}
