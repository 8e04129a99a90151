//! CommitmentRecord — the unit returned by any backend query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{Address, BackendId, Cid};

/// One previously recorded commitment, as reported by a backend.
///
/// Immutable once returned. `timestamp` is assigned by the backend at
/// commitment time, never by the client; it is the trust anchor of the
/// whole system. `record_id` is the backend-assigned identity of the
/// commitment (a transaction hash or mirror row id) and is the key under
/// which aggregation collapses duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentRecord {
    /// Backend-assigned identity of the commitment.
    pub record_id: String,

    /// Who recorded the commitment.
    pub owner: Address,

    /// Fingerprint of the committed object.
    pub object_cid: Cid,

    /// Fingerprint of the named set the object was committed into, if any.
    pub set_cid: Option<Cid>,

    /// Backend-assigned commitment time.
    pub timestamp: DateTime<Utc>,

    /// Which backend this record came from.
    pub backend: BackendId,
}
