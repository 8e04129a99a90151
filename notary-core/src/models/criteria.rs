//! Matching request types: candidate pairs and criteria.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Cid;

/// One unlabeled candidate pair: an object fingerprint and the time the
/// caller observed (or produced) it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectAtTime {
    pub object_cid: Cid,
    pub timestamp: DateTime<Utc>,
}

impl ObjectAtTime {
    pub fn new(object_cid: impl Into<Cid>, timestamp: DateTime<Utc>) -> Self {
        Self {
            object_cid: object_cid.into(),
            timestamp,
        }
    }
}

/// Criteria for the owner-unknown reverse lookup.
///
/// The caller has content and observation times, but neither the owning
/// address nor the set fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCriteria {
    /// Candidate pairs to match against committed sets.
    pub objects: Vec<ObjectAtTime>,

    /// Only consider committed records with `timestamp <= as_of`.
    /// `None` means the full history participates.
    pub as_of: Option<DateTime<Utc>>,
}

impl MatchCriteria {
    pub fn new(objects: Vec<ObjectAtTime>) -> Self {
        Self {
            objects,
            as_of: None,
        }
    }

    pub fn as_of(mut self, t: DateTime<Utc>) -> Self {
        self.as_of = Some(t);
        self
    }
}
