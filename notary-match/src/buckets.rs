//! Per-(owner, set) buckets of committed timestamps.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use notary_core::models::{Address, Cid, CommitmentRecord};

/// Key of one candidate set bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BucketKey {
    pub owner: Address,
    pub set_cid: Cid,
}

/// Committed timestamps of one `(owner, set)` pair, grouped per object
/// fingerprint. Timestamp lists are sorted ascending so strategies can
/// probe them by binary search.
#[derive(Debug, Default)]
pub struct SetBucket {
    timestamps: BTreeMap<Cid, Vec<DateTime<Utc>>>,
    first_committed_at: Option<DateTime<Utc>>,
}

impl SetBucket {
    fn add(&mut self, object_cid: Cid, ts: DateTime<Utc>) {
        self.timestamps.entry(object_cid).or_default().push(ts);
        self.first_committed_at = Some(match self.first_committed_at {
            Some(first) if first <= ts => first,
            _ => ts,
        });
    }

    fn sort(&mut self) {
        for list in self.timestamps.values_mut() {
            list.sort_unstable();
        }
    }

    /// Sorted committed timestamps for one fingerprint, if any.
    pub fn timestamps_for(&self, object_cid: &Cid) -> Option<&[DateTime<Utc>]> {
        self.timestamps.get(object_cid).map(Vec::as_slice)
    }

    /// Earliest commitment time seen in this bucket.
    pub fn first_committed_at(&self) -> Option<DateTime<Utc>> {
        self.first_committed_at
    }
}

/// Group probed records into `(owner, set)` buckets.
///
/// Records without a container link cannot witness set membership and are
/// skipped, as are records past the `as_of` cutoff. `BTreeMap` keeps
/// iteration (and therefore tie-breaking downstream) deterministic.
pub fn build_buckets(
    records: impl IntoIterator<Item = CommitmentRecord>,
    as_of: Option<DateTime<Utc>>,
) -> BTreeMap<BucketKey, SetBucket> {
    let mut buckets: BTreeMap<BucketKey, SetBucket> = BTreeMap::new();
    for record in records {
        let Some(set_cid) = record.set_cid else {
            continue;
        };
        if let Some(cutoff) = as_of {
            if record.timestamp > cutoff {
                continue;
            }
        }
        buckets
            .entry(BucketKey {
                owner: record.owner,
                set_cid,
            })
            .or_default()
            .add(record.object_cid, record.timestamp);
    }
    for bucket in buckets.values_mut() {
        bucket.sort();
    }
    buckets
}
