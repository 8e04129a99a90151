//! Pairing strategies: which committed record answers which candidate pair.

use chrono::Duration;

use notary_core::models::ObjectAtTime;

use crate::buckets::SetBucket;

/// Decides how candidate pairs bind to committed records within one
/// `(owner, set)` bucket.
///
/// The policy for repeated fingerprints and pairing order is deliberately
/// substitutable: supply a different implementation of this trait, not a
/// subclass.
pub trait IMatchingStrategy: Send + Sync {
    /// Number of candidate pairs matched against this bucket.
    ///
    /// `objects` are deduplicated and ordered ascending by timestamp;
    /// `max_diff` is the tolerance window on |committed - observed|.
    fn count_matches(
        &self,
        bucket: &SetBucket,
        objects: &[ObjectAtTime],
        max_diff: Duration,
    ) -> usize;
}

/// Default policy: each candidate pair, taken in timestamp order, binds the
/// not-yet-used committed record of the same fingerprint that minimizes the
/// absolute time difference, ties going to the earliest record timestamp.
/// A record binds at most once, so a subject committed once can never
/// satisfy two candidate pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestRecordStrategy;

impl IMatchingStrategy for NearestRecordStrategy {
    fn count_matches(
        &self,
        bucket: &SetBucket,
        objects: &[ObjectAtTime],
        max_diff: Duration,
    ) -> usize {
        let mut used: std::collections::HashMap<&notary_core::models::Cid, Vec<bool>> =
            std::collections::HashMap::new();
        let mut matched = 0;

        for candidate in objects {
            let Some(list) = bucket.timestamps_for(&candidate.object_cid) else {
                continue;
            };
            let used_flags = used
                .entry(&candidate.object_cid)
                .or_insert_with(|| vec![false; list.len()]);

            // Window of records within tolerance of the candidate time.
            let lo = list.partition_point(|ts| *ts < candidate.timestamp - max_diff);
            let hi = list.partition_point(|ts| *ts <= candidate.timestamp + max_diff);

            // Smallest |dt| among unused records; scanning ascending means
            // an equal-diff tie keeps the earlier timestamp.
            let mut best: Option<usize> = None;
            for idx in lo..hi {
                if used_flags[idx] {
                    continue;
                }
                let diff = (list[idx] - candidate.timestamp).abs();
                match best {
                    Some(b) if (list[b] - candidate.timestamp).abs() <= diff => {}
                    _ => best = Some(idx),
                }
            }
            if let Some(idx) = best {
                used_flags[idx] = true;
                matched += 1;
            }
        }
        matched
    }
}

/// Permissive windowed policy: a candidate pair matches when *any*
/// committed record of the same fingerprint lies within the tolerance
/// window, with no use-once bookkeeping. One record can satisfy several
/// candidate pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyWithinToleranceStrategy;

impl IMatchingStrategy for AnyWithinToleranceStrategy {
    fn count_matches(
        &self,
        bucket: &SetBucket,
        objects: &[ObjectAtTime],
        max_diff: Duration,
    ) -> usize {
        objects
            .iter()
            .filter(|candidate| {
                let Some(list) = bucket.timestamps_for(&candidate.object_cid) else {
                    return false;
                };
                // Sorted list: only the neighbors of the insertion point can
                // be nearest.
                let i = list.partition_point(|ts| *ts < candidate.timestamp);
                let left = i.checked_sub(1).map(|j| list[j]);
                let right = list.get(i).copied();
                left.into_iter()
                    .chain(right)
                    .any(|ts| (ts - candidate.timestamp).abs() <= max_diff)
            })
            .count()
    }
}
