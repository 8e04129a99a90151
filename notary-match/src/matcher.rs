//! SetMatcher — owner-unknown reverse lookup over a commitment index.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use futures_util::future::join_all;

use notary_core::config::MatchConfig;
use notary_core::errors::{MatchError, NotaryResult};
use notary_core::models::{MatchCriteria, MatchResult, ObjectAtTime};
use notary_core::traits::ICommitmentIndex;

use crate::buckets::build_buckets;
use crate::strategy::{IMatchingStrategy, NearestRecordStrategy};

/// Finds the committed sets best matching an unlabeled candidate list.
///
/// The matcher only reads: it probes the supplied index for each distinct
/// candidate fingerprint, tallies per-`(owner, set)` matches through the
/// configured [`IMatchingStrategy`], and ranks by match ratio. Matching the
/// same candidate twice against an unchanged index yields identical ranked
/// results.
pub struct SetMatcher {
    strategy: Arc<dyn IMatchingStrategy>,
}

impl Default for SetMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SetMatcher {
    /// Matcher with the default nearest-record pairing policy.
    pub fn new() -> Self {
        Self {
            strategy: Arc::new(NearestRecordStrategy),
        }
    }

    /// Matcher with a substituted pairing policy.
    pub fn with_strategy(strategy: Arc<dyn IMatchingStrategy>) -> Self {
        Self { strategy }
    }

    /// Rank every `(owner, set)` whose committed records match the
    /// candidate above `config.min_score`.
    ///
    /// Fails fast with [`MatchError::EmptyCandidate`] on an empty candidate
    /// list; an empty *result* (nothing clears the threshold) is a normal
    /// answer. Per-fingerprint index queries run concurrently; scoring
    /// happens only after all probes are collected, so completion order
    /// cannot affect the result.
    pub async fn find_matching_sets(
        &self,
        criteria: &MatchCriteria,
        index: &dyn ICommitmentIndex,
        config: &MatchConfig,
    ) -> NotaryResult<Vec<MatchResult>> {
        if criteria.objects.is_empty() {
            return Err(MatchError::EmptyCandidate.into());
        }

        // Normalize: collapse identical pairs, order by observed time
        // (fingerprint as the deterministic tie-break).
        let mut objects: Vec<ObjectAtTime> = criteria
            .objects
            .iter()
            .cloned()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        objects.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.object_cid.cmp(&b.object_cid))
        });
        let total_pairs = objects.len();

        let distinct: BTreeSet<&notary_core::models::Cid> =
            objects.iter().map(|o| &o.object_cid).collect();
        let probes = join_all(distinct.iter().map(|cid| index.find_by_object(cid))).await;
        let mut records = Vec::new();
        for probe in probes {
            records.extend(probe?);
        }

        let buckets = build_buckets(records, criteria.as_of);
        let candidate_sets = buckets.len();
        let max_diff = config.max_timestamp_diff();

        let mut results = Vec::new();
        for (key, bucket) in &buckets {
            let matched = self.strategy.count_matches(bucket, &objects, max_diff);
            if matched == 0 {
                continue;
            }
            let score = matched as f64 / total_pairs as f64;
            if score < config.min_score {
                continue;
            }
            let Some(first_committed_at) = bucket.first_committed_at() else {
                continue;
            };
            results.push(MatchResult {
                owner: key.owner.clone(),
                set_cid: key.set_cid.clone(),
                score,
                matched_pairs: matched,
                total_pairs,
                first_committed_at,
            });
        }

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.matched_pairs.cmp(&a.matched_pairs))
                .then_with(|| a.owner.cmp(&b.owner))
                .then_with(|| a.set_cid.cmp(&b.set_cid))
        });
        if let Some(cap) = config.max_results {
            results.truncate(cap);
        }

        tracing::debug!(
            total_pairs,
            candidate_sets,
            returned = results.len(),
            "set match complete"
        );
        Ok(results)
    }
}
