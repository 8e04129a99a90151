//! Property tests for pairing strategies and bucket scoring.

use chrono::Duration;
use proptest::prelude::*;

use notary_core::models::ObjectAtTime;
use notary_match::buckets::build_buckets;
use notary_match::{AnyWithinToleranceStrategy, IMatchingStrategy, NearestRecordStrategy};
use test_fixtures::{record, ts};

/// A small universe of fingerprints keeps collisions (and therefore
/// interesting pairings) frequent.
fn cid_name(i: u8) -> String {
    format!("obj-{}", i % 8)
}

prop_compose! {
    fn committed_records()(
        entries in prop::collection::vec((0u8..8, 0i64..200_000), 0..40)
    ) -> Vec<(u8, i64)> {
        entries
    }
}

prop_compose! {
    fn candidate_pairs()(
        entries in prop::collection::vec((0u8..8, 0i64..200_000), 1..20)
    ) -> Vec<(u8, i64)> {
        entries
    }
}

fn normalized_objects(pairs: &[(u8, i64)]) -> Vec<ObjectAtTime> {
    let mut objects: Vec<ObjectAtTime> = pairs
        .iter()
        .map(|(i, secs)| ObjectAtTime::new(cid_name(*i).as_str(), ts(*secs)))
        .collect::<std::collections::HashSet<_>>()
        .into_iter()
        .collect();
    objects.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.object_cid.cmp(&b.object_cid))
    });
    objects
}

proptest! {
    #[test]
    fn matched_never_exceeds_total(
        committed in committed_records(),
        pairs in candidate_pairs(),
        tolerance in 0i64..100_000,
    ) {
        let records = committed
            .iter()
            .map(|(i, secs)| record("0xa1ce", &cid_name(*i), Some("set-p"), ts(*secs)));
        let buckets = build_buckets(records, None);
        let objects = normalized_objects(&pairs);

        for bucket in buckets.values() {
            let matched = NearestRecordStrategy.count_matches(
                bucket,
                &objects,
                Duration::seconds(tolerance),
            );
            prop_assert!(matched <= objects.len());
        }
    }

    #[test]
    fn use_once_policy_never_counts_more_than_the_permissive_one(
        committed in committed_records(),
        pairs in candidate_pairs(),
        tolerance in 0i64..100_000,
    ) {
        let records = committed
            .iter()
            .map(|(i, secs)| record("0xa1ce", &cid_name(*i), Some("set-p"), ts(*secs)));
        let buckets = build_buckets(records, None);
        let objects = normalized_objects(&pairs);
        let max_diff = Duration::seconds(tolerance);

        for bucket in buckets.values() {
            let strict = NearestRecordStrategy.count_matches(bucket, &objects, max_diff);
            let loose = AnyWithinToleranceStrategy.count_matches(bucket, &objects, max_diff);
            prop_assert!(strict <= loose);
        }
    }

    #[test]
    fn counting_is_deterministic(
        committed in committed_records(),
        pairs in candidate_pairs(),
        tolerance in 0i64..100_000,
    ) {
        let records: Vec<_> = committed
            .iter()
            .map(|(i, secs)| record("0xa1ce", &cid_name(*i), Some("set-p"), ts(*secs)))
            .collect();
        let buckets_a = build_buckets(records.clone(), None);
        let buckets_b = build_buckets(records, None);
        let objects = normalized_objects(&pairs);
        let max_diff = Duration::seconds(tolerance);

        for (key, bucket) in &buckets_a {
            let again = &buckets_b[key];
            prop_assert_eq!(
                NearestRecordStrategy.count_matches(bucket, &objects, max_diff),
                NearestRecordStrategy.count_matches(again, &objects, max_diff)
            );
        }
    }
}
