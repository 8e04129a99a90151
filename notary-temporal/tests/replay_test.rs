//! Point-in-time replay and simulation tests.

use std::sync::Arc;

use notary_core::errors::{NotaryError, SimulationError};
use notary_core::models::{Address, Cid};
use notary_index::MemoryBackend;
use notary_temporal::{run_pit_sim, Dataset, PitClock};
use test_fixtures::{record, ts};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Dataset with records at t=100, 200, 300 sharing the given clock.
fn three_record_dataset(clock: Arc<PitClock>) -> Dataset {
    let mut ds = Dataset::named(Address::new("0xa1ce"), "daily-closes", clock);
    ds.append(Cid::new("obj-a"), ts(100));
    ds.append(Cid::new("obj-b"), ts(200));
    ds.append(Cid::new("obj-c"), ts(300));
    ds
}

// ---------------------------------------------------------------------------
// Clock-filtered reads
// ---------------------------------------------------------------------------

#[test]
fn engaged_clock_yields_the_prefix_as_of_t() {
    let clock = Arc::new(PitClock::new());
    let ds = three_record_dataset(clock.clone());

    clock.engage(ts(250)).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.last_record().unwrap().timestamp, ts(200));
    assert_eq!(ds.timestamps(), vec![ts(100), ts(200)]);
}

#[test]
fn boundary_timestamp_is_visible() {
    let clock = Arc::new(PitClock::new());
    let ds = three_record_dataset(clock.clone());

    clock.engage(ts(200)).unwrap();
    assert_eq!(ds.last_record().unwrap().timestamp, ts(200));
}

#[test]
fn before_the_first_record_reads_as_absence() {
    let clock = Arc::new(PitClock::new());
    let ds = three_record_dataset(clock.clone());

    clock.engage(ts(50)).unwrap();
    assert!(ds.last_record().is_none());
    assert!(ds.records().is_empty());
    assert!(ds.timestamps().is_empty());
}

#[test]
fn disengaging_restores_live_reads_exactly() {
    let clock = Arc::new(PitClock::new());
    let ds = three_record_dataset(clock.clone());

    clock.engage(ts(150)).unwrap();
    assert_eq!(ds.len(), 1);
    clock.disengage();

    assert_eq!(ds.len(), 3);
    assert_eq!(ds.last_record().unwrap().timestamp, ts(300));
}

#[test]
fn out_of_order_appends_still_read_in_timestamp_order() {
    let clock = Arc::new(PitClock::new());
    let mut ds = Dataset::named(Address::new("0xa1ce"), "backfilled", clock);
    ds.append(Cid::new("obj-b"), ts(200));
    ds.append(Cid::new("obj-a"), ts(100));

    assert_eq!(ds.timestamps(), vec![ts(100), ts(200)]);
}

#[tokio::test]
async fn loaded_dataset_replays_through_the_clock() {
    let backend = MemoryBackend::new("rpc-a");
    let set = Cid::for_set_name("daily-closes");
    backend.insert(record("0xa1ce", "obj-a", Some(set.as_str()), ts(100)));
    backend.insert(record("0xa1ce", "obj-b", Some(set.as_str()), ts(300)));
    // Another owner's set does not leak in.
    backend.insert(record("0xb0b0", "obj-z", Some(set.as_str()), ts(100)));

    let clock = Arc::new(PitClock::new());
    let ds = Dataset::load(&backend, Address::new("0xa1ce"), set, clock.clone())
        .await
        .unwrap();
    assert_eq!(ds.len(), 2);

    clock.engage(ts(200)).unwrap();
    assert_eq!(ds.last_record().unwrap().object_cid, Cid::new("obj-a"));
}

#[test]
fn snapshot_round_trips_through_json() {
    let clock = Arc::new(PitClock::new());
    let ds = three_record_dataset(clock.clone());

    let json = ds.to_json().unwrap();
    let restored = Dataset::from_json(&json, clock).unwrap();
    assert_eq!(restored.snapshot(), ds.snapshot());
}

// ---------------------------------------------------------------------------
// Simulation driver
// ---------------------------------------------------------------------------

#[test]
fn simulation_sees_state_as_of_each_t() {
    let clock = Arc::new(PitClock::new());
    let ds = three_record_dataset(clock.clone());

    let latest = run_pit_sim(&clock, &[ts(50), ts(150), ts(250), ts(350)], || {
        Ok(ds.last_record().map(|r| r.timestamp))
    })
    .unwrap();

    assert_eq!(latest, vec![None, Some(ts(100)), Some(ts(200)), Some(ts(300))]);
    assert!(clock.current().is_none());
}

#[test]
fn failing_step_restores_the_clock_before_propagating() {
    let clock = Arc::new(PitClock::new());
    let ds = three_record_dataset(clock.clone());
    let times = [ts(10), ts(20), ts(30), ts(40), ts(50)];

    let mut steps = 0;
    let err = run_pit_sim(&clock, &times, || {
        steps += 1;
        if steps == 3 {
            return Err(NotaryError::Simulation(SimulationError::InvalidInput {
                reason: "synthetic step failure".to_string(),
            }));
        }
        Ok(())
    })
    .unwrap_err();

    match err {
        NotaryError::Simulation(SimulationError::StepFailed { at, .. }) => {
            assert_eq!(at, ts(30));
        }
        other => panic!("expected step failure, got {other}"),
    }
    assert_eq!(steps, 3);
    // Live mode again: unrelated reads are not stuck in the simulation.
    assert!(clock.current().is_none());
    assert_eq!(ds.len(), 3);
}

#[test]
fn empty_or_unordered_times_are_caller_errors() {
    let clock = PitClock::new();

    let err = run_pit_sim(&clock, &[], || Ok(())).unwrap_err();
    assert!(matches!(
        err,
        NotaryError::Simulation(SimulationError::InvalidInput { .. })
    ));

    let err = run_pit_sim(&clock, &[ts(200), ts(100)], || Ok(())).unwrap_err();
    assert!(matches!(
        err,
        NotaryError::Simulation(SimulationError::InvalidInput { .. })
    ));
    assert!(clock.current().is_none());
}

#[test]
fn concurrent_engagement_is_refused() {
    let clock = PitClock::new();
    clock.engage(ts(100)).unwrap();

    let err = clock.engage(ts(200)).unwrap_err();
    assert!(matches!(
        err,
        NotaryError::Simulation(SimulationError::ClockBusy)
    ));

    // A simulation run cannot steal an engaged clock either.
    let err = run_pit_sim(&clock, &[ts(300)], || Ok(())).unwrap_err();
    assert!(matches!(
        err,
        NotaryError::Simulation(SimulationError::ClockBusy)
    ));
    // The refused run did not disturb the existing engagement.
    assert_eq!(clock.current(), Some(ts(100)));
}
