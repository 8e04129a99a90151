//! Point-in-time simulation driver.

use chrono::{DateTime, Utc};

use notary_core::errors::{NotaryResult, SimulationError};

use crate::clock::PitClock;

/// Run `body` once per timestamp, ascending, each invocation seeing world
/// state as of that timestamp through `clock`.
///
/// Results are returned in timestamp order. The clock is restored to live
/// mode on every exit path: a `body` failure at one `t` propagates as
/// [`SimulationError::StepFailed`] with that `t` attached, after the clock
/// has already been released; one bad step never leaves unrelated reads
/// in simulated mode.
pub fn run_pit_sim<T, F>(
    clock: &PitClock,
    times: &[DateTime<Utc>],
    mut body: F,
) -> NotaryResult<Vec<T>>
where
    F: FnMut() -> NotaryResult<T>,
{
    if times.is_empty() {
        return Err(SimulationError::InvalidInput {
            reason: "empty timestamp sequence".to_string(),
        }
        .into());
    }
    if times.windows(2).any(|w| w[0] > w[1]) {
        return Err(SimulationError::InvalidInput {
            reason: "timestamps must be ascending".to_string(),
        }
        .into());
    }

    let guard = clock.engage_guard(times[0])?;
    let mut results = Vec::with_capacity(times.len());
    for &t in times {
        clock.advance(t);
        tracing::debug!(%t, "pit simulation step");
        match body() {
            Ok(value) => results.push(value),
            Err(source) => {
                // Live mode first, then the failure.
                drop(guard);
                return Err(SimulationError::StepFailed {
                    at: t,
                    source: Box::new(source),
                }
                .into());
            }
        }
    }
    drop(guard);
    Ok(results)
}
