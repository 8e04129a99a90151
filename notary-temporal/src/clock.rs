//! PitClock — the virtual-time cursor for dataset reads.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use notary_core::errors::{NotaryResult, SimulationError};

/// Virtual-time cursor. `None` is live mode; `Some(t)` reinterprets every
/// dataset read against `t` instead of the present.
///
/// One simulation run owns the clock for its duration: engaging an
/// already-engaged clock is refused with `ClockBusy`. Callers needing
/// concurrent what-if queries use independent clock instances.
#[derive(Debug, Default)]
pub struct PitClock {
    state: Mutex<Option<DateTime<Utc>>>,
}

impl PitClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter simulation mode at `t`.
    pub fn engage(&self, t: DateTime<Utc>) -> NotaryResult<()> {
        let mut state = self.lock();
        if state.is_some() {
            return Err(SimulationError::ClockBusy.into());
        }
        *state = Some(t);
        Ok(())
    }

    /// Return to live mode. Idempotent.
    pub fn disengage(&self) {
        *self.lock() = None;
    }

    /// The virtual time, if engaged.
    pub fn current(&self) -> Option<DateTime<Utc>> {
        *self.lock()
    }

    pub fn is_engaged(&self) -> bool {
        self.current().is_some()
    }

    /// Move the cursor of an engagement this caller owns. Only the
    /// simulation driver uses this, between steps of one run.
    pub(crate) fn advance(&self, t: DateTime<Utc>) {
        *self.lock() = Some(t);
    }

    /// Engage with an RAII handle that restores live mode when dropped,
    /// whichever way the scope exits.
    pub(crate) fn engage_guard(&self, t: DateTime<Utc>) -> NotaryResult<Engagement<'_>> {
        self.engage(t)?;
        Ok(Engagement { clock: self })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<DateTime<Utc>>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// RAII clock engagement held by a simulation run.
pub(crate) struct Engagement<'a> {
    clock: &'a PitClock,
}

impl Drop for Engagement<'_> {
    fn drop(&mut self) {
        self.clock.disengage();
    }
}
