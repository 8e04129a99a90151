//! # notary-temporal
//!
//! Point-in-time replay for commitment datasets. A [`PitClock`] holds the
//! virtual-time cursor; [`Dataset`] reads filter through it, yielding the
//! record set as it was knowable at the cursor time; [`run_pit_sim`]
//! drives a callback across an ascending timestamp sequence with the clock
//! engaged at each step and guaranteed released on every exit path.
//!
//! The clock is the only mutable session state in the workspace. A dataset
//! is an ordered, append-only record list: later records never remove
//! earlier ones, so "current membership as of `t`" is always a prefix.

pub mod clock;
pub mod dataset;
pub mod simulation;

pub use clock::PitClock;
pub use dataset::{Dataset, DatasetRecord, DatasetSnapshot};
pub use simulation::run_pit_sim;
