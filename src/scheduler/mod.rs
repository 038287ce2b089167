mod virtual_clock;

pub use virtual_clock::VirtualClock;

use crate::model::{FiredTimer, TimerId, TimerTag};

/// Single-fire and repeating timers with cancellable handles.
///
/// Nothing fires on its own: the owner pulls due timers with
/// [`Scheduler::next_due`] and dispatches them one at a time, which keeps
/// callbacks non-preemptive.
pub trait Scheduler {
    /// Milliseconds since the scheduler was created.
    fn now_ms(&self) -> u64;

    /// Wall-clock epoch milliseconds corresponding to `now_ms`.
    fn epoch_ms(&self) -> i64;

    fn set_timeout(&mut self, delay_ms: u64, tag: TimerTag) -> TimerId;

    fn set_interval(&mut self, period_ms: u64, tag: TimerTag) -> TimerId;

    /// Returns false if the timer already fired (one-shot) or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Pops the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time. Intervals are re-armed before being returned.
    fn next_due(&mut self, until_ms: u64) -> Option<FiredTimer>;

    /// Moves the clock forward without firing anything.
    fn advance_clock(&mut self, until_ms: u64);

    fn pending(&self) -> usize;
}
