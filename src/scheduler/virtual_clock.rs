use chrono::Utc;
use itertools::Itertools;
use log::trace;

use super::Scheduler;
use crate::model::{FiredTimer, TimerId, TimerTag};

#[derive(Debug, Clone)]
struct PendingTimer {
    id: TimerId,
    tag: TimerTag,
    due_ms: u64,
    period_ms: Option<u64>,
    // insertion order breaks ties between timers due at the same instant
    seq: u64,
}

/// Scheduler driven by explicit clock advances. Hosts feed it elapsed wall
/// time; tests feed it exact milliseconds.
#[derive(Debug)]
pub struct VirtualClock {
    now_ms: u64,
    epoch_base_ms: i64,
    next_id: u64,
    next_seq: u64,
    timers: Vec<PendingTimer>,
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::starting_at(Utc::now().timestamp_millis())
    }
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(epoch_base_ms: i64) -> Self {
        Self {
            now_ms: 0,
            epoch_base_ms,
            next_id: 1,
            next_seq: 0,
            timers: Vec::new(),
        }
    }

    fn push(&mut self, delay_ms: u64, period_ms: Option<u64>, tag: TimerTag) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(target: "scheduler", "Scheduling {:?} {:?} in {}ms", id, tag, delay_ms);
        self.timers.push(PendingTimer {
            id,
            tag,
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
            seq,
        });
        id
    }
}

impl Scheduler for VirtualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn epoch_ms(&self) -> i64 {
        self.epoch_base_ms.saturating_add(i64::try_from(self.now_ms).unwrap_or(i64::MAX))
    }

    fn set_timeout(&mut self, delay_ms: u64, tag: TimerTag) -> TimerId {
        self.push(delay_ms, None, tag)
    }

    fn set_interval(&mut self, period_ms: u64, tag: TimerTag) -> TimerId {
        // a zero period would re-fire forever at the same instant
        let period_ms = period_ms.max(1);
        self.push(period_ms, Some(period_ms), tag)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        let cancelled = self.timers.len() != before;
        if cancelled {
            trace!(target: "scheduler", "Cancelled {:?}", id);
        }
        cancelled
    }

    fn next_due(&mut self, until_ms: u64) -> Option<FiredTimer> {
        let index = self
            .timers
            .iter()
            .position_min_by_key(|t| (t.due_ms, t.seq))?;
        if self.timers[index].due_ms > until_ms {
            return None;
        }

        let due_ms = self.timers[index].due_ms;
        self.now_ms = self.now_ms.max(due_ms);
        let fired = match self.timers[index].period_ms {
            Some(period_ms) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let timer = &mut self.timers[index];
                timer.due_ms = timer.due_ms.saturating_add(period_ms);
                timer.seq = seq;
                FiredTimer {
                    id: timer.id,
                    tag: timer.tag,
                    at_ms: due_ms,
                    repeating: true,
                }
            }
            None => {
                let timer = self.timers.swap_remove(index);
                FiredTimer {
                    id: timer.id,
                    tag: timer.tag,
                    at_ms: due_ms,
                    repeating: false,
                }
            }
        };
        Some(fired)
    }

    fn advance_clock(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }
}
