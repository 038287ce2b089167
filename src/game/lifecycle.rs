use log::{debug, trace};
use rand::rngs::StdRng;

use crate::events::EventEmitter;
use crate::model::{GameIntent, GameTimer, MiniGameEvent, TimerId, TimerState, TimerTag};
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub won: bool,
    pub score: u32,
    pub elapsed_ms: u64,
}

/// Idle → Running → Ended, with the one-shot termination guard and the set
/// of timers that must die with the session.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: LifecycleState,
    timer_state: TimerState,
    outcome: Option<Outcome>,
    timers: Vec<TimerId>,
}

impl Lifecycle {
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.state != LifecycleState::Idle {
            return false;
        }
        self.state = LifecycleState::Running;
        self.timer_state = TimerState::started(now_ms);
        true
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn started_ms(&self) -> Option<u64> {
        self.timer_state.started_ms
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.timer_state.elapsed(now_ms).as_millis() as u64
    }

    pub fn owns(&self, id: TimerId) -> bool {
        self.timers.contains(&id)
    }

    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    fn track(&mut self, id: TimerId) {
        self.timers.push(id);
    }

    pub(crate) fn release(&mut self, id: TimerId) {
        self.timers.retain(|t| *t != id);
    }

    /// Cancels every timer this session started.
    pub fn cancel_all(&mut self, scheduler: &mut dyn Scheduler) {
        for id in self.timers.drain(..) {
            scheduler.cancel(id);
        }
    }

    /// First call wins; later calls are swallowed and return false.
    pub fn terminate(
        &mut self,
        won: bool,
        score: u32,
        scheduler: &mut dyn Scheduler,
    ) -> bool {
        if self.state != LifecycleState::Running {
            debug!(
                target: "game",
                "Ignoring termination ({}, {}) in state {:?}", won, score, self.state
            );
            return false;
        }
        self.cancel_all(scheduler);
        let now_ms = scheduler.now_ms();
        self.timer_state = self.timer_state.ended(now_ms);
        self.state = LifecycleState::Ended;
        self.outcome = Some(Outcome {
            won,
            score,
            elapsed_ms: self.elapsed_ms(now_ms),
        });
        true
    }

    /// Ends without an outcome, e.g. when the modal is closed mid-game.
    pub fn abandon(&mut self, scheduler: &mut dyn Scheduler) {
        self.cancel_all(scheduler);
        if self.state == LifecycleState::Running {
            self.timer_state = self.timer_state.ended(scheduler.now_ms());
        }
        self.state = LifecycleState::Ended;
    }
}

/// What a mini-game may touch while handling a tick or an input.
pub struct GameContext<'a> {
    scheduler: &'a mut dyn Scheduler,
    rng: &'a mut StdRng,
    lifecycle: &'a mut Lifecycle,
    emitter: &'a EventEmitter<MiniGameEvent>,
}

impl<'a> GameContext<'a> {
    pub fn new(
        scheduler: &'a mut dyn Scheduler,
        rng: &'a mut StdRng,
        lifecycle: &'a mut Lifecycle,
        emitter: &'a EventEmitter<MiniGameEvent>,
    ) -> Self {
        Self {
            scheduler,
            rng,
            lifecycle,
            emitter,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Milliseconds since the session started.
    pub fn elapsed_ms(&self) -> u64 {
        self.lifecycle.elapsed_ms(self.scheduler.now_ms())
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut *self.rng
    }

    pub fn set_timeout(&mut self, delay_ms: u64, timer: GameTimer) -> TimerId {
        let id = self.scheduler.set_timeout(delay_ms, TimerTag::Game(timer));
        self.lifecycle.track(id);
        id
    }

    pub fn set_interval(&mut self, period_ms: u64, timer: GameTimer) -> TimerId {
        let id = self.scheduler.set_interval(period_ms, TimerTag::Game(timer));
        self.lifecycle.track(id);
        id
    }

    pub fn cancel(&mut self, id: TimerId) {
        self.scheduler.cancel(id);
        self.lifecycle.release(id);
    }

    pub fn emit(&self, intent: GameIntent) {
        trace!(target: "game", "Intent: {:?}", intent);
        self.emitter.emit(MiniGameEvent::Intent(intent));
    }

    pub fn terminate(&mut self, won: bool, score: u32) -> bool {
        self.lifecycle.terminate(won, score, &mut *self.scheduler)
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Channel;
    use crate::scheduler::VirtualClock;
    use rand::SeedableRng;

    #[test]
    fn test_only_first_termination_counts() {
        let mut clock = VirtualClock::starting_at(0);
        let mut lifecycle = Lifecycle::default();
        assert!(lifecycle.start(0));
        clock.advance_clock(1_200);

        assert!(lifecycle.terminate(true, 90, &mut clock));
        clock.advance_clock(5_000);
        assert!(!lifecycle.terminate(false, 0, &mut clock));

        assert_eq!(
            lifecycle.outcome(),
            Some(Outcome {
                won: true,
                score: 90,
                elapsed_ms: 1_200
            })
        );
        assert_eq!(lifecycle.state(), LifecycleState::Ended);
    }

    #[test]
    fn test_cannot_terminate_before_start() {
        let mut clock = VirtualClock::starting_at(0);
        let mut lifecycle = Lifecycle::default();
        assert!(!lifecycle.terminate(true, 10, &mut clock));
        assert_eq!(lifecycle.outcome(), None);
    }

    #[test]
    fn test_termination_cancels_session_timers() {
        let mut clock = VirtualClock::starting_at(0);
        let mut rng = StdRng::seed_from_u64(1);
        let (emitter, _observer) = Channel::new();
        let mut lifecycle = Lifecycle::default();
        lifecycle.start(0);

        let mut ctx = GameContext::new(&mut clock, &mut rng, &mut lifecycle, &emitter);
        ctx.set_interval(1_000, GameTimer::Countdown);
        ctx.set_timeout(15_000, GameTimer::Deadline);
        assert!(ctx.terminate(false, 0));

        assert_eq!(lifecycle.live_timers(), 0);
        assert_eq!(clock.pending(), 0);
    }
}
