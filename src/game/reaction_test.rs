use log::debug;
use rand::Rng;

use super::lifecycle::GameContext;
use super::MiniGame;
use crate::model::{GameId, GameInput, GameIntent, GameTimer, TimerId};

pub const ROUNDS: u32 = 3;
const MIN_DELAY_MS: u64 = 2_000;
const MAX_DELAY_MS: u64 = 5_000;
const WIN_AVERAGE_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ready,
    Waiting,
    Go { shown_ms: u64 },
    Complete,
}

/// Average rounded half up, as shown to the player.
pub fn average_ms(total_ms: u64, rounds: u32) -> u64 {
    if rounds == 0 {
        return 0;
    }
    let rounds = u64::from(rounds);
    (2 * total_ms + rounds) / (2 * rounds)
}

pub fn score_for(average_ms: u64) -> u32 {
    100u64.saturating_sub(average_ms / 5) as u32
}

#[derive(Debug)]
pub struct ReactionTest {
    round: u32,
    total_ms: u64,
    phase: Phase,
    go_timer: Option<TimerId>,
}

impl Default for ReactionTest {
    fn default() -> Self {
        Self {
            round: 0,
            total_ms: 0,
            phase: Phase::Ready,
            go_timer: None,
        }
    }
}

impl ReactionTest {
    fn begin_round(&mut self, ctx: &mut GameContext) {
        self.round += 1;
        self.phase = Phase::Waiting;
        let delay = ctx.rng().random_range(MIN_DELAY_MS..MAX_DELAY_MS);
        self.go_timer = Some(ctx.set_timeout(delay, GameTimer::GoSignal));
        ctx.emit(GameIntent::ReactionWaiting { round: self.round });
    }

    fn false_start(&mut self, ctx: &mut GameContext) {
        if let Some(timer) = self.go_timer.take() {
            ctx.cancel(timer);
        }
        // the round is retried; never let the counter underflow
        self.round = self.round.saturating_sub(1);
        self.phase = Phase::Ready;
        debug!(target: "game", "False start, back to round {}", self.round + 1);
        ctx.emit(GameIntent::FalseStart);
    }

    fn record(&mut self, shown_ms: u64, ctx: &mut GameContext) {
        let reaction_ms = ctx.now_ms().saturating_sub(shown_ms);
        self.total_ms += reaction_ms;
        let average = average_ms(self.total_ms, self.round);
        ctx.emit(GameIntent::ReactionRecorded {
            reaction_ms,
            average_ms: average,
            round: self.round,
        });

        if self.round >= ROUNDS {
            self.phase = Phase::Complete;
            ctx.terminate(average < WIN_AVERAGE_MS, score_for(average));
        } else {
            self.phase = Phase::Ready;
        }
    }
}

impl MiniGame for ReactionTest {
    fn id(&self) -> GameId {
        GameId::ReactionTest
    }

    fn start(&mut self, _ctx: &mut GameContext) {}

    fn on_timer(&mut self, timer: GameTimer, ctx: &mut GameContext) {
        if timer == GameTimer::GoSignal && self.phase == Phase::Waiting {
            self.go_timer = None;
            self.phase = Phase::Go {
                shown_ms: ctx.now_ms(),
            };
            ctx.emit(GameIntent::ReactionGo);
        }
    }

    fn on_input(&mut self, input: GameInput, ctx: &mut GameContext) {
        if input != GameInput::Tap {
            return;
        }
        match self.phase {
            Phase::Ready if self.round < ROUNDS => self.begin_round(ctx),
            Phase::Waiting => self.false_start(ctx),
            Phase::Go { shown_ms } => self.record(shown_ms, ctx),
            Phase::Ready | Phase::Complete => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tests::Harness;

    fn wait_for_go(harness: &mut Harness) {
        assert!(harness.advance_until(MAX_DELAY_MS, |i| *i == GameIntent::ReactionGo));
    }

    fn rounds_started(harness: &Harness) -> Vec<u32> {
        harness
            .intents()
            .iter()
            .filter_map(|i| match i {
                GameIntent::ReactionWaiting { round } => Some(*round),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_average_and_score() {
        assert_eq!(average_ms(1_000, 3), 333);
        assert_eq!(average_ms(1_001, 2), 501);
        assert_eq!(average_ms(1_000, 0), 0);
        assert_eq!(score_for(250), 50);
        assert_eq!(score_for(700), 0);
    }

    #[test]
    fn test_three_quick_rounds_win() {
        let mut harness = Harness::new(Box::new(ReactionTest::default()), 12);
        harness.start();
        for reaction in [200, 250, 300] {
            harness.input(GameInput::Tap);
            wait_for_go(&mut harness);
            harness.advance(reaction);
            harness.input(GameInput::Tap);
        }
        let outcome = harness.outcome().unwrap();
        assert!(outcome.won);
        assert_eq!(outcome.score, 50);
        assert_eq!(rounds_started(&harness), vec![1, 2, 3]);
    }

    #[test]
    fn test_slow_average_loses() {
        let mut harness = Harness::new(Box::new(ReactionTest::default()), 12);
        harness.start();
        for reaction in [400, 600, 550] {
            harness.input(GameInput::Tap);
            wait_for_go(&mut harness);
            harness.advance(reaction);
            harness.input(GameInput::Tap);
        }
        let outcome = harness.outcome().unwrap();
        assert!(!outcome.won);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_false_start_retries_round_without_recording() {
        let mut harness = Harness::new(Box::new(ReactionTest::default()), 6);
        harness.start();
        harness.input(GameInput::Tap);
        harness.advance(1_000);
        harness.input(GameInput::Tap);

        assert!(harness.intents().contains(&GameIntent::FalseStart));
        assert!(harness
            .intents()
            .iter()
            .all(|i| !matches!(i, GameIntent::ReactionRecorded { .. })));
        // the pending go signal was cancelled
        assert_eq!(harness.clock_pending(), 0);
        harness.advance(MAX_DELAY_MS);
        assert!(!harness.intents().contains(&GameIntent::ReactionGo));

        harness.input(GameInput::Tap);
        assert_eq!(rounds_started(&harness), vec![1, 1]);
        assert_eq!(harness.outcome(), None);
    }
}
