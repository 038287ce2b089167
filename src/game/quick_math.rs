use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::lifecycle::GameContext;
use super::MiniGame;
use crate::model::{GameId, GameInput, GameIntent, GameTimer, MathOperation, TimerId};

const OPTION_COUNT: usize = 4;
const COUNTDOWN_PERIOD_MS: u64 = 1_000;
const URGENT_SECONDS: u64 = 3;
const MIN_SCORE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathProblem {
    pub a: i32,
    pub operation: MathOperation,
    pub b: i32,
    pub options: Vec<i32>,
}

impl MathProblem {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let operation = match rng.random_range(0..3) {
            0 => MathOperation::Add,
            1 => MathOperation::Subtract,
            _ => MathOperation::Multiply,
        };
        // ranges keep answers positive and small enough to read at a glance
        let (a, b) = match operation {
            MathOperation::Add => (rng.random_range(10..60), rng.random_range(10..60)),
            MathOperation::Subtract => (rng.random_range(30..80), rng.random_range(10..40)),
            MathOperation::Multiply => (rng.random_range(2..14), rng.random_range(2..14)),
        };
        Self::with_operands(a, operation, b, rng)
    }

    pub fn with_operands<R: Rng + ?Sized>(
        a: i32,
        operation: MathOperation,
        b: i32,
        rng: &mut R,
    ) -> Self {
        let options = answer_options(operation.apply(a, b), rng);
        Self {
            a,
            operation,
            b,
            options,
        }
    }

    pub fn answer(&self) -> i32 {
        self.operation.apply(self.a, self.b)
    }
}

/// The correct answer plus three distinct positive distractors within ten of
/// it, shuffled.
pub fn answer_options<R: Rng + ?Sized>(correct: i32, rng: &mut R) -> Vec<i32> {
    let mut options = vec![correct];
    while options.len() < OPTION_COUNT {
        let wrong = correct + rng.random_range(-10..10);
        if wrong > 0 && !options.contains(&wrong) {
            options.push(wrong);
        }
    }
    options.shuffle(rng);
    options
}

/// Faster answers score more: one point lost per 100ms, never below 10.
pub fn score_for(elapsed_ms: u64) -> u32 {
    (100 - (elapsed_ms / 100) as i64).max(MIN_SCORE) as u32
}

#[derive(Debug, Default)]
pub struct QuickMath {
    problem: Option<MathProblem>,
    seconds_left: u64,
    countdown: Option<TimerId>,
}

impl QuickMath {
    pub fn with_problem(problem: MathProblem) -> Self {
        Self {
            problem: Some(problem),
            ..Default::default()
        }
    }

    pub fn problem(&self) -> Option<&MathProblem> {
        self.problem.as_ref()
    }
}

impl MiniGame for QuickMath {
    fn id(&self) -> GameId {
        GameId::QuickMath
    }

    fn start(&mut self, ctx: &mut GameContext) {
        let problem = match self.problem.take() {
            Some(problem) => problem,
            None => MathProblem::generate(ctx.rng()),
        };
        self.seconds_left = self.id().definition().duration_ms / 1_000;

        ctx.emit(GameIntent::MathProblem {
            a: problem.a,
            operation: problem.operation,
            b: problem.b,
            options: problem.options.clone(),
        });
        ctx.emit(GameIntent::Countdown {
            seconds_left: self.seconds_left,
            urgent: self.seconds_left <= URGENT_SECONDS,
        });
        self.problem = Some(problem);
        self.countdown = Some(ctx.set_interval(COUNTDOWN_PERIOD_MS, GameTimer::Countdown));
    }

    fn on_timer(&mut self, timer: GameTimer, ctx: &mut GameContext) {
        if timer != GameTimer::Countdown {
            return;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        ctx.emit(GameIntent::Countdown {
            seconds_left: self.seconds_left,
            urgent: self.seconds_left <= URGENT_SECONDS,
        });
        if self.seconds_left == 0 {
            debug!(target: "game", "Quick math timed out");
            ctx.terminate(false, 0);
        }
    }

    fn on_input(&mut self, input: GameInput, ctx: &mut GameContext) {
        let GameInput::SelectAnswer(selected) = input else {
            return;
        };
        let Some(problem) = &self.problem else {
            return;
        };
        if let Some(countdown) = self.countdown.take() {
            ctx.cancel(countdown);
        }
        let correct = selected == problem.answer();
        let score = if correct {
            score_for(ctx.elapsed_ms())
        } else {
            0
        };
        ctx.terminate(correct, score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tests::Harness;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_options_contain_answer_once_and_are_distinct_positive() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let problem = MathProblem::generate(&mut rng);
            let answer = problem.answer();
            assert_eq!(problem.options.len(), 4);
            assert_eq!(problem.options.iter().filter(|o| **o == answer).count(), 1);
            assert!(problem.options.iter().all(|o| *o > 0));
            let mut sorted = problem.options.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), 4, "duplicate options in {:?}", problem);
            assert!(problem.options.iter().all(|o| (o - answer).abs() <= 10));
        }
    }

    #[test]
    fn test_operand_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2_000 {
            let p = MathProblem::generate(&mut rng);
            match p.operation {
                MathOperation::Add => {
                    assert!((10..60).contains(&p.a) && (10..60).contains(&p.b))
                }
                MathOperation::Subtract => {
                    assert!((30..80).contains(&p.a) && (10..40).contains(&p.b));
                    assert!(p.answer() > 0);
                }
                MathOperation::Multiply => {
                    assert!((2..14).contains(&p.a) && (2..14).contains(&p.b))
                }
            }
        }
    }

    #[test]
    fn test_score_curve() {
        assert_eq!(score_for(0), 100);
        assert_eq!(score_for(1_000), 90);
        assert_eq!(score_for(1_099), 90);
        assert_eq!(score_for(9_000), 10);
        assert_eq!(score_for(60_000), 10);
    }

    fn fixed_problem() -> MathProblem {
        let mut rng = StdRng::seed_from_u64(3);
        MathProblem::with_operands(23, MathOperation::Add, 14, &mut rng)
    }

    #[test]
    fn test_correct_answer_within_a_second() {
        let mut harness = Harness::new(Box::new(QuickMath::with_problem(fixed_problem())), 1);
        harness.start();
        harness.advance(1_000);
        harness.input(GameInput::SelectAnswer(37));

        let outcome = harness.outcome().unwrap();
        assert!(outcome.won);
        assert_eq!(outcome.score, 90);
        assert_eq!(outcome.elapsed_ms, 1_000);
        assert_eq!(harness.clock_pending(), 0);
    }

    #[test]
    fn test_wrong_answer_scores_zero() {
        let problem = fixed_problem();
        let wrong = *problem.options.iter().find(|o| **o != 37).unwrap();
        let mut harness = Harness::new(Box::new(QuickMath::with_problem(problem)), 1);
        harness.start();
        harness.advance(400);
        harness.input(GameInput::SelectAnswer(wrong));

        let outcome = harness.outcome().unwrap();
        assert!(!outcome.won);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_countdown_runs_out() {
        let mut harness = Harness::new(Box::new(QuickMath::with_problem(fixed_problem())), 1);
        harness.start();
        harness.advance(9_999);
        assert_eq!(harness.outcome(), None);

        let intents = harness.take_intents();
        let urgent: Vec<u64> = intents
            .iter()
            .filter_map(|i| match i {
                GameIntent::Countdown {
                    seconds_left,
                    urgent: true,
                } => Some(*seconds_left),
                _ => None,
            })
            .collect();
        assert_eq!(urgent, vec![3, 2, 1]);

        harness.advance(1);
        let outcome = harness.outcome().unwrap();
        assert!(!outcome.won);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.elapsed_ms, 10_000);

        // a late click changes nothing
        harness.input(GameInput::SelectAnswer(37));
        assert!(!harness.outcome().unwrap().won);
    }
}
