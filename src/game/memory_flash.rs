use log::debug;
use rand::Rng;

use super::lifecycle::GameContext;
use super::MiniGame;
use crate::model::{GameId, GameInput, GameIntent, GameTimer, TimerId};

pub const SLOT_COUNT: usize = 9;

const STARTING_LENGTH: usize = 2;
const STEP_MS: u64 = 700;
const SETTLE_MS: u64 = 500;
const NEXT_ROUND_MS: u64 = 1_500;
const MAX_LEVEL: u32 = 5;
const POINTS_PER_LEVEL: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// `step` is the index of the next slot to highlight.
    Playback { step: usize },
    Settling,
    Input,
    BetweenRounds,
}

#[derive(Debug)]
pub struct MemoryFlash {
    sequence: Vec<usize>,
    entered: Vec<usize>,
    level: u32,
    phase: Phase,
    playback_timer: Option<TimerId>,
}

impl Default for MemoryFlash {
    fn default() -> Self {
        Self {
            sequence: Vec::new(),
            entered: Vec::new(),
            level: 1,
            phase: Phase::Settling,
            playback_timer: None,
        }
    }
}

impl MemoryFlash {
    /// Starts from a known level-1 sequence instead of a random one.
    pub fn with_sequence(sequence: Vec<usize>) -> Self {
        Self {
            sequence,
            ..Default::default()
        }
    }

    fn play_sequence(&mut self, ctx: &mut GameContext) {
        self.phase = Phase::Playback { step: 0 };
        self.entered.clear();
        ctx.emit(GameIntent::InputEnabled(false));
        ctx.emit(GameIntent::SequencePlayback);
        self.playback_timer = Some(ctx.set_interval(STEP_MS, GameTimer::PlaybackStep));
    }

    fn playback_step(&mut self, ctx: &mut GameContext) {
        let Phase::Playback { step } = self.phase else {
            return;
        };
        if step > 0 {
            ctx.emit(GameIntent::SlotCleared(self.sequence[step - 1]));
        }
        if step < self.sequence.len() {
            ctx.emit(GameIntent::SlotHighlighted(self.sequence[step]));
            self.phase = Phase::Playback { step: step + 1 };
            return;
        }
        if let Some(timer) = self.playback_timer.take() {
            ctx.cancel(timer);
        }
        self.phase = Phase::Settling;
        ctx.set_timeout(SETTLE_MS, GameTimer::PlaybackSettled);
    }

    fn press(&mut self, slot: usize, ctx: &mut GameContext) {
        if self.phase != Phase::Input || slot >= SLOT_COUNT {
            return;
        }
        self.entered.push(slot);
        if self.entered.len() == self.sequence.len() {
            self.check(ctx);
        }
    }

    fn check(&mut self, ctx: &mut GameContext) {
        if self.entered != self.sequence {
            debug!(
                target: "game",
                "Memory flash mismatch at level {}: {:?} vs {:?}", self.level, self.entered, self.sequence
            );
            ctx.emit(GameIntent::SequenceRejected);
            ctx.terminate(false, (self.level - 1) * POINTS_PER_LEVEL);
            return;
        }

        self.level += 1;
        ctx.emit(GameIntent::SequenceAccepted { level: self.level });
        if self.level > MAX_LEVEL {
            ctx.terminate(true, self.level * POINTS_PER_LEVEL);
            return;
        }
        let slot = ctx.rng().random_range(0..SLOT_COUNT);
        self.sequence.push(slot);
        self.phase = Phase::BetweenRounds;
        ctx.emit(GameIntent::InputEnabled(false));
        ctx.set_timeout(NEXT_ROUND_MS, GameTimer::NextRound);
    }
}

impl MiniGame for MemoryFlash {
    fn id(&self) -> GameId {
        GameId::MemoryFlash
    }

    fn start(&mut self, ctx: &mut GameContext) {
        if self.sequence.is_empty() {
            for _ in 0..STARTING_LENGTH {
                let slot = ctx.rng().random_range(0..SLOT_COUNT);
                self.sequence.push(slot);
            }
        }
        self.play_sequence(ctx);
    }

    fn on_timer(&mut self, timer: GameTimer, ctx: &mut GameContext) {
        match timer {
            GameTimer::PlaybackStep => self.playback_step(ctx),
            GameTimer::PlaybackSettled => {
                self.phase = Phase::Input;
                self.entered.clear();
                ctx.emit(GameIntent::InputEnabled(true));
            }
            GameTimer::NextRound => self.play_sequence(ctx),
            _ => (),
        }
    }

    fn on_input(&mut self, input: GameInput, ctx: &mut GameContext) {
        if let GameInput::PressSlot(slot) = input {
            self.press(slot, ctx);
        }
    }
}
