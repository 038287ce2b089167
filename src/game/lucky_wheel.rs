use log::debug;
use rand::Rng;

use super::lifecycle::GameContext;
use super::MiniGame;
use crate::model::{GameId, GameInput, GameIntent, GameTimer, WheelLabel, WheelSegment};

const fn segment(label: WheelLabel, value: u32) -> WheelSegment {
    WheelSegment { label, value }
}

/// Clockwise from the pointer: 3 WIN, 4 LOSE, 1 MEGA.
pub const SEGMENTS: [WheelSegment; 8] = [
    segment(WheelLabel::Win, 100),
    segment(WheelLabel::Lose, 0),
    segment(WheelLabel::Win, 100),
    segment(WheelLabel::Lose, 0),
    segment(WheelLabel::Mega, 200),
    segment(WheelLabel::Lose, 0),
    segment(WheelLabel::Win, 100),
    segment(WheelLabel::Lose, 0),
];

pub const SPIN_DURATION_MS: u64 = 4_000;
const MIN_TURNS: u32 = 5;
const MAX_TURNS: u32 = 8;

/// Segment under the pointer once the wheel rests at `final_angle` degrees.
pub fn winning_index(final_angle: f64) -> usize {
    let normalized = (360.0 - final_angle.rem_euclid(360.0)).rem_euclid(360.0);
    let segment_angle = 360.0 / SEGMENTS.len() as f64;
    // NaN casts to 0; the clamp covers normalized values a hair under 360
    ((normalized / segment_angle).floor() as usize).min(SEGMENTS.len() - 1)
}

pub fn landing(final_angle: f64) -> (usize, WheelSegment) {
    let index = winning_index(final_angle);
    (index, SEGMENTS[index])
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spin {
    total_rotation: f64,
}

#[derive(Debug, Default)]
pub struct LuckyWheel {
    spin: Option<Spin>,
    fixed_offset: Option<f64>,
}

impl LuckyWheel {
    /// A wheel whose final offset within the last turn is predetermined.
    pub fn with_offset(offset_deg: f64) -> Self {
        Self {
            spin: None,
            fixed_offset: Some(offset_deg),
        }
    }

    fn spin(&mut self, ctx: &mut GameContext) {
        if self.spin.is_some() {
            return;
        }
        let turns = ctx.rng().random_range(MIN_TURNS..=MAX_TURNS);
        let offset = match self.fixed_offset {
            Some(offset) => offset,
            None => ctx.rng().random_range(0.0..360.0),
        };
        let total_rotation = f64::from(turns) * 360.0 + offset;
        self.spin = Some(Spin { total_rotation });
        ctx.emit(GameIntent::WheelSpinning {
            total_rotation,
            duration_ms: SPIN_DURATION_MS,
        });
        ctx.set_timeout(SPIN_DURATION_MS, GameTimer::SpinFinished);
    }
}

impl MiniGame for LuckyWheel {
    fn id(&self) -> GameId {
        GameId::LuckyWheel
    }

    fn start(&mut self, _ctx: &mut GameContext) {}

    fn on_timer(&mut self, timer: GameTimer, ctx: &mut GameContext) {
        let (GameTimer::SpinFinished, Some(spin)) = (timer, self.spin) else {
            return;
        };
        let (index, segment) = landing(spin.total_rotation.rem_euclid(360.0));
        debug!(target: "game", "Wheel landed on segment {} ({:?})", index, segment);
        ctx.emit(GameIntent::WheelLanded { index, segment });
        ctx.terminate(segment.value > 0, segment.value);
    }

    fn on_input(&mut self, input: GameInput, ctx: &mut GameContext) {
        if input == GameInput::Spin {
            self.spin(ctx);
        }
    }
}
