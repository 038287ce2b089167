use log::debug;
use rand::Rng;

use super::lifecycle::GameContext;
use super::MiniGame;
use crate::model::{GameId, GameInput, GameIntent, GameTimer, TimerId};

pub const PALETTE: [&str; 4] = ["Red", "Blue", "Green", "Yellow"];

const FIELD_HEIGHT_PX: i32 = 300;
const DROP_SIZE_PX: i32 = 40;
const FALL_STEP_PX: i32 = 2;
const FALL_TICK_MS: u64 = 20;
const SPAWN_PERIOD_MS: u64 = 2_000;
const MAX_MISSED: u32 = 3;
const CATCH_POINTS: u32 = 10;
const WIN_THRESHOLD: u32 = 50;

#[derive(Debug)]
struct FallingDrop {
    id: u32,
    color: usize,
    position_px: i32,
    fall_timer: TimerId,
}

/// One drop on screen at a time; the spawn timer is a no-op while a drop is
/// still falling.
#[derive(Debug, Default)]
pub struct ColorCatcher {
    score: u32,
    missed: u32,
    current: Option<FallingDrop>,
    next_drop_id: u32,
}

impl ColorCatcher {
    fn spawn(&mut self, ctx: &mut GameContext) {
        if self.current.is_some() {
            return;
        }
        let color = ctx.rng().random_range(0..PALETTE.len());
        let lane = ctx.rng().random::<f32>();
        let id = self.next_drop_id;
        self.next_drop_id += 1;
        let fall_timer = ctx.set_interval(FALL_TICK_MS, GameTimer::DropFall(id));
        self.current = Some(FallingDrop {
            id,
            color,
            position_px: -DROP_SIZE_PX,
            fall_timer,
        });
        ctx.emit(GameIntent::DropSpawned {
            drop_id: id,
            color,
            lane,
        });
    }

    fn fall(&mut self, drop_id: u32, ctx: &mut GameContext) {
        let Some(drop) = self.current.as_mut().filter(|d| d.id == drop_id) else {
            return;
        };
        drop.position_px += FALL_STEP_PX;
        if drop.position_px <= FIELD_HEIGHT_PX {
            ctx.emit(GameIntent::DropMoved {
                drop_id,
                position_px: drop.position_px,
            });
            return;
        }

        ctx.cancel(drop.fall_timer);
        self.current = None;
        self.missed += 1;
        ctx.emit(GameIntent::DropMissed {
            drop_id,
            missed: self.missed,
        });
        if self.missed >= MAX_MISSED {
            debug!(target: "game", "Color catcher: {} drops missed", self.missed);
            ctx.terminate(false, 0);
        }
    }

    fn pick_bucket(&mut self, bucket: usize, ctx: &mut GameContext) {
        if bucket >= PALETTE.len() {
            return;
        }
        let Some(drop) = &self.current else {
            return;
        };
        if bucket != drop.color {
            ctx.emit(GameIntent::WrongBucket { bucket });
            return;
        }
        let (drop_id, fall_timer) = (drop.id, drop.fall_timer);
        ctx.cancel(fall_timer);
        self.current = None;
        self.score += CATCH_POINTS;
        ctx.emit(GameIntent::DropCaught {
            drop_id,
            score: self.score,
        });
    }
}

impl MiniGame for ColorCatcher {
    fn id(&self) -> GameId {
        GameId::ColorCatch
    }

    fn start(&mut self, ctx: &mut GameContext) {
        ctx.set_interval(SPAWN_PERIOD_MS, GameTimer::SpawnDrop);
        ctx.set_timeout(self.id().definition().duration_ms, GameTimer::Deadline);
        self.spawn(ctx);
    }

    fn on_timer(&mut self, timer: GameTimer, ctx: &mut GameContext) {
        match timer {
            GameTimer::SpawnDrop => self.spawn(ctx),
            GameTimer::DropFall(drop_id) => self.fall(drop_id, ctx),
            GameTimer::Deadline => {
                ctx.terminate(self.score > WIN_THRESHOLD, self.score);
            }
            _ => (),
        }
    }

    fn on_input(&mut self, input: GameInput, ctx: &mut GameContext) {
        if let GameInput::PickBucket(bucket) = input {
            self.pick_bucket(bucket, ctx);
        }
    }
}
