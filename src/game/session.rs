use log::{debug, trace};
use rand::rngs::StdRng;
use uuid::Uuid;

use super::lifecycle::{GameContext, Lifecycle, LifecycleState, Outcome};
use super::{create_game, MiniGame};
use crate::events::EventEmitter;
use crate::model::{FiredTimer, GameId, GameInput, GameTimer, MiniGameEvent};
use crate::scheduler::Scheduler;

/// One run of a single mini-game, from start to termination.
#[derive(Debug)]
pub struct GameSession {
    pub id: Uuid,
    pub game_id: GameId,
    lifecycle: Lifecycle,
    game: Box<dyn MiniGame>,
}

impl GameSession {
    pub fn new(game_id: GameId) -> Self {
        Self::with_game(create_game(game_id))
    }

    pub fn with_game(game: Box<dyn MiniGame>) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_id: game.id(),
            lifecycle: Lifecycle::default(),
            game,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn started_ms(&self) -> Option<u64> {
        self.lifecycle.started_ms()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.lifecycle.outcome()
    }

    pub fn live_timers(&self) -> usize {
        self.lifecycle.live_timers()
    }

    pub fn start(
        &mut self,
        scheduler: &mut dyn Scheduler,
        rng: &mut StdRng,
        emitter: &EventEmitter<MiniGameEvent>,
    ) {
        if !self.lifecycle.start(scheduler.now_ms()) {
            return;
        }
        debug!(target: "game", "Session {} starting {}", self.id, self.game_id);
        let mut ctx = GameContext::new(scheduler, rng, &mut self.lifecycle, emitter);
        self.game.start(&mut ctx);
    }

    /// Routes a fired timer to the game. Timers the session no longer owns
    /// (cancelled, or fired after termination) are dropped here.
    pub fn handle_timer(
        &mut self,
        fired: FiredTimer,
        timer: GameTimer,
        scheduler: &mut dyn Scheduler,
        rng: &mut StdRng,
        emitter: &EventEmitter<MiniGameEvent>,
    ) {
        if !self.lifecycle.is_running() || !self.lifecycle.owns(fired.id) {
            trace!(target: "game", "Dropping stale timer {:?} ({:?})", fired.id, timer);
            return;
        }
        if !fired.repeating {
            self.lifecycle.release(fired.id);
        }
        let mut ctx = GameContext::new(scheduler, rng, &mut self.lifecycle, emitter);
        self.game.on_timer(timer, &mut ctx);
    }

    pub fn handle_input(
        &mut self,
        input: GameInput,
        scheduler: &mut dyn Scheduler,
        rng: &mut StdRng,
        emitter: &EventEmitter<MiniGameEvent>,
    ) {
        if !self.lifecycle.is_running() {
            trace!(target: "game", "Ignoring input {:?} after session end", input);
            return;
        }
        let mut ctx = GameContext::new(scheduler, rng, &mut self.lifecycle, emitter);
        self.game.on_input(input, &mut ctx);
    }

    pub fn abandon(&mut self, scheduler: &mut dyn Scheduler) {
        debug!(target: "game", "Session {} abandoned", self.id);
        self.lifecycle.abandon(scheduler);
    }
}
