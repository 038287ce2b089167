use chrono::{DateTime, Utc};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use super::session::GameSession;
use super::settings::MiniGameConfig;
use super::storage::{store_result, SessionStore};
use super::verification;
use crate::destroyable::Destroyable;
use crate::events::EventEmitter;
use crate::helpers::generate_game_code;
use crate::model::{
    GameId, GameInput, GameResult, MiniGameEvent, ResultSummary, TimerId, TimerTag,
    UNKNOWN_PLAYER,
};
use crate::scheduler::Scheduler;
use crate::ui::{TicketSurface, LOCK_DETAIL, LOCK_TITLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    NoGame,
    GameActive,
    ShowingResult,
}

#[derive(Debug)]
enum ControllerState {
    NoGame,
    GameActive(GameSession),
    ShowingResult(GameResult),
}

/// Owns the single active game slot. Picks games, locks the host ticket
/// while one is open, turns outcomes into stored results and hands the
/// summary back to the host when the modal closes.
///
/// Everything the host sees goes out through the event emitter. Listeners
/// run synchronously inside controller calls and must not call back into
/// the controller; queue the follow-up instead.
pub struct SessionController<S: Scheduler> {
    config: Option<MiniGameConfig>,
    scheduler: S,
    rng: StdRng,
    store: Box<dyn SessionStore>,
    ticket: Box<dyn TicketSurface>,
    emitter: EventEmitter<MiniGameEvent>,
    state: ControllerState,
    player: Option<String>,
    base_prize: f64,
    pending_summary: Option<ResultSummary>,
    auto_trigger: Option<TimerId>,
    debug_mode: bool,
}

impl<S: Scheduler> SessionController<S> {
    pub fn new(
        scheduler: S,
        store: Box<dyn SessionStore>,
        ticket: Box<dyn TicketSurface>,
        emitter: EventEmitter<MiniGameEvent>,
    ) -> Self {
        let rng = match MiniGameConfig::seed_from_env() {
            Some(seed) => {
                debug!(target: "session", "Seeding mini-games with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Self {
            config: None,
            scheduler,
            rng,
            store,
            ticket,
            emitter,
            state: ControllerState::NoGame,
            player: None,
            base_prize: 0.0,
            pending_summary: None,
            auto_trigger: None,
            debug_mode: MiniGameConfig::is_debug_mode(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Applies host configuration. `None` (missing or unreadable config)
    /// leaves the automatic trigger disarmed.
    pub fn init(&mut self, config: Option<MiniGameConfig>) {
        self.cancel_auto_trigger();
        self.config = config;
        match &self.config {
            Some(config) => {
                if self.debug_mode {
                    info!(target: "session", "Mini-game config: {:?}", config);
                }
                self.arm_auto_trigger();
            }
            None => debug!(target: "session", "No mini-game config, automatic games disabled"),
        }
    }

    pub fn init_from_json(&mut self, contents: &str) {
        self.init(MiniGameConfig::from_json(contents));
    }

    pub fn config(&self) -> Option<&MiniGameConfig> {
        self.config.as_ref()
    }

    pub fn set_player(&mut self, player: &str) {
        self.player = Some(player.to_string()).filter(|p| !p.trim().is_empty());
    }

    /// Ticket prize that multiplier-mode prizes are computed from.
    pub fn set_base_prize(&mut self, base_prize: f64) {
        self.base_prize = base_prize;
    }

    pub fn phase(&self) -> ControllerPhase {
        match self.state {
            ControllerState::NoGame => ControllerPhase::NoGame,
            ControllerState::GameActive(_) => ControllerPhase::GameActive,
            ControllerState::ShowingResult(_) => ControllerPhase::ShowingResult,
        }
    }

    pub fn active_session(&self) -> Option<&GameSession> {
        match &self.state {
            ControllerState::GameActive(session) => Some(session),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&GameResult> {
        match &self.state {
            ControllerState::ShowingResult(result) => Some(result),
            _ => None,
        }
    }

    pub fn ticket(&self) -> &dyn TicketSurface {
        self.ticket.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn lock_ticket(&mut self) {
        self.ticket.lock(LOCK_TITLE, LOCK_DETAIL);
    }

    pub fn unlock_ticket(&mut self) {
        self.ticket.unlock();
    }

    pub fn show_random_game(&mut self) -> bool {
        if self.ticket.is_locked() {
            debug!(target: "session", "Ticket is locked, cannot show mini-game");
            return false;
        }
        let index = self.rng.random_range(0..GameId::all().len());
        match GameId::from_index(index) {
            Some(game_id) => self.show_game(game_id),
            None => false,
        }
    }

    /// Opens a specific game. Refused while the ticket is locked or while a
    /// game or result modal is still open, even if the host unlocked the
    /// ticket underneath it.
    pub fn show_game(&mut self, game_id: GameId) -> bool {
        if self.ticket.is_locked() {
            debug!(target: "session", "Ticket is locked, cannot show mini-game");
            return false;
        }
        if !matches!(self.state, ControllerState::NoGame) {
            debug!(target: "session", "A mini-game modal is already open");
            return false;
        }
        self.lock_ticket();
        self.emitter.emit(MiniGameEvent::ModalOpened(game_id));

        let mut session = GameSession::new(game_id);
        info!(target: "session", "Showing {} (session {})", game_id, session.id);
        session.start(&mut self.scheduler, &mut self.rng, &self.emitter);
        self.state = ControllerState::GameActive(session);
        self.collect_outcome();
        true
    }

    pub fn handle_input(&mut self, input: GameInput) {
        match &mut self.state {
            ControllerState::GameActive(session) => {
                session.handle_input(input, &mut self.scheduler, &mut self.rng, &self.emitter);
            }
            _ => {
                trace!(target: "session", "No active game for input {:?}", input);
                return;
            }
        }
        self.collect_outcome();
    }

    /// Moves the clock forward by `ms`, dispatching every timer that falls
    /// due on the way in order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(ms);
        while let Some(fired) = self.scheduler.next_due(until) {
            match fired.tag {
                TimerTag::AutoTrigger => {
                    if self.auto_trigger != Some(fired.id) {
                        trace!(target: "session", "Stale auto-trigger {:?}", fired.id);
                        continue;
                    }
                    self.auto_trigger = None;
                    debug!(target: "session", "Automatic mini-game trigger");
                    self.show_random_game();
                }
                TimerTag::Game(timer) => {
                    if let ControllerState::GameActive(session) = &mut self.state {
                        session.handle_timer(
                            fired,
                            timer,
                            &mut self.scheduler,
                            &mut self.rng,
                            &self.emitter,
                        );
                        self.collect_outcome();
                    } else {
                        trace!(target: "session", "Timer {:?} fired with no active game", timer);
                    }
                }
            }
        }
        self.scheduler.advance_clock(until);
    }

    /// Closes the modal and releases the ticket. A game still running is
    /// discarded without a result. Returns the summary handed to the host,
    /// if a result was showing.
    pub fn close_game(&mut self) -> Option<ResultSummary> {
        match std::mem::replace(&mut self.state, ControllerState::NoGame) {
            ControllerState::NoGame => {
                trace!(target: "session", "close_game with no modal open");
                return None;
            }
            ControllerState::GameActive(mut session) => {
                session.abandon(&mut self.scheduler);
            }
            ControllerState::ShowingResult(_) => (),
        }
        self.emitter.emit(MiniGameEvent::ModalClosed);
        self.unlock_ticket();

        let summary = self.pending_summary.take();
        if let Some(summary) = &summary {
            self.emitter
                .emit(MiniGameEvent::SummaryPublished(summary.clone()));
        }

        if self
            .config
            .as_ref()
            .is_some_and(|config| config.allow_multiple_games)
        {
            self.arm_auto_trigger();
        }
        summary
    }

    pub fn verify_game_code(&self, code: &str) -> Option<GameResult> {
        verification::verify_game_code(self.store.as_ref(), code)
    }

    fn arm_auto_trigger(&mut self) {
        let Some(delay_ms) = self.config.as_ref().and_then(|c| c.auto_trigger_delay_ms()) else {
            return;
        };
        self.cancel_auto_trigger();
        debug!(target: "session", "Automatic mini-game in {}ms", delay_ms);
        self.auto_trigger = Some(self.scheduler.set_timeout(delay_ms, TimerTag::AutoTrigger));
    }

    fn cancel_auto_trigger(&mut self) {
        if let Some(id) = self.auto_trigger.take() {
            self.scheduler.cancel(id);
        }
    }

    fn collect_outcome(&mut self) {
        let (game_id, outcome) = match &self.state {
            ControllerState::GameActive(session) => match session.outcome() {
                Some(outcome) => (session.game_id, outcome),
                None => return,
            },
            _ => return,
        };

        let created_at = DateTime::from_timestamp_millis(self.scheduler.epoch_ms())
            .unwrap_or_else(Utc::now);
        let result = GameResult {
            game: game_id,
            won: outcome.won,
            score: outcome.score,
            elapsed: Duration::from_millis(outcome.elapsed_ms),
            code: generate_game_code(&mut self.rng),
            player: self
                .player
                .clone()
                .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
            created_at,
        };
        info!(
            target: "session",
            "{} finished: won={} score={} code={}",
            game_id, result.won, result.score, result.code
        );

        store_result(self.store.as_mut(), &result);
        let prize = self
            .config
            .as_ref()
            .map(|config| config.prize_for(result.won, self.base_prize));
        self.pending_summary = Some(result.summary(prize));
        self.state = ControllerState::ShowingResult(result.clone());
        self.emitter.emit(MiniGameEvent::ResultReady(result));
    }
}

impl<S: Scheduler> Destroyable for SessionController<S> {
    fn destroy(&mut self) {
        self.cancel_auto_trigger();
        let was_open = match std::mem::replace(&mut self.state, ControllerState::NoGame) {
            ControllerState::NoGame => false,
            ControllerState::GameActive(mut session) => {
                session.abandon(&mut self.scheduler);
                true
            }
            ControllerState::ShowingResult(_) => true,
        };
        self.pending_summary = None;
        if was_open {
            self.emitter.emit(MiniGameEvent::ModalClosed);
            self.unlock_ticket();
        }
        self.emitter.clear_listeners();
        debug!(target: "session", "Session controller destroyed");
    }
}
