pub mod color_catcher;
pub mod lifecycle;
pub mod lucky_wheel;
pub mod memory_flash;
pub mod quick_math;
pub mod reaction_test;
pub mod session;
pub mod session_controller;
pub mod settings;
pub mod storage;
pub mod verification;

use log::warn;

use crate::codec;
use crate::model::{GameId, GameInput, GameTimer};
use lifecycle::GameContext;
use settings::MiniGameConfig;

pub use session::GameSession;
pub use session_controller::{ControllerPhase, SessionController};
pub use verification::{verify_game_code, verify_token};

/// Common contract of the five mini-games. The session owns the lifecycle;
/// games only react to ticks and inputs and call `ctx.terminate` once.
pub trait MiniGame: std::fmt::Debug {
    fn id(&self) -> GameId;
    fn start(&mut self, ctx: &mut GameContext);
    fn on_timer(&mut self, timer: GameTimer, ctx: &mut GameContext);
    fn on_input(&mut self, input: GameInput, ctx: &mut GameContext);
}

pub fn create_game(id: GameId) -> Box<dyn MiniGame> {
    match id {
        GameId::QuickMath => Box::new(quick_math::QuickMath::default()),
        GameId::ColorCatch => Box::new(color_catcher::ColorCatcher::default()),
        GameId::MemoryFlash => Box::new(memory_flash::MemoryFlash::default()),
        GameId::LuckyWheel => Box::new(lucky_wheel::LuckyWheel::default()),
        GameId::ReactionTest => Box::new(reaction_test::ReactionTest::default()),
    }
}

pub fn get_config_options() -> MiniGameConfig {
    MiniGameConfig::default()
}

pub fn encode_config(config: &MiniGameConfig) -> Option<String> {
    match codec::encode(config) {
        Ok(token) => Some(token),
        Err(e) => {
            warn!(target: "codec", "Could not encode config: {}", e);
            None
        }
    }
}

pub fn decode_config(token: &str) -> Option<MiniGameConfig> {
    codec::decode(token)
}
