pub mod codec;
pub mod destroyable;
pub mod events;
pub mod game;
pub mod helpers;
pub mod model;
pub mod scheduler;
pub mod ui;

pub use game::{
    decode_config, encode_config, get_config_options, verify_game_code, verify_token,
    ControllerPhase, SessionController,
};
