mod difficulty;
mod game_definition;
mod game_id;
mod game_input;
mod game_intent;
mod game_result;
mod timer;
mod timer_state;

pub use difficulty::Difficulty;
pub use game_definition::GameDefinition;
pub use game_id::GameId;
pub use game_input::GameInput;
pub use game_intent::{GameIntent, MathOperation, MiniGameEvent, WheelLabel, WheelSegment};
pub use game_result::{GameResult, ResultSummary, UNKNOWN_PLAYER};
pub use timer::{FiredTimer, GameTimer, TimerId, TimerTag};
pub use timer_state::TimerState;
