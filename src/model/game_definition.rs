use super::{Difficulty, GameId};

/// Static description of one of the mini-games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDefinition {
    pub id: GameId,
    pub display_name: &'static str,
    pub description: &'static str,
    pub duration_ms: u64,
    pub difficulty: Difficulty,
}
