use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{Difficulty, GameDefinition};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum GameId {
    QuickMath,
    ColorCatch,
    MemoryFlash,
    LuckyWheel,
    ReactionTest,
}

impl GameId {
    pub fn all() -> Vec<GameId> {
        vec![
            GameId::QuickMath,
            GameId::ColorCatch,
            GameId::MemoryFlash,
            GameId::LuckyWheel,
            GameId::ReactionTest,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            GameId::QuickMath => 0,
            GameId::ColorCatch => 1,
            GameId::MemoryFlash => 2,
            GameId::LuckyWheel => 3,
            GameId::ReactionTest => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<GameId> {
        match index {
            0 => Some(GameId::QuickMath),
            1 => Some(GameId::ColorCatch),
            2 => Some(GameId::MemoryFlash),
            3 => Some(GameId::LuckyWheel),
            4 => Some(GameId::ReactionTest),
            _ => None,
        }
    }

    /// Key used in serialized results, e.g. `quickMath`.
    pub fn key(&self) -> &'static str {
        match self {
            GameId::QuickMath => "quickMath",
            GameId::ColorCatch => "colorCatch",
            GameId::MemoryFlash => "memoryFlash",
            GameId::LuckyWheel => "luckyWheel",
            GameId::ReactionTest => "reactionTest",
        }
    }

    pub fn definition(&self) -> GameDefinition {
        match self {
            GameId::QuickMath => GameDefinition {
                id: *self,
                display_name: "Quick Math Challenge",
                description: "Solve the equation before time runs out!",
                duration_ms: 10_000,
                difficulty: Difficulty::Easy,
            },
            GameId::ColorCatch => GameDefinition {
                id: *self,
                display_name: "Color Catcher",
                description: "Catch the falling colors in the right bucket!",
                duration_ms: 15_000,
                difficulty: Difficulty::Easy,
            },
            GameId::MemoryFlash => GameDefinition {
                id: *self,
                display_name: "Memory Flash",
                description: "Remember the sequence and repeat it!",
                duration_ms: 12_000,
                difficulty: Difficulty::Medium,
            },
            GameId::LuckyWheel => GameDefinition {
                id: *self,
                display_name: "Lucky Wheel",
                description: "Spin the wheel and test your luck!",
                duration_ms: 8_000,
                difficulty: Difficulty::Easy,
            },
            // 5 seconds per round, 3 rounds
            GameId::ReactionTest => GameDefinition {
                id: *self,
                display_name: "Reaction Master",
                description: "Click when you see the green light!",
                duration_ms: 5_000,
                difficulty: Difficulty::Easy,
            },
        }
    }
}

impl Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
