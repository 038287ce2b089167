use super::{GameId, GameResult, ResultSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOperation {
    Add,
    Subtract,
    Multiply,
}

impl MathOperation {
    pub fn symbol(&self) -> char {
        match self {
            MathOperation::Add => '+',
            MathOperation::Subtract => '-',
            MathOperation::Multiply => '*',
        }
    }

    pub fn apply(&self, a: i32, b: i32) -> i32 {
        match self {
            MathOperation::Add => a + b,
            MathOperation::Subtract => a - b,
            MathOperation::Multiply => a * b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelLabel {
    Win,
    Lose,
    Mega,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelSegment {
    pub label: WheelLabel,
    pub value: u32,
}

/// What a running game wants shown. The rendering adapter turns these into
/// presentation calls.
#[derive(Debug, Clone, PartialEq)]
pub enum GameIntent {
    MathProblem {
        a: i32,
        operation: MathOperation,
        b: i32,
        options: Vec<i32>,
    },
    Countdown {
        seconds_left: u64,
        urgent: bool,
    },
    DropSpawned {
        drop_id: u32,
        color: usize,
        lane: f32,
    },
    DropMoved {
        drop_id: u32,
        position_px: i32,
    },
    DropCaught {
        drop_id: u32,
        score: u32,
    },
    WrongBucket {
        bucket: usize,
    },
    DropMissed {
        drop_id: u32,
        missed: u32,
    },
    SequencePlayback,
    SlotHighlighted(usize),
    SlotCleared(usize),
    InputEnabled(bool),
    SequenceAccepted {
        level: u32,
    },
    SequenceRejected,
    WheelSpinning {
        total_rotation: f64,
        duration_ms: u64,
    },
    WheelLanded {
        index: usize,
        segment: WheelSegment,
    },
    ReactionWaiting {
        round: u32,
    },
    ReactionGo,
    ReactionRecorded {
        reaction_ms: u64,
        average_ms: u64,
        round: u32,
    },
    FalseStart,
}

/// Everything the session controller publishes to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum MiniGameEvent {
    ModalOpened(GameId),
    Intent(GameIntent),
    ResultReady(GameResult),
    ModalClosed,
    SummaryPublished(ResultSummary),
}
