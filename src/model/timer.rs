use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Why a timer was scheduled; routed back to its owner when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTag {
    AutoTrigger,
    Game(GameTimer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameTimer {
    Countdown,
    SpawnDrop,
    DropFall(u32),
    Deadline,
    PlaybackStep,
    PlaybackSettled,
    NextRound,
    SpinFinished,
    GoSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub tag: TimerTag,
    pub at_ms: u64,
    pub repeating: bool,
}
