use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PrizeMode {
    #[default]
    Fixed,
    Multiplier,
}

/// Host-supplied configuration for automatic mini-games.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MiniGameConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_show_after_minutes")]
    pub show_after_minutes: f64,

    #[serde(default)]
    pub prize_mode: PrizeMode,

    #[serde(default = "default_prize_amount")]
    pub prize_amount: f64,

    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    #[serde(default)]
    pub allow_multiple_games: bool,
}

// Helper functions for default values
fn default_show_after_minutes() -> f64 {
    5.0
}
fn default_prize_amount() -> f64 {
    10.0
}
fn default_multiplier() -> f64 {
    2.0
}

impl Default for MiniGameConfig {
    fn default() -> Self {
        MiniGameConfig {
            enabled: false,
            show_after_minutes: default_show_after_minutes(),
            prize_mode: PrizeMode::Fixed,
            prize_amount: default_prize_amount(),
            multiplier: default_multiplier(),
            allow_multiple_games: false,
        }
    }
}

impl MiniGameConfig {
    /// Parses host JSON; anything malformed yields `None`, which callers treat
    /// as "feature disabled".
    pub fn from_json(contents: &str) -> Option<Self> {
        match serde_json::from_str::<MiniGameConfig>(contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(target: "session", "Ignoring malformed mini-game config: {}", e);
                None
            }
        }
    }

    /// Delay before the automatic trigger, if one should be armed at all.
    pub fn auto_trigger_delay_ms(&self) -> Option<u64> {
        if !self.enabled || !self.show_after_minutes.is_finite() || self.show_after_minutes <= 0.0
        {
            return None;
        }
        Some((self.show_after_minutes * 60_000.0).round() as u64)
    }

    /// Prize owed for a finished game. `base_prize` is the ticket prize the
    /// multiplier applies to.
    pub fn prize_for(&self, won: bool, base_prize: f64) -> f64 {
        if !won {
            return 0.0;
        }
        match self.prize_mode {
            PrizeMode::Fixed => self.prize_amount,
            PrizeMode::Multiplier => base_prize * self.multiplier,
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("MINIGAME_SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
    }
}
