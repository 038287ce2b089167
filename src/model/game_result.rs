use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds, TimestampMilliSeconds};
use std::fmt::Display;
use std::time::Duration;

use super::GameId;

pub const UNKNOWN_PLAYER: &str = "Unknown";

/// Outcome of one completed mini-game session. Field order is the token's
/// canonical order.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub game: GameId,
    pub won: bool,
    pub score: u32,
    #[serde(rename = "time")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub elapsed: Duration,
    pub code: String,
    pub player: String,
    #[serde(rename = "timestamp")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub created_at: DateTime<Utc>,
}

impl GameResult {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    pub fn summary(&self, prize: Option<f64>) -> ResultSummary {
        ResultSummary {
            game_name: self.game.definition().display_name.to_string(),
            won: self.won,
            code: self.code.clone(),
            prize,
        }
    }
}

/// Short line handed to the host once the modal closes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub game_name: String,
    pub won: bool,
    pub code: String,
    pub prize: Option<f64>,
}

impl Display for ResultSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} (Code: {})",
            self.game_name,
            if self.won { "Won" } else { "Lost" },
            self.code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GameResult {
        GameResult {
            game: GameId::LuckyWheel,
            won: true,
            score: 200,
            elapsed: Duration::from_millis(5_512),
            code: "K7QW2M".to_string(),
            player: "Priya".to_string(),
            created_at: DateTime::from_timestamp_millis(1_760_000_000_123).unwrap(),
        }
    }

    #[test]
    fn test_json_uses_wire_names_in_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"game":"luckyWheel","won":true,"score":200,"time":5512,"code":"K7QW2M","player":"Priya","timestamp":1760000000123}"#
        );
    }

    #[test]
    fn test_summary_text() {
        assert_eq!(
            sample().summary(None).to_string(),
            "Lucky Wheel: Won (Code: K7QW2M)"
        );
    }
}
