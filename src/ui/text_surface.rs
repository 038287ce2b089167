use log::info;

use super::PresentationSurface;
use crate::game::color_catcher::PALETTE;
use crate::model::{GameDefinition, GameIntent, GameResult, ResultSummary, WheelLabel};

/// Renders the modal as plain text lines, for terminals and logs.
#[derive(Debug, Default)]
pub struct TextSurface {
    lines: Vec<String>,
    modal_open: bool,
    echo: bool,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also prints each line to stdout as it is rendered.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Default::default()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    fn line(&mut self, text: String) {
        if self.echo {
            println!("{}", text);
        }
        self.lines.push(text);
    }
}

fn color_name(index: usize) -> &'static str {
    PALETTE.get(index).copied().unwrap_or("?")
}

pub fn describe_intent(intent: &GameIntent) -> Option<String> {
    let text = match intent {
        GameIntent::MathProblem {
            a,
            operation,
            b,
            options,
        } => format!(
            "{} {} {} = ?   {}",
            a,
            operation.symbol(),
            b,
            options
                .iter()
                .map(|o| format!("[{}]", o))
                .collect::<Vec<_>>()
                .join(" ")
        ),
        GameIntent::Countdown {
            seconds_left,
            urgent,
        } => format!("{}s{}", seconds_left, if *urgent { "!" } else { "" }),
        GameIntent::DropSpawned { color, .. } => format!("A {} drop is falling", color_name(*color)),
        // movement is animation only
        GameIntent::DropMoved { .. } => return None,
        GameIntent::DropCaught { score, .. } => format!("Caught! Score: {}", score),
        GameIntent::WrongBucket { bucket } => format!("Not {}!", color_name(*bucket)),
        GameIntent::DropMissed { missed, .. } => format!("Missed: {}/3", missed),
        GameIntent::SequencePlayback => "Watch the sequence...".to_string(),
        GameIntent::SlotHighlighted(slot) => format!("  * slot {}", slot),
        GameIntent::SlotCleared(_) => return None,
        GameIntent::InputEnabled(true) => "Your turn! Repeat the sequence".to_string(),
        GameIntent::InputEnabled(false) => return None,
        GameIntent::SequenceAccepted { level } => {
            format!("Correct! Get ready for level {}...", level)
        }
        GameIntent::SequenceRejected => "Wrong sequence!".to_string(),
        GameIntent::WheelSpinning { .. } => "The wheel is spinning...".to_string(),
        GameIntent::WheelLanded { segment, .. } => match segment.label {
            WheelLabel::Mega => "MEGA WIN!".to_string(),
            WheelLabel::Win => "You Won!".to_string(),
            WheelLabel::Lose => "Try Again!".to_string(),
        },
        GameIntent::ReactionWaiting { round } => format!("Round {}/3: Wait for Green...", round),
        GameIntent::ReactionGo => "CLICK NOW!".to_string(),
        GameIntent::ReactionRecorded {
            reaction_ms,
            average_ms,
            ..
        } => format!("Reaction time: {}ms (average {}ms)", reaction_ms, average_ms),
        GameIntent::FalseStart => "Too Early! Click to Try Again".to_string(),
    };
    Some(text)
}

impl PresentationSurface for TextSurface {
    fn mount_modal(&mut self, definition: &GameDefinition) {
        self.modal_open = true;
        self.line(format!("== {} ==", definition.display_name));
        self.line(definition.description.to_string());
    }

    fn render(&mut self, intent: &GameIntent) {
        if let Some(text) = describe_intent(intent) {
            self.line(text);
        }
    }

    fn show_result(&mut self, result: &GameResult) {
        info!(target: "session", "Result {} ready for {}", result.code, result.player);
        self.line(if result.won {
            "You Won!".to_string()
        } else {
            "Better Luck Next Time!".to_string()
        });
        self.line(format!("Score: {}", result.score));
        self.line(format!("Share this code with the admin: {}", result.code));
    }

    fn unmount_modal(&mut self) {
        self.modal_open = false;
    }

    fn show_summary(&mut self, summary: &ResultSummary) {
        self.line(summary.to_string());
    }
}
