use super::PresentationSurface;
use crate::game::reaction_test::ROUNDS;
use crate::model::{
    GameDefinition, GameId, GameInput, GameIntent, GameResult, ResultSummary,
};

/// A scripted player that watches the modal like a person would and plans
/// its clicks. Inputs come out as `(delay_ms, input)` pairs; the caller
/// feeds them to the controller once the delay has passed.
#[derive(Debug, Default)]
pub struct AutoPlayer {
    planned: Vec<(u64, GameInput)>,
    watched_slots: Vec<usize>,
}

impl AutoPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain_planned(&mut self) -> Vec<(u64, GameInput)> {
        std::mem::take(&mut self.planned)
    }

    fn plan(&mut self, delay_ms: u64, input: GameInput) {
        self.planned.push((delay_ms, input));
    }
}

impl PresentationSurface for AutoPlayer {
    fn mount_modal(&mut self, definition: &GameDefinition) {
        match definition.id {
            GameId::LuckyWheel => self.plan(500, GameInput::Spin),
            GameId::ReactionTest => self.plan(300, GameInput::Tap),
            _ => (),
        }
    }

    fn render(&mut self, intent: &GameIntent) {
        match intent {
            GameIntent::MathProblem { a, operation, b, .. } => {
                self.plan(1_200, GameInput::SelectAnswer(operation.apply(*a, *b)))
            }
            GameIntent::DropSpawned { color, .. } => self.plan(250, GameInput::PickBucket(*color)),
            GameIntent::SequencePlayback => self.watched_slots.clear(),
            GameIntent::SlotHighlighted(slot) => self.watched_slots.push(*slot),
            GameIntent::InputEnabled(true) => {
                let slots = self.watched_slots.clone();
                for (i, slot) in slots.into_iter().enumerate() {
                    self.plan(150 * (i as u64 + 1), GameInput::PressSlot(slot));
                }
            }
            GameIntent::ReactionGo => self.plan(260, GameInput::Tap),
            GameIntent::ReactionRecorded { round, .. } if *round < ROUNDS => {
                self.plan(400, GameInput::Tap)
            }
            GameIntent::FalseStart => self.plan(300, GameInput::Tap),
            _ => (),
        }
    }

    fn show_result(&mut self, _result: &GameResult) {}

    fn unmount_modal(&mut self) {
        self.planned.clear();
        self.watched_slots.clear();
    }

    fn show_summary(&mut self, _summary: &ResultSummary) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeats_watched_sequence() {
        let mut player = AutoPlayer::new();
        player.mount_modal(&GameId::MemoryFlash.definition());
        for intent in [
            GameIntent::SequencePlayback,
            GameIntent::SlotHighlighted(4),
            GameIntent::SlotCleared(4),
            GameIntent::SlotHighlighted(1),
            GameIntent::SlotCleared(1),
            GameIntent::InputEnabled(true),
        ] {
            player.render(&intent);
        }
        assert_eq!(
            player.drain_planned(),
            vec![(150, GameInput::PressSlot(4)), (300, GameInput::PressSlot(1))]
        );
        assert!(player.drain_planned().is_empty());
    }

    #[test]
    fn test_stops_tapping_after_last_round() {
        let mut player = AutoPlayer::new();
        player.render(&GameIntent::ReactionRecorded {
            reaction_ms: 240,
            average_ms: 240,
            round: 1,
        });
        player.render(&GameIntent::ReactionRecorded {
            reaction_ms: 260,
            average_ms: 250,
            round: ROUNDS,
        });
        assert_eq!(player.drain_planned(), vec![(400, GameInput::Tap)]);
    }
}
