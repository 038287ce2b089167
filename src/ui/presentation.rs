use std::cell::RefCell;
use std::rc::Rc;

use crate::events::{EventObserver, Unsubscriber};
use crate::model::{GameDefinition, GameIntent, GameResult, MiniGameEvent, ResultSummary};

/// The host's full-screen modal and the area where result summaries go.
pub trait PresentationSurface {
    fn mount_modal(&mut self, definition: &GameDefinition);
    fn render(&mut self, intent: &GameIntent);
    fn show_result(&mut self, result: &GameResult);
    fn unmount_modal(&mut self);
    fn show_summary(&mut self, summary: &ResultSummary);
}

/// Translates controller events into presentation calls.
pub fn attach_surface(
    observer: &EventObserver<MiniGameEvent>,
    surface: Rc<RefCell<dyn PresentationSurface>>,
) -> Unsubscriber<MiniGameEvent> {
    observer.subscribe(move |event: &MiniGameEvent| {
        let mut surface = surface.borrow_mut();
        match event {
            MiniGameEvent::ModalOpened(game_id) => surface.mount_modal(&game_id.definition()),
            MiniGameEvent::Intent(intent) => surface.render(intent),
            MiniGameEvent::ResultReady(result) => surface.show_result(result),
            MiniGameEvent::ModalClosed => surface.unmount_modal(),
            MiniGameEvent::SummaryPublished(summary) => surface.show_summary(summary),
        }
    })
}
