use log::trace;

pub const LOCK_TITLE: &str = "Mini-Game in Progress";
pub const LOCK_DETAIL: &str = "Complete the game to continue";

/// The host's ticket: its cells can be disabled and dimmed, with an overlay
/// message on top. Anything already locking it blocks a new mini-game.
pub trait TicketSurface {
    fn lock(&mut self, title: &str, detail: &str);
    fn unlock(&mut self);
    fn is_locked(&self) -> bool;
}

/// In-process ticket state for hosts without a richer surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLock {
    pub cells_interactive: bool,
    pub dimmed: bool,
    pub overlay: Option<String>,
}

impl Default for TicketLock {
    fn default() -> Self {
        Self {
            cells_interactive: true,
            dimmed: false,
            overlay: None,
        }
    }
}

impl TicketLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ticket something else in the host has already locked.
    pub fn locked_by_host(message: &str) -> Self {
        Self {
            cells_interactive: false,
            dimmed: true,
            overlay: Some(message.to_string()),
        }
    }
}

impl TicketSurface for TicketLock {
    fn lock(&mut self, title: &str, detail: &str) {
        trace!(target: "session", "Locking ticket");
        self.cells_interactive = false;
        self.dimmed = true;
        self.overlay = Some(format!("{}\n{}", title, detail));
    }

    fn unlock(&mut self) {
        trace!(target: "session", "Unlocking ticket");
        self.cells_interactive = true;
        self.dimmed = false;
        self.overlay = None;
    }

    fn is_locked(&self) -> bool {
        self.overlay.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_and_unlock() {
        let mut ticket = TicketLock::new();
        assert!(!ticket.is_locked());
        ticket.lock(LOCK_TITLE, LOCK_DETAIL);
        assert!(ticket.is_locked());
        assert!(!ticket.cells_interactive);
        assert!(ticket.dimmed);
        assert_eq!(
            ticket.overlay.as_deref(),
            Some("Mini-Game in Progress\nComplete the game to continue")
        );
        ticket.unlock();
        assert_eq!(ticket, TicketLock::default());
    }
}
