pub mod autoplay;
pub mod presentation;
pub mod text_surface;
pub mod ticket;

pub use autoplay::AutoPlayer;
pub use presentation::{attach_surface, PresentationSurface};
pub use text_surface::TextSurface;
pub use ticket::{TicketLock, TicketSurface, LOCK_DETAIL, LOCK_TITLE};
