//! Events emitted by the review session.

mod session_event;

pub use session_event::SessionEvent;
