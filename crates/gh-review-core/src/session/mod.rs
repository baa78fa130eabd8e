//! The review session that ties parsing, navigation, validation and the
//! pending store together.

mod review_session;

pub use review_session::{FileView, ReviewError, ReviewSession, DEFAULT_APPROVAL_MESSAGE};
