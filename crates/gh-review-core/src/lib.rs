//! # gh-review-core
//!
//! The diff interpretation and inline annotation engine behind a terminal
//! pull request reviewer.
//!
//! ## Design Principles
//!
//! This crate is **instrumented**: it receives data and emits events, and
//! only touches the network through the [`RepositoryClient`] trait. This
//! enables:
//!
//! - Testability with an in-memory client
//! - Reuse with GitHub, GitHub Enterprise or any other host
//! - A pure, synchronous core (parsing, navigation, validation, pending store)
//!
//! ## Action-Based Architecture
//!
//! The orchestrating application maps key events to [`ReviewAction`]
//! variants and dispatches them to a [`ReviewSession`]. The session's
//! interaction mode decides which actions are honoured, so navigation and
//! text entry never process the same keystroke.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gh_review_core::{ReviewAction, ReviewScreen, ReviewSession, SessionEvent};
//!
//! let mut session = ReviewSession::load(&client, 42).await?;
//!
//! // Render the screen
//! ReviewScreen::new(&session, &theme).render(area, buf);
//!
//! // Handle actions (mapped from key events by the orchestrator)
//! for event in session.handle_action(ReviewAction::CursorDown) {
//!     if let SessionEvent::SubmitReview { decision, body } = event {
//!         session.submit_review(&client, decision, body).await?;
//!     }
//! }
//! ```

pub mod action;
pub mod event;
pub mod model;
pub mod parser;
pub mod pending;
pub mod session;
pub mod state;
pub mod threads;
pub mod traits;
pub mod validate;
pub mod widget;

// Re-export commonly used types
pub use action::ReviewAction;
pub use event::SessionEvent;
pub use model::{
    ChangedFile, CommentThread, DiffLine, DiffSide, FileStatus, LineKind, ParsedDiff,
    ReviewComment, ReviewDecision, ReviewDraftComment,
};
pub use parser::{parse_patch, DiffIssue, DiffParser};
pub use pending::{
    AnnotationId, PendingAnnotation, PendingAnnotationStore, PendingComment, PendingSuggestion,
};
pub use session::{FileView, ReviewError, ReviewSession, DEFAULT_APPROVAL_MESSAGE};
pub use state::{InputMode, InteractionMode, NavIntent, SelectionState, Viewport};
pub use threads::{group_threads, threads_for_file, CommentThreads};
pub use traits::{ClientError, DefaultTheme, RepositoryClient, ThemeProvider};
pub use validate::{AnnotationValidator, CommentRejection, SuggestionRejection};
pub use widget::{FooterHint, ReviewScreen};
