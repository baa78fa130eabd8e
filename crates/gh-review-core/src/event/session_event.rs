//! Events emitted by the review session for the parent application to handle.

use crate::model::ReviewDecision;
use crate::pending::AnnotationId;

/// Events emitted by [`ReviewSession::handle_action`](crate::ReviewSession::handle_action).
///
/// The session never performs network calls while handling an action. It
/// emits events instead, and the parent application decides what to do with
/// them (e.g. await [`ReviewSession::submit_review`](crate::ReviewSession::submit_review)).
///
/// # Example
///
/// ```ignore
/// for event in session.handle_action(action) {
///     match event {
///         SessionEvent::SubmitReview { .. } => {
///             session.submit_review(client.as_ref()).await?;
///         }
///         SessionEvent::Close => break,
///         _ => {}
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A comment or suggestion was added to the pending store.
    AnnotationAdded(AnnotationId),

    /// A pending annotation was removed.
    AnnotationRemoved(AnnotationId),

    /// User requested to submit the entire review.
    SubmitReview {
        /// Selected review decision.
        decision: ReviewDecision,
        /// Review summary body, already resolved against the approval message.
        body: Option<String>,
    },

    /// File selection changed.
    FileSelected {
        /// Path of the selected file.
        path: String,
        /// Index of the file in the files list.
        index: usize,
    },

    /// Cursor moved (useful for status bar updates).
    SelectionChanged {
        /// Currently selected file path.
        path: String,
        /// New-file line under the cursor, if any.
        line: Option<u32>,
    },

    /// User wants to close the review screen.
    Close,
}
