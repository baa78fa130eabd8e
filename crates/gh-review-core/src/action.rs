//! Review Session Actions
//!
//! Tagged actions that a [`ReviewSession`](crate::ReviewSession) can process.
//! The orchestrating application transforms key events into actions and
//! dispatches them; the session decides, based on its interaction mode,
//! which of them are honoured.

/// Actions that can be performed on a review session.
///
/// These are the semantic actions the session understands. The orchestrating
/// application is responsible for mapping key events to these actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    // === Navigation ===
    /// Move cursor up one line
    CursorUp,
    /// Move cursor down one line
    CursorDown,
    /// Scroll up a full page
    PageUp,
    /// Scroll down a full page
    PageDown,
    /// Move to first line
    JumpTop,
    /// Move to last line
    JumpBottom,
    /// Jump to next hunk header
    NextHunk,
    /// Jump to previous hunk header
    PrevHunk,
    /// Move to next file
    NextFile,
    /// Move to previous file
    PrevFile,
    /// Select a specific file by index
    SelectFile(usize),

    // === Selection ===
    /// Start a line-range selection at the cursor
    BeginSelection,
    /// Drop the active selection
    CancelSelection,

    // === Annotations ===
    /// Open a comment form on the cursor line or selection
    StartComment,
    /// Open a suggestion form on the cursor line or selection
    StartSuggestion,
    /// Reply to the focused remote thread on the cursor line
    StartReply,
    /// Focus the next remote thread on the cursor line
    NextThread,
    /// Remove the newest pending annotation on the cursor line
    RemovePendingAtCursor,

    // === Form Editing ===
    /// Insert a character into the active field
    InsertChar(char),
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    Delete,
    /// Move text cursor left
    CursorLeft,
    /// Move text cursor right
    CursorRight,
    /// Move text cursor to start of line
    CursorHome,
    /// Move text cursor to end of line
    CursorEnd,
    /// Insert newline
    Newline,
    /// Switch between suggestion code and explanation
    SwitchField,
    /// Submit the open form
    SubmitForm,
    /// Close the open form without saving
    CancelForm,

    // === Review ===
    /// Show review submission form
    OpenReviewForm,
    /// Select next review decision
    ReviewOptionNext,
    /// Select previous review decision
    ReviewOptionPrev,
    /// Submit the review with the selected decision
    SubmitReview,

    // === General ===
    /// Toggle the line number gutter
    ToggleLineNumbers,
    /// Close the review screen
    Close,

    // === Viewport ===
    /// Set the height of the diff pane (for scroll calculations)
    SetViewport { height: u16 },
}

impl ReviewAction {
    /// Check if this action edits text in a form.
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            ReviewAction::InsertChar(_)
                | ReviewAction::Backspace
                | ReviewAction::Delete
                | ReviewAction::CursorLeft
                | ReviewAction::CursorRight
                | ReviewAction::CursorHome
                | ReviewAction::CursorEnd
                | ReviewAction::Newline
        )
    }

    /// Check if this action should be handled while an annotation form is open.
    pub fn is_form_action(&self) -> bool {
        self.is_text_input()
            || matches!(
                self,
                ReviewAction::SwitchField | ReviewAction::SubmitForm | ReviewAction::CancelForm
            )
    }

    /// Check if this action moves through the diff or the file list.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            ReviewAction::CursorUp
                | ReviewAction::CursorDown
                | ReviewAction::PageUp
                | ReviewAction::PageDown
                | ReviewAction::JumpTop
                | ReviewAction::JumpBottom
                | ReviewAction::NextHunk
                | ReviewAction::PrevHunk
                | ReviewAction::NextFile
                | ReviewAction::PrevFile
                | ReviewAction::SelectFile(_)
        )
    }

    /// Check if this action drives the review form.
    pub fn is_review_action(&self) -> bool {
        self.is_text_input()
            || matches!(
                self,
                ReviewAction::ReviewOptionNext
                    | ReviewAction::ReviewOptionPrev
                    | ReviewAction::SubmitReview
                    | ReviewAction::CancelForm
            )
    }
}
