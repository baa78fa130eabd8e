//! Key bindings per input mode
//!
//! Navigation keys are vim-style. While a form is open every printable key
//! is text, so the same key never means two things.

use gh_review_core::{InputMode, ReviewAction};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to an action for the given input mode
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<ReviewAction> {
    match mode {
        InputMode::Navigation => navigation_key(key),
        InputMode::Form => form_key(key),
        InputMode::Review => review_key(key),
    }
}

fn navigation_key(key: KeyEvent) -> Option<ReviewAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(ReviewAction::Close),
            KeyCode::Char('d') => Some(ReviewAction::PageDown),
            KeyCode::Char('u') => Some(ReviewAction::PageUp),
            _ => None,
        };
    }

    let action = match key.code {
        // Cursor
        KeyCode::Char('j') | KeyCode::Down => ReviewAction::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => ReviewAction::CursorUp,
        KeyCode::PageDown => ReviewAction::PageDown,
        KeyCode::PageUp => ReviewAction::PageUp,
        KeyCode::Char('g') | KeyCode::Home => ReviewAction::JumpTop,
        KeyCode::Char('G') | KeyCode::End => ReviewAction::JumpBottom,
        KeyCode::Char(']') => ReviewAction::NextHunk,
        KeyCode::Char('[') => ReviewAction::PrevHunk,
        // Files
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => ReviewAction::NextFile,
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => ReviewAction::PrevFile,
        // Selection
        KeyCode::Char('v') | KeyCode::Char('V') => ReviewAction::BeginSelection,
        KeyCode::Esc => ReviewAction::CancelSelection,
        // Annotations
        KeyCode::Char('c') => ReviewAction::StartComment,
        KeyCode::Char('s') => ReviewAction::StartSuggestion,
        KeyCode::Char('r') => ReviewAction::StartReply,
        KeyCode::Char('t') => ReviewAction::NextThread,
        KeyCode::Char('x') | KeyCode::Delete => ReviewAction::RemovePendingAtCursor,
        KeyCode::Char('R') => ReviewAction::OpenReviewForm,
        // View
        KeyCode::Char('n') => ReviewAction::ToggleLineNumbers,
        KeyCode::Char('q') => ReviewAction::Close,
        _ => return None,
    };
    Some(action)
}

fn form_key(key: KeyEvent) -> Option<ReviewAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => Some(ReviewAction::SubmitForm),
        KeyCode::Enter if ctrl => Some(ReviewAction::SubmitForm),
        KeyCode::Esc => Some(ReviewAction::CancelForm),
        KeyCode::Tab | KeyCode::BackTab => Some(ReviewAction::SwitchField),
        KeyCode::Enter => Some(ReviewAction::Newline),
        _ => text_key(key),
    }
}

fn review_key(key: KeyEvent) -> Option<ReviewAction> {
    match key.code {
        KeyCode::Esc => Some(ReviewAction::CancelForm),
        KeyCode::Enter => Some(ReviewAction::SubmitReview),
        KeyCode::Tab => Some(ReviewAction::ReviewOptionNext),
        KeyCode::BackTab => Some(ReviewAction::ReviewOptionPrev),
        // Arrows pick the decision, the body is edited at its end
        KeyCode::Right => Some(ReviewAction::ReviewOptionNext),
        KeyCode::Left => Some(ReviewAction::ReviewOptionPrev),
        _ => text_key(key),
    }
}

fn text_key(key: KeyEvent) -> Option<ReviewAction> {
    match key.code {
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char(c) => Some(ReviewAction::InsertChar(c)),
        KeyCode::Backspace => Some(ReviewAction::Backspace),
        KeyCode::Delete => Some(ReviewAction::Delete),
        KeyCode::Left => Some(ReviewAction::CursorLeft),
        KeyCode::Right => Some(ReviewAction::CursorRight),
        KeyCode::Home => Some(ReviewAction::CursorHome),
        KeyCode::End => Some(ReviewAction::CursorEnd),
        _ => None,
    }
}
