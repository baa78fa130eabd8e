//! Interaction modes of the review screen and the forms they own.
//!
//! Exactly one mode is active at a time. The active mode decides which
//! actions are processed, so navigation and text entry never see the same
//! keystroke.

use super::TextEditor;
use crate::model::ReviewDecision;
use crate::pending::{PendingAnnotation, PendingComment, PendingSuggestion};
use crate::validate::Anchor;

/// Comment (or reply) being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentForm {
    /// File path.
    pub path: String,
    /// Where the comment will be anchored.
    pub anchor: Anchor,
    /// Remote comment being replied to.
    pub in_reply_to: Option<u64>,
    /// Comment body.
    pub editor: TextEditor,
}

impl CommentForm {
    pub fn new(path: impl Into<String>, anchor: Anchor) -> Self {
        Self {
            path: path.into(),
            anchor,
            in_reply_to: None,
            editor: TextEditor::new(),
        }
    }

    /// Create a reply form for a remote thread.
    pub fn reply(path: impl Into<String>, anchor: Anchor, comment_id: u64) -> Self {
        Self {
            in_reply_to: Some(comment_id),
            ..Self::new(path, anchor)
        }
    }

    /// Build the annotation, or `None` while the body is blank.
    pub fn to_annotation(&self) -> Option<PendingAnnotation> {
        if self.editor.is_blank() {
            return None;
        }
        let mut comment = PendingComment::new(&self.path, self.anchor.line, self.editor.text.trim())
            .with_start_line(self.anchor.start_line);
        if let Some(id) = self.in_reply_to {
            comment = comment.replying_to(id);
        }
        Some(comment.into())
    }
}

/// Field of the suggestion form receiving input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionField {
    #[default]
    Code,
    Explanation,
}

/// Code suggestion being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionForm {
    /// File path.
    pub path: String,
    /// Where the suggestion will be anchored.
    pub anchor: Anchor,
    /// The code being replaced.
    pub original_lines: Vec<String>,
    /// Replacement code, seeded with the original lines.
    pub code: TextEditor,
    /// Optional explanation.
    pub explanation: TextEditor,
    /// Field receiving input.
    pub focus: SuggestionField,
}

impl SuggestionForm {
    pub fn new(path: impl Into<String>, anchor: Anchor, original_lines: Vec<String>) -> Self {
        let code = TextEditor::with_text(original_lines.join("\n"));
        Self {
            path: path.into(),
            anchor,
            original_lines,
            code,
            explanation: TextEditor::new(),
            focus: SuggestionField::Code,
        }
    }

    /// Switch between the code and explanation fields.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SuggestionField::Code => SuggestionField::Explanation,
            SuggestionField::Explanation => SuggestionField::Code,
        };
    }

    /// Check if the code still equals the original lines.
    ///
    /// Whitespace is significant; only one trailing newline is ignored.
    pub fn is_unchanged(&self) -> bool {
        let code = self.code.text.strip_suffix('\n').unwrap_or(&self.code.text);
        code == self.original_lines.join("\n")
    }

    /// Build the annotation, or `None` if the code was not changed.
    pub fn to_annotation(&self) -> Option<PendingAnnotation> {
        if self.is_unchanged() {
            return None;
        }
        let suggestion = PendingSuggestion::new(
            &self.path,
            self.anchor.line,
            self.code.text.clone(),
            self.original_lines.clone(),
        )
        .with_start_line(self.anchor.start_line)
        .with_comment(self.explanation.text.clone());
        Some(suggestion.into())
    }
}

/// A form for creating an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationForm {
    Comment(CommentForm),
    Suggestion(SuggestionForm),
}

impl AnnotationForm {
    /// The editor receiving text input.
    pub fn active_editor_mut(&mut self) -> &mut TextEditor {
        match self {
            AnnotationForm::Comment(form) => &mut form.editor,
            AnnotationForm::Suggestion(form) => match form.focus {
                SuggestionField::Code => &mut form.code,
                SuggestionField::Explanation => &mut form.explanation,
            },
        }
    }

    pub fn anchor(&self) -> &Anchor {
        match self {
            AnnotationForm::Comment(form) => &form.anchor,
            AnnotationForm::Suggestion(form) => &form.anchor,
        }
    }

    /// Title shown on the form border.
    pub fn title(&self) -> String {
        let anchor = self.anchor();
        let lines = match anchor.start_line {
            Some(start) => format!("lines {}-{}", start, anchor.line),
            None => format!("line {}", anchor.line),
        };
        match self {
            AnnotationForm::Comment(form) if form.in_reply_to.is_some() => {
                format!(" Reply on {} ", lines)
            }
            AnnotationForm::Comment(_) => format!(" Comment on {} ", lines),
            AnnotationForm::Suggestion(_) => format!(" Suggest change for {} ", lines),
        }
    }
}

/// Review submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    /// Selected decision.
    pub decision: ReviewDecision,
    /// Review summary body.
    pub body: TextEditor,
}

impl ReviewForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body to send, substituting `approval_message` for an empty approval.
    pub fn resolved_body(&self, approval_message: &str) -> Option<String> {
        let body = self.body.text.trim();
        if !body.is_empty() {
            Some(body.to_string())
        } else if self.decision == ReviewDecision::Approve && !approval_message.is_empty() {
            Some(approval_message.to_string())
        } else {
            None
        }
    }
}

/// The active interaction mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InteractionMode {
    /// Navigating the diff.
    #[default]
    Idle,
    /// Navigating with an active line selection.
    Selecting,
    /// An annotation form owns the keyboard.
    FormOpen(AnnotationForm),
    /// The review form owns the keyboard.
    Review(ReviewForm),
}

/// Which key table the front end should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single keys map to navigation and annotation commands.
    Navigation,
    /// Keys are text input for an annotation form.
    Form,
    /// Keys drive the review form.
    Review,
}

impl InteractionMode {
    pub fn input_mode(&self) -> InputMode {
        match self {
            InteractionMode::Idle | InteractionMode::Selecting => InputMode::Navigation,
            InteractionMode::FormOpen(_) => InputMode::Form,
            InteractionMode::Review(_) => InputMode::Review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn anchor(line: u32, start_line: Option<u32>) -> Anchor {
        Anchor {
            line,
            start_line,
            span: (0, 0),
        }
    }

    #[test]
    fn test_blank_comment_is_not_submittable() {
        let mut form = CommentForm::new("a.rs", anchor(3, None));
        form.editor.insert_str("   \n ");
        assert_eq!(form.to_annotation(), None);

        form.editor.insert_str("looks off");
        let annotation = form.to_annotation().unwrap();
        assert_eq!(annotation.line(), 3);
        assert_eq!(annotation.path(), "a.rs");
    }

    #[test]
    fn test_reply_form_carries_parent() {
        let mut form = CommentForm::reply("a.rs", anchor(3, None), 42);
        form.editor.insert_str("agreed");
        match form.to_annotation() {
            Some(PendingAnnotation::Comment(c)) => assert_eq!(c.in_reply_to, Some(42)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_suggestion_seeded_with_original() {
        let form = SuggestionForm::new(
            "a.rs",
            anchor(5, Some(4)),
            vec!["let a = 1;".into(), "let b = 2;".into()],
        );
        assert_eq!(form.code.text, "let a = 1;\nlet b = 2;");
        assert!(form.is_unchanged());
        assert_eq!(form.to_annotation(), None);
    }

    #[test]
    fn test_whitespace_only_change_is_a_suggestion() {
        let mut form = SuggestionForm::new("a.rs", anchor(2, None), vec!["    let a = 2;".into()]);
        form.code.cursor_home();
        for _ in 0..4 {
            form.code.delete_char_at();
        }
        assert_eq!(form.code.text, "let a = 2;");
        assert!(!form.is_unchanged());

        match form.to_annotation() {
            Some(PendingAnnotation::Suggestion(s)) => assert_eq!(s.suggested_text, "let a = 2;"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_trailing_newline_counts_as_unchanged() {
        let mut form = SuggestionForm::new("a.rs", anchor(2, None), vec!["x".into()]);
        form.code.cursor_end();
        form.code.insert_newline();
        assert!(form.is_unchanged());

        form.code.insert_char(' ');
        assert!(!form.is_unchanged());
    }

    #[test]
    fn test_suggestion_with_explanation() {
        let mut form = SuggestionForm::new("a.rs", anchor(5, Some(4)), vec!["x".into()]);
        form.code.insert_char('y');
        form.toggle_focus();
        assert_eq!(form.focus, SuggestionField::Explanation);
        form.explanation.insert_str("rename");

        match form.to_annotation() {
            Some(PendingAnnotation::Suggestion(s)) => {
                assert_eq!(s.suggested_text, "xy");
                assert_eq!(s.comment.as_deref(), Some("rename"));
                assert_eq!(s.start_line, Some(4));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_active_editor_follows_focus() {
        let mut form = AnnotationForm::Suggestion(SuggestionForm::new(
            "a.rs",
            anchor(1, None),
            vec![String::new()],
        ));
        form.active_editor_mut().insert_char('a');
        if let AnnotationForm::Suggestion(ref mut s) = form {
            s.toggle_focus();
        }
        form.active_editor_mut().insert_char('b');

        let AnnotationForm::Suggestion(s) = form else {
            panic!("form kind changed");
        };
        assert_eq!(s.code.text, "a");
        assert_eq!(s.explanation.text, "b");
    }

    #[test]
    fn test_form_titles() {
        let comment = AnnotationForm::Comment(CommentForm::new("a.rs", anchor(7, Some(5))));
        assert_eq!(comment.title(), " Comment on lines 5-7 ");

        let reply = AnnotationForm::Comment(CommentForm::reply("a.rs", anchor(7, None), 1));
        assert_eq!(reply.title(), " Reply on line 7 ");
    }

    #[test]
    fn test_review_body_resolution() {
        let mut form = ReviewForm::new();
        assert_eq!(form.resolved_body("Approved"), None);

        form.decision = ReviewDecision::Approve;
        assert_eq!(form.resolved_body("Approved").as_deref(), Some("Approved"));

        form.body.insert_str(" ship it ");
        assert_eq!(form.resolved_body("Approved").as_deref(), Some("ship it"));
    }

    #[test]
    fn test_input_mode() {
        assert_eq!(InteractionMode::Idle.input_mode(), InputMode::Navigation);
        assert_eq!(InteractionMode::Selecting.input_mode(), InputMode::Navigation);
        assert_eq!(
            InteractionMode::Review(ReviewForm::new()).input_mode(),
            InputMode::Review
        );
    }
}
