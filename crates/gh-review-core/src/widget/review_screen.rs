//! Main review screen composite widget.

use super::{
    AnnotationFormWidget, DiffContentWidget, FileListWidget, FooterHint, ReviewPopupWidget,
    ThreadPaneWidget,
};
use crate::session::ReviewSession;
use crate::state::{InputMode, InteractionMode};
use crate::traits::ThemeProvider;
use ratatui::prelude::*;
use ratatui::widgets::Widget;

/// The main review screen widget.
///
/// This is a composite widget that combines:
/// - File list (left pane)
/// - Diff content (right pane)
/// - Comment threads of the cursor line, when the file has any
/// - Status line (bottom row)
/// - The annotation form or review popup, depending on the session mode
///
/// # Example
///
/// ```ignore
/// use gh_review_core::{ReviewScreen, DefaultTheme};
///
/// let theme = DefaultTheme;
/// terminal.draw(|frame| {
///     ReviewScreen::new(&session, &theme).render(frame.area(), frame.buffer_mut());
/// })?;
/// ```
pub struct ReviewScreen<'a, T: ThemeProvider> {
    session: &'a ReviewSession,
    theme: &'a T,
    /// Footer hints to display.
    footer_hints: Option<Vec<FooterHint>>,
}

impl<'a, T: ThemeProvider> ReviewScreen<'a, T> {
    /// Create a new review screen widget.
    pub fn new(session: &'a ReviewSession, theme: &'a T) -> Self {
        Self {
            session,
            theme,
            footer_hints: None,
        }
    }

    /// Override the footer hints shown in the diff pane.
    pub fn with_footer_hints(mut self, hints: Vec<FooterHint>) -> Self {
        self.footer_hints = Some(hints);
        self
    }

    /// Number of diff rows visible when the screen is drawn into `area`.
    ///
    /// The orchestrator reports this to the session with
    /// [`ReviewAction::SetViewport`](crate::ReviewAction::SetViewport).
    pub fn diff_height(area: Rect) -> u16 {
        let [main, _status] = Self::rows(area);
        // Top and bottom border
        main.height.saturating_sub(2)
    }

    fn rows(area: Rect) -> [Rect; 2] {
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area)
    }

    fn default_hints(&self) -> Vec<FooterHint> {
        match self.session.mode() {
            InteractionMode::Selecting => vec![
                FooterHint::new("j/k", "Extend"),
                FooterHint::new("c", "Comment"),
                FooterHint::new("s", "Suggest"),
                FooterHint::new("Esc", "Cancel"),
            ],
            _ => {
                let mut hints = vec![
                    FooterHint::new("v", "Select"),
                    FooterHint::new("c", "Comment"),
                    FooterHint::new("s", "Suggest"),
                    FooterHint::new("r", "Reply"),
                ];
                if self.session.view().cursor_threads().len() > 1 {
                    hints.push(FooterHint::new("t", "Next thread"));
                }
                hints.push(FooterHint::new("R", "Review"));
                hints.push(FooterHint::new("q", "Quit"));
                hints
            }
        }
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let pending = self.session.pending().count();
        let right = format!(
            "PR #{} │ {} pending ",
            self.session.pr_number(),
            pending
        );
        let right_width = right.chars().count() as u16;
        let right_x = area.x + area.width.saturating_sub(right_width);
        buf.set_stringn(
            right_x,
            area.y,
            &right,
            area.width as usize,
            Style::default().fg(self.theme.hint_text_foreground()),
        );

        let left = match self.session.status() {
            Some(status) => status.to_string(),
            None => match self.session.view().selection.normalized_range() {
                Some((start, end)) if start != end => format!("Selected lines {}-{}", start, end),
                Some((line, _)) => format!("Selected line {}", line),
                None => String::new(),
            },
        };
        let left_width = right_x.saturating_sub(area.x).saturating_sub(1) as usize;
        buf.set_stringn(
            area.x + 1,
            area.y,
            &left,
            left_width,
            Style::default().fg(self.theme.status_foreground()),
        );
    }
}

impl<T: ThemeProvider> Widget for ReviewScreen<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [main, status] = Self::rows(area);
        let [files_area, diff_area] =
            Layout::horizontal([Constraint::Percentage(25), Constraint::Percentage(75)])
                .areas(main);

        let session = self.session;
        let view = session.view();

        // Files with remote threads get a comment pane; the split is
        // horizontal so the diff height never changes
        let diff_area = if view.threads.is_empty() {
            diff_area
        } else {
            let [diff_area, threads_area] =
                Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                    .areas(diff_area);
            ThreadPaneWidget::new(view.cursor_threads(), self.theme)
                .with_focus(view.thread_focus)
                .render(threads_area, buf);
            diff_area
        };
        let navigating = session.input_mode() == InputMode::Navigation;

        let pending_counts = session
            .files()
            .iter()
            .map(|f| session.pending().count_for_file(&f.path))
            .collect();
        FileListWidget::new(session.files(), view.index, self.theme)
            .with_pending_counts(pending_counts)
            .render(files_area, buf);

        let title = session
            .current_file()
            .map(|f| f.display_name())
            .unwrap_or_default();
        let pending_lines = session.pending().lines_for_file(&view.path);
        let hints = self
            .footer_hints
            .clone()
            .unwrap_or_else(|| self.default_hints());
        DiffContentWidget::new(view, self.theme)
            .with_title(title)
            .with_pending_lines(&pending_lines)
            .with_line_numbers(session.show_line_numbers())
            .with_focus(navigating)
            .with_footer_hints(hints)
            .render(diff_area, buf);

        self.render_status(status, buf);

        match session.mode() {
            InteractionMode::FormOpen(form) => {
                AnnotationFormWidget::new(form, self.theme).render(area, buf)
            }
            InteractionMode::Review(form) => {
                ReviewPopupWidget::new(form, session.pending().count(), self.theme)
                    .render(area, buf)
            }
            InteractionMode::Idle | InteractionMode::Selecting => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DefaultTheme;
    use crate::widget::diff_content::tests::{row, sample_session};
    use crate::ReviewAction;
    use pretty_assertions::assert_eq;

    fn draw(session: &crate::ReviewSession) -> Buffer {
        let theme = DefaultTheme;
        let mut buf = Buffer::empty(Rect::new(0, 0, 120, 20));
        ReviewScreen::new(session, &theme).render(buf.area, &mut buf);
        buf
    }

    fn screen_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| row(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_diff_height() {
        assert_eq!(ReviewScreen::<DefaultTheme>::diff_height(Rect::new(0, 0, 100, 20)), 17);
    }

    #[test]
    fn test_renders_panes_and_status() {
        let session = sample_session();
        let buf = draw(&session);
        let text = screen_text(&buf);

        assert!(text.contains(" Files (2) "));
        assert!(text.contains(" src/main.rs "));
        assert!(text.contains("fn main() {"));
        assert!(row(&buf, 19).contains("PR #1 │ 0 pending"));
    }

    #[test]
    fn test_status_shows_rejection() {
        let mut session = sample_session();
        session.handle_action(ReviewAction::StartSuggestion);
        let buf = draw(&session);

        assert!(row(&buf, 19).contains("cannot suggest on diff headers"));
    }

    #[test]
    fn test_status_shows_selection() {
        let mut session = sample_session();
        for action in [
            ReviewAction::CursorDown,
            ReviewAction::BeginSelection,
            ReviewAction::CursorDown,
            ReviewAction::CursorDown,
        ] {
            session.handle_action(action);
        }
        let buf = draw(&session);

        assert!(row(&buf, 19).contains("Selected lines 1-2"));
        assert!(screen_text(&buf).contains("Esc Cancel"));
    }

    #[test]
    fn test_thread_pane_follows_cursor() {
        let mut session = sample_session();
        let text = screen_text(&draw(&session));
        assert!(text.contains(" Comments "));
        assert!(text.contains("No comments on this line"));

        session.handle_action(ReviewAction::CursorDown);
        session.handle_action(ReviewAction::CursorDown);
        session.handle_action(ReviewAction::CursorDown);
        assert_eq!(session.view().cursor_new_line(), Some(2));
        let text = screen_text(&draw(&session));
        assert!(text.contains("Thread on line 2"));
        assert!(text.contains("octocat"));
        assert!(text.contains("why?"));
    }

    #[test]
    fn test_no_thread_pane_without_threads() {
        let mut session = sample_session();
        session.handle_action(ReviewAction::NextFile);
        assert!(!screen_text(&draw(&session)).contains(" Comments "));
    }

    #[test]
    fn test_popups_follow_mode() {
        let mut session = sample_session();
        session.handle_action(ReviewAction::CursorDown);
        session.handle_action(ReviewAction::StartComment);
        assert!(screen_text(&draw(&session)).contains(" Comment on line 1 "));

        session.handle_action(ReviewAction::CancelForm);
        session.handle_action(ReviewAction::OpenReviewForm);
        assert!(screen_text(&draw(&session)).contains(" Submit Review "));
    }
}
