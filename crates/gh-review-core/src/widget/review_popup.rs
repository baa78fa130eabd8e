//! Review submission popup widget.

use super::annotation_form::{centered, render_editor};
use crate::model::ReviewDecision;
use crate::state::ReviewForm;
use crate::traits::ThemeProvider;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Widget};

/// Widget for the review submission popup.
///
/// Shows the pending annotation count, the three decision buttons
/// (Approve, Request Changes, Comment) and the review body.
pub struct ReviewPopupWidget<'a, T: ThemeProvider> {
    /// The review form being edited.
    form: &'a ReviewForm,
    /// Number of pending annotations.
    pending_count: usize,
    /// Theme provider.
    theme: &'a T,
}

impl<'a, T: ThemeProvider> ReviewPopupWidget<'a, T> {
    /// Create a new review popup widget.
    pub fn new(form: &'a ReviewForm, pending_count: usize, theme: &'a T) -> Self {
        Self {
            form,
            pending_count,
            theme,
        }
    }
}

impl<T: ThemeProvider> Widget for ReviewPopupWidget<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered(area, 60, 12);

        // Clear the area behind the popup
        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.focused_border_foreground()))
            .title(" Submit Review ");

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);
        if inner.height < 5 {
            return;
        }

        let comment_text = if self.pending_count == 1 {
            "1 pending comment".to_string()
        } else {
            format!("{} pending comments", self.pending_count)
        };
        buf.set_stringn(
            inner.x,
            inner.y,
            &comment_text,
            inner.width as usize,
            Style::default().fg(self.theme.hint_text_foreground()),
        );

        let buttons = [
            (ReviewDecision::Approve, Color::Green),
            (ReviewDecision::RequestChanges, Color::Red),
            (ReviewDecision::Comment, Color::Yellow),
        ];

        let button_y = inner.y + 2;
        let mut button_x = inner.x + 1;
        let right_edge = inner.x + inner.width;

        for (decision, color) in buttons {
            let is_selected = self.form.decision == decision;

            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };

            let text = if is_selected {
                format!(" [{}] ", decision.label())
            } else {
                format!("  {}  ", decision.label())
            };

            let remaining = right_edge.saturating_sub(button_x) as usize;
            buf.set_stringn(button_x, button_y, &text, remaining, style);
            button_x = button_x.saturating_add(text.len() as u16 + 1);
        }

        // Review body below the buttons, above the hint line
        let body_area = Rect::new(
            inner.x,
            inner.y + 4,
            inner.width,
            inner.height.saturating_sub(5),
        );
        if self.form.body.text.is_empty() {
            let placeholder = if self.form.decision == ReviewDecision::Approve {
                "Review body (optional)"
            } else {
                "Review body"
            };
            buf.set_stringn(
                body_area.x,
                body_area.y,
                placeholder,
                body_area.width as usize,
                Style::default().fg(Color::DarkGray),
            );
        } else {
            render_editor(&self.form.body, body_area, true, buf);
        }

        let hints = "←/→: Select | Enter: Submit | Esc: Cancel";
        buf.set_stringn(
            inner.x,
            inner.y + inner.height - 1,
            hints,
            inner.width as usize,
            Style::default().fg(self.theme.hint_text_foreground()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DefaultTheme;
    use crate::widget::diff_content::tests::row;

    fn render(form: &ReviewForm, pending: usize) -> Buffer {
        let theme = DefaultTheme;
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        ReviewPopupWidget::new(form, pending, &theme).render(buf.area, &mut buf);
        buf
    }

    fn find(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
        (0..buf.area.height).find_map(|y| {
            row(buf, y)
                .find(needle)
                .map(|byte| (row(buf, y)[..byte].chars().count() as u16, y))
        })
    }

    #[test]
    fn test_highlights_selected_decision() {
        let form = ReviewForm {
            decision: ReviewDecision::RequestChanges,
            ..ReviewForm::new()
        };
        let buf = render(&form, 3);

        assert!(find(&buf, "3 pending comments").is_some());
        let (x, y) = find(&buf, "[Request Changes]").unwrap();
        assert_eq!(buf[(x, y)].bg, Color::Red);
        assert!(find(&buf, "  Approve  ").is_some());
    }

    #[test]
    fn test_shows_body() {
        let mut form = ReviewForm::new();
        form.body.insert_str("Looks good overall");
        let buf = render(&form, 1);

        assert!(find(&buf, "1 pending comment").is_some());
        assert!(find(&buf, "Looks good overall").is_some());
        assert!(find(&buf, "Review body").is_none());
    }
}
