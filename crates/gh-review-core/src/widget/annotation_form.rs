//! Popup for writing a comment, reply or code suggestion.

use crate::state::{AnnotationForm, SuggestionField, TextEditor};
use crate::traits::ThemeProvider;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Widget};

/// Center a `width` x `height` rectangle inside `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

/// Draw editor text into `area` and highlight the text cursor.
pub(crate) fn render_editor(editor: &TextEditor, area: Rect, show_cursor: bool, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    // Keep the cursor line visible
    let cursor_line = editor.current_line();
    let first = cursor_line.saturating_sub(area.height as usize - 1);

    for (i, line) in editor
        .text
        .split('\n')
        .skip(first)
        .take(area.height as usize)
        .enumerate()
    {
        buf.set_stringn(area.x, area.y + i as u16, line, area.width as usize, Style::default());
    }

    if !show_cursor {
        return;
    }
    let cursor_col = editor.current_column();
    let row = cursor_line - first;
    if cursor_col < area.width as usize && row < area.height as usize {
        buf.set_style(
            Rect::new(area.x + cursor_col as u16, area.y + row as u16, 1, 1),
            Style::default().bg(Color::White).fg(Color::Black),
        );
    }
}

/// Widget for the annotation form popup.
pub struct AnnotationFormWidget<'a, T: ThemeProvider> {
    form: &'a AnnotationForm,
    theme: &'a T,
}

impl<'a, T: ThemeProvider> AnnotationFormWidget<'a, T> {
    pub fn new(form: &'a AnnotationForm, theme: &'a T) -> Self {
        Self { form, theme }
    }
}

impl<T: ThemeProvider> Widget for AnnotationFormWidget<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = match self.form {
            AnnotationForm::Comment(_) => 10,
            AnnotationForm::Suggestion(_) => 18,
        };
        let popup_area = centered(area, 70, height);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.comment_indicator_foreground()))
            .title(self.form.title());

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);
        if inner.height < 2 {
            return;
        }

        let body = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
        let hint_y = inner.y + inner.height - 1;

        match self.form {
            AnnotationForm::Comment(form) => {
                render_editor(&form.editor, body, true, buf);
                buf.set_stringn(
                    inner.x,
                    hint_y,
                    "Ctrl+S: Save | Enter: Newline | Esc: Cancel",
                    inner.width as usize,
                    Style::default().fg(self.theme.hint_text_foreground()),
                );
            }
            AnnotationForm::Suggestion(form) => {
                let [code_area, explanation_area] =
                    Layout::vertical([Constraint::Percentage(65), Constraint::Percentage(35)])
                        .areas(body);

                for (label, editor, field, field_area) in [
                    ("Suggested code", &form.code, SuggestionField::Code, code_area),
                    (
                        "Explanation (optional)",
                        &form.explanation,
                        SuggestionField::Explanation,
                        explanation_area,
                    ),
                ] {
                    let focused = form.focus == field;
                    let border = if focused {
                        self.theme.focused_border_foreground()
                    } else {
                        self.theme.border_foreground()
                    };
                    let field_block = Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border))
                        .title(format!(" {} ", label));
                    let field_inner = field_block.inner(field_area);
                    field_block.render(field_area, buf);
                    render_editor(editor, field_inner, focused, buf);
                }

                buf.set_stringn(
                    inner.x,
                    hint_y,
                    "Ctrl+S: Save | Tab: Switch field | Esc: Cancel",
                    inner.width as usize,
                    Style::default().fg(self.theme.hint_text_foreground()),
                );
            }
        }
    }
}
