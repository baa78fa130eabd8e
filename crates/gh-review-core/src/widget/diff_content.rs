//! Diff content widget for rendering the open file's parsed diff.

use crate::model::{DiffLine, LineKind};
use crate::session::FileView;
use crate::traits::ThemeProvider;
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};

/// Columns kept free on the right for thread and pending markers.
const INDICATOR_COLUMNS: u16 = 6;

/// A single hint entry for the footer.
#[derive(Debug, Clone)]
pub struct FooterHint {
    /// The key (e.g., "c", "R").
    pub key: String,
    /// The description (e.g., "Comment", "Review").
    pub description: String,
}

impl FooterHint {
    /// Create a new footer hint.
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// Build the footer line shown on a block's bottom border.
pub(crate) fn footer_line<T: ThemeProvider>(hints: &[FooterHint], theme: &T) -> Option<Line<'static>> {
    if hints.is_empty() {
        return None;
    }
    let mut spans = vec![Span::raw(" ")];
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                " │ ",
                Style::default().fg(theme.hint_text_foreground()),
            ));
        }
        spans.push(Span::styled(
            hint.key.clone(),
            Style::default()
                .fg(theme.hint_key_foreground())
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", hint.description),
            Style::default().fg(theme.hint_text_foreground()),
        ));
    }
    spans.push(Span::raw(" "));
    Some(Line::from(spans))
}

/// Widget for rendering the diff content pane.
pub struct DiffContentWidget<'a, T: ThemeProvider> {
    /// The open file.
    view: &'a FileView,
    /// Border title.
    title: String,
    /// New-file lines carrying pending annotations.
    pending_lines: &'a [u32],
    /// Whether to draw the old/new line number gutter.
    show_line_numbers: bool,
    /// Theme provider.
    theme: &'a T,
    /// Whether this pane is focused.
    focused: bool,
    /// Footer hints to display at the bottom border.
    footer_hints: Vec<FooterHint>,
}

impl<'a, T: ThemeProvider> DiffContentWidget<'a, T> {
    /// Create a new diff content widget for the open file.
    pub fn new(view: &'a FileView, theme: &'a T) -> Self {
        Self {
            view,
            title: view.path.clone(),
            pending_lines: &[],
            show_line_numbers: true,
            theme,
            focused: true,
            footer_hints: Vec::new(),
        }
    }

    /// Override the border title (defaults to the file path).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Mark lines that carry pending annotations.
    pub fn with_pending_lines(mut self, lines: &'a [u32]) -> Self {
        self.pending_lines = lines;
        self
    }

    /// Show or hide the line number gutter.
    pub fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    /// Set whether the pane has focus.
    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set footer hints to display at the bottom border.
    pub fn with_footer_hints(mut self, hints: Vec<FooterHint>) -> Self {
        self.footer_hints = hints;
        self
    }
}

impl<T: ThemeProvider> Widget for DiffContentWidget<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.focused_border_foreground())
        } else {
            Style::default().fg(self.theme.border_foreground())
        };

        let title = if self.title.is_empty() {
            " No file selected ".to_string()
        } else {
            format!(" {} ", self.title)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        if let Some(footer) = footer_line(&self.footer_hints, self.theme) {
            block = block.title_bottom(footer);
        }

        let inner = block.inner(area);
        block.render(area, buf);

        if self.view.diff.is_empty() {
            let msg = if self.view.path.is_empty() {
                "No files in this pull request"
            } else {
                "No diff available (binary or too large)"
            };
            let x = inner.x + (inner.width.saturating_sub(msg.len() as u16)) / 2;
            let y = inner.y + inner.height / 2;
            buf.set_stringn(x, y, msg, inner.width as usize, Style::default().fg(Color::DarkGray));
            return;
        }

        let line_no_width = self.view.diff.line_no_width();
        let cursor = self.view.selection.absolute_index();
        let selection = self.view.selected_span();

        let visible = self
            .view
            .diff
            .iter()
            .enumerate()
            .skip(self.view.selection.scroll_offset)
            .take(inner.height as usize);

        for (row, (index, line)) in visible.enumerate() {
            let y = inner.y + row as u16;
            let is_cursor = index == cursor;
            let in_selection = selection.is_some_and(|(start, end)| (start..=end).contains(&index));

            if line.kind.is_marker() {
                self.render_marker_line(line, inner.x, y, inner.width, is_cursor, buf);
            } else {
                self.render_code_line(
                    line,
                    inner.x,
                    y,
                    inner.width,
                    line_no_width,
                    is_cursor,
                    in_selection,
                    buf,
                );
            }
        }
    }
}

impl<T: ThemeProvider> DiffContentWidget<'_, T> {
    fn render_marker_line(
        &self,
        line: &DiffLine,
        x: u16,
        y: u16,
        width: u16,
        is_cursor: bool,
        buf: &mut Buffer,
    ) {
        let (fg, bg) = if is_cursor {
            (
                self.theme.cursor_foreground(),
                self.theme.cursor_background(),
            )
        } else {
            (
                self.theme.hunk_header_foreground(),
                self.theme.hunk_header_background(),
            )
        };

        let style = Style::default().fg(fg).bg(bg);
        buf.set_style(Rect::new(x, y, width, 1), style);
        buf.set_stringn(x, y, &line.text, width as usize, style);
    }

    #[allow(clippy::too_many_arguments)]
    fn render_code_line(
        &self,
        line: &DiffLine,
        x: u16,
        y: u16,
        width: u16,
        line_no_width: usize,
        is_cursor: bool,
        in_selection: bool,
        buf: &mut Buffer,
    ) {
        let (fg, bg) = if is_cursor {
            (
                Some(self.theme.cursor_foreground()),
                self.theme.cursor_background(),
            )
        } else if in_selection {
            (None, self.theme.selection_background())
        } else {
            let bg = match line.kind {
                LineKind::Added => self.theme.addition_background(),
                LineKind::Removed => self.theme.deletion_background(),
                _ => self.theme.context_background(),
            };
            (None, bg)
        };

        let base_style = match fg {
            Some(fg) => Style::default().fg(fg).bg(bg),
            None => Style::default().bg(bg),
        };

        buf.set_style(Rect::new(x, y, width, 1), base_style);

        let mut current_x = x;
        let right_edge = x + width;

        if self.show_line_numbers {
            // Line number style - use cursor foreground on cursor line for contrast
            let line_no_style = if is_cursor {
                base_style
            } else {
                base_style.fg(self.theme.line_number_foreground())
            };
            for number in [line.old_line, line.new_line] {
                let text = number
                    .map(|n| format!("{:>width$} ", n, width = line_no_width))
                    .unwrap_or_else(|| " ".repeat(line_no_width + 1));
                let remaining = right_edge.saturating_sub(current_x) as usize;
                buf.set_stringn(current_x, y, &text, remaining, line_no_style);
                current_x = current_x.saturating_add(text.len() as u16).min(right_edge);
            }
        }

        let prefix_style = if is_cursor {
            base_style
        } else {
            match line.kind {
                LineKind::Added => base_style.fg(Color::Green),
                LineKind::Removed => base_style.fg(Color::Red),
                _ => base_style,
            }
        };
        if current_x < right_edge {
            buf.set_string(current_x, y, line.kind.prefix().to_string(), prefix_style);
            current_x += 1;
        }

        let content_width = right_edge
            .saturating_sub(current_x)
            .saturating_sub(INDICATOR_COLUMNS) as usize;
        buf.set_stringn(current_x, y, &line.text, content_width, base_style);

        let Some(new_line) = line.new_line else {
            return;
        };

        // Remote threads, with a count when several share the line
        let threads = self.view.threads.all_at(new_line).len();
        if threads > 0 {
            let indicator = if threads == 1 {
                "💬".to_string()
            } else {
                format!("{}💬", threads)
            };
            let indicator_x = right_edge.saturating_sub(2 + indicator.chars().count() as u16 + 1);
            if indicator_x > current_x {
                buf.set_string(
                    indicator_x,
                    y,
                    indicator,
                    base_style.fg(self.theme.comment_indicator_foreground()),
                );
            }
        }

        if self.pending_lines.contains(&new_line) {
            let indicator_x = right_edge.saturating_sub(1);
            if indicator_x > current_x {
                buf.set_string(
                    indicator_x,
                    y,
                    "●",
                    base_style.fg(self.theme.pending_indicator_foreground()),
                );
            }
        }
    }
}
