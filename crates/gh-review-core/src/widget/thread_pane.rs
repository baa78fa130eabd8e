//! Remote comment threads of the cursor line.

use crate::model::{CommentThread, ReviewComment};
use crate::traits::ThemeProvider;
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

/// Widget showing every thread anchored at the cursor line.
///
/// Each thread lists its top-level comment followed by the replies in
/// creation order. When several threads share the line, the one replies go
/// to is marked.
pub struct ThreadPaneWidget<'a, T: ThemeProvider> {
    /// Threads anchored at the cursor line.
    threads: &'a [CommentThread],
    /// Index of the thread replies go to.
    focus: usize,
    /// Theme provider.
    theme: &'a T,
}

impl<'a, T: ThemeProvider> ThreadPaneWidget<'a, T> {
    /// Create a new thread pane for the given threads.
    pub fn new(threads: &'a [CommentThread], theme: &'a T) -> Self {
        Self {
            threads,
            focus: 0,
            theme,
        }
    }

    /// Mark the thread replies go to.
    pub fn with_focus(mut self, focus: usize) -> Self {
        self.focus = focus;
        self
    }

    fn thread_header(&self, index: usize, thread: &CommentThread) -> Line<'static> {
        let anchor = match thread.start_line() {
            Some(start) => format!("lines {}-{}", start, thread.line()),
            None => format!("line {}", thread.line()),
        };
        let focused = index == self.focus;
        let marker = if focused { "▶ " } else { "  " };
        let text = if self.threads.len() > 1 {
            format!("{}Thread {}/{} on {}", marker, index + 1, self.threads.len(), anchor)
        } else {
            format!("{}Thread on {}", marker, anchor)
        };
        let mut style = Style::default().fg(self.theme.comment_indicator_foreground());
        if focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        Line::from(Span::styled(text, style))
    }

    fn comment_lines(&self, comment: &ReviewComment, indent: &str) -> Vec<Line<'static>> {
        let prefix = if comment.is_reply() { "↳ " } else { "" };
        let mut lines = vec![Line::from(vec![
            Span::raw(format!("{}{}", indent, prefix)),
            Span::styled(
                comment.author.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" · {}", comment.created_at.format("%Y-%m-%d %H:%M")),
                Style::default().fg(self.theme.hint_text_foreground()),
            ),
        ])];
        let body_indent = format!("{}  ", indent);
        lines.extend(
            comment
                .body
                .lines()
                .map(|text| Line::from(format!("{}{}", body_indent, text))),
        );
        lines
    }
}

impl<T: ThemeProvider> Widget for ThreadPaneWidget<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_foreground()))
            .title(" Comments ");

        let inner = block.inner(area);
        block.render(area, buf);

        if self.threads.is_empty() {
            buf.set_stringn(
                inner.x,
                inner.y,
                "No comments on this line",
                inner.width as usize,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let mut lines = Vec::new();
        for (index, thread) in self.threads.iter().enumerate() {
            if index > 0 {
                lines.push(Line::default());
            }
            lines.push(self.thread_header(index, thread));
            lines.extend(self.comment_lines(&thread.top_level, " "));
            for reply in &thread.replies {
                lines.extend(self.comment_lines(reply, "   "));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
