//! File list widget for switching between changed files.

use crate::model::ChangedFile;
use crate::traits::ThemeProvider;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

/// Widget for rendering the changed files pane.
pub struct FileListWidget<'a, T: ThemeProvider> {
    /// Files in the order the host lists them.
    files: &'a [ChangedFile],
    /// Index of the open file.
    selected: usize,
    /// Pending annotation count per file, same order as `files`.
    pending_counts: Vec<usize>,
    /// Whether this pane is focused.
    focused: bool,
    /// Theme provider.
    theme: &'a T,
}

impl<'a, T: ThemeProvider> FileListWidget<'a, T> {
    /// Create a new file list widget.
    pub fn new(files: &'a [ChangedFile], selected: usize, theme: &'a T) -> Self {
        Self {
            files,
            selected,
            pending_counts: Vec::new(),
            focused: false,
            theme,
        }
    }

    /// Show pending annotation counts next to each file.
    pub fn with_pending_counts(mut self, counts: Vec<usize>) -> Self {
        self.pending_counts = counts;
        self
    }

    /// Set whether the pane has focus.
    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<T: ThemeProvider> Widget for FileListWidget<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.focused_border_foreground())
        } else {
            Style::default().fg(self.theme.border_foreground())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Files ({}) ", self.files.len()));

        let inner = block.inner(area);
        block.render(area, buf);

        let visible_height = inner.height as usize;

        // Keep the selected file visible
        let scroll_offset = if self.selected >= visible_height {
            self.selected - visible_height + 1
        } else {
            0
        };

        for (row, (index, file)) in self
            .files
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(visible_height)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let pending = self.pending_counts.get(index).copied().unwrap_or(0);
            self.render_entry(file, pending, inner.x, y, inner.width, index == self.selected, buf);
        }
    }
}

impl<T: ThemeProvider> FileListWidget<'_, T> {
    #[allow(clippy::too_many_arguments)]
    fn render_entry(
        &self,
        file: &ChangedFile,
        pending: usize,
        x: u16,
        y: u16,
        width: u16,
        selected: bool,
        buf: &mut Buffer,
    ) {
        let base_style = if selected {
            Style::default()
                .fg(self.theme.cursor_foreground())
                .bg(self.theme.file_list_selected_background())
        } else {
            Style::default()
        };

        if selected {
            buf.set_style(Rect::new(x, y, width, 1), base_style);
        }

        let right_edge = x + width;

        let status_style = if selected {
            base_style
        } else {
            base_style.fg(file.status.color())
        };
        buf.set_string(x, y, format!("{} ", file.status.as_char()), status_style);
        let mut current_x = x + 2;

        // Right-aligned: pending marker, then +/- stats
        let marker = if pending > 0 {
            format!(" ●{}", pending)
        } else {
            String::new()
        };
        let stats = format!(" +{} -{}", file.additions, file.deletions);
        let tail_width = (marker.chars().count() + stats.len()) as u16;

        let name_width = right_edge.saturating_sub(current_x).saturating_sub(tail_width) as usize;
        let name = file.display_name();
        let name = if name.chars().count() > name_width {
            let kept: String = name
                .chars()
                .skip(name.chars().count() - name_width.saturating_sub(1))
                .collect();
            format!("…{}", kept)
        } else {
            name
        };
        buf.set_stringn(current_x, y, &name, name_width, base_style);
        current_x += name.chars().count() as u16;

        let stats_x = right_edge.saturating_sub(tail_width);
        if stats_x < current_x {
            return;
        }
        let (add_style, del_style) = if selected {
            (base_style, base_style)
        } else {
            (base_style.fg(Color::Green), base_style.fg(Color::Red))
        };
        let additions = format!(" +{}", file.additions);
        buf.set_string(stats_x, y, &additions, add_style);
        buf.set_string(
            stats_x + additions.len() as u16,
            y,
            format!(" -{}", file.deletions),
            del_style,
        );

        if !marker.is_empty() {
            buf.set_string(
                stats_x + stats.len() as u16,
                y,
                &marker,
                base_style.fg(self.theme.pending_indicator_foreground()),
            );
        }
    }
}
