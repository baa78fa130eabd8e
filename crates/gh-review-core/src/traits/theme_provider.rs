//! Trait for providing theme configuration to the review widgets.

use ratatui::style::Color;

/// Provides theme colors and styles for the review widgets.
///
/// Only the addition and deletion backgrounds are required; everything else
/// has a dark-mode default. The theme instance is injected by the orchestrator.
///
/// # Example
///
/// ```ignore
/// use gh_review_core::ThemeProvider;
/// use ratatui::style::Color;
///
/// struct MyAppTheme {
///     // ... your theme fields
/// }
///
/// impl ThemeProvider for MyAppTheme {
///     fn addition_background(&self) -> Color {
///         Color::Rgb(30, 60, 30)
///     }
///
///     fn deletion_background(&self) -> Color {
///         Color::Rgb(60, 30, 30)
///     }
///
///     // ... other methods
/// }
/// ```
pub trait ThemeProvider: Send + Sync {
    /// Background color for addition lines.
    fn addition_background(&self) -> Color;

    /// Background color for deletion lines.
    fn deletion_background(&self) -> Color;

    /// Background color for context lines.
    fn context_background(&self) -> Color {
        Color::Reset
    }

    /// Background color for hunk header lines.
    fn hunk_header_background(&self) -> Color {
        Color::Rgb(40, 40, 60)
    }

    /// Foreground color for hunk header text.
    fn hunk_header_foreground(&self) -> Color {
        Color::Cyan
    }

    /// Foreground color for line numbers.
    fn line_number_foreground(&self) -> Color {
        Color::DarkGray
    }

    /// Background color for the cursor/selected line.
    fn cursor_background(&self) -> Color {
        Color::Rgb(50, 50, 80)
    }

    /// Foreground color for the cursor/selected line.
    fn cursor_foreground(&self) -> Color {
        Color::White
    }

    /// Foreground color for comment indicators.
    fn comment_indicator_foreground(&self) -> Color {
        Color::Yellow
    }

    /// Background color for lines inside the active selection.
    fn selection_background(&self) -> Color {
        Color::Rgb(60, 60, 80)
    }

    /// Foreground color for pending annotation markers.
    fn pending_indicator_foreground(&self) -> Color {
        Color::Magenta
    }

    /// Border color for unfocused panes.
    fn border_foreground(&self) -> Color {
        Color::DarkGray
    }

    /// Border color for the focused pane and open forms.
    fn focused_border_foreground(&self) -> Color {
        Color::White
    }

    /// Background color for the selected file in the file list.
    fn file_list_selected_background(&self) -> Color {
        Color::Rgb(50, 50, 80)
    }

    /// Foreground color for the status line.
    fn status_foreground(&self) -> Color {
        Color::Yellow
    }

    /// Foreground color for key hints (the key part like "c", "R").
    fn hint_key_foreground(&self) -> Color {
        Color::Yellow
    }

    /// Foreground color for hint descriptions.
    fn hint_text_foreground(&self) -> Color {
        Color::DarkGray
    }
}

/// Default theme with sensible dark-mode colors.
#[derive(Debug, Clone, Default)]
pub struct DefaultTheme;

impl ThemeProvider for DefaultTheme {
    fn addition_background(&self) -> Color {
        Color::Rgb(30, 60, 30) // dark green
    }

    fn deletion_background(&self) -> Color {
        Color::Rgb(60, 30, 30) // dark red
    }
}
