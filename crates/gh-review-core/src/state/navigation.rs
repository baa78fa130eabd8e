//! Cursor, scroll and line-range selection over a parsed diff.
//!
//! All transitions are pure: they take the current state and return the next
//! one. Out-of-range moves are clamped, never wrapped.

/// Size of the scrollable content and of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Number of lines in the diff.
    pub total_lines: usize,
    /// Number of rows the diff pane can show (at least 1).
    pub visible_height: usize,
}

impl Viewport {
    /// Create a viewport. A zero height is treated as one row.
    pub fn new(total_lines: usize, visible_height: usize) -> Self {
        Self {
            total_lines,
            visible_height: visible_height.max(1),
        }
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height)
    }

    /// Number of rows actually showing content at the given offset.
    fn rows_at(&self, scroll_offset: usize) -> usize {
        self.total_lines
            .saturating_sub(scroll_offset)
            .min(self.visible_height)
    }
}

/// An in-progress multi-line selection in new-file line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSelection {
    /// Line where the selection started.
    pub anchor: u32,
    /// Line the selection currently extends to.
    pub end: u32,
}

impl LineSelection {
    /// `(min, max)` of anchor and end.
    pub fn normalized(&self) -> (u32, u32) {
        (self.anchor.min(self.end), self.anchor.max(self.end))
    }
}

/// Navigation intents understood by [`SelectionState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,
    /// Bring the given absolute line index to the top of the window.
    JumpTo(usize),
}

/// Cursor and scroll position plus the optional selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Cursor row within the visible window.
    pub cursor_index: usize,
    /// Index of the first visible line.
    pub scroll_offset: usize,
    /// Active selection, if any.
    pub selection: Option<LineSelection>,
}

impl SelectionState {
    /// Create a state at the top of the diff with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the cursor line within the whole diff.
    pub fn absolute_index(&self) -> usize {
        self.scroll_offset + self.cursor_index
    }

    /// Apply a navigation intent.
    pub fn apply(self, intent: NavIntent, viewport: Viewport) -> Self {
        match intent {
            NavIntent::MoveUp => self.move_up(),
            NavIntent::MoveDown => self.move_down(viewport),
            NavIntent::PageUp => self.page_up(viewport),
            NavIntent::PageDown => self.page_down(viewport),
            NavIntent::JumpTop => self.jump_top(),
            NavIntent::JumpBottom => self.jump_bottom(viewport),
            NavIntent::JumpTo(index) => self.jump_to(index, viewport),
        }
    }

    /// Move the cursor up one row, scrolling when it sits on the top edge.
    pub fn move_up(self) -> Self {
        if self.cursor_index > 0 {
            Self {
                cursor_index: self.cursor_index - 1,
                ..self
            }
        } else {
            Self {
                scroll_offset: self.scroll_offset.saturating_sub(1),
                ..self
            }
        }
    }

    /// Move the cursor down one row, scrolling when it sits on the bottom edge.
    pub fn move_down(self, viewport: Viewport) -> Self {
        if self.absolute_index() + 1 >= viewport.total_lines {
            return self;
        }
        if self.cursor_index + 1 < viewport.visible_height {
            Self {
                cursor_index: self.cursor_index + 1,
                ..self
            }
        } else {
            Self {
                scroll_offset: (self.scroll_offset + 1).min(viewport.max_scroll()),
                ..self
            }
        }
    }

    /// Scroll up a full page and put the cursor on the first row.
    pub fn page_up(self, viewport: Viewport) -> Self {
        Self {
            cursor_index: 0,
            scroll_offset: self.scroll_offset.saturating_sub(viewport.visible_height),
            ..self
        }
    }

    /// Scroll down a full page and put the cursor on the first row.
    pub fn page_down(self, viewport: Viewport) -> Self {
        Self {
            cursor_index: 0,
            scroll_offset: (self.scroll_offset + viewport.visible_height)
                .min(viewport.max_scroll()),
            ..self
        }
    }

    /// Go to the first line.
    pub fn jump_top(self) -> Self {
        Self {
            cursor_index: 0,
            scroll_offset: 0,
            ..self
        }
    }

    /// Scroll to the end and put the cursor on the last visible row.
    pub fn jump_bottom(self, viewport: Viewport) -> Self {
        let scroll_offset = viewport.max_scroll();
        Self {
            cursor_index: viewport.rows_at(scroll_offset).saturating_sub(1),
            scroll_offset,
            ..self
        }
    }

    /// Place the cursor on `index`, scrolling it as close to the top as possible.
    pub fn jump_to(self, index: usize, viewport: Viewport) -> Self {
        let index = index.min(viewport.total_lines.saturating_sub(1));
        let scroll_offset = index.min(viewport.max_scroll());
        Self {
            cursor_index: index - scroll_offset,
            scroll_offset,
            ..self
        }
    }

    /// Pull cursor and scroll back into range after the viewport changed.
    pub fn clamp(self, viewport: Viewport) -> Self {
        let scroll_offset = self.scroll_offset.min(viewport.max_scroll());
        let cursor_index = self
            .cursor_index
            .min(viewport.rows_at(scroll_offset).saturating_sub(1));
        Self {
            cursor_index,
            scroll_offset,
            ..self
        }
    }

    /// Start a selection at the given new-file line.
    pub fn begin_selection(self, line: u32) -> Self {
        Self {
            selection: Some(LineSelection {
                anchor: line,
                end: line,
            }),
            ..self
        }
    }

    /// Move the selection end. Does nothing without an active selection.
    pub fn extend_selection(self, line: u32) -> Self {
        match self.selection {
            Some(selection) => Self {
                selection: Some(LineSelection { end: line, ..selection }),
                ..self
            },
            None => self,
        }
    }

    /// Drop the selection.
    pub fn cancel_selection(self) -> Self {
        Self {
            selection: None,
            ..self
        }
    }

    /// Check if a selection is active.
    pub fn is_selecting(&self) -> bool {
        self.selection.is_some()
    }

    /// The selected line range as `(min, max)`.
    pub fn normalized_range(&self) -> Option<(u32, u32)> {
        self.selection.map(|s| s.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(cursor_index: usize, scroll_offset: usize) -> SelectionState {
        SelectionState {
            cursor_index,
            scroll_offset,
            selection: None,
        }
    }

    #[test]
    fn test_cursor_movement_within_window() {
        let vp = Viewport::new(50, 10);

        let s = SelectionState::new().move_down(vp);
        assert_eq!(s, state(1, 0));

        let s = s.move_up();
        assert_eq!(s, state(0, 0));

        // Can't go below 0
        assert_eq!(s.move_up(), state(0, 0));
    }

    #[test]
    fn test_cursor_at_edge_scrolls() {
        let vp = Viewport::new(50, 10);

        let s = state(9, 0).move_down(vp);
        assert_eq!(s, state(9, 1));

        let s = state(0, 5).move_up();
        assert_eq!(s, state(0, 4));
    }

    #[test]
    fn test_scroll_clamped_to_max() {
        let vp = Viewport::new(15, 10);
        assert_eq!(vp.max_scroll(), 5);

        // Last line is under the cursor, nothing more to show
        let s = state(9, 5).move_down(vp);
        assert_eq!(s, state(9, 5));

        let s = state(0, 3).page_down(vp);
        assert_eq!(s, state(0, 5));

        let s = state(4, 3).page_up(vp);
        assert_eq!(s, state(0, 0));
    }

    #[test]
    fn test_short_diff_never_scrolls() {
        let vp = Viewport::new(3, 10);

        let s = state(2, 0).move_down(vp);
        assert_eq!(s, state(2, 0));
        assert_eq!(state(1, 0).page_down(vp), state(0, 0));
        assert_eq!(state(0, 0).jump_bottom(vp), state(2, 0));
    }

    #[test]
    fn test_jump_top_and_bottom() {
        let vp = Viewport::new(100, 20);

        let s = state(3, 40).jump_bottom(vp);
        assert_eq!(s, state(19, 80));
        assert_eq!(s.absolute_index(), 99);

        assert_eq!(s.jump_top(), state(0, 0));
    }

    #[test]
    fn test_empty_diff_is_stable() {
        let vp = Viewport::new(0, 20);
        let s = SelectionState::new();

        assert_eq!(s.move_down(vp), s);
        assert_eq!(s.page_down(vp), s);
        assert_eq!(s.jump_bottom(vp), s);
        assert_eq!(s.jump_to(7, vp), s);
    }

    #[test]
    fn test_jump_to_scrolls_line_to_top() {
        let vp = Viewport::new(100, 20);

        assert_eq!(state(0, 0).jump_to(30, vp), state(0, 30));
        // Near the end the scroll offset is clamped and the cursor moves instead
        assert_eq!(state(0, 0).jump_to(95, vp), state(15, 80));
    }

    #[test]
    fn test_clamp_after_viewport_shrinks() {
        let s = state(15, 70).clamp(Viewport::new(30, 20));
        assert_eq!(s, state(15, 10));

        let s = state(15, 0).clamp(Viewport::new(5, 20));
        assert_eq!(s, state(4, 0));
    }

    #[test]
    fn test_apply_dispatches_intents() {
        let vp = Viewport::new(100, 20);
        let s = SelectionState::new()
            .apply(NavIntent::MoveDown, vp)
            .apply(NavIntent::PageDown, vp)
            .apply(NavIntent::MoveDown, vp);
        assert_eq!(s, state(1, 20));
    }

    #[test]
    fn test_selection_range() {
        let s = SelectionState::new().begin_selection(5).extend_selection(8);
        assert_eq!(s.normalized_range(), Some((5, 8)));

        let s = s.extend_selection(2);
        assert_eq!(s.normalized_range(), Some((2, 5)));

        let s = s.cancel_selection();
        assert_eq!(s.normalized_range(), None);
    }

    #[test]
    fn test_extend_without_selection_is_noop() {
        let s = SelectionState::new().extend_selection(4);
        assert!(!s.is_selecting());
    }

    #[test]
    fn test_selection_survives_navigation() {
        let vp = Viewport::new(100, 20);
        let s = SelectionState::new()
            .begin_selection(3)
            .apply(NavIntent::PageDown, vp);
        assert_eq!(s.normalized_range(), Some((3, 3)));
    }
}
