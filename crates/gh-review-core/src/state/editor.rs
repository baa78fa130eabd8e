//! Multi-line text buffer with a byte cursor, used by every form.

/// Editable text with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEditor {
    /// The text being edited.
    pub text: String,
    /// Cursor position (byte offset, always on a char boundary).
    pub cursor: usize,
}

impl TextEditor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor seeded with text, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            let prev_char_start = self.text[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.remove(prev_char_start);
            self.cursor = prev_char_start;
        }
    }

    /// Delete the character at the cursor (delete key).
    pub fn delete_char_at(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    /// Move cursor left by one character.
    pub fn cursor_left(&mut self) {
        self.cursor = self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }

    /// Move cursor right by one character.
    pub fn cursor_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Move cursor to the start of the line.
    pub fn cursor_home(&mut self) {
        self.cursor = self.text[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
    }

    /// Move cursor to the end of the line.
    pub fn cursor_end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.text.len());
    }

    /// Insert a newline.
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Check if the text is empty (ignoring whitespace).
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get the current line number (0-indexed).
    pub fn current_line(&self) -> usize {
        self.text[..self.cursor].matches('\n').count()
    }

    /// Get the cursor column on the current line, in characters.
    pub fn current_column(&self) -> usize {
        let line_start = self.text[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        self.text[line_start..self.cursor].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_and_delete() {
        let mut editor = TextEditor::new();

        editor.insert_str("Hello");
        assert_eq!(editor.text, "Hello");
        assert_eq!(editor.cursor, 5);

        editor.insert_char('!');
        assert_eq!(editor.text, "Hello!");

        editor.delete_char_before();
        assert_eq!(editor.text, "Hello");

        editor.cursor = 0;
        editor.delete_char_at();
        assert_eq!(editor.text, "ello");
    }

    #[test]
    fn test_cursor_movement() {
        let mut editor = TextEditor::with_text("Hello\nWorld");

        editor.cursor_home();
        assert_eq!(editor.cursor, 6); // Start of "World"

        editor.cursor_end();
        assert_eq!(editor.cursor, 11);

        editor.cursor = 0;
        editor.cursor_end();
        assert_eq!(editor.cursor, 5); // End of "Hello"
    }

    #[test]
    fn test_multibyte_characters() {
        let mut editor = TextEditor::with_text("añb");
        editor.cursor_left();
        editor.cursor_left();
        assert_eq!(editor.cursor, 1);
        assert_eq!(editor.current_column(), 1);

        editor.cursor_right();
        assert_eq!(editor.cursor, 3);

        editor.delete_char_before();
        assert_eq!(editor.text, "ab");
    }

    #[test]
    fn test_line_info() {
        let mut editor = TextEditor::with_text("Line 1\nLine 2\nLine 3");
        assert_eq!(editor.current_line(), 2);

        editor.cursor = 8; // "i" in "Line 2"
        assert_eq!(editor.current_line(), 1);
        assert_eq!(editor.current_column(), 1);
    }

    #[test]
    fn test_is_blank() {
        assert!(TextEditor::with_text("  \n\t").is_blank());
        assert!(!TextEditor::with_text(" x ").is_blank());
    }
}
