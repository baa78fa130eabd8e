//! Diff data structures for a single file patch.

use ratatui::style::Color;
use std::ops::Deref;
use std::sync::Arc;

/// Line type in a parsed patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `---` / `+++` file header.
    Header,
    /// `@@ -a,b +c,d @@` marker.
    Hunk,
    /// Unchanged line.
    Context,
    /// Added line (+).
    Added,
    /// Removed line (-).
    Removed,
}

impl LineKind {
    /// Get the prefix character shown in front of the line text.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Added => '+',
            LineKind::Removed => '-',
            LineKind::Context | LineKind::Header | LineKind::Hunk => ' ',
        }
    }

    /// Whether this is a `Header` or `Hunk` marker line.
    pub fn is_marker(&self) -> bool {
        matches!(self, LineKind::Header | LineKind::Hunk)
    }

    /// Whether this line holds source code (context, added or removed).
    pub fn is_code(&self) -> bool {
        matches!(self, LineKind::Context | LineKind::Added | LineKind::Removed)
    }
}

/// One visual row of a parsed patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content with the diff prefix stripped. Markers keep the full line.
    pub text: String,
    /// Line number in the old file (Context and Removed).
    pub old_line: Option<u32>,
    /// Line number in the new file (Context and Added).
    pub new_line: Option<u32>,
    /// The unmodified source line.
    pub raw: String,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(text: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        let text = text.into();
        Self {
            kind: LineKind::Context,
            raw: format!(" {}", text),
            text,
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create a new added line.
    pub fn added(text: impl Into<String>, new_line: u32) -> Self {
        let text = text.into();
        Self {
            kind: LineKind::Added,
            raw: format!("+{}", text),
            text,
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a new removed line.
    pub fn removed(text: impl Into<String>, old_line: u32) -> Self {
        let text = text.into();
        Self {
            kind: LineKind::Removed,
            raw: format!("-{}", text),
            text,
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// Create a hunk marker line.
    pub fn hunk(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            kind: LineKind::Hunk,
            text: raw.clone(),
            old_line: None,
            new_line: None,
            raw,
        }
    }

    /// Create a file header line.
    pub fn header(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            kind: LineKind::Header,
            text: raw.clone(),
            old_line: None,
            new_line: None,
            raw,
        }
    }

    /// Get the line number to display (prefers new_line, falls back to old_line).
    pub fn display_line_number(&self) -> Option<u32> {
        self.new_line.or(self.old_line)
    }
}

/// An immutable, shareable sequence of parsed lines for one file patch.
///
/// Cloning is cheap; clones share the same line storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDiff {
    lines: Arc<[DiffLine]>,
    trailing_newline: bool,
}

impl Default for ParsedDiff {
    fn default() -> Self {
        Self::empty()
    }
}

impl ParsedDiff {
    /// Build a diff from lines, recording whether the source text ended with `\n`.
    pub fn new(lines: Vec<DiffLine>, trailing_newline: bool) -> Self {
        Self {
            lines: lines.into(),
            trailing_newline,
        }
    }

    /// A diff with no lines (binary, too large, or missing patch).
    pub fn empty() -> Self {
        Self::new(Vec::new(), false)
    }

    /// All lines in parse order.
    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    /// Reassemble the patch text from the `raw` fields.
    pub fn to_patch_text(&self) -> String {
        let mut text = self
            .lines
            .iter()
            .map(|l| l.raw.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            text.push('\n');
        }
        text
    }

    /// Find the index of the line carrying the given new-file line number.
    pub fn index_of_new_line(&self, new_line: u32) -> Option<usize> {
        self.lines.iter().position(|l| l.new_line == Some(new_line))
    }

    /// Indices of all hunk markers.
    pub fn hunk_indices(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.kind == LineKind::Hunk)
            .map(|(i, _)| i)
            .collect()
    }

    /// Largest line number in either file version.
    pub fn max_line_no(&self) -> u32 {
        self.lines
            .iter()
            .flat_map(|l| [l.old_line, l.new_line])
            .flatten()
            .max()
            .unwrap_or(1)
    }

    /// Width of the line number gutter columns.
    pub fn line_no_width(&self) -> usize {
        self.max_line_no().to_string().len().max(4)
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.count_kind(LineKind::Added)
    }

    /// Number of removed lines.
    pub fn deletions(&self) -> usize {
        self.count_kind(LineKind::Removed)
    }

    fn count_kind(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

impl Deref for ParsedDiff {
    type Target = [DiffLine];

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

/// File status in the pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileStatus {
    Added,
    #[default]
    Modified,
    Removed,
    Renamed,
    Copied,
    Changed,
    Unchanged,
}

impl FileStatus {
    /// Parse the status string reported by the GitHub files endpoint.
    pub fn from_github_str(status: &str) -> Self {
        match status {
            "added" => FileStatus::Added,
            "removed" => FileStatus::Removed,
            "renamed" => FileStatus::Renamed,
            "copied" => FileStatus::Copied,
            "changed" => FileStatus::Changed,
            "unchanged" => FileStatus::Unchanged,
            _ => FileStatus::Modified,
        }
    }

    /// Get a single-character representation.
    pub fn as_char(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified | FileStatus::Changed => 'M',
            FileStatus::Removed => 'D',
            FileStatus::Renamed => 'R',
            FileStatus::Copied => 'C',
            FileStatus::Unchanged => ' ',
        }
    }

    /// Get the status color.
    pub fn color(&self) -> Color {
        match self {
            FileStatus::Added => Color::Green,
            FileStatus::Modified | FileStatus::Changed => Color::Yellow,
            FileStatus::Removed => Color::Red,
            FileStatus::Renamed | FileStatus::Copied => Color::Cyan,
            FileStatus::Unchanged => Color::DarkGray,
        }
    }
}

/// A file changed by the pull request, as listed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Current file path.
    pub path: String,
    /// Previous path if renamed.
    pub previous_path: Option<String>,
    /// Unified diff text. `None` for binary or oversized files.
    pub patch: Option<String>,
    /// Number of added lines reported by the host.
    pub additions: u32,
    /// Number of deleted lines reported by the host.
    pub deletions: u32,
    /// File status.
    pub status: FileStatus,
}

impl ChangedFile {
    /// Create a modified file with a patch.
    pub fn new(path: impl Into<String>, patch: Option<String>) -> Self {
        Self {
            path: path.into(),
            previous_path: None,
            patch,
            additions: 0,
            deletions: 0,
            status: FileStatus::Modified,
        }
    }

    /// Get the display name for the file (handles renames).
    pub fn display_name(&self) -> String {
        match self.previous_path {
            Some(ref old) if old != &self.path => format!("{} → {}", old, self.path),
            _ => self.path.clone(),
        }
    }
}
