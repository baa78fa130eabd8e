//! Parse the unified diff patch of a single file (as returned by the GitHub files API).

use crate::model::{DiffLine, ParsedDiff};
use log::{debug, trace, warn};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Conditions the parser recovered from while reading a patch.
///
/// These are never returned as errors; they are recorded on the parser so the
/// caller can log or display them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffIssue {
    /// The patch text was empty (binary or oversized file).
    #[error("patch is empty")]
    EmptyPatch,
    /// A `@@` line did not carry parseable line numbers; counters were kept.
    #[error("malformed hunk header at line {index}: {header}")]
    MalformedHunkHeader { index: usize, header: String },
}

/// Running old/new line numbers while scanning a patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounters {
    /// Next line number in the old file.
    pub old: u32,
    /// Next line number in the new file.
    pub new: u32,
}

/// Incremental unified diff parser.
///
/// Feed lines one at a time with [`DiffParser::feed`] or parse a whole patch
/// with [`DiffParser::parse`]. Counters and recovered issues stay inspectable
/// afterwards.
#[derive(Debug, Default)]
pub struct DiffParser {
    counters: LineCounters,
    lines: Vec<DiffLine>,
    issues: Vec<DiffIssue>,
}

impl DiffParser {
    /// Create a parser with both counters at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter values.
    pub fn counters(&self) -> LineCounters {
        self.counters
    }

    /// Issues recovered from so far.
    pub fn issues(&self) -> &[DiffIssue] {
        &self.issues
    }

    /// Consume one raw patch line (without its trailing `\n`).
    pub fn feed(&mut self, raw: &str) {
        if raw.starts_with("@@") {
            self.feed_hunk(raw);
        } else if raw.starts_with("+++") || raw.starts_with("---") {
            self.lines.push(DiffLine::header(raw));
        } else if let Some(text) = raw.strip_prefix('+') {
            let line = DiffLine {
                raw: raw.to_string(),
                ..DiffLine::added(text, self.counters.new)
            };
            self.counters.new = self.counters.new.saturating_add(1);
            self.lines.push(line);
        } else if let Some(text) = raw.strip_prefix('-') {
            let line = DiffLine {
                raw: raw.to_string(),
                ..DiffLine::removed(text, self.counters.old)
            };
            self.counters.old = self.counters.old.saturating_add(1);
            self.lines.push(line);
        } else if let Some(text) = raw.strip_prefix(' ') {
            self.push_context(text, raw);
        } else if raw.trim().is_empty() {
            // Blank context lines sometimes lose their leading space
            self.push_context("", raw);
        } else {
            trace!("Dropping unrecognized diff line: {:?}", raw);
        }
    }

    /// Parse a complete patch, returning the lines produced by it.
    ///
    /// Never fails: an empty patch yields an empty diff and records
    /// [`DiffIssue::EmptyPatch`].
    pub fn parse(&mut self, text: &str) -> ParsedDiff {
        if text.is_empty() {
            debug!("Empty patch, nothing to parse");
            self.issues.push(DiffIssue::EmptyPatch);
            return ParsedDiff::empty();
        }

        for raw in text.split_terminator('\n') {
            self.feed(raw);
        }

        ParsedDiff::new(std::mem::take(&mut self.lines), text.ends_with('\n'))
    }

    /// Turn the lines fed so far into a diff.
    pub fn finish(self) -> ParsedDiff {
        ParsedDiff::new(self.lines, true)
    }

    fn push_context(&mut self, text: &str, raw: &str) {
        let line = DiffLine {
            raw: raw.to_string(),
            ..DiffLine::context(text, self.counters.old, self.counters.new)
        };
        self.counters.old = self.counters.old.saturating_add(1);
        self.counters.new = self.counters.new.saturating_add(1);
        self.lines.push(line);
    }

    fn feed_hunk(&mut self, raw: &str) {
        match parse_hunk_header(raw) {
            Some((old, new)) => self.counters = LineCounters { old, new },
            None => {
                warn!("Malformed hunk header, keeping line counters: {}", raw);
                self.issues.push(DiffIssue::MalformedHunkHeader {
                    index: self.lines.len(),
                    header: raw.to_string(),
                });
            }
        }
        self.lines.push(DiffLine::hunk(raw));
    }
}

/// Parse a single file patch into a [`ParsedDiff`].
///
/// Joining the `raw` fields of the result with `\n` (see
/// [`ParsedDiff::to_patch_text`]) reproduces the input, as long as the input
/// contains only header, hunk, context, added, removed and blank lines.
pub fn parse_patch(text: &str) -> ParsedDiff {
    let mut parser = DiffParser::new();
    let diff = parser.parse(text);
    for issue in parser.issues() {
        debug!("Recovered while parsing patch: {}", issue);
    }
    diff
}

/// Extract the old and new start lines from `@@ -OLD,LEN +NEW,LEN @@`.
fn parse_hunk_header(line: &str) -> Option<(u32, u32)> {
    static HUNK_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = HUNK_REGEX.get_or_init(|| {
        // Lengths are optional: "@@ -1 +1 @@" is valid for one-line hunks
        Regex::new(r"@@ -(\d+),?\d* \+(\d+),?\d* @@").expect("hunk header pattern is valid")
    });

    let captures = re.captures(line)?;
    let old = captures.get(1)?.as_str().parse().ok()?;
    let new = captures.get(2)?.as_str().parse().ok()?;
    Some((old, new))
}
