//! Rules for where inline comments and code suggestions may be placed.
//!
//! GitHub only accepts review comments anchored on lines that exist in the
//! new file version, so removed lines and diff markers are never valid
//! anchors.

use crate::model::{DiffLine, LineKind, ParsedDiff};
use log::debug;
use thiserror::Error;

/// Why a suggestion cannot be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SuggestionRejection {
    #[error("cannot suggest on deleted lines")]
    DeletedLine,
    #[error("cannot suggest on diff headers")]
    DiffHeader,
    #[error("selection spans deleted code")]
    SpansDeletedCode,
    #[error("selection spans diff headers")]
    SpansDiffHeaders,
    #[error("no valid position for this line")]
    NoValidPosition,
}

/// Why a comment cannot be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommentRejection {
    #[error("cannot comment on deleted lines")]
    DeletedLine,
    #[error("cannot comment on diff headers")]
    DiffHeader,
    #[error("selection spans diff headers")]
    SpansDiffHeaders,
    #[error("no valid position for this line")]
    NoValidPosition,
}

/// Whether a single line can carry an inline comment.
pub fn can_comment(line: &DiffLine) -> bool {
    matches!(line.kind, LineKind::Context | LineKind::Added) && line.new_line.is_some()
}

/// Check that `span` (inclusive, in display order) can anchor a comment.
///
/// Both endpoints must be commentable and no marker line may sit between them.
/// Removed lines inside the span are allowed.
pub fn can_comment_range(span: &[DiffLine]) -> Result<(), CommentRejection> {
    let (Some(first), Some(last)) = (span.first(), span.last()) else {
        return Err(CommentRejection::NoValidPosition);
    };

    for endpoint in [first, last] {
        match endpoint.kind {
            LineKind::Removed => return Err(CommentRejection::DeletedLine),
            LineKind::Header | LineKind::Hunk => return Err(CommentRejection::DiffHeader),
            LineKind::Context | LineKind::Added => {}
        }
    }
    if span.iter().any(|l| l.kind.is_marker()) {
        return Err(CommentRejection::SpansDiffHeaders);
    }
    if !can_comment(first) || !can_comment(last) {
        return Err(CommentRejection::NoValidPosition);
    }
    Ok(())
}

/// Check that `span` (inclusive, in display order) can carry a suggestion.
///
/// The last line of the span is the anchor line. Any removed line in the span
/// yields a rejection mentioning deleted code.
pub fn can_suggest(span: &[DiffLine]) -> Result<(), SuggestionRejection> {
    let Some(target) = span.last() else {
        return Err(SuggestionRejection::NoValidPosition);
    };

    if target.kind == LineKind::Removed {
        return Err(SuggestionRejection::DeletedLine);
    }
    if span.iter().any(|l| l.kind == LineKind::Removed) {
        return Err(SuggestionRejection::SpansDeletedCode);
    }
    if target.kind.is_marker() {
        return Err(SuggestionRejection::DiffHeader);
    }
    if span.iter().any(|l| l.kind.is_marker()) {
        return Err(SuggestionRejection::SpansDiffHeaders);
    }
    if target.new_line.is_none() {
        return Err(SuggestionRejection::NoValidPosition);
    }
    Ok(())
}

/// Text of the code lines between two indices (inclusive, either order).
///
/// Never returns an empty vector: if nothing can be extracted a single empty
/// string is returned so an editor always has something to seed.
pub fn original_lines(lines: &[DiffLine], start: usize, end: usize) -> Vec<String> {
    let (start, end) = (start.min(end), start.max(end));
    let extracted: Vec<String> = lines
        .iter()
        .skip(start)
        .take(end.saturating_sub(start) + 1)
        .filter(|l| l.kind.is_code())
        .map(|l| l.text.clone())
        .collect();

    if extracted.is_empty() {
        vec![String::new()]
    } else {
        extracted
    }
}

/// A validated anchor for a new annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Anchor line in the new file version.
    pub line: u32,
    /// First line for multi-line anchors.
    pub start_line: Option<u32>,
    /// Display indices of the span, inclusive.
    pub span: (usize, usize),
}

/// Validates annotation requests against one parsed diff.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationValidator<'a> {
    diff: &'a ParsedDiff,
}

impl<'a> AnnotationValidator<'a> {
    pub fn new(diff: &'a ParsedDiff) -> Self {
        Self { diff }
    }

    /// Check a single line by display index.
    pub fn can_comment(&self, index: usize) -> bool {
        self.diff.get(index).is_some_and(can_comment)
    }

    /// Map a range of new-file line numbers to display indices.
    pub fn span_for_range(&self, start_line: u32, end_line: u32) -> Option<(usize, usize)> {
        let (low, high) = (start_line.min(end_line), start_line.max(end_line));
        let start = self.diff.index_of_new_line(low)?;
        let end = self.diff.index_of_new_line(high)?;
        Some((start, end))
    }

    /// Validate a comment over the display span `start..=end`.
    pub fn check_comment(&self, start: usize, end: usize) -> Result<Anchor, CommentRejection> {
        let span = self.span(start, end);
        can_comment_range(span).inspect_err(|reason| debug!("Comment rejected: {}", reason))?;
        self.anchor(start, end)
            .ok_or(CommentRejection::NoValidPosition)
    }

    /// Validate a suggestion over the display span `start..=end`.
    pub fn check_suggestion(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Anchor, SuggestionRejection> {
        let span = self.span(start, end);
        can_suggest(span).inspect_err(|reason| debug!("Suggestion rejected: {}", reason))?;
        self.anchor(start, end)
            .ok_or(SuggestionRejection::NoValidPosition)
    }

    /// Code being replaced by a suggestion over `start..=end`.
    pub fn original_lines(&self, start: usize, end: usize) -> Vec<String> {
        original_lines(self.diff, start, end)
    }

    fn span(&self, start: usize, end: usize) -> &'a [DiffLine] {
        let (start, end) = (start.min(end), start.max(end));
        let lines = self.diff.lines();
        if start >= lines.len() {
            return &[];
        }
        &lines[start..=end.min(lines.len() - 1)]
    }

    fn anchor(&self, start: usize, end: usize) -> Option<Anchor> {
        let (start, end) = (start.min(end), start.max(end));
        let line = self.diff.get(end)?.new_line?;
        let first = self.diff.get(start)?.new_line?;
        Some(Anchor {
            line,
            start_line: (first != line).then_some(first),
            span: (start, end),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_patch;
    use pretty_assertions::assert_eq;

    const PATCH: &str = "\
@@ -1,4 +1,5 @@
 fn main() {
-    let a = 1;
+    let a = 2;
+    let b = 3;
     run(a);
@@ -10,2 +11,2 @@
 }
";

    fn malformed_added() -> DiffLine {
        DiffLine {
            new_line: None,
            ..DiffLine::added("x", 1)
        }
    }

    #[test]
    fn test_can_comment() {
        let diff = parse_patch(PATCH);
        let kinds: Vec<bool> = diff.iter().map(can_comment).collect();
        assert_eq!(kinds, vec![false, true, false, true, true, true, false, true]);
        assert!(!can_comment(&malformed_added()));
    }

    #[test]
    fn test_single_line_suggestion_rules() {
        let diff = parse_patch(PATCH);
        assert_eq!(
            can_suggest(&diff[2..=2]),
            Err(SuggestionRejection::DeletedLine)
        );
        assert_eq!(can_suggest(&diff[0..=0]), Err(SuggestionRejection::DiffHeader));
        assert_eq!(can_suggest(&diff[3..=3]), Ok(()));
        assert_eq!(
            can_suggest(&[malformed_added()]),
            Err(SuggestionRejection::NoValidPosition)
        );
        assert_eq!(can_suggest(&[]), Err(SuggestionRejection::NoValidPosition));
    }

    #[test]
    fn test_span_suggestion_rules() {
        let diff = parse_patch(PATCH);
        assert_eq!(
            can_suggest(&diff[1..=3]),
            Err(SuggestionRejection::SpansDeletedCode)
        );
        assert_eq!(
            can_suggest(&diff[5..=7]),
            Err(SuggestionRejection::SpansDiffHeaders)
        );
        assert_eq!(can_suggest(&diff[3..=5]), Ok(()));
    }

    #[test]
    fn test_any_deleted_line_mentions_deleted() {
        let diff = parse_patch(PATCH);
        for (start, end) in [(0, 2), (0, 7), (2, 6), (1, 2), (2, 3)] {
            let reason = can_suggest(&diff[start..=end]).unwrap_err();
            assert!(
                reason.to_string().contains("deleted"),
                "span {}..={} gave {:?}",
                start,
                end,
                reason
            );
        }
    }

    #[test]
    fn test_comment_range_rules() {
        let diff = parse_patch(PATCH);
        // Removed lines between the endpoints are fine
        assert_eq!(can_comment_range(&diff[1..=3]), Ok(()));
        assert_eq!(
            can_comment_range(&diff[2..=3]),
            Err(CommentRejection::DeletedLine)
        );
        assert_eq!(
            can_comment_range(&diff[4..=7]),
            Err(CommentRejection::SpansDiffHeaders)
        );
        assert_eq!(
            can_comment_range(&diff[6..=6]),
            Err(CommentRejection::DiffHeader)
        );
    }

    #[test]
    fn test_original_lines() {
        let diff = parse_patch(PATCH);
        assert_eq!(
            original_lines(&diff, 3, 5),
            vec!["    let a = 2;", "    let b = 3;", "    run(a);"]
        );
        // Reversed indices are normalized
        assert_eq!(original_lines(&diff, 2, 1), vec!["fn main() {", "    let a = 1;"]);
        // Markers only
        assert_eq!(original_lines(&diff, 0, 0), vec![String::new()]);
        // Out of range
        assert_eq!(original_lines(&diff, 40, 50), vec![String::new()]);
    }

    #[test]
    fn test_validator_anchors() {
        let diff = parse_patch(PATCH);
        let validator = AnnotationValidator::new(&diff);

        assert_eq!(validator.span_for_range(4, 2), Some((3, 5)));
        assert_eq!(validator.span_for_range(2, 99), None);

        let anchor = validator.check_suggestion(3, 5).unwrap();
        assert_eq!(
            anchor,
            Anchor {
                line: 4,
                start_line: Some(2),
                span: (3, 5),
            }
        );

        let single = validator.check_comment(7, 7).unwrap();
        assert_eq!(single.line, 11);
        assert_eq!(single.start_line, None);

        assert_eq!(
            validator.check_comment(2, 2),
            Err(CommentRejection::DeletedLine)
        );
        assert_eq!(
            validator.check_suggestion(90, 95),
            Err(SuggestionRejection::NoValidPosition)
        );
    }
}
