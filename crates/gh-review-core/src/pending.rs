//! Locally created comments and suggestions waiting for review submission.

use crate::model::{DiffSide, ReviewDraftComment};
use log::debug;
use uuid::Uuid;

/// Identifier of a pending annotation, unique for the lifetime of the process.
pub type AnnotationId = Uuid;

/// A pending (not yet submitted) line comment or reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComment {
    /// Unique identifier for this pending comment.
    pub id: AnnotationId,
    /// File path.
    pub path: String,
    /// Anchor line in the new file version.
    pub line: u32,
    /// First line for multi-line comments.
    pub start_line: Option<u32>,
    /// Comment body (markdown).
    pub body: String,
    /// Remote comment this one replies to.
    pub in_reply_to: Option<u64>,
}

impl PendingComment {
    /// Create a new pending comment.
    pub fn new(path: impl Into<String>, line: u32, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            line,
            start_line: None,
            body: body.into(),
            in_reply_to: None,
        }
    }

    /// Anchor the comment to `start_line..=line`.
    pub fn with_start_line(mut self, start_line: Option<u32>) -> Self {
        self.start_line = start_line.filter(|s| *s != self.line);
        self
    }

    /// Mark the comment as a reply to a remote comment.
    pub fn replying_to(mut self, comment_id: u64) -> Self {
        self.in_reply_to = Some(comment_id);
        self
    }
}

/// A pending code-change suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSuggestion {
    /// Unique identifier for this pending suggestion.
    pub id: AnnotationId,
    /// File path.
    pub path: String,
    /// Anchor line in the new file version.
    pub line: u32,
    /// First line for multi-line suggestions.
    pub start_line: Option<u32>,
    /// Replacement code.
    pub suggested_text: String,
    /// Code being replaced.
    pub original_lines: Vec<String>,
    /// Optional explanation shown above the suggestion.
    pub comment: Option<String>,
}

impl PendingSuggestion {
    /// Create a new pending suggestion.
    pub fn new(
        path: impl Into<String>,
        line: u32,
        suggested_text: impl Into<String>,
        original_lines: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            line,
            start_line: None,
            suggested_text: suggested_text.into(),
            original_lines,
            comment: None,
        }
    }

    /// Anchor the suggestion to `start_line..=line`.
    pub fn with_start_line(mut self, start_line: Option<u32>) -> Self {
        self.start_line = start_line.filter(|s| *s != self.line);
        self
    }

    /// Attach an explanation. Blank text is ignored.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        let trimmed = comment.trim();
        self.comment = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Review comment body: explanation followed by a `suggestion` block.
    pub fn body(&self) -> String {
        let block = format!("```suggestion\n{}\n```", self.suggested_text);
        match self.comment {
            Some(ref comment) => format!("{}\n\n{}", comment, block),
            None => block,
        }
    }
}

/// A comment or suggestion held until the review is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAnnotation {
    Comment(PendingComment),
    Suggestion(PendingSuggestion),
}

impl PendingAnnotation {
    pub fn id(&self) -> AnnotationId {
        match self {
            PendingAnnotation::Comment(c) => c.id,
            PendingAnnotation::Suggestion(s) => s.id,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            PendingAnnotation::Comment(c) => &c.path,
            PendingAnnotation::Suggestion(s) => &s.path,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            PendingAnnotation::Comment(c) => c.line,
            PendingAnnotation::Suggestion(s) => s.line,
        }
    }

    pub fn start_line(&self) -> Option<u32> {
        match self {
            PendingAnnotation::Comment(c) => c.start_line,
            PendingAnnotation::Suggestion(s) => s.start_line,
        }
    }

    /// Check whether the annotation covers the given new-file line.
    pub fn covers(&self, line: u32) -> bool {
        let start = self.start_line().unwrap_or(self.line());
        (start..=self.line()).contains(&line)
    }

    /// Convert into the shape handed to the repository client.
    pub fn to_draft(&self) -> ReviewDraftComment {
        match self {
            PendingAnnotation::Comment(c) => ReviewDraftComment {
                path: c.path.clone(),
                line: c.line,
                start_line: c.start_line,
                side: DiffSide::Right,
                body: c.body.clone(),
                in_reply_to: c.in_reply_to,
            },
            PendingAnnotation::Suggestion(s) => ReviewDraftComment {
                path: s.path.clone(),
                line: s.line,
                start_line: s.start_line,
                side: DiffSide::Right,
                body: s.body(),
                in_reply_to: None,
            },
        }
    }
}

impl From<PendingComment> for PendingAnnotation {
    fn from(comment: PendingComment) -> Self {
        PendingAnnotation::Comment(comment)
    }
}

impl From<PendingSuggestion> for PendingAnnotation {
    fn from(suggestion: PendingSuggestion) -> Self {
        PendingAnnotation::Suggestion(suggestion)
    }
}

/// Pending annotations of one review, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PendingAnnotationStore {
    annotations: Vec<PendingAnnotation>,
}

impl PendingAnnotationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an annotation, returning its identifier.
    pub fn add(&mut self, annotation: impl Into<PendingAnnotation>) -> AnnotationId {
        let annotation = annotation.into();
        let id = annotation.id();
        debug!(
            "Pending annotation {} added on {}:{}",
            id,
            annotation.path(),
            annotation.line()
        );
        self.annotations.push(annotation);
        id
    }

    /// Remove an annotation. Returns `false` if the id is unknown.
    pub fn remove(&mut self, id: AnnotationId) -> bool {
        let before = self.annotations.len();
        self.annotations.retain(|a| a.id() != id);
        before != self.annotations.len()
    }

    /// Annotations on `path`, in insertion order.
    pub fn for_file(&self, path: &str) -> Vec<&PendingAnnotation> {
        self.annotations.iter().filter(|a| a.path() == path).collect()
    }

    /// Drop every annotation.
    pub fn clear(&mut self) {
        self.annotations.clear();
    }

    /// Number of annotations across all files.
    pub fn count(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Iterate over all annotations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingAnnotation> {
        self.annotations.iter()
    }

    /// Number of annotations on `path`.
    pub fn count_for_file(&self, path: &str) -> usize {
        self.annotations.iter().filter(|a| a.path() == path).count()
    }

    /// New-file lines on `path` covered by any annotation.
    pub fn lines_for_file(&self, path: &str) -> Vec<u32> {
        let mut lines: Vec<u32> = self
            .annotations
            .iter()
            .filter(|a| a.path() == path)
            .flat_map(|a| a.start_line().unwrap_or(a.line())..=a.line())
            .collect();
        lines.sort_unstable();
        lines.dedup();
        lines
    }

    /// The most recently added annotation on `path` covering `line`.
    pub fn last_at(&self, path: &str, line: u32) -> Option<&PendingAnnotation> {
        self.annotations
            .iter()
            .rev()
            .find(|a| a.path() == path && a.covers(line))
    }

    /// Drafts for every annotation, in insertion order.
    pub fn to_drafts(&self) -> Vec<ReviewDraftComment> {
        self.annotations.iter().map(PendingAnnotation::to_draft).collect()
    }
}
