//! Data models for diff and comment representation.

mod comment;
mod diff;

pub use comment::{CommentThread, DiffSide, ReviewComment, ReviewDecision, ReviewDraftComment};
pub use diff::{ChangedFile, DiffLine, FileStatus, LineKind, ParsedDiff};
