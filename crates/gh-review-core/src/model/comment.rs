//! Comment-related data structures for PR reviews.

use chrono::{DateTime, Utc};

/// A review comment already posted on the pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewComment {
    /// GitHub comment ID.
    pub id: u64,
    /// File path the comment is on.
    pub path: String,
    /// Line in the new file version the comment is anchored to.
    pub line: Option<u32>,
    /// First line of a multi-line comment.
    pub start_line: Option<u32>,
    /// Comment body (markdown).
    pub body: String,
    /// Author's GitHub username.
    pub author: String,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
    /// ID of the comment this one replies to.
    pub in_reply_to: Option<u64>,
}

impl ReviewComment {
    /// Check if this comment is a reply to another one.
    pub fn is_reply(&self) -> bool {
        self.in_reply_to.is_some()
    }
}

/// A top-level comment with its replies, oldest reply first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    /// The comment that started the thread.
    pub top_level: ReviewComment,
    /// Replies ordered by creation time.
    pub replies: Vec<ReviewComment>,
}

impl CommentThread {
    /// Anchor line (0 when the host reported none).
    pub fn line(&self) -> u32 {
        self.top_level.line.unwrap_or(0)
    }

    /// First line of a multi-line anchor.
    pub fn start_line(&self) -> Option<u32> {
        self.top_level.start_line
    }

    /// Total number of comments, including the top-level one.
    pub fn comment_count(&self) -> usize {
        1 + self.replies.len()
    }

    /// All comments in display order.
    pub fn comments(&self) -> impl Iterator<Item = &ReviewComment> {
        std::iter::once(&self.top_level).chain(self.replies.iter())
    }
}

/// Which side of the diff a comment is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffSide {
    /// Old file (deletions side).
    Left,
    /// New file (additions side).
    #[default]
    Right,
}

impl DiffSide {
    /// Convert to GitHub API string representation.
    pub fn as_github_str(&self) -> &'static str {
        match self {
            DiffSide::Left => "LEFT",
            DiffSide::Right => "RIGHT",
        }
    }
}

/// The type of review to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewDecision {
    /// Approve the pull request.
    Approve,
    /// Request changes.
    RequestChanges,
    /// Just leave comments (neutral).
    #[default]
    Comment,
}

impl ReviewDecision {
    /// Convert to GitHub API string representation.
    pub fn as_github_str(&self) -> &'static str {
        match self {
            ReviewDecision::Approve => "APPROVE",
            ReviewDecision::RequestChanges => "REQUEST_CHANGES",
            ReviewDecision::Comment => "COMMENT",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ReviewDecision::Approve => "Approve",
            ReviewDecision::RequestChanges => "Request Changes",
            ReviewDecision::Comment => "Comment",
        }
    }

    /// Cycle forward: Approve → RequestChanges → Comment → Approve.
    pub fn next(self) -> Self {
        match self {
            ReviewDecision::Approve => ReviewDecision::RequestChanges,
            ReviewDecision::RequestChanges => ReviewDecision::Comment,
            ReviewDecision::Comment => ReviewDecision::Approve,
        }
    }

    /// Cycle backward.
    pub fn prev(self) -> Self {
        match self {
            ReviewDecision::Approve => ReviewDecision::Comment,
            ReviewDecision::RequestChanges => ReviewDecision::Approve,
            ReviewDecision::Comment => ReviewDecision::RequestChanges,
        }
    }
}

/// A comment as handed to the repository client on review submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraftComment {
    /// File path.
    pub path: String,
    /// Anchor line in the new file version.
    pub line: u32,
    /// First line for multi-line anchors.
    pub start_line: Option<u32>,
    /// Side of the diff the anchor lives on.
    pub side: DiffSide,
    /// Comment body (markdown).
    pub body: String,
    /// Set when this draft replies to an existing thread.
    pub in_reply_to: Option<u64>,
}
