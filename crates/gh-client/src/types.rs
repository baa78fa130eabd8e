//! GitHub API data transfer objects
//!
//! These types mirror the JSON of the pull request review endpoints.
//! They are intentionally separate from the review engine's models and
//! converted at the client boundary.

use chrono::{DateTime, Utc};
use gh_review_core::{ChangedFile, FileStatus, ReviewComment, ReviewDecision, ReviewDraftComment};
use serde::{Deserialize, Serialize};

/// Query parameters for paginated list endpoints
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageParams {
    pub per_page: u8,
    pub page: u32,
}

/// A file entry from `GET /repos/{owner}/{repo}/pulls/{number}/files`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFile {
    /// Current path
    pub filename: String,

    /// "added", "removed", "modified", "renamed", ...
    pub status: String,

    #[serde(default)]
    pub additions: u32,

    #[serde(default)]
    pub deletions: u32,

    /// Missing for binary files and very large diffs
    #[serde(default)]
    pub patch: Option<String>,

    /// Set for renamed files
    #[serde(default)]
    pub previous_filename: Option<String>,
}

impl From<ApiFile> for ChangedFile {
    fn from(file: ApiFile) -> Self {
        ChangedFile {
            status: FileStatus::from_github_str(&file.status),
            path: file.filename,
            previous_path: file.previous_filename,
            patch: file.patch,
            additions: file.additions,
            deletions: file.deletions,
        }
    }
}

/// Comment author
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub login: String,
}

/// A review comment from `GET /repos/{owner}/{repo}/pulls/{number}/comments`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiReviewComment {
    pub id: u64,
    pub path: String,

    /// Null when the comment is outdated
    #[serde(default)]
    pub line: Option<u32>,

    #[serde(default)]
    pub start_line: Option<u32>,

    #[serde(default)]
    pub body: String,

    /// Null for deleted accounts
    #[serde(default)]
    pub user: Option<ApiUser>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub in_reply_to_id: Option<u64>,
}

impl From<ApiReviewComment> for ReviewComment {
    fn from(comment: ApiReviewComment) -> Self {
        ReviewComment {
            id: comment.id,
            path: comment.path,
            line: comment.line,
            start_line: comment.start_line,
            body: comment.body,
            author: comment
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| "ghost".to_string()),
            created_at: comment.created_at,
            in_reply_to: comment.in_reply_to_id,
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/pulls/{number}/reviews`
#[derive(Debug, Clone, Serialize)]
pub struct CreateReviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// "APPROVE", "REQUEST_CHANGES" or "COMMENT"
    pub event: &'static str,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<ApiDraftComment>,
}

impl CreateReviewRequest {
    pub fn new(
        decision: ReviewDecision,
        body: Option<String>,
        comments: Vec<ApiDraftComment>,
    ) -> Self {
        Self {
            body,
            event: decision.as_github_str(),
            comments,
        }
    }
}

/// An inline comment submitted as part of a review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiDraftComment {
    pub path: String,
    pub line: u32,
    pub side: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_side: Option<&'static str>,

    pub body: String,
}

impl From<ReviewDraftComment> for ApiDraftComment {
    fn from(draft: ReviewDraftComment) -> Self {
        let side = draft.side.as_github_str();
        Self {
            path: draft.path,
            line: draft.line,
            side,
            start_line: draft.start_line,
            start_side: draft.start_line.map(|_| side),
            body: draft.body,
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/pulls/{number}/comments/{id}/replies`
#[derive(Debug, Clone, Serialize)]
pub struct ReplyRequest {
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_review_core::DiffSide;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_file_conversion() {
        let file: ApiFile = serde_json::from_value(json!({
            "sha": "abc",
            "filename": "src/new.rs",
            "status": "renamed",
            "additions": 3,
            "deletions": 1,
            "changes": 4,
            "patch": "@@ -1 +1 @@\n-a\n+b",
            "previous_filename": "src/old.rs"
        }))
        .unwrap();
        let file = ChangedFile::from(file);

        assert_eq!(file.status, FileStatus::Renamed);
        assert_eq!(file.previous_path.as_deref(), Some("src/old.rs"));
        assert_eq!(file.display_name(), "src/old.rs → src/new.rs");
        assert_eq!((file.additions, file.deletions), (3, 1));
    }

    #[test]
    fn test_binary_file_has_no_patch() {
        let file: ApiFile = serde_json::from_value(json!({
            "filename": "logo.png",
            "status": "added"
        }))
        .unwrap();

        assert_eq!(ChangedFile::from(file).patch, None);
    }

    #[test]
    fn test_review_comment_conversion() {
        let comment: ApiReviewComment = serde_json::from_value(json!({
            "id": 42,
            "path": "src/lib.rs",
            "line": 12,
            "start_line": null,
            "body": "nit",
            "user": { "login": "octocat", "id": 1 },
            "created_at": "2024-05-01T10:00:00Z",
            "in_reply_to_id": 7
        }))
        .unwrap();
        let comment = ReviewComment::from(comment);

        assert_eq!(comment.author, "octocat");
        assert_eq!(comment.line, Some(12));
        assert_eq!(comment.in_reply_to, Some(7));
        assert!(comment.is_reply());
    }

    #[test]
    fn test_deleted_author() {
        let comment: ApiReviewComment = serde_json::from_value(json!({
            "id": 1,
            "path": "a.rs",
            "body": "old",
            "user": null,
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(ReviewComment::from(comment).author, "ghost");
    }

    #[test]
    fn test_multi_line_draft_payload() {
        let draft = ReviewDraftComment {
            path: "src/lib.rs".into(),
            line: 12,
            start_line: Some(10),
            side: DiffSide::Right,
            body: "extract this".into(),
            in_reply_to: None,
        };
        let payload = serde_json::to_value(ApiDraftComment::from(draft)).unwrap();

        assert_eq!(
            payload,
            json!({
                "path": "src/lib.rs",
                "line": 12,
                "side": "RIGHT",
                "start_line": 10,
                "start_side": "RIGHT",
                "body": "extract this"
            })
        );
    }

    #[test]
    fn test_review_request_omits_empty_fields() {
        let request = CreateReviewRequest::new(ReviewDecision::Approve, None, Vec::new());

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({ "event": "APPROVE" })
        );
    }
}
