//! Octocrab-based GitHub API client
//!
//! Implements the review engine's `RepositoryClient` over the GitHub REST
//! API. Raw routes are used throughout so the same client works against
//! GitHub Enterprise base URIs.

use crate::types::{
    ApiDraftComment, ApiFile, ApiReviewComment, CreateReviewRequest, PageParams, ReplyRequest,
};
use async_trait::async_trait;
use gh_review_core::{
    ChangedFile, ClientError, RepositoryClient, ReviewComment, ReviewDecision, ReviewDraftComment,
};
use log::{debug, info, warn};
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Items requested per page on list endpoints
const PER_PAGE: u8 = 100;

/// GitHub stops listing pull request files after 3000 entries
const MAX_PAGES: u32 = 30;

/// GitHub API client for one repository
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
    owner: String,
    repo: String,
}

impl OctocrabClient {
    /// Create a new client for `owner/repo` with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            octocrab,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }

    /// Repository as `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn pull_route(&self, pr_number: u64, suffix: &str) -> String {
        format!(
            "/repos/{}/{}/pulls/{}/{}",
            self.owner, self.repo, pr_number, suffix
        )
    }

    /// Fetch every page of a list endpoint
    async fn get_all<T: DeserializeOwned>(&self, route: &str) -> Result<Vec<T>, ClientError> {
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let params = PageParams {
                per_page: PER_PAGE,
                page,
            };
            let batch: Vec<T> = self
                .octocrab
                .get(route, Some(&params))
                .await
                .map_err(map_error)?;

            let last_page = batch.len() < PER_PAGE as usize;
            items.extend(batch);
            if last_page {
                return Ok(items);
            }
        }

        warn!("{} has more than {} pages, truncating", route, MAX_PAGES);
        Ok(items)
    }
}

#[async_trait]
impl RepositoryClient for OctocrabClient {
    async fn list_files(&self, pr_number: u64) -> Result<Vec<ChangedFile>, ClientError> {
        debug!("Fetching files for {}#{}", self.full_name(), pr_number);

        let files: Vec<ApiFile> = self.get_all(&self.pull_route(pr_number, "files")).await?;

        debug!("Fetched {} files for {}#{}", files.len(), self.full_name(), pr_number);
        Ok(files.into_iter().map(ChangedFile::from).collect())
    }

    async fn list_review_comments(
        &self,
        pr_number: u64,
    ) -> Result<Vec<ReviewComment>, ClientError> {
        debug!("Fetching review comments for {}#{}", self.full_name(), pr_number);

        let comments: Vec<ApiReviewComment> =
            self.get_all(&self.pull_route(pr_number, "comments")).await?;

        debug!(
            "Fetched {} review comments for {}#{}",
            comments.len(),
            self.full_name(),
            pr_number
        );
        Ok(comments.into_iter().map(ReviewComment::from).collect())
    }

    async fn submit_review(
        &self,
        pr_number: u64,
        decision: ReviewDecision,
        body: Option<String>,
        comments: Vec<ReviewDraftComment>,
    ) -> Result<(), ClientError> {
        let (replies, inline): (Vec<_>, Vec<_>) = comments
            .into_iter()
            .enumerate()
            .partition(|(_, c)| c.in_reply_to.is_some());

        // A COMMENT review without body or inline comments is rejected by
        // GitHub, so reply-only submissions skip the review itself
        let needs_review =
            decision != ReviewDecision::Comment || body.is_some() || !inline.is_empty();

        // The review and its inline comments are created in one request
        let mut delivered: Vec<usize> = Vec::new();
        if needs_review {
            let (indices, drafts): (Vec<usize>, Vec<ReviewDraftComment>) =
                inline.into_iter().unzip();
            let request = CreateReviewRequest::new(
                decision,
                body,
                drafts.into_iter().map(ApiDraftComment::from).collect(),
            );
            info!(
                "Creating {} review on {}#{} with {} inline comments",
                request.event,
                self.full_name(),
                pr_number,
                request.comments.len()
            );
            let _: serde_json::Value = self
                .octocrab
                .post(self.pull_route(pr_number, "reviews"), Some(&request))
                .await
                .map_err(map_error)?;
            delivered = indices;
        }

        for (index, reply) in replies {
            let Some(comment_id) = reply.in_reply_to else {
                continue;
            };
            debug!("Replying to comment {} on {}#{}", comment_id, self.full_name(), pr_number);
            let route = self.pull_route(pr_number, &format!("comments/{}/replies", comment_id));
            let request = ReplyRequest { body: reply.body };
            let posted: Result<serde_json::Value, _> =
                self.octocrab.post(route, Some(&request)).await;
            if let Err(err) = posted {
                let err = map_error(err);
                warn!(
                    "Reply to comment {} failed after {} deliveries: {}",
                    comment_id,
                    delivered.len(),
                    err
                );
                return Err(ClientError::partially_delivered(needs_review, delivered, err));
            }
            delivered.push(index);
        }

        Ok(())
    }
}

/// Map an octocrab error to the engine's client error
fn map_error(err: octocrab::Error) -> ClientError {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            let message = source.message.clone();
            classify_status(source.status_code.as_u16(), message)
        }
        octocrab::Error::Serde { source, .. } => ClientError::Decode(source.to_string()),
        octocrab::Error::Json { source, .. } => ClientError::Decode(source.to_string()),
        other => ClientError::Request(other.to_string()),
    }
}

fn classify_status(status: u16, message: String) -> ClientError {
    match status {
        401 | 403 => ClientError::Unauthorized(message),
        404 => ClientError::NotFound(message),
        _ => ClientError::Request(format!("{} (HTTP {})", message, status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> OctocrabClient {
        OctocrabClient::new(Arc::new(Octocrab::default()), "rust-lang", "cargo")
    }

    #[tokio::test]
    async fn test_routes() {
        let client = client();

        assert_eq!(client.full_name(), "rust-lang/cargo");
        assert_eq!(
            client.pull_route(12, "files"),
            "/repos/rust-lang/cargo/pulls/12/files"
        );
        assert_eq!(
            client.pull_route(12, "comments/99/replies"),
            "/repos/rust-lang/cargo/pulls/12/comments/99/replies"
        );
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(
            classify_status(401, "Bad credentials".into()),
            ClientError::Unauthorized("Bad credentials".into())
        );
        assert_eq!(
            classify_status(403, "Resource not accessible".into()),
            ClientError::Unauthorized("Resource not accessible".into())
        );
        assert_eq!(
            classify_status(404, "Not Found".into()),
            ClientError::NotFound("Not Found".into())
        );
        assert_eq!(
            classify_status(422, "Validation Failed".into()),
            ClientError::Request("Validation Failed (HTTP 422)".into())
        );
    }
}
