//! Trait for talking to the code hosting platform.

use crate::model::{ChangedFile, ReviewComment, ReviewDecision, ReviewDraftComment};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request could not be completed.
    #[error("Request failed: {0}")]
    Request(String),

    /// Not authorized to perform the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The pull request or repository was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response could not be decoded.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A request failed after part of the review already reached the host.
    #[error("{error} ({} of the comments were delivered)", .delivered.len())]
    PartiallyDelivered {
        /// Whether the review itself was created.
        review_submitted: bool,
        /// Indices into the submitted comments that were delivered.
        delivered: Vec<usize>,
        /// The request that failed.
        #[source]
        error: Box<ClientError>,
    },
}

impl ClientError {
    /// Wrap `error` with what was delivered before it happened.
    ///
    /// Nothing delivered means nothing to report, so `error` is returned as is.
    pub fn partially_delivered(
        review_submitted: bool,
        delivered: Vec<usize>,
        error: ClientError,
    ) -> Self {
        if !review_submitted && delivered.is_empty() {
            return error;
        }
        ClientError::PartiallyDelivered {
            review_submitted,
            delivered,
            error: Box::new(error),
        }
    }
}

/// Fetches pull request data and submits reviews.
///
/// The review session only depends on this trait, so it can be driven by
/// GitHub, a GitHub Enterprise host or an in-memory fake in tests.
///
/// # Example
///
/// ```ignore
/// let files = client.list_files(42).await?;
/// let comments = client.list_review_comments(42).await?;
/// client
///     .submit_review(42, ReviewDecision::Approve, Some("LGTM".into()), vec![])
///     .await?;
/// ```
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// List the files changed by a pull request, with their patches.
    async fn list_files(&self, pr_number: u64) -> Result<Vec<ChangedFile>, ClientError>;

    /// List every inline review comment on a pull request.
    async fn list_review_comments(&self, pr_number: u64)
        -> Result<Vec<ReviewComment>, ClientError>;

    /// Submit a review with its inline comments.
    ///
    /// When a request fails after the review or some replies were created,
    /// the error is [`ClientError::PartiallyDelivered`] so the caller can drop
    /// what the host already has before retrying.
    ///
    /// # Arguments
    /// * `decision` - Approve, request changes or comment
    /// * `body` - Optional review summary body
    /// * `comments` - Inline comments, replies included, in submission order
    async fn submit_review(
        &self,
        pr_number: u64,
        decision: ReviewDecision,
        body: Option<String>,
        comments: Vec<ReviewDraftComment>,
    ) -> Result<(), ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partially_delivered() {
        let failure = ClientError::Request("Bad Gateway (HTTP 502)".into());
        assert_eq!(
            ClientError::partially_delivered(false, vec![], failure.clone()),
            failure
        );

        let partial = ClientError::partially_delivered(true, vec![0, 2], failure);
        assert_eq!(
            partial.to_string(),
            "Request failed: Bad Gateway (HTTP 502) (2 of the comments were delivered)"
        );
    }
}
