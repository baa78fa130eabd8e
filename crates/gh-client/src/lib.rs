//! GitHub API client for pull request reviews
//!
//! This crate implements the review engine's [`RepositoryClient`] trait on
//! top of octocrab. The engine never sees HTTP or JSON; everything it gets
//! has already been converted into its own models.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │     RepositoryClient trait (gh-review-core)      │
//! │  - list_files()                                  │
//! │  - list_review_comments()                        │
//! │  - submit_review()                               │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │ OctocrabClient  │──► api DTOs (types)
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{build_octocrab, OctocrabClient, TokenResolver};
//! use gh_review_core::RepositoryClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let token = TokenResolver::new().get_token(None).await?;
//! let octocrab = build_octocrab(None, None, token)?;
//! let client = OctocrabClient::new(Arc::new(octocrab), "owner", "repo");
//!
//! let files = client.list_files(42).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`RepositoryClient`]: gh_review_core::RepositoryClient

pub mod octocrab_client;
pub mod token;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use octocrab_client::OctocrabClient;
pub use token::{api_base_uri, build_octocrab, TokenResolver};
pub use types::{ApiDraftComment, ApiFile, ApiReviewComment, CreateReviewRequest, ReplyRequest};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
