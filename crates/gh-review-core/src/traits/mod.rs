//! Extension traits for plugging the review session into its environment.

mod repository_client;
mod theme_provider;

pub use repository_client::{ClientError, RepositoryClient};
pub use theme_provider::{DefaultTheme, ThemeProvider};
