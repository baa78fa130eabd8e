use anyhow::{Context, Result};
use clap::Parser;
use gh_client::{build_octocrab, OctocrabClient, TokenResolver};
use gh_review_config::AppConfig;
use gh_review_core::ReviewSession;
use log::info;
use std::sync::Arc;

mod app;
mod keymap;
mod logger;
mod repo;

/// Review a GitHub pull request from the terminal
#[derive(Parser, Debug)]
#[command(name = "gh-pr-review", version, about)]
struct Args {
    /// Pull request number
    pr: u64,

    /// Repository as owner/repo (defaults to the `origin` remote)
    #[arg(short, long)]
    repo: Option<String>,

    /// GitHub token (defaults to GITHUB_TOKEN_<HOST>, `gh auth token`, GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Web URL of a GitHub Enterprise instance
    #[arg(long)]
    url: Option<String>,

    /// REST API base URL, if it isn't `<url>/api/v3`
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if std::env::var_os("GITHUB_TOKEN").is_none() {
        dotenvy::dotenv().ok();
    }

    // Command line flags override the config file
    let file_config = AppConfig::load();
    let config = AppConfig {
        github_url: args.url.clone().or(file_config.github_url.clone()),
        api_url: args.api_url.clone().or(file_config.api_url.clone()),
        ..file_config
    };

    let log_file = logger::init(config.log_level_filter())?;
    info!("Starting gh-pr-review, logging to {}", log_file.display());

    let remote_url = repo::origin_remote_url();
    let target = repo::resolve(
        args.repo.as_deref(),
        config.default_repo.as_deref(),
        remote_url.as_deref(),
    )?;
    let host = config.github_host().or(target.host.clone());
    info!(
        "Reviewing {}/{}#{} on {}",
        target.owner,
        target.repo,
        args.pr,
        host.as_deref().unwrap_or(gh_client::DEFAULT_HOST)
    );

    let token = match args.token {
        Some(token) => token,
        None => TokenResolver::new().get_token(host.as_deref()).await?,
    };
    let octocrab = build_octocrab(host.as_deref(), config.api_url.as_deref(), token)?;
    let client = OctocrabClient::new(Arc::new(octocrab), target.owner, target.repo);

    let session = ReviewSession::load(&client, args.pr)
        .await
        .with_context(|| format!("Failed to open {}#{}", client.full_name(), args.pr))?
        .with_approval_message(config.approval_message.clone())
        .with_line_numbers(config.show_line_numbers);

    app::run(session, &client).await?;

    info!("Exiting gh-pr-review");
    Ok(())
}
