// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and the GitHub client
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod assets;   // src/assets/ - image reference resolution and rendering
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - endpoints and timeouts
mod github;   // src/github/ - GitHub API access

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::ClientConfig;
use github::{AuthToken, GithubClient, RepositoryRef, TokenProvider};

/// Documents fetched at once by `assets`
const FETCH_CONCURRENCY: usize = 8;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(hint) = hint_for(&e) {
                eprintln!("{}", hint);
            }
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout stays clean for Markdown, HTML and JSON
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let config = ClientConfig::default()
        .with_api_base(&cli.api_url)
        .with_context(|| format!("Invalid --api-url '{}'", cli.api_url))?
        .with_raw_base(&cli.raw_url)
        .with_context(|| format!("Invalid --raw-url '{}'", cli.raw_url))?
        .with_timeout(Duration::from_secs(cli.timeout));
    let client = GithubClient::new(config)?;

    // Read once; every call below sees the same token
    let token = cli.token();

    match cli.command {
        Commands::Docs { repo, json } => handle_docs(&client, &repo, token.as_ref(), json).await,
        Commands::Show { repo, path, html } => handle_show(&client, &repo, &path, token.as_ref(), html).await,
        Commands::Assets { repo, json } => handle_assets(&client, &repo, token.as_ref(), json).await,
        Commands::Repos { forks, json } => handle_repos(&client, token.as_ref(), forks, json).await,
    }
}

// Handles the 'docs' subcommand
async fn handle_docs(client: &GithubClient, repo: &str, token: Option<&AuthToken>, json: bool) -> Result<i32> {
    let repo = RepositoryRef::parse(repo)?;
    eprintln!("🔍 Resolving {}", repo);

    let snapshot = client.resolve(&repo, token).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(0);
    }

    if snapshot.documents.is_empty() {
        println!("⚠️  No Markdown files found in this repository.");
        return Ok(0);
    }

    println!("📚 {} @ {} ({} document(s))", snapshot.full_name(), snapshot.branch, snapshot.documents.len());
    println!("{}", "=".repeat(60));
    for document in &snapshot.documents {
        println!("📄 {}", document.path);
    }

    Ok(0)
}

// Handles the 'show' subcommand
//
// Resolves the repository first, so the path is checked against the real tree
// and the content URL matches the current auth mode.
async fn handle_show(
    client: &GithubClient,
    repo: &str,
    path: &str,
    token: Option<&AuthToken>,
    html: bool,
) -> Result<i32> {
    let repo = RepositoryRef::parse(repo)?;
    let snapshot = client.resolve(&repo, token).await?;

    let path = path.trim_start_matches("./").trim_start_matches('/');
    let document = snapshot
        .find(path)
        .ok_or_else(|| anyhow!("{} is not a Markdown document in {}@{}", path, snapshot.full_name(), snapshot.branch))?;

    let text = client.fetch_text(&document.content_url, token).await?;
    let ctx = snapshot.asset_context(document);

    if html {
        print!("{}", assets::render_html(&text, &ctx));
    } else {
        print!("{}", assets::rewrite_image_links(&text, &ctx));
    }

    Ok(0)
}

// One document's images, as printed by 'assets'
#[derive(Debug, Serialize)]
struct DocumentAssets {
    path: String,
    images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// Handles the 'assets' subcommand
//
// Documents are fetched concurrently. A document that fails to download is
// reported with its error; the rest are still listed.
async fn handle_assets(client: &GithubClient, repo: &str, token: Option<&AuthToken>, json: bool) -> Result<i32> {
    let repo = RepositoryRef::parse(repo)?;
    let snapshot = client.resolve(&repo, token).await?;

    if snapshot.documents.is_empty() {
        println!("⚠️  No Markdown files found in this repository.");
        return Ok(0);
    }

    eprintln!("🌐 Fetching {} document(s)...", snapshot.documents.len());
    let fetched = client
        .fetch_documents(&snapshot.documents, token, FETCH_CONCURRENCY)
        .await;

    let report: Vec<DocumentAssets> = fetched
        .into_iter()
        .map(|(document, text)| match text {
            Ok(text) => {
                let ctx = snapshot.asset_context(document);
                DocumentAssets {
                    path: document.path.clone(),
                    images: assets::extract_image_sources(&text)
                        .iter()
                        .map(|src| assets::resolve_asset_url(src, &ctx))
                        .collect(),
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(path = %document.path, error = %e, "skipping document");
                DocumentAssets {
                    path: document.path.clone(),
                    images: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    for entry in &report {
        match &entry.error {
            Some(error) => println!("❌ {} ({})", entry.path, error),
            None if entry.images.is_empty() => continue,
            None => {
                println!("📄 {}", entry.path);
                for image in &entry.images {
                    println!("   🖼️  {}", image);
                }
            }
        }
    }

    let total: usize = report.iter().map(|entry| entry.images.len()).sum();
    println!();
    println!("📊 {} image(s) across {} document(s)", total, report.len());

    Ok(0)
}

// Handles the 'repos' subcommand
async fn handle_repos(client: &GithubClient, token: Option<&AuthToken>, forks: bool, json: bool) -> Result<i32> {
    if token.is_none() {
        eprintln!("🔑 Listing repositories needs a token (--token or GITHUB_TOKEN).");
    }

    let repos = if forks {
        client.list_forks(token).await?
    } else {
        client.list_repositories(token).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
        return Ok(0);
    }

    for repo in &repos {
        let marker = if repo.is_fork { "🍴" } else { "📦" };
        println!("{} {}", marker, repo.full_name);
    }
    if repos.is_empty() {
        println!("No repositories to show.");
    }

    Ok(0)
}

// A follow-up line for errors a user can act on
fn hint_for(error: &anyhow::Error) -> Option<&'static str> {
    let error = error.downcast_ref::<github::Error>()?;
    tracing::debug!(status = ?error.status(), "request failed");
    if error.is_network() {
        return Some("Network error, check your connection.");
    }
    match error {
        github::Error::AccessDenied { .. } => Some("Pass --token (or set GITHUB_TOKEN) to raise the rate limit and reach private repositories."),
        _ => None,
    }
}
