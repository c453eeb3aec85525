// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things). The `env` feature lets the
// token and endpoint flags fall back to environment variables.
// =============================================================================

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{DEFAULT_API_BASE, DEFAULT_RAW_BASE, DEFAULT_TIMEOUT_SECS};
use crate::github::{AuthToken, TokenProvider};

#[derive(Parser, Debug)]
#[command(
    name = "doc-lens",
    version,
    about = "Browse the Markdown documentation of a GitHub repository without cloning it",
    long_about = "doc-lens finds every Markdown file on a repository's default branch, fetches the one \
                  you pick, and prints it with relative image links turned into absolute URLs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GitHub token; enables private repositories and `repos`
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// REST API base URL
    #[arg(long, global = true, env = "DOC_LENS_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_url: String,

    /// Raw-content base URL used for anonymous downloads and image links
    #[arg(long, global = true, env = "DOC_LENS_RAW_URL", default_value = DEFAULT_RAW_BASE)]
    pub raw_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the Markdown documents on the default branch
    ///
    /// Example: doc-lens docs rust-lang/book
    Docs {
        /// Repository as owner/repo or a GitHub URL
        repo: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print one document with its image links made absolute
    ///
    /// Example: doc-lens show rust-lang/book src/ch01-00-getting-started.md
    Show {
        /// Repository as owner/repo or a GitHub URL
        repo: String,

        /// Repository-relative path of the document
        path: String,

        /// Render to HTML instead of printing Markdown
        #[arg(long)]
        html: bool,
    },

    /// List the resolved image URLs of every document
    Assets {
        /// Repository as owner/repo or a GitHub URL
        repo: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List your repositories (needs a token)
    Repos {
        /// Only show forks
        #[arg(long)]
        forks: bool,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

// The command line is the token provider for the binary: whatever came in
// through --token or GITHUB_TOKEN, blank meaning none.
impl TokenProvider for Cli {
    fn token(&self) -> Option<AuthToken> {
        self.token.as_deref().and_then(AuthToken::new)
    }
}

impl Cli {
    /// Log filter derived from -v when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_docs_command() {
        let cli = Cli::try_parse_from(["doc-lens", "docs", "o/r", "--json"]).unwrap();
        match cli.command {
            Commands::Docs { repo, json } => {
                assert_eq!(repo, "o/r");
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "doc-lens",
            "show",
            "o/r",
            "docs/a.md",
            "--token",
            "abc",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.token().map(|t| t.expose().to_string()), Some("abc".to_string()));
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_blank_token_means_anonymous() {
        let cli = Cli::try_parse_from(["doc-lens", "repos", "--token", ""]).unwrap();
        assert!(cli.token().is_none());
    }
}
