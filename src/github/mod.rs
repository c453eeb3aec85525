// src/github/mod.rs
// =============================================================================
// This module talks to GitHub on behalf of the rest of the app.
//
// Currently implements:
// - Resolving a repository's default branch and its Markdown documents
// - Fetching document text, anonymously or with a bearer token
// - Listing the signed-in user's repositories and forks
//
// Submodules:
// - auth:     tokens and the anonymous/authenticated switch
// - client:   the shared HTTP client
// - error:    typed failures
// - types:    public data model plus the JSON wire shapes
// - resolver, content, repos: the operations themselves
// =============================================================================

mod auth;
mod client;
mod content;
mod error;
mod repos;
mod resolver;
mod types;

pub use auth::{AuthToken, TokenProvider};
pub use client::GithubClient;
pub use error::Error;
pub use types::RepositoryRef;
