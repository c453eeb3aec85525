// src/github/types.rs
// =============================================================================
// Data shapes for the resolver: what callers get back, and what GitHub sends.
//
// Public types (RepositoryRef, RepositorySnapshot, DocumentRef,
// UserRepoSummary) are what the rest of the app works with. The wire types at
// the bottom mirror just the fields we read from the REST API; serde ignores
// everything else in the payload.
// =============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::Error;
use crate::assets::AssetContext;

/// Identifies a repository as `owner/name`, case preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, Error> {
        let owner = owner.into();
        let name = name.into();
        if owner.is_empty() || name.is_empty() {
            return Err(Error::InvalidRepository(format!("{}/{}", owner, name)));
        }
        Ok(Self { owner, name })
    }

    // Parses user input into a repository reference
    //
    // Accepts anything whose last two non-empty '/'-separated segments are the
    // owner and the repository:
    //   "rust-lang/rust"
    //   "github.com/rust-lang/rust"
    //   "https://github.com/rust-lang/rust.git"
    pub fn parse(input: &str) -> Result<Self, Error> {
        let parts: Vec<&str> = input
            .trim()
            .split('/')
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() < 2 {
            return Err(Error::InvalidRepository(input.trim().to_string()));
        }

        let owner = parts[parts.len() - 2];
        let name = parts[parts.len() - 1];
        let name = name.strip_suffix(".git").unwrap_or(name);

        Self::new(owner, name)
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The Markdown documents of one repository at the moment it was resolved.
///
/// `branch` is fixed for the snapshot's lifetime; picking up upstream changes
/// takes a fresh `resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySnapshot {
    pub owner: String,
    pub name: String,
    pub branch: String,
    /// Tree-listing order, unique paths
    pub documents: Vec<DocumentRef>,
    /// Raw-content host the snapshot's relative assets resolve against
    #[serde(skip)]
    pub(crate) raw_base: String,
}

impl RepositorySnapshot {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn find(&self, path: &str) -> Option<&DocumentRef> {
        self.documents.iter().find(|doc| doc.path == path)
    }

    /// Location context handed to the asset resolver while rendering `document`.
    pub fn asset_context<'a>(&'a self, document: &'a DocumentRef) -> AssetContext<'a> {
        AssetContext::new(&self.owner, &self.name, &self.branch, &document.path)
            .with_raw_base(&self.raw_base)
    }
}

/// One Markdown file in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRef {
    /// Repository-relative path ending in ".md"
    pub path: String,
    /// API blob URL from the tree listing
    pub blob_url: String,
    /// Where the text is downloaded from; shape depends on the auth mode
    pub content_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRepoSummary {
    pub full_name: String,
    pub name: String,
    pub owner: String,
    pub is_fork: bool,
}

// -----------------------------------------------------------------------------
// Wire types
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct RepoMetadata {
    pub default_branch: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeListing {
    pub tree: Vec<TreeNode>,
    /// GitHub stops listing very large trees and sets this flag
    #[serde(default)]
    pub truncated: bool,
}

/// An entry of a recursive tree listing, tagged by its "type" field.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum TreeNode {
    Blob { path: String, url: String },
    Tree { path: String },
    /// Submodule commits and anything GitHub adds later
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserRepo {
    pub full_name: String,
    pub name: String,
    pub fork: bool,
    pub owner: UserRepoOwner,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserRepoOwner {
    pub login: String,
}

impl From<UserRepo> for UserRepoSummary {
    fn from(repo: UserRepo) -> Self {
        Self {
            full_name: repo.full_name,
            name: repo.name,
            owner: repo.owner.login,
            is_fork: repo.fork,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_repo() {
        let repo = RepositoryRef::parse("rust-lang/rust").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "rust");
    }

    #[test]
    fn test_parse_takes_last_two_segments() {
        let repo: RepositoryRef = "https://github.com/User/Repo.git/".parse().unwrap();
        assert_eq!(repo.owner, "User");
        assert_eq!(repo.name, "Repo");
        assert_eq!(repo.to_string(), "User/Repo");
    }

    #[test]
    fn test_parse_rejects_single_segment() {
        assert!(matches!(
            RepositoryRef::parse("just-a-name"),
            Err(Error::InvalidRepository(_))
        ));
        assert!(RepositoryRef::parse("   ").is_err());
    }

    #[test]
    fn test_tree_nodes_are_tagged() {
        let json = r#"{
            "sha": "abc",
            "tree": [
                {"path": "docs", "type": "tree", "mode": "040000", "sha": "1"},
                {"path": "docs/a.md", "type": "blob", "url": "https://api/blob/2", "size": 10},
                {"path": "vendor/lib", "type": "commit", "sha": "3"}
            ],
            "truncated": false
        }"#;
        let listing: TreeListing = serde_json::from_str(json).unwrap();
        assert_eq!(
            listing.tree,
            vec![
                TreeNode::Tree { path: "docs".to_string() },
                TreeNode::Blob {
                    path: "docs/a.md".to_string(),
                    url: "https://api/blob/2".to_string(),
                },
                TreeNode::Other,
            ]
        );
        assert!(!listing.truncated);
    }

    #[test]
    fn test_user_repo_summary_from_wire() {
        let json = r#"{"full_name": "me/fork", "name": "fork", "fork": true, "owner": {"login": "me", "id": 1}}"#;
        let repo: UserRepo = serde_json::from_str(json).unwrap();
        let summary = UserRepoSummary::from(repo);
        assert_eq!(summary.owner, "me");
        assert!(summary.is_fork);
    }
}
