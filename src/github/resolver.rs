// src/github/resolver.rs
// =============================================================================
// Turns "owner/repo" into the list of Markdown documents on its default branch.
//
// Two calls, strictly in order, because the second needs the branch name the
// first one returns:
//   1. GET /repos/{owner}/{repo}                          -> default_branch
//   2. GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1
//
// The recursive flag makes GitHub flatten the whole tree into one list, so we
// never walk directories ourselves. Either both calls succeed and we return a
// snapshot, or the whole resolution fails.
// =============================================================================

use reqwest::StatusCode;
use tracing::{info, warn};

use super::auth::{AuthMode, AuthToken};
use super::client::GithubClient;
use super::error::{Error, Result};
use super::types::{DocumentRef, RepoMetadata, RepositoryRef, RepositorySnapshot, TreeListing, TreeNode};

impl GithubClient {
    /// Resolves a repository's default branch and every `.md` file in it.
    ///
    /// Fails with `NotFound` (404), `AccessDenied` (403, rate limit or private
    /// repository) or `FetchFailure` (anything else). A repository with no
    /// Markdown files resolves to an empty `documents` list.
    pub async fn resolve(&self, repo: &RepositoryRef, token: Option<&AuthToken>) -> Result<RepositorySnapshot> {
        let auth = AuthMode::from_token(token);

        let branch = self.fetch_default_branch(repo, auth).await?;
        let listing = self.fetch_tree(repo, &branch, auth).await?;

        if listing.truncated {
            warn!(repo = %repo, "tree listing was truncated by GitHub, some documents may be missing");
        }

        let documents: Vec<DocumentRef> = listing
            .tree
            .into_iter()
            .filter_map(|node| match node {
                TreeNode::Blob { path, url } if is_markdown(&path) => Some(DocumentRef {
                    content_url: self.content_url(repo, &branch, &path, auth),
                    blob_url: url,
                    path,
                }),
                _ => None,
            })
            .collect();

        info!(repo = %repo, branch = %branch, documents = documents.len(), "resolved repository");

        Ok(RepositorySnapshot {
            owner: repo.owner.clone(),
            name: repo.name.clone(),
            branch,
            documents,
            raw_base: self.config().raw_base.clone(),
        })
    }

    /// Builds the URL a document's text is downloaded from.
    ///
    /// Anonymous: the raw-content host, which needs no negotiation.
    /// Authenticated: the contents endpoint with the branch passed as `ref`,
    /// so private repositories work.
    ///
    /// Either way each path segment is percent-encoded on its own, so a file
    /// named "C# notes.md" or "faq?.md" is not cut short at '#' or '?'.
    pub fn content_url(&self, repo: &RepositoryRef, branch: &str, path: &str, auth: AuthMode<'_>) -> String {
        match auth {
            AuthMode::Anonymous => format!(
                "{}/{}/{}/{}/{}",
                self.config().raw_base,
                repo.owner,
                repo.name,
                encode_path(branch),
                encode_path(path)
            ),
            AuthMode::Authenticated(_) => format!(
                "{}?ref={}",
                self.api_url(&format!(
                    "/repos/{}/{}/contents/{}",
                    repo.owner,
                    repo.name,
                    encode_path(path)
                )),
                urlencoding::encode(branch)
            ),
        }
    }

    async fn fetch_default_branch(&self, repo: &RepositoryRef, auth: AuthMode<'_>) -> Result<String> {
        let url = self.api_url(&format!("/repos/{}/{}", repo.owner, repo.name));

        let response = self
            .get(&url, auth)
            .send()
            .await
            .map_err(|e| Error::fetch("repository details", None, Some(e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(Error::NotFound {
                    repo: repo.full_name(),
                })
            }
            StatusCode::FORBIDDEN => {
                return Err(Error::AccessDenied {
                    repo: repo.full_name(),
                })
            }
            status if !status.is_success() => {
                return Err(Error::fetch("repository details", Some(status), None));
            }
            _ => {}
        }

        let metadata: RepoMetadata = response
            .json()
            .await
            .map_err(|e| Error::fetch("repository details", None, Some(e)))?;

        Ok(metadata.default_branch)
    }

    async fn fetch_tree(&self, repo: &RepositoryRef, branch: &str, auth: AuthMode<'_>) -> Result<TreeListing> {
        let url = self.api_url(&format!(
            "/repos/{}/{}/git/trees/{}?recursive=1",
            repo.owner,
            repo.name,
            encode_path(branch)
        ));

        let response = self
            .get(&url, auth)
            .send()
            .await
            .map_err(|e| Error::fetch("file tree", None, Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch("file tree", Some(status), None));
        }

        response
            .json()
            .await
            .map_err(|e| Error::fetch("file tree", None, Some(e)))
    }
}

// Case-sensitive on purpose: ".MD" and ".markdown" files are not listed
fn is_markdown(path: &str) -> bool {
    path.ends_with(".md")
}

// Percent-encodes every segment separately so the '/' separators survive
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
