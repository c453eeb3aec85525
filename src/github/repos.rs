// src/github/repos.rs
// =============================================================================
// Lists the signed-in user's repositories for the "my repos" view.
//
// Listing only makes sense for a signed-in user, so without a token both
// functions return an empty list straight away and never touch the network.
// =============================================================================

use super::auth::{AuthMode, AuthToken};
use super::client::GithubClient;
use super::error::{Error, Result};
use super::types::{UserRepo, UserRepoSummary};

/// Most recently updated first, one page of up to 100.
const USER_REPOS_PATH: &str = "/user/repos?sort=updated&per_page=100";

impl GithubClient {
    /// All repositories of the token's owner, in GitHub's "updated" order.
    pub async fn list_repositories(&self, token: Option<&AuthToken>) -> Result<Vec<UserRepoSummary>> {
        let Some(token) = token else {
            return Ok(Vec::new());
        };

        let url = self.api_url(USER_REPOS_PATH);
        let response = self
            .get(&url, AuthMode::Authenticated(token))
            .send()
            .await
            .map_err(|e| Error::ListFailure {
                status: None,
                source: Some(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ListFailure {
                status: Some(status),
                source: None,
            });
        }

        let repos: Vec<UserRepo> = response.json().await.map_err(|e| Error::ListFailure {
            status: None,
            source: Some(e),
        })?;

        Ok(repos.into_iter().map(UserRepoSummary::from).collect())
    }

    /// The forks among `list_repositories`, order untouched.
    pub async fn list_forks(&self, token: Option<&AuthToken>) -> Result<Vec<UserRepoSummary>> {
        let repos = self.list_repositories(token).await?;
        Ok(repos.into_iter().filter(|repo| repo.is_fork).collect())
    }
}
