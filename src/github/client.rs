// src/github/client.rs
// =============================================================================
// The HTTP client every GitHub call goes through.
//
// GithubClient wraps a reqwest::Client (cheap to clone, pools connections)
// plus the immutable endpoint settings. It carries no per-call state, so the
// same client can serve any number of concurrent requests without locking.
//
// The resolver operations live next door, each in its own file, as extra
// `impl GithubClient` blocks:
// - resolver.rs: default branch + recursive tree -> RepositorySnapshot
// - content.rs:  document text
// - repos.rs:    the signed-in user's repositories
// =============================================================================

use reqwest::{Client, RequestBuilder};
use tracing::debug;

use super::auth::AuthMode;
use super::error::{Error, Result};
use crate::config::ClientConfig;

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    config: ClientConfig,
}

impl GithubClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // Joins a path like "/repos/o/r" onto the API base
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base, path)
    }

    // Starts a GET request, adding the bearer header only in authenticated mode
    pub(crate) fn get(&self, url: &str, auth: AuthMode<'_>) -> RequestBuilder {
        debug!(url, mode = auth.label(), "GET");
        let request = self.http.get(url);
        match auth {
            AuthMode::Authenticated(token) => request.bearer_auth(token.expose()),
            AuthMode::Anonymous => request,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::auth::AuthToken;

    #[test]
    fn test_api_url_joins_base() {
        let client = GithubClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.api_url("/repos/o/r"), "https://api.github.com/repos/o/r");
    }

    #[tokio::test]
    async fn test_bearer_header_only_when_authenticated() {
        let mut server = mockito::Server::new_async().await;
        let with_token = server
            .mock("GET", "/ping")
            .match_header("authorization", "Bearer tok")
            .with_status(204)
            .create_async()
            .await;
        let client = test_support::client_for(&server.url());
        let token = AuthToken::new("tok").unwrap();

        let response = client
            .get(&client.api_url("/ping"), AuthMode::Authenticated(&token))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 204);
        with_token.assert_async().await;

        let without_token = server
            .mock("GET", "/pong")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(204)
            .create_async()
            .await;
        client
            .get(&client.api_url("/pong"), AuthMode::Anonymous)
            .send()
            .await
            .unwrap();
        without_token.assert_async().await;
    }
}
