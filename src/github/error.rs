// src/github/error.rs
// =============================================================================
// Failure kinds reported by the repository resolver.
//
// Every failure is handed back to the caller; nothing here is retried or
// swallowed. Variants that come from an HTTP exchange keep the status code when
// the server answered, and the underlying reqwest error when it did not, so the
// CLI can tell "the API said no" apart from "we never reached the API".
// =============================================================================

use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The repository does not exist (HTTP 404 on the metadata call)
    #[error("Repository {repo} not found")]
    NotFound { repo: String },

    /// HTTP 403 on the metadata call. GitHub uses the same status for an
    /// exhausted rate limit and for a private repository requested without
    /// credentials, so the message names both.
    #[error(
        "Access to {repo} was denied: the API rate limit may be exceeded, \
         or the repository is private and needs a token"
    )]
    AccessDenied { repo: String },

    /// Any other failure while reading repository metadata or the file tree
    #[error("Failed to fetch {}{}", .what, describe(.status))]
    FetchFailure {
        what: String,
        status: Option<StatusCode>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Failure while downloading one document's text
    #[error("Failed to fetch markdown content from {}{}", .url, describe(.status))]
    ContentFetchFailure {
        url: String,
        status: Option<StatusCode>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Failure while listing the signed-in user's repositories
    #[error("Failed to list repositories{}", describe(.status))]
    ListFailure {
        status: Option<StatusCode>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Invalid repository '{0}': use the format \"owner/repo\"")]
    InvalidRepository(String),

    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

impl Error {
    pub(crate) fn fetch(what: impl Into<String>, status: Option<StatusCode>, source: Option<reqwest::Error>) -> Self {
        Self::FetchFailure {
            what: what.into(),
            status,
            source,
        }
    }

    pub(crate) fn content(url: &str, status: Option<StatusCode>, source: Option<reqwest::Error>) -> Self {
        Self::ContentFetchFailure {
            url: url.to_string(),
            status,
            source,
        }
    }

    /// The HTTP status the server answered with, if it answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::AccessDenied { .. } => Some(StatusCode::FORBIDDEN),
            Self::FetchFailure { status, .. }
            | Self::ContentFetchFailure { status, .. }
            | Self::ListFailure { status, .. } => *status,
            Self::InvalidRepository(_) | Self::Client(_) => None,
        }
    }

    /// True when the request never produced an HTTP response (offline, DNS,
    /// timeout). Undecodable bodies are not network errors.
    pub fn is_network(&self) -> bool {
        match self {
            Self::FetchFailure { status: None, source: Some(e), .. }
            | Self::ContentFetchFailure { status: None, source: Some(e), .. }
            | Self::ListFailure { status: None, source: Some(e) } => !e.is_decode(),
            _ => false,
        }
    }
}

fn describe(status: &Option<StatusCode>) -> String {
    match status {
        Some(status) => format!(": HTTP {}", status.as_u16()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_mentions_both_causes() {
        let message = Error::AccessDenied { repo: "o/r".to_string() }.to_string();
        assert!(message.contains("rate limit"));
        assert!(message.contains("private"));
    }

    #[test]
    fn test_fetch_failure_reports_status() {
        let error = Error::fetch("file tree", Some(StatusCode::INTERNAL_SERVER_ERROR), None);
        assert_eq!(error.to_string(), "Failed to fetch file tree: HTTP 500");
        assert_eq!(error.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!error.is_network());
    }

    #[test]
    fn test_not_found_carries_404() {
        let error = Error::NotFound { repo: "o/r".to_string() };
        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
    }
}
