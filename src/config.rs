// src/config.rs
// =============================================================================
// Connection settings shared by every GitHub request.
//
// The defaults point at the public GitHub hosts. Both bases can be swapped out
// (GitHub Enterprise, a local mock server in tests) without touching the
// resolver logic.
// =============================================================================

use std::time::Duration;

use url::Url;

/// REST API host used for metadata, trees, contents and user listings.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Host that serves file bytes directly given owner/repo/branch/path.
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Per-request timeout unless overridden on the command line.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base without a trailing slash
    pub api_base: String,
    /// Raw-content base without a trailing slash
    pub raw_base: String,
    /// GitHub rejects API requests that carry no User-Agent
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
            user_agent: format!("doc-lens/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    // Overrides the API base after checking it is an absolute URL
    pub fn with_api_base(mut self, base: &str) -> Result<Self, url::ParseError> {
        self.api_base = normalize_base(base)?;
        Ok(self)
    }

    // Overrides the raw-content base after checking it is an absolute URL
    pub fn with_raw_base(mut self, base: &str) -> Result<Self, url::ParseError> {
        self.raw_base = normalize_base(base)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Validates a base URL and strips trailing slashes so paths can be appended
// with a plain format!("{}/...")
fn normalize_base(base: &str) -> Result<String, url::ParseError> {
    let trimmed = base.trim().trim_end_matches('/');
    Url::parse(trimmed)?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_github() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "https://api.github.com");
        assert_eq!(config.raw_base, "https://raw.githubusercontent.com");
        assert!(config.user_agent.starts_with("doc-lens/"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::default()
            .with_api_base("https://ghe.example.com/api/v3/")
            .unwrap();
        assert_eq!(config.api_base, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_relative_base_is_rejected() {
        assert!(ClientConfig::default().with_raw_base("not a url").is_err());
    }
}
