// src/github/auth.rs
// =============================================================================
// Bearer tokens and the two ways we talk to GitHub.
//
// The OAuth dance happens elsewhere. All we ever see is "a token" or
// "no token", and the only decision it drives is which headers to send and
// which content URL to build.
// =============================================================================

use std::fmt;

/// An opaque bearer token. Never inspected, never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    // Returns None for blank input so an empty GITHUB_TOKEN means "anonymous"
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Selected once per call from the presence or absence of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode<'a> {
    Anonymous,
    Authenticated(&'a AuthToken),
}

impl<'a> AuthMode<'a> {
    pub fn from_token(token: Option<&'a AuthToken>) -> Self {
        match token {
            Some(token) => Self::Authenticated(token),
            None => Self::Anonymous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticated(_) => "authenticated",
        }
    }
}

/// Supplies the current user's token, if any, at call time.
pub trait TokenProvider {
    fn token(&self) -> Option<AuthToken>;
}

impl TokenProvider for Option<AuthToken> {
    fn token(&self) -> Option<AuthToken> {
        self.clone()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a lifetime on AuthMode?
//    - Authenticated borrows the token instead of cloning the secret
//    - The mode only lives for one call, so the borrow never outlasts the token
//
// 2. Why a hand-written Debug?
//    - #[derive(Debug)] would print the token into logs and panic messages
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_absent() {
        assert!(AuthToken::new("").is_none());
        assert!(AuthToken::new("   ").is_none());
    }

    #[test]
    fn test_debug_hides_secret() {
        let token = AuthToken::new("ghp_secret").unwrap();
        assert_eq!(format!("{:?}", token), "AuthToken(***)");
        assert_eq!(token.expose(), "ghp_secret");
    }

    #[test]
    fn test_mode_follows_token_presence() {
        let token = AuthToken::new("t").unwrap();
        assert_eq!(AuthMode::from_token(None), AuthMode::Anonymous);
        assert_eq!(AuthMode::from_token(Some(&token)), AuthMode::Authenticated(&token));
        assert_eq!(AuthMode::from_token(Some(&token)).label(), "authenticated");
    }

    #[test]
    fn test_option_is_a_token_provider() {
        let provider = AuthToken::new("t");
        assert_eq!(provider.token(), AuthToken::new("t"));
        assert!(None::<AuthToken>.token().is_none());
    }
}
