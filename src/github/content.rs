// src/github/content.rs
// =============================================================================
// Downloads the text of Markdown documents.
//
// With a token we hit the contents endpoint and ask for the raw media type, so
// GitHub sends the file bytes instead of a base64 JSON envelope. Without one,
// the content URL already points at the raw-content host and a plain GET is
// enough.
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::header::ACCEPT;

use super::auth::{AuthMode, AuthToken};
use super::client::GithubClient;
use super::error::{Error, Result};
use super::types::DocumentRef;

/// Media type that makes the contents endpoint answer with the file itself.
pub const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

impl GithubClient {
    /// Fetches one document's text. The body is returned as-is.
    pub async fn fetch_text(&self, content_url: &str, token: Option<&AuthToken>) -> Result<String> {
        let auth = AuthMode::from_token(token);

        let mut request = self.get(content_url, auth);
        if let AuthMode::Authenticated(_) = auth {
            request = request.header(ACCEPT, RAW_MEDIA_TYPE);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::content(content_url, None, Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::content(content_url, Some(status), None));
        }

        response
            .text()
            .await
            .map_err(|e| Error::content(content_url, None, Some(e)))
    }

    // Fetches several documents, at most `concurrency` at a time
    //
    // Results come back in the same order as `documents`. One failed document
    // does not stop the others; each gets its own Result.
    pub async fn fetch_documents<'a>(
        &self,
        documents: &'a [DocumentRef],
        token: Option<&AuthToken>,
        concurrency: usize,
    ) -> Vec<(&'a DocumentRef, Result<String>)> {
        let fetches = documents.iter().map(|document| async move {
            let text = self.fetch_text(&document.content_url, token).await;
            (document, text)
        });

        stream::iter(fetches)
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. buffered vs buffer_unordered
//    - Both run up to N futures at once
//    - buffer_unordered yields results as they finish
//    - buffered yields them in input order, which is what a document list wants
//
// 2. Why `async move` inside the map?
//    - Each future needs its own copy of `self`, `token` and `document`
//    - They are all references (Copy), so moving them costs nothing
// -----------------------------------------------------------------------------
