// src/assets/path.rs
// =============================================================================
// Resolves an image reference found inside a document to an absolute URL.
//
// Markdown in a repository usually points at images relative to the file it
// lives in ("./img/logo.png" from docs/guide.md means docs/img/logo.png).
// Outside the repository those paths mean nothing, so we rebuild them on the
// raw-content host:
//
//   https://<raw-host>/<owner>/<repo>/<branch>/<document dir>/<src>
//
// This is pure string work. No I/O, and it never fails: a strange input just
// produces a best-effort URL, the same way a Markdown renderer would shrug.
// =============================================================================

use crate::config::DEFAULT_RAW_BASE;

/// Where the document being rendered lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetContext<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub branch: &'a str,
    /// Repository-relative path of the document, e.g. "docs/a/b.md"
    pub document_path: &'a str,
    pub raw_base: &'a str,
}

impl<'a> AssetContext<'a> {
    pub fn new(owner: &'a str, repo: &'a str, branch: &'a str, document_path: &'a str) -> Self {
        Self {
            owner,
            repo,
            branch,
            document_path,
            raw_base: DEFAULT_RAW_BASE,
        }
    }

    pub fn with_raw_base(mut self, raw_base: &'a str) -> Self {
        self.raw_base = raw_base;
        self
    }

    // Everything before the document's last '/', or "" at the repository root
    fn dir_path(&self) -> &'a str {
        match self.document_path.rfind('/') {
            Some(index) => &self.document_path[..index],
            None => "",
        }
    }
}

// Resolves `raw_src` against the document described by `ctx`
//
// Rules, in order:
// 1. http://, https:// and protocol-relative //host URLs are returned as-is
// 2. one leading "./" is dropped
// 3. the rest is appended to the document's directory on the raw host
//
// "../" segments are left in the URL untouched; the raw host collapses them.
// Nothing stops a reference from climbing above the repository root.
pub fn resolve_asset_url(raw_src: &str, ctx: &AssetContext<'_>) -> String {
    if is_absolute(raw_src) {
        return raw_src.to_string();
    }

    let src = raw_src.strip_prefix("./").unwrap_or(raw_src);
    let dir_path = ctx.dir_path();

    if dir_path.is_empty() {
        format!(
            "{}/{}/{}/{}/{}",
            ctx.raw_base, ctx.owner, ctx.repo, ctx.branch, src
        )
    } else {
        format!(
            "{}/{}/{}/{}/{}/{}",
            ctx.raw_base, ctx.owner, ctx.repo, ctx.branch, dir_path, src
        )
    }
}

fn is_absolute(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://") || src.starts_with("//")
}
