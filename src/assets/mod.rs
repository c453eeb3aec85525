// src/assets/mod.rs
// =============================================================================
// Everything about images referenced from inside a document.
//
// - path:     turns one relative reference into an absolute URL
// - markdown: finds image references in Markdown and rewrites/renders them
// =============================================================================

mod markdown;
mod path;

pub use markdown::{extract_image_sources, render_html, rewrite_image_links};
pub use path::{resolve_asset_url, AssetContext};
