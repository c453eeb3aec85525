// src/assets/markdown.rs
// =============================================================================
// The renderer side of asset resolution.
//
// We use the `pulldown-cmark` crate which parses Markdown into a stream of
// events (heading, paragraph, image, ...). Each image event carries its
// destination, and that is where we call resolve_asset_url.
//
// Three entry points:
// - extract_image_sources: every image destination, as written
// - rewrite_image_links:   the same Markdown, image destinations made absolute
// - render_html:           HTML output with image sources made absolute
// =============================================================================

use std::ops::Range;

use pulldown_cmark::{html, Event, Options, Parser, Tag};

use super::path::{resolve_asset_url, AssetContext};

// GitHub-flavoured extras that show up in most READMEs
fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Image destinations in document order, exactly as written.
pub fn extract_image_sources(markdown: &str) -> Vec<String> {
    Parser::new_ext(markdown, options())
        .filter_map(|event| match event {
            Event::Start(Tag::Image(_kind, dest, _title)) if !dest.is_empty() => Some(dest.to_string()),
            _ => None,
        })
        .collect()
}

// Returns `markdown` with every inline image destination replaced by its
// resolved URL. All other bytes are copied through unchanged.
//
// Images whose destination cannot be found verbatim in the source (reference
// style definitions, escaped characters) are left as they are.
pub fn rewrite_image_links(markdown: &str, ctx: &AssetContext<'_>) -> String {
    let mut output = String::with_capacity(markdown.len());
    let mut cursor = 0;

    let events: Vec<(Event<'_>, Range<usize>)> = Parser::new_ext(markdown, options())
        .into_offset_iter()
        .collect();

    for (index, (event, range)) in events.iter().enumerate() {
        let Event::Start(Tag::Image(_kind, dest, _title)) = event else {
            continue;
        };

        // An image nested in the alt text of one we already rewrote
        if range.start < cursor {
            continue;
        }

        let alt_end = alt_text_end(&events[index + 1..]).unwrap_or(range.start);
        let Some(span) = locate_destination(markdown, range.clone(), alt_end, dest) else {
            continue;
        };

        output.push_str(&markdown[cursor..span.start]);
        output.push_str(&resolve_asset_url(dest, ctx));
        cursor = span.end;
    }

    output.push_str(&markdown[cursor..]);
    output
}

/// Renders `markdown` to HTML, resolving each image source on the way.
pub fn render_html(markdown: &str, ctx: &AssetContext<'_>) -> String {
    let events = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::Start(Tag::Image(kind, dest, title)) if !dest.is_empty() => {
            Event::Start(Tag::Image(kind, resolve_asset_url(&dest, ctx).into(), title))
        }
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, events);
    output
}

// Byte offset where the alt text of an image ends, given the events that
// follow its Start. None for an empty alt text.
fn alt_text_end(rest: &[(Event<'_>, Range<usize>)]) -> Option<usize> {
    let mut depth = 0;
    let mut end: Option<usize> = None;

    for (event, range) in rest {
        match event {
            Event::Start(Tag::Image(..)) => depth += 1,
            Event::End(Tag::Image(..)) if depth == 0 => return end,
            Event::End(Tag::Image(..)) => depth -= 1,
            _ => {}
        }
        end = Some(end.map_or(range.end, |end| end.max(range.end)));
    }

    end
}

// Finds the byte span of `dest` inside the image whose source span is `image`.
// The destination follows the first "](" after the alt text, so a title that
// happens to contain "](" is never mistaken for it.
fn locate_destination(markdown: &str, image: Range<usize>, alt_end: usize, dest: &str) -> Option<Range<usize>> {
    if dest.is_empty() {
        return None;
    }

    let from = alt_end.clamp(image.start, image.end);
    let open = from + markdown[from..image.end].find("](")?;
    let offset = markdown[open..image.end].find(dest)?;

    let start = open + offset;
    Some(start..start + dest.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> AssetContext<'static> {
        AssetContext::new("o", "r", "main", "docs/guide.md")
    }

    #[test]
    fn test_extract_image_sources() {
        let markdown = r#"
# Guide

![logo](./img/logo.png)

Some text with a [link](https://example.com) and ![badge](https://img.shields.io/x.svg "Badge").
        "#;
        assert_eq!(
            extract_image_sources(markdown),
            vec!["./img/logo.png", "https://img.shields.io/x.svg"]
        );
    }

    #[test]
    fn test_rewrite_relative_image() {
        let markdown = "Intro\n\n![logo](./img/logo.png \"Logo\")\n\nMore text.\n";
        assert_eq!(
            rewrite_image_links(markdown, &ctx()),
            "Intro\n\n![logo](https://raw.githubusercontent.com/o/r/main/docs/img/logo.png \"Logo\")\n\nMore text.\n"
        );
    }

    #[test]
    fn test_rewrite_leaves_links_and_absolute_images_alone() {
        let markdown = "[see](./other.md) ![a](https://x.com/a.png)";
        assert_eq!(rewrite_image_links(markdown, &ctx()), markdown);
    }

    #[test]
    fn test_rewrite_image_inside_link() {
        let markdown = "[![build](badge.svg)](https://ci.example.com)";
        assert_eq!(
            rewrite_image_links(markdown, &ctx()),
            "[![build](https://raw.githubusercontent.com/o/r/main/docs/badge.svg)](https://ci.example.com)"
        );
    }

    #[test]
    fn test_rewrite_multiple_images_on_one_line() {
        let markdown = "![a](a.png) and ![b](../b.png)";
        assert_eq!(
            rewrite_image_links(markdown, &ctx()),
            "![a](https://raw.githubusercontent.com/o/r/main/docs/a.png) and \
             ![b](https://raw.githubusercontent.com/o/r/main/docs/../b.png)"
        );
    }

    #[test]
    fn test_render_html_resolves_image_src() {
        let html = render_html("![shot](./shot.png)\n", &ctx());
        assert!(html.contains(r#"src="https://raw.githubusercontent.com/o/r/main/docs/shot.png""#));
        assert!(html.contains(r#"alt="shot""#));
    }

    #[test]
    fn test_rewrite_ignores_bracket_in_title() {
        let markdown = r#"![a](x.png "see ](x.png")"#;
        assert_eq!(
            rewrite_image_links(markdown, &ctx()),
            r#"![a](https://raw.githubusercontent.com/o/r/main/docs/x.png "see ](x.png")"#
        );
    }

    #[test]
    fn test_rewrite_image_with_empty_alt() {
        assert_eq!(
            rewrite_image_links("![](pic.png)", &ctx()),
            "![](https://raw.githubusercontent.com/o/r/main/docs/pic.png)"
        );
    }

    #[test]
    fn test_render_html_leaves_empty_source_empty() {
        let html = render_html("![x]()\n", &ctx());
        assert!(html.contains(r#"src="""#));
        assert!(!html.contains("raw.githubusercontent.com"));
    }

    #[test]
    fn test_render_html_keeps_tables() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n", &ctx());
        assert!(html.contains("<table>"));
    }
}
