//! Content extractor for thisweek.gnome.org weekly posts.
//!
//! The weekly post template is stable: the title is an `h1.post-title`
//! inside `<main>`, navigable sections are `h1` elements with anchor ids,
//! per-project subsections are `h3` elements with anchor ids, and the
//! screenshots live in paragraphs inside a `blockquote` under the post
//! body. This module encodes those paths and nothing else.

use crate::models::{Header, HeaderLevel, PostContent};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

/// Placeholder used when the template's title heading is missing.
const FALLBACK_TITLE: &str = "Untitled Post";

/// Anchor id of the template's end-of-content heading, excluded from the
/// section list.
const CLOSING_HEADER_ID: &str = "thats-all-for-this-week";

/// Extract title, section headers, and image URLs from a weekly post.
///
/// Never fails: a document missing any of the expected structure yields
/// defaults instead. Relative image `src` values are resolved against
/// `post_url`.
#[instrument(level = "info", skip(html), fields(%post_url))]
pub fn extract_post(html: &str, post_url: &Url) -> PostContent {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let headers = extract_headers(&document);
    let images = extract_images(&document, post_url);

    debug!(
        %title,
        headers = headers.len(),
        images = images.len(),
        "Extracted post content"
    );

    PostContent {
        title,
        headers,
        images,
    }
}

fn extract_title(document: &Html) -> String {
    let title_selector = Selector::parse("main h1.post-title").unwrap();
    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// Collect `h1` and `h3` headings in document order.
///
/// The title heading and the closing marker are not sections. An `h1`
/// needs a non-empty anchor id; an `h3` additionally needs a non-empty
/// first direct text node (its anchor-icon children are decoration, not
/// heading text).
fn extract_headers(document: &Html) -> Vec<Header> {
    let heading_selector = Selector::parse("h1, h3").unwrap();
    let mut headers = Vec::new();

    for element in document.select(&heading_selector) {
        match element.value().name() {
            "h1" => {
                if element.value().classes().any(|class| class == "post-title") {
                    continue;
                }
                let Some(id) = element.value().id().filter(|id| !id.is_empty()) else {
                    continue;
                };
                if id == CLOSING_HEADER_ID {
                    continue;
                }
                let text = element.text().collect::<String>().trim().to_string();
                headers.push(Header {
                    level: HeaderLevel::H1,
                    anchor_id: id.to_string(),
                    text,
                });
            }
            "h3" => {
                let Some(id) = element.value().id().filter(|id| !id.is_empty()) else {
                    continue;
                };
                let Some(text) = first_direct_text(&element) else {
                    continue;
                };
                headers.push(Header {
                    level: HeaderLevel::H3,
                    anchor_id: id.to_string(),
                    text,
                });
            }
            _ => {}
        }
    }

    headers
}

/// First non-empty text node that is a direct child of the element.
fn first_direct_text(element: &ElementRef) -> Option<String> {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

fn extract_images(document: &Html, post_url: &Url) -> Vec<String> {
    let image_selector = Selector::parse("body > main > div.post > blockquote > p > img").unwrap();
    let mut images = Vec::new();

    for element in document.select(&image_selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        if let Ok(resolved) = post_url.join(src) {
            images.push(resolved.to_string());
        }
    }

    images
}
