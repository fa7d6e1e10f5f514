//! Data models for the extracted weekly post.
//!
//! This module defines the structured record handed from the content
//! extractor to the message formatter:
//! - [`PostContent`]: title, section headers, and image URLs of one post
//! - [`Header`]: a single linkable section heading
//! - [`HeaderLevel`]: the heading's nesting level in the source template
//!
//! A `PostContent` is immutable once extracted and scoped to a single run;
//! nothing in here is persisted.

/// Nesting level of a section heading in the post template.
///
/// The weekly post template only uses two levels for navigable sections:
/// `h1` for top-level sections and `h3` for per-project subsections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLevel {
    H1,
    H3,
}

/// A section heading with a stable anchor, usable as a deep link target.
///
/// Headers are collected in document order. The anchor id is always
/// non-empty; headings without one are dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Nesting level in the source document.
    pub level: HeaderLevel,
    /// Anchor id, linkable as `{post_url}#{anchor_id}`.
    pub anchor_id: String,
    /// Visible heading text.
    pub text: String,
}

/// The structured content of one weekly post.
///
/// Produced by the content extractor, consumed by the message formatter.
/// A post with zero headers or zero images is valid; the title falls back
/// to a placeholder when the template's title heading is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    /// Post title, or the extractor's placeholder when absent.
    pub title: String,
    /// Section headings in document order.
    pub headers: Vec<Header>,
    /// Absolute image URLs in document order.
    pub images: Vec<String>,
}
