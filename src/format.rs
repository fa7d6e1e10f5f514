//! MarkdownV2 message formatting.
//!
//! Telegram's MarkdownV2 syntax reserves a fixed set of punctuation
//! characters; every user-derived fragment (title, header text, URL) is
//! escaped *before* the formatter splices in its own structural syntax
//! (link brackets, bullet markers, escaped line breaks), so escaping can
//! never corrupt the syntax the formatter itself inserts.
//!
//! Two policies exist, selected per deployment via [`MessagePolicy`]:
//! - [`outline_message`]: the post title followed by a linked outline of
//!   its section headers
//! - [`caption_message`]: a short caption naming the post and linking it

use crate::models::{HeaderLevel, PostContent};
use clap::ValueEnum;
use url::Url;

/// Characters reserved by Telegram's MarkdownV2 syntax.
const MARKDOWN_V2_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Which message layout a deployment sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessagePolicy {
    /// Title plus a linked outline of the post's section headers.
    Outline,
    /// Short caption naming the post, attached to the media batch.
    Caption,
}

/// Escape every MarkdownV2-reserved character with a single backslash.
///
/// All other characters pass through unchanged.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the outline message: escaped title, then one linked bullet per
/// section header.
///
/// `h1` headers become top-level bullets, `h3` headers indented
/// sub-bullets; each bullet links to `{post_url}#{anchor_id}`. A post
/// without headers yields just the title line.
pub fn outline_message(post: &PostContent, post_url: &Url) -> String {
    let mut text = format!("{}\\\n", escape_markdown_v2(&post.title));
    for header in &post.headers {
        let link = format!(
            "[{}]({}#{})",
            escape_markdown_v2(&header.text),
            post_url,
            header.anchor_id
        );
        match header.level {
            HeaderLevel::H1 => {
                text.push_str("\\\n\\- ");
                text.push_str(&link);
            }
            HeaderLevel::H3 => {
                text.push_str("\\\n   \\- ");
                text.push_str(&link);
            }
        }
    }
    text
}

/// Build the caption message: title, fixed suffix, and the post URL on its
/// own line, escaped as one unit.
pub fn caption_message(post: &PostContent, post_url: &Url) -> String {
    escape_markdown_v2(&format!(
        "{} - Essa Semana no GNOME\n{}",
        post.title, post_url
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Header;
    use pretty_assertions::assert_eq;

    fn post_url() -> Url {
        Url::parse("https://thisweek.gnome.org/posts/2025/01/twig-182/").unwrap()
    }

    #[test]
    fn test_escape_covers_whole_reserved_set() {
        let input = "_*[]()~`>#+-=|{}.!";
        let escaped = escape_markdown_v2(input);
        assert_eq!(
            escaped,
            "\\_\\*\\[\\]\\(\\)\\~\\`\\>\\#\\+\\-\\=\\|\\{\\}\\.\\!"
        );
    }

    #[test]
    fn test_escape_leaves_other_characters_alone() {
        assert_eq!(escape_markdown_v2("Arquivos é demais"), "Arquivos é demais");
        assert_eq!(escape_markdown_v2(""), "");
    }

    #[test]
    fn test_escape_is_single_backslash_per_character() {
        // Reserved characters already present in pairs still get exactly
        // one escape marker each.
        assert_eq!(escape_markdown_v2("a..b"), "a\\.\\.b");
    }

    #[test]
    fn test_outline_with_headers() {
        let post = PostContent {
            title: "#182 Short Notice".to_string(),
            headers: vec![
                Header {
                    level: HeaderLevel::H1,
                    anchor_id: "core".to_string(),
                    text: "Core Apps".to_string(),
                },
                Header {
                    level: HeaderLevel::H3,
                    anchor_id: "gnome-maps".to_string(),
                    text: "Maps".to_string(),
                },
            ],
            images: Vec::new(),
        };

        let text = outline_message(&post, &post_url());
        assert_eq!(
            text,
            "\\#182 Short Notice\\\n\
             \\\n\\- [Core Apps](https://thisweek.gnome.org/posts/2025/01/twig-182/#core)\
             \\\n   \\- [Maps](https://thisweek.gnome.org/posts/2025/01/twig-182/#gnome-maps)"
        );
    }

    #[test]
    fn test_outline_without_headers_is_single_line() {
        let post = PostContent {
            title: "Example".to_string(),
            headers: Vec::new(),
            images: vec![
                "https://example.org/a.png".to_string(),
                "https://example.org/b.png".to_string(),
            ],
        };

        let text = outline_message(&post, &post_url());
        assert_eq!(text, "Example\\\n");
        assert!(!text.contains("\\- "));
    }

    #[test]
    fn test_header_text_escaped_but_link_syntax_intact() {
        let post = PostContent {
            title: "T".to_string(),
            headers: vec![Header {
                level: HeaderLevel::H1,
                anchor_id: "gtk".to_string(),
                text: "GTK 4.18 (beta)".to_string(),
            }],
            images: Vec::new(),
        };

        let text = outline_message(&post, &post_url());
        // The header's own parentheses are escaped; the link's are not.
        assert!(text.contains(
            "[GTK 4\\.18 \\(beta\\)](https://thisweek.gnome.org/posts/2025/01/twig-182/#gtk)"
        ));
    }

    #[test]
    fn test_caption_message() {
        let post = PostContent {
            title: "Example".to_string(),
            headers: Vec::new(),
            images: Vec::new(),
        };

        let text = caption_message(&post, &post_url());
        assert_eq!(
            text,
            "Example \\- Essa Semana no GNOME\n\
             https://thisweek\\.gnome\\.org/posts/2025/01/twig\\-182/"
        );
    }
}
