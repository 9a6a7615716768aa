//! Markdown rendering for digest blocks.
//!
//! Each article becomes one block built from a [`DigestTemplate`]; blocks are
//! joined with a horizontal rule by [`join_blocks`]. Rendering is pure and
//! deterministic.
//!
//! The default block looks like this:
//!
//! ```text
//!
//! # {title}
//!
//! [View on {feed_name}]({url})
//!
//! {summary}
//!
//! {thumbnail_card}
//! ```

use crate::models::Article;
use crate::utils::fill_placeholders;

const DEFAULT_TEMPLATE: &str = "\n# {title}\n\n[View on {feed_name}]({url})\n\n{summary}\n\n{thumbnail_card}\n";

/// Separator placed between two rendered blocks.
pub const BLOCK_SEPARATOR: &str = "\n---\n";

/// Display width of the thumbnail image, in pixels.
pub const THUMBNAIL_WIDTH: u32 = 480;

/// Per-digest Markdown block template.
///
/// Recognized placeholders: `{title}`, `{feed_name}`, `{url}`, `{summary}`,
/// `{thumbnail_card}`. Anything else is copied through literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestTemplate {
    template: String,
}

impl Default for DigestTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl DigestTemplate {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Render one article as a Markdown block.
    ///
    /// An article that somehow reaches this point without a summary is
    /// rendered with its extracted text instead.
    pub fn render(&self, article: &Article) -> String {
        let summary = article.summary.as_deref().unwrap_or(&article.text);
        let card = thumbnail_card(&article.url, article.thumbnail_url.as_deref());

        fill_placeholders(
            &self.template,
            &[
                ("title", article.title.as_str()),
                ("feed_name", article.feed_name.as_str()),
                ("url", article.url.as_str()),
                ("summary", summary),
                ("thumbnail_card", card.as_str()),
            ],
        )
    }
}

/// Linked thumbnail image, or an empty string when there is no thumbnail.
pub fn thumbnail_card(url: &str, thumbnail: Option<&str>) -> String {
    match thumbnail {
        Some(src) => format!(
            r#"<a href="{url}" target="_blank"><img src="{src}" alt="thumbnail" width="{THUMBNAIL_WIDTH}" /></a>"#
        ),
        None => String::new(),
    }
}

/// Concatenate rendered blocks in order.
pub fn join_blocks(blocks: &[String]) -> String {
    blocks.join(BLOCK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(thumbnail: Option<&str>) -> Article {
        Article {
            feed_name: "Lex Fridman".to_string(),
            title: "Episode 1".to_string(),
            url: "https://lexfridman.com/ep1".to_string(),
            text: "raw text".to_string(),
            raw_summary_html: "<p>raw text</p>".to_string(),
            thumbnail_url: thumbnail.map(str::to_string),
            summary: Some("A summary.".to_string()),
        }
    }

    #[test]
    fn test_render_default_with_thumbnail() {
        let block = DigestTemplate::default().render(&article(Some("https://img.example.com/ep1.jpg")));
        assert_eq!(
            block,
            "\n# Episode 1\n\n[View on Lex Fridman](https://lexfridman.com/ep1)\n\nA summary.\n\n\
             <a href=\"https://lexfridman.com/ep1\" target=\"_blank\"><img src=\"https://img.example.com/ep1.jpg\" alt=\"thumbnail\" width=\"480\" /></a>\n"
        );
    }

    #[test]
    fn test_render_without_thumbnail_has_empty_media_section() {
        let block = DigestTemplate::default().render(&article(None));
        assert!(!block.contains("<img"));
        assert!(block.ends_with("A summary.\n\n\n"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let template = DigestTemplate::default();
        let a = article(Some("https://img.example.com/ep1.jpg"));
        assert_eq!(template.render(&a), template.render(&a));
    }

    #[test]
    fn test_render_falls_back_to_text() {
        let mut a = article(None);
        a.summary = None;
        assert!(DigestTemplate::default().render(&a).contains("raw text"));
    }

    #[test]
    fn test_custom_template_does_not_expand_summary_braces() {
        let template = DigestTemplate::new("## {title} ({feed_name})\n{summary}");
        let mut a = article(None);
        a.summary = Some("uses {url} literally".to_string());
        assert_eq!(template.render(&a), "## Episode 1 (Lex Fridman)\nuses {url} literally");
    }

    #[test]
    fn test_join_blocks() {
        assert_eq!(join_blocks(&[]), "");
        assert_eq!(join_blocks(&["a".to_string()]), "a");
        assert_eq!(join_blocks(&["a".to_string(), "b".to_string()]), "a\n---\nb");
    }
}
