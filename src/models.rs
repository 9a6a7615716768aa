//! Data models for feed entries and the articles built from them.
//!
//! This module defines the records that flow through the pipeline:
//! - [`Feed`]: One fetched feed document (fallback image plus entries)
//! - [`RawEntry`]: A single feed item as the feed adapter mapped it
//! - [`Article`]: The normalized record that gets summarized and rendered
//!
//! Every optional field is resolved by the feed adapter in
//! [`crate::feeds::parser`]; nothing downstream inspects the feed model.

use chrono::{DateTime, Utc};

/// A fetched feed: its channel-level image and its entries in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    /// Channel image (`<image><url>`, Atom `<logo>`/`<icon>`).
    pub image: Option<String>,
    /// Entries in the order the feed lists them.
    pub entries: Vec<RawEntry>,
}

/// A single feed item before normalization.
///
/// The summary candidates are kept in separate fields so the article builder
/// can try them in a fixed priority order: `itunes_summary`, `summary`, then
/// `content`. Dates that the feed carried but that could not be parsed are
/// `None`, the same as absent ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    /// Link to the item (alternate link, or a URL-shaped id).
    pub link: Option<String>,
    /// Item title.
    pub title: Option<String>,
    /// `<itunes:summary>` or `<media:description>`.
    pub itunes_summary: Option<String>,
    /// RSS `<description>` or Atom `<summary>`.
    pub summary: Option<String>,
    /// `<content:encoded>` or Atom `<content>`.
    pub content: Option<String>,
    /// `<updated>` / `<dc:date>`.
    pub updated: Option<DateTime<Utc>>,
    /// `<pubDate>` / `<published>`.
    pub published: Option<DateTime<Utc>>,
    /// Dedicated per-item image: `itunes:image`, a media thumbnail, or an
    /// image enclosure. May be relative.
    pub image: Option<String>,
}

/// A normalized feed item, ready to be summarized and rendered.
///
/// `summary` is `None` when the article leaves the builder and is set exactly
/// once by the pipeline before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Name of the feed source the entry came from.
    pub feed_name: String,
    pub title: String,
    pub url: String,
    /// Visible text of the summary HTML, or the translated title when empty.
    pub text: String,
    /// The summary candidate the text was extracted from (may be empty).
    pub raw_summary_html: String,
    /// Absolute thumbnail URL, if one could be resolved.
    pub thumbnail_url: Option<String>,
    pub summary: Option<String>,
}

impl Article {
    /// Attach the summary, consuming the unsummarized article.
    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = Some(summary);
        self
    }
}
