//! Building [`Article`]s from raw feed entries.
//!
//! Two fallback chains live here, both written as ordered lists of plain
//! functions tried in sequence:
//!
//! - the summary source: `itunes:summary`, `summary`, `content`
//! - the thumbnail: video-host thumbnail, the entry's own image, the feed image
//!
//! The first candidate that yields something usable wins.

use crate::api::TextGenerator;
use crate::error::{Error, Result};
use crate::models::{Article, RawEntry};
use crate::summarize::Summarizer;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::{debug, instrument};
use url::Url;

/// Extracts one optional text field from a record.
pub type Extractor<T> = for<'a> fn(&'a T) -> Option<&'a str>;

/// Proposes a thumbnail for an entry, given the feed-level image.
pub type ThumbnailResolver = fn(&RawEntry, Option<&str>) -> Option<String>;

fn itunes_summary(entry: &RawEntry) -> Option<&str> {
    entry.itunes_summary.as_deref()
}

fn summary(entry: &RawEntry) -> Option<&str> {
    entry.summary.as_deref()
}

fn content(entry: &RawEntry) -> Option<&str> {
    entry.content.as_deref()
}

/// Summary candidates, best first.
pub const SUMMARY_FIELDS: [Extractor<RawEntry>; 3] = [itunes_summary, summary, content];

/// Thumbnail sources, best first.
pub const THUMBNAIL_RESOLVERS: [ThumbnailResolver; 3] = [video_thumbnail, entry_image, feed_image];

static VIDEO_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|shorts/|embed/)|youtu\.be/)([A-Za-z0-9_-]+)")
        .expect("video id pattern is valid")
});

/// The first extractor result that is not blank.
pub fn first_non_empty<'e, T>(item: &'e T, extractors: &[Extractor<T>]) -> Option<&'e str> {
    extractors
        .iter()
        .filter_map(|extract| extract(item))
        .find(|value| !value.trim().is_empty())
}

/// Visible text of an HTML fragment: every text node outside `script` and
/// `style`, concatenated and trimmed.
pub fn html_to_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let mut text = String::new();
    for node in fragment.root_element().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style"))
        });
        if !hidden {
            text.push_str(chunk);
        }
    }
    text.trim().to_string()
}

/// Video identifier embedded in a YouTube watch, shorts, embed or short link.
pub fn video_id(link: &str) -> Option<&str> {
    VIDEO_ID
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn video_thumbnail(entry: &RawEntry, _feed_image: Option<&str>) -> Option<String> {
    let id = video_id(entry.link.as_deref()?)?;
    Some(format!("https://img.youtube.com/vi/{id}/hqdefault.jpg"))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn entry_image(entry: &RawEntry, _feed_image: Option<&str>) -> Option<String> {
    non_blank(entry.image.as_deref())
}

fn feed_image(_entry: &RawEntry, feed_image: Option<&str>) -> Option<String> {
    non_blank(feed_image)
}

/// Make `candidate` an absolute http(s) URL, resolving it against `base`.
pub fn absolutize(base: &str, candidate: &str) -> Option<String> {
    let resolved = match Url::parse(candidate) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base).ok()?.join(candidate).ok()?,
        Err(_) => return None,
    };
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// Thumbnail for an entry whose link is `link`.
///
/// Candidates that cannot be turned into an absolute URL are skipped in
/// favour of the next resolver.
pub fn resolve_thumbnail(entry: &RawEntry, link: &str, feed_image: Option<&str>) -> Option<String> {
    THUMBNAIL_RESOLVERS
        .iter()
        .filter_map(|resolve| resolve(entry, feed_image))
        .find_map(|candidate| absolutize(link, &candidate))
}

fn required<'e>(value: Option<&'e str>, field: &'static str) -> Result<&'e str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingField(field))
}

/// Normalize one entry into an [`Article`] with no summary yet.
///
/// When the summary HTML has no visible text, the title translated by
/// `summarizer` stands in as the article text.
#[instrument(level = "debug", skip_all, fields(feed = %feed_name, link = entry.link.as_deref().unwrap_or("unknown")))]
pub async fn build_article<G: TextGenerator>(
    entry: &RawEntry,
    feed_name: &str,
    feed_image: Option<&str>,
    summarizer: &Summarizer<'_, G>,
) -> Result<Article> {
    let url = required(entry.link.as_deref(), "link")?;
    let title = required(entry.title.as_deref(), "title")?;

    let raw_summary_html = first_non_empty(entry, &SUMMARY_FIELDS).unwrap_or_default();
    let thumbnail_url = resolve_thumbnail(entry, url, feed_image);

    let mut text = html_to_text(raw_summary_html);
    if text.is_empty() {
        debug!("Summary has no visible text; translating title");
        text = summarizer.translate_title(title).await?;
    }

    Ok(Article {
        feed_name: feed_name.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        text,
        raw_summary_html: raw_summary_html.to_string(),
        thumbnail_url,
        summary: None,
    })
}
