//! Mapping parsed feeds into [`Feed`] and [`RawEntry`] records.
//!
//! Parsing itself is done by `feed-rs`, which understands RSS 0.x/1.0/2.0,
//! Atom and JSON Feed along with the iTunes and Media RSS extensions. This
//! module only decides which parts of its model the pipeline sees.
//!
//! # Field mapping
//!
//! | Record field | `feed_rs` source |
//! |---|---|
//! | `link` | first `alternate` (or rel-less) link, else a URL-shaped entry id |
//! | `itunes_summary` | media object description (`itunes:summary`, `media:description`) |
//! | `summary` | `summary` (RSS `<description>`, Atom `<summary>`) |
//! | `content` | `content.body` (`<content:encoded>`, Atom `<content>`) |
//! | `updated` / `published` | parsed timestamps; unparseable ones are `None` |
//! | `image` | media thumbnails (`itunes:image`, `media:thumbnail`), then image media content and enclosures |
//! | `Feed::image` | feed logo (`<image><url>`, Atom `<logo>`), else icon |

use crate::error::{Error, Result};
use crate::models::{Feed, RawEntry};
use feed_rs::model::{Entry, MediaObject};
use feed_rs::parser;
use tracing::debug;

/// Parse a feed document.
///
/// Fails when the body is not a feed `feed-rs` recognizes. Missing fields are
/// never errors.
pub fn parse_feed(body: &[u8]) -> Result<Feed> {
    let feed = parser::parse(body).map_err(|e| Error::Feed(e.to_string()))?;

    let image = feed
        .logo
        .as_ref()
        .or(feed.icon.as_ref())
        .and_then(|img| non_empty(&img.uri));
    let entries: Vec<RawEntry> = feed.entries.iter().map(raw_entry).collect();

    debug!(feed_type = ?feed.feed_type, entries = entries.len(), "Mapped feed");
    Ok(Feed { image, entries })
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn raw_entry(entry: &Entry) -> RawEntry {
    RawEntry {
        link: entry_link(entry),
        title: entry.title.as_ref().and_then(|t| non_empty(&t.content)),
        itunes_summary: entry
            .media
            .iter()
            .filter_map(|m| m.description.as_ref())
            .find_map(|t| non_empty(&t.content)),
        summary: entry.summary.as_ref().and_then(|t| non_empty(&t.content)),
        content: entry
            .content
            .as_ref()
            .and_then(|c| c.body.as_deref())
            .and_then(non_empty),
        updated: entry.updated,
        published: entry.published,
        image: entry_image(&entry.media),
    }
}

fn entry_link(entry: &Entry) -> Option<String> {
    entry
        .links
        .iter()
        .find(|link| matches!(link.rel.as_deref(), None | Some("alternate")))
        .and_then(|link| non_empty(&link.href))
        .or_else(|| is_url(&entry.id).then(|| entry.id.clone()))
}

fn entry_image(media: &[MediaObject]) -> Option<String> {
    let thumbnails = media
        .iter()
        .flat_map(|m| &m.thumbnails)
        .map(|thumb| thumb.image.uri.as_str());
    let images = media
        .iter()
        .flat_map(|m| &m.content)
        .filter(|c| {
            c.content_type
                .as_ref()
                .is_some_and(|mime| mime.type_().as_str() == "image")
        })
        .filter_map(|c| c.url.as_ref())
        .map(|url| url.as_str());

    thumbnails.chain(images).find_map(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_recent;
    use chrono::{TimeZone, Utc};

    const PODCAST_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd"
     xmlns:content="http://purl.org/rss/1.0/modules/content/"
     xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Example Cast</title>
    <link>https://cast.example.com</link>
    <description>A show</description>
    <image>
      <url>https://cast.example.com/cover.jpg</url>
      <title>Example Cast</title>
      <link>https://cast.example.com</link>
    </image>
    <item>
      <title>Episode 1: Tom &amp; Jerry</title>
      <link>https://cast.example.com/ep1</link>
      <description>&lt;p&gt;Plain description&lt;/p&gt;</description>
      <itunes:image href="https://cast.example.com/ep1.jpg"/>
      <media:thumbnail url="https://cast.example.com/ep1-small.jpg"/>
      <pubDate>Tue, 14 Oct 2025 08:30:00 GMT</pubDate>
    </item>
    <item>
      <title>Episode 2</title>
      <guid isPermaLink="true">https://cast.example.com/ep2</guid>
      <content:encoded><![CDATA[<div>Full text</div>]]></content:encoded>
      <enclosure url="https://cast.example.com/ep2.jpg" length="1024" type="image/jpeg"/>
    </item>
    <item>
      <title>Episode 3</title>
      <guid isPermaLink="false">tag:cast.example.com,2025:3</guid>
    </item>
  </channel>
</rss>"#;

    const YOUTUBE_ATOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/"
      xmlns:yt="http://www.youtube.com/xml/schemas/2015">
  <id>yt:channel:UC123</id>
  <title>Video Channel</title>
  <updated>2025-10-14T08:00:00+00:00</updated>
  <entry>
    <id>yt:video:abc123</id>
    <yt:videoId>abc123</yt:videoId>
    <title>Launch day</title>
    <link rel="alternate" href="https://www.youtube.com/watch?v=abc123"/>
    <published>2025-10-14T07:00:00+00:00</published>
    <updated>2025-10-14T08:00:00+00:00</updated>
    <media:group>
      <media:title>Launch day</media:title>
      <media:description>What we shipped today.</media:description>
      <media:thumbnail url="https://i.example.com/abc123.jpg" width="480" height="360"/>
    </media:group>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_podcast_rss() {
        let feed = parse_feed(PODCAST_RSS.as_bytes()).unwrap();

        assert_eq!(feed.image.as_deref(), Some("https://cast.example.com/cover.jpg"));
        assert_eq!(feed.entries.len(), 3);

        let first = &feed.entries[0];
        assert_eq!(first.title.as_deref(), Some("Episode 1: Tom & Jerry"));
        assert_eq!(first.link.as_deref(), Some("https://cast.example.com/ep1"));
        assert!(first.summary.as_deref().unwrap().contains("Plain description"));
        assert_eq!(first.published, Some(Utc.with_ymd_and_hms(2025, 10, 14, 8, 30, 0).unwrap()));
        assert!(first.image.as_deref().unwrap().starts_with("https://cast.example.com/ep1"));
    }

    #[test]
    fn test_rss_guid_link_and_image_enclosure() {
        let feed = parse_feed(PODCAST_RSS.as_bytes()).unwrap();

        let second = &feed.entries[1];
        assert_eq!(second.link.as_deref(), Some("https://cast.example.com/ep2"));
        assert!(second.content.as_deref().unwrap().contains("Full text"));
        assert_eq!(second.image.as_deref(), Some("https://cast.example.com/ep2.jpg"));
        assert_eq!(second.published, None);

        let third = &feed.entries[2];
        assert_eq!(third.link, None);
        assert_eq!(third.image, None);
    }

    #[test]
    fn test_parse_youtube_atom() {
        let feed = parse_feed(YOUTUBE_ATOM.as_bytes()).unwrap();
        assert_eq!(feed.entries.len(), 1);

        let video = &feed.entries[0];
        assert_eq!(video.title.as_deref(), Some("Launch day"));
        assert_eq!(video.link.as_deref(), Some("https://www.youtube.com/watch?v=abc123"));
        assert_eq!(video.itunes_summary.as_deref(), Some("What we shipped today."));
        assert_eq!(video.published, Some(Utc.with_ymd_and_hms(2025, 10, 14, 7, 0, 0).unwrap()));
        assert_eq!(video.updated, Some(Utc.with_ymd_and_hms(2025, 10, 14, 8, 0, 0).unwrap()));
        assert_eq!(video.image.as_deref(), Some("https://i.example.com/abc123.jpg"));
    }

    #[test]
    fn test_parse_prefixed_atom_namespace() {
        let xml = r#"<atom:feed xmlns:atom="http://www.w3.org/2005/Atom">
  <atom:id>urn:feed:1</atom:id>
  <atom:title>Prefixed</atom:title>
  <atom:entry>
    <atom:id>urn:entry:1</atom:id>
    <atom:title>Prefixed entry</atom:title>
    <atom:link href="https://blog.example.com/prefixed"/>
    <atom:updated>2025-10-14T08:00:00Z</atom:updated>
  </atom:entry>
</atom:feed>"#;

        let feed = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(feed.entries.len(), 1);
        assert_eq!(feed.entries[0].title.as_deref(), Some("Prefixed entry"));
        assert_eq!(feed.entries[0].link.as_deref(), Some("https://blog.example.com/prefixed"));
    }

    #[test]
    fn test_unparseable_updated_falls_back_to_published() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <id>urn:feed:2</id>
  <title>Dates</title>
  <entry>
    <id>urn:entry:2</id>
    <title>Odd date</title>
    <link href="https://blog.example.com/odd"/>
    <updated>sometime last week</updated>
    <published>2025-10-15T09:00:00Z</published>
  </entry>
</feed>"#;

        let feed = parse_feed(xml.as_bytes()).unwrap();
        let cutoff = Utc.with_ymd_and_hms(2025, 10, 14, 12, 0, 0).unwrap();
        let kept = filter_recent(feed.entries, cutoff);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].link.as_deref(), Some("https://blog.example.com/odd"));
    }

    #[test]
    fn test_empty_channel() {
        let xml = r#"<rss version="2.0"><channel><title>t</title><link>https://e.example.com</link><description>d</description></channel></rss>"#;
        let feed = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(feed, Feed::default());
    }

    #[test]
    fn test_not_a_feed() {
        assert!(matches!(parse_feed(b"<html><body>hi</body></html>"), Err(Error::Feed(_))));
    }
}
