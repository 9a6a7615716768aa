//! Feed retrieval.
//!
//! The pipeline only sees the [`FeedFetcher`] trait: given a URL, return the
//! feed's fallback image and its raw entries. [`HttpFeedFetcher`] is the
//! production implementation; it downloads the document with `reqwest` and
//! hands the bytes to [`parser::parse_feed`], which parses them with `feed-rs`.
//!
//! # Supported formats
//!
//! | Format | Typical sources |
//! |--------|-----------------|
//! | RSS 2.0 (+ iTunes, Media RSS, content) | podcasts, blogs, forums |
//! | RSS 0.9x / 1.0 / RDF | paper listings |
//! | Atom 1.0 (+ Media RSS), prefixed or default namespace | video channels, GitHub, blogs |
//! | JSON Feed | blogs |

pub mod parser;

use crate::error::{Error, Result};
use crate::models::Feed;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability that turns a feed URL into a parsed [`Feed`].
pub trait FeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Feed>;
}

/// Fetches feeds over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl FeedFetcher for HttpFeedFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Feed> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Downloaded feed");

        let feed = parser::parse_feed(&body)?;
        info!(entries = feed.entries.len(), image = ?feed.image, "Parsed feed");
        Ok(feed)
    }
}
