//! Digest configuration loaded from YAML.
//!
//! One file describes every digest the tool produces. Global limits apply to
//! all digests unless a digest overrides them:
//!
//! ```yaml
//! max_entries_per_day: 10
//! threshold_days: 1
//! item_delay_ms: 2000
//! language: Japanese
//! digests:
//!   - name: sns_feed
//!     feeds:
//!       - name: Lex Fridman
//!         url: https://lexfridman.com/feed/podcast/
//! ```
//!
//! Prompt text and the Markdown block template have built-in defaults and can
//! be replaced per digest.

use crate::error::{Error, Result};
use crate::filter::recency_window;
use crate::outputs::markdown::DigestTemplate;
use crate::pipeline::{DigestProfile, PipelineOptions};
use crate::summarize::Prompts;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

fn default_max_entries() -> usize {
    10
}

fn default_threshold_days() -> i64 {
    1
}

fn default_item_delay_ms() -> u64 {
    2000
}

fn default_language() -> String {
    "Japanese".to_string()
}

/// One named feed URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

/// Ordered name → URL mapping for the feeds of one digest.
///
/// Duplicate names are not rejected: a later source replaces the URL of the
/// earlier one and keeps the earlier position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<FeedSource>")]
pub struct FeedRegistry {
    sources: Vec<FeedSource>,
}

impl FeedRegistry {
    pub fn iter(&self) -> impl Iterator<Item = &FeedSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl From<Vec<FeedSource>> for FeedRegistry {
    fn from(list: Vec<FeedSource>) -> Self {
        let mut sources: Vec<FeedSource> = Vec::with_capacity(list.len());
        for source in list {
            match sources.iter_mut().find(|s| s.name == source.name) {
                Some(existing) => {
                    debug!(name = %source.name, url = %source.url, "Duplicate feed name overrides earlier URL");
                    existing.url = source.url;
                }
                None => sources.push(source),
            }
        }
        Self { sources }
    }
}

/// A digest as written in the config file, before defaults are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
    pub name: String,
    pub feeds: FeedRegistry,
    #[serde(default)]
    pub system_instruction: Option<String>,
    #[serde(default)]
    pub contents_format: Option<String>,
    #[serde(default)]
    pub markdown_template: Option<String>,
    #[serde(default)]
    pub max_entries_per_day: Option<usize>,
    #[serde(default)]
    pub threshold_days: Option<i64>,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_max_entries")]
    pub max_entries_per_day: usize,
    #[serde(default = "default_threshold_days")]
    pub threshold_days: i64,
    #[serde(default = "default_item_delay_ms")]
    pub item_delay_ms: u64,
    /// Language the summaries and title translations are written in.
    #[serde(default = "default_language")]
    pub language: String,
    pub digests: Vec<DigestConfig>,
}

impl Settings {
    /// Read and parse the configuration file at `path`.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let settings = Self::from_yaml(&raw)?;
        info!(digests = settings.digests.len(), "Loaded digest configuration");
        Ok(settings)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Resolve the digests to run. An empty `names` selects every digest in
    /// file order; otherwise the named digests are returned in the given order.
    pub fn select(&self, names: &[String]) -> Result<Vec<DigestProfile>> {
        if names.is_empty() {
            return self.digests.iter().map(|d| self.profile(d)).collect();
        }
        names
            .iter()
            .map(|name| {
                self.digests
                    .iter()
                    .find(|d| &d.name == name)
                    .ok_or_else(|| Error::UnknownDigest(name.clone()))
                    .and_then(|d| self.profile(d))
            })
            .collect()
    }

    /// Apply global defaults to one digest entry.
    ///
    /// Fails when the resulting recency window is negative or too large to
    /// subtract from a timestamp.
    pub fn profile(&self, digest: &DigestConfig) -> Result<DigestProfile> {
        let threshold_days = digest.threshold_days.unwrap_or(self.threshold_days);
        if recency_window(threshold_days).is_none() {
            return Err(Error::InvalidSetting {
                digest: digest.name.clone(),
                reason: format!("threshold_days {threshold_days} is out of range"),
            });
        }

        let mut prompts = Prompts::for_language(&self.language);
        if let Some(instruction) = &digest.system_instruction {
            prompts.system_instruction = instruction.clone();
        }
        if let Some(format) = &digest.contents_format {
            prompts.contents_format = format.clone();
        }

        let template = digest
            .markdown_template
            .as_deref()
            .map(DigestTemplate::new)
            .unwrap_or_default();

        Ok(DigestProfile {
            name: digest.name.clone(),
            feeds: digest.feeds.clone(),
            prompts,
            template,
            options: PipelineOptions {
                max_entries_per_day: digest
                    .max_entries_per_day
                    .unwrap_or(self.max_entries_per_day),
                threshold_days,
                item_delay: Duration::from_millis(self.item_delay_ms),
            },
        })
    }
}
