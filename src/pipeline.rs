//! The feed-to-digest driver.
//!
//! One [`Pipeline`] runs any [`DigestProfile`]. For every feed of the profile,
//! in registry order:
//!
//! 1. **Fetch** the feed (an error here aborts the whole profile)
//! 2. **Filter** entries to the recency window
//! 3. **Cap** to the first `max_entries_per_day` survivors
//! 4. **Iterate**: build, summarize and render each entry; a failing entry is
//!    logged and skipped, and the driver pauses `item_delay` between entries
//!
//! Once every feed is done the blocks are joined and written, even when there
//! are none.
//!
//! Entries are processed strictly one at a time. The pause runs between two
//! attempted entries, across feed boundaries too, but never after the last.

use crate::api::TextGenerator;
use crate::article::build_article;
use crate::config::FeedRegistry;
use crate::error::{Error, Result};
use crate::feeds::FeedFetcher;
use crate::filter::{filter_recent, threshold};
use crate::models::{Feed, RawEntry};
use crate::outputs::digest::write_digest;
use crate::outputs::markdown::{DigestTemplate, join_blocks};
use crate::summarize::{Prompts, Summarizer};
use chrono::{DateTime, NaiveDate, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Limits and pacing for one digest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Maximum entries taken from each feed after filtering.
    pub max_entries_per_day: usize,
    /// Size of the recency window.
    pub threshold_days: i64,
    /// Pause between two processed entries. Zero disables it.
    pub item_delay: Duration,
}

/// Everything that distinguishes one digest from another.
#[derive(Debug, Clone)]
pub struct DigestProfile {
    /// Digest name; also the output subdirectory.
    pub name: String,
    pub feeds: FeedRegistry,
    pub prompts: Prompts,
    pub template: DigestTemplate,
    pub options: PipelineOptions,
}

/// Outcome of one profile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestReport {
    pub name: String,
    /// Where the digest was written.
    pub path: PathBuf,
    /// Entries rendered into the digest.
    pub rendered: usize,
    /// Entries skipped because building, summarizing or rendering failed.
    pub failed: usize,
}

/// Sequential digest driver over a feed fetcher and a text generator.
pub struct Pipeline<'a, F, G> {
    fetcher: &'a F,
    generator: &'a G,
    output_dir: &'a Path,
}

impl<'a, F: FeedFetcher, G: TextGenerator> Pipeline<'a, F, G> {
    pub fn new(fetcher: &'a F, generator: &'a G, output_dir: &'a Path) -> Self {
        Self {
            fetcher,
            generator,
            output_dir,
        }
    }

    /// Run `profile` as of `now`, writing the digest dated `date`.
    #[instrument(level = "info", skip_all, fields(digest = %profile.name, feeds = profile.feeds.len()))]
    pub async fn run(&self, profile: &DigestProfile, now: DateTime<Utc>, date: NaiveDate) -> Result<DigestReport> {
        let cutoff = threshold(now, profile.options.threshold_days).ok_or_else(|| Error::InvalidSetting {
            digest: profile.name.clone(),
            reason: format!("threshold_days {} is out of range", profile.options.threshold_days),
        })?;
        let summarizer = Summarizer::new(self.generator, &profile.prompts);
        info!(%cutoff, max = profile.options.max_entries_per_day, "Starting digest");
        if profile.feeds.is_empty() {
            warn!("Digest has no feeds; writing an empty digest");
        }

        let mut blocks: Vec<String> = Vec::new();
        let mut failed = 0usize;
        let mut pending_pause = false;

        for source in profile.feeds.iter() {
            let Feed { image, entries } = self.fetcher.fetch(&source.url).await?;

            let fetched = entries.len();
            let mut recent = filter_recent(entries, cutoff);
            recent.truncate(profile.options.max_entries_per_day);
            info!(feed = %source.name, fetched, kept = recent.len(), "Filtered feed");

            for entry in &recent {
                if pending_pause && !profile.options.item_delay.is_zero() {
                    tokio::time::sleep(profile.options.item_delay).await;
                }
                pending_pause = true;

                match self
                    .process(entry, &source.name, image.as_deref(), &summarizer, &profile.template)
                    .await
                {
                    Ok(block) => blocks.push(block),
                    Err(e) => {
                        failed += 1;
                        warn!(
                            feed = %source.name,
                            link = entry.link.as_deref().unwrap_or("unknown"),
                            error = %e,
                            "Skipping entry"
                        );
                    }
                }
            }
        }

        let path = write_digest(self.output_dir, &profile.name, date, &join_blocks(&blocks)).await?;
        let report = DigestReport {
            name: profile.name.clone(),
            path,
            rendered: blocks.len(),
            failed,
        };
        info!(rendered = report.rendered, failed = report.failed, path = %report.path.display(), "Digest complete");
        Ok(report)
    }

    /// Build, summarize and render one entry.
    async fn process(
        &self,
        entry: &RawEntry,
        feed_name: &str,
        feed_image: Option<&str>,
        summarizer: &Summarizer<'_, G>,
        template: &DigestTemplate,
    ) -> Result<String> {
        let article = build_article(entry, feed_name, feed_image, summarizer).await?;
        let summary = summarizer.summarize(&article).await?;
        let article = article.with_summary(summary);
        debug!(title = %article.title, thumbnail = ?article.thumbnail_url, "Rendering entry");
        Ok(template.render(&article))
    }
}
