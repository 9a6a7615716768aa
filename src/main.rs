//! # Feed Digest
//!
//! A daily digest pipeline that pulls recent items from RSS and Atom feeds
//! (podcasts, video channels, tech blogs, forums, paper listings), summarizes
//! each one with an LLM, and writes one Markdown digest per profile per day.
//!
//! ## Features
//!
//! - Any number of digest profiles, each with its own feeds, prompts and
//!   Markdown template, all in one YAML file
//! - Recency window and per-feed cap on the number of items
//! - Podcast and video-aware thumbnails (`itunes:image`, Media RSS, YouTube)
//! - Summaries through any OpenAI-compatible endpoint via `awful_aj`
//! - A failing item never takes down its digest; a failing digest never
//!   takes down the run
//!
//! ## Usage
//!
//! ```sh
//! feed_digest -c config/digests.yaml -o ./output
//! ```
//!
//! ## Architecture
//!
//! For each selected profile, in config order:
//! 1. **Fetching**: Download and parse each feed of the profile
//! 2. **Filtering**: Keep entries newer than the threshold, capped per feed
//! 3. **Processing**: Build, summarize and render each entry, one at a time
//! 4. **Output**: Write `{output_dir}/{profile}/{YYYY-MM-DD}.md`

use awful_aj::config::load_config as load_llm_config;
use awful_aj::config_dir;
use chrono::{Local, Utc};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod article;
mod cli;
mod config;
mod error;
mod feeds;
mod filter;
mod models;
mod outputs;
mod pipeline;
mod summarize;
mod utils;

use api::AwfulJadeGenerator;
use cli::Cli;
use config::Settings;
use feeds::HttpFeedFetcher;
use pipeline::Pipeline;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feed_digest starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.output_dir, ?args.digests, "Parsed CLI arguments");

    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    // ---- Digest configuration ----
    let settings = Settings::load(&args.config).await?;
    let profiles = settings.select(&args.digests)?;
    info!(count = profiles.len(), "Selected digests");

    // ---- LLM configuration ----
    let llm_config_path: PathBuf = match &args.llm_config {
        Some(path) => path.clone(),
        None => config_dir()?.join("config.yaml"),
    };
    let llm_config_str = llm_config_path
        .to_str()
        .ok_or("LLM config path is not valid UTF-8")?;
    let llm_config = load_llm_config(llm_config_str)?;
    info!(config_path = llm_config_str, "Loaded LLM configuration");

    let fetcher = HttpFeedFetcher::new()?;
    let generator = AwfulJadeGenerator::new(llm_config);
    let pipeline = Pipeline::new(&fetcher, &generator, &args.output_dir);

    // ---- Run digests ----
    let run_date = Local::now().date_naive();
    let mut failed_digests = 0usize;
    for profile in &profiles {
        match pipeline.run(profile, Utc::now(), run_date).await {
            Ok(report) => info!(
                digest = %report.name,
                rendered = report.rendered,
                failed = report.failed,
                path = %report.path.display(),
                "Digest written"
            ),
            Err(e) => {
                failed_digests += 1;
                error!(digest = %profile.name, error = %e, "Digest failed; continuing with next");
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        digests = profiles.len(),
        failed = failed_digests,
        elapsed_ms = elapsed.as_millis() as u64,
        "feed_digest finished"
    );

    Ok(())
}
