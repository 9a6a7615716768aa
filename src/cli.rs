//! Command-line interface definitions for Feed Digest.
//!
//! Every option can also come from an environment variable, which is how the
//! tool is usually configured when run from a scheduler.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Feed Digest application.
///
/// # Examples
///
/// ```sh
/// # Run every digest in the default config
/// feed_digest
///
/// # Run only two digests, writing under /srv/digests
/// feed_digest -o /srv/digests -d sns_feed -d tech_feed
///
/// # Use a specific LLM configuration
/// feed_digest --llm-config ~/.config/aj/local.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the digest configuration (feeds, prompts, limits)
    #[arg(short, long, env = "DIGEST_CONFIG", default_value = "config/digests.yaml")]
    pub config: PathBuf,

    /// Root directory for the Markdown digests
    #[arg(short, long, env = "OUTPUT_DIR", default_value = "./output")]
    pub output_dir: PathBuf,

    /// Optional path to the LLM config.yaml (defaults to the awful_aj config directory)
    #[arg(long, env = "LLM_CONFIG")]
    pub llm_config: Option<PathBuf>,

    /// Digest to run; repeat to run several. Runs every digest when omitted
    #[arg(short, long = "digest", value_name = "NAME")]
    pub digests: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "feed_digest",
            "--config",
            "/etc/digests.yaml",
            "--output-dir",
            "./out",
            "--llm-config",
            "/etc/aj.yaml",
        ]);

        assert_eq!(cli.config, PathBuf::from("/etc/digests.yaml"));
        assert_eq!(cli.output_dir, PathBuf::from("./out"));
        assert_eq!(cli.llm_config, Some(PathBuf::from("/etc/aj.yaml")));
        assert!(cli.digests.is_empty());
    }

    #[test]
    fn test_cli_short_flags_and_repeated_digest() {
        let cli = Cli::parse_from(["feed_digest", "-o", "/tmp/out", "-d", "sns_feed", "-d", "tech_feed"]);

        assert_eq!(cli.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(cli.digests, vec!["sns_feed", "tech_feed"]);
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["feed_digest", "--json-output-dir", "x"]).is_err());
    }
}
