//! Writing finished digests to disk.
//!
//! ```text
//! output_dir/
//! ├── sns_feed/
//! │   ├── 2025-05-06.md
//! │   └── 2025-05-07.md
//! └── tech_feed/
//!     └── 2025-05-07.md
//! ```

use crate::error::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Location of the digest for `name` on `date`.
pub fn digest_path(output_dir: &Path, name: &str, date: NaiveDate) -> PathBuf {
    output_dir
        .join(name)
        .join(format!("{}.md", date.format("%Y-%m-%d")))
}

/// Write `markdown` as the digest for `name` on `date`, replacing any
/// existing file.
#[instrument(level = "info", skip(output_dir, markdown), fields(bytes = markdown.len()))]
pub async fn write_digest(output_dir: &Path, name: &str, date: NaiveDate, markdown: &str) -> Result<PathBuf> {
    let path = digest_path(output_dir, name, date);

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create digest dir");
            return Err(e.into());
        }
    }

    fs::write(&path, markdown).await?;
    info!(path = %path.display(), "Wrote digest");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 6).unwrap()
    }

    #[test]
    fn test_digest_path() {
        assert_eq!(
            digest_path(Path::new("/srv/out"), "sns_feed", date()),
            PathBuf::from("/srv/out/sns_feed/2025-05-06.md")
        );
    }

    #[tokio::test]
    async fn test_write_digest_creates_dirs_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();

        let path = write_digest(tmp.path(), "tech_feed", date(), "first").await.unwrap();
        assert_eq!(path, tmp.path().join("tech_feed/2025-05-06.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");

        write_digest(tmp.path(), "tech_feed", date(), "second").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[tokio::test]
    async fn test_write_empty_digest() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_digest(tmp.path(), "blog_feed", date(), "").await.unwrap();
        assert!(path.is_file());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
