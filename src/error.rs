//! Error type shared by the digest pipeline.
//!
//! Item-level variants ([`Error::MissingField`], [`Error::Generation`]) are
//! caught and logged by the pipeline driver; the rest abort the current
//! digest and are reported by `main`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} while fetching {url}")]
    Status { url: String, status: u16 },

    #[error("Feed parse error: {0}")]
    Feed(String),

    #[error("Entry has no {0}")]
    MissingField(&'static str),

    #[error("Text generation failed: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Unknown digest: {0}")]
    UnknownDigest(String),

    #[error("Invalid setting for {digest}: {reason}")]
    InvalidSetting { digest: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
