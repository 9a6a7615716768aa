//! Digest output.
//!
//! # Submodules
//!
//! - [`markdown`]: Renders articles into Markdown blocks and joins them
//! - [`digest`]: Writes one digest per profile per day under the output root

pub mod digest;
pub mod markdown;
