//! LLM text generation.
//!
//! This module defines the single capability the pipeline needs from a
//! language model: turn a prompt plus a system instruction into text.
//!
//! # Architecture
//!
//! - [`TextGenerator`]: Core trait defining one async generation call
//! - [`AwfulJadeGenerator`]: Implementation backed by `awful_aj::api::ask`,
//!   talking to any OpenAI-compatible endpoint configured in its `config.yaml`
//!
//! Each call is made exactly once. A failed call surfaces as
//! [`Error::Generation`] and the caller decides what to skip.

use crate::error::{Error, Result};
use awful_aj::api::ask;
use awful_aj::{config::AwfulJadeConfig, template::ChatTemplate};
use serde_yaml::{Mapping, Value};
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Trait for async, single-shot LLM text generation.
///
/// The generator is stateless between calls: nothing from one call is
/// visible to the next.
pub trait TextGenerator {
    /// Generate text for `content` under `system_instruction`.
    async fn generate(&self, content: &str, system_instruction: &str) -> Result<String>;
}

/// [`TextGenerator`] backed by `awful_aj`.
///
/// One instance is created per run and shared by every digest.
#[derive(Debug)]
pub struct AwfulJadeGenerator {
    /// LLM configuration (API key, endpoint, model settings).
    config: AwfulJadeConfig,
}

impl AwfulJadeGenerator {
    pub fn new(config: AwfulJadeConfig) -> Self {
        Self { config }
    }
}

/// Build a chat template whose only setting is the system prompt.
///
/// Going through YAML keeps the template's optional fields at their defaults.
fn chat_template(system_instruction: &str) -> Result<ChatTemplate> {
    let mut doc = Mapping::new();
    doc.insert("system_prompt".into(), system_instruction.into());
    doc.insert("messages".into(), Value::Sequence(Vec::new()));
    Ok(serde_yaml::from_value(Value::Mapping(doc))?)
}

impl TextGenerator for AwfulJadeGenerator {
    #[instrument(level = "info", skip_all, fields(content_bytes = content.len()))]
    async fn generate(&self, content: &str, system_instruction: &str) -> Result<String> {
        let template = chat_template(system_instruction)?;

        let t0 = Instant::now();
        let res = ask(&self.config, content.to_string(), &template, None, None, false).await;
        let dt = t0.elapsed();

        match res {
            Ok(text) => {
                debug!(elapsed_ms = dt.as_millis() as u64, bytes = text.len(), "LLM call succeeded");
                Ok(text.trim().to_string())
            }
            Err(e) => {
                warn!(elapsed_ms = dt.as_millis() as u64, error = %e, "LLM call failed");
                Err(Error::Generation(e.to_string()))
            }
        }
    }
}
