//! Article summarization and title translation.

use crate::api::TextGenerator;
use crate::error::Result;
use crate::models::Article;
use crate::utils::{fill_placeholders, truncate_for_log};
use tracing::{debug, instrument};

/// Prompt text for one digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    /// Language summaries and translated titles are written in.
    pub language: String,
    /// System instruction for the summary call.
    pub system_instruction: String,
    /// User message for the summary call; `{title}` and `{text}` are filled in.
    pub contents_format: String,
}

impl Prompts {
    pub fn for_language(language: &str) -> Self {
        Self {
            language: language.to_string(),
            system_instruction: format!(
                "You will be given the title and description of a feed item. Read it carefully and write a detailed summary in {language}.\n\
                 The text was extracted from HTML, so parts may be missing and it may contain formulas, code or unrelated fragments.\n\
                 Output only the summary. Do not include links, credits or sponsor messages. Do not add anything that is not in the text."
            ),
            contents_format: "{title}\n\nBody:\n{text}".to_string(),
        }
    }

    fn contents(&self, article: &Article) -> String {
        fill_placeholders(
            &self.contents_format,
            &[("title", article.title.as_str()), ("text", article.text.as_str())],
        )
    }

    fn translation_instruction(&self) -> String {
        format!(
            "Translate the title the user gives you into natural, readable {}. Always output exactly one translation and nothing else.",
            self.language
        )
    }
}

/// Produces summaries through a [`TextGenerator`].
#[derive(Debug)]
pub struct Summarizer<'a, G> {
    generator: &'a G,
    prompts: &'a Prompts,
}

impl<'a, G: TextGenerator> Summarizer<'a, G> {
    pub fn new(generator: &'a G, prompts: &'a Prompts) -> Self {
        Self { generator, prompts }
    }

    /// Summary for `article`.
    ///
    /// When the entry carried no summary HTML at all there is nothing to
    /// summarize and the extracted text is returned unchanged, without an LLM
    /// call.
    #[instrument(level = "info", skip_all, fields(title = %article.title))]
    pub async fn summarize(&self, article: &Article) -> Result<String> {
        if article.raw_summary_html.trim().is_empty() {
            debug!("No summary source; using extracted text");
            return Ok(article.text.clone());
        }

        let summary = self
            .generator
            .generate(&self.prompts.contents(article), &self.prompts.system_instruction)
            .await?;
        debug!(summary = %truncate_for_log(&summary, 200), "Generated summary");
        Ok(summary)
    }

    /// One translation of `title` into the digest language.
    #[instrument(level = "info", skip(self))]
    pub async fn translate_title(&self, title: &str) -> Result<String> {
        let prompt = format!(
            "Translate the following title into {}:\n\n{title}",
            self.prompts.language
        );
        self.generator
            .generate(&prompt, &self.prompts.translation_instruction())
            .await
    }
}
