//! Text generation service used for example sentences and translations.
//!
//! The rest of the crate only sees the [`TextGenerator`] trait; [`GroqClient`]
//! is the production implementation and tests plug in stubs.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use thiserror::Error;

mod groq;
pub mod practice;

pub use groq::GroqClient;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Text service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Text service returned no choices")]
    EmptyChoices,
    #[error("Text service timed out")]
    Timeout,
}

/// A single prompt sent to the text service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// A bare user prompt with the service defaults
    pub fn user(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature: None,
        }
    }
}

/// External text generation capability
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one prompt and return the raw text of the first answer.
    ///
    /// An empty answer is a valid result, not an error.
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError>;

    /// Generate one simple sentence in `language` that contains `word`.
    async fn generate_sentence(
        &self,
        language: &str,
        word: &str,
    ) -> Result<String, GenerationError> {
        let sentence = self
            .complete(CompletionRequest::user(sentence_prompt(language, word)))
            .await?;
        Ok(sentence.trim().to_string())
    }

    /// Translate `text` from `source` to `target`, nothing else.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, GenerationError> {
        let translation = self
            .complete(CompletionRequest::user(translation_prompt(text, source, target)))
            .await?;
        Ok(translation.trim().to_string())
    }
}

/// Bound a generation call by `limit`, turning an elapsed deadline into [`GenerationError::Timeout`].
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, GenerationError>
where
    F: Future<Output = Result<T, GenerationError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| GenerationError::Timeout)?
}

pub fn sentence_prompt(language: &str, word: &str) -> String {
    format!(
        "Please provide exactly one simple and concise sentence in '{language}' \
         that includes the word '{word}'. Ensure the sentence is easy to understand \
         and does not contain any extra explanations or examples."
    )
}

pub fn translation_prompt(text: &str, source: &str, target: &str) -> String {
    format!(
        "You are a translator, translate {text} from {source} to {target}. \
         Please just translate the text, do not add any extra information."
    )
}
