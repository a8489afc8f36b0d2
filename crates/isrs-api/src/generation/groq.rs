//! Client for an OpenAI-compatible chat completion endpoint (Groq by default).

use std::{fmt, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CompletionRequest, GenerationError, TextGenerator};
use crate::config::ApiConfig;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Generate a system message.
const fn system_message(content: &str) -> ChatMessage<'_> {
    ChatMessage {
        role: "system",
        content,
    }
}

/// Generate a user message.
const fn user_message(content: &str) -> ChatMessage<'_> {
    ChatMessage {
        role: "user",
        content,
    }
}

#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GroqClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, GenerationError> {
        Self::new(
            config.groq_api_key.clone(),
            config.groq_base_url.clone(),
            config.groq_model.clone(),
            config.generation_timeout(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn request_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatCompletionRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(system_message(system));
        }
        messages.push(user_message(&request.prompt));

        ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: request.temperature,
        }
    }
}

/// Pull the text of the first choice out of a chat response.
fn first_choice_content(response: ChatCompletionResponse) -> Result<String, GenerationError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(GenerationError::EmptyChoices)?;
    Ok(choice.message.content.unwrap_or_default())
}

fn map_send_error(error: reqwest::Error) -> GenerationError {
    if error.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Http(error)
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        let body = self.request_body(&request);

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Text service request failed");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(map_send_error)?;
        first_choice_content(parsed)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client(base_url: &str) -> GroqClient {
        GroqClient::new("test-key", base_url, "llama3-8b-8192", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            client("https://api.groq.com/openai/v1/").endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(
            client("http://localhost:9000").endpoint(),
            "http://localhost:9000/chat/completions"
        );
    }

    #[test]
    fn test_request_body_user_only() {
        let client = client("http://localhost");
        let request = CompletionRequest::user("Say hi");

        let body = serde_json::to_value(client.request_body(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "llama3-8b-8192",
                "messages": [{ "role": "user", "content": "Say hi" }]
            })
        );
    }

    #[test]
    fn test_request_body_with_system_and_temperature() {
        let client = client("http://localhost");
        let request = CompletionRequest {
            system: Some("Be brief".to_string()),
            prompt: "Say hi".to_string(),
            temperature: Some(0.5),
        };

        let body = serde_json::to_value(client.request_body(&request)).unwrap();

        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Be brief");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn test_first_choice_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "El perro corre." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }))
        .unwrap();

        assert_eq!(first_choice_content(response).unwrap(), "El perro corre.");
    }

    #[test]
    fn test_missing_content_is_empty_text() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }))
        .unwrap();

        assert_eq!(first_choice_content(response).unwrap(), "");
    }

    #[test]
    fn test_no_choices_is_error() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();

        assert!(matches!(
            first_choice_content(response),
            Err(GenerationError::EmptyChoices)
        ));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let rendered = format!("{:?}", client("http://localhost"));
        assert!(!rendered.contains("test-key"));
        assert!(rendered.contains("llama3-8b-8192"));
    }
}
