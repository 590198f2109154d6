// src/generation/groq.rs

//! Groq chat-completions client (OpenAI-compatible API).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{CompletionClient, GenerationError};
use crate::config::GroqConfig;

/// Calls `POST {base_url}/v1/chat/completions` with the prompt as a single user message.
pub struct GroqClient {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f64,
    client: reqwest::Client,
}

impl GroqClient {
    pub fn new(config: &GroqConfig) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| {
                GenerationError::UpstreamFailure(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            client,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for GroqClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::UpstreamFailure("request timed out".to_string())
                } else {
                    GenerationError::UpstreamFailure(format!("network error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::UpstreamFailure(format!(
                "HTTP {}: {}",
                status.as_u16(),
                detail
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            GenerationError::UpstreamFailure(format!("unreadable completion response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::UpstreamFailure("response had no content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GroqClient {
        GroqClient::new(&GroqConfig {
            api_key: "test-key".to_string(),
            base_url: server.uri(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.7,
            timeout_secs: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama-3.1-8b-instant",
                "messages": [{"role": "user", "content": "make a quiz"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "[1]"}}]
            })))
            .mount(&server)
            .await;

        let text = client_for(&server).complete("make a quiz").await.unwrap();
        assert_eq!(text, "[1]");
    }

    #[tokio::test]
    async fn error_status_is_upstream_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("x").await.unwrap_err();
        assert!(matches!(err, GenerationError::UpstreamFailure(_)));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn empty_choices_is_upstream_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": []
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("x").await.unwrap_err();
        assert!(matches!(err, GenerationError::UpstreamFailure(_)));
    }
}
