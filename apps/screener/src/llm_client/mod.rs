/// LLM Client — the single point of entry for all chat-completion calls in the screener.
///
/// ARCHITECTURAL RULE: No other module may call the completion provider directly.
/// All LLM interactions MUST go through the `CompletionClient` trait.
///
/// One call per screening: no retry, no streaming. The request timeout comes from config.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::CompletionConfig;

pub mod prompts;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message of a chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The completion capability. Implement this to swap providers without touching
/// the screening pipeline.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Takes the text of the first choice, if the provider returned any.
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// OpenAI-compatible chat-completions client.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            api_key: config.api_key,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Completion call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion.into_text().ok_or(CompletionError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Router,
    };

    #[test]
    fn test_request_serializes_roles_lowercase() {
        let messages = vec![ChatMessage::system("persona"), ChatMessage::user("resume")];
        let request = ChatCompletionRequest {
            model: "gpt-4",
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "resume");
    }

    #[test]
    fn test_response_text_takes_first_choice() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Analysis\nOVERALL_DECISION: qualified"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 812, "completion_tokens": 240, "total_tokens": 1052}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.into_text().as_deref(),
            Some("Analysis\nOVERALL_DECISION: qualified")
        );
    }

    #[test]
    fn test_response_without_choices_has_no_text() {
        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(parsed.into_text().is_none());
    }

    #[test]
    fn test_null_content_has_no_text() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.into_text().is_none());
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = OpenAiClient::new(CompletionConfig {
            api_key: "sk-test".to_string(),
            base_url: "http://localhost:1234/v1/".to_string(),
            model: "gpt-4".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        assert_eq!(client.endpoint, "http://localhost:1234/v1/chat/completions");
        assert_eq!(client.model(), "gpt-4");
    }

    /// Serves `/v1/chat/completions` on an ephemeral port with a fixed reply and
    /// records the `Authorization` header of the last request.
    async fn stub_provider(
        status: StatusCode,
        reply: &'static str,
    ) -> (OpenAiClient, Arc<Mutex<Option<String>>>) {
        let authorization = Arc::new(Mutex::new(None));
        let seen = authorization.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap| async move {
                *seen.lock().unwrap() = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                (status, reply)
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = OpenAiClient::new(CompletionConfig {
            api_key: "sk-test".to_string(),
            base_url: format!("http://{addr}/v1"),
            model: "gpt-4".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        (client, authorization)
    }

    fn prompt() -> Vec<ChatMessage> {
        vec![ChatMessage::system("persona"), ChatMessage::user("resume")]
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice_and_sends_bearer_key() {
        let (client, authorization) = stub_provider(
            StatusCode::OK,
            r#"{"choices":[{"message":{"role":"assistant","content":"Fine\nOVERALL_DECISION: qualified"}}]}"#,
        )
        .await;

        let text = client.complete(&prompt()).await.unwrap();

        assert_eq!(text, "Fine\nOVERALL_DECISION: qualified");
        assert_eq!(
            authorization.lock().unwrap().as_deref(),
            Some("Bearer sk-test")
        );
    }

    #[tokio::test]
    async fn test_provider_error_message_is_surfaced() {
        let (client, _) = stub_provider(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"Rate limit reached for gpt-4","type":"requests"}}"#,
        )
        .await;

        match client.complete(&prompt()).await.unwrap_err() {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached for gpt-4");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unstructured_error_body_is_kept_verbatim() {
        let (client, _) = stub_provider(StatusCode::BAD_GATEWAY, "upstream down").await;

        match client.complete(&prompt()).await.unwrap_err() {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_content() {
        let (client, _) = stub_provider(StatusCode::OK, r#"{"choices":[]}"#).await;

        let err = client.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyContent));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_parse_error() {
        let (client, _) = stub_provider(StatusCode::OK, "<html>gateway</html>").await;

        let err = client.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, CompletionError::Parse(_)));
    }
}
