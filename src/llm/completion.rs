//! OpenAI-compatible chat completion client
//!
//! Talks to any endpoint that accepts the `/v1/chat/completions` request
//! format (DeepSeek, OpenAI, Ollama, LM Studio, ...).
//!
//! # Example
//!
//! ```no_run
//! use sitesmith::llm::{ChatClient, ChatMessage, ChatRequest, CompletionClient};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CompletionClient::new(
//!     "https://api.deepseek.com/v1/chat/completions".to_string(),
//!     "deepseek-chat".to_string(),
//!     Some("sk-...".to_string()),
//!     Duration::from_secs(60),
//! )?;
//!
//! let response = client
//!     .chat(ChatRequest::new(vec![ChatMessage::user("Make my header blue")]))
//!     .await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

use super::client::ChatClient;
use super::error::BackendError;
use super::types::{ChatMessage, ChatRequest, ChatResponse, TokenUsage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Client for an OpenAI-compatible completion endpoint
///
/// Thread-safe; share it with `Arc` if several sessions use the same endpoint.
pub struct CompletionClient {
    /// Full URL of the chat completions endpoint
    endpoint: String,

    /// Model name sent with every request
    model: String,

    /// Bearer token, if the endpoint needs one
    api_key: Option<String>,

    /// Shared HTTP client with connection pooling
    http_client: Client,

    timeout: Duration,
}

impl CompletionClient {
    pub fn new(
        endpoint: String,
        model: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(BackendError::Configuration {
                message: format!("Endpoint must be an http(s) URL: {}", endpoint),
            });
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Configuration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        debug!("Creating completion client: endpoint={}, model={}", endpoint, model);

        Ok(Self {
            endpoint,
            model,
            api_key,
            http_client,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_body(&self, request: &ChatRequest) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: request.messages.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            error!("Completion request timed out after {:?}", self.timeout);
            BackendError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            error!("Cannot connect to completion endpoint at {}", self.endpoint);
            BackendError::Network {
                message: format!("Connection failed: {}", e),
            }
        } else {
            error!("Completion request error: {}", e);
            BackendError::Network {
                message: format!("Request failed: {}", e),
            }
        }
    }
}

/// Maps a non-success HTTP status and body onto a backend error
fn status_error(status: StatusCode, body: String, retry_after: Option<u64>) -> BackendError {
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimited { retry_after },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Authentication { message },
        _ => BackendError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl ChatClient for CompletionClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError> {
        let body = self.build_body(&request);

        debug!(
            messages = body.messages.len(),
            max_tokens = ?body.max_tokens,
            "Sending completion request"
        );

        let start = Instant::now();

        let mut builder = self.http_client.post(&self.endpoint).json(&body);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();

            warn!("Completion API returned error status {}: {}", status, body);
            return Err(status_error(status, body, retry_after));
        }

        let api_response: CompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse completion response: {}", e);
            BackendError::InvalidResponse {
                message: format!("JSON parse error: {}", e),
            }
        })?;

        let elapsed = start.elapsed();
        info!("Completion finished in {:.2}s", elapsed.as_secs_f64());

        let usage = api_response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        });

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .ok_or_else(|| BackendError::InvalidResponse {
                message: "No content in completion response".to_string(),
            })?;

        let mut response = ChatResponse::text(content, elapsed);
        if let Some(usage) = usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Token usage"
            );
            response = response.with_usage(usage);
        }
        Ok(response)
    }

    fn name(&self) -> &str {
        "completion"
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CompletionClient {
        CompletionClient::new(
            "http://localhost:9/v1/chat/completions".to_string(),
            "deepseek-chat".to_string(),
            None,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let result = CompletionClient::new(
            "localhost:11434".to_string(),
            "m".to_string(),
            None,
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(BackendError::Configuration { .. })));
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest::new(vec![ChatMessage::system("sys"), ChatMessage::user("hi")])
            .with_max_tokens(256);
        let body = serde_json::to_value(client().build_body(&request)).unwrap();

        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new(), Some(2)),
            BackendError::RateLimited {
                retry_after: Some(2)
            }
        );
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "nope".to_string(), None),
            BackendError::Authentication { .. }
        ));
        assert_eq!(
            status_error(
                StatusCode::BAD_REQUEST,
                r#"{"error": {"message": "bad model"}}"#.to_string(),
                None
            ),
            BackendError::Api {
                status: 400,
                message: "bad model".to_string()
            }
        );
    }

    #[test]
    fn test_parse_completion_response() {
        let raw = r#"{
            "choices": [{"message": {"role": "assistant", "content": "I'll make the header blue"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19}
        }"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.as_ref().unwrap().content,
            "I'll make the header blue"
        );
        assert_eq!(parsed.usage.unwrap().completion_tokens, 7);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let result = client().chat(ChatRequest::new(vec![ChatMessage::user("hi")])).await;
        assert!(matches!(
            result,
            Err(BackendError::Network { .. }) | Err(BackendError::Timeout { .. })
        ));
    }

    #[test]
    fn test_model_info() {
        assert_eq!(client().model_info(), Some("deepseek-chat".to_string()));
        assert_eq!(client().endpoint(), "http://localhost:9/v1/chat/completions");
    }
}
