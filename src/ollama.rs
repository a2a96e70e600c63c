//! Typed client for the Ollama `/api/chat` endpoint.
//!
//! Every gateway operation issues exactly one non-streaming chat call.
//! There is no retry and no request timeout; a stalled upstream holds the
//! request open.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Outbound chat-completion payload. Always two messages (one system, one
/// user) and `stream: false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: Option<ResponseMessage>,
}

/// A reply message may legitimately carry no content; that case maps to
/// the gateway's "no response" body, not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Error)]
pub enum OllamaError {
    #[error("request to ollama failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("ollama returned status {0}")]
    UpstreamStatus(StatusCode),
}

#[derive(Clone)]
pub struct OllamaClient {
    http: Client,
    chat_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http: Client::new(),
            chat_url: format!("{}/api/chat", base_url.trim_end_matches('/')),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request construction is a pure function of the configured model and
    /// the two prompt strings.
    pub fn chat_request(&self, system: &str, user: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user.to_string(),
                },
            ],
            stream: false,
        }
    }

    /// Sends one chat request. `Ok(None)` means the upstream answered 2xx
    /// but the body carried no `message.content` (including bodies that
    /// are not JSON at all).
    pub async fn chat(&self, request: &ChatRequest) -> Result<Option<String>, OllamaError> {
        let response = self.http.post(&self.chat_url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OllamaError::UpstreamStatus(status));
        }

        let body = response.bytes().await?;
        let Ok(parsed) = serde_json::from_slice::<ChatResponse>(&body) else {
            return Ok(None);
        };

        Ok(parsed.message.and_then(|message| message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_carries_model_and_both_messages() {
        let client = OllamaClient::new("http://localhost:11434", "deepseek-r1:latest");
        let value = serde_json::to_value(client.chat_request("sys", "2+2")).unwrap();

        assert_eq!(value["model"], "deepseek-r1:latest");
        assert_eq!(value["stream"], false);

        let messages = value["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "sys");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "2+2");
    }

    #[test]
    fn chat_request_is_deterministic() {
        let client = OllamaClient::new("http://localhost:11434", "deepseek-r1:latest");
        let first = serde_json::to_value(client.chat_request("sys", "2+2")).unwrap();
        let second = serde_json::to_value(client.chat_request("sys", "2+2")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let client = OllamaClient::new("http://localhost:11434/", "m");
        assert_eq!(client.chat_url, "http://localhost:11434/api/chat");
    }

    #[test]
    fn missing_message_or_content_parses_to_none() {
        let parsed: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.message.is_none());

        let parsed: ChatResponse = serde_json::from_str(r#"{"message":{}}"#).unwrap();
        assert!(parsed.message.unwrap().content.is_none());
    }

    #[test]
    fn present_content_parses_through() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"message":{"role":"assistant","content":"4"}}"#).unwrap();
        assert_eq!(parsed.message.unwrap().content.as_deref(), Some("4"));
    }
}
